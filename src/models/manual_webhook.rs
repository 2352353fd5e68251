use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::diagnostics::Diagnostics;
use crate::error::ProviderError;
use crate::types::{HttpMethod, Value};

use super::common::{ensure_canonical, validate_non_empty_set, validate_not_empty};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HttpRequestModel {
    pub url: String,
    pub method: String,
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntegrationActionModel {
    pub integration_id: String,
    pub action_name: String,
}

/// Exactly one of `http_request` and `integration` must be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct WebhookTypeModel {
    pub http_request: Option<HttpRequestModel>,
    pub integration: Option<IntegrationActionModel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResponseValidatorModel {
    pub json_path: String,
    pub expected_values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OAuthModel {
    pub client_id: String,
    /// Sensitive and write-only.
    pub client_secret: Option<String>,
    pub token_endpoint_url: String,
    pub scopes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AuthenticationConfigModel {
    pub oauth: Option<OAuthModel>,
}

/// `apono_manual_webhook`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManualWebhookModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub active: Value<bool>,
    pub webhook_type: Value<WebhookTypeModel>,
    pub body_template: Value<String>,
    pub response_validators: Value<Vec<ResponseValidatorModel>>,
    pub timeout_in_sec: Value<Decimal>,
    pub authentication_config: Value<AuthenticationConfigModel>,
    pub custom_validation_error_message: Value<String>,
}

impl ManualWebhookModel {
    pub fn validate(&self) -> Diagnostics {
        let mut diags = Diagnostics::new();

        if let Some(webhook_type) = self.webhook_type.as_known() {
            match (&webhook_type.http_request, &webhook_type.integration) {
                (Some(request), None) => {
                    let attribute = "type.http_request.method";
                    let checked = HttpMethod::parse(&request.method).and_then(|method| {
                        ensure_canonical(attribute, &request.method, method.as_ref())
                    });
                    diags.capture(attribute, checked);
                    if request.url.is_empty() {
                        diags.add_error(
                            "type.http_request.url",
                            ProviderError::invalid_value("type.http_request.url", "must not be empty"),
                        );
                    }
                }
                (None, Some(_)) => {}
                (Some(_), Some(_)) | (None, None) => diags.add_error(
                    "type",
                    ProviderError::AmbiguousConfiguration(
                        "exactly one of type.http_request or type.integration must be set"
                            .to_string(),
                    ),
                ),
            }
        }

        if let Some(timeout) = self.timeout_in_sec.as_known() {
            if *timeout <= Decimal::ZERO {
                diags.add_error(
                    "timeout_in_sec",
                    ProviderError::invalid_value("timeout_in_sec", "must be positive"),
                );
            }
        }

        validate_not_empty("body_template", &self.body_template, &mut diags);
        validate_not_empty(
            "custom_validation_error_message",
            &self.custom_validation_error_message,
            &mut diags,
        );
        validate_non_empty_set("response_validators", &self.response_validators, &mut diags);

        if let Some(validators) = self.response_validators.as_known() {
            if validators.iter().any(|v| v.json_path.is_empty()) {
                diags.add_error(
                    "response_validators",
                    ProviderError::invalid_value(
                        "response_validators.json_path",
                        "must not be empty",
                    ),
                );
            }
        }

        diags
    }
}
