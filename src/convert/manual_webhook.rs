use rust_decimal::Decimal;
use tracing::debug;

use crate::api::models::{
    ManualWebhook, OAuthConfig, ResponseValidator, UpdateManualWebhook, UpsertManualWebhook,
    WebhookAuthentication, WebhookHttpRequest, WebhookIntegrationAction, WebhookType,
};
use crate::diagnostics::Diagnostics;
use crate::error::ProviderError;
use crate::models::{
    AuthenticationConfigModel, HttpRequestModel, IntegrationActionModel, ManualWebhookModel,
    OAuthModel, ResponseValidatorModel, WebhookTypeModel,
};
use crate::types::{HttpMethod, Value};

use super::{
    decimal_to_i32, none_if_empty, optional, optional_set, required, update_converted,
    update_plain,
};

/// Read a webhook into state.
///
/// The OAuth client secret is write-only upstream, so it is carried over
/// from `prior` when there is one.
pub fn to_model(api: &ManualWebhook, prior: Option<&ManualWebhookModel>) -> ManualWebhookModel {
    let prior_secret = prior
        .and_then(|p| p.authentication_config.as_known())
        .and_then(|a| a.oauth.as_ref())
        .and_then(|o| o.client_secret.clone());

    let authentication_config = api
        .authentication_config
        .as_ref()
        .and_then(|a| a.oauth.as_ref())
        .map(|oauth| AuthenticationConfigModel {
            oauth: Some(OAuthModel {
                client_id: oauth.client_id.clone(),
                client_secret: prior_secret,
                token_endpoint_url: oauth.token_endpoint_url.clone(),
                scopes: oauth.scopes.clone(),
            }),
        });

    debug!(event = "Convert", phase = "ToModel", object = "manual webhook", id = %api.id);
    ManualWebhookModel {
        id: Value::known(api.id.clone()),
        name: Value::known(api.name.clone()),
        active: Value::known(api.active),
        webhook_type: Value::known(webhook_type_to_model(&api.webhook_type)),
        body_template: none_if_empty(&api.body_template),
        response_validators: optional_set(
            api.response_validators
                .iter()
                .map(|v| ResponseValidatorModel {
                    json_path: v.json_path.clone(),
                    expected_values: v.expected_values.clone(),
                })
                .collect(),
        ),
        timeout_in_sec: Value::from_option(api.timeout_in_sec.map(Decimal::from)),
        authentication_config: Value::from_option(authentication_config),
        custom_validation_error_message: none_if_empty(&api.custom_validation_error_message),
    }
}

pub fn to_upsert_api(model: &ManualWebhookModel) -> Result<UpsertManualWebhook, Diagnostics> {
    let mut diags = Diagnostics::new();

    let name = diags.capture("name", required("name", &model.name)).cloned();
    let active = diags.capture("active", required("active", &model.active)).copied();
    let webhook_type = diags.capture(
        "type",
        required("type", &model.webhook_type).and_then(webhook_type_to_api),
    );
    let body_template = diags
        .capture("body_template", optional("body_template", &model.body_template))
        .map(|b| b.cloned());
    let response_validators = diags
        .capture(
            "response_validators",
            optional("response_validators", &model.response_validators),
        )
        .map(|v| v.map(|v| validators_to_api(v)).unwrap_or_default());
    let timeout_in_sec = diags.capture(
        "timeout_in_sec",
        optional("timeout_in_sec", &model.timeout_in_sec)
            .and_then(|t| t.map(|t| decimal_to_i32("timeout_in_sec", t)).transpose()),
    );
    let authentication_config = diags
        .capture(
            "authentication_config",
            optional("authentication_config", &model.authentication_config),
        )
        .map(|a| a.map(authentication_to_api));
    let custom_validation_error_message = diags
        .capture(
            "custom_validation_error_message",
            optional(
                "custom_validation_error_message",
                &model.custom_validation_error_message,
            ),
        )
        .map(|m| m.cloned());

    match (
        name,
        active,
        webhook_type,
        body_template,
        response_validators,
        timeout_in_sec,
        authentication_config,
        custom_validation_error_message,
    ) {
        (
            Some(name),
            Some(active),
            Some(webhook_type),
            Some(body_template),
            Some(response_validators),
            Some(timeout_in_sec),
            Some(authentication_config),
            Some(custom_validation_error_message),
        ) if !diags.has_errors() => Ok(UpsertManualWebhook {
            name,
            active,
            webhook_type,
            body_template,
            response_validators,
            timeout_in_sec,
            authentication_config,
            custom_validation_error_message,
        }),
        _ => Err(diags),
    }
}

pub fn to_update_api(
    plan: &ManualWebhookModel,
    prior: &ManualWebhookModel,
) -> Result<UpdateManualWebhook, Diagnostics> {
    let mut diags = Diagnostics::new();
    let update = UpdateManualWebhook {
        name: update_plain(&plan.name, &prior.name),
        active: update_plain(&plan.active, &prior.active),
        webhook_type: update_converted(
            &mut diags,
            "type",
            &plan.webhook_type,
            &prior.webhook_type,
            webhook_type_to_api,
        ),
        body_template: update_plain(&plan.body_template, &prior.body_template),
        response_validators: update_converted(
            &mut diags,
            "response_validators",
            &plan.response_validators,
            &prior.response_validators,
            |v| Ok(validators_to_api(v)),
        ),
        timeout_in_sec: update_converted(
            &mut diags,
            "timeout_in_sec",
            &plan.timeout_in_sec,
            &prior.timeout_in_sec,
            |t| decimal_to_i32("timeout_in_sec", t),
        ),
        authentication_config: update_converted(
            &mut diags,
            "authentication_config",
            &plan.authentication_config,
            &prior.authentication_config,
            |a| Ok(authentication_to_api(a)),
        ),
        custom_validation_error_message: update_plain(
            &plan.custom_validation_error_message,
            &prior.custom_validation_error_message,
        ),
    };
    diags.into_result(update)
}

fn webhook_type_to_api(model: &WebhookTypeModel) -> Result<WebhookType, ProviderError> {
    match (&model.http_request, &model.integration) {
        (Some(request), None) => Ok(WebhookType {
            http_request: Some(WebhookHttpRequest {
                url: request.url.clone(),
                method: HttpMethod::parse(&request.method)?.to_string(),
                headers: request.headers.clone(),
            }),
            integration: None,
        }),
        (None, Some(action)) => Ok(WebhookType {
            http_request: None,
            integration: Some(WebhookIntegrationAction {
                integration_id: action.integration_id.clone(),
                action_name: action.action_name.clone(),
            }),
        }),
        _ => Err(ProviderError::AmbiguousConfiguration(
            "exactly one of type.http_request or type.integration must be set".to_string(),
        )),
    }
}

fn webhook_type_to_model(api: &WebhookType) -> WebhookTypeModel {
    WebhookTypeModel {
        http_request: api.http_request.as_ref().map(|r| HttpRequestModel {
            url: r.url.clone(),
            method: r.method.clone(),
            headers: r.headers.clone(),
        }),
        integration: api.integration.as_ref().map(|i| IntegrationActionModel {
            integration_id: i.integration_id.clone(),
            action_name: i.action_name.clone(),
        }),
    }
}

fn validators_to_api(validators: &[ResponseValidatorModel]) -> Vec<ResponseValidator> {
    validators
        .iter()
        .map(|v| ResponseValidator {
            json_path: v.json_path.clone(),
            expected_values: v.expected_values.clone(),
        })
        .collect()
}

fn authentication_to_api(model: &AuthenticationConfigModel) -> WebhookAuthentication {
    WebhookAuthentication {
        oauth: model.oauth.as_ref().map(|o| OAuthConfig {
            client_id: o.client_id.clone(),
            client_secret: o.client_secret.clone(),
            token_endpoint_url: o.token_endpoint_url.clone(),
            scopes: o.scopes.clone(),
        }),
    }
}
