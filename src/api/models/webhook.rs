use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::Nullable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookHttpRequest {
    pub url: String,
    pub method: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookIntegrationAction {
    pub integration_id: String,
    pub action_name: String,
}

/// Exactly one member is expected to be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_request: Option<WebhookHttpRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration: Option<WebhookIntegrationAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseValidator {
    pub json_path: String,
    #[serde(default)]
    pub expected_values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthConfig {
    pub client_id: String,
    /// Write-only: never returned by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    pub token_endpoint_url: String,
    #[serde(default)]
    pub scopes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookAuthentication {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth: Option<OAuthConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualWebhook {
    pub id: String,
    pub name: String,
    pub active: bool,
    #[serde(rename = "type")]
    pub webhook_type: WebhookType,
    #[serde(default)]
    pub body_template: Option<String>,
    #[serde(default)]
    pub response_validators: Vec<ResponseValidator>,
    #[serde(default)]
    pub timeout_in_sec: Option<i32>,
    #[serde(default)]
    pub authentication_config: Option<WebhookAuthentication>,
    #[serde(default)]
    pub custom_validation_error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertManualWebhook {
    pub name: String,
    pub active: bool,
    #[serde(rename = "type")]
    pub webhook_type: WebhookType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_template: Option<String>,
    #[serde(default)]
    pub response_validators: Vec<ResponseValidator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_in_sec: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_config: Option<WebhookAuthentication>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_validation_error_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateManualWebhook {
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub name: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub active: Nullable<bool>,
    #[serde(rename = "type", default, skip_serializing_if = "Nullable::is_unset")]
    pub webhook_type: Nullable<WebhookType>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub body_template: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub response_validators: Nullable<Vec<ResponseValidator>>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub timeout_in_sec: Nullable<i32>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub authentication_config: Nullable<WebhookAuthentication>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub custom_validation_error_message: Nullable<String>,
}
