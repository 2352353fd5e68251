use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::types::Nullable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Integration {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub integration_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_id: Option<String>,
    #[serde(default)]
    pub connected_resource_types: Vec<String>,
    /// Integration-type specific parameters.
    #[serde(default)]
    pub params: Map<String, JsonValue>,
    /// Discriminated by its `type` key, see [`crate::secret`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_store_config: Option<Map<String, JsonValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_access_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync_time: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertIntegration {
    pub name: String,
    #[serde(rename = "type")]
    pub integration_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_id: Option<String>,
    #[serde(default)]
    pub connected_resource_types: Vec<String>,
    #[serde(default)]
    pub params: Map<String, JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_store_config: Option<Map<String, JsonValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_access_details: Option<String>,
}

/// PATCH payload. Type and connector cannot change in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateIntegration {
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub name: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub connected_resource_types: Nullable<Vec<String>>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub params: Nullable<Map<String, JsonValue>>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub secret_store_config: Nullable<Map<String, JsonValue>>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub custom_access_details: Nullable<String>,
}
