use serde::{Deserialize, Serialize};

use crate::types::Nullable;

use super::common::IntegrationTarget;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessBundle {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub integration_targets: Vec<IntegrationTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertAccessBundle {
    pub name: String,
    pub integration_targets: Vec<IntegrationTarget>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAccessBundle {
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub name: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub integration_targets: Nullable<Vec<IntegrationTarget>>,
}
