use serde::{Deserialize, Serialize};

use crate::types::Nullable;

use super::common::{BundleTarget, IdentityRef, IntegrationTarget};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeframe {
    pub start_of_day_time_in_seconds: i32,
    pub end_of_day_time_in_seconds: i32,
    #[serde(default)]
    pub days_in_week: Vec<String>,
    pub time_zone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(rename = "type")]
    pub trigger_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<Timeframe>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessFlowSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_justification_on_request_again: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_all_approvers: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver_cannot_approve_himself: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessFlow {
    pub id: String,
    pub name: String,
    pub active: bool,
    pub trigger: Trigger,
    #[serde(default)]
    pub grantees: Vec<IdentityRef>,
    #[serde(default)]
    pub integration_targets: Vec<IntegrationTarget>,
    #[serde(default)]
    pub bundle_targets: Vec<BundleTarget>,
    #[serde(default)]
    pub approvers: Vec<IdentityRef>,
    pub revoke_after_in_sec: i32,
    #[serde(default)]
    pub settings: Option<AccessFlowSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<f64>,
}

/// Create payload: the full desired object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertAccessFlow {
    pub name: String,
    pub active: bool,
    pub trigger: Trigger,
    pub grantees: Vec<IdentityRef>,
    pub integration_targets: Vec<IntegrationTarget>,
    pub bundle_targets: Vec<BundleTarget>,
    pub approvers: Vec<IdentityRef>,
    pub revoke_after_in_sec: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<AccessFlowSettings>,
}

/// PATCH payload: only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAccessFlow {
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub name: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub active: Nullable<bool>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub trigger: Nullable<Trigger>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub grantees: Nullable<Vec<IdentityRef>>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub integration_targets: Nullable<Vec<IntegrationTarget>>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub bundle_targets: Nullable<Vec<BundleTarget>>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub approvers: Nullable<Vec<IdentityRef>>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub revoke_after_in_sec: Nullable<i32>,
    #[serde(default, skip_serializing_if = "Nullable::is_unset")]
    pub settings: Nullable<AccessFlowSettings>,
}
