use rust_decimal::Decimal;

use crate::diagnostics::Diagnostics;
use crate::error::ProviderError;
use crate::types::{DayOfWeek, Value, parse_time_of_day};

use super::common::{
    BundleTargetModel, IdentityModel, IntegrationTargetModel, ensure_canonical,
    validate_identities, validate_integration_targets, validate_non_empty_set,
};

/// Window in which requests are allowed, times as `HH:MM:SS`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeframeModel {
    pub start_time: String,
    pub end_time: String,
    pub days_in_week: Vec<String>,
    pub time_zone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TriggerModel {
    pub trigger_type: String,
    pub timeframe: Option<TimeframeModel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AccessFlowSettingsModel {
    pub require_justification_on_request_again: Option<bool>,
    pub require_all_approvers: Option<bool>,
    pub approver_cannot_approve_himself: Option<bool>,
}

/// `apono_access_flow`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccessFlowModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub active: Value<bool>,
    pub trigger: Value<TriggerModel>,
    pub grantees: Value<Vec<IdentityModel>>,
    pub integration_targets: Value<Vec<IntegrationTargetModel>>,
    pub bundle_targets: Value<Vec<BundleTargetModel>>,
    pub approvers: Value<Vec<IdentityModel>>,
    pub revoke_after_in_sec: Value<Decimal>,
    pub settings: Value<AccessFlowSettingsModel>,
}

impl AccessFlowModel {
    pub fn validate(&self) -> Diagnostics {
        let mut diags = Diagnostics::new();

        validate_identities("grantees", &self.grantees, &mut diags);
        validate_identities("approvers", &self.approvers, &mut diags);
        validate_integration_targets("integration_targets", &self.integration_targets, &mut diags);
        validate_non_empty_set("approvers", &self.approvers, &mut diags);
        validate_non_empty_set("integration_targets", &self.integration_targets, &mut diags);
        validate_non_empty_set("bundle_targets", &self.bundle_targets, &mut diags);

        if let Some(grantees) = self.grantees.as_known() {
            if grantees.is_empty() {
                diags.add_error(
                    "grantees",
                    ProviderError::invalid_value("grantees", "at least one grantee is required"),
                );
            }
        }

        let no_targets = |targets: Option<usize>| targets == Some(0);
        let integration_count = match &self.integration_targets {
            Value::Null => Some(0),
            other => other.as_known().map(Vec::len),
        };
        let bundle_count = match &self.bundle_targets {
            Value::Null => Some(0),
            other => other.as_known().map(Vec::len),
        };
        if no_targets(integration_count) && no_targets(bundle_count) {
            diags.add_error(
                "integration_targets",
                ProviderError::AmbiguousConfiguration(
                    "at least one of integration_targets or bundle_targets must be set"
                        .to_string(),
                ),
            );
        }

        if let Some(trigger) = self.trigger.as_known() {
            if trigger.trigger_type.is_empty() {
                diags.add_error(
                    "trigger.type",
                    ProviderError::invalid_value("trigger.type", "must not be empty"),
                );
            }
            if let Some(timeframe) = &trigger.timeframe {
                validate_timeframe(timeframe, &mut diags);
            }
        }

        if let Some(revoke) = self.revoke_after_in_sec.as_known() {
            if revoke.is_sign_negative() {
                diags.add_error(
                    "revoke_after_in_sec",
                    ProviderError::invalid_value("revoke_after_in_sec", "must not be negative"),
                );
            }
        }

        diags
    }
}

fn validate_timeframe(timeframe: &TimeframeModel, diags: &mut Diagnostics) {
    let attribute = "trigger.timeframe";
    let start = diags.capture(
        attribute,
        parse_time_of_day("trigger.timeframe.start_time", &timeframe.start_time),
    );
    let end = diags.capture(
        attribute,
        parse_time_of_day("trigger.timeframe.end_time", &timeframe.end_time),
    );
    if let (Some(start), Some(end)) = (start, end) {
        if start == end {
            diags.add_error(
                attribute,
                ProviderError::invalid_value(attribute, "start_time and end_time must differ"),
            );
        }
    }
    for day in &timeframe.days_in_week {
        let checked = DayOfWeek::parse(day).and_then(|parsed| {
            ensure_canonical("trigger.timeframe.days_in_week", day, parsed.as_ref())
        });
        diags.capture(attribute, checked);
    }
    if timeframe.time_zone.is_empty() {
        diags.add_error(
            attribute,
            ProviderError::invalid_value("trigger.timeframe.time_zone", "must not be empty"),
        );
    }
}
