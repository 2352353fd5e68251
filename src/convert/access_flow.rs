use rust_decimal::Decimal;
use tracing::debug;

use crate::api::models::{
    AccessFlow, AccessFlowSettings, Timeframe, Trigger, UpdateAccessFlow, UpsertAccessFlow,
};
use crate::catalog::ConversionScope;
use crate::diagnostics::Diagnostics;
use crate::error::ProviderError;
use crate::models::{AccessFlowModel, AccessFlowSettingsModel, TimeframeModel, TriggerModel};
use crate::resolve::{identity_models_for, identity_refs_for};
use crate::types::{DayOfWeek, Value, format_time_of_day, parse_time_of_day};

use super::{
    bundle_targets_to_api, bundle_targets_to_model, decimal_to_i32, integration_targets_to_api,
    integration_targets_to_model, optional, optional_set, required, update_converted,
    update_plain, update_resolved,
};

/// Read an access flow from the API into Terraform state.
pub fn to_model(api: &AccessFlow, scope: &ConversionScope<'_>) -> Result<AccessFlowModel, Diagnostics> {
    let mut diags = Diagnostics::new();

    let trigger = diags.capture("trigger", trigger_to_model(&api.trigger));
    let grantees = diags.absorb(identity_models_for("grantees", &api.grantees, scope));
    let approvers = diags.absorb(identity_models_for("approvers", &api.approvers, scope));
    let integration_targets = diags.absorb(integration_targets_to_model(
        "integration_targets",
        &api.integration_targets,
        scope,
    ));
    let bundle_targets =
        diags.absorb(bundle_targets_to_model("bundle_targets", &api.bundle_targets, scope));

    match (trigger, grantees, approvers, integration_targets, bundle_targets) {
        (Some(trigger), Some(grantees), Some(approvers), Some(integration_targets), Some(bundle_targets))
            if !diags.has_errors() =>
        {
            debug!(event = "Convert", phase = "ToModel", object = "access flow", id = %api.id);
            Ok(AccessFlowModel {
                id: Value::known(api.id.clone()),
                name: Value::known(api.name.clone()),
                active: Value::known(api.active),
                trigger: Value::known(trigger),
                grantees: Value::known(grantees),
                integration_targets: optional_set(integration_targets),
                bundle_targets: optional_set(bundle_targets),
                approvers: optional_set(approvers),
                revoke_after_in_sec: Value::known(Decimal::from(api.revoke_after_in_sec)),
                settings: Value::from_option(api.settings.as_ref().map(settings_to_model)),
            })
        }
        _ => Err(diags),
    }
}

/// Build the create payload. Every reference must resolve.
pub fn to_upsert_api(
    model: &AccessFlowModel,
    scope: &ConversionScope<'_>,
) -> Result<UpsertAccessFlow, Diagnostics> {
    let mut diags = Diagnostics::new();

    let name = diags.capture("name", required("name", &model.name)).cloned();
    let active = diags.capture("active", required("active", &model.active)).copied();
    let trigger = diags
        .capture("trigger", required("trigger", &model.trigger))
        .and_then(|t| diags.capture("trigger", trigger_to_api(t)));
    let grantees = diags
        .capture("grantees", required("grantees", &model.grantees))
        .and_then(|g| diags.absorb(identity_refs_for("grantees", g, scope)));
    let approvers = diags
        .capture("approvers", optional("approvers", &model.approvers))
        .and_then(|a| diags.absorb(identity_refs_for("approvers", a.map(Vec::as_slice).unwrap_or_default(), scope)));
    let integration_targets = diags
        .capture("integration_targets", optional("integration_targets", &model.integration_targets))
        .and_then(|t| {
            diags.absorb(integration_targets_to_api(
                "integration_targets",
                t.map(Vec::as_slice).unwrap_or_default(),
                scope,
            ))
        });
    let bundle_targets = diags
        .capture("bundle_targets", optional("bundle_targets", &model.bundle_targets))
        .and_then(|t| {
            diags.absorb(bundle_targets_to_api(
                "bundle_targets",
                t.map(Vec::as_slice).unwrap_or_default(),
                scope,
            ))
        });
    let revoke_after_in_sec = diags
        .capture("revoke_after_in_sec", required("revoke_after_in_sec", &model.revoke_after_in_sec))
        .and_then(|v| diags.capture("revoke_after_in_sec", decimal_to_i32("revoke_after_in_sec", v)));
    let settings = diags
        .capture("settings", optional("settings", &model.settings))
        .map(|s| s.map(settings_to_api));

    match (
        name,
        active,
        trigger,
        grantees,
        approvers,
        integration_targets,
        bundle_targets,
        revoke_after_in_sec,
        settings,
    ) {
        (
            Some(name),
            Some(active),
            Some(trigger),
            Some(grantees),
            Some(approvers),
            Some(integration_targets),
            Some(bundle_targets),
            Some(revoke_after_in_sec),
            Some(settings),
        ) if !diags.has_errors() => Ok(UpsertAccessFlow {
            name,
            active,
            trigger,
            grantees,
            integration_targets,
            bundle_targets,
            approvers,
            revoke_after_in_sec,
            settings,
        }),
        _ => Err(diags),
    }
}

/// Build the PATCH payload from the plan and the prior state.
pub fn to_update_api(
    plan: &AccessFlowModel,
    prior: &AccessFlowModel,
    scope: &ConversionScope<'_>,
) -> Result<UpdateAccessFlow, Diagnostics> {
    let mut diags = Diagnostics::new();

    let update = UpdateAccessFlow {
        name: update_plain(&plan.name, &prior.name),
        active: update_plain(&plan.active, &prior.active),
        trigger: update_converted(&mut diags, "trigger", &plan.trigger, &prior.trigger, trigger_to_api),
        grantees: update_resolved(&mut diags, &plan.grantees, &prior.grantees, |g| {
            identity_refs_for("grantees", g, scope)
        }),
        integration_targets: update_resolved(
            &mut diags,
            &plan.integration_targets,
            &prior.integration_targets,
            |t| integration_targets_to_api("integration_targets", t, scope),
        ),
        bundle_targets: update_resolved(
            &mut diags,
            &plan.bundle_targets,
            &prior.bundle_targets,
            |t| bundle_targets_to_api("bundle_targets", t, scope),
        ),
        approvers: update_resolved(&mut diags, &plan.approvers, &prior.approvers, |a| {
            identity_refs_for("approvers", a, scope)
        }),
        revoke_after_in_sec: update_converted(
            &mut diags,
            "revoke_after_in_sec",
            &plan.revoke_after_in_sec,
            &prior.revoke_after_in_sec,
            |v| decimal_to_i32("revoke_after_in_sec", v),
        ),
        settings: update_converted(&mut diags, "settings", &plan.settings, &prior.settings, |s| {
            Ok(settings_to_api(s))
        }),
    };

    diags.into_result(update)
}

fn trigger_to_api(trigger: &TriggerModel) -> Result<Trigger, ProviderError> {
    let timeframe = match &trigger.timeframe {
        Some(tf) => Some(Timeframe {
            start_of_day_time_in_seconds: parse_time_of_day(
                "trigger.timeframe.start_time",
                &tf.start_time,
            )?,
            end_of_day_time_in_seconds: parse_time_of_day(
                "trigger.timeframe.end_time",
                &tf.end_time,
            )?,
            days_in_week: tf
                .days_in_week
                .iter()
                .map(|d| DayOfWeek::parse(d).map(|d| d.to_string()))
                .collect::<Result<_, _>>()?,
            time_zone: tf.time_zone.clone(),
        }),
        None => None,
    };
    Ok(Trigger {
        trigger_type: trigger.trigger_type.clone(),
        timeframe,
    })
}

fn trigger_to_model(trigger: &Trigger) -> Result<TriggerModel, ProviderError> {
    let timeframe = match &trigger.timeframe {
        Some(tf) => Some(TimeframeModel {
            start_time: format_time_of_day(tf.start_of_day_time_in_seconds)?,
            end_time: format_time_of_day(tf.end_of_day_time_in_seconds)?,
            days_in_week: tf.days_in_week.clone(),
            time_zone: tf.time_zone.clone(),
        }),
        None => None,
    };
    Ok(TriggerModel {
        trigger_type: trigger.trigger_type.clone(),
        timeframe,
    })
}

fn settings_to_api(settings: &AccessFlowSettingsModel) -> AccessFlowSettings {
    AccessFlowSettings {
        require_justification_on_request_again: settings.require_justification_on_request_again,
        require_all_approvers: settings.require_all_approvers,
        approver_cannot_approve_himself: settings.approver_cannot_approve_himself,
    }
}

fn settings_to_model(settings: &AccessFlowSettings) -> AccessFlowSettingsModel {
    AccessFlowSettingsModel {
        require_justification_on_request_again: settings.require_justification_on_request_again,
        require_all_approvers: settings.require_all_approvers,
        approver_cannot_approve_himself: settings.approver_cannot_approve_himself,
    }
}
