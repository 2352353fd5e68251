//! Converters between Terraform models and API payloads.
//!
//! Each resource module exposes `to_model`, `to_upsert_api` and
//! `to_update_api`. All of them report every problem they find and never
//! return a partial payload.

pub mod access_bundle;
pub mod access_flow;
pub mod integration;
pub mod manual_webhook;

use std::convert::Infallible;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::api::models::{BundleTarget, IntegrationTarget};
use crate::catalog::ConversionScope;
use crate::diagnostics::Diagnostics;
use crate::error::ProviderError;
use crate::models::{BundleTargetModel, IntegrationTargetModel};
use crate::resolve::{
    bundle_target_to_model, integration_target_to_model, resolve_bundle_target,
    resolve_integration_target,
};
use crate::types::{Nullable, Value};

/// The known value of an attribute that must be set.
pub(crate) fn required<'v, T>(attribute: &str, value: &'v Value<T>) -> Result<&'v T, ProviderError> {
    value
        .as_known()
        .ok_or_else(|| ProviderError::MissingAttribute(attribute.to_string()))
}

/// `None` for null attributes. Unknown values cannot be sent.
pub(crate) fn optional<'v, T>(
    attribute: &str,
    value: &'v Value<T>,
) -> Result<Option<&'v T>, ProviderError> {
    match value {
        Value::Known(v) => Ok(Some(v)),
        Value::Null => Ok(None),
        Value::Unknown => Err(ProviderError::MissingAttribute(attribute.to_string())),
    }
}

/// Truncate a Terraform number towards zero into the wire integer.
pub(crate) fn decimal_to_i32(attribute: &str, value: &Decimal) -> Result<i32, ProviderError> {
    value.trunc().to_i32().ok_or_else(|| {
        ProviderError::invalid_value(attribute, format!("{value} does not fit a 32-bit integer"))
    })
}

/// Empty API lists read back as null optional sets.
pub(crate) fn optional_set<T>(items: Vec<T>) -> Value<Vec<T>> {
    if items.is_empty() {
        Value::Null
    } else {
        Value::Known(items)
    }
}

pub(crate) fn none_if_empty(value: &Option<String>) -> Value<String> {
    match value.as_deref() {
        None | Some("") => Value::Null,
        Some(v) => Value::known(v.to_string()),
    }
}

/// PATCH field for attributes sent as-is.
pub(crate) fn update_plain<T: Clone, Q>(plan: &Value<T>, prior: &Value<Q>) -> Nullable<T> {
    match Nullable::for_update(plan, Some(prior), |v: &T| Ok::<_, Infallible>(v.clone())) {
        Ok(field) => field,
        Err(never) => match never {},
    }
}

/// PATCH field for attributes that need a checked conversion.
pub(crate) fn update_converted<T, P, Q, F>(
    diags: &mut Diagnostics,
    attribute: &str,
    plan: &Value<P>,
    prior: &Value<Q>,
    convert: F,
) -> Nullable<T>
where
    F: FnOnce(&P) -> Result<T, ProviderError>,
{
    diags
        .capture(attribute, Nullable::for_update(plan, Some(prior), convert))
        .unwrap_or_default()
}

/// PATCH field for attributes resolved against the catalogs.
pub(crate) fn update_resolved<T, P, Q, F>(
    diags: &mut Diagnostics,
    plan: &Value<P>,
    prior: &Value<Q>,
    convert: F,
) -> Nullable<T>
where
    F: FnOnce(&P) -> Result<T, Diagnostics>,
{
    diags
        .absorb(Nullable::for_update(plan, Some(prior), convert))
        .unwrap_or_default()
}

pub(crate) fn integration_targets_to_api(
    attribute: &str,
    targets: &[IntegrationTargetModel],
    scope: &ConversionScope<'_>,
) -> Result<Vec<IntegrationTarget>, Diagnostics> {
    if targets.is_empty() {
        return Ok(Vec::new());
    }
    let mut diags = Diagnostics::new();
    let Some(catalog) = diags.capture(attribute, scope.integrations()) else {
        return Err(diags);
    };
    let resolved: Vec<IntegrationTarget> = targets
        .iter()
        .filter_map(|t| diags.capture(attribute, resolve_integration_target(t, catalog)))
        .collect();
    diags.into_result(resolved)
}

pub(crate) fn integration_targets_to_model(
    attribute: &str,
    targets: &[IntegrationTarget],
    scope: &ConversionScope<'_>,
) -> Result<Vec<IntegrationTargetModel>, Diagnostics> {
    if targets.is_empty() {
        return Ok(Vec::new());
    }
    let mut diags = Diagnostics::new();
    let Some(catalog) = diags.capture(attribute, scope.integrations()) else {
        return Err(diags);
    };
    let models: Vec<IntegrationTargetModel> = targets
        .iter()
        .filter_map(|t| diags.capture(attribute, integration_target_to_model(t, catalog)))
        .collect();
    diags.into_result(models)
}

pub(crate) fn bundle_targets_to_api(
    attribute: &str,
    targets: &[BundleTargetModel],
    scope: &ConversionScope<'_>,
) -> Result<Vec<BundleTarget>, Diagnostics> {
    if targets.is_empty() {
        return Ok(Vec::new());
    }
    let mut diags = Diagnostics::new();
    let Some(catalog) = diags.capture(attribute, scope.access_bundles()) else {
        return Err(diags);
    };
    let resolved: Vec<BundleTarget> = targets
        .iter()
        .filter_map(|t| diags.capture(attribute, resolve_bundle_target(t, catalog)))
        .collect();
    diags.into_result(resolved)
}

pub(crate) fn bundle_targets_to_model(
    attribute: &str,
    targets: &[BundleTarget],
    scope: &ConversionScope<'_>,
) -> Result<Vec<BundleTargetModel>, Diagnostics> {
    if targets.is_empty() {
        return Ok(Vec::new());
    }
    let mut diags = Diagnostics::new();
    let Some(catalog) = diags.capture(attribute, scope.access_bundles()) else {
        return Err(diags);
    };
    let models: Vec<BundleTargetModel> = targets
        .iter()
        .filter_map(|t| diags.capture(attribute, bundle_target_to_model(t, catalog)))
        .collect();
    diags.into_result(models)
}
