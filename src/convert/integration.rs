use std::collections::BTreeMap;

use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::api::models::{Integration, UpdateIntegration, UpsertIntegration};
use crate::diagnostics::Diagnostics;
use crate::error::ProviderError;
use crate::models::{IntegrationModel, IntegrationSummary};
use crate::secret::{json_to_text, secret_config_from_api, secret_config_to_api};
use crate::types::{Nullable, Value};

use super::{none_if_empty, optional, optional_set, required, update_plain};

/// Integration parameters are free-form on the wire and string-valued in state.
fn params_to_metadata(params: &Map<String, JsonValue>) -> Value<BTreeMap<String, String>> {
    if params.is_empty() {
        return Value::Null;
    }
    Value::known(
        params
            .iter()
            .map(|(k, v)| (k.clone(), json_to_text(v)))
            .collect(),
    )
}

fn metadata_to_params(metadata: &BTreeMap<String, String>) -> Map<String, JsonValue> {
    metadata
        .iter()
        .map(|(k, v)| (k.clone(), JsonValue::String(v.clone())))
        .collect()
}

pub fn to_model(api: &Integration) -> Result<IntegrationModel, Diagnostics> {
    let secret_store_config = secret_config_from_api(api.secret_store_config.as_ref())
        .map_err(|err| {
            let mut diags = Diagnostics::new();
            diags.add_error("secret_store_config", err);
            diags
        })?;
    debug!(event = "Convert", phase = "ToModel", object = "integration", id = %api.id);
    Ok(IntegrationModel {
        id: Value::known(api.id.clone()),
        name: Value::known(api.name.clone()),
        integration_type: Value::known(api.integration_type.clone()),
        connector_id: none_if_empty(&api.connector_id),
        connected_resource_types: optional_set(api.connected_resource_types.clone()),
        metadata: params_to_metadata(&api.params),
        secret_store_config,
        custom_access_details: none_if_empty(&api.custom_access_details),
        status: Value::from_option(api.status.clone()),
    })
}

pub fn to_upsert_api(model: &IntegrationModel) -> Result<UpsertIntegration, Diagnostics> {
    let mut diags = Diagnostics::new();

    let name = diags.capture("name", required("name", &model.name)).cloned();
    let integration_type = diags
        .capture("type", required("type", &model.integration_type))
        .cloned();
    let connector_id = diags
        .capture("connector_id", optional("connector_id", &model.connector_id))
        .map(|c| c.cloned());
    let connected_resource_types = diags
        .capture(
            "connected_resource_types",
            optional("connected_resource_types", &model.connected_resource_types),
        )
        .map(|t| t.cloned().unwrap_or_default());
    let params = diags
        .capture("metadata", optional("metadata", &model.metadata))
        .map(|m| m.map(metadata_to_params).unwrap_or_default());
    let custom_access_details = diags
        .capture(
            "custom_access_details",
            optional("custom_access_details", &model.custom_access_details),
        )
        .map(|c| c.cloned());

    match (
        name,
        integration_type,
        connector_id,
        connected_resource_types,
        params,
        custom_access_details,
    ) {
        (
            Some(name),
            Some(integration_type),
            Some(connector_id),
            Some(connected_resource_types),
            Some(params),
            Some(custom_access_details),
        ) if !diags.has_errors() => Ok(UpsertIntegration {
            name,
            integration_type,
            connector_id,
            connected_resource_types,
            params,
            secret_store_config: secret_config_to_api(&model.secret_store_config),
            custom_access_details,
        }),
        _ => Err(diags),
    }
}

/// Attributes that force a replacement cannot be patched.
fn ensure_unchanged(
    diags: &mut Diagnostics,
    attribute: &str,
    plan: &Value<String>,
    prior: &Value<String>,
) {
    if let (Value::Known(planned), Value::Known(current)) = (plan, prior) {
        if planned != current {
            diags.add_error(
                attribute,
                ProviderError::invalid_value(
                    attribute,
                    format!("cannot change from '{current}' to '{planned}' in place"),
                ),
            );
        }
    }
}

pub fn to_update_api(
    plan: &IntegrationModel,
    prior: &IntegrationModel,
) -> Result<UpdateIntegration, Diagnostics> {
    let mut diags = Diagnostics::new();
    ensure_unchanged(&mut diags, "type", &plan.integration_type, &prior.integration_type);
    ensure_unchanged(&mut diags, "connector_id", &plan.connector_id, &prior.connector_id);

    let secret_store_config = match secret_config_to_api(&plan.secret_store_config) {
        Some(secret) => Nullable::Value(secret),
        None if !prior.secret_store_config.is_empty() => Nullable::Null,
        None => Nullable::Unset,
    };

    let update = UpdateIntegration {
        name: update_plain(&plan.name, &prior.name),
        connected_resource_types: update_plain(
            &plan.connected_resource_types,
            &prior.connected_resource_types,
        ),
        params: update_plain(&plan.metadata, &prior.metadata).map(|m| metadata_to_params(&m)),
        secret_store_config,
        custom_access_details: update_plain(
            &plan.custom_access_details,
            &prior.custom_access_details,
        ),
    };
    diags.into_result(update)
}

impl From<&Integration> for IntegrationSummary {
    fn from(api: &Integration) -> Self {
        IntegrationSummary {
            id: api.id.clone(),
            name: api.name.clone(),
            integration_type: api.integration_type.clone(),
            connector_id: api.connector_id.clone(),
            connected_resource_types: api.connected_resource_types.clone(),
        }
    }
}
