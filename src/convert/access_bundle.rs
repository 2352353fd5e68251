use tracing::debug;

use crate::api::models::{AccessBundle, UpdateAccessBundle, UpsertAccessBundle};
use crate::catalog::ConversionScope;
use crate::diagnostics::Diagnostics;
use crate::models::AccessBundleModel;
use crate::types::Value;

use super::{
    integration_targets_to_api, integration_targets_to_model, optional, required, update_plain,
    update_resolved,
};

pub fn to_model(
    api: &AccessBundle,
    scope: &ConversionScope<'_>,
) -> Result<AccessBundleModel, Diagnostics> {
    let targets =
        integration_targets_to_model("integration_targets", &api.integration_targets, scope)?;
    debug!(event = "Convert", phase = "ToModel", object = "access bundle", id = %api.id);
    Ok(AccessBundleModel {
        id: Value::known(api.id.clone()),
        name: Value::known(api.name.clone()),
        integration_targets: Value::known(targets),
    })
}

pub fn to_upsert_api(
    model: &AccessBundleModel,
    scope: &ConversionScope<'_>,
) -> Result<UpsertAccessBundle, Diagnostics> {
    let mut diags = Diagnostics::new();

    let name = diags.capture("name", required("name", &model.name)).cloned();
    let integration_targets = diags
        .capture(
            "integration_targets",
            optional("integration_targets", &model.integration_targets),
        )
        .and_then(|t| {
            diags.absorb(integration_targets_to_api(
                "integration_targets",
                t.map(Vec::as_slice).unwrap_or_default(),
                scope,
            ))
        });

    match (name, integration_targets) {
        (Some(name), Some(integration_targets)) if !diags.has_errors() => Ok(UpsertAccessBundle {
            name,
            integration_targets,
        }),
        _ => Err(diags),
    }
}

pub fn to_update_api(
    plan: &AccessBundleModel,
    prior: &AccessBundleModel,
    scope: &ConversionScope<'_>,
) -> Result<UpdateAccessBundle, Diagnostics> {
    let mut diags = Diagnostics::new();
    let update = UpdateAccessBundle {
        name: update_plain(&plan.name, &prior.name),
        integration_targets: update_resolved(
            &mut diags,
            &plan.integration_targets,
            &prior.integration_targets,
            |t| integration_targets_to_api("integration_targets", t, scope),
        ),
    };
    diags.into_result(update)
}
