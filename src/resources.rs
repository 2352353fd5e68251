//! Lifecycle handlers for the managed resource types.
//!
//! Every handler follows the same protocol. Plans are validated offline,
//! converted to an API payload, sent through [`invoke`](crate::api), and the
//! response is converted back into state. A failing step returns every
//! diagnostic it collected and never a partial state.

mod access_bundle;
mod access_flow;
mod integration;
mod manual_webhook;

#[cfg(test)]
pub(crate) mod tests;

pub use access_bundle::AccessBundleResource;
pub use access_flow::AccessFlowResource;
pub use integration::IntegrationResource;
pub use manual_webhook::ManualWebhookResource;

use tracing::warn;

use crate::context::RequestContext;
use crate::diagnostics::Diagnostics;
use crate::error::ProviderError;
use crate::types::Value;

/// CRUD and import for one Terraform resource type.
pub trait ResourceHandler {
    type Model;

    /// Terraform type name, e.g. `apono_access_flow`.
    fn type_name(&self) -> &'static str;

    /// Offline checks. Never calls the API.
    fn validate_config(&self, config: &Self::Model) -> Diagnostics;

    fn create(&self, ctx: &RequestContext, plan: &Self::Model) -> Result<Self::Model, Diagnostics>;

    /// `Ok(None)` when the object is gone upstream and should leave the state.
    fn read(
        &self,
        ctx: &RequestContext,
        state: &Self::Model,
    ) -> Result<Option<Self::Model>, Diagnostics>;

    fn update(
        &self,
        ctx: &RequestContext,
        plan: &Self::Model,
        prior: &Self::Model,
    ) -> Result<Self::Model, Diagnostics>;

    /// Deleting an object that is already gone succeeds.
    fn delete(&self, ctx: &RequestContext, state: &Self::Model) -> Result<(), Diagnostics>;

    /// Adopt an existing object by ID. A missing object is an error here.
    fn import_state(&self, ctx: &RequestContext, id: &str) -> Result<Self::Model, Diagnostics>;
}

/// The ID recorded in state.
fn state_id(id: &Value<String>) -> Result<&str, Diagnostics> {
    match id.as_known() {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(ProviderError::MissingAttribute("id".to_string()).into()),
    }
}

/// Offline validation gate in front of create and update.
fn ensure_valid(diags: Diagnostics) -> Result<(), Diagnostics> {
    diags.into_result(())
}

/// Map an upstream 404 to `None`.
fn found<T>(resource: &str, id: &str, result: Result<T, ProviderError>) -> Result<Option<T>, Diagnostics> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_upstream_not_found() => {
            warn!(event = "Resource", phase = "Gone", resource, id);
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// Deleting an object that no longer exists is not an error.
fn deleted(resource: &str, id: &str, result: Result<(), ProviderError>) -> Result<(), Diagnostics> {
    found(resource, id, result).map(|_| ())
}
