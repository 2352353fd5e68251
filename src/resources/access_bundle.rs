use std::sync::Arc;

use tracing::info;

use crate::api::{ApiClient, invoke};
use crate::catalog::{ApiCatalog, ConversionScope};
use crate::context::RequestContext;
use crate::convert::access_bundle;
use crate::diagnostics::Diagnostics;
use crate::models::AccessBundleModel;

use super::{ResourceHandler, deleted, ensure_valid, found, state_id};

const OBJECT: &str = "access bundle";

pub struct AccessBundleResource {
    client: Arc<dyn ApiClient>,
}

impl AccessBundleResource {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        AccessBundleResource { client }
    }
}

impl ResourceHandler for AccessBundleResource {
    type Model = AccessBundleModel;

    fn type_name(&self) -> &'static str {
        "apono_access_bundle"
    }

    fn validate_config(&self, config: &AccessBundleModel) -> Diagnostics {
        config.validate()
    }

    fn create(
        &self,
        ctx: &RequestContext,
        plan: &AccessBundleModel,
    ) -> Result<AccessBundleModel, Diagnostics> {
        ensure_valid(plan.validate())?;
        let catalog = ApiCatalog::new(self.client.as_ref(), ctx);
        let scope = ConversionScope::new(&catalog);

        let body = access_bundle::to_upsert_api(plan, &scope)?;
        let created = invoke(ctx, "create", OBJECT, None, || {
            self.client.create_access_bundle(&body)
        })?;
        info!(event = "Resource", phase = "Created", resource = self.type_name(), id = %created.id);

        access_bundle::to_model(&created, &scope)
    }

    fn read(
        &self,
        ctx: &RequestContext,
        state: &AccessBundleModel,
    ) -> Result<Option<AccessBundleModel>, Diagnostics> {
        let id = state_id(&state.id)?;
        let fetched = invoke(ctx, "read", OBJECT, Some(id), || {
            self.client.get_access_bundle(id)
        });
        let Some(api) = found(self.type_name(), id, fetched)? else {
            return Ok(None);
        };
        let catalog = ApiCatalog::new(self.client.as_ref(), ctx);
        access_bundle::to_model(&api, &ConversionScope::new(&catalog)).map(Some)
    }

    fn update(
        &self,
        ctx: &RequestContext,
        plan: &AccessBundleModel,
        prior: &AccessBundleModel,
    ) -> Result<AccessBundleModel, Diagnostics> {
        ensure_valid(plan.validate())?;
        let id = state_id(&prior.id)?;
        let catalog = ApiCatalog::new(self.client.as_ref(), ctx);
        let scope = ConversionScope::new(&catalog);

        let body = access_bundle::to_update_api(plan, prior, &scope)?;
        let updated = invoke(ctx, "update", OBJECT, Some(id), || {
            self.client.update_access_bundle(id, &body)
        })?;
        info!(event = "Resource", phase = "Updated", resource = self.type_name(), id);

        access_bundle::to_model(&updated, &scope)
    }

    fn delete(&self, ctx: &RequestContext, state: &AccessBundleModel) -> Result<(), Diagnostics> {
        let id = state_id(&state.id)?;
        deleted(
            self.type_name(),
            id,
            invoke(ctx, "delete", OBJECT, Some(id), || self.client.delete_access_bundle(id)),
        )?;
        info!(event = "Resource", phase = "Deleted", resource = self.type_name(), id);
        Ok(())
    }

    fn import_state(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<AccessBundleModel, Diagnostics> {
        let api = invoke(ctx, "import", OBJECT, Some(id), || self.client.get_access_bundle(id))?;
        let catalog = ApiCatalog::new(self.client.as_ref(), ctx);
        access_bundle::to_model(&api, &ConversionScope::new(&catalog))
    }
}
