use std::sync::Arc;

use tracing::info;

use crate::api::{ApiClient, invoke};
use crate::catalog::{ApiCatalog, ConversionScope};
use crate::context::RequestContext;
use crate::convert::access_flow;
use crate::diagnostics::Diagnostics;
use crate::models::AccessFlowModel;

use super::{ResourceHandler, deleted, ensure_valid, found, state_id};

const OBJECT: &str = "access flow";

pub struct AccessFlowResource {
    client: Arc<dyn ApiClient>,
}

impl AccessFlowResource {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        AccessFlowResource { client }
    }

    fn fetch(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<Option<AccessFlowModel>, Diagnostics> {
        let Some(api) = found(
            self.type_name(),
            id,
            invoke(ctx, "read", OBJECT, Some(id), || self.client.get_access_flow(id)),
        )?
        else {
            return Ok(None);
        };
        let catalog = ApiCatalog::new(self.client.as_ref(), ctx);
        access_flow::to_model(&api, &ConversionScope::new(&catalog)).map(Some)
    }
}

impl ResourceHandler for AccessFlowResource {
    type Model = AccessFlowModel;

    fn type_name(&self) -> &'static str {
        "apono_access_flow"
    }

    fn validate_config(&self, config: &AccessFlowModel) -> Diagnostics {
        config.validate()
    }

    fn create(
        &self,
        ctx: &RequestContext,
        plan: &AccessFlowModel,
    ) -> Result<AccessFlowModel, Diagnostics> {
        ensure_valid(plan.validate())?;
        let catalog = ApiCatalog::new(self.client.as_ref(), ctx);
        let scope = ConversionScope::new(&catalog);

        let body = access_flow::to_upsert_api(plan, &scope)?;
        let created = invoke(ctx, "create", OBJECT, None, || {
            self.client.create_access_flow(&body)
        })?;
        info!(event = "Resource", phase = "Created", resource = self.type_name(), id = %created.id);

        access_flow::to_model(&created, &scope)
    }

    fn read(
        &self,
        ctx: &RequestContext,
        state: &AccessFlowModel,
    ) -> Result<Option<AccessFlowModel>, Diagnostics> {
        self.fetch(ctx, state_id(&state.id)?)
    }

    fn update(
        &self,
        ctx: &RequestContext,
        plan: &AccessFlowModel,
        prior: &AccessFlowModel,
    ) -> Result<AccessFlowModel, Diagnostics> {
        ensure_valid(plan.validate())?;
        let id = state_id(&prior.id)?;
        let catalog = ApiCatalog::new(self.client.as_ref(), ctx);
        let scope = ConversionScope::new(&catalog);

        let body = access_flow::to_update_api(plan, prior, &scope)?;
        let updated = invoke(ctx, "update", OBJECT, Some(id), || {
            self.client.update_access_flow(id, &body)
        })?;
        info!(event = "Resource", phase = "Updated", resource = self.type_name(), id);

        access_flow::to_model(&updated, &scope)
    }

    fn delete(&self, ctx: &RequestContext, state: &AccessFlowModel) -> Result<(), Diagnostics> {
        let id = state_id(&state.id)?;
        deleted(
            self.type_name(),
            id,
            invoke(ctx, "delete", OBJECT, Some(id), || self.client.delete_access_flow(id)),
        )?;
        info!(event = "Resource", phase = "Deleted", resource = self.type_name(), id);
        Ok(())
    }

    fn import_state(&self, ctx: &RequestContext, id: &str) -> Result<AccessFlowModel, Diagnostics> {
        let catalog = ApiCatalog::new(self.client.as_ref(), ctx);
        let api = invoke(ctx, "import", OBJECT, Some(id), || self.client.get_access_flow(id))?;
        access_flow::to_model(&api, &ConversionScope::new(&catalog))
    }
}
