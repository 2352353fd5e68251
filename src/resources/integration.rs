use std::sync::Arc;

use tracing::info;

use crate::api::{ApiClient, invoke};
use crate::context::RequestContext;
use crate::convert::integration;
use crate::diagnostics::Diagnostics;
use crate::models::IntegrationModel;

use super::{ResourceHandler, deleted, ensure_valid, found, state_id};

const OBJECT: &str = "integration";

pub struct IntegrationResource {
    client: Arc<dyn ApiClient>,
}

impl IntegrationResource {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        IntegrationResource { client }
    }
}

impl ResourceHandler for IntegrationResource {
    type Model = IntegrationModel;

    fn type_name(&self) -> &'static str {
        "apono_integration"
    }

    fn validate_config(&self, config: &IntegrationModel) -> Diagnostics {
        config.validate()
    }

    fn create(
        &self,
        ctx: &RequestContext,
        plan: &IntegrationModel,
    ) -> Result<IntegrationModel, Diagnostics> {
        ensure_valid(plan.validate())?;
        let body = integration::to_upsert_api(plan)?;
        let created = invoke(ctx, "create", OBJECT, None, || {
            self.client.create_integration(&body)
        })?;
        info!(event = "Resource", phase = "Created", resource = self.type_name(), id = %created.id);
        integration::to_model(&created)
    }

    fn read(
        &self,
        ctx: &RequestContext,
        state: &IntegrationModel,
    ) -> Result<Option<IntegrationModel>, Diagnostics> {
        let id = state_id(&state.id)?;
        let fetched = invoke(ctx, "read", OBJECT, Some(id), || self.client.get_integration(id));
        match found(self.type_name(), id, fetched)? {
            Some(api) => integration::to_model(&api).map(Some),
            None => Ok(None),
        }
    }

    fn update(
        &self,
        ctx: &RequestContext,
        plan: &IntegrationModel,
        prior: &IntegrationModel,
    ) -> Result<IntegrationModel, Diagnostics> {
        ensure_valid(plan.validate())?;
        let id = state_id(&prior.id)?;
        let body = integration::to_update_api(plan, prior)?;
        let updated = invoke(ctx, "update", OBJECT, Some(id), || {
            self.client.update_integration(id, &body)
        })?;
        info!(event = "Resource", phase = "Updated", resource = self.type_name(), id);
        integration::to_model(&updated)
    }

    fn delete(&self, ctx: &RequestContext, state: &IntegrationModel) -> Result<(), Diagnostics> {
        let id = state_id(&state.id)?;
        deleted(
            self.type_name(),
            id,
            invoke(ctx, "delete", OBJECT, Some(id), || self.client.delete_integration(id)),
        )?;
        info!(event = "Resource", phase = "Deleted", resource = self.type_name(), id);
        Ok(())
    }

    fn import_state(&self, ctx: &RequestContext, id: &str) -> Result<IntegrationModel, Diagnostics> {
        let api = invoke(ctx, "import", OBJECT, Some(id), || self.client.get_integration(id))?;
        integration::to_model(&api)
    }
}
