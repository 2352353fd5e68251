use std::sync::Arc;

use tracing::info;

use crate::api::{ApiClient, invoke};
use crate::context::RequestContext;
use crate::convert::manual_webhook;
use crate::diagnostics::Diagnostics;
use crate::models::ManualWebhookModel;

use super::{ResourceHandler, deleted, ensure_valid, found, state_id};

const OBJECT: &str = "manual webhook";

pub struct ManualWebhookResource {
    client: Arc<dyn ApiClient>,
}

impl ManualWebhookResource {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        ManualWebhookResource { client }
    }
}

impl ResourceHandler for ManualWebhookResource {
    type Model = ManualWebhookModel;

    fn type_name(&self) -> &'static str {
        "apono_manual_webhook"
    }

    fn validate_config(&self, config: &ManualWebhookModel) -> Diagnostics {
        config.validate()
    }

    fn create(
        &self,
        ctx: &RequestContext,
        plan: &ManualWebhookModel,
    ) -> Result<ManualWebhookModel, Diagnostics> {
        ensure_valid(plan.validate())?;
        let body = manual_webhook::to_upsert_api(plan)?;
        let created = invoke(ctx, "create", OBJECT, None, || {
            self.client.create_manual_webhook(&body)
        })?;
        info!(event = "Resource", phase = "Created", resource = self.type_name(), id = %created.id);
        Ok(manual_webhook::to_model(&created, Some(plan)))
    }

    fn read(
        &self,
        ctx: &RequestContext,
        state: &ManualWebhookModel,
    ) -> Result<Option<ManualWebhookModel>, Diagnostics> {
        let id = state_id(&state.id)?;
        let fetched = invoke(ctx, "read", OBJECT, Some(id), || {
            self.client.get_manual_webhook(id)
        });
        Ok(found(self.type_name(), id, fetched)?
            .map(|api| manual_webhook::to_model(&api, Some(state))))
    }

    fn update(
        &self,
        ctx: &RequestContext,
        plan: &ManualWebhookModel,
        prior: &ManualWebhookModel,
    ) -> Result<ManualWebhookModel, Diagnostics> {
        ensure_valid(plan.validate())?;
        let id = state_id(&prior.id)?;
        let body = manual_webhook::to_update_api(plan, prior)?;
        let updated = invoke(ctx, "update", OBJECT, Some(id), || {
            self.client.update_manual_webhook(id, &body)
        })?;
        info!(event = "Resource", phase = "Updated", resource = self.type_name(), id);
        Ok(manual_webhook::to_model(&updated, Some(plan)))
    }

    fn delete(&self, ctx: &RequestContext, state: &ManualWebhookModel) -> Result<(), Diagnostics> {
        let id = state_id(&state.id)?;
        deleted(
            self.type_name(),
            id,
            invoke(ctx, "delete", OBJECT, Some(id), || {
                self.client.delete_manual_webhook(id)
            }),
        )?;
        info!(event = "Resource", phase = "Deleted", resource = self.type_name(), id);
        Ok(())
    }

    fn import_state(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<ManualWebhookModel, Diagnostics> {
        let api = invoke(ctx, "import", OBJECT, Some(id), || {
            self.client.get_manual_webhook(id)
        })?;
        Ok(manual_webhook::to_model(&api, None))
    }
}
