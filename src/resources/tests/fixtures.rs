//! In-memory doubles for the API client and the catalogs.

use std::cell::Cell;
use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::api::models::{
    AccessBundle, AccessFlow, Identity, Integration, ManualWebhook, Page, PageRequest, Pagination,
    UpdateAccessBundle, UpdateAccessFlow, UpdateIntegration, UpdateManualWebhook,
    UpsertAccessBundle, UpsertAccessFlow, UpsertIntegration, UpsertManualWebhook, User,
};
use crate::api::{ApiClient, ApiError, ApiResult};
use crate::catalog::CatalogProvider;
use crate::error::ProviderError;
use crate::types::Nullable;

pub(crate) fn group(id: &str, name: &str) -> Identity {
    Identity {
        id: id.to_string(),
        name: name.to_string(),
        identity_type: "GROUP".to_string(),
        source_integration_name: None,
    }
}

pub(crate) fn context_attribute(id: &str, name: &str) -> Identity {
    Identity {
        id: id.to_string(),
        name: name.to_string(),
        identity_type: "CONTEXT_ATTRIBUTE".to_string(),
        source_integration_name: Some("PagerDuty".to_string()),
    }
}

pub(crate) fn user(id: &str, email: &str) -> User {
    User {
        id: id.to_string(),
        email: email.to_string(),
        first_name: None,
        last_name: None,
        active: true,
    }
}

pub(crate) fn integration(id: &str, name: &str, resource_types: &[&str]) -> Integration {
    Integration {
        id: id.to_string(),
        name: name.to_string(),
        integration_type: "postgresql".to_string(),
        status: Some("Active".to_string()),
        connector_id: Some("c-1".to_string()),
        connected_resource_types: resource_types.iter().map(|t| t.to_string()).collect(),
        params: Default::default(),
        secret_store_config: None,
        custom_access_details: None,
        last_sync_time: None,
    }
}

pub(crate) fn bundle(id: &str, name: &str) -> AccessBundle {
    AccessBundle {
        id: id.to_string(),
        name: name.to_string(),
        integration_targets: Vec::new(),
    }
}

fn not_found(object: &str, id: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        body: format!("{object} {id} not found"),
    }
}

/// Fixed catalogs that count how often they are fetched.
#[derive(Default)]
pub(crate) struct StaticCatalog {
    identities: Vec<Identity>,
    users: Vec<User>,
    integrations: Vec<Integration>,
    bundles: Vec<AccessBundle>,
    identity_fetches: Cell<usize>,
    integration_fetches: Cell<usize>,
}

impl StaticCatalog {
    pub(crate) fn with_identities(mut self, identities: Vec<Identity>) -> Self {
        self.identities = identities;
        self
    }

    pub(crate) fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    pub(crate) fn with_integrations(mut self, integrations: Vec<Integration>) -> Self {
        self.integrations = integrations;
        self
    }

    pub(crate) fn with_bundles(mut self, bundles: Vec<AccessBundle>) -> Self {
        self.bundles = bundles;
        self
    }

    pub(crate) fn identity_fetches(&self) -> usize {
        self.identity_fetches.get()
    }

    pub(crate) fn integration_fetches(&self) -> usize {
        self.integration_fetches.get()
    }
}

impl CatalogProvider for StaticCatalog {
    fn identities(&self) -> Result<Vec<Identity>, ProviderError> {
        self.identity_fetches.set(self.identity_fetches.get() + 1);
        Ok(self.identities.clone())
    }

    fn integrations(&self) -> Result<Vec<Integration>, ProviderError> {
        self.integration_fetches.set(self.integration_fetches.get() + 1);
        Ok(self.integrations.clone())
    }

    fn access_bundles(&self) -> Result<Vec<AccessBundle>, ProviderError> {
        Ok(self.bundles.clone())
    }

    fn user(&self, id_or_email: &str) -> Result<User, ProviderError> {
        self.users
            .iter()
            .find(|u| u.id == id_or_email || u.email == id_or_email)
            .cloned()
            .ok_or_else(|| {
                ProviderError::upstream("read", "user", Some(id_or_email), not_found("user", id_or_email))
            })
    }
}

#[derive(Default)]
struct State {
    identities: Vec<Identity>,
    users: Vec<User>,
    integrations: Vec<Integration>,
    bundles: Vec<AccessBundle>,
    flows: Vec<AccessFlow>,
    webhooks: Vec<ManualWebhook>,
    next_id: usize,
    calls: HashMap<&'static str, usize>,
    failures: HashMap<&'static str, ApiError>,
    updates: Vec<JsonValue>,
}

impl State {
    fn record(&mut self, operation: &'static str) -> ApiResult<()> {
        *self.calls.entry(operation).or_default() += 1;
        match self.failures.get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn new_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn record_update<T: Serialize>(&mut self, body: &T) {
        if let Ok(json) = serde_json::to_value(body) {
            self.updates.push(json);
        }
    }
}

fn page<T: Clone>(items: &[T], request: PageRequest) -> Page<T> {
    let data = items
        .iter()
        .skip(request.offset as usize)
        .take(request.limit as usize)
        .cloned()
        .collect();
    Page {
        data,
        pagination: Pagination {
            total: items.len() as u64,
            limit: u64::from(request.limit),
            offset: u64::from(request.offset),
        },
    }
}

fn patch<T: Clone>(field: &mut T, update: &Nullable<T>, cleared: T) {
    match update {
        Nullable::Unset => {}
        Nullable::Null => *field = cleared,
        Nullable::Value(v) => *field = v.clone(),
    }
}

fn patch_option<T: Clone>(field: &mut Option<T>, update: &Nullable<T>) {
    match update {
        Nullable::Unset => {}
        Nullable::Null => *field = None,
        Nullable::Value(v) => *field = Some(v.clone()),
    }
}

/// An [`ApiClient`] backed by vectors, with per-operation call counts.
#[derive(Default)]
pub(crate) struct FakeApi {
    state: Mutex<State>,
}

impl FakeApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_identity(&self, identity: Identity) {
        self.state.lock().unwrap().identities.push(identity);
    }

    pub(crate) fn add_user(&self, user: User) {
        self.state.lock().unwrap().users.push(user);
    }

    pub(crate) fn add_integration(&self, integration: Integration) {
        self.state.lock().unwrap().integrations.push(integration);
    }

    pub(crate) fn add_bundle(&self, bundle: AccessBundle) {
        self.state.lock().unwrap().bundles.push(bundle);
    }

    pub(crate) fn remove_access_flow(&self, id: &str) {
        self.state.lock().unwrap().flows.retain(|f| f.id != id);
    }

    /// Make every call of `operation` fail with `err`.
    pub(crate) fn fail(&self, operation: &'static str, err: ApiError) {
        self.state.lock().unwrap().failures.insert(operation, err);
    }

    pub(crate) fn calls(&self, operation: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .get(operation)
            .copied()
            .unwrap_or_default()
    }

    /// Serialized PATCH bodies, oldest first.
    pub(crate) fn updates(&self) -> Vec<JsonValue> {
        self.state.lock().unwrap().updates.clone()
    }

    pub(crate) fn access_flow(&self, id: &str) -> Option<AccessFlow> {
        self.state.lock().unwrap().flows.iter().find(|f| f.id == id).cloned()
    }
}

impl ApiClient for FakeApi {
    fn list_identities(&self, request: PageRequest) -> ApiResult<Page<Identity>> {
        let mut state = self.state.lock().unwrap();
        state.record("list_identities")?;
        Ok(page(&state.identities, request))
    }

    fn get_user(&self, id_or_email: &str) -> ApiResult<User> {
        let mut state = self.state.lock().unwrap();
        state.record("get_user")?;
        state
            .users
            .iter()
            .find(|u| u.id == id_or_email || u.email == id_or_email)
            .cloned()
            .ok_or_else(|| not_found("user", id_or_email))
    }

    fn list_integrations(&self, request: PageRequest) -> ApiResult<Page<Integration>> {
        let mut state = self.state.lock().unwrap();
        state.record("list_integrations")?;
        Ok(page(&state.integrations, request))
    }

    fn get_integration(&self, id: &str) -> ApiResult<Integration> {
        let mut state = self.state.lock().unwrap();
        state.record("get_integration")?;
        state
            .integrations
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| not_found("integration", id))
    }

    fn create_integration(&self, body: &UpsertIntegration) -> ApiResult<Integration> {
        let mut state = self.state.lock().unwrap();
        state.record("create_integration")?;
        let created = Integration {
            id: state.new_id("i"),
            name: body.name.clone(),
            integration_type: body.integration_type.clone(),
            status: Some("Initializing".to_string()),
            connector_id: body.connector_id.clone(),
            connected_resource_types: body.connected_resource_types.clone(),
            params: body.params.clone(),
            secret_store_config: body.secret_store_config.clone(),
            custom_access_details: body.custom_access_details.clone(),
            last_sync_time: None,
        };
        state.integrations.push(created.clone());
        Ok(created)
    }

    fn update_integration(&self, id: &str, body: &UpdateIntegration) -> ApiResult<Integration> {
        let mut state = self.state.lock().unwrap();
        state.record("update_integration")?;
        state.record_update(body);
        let integration = state
            .integrations
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| not_found("integration", id))?;
        patch(&mut integration.name, &body.name, String::new());
        patch(
            &mut integration.connected_resource_types,
            &body.connected_resource_types,
            Vec::new(),
        );
        patch(&mut integration.params, &body.params, Default::default());
        patch_option(&mut integration.secret_store_config, &body.secret_store_config);
        patch_option(&mut integration.custom_access_details, &body.custom_access_details);
        Ok(integration.clone())
    }

    fn delete_integration(&self, id: &str) -> ApiResult<()> {
        let mut state = self.state.lock().unwrap();
        state.record("delete_integration")?;
        let before = state.integrations.len();
        state.integrations.retain(|i| i.id != id);
        if state.integrations.len() == before {
            return Err(not_found("integration", id));
        }
        Ok(())
    }

    fn list_access_bundles(&self, request: PageRequest) -> ApiResult<Page<AccessBundle>> {
        let mut state = self.state.lock().unwrap();
        state.record("list_access_bundles")?;
        Ok(page(&state.bundles, request))
    }

    fn get_access_bundle(&self, id: &str) -> ApiResult<AccessBundle> {
        let mut state = self.state.lock().unwrap();
        state.record("get_access_bundle")?;
        state
            .bundles
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| not_found("access bundle", id))
    }

    fn create_access_bundle(&self, body: &UpsertAccessBundle) -> ApiResult<AccessBundle> {
        let mut state = self.state.lock().unwrap();
        state.record("create_access_bundle")?;
        let created = AccessBundle {
            id: state.new_id("b"),
            name: body.name.clone(),
            integration_targets: body.integration_targets.clone(),
        };
        state.bundles.push(created.clone());
        Ok(created)
    }

    fn update_access_bundle(
        &self,
        id: &str,
        body: &UpdateAccessBundle,
    ) -> ApiResult<AccessBundle> {
        let mut state = self.state.lock().unwrap();
        state.record("update_access_bundle")?;
        state.record_update(body);
        let bundle = state
            .bundles
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| not_found("access bundle", id))?;
        patch(&mut bundle.name, &body.name, String::new());
        patch(&mut bundle.integration_targets, &body.integration_targets, Vec::new());
        Ok(bundle.clone())
    }

    fn delete_access_bundle(&self, id: &str) -> ApiResult<()> {
        let mut state = self.state.lock().unwrap();
        state.record("delete_access_bundle")?;
        let before = state.bundles.len();
        state.bundles.retain(|b| b.id != id);
        if state.bundles.len() == before {
            return Err(not_found("access bundle", id));
        }
        Ok(())
    }

    fn get_access_flow(&self, id: &str) -> ApiResult<AccessFlow> {
        let mut state = self.state.lock().unwrap();
        state.record("get_access_flow")?;
        state
            .flows
            .iter()
            .find(|f| f.id == id)
            .cloned()
            .ok_or_else(|| not_found("access flow", id))
    }

    fn create_access_flow(&self, body: &UpsertAccessFlow) -> ApiResult<AccessFlow> {
        let mut state = self.state.lock().unwrap();
        state.record("create_access_flow")?;
        let created = AccessFlow {
            id: state.new_id("af"),
            name: body.name.clone(),
            active: body.active,
            trigger: body.trigger.clone(),
            grantees: body.grantees.clone(),
            integration_targets: body.integration_targets.clone(),
            bundle_targets: body.bundle_targets.clone(),
            approvers: body.approvers.clone(),
            revoke_after_in_sec: body.revoke_after_in_sec,
            settings: body.settings.clone(),
            created_date: Some(1_700_000_000.0),
        };
        state.flows.push(created.clone());
        Ok(created)
    }

    fn update_access_flow(&self, id: &str, body: &UpdateAccessFlow) -> ApiResult<AccessFlow> {
        let mut state = self.state.lock().unwrap();
        state.record("update_access_flow")?;
        state.record_update(body);
        let flow = state
            .flows
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| not_found("access flow", id))?;
        patch(&mut flow.name, &body.name, String::new());
        patch(&mut flow.active, &body.active, false);
        patch(&mut flow.trigger, &body.trigger, Default::default());
        patch(&mut flow.grantees, &body.grantees, Vec::new());
        patch(&mut flow.integration_targets, &body.integration_targets, Vec::new());
        patch(&mut flow.bundle_targets, &body.bundle_targets, Vec::new());
        patch(&mut flow.approvers, &body.approvers, Vec::new());
        patch(&mut flow.revoke_after_in_sec, &body.revoke_after_in_sec, 0);
        patch_option(&mut flow.settings, &body.settings);
        Ok(flow.clone())
    }

    fn delete_access_flow(&self, id: &str) -> ApiResult<()> {
        let mut state = self.state.lock().unwrap();
        state.record("delete_access_flow")?;
        let before = state.flows.len();
        state.flows.retain(|f| f.id != id);
        if state.flows.len() == before {
            return Err(not_found("access flow", id));
        }
        Ok(())
    }

    fn get_manual_webhook(&self, id: &str) -> ApiResult<ManualWebhook> {
        let mut state = self.state.lock().unwrap();
        state.record("get_manual_webhook")?;
        state
            .webhooks
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or_else(|| not_found("manual webhook", id))
    }

    fn create_manual_webhook(&self, body: &UpsertManualWebhook) -> ApiResult<ManualWebhook> {
        let mut state = self.state.lock().unwrap();
        state.record("create_manual_webhook")?;
        let mut authentication_config = body.authentication_config.clone();
        // The client secret is write-only.
        if let Some(oauth) = authentication_config.as_mut().and_then(|a| a.oauth.as_mut()) {
            oauth.client_secret = None;
        }
        let created = ManualWebhook {
            id: state.new_id("wh"),
            name: body.name.clone(),
            active: body.active,
            webhook_type: body.webhook_type.clone(),
            body_template: body.body_template.clone(),
            response_validators: body.response_validators.clone(),
            timeout_in_sec: body.timeout_in_sec,
            authentication_config,
            custom_validation_error_message: body.custom_validation_error_message.clone(),
        };
        state.webhooks.push(created.clone());
        Ok(created)
    }

    fn update_manual_webhook(
        &self,
        id: &str,
        body: &UpdateManualWebhook,
    ) -> ApiResult<ManualWebhook> {
        let mut state = self.state.lock().unwrap();
        state.record("update_manual_webhook")?;
        state.record_update(body);
        let webhook = state
            .webhooks
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| not_found("manual webhook", id))?;
        patch(&mut webhook.name, &body.name, String::new());
        patch(&mut webhook.active, &body.active, false);
        patch(&mut webhook.webhook_type, &body.webhook_type, Default::default());
        patch_option(&mut webhook.body_template, &body.body_template);
        patch(&mut webhook.response_validators, &body.response_validators, Vec::new());
        patch_option(&mut webhook.timeout_in_sec, &body.timeout_in_sec);
        patch_option(&mut webhook.authentication_config, &body.authentication_config);
        if let Some(oauth) = webhook
            .authentication_config
            .as_mut()
            .and_then(|a| a.oauth.as_mut())
        {
            oauth.client_secret = None;
        }
        patch_option(
            &mut webhook.custom_validation_error_message,
            &body.custom_validation_error_message,
        );
        Ok(webhook.clone())
    }

    fn delete_manual_webhook(&self, id: &str) -> ApiResult<()> {
        let mut state = self.state.lock().unwrap();
        state.record("delete_manual_webhook")?;
        let before = state.webhooks.len();
        state.webhooks.retain(|w| w.id != id);
        if state.webhooks.len() == before {
            return Err(not_found("manual webhook", id));
        }
        Ok(())
    }
}
