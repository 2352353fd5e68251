//! The upstream REST API as seen by the converters.
//!
//! [`ApiClient`] is the contract of the generated client: typed inputs,
//! typed outputs, and a structured [`ApiError`]. [`HttpApiClient`] is the
//! blocking `reqwest` implementation used by the provider.

mod error;
mod http;
pub mod models;

use tracing::debug;

pub use error::ApiError;
pub use http::HttpApiClient;

use crate::context::RequestContext;
use crate::error::ProviderError;
use models::{
    AccessBundle, AccessFlow, Identity, Integration, ManualWebhook, Page, PageRequest,
    UpdateAccessBundle, UpdateAccessFlow, UpdateIntegration, UpdateManualWebhook,
    UpsertAccessBundle, UpsertAccessFlow, UpsertIntegration, UpsertManualWebhook, User,
};

pub type ApiResult<T> = Result<T, ApiError>;

/// Operations the core needs from the access-management API.
pub trait ApiClient: Send + Sync {
    fn list_identities(&self, page: PageRequest) -> ApiResult<Page<Identity>>;
    /// Look up a single user by ID or email.
    fn get_user(&self, id_or_email: &str) -> ApiResult<User>;

    fn list_integrations(&self, page: PageRequest) -> ApiResult<Page<Integration>>;
    fn get_integration(&self, id: &str) -> ApiResult<Integration>;
    fn create_integration(&self, body: &UpsertIntegration) -> ApiResult<Integration>;
    fn update_integration(&self, id: &str, body: &UpdateIntegration) -> ApiResult<Integration>;
    fn delete_integration(&self, id: &str) -> ApiResult<()>;

    fn list_access_bundles(&self, page: PageRequest) -> ApiResult<Page<AccessBundle>>;
    fn get_access_bundle(&self, id: &str) -> ApiResult<AccessBundle>;
    fn create_access_bundle(&self, body: &UpsertAccessBundle) -> ApiResult<AccessBundle>;
    fn update_access_bundle(&self, id: &str, body: &UpdateAccessBundle)
    -> ApiResult<AccessBundle>;
    fn delete_access_bundle(&self, id: &str) -> ApiResult<()>;

    fn get_access_flow(&self, id: &str) -> ApiResult<AccessFlow>;
    fn create_access_flow(&self, body: &UpsertAccessFlow) -> ApiResult<AccessFlow>;
    fn update_access_flow(&self, id: &str, body: &UpdateAccessFlow) -> ApiResult<AccessFlow>;
    fn delete_access_flow(&self, id: &str) -> ApiResult<()>;

    fn get_manual_webhook(&self, id: &str) -> ApiResult<ManualWebhook>;
    fn create_manual_webhook(&self, body: &UpsertManualWebhook) -> ApiResult<ManualWebhook>;
    fn update_manual_webhook(
        &self,
        id: &str,
        body: &UpdateManualWebhook,
    ) -> ApiResult<ManualWebhook>;
    fn delete_manual_webhook(&self, id: &str) -> ApiResult<()>;
}

/// Issue one API call on behalf of the core.
///
/// Refuses to call out once `ctx` is canceled or expired, and wraps client
/// errors with the action, object and ID they concern.
pub(crate) fn invoke<T, F>(
    ctx: &RequestContext,
    action: &str,
    object: &str,
    id: Option<&str>,
    call: F,
) -> Result<T, ProviderError>
where
    F: FnOnce() -> ApiResult<T>,
{
    ctx.ensure_active(&format!("{action} {object}"))?;
    debug!(event = "Api", phase = "Call", action, object, id);
    call().map_err(|err| {
        debug!(event = "Api", phase = "Error", action, object, id, error = %err);
        ProviderError::upstream(action, object, id, err)
    })
}
