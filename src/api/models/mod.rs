//! Wire models, named after the objects of the Terraform API.
//!
//! Read models use `Option` for nullable fields. Update models use
//! [`Nullable`](crate::types::Nullable) so that PATCH bodies only carry the
//! fields that should change.

mod access_bundle;
mod access_flow;
mod common;
mod identity;
mod integration;
mod webhook;

pub use access_bundle::{AccessBundle, UpdateAccessBundle, UpsertAccessBundle};
pub use access_flow::{
    AccessFlow, AccessFlowSettings, Timeframe, Trigger, UpdateAccessFlow, UpsertAccessFlow,
};
pub use common::{
    BundleTarget, IdentityRef, IntegrationTarget, Page, PageRequest, Pagination, Tag,
};
pub use identity::{Identity, User};
pub use integration::{Integration, UpdateIntegration, UpsertIntegration};
pub use webhook::{
    ManualWebhook, OAuthConfig, ResponseValidator, UpdateManualWebhook, UpsertManualWebhook,
    WebhookAuthentication, WebhookHttpRequest, WebhookIntegrationAction, WebhookType,
};
