//! Terraform-side resource models.
//!
//! Top-level attributes are [`Value`](crate::types::Value)s so that null and
//! unknown survive the trip through the converters. Nested blocks inside a
//! known set are plain structs with `Option` for optional members.
//!
//! Each model offers an offline `validate` used by ValidateConfig: it never
//! touches the network and skips values that are still unknown.

mod access_bundle;
mod access_flow;
mod common;
mod integration;
mod manual_webhook;

pub use access_bundle::AccessBundleModel;
pub use access_flow::{AccessFlowModel, AccessFlowSettingsModel, TimeframeModel, TriggerModel};
pub use common::{BundleTargetModel, IdentityModel, IntegrationTargetModel, ResourceFilter};
pub use integration::{IntegrationModel, IntegrationSummary, IntegrationsQuery};
pub use manual_webhook::{
    AuthenticationConfigModel, HttpRequestModel, IntegrationActionModel, ManualWebhookModel,
    OAuthModel, ResponseValidatorModel, WebhookTypeModel,
};

pub(crate) use common::{validate_identities, validate_integration_targets};
