pub use api::{ApiClient, ApiError, HttpApiClient};
pub use catalog::{ApiCatalog, CatalogProvider, ConversionScope};
pub use config::{ProviderBlock, ProviderConfig};
pub use context::RequestContext;
pub use data_sources::IntegrationsDataSource;
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{ErrorKind, ProviderError};
pub use provider::Provider;
pub use resources::{
    AccessBundleResource, AccessFlowResource, IntegrationResource, ManualWebhookResource,
    ResourceHandler,
};
pub use secret::{SecretConfig, SecretConfigModel, SecretType};
pub use types::{Nullable, Value};

pub mod api;
pub mod catalog;
pub mod codec;
pub mod config;
pub mod context;
pub mod convert;
pub mod models;
pub mod resolve;
pub mod secret;
pub mod types;

mod data_sources;
mod diagnostics;
mod error;
mod provider;
mod resources;
