use std::sync::Arc;

use tracing::info;

use crate::api::{ApiClient, HttpApiClient};
use crate::config::{ProviderBlock, ProviderConfig};
use crate::data_sources::IntegrationsDataSource;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::resources::{
    AccessBundleResource, AccessFlowResource, IntegrationResource, ManualWebhookResource,
};

/// Resource types served by this provider.
pub const RESOURCE_TYPES: [&str; 4] = [
    "apono_access_bundle",
    "apono_access_flow",
    "apono_integration",
    "apono_manual_webhook",
];

/// Data source types served by this provider.
pub const DATA_SOURCE_TYPES: [&str; 1] = ["apono_integrations"];

/// A configured provider, handing out handlers that share one API client.
#[derive(Clone)]
pub struct Provider {
    client: Arc<dyn ApiClient>,
}

impl Provider {
    /// Resolve the provider block and build the HTTP client.
    pub fn configure(block: &ProviderBlock) -> Result<Self, Diagnostics> {
        let config = ProviderConfig::from_block(block)?;
        let endpoint = config.endpoint().to_string();
        let client = HttpApiClient::new(config).map_err(|err| {
            let mut diags = Diagnostics::new();
            diags.push(Diagnostic::error("Failed to create API client", err.to_string()));
            diags
        })?;
        info!(event = "Provider", phase = "Configured", endpoint = %endpoint);
        Ok(Self::with_client(Arc::new(client)))
    }

    pub fn with_client(client: Arc<dyn ApiClient>) -> Self {
        Provider { client }
    }

    pub fn access_flow(&self) -> AccessFlowResource {
        AccessFlowResource::new(self.client.clone())
    }

    pub fn access_bundle(&self) -> AccessBundleResource {
        AccessBundleResource::new(self.client.clone())
    }

    pub fn integration(&self) -> IntegrationResource {
        IntegrationResource::new(self.client.clone())
    }

    pub fn manual_webhook(&self) -> ManualWebhookResource {
        ManualWebhookResource::new(self.client.clone())
    }

    pub fn integrations(&self) -> IntegrationsDataSource {
        IntegrationsDataSource::new(self.client.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ResourceHandler;
    use crate::resources::tests::fixtures::FakeApi;
    use crate::types::Value;

    #[test]
    fn test_configure_requires_token() {
        // A block that spells out everything but the token. The process
        // environment may still supply one, so only assert when it does not.
        if std::env::var(crate::config::PERSONAL_TOKEN_ENV).is_ok() {
            return;
        }
        let block = ProviderBlock {
            endpoint: Value::known("https://api.example.com".to_string()),
            ..Default::default()
        };
        let diags = Provider::configure(&block).err().unwrap();
        assert_eq!(
            diags.iter().next().unwrap().attribute.as_deref(),
            Some("personal_token")
        );
    }

    #[test]
    fn test_configure_builds_http_client() {
        let block = ProviderBlock {
            endpoint: Value::known("https://api.example.com".to_string()),
            personal_token: Value::known("token".to_string()),
            ..Default::default()
        };
        assert!(Provider::configure(&block).is_ok());
    }

    #[test]
    fn test_handlers_cover_resource_types() {
        let provider = Provider::with_client(Arc::new(FakeApi::new()));
        let mut names = vec![
            provider.access_bundle().type_name(),
            provider.access_flow().type_name(),
            provider.integration().type_name(),
            provider.manual_webhook().type_name(),
        ];
        names.sort();
        assert_eq!(names, RESOURCE_TYPES);
        assert_eq!(provider.integrations().type_name(), DATA_SOURCE_TYPES[0]);
    }
}
