//! The `apono_integrations` data source.

use std::sync::Arc;

use tracing::debug;

use crate::api::ApiClient;
use crate::api::models::Integration;
use crate::catalog::{ApiCatalog, CatalogProvider};
use crate::context::RequestContext;
use crate::diagnostics::Diagnostics;
use crate::models::{IntegrationSummary, IntegrationsQuery};

pub struct IntegrationsDataSource {
    client: Arc<dyn ApiClient>,
}

impl IntegrationsDataSource {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        IntegrationsDataSource { client }
    }

    pub fn type_name(&self) -> &'static str {
        "apono_integrations"
    }

    /// Every integration matching all the filters that are set.
    pub fn read(
        &self,
        ctx: &RequestContext,
        query: &IntegrationsQuery,
    ) -> Result<Vec<IntegrationSummary>, Diagnostics> {
        let catalog = ApiCatalog::new(self.client.as_ref(), ctx);
        let integrations = catalog.integrations()?;
        let matches: Vec<IntegrationSummary> = integrations
            .iter()
            .filter(|i| query.matches(i))
            .map(IntegrationSummary::from)
            .collect();
        debug!(
            event = "DataSource",
            phase = "Read",
            data_source = self.type_name(),
            total = integrations.len(),
            matched = matches.len()
        );
        Ok(matches)
    }
}

impl IntegrationsQuery {
    fn matches(&self, integration: &Integration) -> bool {
        let name = self.name.as_deref().is_none_or(|n| n == integration.name);
        let integration_type = self
            .integration_type
            .as_deref()
            .is_none_or(|t| t == integration.integration_type);
        let connector = self
            .connector_id
            .as_deref()
            .is_none_or(|c| integration.connector_id.as_deref() == Some(c));
        name && integration_type && connector
    }
}

#[cfg(test)]
mod tests {
    use yare::parameterized;

    use super::*;
    use crate::resources::tests::fixtures::{FakeApi, integration};

    fn source() -> (Arc<FakeApi>, IntegrationsDataSource) {
        let api = Arc::new(FakeApi::new());
        api.add_integration(integration("i-1", "analytics", &["postgresql-db"]));
        let mut other = integration("i-2", "analytics", &["mysql-db"]);
        other.integration_type = "mysql".into();
        other.connector_id = Some("c-2".into());
        api.add_integration(other);
        api.add_integration(integration("i-3", "billing", &["postgresql-db"]));
        let client: Arc<dyn ApiClient> = api.clone();
        (api, IntegrationsDataSource::new(client))
    }

    fn query(name: Option<&str>, integration_type: Option<&str>, connector_id: Option<&str>) -> IntegrationsQuery {
        IntegrationsQuery {
            name: name.map(str::to_string),
            integration_type: integration_type.map(str::to_string),
            connector_id: connector_id.map(str::to_string),
        }
    }

    #[parameterized(
        everything = { query(None, None, None), &["i-1", "i-2", "i-3"] },
        by_name = { query(Some("analytics"), None, None), &["i-1", "i-2"] },
        by_type = { query(None, Some("postgresql"), None), &["i-1", "i-3"] },
        by_connector = { query(None, None, Some("c-2")), &["i-2"] },
        combined = { query(Some("billing"), Some("mysql"), None), &[] },
    )]
    fn test_filters(query: IntegrationsQuery, expected: &[&str]) {
        let (_api, source) = source();
        let ids: Vec<String> = source
            .read(&RequestContext::new(), &query)
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_single_catalog_fetch() {
        let (api, source) = source();
        source.read(&RequestContext::new(), &IntegrationsQuery::default()).unwrap();
        assert_eq!(api.calls("list_integrations"), 1);
    }
}
