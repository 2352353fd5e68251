use std::collections::BTreeMap;

use crate::diagnostics::Diagnostics;
use crate::error::ProviderError;
use crate::secret::SecretConfigModel;
use crate::types::Value;

use super::common::{validate_non_empty_set, validate_not_empty};

/// `apono_integration`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegrationModel {
    pub id: Value<String>,
    pub name: Value<String>,
    /// Requires replacement when changed.
    pub integration_type: Value<String>,
    /// Requires replacement when changed.
    pub connector_id: Value<String>,
    pub connected_resource_types: Value<Vec<String>>,
    pub metadata: Value<BTreeMap<String, String>>,
    pub secret_store_config: SecretConfigModel,
    pub custom_access_details: Value<String>,
    /// Computed.
    pub status: Value<String>,
}

impl IntegrationModel {
    pub fn validate(&self) -> Diagnostics {
        let mut diags = Diagnostics::new();
        if self.name.as_known().is_some_and(String::is_empty) {
            diags.add_error("name", ProviderError::invalid_value("name", "must not be empty"));
        }
        if self.integration_type.as_known().is_some_and(String::is_empty) {
            diags.add_error("type", ProviderError::invalid_value("type", "must not be empty"));
        }
        validate_not_empty("connector_id", &self.connector_id, &mut diags);
        validate_not_empty("custom_access_details", &self.custom_access_details, &mut diags);
        validate_non_empty_set(
            "connected_resource_types",
            &self.connected_resource_types,
            &mut diags,
        );
        if let Some(types) = self.connected_resource_types.as_known() {
            if types.iter().any(String::is_empty) {
                diags.add_error(
                    "connected_resource_types",
                    ProviderError::invalid_value(
                        "connected_resource_types",
                        "resource types must not be empty",
                    ),
                );
            }
        }
        if let Some(metadata) = self.metadata.as_known() {
            if metadata.is_empty() {
                diags.add_error(
                    "metadata",
                    ProviderError::invalid_value("metadata", "must not be empty, omit it instead"),
                );
            }
            if metadata.keys().any(|k| k.trim().is_empty()) {
                diags.add_error(
                    "metadata",
                    ProviderError::invalid_value("metadata", "keys must not be blank"),
                );
            }
        }
        diags.capture("secret_store_config", self.secret_store_config.validate());
        diags
    }
}

/// Filters of the `apono_integrations` data source. Unset fields match all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrationsQuery {
    pub name: Option<String>,
    pub integration_type: Option<String>,
    pub connector_id: Option<String>,
}

/// One entry of the `apono_integrations` data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationSummary {
    pub id: String,
    pub name: String,
    pub integration_type: String,
    pub connector_id: Option<String>,
    pub connected_resource_types: Vec<String>,
}
