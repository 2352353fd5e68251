use crate::diagnostics::Diagnostics;
use crate::error::ProviderError;
use crate::types::Value;

use super::common::{IntegrationTargetModel, validate_integration_targets};

/// `apono_access_bundle`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccessBundleModel {
    pub id: Value<String>,
    pub name: Value<String>,
    pub integration_targets: Value<Vec<IntegrationTargetModel>>,
}

impl AccessBundleModel {
    pub fn validate(&self) -> Diagnostics {
        let mut diags = Diagnostics::new();
        if self.name.as_known().is_some_and(String::is_empty) {
            diags.add_error("name", ProviderError::invalid_value("name", "must not be empty"));
        }
        validate_integration_targets("integration_targets", &self.integration_targets, &mut diags);
        diags
    }
}
