use crate::api::models::{AccessBundle, BundleTarget, Integration, IntegrationTarget};
use crate::codec::{filters_to_tags, tags_to_filters};
use crate::error::ProviderError;
use crate::models::{BundleTargetModel, IntegrationTargetModel};

/// First integration, in catalog order, with this exact name that serves
/// `resource_type`.
pub fn find_integration<'c>(
    name: &str,
    resource_type: &str,
    catalog: &'c [Integration],
) -> Result<&'c Integration, ProviderError> {
    catalog
        .iter()
        .find(|i| {
            i.name == name && i.connected_resource_types.iter().any(|t| t == resource_type)
        })
        .ok_or_else(|| ProviderError::IntegrationNotFound {
            name: name.to_string(),
            resource_type: resource_type.to_string(),
        })
}

/// First bundle, in catalog order, with this exact name.
pub fn find_bundle<'c>(
    name: &str,
    catalog: &'c [AccessBundle],
) -> Result<&'c AccessBundle, ProviderError> {
    catalog
        .iter()
        .find(|b| b.name == name)
        .ok_or_else(|| ProviderError::BundleNotFound(name.to_string()))
}

pub fn integration_by_id<'c>(
    id: &str,
    catalog: &'c [Integration],
) -> Result<&'c Integration, ProviderError> {
    catalog
        .iter()
        .find(|i| i.id == id)
        .ok_or_else(|| ProviderError::IntegrationIdNotFound(id.to_string()))
}

pub fn bundle_by_id<'c>(
    id: &str,
    catalog: &'c [AccessBundle],
) -> Result<&'c AccessBundle, ProviderError> {
    catalog
        .iter()
        .find(|b| b.id == id)
        .ok_or_else(|| ProviderError::BundleIdNotFound(id.to_string()))
}

/// Build the API target for a configured integration target.
pub fn resolve_integration_target(
    target: &IntegrationTargetModel,
    catalog: &[Integration],
) -> Result<IntegrationTarget, ProviderError> {
    let integration = find_integration(&target.name, &target.resource_type, catalog)?;
    Ok(IntegrationTarget {
        integration_id: integration.id.clone(),
        resource_type: target.resource_type.clone(),
        resource_tag_includes: filters_to_tags(&target.resource_include_filters)?,
        resource_tag_excludes: filters_to_tags(&target.resource_exclude_filters)?,
        permissions: target.permissions.clone(),
    })
}

pub fn integration_target_to_model(
    target: &IntegrationTarget,
    catalog: &[Integration],
) -> Result<IntegrationTargetModel, ProviderError> {
    let integration = integration_by_id(&target.integration_id, catalog)?;
    Ok(IntegrationTargetModel {
        name: integration.name.clone(),
        resource_type: target.resource_type.clone(),
        resource_include_filters: tags_to_filters(&target.resource_tag_includes),
        resource_exclude_filters: tags_to_filters(&target.resource_tag_excludes),
        permissions: target.permissions.clone(),
    })
}

pub fn resolve_bundle_target(
    target: &BundleTargetModel,
    catalog: &[AccessBundle],
) -> Result<BundleTarget, ProviderError> {
    let bundle = find_bundle(&target.name, catalog)?;
    Ok(BundleTarget {
        bundle_id: bundle.id.clone(),
    })
}

pub fn bundle_target_to_model(
    target: &BundleTarget,
    catalog: &[AccessBundle],
) -> Result<BundleTargetModel, ProviderError> {
    let bundle = bundle_by_id(&target.bundle_id, catalog)?;
    Ok(BundleTargetModel {
        name: bundle.name.clone(),
    })
}
