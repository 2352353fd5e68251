use crate::diagnostics::Diagnostics;
use crate::error::ProviderError;
use crate::types::{FilterKind, IdentityType, Value};

/// A resource filter as configured: `type` is one of `id`, `name`, `tag`;
/// `key` is required for `tag` and ignored otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceFilter {
    pub kind: String,
    pub key: Option<String>,
    pub value: String,
}

impl ResourceFilter {
    pub fn id(value: impl Into<String>) -> Self {
        ResourceFilter {
            kind: FilterKind::Id.as_ref().to_string(),
            key: None,
            value: value.into(),
        }
    }

    pub fn name(value: impl Into<String>) -> Self {
        ResourceFilter {
            kind: FilterKind::Name.as_ref().to_string(),
            key: None,
            value: value.into(),
        }
    }

    pub fn tag(key: impl Into<String>, value: impl Into<String>) -> Self {
        ResourceFilter {
            kind: FilterKind::Tag.as_ref().to_string(),
            key: Some(key.into()),
            value: value.into(),
        }
    }
}

/// A grantee or approver by name and Terraform type (`user`, `group`,
/// `context_attribute`). Users are named by email.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityModel {
    pub name: String,
    pub identity_type: String,
}

impl IdentityModel {
    pub fn new(name: impl Into<String>, identity_type: IdentityType) -> Self {
        IdentityModel {
            name: name.into(),
            identity_type: identity_type.terraform_name().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IntegrationTargetModel {
    /// Integration name
    pub name: String,
    pub resource_type: String,
    pub resource_include_filters: Vec<ResourceFilter>,
    pub resource_exclude_filters: Vec<ResourceFilter>,
    pub permissions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BundleTargetModel {
    pub name: String,
}

/// State holds the canonical spelling, so configuration must use it as well.
pub(crate) fn ensure_canonical(
    attribute: &str,
    value: &str,
    canonical: &str,
) -> Result<(), ProviderError> {
    if value == canonical {
        Ok(())
    } else {
        Err(ProviderError::invalid_value(
            attribute,
            format!("'{value}' must be written as '{canonical}'"),
        ))
    }
}

/// Empty strings read back as null; omit the attribute instead.
pub(crate) fn validate_not_empty(attribute: &str, value: &Value<String>, diags: &mut Diagnostics) {
    if value.as_known().is_some_and(String::is_empty) {
        diags.add_error(
            attribute,
            ProviderError::invalid_value(attribute, "must not be empty, omit it instead"),
        );
    }
}

/// Empty sets read back as null; omit the attribute instead.
pub(crate) fn validate_non_empty_set<T>(
    attribute: &str,
    value: &Value<Vec<T>>,
    diags: &mut Diagnostics,
) {
    if value.as_known().is_some_and(Vec::is_empty) {
        diags.add_error(
            attribute,
            ProviderError::invalid_value(attribute, "must not be empty, omit it instead"),
        );
    }
}

pub(crate) fn validate_identities(
    attribute: &str,
    identities: &Value<Vec<IdentityModel>>,
    diags: &mut Diagnostics,
) {
    let Some(identities) = identities.as_known() else {
        return;
    };
    for identity in identities {
        match IdentityType::parse(&identity.identity_type) {
            Ok(parsed) if parsed.terraform_name() == identity.identity_type => {}
            _ => diags.add_error(
                attribute,
                ProviderError::invalid_value(
                    format!("{attribute}.type"),
                    format!(
                        "'{}' is not one of: {}",
                        identity.identity_type,
                        IdentityType::allowed()
                    ),
                ),
            ),
        }
        if identity.name.is_empty() {
            diags.add_error(
                attribute,
                ProviderError::invalid_value(format!("{attribute}.name"), "must not be empty"),
            );
        }
    }
}

pub(crate) fn validate_integration_targets(
    attribute: &str,
    targets: &Value<Vec<IntegrationTargetModel>>,
    diags: &mut Diagnostics,
) {
    let Some(targets) = targets.as_known() else {
        return;
    };
    for target in targets {
        let filters = target
            .resource_include_filters
            .iter()
            .chain(&target.resource_exclude_filters);
        for filter in filters {
            if let Err(err) = validate_filter(filter) {
                diags.add_error(attribute, err);
            }
        }
    }
}

fn validate_filter(filter: &ResourceFilter) -> Result<(), ProviderError> {
    let kind = FilterKind::parse(&filter.kind)?;
    ensure_canonical("filter.type", &filter.kind, kind.as_ref())?;
    match (kind, filter.key.as_deref()) {
        (FilterKind::Tag, None | Some("")) => Err(ProviderError::MissingFilterKey {
            value: filter.value.clone(),
        }),
        (FilterKind::Tag, Some(key)) if FilterKind::is_reserved_tag(key) => {
            Err(ProviderError::AmbiguousConfiguration(format!(
                "tag key '{key}' is reserved, use a filter of type '{}' instead",
                FilterKind::from_tag_name(key)
            )))
        }
        (FilterKind::Id | FilterKind::Name, Some(key)) => {
            Err(ProviderError::AmbiguousConfiguration(format!(
                "filter of type '{kind}' does not take a key, got '{key}'"
            )))
        }
        _ => Ok(()),
    }
}
