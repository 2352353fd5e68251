use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use thiserror::Error;

use crate::api::ApiError;

/// Broad category of a [`ProviderError`], used to pick the diagnostic summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    AmbiguousConfiguration,
    InvalidConfiguration,
    Unsupported,
    Upstream,
    Canceled,
}

#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ProviderError {
    #[error("invalid filter type '{kind}', allowed types are: {allowed}")]
    InvalidFilterKind { kind: String, allowed: String },

    #[error("filter of type 'tag' with value '{value}' requires a non-empty key")]
    MissingFilterKey { value: String },

    #[error("identity '{name}' of type '{identity_type}' was not found")]
    IdentityNotFound { name: String, identity_type: String },

    #[error("identity with id '{id}' of type '{identity_type}' was not found")]
    IdentityIdNotFound { id: String, identity_type: String },

    #[error(
        "identity type '{0}' is not supported by this provider version, upgrade the provider or remove the identity outside Terraform"
    )]
    UnsupportedIdentityType(String),

    #[error("integration '{name}' with resource type '{resource_type}' was not found")]
    IntegrationNotFound { name: String, resource_type: String },

    #[error("integration with id '{0}' was not found")]
    IntegrationIdNotFound(String),

    #[error("access bundle '{0}' was not found")]
    BundleNotFound(String),

    #[error("access bundle with id '{0}' was not found")]
    BundleIdNotFound(String),

    #[error(
        "secret type '{0}' is not supported by this provider version, upgrade the provider or edit the integration outside Terraform"
    )]
    UnknownSecretType(String),

    #[error("secret of type '{secret_type}' is missing field '{field}'")]
    InvalidSecretConfig { secret_type: String, field: String },

    #[error("ambiguous configuration: {0}")]
    AmbiguousConfiguration(String),

    #[error("attribute '{0}' must be set to a known value")]
    MissingAttribute(String),

    #[error("invalid value for '{attribute}': {message}")]
    InvalidValue { attribute: String, message: String },

    #[error("failed to {action} {object}{}: {source}", display_id(.id))]
    Upstream {
        action: String,
        object: String,
        id: Option<String>,
        source: ApiError,
    },

    #[error("operation canceled: {0}")]
    Canceled(String),
}

fn display_id(id: &Option<String>) -> String {
    id.as_deref().map(|id| format!(" '{id}'")).unwrap_or_default()
}

impl ProviderError {
    /// Wrap a client error with the action and object it was issued for.
    pub fn upstream(action: &str, object: &str, id: Option<&str>, source: ApiError) -> Self {
        ProviderError::Upstream {
            action: action.to_string(),
            object: object.to_string(),
            id: id.map(str::to_string),
            source,
        }
    }

    pub fn invalid_value(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        ProviderError::InvalidValue {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::IdentityNotFound { .. }
            | ProviderError::IdentityIdNotFound { .. }
            | ProviderError::IntegrationNotFound { .. }
            | ProviderError::IntegrationIdNotFound(_)
            | ProviderError::BundleNotFound(_)
            | ProviderError::BundleIdNotFound(_) => ErrorKind::NotFound,
            ProviderError::InvalidFilterKind { .. }
            | ProviderError::MissingFilterKey { .. }
            | ProviderError::AmbiguousConfiguration(_) => ErrorKind::AmbiguousConfiguration,
            ProviderError::InvalidSecretConfig { .. }
            | ProviderError::MissingAttribute(_)
            | ProviderError::InvalidValue { .. } => ErrorKind::InvalidConfiguration,
            ProviderError::UnsupportedIdentityType(_) | ProviderError::UnknownSecretType(_) => {
                ErrorKind::Unsupported
            }
            ProviderError::Upstream { .. } => ErrorKind::Upstream,
            ProviderError::Canceled(_) => ErrorKind::Canceled,
        }
    }

    /// True when the upstream API answered 404 for the object.
    pub fn is_upstream_not_found(&self) -> bool {
        matches!(self, ProviderError::Upstream { source, .. } if source.is_not_found())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        identity = { ProviderError::IdentityNotFound { name: "a".into(), identity_type: "group".into() }, ErrorKind::NotFound },
        integration = { ProviderError::IntegrationNotFound { name: "db".into(), resource_type: "mysql-db".into() }, ErrorKind::NotFound },
        bundle_id = { ProviderError::BundleIdNotFound("b1".into()), ErrorKind::NotFound },
        filter_kind = { ProviderError::InvalidFilterKind { kind: "x".into(), allowed: "id".into() }, ErrorKind::AmbiguousConfiguration },
        secret_type = { ProviderError::UnknownSecretType("VAULT9".into()), ErrorKind::Unsupported },
        canceled = { ProviderError::Canceled("deadline".into()), ErrorKind::Canceled },
    )]
    fn test_error_kind(err: ProviderError, expected: ErrorKind) {
        assert_eq!(err.kind(), expected);
    }

    #[test]
    fn test_upstream_display_includes_id_and_body() {
        let err = ProviderError::upstream(
            "read",
            "access flow",
            Some("af-1"),
            ApiError::Status {
                status: 400,
                body: "{\"message\":\"bad grantee\"}".to_string(),
            },
        );
        let rendered = err.to_string();
        assert!(rendered.starts_with("failed to read access flow 'af-1': "));
        assert!(rendered.contains("bad grantee"));
    }

    #[test]
    fn test_upstream_display_without_id() {
        let err = ProviderError::upstream(
            "list",
            "identities",
            None,
            ApiError::Transport("connection refused".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "failed to list identities: transport error: connection refused"
        );
    }

    #[test]
    fn test_is_upstream_not_found() {
        let err = ProviderError::upstream(
            "read",
            "integration",
            Some("i-1"),
            ApiError::Status {
                status: 404,
                body: String::new(),
            },
        );
        assert!(err.is_upstream_not_found());
        assert!(!ProviderError::BundleNotFound("x".into()).is_upstream_not_found());
    }
}
