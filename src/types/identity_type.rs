//! Identity kinds accepted for grantees and approvers.

use itertools::Itertools;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::ProviderError;

/// The identity kinds this provider knows how to resolve.
///
/// Terraform configuration uses the lowercase form (`group`), the wire uses
/// the uppercase form (`GROUP`). Parsing accepts either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum IdentityType {
    /// A single user, referenced by email.
    User,
    Group,
    ContextAttribute,
}

impl IdentityType {
    /// Parse a configured or wire type, rejecting kinds newer than this crate.
    pub fn parse(value: &str) -> Result<Self, ProviderError> {
        value
            .parse()
            .map_err(|_| ProviderError::UnsupportedIdentityType(value.to_string()))
    }

    /// Uppercase form used in API payloads.
    pub fn wire_name(&self) -> String {
        self.as_ref().to_ascii_uppercase()
    }

    /// Lowercase form used in Terraform state.
    pub fn terraform_name(&self) -> &'static str {
        match self {
            IdentityType::User => "user",
            IdentityType::Group => "group",
            IdentityType::ContextAttribute => "context_attribute",
        }
    }

    /// Comma separated list of Terraform names, for error messages.
    pub fn allowed() -> String {
        IdentityType::iter().map(|t| t.terraform_name()).join(", ")
    }
}
