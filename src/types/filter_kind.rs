//! Resource filter kinds and their reserved tag encodings.

use itertools::Itertools;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::ProviderError;

/// Tag name that stands in for a filter on the resource ID.
pub const ID_TAG: &str = "__id";

/// Tag name that stands in for a filter on the resource name.
pub const NAME_TAG: &str = "__name";

/// How an integration target filter selects resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum FilterKind {
    /// Match by resource ID (`__id` on the wire)
    Id,
    /// Match by resource name (`__name` on the wire)
    Name,
    /// Match by an arbitrary resource tag
    Tag,
}

impl FilterKind {
    /// Parse a configured kind, in any case.
    pub fn parse(value: &str) -> Result<Self, ProviderError> {
        value.parse().map_err(|_| ProviderError::InvalidFilterKind {
            kind: value.to_string(),
            allowed: Self::allowed(),
        })
    }

    /// Comma separated list of kinds, for error messages.
    pub fn allowed() -> String {
        FilterKind::iter().join(", ")
    }

    /// The reserved tag name for `Id` and `Name`; `Tag` filters use their key.
    pub fn reserved_tag(&self) -> Option<&'static str> {
        match self {
            Self::Id => Some(ID_TAG),
            Self::Name => Some(NAME_TAG),
            Self::Tag => None,
        }
    }

    /// Decode the filter kind hidden in a wire tag name.
    pub fn from_tag_name(name: &str) -> Self {
        match name {
            ID_TAG => Self::Id,
            NAME_TAG => Self::Name,
            _ => Self::Tag,
        }
    }

    /// True for tag names that cannot be used as literal tag keys.
    pub fn is_reserved_tag(name: &str) -> bool {
        name == ID_TAG || name == NAME_TAG
    }
}
