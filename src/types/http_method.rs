use strum_macros::{AsRefStr, Display, EnumString};

use crate::error::ProviderError;

/// HTTP methods a manual webhook may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn parse(value: &str) -> Result<Self, ProviderError> {
        value.parse().map_err(|_| {
            ProviderError::invalid_value(
                "type.http_request.method",
                format!("'{value}' is not one of GET, POST, PUT, PATCH, DELETE"),
            )
        })
    }
}
