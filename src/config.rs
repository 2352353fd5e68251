//! Provider configuration.
//!
//! Explicit values in the provider block win over the environment:
//! `APONO_ENDPOINT`, `APONO_PERSONAL_TOKEN`, `APONO_TIMEOUT_SECONDS`.

use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;
use url::Url;

use crate::diagnostics::Diagnostics;
use crate::error::ProviderError;
use crate::types::Value;

pub const DEFAULT_ENDPOINT: &str = "https://api.apono.io";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

pub const ENDPOINT_ENV: &str = "APONO_ENDPOINT";
pub const PERSONAL_TOKEN_ENV: &str = "APONO_PERSONAL_TOKEN";
pub const TIMEOUT_ENV: &str = "APONO_TIMEOUT_SECONDS";

/// The `provider "apono" {}` block as Terraform hands it over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderBlock {
    pub endpoint: Value<String>,
    pub personal_token: Value<String>,
    pub timeout_seconds: Value<Decimal>,
}

#[derive(Debug)]
pub struct ProviderConfig {
    endpoint: Url,
    personal_token: SecretString,
    timeout: Duration,
}

impl ProviderConfig {
    pub fn new(endpoint: &str, personal_token: impl Into<String>) -> Result<Self, ProviderError> {
        Ok(ProviderConfig {
            endpoint: parse_endpoint(endpoint)?,
            personal_token: SecretString::from(personal_token.into()),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve the provider block against the process environment.
    pub fn from_block(block: &ProviderBlock) -> Result<Self, Diagnostics> {
        Self::resolve(block, |key| std::env::var(key).ok())
    }

    /// Resolve the provider block, falling back to `env` for unset values.
    pub fn resolve<F>(block: &ProviderBlock, env: F) -> Result<Self, Diagnostics>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut diags = Diagnostics::new();

        let endpoint = diags
            .capture(
                "endpoint",
                setting(&block.endpoint, "endpoint", || env(ENDPOINT_ENV)),
            )
            .flatten()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = diags.capture("endpoint", parse_endpoint(&endpoint));

        let token = diags.capture(
            "personal_token",
            setting(&block.personal_token, "personal_token", || {
                env(PERSONAL_TOKEN_ENV)
            }),
        );
        let token = match token {
            Some(Some(token)) if !token.is_empty() => Some(token),
            Some(_) => {
                diags.add_error(
                    "personal_token",
                    ProviderError::invalid_value(
                        "personal_token",
                        format!("set it in the provider block or via {PERSONAL_TOKEN_ENV}"),
                    ),
                );
                None
            }
            None => None,
        };

        let timeout = diags
            .capture("timeout_seconds", timeout_setting(block, &env))
            .unwrap_or(DEFAULT_TIMEOUT);

        match (endpoint, token) {
            (Some(endpoint), Some(token)) if !diags.has_errors() => {
                debug!(event = "Configure", phase = "Resolved", endpoint = %endpoint, timeout_secs = timeout.as_secs());
                Ok(ProviderConfig {
                    endpoint,
                    personal_token: SecretString::from(token),
                    timeout,
                })
            }
            _ => Err(diags),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn personal_token(&self) -> &str {
        self.personal_token.expose_secret()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Known block values win, null falls back to `fallback`, unknown is an error.
fn setting<F>(value: &Value<String>, attribute: &str, fallback: F) -> Result<Option<String>, ProviderError>
where
    F: FnOnce() -> Option<String>,
{
    match value {
        Value::Known(v) => Ok(Some(v.clone())),
        Value::Null => Ok(fallback()),
        Value::Unknown => Err(ProviderError::MissingAttribute(attribute.to_string())),
    }
}

fn timeout_setting<F>(block: &ProviderBlock, env: &F) -> Result<Duration, ProviderError>
where
    F: Fn(&str) -> Option<String>,
{
    let seconds = match &block.timeout_seconds {
        Value::Known(v) => v.trunc().to_u64(),
        Value::Unknown => {
            return Err(ProviderError::MissingAttribute("timeout_seconds".to_string()));
        }
        Value::Null => match env(TIMEOUT_ENV) {
            Some(raw) => raw.trim().parse::<u64>().ok(),
            None => return Ok(DEFAULT_TIMEOUT),
        },
    };

    match seconds {
        Some(s) if s > 0 => Ok(Duration::from_secs(s)),
        _ => Err(ProviderError::invalid_value(
            "timeout_seconds",
            "must be a positive number of seconds",
        )),
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, ProviderError> {
    let url = Url::parse(raw)
        .map_err(|e| ProviderError::invalid_value("endpoint", format!("'{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ProviderError::invalid_value(
            "endpoint",
            format!("unsupported scheme '{other}'"),
        )),
    }
}
