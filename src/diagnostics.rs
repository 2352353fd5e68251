//! Diagnostics returned to the plugin framework.
//!
//! Conversions keep going after the first failure so that a single plan or
//! apply reports every unresolved reference at once. Callers collect errors
//! into a [`Diagnostics`] list and turn it into a `Result` at the end.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use strum_macros::Display as StrumDisplay;

use crate::error::{ErrorKind, ProviderError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One user-facing problem, optionally attached to an attribute path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.attribute {
            Some(attr) => write!(
                f,
                "{}: {} ({attr}): {}",
                self.severity, self.summary, self.detail
            ),
            None => write!(f, "{}: {}: {}", self.severity, self.summary, self.detail),
        }
    }
}

impl From<ProviderError> for Diagnostic {
    fn from(err: ProviderError) -> Self {
        let summary = match err.kind() {
            ErrorKind::NotFound => "Referenced object not found",
            ErrorKind::AmbiguousConfiguration => "Ambiguous configuration",
            ErrorKind::InvalidConfiguration => "Invalid configuration",
            ErrorKind::Unsupported => "Unsupported value",
            ErrorKind::Upstream => "Upstream API error",
            ErrorKind::Canceled => "Operation canceled",
        };
        Diagnostic::error(summary, err.to_string())
    }
}

/// An ordered list of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    /// Record an error against an attribute path.
    pub fn add_error(&mut self, attribute: &str, err: ProviderError) {
        self.0.push(Diagnostic::from(err).with_attribute(attribute));
    }

    pub fn add_warning(&mut self, summary: impl Into<String>, detail: impl Into<String>) {
        self.0.push(Diagnostic::warning(summary, detail));
    }

    /// Keep the value on success, record the error and yield `None` otherwise.
    pub fn capture<T>(&mut self, attribute: &str, result: Result<T, ProviderError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.add_error(attribute, err);
                None
            }
        }
    }

    /// Like [`Diagnostics::capture`] for results that already carry diagnostics.
    pub fn absorb<T>(&mut self, result: Result<T, Diagnostics>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(other) => {
                self.extend(other);
                None
            }
        }
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn has_errors(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.severity == Severity::Error)
    }

    /// `Ok(value)` when no errors were recorded, otherwise every diagnostic.
    pub fn into_result<T>(self, value: T) -> Result<T, Diagnostics> {
        if self.has_errors() { Err(self) } else { Ok(value) }
    }
}

impl From<ProviderError> for Diagnostics {
    fn from(err: ProviderError) -> Self {
        Diagnostics(vec![err.into()])
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_keeps_going() {
        let mut diags = Diagnostics::new();
        let ok = diags.capture("name", Ok::<_, ProviderError>(3));
        let failed: Option<u8> =
            diags.capture("grantees", Err(ProviderError::BundleNotFound("b".into())));
        assert_eq!(ok, Some(3));
        assert_eq!(failed, None);
        assert_eq!(diags.len(), 1);
        assert!(diags.has_errors());
        assert_eq!(diags.iter().next().unwrap().attribute.as_deref(), Some("grantees"));
    }

    #[test]
    fn test_warnings_do_not_fail() {
        let mut diags = Diagnostics::new();
        diags.add_warning("Deprecated", "use something else");
        assert!(!diags.has_errors());
        assert_eq!(diags.into_result(1).unwrap(), 1);
    }

    #[test]
    fn test_into_result_returns_all_errors() {
        let mut diags = Diagnostics::new();
        diags.add_error("a", ProviderError::BundleNotFound("one".into()));
        diags.add_error("b", ProviderError::BundleNotFound("two".into()));
        let err = diags.into_result(()).unwrap_err();
        assert_eq!(err.errors().count(), 2);
    }

    #[test]
    fn test_summary_from_error_kind() {
        let d = Diagnostic::from(ProviderError::UnknownSecretType("X".into()));
        assert_eq!(d.summary, "Unsupported value");
        assert!(d.detail.contains("upgrade the provider"));
    }

    #[test]
    fn test_display() {
        let d = Diagnostic::error("Invalid configuration", "boom").with_attribute("name");
        assert_eq!(d.to_string(), "error: Invalid configuration (name): boom");
    }
}
