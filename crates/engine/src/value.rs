//! The result of forcing a provider: a present payload or a missing diagnostic.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MissingValueError;

/// Explanation of why no value could be produced.
///
/// Each path names one provider that was asked for a value and had none. Combining two missing
/// results concatenates their paths so a report can list every contributing provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingDiagnostic {
    paths: Vec<String>,
}

impl MissingDiagnostic {
    /// Diagnostic rooted at a single provider.
    pub fn from_origin(origin: impl Into<String>) -> Self {
        Self {
            paths: vec![origin.into()],
        }
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Appends `other`'s paths after this diagnostic's own.
    pub fn merge(mut self, other: MissingDiagnostic) -> Self {
        self.paths.extend(other.paths);
        self
    }
}

impl fmt::Display for MissingDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.paths.join(", "))
    }
}

/// Materialized result of a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<T> {
    Present(T),
    Missing(MissingDiagnostic),
}

impl<T> Value<T> {
    pub fn present(value: T) -> Self {
        Self::Present(value)
    }

    pub fn missing(diagnostic: MissingDiagnostic) -> Self {
        Self::Missing(diagnostic)
    }

    /// Missing value whose diagnostic names `origin` as the provider that had nothing.
    pub fn missing_from(origin: impl Into<String>) -> Self {
        Self::Missing(MissingDiagnostic::from_origin(origin))
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Missing(_) => None,
        }
    }

    /// Transforms a present payload; a missing value keeps its diagnostic.
    pub fn map<U>(self, transform: impl FnOnce(T) -> U) -> Value<U> {
        match self {
            Self::Present(value) => Value::Present(transform(value)),
            Self::Missing(diagnostic) => Value::Missing(diagnostic),
        }
    }

    /// Diagnostic of a missing value. Present values never carry one.
    pub fn diagnostic(&self) -> Option<&MissingDiagnostic> {
        match self {
            Self::Present(_) => None,
            Self::Missing(diagnostic) => Some(diagnostic),
        }
    }

    /// Merges the paths of another missing result into this one.
    ///
    /// Only a missing receiver changes, and only when `other` is missing too; the receiver's
    /// paths come first.
    pub fn add_paths_from<U>(self, other: Value<U>) -> Self {
        match (self, other) {
            (Self::Missing(own), Value::Missing(theirs)) => Self::Missing(own.merge(theirs)),
            (this, _) => this,
        }
    }

    /// Converts into a `Result`, describing the queried provider lazily on failure.
    pub fn into_result(self, describe: impl FnOnce() -> String) -> Result<T, MissingValueError> {
        match self {
            Self::Present(value) => Ok(value),
            Self::Missing(diagnostic) => Err(MissingValueError::new(describe(), diagnostic)),
        }
    }
}
