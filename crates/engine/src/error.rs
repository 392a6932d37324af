//! Failures surfaced by provider queries.
//!
//! Absence is not represented here: a provider with no value answers with a missing
//! [`Value`](crate::Value). These errors cover callers that *require* a value, reads refused by
//! the active [`ValueConsumer`](lazyprov_types::ValueConsumer), circular evaluation, and failures
//! raised by externally supplied leaf computations.

use std::fmt;

use lazyprov_types::TaskPath;
use thiserror::Error;

use crate::value::MissingDiagnostic;

/// Error returned by provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// A caller required a value but the provider chain produced none.
    #[error(transparent)]
    Missing(#[from] MissingValueError),
    /// The value is produced by a build action that has not completed, and the consumer forbids
    /// reading it early.
    #[error("cannot read {provider} before task '{task}' has completed")]
    UnsafeRead { provider: String, task: TaskPath },
    /// Evaluating the provider re-entered its own evaluation on the current thread.
    #[error("circular evaluation detected while evaluating {provider}")]
    CircularEvaluation { provider: String },
    /// Failure raised by a leaf computation; passed through untouched.
    #[error(transparent)]
    Leaf(#[from] anyhow::Error),
}

/// A required value was missing.
///
/// The message names the queried provider and lists every provider that contributed to the
/// absence, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingValueError {
    provider: String,
    diagnostic: MissingDiagnostic,
    path_limit: Option<usize>,
}

impl MissingValueError {
    pub fn new(provider: impl Into<String>, diagnostic: MissingDiagnostic) -> Self {
        Self {
            provider: provider.into(),
            diagnostic,
            path_limit: None,
        }
    }

    /// Caps the number of contributing paths rendered in the message.
    pub fn with_path_limit(mut self, limit: usize) -> Self {
        self.path_limit = Some(limit);
        self
    }

    /// Description of the provider that was queried.
    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn diagnostic(&self) -> &MissingDiagnostic {
        &self.diagnostic
    }
}

impl fmt::Display for MissingValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot query the value of {} because it has no value available.", self.provider)?;
        let paths = self.diagnostic.paths();
        if paths.is_empty() {
            return Ok(());
        }
        f.write_str("\nThe value of this provider is derived from:")?;
        let shown = self.path_limit.unwrap_or(paths.len()).min(paths.len());
        for path in &paths[..shown] {
            write!(f, "\n  - {path}")?;
        }
        if shown < paths.len() {
            write!(f, "\n  - ... and {} more", paths.len() - shown)?;
        }
        Ok(())
    }
}

impl std::error::Error for MissingValueError {}
