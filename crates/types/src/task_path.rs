use std::fmt;

use serde::{Deserialize, Serialize};

/// Fully qualified path of a build action, for example `:app:compileJava`.
///
/// Paths identify the producing entities recorded by value producers; two handles naming the
/// same path refer to the same build action.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskPath(String);

impl TaskPath {
    /// Builds a path, prefixing `:` when the caller passed a bare task name.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let trimmed = path.trim();
        if trimmed.starts_with(':') {
            Self(trimmed.to_string())
        } else {
            Self(format!(":{trimmed}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskPath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TaskPath {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
