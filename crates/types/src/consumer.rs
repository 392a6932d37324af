//! Evaluation-mode token threaded through provider queries.

use std::{error::Error, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Controls whether a provider query may force a read that is not yet safe to perform.
///
/// A read is "unsafe" when the value it observes is produced by a build action that has not
/// completed. The token is passed unchanged to every nested `presence`/`value` call of a
/// provider tree walk so that a single walk never mixes modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueConsumer {
    /// Unsafe reads are performed; the caller accepts a value that may still change.
    IgnoreUnsafeRead,
    /// Unsafe reads are refused with a diagnosable error.
    #[default]
    DisallowUnsafeRead,
}

impl ValueConsumer {
    /// Returns `true` when forced reads of unfinished build outputs are permitted.
    pub fn permits_unsafe_read(self) -> bool {
        matches!(self, Self::IgnoreUnsafeRead)
    }

    /// Canonical kebab-case name, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IgnoreUnsafeRead => "ignore-unsafe-read",
            Self::DisallowUnsafeRead => "disallow-unsafe-read",
        }
    }
}

impl fmt::Display for ValueConsumer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueConsumer {
    type Err = ParseValueConsumerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ignore-unsafe-read" => Ok(Self::IgnoreUnsafeRead),
            "disallow-unsafe-read" => Ok(Self::DisallowUnsafeRead),
            _ => Err(ParseValueConsumerError),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseValueConsumerError;

impl fmt::Display for ParseValueConsumerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid value consumer; expected 'ignore-unsafe-read' or 'disallow-unsafe-read'")
    }
}

impl Error for ParseValueConsumerError {}
