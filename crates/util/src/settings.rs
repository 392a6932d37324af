//! Evaluation settings for provider queries.
//!
//! Settings are injected into the evaluator rather than read ambiently. They are loaded from a
//! small YAML (or JSON) document in the standard configuration directory
//! (`~/.config/lazyprov/settings.yaml` on most platforms), with environment overrides applied on
//! top. A missing file is not an error: every field has a default.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dirs_next::{config_dir, home_dir};
use lazyprov_types::ValueConsumer;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable allowing callers to override the settings file path.
pub const SETTINGS_PATH_ENV: &str = "LAZYPROV_SETTINGS_PATH";

/// Environment variable overriding [`EvaluationSettings::consumer`].
pub const CONSUMER_ENV: &str = "LAZYPROV_CONSUMER";

/// Default filename looked up in the configuration directory.
pub const SETTINGS_FILE_NAME: &str = "settings.yaml";

/// Default cap on the number of missing-value paths listed in a single error message.
pub const DEFAULT_MAX_REPORTED_PATHS: usize = 20;

/// Error surfaced when reading or parsing settings fails.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O failure (for example, permissions or an unreadable directory).
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The YAML document did not match the settings schema.
    #[error("settings YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The JSON document did not match the settings schema.
    #[error("settings JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Knobs controlling how providers are queried and how failures are reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationSettings {
    /// Evaluation mode passed to every presence/value query issued through the evaluator.
    pub consumer: ValueConsumer,
    /// Maximum number of contributing paths listed in a missing-value error.
    pub max_reported_paths: usize,
    /// Tracing filter directive used when `RUST_LOG` is not set.
    pub log_filter: Option<String>,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            consumer: ValueConsumer::default(),
            max_reported_paths: DEFAULT_MAX_REPORTED_PATHS,
            log_filter: None,
        }
    }
}

impl EvaluationSettings {
    /// Loads settings from the default location and applies environment overrides.
    ///
    /// A missing file yields defaults. A file that cannot be parsed is logged and ignored so a
    /// stale configuration never blocks evaluation; other I/O failures are returned.
    pub fn load() -> Result<Self, SettingsError> {
        let path = default_settings_path();
        let settings = match Self::from_file(&path) {
            Ok(settings) => settings,
            Err(SettingsError::Io(error)) if error.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file; using defaults");
                Self::default()
            }
            Err(SettingsError::Io(error)) => return Err(SettingsError::Io(error)),
            Err(error) => {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to parse settings file; using defaults"
                );
                Self::default()
            }
        };
        Ok(settings.with_env_overrides())
    }

    /// Parses the file at `path` strictly. Files ending in `.json` are read as JSON, anything
    /// else as YAML. Environment overrides are not applied.
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let data = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        if is_json {
            Ok(serde_json::from_str(&data)?)
        } else {
            Self::from_yaml_str(&data)
        }
    }

    /// Parses settings from a YAML document. An empty document yields defaults.
    pub fn from_yaml_str(document: &str) -> Result<Self, SettingsError> {
        if document.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(document)?)
    }

    /// Applies `LAZYPROV_CONSUMER` on top of the loaded values. Unrecognised values are logged
    /// and leave the current mode untouched.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(raw) = env::var(CONSUMER_ENV) {
            match raw.parse::<ValueConsumer>() {
                Ok(consumer) => self.consumer = consumer,
                Err(error) => warn!(value = %raw, error = %error, "ignoring invalid {}", CONSUMER_ENV),
            }
        }
        self
    }
}

/// Path consulted by [`EvaluationSettings::load`].
pub fn default_settings_path() -> PathBuf {
    if let Ok(path) = env::var(SETTINGS_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_home(trimmed);
        }
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lazyprov")
        .join(SETTINGS_FILE_NAME)
}

fn expand_home(path: &str) -> PathBuf {
    let home = || home_dir().unwrap_or_else(|| PathBuf::from("~"));
    if path == "~" {
        return home();
    }
    match path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        Some(rest) => home().join(rest),
        None => PathBuf::from(path),
    }
}
