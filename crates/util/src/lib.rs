//! Ambient support for the provider algebra: evaluation settings and tracing setup.

pub mod logging;
pub mod settings;

pub use logging::{init_tracing, resolve_log_filter};
pub use settings::{EvaluationSettings, SettingsError, default_settings_path};
