//! Tracing subscriber setup shared by binaries and test harnesses embedding the engine.

use crate::settings::EvaluationSettings;

/// Filter used when neither `RUST_LOG` nor the settings name one.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Installs a global `fmt` subscriber.
///
/// The filter comes from `RUST_LOG` when set, then from [`EvaluationSettings::log_filter`], then
/// [`DEFAULT_LOG_FILTER`]. Returns `false` when a global subscriber was already installed, in
/// which case the existing one is kept.
pub fn init_tracing(settings: &EvaluationSettings) -> bool {
    let filter = resolve_log_filter(settings);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

/// Filter directive [`init_tracing`] would install.
pub fn resolve_log_filter(settings: &EvaluationSettings) -> String {
    std::env::var("RUST_LOG")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| settings.log_filter.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_takes_precedence() {
        let settings = EvaluationSettings {
            log_filter: Some("lazyprov_engine=trace".into()),
            ..EvaluationSettings::default()
        };
        temp_env::with_var("RUST_LOG", Some("warn"), || {
            assert_eq!(resolve_log_filter(&settings), "warn");
        });
        temp_env::with_var("RUST_LOG", None::<&str>, || {
            assert_eq!(resolve_log_filter(&settings), "lazyprov_engine=trace");
            assert_eq!(resolve_log_filter(&EvaluationSettings::default()), DEFAULT_LOG_FILTER);
        });
    }

    #[test]
    fn second_initialisation_keeps_existing_subscriber() {
        let settings = EvaluationSettings::default();
        let _ = init_tracing(&settings);
        assert!(!init_tracing(&settings));
    }
}
