//! Global subscriber installation.
//!
//! Presence crates only emit `tracing` events; nothing is printed until an
//! application calls [`init_logging`] once at start-up. A filter such as
//! `presence_extract=debug` shows every parameter decision with its field,
//! medium and resulting state.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::error::TelemetryError;
use crate::TelemetryResult;

/// Subscriber settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Install a subscriber at all.
    pub enabled: bool,
    /// Env-filter directive, e.g. `info` or `info,presence_extract=debug`.
    pub level: String,
    /// One JSON object per event instead of multi-line pretty output.
    pub json_format: bool,
    /// Record source file and line.
    pub file_line_info: bool,
    /// Record the event's module path.
    pub include_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            json_format: true,
            file_line_info: false,
            include_target: true,
        }
    }
}

impl LogConfig {
    /// Pretty output at `debug` with source locations.
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            json_format: false,
            file_line_info: true,
            ..Self::default()
        }
    }

    /// JSON output at `info`.
    #[must_use]
    pub fn production() -> Self {
        Self::default()
    }
}

/// Installs the global subscriber described by `config`.
///
/// Does nothing when `config.enabled` is `false`.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidConfig`] for a bad filter directive and
/// [`TelemetryError::LoggingInit`] if a global subscriber is already set.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = create_env_filter(&config.level)?;

    let base = fmt::layer()
        .with_file(config.file_line_info)
        .with_line_number(config.file_line_info)
        .with_target(config.include_target);
    let output = if config.json_format {
        base.json().boxed()
    } else {
        base.pretty().boxed()
    };

    tracing_subscriber::registry()
        .with(output.with_filter(filter))
        .try_init()
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}

/// Parses an env-filter directive such as `info,presence_json=trace`.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidConfig`] if the directive is malformed.
pub fn create_env_filter(directive: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| TelemetryError::InvalidConfig(format!("invalid filter '{directive}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let prod = LogConfig::production();
        assert!(prod.json_format);
        assert_eq!(prod.level, "info");
        assert_eq!(prod, LogConfig::default());

        let dev = LogConfig::development();
        assert!(!dev.json_format);
        assert!(dev.file_line_info);
        assert!(dev.include_target);
    }

    #[test]
    fn test_filter_directives() {
        assert!(create_env_filter("warn,presence_json=trace").is_ok());

        let err = create_env_filter("presence_json=loud").unwrap_err();
        assert!(err.to_string().contains("presence_json=loud"));
    }

    #[test]
    fn test_disabled_installs_nothing() {
        let config = LogConfig {
            enabled: false,
            level: "not a directive ===".to_string(),
            ..LogConfig::default()
        };

        assert!(init_logging(&config).is_ok());
    }

    #[test]
    fn test_bad_level_rejected_before_install() {
        let config = LogConfig {
            level: "presence_json=loud".to_string(),
            ..LogConfig::default()
        };

        assert!(matches!(init_logging(&config), Err(TelemetryError::InvalidConfig(_))));
    }
}
