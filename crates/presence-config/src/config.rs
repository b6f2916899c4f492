//! Configuration types.

use presence_extract::{ParamPolicy, DEFAULT_MAX_BODY_SIZE};
use presence_telemetry::LogConfig;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Complete presence binding configuration.
///
/// # Example
///
/// ```
/// use presence_config::PresenceConfig;
///
/// let config = PresenceConfig::default();
/// assert!(config.params.empty_as_null);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct PresenceConfig {
    /// Flat-parameter (query string and form) resolution policy.
    #[serde(default)]
    pub params: ParamPolicy,

    /// JSON body settings.
    #[serde(default)]
    pub json: JsonConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PresenceConfig {
    /// Development preset: pretty debug logging.
    #[must_use]
    pub fn development() -> Self {
        Self {
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
                include_location: true,
                ..LoggingConfig::default()
            },
            ..Self::default()
        }
    }

    /// Production preset: JSON logging at info level.
    #[must_use]
    pub fn production() -> Self {
        Self::default()
    }

    /// Checks constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - `json.max_body_size` is zero
    /// - `logging.level` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.json.max_body_size == 0 {
            return Err(ConfigError::invalid_value(
                "json.max_body_size",
                "must be greater than zero",
            ));
        }

        if self.logging.enabled && self.logging.level.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "logging.level",
                "must not be empty when logging is enabled",
            ));
        }

        Ok(())
    }
}

/// JSON body settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct JsonConfig {
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            max_body_size: default_max_body_size(),
        }
    }
}

const fn default_max_body_size() -> usize {
    DEFAULT_MAX_BODY_SIZE
}

/// Output format of the `[logging]` section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Multi-line human-readable output.
    Pretty,
}

/// `[logging]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Install a subscriber at start-up.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level or env-filter directive.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Record source file and line.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Converts this section into the subscriber settings used by
    /// [`presence_telemetry::init_logging`].
    #[must_use]
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            json_format: self.format == LogFormat::Json,
            file_line_info: self.include_location,
            include_target: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use presence_extract::MultiValuePolicy;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(config.enabled);
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_log_format_deserialize() {
        let format: LogFormat = serde_json::from_str(r#""pretty""#).unwrap();
        assert_eq!(format, LogFormat::Pretty);
    }

    #[test]
    fn test_to_log_config() {
        let log = PresenceConfig::development().logging.to_log_config();
        assert!(!log.json_format);
        assert!(log.file_line_info);
        assert_eq!(log.level, "debug");
    }

    #[test]
    fn test_body_limit_matches_extractor_default() {
        assert_eq!(JsonConfig::default().max_body_size, DEFAULT_MAX_BODY_SIZE);

        let config: PresenceConfig = serde_json::from_str(r#"{"json": {}}"#).unwrap();
        assert_eq!(config.json.max_body_size, DEFAULT_MAX_BODY_SIZE);
    }

    #[test]
    fn test_validate_rejects_zero_body_size() {
        let config = PresenceConfig {
            json: JsonConfig { max_body_size: 0 },
            ..PresenceConfig::default()
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("json.max_body_size"));
    }

    #[test]
    fn test_validate_rejects_empty_level() {
        let mut config = PresenceConfig::default();
        config.logging.level = "  ".to_string();
        assert!(config.validate().is_err());

        config.logging.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = serde_json::from_str::<PresenceConfig>(r#"{"params": {"bogus": true}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_params_section_deserialize() {
        let config: PresenceConfig = serde_json::from_str(
            r#"{"params": {"blank_as_null": true, "multi_value": "reject"}}"#,
        )
        .unwrap();

        assert!(config.params.empty_as_null);
        assert!(config.params.blank_as_null);
        assert_eq!(config.params.multi_value, MultiValuePolicy::Reject);
    }
}
