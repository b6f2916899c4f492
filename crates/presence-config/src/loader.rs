//! Layered loading: a starting preset, then a file or string, then
//! environment overrides, then validation.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::{ConfigError, PresenceConfig};

/// Source document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

impl Format {
    fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(name.to_string())),
        }
    }

    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        Self::from_name(extension)
    }

    fn parse(self, content: &str) -> Result<PresenceConfig, ConfigError> {
        Ok(match self {
            Self::Toml => toml::from_str(content)?,
            Self::Json => serde_json::from_str(content)?,
        })
    }
}

/// Builds a [`PresenceConfig`] from layered sources.
///
/// A file or string replaces the starting preset as a whole; keys it leaves
/// out take their defaults. Environment overrides of the form
/// `PREFIX__SECTION__KEY` are applied last, one value at a time.
///
/// # Example
///
/// ```
/// use presence_config::ConfigLoader;
///
/// let config = ConfigLoader::new()
///     .with_string("[params]\nblank_as_null = true", "toml")
///     .unwrap()
///     .load()
///     .unwrap();
///
/// assert!(config.params.blank_as_null);
/// ```
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config: PresenceConfig,
    env_prefix: Option<String>,
}

impl ConfigLoader {
    /// Starts from the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets to the defaults.
    #[must_use]
    pub fn with_defaults(self) -> Self {
        self.with_preset(PresenceConfig::default())
    }

    /// Resets to [`PresenceConfig::development`].
    #[must_use]
    pub fn with_development(self) -> Self {
        self.with_preset(PresenceConfig::development())
    }

    /// Resets to [`PresenceConfig::production`].
    #[must_use]
    pub fn with_production(self) -> Self {
        self.with_preset(PresenceConfig::production())
    }

    fn with_preset(mut self, config: PresenceConfig) -> Self {
        self.config = config;
        self
    }

    /// Reads a `.toml` or `.json` file.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing, unreadable, has another extension, is
    /// malformed or contains unknown keys.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;

        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::file_not_found(path),
            _ => ConfigError::read_error(path, e),
        })?;

        self.config = format.parse(&content)?;
        Ok(self)
    }

    /// Like [`with_file`](Self::with_file), but a missing file is skipped.
    ///
    /// # Errors
    ///
    /// Fails if the file exists and cannot be loaded.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Parses `content` as `format` (`"toml"` or `"json"`).
    ///
    /// # Errors
    ///
    /// Fails on an unknown format, malformed content or unknown keys.
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = Format::from_name(format)?.parse(content)?;
        Ok(self)
    }

    /// Applies `PREFIX__SECTION__KEY` variables when loading.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Loads `.env` into the process environment if the file exists.
    #[must_use]
    pub fn with_dotenv(self) -> Self {
        // absent .env is fine
        dotenvy::dotenv().ok();
        self
    }

    /// Applies environment overrides and validates.
    ///
    /// # Errors
    ///
    /// Fails if an override cannot be applied or validation fails.
    pub fn load(mut self) -> Result<PresenceConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_overrides(env::vars_os(), &prefix)?;
        }

        self.config.validate()?;
        Ok(self.config)
    }

    /// Returns the configuration as layered so far, skipping overrides and
    /// validation.
    #[must_use]
    pub fn load_unvalidated(self) -> PresenceConfig {
        self.config
    }

    /// Applies the variables under `prefix`. Names that are not UTF-8 are
    /// skipped; a non-UTF-8 value under the prefix is an error.
    fn apply_overrides<I>(&mut self, vars: I, prefix: &str) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let prefix = format!("{prefix}__");
        for (var, raw) in vars {
            let Some(var) = var.to_str() else {
                continue;
            };
            let Some(path) = var.strip_prefix(&prefix) else {
                continue;
            };
            let raw = raw
                .to_str()
                .ok_or_else(|| ConfigError::env_parse_error(var, "value is not valid UTF-8"))?;

            self.apply_override(var, path, raw)?;
        }
        Ok(())
    }

    /// Sets `SECTION__KEY` to `raw`, coerced to the type of the current
    /// value. Paths naming no known value are ignored.
    fn apply_override(&mut self, var: &str, path: &str, raw: &str) -> Result<(), ConfigError> {
        let Some((section, key)) = path.split_once("__") else {
            return Ok(());
        };

        let mut tree = serde_json::to_value(&self.config)?;
        let Some(slot) = tree
            .get_mut(section.to_ascii_lowercase())
            .and_then(|s| s.get_mut(key.to_ascii_lowercase()))
        else {
            return Ok(());
        };

        let value = coerce(slot, raw)
            .ok_or_else(|| ConfigError::env_parse_error(var, format!("expected {}", kind(slot))))?;
        *slot = value;

        self.config = serde_json::from_value(tree)
            .map_err(|e| ConfigError::env_parse_error(var, e.to_string()))?;
        Ok(())
    }
}

fn coerce(current: &Value, raw: &str) -> Option<Value> {
    match current {
        Value::Bool(_) => parse_bool(raw).map(Value::Bool),
        Value::Number(_) => raw.trim().parse::<u64>().ok().map(Value::from),
        _ => Some(Value::String(raw.to_string())),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a non-negative integer",
        _ => "a string",
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogFormat;
    use presence_extract::MultiValuePolicy;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(OsString, OsString)> {
        pairs
            .iter()
            .map(|(k, v)| (OsString::from(*k), OsString::from(*v)))
            .collect()
    }

    #[test]
    fn test_presets() {
        assert_eq!(ConfigLoader::new().load().unwrap(), PresenceConfig::default());

        let dev = ConfigLoader::new().with_development().load().unwrap();
        assert_eq!(dev.logging.format, LogFormat::Pretty);

        let prod = ConfigLoader::new().with_production().load().unwrap();
        assert_eq!(prod.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_json_string() {
        let config = ConfigLoader::new()
            .with_string(r#"{"json": {"max_body_size": 2048}}"#, "JSON")
            .unwrap()
            .load()
            .unwrap();

        assert_eq!(config.json.max_body_size, 2048);
    }

    #[test]
    fn test_unknown_format() {
        let err = ConfigLoader::new().with_string("", "yaml").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(f) if f == "yaml"));
    }

    #[test]
    fn test_validation_runs_on_load() {
        let loader = ConfigLoader::new()
            .with_string("[json]\nmax_body_size = 0", "toml")
            .unwrap();

        assert!(loader.load().is_err());
    }

    #[test]
    fn test_missing_files() {
        let err = ConfigLoader::new().with_file("/nonexistent/presence.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));

        let config = ConfigLoader::new()
            .with_development()
            .with_optional_file("/nonexistent/presence.toml")
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_overrides_follow_value_types() {
        let mut loader = ConfigLoader::new();
        loader
            .apply_overrides(
                vars(&[
                    ("APP__PARAMS__BLANK_AS_NULL", "yes"),
                    ("APP__PARAMS__MULTI_VALUE", "reject"),
                    ("APP__JSON__MAX_BODY_SIZE", "512"),
                    ("APP__LOGGING__FORMAT", "pretty"),
                    ("APP__LOGGING__LEVEL", "presence_extract=trace"),
                    ("APP__UNRELATED", "x"),
                    ("APP__PARAMS__NOT_A_KEY", "x"),
                    ("OTHER__JSON__MAX_BODY_SIZE", "1"),
                ]),
                "APP",
            )
            .unwrap();

        let config = loader.load_unvalidated();
        assert!(config.params.blank_as_null);
        assert_eq!(config.params.multi_value, MultiValuePolicy::Reject);
        assert_eq!(config.json.max_body_size, 512);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.logging.level, "presence_extract=trace");
    }

    #[test]
    fn test_override_wrong_type() {
        let mut loader = ConfigLoader::new();
        let err = loader
            .apply_overrides(vars(&[("APP__PARAMS__EMPTY_AS_NULL", "maybe")]), "APP")
            .unwrap_err();

        assert!(err.to_string().contains("expected a boolean"));
    }

    #[test]
    fn test_override_bad_enum_value() {
        let mut loader = ConfigLoader::new();
        let result = loader.apply_overrides(vars(&[("APP__PARAMS__MULTI_VALUE", "join")]), "APP");

        assert!(matches!(result, Err(ConfigError::EnvParseError { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_environment() {
        use std::os::unix::ffi::OsStringExt;

        let garbage = || OsString::from_vec(vec![0xff, 0xfe]);

        let mut loader = ConfigLoader::new();
        loader
            .apply_overrides(
                vec![
                    (garbage(), OsString::from("x")),
                    (OsString::from("UNRELATED"), garbage()),
                    (OsString::from("APP__JSON__MAX_BODY_SIZE"), OsString::from("64")),
                ],
                "APP",
            )
            .unwrap();
        assert_eq!(loader.load_unvalidated().json.max_body_size, 64);

        let err = ConfigLoader::new()
            .apply_overrides(vec![(OsString::from("APP__LOGGING__LEVEL"), garbage())], "APP")
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EnvParseError { ref var, .. } if var == "APP__LOGGING__LEVEL"
        ));
        assert!(err.to_string().contains("not valid UTF-8"));
    }
}
