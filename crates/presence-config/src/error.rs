//! Configuration failures.

use std::path::PathBuf;

use thiserror::Error;

/// A configuration could not be loaded or is invalid.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The named file does not exist.
    #[error("config file {} does not exist", path.display())]
    FileNotFound {
        /// Requested path.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("cannot read config file {}", path.display())]
    ReadError {
        /// Requested path.
        path: PathBuf,
        /// I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Neither TOML nor JSON.
    #[error("unsupported config format '{0}', expected toml or json")]
    UnsupportedFormat(String),

    /// Malformed TOML, or a TOML document with unknown keys.
    #[error("invalid TOML config: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Malformed JSON, or a JSON document with unknown keys.
    #[error("invalid JSON config: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A loaded value breaks a constraint.
    #[error("{field}: {reason}")]
    InvalidValue {
        /// Dotted path of the value, e.g. `json.max_body_size`.
        field: String,
        /// Constraint that was broken.
        reason: String,
    },

    /// An environment override could not be applied.
    #[error("environment override {var}: {reason}")]
    EnvParseError {
        /// Variable name.
        var: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl ConfigError {
    /// [`ConfigError::FileNotFound`] for `path`.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// [`ConfigError::ReadError`] for `path`.
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    /// [`ConfigError::InvalidValue`] for `field`.
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// [`ConfigError::EnvParseError`] for `var`.
    pub fn env_parse_error(var: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::EnvParseError {
            var: var.into(),
            reason: reason.into(),
        }
    }
}
