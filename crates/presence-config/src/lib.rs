//! Typed configuration for presence-aware binding.
//!
//! This crate provides the [`PresenceConfig`] struct and a layered
//! [`ConfigLoader`]:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Example
//!
//! ```no_run
//! use presence_config::ConfigLoader;
//!
//! # fn main() -> Result<(), presence_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_file("presence.toml")?
//!     .with_env_prefix("PRESENCE")
//!     .load()?;
//!
//! println!("empty query values are null: {}", config.params.empty_as_null);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [params]
//! empty_as_null = true
//! blank_as_null = false
//! multi_value = "first"
//!
//! [json]
//! max_body_size = 1048576
//!
//! [logging]
//! enabled = true
//! level = "info"
//! format = "json"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Values can be overridden with `PREFIX__SECTION__KEY`, for example:
//!
//! - `PRESENCE__PARAMS__BLANK_AS_NULL=true`
//! - `PRESENCE__JSON__MAX_BODY_SIZE=65536`
//! - `PRESENCE__LOGGING__LEVEL=debug`

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;

pub use config::{JsonConfig, LogFormat, LoggingConfig, PresenceConfig};
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use presence_extract::{MultiValuePolicy, ParamPolicy};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PresenceConfig::default();
        assert!(config.params.empty_as_null);
        assert!(!config.params.blank_as_null);
        assert_eq!(config.json.max_body_size, 1024 * 1024);
    }
}
