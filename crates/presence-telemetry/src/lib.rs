//! Logging setup for the presence crates.
//!
//! The codec, resolver and projector emit `tracing` events at their decision
//! points with `medium`, `field`, `state` and `target_type` fields.
//! Applications install a subscriber once at start-up with [`init_logging`].
//!
//! # Example
//!
//! ```rust,no_run
//! use presence_telemetry::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development())?;
//! tracing::info!("ready");
//! # Ok::<(), presence_telemetry::TelemetryError>(())
//! ```

#![doc(html_root_url = "https://docs.rs/presence-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
