//! # Presence Core
//!
//! Core types for telling "not supplied" apart from "supplied as null".
//!
//! This crate provides the foundational types used throughout the workspace:
//!
//! - [`Presence`] - Tri-state value: absent, present with null, present with a value
//! - [`PresenceError`] - Errors raised when reading or converting presence values
//! - [`Lookup`] / [`PresenceSource`] - The three-way membership question every input medium answers
//! - [`Envelope`] / [`MaybeAbsent`] - Single-value containers that wrap a [`Presence`]
//!
//! ## Example
//!
//! ```rust
//! use presence_core::Presence;
//!
//! let missing: Presence<u32> = Presence::absent();
//! let cleared: Presence<u32> = Presence::null();
//! let set = Presence::present(7);
//!
//! // Defaults only apply to missing values, never to an explicit null
//! assert_eq!(missing.unwrap_or(Some(1)), Some(1));
//! assert_eq!(cleared.unwrap_or(Some(1)), None);
//! assert_eq!(set.unwrap_or(Some(1)), Some(7));
//! ```
//!
//! ## Serde
//!
//! `Presence<T>` implements `Serialize` and `Deserialize`. Struct fields must be
//! declared with `#[serde(default, skip_serializing_if = "Presence::is_absent")]`
//! so that a missing key decodes to [`Presence::Absent`] and an absent value is
//! never written out. A field without `default` rejects a missing key with
//! serde's `missing field` error:
//!
//! ```rust
//! use presence_core::Presence;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct PatchUser {
//!     #[serde(default, skip_serializing_if = "Presence::is_absent")]
//!     nickname: Presence<String>,
//! }
//!
//! let patch: PatchUser = serde_json::from_str(r#"{"nickname": null}"#).unwrap();
//! assert!(patch.nickname.is_null());
//!
//! let patch: PatchUser = serde_json::from_str("{}").unwrap();
//! assert!(patch.nickname.is_absent());
//! assert_eq!(serde_json::to_string(&patch).unwrap(), "{}");
//! ```

#![doc(html_root_url = "https://docs.rs/presence-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod envelope;
mod error;
mod presence;
mod serde_impl;
mod source;

pub use envelope::{is_absent, Envelope, MaybeAbsent};
pub use error::{PresenceError, PresenceResult};
pub use presence::Presence;
pub use source::{Lookup, PresenceSource};
