//! # Presence
//!
//! **Tri-state values for HTTP APIs: absent, explicit null, or a value**
//!
//! A `Presence<T>` records whether a client sent a field at all, sent it as
//! `null`, or sent a concrete value. This crate ties together:
//!
//! - [`core`]: the `Presence<T>` type and its serde support
//! - [`json`]: per-property decoding and encoding of JSON objects
//! - [`extract`]: query-string, form and JSON body binding
//! - [`docs`]: OpenAPI schema projection for wrapped declarations
//! - [`config`] and [`telemetry`]: layered configuration and logging setup
//!
//! ## Quick Start
//!
//! ```rust
//! use presence::prelude::*;
//! use http::{HeaderMap, Method, Uri};
//! use bytes::Bytes;
//!
//! let support = PresenceSupport::from_config(PresenceConfig::default()).unwrap();
//!
//! let ctx = support.context(
//!     Method::GET,
//!     Uri::from_static("/person?name=Karl&nickname"),
//!     HeaderMap::new(),
//!     Bytes::new(),
//! );
//!
//! let query = QueryParams::from_request(&ctx).unwrap();
//! let name: Presence<String> = query.get("name").unwrap();
//! let nickname: Presence<String> = query.get("nickname").unwrap();
//! let email: Presence<String> = query.get("email").unwrap();
//!
//! assert_eq!(name, Presence::present("Karl".to_string()));
//! assert!(nickname.is_null());
//! assert!(email.is_absent());
//! ```

#![doc(html_root_url = "https://docs.rs/presence/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod support;

pub use support::{JsonSupport, PresenceSupport, PresenceSupportBuilder};

// Re-export member crates
pub use presence_config as config;
pub use presence_core as core;
pub use presence_docs as docs;
pub use presence_extract as extract;
pub use presence_json as json;
pub use presence_telemetry as telemetry;

pub use presence_config::{ConfigLoader, PresenceConfig};
pub use presence_core::{Presence, PresenceError};

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use presence::prelude::*;
///
/// let value: Presence<u32> = Presence::null();
/// assert!(value.is_present());
/// ```
pub mod prelude {
    pub use presence_core::{is_absent, Envelope, Presence, PresenceError, PresenceResult};

    pub use presence_json::{decode_field, encode_field, JsonObject, ObjectWriter};

    pub use presence_extract::{
        form_param, json_field, query_param, ExtractionContext, ExtractionError, FormParams,
        FromParam, FromRequest, Json, JsonObjectBody, ParamPolicy, QueryParams,
    };

    pub use presence_docs::{DescribeType, ParameterIn, Schema, SchemaProjector};

    pub use presence_config::{ConfigLoader, PresenceConfig};

    pub use crate::support::PresenceSupport;
}
