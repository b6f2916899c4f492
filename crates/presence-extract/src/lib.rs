//! # Presence Extract
//!
//! Presence-aware request extractors for query strings, URL-encoded forms and
//! JSON bodies.
//!
//! Every extractor distinguishes a parameter that was never sent from one
//! that was sent without a value, producing a
//! [`Presence`](presence_core::Presence) for each field.
//!
//! ## Extractors
//!
//! | Extractor | Source | Description |
//! |-----------|--------|-------------|
//! | [`QueryParams`] | Query string | Parsed flat parameters with presence lookup |
//! | [`FormParams`] | Request body | URL-encoded form with presence lookup |
//! | [`Json<T>`] | Request body | Deserialize a JSON body into `T` |
//! | [`JsonObjectBody`] | Request body | JSON object node with per-field presence |
//!
//! ## Flat parameters
//!
//! | Query | `Presence<String>` |
//! |-------|--------------------|
//! | `/person` | `Absent` |
//! | `/person?name` | `Present(None)` |
//! | `/person?name=` | `Present(None)` unless `empty_as_null` is off |
//! | `/person?name=Karl` | `Present(Some("Karl"))` |
//!
//! ## Example
//!
//! ```rust
//! use presence_core::Presence;
//! use presence_extract::{query_param, ExtractionContext};
//! use http::{HeaderMap, Method, Uri};
//! use bytes::Bytes;
//!
//! let ctx = ExtractionContext::new(
//!     Method::GET,
//!     Uri::from_static("/person?name=Karl"),
//!     HeaderMap::new(),
//!     Bytes::new(),
//! );
//!
//! let name: Presence<String> = query_param(&ctx, "name").unwrap();
//! assert_eq!(name, Presence::present("Karl".to_string()));
//! ```
//!
//! ## Error Handling
//!
//! All extractors return [`ExtractionError`] on failure. A value that cannot
//! be converted is an `INVALID_PARAMETER` client error, never an absent value:
//!
//! ```rust
//! use presence_extract::{query_param, ExtractionContextBuilder};
//! use http::{StatusCode, Uri};
//! use uuid::Uuid;
//!
//! let ctx = ExtractionContextBuilder::new()
//!     .uri(Uri::from_static("/person?id=not-a-uuid"))
//!     .build();
//!
//! let err = query_param::<Uuid>(&ctx, "id").unwrap_err();
//! assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
//! ```

#![doc(html_root_url = "https://docs.rs/presence-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
mod convert;
mod error;
mod extractor;
mod form;
mod json;
mod params;
mod query;
mod resolver;

// Re-export main types
pub use context::{ExtractionContext, ExtractionContextBuilder, DEFAULT_MAX_BODY_SIZE};
pub use convert::FromParam;
pub use error::{ErrorKind, ExtractionError, ExtractionSource};
pub use extractor::FromRequest;
pub use form::{form_param, FormParams};
pub use json::{json_field, Json, JsonObjectBody};
pub use params::ParamMap;
pub use query::{query_param, QueryParams};
pub use resolver::{MultiValuePolicy, ParamPolicy, ParamResolver};
