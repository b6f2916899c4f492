//! # Presence JSON
//!
//! JSON object-tree codec for [`Presence`](presence_core::Presence) values.
//!
//! Presence is decided per property of the enclosing object, before any
//! default-value handling:
//!
//! | JSON input | Decoded |
//! |------------|---------|
//! | key missing | `Presence::Absent` |
//! | `"key": null` | `Presence::Present(None)` |
//! | `"key": <value>` | `Presence::Present(Some(decoded))` |
//!
//! Encoding is the mirror image: an absent value removes the key, never
//! writing `null` in its place.
//!
//! ## Example
//!
//! ```rust
//! use presence_core::Presence;
//! use presence_json::{decode_field, encode_field};
//! use serde_json::{json, Map, Value};
//!
//! let body = json!({"name": null, "age": 42});
//! let object = body.as_object().unwrap();
//!
//! let name: Presence<String> = decode_field(object, "name").unwrap();
//! let age: Presence<u32> = decode_field(object, "age").unwrap();
//! let email: Presence<String> = decode_field(object, "email").unwrap();
//!
//! assert!(name.is_null());
//! assert_eq!(age, Presence::present(42));
//! assert!(email.is_absent());
//!
//! let mut out = Map::new();
//! encode_field(&mut out, "name", &name).unwrap();
//! encode_field(&mut out, "email", &email).unwrap();
//! assert_eq!(Value::Object(out), json!({"name": null}));
//! ```

#![doc(html_root_url = "https://docs.rs/presence-json/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod codec;
mod error;
mod object;

pub use codec::{decode_enveloped_field, decode_field, encode_field, from_object, to_object};
pub use error::{JsonCodecError, JsonResult, DOCUMENT_FIELD};
pub use object::{parse_object, JsonObject, ObjectWriter};
