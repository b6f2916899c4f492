//! # Presence Docs
//!
//! OpenAPI schema projection for presence-wrapped fields and parameters.
//!
//! A declaration of `Presence<T>` is documented exactly like `T`, with two
//! adjustments:
//!
//! - the parameter or property is never required, whatever its
//!   declaration says
//! - it is nullable only when `T` itself is (for example `Option<U>`)
//!
//! Envelope types (`Box`, `Arc`, `Rc`) around a presence wrapper are
//! unwrapped the same way.
//!
//! ## Example
//!
//! ```rust
//! use presence_core::Presence;
//! use presence_docs::{ParameterIn, Schema, SchemaProjector};
//! use uuid::Uuid;
//!
//! let projector = SchemaProjector::new();
//!
//! let param = projector
//!     .parameter::<Presence<Uuid>>("myId", ParameterIn::Query, true)
//!     .unwrap();
//! assert!(!param.required);
//!
//! let mut person = Schema::object();
//! projector.property::<String>(&mut person, "name", true).unwrap();
//! projector.property::<Presence<String>>(&mut person, "nickname", true).unwrap();
//! assert_eq!(person.required, vec!["name".to_string()]);
//! ```

#![doc(html_root_url = "https://docs.rs/presence-docs/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod describe;
mod error;
mod projector;
mod schema;

pub use describe::{DeclaredType, DescribeType};
pub use error::{DocsError, DocsResult};
pub use projector::{ParameterDescriptor, SchemaProjector};
pub use schema::{Parameter, ParameterIn, Schema, SchemaType};
