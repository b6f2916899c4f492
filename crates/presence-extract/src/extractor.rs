//! The [`FromRequest`] binding trait.
//!
//! `Option<T>` is not a binder: a binding error must surface and never reads
//! as a missing value. Bind `Result<T, _>` to inspect a failure.

use crate::{ExtractionContext, ExtractionError};

/// Binds a value from a buffered request.
///
/// # Example
///
/// ```rust
/// use presence_core::Presence;
/// use presence_extract::{query_param, ExtractionContext, ExtractionError, FromRequest};
///
/// // `?limit` with no value clears the page size
/// struct Limit(Presence<u32>);
///
/// impl FromRequest for Limit {
///     fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
///         query_param(ctx, "limit").map(Limit)
///     }
/// }
/// ```
///
/// Tuples of up to six binders are binders themselves and stop at the first
/// failure, e.g. `(QueryParams, JsonObjectBody)`.
pub trait FromRequest: Sized {
    /// Binds `Self` from `ctx`.
    ///
    /// # Errors
    ///
    /// Returns the binding failure.
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError>;
}

impl<T: FromRequest> FromRequest for Result<T, ExtractionError> {
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
        Ok(T::from_request(ctx))
    }
}

impl FromRequest for () {
    fn from_request(_: &ExtractionContext) -> Result<Self, ExtractionError> {
        Ok(())
    }
}

macro_rules! tuple_binders {
    ($head:ident $(, $tail:ident)*) => {
        impl<$head: FromRequest $(, $tail: FromRequest)*> FromRequest for ($head, $($tail,)*) {
            fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
                Ok(($head::from_request(ctx)?, $($tail::from_request(ctx)?,)*))
            }
        }

        tuple_binders!($($tail),*);
    };
    () => {};
}

tuple_binders!(A, B, C, D, E, F);
