//! Query string extractor.
//!
//! The [`QueryParams`] extractor exposes the query string as a [`ParamMap`]
//! and resolves individual parameters into presence values.

use presence_core::Presence;
use std::ops::Deref;

use crate::{
    ExtractionContext, ExtractionError, ExtractionSource, FromParam, FromRequest, ParamMap,
    ParamResolver,
};

/// Extractor for URL query string parameters.
///
/// # Example
///
/// ```rust
/// use presence_core::Presence;
/// use presence_extract::{ExtractionContext, FromRequest, QueryParams};
/// use http::{HeaderMap, Method, Uri};
/// use bytes::Bytes;
///
/// let ctx = ExtractionContext::new(
///     Method::GET,
///     Uri::from_static("/person?name=Karl&nickname"),
///     HeaderMap::new(),
///     Bytes::new(),
/// );
///
/// let query = QueryParams::from_request(&ctx).unwrap();
/// assert_eq!(query.get::<String>("name").unwrap(), Presence::present("Karl".to_string()));
/// assert!(query.get::<String>("nickname").unwrap().is_null());
/// assert!(query.get::<String>("email").unwrap().is_absent());
/// ```
#[derive(Debug, Clone)]
pub struct QueryParams {
    params: ParamMap,
    resolver: ParamResolver,
}

impl QueryParams {
    /// Resolves `name` into a presence value.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractionError`] if the value cannot be converted to `T`
    /// or the key is ambiguous under the configured policy.
    pub fn get<T: FromParam>(&self, name: &str) -> Result<Presence<T>, ExtractionError> {
        self.resolver.resolve(&self.params, name)
    }

    /// Consumes the extractor and returns the parsed parameters.
    #[must_use]
    pub fn into_inner(self) -> ParamMap {
        self.params
    }
}

impl Deref for QueryParams {
    type Target = ParamMap;

    fn deref(&self) -> &Self::Target {
        &self.params
    }
}

impl FromRequest for QueryParams {
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
        let query_string = ctx.query_string().unwrap_or("");

        let params = ParamMap::parse(query_string).map_err(|e| {
            ExtractionError::deserialization_failed(ExtractionSource::Query, e.to_string())
        })?;

        Ok(Self {
            params,
            resolver: ParamResolver::new(ctx.param_policy().clone()),
        })
    }
}

/// Resolves a single query parameter into a presence value.
///
/// # Errors
///
/// Same as [`QueryParams::get`].
pub fn query_param<T: FromParam>(
    ctx: &ExtractionContext,
    name: &str,
) -> Result<Presence<T>, ExtractionError> {
    QueryParams::from_request(ctx)?.get(name)
}
