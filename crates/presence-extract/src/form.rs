//! Form data extractor.
//!
//! The [`FormParams`] extractor reads `application/x-www-form-urlencoded`
//! bodies with the same presence rules as query strings.

use presence_core::Presence;
use std::ops::Deref;

use crate::{
    ExtractionContext, ExtractionError, ExtractionSource, FromParam, FromRequest, ParamMap,
    ParamResolver,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Extractor for URL-encoded form bodies.
///
/// An empty body yields an empty parameter map, so every field resolves to
/// absent.
///
/// # Example
///
/// ```rust
/// use presence_extract::{ExtractionContextBuilder, FormParams, FromRequest};
/// use http::{Method, Uri};
///
/// let ctx = ExtractionContextBuilder::new()
///     .method(Method::POST)
///     .uri(Uri::from_static("/profile"))
///     .header("content-type", "application/x-www-form-urlencoded")
///     .body("nickname=&bio=hello+world")
///     .build();
///
/// let form = FormParams::from_request(&ctx).unwrap();
/// assert!(form.get::<String>("nickname").unwrap().is_null());
/// assert_eq!(form.get::<String>("bio").unwrap().into_value().unwrap().as_deref(), Some("hello world"));
/// ```
#[derive(Debug, Clone)]
pub struct FormParams {
    params: ParamMap,
    resolver: ParamResolver,
}

impl FormParams {
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

impl Deref for FormParams {
    type Target = ParamMap;

    fn deref(&self) -> &Self::Target {
        &self.params
    }
}

impl FromRequest for FormParams {
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
        let content_type = ctx.content_type();
        if !is_form_content_type(content_type) {
            return Err(ExtractionError::unsupported_media_type(
                FORM_CONTENT_TYPE,
                content_type,
            ));
        }

        let body = ctx.body();
        if body.len() > ctx.max_body_size() {
            return Err(ExtractionError::payload_too_large(
                ctx.max_body_size(),
                body.len(),
            ));
        }

        let body_str = std::str::from_utf8(body).map_err(|e| {
            ExtractionError::deserialization_failed(
                ExtractionSource::Body,
                format!("invalid UTF-8: {e}"),
            )
        })?;

        let params = ParamMap::parse(body_str).map_err(|e| {
            ExtractionError::deserialization_failed(ExtractionSource::Body, e.to_string())
        })?;

        Ok(Self {
            params,
            resolver: ParamResolver::for_form(ctx.param_policy().clone()),
        })
    }
}

fn is_form_content_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.parse::<mime::Mime>().ok())
        .is_some_and(|m| m.type_() == mime::APPLICATION && m.subtype() == mime::WWW_FORM_URLENCODED)
}

/// Resolves a single form field into a presence value.
///
/// # Errors
///
/// Same as [`FormParams::get`], plus the body errors of the extractor.
pub fn form_param<T: FromParam>(
    ctx: &ExtractionContext,
    name: &str,
) -> Result<Presence<T>, ExtractionError> {
    FormParams::from_request(ctx)?.get(name)
}
