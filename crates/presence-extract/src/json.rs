//! JSON body extractors.
//!
//! [`JsonObjectBody`] and [`json_field`] keep the object node and decode
//! fields by key, so presence never depends on serde attributes. [`Json`]
//! deserializes the whole body into a typed struct; its presence fields need
//! `#[serde(default)]`, and a field without it turns a missing key into an
//! invalid-parameter error. A value of the wrong type is an invalid-parameter
//! error reported against the document root, broken JSON a malformed body.

use presence_core::Presence;
use presence_json::{parse_object, JsonCodecError, JsonObject};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::ops::Deref;

use crate::{ExtractionContext, ExtractionError, ExtractionSource, FromRequest};

/// Extractor for JSON request bodies.
///
/// # Example
///
/// ```rust
/// use presence_core::Presence;
/// use presence_extract::{ExtractionContextBuilder, FromRequest, Json};
/// use http::Method;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct UpdateUser {
///     #[serde(default)]
///     name: Presence<String>,
///     #[serde(default)]
///     email: Presence<String>,
/// }
///
/// let ctx = ExtractionContextBuilder::new()
///     .method(Method::PATCH)
///     .body(r#"{"email": null}"#)
///     .build();
///
/// let Json(update) = Json::<UpdateUser>::from_request(&ctx).unwrap();
/// assert!(update.name.is_absent());
/// assert!(update.email.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Consumes the Json and returns the inner value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: DeserializeOwned> FromRequest for Json<T> {
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
        let body = checked_body(ctx)?;

        let value: T = serde_json::from_slice(body)
            .map_err(|e| body_error(JsonCodecError::from_document::<T>(e)))?;

        Ok(Json(value))
    }
}

/// Extractor holding the JSON body as an object node.
///
/// # Example
///
/// ```rust
/// use presence_extract::{ExtractionContextBuilder, FromRequest, JsonObjectBody};
/// use http::Method;
///
/// let ctx = ExtractionContextBuilder::new()
///     .method(Method::PATCH)
///     .body(r#"{"age": 42, "nickname": null}"#)
///     .build();
///
/// let body = JsonObjectBody::from_request(&ctx).unwrap();
/// assert!(body.field::<u32>("age").unwrap().is_present());
/// assert!(body.field::<String>("nickname").unwrap().is_null());
/// assert!(body.field::<String>("email").unwrap().is_absent());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonObjectBody(pub Map<String, Value>);

impl JsonObjectBody {
    /// Decodes `name` into a presence value.
    ///
    /// # Errors
    ///
    /// Returns an invalid-parameter error if the value cannot be decoded as
    /// `T`.
    pub fn field<T: DeserializeOwned>(&self, name: &str) -> Result<Presence<T>, ExtractionError> {
        JsonObject::new(&self.0).field(name).map_err(body_error)
    }

    /// Consumes the extractor and returns the object node.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl Deref for JsonObjectBody {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for JsonObjectBody {
    fn from_request(ctx: &ExtractionContext) -> Result<Self, ExtractionError> {
        let body = checked_body(ctx)?;
        parse_object(body).map(JsonObjectBody).map_err(body_error)
    }
}

/// Decodes a single field of the JSON body into a presence value.
///
/// # Errors
///
/// Returns the body errors of [`JsonObjectBody`] or a conversion error for
/// the field.
pub fn json_field<T: DeserializeOwned>(
    ctx: &ExtractionContext,
    name: &str,
) -> Result<Presence<T>, ExtractionError> {
    JsonObjectBody::from_request(ctx)?.field(name)
}

fn checked_body(ctx: &ExtractionContext) -> Result<&[u8], ExtractionError> {
    let body: &[u8] = ctx.body();

    if body.len() > ctx.max_body_size() {
        return Err(ExtractionError::payload_too_large(
            ctx.max_body_size(),
            body.len(),
        ));
    }

    if body.is_empty() {
        return Err(ExtractionError::deserialization_failed(
            ExtractionSource::Body,
            "empty request body",
        ));
    }

    Ok(body)
}

fn body_error(err: JsonCodecError) -> ExtractionError {
    match err {
        JsonCodecError::Presence(err) => ExtractionError::from_presence(ExtractionSource::Body, err),
        other => ExtractionError::deserialization_failed(ExtractionSource::Body, other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExtractionContextBuilder;
    use http::{Method, StatusCode};
    use serde::Deserialize;

    fn json_ctx(body: &'static str) -> ExtractionContext {
        ExtractionContextBuilder::new()
            .method(Method::POST)
            .header("content-type", "application/json")
            .body(body)
            .build()
    }

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default)]
        title: Presence<String>,
        #[serde(default)]
        priority: Presence<u8>,
    }

    #[test]
    fn test_json_struct() {
        let Json(patch) = Json::<Patch>::from_request(&json_ctx(r#"{"priority": 3}"#)).unwrap();

        assert!(patch.title.is_absent());
        assert_eq!(patch.priority, Presence::present(3));
    }

    #[test]
    fn test_json_empty_body() {
        let err = Json::<Patch>::from_request(&json_ctx("")).unwrap_err();
        assert!(err.to_string().contains("empty request body"));
    }

    #[test]
    fn test_json_too_large() {
        let ctx = ExtractionContextBuilder::new()
            .body(r#"{"title": "x"}"#)
            .max_body_size(4)
            .build();

        let err = Json::<Patch>::from_request(&ctx).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_json_invalid_value() {
        let err = Json::<Patch>::from_request(&json_ctx(r#"{"priority": "high"}"#)).unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
        assert_eq!(err.field(), Some(presence_json::DOCUMENT_FIELD));
        assert!(err.to_string().contains("expected u8"));
    }

    #[test]
    fn test_json_missing_key_needs_default() {
        #[derive(Debug, Deserialize)]
        struct Strict {
            #[allow(dead_code)]
            title: Presence<String>,
        }

        let err = Json::<Strict>::from_request(&json_ctx("{}")).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
        assert!(err.to_string().contains("missing field `title`"));
    }

    #[test]
    fn test_json_broken_syntax() {
        let err = Json::<Patch>::from_request(&json_ctx(r#"{"priority": "#)).unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_BODY");
        assert_eq!(err.field(), None);
    }

    #[test]
    fn test_object_body_rejects_array() {
        let err = JsonObjectBody::from_request(&json_ctx("[1, 2]")).unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_BODY");
    }

    #[test]
    fn test_json_field_mismatch() {
        let err = json_field::<u8>(&json_ctx(r#"{"priority": "high"}"#), "priority").unwrap_err();

        assert_eq!(err.error_code(), "INVALID_PARAMETER");
        assert_eq!(err.field(), Some("priority"));
        assert_eq!(err.extraction_source(), ExtractionSource::Body);
    }

    #[test]
    fn test_json_field_states() {
        let ctx = json_ctx(r#"{"title": null}"#);

        assert!(json_field::<String>(&ctx, "title").unwrap().is_null());
        assert!(json_field::<String>(&ctx, "priority").unwrap().is_absent());
    }
}
