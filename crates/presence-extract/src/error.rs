//! Binding failures and their HTTP mapping.
//!
//! A value that was supplied but cannot be converted is always a client
//! error. It is never turned into an absent value.

use std::fmt;

use http::StatusCode;
use presence_core::PresenceError;
use thiserror::Error;

/// Where the failing input came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionSource {
    /// Query string.
    Query,
    /// Request body, JSON or form.
    Body,
    /// The `Content-Type` header.
    ContentType,
    /// Not tied to request input.
    Other,
}

impl ExtractionSource {
    /// Lowercase label used in messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Body => "body",
            Self::ContentType => "content-type",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a binding failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A supplied value could not be converted to the declared type.
    InvalidType,
    /// A key was repeated where one value is expected.
    Ambiguous,
    /// The body is not valid for the declared shape.
    DeserializationFailed,
    /// The body exceeds the configured limit.
    PayloadTooLarge,
    /// The body's media type is not accepted.
    UnsupportedMediaType,
    /// A presence value was read in a state it does not hold.
    InvalidState,
}

impl ErrorKind {
    /// HTTP status for this kind.
    #[must_use]
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::InvalidType | Self::Ambiguous | Self::DeserializationFailed => {
                StatusCode::BAD_REQUEST
            }
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::InvalidState => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidType => "INVALID_PARAMETER",
            Self::Ambiguous => "AMBIGUOUS_PARAMETER",
            Self::DeserializationFailed => "MALFORMED_BODY",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            Self::InvalidState => "PRESENCE_STATE_VIOLATION",
        }
    }
}

/// A request could not be bound.
///
/// # Example
///
/// ```rust
/// use presence_extract::{ExtractionError, ExtractionSource};
/// use http::StatusCode;
///
/// let err = ExtractionError::invalid_type(ExtractionSource::Query, "myId", "invalid UUID");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(err.error_code(), "INVALID_PARAMETER");
/// assert_eq!(err.field(), Some("myId"));
/// ```
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ExtractionError {
    kind: ErrorKind,
    source_of: ExtractionSource,
    field: Option<String>,
    message: String,
}

impl ExtractionError {
    fn new(
        kind: ErrorKind,
        source_of: ExtractionSource,
        field: Option<String>,
        message: String,
    ) -> Self {
        Self {
            kind,
            source_of,
            field,
            message,
        }
    }

    /// `field` was supplied from `source` but could not be converted.
    #[must_use]
    pub fn invalid_type(
        source: ExtractionSource,
        field: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        let field = field.into();
        let message = format!("{source} value for '{field}' is invalid: {}", details.into());
        Self::new(ErrorKind::InvalidType, source, Some(field), message)
    }

    /// `field` was given `count` values under a single-value policy.
    #[must_use]
    pub fn ambiguous(source: ExtractionSource, field: impl Into<String>, count: usize) -> Self {
        let field = field.into();
        let message = format!("{source} key '{field}' repeated {count} times; one value expected");
        Self::new(ErrorKind::Ambiguous, source, Some(field), message)
    }

    /// The input from `source` is malformed as a whole.
    #[must_use]
    pub fn deserialization_failed(source: ExtractionSource, details: impl Into<String>) -> Self {
        let message = format!("malformed {source}: {}", details.into());
        Self::new(ErrorKind::DeserializationFailed, source, None, message)
    }

    /// The body is `actual` bytes against a limit of `limit`.
    #[must_use]
    pub fn payload_too_large(limit: usize, actual: usize) -> Self {
        let message = format!("body of {actual} bytes exceeds the {limit} byte limit");
        Self::new(ErrorKind::PayloadTooLarge, ExtractionSource::Body, None, message)
    }

    /// The request's media type is not `expected`.
    #[must_use]
    pub fn unsupported_media_type(expected: &str, actual: Option<&str>) -> Self {
        let message = format!(
            "expected content type '{expected}', request has '{}'",
            actual.unwrap_or("none")
        );
        Self::new(
            ErrorKind::UnsupportedMediaType,
            ExtractionSource::ContentType,
            None,
            message,
        )
    }

    /// Maps a [`PresenceError`] raised while reading from `source`.
    ///
    /// A type mismatch becomes [`ErrorKind::InvalidType`]; any other variant
    /// is a server-side misuse and becomes [`ErrorKind::InvalidState`].
    #[must_use]
    pub fn from_presence(source: ExtractionSource, err: PresenceError) -> Self {
        if let PresenceError::TypeMismatch {
            field,
            expected,
            details,
        } = err
        {
            return Self::invalid_type(source, field, format!("expected {expected}: {details}"));
        }

        Self::new(ErrorKind::InvalidState, source, None, err.to_string())
    }

    /// Failure category.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Where the failing input came from.
    #[must_use]
    pub fn extraction_source(&self) -> ExtractionSource {
        self.source_of
    }

    /// The offending field, when the failure concerns one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// HTTP status to answer with.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }

    /// Machine-readable code for error bodies.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        self.kind.code()
    }

    /// Whether the client caused the failure.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl From<PresenceError> for ExtractionError {
    fn from(err: PresenceError) -> Self {
        Self::from_presence(ExtractionSource::Other, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconvertible_value_names_field() {
        let err = ExtractionError::invalid_type(ExtractionSource::Query, "limit", "not a number");

        assert_eq!(err.kind(), ErrorKind::InvalidType);
        assert_eq!(err.field(), Some("limit"));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("'limit'"));
        assert!(err.to_string().contains("not a number"));
    }

    #[test]
    fn test_repeated_key() {
        let err = ExtractionError::ambiguous(ExtractionSource::Body, "tag", 3);

        assert_eq!(err.error_code(), "AMBIGUOUS_PARAMETER");
        assert_eq!(err.extraction_source(), ExtractionSource::Body);
        assert!(err.to_string().contains("3 times"));
    }

    #[test]
    fn test_malformed_body_has_no_field() {
        let err = ExtractionError::deserialization_failed(ExtractionSource::Body, "EOF at 5");

        assert_eq!(err.field(), None);
        assert_eq!(err.error_code(), "MALFORMED_BODY");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_body_limit() {
        let err = ExtractionError::payload_too_large(16, 40);

        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(err.to_string().contains("40 bytes"));
    }

    #[test]
    fn test_media_type_without_header() {
        let err = ExtractionError::unsupported_media_type("application/json", None);

        assert_eq!(err.extraction_source(), ExtractionSource::ContentType);
        assert_eq!(err.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert!(err.to_string().contains("'none'"));
    }

    #[test]
    fn test_presence_mismatch_maps_to_client_error() {
        let err = ExtractionError::from_presence(
            ExtractionSource::Query,
            PresenceError::type_mismatch("myId", "Uuid", "invalid length"),
        );

        assert_eq!(err.kind(), ErrorKind::InvalidType);
        assert_eq!(err.field(), Some("myId"));
        assert!(err.to_string().contains("expected Uuid"));
    }

    #[test]
    fn test_presence_misuse_maps_to_server_error() {
        let err = ExtractionError::from(PresenceError::AbsentValueAccess);

        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.extraction_source(), ExtractionSource::Other);
    }

    #[test]
    fn test_source_labels() {
        assert_eq!(ExtractionSource::Query.to_string(), "query");
        assert_eq!(ExtractionSource::ContentType.as_str(), "content-type");
    }
}
