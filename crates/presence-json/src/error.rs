//! Error types for the JSON presence codec.

use presence_core::PresenceError;
use serde_json::error::Category;
use thiserror::Error;

/// Field name reported for a whole-document mismatch, the document root.
pub const DOCUMENT_FIELD: &str = "$";

/// Result type for codec operations.
pub type JsonResult<T> = Result<T, JsonCodecError>;

/// Errors that can occur while decoding or encoding presence values.
#[derive(Debug, Error)]
pub enum JsonCodecError {
    /// A present value could not be converted to the inner type.
    #[error(transparent)]
    Presence(#[from] PresenceError),

    /// The document root was not a JSON object.
    #[error("expected a JSON object, found {found}")]
    NotAnObject {
        /// JSON type that was found instead.
        found: &'static str,
    },

    /// A value could not be encoded.
    #[error("failed to encode field '{field}': {source}")]
    Encode {
        /// Field being encoded.
        field: String,
        /// Underlying serializer error.
        #[source]
        source: serde_json::Error,
    },

    /// The document is not valid JSON.
    #[error("invalid JSON document: {0}")]
    Syntax(#[from] serde_json::Error),
}

impl JsonCodecError {
    /// Creates a type mismatch error for `field`, naming `T` as the target.
    #[must_use]
    pub fn type_mismatch<T: ?Sized>(field: &str, source: &serde_json::Error) -> Self {
        Self::Presence(PresenceError::type_mismatch_for::<T>(field, source.to_string()))
    }

    /// Classifies a failure to decode a whole document into `T`.
    ///
    /// A value of the wrong shape or a missing member is a type mismatch
    /// reported against [`DOCUMENT_FIELD`]; broken JSON stays a syntax error.
    #[must_use]
    pub fn from_document<T: ?Sized>(source: serde_json::Error) -> Self {
        match source.classify() {
            Category::Data => Self::Presence(PresenceError::type_mismatch_for::<T>(
                DOCUMENT_FIELD,
                source.to_string(),
            )),
            Category::Io | Category::Syntax | Category::Eof => Self::Syntax(source),
        }
    }

    /// Returns `true` if this error is a conversion failure of client input.
    #[must_use]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::Presence(err) if err.is_client_error())
    }
}

/// Returns the JSON type name of `value`.
pub(crate) const fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
