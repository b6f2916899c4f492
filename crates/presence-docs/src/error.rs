//! Error types for the schema projection crate.

use thiserror::Error;

/// Errors that can occur during schema projection.
#[derive(Debug, Error)]
pub enum DocsError {
    /// Failed to serialize a schema record to JSON.
    #[error("Failed to serialize schema: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A property was projected into a schema that cannot hold properties.
    #[error("Cannot add property '{property}' to a non-object schema")]
    NotAnObject {
        /// The property being added.
        property: String,
    },

    /// A parameter descriptor is incomplete.
    #[error("Parameter descriptor missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },
}

/// Result type for schema operations.
pub type DocsResult<T> = Result<T, DocsError>;
