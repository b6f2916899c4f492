//! Error types for presence values.
//!
//! Every error here is reported to the immediate caller. None of them are
//! transient, so nothing in the workspace retries or suppresses them.

use thiserror::Error;

/// Result type alias using [`PresenceError`].
pub type PresenceResult<T> = Result<T, PresenceError>;

/// Errors raised when reading, constructing, or converting a [`Presence`](crate::Presence).
///
/// # Example
///
/// ```
/// use presence_core::{Presence, PresenceError};
///
/// let value: Presence<u32> = Presence::absent();
/// assert!(matches!(value.get(), Err(PresenceError::AbsentValueAccess)));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresenceError {
    /// A value was read from an absent instance.
    #[error("no value present")]
    AbsentValueAccess,

    /// A present, non-null instance was requested from a null input.
    #[error("value must not be null")]
    IllegalValue,

    /// A supplied raw value could not be converted to the declared inner type.
    #[error("invalid value for '{field}': expected {expected}: {details}")]
    TypeMismatch {
        /// Name of the field or parameter being decoded.
        field: String,
        /// Human-readable name of the target type.
        expected: String,
        /// Converter-specific failure details.
        details: String,
    },
}

impl PresenceError {
    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected: expected.into(),
            details: details.into(),
        }
    }

    /// Creates a type mismatch error naming `T` as the expected type.
    #[must_use]
    pub fn type_mismatch_for<T: ?Sized>(field: impl Into<String>, details: impl Into<String>) -> Self {
        Self::type_mismatch(field, std::any::type_name::<T>(), details)
    }

    /// Returns `true` if this error was caused by client input rather than a
    /// programming mistake.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    /// Returns the field name for conversion failures.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::TypeMismatch { field, .. } => Some(field),
            _ => None,
        }
    }
}
