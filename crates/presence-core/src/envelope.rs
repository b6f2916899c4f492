//! Single-value containers around a [`Presence`].
//!
//! A declared type such as `Box<Presence<T>>` or `Arc<Presence<T>>` still
//! carries per-element presence: the envelope is unwrapped first and only
//! the innermost [`Presence`] decides whether a key is emitted or required.

use std::rc::Rc;
use std::sync::Arc;

use crate::Presence;

/// A container holding exactly one value.
pub trait Envelope: Sized {
    /// The wrapped value type.
    type Inner;

    /// Wraps `inner` in this envelope.
    fn wrap(inner: Self::Inner) -> Self;

    /// Unwraps the envelope, returning the wrapped value.
    fn into_inner(self) -> Self::Inner;
}

impl<T> Envelope for Box<T> {
    type Inner = T;

    fn wrap(inner: T) -> Self {
        Box::new(inner)
    }

    fn into_inner(self) -> T {
        *self
    }
}

impl<T: Clone> Envelope for Arc<T> {
    type Inner = T;

    fn wrap(inner: T) -> Self {
        Arc::new(inner)
    }

    fn into_inner(self) -> T {
        Arc::try_unwrap(self).unwrap_or_else(|shared| (*shared).clone())
    }
}

impl<T: Clone> Envelope for Rc<T> {
    type Inner = T;

    fn wrap(inner: T) -> Self {
        Rc::new(inner)
    }

    fn into_inner(self) -> T {
        Rc::try_unwrap(self).unwrap_or_else(|shared| (*shared).clone())
    }
}

/// Types that may represent a missing value, at any envelope depth.
pub trait MaybeAbsent {
    /// Returns `true` if the innermost value is absent.
    fn is_absent(&self) -> bool;
}

impl<T> MaybeAbsent for Presence<T> {
    fn is_absent(&self) -> bool {
        Presence::is_absent(self)
    }
}

impl<E: MaybeAbsent + ?Sized> MaybeAbsent for Box<E> {
    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<E: MaybeAbsent + ?Sized> MaybeAbsent for Arc<E> {
    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

impl<E: MaybeAbsent + ?Sized> MaybeAbsent for Rc<E> {
    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }
}

/// Skip predicate for serde fields holding a possibly enveloped [`Presence`].
///
/// ```
/// use presence_core::Presence;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Update {
///     #[serde(skip_serializing_if = "presence_core::is_absent")]
///     note: Box<Presence<String>>,
/// }
///
/// let update = Update { note: Box::new(Presence::absent()) };
/// assert_eq!(serde_json::to_string(&update).unwrap(), "{}");
/// ```
pub fn is_absent<T: MaybeAbsent + ?Sized>(value: &T) -> bool {
    value.is_absent()
}
