//! The [`Presence`] tri-state value.

use std::fmt;

use crate::error::{PresenceError, PresenceResult};

/// A value that may be absent, present with null, or present with a value.
///
/// `Presence<T>` distinguishes a field or parameter that was never supplied
/// ([`Presence::Absent`]) from one that was supplied as an explicit null
/// (`Presence::Present(None)`) and one supplied with a concrete value
/// (`Presence::Present(Some(v))`). The three states are exhaustive.
///
/// Instances are plain immutable values: every combinator consumes `self` or
/// borrows it, and nothing mutates in place.
///
/// # Example
///
/// ```
/// use presence_core::Presence;
///
/// let name = Presence::present("Karl".to_string());
/// assert!(name.is_present());
/// assert_eq!(name.get().unwrap().map(String::as_str), Some("Karl"));
///
/// let cleared: Presence<String> = Presence::null();
/// assert!(cleared.is_present());
/// assert_eq!(cleared.get().unwrap(), None);
///
/// let missing: Presence<String> = Presence::absent();
/// assert!(missing.get().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence<T> {
    /// The field or parameter was not supplied at all.
    Absent,
    /// The field or parameter was supplied; `None` is an explicit null.
    Present(Option<T>),
}

impl<T> Default for Presence<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Presence<T> {
    /// Returns an absent instance.
    #[must_use]
    pub const fn absent() -> Self {
        Self::Absent
    }

    /// Returns a present instance carrying an explicit null.
    #[must_use]
    pub const fn null() -> Self {
        Self::Present(None)
    }

    /// Returns a present instance carrying `value`.
    #[must_use]
    pub fn present(value: T) -> Self {
        Self::Present(Some(value))
    }

    /// Returns a present instance, mapping `None` to an explicit null.
    #[must_use]
    pub fn of_nullable(value: Option<T>) -> Self {
        Self::Present(value)
    }

    /// Returns a present instance carrying a non-null value.
    ///
    /// # Errors
    ///
    /// Returns [`PresenceError::IllegalValue`] if `value` is `None`.
    pub fn of(value: Option<T>) -> PresenceResult<Self> {
        value.map(Self::present).ok_or(PresenceError::IllegalValue)
    }

    /// Returns `true` if no value was supplied.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns `true` if a value was supplied, including an explicit null.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Returns `true` if the value was supplied as an explicit null.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Present(None))
    }

    /// Returns a short label for the state: `"absent"`, `"null"`, or `"value"`.
    #[must_use]
    pub const fn state_name(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Present(None) => "null",
            Self::Present(Some(_)) => "value",
        }
    }

    /// Returns the supplied value, `None` for an explicit null.
    ///
    /// # Errors
    ///
    /// Returns [`PresenceError::AbsentValueAccess`] if the value is absent.
    pub fn get(&self) -> PresenceResult<Option<&T>> {
        match self {
            Self::Absent => Err(PresenceError::AbsentValueAccess),
            Self::Present(value) => Ok(value.as_ref()),
        }
    }

    /// Consumes the instance and returns the supplied value.
    ///
    /// # Errors
    ///
    /// Returns [`PresenceError::AbsentValueAccess`] if the value is absent.
    pub fn into_value(self) -> PresenceResult<Option<T>> {
        match self {
            Self::Absent => Err(PresenceError::AbsentValueAccess),
            Self::Present(value) => Ok(value),
        }
    }

    /// Consumes the instance and returns the supplied value, or the error
    /// built by `err` if the value is absent.
    ///
    /// # Errors
    ///
    /// Returns the result of `err` if the value is absent.
    pub fn into_value_or_else<E, F>(self, err: F) -> Result<Option<T>, E>
    where
        F: FnOnce() -> E,
    {
        match self {
            Self::Absent => Err(err()),
            Self::Present(value) => Ok(value),
        }
    }

    /// Converts from `&Presence<T>` to `Presence<&T>`.
    #[must_use]
    pub const fn as_ref(&self) -> Presence<&T> {
        match self {
            Self::Absent => Presence::Absent,
            Self::Present(value) => Presence::Present(value.as_ref()),
        }
    }

    /// Applies `f` to a concrete value.
    ///
    /// An absent instance and an explicit null pass through unchanged; `f` is
    /// never called with a null payload.
    ///
    /// ```
    /// use presence_core::Presence;
    ///
    /// assert_eq!(Presence::present(2).map(|v| v * 10), Presence::present(20));
    /// assert_eq!(Presence::<i32>::null().map(|v| v * 10), Presence::null());
    /// assert_eq!(Presence::<i32>::absent().map(|v| v * 10), Presence::absent());
    /// ```
    pub fn map<U, F>(self, f: F) -> Presence<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Absent => Presence::Absent,
            Self::Present(value) => Presence::Present(value.map(f)),
        }
    }

    /// Applies a presence-returning `f` to a concrete value.
    pub fn and_then<U, F>(self, f: F) -> Presence<U>
    where
        F: FnOnce(T) -> Presence<U>,
    {
        match self {
            Self::Absent => Presence::Absent,
            Self::Present(None) => Presence::Present(None),
            Self::Present(Some(value)) => f(value),
        }
    }

    /// Keeps a concrete value only if it matches `predicate`; otherwise the
    /// result is absent. Absent and null instances are returned unchanged.
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        match self {
            Self::Present(Some(value)) => {
                if predicate(&value) {
                    Self::Present(Some(value))
                } else {
                    Self::Absent
                }
            }
            other => other,
        }
    }

    /// Returns `self` if present, otherwise `other`.
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Absent => other,
            present => present,
        }
    }

    /// Returns `self` if present, otherwise the result of `f`.
    pub fn or_else<F>(self, f: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        match self {
            Self::Absent => f(),
            present => present,
        }
    }

    /// Returns the supplied value, or `default` if absent.
    ///
    /// An explicit null is a supplied value: it yields `None`, not `default`.
    pub fn unwrap_or(self, default: Option<T>) -> Option<T> {
        match self {
            Self::Absent => default,
            Self::Present(value) => value,
        }
    }

    /// Returns the supplied value, or the result of `f` if absent.
    pub fn unwrap_or_else<F>(self, f: F) -> Option<T>
    where
        F: FnOnce() -> Option<T>,
    {
        match self {
            Self::Absent => f(),
            Self::Present(value) => value,
        }
    }

    /// Calls `action` with the supplied value, if any.
    pub fn if_present<F>(&self, action: F)
    where
        F: FnOnce(Option<&T>),
    {
        if let Self::Present(value) = self {
            action(value.as_ref());
        }
    }

    /// Calls `action` with the supplied value, or `absent_action` if absent.
    pub fn if_present_or_else<F, G>(&self, action: F, absent_action: G)
    where
        F: FnOnce(Option<&T>),
        G: FnOnce(),
    {
        match self {
            Self::Absent => absent_action(),
            Self::Present(value) => action(value.as_ref()),
        }
    }

    /// Converts into the nested-option encoding: `None` is absent,
    /// `Some(None)` is an explicit null.
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Self::Absent => None,
            Self::Present(value) => Some(value),
        }
    }
}

impl<T> From<Option<Option<T>>> for Presence<T> {
    fn from(value: Option<Option<T>>) -> Self {
        value.map_or(Self::Absent, Self::Present)
    }
}

impl<T> From<Presence<T>> for Option<Option<T>> {
    fn from(value: Presence<T>) -> Self {
        value.into_option()
    }
}

impl<T: fmt::Display> fmt::Display for Presence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "Presence.absent"),
            Self::Present(None) => write!(f, "Presence[null]"),
            Self::Present(Some(value)) => write!(f, "Presence[{value}]"),
        }
    }
}
