//! The presence-source contract shared by every input medium.
//!
//! A JSON object and a flat parameter collection represent "explicit null"
//! differently (a null literal versus a key with no value token), but both
//! answer the same three-way membership question through [`PresenceSource`].

use crate::Presence;

/// Result of looking up a key in a [`PresenceSource`].
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup<'a, R: ?Sized> {
    /// The key is not present in the container.
    Absent,
    /// The key is present with the medium's explicit-null marker.
    Null,
    /// The key is present with a raw value.
    Value(&'a R),
}

impl<R: ?Sized> Clone for Lookup<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: ?Sized> Copy for Lookup<'_, R> {}

impl<'a, R: ?Sized> Lookup<'a, R> {
    /// Returns `true` if the key was not found.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Converts the raw value with `convert`, producing a [`Presence`].
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `convert`; a failed conversion is
    /// never turned into an absent value.
    pub fn try_into_presence<T, E, F>(self, convert: F) -> Result<Presence<T>, E>
    where
        F: FnOnce(&'a R) -> Result<T, E>,
    {
        match self {
            Self::Absent => Ok(Presence::Absent),
            Self::Null => Ok(Presence::Present(None)),
            Self::Value(raw) => convert(raw).map(Presence::present),
        }
    }
}

/// A container that can answer whether a key was supplied.
pub trait PresenceSource {
    /// The raw, unconverted value type held by this container.
    type Raw: ?Sized;

    /// Looks up `key`, distinguishing absent, explicit null, and a raw value.
    fn lookup(&self, key: &str) -> Lookup<'_, Self::Raw>;
}
