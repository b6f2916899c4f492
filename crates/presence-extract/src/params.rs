//! Multi-valued flat parameter collections.
//!
//! Query strings and URL-encoded form bodies share one representation. A key
//! written without `=` (`?name`) is kept with zero value tokens, which is how
//! flat parameters express an explicit null.

use indexmap::IndexMap;
use presence_core::{Lookup, PresenceSource};

/// Ordered, multi-valued map of decoded flat parameters.
///
/// # Example
///
/// ```rust
/// use presence_extract::ParamMap;
///
/// let params = ParamMap::parse("name=Karl&flag&tag=a&tag=b").unwrap();
///
/// assert_eq!(params.get_all("name"), Some(&["Karl".to_string()][..]));
/// assert_eq!(params.get_all("flag"), Some(&[][..]));
/// assert_eq!(params.get_all("tag").map(<[String]>::len), Some(2));
/// assert_eq!(params.get_all("other"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap {
    entries: IndexMap<String, Vec<String>>,
}

impl ParamMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a query string or URL-encoded form body.
    ///
    /// A leading `?` is ignored, as are empty segments such as `a=1&&b=2`.
    ///
    /// # Errors
    ///
    /// Returns the decoder error if a segment cannot be percent-decoded.
    pub fn parse(raw: &str) -> Result<Self, serde_urlencoded::de::Error> {
        let mut params = Self::new();
        let raw = raw.strip_prefix('?').unwrap_or(raw);

        for segment in raw.split('&').filter(|s| !s.is_empty()) {
            let decoded: Vec<(String, String)> = serde_urlencoded::from_str(segment)?;

            for (key, value) in decoded {
                if segment.contains('=') {
                    params.insert(key, value);
                } else {
                    params.insert_bare(key);
                }
            }
        }

        Ok(params)
    }

    /// Appends a value token for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.entry(key.into()).or_default().push(value.into());
    }

    /// Records `key` without adding a value token.
    pub fn insert_bare(&mut self, key: impl Into<String>) {
        self.entries.entry(key.into()).or_default();
    }

    /// Returns every value token recorded for `key`.
    #[must_use]
    pub fn get_all(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Returns the first value token for `key`.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get_all(key).and_then(<[String]>::first).map(String::as_str)
    }

    /// Returns `true` if `key` was supplied in any form.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no keys were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over keys in the order they first appeared.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over keys and their value tokens.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl PresenceSource for ParamMap {
    type Raw = [String];

    fn lookup(&self, key: &str) -> Lookup<'_, [String]> {
        match self.entries.get(key) {
            None => Lookup::Absent,
            Some(tokens) if tokens.is_empty() => Lookup::Null,
            Some(tokens) => Lookup::Value(tokens.as_slice()),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
