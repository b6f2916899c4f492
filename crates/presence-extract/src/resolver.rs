//! Presence resolution for flat parameters.
//!
//! | Input | Default policy result |
//! |-------|-----------------------|
//! | key not supplied | `Absent` |
//! | `?name` | `Present(None)` |
//! | `?name=` | `Present(None)` (`empty_as_null`) |
//! | `?name=%20` | converted as-is (`blank_as_null` is off) |
//! | `?name=Karl` | `Present(Some("Karl"))` |

use presence_core::{Envelope, Lookup, Presence, PresenceError, PresenceSource};
use serde::{Deserialize, Serialize};

use crate::{ExtractionError, ExtractionSource, FromParam, ParamMap};

/// How a key repeated with several value tokens is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MultiValuePolicy {
    /// Use the first token.
    #[default]
    First,
    /// Fail with an ambiguous-parameter error.
    Reject,
}

/// Rules for mapping flat parameter tokens onto presence states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamPolicy {
    /// Treat `?name=` (a single empty token) as an explicit null.
    #[serde(default = "default_true")]
    pub empty_as_null: bool,

    /// Treat a whitespace-only token as an explicit null.
    #[serde(default)]
    pub blank_as_null: bool,

    /// Handling of repeated keys.
    #[serde(default)]
    pub multi_value: MultiValuePolicy,
}

impl Default for ParamPolicy {
    fn default() -> Self {
        Self {
            empty_as_null: true,
            blank_as_null: false,
            multi_value: MultiValuePolicy::First,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Resolves named parameters from a [`ParamMap`] into [`Presence`] values.
///
/// The resolver never reports a parameter as missing: absence is a legal
/// outcome carried by the returned value.
///
/// # Example
///
/// ```rust
/// use presence_core::Presence;
/// use presence_extract::{ParamMap, ParamResolver};
///
/// let params = ParamMap::parse("name=Karl&nickname").unwrap();
/// let resolver = ParamResolver::default();
///
/// assert_eq!(resolver.resolve::<String>(&params, "name").unwrap(), Presence::present("Karl".to_string()));
/// assert_eq!(resolver.resolve::<String>(&params, "nickname").unwrap(), Presence::null());
/// assert_eq!(resolver.resolve::<String>(&params, "email").unwrap(), Presence::absent());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParamResolver {
    policy: ParamPolicy,
    source: ParamSource,
}

#[derive(Debug, Clone, Copy, Default)]
enum ParamSource {
    #[default]
    Query,
    Body,
}

impl ParamSource {
    const fn extraction_source(self) -> ExtractionSource {
        match self {
            Self::Query => ExtractionSource::Query,
            Self::Body => ExtractionSource::Body,
        }
    }

    const fn medium(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Body => "form",
        }
    }
}

impl ParamResolver {
    /// Creates a resolver for query-string parameters.
    #[must_use]
    pub fn new(policy: ParamPolicy) -> Self {
        Self {
            policy,
            source: ParamSource::Query,
        }
    }

    /// Creates a resolver for URL-encoded form body parameters.
    #[must_use]
    pub fn for_form(policy: ParamPolicy) -> Self {
        Self {
            policy,
            source: ParamSource::Body,
        }
    }

    /// Returns the policy in effect.
    #[must_use]
    pub fn policy(&self) -> &ParamPolicy {
        &self.policy
    }

    /// Resolves `name` from `params`.
    ///
    /// # Errors
    ///
    /// Returns an invalid-parameter error if the token cannot be converted to
    /// `T`, and an ambiguous-parameter error if the key is repeated under
    /// [`MultiValuePolicy::Reject`]. A conversion failure is never reported
    /// as an absent value.
    pub fn resolve<T: FromParam>(
        &self,
        params: &ParamMap,
        name: &str,
    ) -> Result<Presence<T>, ExtractionError> {
        let resolved = match params.lookup(name) {
            Lookup::Absent => Ok(Presence::Absent),
            Lookup::Null => Ok(Presence::Present(None)),
            Lookup::Value(tokens) => self.resolve_tokens(name, tokens),
        };

        match &resolved {
            Ok(value) => tracing::debug!(
                medium = self.source.medium(),
                field = %name,
                state = value.state_name(),
                target_type = std::any::type_name::<T>(),
                "Resolved parameter"
            ),
            Err(err) => tracing::debug!(
                medium = self.source.medium(),
                field = %name,
                target_type = std::any::type_name::<T>(),
                error = %err,
                "Parameter resolution failed"
            ),
        }

        resolved
    }

    /// Resolves `name` into an envelope around a [`Presence`], such as
    /// `Arc<Presence<T>>`. Presence is decided for the innermost value.
    ///
    /// # Errors
    ///
    /// Same as [`resolve`](Self::resolve).
    pub fn resolve_enveloped<E, T>(&self, params: &ParamMap, name: &str) -> Result<E, ExtractionError>
    where
        E: Envelope<Inner = Presence<T>>,
        T: FromParam,
    {
        self.resolve(params, name).map(E::wrap)
    }

    fn resolve_tokens<T: FromParam>(
        &self,
        name: &str,
        tokens: &[String],
    ) -> Result<Presence<T>, ExtractionError> {
        let token = match tokens {
            [] => return Ok(Presence::Present(None)),
            [single] => single,
            [first, ..] => match self.policy.multi_value {
                MultiValuePolicy::First => {
                    tracing::debug!(
                        field = %name,
                        count = tokens.len(),
                        "Repeated parameter, using first value"
                    );
                    first
                }
                MultiValuePolicy::Reject => {
                    return Err(ExtractionError::ambiguous(
                        self.source.extraction_source(),
                        name,
                        tokens.len(),
                    ))
                }
            },
        };

        if self.is_null_token(token) {
            return Ok(Presence::Present(None));
        }

        T::from_param(token).map(Presence::present).map_err(|details| {
            ExtractionError::from_presence(
                self.source.extraction_source(),
                PresenceError::type_mismatch_for::<T>(name, details),
            )
        })
    }

    fn is_null_token(&self, token: &str) -> bool {
        (self.policy.empty_as_null && token.is_empty())
            || (self.policy.blank_as_null && token.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn params(raw: &str) -> ParamMap {
        ParamMap::parse(raw).unwrap()
    }

    #[test]
    fn test_enveloped_keeps_inner_state() {
        let resolver = ParamResolver::default();

        let boxed: Box<Presence<u32>> = resolver.resolve_enveloped(&params("limit"), "limit").unwrap();
        assert_eq!(*boxed, Presence::Present(None));

        let shared: std::sync::Arc<Presence<u32>> =
            resolver.resolve_enveloped(&params("other=1"), "limit").unwrap();
        assert!(shared.is_absent());
    }

    #[test]
    fn test_default_policy() {
        let policy = ParamPolicy::default();
        assert!(policy.empty_as_null);
        assert!(!policy.blank_as_null);
        assert_eq!(policy.multi_value, MultiValuePolicy::First);
    }

    #[test]
    fn test_three_states() {
        let resolver = ParamResolver::default();

        assert_eq!(
            resolver.resolve::<String>(&params("name=Karl"), "name").unwrap(),
            Presence::present("Karl".to_string())
        );
        assert_eq!(
            resolver.resolve::<String>(&params("name"), "name").unwrap(),
            Presence::null()
        );
        assert_eq!(
            resolver.resolve::<String>(&params("other=1"), "name").unwrap(),
            Presence::absent()
        );
    }

    #[test]
    fn test_empty_token_policy() {
        let input = params("name=");

        let default = ParamResolver::default();
        assert_eq!(default.resolve::<String>(&input, "name").unwrap(), Presence::null());

        let literal = ParamResolver::new(ParamPolicy {
            empty_as_null: false,
            ..ParamPolicy::default()
        });
        assert_eq!(
            literal.resolve::<String>(&input, "name").unwrap(),
            Presence::present(String::new())
        );
        assert!(literal.resolve::<u32>(&input, "name").is_err());
    }

    #[test]
    fn test_bare_key_is_null_regardless_of_policy() {
        let resolver = ParamResolver::new(ParamPolicy {
            empty_as_null: false,
            ..ParamPolicy::default()
        });

        assert_eq!(resolver.resolve::<u32>(&params("n"), "n").unwrap(), Presence::null());
    }

    #[test]
    fn test_blank_token_policy() {
        let input = params("name=%20%20");

        let default = ParamResolver::default();
        assert_eq!(
            default.resolve::<String>(&input, "name").unwrap(),
            Presence::present("  ".to_string())
        );

        let blank = ParamResolver::new(ParamPolicy {
            blank_as_null: true,
            ..ParamPolicy::default()
        });
        assert_eq!(blank.resolve::<String>(&input, "name").unwrap(), Presence::null());
    }

    #[test]
    fn test_conversion_failure_is_not_absent() {
        let err = ParamResolver::default()
            .resolve::<Uuid>(&params("id=not-a-uuid"), "id")
            .unwrap_err();

        assert!(err.is_client_error());
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
        assert_eq!(err.field(), Some("id"));
        assert_eq!(err.extraction_source(), ExtractionSource::Query);
    }

    #[test]
    fn test_multi_value_first() {
        let resolver = ParamResolver::default();
        assert_eq!(
            resolver.resolve::<u32>(&params("n=1&n=2"), "n").unwrap(),
            Presence::present(1)
        );
    }

    #[test]
    fn test_multi_value_reject() {
        let resolver = ParamResolver::for_form(ParamPolicy {
            multi_value: MultiValuePolicy::Reject,
            ..ParamPolicy::default()
        });

        let err = resolver.resolve::<u32>(&params("n=1&n=2"), "n").unwrap_err();
        assert_eq!(err.error_code(), "AMBIGUOUS_PARAMETER");
        assert_eq!(err.extraction_source(), ExtractionSource::Body);
    }

    #[test]
    fn test_policy_deserialize_defaults() {
        let policy: ParamPolicy = serde_json::from_str(r#"{"multi_value": "reject"}"#).unwrap();

        assert!(policy.empty_as_null);
        assert!(!policy.blank_as_null);
        assert_eq!(policy.multi_value, MultiValuePolicy::Reject);
    }
}
