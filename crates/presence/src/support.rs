//! Start-up composition of presence capabilities.
//!
//! [`PresenceSupport`] is built once from a [`PresenceConfig`]. Each
//! capability is switched on or off explicitly on the builder; a disabled
//! capability reports `None` and leaves request handling at its defaults.
//!
//! The toggles govern handlers and settings only. Extractors read everything
//! they need from the [`ExtractionContext`], so binding from a context built
//! by [`PresenceSupport::context`] still works with a capability disabled; it
//! just ignores that capability's configured section.

use bytes::Bytes;
use http::{HeaderMap, Method, Uri};
use presence_config::{ConfigError, PresenceConfig};
use presence_docs::SchemaProjector;
use presence_extract::{ExtractionContext, ParamPolicy, ParamResolver, DEFAULT_MAX_BODY_SIZE};
use presence_telemetry::TelemetryResult;

/// JSON body handling attached when the JSON capability is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonSupport {
    max_body_size: usize,
}

impl JsonSupport {
    /// Maximum accepted request body size in bytes.
    #[must_use]
    pub fn max_body_size(&self) -> usize {
        self.max_body_size
    }
}

/// Presence capabilities assembled at start-up.
///
/// # Example
///
/// ```rust
/// use presence::{PresenceConfig, PresenceSupport};
///
/// let support = PresenceSupport::builder()
///     .config(PresenceConfig::default())
///     .schema(false)
///     .build()
///     .unwrap();
///
/// assert!(support.params().is_some());
/// assert!(support.json().is_some());
/// assert!(support.schema().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct PresenceSupport {
    config: PresenceConfig,
    params: Option<ParamResolver>,
    json: Option<JsonSupport>,
    schema: Option<SchemaProjector>,
}

impl PresenceSupport {
    /// Creates a builder with every capability enabled.
    #[must_use]
    pub fn builder() -> PresenceSupportBuilder {
        PresenceSupportBuilder::default()
    }

    /// Builds support with every capability enabled.
    ///
    /// # Errors
    ///
    /// Returns the validation error if `config` is invalid.
    pub fn from_config(config: PresenceConfig) -> Result<Self, ConfigError> {
        Self::builder().config(config).build()
    }

    /// The configuration this support was built from.
    #[must_use]
    pub fn config(&self) -> &PresenceConfig {
        &self.config
    }

    /// Query-string resolver, if flat-parameter binding is enabled.
    #[must_use]
    pub fn params(&self) -> Option<&ParamResolver> {
        self.params.as_ref()
    }

    /// Form-body resolver sharing the query resolver's policy.
    #[must_use]
    pub fn form_params(&self) -> Option<ParamResolver> {
        self.params
            .as_ref()
            .map(|resolver| ParamResolver::for_form(resolver.policy().clone()))
    }

    /// JSON body handling, if enabled.
    #[must_use]
    pub fn json(&self) -> Option<&JsonSupport> {
        self.json.as_ref()
    }

    /// Schema projector, if enabled.
    #[must_use]
    pub fn schema(&self) -> Option<&SchemaProjector> {
        self.schema.as_ref()
    }

    /// Builds an extraction context carrying the enabled capabilities'
    /// settings.
    ///
    /// A disabled capability contributes its default instead of its
    /// configured section: [`ParamPolicy::default`] without `params` and
    /// [`DEFAULT_MAX_BODY_SIZE`] without `json`. Extractors are not blocked.
    #[must_use]
    pub fn context(
        &self,
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
    ) -> ExtractionContext {
        let policy = self
            .params
            .as_ref()
            .map_or_else(ParamPolicy::default, |resolver| resolver.policy().clone());
        let max_body_size = self
            .json
            .map_or(DEFAULT_MAX_BODY_SIZE, |json| json.max_body_size);

        ExtractionContext::new(method, uri, headers, body)
            .with_param_policy(policy)
            .with_max_body_size(max_body_size)
    }

    /// Installs the global log subscriber described by the logging section.
    ///
    /// # Errors
    ///
    /// Returns an error if the level is invalid or a subscriber is already
    /// installed.
    pub fn init_logging(&self) -> TelemetryResult<()> {
        presence_telemetry::init_logging(&self.config.logging.to_log_config())
    }
}

/// Builder for [`PresenceSupport`].
#[derive(Debug, Clone)]
pub struct PresenceSupportBuilder {
    config: PresenceConfig,
    json: bool,
    params: bool,
    schema: bool,
}

impl Default for PresenceSupportBuilder {
    fn default() -> Self {
        Self {
            config: PresenceConfig::default(),
            json: true,
            params: true,
            schema: true,
        }
    }
}

impl PresenceSupportBuilder {
    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: PresenceConfig) -> Self {
        self.config = config;
        self
    }

    /// Enables or disables JSON body handling.
    #[must_use]
    pub fn json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    /// Enables or disables flat-parameter binding.
    #[must_use]
    pub fn params(mut self, enabled: bool) -> Self {
        self.params = enabled;
        self
    }

    /// Enables or disables schema projection.
    #[must_use]
    pub fn schema(mut self, enabled: bool) -> Self {
        self.schema = enabled;
        self
    }

    /// Validates the configuration and attaches the enabled capabilities.
    ///
    /// # Errors
    ///
    /// Returns the validation error if the configuration is invalid.
    pub fn build(self) -> Result<PresenceSupport, ConfigError> {
        self.config.validate()?;

        let params = self
            .params
            .then(|| ParamResolver::new(self.config.params.clone()));
        let json = self.json.then_some(JsonSupport {
            max_body_size: self.config.json.max_body_size,
        });
        let schema = self.schema.then(SchemaProjector::new);

        tracing::debug!(
            params = params.is_some(),
            json = json.is_some(),
            schema = schema.is_some(),
            "Presence support configured"
        );

        Ok(PresenceSupport {
            config: self.config,
            params,
            json,
            schema,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use presence_config::JsonConfig;
    use presence_extract::MultiValuePolicy;

    #[test]
    fn test_all_enabled_by_default() {
        let support = PresenceSupport::from_config(PresenceConfig::default()).unwrap();

        assert!(support.params().is_some());
        assert!(support.json().is_some());
        assert!(support.schema().is_some());
    }

    #[test]
    fn test_disabled_capabilities_report_none() {
        let support = PresenceSupport::builder()
            .json(false)
            .params(false)
            .schema(false)
            .build()
            .unwrap();

        assert!(support.params().is_none());
        assert!(support.form_params().is_none());
        assert!(support.json().is_none());
        assert!(support.schema().is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PresenceConfig {
            json: JsonConfig { max_body_size: 0 },
            ..PresenceConfig::default()
        };

        assert!(PresenceSupport::from_config(config).is_err());
    }

    #[test]
    fn test_policy_carried_to_resolvers() {
        let mut config = PresenceConfig::default();
        config.params.multi_value = MultiValuePolicy::Reject;

        let support = PresenceSupport::from_config(config).unwrap();

        assert_eq!(
            support.params().unwrap().policy().multi_value,
            MultiValuePolicy::Reject
        );
        assert_eq!(
            support.form_params().unwrap().policy().multi_value,
            MultiValuePolicy::Reject
        );
    }

    #[test]
    fn test_context_uses_enabled_settings() {
        let mut config = PresenceConfig::default();
        config.json.max_body_size = 64;
        config.params.empty_as_null = false;

        let enabled = PresenceSupport::from_config(config.clone()).unwrap();
        let ctx = enabled.context(Method::GET, Uri::from_static("/"), HeaderMap::new(), Bytes::new());
        assert_eq!(ctx.max_body_size(), 64);
        assert!(!ctx.param_policy().empty_as_null);

        let disabled = PresenceSupport::builder()
            .config(config)
            .json(false)
            .params(false)
            .build()
            .unwrap();
        let ctx = disabled.context(Method::GET, Uri::from_static("/"), HeaderMap::new(), Bytes::new());
        assert_eq!(ctx.max_body_size(), DEFAULT_MAX_BODY_SIZE);
        assert!(ctx.param_policy().empty_as_null);
    }

    #[test]
    fn test_disabled_params_bind_with_default_policy() {
        use presence_core::Presence;
        use presence_extract::{FromRequest, QueryParams};

        let mut config = PresenceConfig::default();
        config.params.multi_value = MultiValuePolicy::Reject;
        let uri = Uri::from_static("/person?name=Karl&name=Fritz");

        let enabled = PresenceSupport::from_config(config.clone()).unwrap();
        let ctx = enabled.context(Method::GET, uri.clone(), HeaderMap::new(), Bytes::new());
        let query = QueryParams::from_request(&ctx).unwrap();
        assert!(query.get::<String>("name").is_err());

        let disabled = PresenceSupport::builder().config(config).params(false).build().unwrap();
        let ctx = disabled.context(Method::GET, uri, HeaderMap::new(), Bytes::new());
        let query = QueryParams::from_request(&ctx).unwrap();
        assert_eq!(query.get::<String>("name").unwrap(), Presence::present("Karl".to_string()));
    }
}
