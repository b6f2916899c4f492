//! Buffered request plus the binding settings that apply to it.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::{HeaderMap, Method, Request, Uri};

use crate::ParamPolicy;

/// Body limit used when none is configured, 1 MiB.
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// A fully buffered request as seen by extractors.
///
/// Besides the request itself the context carries the flat-parameter
/// [`ParamPolicy`] and the body size limit, so extractors need no other
/// configuration.
///
/// # Example
///
/// ```rust
/// use presence_extract::ExtractionContext;
/// use http::Request;
/// use bytes::Bytes;
///
/// let request = Request::get("/person?name=Karl").body(Bytes::new()).unwrap();
/// let ctx = ExtractionContext::from_request(request);
///
/// assert_eq!(ctx.path(), "/person");
/// assert_eq!(ctx.query_string(), Some("name=Karl"));
/// ```
#[derive(Debug)]
pub struct ExtractionContext {
    request: Request<Bytes>,
    param_policy: ParamPolicy,
    max_body_size: usize,
}

impl Default for ExtractionContext {
    fn default() -> Self {
        Self::from_request(Request::new(Bytes::new()))
    }
}

impl ExtractionContext {
    /// Assembles a context from request parts.
    #[must_use]
    pub fn new(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Self {
        let mut request = Request::new(body);
        *request.method_mut() = method;
        *request.uri_mut() = uri;
        *request.headers_mut() = headers;
        Self::from_request(request)
    }

    /// Wraps a buffered request using the default policy and body limit.
    #[must_use]
    pub fn from_request(request: Request<Bytes>) -> Self {
        Self {
            request,
            param_policy: ParamPolicy::default(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }

    /// Uses `policy` for query and form parameters.
    #[must_use]
    pub fn with_param_policy(mut self, policy: ParamPolicy) -> Self {
        self.param_policy = policy;
        self
    }

    /// Uses `limit` as the maximum accepted body size.
    #[must_use]
    pub fn with_max_body_size(mut self, limit: usize) -> Self {
        self.max_body_size = limit;
        self
    }

    /// Request method.
    #[must_use]
    pub fn method(&self) -> &Method {
        self.request.method()
    }

    /// Request URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        self.request.uri()
    }

    /// URI path.
    #[must_use]
    pub fn path(&self) -> &str {
        self.request.uri().path()
    }

    /// Raw query string, without the leading `?`.
    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.request.uri().query()
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        self.request.headers()
    }

    /// A header as text; `None` if missing or not visible ASCII.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.request.headers().get(name)?.to_str().ok()
    }

    /// The `Content-Type` header.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.request.headers().get(CONTENT_TYPE)?.to_str().ok()
    }

    /// Buffered body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        self.request.body()
    }

    /// Whether the body is empty.
    #[must_use]
    pub fn is_body_empty(&self) -> bool {
        self.request.body().is_empty()
    }

    /// Consumes the context, returning the body.
    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.request.into_body()
    }

    /// Consumes the context, returning the request.
    #[must_use]
    pub fn into_request(self) -> Request<Bytes> {
        self.request
    }

    /// Policy for query and form parameters.
    #[must_use]
    pub fn param_policy(&self) -> &ParamPolicy {
        &self.param_policy
    }

    /// Maximum accepted body size in bytes.
    #[must_use]
    pub fn max_body_size(&self) -> usize {
        self.max_body_size
    }
}

/// Step-by-step construction of an [`ExtractionContext`], mostly for tests.
///
/// Starts from `GET /` with no headers and an empty body.
#[derive(Debug, Default)]
pub struct ExtractionContextBuilder {
    ctx: ExtractionContext,
}

impl ExtractionContextBuilder {
    /// Starts from `GET /`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        *self.ctx.request.method_mut() = method;
        self
    }

    /// Sets the URI.
    #[must_use]
    pub fn uri(mut self, uri: Uri) -> Self {
        *self.ctx.request.uri_mut() = uri;
        self
    }

    /// Replaces all headers.
    #[must_use]
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        *self.ctx.request.headers_mut() = headers;
        self
    }

    /// Adds one header. Invalid names or values are skipped.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            self.ctx.request.headers_mut().append(name, value);
        }
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        *self.ctx.request.body_mut() = body.into();
        self
    }

    /// Sets the parameter policy.
    #[must_use]
    pub fn param_policy(mut self, policy: ParamPolicy) -> Self {
        self.ctx.param_policy = policy;
        self
    }

    /// Sets the body limit.
    #[must_use]
    pub fn max_body_size(mut self, limit: usize) -> Self {
        self.ctx.max_body_size = limit;
        self
    }

    /// Finishes the context.
    #[must_use]
    pub fn build(self) -> ExtractionContext {
        self.ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MultiValuePolicy;

    #[test]
    fn test_parts_are_exposed() {
        let mut headers = HeaderMap::new();
        headers.insert("x-trace", "t-1".parse().unwrap());

        let ctx = ExtractionContext::new(
            Method::DELETE,
            Uri::from_static("/person/7?hard"),
            headers,
            Bytes::from_static(b"x"),
        );

        assert_eq!(ctx.method(), &Method::DELETE);
        assert_eq!(ctx.path(), "/person/7");
        assert_eq!(ctx.query_string(), Some("hard"));
        assert_eq!(ctx.header("x-trace"), Some("t-1"));
        assert_eq!(ctx.header("x-missing"), None);
        assert_eq!(ctx.into_body(), Bytes::from_static(b"x"));
    }

    #[test]
    fn test_defaults() {
        let ctx = ExtractionContextBuilder::new().build();

        assert_eq!(ctx.method(), &Method::GET);
        assert_eq!(ctx.path(), "/");
        assert!(ctx.is_body_empty());
        assert_eq!(ctx.param_policy(), &ParamPolicy::default());
        assert_eq!(ctx.max_body_size(), DEFAULT_MAX_BODY_SIZE);
    }

    #[test]
    fn test_builder_settings() {
        let policy = ParamPolicy {
            multi_value: MultiValuePolicy::Reject,
            ..ParamPolicy::default()
        };

        let ctx = ExtractionContextBuilder::new()
            .method(Method::PATCH)
            .uri(Uri::from_static("/person/7"))
            .header("Content-Type", "application/json")
            .header("bad header", "ignored")
            .body(r#"{"name": null}"#)
            .param_policy(policy.clone())
            .max_body_size(32)
            .build();

        assert_eq!(ctx.content_type(), Some("application/json"));
        assert_eq!(ctx.headers().len(), 1);
        assert_eq!(ctx.param_policy(), &policy);
        assert_eq!(ctx.max_body_size(), 32);
    }

    #[test]
    fn test_from_request_then_override() {
        let request = Request::post("/form").body(Bytes::new()).unwrap();
        let ctx = ExtractionContext::from_request(request)
            .with_max_body_size(10)
            .with_param_policy(ParamPolicy {
                empty_as_null: false,
                ..ParamPolicy::default()
            });

        assert_eq!(ctx.method(), &Method::POST);
        assert_eq!(ctx.max_body_size(), 10);
        assert!(!ctx.param_policy().empty_as_null);
        assert_eq!(ctx.into_request().uri().path(), "/form");
    }
}
