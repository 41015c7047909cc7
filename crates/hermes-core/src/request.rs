//! Inbound request view.
//!
//! The [`Request`] is the read side of an [`Exchange`](crate::Exchange). The
//! transport fills it from the parsed HTTP request; middleware may mutate it
//! before it reaches the route table.

use std::net::SocketAddr;

use bytes::Bytes;
use http::{Extensions, HeaderMap, HeaderName, HeaderValue, Method};
use uuid::Uuid;

/// Inbound request view for one exchange.
///
/// `method` and `url` are optional because a request whose metadata was
/// stripped (by a transport or a middleware) must still flow through the
/// chain and be rejected by the route table with `400 Bad Request`.
///
/// The `url` is the request-target as the transport reports it, including
/// any query string. Hermes never normalizes it. The hyper transport parses
/// the target into a URI first, so a `#fragment` sent by the client is not
/// part of it.
///
/// # Example
///
/// ```
/// use hermes_core::Request;
/// use http::Method;
///
/// let request = Request::new(Method::GET, "/users?page=2");
/// assert_eq!(request.method(), Some(&Method::GET));
/// assert_eq!(request.url(), Some("/users?page=2"));
/// ```
#[derive(Debug, Default)]
pub struct Request {
    method: Option<Method>,
    url: Option<String>,
    headers: HeaderMap,
    body: Bytes,
    remote_addr: Option<SocketAddr>,
    extensions: Extensions,
}

impl Request {
    /// Creates a request with the given method and request-target.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method: Some(method),
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Builds a request view from an `http::Request` with a collected body.
    ///
    /// The request-target is the URI's string form: path and query for
    /// origin-form targets. Anything the URI parser discards (a fragment) is
    /// gone.
    #[must_use]
    pub fn from_http(request: http::Request<Bytes>) -> Self {
        let (parts, body) = request.into_parts();
        Self {
            method: Some(parts.method),
            url: Some(parts.uri.to_string()),
            headers: parts.headers,
            body,
            remote_addr: None,
            extensions: parts.extensions,
        }
    }

    /// Adds a header, replacing any existing value.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets the raw request body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the peer address of the connection.
    #[must_use]
    pub fn with_remote_addr(mut self, addr: SocketAddr) -> Self {
        self.remote_addr = Some(addr);
        self
    }

    /// Returns the request method, if present.
    #[must_use]
    pub fn method(&self) -> Option<&Method> {
        self.method.as_ref()
    }

    /// Returns the raw request-target, if present and non-empty.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }

    /// Replaces the request method.
    pub fn set_method(&mut self, method: Method) {
        self.method = Some(method);
    }

    /// Removes the request method.
    pub fn clear_method(&mut self) {
        self.method = None;
    }

    /// Replaces the request-target.
    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = Some(url.into());
    }

    /// Removes the request-target.
    pub fn clear_url(&mut self) {
        self.url = None;
    }

    /// Returns the request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the request headers for modification.
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Returns a header value as a string, if present and valid UTF-8.
    #[must_use]
    pub fn header_str(&self, name: impl http::header::AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the raw request body.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the peer address, when the transport knows it.
    #[must_use]
    pub fn remote_addr(&self) -> Option<SocketAddr> {
        self.remote_addr
    }

    /// Returns the typed extension storage.
    ///
    /// Middleware can stash values here for handlers further down the chain.
    #[must_use]
    pub fn extensions(&self) -> &Extensions {
        &self.extensions
    }

    /// Returns the typed extension storage for modification.
    pub fn extensions_mut(&mut self) -> &mut Extensions {
        &mut self.extensions
    }
}

/// A unique identifier for each request, using UUID v7.
///
/// UUID v7 is time-ordered, which keeps request IDs sortable in logs.
///
/// # Example
///
/// ```
/// use hermes_core::RequestId;
///
/// let id = RequestId::new();
/// assert_eq!(RequestId::parse(&id.to_string()), Some(id));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Creates a new unique request ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parses a request ID from its textual form.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value).ok().map(Self)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
