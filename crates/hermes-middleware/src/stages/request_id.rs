//! Request ID middleware.
//!
//! Assigns every exchange a unique [`RequestId`] for log correlation.
//!
//! ## Request ID Sources
//!
//! 1. **X-Request-ID header**: used when trusted and parseable
//! 2. **Generated UUID v7**: otherwise
//!
//! The ID is stored in the request extensions for handlers and echoed in the
//! `x-request-id` response header.

use hermes_core::{BoxFuture, Request, RequestId, Response};

use crate::middleware::{Flow, Middleware, Next};

/// The header name for request ID propagation.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware that generates or extracts request IDs.
///
/// # Behavior
///
/// 1. Check for `X-Request-ID` header (only when trusted)
/// 2. If present and valid, use it
/// 3. Otherwise generate a new UUID v7
/// 4. Store the ID in the request extensions
/// 5. Set the ID on the response headers and proceed
///
/// # Example
///
/// ```
/// use hermes_middleware::{stages::RequestIdMiddleware, MiddlewareChain};
///
/// let mut chain = MiddlewareChain::new();
/// chain.push(RequestIdMiddleware::new());
/// assert_eq!(chain.names(), vec!["request_id"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestIdMiddleware {
    /// Whether to trust incoming request ID headers.
    trust_incoming: bool,
}

impl RequestIdMiddleware {
    /// Creates a middleware that always generates new IDs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a middleware that trusts incoming `X-Request-ID` headers.
    #[must_use]
    pub fn trust_incoming() -> Self {
        Self { trust_incoming: true }
    }

    fn extract_request_id(&self, request: &Request) -> Option<RequestId> {
        if !self.trust_incoming {
            return None;
        }

        request
            .header_str(REQUEST_ID_HEADER)
            .and_then(RequestId::parse)
    }
}

impl Middleware for RequestIdMiddleware {
    fn name(&self) -> &str {
        "request_id"
    }

    fn call<'a>(
        &'a self,
        request: &'a mut Request,
        response: &'a mut Response,
        next: Next,
    ) -> BoxFuture<'a, Flow> {
        let request_id = self
            .extract_request_id(request)
            .unwrap_or_else(RequestId::new);

        request.extensions_mut().insert(request_id);
        if let Err(error) = response.set_header(REQUEST_ID_HEADER, request_id.to_string()) {
            tracing::warn!(%error, "unable to set request id header");
        }

        Box::pin(std::future::ready(next.proceed()))
    }
}
