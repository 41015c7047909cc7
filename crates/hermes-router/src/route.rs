//! Registered routes and dispatch outcomes.

use std::fmt;

use hermes_core::{BoxedHandler, Handler};
use http::Method;

/// A registered `(method, path, handler)` association.
///
/// Routes are created at registration time and never mutated.
#[derive(Clone)]
pub struct Route {
    method: Method,
    path: String,
    handler: BoxedHandler,
}

impl Route {
    pub(crate) fn new(method: Method, path: String, handler: BoxedHandler) -> Self {
        Self {
            method,
            path,
            handler,
        }
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the exact path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the handler.
    #[must_use]
    pub fn handler(&self) -> &dyn Handler {
        self.handler.as_ref()
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// What the route table did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteOutcome {
    /// A handler was found and invoked.
    Handled,
    /// Method or request-target was missing; `400 Bad Request` was written.
    BadRequest,
    /// No route matched; `404 Not Found` was written.
    NotFound,
}

impl RouteOutcome {
    /// Returns a stable label for logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Handled => "handled",
            Self::BadRequest => "bad_request",
            Self::NotFound => "not_found",
        }
    }
}

impl fmt::Display for RouteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
