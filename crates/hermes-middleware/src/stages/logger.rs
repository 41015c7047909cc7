//! Request logging middleware.
//!
//! Emits one `tracing` event per exchange with the method and raw url, then
//! proceeds. Absent values are logged as `-`.

use hermes_core::{BoxFuture, Request, RequestId, Response};
use tracing::Level;

use crate::middleware::{Flow, Middleware, Next};

/// Middleware that logs every inbound request.
///
/// If a [`RequestId`] was stored earlier in the chain it is included in the
/// event.
#[derive(Debug, Clone)]
pub struct RequestLogger {
    level: Level,
}

impl Default for RequestLogger {
    fn default() -> Self {
        Self { level: Level::INFO }
    }
}

impl RequestLogger {
    /// Creates a logger emitting at `INFO`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the level events are emitted at.
    #[must_use]
    pub const fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Returns the configured level.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }
}

impl Middleware for RequestLogger {
    fn name(&self) -> &str {
        "request_logger"
    }

    fn call<'a>(
        &'a self,
        request: &'a mut Request,
        _response: &'a mut Response,
        next: Next,
    ) -> BoxFuture<'a, Flow> {
        let method = request.method().map_or("-", http::Method::as_str);
        let url = request.url().unwrap_or("-");
        let request_id = request
            .extensions()
            .get::<RequestId>()
            .map(ToString::to_string)
            .unwrap_or_default();

        // tracing macros need a constant level
        match self.level {
            Level::ERROR => tracing::error!(http.method = method, http.url = url, %request_id, "request"),
            Level::WARN => tracing::warn!(http.method = method, http.url = url, %request_id, "request"),
            Level::INFO => tracing::info!(http.method = method, http.url = url, %request_id, "request"),
            Level::DEBUG => tracing::debug!(http.method = method, http.url = url, %request_id, "request"),
            _ => tracing::trace!(http.method = method, http.url = url, %request_id, "request"),
        }

        Box::pin(std::future::ready(next.proceed()))
    }
}
