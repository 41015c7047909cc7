//! Request/response exchange.
//!
//! An [`Exchange`] pairs one inbound [`Request`] with its [`Response`] sink and
//! records where dispatch currently is. It is owned by the dispatch path for
//! the lifetime of a single request and never shared between requests.
//!
//! # State Machine
//!
//! ```text
//! Pending ──▶ InMiddleware(0) ──▶ … ──▶ InMiddleware(n-1) ──▶ Routing ──▶ Responded
//!                    │                          │
//!                    └──────── halted ──────────┴──────────────────────▶ Responded
//! ```

use crate::request::Request;
use crate::response::{HttpResponse, Response};

/// Dispatch position of an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExchangeState {
    /// Received, dispatch not started.
    Pending,
    /// Running the middleware at this chain position.
    InMiddleware(usize),
    /// Middleware exhausted, resolving a route.
    Routing,
    /// Dispatch finished. Terminal.
    Responded,
}

/// One HTTP interaction: the request view, the response sink, and the
/// current dispatch state.
///
/// # Example
///
/// ```
/// use hermes_core::{Exchange, ExchangeState, Request};
/// use http::Method;
///
/// let mut exchange = Exchange::new(Request::new(Method::GET, "/"));
/// assert_eq!(exchange.state(), ExchangeState::Pending);
///
/// let (_request, response) = exchange.parts_mut();
/// response.end("hello");
/// assert!(exchange.response().is_finished());
/// ```
#[derive(Debug)]
pub struct Exchange {
    request: Request,
    response: Response,
    state: ExchangeState,
}

impl Exchange {
    /// Creates a pending exchange with an open response sink.
    #[must_use]
    pub fn new(request: Request) -> Self {
        Self {
            request,
            response: Response::new(),
            state: ExchangeState::Pending,
        }
    }

    /// Returns the request view.
    #[must_use]
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Returns the request view for modification.
    pub fn request_mut(&mut self) -> &mut Request {
        &mut self.request
    }

    /// Returns the response sink.
    #[must_use]
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// Returns the response sink for modification.
    pub fn response_mut(&mut self) -> &mut Response {
        &mut self.response
    }

    /// Borrows the request and response at the same time.
    pub fn parts_mut(&mut self) -> (&mut Request, &mut Response) {
        (&mut self.request, &mut self.response)
    }

    /// Returns the current dispatch state.
    #[must_use]
    pub fn state(&self) -> ExchangeState {
        self.state
    }

    /// Moves the exchange to a new dispatch state.
    ///
    /// Called by the dispatcher; `Responded` is terminal and later
    /// transitions are ignored.
    pub fn set_state(&mut self, state: ExchangeState) {
        if self.state == ExchangeState::Responded {
            tracing::debug!(?state, "exchange already responded, transition ignored");
            return;
        }
        self.state = state;
    }

    /// Splits the exchange into its request and response.
    #[must_use]
    pub fn into_parts(self) -> (Request, Response) {
        (self.request, self.response)
    }

    /// Consumes the exchange and returns the response sink.
    #[must_use]
    pub fn into_response(self) -> Response {
        self.response
    }

    /// Consumes the exchange and converts the response for the transport.
    #[must_use]
    pub fn into_http_response(self) -> HttpResponse {
        self.response.into_http()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{Method, StatusCode};

    #[test]
    fn test_new_exchange_is_pending() {
        let exchange = Exchange::new(Request::new(Method::GET, "/"));
        assert_eq!(exchange.state(), ExchangeState::Pending);
        assert_eq!(exchange.response(), &Response::new());
    }

    #[test]
    fn test_state_transitions() {
        let mut exchange = Exchange::new(Request::new(Method::GET, "/"));
        exchange.set_state(ExchangeState::InMiddleware(0));
        exchange.set_state(ExchangeState::InMiddleware(1));
        exchange.set_state(ExchangeState::Routing);
        assert_eq!(exchange.state(), ExchangeState::Routing);

        exchange.set_state(ExchangeState::Responded);
        exchange.set_state(ExchangeState::Routing);
        assert_eq!(exchange.state(), ExchangeState::Responded);
    }

    #[test]
    fn test_parts_mut_writes_through() {
        let mut exchange = Exchange::new(Request::new(Method::GET, "/old"));
        {
            let (request, response) = exchange.parts_mut();
            request.set_url("/new");
            response.set_status(StatusCode::ACCEPTED);
        }
        assert_eq!(exchange.request().url(), Some("/new"));
        assert_eq!(exchange.response().status(), StatusCode::ACCEPTED);
    }

    #[test]
    fn test_into_http_response() {
        let mut exchange = Exchange::new(Request::new(Method::GET, "/"));
        exchange.response_mut().set_status(StatusCode::CREATED);
        exchange.response_mut().end("ok");

        let response = exchange.into_http_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
