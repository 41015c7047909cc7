//! Ordered middleware chain.
//!
//! The chain runs its entries in registration order. Dispatch is an index
//! loop rather than nested callbacks: each entry receives a [`Next`] bound to
//! the following position and hands back a [`Flow`]. The stack depth stays
//! constant however long the chain is, and an entry that suspends resumes the
//! loop at the right position when its future completes.
//!
//! ```text
//! run(exchange)
//!   i = 0 ──▶ entry[0].call(req, res, Next(1)) ──proceed──▶ i = 1 ──▶ …
//!                                   │
//!                                   └──halt──▶ ChainOutcome::Halted { index: 0, .. }
//!   i = N ──▶ ChainOutcome::Exhausted
//! ```

use std::fmt;
use std::sync::Arc;

use hermes_core::{Exchange, ExchangeState};

use crate::middleware::{Middleware, Next};

/// A type-erased middleware that can be stored in the chain.
pub type BoxedMiddleware = Arc<dyn Middleware>;

/// How a chain run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainOutcome {
    /// Every entry proceeded; route dispatch should follow.
    Exhausted,
    /// An entry halted the chain.
    Halted {
        /// Position of the halting entry.
        index: usize,
        /// Diagnostic name of the halting entry.
        name: String,
    },
}

impl ChainOutcome {
    /// Returns `true` if route dispatch should follow.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

/// Middleware in invocation order.
///
/// # Example
///
/// ```
/// use hermes_core::{Exchange, Request, Response};
/// use hermes_middleware::{middleware_fn, ChainOutcome, MiddlewareChain, Next};
/// use http::Method;
///
/// let mut chain = MiddlewareChain::new();
/// chain.push(middleware_fn(|_req: &mut Request, res: &mut Response, next: Next| {
///     res.set_header("x-one", "1").unwrap();
///     next.proceed()
/// }));
///
/// let mut exchange = Exchange::new(Request::new(Method::GET, "/"));
/// let outcome = tokio_test::block_on(chain.run(&mut exchange));
///
/// assert_eq!(outcome, ChainOutcome::Exhausted);
/// assert_eq!(exchange.response().header_str("x-one"), Some("1"));
/// ```
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    entries: Vec<BoxedMiddleware>,
}

impl MiddlewareChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a middleware. Invocation order is append order.
    pub fn push<M: Middleware>(&mut self, middleware: M) {
        self.entries.push(Arc::new(middleware));
    }

    /// Appends an already shared middleware.
    pub fn push_shared(&mut self, middleware: BoxedMiddleware) {
        self.entries.push(middleware);
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the chain has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns entry names in invocation order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|m| m.name()).collect()
    }

    /// Runs the chain against one exchange.
    ///
    /// The exchange enters [`ExchangeState::InMiddleware`] before every
    /// entry. On halt the exchange is left in that state for the caller to
    /// finalize.
    pub async fn run(&self, exchange: &mut Exchange) -> ChainOutcome {
        for (index, middleware) in self.entries.iter().enumerate() {
            exchange.set_state(ExchangeState::InMiddleware(index));

            let (request, response) = exchange.parts_mut();
            let flow = middleware.call(request, response, Next::new(index + 1)).await;

            if flow.is_halt() {
                tracing::debug!(index, middleware = middleware.name(), "middleware halted chain");
                return ChainOutcome::Halted {
                    index,
                    name: middleware.name().to_owned(),
                };
            }
        }

        ChainOutcome::Exhausted
    }
}

impl fmt::Debug for MiddlewareChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareChain")
            .field("entries", &self.names())
            .finish()
    }
}
