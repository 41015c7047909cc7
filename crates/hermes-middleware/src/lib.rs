//! # Hermes Middleware
//!
//! Linear middleware chain for the Hermes HTTP framework.
//!
//! Middleware runs before route dispatch, strictly in registration order.
//! Each entry can observe and mutate the request and response, then either
//! pass control onward or stop the chain.
//!
//! ## Chain
//!
//! ```text
//! Request → mw[0] → mw[1] → … → mw[n-1] → RouteTable
//!             │        │
//!             └─ halt ─┴──────────────────▶ Response (as written)
//! ```
//!
//! ## Key Features
//!
//! - **Registration Order**: no reordering, skipping, or deduplication
//! - **One-shot Continuation**: [`Next`] is consumed to proceed
//! - **Sync or Async**: closures via [`middleware_fn`] / [`async_middleware`]
//!   or full [`Middleware`] impls
//! - **Bounded Stack**: dispatch is an index loop
//!
//! ## Example
//!
//! ```
//! use hermes_core::{Exchange, Request, Response};
//! use hermes_middleware::{middleware_fn, Flow, MiddlewareChain, Next};
//! use http::{Method, StatusCode};
//!
//! let mut chain = MiddlewareChain::new();
//! chain.push(middleware_fn(|req: &mut Request, res: &mut Response, next: Next| {
//!     if req.header_str("authorization").is_none() {
//!         res.set_status(StatusCode::UNAUTHORIZED);
//!         res.end("Unauthorized");
//!         return Flow::halt();
//!     }
//!     next.proceed()
//! }));
//!
//! let mut exchange = Exchange::new(Request::new(Method::GET, "/"));
//! let outcome = tokio_test::block_on(chain.run(&mut exchange));
//!
//! assert!(!outcome.is_exhausted());
//! assert_eq!(exchange.response().status(), StatusCode::UNAUTHORIZED);
//! ```

#![doc(html_root_url = "https://docs.rs/hermes-middleware/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chain;
pub mod middleware;
pub mod stages;

pub use chain::{BoxedMiddleware, ChainOutcome, MiddlewareChain};
pub use middleware::{
    async_middleware, middleware_fn, AsyncFnMiddleware, Flow, FnMiddleware, Middleware, Next,
};
