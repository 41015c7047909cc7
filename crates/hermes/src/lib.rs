//! # Hermes
//!
//! **A minimal async HTTP framework**
//!
//! Hermes dispatches each request through an ordered middleware chain and
//! then an exact-match route table:
//!
//! - **Exact routing**: one handler per `(method, request-target)` pair, no
//!   patterns, no query parsing
//! - **Forward-only middleware**: each entry either proceeds or ends the
//!   exchange
//! - **Fixed fallbacks**: `400 Bad Request` when method or url is missing,
//!   `404 Not Found` when nothing matches
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hermes::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ServerError> {
//!     let mut server = Server::new();
//!     server
//!         .use_middleware(RequestLogger::new())
//!         .get("/", handler_fn(|_req: &Request, res: &mut Response| {
//!             res.end("Hello from Hermes");
//!         }));
//!
//!     server.listen(3000).await
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! transport ─► Server::handle_request
//!                 │
//!                 ├─► MiddlewareChain   (position 0..n, halt or proceed)
//!                 │
//!                 └─► RouteTable        (handler │ 400 │ 404)
//! ```
//!
//! ## Crate Structure
//!
//! | Crate | Contents |
//! |-------|----------|
//! | [`core`] | `Request`, `Response`, `Exchange`, `Handler` |
//! | [`router`] | `RouteTable`, `Route` |
//! | [`middleware`] | `Middleware`, `Next`, `Flow`, `MiddlewareChain`, built-in stages |
//! | [`server`] | `Server`, transport, graceful shutdown |
//! | [`config`] | layered TOML/JSON/env configuration |
//! | [`telemetry`] | logging and Prometheus metrics |

#![doc(html_root_url = "https://docs.rs/hermes/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub use hermes_config as config;
pub use hermes_core as core;
pub use hermes_middleware as middleware;
pub use hermes_router as router;
pub use hermes_server as server;
pub use hermes_telemetry as telemetry;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use hermes::prelude::*;
/// ```
pub mod prelude {
    pub use hermes_config::{ConfigLoader, HermesConfig};
    pub use hermes_core::{
        async_handler, handler_fn, BoxFuture, Handler, Request, RequestId, Response,
    };
    pub use hermes_middleware::stages::{RequestIdMiddleware, RequestLogger};
    pub use hermes_middleware::{async_middleware, middleware_fn, Flow, Middleware, Next};
    pub use hermes_server::{Server, ServerConfig, ServerError, ShutdownSignal};
    pub use hermes_telemetry::{init_telemetry, TelemetryConfig};
}
