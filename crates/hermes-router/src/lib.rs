//! Exact-match route table for Hermes.
//!
//! This crate maps `(method, path)` pairs to handlers and resolves inbound
//! requests against them.
//!
//! # Matching Rules
//!
//! - **Exact**: the request-target must equal the registered path byte for
//!   byte. No normalization, no trailing-slash folding, no query stripping
//!   (`/test?x=1` does not match `/test`). The target is whatever the
//!   transport put in [`Request::url`](hermes_core::Request::url); over hyper
//!   that excludes any `#fragment`.
//! - **Case-sensitive methods**: `GET` and an extension method `get` are
//!   different methods.
//! - **Last registration wins**: registering the same pair twice replaces the
//!   earlier handler.
//!
//! # Example
//!
//! ```rust
//! use hermes_core::{handler_fn, Request, Response};
//! use hermes_router::{RouteOutcome, RouteTable};
//! use http::{Method, StatusCode};
//!
//! let mut table = RouteTable::new();
//! table.add_route(Method::GET, "/hello", handler_fn(|_req: &Request, res: &mut Response| {
//!     res.end("hi");
//! }));
//!
//! let request = Request::new(Method::GET, "/missing");
//! let mut response = Response::new();
//! let outcome = tokio_test::block_on(table.handle(&request, &mut response));
//!
//! assert_eq!(outcome, RouteOutcome::NotFound);
//! assert_eq!(response.status(), StatusCode::NOT_FOUND);
//! assert_eq!(response.body().as_ref(), b"Not Found");
//! ```
//!
//! # Layout
//!
//! ```text
//!   RouteTable
//!     ├── GET  ──┬── "/"        → handler
//!     │          └── "/json"    → handler
//!     └── POST ──── "/items"    → handler
//! ```

#![doc(html_root_url = "https://docs.rs/hermes-router/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod route;
mod table;

pub use route::{Route, RouteOutcome};
pub use table::{RouteTable, BAD_REQUEST_BODY, NOT_FOUND_BODY};
