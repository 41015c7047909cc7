//! # Hermes Server
//!
//! HTTP/1.1 server for the Hermes framework.
//!
//! This crate ties the pieces together:
//!
//! - [`Server`]: registration facade over a route table and a middleware chain
//! - [`transport`]: hyper connection handling behind the [`ExchangeService`] seam
//! - [`ShutdownSignal`] and [`ConnectionTracker`]: graceful shutdown
//! - [`ServerConfig`]: bind address, keep-alive and shutdown timeout
//!
//! ## Example
//!
//! ```rust,ignore
//! use hermes_core::{handler_fn, Request, Response};
//! use hermes_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), hermes_server::ServerError> {
//!     let mut server = Server::new();
//!     server.get("/", handler_fn(|_req: &Request, res: &mut Response| {
//!         res.end("Hello");
//!     }));
//!     server.listen(3000).await
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/hermes-server/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod server;
mod shutdown;
pub mod transport;

pub use config::{ServerConfig, ServerConfigBuilder, DEFAULT_HTTP_ADDR, DEFAULT_SHUTDOWN_TIMEOUT_SECS};
pub use error::{ServerError, ServerResult};
pub use server::Server;
pub use shutdown::{ConnectionToken, ConnectionTracker, ShutdownSignal};
pub use transport::ExchangeService;
