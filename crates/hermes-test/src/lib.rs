//! # Hermes Test
//!
//! In-memory testing for Hermes servers. Requests are dispatched through
//! [`Server::handle_request`](hermes_server::Server::handle_request), so the
//! full middleware chain and route table run without binding a port.
//!
//! ## Example
//!
//! ```ignore
//! use hermes_core::{handler_fn, Request, Response};
//! use hermes_server::Server;
//! use hermes_test::TestClient;
//!
//! #[tokio::test]
//! async fn test_hello() {
//!     let mut server = Server::new();
//!     server.get("/hello", handler_fn(|_req: &Request, res: &mut Response| {
//!         res.end("world");
//!     }));
//!
//!     let client = TestClient::new(server);
//!     client
//!         .get("/hello")
//!         .send()
//!         .await
//!         .assert_status(http::StatusCode::OK)
//!         .assert_body_eq("world");
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/hermes-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod request;
mod response;

pub use client::{TestClient, TestClientRequest};
pub use error::TestError;
pub use request::{TestRequest, TestRequestBuilder};
pub use response::TestResponse;
