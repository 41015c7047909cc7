//! # Hermes Core
//!
//! Core types and traits for the Hermes HTTP framework.
//!
//! This crate provides the foundational types used throughout Hermes:
//!
//! - [`Request`] - Inbound request view (method, raw request-target, headers, body)
//! - [`Response`] - Writable response sink filled in by middleware and handlers
//! - [`Exchange`] - One request/response pair and its dispatch state
//! - [`Handler`] - Core route handler trait
//! - [`ExchangeError`] - Errors raised while writing a response

#![doc(html_root_url = "https://docs.rs/hermes-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod exchange;
mod handler;
mod request;
mod response;

pub use error::{ExchangeError, ExchangeResult};
pub use exchange::{Exchange, ExchangeState};
pub use handler::{async_handler, handler_fn, AsyncFnHandler, BoxFuture, BoxedHandler, FnHandler, Handler};
pub use request::{Request, RequestId};
pub use response::{HttpResponse, Response};
