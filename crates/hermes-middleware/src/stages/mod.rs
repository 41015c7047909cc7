//! Built-in middleware stages.
//!
//! Both stages are optional; register them with
//! [`MiddlewareChain::push`](crate::MiddlewareChain::push) like any other
//! middleware.
//!
//! - [`request_id`] - Generate/propagate request ID
//! - [`logger`] - Log method and url of every request

pub mod logger;
pub mod request_id;

pub use logger::RequestLogger;
pub use request_id::{RequestIdMiddleware, REQUEST_ID_HEADER};
