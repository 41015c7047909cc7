//! Handler trait for route dispatch.
//!
//! A [`Handler`] receives the request view and the response sink of an
//! exchange and is fully responsible for the status, headers, and body it
//! writes. Handlers may complete synchronously or suspend on I/O.
//!
//! # Example
//!
//! ```
//! use hermes_core::{async_handler, handler_fn, Request, Response};
//! use http::StatusCode;
//!
//! let hello = handler_fn(|_req: &Request, res: &mut Response| {
//!     res.set_status(StatusCode::OK);
//!     res.end("Hello World!");
//! });
//!
//! let slow = async_handler(|_req, res| {
//!     Box::pin(async move {
//!         // await some I/O here
//!         res.end("done");
//!     })
//! });
//! # let _ = (hello, slow);
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::Response;

/// A boxed future used at every dynamic dispatch seam.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A type-erased handler stored in the route table.
pub type BoxedHandler = Arc<dyn Handler>;

/// A route handler.
///
/// The route table writes nothing to the response when it invokes a
/// handler; whatever the handler leaves in the sink is what the client
/// receives.
pub trait Handler: Send + Sync + 'static {
    /// Handles one exchange.
    fn call<'a>(&'a self, request: &'a Request, response: &'a mut Response) -> BoxFuture<'a, ()>;
}

/// A handler backed by a synchronous closure.
///
/// Created by [`handler_fn`].
#[derive(Clone)]
pub struct FnHandler<F> {
    func: F,
}

impl<F> Handler for FnHandler<F>
where
    F: Fn(&Request, &mut Response) + Send + Sync + 'static,
{
    fn call<'a>(&'a self, request: &'a Request, response: &'a mut Response) -> BoxFuture<'a, ()> {
        (self.func)(request, response);
        Box::pin(std::future::ready(()))
    }
}

/// Wraps a synchronous closure as a [`Handler`].
pub fn handler_fn<F>(func: F) -> FnHandler<F>
where
    F: Fn(&Request, &mut Response) + Send + Sync + 'static,
{
    FnHandler { func }
}

/// A handler backed by a closure returning a boxed future.
///
/// Created by [`async_handler`].
#[derive(Clone)]
pub struct AsyncFnHandler<F> {
    func: F,
}

impl<F> Handler for AsyncFnHandler<F>
where
    F: for<'a> Fn(&'a Request, &'a mut Response) -> BoxFuture<'a, ()> + Send + Sync + 'static,
{
    fn call<'a>(&'a self, request: &'a Request, response: &'a mut Response) -> BoxFuture<'a, ()> {
        (self.func)(request, response)
    }
}

/// Wraps an asynchronous closure as a [`Handler`].
///
/// The closure borrows the request and response for the lifetime of the
/// returned future, so it can suspend before writing the response.
pub fn async_handler<F>(func: F) -> AsyncFnHandler<F>
where
    F: for<'a> Fn(&'a Request, &'a mut Response) -> BoxFuture<'a, ()> + Send + Sync + 'static,
{
    AsyncFnHandler { func }
}
