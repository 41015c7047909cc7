//! Core middleware trait and continuation types.
//!
//! This module defines the [`Middleware`] trait every chain entry implements,
//! the one-shot [`Next`] continuation, and the [`Flow`] token a middleware
//! returns to tell the dispatcher whether to continue.
//!
//! # Control Flow
//!
//! Control is forward-only. A middleware observes or mutates the exchange,
//! then either:
//!
//! - calls [`Next::proceed`] and returns the resulting [`Flow`], so the next
//!   middleware (or the route table) runs, or
//! - finalizes the response itself and returns [`Flow::halt`], so nothing
//!   further runs.
//!
//! [`Next`] is consumed by value, so a middleware cannot proceed twice. The
//! only way to obtain a proceeding [`Flow`] is through [`Next`].
//!
//! # Example
//!
//! ```
//! use hermes_core::{BoxFuture, Request, Response};
//! use hermes_middleware::{Flow, Middleware, Next};
//!
//! struct Marker;
//!
//! impl Middleware for Marker {
//!     fn name(&self) -> &str {
//!         "marker"
//!     }
//!
//!     fn call<'a>(
//!         &'a self,
//!         _request: &'a mut Request,
//!         response: &'a mut Response,
//!         next: Next,
//!     ) -> BoxFuture<'a, Flow> {
//!         Box::pin(async move {
//!             if response.set_header("x-marker", "1").is_err() {
//!                 return Flow::halt();
//!             }
//!             next.proceed()
//!         })
//!     }
//! }
//! ```

use hermes_core::{BoxFuture, Request, Response};

/// The core middleware trait.
///
/// Middleware runs in registration order before route dispatch. It receives
/// the request view, the response sink, and a [`Next`] continuation bound to
/// the following chain position.
///
/// # Invariants
///
/// - Returning the [`Flow`] from `next.proceed()` continues the chain
/// - Returning [`Flow::halt`] stops the chain; the middleware is then
///   responsible for the response
/// - There is no code path after downstream completes
pub trait Middleware: Send + Sync + 'static {
    /// Returns a diagnostic name for logs.
    fn name(&self) -> &str;

    /// Processes one exchange.
    fn call<'a>(
        &'a self,
        request: &'a mut Request,
        response: &'a mut Response,
        next: Next,
    ) -> BoxFuture<'a, Flow>;
}

/// One-shot continuation to the next chain position.
///
/// Created by the chain dispatcher for every invocation. Dropping it without
/// calling [`Next::proceed`] has no effect on its own; what matters is the
/// [`Flow`] the middleware returns.
#[derive(Debug)]
#[must_use = "call `proceed()` to continue the chain, or return `Flow::halt()`"]
pub struct Next {
    position: usize,
}

impl Next {
    pub(crate) const fn new(position: usize) -> Self {
        Self { position }
    }

    /// Returns the chain position this continuation leads to.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Consumes the continuation and yields a proceeding [`Flow`].
    pub const fn proceed(self) -> Flow {
        Flow {
            control: Control::Proceed,
        }
    }
}

/// The decision a middleware hands back to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct Flow {
    control: Control,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Proceed,
    Halt,
}

impl Flow {
    /// Stops the chain; no later middleware or handler runs.
    pub const fn halt() -> Self {
        Self {
            control: Control::Halt,
        }
    }

    /// Returns `true` if the chain should continue.
    #[must_use]
    pub const fn is_proceed(self) -> bool {
        matches!(self.control, Control::Proceed)
    }

    /// Returns `true` if the chain should stop.
    #[must_use]
    pub const fn is_halt(self) -> bool {
        matches!(self.control, Control::Halt)
    }
}

/// A middleware backed by a synchronous closure.
///
/// # Example
///
/// ```
/// use hermes_core::{Request, Response};
/// use hermes_middleware::{FnMiddleware, Middleware, Next};
///
/// let logger = FnMiddleware::new("logger", |req: &mut Request, _res: &mut Response, next: Next| {
///     println!("{:?} {:?}", req.method(), req.url());
///     next.proceed()
/// });
/// assert_eq!(logger.name(), "logger");
/// ```
#[derive(Clone)]
pub struct FnMiddleware<F> {
    name: &'static str,
    func: F,
}

impl<F> FnMiddleware<F> {
    /// Creates a named function-based middleware.
    pub const fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

impl<F> Middleware for FnMiddleware<F>
where
    F: Fn(&mut Request, &mut Response, Next) -> Flow + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        self.name
    }

    fn call<'a>(
        &'a self,
        request: &'a mut Request,
        response: &'a mut Response,
        next: Next,
    ) -> BoxFuture<'a, Flow> {
        let flow = (self.func)(request, response, next);
        Box::pin(std::future::ready(flow))
    }
}

/// Wraps a synchronous closure as an unnamed [`Middleware`].
pub fn middleware_fn<F>(func: F) -> FnMiddleware<F>
where
    F: Fn(&mut Request, &mut Response, Next) -> Flow + Send + Sync + 'static,
{
    FnMiddleware::new("anonymous", func)
}

/// A middleware backed by a closure returning a boxed future.
///
/// Created by [`async_middleware`].
#[derive(Clone)]
pub struct AsyncFnMiddleware<F> {
    name: &'static str,
    func: F,
}

impl<F> AsyncFnMiddleware<F> {
    /// Replaces the diagnostic name.
    #[must_use]
    pub const fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
}

impl<F> Middleware for AsyncFnMiddleware<F>
where
    F: for<'a> Fn(&'a mut Request, &'a mut Response, Next) -> BoxFuture<'a, Flow>
        + Send
        + Sync
        + 'static,
{
    fn name(&self) -> &str {
        self.name
    }

    fn call<'a>(
        &'a self,
        request: &'a mut Request,
        response: &'a mut Response,
        next: Next,
    ) -> BoxFuture<'a, Flow> {
        (self.func)(request, response, next)
    }
}

/// Wraps an asynchronous closure as a [`Middleware`].
///
/// The chain resumes at the following position once the returned future
/// completes, however many times it suspends.
pub fn async_middleware<F>(func: F) -> AsyncFnMiddleware<F>
where
    F: for<'a> Fn(&'a mut Request, &'a mut Response, Next) -> BoxFuture<'a, Flow>
        + Send
        + Sync
        + 'static,
{
    AsyncFnMiddleware {
        name: "anonymous",
        func,
    }
}
