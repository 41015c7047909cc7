//! The Hermes server facade.
//!
//! [`Server`] owns one [`RouteTable`] and one [`MiddlewareChain`].
//! Registration takes `&mut self`; listening consumes the server and shares
//! it read-only across connection tasks, so nothing can be registered once
//! it is serving.
//!
//! # Example
//!
//! ```rust,ignore
//! use hermes_core::{handler_fn, Request, Response};
//! use hermes_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), hermes_server::ServerError> {
//!     let mut server = Server::new();
//!     server.get("/", handler_fn(|_req: &Request, res: &mut Response| {
//!         res.end("Hello from Hermes");
//!     }));
//!
//!     server
//!         .listen_with(3000, |addr| println!("listening on {addr}"))
//!         .await
//! }
//! ```

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use hermes_config::HermesConfig;
use hermes_core::{BoxFuture, Exchange, ExchangeState, Handler, Request, Response};
use hermes_middleware::{ChainOutcome, Middleware, MiddlewareChain};
use hermes_router::RouteTable;
use hermes_telemetry::metrics::{record_exchange, InFlightGuard};
use http::Method;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::shutdown::{ConnectionTracker, ShutdownSignal};
use crate::transport::{self, ExchangeService};

/// Outcome label for exchanges ended by middleware.
const HALTED: &str = "halted";

/// Metrics label for requests without a method.
const UNKNOWN_METHOD: &str = "UNKNOWN";

/// A Hermes HTTP server.
///
/// Each instance is independent: two servers never share routes or
/// middleware.
#[derive(Debug, Default)]
pub struct Server {
    config: ServerConfig,
    routes: RouteTable,
    chain: MiddlewareChain,
}

impl Server {
    /// Creates an empty server with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty server with the given configuration.
    #[must_use]
    pub fn with_config(config: ServerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Creates an empty server from a loaded configuration.
    #[must_use]
    pub fn from_config(config: &HermesConfig) -> Self {
        Self::with_config(ServerConfig::from_settings(&config.server))
    }

    /// Returns the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the route table.
    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Returns the middleware chain.
    #[must_use]
    pub fn middleware(&self) -> &MiddlewareChain {
        &self.chain
    }

    /// Appends a middleware to the chain.
    ///
    /// Middleware runs in registration order for every exchange, before
    /// routing.
    pub fn use_middleware<M: Middleware>(&mut self, middleware: M) -> &mut Self {
        self.chain.push(middleware);
        self
    }

    /// Registers a handler for `method` and the exact request-target `path`.
    ///
    /// Registering the same pair again replaces the earlier handler.
    pub fn route(
        &mut self,
        method: Method,
        path: impl Into<String>,
        handler: impl Handler,
    ) -> &mut Self {
        self.routes.add_route(method, path, handler);
        self
    }

    /// Registers a `GET` handler.
    pub fn get(&mut self, path: impl Into<String>, handler: impl Handler) -> &mut Self {
        self.route(Method::GET, path, handler)
    }

    /// Registers a `POST` handler.
    pub fn post(&mut self, path: impl Into<String>, handler: impl Handler) -> &mut Self {
        self.route(Method::POST, path, handler)
    }

    /// Registers a `PUT` handler.
    pub fn put(&mut self, path: impl Into<String>, handler: impl Handler) -> &mut Self {
        self.route(Method::PUT, path, handler)
    }

    /// Registers a `PATCH` handler.
    pub fn patch(&mut self, path: impl Into<String>, handler: impl Handler) -> &mut Self {
        self.route(Method::PATCH, path, handler)
    }

    /// Registers a `DELETE` handler.
    pub fn delete(&mut self, path: impl Into<String>, handler: impl Handler) -> &mut Self {
        self.route(Method::DELETE, path, handler)
    }

    /// Dispatches one exchange and returns the finished response sink.
    ///
    /// Runs the middleware chain from position 0; if every entry proceeds,
    /// the route table handles the request. A halted chain skips routing and
    /// the response is whatever the middleware wrote.
    pub async fn handle_request(&self, request: Request) -> Response {
        let _in_flight = InFlightGuard::new();
        let started = Instant::now();
        let method = request
            .method()
            .map_or_else(|| UNKNOWN_METHOD.to_owned(), ToString::to_string);
        let url = request.url().unwrap_or_default().to_owned();

        let mut exchange = Exchange::new(request);

        let outcome = match self.chain.run(&mut exchange).await {
            ChainOutcome::Exhausted => {
                exchange.set_state(ExchangeState::Routing);
                let (request, response) = exchange.parts_mut();
                self.routes.handle(request, response).await.as_str()
            }
            ChainOutcome::Halted { .. } => HALTED,
        };

        exchange.set_state(ExchangeState::Responded);
        let response = exchange.into_response();

        let elapsed = started.elapsed();
        let status = response.status().as_u16();
        tracing::info!(
            http.method = %method,
            http.url = %url,
            http.status_code = status,
            outcome,
            duration_ms = elapsed.as_secs_f64() * 1000.0,
            "exchange completed"
        );
        record_exchange(&method, status, outcome, elapsed);

        response
    }

    /// Serves on the configured host and `port` until SIGTERM or SIGINT.
    ///
    /// Port 0 picks an ephemeral port.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid or binding fails.
    pub async fn listen(self, port: u16) -> ServerResult<()> {
        self.listen_with(port, |_| {}).await
    }

    /// Like [`listen`](Self::listen), calling `on_ready` with the bound
    /// address once the listener is up.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid or binding fails.
    pub async fn listen_with<F>(self, port: u16, on_ready: F) -> ServerResult<()>
    where
        F: FnOnce(SocketAddr) + Send,
    {
        let shutdown = ShutdownSignal::with_os_signals();
        self.listen_until(port, shutdown, on_ready).await
    }

    /// Serves on the configured host and `port` until `shutdown` triggers.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid or binding fails.
    pub async fn listen_until<F>(
        self,
        port: u16,
        shutdown: ShutdownSignal,
        on_ready: F,
    ) -> ServerResult<()>
    where
        F: FnOnce(SocketAddr) + Send,
    {
        let addr = self.config.addr_with_port(port)?;
        self.serve_on(addr, shutdown, on_ready).await
    }

    /// Serves on the configured `http_addr` until SIGTERM or SIGINT.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid or binding fails.
    pub async fn run(self) -> ServerResult<()> {
        let shutdown = ShutdownSignal::with_os_signals();
        self.run_with_shutdown(shutdown).await
    }

    /// Serves on the configured `http_addr` until `shutdown` triggers.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid or binding fails.
    pub async fn run_with_shutdown(self, shutdown: ShutdownSignal) -> ServerResult<()> {
        let addr = self.config.socket_addr()?;
        self.serve_on(addr, shutdown, |_| {}).await
    }

    async fn serve_on<F>(
        self,
        addr: SocketAddr,
        shutdown: ShutdownSignal,
        on_ready: F,
    ) -> ServerResult<()>
    where
        F: FnOnce(SocketAddr) + Send,
    {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        let local_addr = listener.local_addr()?;

        tracing::info!(
            %local_addr,
            routes = self.routes.len(),
            middleware = self.chain.len(),
            "server listening"
        );
        on_ready(local_addr);

        let shutdown_timeout = self.config.shutdown_timeout();
        let keep_alive = self.config.keep_alive();
        let tracker = ConnectionTracker::new();

        transport::serve(listener, Arc::new(self), shutdown, tracker.clone(), keep_alive).await;

        tracing::info!(
            active = tracker.active_connections(),
            timeout = ?shutdown_timeout,
            "waiting for open connections"
        );

        tokio::select! {
            () = tracker.wait_for_shutdown() => {
                tracing::info!("all connections closed");
            }
            () = tokio::time::sleep(shutdown_timeout) => {
                tracing::warn!(
                    active = tracker.active_connections(),
                    "shutdown timeout reached with connections still open"
                );
            }
        }

        tracing::info!("server stopped");
        Ok(())
    }
}

impl ExchangeService for Server {
    fn on_exchange(&self, request: Request) -> BoxFuture<'_, Response> {
        Box::pin(self.handle_request(request))
    }
}
