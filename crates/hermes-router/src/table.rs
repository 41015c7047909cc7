//! Route table keyed by method, then by exact path.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use hermes_core::{Handler, Request, Response};
use http::{Method, StatusCode};

use crate::route::{Route, RouteOutcome};

/// Body written when a request has no method or request-target.
pub const BAD_REQUEST_BODY: &str = "Bad Request";

/// Body written when no route matches.
pub const NOT_FOUND_BODY: &str = "Not Found";

/// Mapping from `(method, path)` to a handler.
///
/// Lookups are two hash probes: first the method, then the exact path.
/// There are no patterns, wildcards, or parameters.
#[derive(Default)]
pub struct RouteTable {
    routes: HashMap<Method, HashMap<String, Route>>,
}

impl RouteTable {
    /// Creates an empty route table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for a method and exact path.
    ///
    /// Registering the same pair again replaces the earlier handler. An empty
    /// path is accepted but can never match, since inbound requests with an
    /// empty request-target are rejected before lookup.
    pub fn add_route(&mut self, method: Method, path: impl Into<String>, handler: impl Handler) {
        let path = path.into();
        let route = Route::new(method.clone(), path.clone(), Arc::new(handler));

        let by_path = self.routes.entry(method).or_default();
        if let Some(previous) = by_path.insert(path, route) {
            tracing::debug!(
                method = %previous.method(),
                path = %previous.path(),
                "route re-registered, previous handler replaced"
            );
        }
    }

    /// Looks up the route for an exact method and path.
    #[must_use]
    pub fn resolve(&self, method: &Method, path: &str) -> Option<&Route> {
        self.routes.get(method)?.get(path)
    }

    /// Returns `true` if a route is registered for the pair.
    #[must_use]
    pub fn contains(&self, method: &Method, path: &str) -> bool {
        self.resolve(method, path).is_some()
    }

    /// Returns the number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    /// Returns `true` if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.values().all(HashMap::is_empty)
    }

    /// Iterates over all registered routes in unspecified order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.values().flat_map(HashMap::values)
    }

    /// Dispatches a request to its handler.
    ///
    /// - Missing method or request-target: writes `400` with body
    ///   `Bad Request` and performs no lookup.
    /// - No match: writes `404` with body `Not Found`.
    /// - Match: invokes the handler and writes nothing itself.
    ///
    /// Neither fallback response carries a `Content-Type`.
    pub async fn handle(&self, request: &Request, response: &mut Response) -> RouteOutcome {
        let (Some(method), Some(url)) = (request.method(), request.url()) else {
            tracing::debug!("request without method or url");
            response.set_status(StatusCode::BAD_REQUEST);
            response.end(BAD_REQUEST_BODY);
            return RouteOutcome::BadRequest;
        };

        match self.resolve(method, url) {
            Some(route) => {
                route.handler().call(request, response).await;
                RouteOutcome::Handled
            }
            None => {
                tracing::debug!(%method, url, "no route matched");
                response.set_status(StatusCode::NOT_FOUND);
                response.end(NOT_FOUND_BODY);
                RouteOutcome::NotFound
            }
        }
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.routes()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hermes_core::{async_handler, handler_fn};
    use http::header::CONTENT_TYPE;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn respond_with(body: &'static str) -> impl Handler {
        handler_fn(move |_req: &Request, res: &mut Response| res.end(body))
    }

    fn counting(calls: &Arc<AtomicUsize>) -> impl Handler {
        let calls = Arc::clone(calls);
        handler_fn(move |_req: &Request, res: &mut Response| {
            calls.fetch_add(1, Ordering::SeqCst);
            res.end("counted");
        })
    }

    fn dispatch(table: &RouteTable, request: &Request) -> (RouteOutcome, Response) {
        let mut response = Response::new();
        let outcome = tokio_test::block_on(table.handle(request, &mut response));
        (outcome, response)
    }

    #[test]
    fn test_empty_table() {
        let table = RouteTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(table.resolve(&Method::GET, "/").is_none());
    }

    #[test]
    fn test_exact_match_invokes_handler() {
        let mut table = RouteTable::new();
        table.add_route(Method::GET, "/test", respond_with("GET Request Success"));

        let (outcome, response) = dispatch(&table, &Request::new(Method::GET, "/test"));

        assert_eq!(outcome, RouteOutcome::Handled);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body().as_ref(), b"GET Request Success");
    }

    #[test]
    fn test_methods_are_distinct() {
        let mut table = RouteTable::new();
        table.add_route(Method::GET, "/test", respond_with("get"));
        table.add_route(Method::POST, "/test", respond_with("post"));

        let (_, get) = dispatch(&table, &Request::new(Method::GET, "/test"));
        let (_, post) = dispatch(&table, &Request::new(Method::POST, "/test"));
        let (outcome, _) = dispatch(&table, &Request::new(Method::DELETE, "/test"));

        assert_eq!(get.body().as_ref(), b"get");
        assert_eq!(post.body().as_ref(), b"post");
        assert_eq!(outcome, RouteOutcome::NotFound);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_method_case_sensitive() {
        let mut table = RouteTable::new();
        table.add_route(Method::GET, "/", respond_with("upper"));

        let lower = Method::from_bytes(b"get").unwrap();
        let (outcome, _) = dispatch(&table, &Request::new(lower, "/"));
        assert_eq!(outcome, RouteOutcome::NotFound);
    }

    #[test]
    fn test_no_path_normalization() {
        let mut table = RouteTable::new();
        table.add_route(Method::GET, "/test", respond_with("ok"));

        for url in ["/test/", "/Test", "/test?x=1", "test", "//test"] {
            let (outcome, response) = dispatch(&table, &Request::new(Method::GET, url));
            assert_eq!(outcome, RouteOutcome::NotFound, "url {url}");
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn test_not_found_response() {
        let table = RouteTable::new();
        let (outcome, response) = dispatch(&table, &Request::new(Method::GET, "/non-existent"));

        assert_eq!(outcome, RouteOutcome::NotFound);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.body().as_ref(), NOT_FOUND_BODY.as_bytes());
        assert!(response.headers().get(CONTENT_TYPE).is_none());
        assert!(response.is_finished());
    }

    #[test]
    fn test_missing_url_is_bad_request() {
        let mut table = RouteTable::new();
        table.add_route(Method::GET, "/", respond_with("never"));

        let mut request = Request::new(Method::GET, "/");
        request.clear_url();
        let (outcome, response) = dispatch(&table, &request);

        assert_eq!(outcome, RouteOutcome::BadRequest);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.body().as_ref(), BAD_REQUEST_BODY.as_bytes());
        assert!(response.headers().get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_missing_method_is_bad_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut table = RouteTable::new();
        table.add_route(Method::GET, "/", counting(&calls));

        let mut request = Request::new(Method::GET, "/");
        request.clear_method();
        let (outcome, response) = dispatch(&table, &request);

        assert_eq!(outcome, RouteOutcome::BadRequest);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.body().as_ref(), BAD_REQUEST_BODY.as_bytes());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_match_invokes_handler_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut table = RouteTable::new();
        table.add_route(Method::GET, "/", counting(&calls));
        table.add_route(Method::POST, "/", respond_with("other"));

        let (outcome, response) = dispatch(&table, &Request::new(Method::GET, "/"));

        assert_eq!(outcome, RouteOutcome::Handled);
        assert_eq!(response.body().as_ref(), b"counted");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_empty_url_is_bad_request() {
        let mut table = RouteTable::new();
        table.add_route(Method::GET, "", respond_with("unreachable"));

        let (outcome, _) = dispatch(&table, &Request::new(Method::GET, ""));
        assert_eq!(outcome, RouteOutcome::BadRequest);
    }

    #[test]
    fn test_reregistration_last_wins() {
        let mut table = RouteTable::new();
        table.add_route(Method::GET, "/x", respond_with("first"));
        table.add_route(Method::GET, "/x", respond_with("second"));

        let (_, response) = dispatch(&table, &Request::new(Method::GET, "/x"));
        assert_eq!(response.body().as_ref(), b"second");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_handler_without_end_leaves_defaults() {
        let mut table = RouteTable::new();
        table.add_route(Method::GET, "/silent", handler_fn(|_req: &Request, _res: &mut Response| {}));

        let (outcome, response) = dispatch(&table, &Request::new(Method::GET, "/silent"));

        assert_eq!(outcome, RouteOutcome::Handled);
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!response.is_finished());
        assert!(response.body().is_empty());
    }

    #[tokio::test]
    async fn test_async_handler_awaited() {
        let mut table = RouteTable::new();
        table.add_route(
            Method::PATCH,
            "/test",
            async_handler(|_req, res| {
                Box::pin(async move {
                    tokio::task::yield_now().await;
                    res.end("PATCH Request Success");
                })
            }),
        );

        let mut response = Response::new();
        let outcome = table.handle(&Request::new(Method::PATCH, "/test"), &mut response).await;

        assert_eq!(outcome, RouteOutcome::Handled);
        assert_eq!(response.body().as_ref(), b"PATCH Request Success");
    }

    #[test]
    fn test_routes_iterates_all() {
        let mut table = RouteTable::new();
        table.add_route(Method::GET, "/a", respond_with("a"));
        table.add_route(Method::GET, "/b", respond_with("b"));
        table.add_route(Method::PUT, "/a", respond_with("c"));

        let mut seen: Vec<_> = table
            .routes()
            .map(|r| format!("{} {}", r.method(), r.path()))
            .collect();
        seen.sort();
        assert_eq!(seen, vec!["GET /a", "GET /b", "PUT /a"]);
        assert!(table.contains(&Method::PUT, "/a"));
        assert!(!table.contains(&Method::PUT, "/b"));
    }
}
