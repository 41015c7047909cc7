//! Chain integration tests combining built-in and user middleware.

use hermes_core::{Exchange, ExchangeState, Request, RequestId, Response};
use hermes_middleware::{
    async_middleware,
    middleware_fn,
    stages::{RequestIdMiddleware, RequestLogger, REQUEST_ID_HEADER},
    ChainOutcome, Flow, MiddlewareChain, Next,
};
use http::{Method, StatusCode};

fn standard_chain() -> MiddlewareChain {
    let mut chain = MiddlewareChain::new();
    chain.push(RequestIdMiddleware::new());
    chain.push(RequestLogger::new());
    chain
}

#[tokio::test]
async fn test_builtin_stages_then_user_middleware() {
    let mut chain = standard_chain();
    chain.push(middleware_fn(|req: &mut Request, res: &mut Response, next: Next| {
        let id = req.extensions().get::<RequestId>().map(ToString::to_string);
        res.set_header("x-seen-id", id.unwrap_or_default()).unwrap();
        next.proceed()
    }));

    let mut exchange = Exchange::new(Request::new(Method::GET, "/"));
    let outcome = chain.run(&mut exchange).await;

    assert_eq!(outcome, ChainOutcome::Exhausted);
    assert_eq!(chain.names(), vec!["request_id", "request_logger", "anonymous"]);

    let response = exchange.response();
    let header_id = response.header_str(REQUEST_ID_HEADER).unwrap();
    assert_eq!(response.header_str("x-seen-id"), Some(header_id));
}

#[tokio::test]
async fn test_custom_header_middleware() {
    let mut chain = MiddlewareChain::new();
    chain.push(middleware_fn(|_req: &mut Request, res: &mut Response, next: Next| {
        res.set_header("X-Custom-Header", "Middleware Applied").unwrap();
        next.proceed()
    }));

    let mut exchange = Exchange::new(Request::new(Method::GET, "/test"));
    chain.run(&mut exchange).await;

    assert_eq!(
        exchange.response().header_str("x-custom-header"),
        Some("Middleware Applied")
    );
}

#[tokio::test]
async fn test_async_gate_halts_before_later_stages() {
    let mut chain = MiddlewareChain::new();
    chain.push(
        async_middleware(|req, res, next| {
            Box::pin(async move {
                tokio::task::yield_now().await;
                if req.header_str("authorization").is_some() {
                    return next.proceed();
                }
                res.set_status(StatusCode::UNAUTHORIZED);
                res.end("Unauthorized");
                Flow::halt()
            })
        })
        .named("auth"),
    );
    chain.push(RequestIdMiddleware::new());

    let mut exchange = Exchange::new(Request::new(Method::GET, "/private"));
    let outcome = chain.run(&mut exchange).await;

    assert_eq!(
        outcome,
        ChainOutcome::Halted {
            index: 0,
            name: "auth".to_string()
        }
    );
    assert_eq!(exchange.state(), ExchangeState::InMiddleware(0));
    assert_eq!(exchange.response().status(), StatusCode::UNAUTHORIZED);
    assert!(exchange.response().header_str(REQUEST_ID_HEADER).is_none());
}

#[tokio::test]
async fn test_concurrent_exchanges_do_not_share_state() {
    let chain = std::sync::Arc::new(standard_chain());

    let mut tasks = Vec::new();
    for i in 0..16 {
        let chain = std::sync::Arc::clone(&chain);
        tasks.push(tokio::spawn(async move {
            let mut exchange = Exchange::new(Request::new(Method::GET, format!("/{i}")));
            chain.run(&mut exchange).await;
            exchange
                .response()
                .header_str(REQUEST_ID_HEADER)
                .map(ToOwned::to_owned)
        }));
    }

    let mut ids = std::collections::HashSet::new();
    for task in tasks {
        ids.insert(task.await.unwrap().unwrap());
    }
    assert_eq!(ids.len(), 16);
}
