//! HTTP/1.1 transport.
//!
//! Accepts TCP connections and serves each on its own task with hyper. Every
//! inbound `http::Request` is collected into a [`hermes_core::Request`] and
//! handed to an [`ExchangeService`]; the returned [`Response`] sink is sent
//! back as-is.

use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use hermes_core::{BoxFuture, HttpResponse, Request, Response};
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};

use crate::shutdown::{ConnectionTracker, ShutdownSignal};

/// Something that turns one request into one response.
///
/// Implemented by [`Server`](crate::Server); alternative transports and
/// test clients can drive any implementation directly.
pub trait ExchangeService: Send + Sync + 'static {
    /// Processes one exchange to completion.
    fn on_exchange(&self, request: Request) -> BoxFuture<'_, Response>;
}

/// Accepts connections until `shutdown` triggers.
///
/// Every connection holds a token from `tracker` while it is open. On
/// shutdown the accept loop stops immediately and open connections finish
/// their current exchange before closing; callers wait on `tracker` for
/// them.
pub async fn serve<S: ExchangeService>(
    listener: TcpListener,
    service: Arc<S>,
    shutdown: ShutdownSignal,
    tracker: ConnectionTracker,
    keep_alive: bool,
) {
    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((stream, remote_addr)) => {
                        let service = Arc::clone(&service);
                        let shutdown = shutdown.clone();
                        let token = tracker.acquire();

                        tokio::spawn(async move {
                            if let Err(e) =
                                serve_connection(stream, remote_addr, service, shutdown, keep_alive).await
                            {
                                tracing::debug!(%remote_addr, error = %e, "connection closed with error");
                            }
                            drop(token);
                        });
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "failed to accept connection");
                    }
                }
            }

            () = shutdown.recv() => {
                tracing::info!("shutdown signal received, no longer accepting connections");
                break;
            }
        }
    }
}

async fn serve_connection<S: ExchangeService>(
    stream: TcpStream,
    remote_addr: SocketAddr,
    service: Arc<S>,
    shutdown: ShutdownSignal,
    keep_alive: bool,
) -> Result<(), hyper::Error> {
    let io = TokioIo::new(stream);

    let svc = service_fn(move |req: http::Request<Incoming>| {
        let service = Arc::clone(&service);
        async move {
            let request = collect_request(req).await?.with_remote_addr(remote_addr);
            let response: HttpResponse = service.on_exchange(request).await.into_http();
            Ok::<_, hyper::Error>(response)
        }
    });

    let conn = http1::Builder::new()
        .keep_alive(keep_alive)
        .serve_connection(io, svc);
    tokio::pin!(conn);

    tokio::select! {
        result = conn.as_mut() => result,
        () = shutdown.recv() => {
            tracing::debug!(%remote_addr, "draining connection for shutdown");
            conn.as_mut().graceful_shutdown();
            conn.await
        }
    }
}

async fn collect_request(req: http::Request<Incoming>) -> Result<Request, hyper::Error> {
    let (parts, body) = req.into_parts();
    let body: Bytes = body.collect().await?.to_bytes();
    Ok(Request::from_http(http::Request::from_parts(parts, body)))
}
