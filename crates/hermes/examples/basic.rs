//! Basic Hermes server.
//!
//! Run with:
//!
//! ```text
//! cargo run -p hermes --example basic
//! ```
//!
//! Then:
//!
//! ```text
//! curl http://127.0.0.1:3000/
//! curl http://127.0.0.1:3000/json
//! HERMES__METRICS__ENABLED=true cargo run -p hermes --example basic
//! curl http://127.0.0.1:3000/metrics
//! ```
//!
//! Settings come from `HERMES__*` environment variables on top of the
//! development preset, e.g. `HERMES__LOGGING__LEVEL=trace`.

use hermes::prelude::*;
use hermes::telemetry::render_metrics;
use http::header::CONTENT_TYPE;
use http::StatusCode;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigLoader::new()
        .with_development()
        .with_dotenv()
        .with_env_prefix("HERMES")
        .load()?;
    init_telemetry(&TelemetryConfig::from_config(&config))?;

    let mut server = Server::from_config(&config);

    server
        .use_middleware(middleware_fn(|req: &mut Request, _res: &mut Response, next: Next| {
            tracing::info!(
                method = ?req.method(),
                url = req.url().unwrap_or("-"),
                "incoming request"
            );
            next.proceed()
        }))
        .use_middleware(RequestIdMiddleware::new())
        .get(
            "/",
            handler_fn(|_req: &Request, res: &mut Response| {
                if let Err(e) = res.set_header(CONTENT_TYPE, "text/plain") {
                    tracing::warn!(error = %e, "could not set content type");
                }
                res.end("Hello from Hermes!");
            }),
        )
        .get(
            "/json",
            handler_fn(|req: &Request, res: &mut Response| {
                let request_id = req.extensions().get::<RequestId>().map(ToString::to_string);
                let body = serde_json::json!({
                    "message": "Hello from Hermes!",
                    "request_id": request_id,
                });
                if let Err(e) = res.set_header(CONTENT_TYPE, "application/json") {
                    tracing::warn!(error = %e, "could not set content type");
                }
                res.end(body.to_string());
            }),
        )
        .get(
            "/metrics",
            handler_fn(|_req: &Request, res: &mut Response| match render_metrics() {
                Some(text) => {
                    if let Err(e) = res.set_header(CONTENT_TYPE, "text/plain; version=0.0.4") {
                        tracing::warn!(error = %e, "could not set content type");
                    }
                    res.end(text);
                }
                None => {
                    res.set_status(StatusCode::NOT_FOUND);
                    res.end("metrics are disabled");
                }
            }),
        );

    server
        .listen_with(3000, |addr| {
            tracing::info!(%addr, "server is running");
        })
        .await?;

    Ok(())
}
