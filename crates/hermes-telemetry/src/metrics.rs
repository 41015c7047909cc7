//! Prometheus metrics for Hermes.
//!
//! Recording goes through the `metrics` facade, so every `record_*` call is a
//! no-op until [`init_metrics`] installs a recorder.
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `hermes_requests_total` | Counter | `method`, `status`, `outcome` | Completed exchanges |
//! | `hermes_request_duration_seconds` | Histogram | `method` | Exchange latency |
//! | `hermes_in_flight_requests` | Gauge | - | Exchanges currently running |
//!
//! The `method` label is one of the standard HTTP methods, `UNKNOWN` for a
//! request without one, or `OTHER` for extension methods.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use hermes_telemetry::metrics::record_exchange;
//!
//! record_exchange("GET", 200, "handled", Duration::from_millis(3));
//! ```

use crate::error::TelemetryError;
use crate::TelemetryResult;
use hermes_config::MetricsSettings;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use std::sync::OnceLock;
use std::time::Duration;

/// Counter of completed exchanges.
pub const REQUESTS_TOTAL: &str = "hermes_requests_total";

/// Histogram of exchange durations in seconds.
pub const REQUEST_DURATION: &str = "hermes_request_duration_seconds";

/// Gauge of exchanges currently being processed.
pub const IN_FLIGHT: &str = "hermes_in_flight_requests";

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Metrics configuration.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Whether metrics are enabled.
    pub enabled: bool,

    /// Address to expose metrics on (e.g., "0.0.0.0:9090").
    pub addr: String,

    /// Histogram buckets for request duration.
    pub duration_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            addr: "0.0.0.0:9090".to_string(),
            // 1ms, 5ms, 10ms, 25ms, 50ms, 100ms, 250ms, 500ms, 1s, 2.5s, 5s, 10s
            duration_buckets: vec![
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ],
        }
    }
}

impl MetricsConfig {
    /// Converts the `[metrics]` configuration section.
    #[must_use]
    pub fn from_settings(settings: &MetricsSettings) -> Self {
        Self {
            enabled: settings.enabled,
            addr: settings.addr.clone(),
            duration_buckets: settings.histogram_buckets.clone(),
        }
    }
}

/// Installs the Prometheus recorder and spawns its scrape listener.
///
/// Must be called from within a tokio runtime. A disabled config installs
/// nothing.
///
/// # Errors
///
/// Returns `TelemetryError::InvalidAddress` for an unparsable address and
/// `TelemetryError::MetricsInit` if there is no runtime, the buckets are
/// rejected, or a recorder is already installed.
pub fn init_metrics(config: &MetricsConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let addr: SocketAddr = config
        .addr
        .parse()
        .map_err(|e| TelemetryError::InvalidAddress(format!("{}: {e}", config.addr)))?;

    let runtime = tokio::runtime::Handle::try_current()
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

    let (recorder, exporter) = PrometheusBuilder::new()
        .set_buckets(&config.duration_buckets)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?
        .with_http_listener(addr)
        .build()
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

    let handle = recorder.handle();
    metrics::set_global_recorder(recorder).map_err(|_| {
        TelemetryError::MetricsInit("a global metrics recorder is already installed".to_string())
    })?;
    let _ = METRICS_HANDLE.set(handle);

    runtime.spawn(async move {
        if let Err(e) = exporter.await {
            tracing::error!(error = ?e, "metrics exporter stopped");
        }
    });

    register_metric_descriptions();
    tracing::info!(%addr, "metrics exporter listening");

    Ok(())
}

/// Renders metrics in Prometheus text format.
///
/// Returns `None` if metrics are not initialized.
#[must_use]
pub fn render_metrics() -> Option<String> {
    METRICS_HANDLE.get().map(PrometheusHandle::render)
}

fn register_metric_descriptions() {
    describe_counter!(REQUESTS_TOTAL, "Total number of completed exchanges");
    describe_histogram!(
        REQUEST_DURATION,
        metrics::Unit::Seconds,
        "Time from request receipt to response"
    );
    describe_gauge!(IN_FLIGHT, "Number of exchanges currently being processed");
}

/// Label used for any method outside the standard set.
const OTHER_METHOD: &str = "OTHER";

/// Maps a request method onto a bounded label set.
///
/// Standard methods (and the `UNKNOWN` placeholder for a missing method) pass
/// through; extension methods collapse to `OTHER`.
fn method_label(method: &str) -> &str {
    match method {
        "GET" | "HEAD" | "POST" | "PUT" | "DELETE" | "CONNECT" | "OPTIONS" | "TRACE"
        | "PATCH" | "UNKNOWN" => method,
        _ => OTHER_METHOD,
    }
}

/// Records one completed exchange.
///
/// `outcome` is the routing outcome (`handled`, `bad_request`, `not_found`)
/// or `halted` when middleware ended the exchange. Non-standard methods are
/// labelled `OTHER`.
pub fn record_exchange(method: &str, status: u16, outcome: &str, duration: Duration) {
    let method = method_label(method);
    counter!(
        REQUESTS_TOTAL,
        "method" => method.to_string(),
        "status" => status.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);

    histogram!(REQUEST_DURATION, "method" => method.to_string()).record(duration.as_secs_f64());
}

/// Guard that tracks an in-flight exchange.
///
/// Increments the gauge on creation and decrements it on drop, so the gauge
/// stays correct when a handler panics.
#[derive(Debug)]
pub struct InFlightGuard {
    _private: (),
}

impl InFlightGuard {
    /// Creates a new guard and increments the in-flight gauge.
    #[must_use]
    pub fn new() -> Self {
        gauge!(IN_FLIGHT).increment(1.0);
        Self { _private: () }
    }
}

impl Default for InFlightGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        gauge!(IN_FLIGHT).decrement(1.0);
    }
}
