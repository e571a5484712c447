//! Prometheus metrics for the exchange: request volume/latency and the
//! trading-specific counters a dashboard would actually watch.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

pub mod names {
    pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

    pub const ORDERS_SUBMITTED_TOTAL: &str = "orders_submitted_total";
    pub const TRADES_MATCHED_TOTAL: &str = "trades_matched_total";
    pub const COPY_TRADE_SIGNALS_TOTAL: &str = "copy_trade_signals_total";
    pub const SETTLEMENTS_TOTAL: &str = "settlements_total";
    pub const ACTIVE_MARKETS: &str = "active_markets";
}

/// Installs the global recorder. Call once at process start; the returned
/// handle renders the current snapshot for `/metrics`.
pub fn init_metrics() -> PrometheusHandle {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(names::HTTP_REQUEST_DURATION_SECONDS.to_string()),
            &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0],
        )
        .unwrap()
        .install_recorder()
        .expect("failed to install Prometheus recorder")
}

pub fn record_http_request(method: &str, endpoint: &str, status: u16, duration_secs: f64) {
    counter!(names::HTTP_REQUESTS_TOTAL, "method" => method.to_string(), "endpoint" => endpoint.to_string(), "status" => status.to_string())
        .increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, "endpoint" => endpoint.to_string()).record(duration_secs);
}

pub fn record_order_submitted(side: &str) {
    counter!(names::ORDERS_SUBMITTED_TOTAL, "side" => side.to_string()).increment(1);
}

pub fn record_trade_matched() {
    counter!(names::TRADES_MATCHED_TOTAL).increment(1);
}

pub fn record_copy_trade_signal() {
    counter!(names::COPY_TRADE_SIGNALS_TOTAL).increment(1);
}

pub fn record_settlement() {
    counter!(names::SETTLEMENTS_TOTAL).increment(1);
}

pub fn set_active_markets(count: i64) {
    gauge!(names::ACTIVE_MARKETS).set(count as f64);
}

pub struct RequestTimer {
    start: Instant,
}

impl RequestTimer {
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}
