//! Prometheus metrics for upstream request tracking.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};

// === Metric Name Constants ===

/// Upstream requests counter metric name.
pub const METRIC_UPSTREAM_REQUESTS: &str = "upstream_requests_total";
/// Upstream failures counter metric name.
pub const METRIC_UPSTREAM_FAILURES: &str = "upstream_failures_total";
/// Upstream request latency metric name.
pub const METRIC_UPSTREAM_LATENCY: &str = "upstream_request_latency_ms";
/// Likes sent counter metric name.
pub const METRIC_LIKES_SENT: &str = "likes_sent_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_UPSTREAM_REQUESTS,
        "Total number of upstream requests issued"
    );
    describe_counter!(
        METRIC_UPSTREAM_FAILURES,
        "Total number of upstream requests that failed"
    );
    describe_histogram!(
        METRIC_UPSTREAM_LATENCY,
        "Upstream request latency in milliseconds"
    );
    describe_counter!(METRIC_LIKES_SENT, "Total number of like batches sent");
}

/// Count an upstream request against the given endpoint.
pub fn inc_upstream_requests(endpoint: &str) {
    counter!(METRIC_UPSTREAM_REQUESTS, "endpoint" => endpoint.to_string()).increment(1);
}

/// Count an upstream failure against the given endpoint.
pub fn inc_upstream_failures(endpoint: &str) {
    counter!(METRIC_UPSTREAM_FAILURES, "endpoint" => endpoint.to_string()).increment(1);
}

/// Record upstream latency since `start` for the given endpoint.
pub fn record_upstream_latency(start: Instant, endpoint: &str) {
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_UPSTREAM_LATENCY, "endpoint" => endpoint.to_string()).record(elapsed_ms);
}

/// Count a successful send-like call.
pub fn inc_likes_sent() {
    counter!(METRIC_LIKES_SENT).increment(1);
}
