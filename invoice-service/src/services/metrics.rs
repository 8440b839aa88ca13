//! Metrics collection and Prometheus export.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

/// Global handle to the Prometheus recorder.
pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the metrics recorder.
///
/// This must be called once at startup before any metrics are recorded.
/// Panics if called more than once.
pub fn init_metrics() {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    if METRICS_HANDLE.set(handle).is_err() {
        panic!("failed to set metrics handle: already initialized");
    }
}

/// Current metrics in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Counts an invoice operation (`create`, `list`, `get`, `delete`) by outcome.
pub fn record_invoice_operation(operation: &'static str, outcome: &'static str) {
    counter!("invoice_operations_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
}
