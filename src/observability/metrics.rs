//! Metrics collection and exposition.
//!
//! # Metrics
//! - `mirror_resolutions_total` (counter): resolutions by source (exact, pattern, route, none)
//! - `mirror_settings_reloads_total` (counter): settings reloads by outcome
//! - `mirror_routes` (gauge): entries in the routing table
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;

use metrics::{counter, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_resolution(source: &'static str) {
    counter!("mirror_resolutions_total", "source" => source).increment(1);
}

pub fn record_reload(outcome: &'static str) {
    counter!("mirror_settings_reloads_total", "outcome" => outcome).increment(1);
}

pub fn record_route_count(count: usize) {
    gauge!("mirror_routes").set(count as f64);
}
