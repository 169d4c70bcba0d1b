//! Prometheus metrics for monitoring the player.
//!
//! Metrics are exposed in Prometheus text format on their own listener when
//! `METRICS_BIND` is set. Without an installed exporter every call here is a
//! no-op.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use pp_player::metrics;
//! use std::net::SocketAddr;
//!
//! // Initialize metrics exporter
//! let addr: SocketAddr = "127.0.0.1:9090".parse().unwrap();
//! metrics::init_metrics(addr).unwrap();
//!
//! // Record a decision
//! metrics::decisions_total("baseline", "fold");
//! ```

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
///
/// # Returns
///
/// Result indicating success or error message
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

// ============================================================================
// Protocol Metrics
// ============================================================================

/// Record a protocol request by action.
pub fn requests_total(action: &str) {
    metrics::counter!("player_requests_total",
        "action" => action.to_string()
    )
    .increment(1);
}

/// Record a `game_state` that failed to parse or validate.
pub fn rejected_states_total(action: &str) {
    metrics::counter!("player_rejected_states_total",
        "action" => action.to_string()
    )
    .increment(1);
}

// ============================================================================
// Decision Metrics
// ============================================================================

/// Record a decision by tier and play.
pub fn decisions_total(tier: &str, play: &str) {
    metrics::counter!("player_decisions_total",
        "tier" => tier.to_string(),
        "play" => play.to_string()
    )
    .increment(1);
}

/// Record bet size distribution.
pub fn bet_size_chips(amount: u32) {
    metrics::histogram!("player_bet_size_chips").record(f64::from(amount));
}

/// Increment showdowns seen counter.
pub fn showdowns_total() {
    metrics::counter!("player_showdowns_total").increment(1);
}

/// Set number of opponents currently profiled.
pub fn profiled_opponents(count: usize) {
    metrics::gauge!("player_profiled_opponents").set(count as f64);
}
