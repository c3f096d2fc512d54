//! Metrics collection and Prometheus exporter for Haven.
//!
//! Provides metrics instrumentation for the engagement backend: request
//! counts, quota denials, matchmaking activity, and store error rates.

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Initialize Prometheus metrics exporter.
///
/// Starts an HTTP server on the given address to expose metrics.
/// Returns an error message if binding fails.
pub fn init_prometheus(listen: &str) -> Result<(), String> {
    let addr: SocketAddr = listen
        .parse()
        .map_err(|e| format!("invalid metrics listen address: {}", e))?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("failed to install prometheus exporter: {}", e))?;

    Ok(())
}

// ============================================================================
// Metric Names
// ============================================================================

/// Total HTTP requests served, labeled by operation.
pub const REQUESTS_TOTAL: &str = "haven_requests_total";
/// Total quota checks that came back exhausted.
pub const QUOTA_DENIED_TOTAL: &str = "haven_quota_denied_total";
/// Total chat messages recorded against a quota.
pub const CHAT_MESSAGES_TOTAL: &str = "haven_chat_messages_total";
/// Total match results recorded.
pub const MATCH_RESULTS_TOTAL: &str = "haven_match_results_total";
/// Total brain-game score submissions accepted as new high scores.
pub const HIGH_SCORES_TOTAL: &str = "haven_high_scores_total";
/// Total sessions created by matchmaking.
pub const MATCHES_CREATED_TOTAL: &str = "haven_matches_created_total";
/// Total moves applied to live sessions.
pub const MOVES_APPLIED_TOTAL: &str = "haven_moves_applied_total";
/// Total store operations that failed.
pub const STORE_ERRORS_TOTAL: &str = "haven_store_errors_total";

// ============================================================================
// Metric Recording Functions
// ============================================================================

/// Record one served request for an operation.
#[inline]
pub fn record_request(operation: &'static str) {
    counter!(REQUESTS_TOTAL, "operation" => operation).increment(1);
}

/// Record a quota check that found the allowance exhausted.
#[inline]
pub fn record_quota_denied() {
    counter!(QUOTA_DENIED_TOTAL).increment(1);
}

/// Record a chat message counted against a quota.
#[inline]
pub fn record_chat_message() {
    counter!(CHAT_MESSAGES_TOTAL).increment(1);
}

/// Record a match result write.
#[inline]
pub fn record_match_result() {
    counter!(MATCH_RESULTS_TOTAL).increment(1);
}

/// Record an accepted high score.
#[inline]
pub fn record_high_score() {
    counter!(HIGH_SCORES_TOTAL).increment(1);
}

/// Record a session created by matchmaking.
#[inline]
pub fn record_match_created() {
    counter!(MATCHES_CREATED_TOTAL).increment(1);
}

/// Record a move applied to a session.
#[inline]
pub fn record_move_applied() {
    counter!(MOVES_APPLIED_TOTAL).increment(1);
}

/// Record a failed store operation.
#[inline]
pub fn record_store_error() {
    counter!(STORE_ERRORS_TOTAL).increment(1);
}
