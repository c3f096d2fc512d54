//! # haven
//!
//! The Haven engagement backend.
//!
//! This crate ties together the key-value-backed engagement layer of the
//! Haven wellness platform: daily chat quotas, game leaderboards, and
//! head-to-head matchmaking.
//!
//! ## Crates
//!
//! - [`haven_core`] - Core types and default configuration values
//! - [`haven_store`] - Key-value store contract and backends
//! - [`haven_quota`] - Per-user daily chat quotas
//! - [`haven_stats`] - Match and brain-game statistics and leaderboards
//! - [`haven_arena`] - Matchmaking and two-player game sessions
//! - [`haven_config`] - Configuration loading and validation
//! - [`haven_metrics`] - Prometheus-compatible metrics
//! - [`haven_api`] - HTTP surface and server binary

pub use haven_api as api;
pub use haven_arena as arena;
pub use haven_config as config;
pub use haven_core as core;
pub use haven_metrics as metrics;
pub use haven_quota as quota;
pub use haven_stats as stats;
pub use haven_store as store;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use haven_api::{AppState, CancellationToken, router, serve};
    pub use haven_config::{Config, load_config, validate_config};
    pub use haven_core::Plan;
    pub use haven_store::{KvStore, MemoryStore, RedisStore};
}
