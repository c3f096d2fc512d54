//! Default configuration constants.
//!
//! Consumed by `haven-config` through serde-default forwarding functions.

/// Default HTTP listen address.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";

/// Default Redis connection URL.
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Daily chat message allowance for the free plan.
pub const DEFAULT_FREE_DAILY_MESSAGES: u32 = 10;

/// Lifetime of a daily quota counter.
///
/// Longer than one day so counters self-clean without a cron job but can
/// never expire while their day is still current.
pub const QUOTA_COUNTER_TTL_SECS: u64 = 48 * 60 * 60;

/// Default page size for leaderboard queries.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;

/// Hard cap on leaderboard page size.
pub const MAX_LEADERBOARD_LIMIT: usize = 100;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log format ("pretty", "compact", or "json").
pub const DEFAULT_LOG_FORMAT: &str = "pretty";
