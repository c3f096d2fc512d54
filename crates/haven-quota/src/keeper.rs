//! Quota check and increment logic.

use std::time::Duration;

use chrono::Utc;
use haven_core::{Plan, defaults};
use haven_store::KvStore;
use serde::Serialize;
use tracing::warn;

use crate::limits::QuotaLimits;

/// Result of a quota check.
#[derive(Debug, Clone, Serialize)]
pub struct QuotaStatus {
    pub plan: Plan,
    /// Messages sent today.
    pub used: u64,
    /// Daily limit; `None` = unlimited.
    pub limit: Option<u32>,
    /// Messages left today; `None` = unlimited.
    pub remaining: Option<u64>,
    pub allowed: bool,
}

impl QuotaStatus {
    fn unlimited(plan: Plan, used: u64) -> Self {
        Self {
            plan,
            used,
            limit: None,
            remaining: None,
            allowed: true,
        }
    }
}

/// Gates chat requests against a plan-dependent daily quota.
pub struct QuotaKeeper<S> {
    store: S,
    limits: QuotaLimits,
    counter_ttl: Duration,
}

impl<S: KvStore> QuotaKeeper<S> {
    pub fn new(store: S, limits: QuotaLimits) -> Self {
        Self {
            store,
            limits,
            counter_ttl: Duration::from_secs(defaults::QUOTA_COUNTER_TTL_SECS),
        }
    }

    /// Check whether the user may send another chat message today.
    ///
    /// Store failures fail open: a transient outage must never block a
    /// legitimate user, so errors degrade to `allowed=true`.
    pub async fn check(&self, user_id: &str, plan: Plan) -> QuotaStatus {
        self.check_on(user_id, plan, &today_utc()).await
    }

    /// Record one sent message, returning the new count for today.
    ///
    /// The increment also refreshes the counter's expiry so stale counters
    /// self-clean. Failures are logged and swallowed; the response to the
    /// user has already been committed by the time this runs.
    pub async fn record_message(&self, user_id: &str) -> Option<u64> {
        self.record_message_on(user_id, &today_utc()).await
    }

    async fn check_on(&self, user_id: &str, plan: Plan, date: &str) -> QuotaStatus {
        let Some(limit) = self.limits.limit_for(plan) else {
            return QuotaStatus::unlimited(plan, 0);
        };

        let used = match self.store.get(&counter_key(user_id, date)).await {
            Ok(value) => value.and_then(|v| v.parse::<u64>().ok()).unwrap_or(0),
            Err(err) => {
                warn!(user_id, %err, "quota check failed, failing open");
                return QuotaStatus::unlimited(plan, 0);
            }
        };

        let remaining = u64::from(limit).saturating_sub(used);
        QuotaStatus {
            plan,
            used,
            limit: Some(limit),
            remaining: Some(remaining),
            allowed: used < u64::from(limit),
        }
    }

    async fn record_message_on(&self, user_id: &str, date: &str) -> Option<u64> {
        match self
            .store
            .incr_ex(&counter_key(user_id, date), self.counter_ttl)
            .await
        {
            Ok(count) => Some(count.max(0) as u64),
            Err(err) => {
                warn!(user_id, %err, "failed to record chat message");
                None
            }
        }
    }
}

fn counter_key(user_id: &str, date: &str) -> String {
    format!("user:{user_id}:chats:{date}")
}

/// Today's UTC date as `YYYY-MM-DD`.
fn today_utc() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}
