//! Per-user, per-day chat quota enforcement.
//!
//! Each user gets one counter per UTC calendar day, keyed
//! `user:{id}:chats:{YYYY-MM-DD}`. The date key is the reset mechanism: a
//! new day addresses a fresh, absent counter, so no rollover job exists.
//! Counters carry a 48 h expiry as a safety net against unbounded growth.
//!
//! Failure policy: the quota is soft. Checks fail open so a store outage
//! never blocks a user from chatting; increment failures are logged and
//! swallowed (the counter may undercount).

mod keeper;
mod limits;

pub use keeper::{QuotaKeeper, QuotaStatus};
pub use limits::QuotaLimits;
