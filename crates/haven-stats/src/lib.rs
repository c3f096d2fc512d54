//! Match and brain-game statistics, leaderboards, and rankings.
//!
//! Two trackers share one algorithmic shape over the key-value store:
//!
//! - [`MatchTracker`] — head-to-head results: win/loss/draw counters plus a
//!   consecutive-win streak.
//! - [`BrainTracker`] — solo brain-training games: one high-water-mark score
//!   per game, with an aggregate total.
//!
//! The store has no scan primitive, so each tracker maintains a secondary
//! index set of every user id it has ever written; leaderboards enumerate
//! that set. Writes must keep the index in sync.
//!
//! Failure policy: reads degrade to zeroed defaults, writes propagate errors
//! to the caller.

mod brain;
mod error;
mod matches;
mod page;

pub use brain::{
    BrainGame, BrainLeaderboard, BrainLeaderboardEntry, BrainStats, BrainTracker, ScoreOutcome,
};
pub use error::StatsError;
pub use matches::{
    MatchLeaderboard, MatchLeaderboardEntry, MatchOutcome, MatchStats, MatchTracker,
};
pub use page::LeaderboardQuery;
