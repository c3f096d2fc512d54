//! Head-to-head match statistics.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::Utc;
use haven_store::KvStore;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::StatsError;
use crate::page::{LeaderboardQuery, paginate};

/// Index set of every user with recorded match stats.
const INDEX_KEY: &str = "games:users";

fn stats_key(user_id: &str) -> String {
    format!("user:{user_id}:games")
}

/// Outcome of one completed head-to-head game, from the reporting user's
/// perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOutcome {
    Win,
    Loss,
    Draw,
}

impl FromStr for MatchOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win" => Ok(MatchOutcome::Win),
            "loss" => Ok(MatchOutcome::Loss),
            "draw" => Ok(MatchOutcome::Draw),
            other => Err(format!("unknown match result: {other}")),
        }
    }
}

/// Cumulative head-to-head record for one user.
///
/// `streak` counts consecutive wins and resets to zero on any loss or draw;
/// it is never negative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStats {
    pub wins: u64,
    pub losses: u64,
    pub draws: u64,
    pub streak: u64,
    /// Unix seconds of the most recent recorded game; 0 = never played.
    pub last_played_at: i64,
}

impl MatchStats {
    fn from_fields(fields: &HashMap<String, String>) -> Self {
        Self {
            wins: field_u64(fields, "wins"),
            losses: field_u64(fields, "losses"),
            draws: field_u64(fields, "draws"),
            streak: field_u64(fields, "streak"),
            last_played_at: field_i64(fields, "last_played_at"),
        }
    }

    fn to_fields(&self) -> Vec<(String, String)> {
        vec![
            ("wins".into(), self.wins.to_string()),
            ("losses".into(), self.losses.to_string()),
            ("draws".into(), self.draws.to_string()),
            ("streak".into(), self.streak.to_string()),
            ("last_played_at".into(), self.last_played_at.to_string()),
        ]
    }
}

pub(crate) fn field_u64(fields: &HashMap<String, String>, name: &str) -> u64 {
    fields
        .get(name)
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}

pub(crate) fn field_i64(fields: &HashMap<String, String>, name: &str) -> i64 {
    fields
        .get(name)
        .and_then(|v| v.parse().ok())
        .unwrap_or_default()
}

/// One leaderboard row.
#[derive(Debug, Clone, Serialize)]
pub struct MatchLeaderboardEntry {
    pub user_id: String,
    #[serde(flatten)]
    pub stats: MatchStats,
}

/// A leaderboard page plus the requesting user's overall rank.
#[derive(Debug, Clone, Serialize)]
pub struct MatchLeaderboard {
    pub entries: Vec<MatchLeaderboardEntry>,
    pub user_rank: Option<usize>,
    pub total: usize,
}

/// Records match results and assembles the head-to-head leaderboard.
pub struct MatchTracker<S> {
    store: S,
}

impl<S: KvStore> MatchTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record a completed game and return the updated stats.
    ///
    /// Every write also ensures the user is present in the index set used
    /// for leaderboard enumeration.
    pub async fn record(
        &self,
        user_id: &str,
        outcome: MatchOutcome,
    ) -> Result<MatchStats, StatsError> {
        let key = stats_key(user_id);
        let mut stats = MatchStats::from_fields(&self.store.hget_all(&key).await?);

        match outcome {
            MatchOutcome::Win => {
                stats.wins += 1;
                stats.streak += 1;
            }
            MatchOutcome::Loss => {
                stats.losses += 1;
                stats.streak = 0;
            }
            MatchOutcome::Draw => {
                stats.draws += 1;
                stats.streak = 0;
            }
        }
        stats.last_played_at = Utc::now().timestamp();

        self.store.hset_all(&key, &stats.to_fields()).await?;
        self.store.sadd(INDEX_KEY, user_id).await?;
        Ok(stats)
    }

    /// Current stats for a user; zeroed defaults when absent or on store
    /// failure.
    pub async fn stats(&self, user_id: &str) -> MatchStats {
        match self.store.hget_all(&stats_key(user_id)).await {
            Ok(fields) => MatchStats::from_fields(&fields),
            Err(err) => {
                warn!(user_id, %err, "match stats read failed, returning defaults");
                MatchStats::default()
            }
        }
    }

    /// Assemble the leaderboard: wins descending, streak as tie-break.
    ///
    /// Read failures degrade to an empty page rather than erroring.
    pub async fn leaderboard(&self, query: &LeaderboardQuery) -> MatchLeaderboard {
        let users = match self.store.smembers(INDEX_KEY).await {
            Ok(users) => users,
            Err(err) => {
                warn!(%err, "leaderboard index read failed");
                return MatchLeaderboard {
                    entries: Vec::new(),
                    user_rank: None,
                    total: 0,
                };
            }
        };

        let mut entries = Vec::with_capacity(users.len());
        for user_id in users {
            let stats = self.stats(&user_id).await;
            entries.push(MatchLeaderboardEntry { user_id, stats });
        }

        entries.sort_by(|a, b| {
            (b.stats.wins, b.stats.streak).cmp(&(a.stats.wins, a.stats.streak))
        });

        let (entries, user_rank, total) = paginate(entries, query, |e| &e.user_id);
        MatchLeaderboard {
            entries,
            user_rank,
            total,
        }
    }
}
