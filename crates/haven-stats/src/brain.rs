//! Solo brain-training game scores.
//!
//! Each user keeps one high-water-mark score per game: a submission only
//! lands when it strictly exceeds the stored best, so every per-game field
//! is non-decreasing over time. `total_score` is recomputed as the sum of
//! the per-game bests on every successful update.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::Utc;
use haven_store::KvStore;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::StatsError;
use crate::matches::{field_i64, field_u64};
use crate::page::{LeaderboardQuery, paginate};

// Key segment "adhd-games" predates the brain-games rename; kept so stored
// data stays addressable.
const INDEX_KEY: &str = "adhd-games:users";

fn stats_key(user_id: &str) -> String {
    format!("user:{user_id}:adhd-games")
}

/// The closed set of brain-training games.
///
/// Unknown identifiers are rejected at the boundary; there is no dynamic
/// field lookup anywhere downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrainGame {
    Memory,
    Focus,
    Reaction,
    Sequence,
}

impl BrainGame {
    /// All games, in leaderboard display order.
    pub const ALL: [BrainGame; 4] = [
        BrainGame::Memory,
        BrainGame::Focus,
        BrainGame::Reaction,
        BrainGame::Sequence,
    ];

    /// Canonical identifier, matching the wire and stored field name.
    pub fn as_str(self) -> &'static str {
        match self {
            BrainGame::Memory => "memory",
            BrainGame::Focus => "focus",
            BrainGame::Reaction => "reaction",
            BrainGame::Sequence => "sequence",
        }
    }
}

impl FromStr for BrainGame {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(BrainGame::Memory),
            "focus" => Ok(BrainGame::Focus),
            "reaction" => Ok(BrainGame::Reaction),
            "sequence" => Ok(BrainGame::Sequence),
            other => Err(format!("unknown game: {other}")),
        }
    }
}

/// Per-user brain-game record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrainStats {
    pub username: String,
    pub memory: u64,
    pub focus: u64,
    pub reaction: u64,
    pub sequence: u64,
    /// Sum of the four per-game bests.
    pub total_score: u64,
    /// Unix seconds of the most recent accepted score; 0 = never played.
    pub last_played_at: i64,
}

impl BrainStats {
    /// Best score for one game.
    pub fn score(&self, game: BrainGame) -> u64 {
        match game {
            BrainGame::Memory => self.memory,
            BrainGame::Focus => self.focus,
            BrainGame::Reaction => self.reaction,
            BrainGame::Sequence => self.sequence,
        }
    }

    fn score_mut(&mut self, game: BrainGame) -> &mut u64 {
        match game {
            BrainGame::Memory => &mut self.memory,
            BrainGame::Focus => &mut self.focus,
            BrainGame::Reaction => &mut self.reaction,
            BrainGame::Sequence => &mut self.sequence,
        }
    }

    fn recompute_total(&mut self) {
        self.total_score = BrainGame::ALL.iter().map(|&g| self.score(g)).sum();
    }

    fn from_fields(fields: &HashMap<String, String>) -> Self {
        Self {
            username: fields.get("username").cloned().unwrap_or_default(),
            memory: field_u64(fields, "memory"),
            focus: field_u64(fields, "focus"),
            reaction: field_u64(fields, "reaction"),
            sequence: field_u64(fields, "sequence"),
            total_score: field_u64(fields, "total_score"),
            last_played_at: field_i64(fields, "last_played_at"),
        }
    }

    fn to_fields(&self) -> Vec<(String, String)> {
        vec![
            ("username".into(), self.username.clone()),
            ("memory".into(), self.memory.to_string()),
            ("focus".into(), self.focus.to_string()),
            ("reaction".into(), self.reaction.to_string()),
            ("sequence".into(), self.sequence.to_string()),
            ("total_score".into(), self.total_score.to_string()),
            ("last_played_at".into(), self.last_played_at.to_string()),
        ]
    }
}

/// Result of a score submission.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreOutcome {
    pub is_new_high_score: bool,
    pub stats: BrainStats,
}

/// One leaderboard row.
#[derive(Debug, Clone, Serialize)]
pub struct BrainLeaderboardEntry {
    pub user_id: String,
    #[serde(flatten)]
    pub stats: BrainStats,
}

/// A leaderboard page plus the requesting user's overall rank.
#[derive(Debug, Clone, Serialize)]
pub struct BrainLeaderboard {
    pub entries: Vec<BrainLeaderboardEntry>,
    pub user_rank: Option<usize>,
    pub total: usize,
}

/// Records brain-game scores and assembles their leaderboard.
pub struct BrainTracker<S> {
    store: S,
}

impl<S: KvStore> BrainTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Submit a score.
    ///
    /// Persists only when `score` strictly exceeds the stored best for
    /// `game`; a lower or equal submission leaves the record untouched and
    /// returns `is_new_high_score = false`. Successful writes refresh the
    /// username, recompute the total, and register the user in the
    /// leaderboard index.
    pub async fn save_score(
        &self,
        user_id: &str,
        username: &str,
        game: BrainGame,
        score: u64,
    ) -> Result<ScoreOutcome, StatsError> {
        let key = stats_key(user_id);
        let mut stats = BrainStats::from_fields(&self.store.hget_all(&key).await?);

        if score <= stats.score(game) {
            return Ok(ScoreOutcome {
                is_new_high_score: false,
                stats,
            });
        }

        *stats.score_mut(game) = score;
        stats.recompute_total();
        stats.username = username.to_string();
        stats.last_played_at = Utc::now().timestamp();

        self.store.hset_all(&key, &stats.to_fields()).await?;
        self.store.sadd(INDEX_KEY, user_id).await?;
        Ok(ScoreOutcome {
            is_new_high_score: true,
            stats,
        })
    }

    /// Current record for a user; zeroed defaults when absent or on store
    /// failure.
    pub async fn stats(&self, user_id: &str) -> BrainStats {
        match self.store.hget_all(&stats_key(user_id)).await {
            Ok(fields) => BrainStats::from_fields(&fields),
            Err(err) => {
                warn!(user_id, %err, "brain stats read failed, returning defaults");
                BrainStats::default()
            }
        }
    }

    /// Assemble the leaderboard.
    ///
    /// With `game` set, rows are ordered by that game's best score and users
    /// who never played it are dropped; otherwise rows are ordered by
    /// `total_score`. Read failures degrade to an empty page.
    pub async fn leaderboard(
        &self,
        game: Option<BrainGame>,
        query: &LeaderboardQuery,
    ) -> BrainLeaderboard {
        let users = match self.store.smembers(INDEX_KEY).await {
            Ok(users) => users,
            Err(err) => {
                warn!(%err, "leaderboard index read failed");
                return BrainLeaderboard {
                    entries: Vec::new(),
                    user_rank: None,
                    total: 0,
                };
            }
        };

        let mut entries = Vec::with_capacity(users.len());
        for user_id in users {
            let stats = self.stats(&user_id).await;
            entries.push(BrainLeaderboardEntry { user_id, stats });
        }

        match game {
            Some(game) => {
                entries.retain(|e| e.stats.score(game) > 0);
                entries.sort_by(|a, b| b.stats.score(game).cmp(&a.stats.score(game)));
            }
            None => entries.sort_by(|a, b| b.stats.total_score.cmp(&a.stats.total_score)),
        }

        let (entries, user_rank, total) = paginate(entries, query, |e| &e.user_id);
        BrainLeaderboard {
            entries,
            user_rank,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use haven_store::MemoryStore;

    use super::*;

    fn tracker() -> BrainTracker<MemoryStore> {
        BrainTracker::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn first_score_is_a_high_score() {
        let tracker = tracker();
        let outcome = tracker
            .save_score("u1", "ada", BrainGame::Memory, 120)
            .await
            .unwrap();
        assert!(outcome.is_new_high_score);
        assert_eq!(outcome.stats.memory, 120);
        assert_eq!(outcome.stats.total_score, 120);
        assert_eq!(outcome.stats.username, "ada");
    }

    #[tokio::test]
    async fn lower_score_leaves_record_untouched() {
        let tracker = tracker();
        tracker
            .save_score("u1", "ada", BrainGame::Memory, 120)
            .await
            .unwrap();

        let outcome = tracker
            .save_score("u1", "ada", BrainGame::Memory, 80)
            .await
            .unwrap();
        assert!(!outcome.is_new_high_score);
        assert_eq!(outcome.stats.memory, 120);

        let stored = tracker.stats("u1").await;
        assert_eq!(stored.memory, 120);
    }

    #[tokio::test]
    async fn equal_score_is_not_a_high_score() {
        let tracker = tracker();
        tracker
            .save_score("u1", "ada", BrainGame::Focus, 50)
            .await
            .unwrap();
        let outcome = tracker
            .save_score("u1", "ada", BrainGame::Focus, 50)
            .await
            .unwrap();
        assert!(!outcome.is_new_high_score);
    }

    #[tokio::test]
    async fn total_is_the_sum_of_all_bests() {
        let tracker = tracker();
        tracker
            .save_score("u1", "ada", BrainGame::Memory, 100)
            .await
            .unwrap();
        tracker
            .save_score("u1", "ada", BrainGame::Focus, 20)
            .await
            .unwrap();
        tracker
            .save_score("u1", "ada", BrainGame::Reaction, 3)
            .await
            .unwrap();
        let outcome = tracker
            .save_score("u1", "ada", BrainGame::Sequence, 7)
            .await
            .unwrap();
        assert_eq!(outcome.stats.total_score, 130);

        // Raising one best raises the total by the difference.
        let outcome = tracker
            .save_score("u1", "ada", BrainGame::Focus, 60)
            .await
            .unwrap();
        assert_eq!(outcome.stats.total_score, 170);
    }

    #[tokio::test]
    async fn per_game_leaderboard_drops_non_players() {
        let tracker = tracker();
        tracker
            .save_score("u1", "ada", BrainGame::Memory, 100)
            .await
            .unwrap();
        tracker
            .save_score("u2", "bob", BrainGame::Focus, 200)
            .await
            .unwrap();
        tracker
            .save_score("u3", "eve", BrainGame::Memory, 150)
            .await
            .unwrap();

        let board = tracker
            .leaderboard(Some(BrainGame::Memory), &LeaderboardQuery::default())
            .await;
        let order: Vec<&str> = board.entries.iter().map(|e| e.user_id.as_str()).collect();
        assert_eq!(order, vec!["u3", "u1"]);
        assert_eq!(board.total, 2);
    }

    #[tokio::test]
    async fn overall_leaderboard_sorts_by_total() {
        let tracker = tracker();
        tracker
            .save_score("u1", "ada", BrainGame::Memory, 100)
            .await
            .unwrap();
        tracker
            .save_score("u2", "bob", BrainGame::Focus, 250)
            .await
            .unwrap();

        let board = tracker
            .leaderboard(
                None,
                &LeaderboardQuery {
                    for_user: Some("u1".into()),
                    ..Default::default()
                },
            )
            .await;
        let order: Vec<&str> = board.entries.iter().map(|e| e.user_id.as_str()).collect();
        assert_eq!(order, vec!["u2", "u1"]);
        assert_eq!(board.user_rank, Some(2));
    }

    #[tokio::test]
    async fn index_tracks_exactly_the_users_with_scores() {
        let tracker = tracker();
        tracker
            .save_score("u1", "ada", BrainGame::Memory, 10)
            .await
            .unwrap();
        // Rejected submission must not register a record-less user.
        tracker
            .save_score("u2", "bob", BrainGame::Memory, 0)
            .await
            .unwrap();

        let members = tracker.store.smembers(INDEX_KEY).await.unwrap();
        assert_eq!(members, vec!["u1".to_string()]);
    }

    #[tokio::test]
    async fn unknown_game_ids_are_rejected_at_parse() {
        assert!("memory".parse::<BrainGame>().is_ok());
        assert!("tetris".parse::<BrainGame>().is_err());
    }
}
