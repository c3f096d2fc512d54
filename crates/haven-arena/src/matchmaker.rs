//! Matchmaking queues and session lifecycle.

use chrono::Utc;
use haven_store::KvStore;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::board::{Board, Mark, Terminal};
use crate::error::ArenaError;
use crate::session::{GameSession, GameType, Player, SessionStatus};

fn queue_key(game_type: GameType) -> String {
    format!("arena:queue:{game_type}")
}

fn entry_key(game_type: GameType, user_id: &str) -> String {
    format!("arena:queue:{game_type}:{user_id}")
}

fn session_key(game_id: &str) -> String {
    format!("arena:session:{game_id}")
}

fn assignment_key(user_id: &str) -> String {
    format!("user:{user_id}:arena")
}

impl GameType {
    /// Index into the per-game-type pairing locks.
    fn slot(self) -> usize {
        match self {
            GameType::TicTacToe => 0,
        }
    }
}

/// Result of a queue join.
#[derive(Debug, Clone, Serialize)]
pub struct JoinOutcome {
    pub matched: bool,
    pub game_id: Option<String>,
    /// Opponent display name, present when matched.
    pub opponent: Option<String>,
}

impl JoinOutcome {
    fn waiting() -> Self {
        Self {
            matched: false,
            game_id: None,
            opponent: None,
        }
    }

    fn matched(game_id: String, opponent: String) -> Self {
        Self {
            matched: true,
            game_id: Some(game_id),
            opponent: Some(opponent),
        }
    }
}

/// Pairs waiting players and manages their sessions.
///
/// The waiting-set check, removal, and session creation must not interleave
/// between two joiners, so each game type has a pairing mutex serializing
/// the whole join sequence.
pub struct Matchmaker<S> {
    store: S,
    pairing: [Mutex<()>; GameType::ALL.len()],
}

impl<S: KvStore> Matchmaker<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            pairing: std::array::from_fn(|_| Mutex::new(())),
        }
    }

    /// Join the waiting list for a game type, pairing immediately when a
    /// distinct user is already waiting.
    ///
    /// Idempotent: a user with a live session of this game type gets that
    /// session back instead of being re-queued, and a user already waiting
    /// stays queued with a single entry.
    pub async fn join(
        &self,
        user_id: &str,
        username: &str,
        game_type: GameType,
    ) -> Result<JoinOutcome, ArenaError> {
        let _pairing = self.pairing[game_type.slot()].lock().await;

        match self.user_game(user_id).await? {
            Some(session)
                if session.game_type == game_type
                    && session.status != SessionStatus::Finished =>
            {
                debug!(user_id, game_id = %session.game_id, "join is idempotent, session exists");
                let opponent = session
                    .opponent_of(user_id)
                    .map(|p| p.username.clone())
                    .unwrap_or_default();
                return Ok(JoinOutcome::matched(session.game_id, opponent));
            }
            Some(_) => {
                // Stale or finished assignment; clear it and queue normally.
                self.store.del(&assignment_key(user_id)).await?;
            }
            None => {}
        }

        let queue = queue_key(game_type);
        let waiter = self
            .store
            .smembers(&queue)
            .await?
            .into_iter()
            .find(|w| w != user_id);

        let Some(waiter_id) = waiter else {
            self.store.sadd(&queue, user_id).await?;
            self.store
                .hset_all(
                    &entry_key(game_type, user_id),
                    &[
                        ("username".into(), username.to_string()),
                        ("joined_at".into(), Utc::now().timestamp().to_string()),
                    ],
                )
                .await?;
            return Ok(JoinOutcome::waiting());
        };

        let waiter_entry = self.store.hget_all(&entry_key(game_type, &waiter_id)).await?;
        let waiter_name = waiter_entry
            .get("username")
            .cloned()
            .unwrap_or_else(|| waiter_id.clone());

        // Both leave the waiting set before the session becomes visible.
        self.store.srem(&queue, &waiter_id).await?;
        self.store.del(&entry_key(game_type, &waiter_id)).await?;
        self.store.srem(&queue, user_id).await?;
        self.store.del(&entry_key(game_type, user_id)).await?;

        let now = Utc::now().timestamp();
        let session = GameSession {
            game_id: Uuid::new_v4().to_string(),
            game_type,
            players: [
                Player {
                    user_id: waiter_id.clone(),
                    username: waiter_name.clone(),
                    mark: Mark::X,
                },
                Player {
                    user_id: user_id.to_string(),
                    username: username.to_string(),
                    mark: Mark::O,
                },
            ],
            board: Board::new(),
            current_turn: Mark::X,
            status: SessionStatus::Active,
            winner: None,
            created_at: now,
            updated_at: now,
        };
        self.put_session(&session).await?;
        self.store
            .set(&assignment_key(&waiter_id), &session.game_id)
            .await?;
        self.store
            .set(&assignment_key(user_id), &session.game_id)
            .await?;

        info!(
            game_id = %session.game_id,
            %game_type,
            player_x = %waiter_id,
            player_o = %user_id,
            "matched"
        );
        Ok(JoinOutcome::matched(session.game_id, waiter_name))
    }

    /// Withdraw from the waiting list. No-op when not queued.
    pub async fn leave(&self, user_id: &str, game_type: GameType) -> Result<(), ArenaError> {
        self.store.srem(&queue_key(game_type), user_id).await?;
        self.store.del(&entry_key(game_type, user_id)).await?;
        Ok(())
    }

    /// The session the user is currently assigned to, if any.
    pub async fn user_game(&self, user_id: &str) -> Result<Option<GameSession>, ArenaError> {
        let Some(game_id) = self.store.get(&assignment_key(user_id)).await? else {
            return Ok(None);
        };
        self.session(&game_id).await
    }

    /// Load a session by id.
    pub async fn session(&self, game_id: &str) -> Result<Option<GameSession>, ArenaError> {
        match self.store.get(&session_key(game_id)).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Apply one move.
    ///
    /// Validation happens against the freshly loaded session — status and
    /// turn ownership are re-checked at write time, so a move landing after
    /// the game ended is rejected instead of corrupting the record. Any
    /// rejection leaves the session untouched.
    pub async fn apply_move(
        &self,
        game_id: &str,
        user_id: &str,
        position: usize,
    ) -> Result<GameSession, ArenaError> {
        let mut session = self
            .session(game_id)
            .await?
            .ok_or(ArenaError::GameNotFound)?;

        if session.status != SessionStatus::Active {
            return Err(ArenaError::GameNotActive);
        }
        let mark = session
            .player(user_id)
            .ok_or(ArenaError::NotAPlayer)?
            .mark;
        if mark != session.current_turn {
            return Err(ArenaError::NotYourTurn);
        }
        if !Board::in_range(position) {
            return Err(ArenaError::PositionOutOfRange(position));
        }
        if session.board.cell(position).is_some() {
            return Err(ArenaError::PositionTaken(position));
        }

        session.board.place(position, mark);
        match session.board.terminal() {
            Some(Terminal::Win(_)) => {
                session.status = SessionStatus::Finished;
                session.winner = Some(user_id.to_string());
            }
            Some(Terminal::Draw) => {
                session.status = SessionStatus::Finished;
                session.winner = None;
            }
            None => session.current_turn = mark.other(),
        }
        session.updated_at = Utc::now().timestamp();

        self.put_session(&session).await?;
        if session.status == SessionStatus::Finished {
            info!(game_id, winner = ?session.winner, "game finished");
            self.clear_assignments(&session).await?;
        }
        Ok(session)
    }

    /// Tear a session down, for normal completion or abandonment.
    ///
    /// No-op when the session does not exist.
    pub async fn end_game(&self, game_id: &str) -> Result<(), ArenaError> {
        let Some(session) = self.session(game_id).await? else {
            return Ok(());
        };
        self.clear_assignments(&session).await?;
        self.store.del(&session_key(game_id)).await?;
        info!(game_id, "game ended");
        Ok(())
    }

    async fn put_session(&self, session: &GameSession) -> Result<(), ArenaError> {
        let raw = serde_json::to_string(session)?;
        self.store.set(&session_key(&session.game_id), &raw).await?;
        Ok(())
    }

    /// Drop both players' assignment pointers, but only while they still
    /// point at this session.
    async fn clear_assignments(&self, session: &GameSession) -> Result<(), ArenaError> {
        for player in &session.players {
            let key = assignment_key(&player.user_id);
            if self.store.get(&key).await?.as_deref() == Some(session.game_id.as_str()) {
                self.store.del(&key).await?;
            }
        }
        Ok(())
    }
}
