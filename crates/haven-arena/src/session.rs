//! Game session records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Mark};

/// The closed set of head-to-head game types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameType {
    TicTacToe,
}

impl GameType {
    /// All game types with a matchmaking queue.
    pub const ALL: [GameType; 1] = [GameType::TicTacToe];

    /// Canonical identifier, matching the wire and key encoding.
    pub fn as_str(self) -> &'static str {
        match self {
            GameType::TicTacToe => "tic-tac-toe",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tic-tac-toe" | "tictactoe" => Ok(GameType::TicTacToe),
            other => Err(format!("unknown game type: {other}")),
        }
    }
}

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Waiting,
    Active,
    Finished,
}

/// One seat in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub user_id: String,
    pub username: String,
    pub mark: Mark,
}

/// A live two-player game: shared board state and turn order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub game_id: String,
    pub game_type: GameType,
    pub players: [Player; 2],
    pub board: Board,
    /// Mark whose turn it is. Meaningless once finished.
    pub current_turn: Mark,
    pub status: SessionStatus,
    /// Winner's user id; `None` while running or on a draw.
    pub winner: Option<String>,
    /// Unix seconds.
    pub created_at: i64,
    pub updated_at: i64,
}

impl GameSession {
    /// The seat held by `user_id`, if any.
    pub fn player(&self, user_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.user_id == user_id)
    }

    /// The other seat, from `user_id`'s perspective.
    pub fn opponent_of(&self, user_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.user_id != user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_type_parses_both_spellings() {
        assert_eq!("tic-tac-toe".parse::<GameType>().unwrap(), GameType::TicTacToe);
        assert_eq!("TicTacToe".parse::<GameType>().unwrap(), GameType::TicTacToe);
        assert!("chess".parse::<GameType>().is_err());
    }

    #[test]
    fn session_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SessionStatus::Active).unwrap(),
            "\"active\""
        );
    }
}
