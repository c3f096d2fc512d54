//! Matchmaking and two-player game sessions.
//!
//! A [`Matchmaker`] pairs the first two distinct users waiting for the same
//! [`GameType`], creates a [`GameSession`], applies moves against the board
//! rules, and tears the session down on a terminal state or an explicit end.
//!
//! Pairing is check-remove-create against the store. Those three steps must
//! be indivisible or two simultaneous joiners can both claim the same
//! waiter, so the matchmaker serializes them behind a per-game-type async
//! mutex: one pairing in flight per game type per service instance.

mod board;
mod error;
mod matchmaker;
mod session;

pub use board::{Board, Mark, Terminal};
pub use error::ArenaError;
pub use matchmaker::{JoinOutcome, Matchmaker};
pub use session::{GameSession, GameType, Player, SessionStatus};
