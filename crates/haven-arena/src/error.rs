//! Arena error types.

use haven_store::StoreError;

/// Arena error.
///
/// Move-validation variants reject the request without mutating the
/// session; `Store`/`Codec` indicate infrastructure failures.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    /// Store failure.
    #[error("store: {0}")]
    Store(#[from] StoreError),

    /// A stored session could not be encoded or decoded.
    #[error("session codec: {0}")]
    Codec(#[from] serde_json::Error),

    /// No session with the given id.
    #[error("game not found")]
    GameNotFound,

    /// The session is not accepting moves.
    #[error("game is not active")]
    GameNotActive,

    /// The user is not one of the session's players.
    #[error("not a player in this game")]
    NotAPlayer,

    /// It is the other player's turn.
    #[error("not your turn")]
    NotYourTurn,

    /// Move position outside the board.
    #[error("position {0} is out of range")]
    PositionOutOfRange(usize),

    /// Move position already occupied.
    #[error("position {0} is already taken")]
    PositionTaken(usize),
}

impl ArenaError {
    /// Whether this is a request-validation failure (client error) as
    /// opposed to an infrastructure failure.
    pub fn is_validation(&self) -> bool {
        !matches!(self, ArenaError::Store(_) | ArenaError::Codec(_))
    }
}
