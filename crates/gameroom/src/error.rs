use cardroom_gameplay::RuleError;

/// Everything a room can refuse to do.
///
/// All variants are recoverable: a rejected request leaves the room
/// exactly as it was. Fatal conditions inside a hand (a deck running
/// dry) never reach the caller as such; the room refunds the hand and
/// reports the abort through [`TableError::IllegalAction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The action breaks a betting rule; the reason says which.
    IllegalAction(String),
    /// The submitting seat is not the one on turn.
    NotYourTurn,
    /// Every chair is taken.
    RoomFull,
    /// The ledger would not cover the buy-in.
    InsufficientBalance,
    /// Fewer than two funded seats are ready to play.
    NotEnoughSeats,
    /// The request cannot be honored while a hand is live.
    HandInProgress,
    /// The room task has shut down.
    RoomClosed,
}

impl From<RuleError> for TableError {
    fn from(e: RuleError) -> Self {
        match e {
            RuleError::NotYourTurn => Self::NotYourTurn,
            other => Self::IllegalAction(other.to_string()),
        }
    }
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::IllegalAction(reason) => write!(f, "illegal action: {}", reason),
            Self::NotYourTurn => write!(f, "not your turn"),
            Self::RoomFull => write!(f, "room is full"),
            Self::InsufficientBalance => write!(f, "insufficient balance"),
            Self::NotEnoughSeats => write!(f, "not enough seats"),
            Self::HandInProgress => write!(f, "hand in progress"),
            Self::RoomClosed => write!(f, "room closed"),
        }
    }
}

impl std::error::Error for TableError {}
