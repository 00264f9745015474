use cardroom_cards::DeckError;

/// Why the engine rejected or aborted a transition.
///
/// `Illegal` and `NotYourTurn` are recoverable: the hand state is
/// untouched and the caller may try again. `Deck` is fatal to the hand;
/// the room layer aborts and refunds all committed chips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    Illegal(String),
    NotYourTurn,
    Deck(DeckError),
}

impl RuleError {
    pub fn illegal(reason: &str) -> Self {
        Self::Illegal(reason.to_string())
    }
    pub fn is_fatal(&self) -> bool {
        matches!(self, RuleError::Deck(_))
    }
}

impl From<DeckError> for RuleError {
    fn from(e: DeckError) -> Self {
        Self::Deck(e)
    }
}

impl std::fmt::Display for RuleError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RuleError::Illegal(reason) => write!(f, "illegal action: {}", reason),
            RuleError::NotYourTurn => write!(f, "not your turn"),
            RuleError::Deck(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RuleError {}
