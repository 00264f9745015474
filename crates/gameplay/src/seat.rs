use cardroom_cards::Hole;
use cardroom_core::Chips;
use cardroom_core::Position;

/// A player's state within one hand.
///
/// Tracks chips and betting status. The `cards` field is private
/// information; only the gameroom layer decides who gets to see it.
///
/// # Fields
///
/// - `position` — The room chair this seat occupies
/// - `state` — Betting, Shoving (all-in), or Folding
/// - `stack` — Chips behind (not yet committed)
/// - `stake` — Chips committed this street
/// - `spent` — Total chips committed this hand
/// - `cards` — Hole cards (private)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seat {
    position: Position,
    state: State,
    stack: Chips,
    stake: Chips,
    spent: Chips,
    cards: Hole,
}

impl From<(Position, Chips, Hole)> for Seat {
    fn from((position, stack, cards): (Position, Chips, Hole)) -> Self {
        Self {
            position,
            cards,
            stack,
            spent: 0,
            stake: 0,
            state: State::Betting,
        }
    }
}

impl Seat {
    /// The room chair this seat occupies.
    pub fn position(&self) -> Position {
        self.position
    }
    /// Chips behind (not committed to pot).
    pub fn stack(&self) -> Chips {
        self.stack
    }
    /// Chips committed this street.
    pub fn stake(&self) -> Chips {
        self.stake
    }
    /// Total chips committed this hand.
    pub fn spent(&self) -> Chips {
        self.spent
    }
    /// Current betting status.
    pub fn state(&self) -> State {
        self.state
    }
    /// Hole cards (private information).
    pub fn cards(&self) -> Hole {
        self.cards
    }

    /// Commits chips from stack to the pot. Goes all-in when the
    /// stack runs out.
    pub fn bet(&mut self, bet: Chips) {
        debug_assert!(bet <= self.stack);
        self.stack -= bet;
        self.stake += bet;
        self.spent += bet;
        if self.stack == 0 {
            self.state = State::Shoving;
        }
    }
    /// Adds winnings to stack.
    pub fn win(&mut self, win: Chips) {
        self.stack += win;
    }
    /// Returns all committed chips to the stack. Only meaningful when
    /// a hand aborts before settlement.
    pub fn refund(&mut self) {
        self.stack += self.spent;
        self.spent = 0;
        self.stake = 0;
    }
    pub fn fold(&mut self) {
        self.state = State::Folding;
    }
    pub fn reset_stake(&mut self) {
        self.stake = 0;
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {} ${:>4}", self.state, self.cards, self.stack)
    }
}

/// Player betting status within a hand.
///
/// - `Betting` — Active and can still make decisions
/// - `Shoving` — All-in, no more decisions but still in the pot
/// - `Folding` — Out of the hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    Betting,
    Shoving,
    Folding,
}

impl State {
    /// True if still competing for the pot.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Betting | Self::Shoving)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            State::Betting => write!(f, "P"),
            State::Shoving => write!(f, "S"),
            State::Folding => write!(f, "F"),
        }
    }
}
