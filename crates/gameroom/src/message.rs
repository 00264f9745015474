use cardroom_cards::*;
use cardroom_core::*;
use cardroom_gameplay::Payout;
use serde::Serialize;

/// Events a room pushes to its watchers, ready for a transport layer.
///
/// Every per-hand variant carries the hand number so a client can drop
/// stale events from a hand it has already seen end.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Watcher attached to a room at the given seat.
    Seated { room: String, seat: Position },
    /// A new hand is starting.
    HandStart {
        hand: u64,
        dealer: Position,
        stacks: Vec<(Position, Chips)>,
    },
    /// Your hole cards. Unicast only.
    HoleCards { hand: u64, cards: String },
    /// Community cards after a street change, cumulative.
    Board {
        hand: u64,
        street: Street,
        cards: Vec<String>,
    },
    /// A seat acted.
    Action {
        hand: u64,
        seat: Position,
        action: String,
        pot: Chips,
    },
    /// You are on the clock.
    Decision {
        hand: u64,
        to_call: Chips,
        min_raise_to: Chips,
        pot: Chips,
    },
    /// Showdown reveals, one entry per contender.
    Showdown { hand: u64, reveals: Vec<Reveal> },
    /// Settlement results.
    HandEnd { hand: u64, winners: Vec<Winner> },
}

/// A contender's cards at showdown. `cards` is None for a seat that won
/// uncontested and never had to show.
#[derive(Clone, Debug, Serialize)]
pub struct Reveal {
    pub seat: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<String>,
}

/// A payout line at hand end.
#[derive(Clone, Debug, Serialize)]
pub struct Winner {
    pub seat: Position,
    pub amount: Chips,
}

impl ServerMessage {
    pub fn seated(room: &str, seat: Position) -> Self {
        Self::Seated {
            room: room.to_string(),
            seat,
        }
    }
    pub fn hole_cards(hand: u64, hole: Hole) -> Self {
        Self::HoleCards {
            hand,
            cards: hole.to_string(),
        }
    }
    pub fn board(hand: u64, street: Street, board: Board) -> Self {
        Self::Board {
            hand,
            street,
            cards: board.cards().iter().map(Card::to_string).collect(),
        }
    }
    pub fn action(hand: u64, seat: Position, action: &str, pot: Chips) -> Self {
        Self::Action {
            hand,
            seat,
            action: action.to_string(),
            pot,
        }
    }
    pub fn hand_end(hand: u64, payouts: &[Payout]) -> Self {
        Self::HandEnd {
            hand,
            winners: payouts
                .iter()
                .filter(|p| p.chips > 0)
                .map(|p| Winner {
                    seat: p.position,
                    amount: p.chips,
                })
                .collect(),
        }
    }
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn messages_are_tagged() {
        let json = ServerMessage::action(3, 1, "raise", 150).to_json();
        assert!(json.contains(r#""type":"action""#));
        assert!(json.contains(r#""hand":3"#));
    }
    #[test]
    fn uncontested_reveal_hides_cards() {
        let msg = ServerMessage::Showdown {
            hand: 1,
            reveals: vec![Reveal {
                seat: 0,
                cards: None,
            }],
        };
        assert!(!msg.to_json().contains("cards"));
    }
}
