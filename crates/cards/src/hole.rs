use super::card::Card;
use super::set::CardSet;

/// A player's two private hole cards.
///
/// Wraps a [`CardSet`] with the constraint that exactly two cards are present.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct Hole(CardSet);

impl Hole {
    pub fn cards(&self) -> Vec<Card> {
        Vec::from(self.0)
    }
}

impl From<Hole> for CardSet {
    fn from(hole: Hole) -> Self {
        hole.0
    }
}

impl From<(Card, Card)> for Hole {
    fn from(cards: (Card, Card)) -> Self {
        let a = u64::from(cards.0);
        let b = u64::from(cards.1);
        debug_assert!(a != b);
        Self(CardSet::from(a | b))
    }
}

impl TryFrom<&str> for Hole {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let set = CardSet::try_from(s)?;
        match set.size() {
            2 => Ok(Self(set)),
            _ => Err("hole must contain exactly two cards".into()),
        }
    }
}

impl std::fmt::Display for Hole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
