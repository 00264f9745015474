use super::card::Card;
use super::set::CardSet;
use super::street::Street;

/// The community cards visible to all players.
///
/// A board contains 0, 3, 4, or 5 cards corresponding to preflop, flop,
/// turn, and river. Cards are added incrementally as streets progress.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board(CardSet);

impl Board {
    /// An empty board (preflop state).
    pub fn empty() -> Self {
        Self(CardSet::empty())
    }
    /// Adds cards to the board. Panics if they overlap the existing board.
    pub fn add(&mut self, cards: Vec<Card>) {
        self.0 = CardSet::union(self.0, CardSet::from(cards));
    }
    pub fn size(&self) -> usize {
        self.0.size()
    }
    pub fn cards(&self) -> Vec<Card> {
        Vec::from(self.0)
    }
    /// Infers the current street from board size.
    pub fn street(&self) -> Street {
        match self.0.size() {
            0 => Street::Pref,
            3 => Street::Flop,
            4 => Street::Turn,
            5 => Street::Rive,
            n => panic!("invalid board size: {}", n),
        }
    }
}

impl From<Board> for CardSet {
    fn from(board: Board) -> Self {
        board.0
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.cards()
                .into_iter()
                .map(|c| c.to_string())
                .collect::<Vec<String>>()
                .join(" ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::Deck;

    #[test]
    fn board_tracks_street() {
        let mut deck = Deck::seeded(3);
        let mut board = Board::empty();
        assert_eq!(board.street(), Street::Pref);
        board.add(deck.deal(3).unwrap());
        assert_eq!(board.street(), Street::Flop);
        board.add(deck.deal(1).unwrap());
        assert_eq!(board.street(), Street::Turn);
        board.add(deck.deal(1).unwrap());
        assert_eq!(board.street(), Street::Rive);
    }
}
