use super::card::Card;
use super::hole::Hole;
use super::set::CardSet;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// A shuffled deck dealt from the top.
///
/// All 52 cards are shuffled up front and then drawn sequentially,
/// so a seed fully determines the order of every card dealt. Drawing
/// past the end is a [`DeckError::Exhausted`], which callers treat as
/// fatal for the hand in progress.
#[derive(Debug, Clone)]
pub struct Deck(Vec<Card>);

impl Deck {
    /// A fresh deck shuffled from entropy.
    pub fn shuffled() -> Self {
        Self::seeded(rand::random())
    }

    /// A fresh deck shuffled deterministically from a seed.
    pub fn seeded(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut cards = Vec::<Card>::from(CardSet::full());
        cards.shuffle(&mut rng);
        Self(cards)
    }

    pub fn remaining(&self) -> usize {
        self.0.len()
    }

    /// Draw the top card.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        self.0.pop().ok_or(DeckError::Exhausted)
    }

    /// Draw the top n cards at once. All-or-nothing.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if self.remaining() < n {
            Err(DeckError::Exhausted)
        } else {
            Ok((0..n).map_while(|_| self.0.pop()).collect())
        }
    }

    /// Draw two cards as a player's hole.
    pub fn hole(&mut self) -> Result<Hole, DeckError> {
        let a = self.draw()?;
        let b = self.draw()?;
        Ok(Hole::from((a, b)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckError {
    Exhausted,
}

impl std::fmt::Display for DeckError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DeckError::Exhausted => write!(f, "deck exhausted"),
        }
    }
}

impl std::error::Error for DeckError {}
