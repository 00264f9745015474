use crate::pots::Pots;
use crate::seat::Seat;
use crate::seat::State;
use cardroom_cards::Board;
use cardroom_cards::CardSet;
use cardroom_cards::Strength;
use cardroom_core::Chips;
use cardroom_core::Position;

/// A seat's outcome from settlement.
///
/// `strength` is None when the hand ended without a showdown (everyone
/// else folded), since no cards were revealed to justify an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payout {
    pub position: Position,
    pub chips: Chips,
    pub strength: Option<Strength>,
}

/// Chip distribution at the end of a hand.
///
/// Each pot from [`Pots::settle`] is awarded independently to the best
/// eligible strength, split evenly on ties. Odd chips that do not divide
/// evenly go one each to the tied winners in clockwise order from the
/// dealer button, which keeps splits deterministic.
pub struct Showdown;

impl Showdown {
    /// Settles a finished hand into per-seat payouts.
    ///
    /// Every non-folded seat appears in the result, with zero chips if it
    /// won nothing. When more than one seat remains, each carries its
    /// evaluated strength for reveal purposes.
    pub fn settle(seats: &[Seat], board: Board, dealer: usize) -> Vec<Payout> {
        let n = seats.len();
        let contested = seats.iter().filter(|s| s.state() != State::Folding).count() > 1;
        let strengths = seats
            .iter()
            .map(|s| match (contested, s.state()) {
                (true, State::Betting) | (true, State::Shoving) => Some(Strength::from(
                    CardSet::union(CardSet::from(s.cards()), CardSet::from(board)),
                )),
                _ => None,
            })
            .collect::<Vec<Option<Strength>>>();
        let mut winnings = vec![0 as Chips; n];
        for pot in Pots::settle(seats) {
            let best = pot
                .eligible
                .iter()
                .map(|i| strengths[*i])
                .max()
                .expect("every pot has an eligible seat");
            let mut winners = pot
                .eligible
                .into_iter()
                .filter(|i| strengths[*i] == best)
                .collect::<Vec<usize>>();
            // clockwise from the button for odd-chip assignment
            winners.sort_by_key(|i| (i + n - 1 - dealer) % n);
            let share = pot.amount / winners.len() as Chips;
            let bonus = pot.amount % winners.len() as Chips;
            for winner in winners.iter() {
                winnings[*winner] += share;
            }
            for winner in winners.iter().take(bonus as usize) {
                winnings[*winner] += 1;
            }
        }
        seats
            .iter()
            .enumerate()
            .filter(|(_, s)| s.state() != State::Folding)
            .map(|(i, s)| Payout {
                position: s.position(),
                chips: winnings[i],
                strength: strengths[i],
            })
            .collect()
    }
}
