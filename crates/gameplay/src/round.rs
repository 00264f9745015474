use crate::seat::Seat;
use crate::seat::State;
use cardroom_cards::Street;
use cardroom_core::Chips;

/// One street's betting state.
///
/// Tracks the bet to match, the size of the last full raise, and which
/// seats have acted since the action last reopened. Seat indices here
/// are hand-local (0..n around the table for this hand), not room chairs.
///
/// # Reopening
///
/// The `acted` mask is the reopen rule. A full raise clears it down to
/// the raiser alone, giving everyone else a fresh turn with full options.
/// A short all-in (less than a full raise over the current bet) merely
/// marks the shover: earlier actors must still match the new bet, but
/// they may only call or fold, never re-raise.
#[derive(Debug, Clone, Copy)]
pub struct Round {
    street: Street,
    bet: Chips,
    raise: Chips,
    actor: usize,
    acted: u16,
}

impl Round {
    /// Preflop betting: blinds are live, the big blind sets the bet,
    /// and neither blind counts as having acted (the BB keeps its option).
    pub fn preflop(opener: usize, bblind: Chips) -> Self {
        Self {
            street: Street::Pref,
            bet: bblind,
            raise: bblind,
            actor: opener,
            acted: 0,
        }
    }
    /// Postflop betting: no bet to match yet.
    pub fn postflop(street: Street, opener: usize) -> Self {
        Self {
            street,
            bet: 0,
            raise: 0,
            actor: opener,
            acted: 0,
        }
    }

    pub fn street(&self) -> Street {
        self.street
    }
    /// The total stake each live seat must match this street.
    pub fn bet(&self) -> Chips {
        self.bet
    }
    /// The seat on turn, if any seat can still make a decision.
    pub fn actor(&self, seats: &[Seat]) -> Option<usize> {
        match seats[self.actor].state() {
            State::Betting => Some(self.actor),
            _ => None,
        }
    }

    /// The minimum legal raise-to amount.
    pub fn min_raise_to(&self, bblind: Chips) -> Chips {
        self.bet + std::cmp::max(self.raise, bblind)
    }
    /// True if this raise-to amount constitutes a full raise,
    /// which reopens the action.
    pub fn is_full_raise(&self, to: Chips, bblind: Chips) -> bool {
        to >= self.min_raise_to(bblind)
    }
    /// True if this seat may still raise. Seats that already acted lose
    /// the option when the action was reopened only by a short all-in.
    pub fn may_raise(&self, index: usize) -> bool {
        self.acted & (1 << index) == 0
    }

    /// Records a check or call: the seat has acted, nothing reopens.
    pub fn mark(&mut self, index: usize) {
        self.acted |= 1 << index;
    }
    /// Records a bet or raise to a new total. A full raise resets the
    /// acted mask to the raiser alone; a short all-in only marks them.
    pub fn raise_to(&mut self, index: usize, to: Chips, bblind: Chips) {
        debug_assert!(to > self.bet);
        if self.is_full_raise(to, bblind) {
            self.raise = to - self.bet;
            self.acted = 1 << index;
        } else {
            self.acted |= 1 << index;
        }
        self.bet = to;
    }

    /// Advances the turn cursor to the next seat still able to decide.
    pub fn advance(&mut self, seats: &[Seat]) {
        for _ in 0..seats.len() {
            self.actor = (self.actor + 1) % seats.len();
            if seats[self.actor].state() == State::Betting {
                return;
            }
        }
    }

    /// True when the street's betting is done: every seat that can still
    /// decide has matched the bet, and either all of them have acted or
    /// fewer than two remain (betting is moot against all-in opponents
    /// once the bet is matched). Vacuously true when nobody can decide.
    pub fn is_complete(&self, seats: &[Seat]) -> bool {
        let betting = seats
            .iter()
            .enumerate()
            .filter(|(_, s)| s.state() == State::Betting)
            .collect::<Vec<(usize, &Seat)>>();
        betting.iter().all(|(_, s)| s.stake() == self.bet)
            && (betting.len() < 2 || betting.iter().all(|(i, _)| self.acted & (1 << i) != 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardroom_cards::Hole;

    const BB: Chips = 10;

    fn seats(stacks: &[Chips]) -> Vec<Seat> {
        let holes = [
            "As Ks", "Qs Js", "Ts 9s", "8s 7s", "6s 5s", "4s 3s", "2s 2h", "3h 4h", "5h 6h",
        ];
        stacks
            .iter()
            .enumerate()
            .map(|(i, stack)| Seat::from((i, *stack, Hole::try_from(holes[i]).unwrap())))
            .collect()
    }

    #[test]
    fn min_raise_doubles_the_bet_increment() {
        let mut round = Round::postflop(Street::Flop, 0);
        let seats = seats(&[1000, 1000, 1000]);
        round.raise_to(0, 100, BB);
        assert_eq!(round.min_raise_to(BB), 200);
        round.raise_to(1, 250, BB);
        assert_eq!(round.min_raise_to(BB), 400);
        assert!(!round.is_complete(&seats));
    }

    #[test]
    fn min_raise_floor_is_the_big_blind() {
        let round = Round::postflop(Street::Turn, 0);
        assert_eq!(round.min_raise_to(BB), BB);
    }

    #[test]
    fn full_raise_reopens_action() {
        let mut round = Round::postflop(Street::Flop, 0);
        round.raise_to(0, 100, BB);
        round.mark(1);
        assert!(!round.may_raise(0));
        round.raise_to(2, 200, BB);
        assert!(round.may_raise(0));
        assert!(round.may_raise(1));
        assert!(!round.may_raise(2));
    }

    #[test]
    fn short_all_in_does_not_reopen() {
        let mut round = Round::postflop(Street::Flop, 0);
        round.raise_to(0, 100, BB);
        // a shove to 130 is short of the 200 minimum
        round.raise_to(1, 130, BB);
        assert_eq!(round.bet(), 130);
        assert!(!round.may_raise(0));
        assert_eq!(round.min_raise_to(BB), 230);
    }

    #[test]
    fn checked_around_completes() {
        let mut round = Round::postflop(Street::Flop, 0);
        let seats = seats(&[100, 100, 100]);
        round.mark(0);
        round.advance(&seats);
        round.mark(1);
        round.advance(&seats);
        assert!(!round.is_complete(&seats));
        round.mark(2);
        assert!(round.is_complete(&seats));
    }

    #[test]
    fn big_blind_keeps_the_option() {
        let mut round = Round::preflop(0, BB);
        let mut seats = seats(&[100, 100, 100]);
        seats[1].bet(10);
        seats[2].bet(10);
        seats[0].bet(10);
        round.mark(0);
        // everyone has matched, but the big blind has not acted yet
        assert!(!round.is_complete(&seats));
        round.mark(1);
        round.mark(2);
        assert!(round.is_complete(&seats));
    }
}
