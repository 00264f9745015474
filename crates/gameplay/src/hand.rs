use crate::action::Action;
use crate::entry::ActKind;
use crate::entry::Entry;
use crate::error::RuleError;
use crate::round::Round;
use crate::seat::Seat;
use crate::seat::State;
use crate::showdown::Payout;
use crate::showdown::Showdown;
use crate::stage::Stage;
use cardroom_cards::Board;
use cardroom_cards::Deck;
use cardroom_cards::Street;
use cardroom_core::Chips;
use cardroom_core::MAX_SEATS;
use cardroom_core::MIN_SEATS;
use cardroom_core::Position;
use cardroom_core::Sequence;

/// The authoritative state machine for one hand.
///
/// Owns the deck, board, seats, betting round, and action log from blind
/// posting to settlement. Transitions happen only through [`apply`](Self::apply):
/// an accepted action mutates state and may cascade (complete a street,
/// deal the next one, run out the board, settle); a rejected action
/// returns an error and leaves the state byte-for-byte unchanged.
///
/// Seat indices inside the hand are 0..n in table order; each [`Seat`]
/// remembers which room chair it belongs to.
#[derive(Debug, Clone)]
pub struct Hand {
    deck: Deck,
    board: Board,
    seats: Vec<Seat>,
    dealer: usize,
    small: usize,
    big: usize,
    sblind: Chips,
    bblind: Chips,
    stage: Stage,
    round: Round,
    log: Vec<Entry>,
    payouts: Vec<Payout>,
}

/// Hand lifecycle.
impl Hand {
    /// Deals a new hand: hole cards out, blinds posted, preflop open.
    ///
    /// `players` are the participating chairs in table order with their
    /// stacks; `dealer` indexes into that list. Heads-up, the dealer
    /// posts the small blind and acts first preflop. Short stacks post
    /// what they can and are all-in.
    pub fn begin(
        players: Vec<(Position, Chips)>,
        dealer: usize,
        blinds: (Chips, Chips),
        mut deck: Deck,
    ) -> Result<Self, RuleError> {
        let n = players.len();
        if !(MIN_SEATS..=MAX_SEATS).contains(&n) {
            return Err(RuleError::illegal("wrong number of players"));
        }
        if dealer >= n {
            return Err(RuleError::illegal("dealer out of range"));
        }
        if players.iter().any(|(_, stack)| *stack <= 0) {
            return Err(RuleError::illegal("seat without chips"));
        }
        let seats = players
            .into_iter()
            .map(|(position, stack)| Ok(Seat::from((position, stack, deck.hole()?))))
            .collect::<Result<Vec<Seat>, RuleError>>()?;
        let (small, big) = match n {
            2 => (dealer, (dealer + 1) % 2),
            _ => ((dealer + 1) % n, (dealer + 2) % n),
        };
        let (sblind, bblind) = blinds;
        let mut hand = Self {
            deck,
            board: Board::empty(),
            seats,
            dealer,
            small,
            big,
            sblind,
            bblind,
            stage: Stage::Betting(Street::Pref),
            round: Round::preflop(0, bblind),
            log: Vec::new(),
            payouts: Vec::new(),
        };
        hand.post(small, sblind, ActKind::SmallBlind);
        hand.post(big, bblind, ActKind::BigBlind);
        let opener = hand.next_betting_from((big + 1) % n).unwrap_or(big);
        hand.round = Round::preflop(opener, bblind);
        hand.ripen()?;
        Ok(hand)
    }

    /// Aborts the hand: every committed chip goes back to its stack.
    /// Called by the room when a fatal error surfaces mid-hand.
    pub fn abort(&mut self) {
        log::warn!("aborting hand, refunding {} chips", self.pot());
        for seat in self.seats.iter_mut() {
            seat.refund();
        }
        self.payouts.clear();
        self.stage = Stage::Finished;
    }
}

/// Action validation and application.
impl Hand {
    /// Applies a player action, cascading through any street transitions
    /// and settlement it triggers.
    ///
    /// Rejections (`NotYourTurn`, `Illegal`) leave state unchanged. A
    /// deck error aborts the hand with refunds before propagating.
    pub fn apply(&mut self, position: Position, action: Action) -> Result<(), RuleError> {
        let index = match self.stage {
            Stage::Betting(_) => self
                .round
                .actor(&self.seats)
                .ok_or(RuleError::NotYourTurn)?,
            _ => return Err(RuleError::illegal("hand is over")),
        };
        if self.seats[index].position() != position {
            return Err(RuleError::NotYourTurn);
        }
        match action {
            Action::Fold => self.fold(index),
            Action::Check => self.check(index)?,
            Action::Call => self.call(index)?,
            Action::Raise(to) => self.raise(index, to)?,
            Action::AllIn => self.shove(index)?,
        }
        self.round.advance(&self.seats);
        if let Err(e) = self.ripen() {
            self.abort();
            return Err(e);
        }
        Ok(())
    }

    /// The action a timed-out or disconnected seat takes: check when
    /// nothing is owed, fold otherwise.
    pub fn passive(&self) -> Action {
        match self.round.actor(&self.seats) {
            Some(i) if self.seats[i].stake() == self.round.bet() => Action::Check,
            _ => Action::Fold,
        }
    }

    fn fold(&mut self, index: usize) {
        self.seats[index].fold();
        self.record(index, ActKind::Fold, 0);
    }

    fn check(&mut self, index: usize) -> Result<(), RuleError> {
        if self.seats[index].stake() != self.round.bet() {
            return Err(RuleError::illegal("check facing a bet"));
        }
        self.round.mark(index);
        self.record(index, ActKind::Check, 0);
        Ok(())
    }

    fn call(&mut self, index: usize) -> Result<(), RuleError> {
        let owed = self.round.bet() - self.seats[index].stake();
        if owed <= 0 {
            return Err(RuleError::illegal("nothing to call"));
        }
        let chips = owed.min(self.seats[index].stack());
        self.seats[index].bet(chips);
        self.round.mark(index);
        match self.seats[index].state() {
            State::Shoving => self.record(index, ActKind::AllIn, chips),
            _ => self.record(index, ActKind::Call, chips),
        }
        Ok(())
    }

    fn raise(&mut self, index: usize, to: Chips) -> Result<(), RuleError> {
        let seat = &self.seats[index];
        if to <= self.round.bet() {
            return Err(RuleError::illegal("raise must exceed the current bet"));
        }
        if !self.round.may_raise(index) {
            return Err(RuleError::illegal("action is not reopened"));
        }
        if !self.round.is_full_raise(to, self.bblind) {
            return Err(RuleError::illegal("raise below minimum"));
        }
        let chips = to - seat.stake();
        if chips > seat.stack() {
            return Err(RuleError::illegal("raise exceeds stack"));
        }
        self.seats[index].bet(chips);
        self.round.raise_to(index, to, self.bblind);
        match self.seats[index].state() {
            State::Shoving => self.record(index, ActKind::AllIn, chips),
            _ => self.record(index, ActKind::Raise, chips),
        }
        Ok(())
    }

    fn shove(&mut self, index: usize) -> Result<(), RuleError> {
        let seat = &self.seats[index];
        let total = seat.stake() + seat.stack();
        if total > self.round.bet() && !self.round.may_raise(index) {
            return Err(RuleError::illegal("action is not reopened"));
        }
        let chips = seat.stack();
        self.seats[index].bet(chips);
        if total > self.round.bet() {
            self.round.raise_to(index, total, self.bblind);
        } else {
            self.round.mark(index);
        }
        self.record(index, ActKind::AllIn, chips);
        Ok(())
    }

    fn post(&mut self, index: usize, blind: Chips, kind: ActKind) {
        let chips = blind.min(self.seats[index].stack());
        self.seats[index].bet(chips);
        self.record(index, kind, chips);
    }

    fn record(&mut self, index: usize, kind: ActKind, amount: Chips) {
        let street = self.stage.street().unwrap_or(Street::Rive);
        self.log.push(Entry {
            seq: self.log.len() as Sequence,
            position: self.seats[index].position(),
            street,
            kind,
            amount,
        });
    }
}

/// Street and settlement cascade.
impl Hand {
    /// Drives the hand forward until a seat must decide or the hand is
    /// finished: completes streets, deals boards, runs out all-in hands,
    /// and settles terminal ones.
    fn ripen(&mut self) -> Result<(), RuleError> {
        loop {
            let street = match self.stage {
                Stage::Betting(street) => street,
                _ => return Ok(()),
            };
            if self.survivors() == 1 {
                self.finish();
                return Ok(());
            }
            if !self.round.is_complete(&self.seats) {
                return Ok(());
            }
            match street.next() {
                None => {
                    self.stage = Stage::Showdown;
                    self.finish();
                    return Ok(());
                }
                Some(next) => {
                    let cards = self.deck.deal(next.n_revealed())?;
                    self.board.add(cards);
                    for seat in self.seats.iter_mut() {
                        seat.reset_stake();
                    }
                    let opener = self
                        .next_betting_from((self.dealer + 1) % self.seats.len())
                        .unwrap_or(self.dealer);
                    self.round = Round::postflop(next, opener);
                    self.stage = Stage::Betting(next);
                }
            }
        }
    }

    /// Settles pots and credits winners. Terminal.
    fn finish(&mut self) {
        let payouts = Showdown::settle(&self.seats, self.board, self.dealer);
        for payout in payouts.iter() {
            if let Some(seat) = self
                .seats
                .iter_mut()
                .find(|s| s.position() == payout.position)
            {
                seat.win(payout.chips);
            }
        }
        for payout in payouts.iter().filter(|p| p.chips > 0) {
            log::debug!("seat {} wins {}", payout.position, payout.chips);
        }
        self.payouts = payouts;
        self.stage = Stage::Finished;
    }

    fn next_betting_from(&self, start: usize) -> Option<usize> {
        let n = self.seats.len();
        (0..n)
            .map(|k| (start + k) % n)
            .find(|i| self.seats[*i].state() == State::Betting)
    }

    fn survivors(&self) -> usize {
        self.seats
            .iter()
            .filter(|s| s.state() != State::Folding)
            .count()
    }
}

/// Public state accessors.
impl Hand {
    pub fn stage(&self) -> Stage {
        self.stage
    }
    pub fn board(&self) -> Board {
        self.board
    }
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }
    /// Total chips committed by all seats this hand.
    pub fn pot(&self) -> Chips {
        self.seats.iter().map(Seat::spent).sum()
    }
    /// The bet each live seat must match on the current street.
    pub fn bet(&self) -> Chips {
        self.round.bet()
    }
    /// The minimum legal raise-to amount on the current street.
    pub fn min_raise_to(&self) -> Chips {
        self.round.min_raise_to(self.bblind)
    }
    /// The chair on turn, if the hand wants a decision.
    pub fn actor(&self) -> Option<Position> {
        match self.stage {
            Stage::Betting(_) => self
                .round
                .actor(&self.seats)
                .map(|i| self.seats[i].position()),
            _ => None,
        }
    }
    /// Button, small blind, and big blind chairs.
    pub fn positions(&self) -> (Position, Position, Position) {
        (
            self.seats[self.dealer].position(),
            self.seats[self.small].position(),
            self.seats[self.big].position(),
        )
    }
    pub fn blinds(&self) -> (Chips, Chips) {
        (self.sblind, self.bblind)
    }
    /// The ordered action log.
    pub fn log(&self) -> &[Entry] {
        &self.log
    }
    /// Settlement results; empty until the hand finishes.
    pub fn payouts(&self) -> &[Payout] {
        &self.payouts
    }
    /// Total chips in play across stacks and the pot. Constant while
    /// the hand is live.
    pub fn total(&self) -> Chips {
        self.pot() + self.seats.iter().map(Seat::stack).sum::<Chips>()
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for seat in self.seats.iter() {
            writeln!(f, "{}", seat)?;
        }
        writeln!(f, "Pot   {}", self.pot())?;
        writeln!(f, "Board {}", self.board)?;
        writeln!(f, "Stage {}", self.stage)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLINDS: (Chips, Chips) = (5, 10);

    fn hand(stacks: &[Chips]) -> Hand {
        let players = stacks
            .iter()
            .enumerate()
            .map(|(i, stack)| (i, *stack))
            .collect();
        Hand::begin(players, 0, BLINDS, Deck::seeded(42)).unwrap()
    }

    /// dealer posts SB heads-up and acts first preflop
    #[test]
    fn heads_up_blinds() {
        let hand = hand(&[1000, 1000]);
        assert_eq!(hand.pot(), 15);
        assert_eq!(hand.actor(), Some(0));
        assert_eq!(hand.positions(), (0, 0, 1));
    }

    /// three-handed, UTG (left of BB) opens
    #[test]
    fn multiway_blinds() {
        let hand = hand(&[1000, 1000, 1000]);
        assert_eq!(hand.pot(), 15);
        assert_eq!(hand.positions(), (0, 1, 2));
        assert_eq!(hand.actor(), Some(0));
    }

    #[test]
    fn out_of_turn_is_rejected_without_mutation() {
        let mut hand = hand(&[1000, 1000, 1000]);
        let before = hand.pot();
        assert_eq!(hand.apply(2, Action::Call), Err(RuleError::NotYourTurn));
        assert_eq!(hand.pot(), before);
        assert_eq!(hand.actor(), Some(0));
    }

    #[test]
    fn check_facing_a_bet_is_illegal() {
        let mut hand = hand(&[1000, 1000, 1000]);
        assert!(matches!(
            hand.apply(0, Action::Check),
            Err(RuleError::Illegal(_))
        ));
        assert_eq!(hand.actor(), Some(0));
    }

    #[test]
    fn everyone_folds_to_big_blind() {
        let mut hand = hand(&[1000, 1000, 1000]);
        hand.apply(0, Action::Fold).unwrap();
        hand.apply(1, Action::Fold).unwrap();
        assert!(hand.stage().is_finished());
        // BB wins the blinds without showing
        assert_eq!(hand.payouts().len(), 1);
        assert_eq!(hand.payouts()[0].position, 2);
        assert_eq!(hand.payouts()[0].strength, None);
        assert_eq!(hand.seats()[2].stack(), 1005);
    }

    #[test]
    fn big_blind_gets_the_option() {
        let mut hand = hand(&[1000, 1000, 1000]);
        hand.apply(0, Action::Call).unwrap();
        hand.apply(1, Action::Call).unwrap();
        // BB may still raise despite everyone matching
        assert_eq!(hand.actor(), Some(2));
        assert_eq!(hand.stage().street(), Some(Street::Pref));
        hand.apply(2, Action::Check).unwrap();
        assert_eq!(hand.stage().street(), Some(Street::Flop));
        assert_eq!(hand.board().size(), 3);
    }

    #[test]
    fn postflop_first_to_act_is_left_of_button() {
        let mut hand = hand(&[1000, 1000, 1000]);
        hand.apply(0, Action::Call).unwrap();
        hand.apply(1, Action::Call).unwrap();
        hand.apply(2, Action::Check).unwrap();
        assert_eq!(hand.actor(), Some(1));
    }

    #[test]
    fn min_raise_enforcement() {
        let mut hand = hand(&[1000, 1000, 1000]);
        // UTG opens to 100 over the 10 blind
        hand.apply(0, Action::Raise(100)).unwrap();
        // raising to 130 is below the min-raise of 190
        assert!(matches!(
            hand.apply(1, Action::Raise(130)),
            Err(RuleError::Illegal(_))
        ));
        assert_eq!(hand.min_raise_to(), 190);
        hand.apply(1, Action::Raise(190)).unwrap();
        assert_eq!(hand.bet(), 190);
    }

    #[test]
    fn short_all_in_does_not_reopen_action() {
        let mut hand = hand(&[1000, 130, 1000]);
        hand.apply(0, Action::Raise(100)).unwrap();
        // seat 1's shove to 130 is short of the 190 min-raise
        hand.apply(1, Action::AllIn).unwrap();
        hand.apply(2, Action::Fold).unwrap();
        // seat 0 must match the 30 but may not re-raise
        assert_eq!(hand.actor(), Some(0));
        assert!(matches!(
            hand.apply(0, Action::Raise(260)),
            Err(RuleError::Illegal(_))
        ));
        hand.apply(0, Action::Call).unwrap();
        // betting is moot heads-up against an all-in: board runs out
        assert!(hand.stage().is_finished());
    }

    #[test]
    fn full_raise_all_in_reopens_action() {
        let mut hand = hand(&[1000, 300, 1000]);
        hand.apply(0, Action::Raise(100)).unwrap();
        // a shove to 300 is a full raise over 100
        hand.apply(1, Action::AllIn).unwrap();
        hand.apply(2, Action::Fold).unwrap();
        // seat 0 may now re-raise
        hand.apply(0, Action::Raise(500)).unwrap();
        assert!(hand.stage().is_finished());
    }

    #[test]
    fn chips_are_conserved_through_settlement() {
        let mut hand = hand(&[500, 300, 800]);
        let total = hand.total();
        hand.apply(0, Action::AllIn).unwrap();
        hand.apply(1, Action::AllIn).unwrap();
        hand.apply(2, Action::Call).unwrap();
        assert!(hand.stage().is_finished());
        assert_eq!(hand.seats().iter().map(Seat::stack).sum::<Chips>(), total);
        assert_eq!(hand.board().size(), 5);
    }

    #[test]
    fn short_blind_posts_all_in() {
        let hand = hand(&[1000, 4, 1000]);
        assert_eq!(hand.seats()[1].state(), State::Shoving);
        assert_eq!(hand.pot(), 14);
        // action still opens with UTG
        assert_eq!(hand.actor(), Some(0));
    }

    #[test]
    fn finished_hand_rejects_actions() {
        let mut hand = hand(&[1000, 1000]);
        hand.apply(0, Action::Fold).unwrap();
        assert!(hand.apply(1, Action::Check).is_err());
    }

    #[test]
    fn passive_checks_when_flat_and_folds_facing_a_bet() {
        let mut hand = hand(&[1000, 1000, 1000]);
        hand.apply(0, Action::Call).unwrap();
        hand.apply(1, Action::Call).unwrap();
        // BB owes nothing
        assert_eq!(hand.passive(), Action::Check);
        hand.apply(2, Action::Check).unwrap();
        hand.apply(1, Action::Raise(50)).unwrap();
        // facing a bet now
        assert_eq!(hand.passive(), Action::Fold);
    }

    #[test]
    fn abort_refunds_committed_chips() {
        let mut hand = hand(&[1000, 1000, 1000]);
        hand.apply(0, Action::Raise(100)).unwrap();
        hand.abort();
        assert!(hand.stage().is_finished());
        assert!(hand.seats().iter().all(|s| s.stack() == 1000));
        assert_eq!(hand.pot(), 0);
    }

    #[test]
    fn log_attributes_blinds_and_actions() {
        let mut hand = hand(&[1000, 1000, 1000]);
        hand.apply(0, Action::Raise(100)).unwrap();
        let log = hand.log();
        assert_eq!(log[0].kind, ActKind::SmallBlind);
        assert_eq!(log[0].amount, 5);
        assert_eq!(log[1].kind, ActKind::BigBlind);
        assert_eq!(log[1].amount, 10);
        assert_eq!(log[2].kind, ActKind::Raise);
        assert_eq!(log[2].position, 0);
        assert_eq!(log[2].street, Street::Pref);
        assert!(log.iter().enumerate().all(|(i, e)| e.seq == i as Sequence));
    }

    /// random walks conserve chips and always terminate
    #[test]
    fn random_games_conserve_chips() {
        use rand::Rng;
        use rand::SeedableRng;
        let mut rng = rand::rngs::SmallRng::seed_from_u64(1337);
        for trial in 0..500 {
            let n = rng.random_range(2..=6);
            let stacks: Vec<Chips> = (0..n).map(|_| rng.random_range(10..500)).collect();
            let players = stacks.iter().enumerate().map(|(i, s)| (i, *s)).collect();
            let dealer = rng.random_range(0..n);
            let deck = Deck::seeded(trial);
            let mut hand = Hand::begin(players, dealer, BLINDS, deck).unwrap();
            let total = hand.total();
            let mut steps = 0;
            while let Some(actor) = hand.actor() {
                let action = match rng.random_range(0..5) {
                    0 => Action::Fold,
                    1 => Action::Check,
                    2 => Action::Call,
                    3 => Action::AllIn,
                    _ => Action::Raise(hand.min_raise_to()),
                };
                if hand.apply(actor, action).is_err() {
                    hand.apply(actor, hand.passive()).unwrap();
                }
                steps += 1;
                assert!(steps < 1000, "hand failed to terminate");
            }
            assert!(hand.stage().is_finished());
            assert_eq!(hand.seats().iter().map(Seat::stack).sum::<Chips>(), total);
            assert_eq!(
                hand.pot(),
                hand.payouts().iter().map(|p| p.chips).sum::<Chips>()
            );
        }
    }
}
