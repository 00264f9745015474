use crate::chair::Chair;
use crate::error::TableError;
use crate::ledger::Member;
use crate::records::HandRecord;
use crate::records::PlayerRecord;
use crate::room::Room;
use crate::snapshot::PayoutView;
use crate::snapshot::SeatView;
use crate::snapshot::Snapshot;
use cardroom_cards::Deck;
use cardroom_core::*;
use cardroom_gameplay::Action;
use cardroom_gameplay::Hand;

/// Table settings fixed at creation.
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub name: String,
    pub creator: Option<ID<Member>>,
    pub seats: usize,
    pub blinds: (Chips, Chips),
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            name: "cardroom".to_string(),
            creator: None,
            seats: DEFAULT_SEATS,
            blinds: (5, 10),
        }
    }
}

/// Seating and hand lifecycle for one room, no concurrency in sight.
///
/// Chairs are stable positions; members come and go between hands. At
/// most one [`Hand`] is live at a time, and while it is, the engine
/// owns the participating stacks. The room task around this struct
/// handles timing, persistence, and messaging.
pub struct Table {
    config: TableConfig,
    chairs: Vec<Option<Chair>>,
    dealer: Option<Position>,
    counter: u64,
    hand: Option<Hand>,
    payouts: Vec<PayoutView>,
}

/// Seating.
impl Table {
    pub fn new(config: TableConfig) -> Self {
        let seats = config.seats.clamp(MIN_SEATS, MAX_SEATS);
        Self {
            config,
            chairs: vec![None; seats],
            dealer: None,
            counter: 0,
            hand: None,
            payouts: Vec::new(),
        }
    }

    /// Seats a member at the first empty chair. Mid-hand joins are fine;
    /// the newcomer waits for the next deal.
    pub fn join(&mut self, member: ID<Member>, buyin: Chips) -> Result<ID<Chair>, TableError> {
        let empty = self
            .chairs
            .iter()
            .position(Option::is_none)
            .ok_or(TableError::RoomFull)?;
        let chair = Chair::new(member, buyin);
        let id = chair.id();
        self.chairs[empty] = Some(chair);
        log::info!("[{}] {} sat at P{}", self.config.name, member, empty);
        Ok(id)
    }

    /// Vacates a chair and returns the stack to cash out. Refused while
    /// the chair is dealt into a live hand.
    pub fn leave(&mut self, seat: ID<Chair>) -> Result<Chips, TableError> {
        let position = self
            .position_of(seat)
            .ok_or_else(|| TableError::IllegalAction("not seated".to_string()))?;
        if self.is_dealt_in(position) {
            return Err(TableError::HandInProgress);
        }
        let chair = self.chairs[position]
            .take()
            .ok_or_else(|| TableError::IllegalAction("not seated".to_string()))?;
        log::info!("[{}] {} left P{}", self.config.name, chair.member(), position);
        Ok(chair.stack())
    }

    pub fn position_of(&self, seat: ID<Chair>) -> Option<Position> {
        self.chairs
            .iter()
            .position(|c| c.map(|c| c.id()) == Some(seat))
    }

    pub fn member_of(&self, seat: ID<Chair>) -> Option<ID<Member>> {
        self.position_of(seat)
            .and_then(|p| self.chairs[p].map(|c| c.member()))
    }

    /// A seat that sat out after going silent declares itself back.
    /// Takes effect at the next deal.
    pub fn sit_in(&mut self, seat: ID<Chair>) -> Result<(), TableError> {
        let position = self
            .position_of(seat)
            .ok_or_else(|| TableError::IllegalAction("not seated".to_string()))?;
        if let Some(chair) = self.chairs[position].as_mut() {
            chair.mark_back();
        }
        Ok(())
    }

    /// Tears the table down: refunds any live hand and vacates every
    /// chair, returning who to pay and how much.
    pub fn close(&mut self) -> Vec<(ID<Member>, Chips)> {
        if let Some(hand) = self.hand.as_mut() {
            hand.abort();
            for seat in hand.seats().to_vec() {
                if let Some(chair) = self.chairs[seat.position()].as_mut() {
                    chair.set_stack(seat.stack());
                }
            }
        }
        self.hand = None;
        self.chairs
            .iter_mut()
            .filter_map(Option::take)
            .map(|c| (c.member(), c.stack()))
            .collect()
    }

    fn is_dealt_in(&self, position: Position) -> bool {
        self.hand
            .as_ref()
            .map(|h| h.seats().iter().any(|s| s.position() == position))
            .unwrap_or(false)
    }
}

/// Hand lifecycle.
impl Table {
    /// Deals the next hand: rotates the button past any chairs that sat
    /// out or busted, then hands the stacks to the engine.
    pub fn start_hand(&mut self) -> Result<(), TableError> {
        if self.hand.is_some() {
            return Err(TableError::HandInProgress);
        }
        let players = self
            .chairs
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.filter(Chair::is_playing).map(|c| (i, c.stack())))
            .collect::<Vec<(Position, Chips)>>();
        if players.len() < MIN_SEATS {
            return Err(TableError::NotEnoughSeats);
        }
        let button = self.next_button(&players);
        let dealer = players
            .iter()
            .position(|(p, _)| *p == button)
            .unwrap_or(0);
        let hand = Hand::begin(players, dealer, self.config.blinds, Deck::shuffled())?;
        self.dealer = Some(button);
        self.counter += 1;
        self.payouts.clear();
        log::info!(
            "[{}] hand {} begins, button at P{}",
            self.config.name,
            self.counter,
            button
        );
        self.hand = Some(hand);
        Ok(())
    }

    fn next_button(&self, players: &[(Position, Chips)]) -> Position {
        let start = self.dealer.map(|d| d + 1).unwrap_or(0);
        let n = self.chairs.len();
        (0..n)
            .map(|k| (start + k) % n)
            .find(|p| players.iter().any(|(q, _)| q == p))
            .unwrap_or(players[0].0)
    }

    /// Applies a member's action to the live hand. Rejections leave the
    /// room untouched; a fatal deck error rolls the hand back instead.
    pub fn submit(&mut self, seat: ID<Chair>, action: Action) -> Result<(), TableError> {
        let position = self
            .position_of(seat)
            .ok_or_else(|| TableError::IllegalAction("not seated".to_string()))?;
        let hand = self
            .hand
            .as_mut()
            .ok_or_else(|| TableError::IllegalAction("no hand in progress".to_string()))?;
        match hand.apply(position, action) {
            Ok(()) => {
                if let Some(chair) = self.chairs[position].as_mut() {
                    chair.mark_back();
                }
                Ok(())
            }
            Err(e) if e.is_fatal() => {
                self.rollback(&e);
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Runs out the clock on the seat on turn: check when nothing is
    /// owed, fold otherwise, and the seat sits out until it speaks up.
    pub fn timeout(&mut self) -> Option<(Position, Action)> {
        let hand = self.hand.as_mut()?;
        let position = hand.actor()?;
        let action = hand.passive();
        if let Err(e) = hand.apply(position, action) {
            if e.is_fatal() {
                self.rollback(&e);
            }
            return None;
        }
        if let Some(chair) = self.chairs[position].as_mut() {
            chair.mark_away();
        }
        log::debug!("[{}] P{} timed out, {}", self.config.name, position, action);
        Some((position, action))
    }

    /// The hand aborted mid-flight; the engine has already refunded
    /// every committed chip, so just put the stacks back on the chairs.
    fn rollback(&mut self, e: &cardroom_gameplay::RuleError) {
        log::error!("[{}] hand {} aborted: {}", self.config.name, self.counter, e);
        if let Some(hand) = self.hand.take() {
            for seat in hand.seats() {
                if let Some(chair) = self.chairs[seat.position()].as_mut() {
                    chair.set_stack(seat.stack());
                }
            }
        }
    }

    /// Settles a finished hand back onto the chairs and flattens it for
    /// the archive. Chairs that busted give up their seat.
    pub fn conclude(&mut self, room: ID<Room>) -> Option<HandRecord> {
        if !self.finished() {
            return None;
        }
        let hand = self.hand.take()?;
        let pot = hand.pot();
        let (dealer, small, big) = hand.positions();
        for seat in hand.seats() {
            if let Some(chair) = self.chairs[seat.position()].as_mut() {
                chair.set_stack(seat.stack());
            }
        }
        self.payouts = hand
            .payouts()
            .iter()
            .map(|p| PayoutView {
                position: p.position,
                chips: p.chips,
                strength: p.strength.map(|s| s.to_string()),
                cards: hand
                    .seats()
                    .iter()
                    .find(|s| s.position() == p.position)
                    .filter(|_| p.strength.is_some())
                    .map(|s| s.cards().to_string()),
            })
            .collect();
        let players = hand
            .seats()
            .iter()
            .map(|seat| PlayerRecord {
                member: self.chairs[seat.position()]
                    .map(|c| c.member())
                    .unwrap_or_default(),
                position: seat.position(),
                cards: seat.cards().to_string(),
                payout: hand
                    .payouts()
                    .iter()
                    .find(|p| p.position == seat.position())
                    .map(|p| p.chips)
                    .unwrap_or(0),
            })
            .collect();
        for seat in hand.seats() {
            if self.chairs[seat.position()].is_some_and(|c| c.stack() == 0) {
                log::info!("[{}] P{} busted out", self.config.name, seat.position());
                self.chairs[seat.position()] = None;
            }
        }
        Some(HandRecord {
            id: ID::default(),
            room,
            number: self.counter,
            dealer,
            small,
            big,
            board: hand.board().to_string(),
            pot,
            players,
            actions: hand.log().to_vec(),
        })
    }

    pub fn finished(&self) -> bool {
        self.hand
            .as_ref()
            .map(|h| h.stage().is_finished())
            .unwrap_or(false)
    }

    pub fn hand(&self) -> Option<&Hand> {
        self.hand.as_ref()
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn creator(&self) -> Option<ID<Member>> {
        self.config.creator
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.chairs.get(position).is_some_and(|c| c.is_some())
    }
}

/// Views.
impl Table {
    /// The room as `viewer` is allowed to see it. Hole cards show only
    /// on the viewer's own chair.
    pub fn snapshot(&self, viewer: Option<ID<Chair>>) -> Snapshot {
        let hand = self.hand.as_ref();
        let seats = self
            .chairs
            .iter()
            .enumerate()
            .filter_map(|(position, chair)| chair.map(|c| (position, c)))
            .map(|(position, chair)| {
                let seat = hand.and_then(|h| h.seats().iter().find(|s| s.position() == position));
                SeatView {
                    position,
                    member: chair.member(),
                    stack: seat.map(|s| s.stack()).unwrap_or(chair.stack()),
                    stake: seat.map(|s| s.stake()).unwrap_or(0),
                    presence: chair.presence(),
                    state: seat.map(|s| s.state()),
                    cards: seat
                        .filter(|_| Some(chair.id()) == viewer)
                        .map(|s| s.cards().to_string()),
                }
            })
            .collect();
        Snapshot {
            room: self.config.name.clone(),
            hand: self.counter,
            blinds: self.config.blinds,
            stage: hand.map(|h| h.stage()),
            dealer: hand.map(|h| h.positions().0).or(self.dealer),
            board: hand
                .map(|h| h.board().cards().iter().map(|c| c.to_string()).collect())
                .unwrap_or_default(),
            pot: hand.map(|h| h.pot()).unwrap_or(0),
            bet: hand.map(|h| h.bet()).unwrap_or(0),
            min_raise_to: hand.map(|h| h.min_raise_to()).unwrap_or(0),
            actor: hand.and_then(|h| h.actor()),
            seats,
            log: hand.map(|h| h.log().to_vec()).unwrap_or_default(),
            payouts: self.payouts.clone(),
        }
    }
}
