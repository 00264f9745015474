use crate::chair::Chair;
use crate::error::TableError;
use crate::ledger::Archive;
use crate::ledger::Ledger;
use crate::ledger::Member;
use crate::message::Reveal;
use crate::message::ServerMessage;
use crate::snapshot::Snapshot;
use crate::table::Table;
use crate::table::TableConfig;
use crate::timer::Timer;
use crate::timer::TimerConfig;
use cardroom_core::*;
use cardroom_gameplay::Action;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;
use tokio::sync::oneshot;

/// Requests a [`RoomHandle`] can put on the room's queue. Every request
/// that can fail carries a reply channel so the caller hears back.
enum Command {
    Join {
        member: ID<Member>,
        buyin: Chips,
        reply: oneshot::Sender<Result<ID<Chair>, TableError>>,
    },
    Leave {
        seat: ID<Chair>,
        reply: oneshot::Sender<Result<Chips, TableError>>,
    },
    Start {
        reply: oneshot::Sender<Result<Snapshot, TableError>>,
    },
    Submit {
        seat: ID<Chair>,
        action: Action,
        reply: oneshot::Sender<Result<Snapshot, TableError>>,
    },
    SitIn {
        seat: ID<Chair>,
        reply: oneshot::Sender<Result<(), TableError>>,
    },
    Snapshot {
        viewer: Option<ID<Chair>>,
        reply: oneshot::Sender<Snapshot>,
    },
    Watch {
        seat: ID<Chair>,
        reply: oneshot::Sender<Result<UnboundedReceiver<String>, TableError>>,
    },
    Close {
        by: Option<ID<Member>>,
        reply: oneshot::Sender<Result<(), TableError>>,
    },
}

/// One poker room: a [`Table`] owned by a single tokio task.
///
/// All mutation flows through the command queue, so there is never a
/// lock around game state. The decision timer shares the same loop; an
/// expired deadline injects the passive action for the seat on turn
/// exactly as if the seat had submitted it.
pub struct Room {
    id: ID<Self>,
    table: Table,
    timer: Timer,
    queue: UnboundedReceiver<Command>,
    taps: HashMap<Position, UnboundedSender<String>>,
    last_board: usize,
    ledger: Arc<dyn Ledger>,
    archive: Arc<dyn Archive>,
}

/// A clonable client for one room's task.
#[derive(Clone, Debug)]
pub struct RoomHandle {
    id: ID<Room>,
    tx: UnboundedSender<Command>,
}

impl Room {
    /// Spawns the room task and returns its handle.
    pub fn spawn(
        config: TableConfig,
        timer: TimerConfig,
        ledger: Arc<dyn Ledger>,
        archive: Arc<dyn Archive>,
    ) -> RoomHandle {
        let id = ID::default();
        let (tx, queue) = unbounded_channel();
        let room = Self {
            id,
            table: Table::new(config),
            timer: Timer::new(timer),
            queue,
            taps: HashMap::new(),
            last_board: 0,
            ledger,
            archive,
        };
        tokio::spawn(room.run());
        RoomHandle { id, tx }
    }

    async fn run(mut self) {
        log::debug!("[room {}] open", self.id);
        loop {
            let closing = match self.timer.deadline() {
                Some(deadline) => {
                    tokio::select! {
                        biased;
                        _ = tokio::time::sleep_until(deadline) => {
                            self.expire().await;
                            false
                        }
                        cmd = self.queue.recv() => match cmd {
                            Some(cmd) => self.handle(cmd).await,
                            None => true,
                        },
                    }
                }
                None => match self.queue.recv().await {
                    Some(cmd) => self.handle(cmd).await,
                    None => true,
                },
            };
            if closing {
                break;
            }
        }
        self.shutdown().await;
        log::debug!("[room {}] closed", self.id);
    }

    /// Serves one command; returns true when the room should shut down.
    async fn handle(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Join {
                member,
                buyin,
                reply,
            } => {
                let _ = reply.send(self.join(member, buyin).await);
            }
            Command::Leave { seat, reply } => {
                let _ = reply.send(self.leave(seat).await);
            }
            Command::Start { reply } => {
                let _ = reply.send(self.start().await);
            }
            Command::Submit {
                seat,
                action,
                reply,
            } => {
                let _ = reply.send(self.submit(seat, action).await);
            }
            Command::SitIn { seat, reply } => {
                let _ = reply.send(self.table.sit_in(seat));
            }
            Command::Snapshot { viewer, reply } => {
                let _ = reply.send(self.table.snapshot(viewer));
            }
            Command::Watch { seat, reply } => {
                let _ = reply.send(
                    self.watch(seat)
                        .ok_or_else(|| TableError::IllegalAction("not seated".to_string())),
                );
            }
            Command::Close { by, reply } => match self.may_close(by) {
                Ok(()) => {
                    let _ = reply.send(Ok(()));
                    return true;
                }
                Err(e) => {
                    let _ = reply.send(Err(e));
                }
            },
        }
        false
    }

    /// Buy-in flows out of the ledger before the member sits; a refused
    /// seat puts the chips straight back.
    async fn join(&mut self, member: ID<Member>, buyin: Chips) -> Result<ID<Chair>, TableError> {
        self.ledger.debit(member, buyin).await?;
        match self.table.join(member, buyin) {
            Ok(seat) => Ok(seat),
            Err(e) => {
                self.ledger.credit(member, buyin).await;
                Err(e)
            }
        }
    }

    async fn leave(&mut self, seat: ID<Chair>) -> Result<Chips, TableError> {
        let position = self.table.position_of(seat);
        let member = self.table.member_of(seat);
        let chips = self.table.leave(seat)?;
        if let Some(position) = position {
            self.taps.remove(&position);
        }
        if let Some(member) = member {
            self.ledger.credit(member, chips).await;
        }
        Ok(chips)
    }

    async fn start(&mut self) -> Result<Snapshot, TableError> {
        self.table.start_hand()?;
        self.last_board = 0;
        let counter = self.table.counter();
        if let Some(hand) = self.table.hand() {
            let (dealer, _, _) = hand.positions();
            let stacks = hand
                .seats()
                .iter()
                .map(|s| (s.position(), s.stack() + s.spent()))
                .collect();
            let holes = hand
                .seats()
                .iter()
                .map(|s| (s.position(), s.cards()))
                .collect::<Vec<_>>();
            self.broadcast(ServerMessage::HandStart {
                hand: counter,
                dealer,
                stacks,
            });
            for (position, hole) in holes {
                self.unicast(position, ServerMessage::hole_cards(counter, hole));
            }
        }
        self.progress().await;
        Ok(self.table.snapshot(None))
    }

    async fn submit(&mut self, seat: ID<Chair>, action: Action) -> Result<Snapshot, TableError> {
        let position = self.table.position_of(seat);
        self.table.submit(seat, action)?;
        let counter = self.table.counter();
        let pot = self.table.hand().map(|h| h.pot()).unwrap_or(0);
        if let Some(position) = position {
            self.broadcast(ServerMessage::action(counter, position, action.label(), pot));
        }
        self.progress().await;
        Ok(self.table.snapshot(Some(seat)))
    }

    /// The seat on turn ran out the clock.
    async fn expire(&mut self) {
        self.timer.clear();
        let counter = self.table.counter();
        if let Some((position, action)) = self.table.timeout() {
            let pot = self.table.hand().map(|h| h.pot()).unwrap_or(0);
            self.broadcast(ServerMessage::action(counter, position, action.label(), pot));
            self.progress().await;
        }
    }

    /// After any accepted transition: announce new streets, settle and
    /// archive a finished hand, or put the next actor on the clock.
    async fn progress(&mut self) {
        let counter = self.table.counter();
        if let Some(hand) = self.table.hand() {
            let board = hand.board();
            if board.size() > self.last_board {
                self.last_board = board.size();
                self.broadcast(ServerMessage::board(counter, board.street(), board));
            }
        }
        if self.table.finished() {
            self.timer.clear();
            if let Some(hand) = self.table.hand() {
                let reveals = hand
                    .payouts()
                    .iter()
                    .map(|p| Reveal {
                        seat: p.position,
                        cards: hand
                            .seats()
                            .iter()
                            .find(|s| s.position() == p.position)
                            .filter(|_| p.strength.is_some())
                            .map(|s| s.cards().to_string()),
                    })
                    .collect::<Vec<Reveal>>();
                let end = ServerMessage::hand_end(counter, hand.payouts());
                self.broadcast(ServerMessage::Showdown {
                    hand: counter,
                    reveals,
                });
                self.broadcast(end);
            }
            if let Some(record) = self.table.conclude(self.id) {
                self.archive.record(record).await;
            }
            self.taps.retain(|p, _| self.table.is_occupied(*p));
        } else if let Some(hand) = self.table.hand() {
            if let Some(actor) = hand.actor() {
                let stake = hand
                    .seats()
                    .iter()
                    .find(|s| s.position() == actor)
                    .map(|s| s.stake())
                    .unwrap_or(0);
                let prompt = ServerMessage::Decision {
                    hand: counter,
                    to_call: hand.bet() - stake,
                    min_raise_to: hand.min_raise_to(),
                    pot: hand.pot(),
                };
                self.unicast(actor, prompt);
                self.timer.arm();
            }
        } else {
            self.timer.clear();
        }
    }

    /// A server-side close (`by` of None) always goes through. A member
    /// may close an unowned room, or one they created, between hands.
    fn may_close(&self, by: Option<ID<Member>>) -> Result<(), TableError> {
        let Some(member) = by else { return Ok(()) };
        if let Some(creator) = self.table.creator() {
            if member != creator {
                return Err(TableError::IllegalAction(
                    "only the creator may close the room".to_string(),
                ));
            }
        }
        if self.table.hand().is_some() {
            return Err(TableError::HandInProgress);
        }
        Ok(())
    }

    fn watch(&mut self, seat: ID<Chair>) -> Option<UnboundedReceiver<String>> {
        let position = self.table.position_of(seat)?;
        let (tx, rx) = unbounded_channel();
        let _ = tx.send(ServerMessage::seated(self.table.name(), position).to_json());
        self.taps.insert(position, tx);
        Some(rx)
    }

    fn unicast(&self, position: Position, message: ServerMessage) {
        if let Some(tap) = self.taps.get(&position) {
            if let Err(e) = tap.send(message.to_json()) {
                log::warn!("[room {}] unicast to P{} failed: {:?}", self.id, position, e);
            }
        }
    }

    fn broadcast(&self, message: ServerMessage) {
        log::debug!("[room {}] broadcast: {}", self.id, message.to_json());
        for (position, tap) in self.taps.iter() {
            if let Err(e) = tap.send(message.to_json()) {
                log::warn!(
                    "[room {}] broadcast to P{} failed: {:?}",
                    self.id,
                    position,
                    e
                );
            }
        }
    }

    /// Cash every seated member out to the ledger before the task ends.
    async fn shutdown(&mut self) {
        for (member, chips) in self.table.close() {
            self.ledger.credit(member, chips).await;
        }
        self.taps.clear();
    }
}

impl Unique for Room {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl RoomHandle {
    pub fn id(&self) -> ID<Room> {
        self.id
    }
    pub async fn join(&self, member: ID<Member>, buyin: Chips) -> Result<ID<Chair>, TableError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Join {
                member,
                buyin,
                reply,
            })
            .map_err(|_| TableError::RoomClosed)?;
        rx.await.map_err(|_| TableError::RoomClosed)?
    }
    pub async fn leave(&self, seat: ID<Chair>) -> Result<Chips, TableError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Leave { seat, reply })
            .map_err(|_| TableError::RoomClosed)?;
        rx.await.map_err(|_| TableError::RoomClosed)?
    }
    pub async fn start_hand(&self) -> Result<Snapshot, TableError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Start { reply })
            .map_err(|_| TableError::RoomClosed)?;
        rx.await.map_err(|_| TableError::RoomClosed)?
    }
    pub async fn submit(&self, seat: ID<Chair>, action: Action) -> Result<Snapshot, TableError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Submit {
                seat,
                action,
                reply,
            })
            .map_err(|_| TableError::RoomClosed)?;
        rx.await.map_err(|_| TableError::RoomClosed)?
    }
    /// Declares an away seat ready for the next deal.
    pub async fn sit_in(&self, seat: ID<Chair>) -> Result<(), TableError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::SitIn { seat, reply })
            .map_err(|_| TableError::RoomClosed)?;
        rx.await.map_err(|_| TableError::RoomClosed)?
    }
    pub async fn snapshot(&self, viewer: Option<ID<Chair>>) -> Result<Snapshot, TableError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Snapshot { viewer, reply })
            .map_err(|_| TableError::RoomClosed)?;
        rx.await.map_err(|_| TableError::RoomClosed)
    }
    /// Attaches a message feed for one seat. Replaces any previous feed
    /// at that seat.
    pub async fn watch(&self, seat: ID<Chair>) -> Result<UnboundedReceiver<String>, TableError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Watch { seat, reply })
            .map_err(|_| TableError::RoomClosed)?;
        rx.await.map_err(|_| TableError::RoomClosed)?
    }
    /// Shuts the room down, cashing every seat out to the ledger. Pass
    /// the acting member to enforce the creator rule; None is a
    /// server-side close that no one can veto.
    pub async fn close(&self, by: Option<ID<Member>>) -> Result<(), TableError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Close { by, reply })
            .map_err(|_| TableError::RoomClosed)?;
        rx.await.map_err(|_| TableError::RoomClosed)?
    }
}
