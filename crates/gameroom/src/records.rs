use crate::ledger::Member;
use crate::room::Room;
use cardroom_core::*;
use cardroom_gameplay::Entry;
use serde::Serialize;

/// A finished hand, flattened for persistence.
///
/// One row per hand plus its participants and ordered actions, which is
/// everything a replay or audit tool needs to reconstruct play.
#[derive(Debug, Clone, Serialize)]
pub struct HandRecord {
    pub id: ID<Self>,
    pub room: ID<Room>,
    pub number: u64,
    pub dealer: Position,
    pub small: Position,
    pub big: Position,
    pub board: String,
    pub pot: Chips,
    pub players: Vec<PlayerRecord>,
    pub actions: Vec<Entry>,
}

impl Unique for HandRecord {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

/// One participant in a recorded hand.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerRecord {
    pub member: ID<Member>,
    pub position: Position,
    pub cards: String,
    pub payout: Chips,
}
