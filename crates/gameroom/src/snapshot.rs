use crate::ledger::Member;
use cardroom_core::*;
use cardroom_gameplay::Entry;
use cardroom_gameplay::Stage;
use cardroom_gameplay::State;
use serde::Serialize;

/// A viewer-specific picture of the room.
///
/// Carries everything a client or audit tool needs: table config, the
/// live hand's stage and board, the ordered action log, and settlement
/// lines once the hand is done. While a hand is live, hole cards appear
/// only on the viewer's own seat; cards a showdown forced open ride the
/// settlement lines for everyone.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub room: String,
    pub hand: u64,
    pub blinds: (Chips, Chips),
    pub stage: Option<Stage>,
    pub dealer: Option<Position>,
    pub board: Vec<String>,
    pub pot: Chips,
    pub bet: Chips,
    pub min_raise_to: Chips,
    pub actor: Option<Position>,
    pub seats: Vec<SeatView>,
    pub log: Vec<Entry>,
    pub payouts: Vec<PayoutView>,
}

/// One chair as the viewer is allowed to see it.
#[derive(Debug, Clone, Serialize)]
pub struct SeatView {
    pub position: Position,
    pub member: ID<Member>,
    pub stack: Chips,
    pub stake: Chips,
    pub presence: crate::chair::Presence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<State>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<String>,
}

/// One settlement line; `strength` and `cards` are None when no
/// showdown happened, since a fold-out reveals nothing.
#[derive(Debug, Clone, Serialize)]
pub struct PayoutView {
    pub position: Position,
    pub chips: Chips,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<String>,
}
