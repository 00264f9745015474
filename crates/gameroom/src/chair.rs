use crate::ledger::Member;
use cardroom_core::*;
use serde::Serialize;

/// Whether a seated member takes part in the next hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// Dealt into every hand.
    Active,
    /// Went silent on their last turn; skipped until they act again.
    Away,
    /// Stack hit zero. The table vacates the chair at settlement.
    Busted,
}

/// A physical chair at the table: who sits there and with how much.
///
/// Stacks live here between hands. While a hand is live the engine owns
/// the participating stacks and the chair holds a stale copy until the
/// room writes the result back.
#[derive(Debug, Clone, Copy)]
pub struct Chair {
    id: ID<Self>,
    member: ID<Member>,
    stack: Chips,
    presence: Presence,
}

impl Chair {
    pub fn new(member: ID<Member>, stack: Chips) -> Self {
        Self {
            id: ID::default(),
            member,
            stack,
            presence: Presence::Active,
        }
    }
    pub fn member(&self) -> ID<Member> {
        self.member
    }
    pub fn stack(&self) -> Chips {
        self.stack
    }
    pub fn presence(&self) -> Presence {
        self.presence
    }
    /// Dealt into the next hand.
    pub fn is_playing(&self) -> bool {
        self.presence == Presence::Active && self.stack > 0
    }
    pub fn set_stack(&mut self, stack: Chips) {
        self.stack = stack;
        if stack == 0 {
            self.presence = Presence::Busted;
        }
    }
    pub fn mark_away(&mut self) {
        if self.presence == Presence::Active {
            self.presence = Presence::Away;
        }
    }
    pub fn mark_back(&mut self) {
        if self.presence == Presence::Away {
            self.presence = Presence::Active;
        }
    }
}

impl Unique for Chair {
    fn id(&self) -> ID<Self> {
        self.id
    }
}
