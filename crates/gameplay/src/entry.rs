use cardroom_cards::Street;
use cardroom_core::Chips;
use cardroom_core::Position;
use cardroom_core::Sequence;

/// The kind of a logged table event.
///
/// A superset of [`Action`](crate::Action): blind posts are forced by the
/// engine rather than chosen by a player, but they move chips and must be
/// attributed, so they appear in the log alongside voluntary actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActKind {
    SmallBlind,
    BigBlind,
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

impl std::fmt::Display for ActKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ActKind::SmallBlind => write!(f, "small_blind"),
            ActKind::BigBlind => write!(f, "big_blind"),
            ActKind::Fold => write!(f, "fold"),
            ActKind::Check => write!(f, "check"),
            ActKind::Call => write!(f, "call"),
            ActKind::Raise => write!(f, "raise"),
            ActKind::AllIn => write!(f, "all_in"),
        }
    }
}

/// One append-only action log record.
///
/// The ordered log is the source of truth for replay and audit: it
/// carries who acted, on which street, and how many chips moved. The
/// `seq` field is a per-hand monotone counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Entry {
    pub seq: Sequence,
    pub position: Position,
    pub street: Street,
    pub kind: ActKind,
    pub amount: Chips,
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "#{:<3} seat {} {} {} {}",
            self.seq, self.position, self.street, self.kind, self.amount
        )
    }
}
