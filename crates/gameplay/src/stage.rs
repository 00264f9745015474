use cardroom_cards::Street;

/// Where a hand is in its lifecycle.
///
/// Betting stages carry their street. `Showdown` is transient: the engine
/// settles synchronously, so callers observe `Betting(_)` or `Finished`,
/// with showdown results exposed through the hand's payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Betting(Street),
    Showdown,
    Finished,
}

impl Stage {
    pub fn is_finished(&self) -> bool {
        matches!(self, Stage::Finished)
    }
    pub fn street(&self) -> Option<Street> {
        match self {
            Stage::Betting(street) => Some(*street),
            _ => None,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Stage::Betting(street) => write!(f, "{}", street),
            Stage::Showdown => write!(f, "showdown"),
            Stage::Finished => write!(f, "finished"),
        }
    }
}
