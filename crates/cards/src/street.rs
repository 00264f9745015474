/// The four betting rounds in Texas Hold'em.
///
/// Each street past preflop reveals additional community cards.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Default, serde::Serialize)]
pub enum Street {
    #[default]
    #[serde(rename = "preflop")]
    Pref = 0,
    #[serde(rename = "flop")]
    Flop = 1,
    #[serde(rename = "turn")]
    Turn = 2,
    #[serde(rename = "river")]
    Rive = 3,
}

impl Street {
    /// All four streets in order.
    pub const fn all() -> [Self; 4] {
        [Self::Pref, Self::Flop, Self::Turn, Self::Rive]
    }
    /// The following street, or None on the river.
    pub const fn next(&self) -> Option<Self> {
        match self {
            Self::Pref => Some(Self::Flop),
            Self::Flop => Some(Self::Turn),
            Self::Turn => Some(Self::Rive),
            Self::Rive => None,
        }
    }
    /// Community cards revealed when this street begins.
    pub const fn n_revealed(&self) -> usize {
        match self {
            Self::Pref => 0,
            Self::Flop => 3,
            Self::Turn => 1,
            Self::Rive => 1,
        }
    }
    /// Community cards on the board during this street.
    pub const fn n_board(&self) -> usize {
        match self {
            Self::Pref => 0,
            Self::Flop => 3,
            Self::Turn => 4,
            Self::Rive => 5,
        }
    }
}

impl std::fmt::Display for Street {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Pref => write!(f, "preflop"),
            Self::Flop => write!(f, "flop"),
            Self::Turn => write!(f, "turn"),
            Self::Rive => write!(f, "river"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streets_reveal_the_full_board() {
        let total: usize = Street::all().iter().map(Street::n_revealed).sum();
        assert_eq!(total, 5);
        assert_eq!(Street::Rive.n_board(), 5);
    }

    #[test]
    fn river_is_terminal() {
        assert_eq!(Street::Rive.next(), None);
        assert_eq!(Street::Pref.next(), Some(Street::Flop));
    }
}
