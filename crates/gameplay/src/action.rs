use cardroom_core::Chips;

/// A player decision submitted to the hand engine.
///
/// This is the closed set of choices a client may make on its turn.
/// `Raise` carries the new total bet to match, not the increment, so
/// "raise to 150 over a bet of 100" is `Raise(150)`. Blind posts are
/// engine-driven and never arrive from a client, so they are not here;
/// see [`ActKind`](crate::ActKind) for the logged superset.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum Action {
    Fold,
    Check,
    Call,
    Raise(Chips),
    AllIn,
}

impl Action {
    /// True if this is a raise or all-in (aggressive action).
    pub fn is_aggro(&self) -> bool {
        matches!(self, Action::Raise(_) | Action::AllIn)
    }
    /// True if this is a fold or check (no chips added).
    pub fn is_passive(&self) -> bool {
        matches!(self, Action::Fold | Action::Check)
    }
    /// The raise-to amount, if any.
    pub fn amount(&self) -> Option<Chips> {
        match *self {
            Action::Raise(to) => Some(to),
            _ => None,
        }
    }
    pub fn label(&self) -> &'static str {
        match self {
            Action::Fold => "Fold",
            Action::Check => "Check",
            Action::Call => "Call",
            Action::Raise(_) => "Raise",
            Action::AllIn => "AllIn",
        }
    }
}

impl TryFrom<&str> for Action {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        match parts.first().map(|p| p.to_uppercase()).as_deref() {
            Some("FOLD") => Ok(Action::Fold),
            Some("CHECK") => Ok(Action::Check),
            Some("CALL") => Ok(Action::Call),
            Some("ALLIN") => Ok(Action::AllIn),
            Some("RAISE") => parts
                .get(1)
                .and_then(|n| n.parse().ok())
                .map(Action::Raise)
                .ok_or_else(|| "invalid raise amount".to_string()),
            _ => Err(format!("invalid action str: {}", s)),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Action::Fold => write!(f, "FOLD"),
            Action::Check => write!(f, "CHECK"),
            Action::Call => write!(f, "CALL"),
            Action::AllIn => write!(f, "ALLIN"),
            Action::Raise(to) => write!(f, "RAISE {}", to),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_str() {
        for action in [
            Action::Fold,
            Action::Check,
            Action::Call,
            Action::Raise(150),
            Action::AllIn,
        ] {
            assert_eq!(action, Action::try_from(action.to_string().as_str()).unwrap());
        }
    }
}
