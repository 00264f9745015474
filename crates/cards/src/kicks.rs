use super::rank::Rank;

/// A hand's kicker cards, as a u16 rank mask.
///
/// Kickers break ties between hands of equal [`Ranking`](super::ranking::Ranking).
/// Suits never matter for kickers, so a rank mask compares correctly:
/// higher ranks occupy higher bits.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Kickers(u16);

/// u16 isomorphism
impl From<Kickers> for u16 {
    fn from(k: Kickers) -> Self {
        k.0
    }
}
impl From<u16> for Kickers {
    fn from(n: u16) -> Self {
        Self(n)
    }
}

/// Vec<Rank> isomorphism
impl From<Kickers> for Vec<Rank> {
    fn from(k: Kickers) -> Self {
        (0..13)
            .filter(|i| k.0 & (1 << i) != 0)
            .map(|i| Rank::from(i as u8))
            .collect()
    }
}
impl From<Vec<Rank>> for Kickers {
    fn from(ranks: Vec<Rank>) -> Self {
        Self(ranks.iter().map(|r| u16::from(*r)).fold(0u16, |a, b| a | b))
    }
}

impl std::fmt::Display for Kickers {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for rank in Vec::<Rank>::from(*self).into_iter().rev() {
            write!(f, "{} ", rank)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_kicker_wins() {
        let ace = Kickers::from(vec![Rank::Ace, Rank::Two]);
        let king = Kickers::from(vec![Rank::King, Rank::Queen]);
        assert!(ace > king);
    }
}
