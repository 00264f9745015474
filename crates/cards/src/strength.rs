use super::evaluator::Evaluator;
use super::kicks::Kickers;
use super::ranking::Ranking;
use super::set::CardSet;

/// A hand's total strength.
///
/// Constructed from an unordered set of 5 to 7 cards and valued as the
/// best 5-card hand within. Ord compares ranking first, kickers second,
/// which is the total order poker comparison demands: hands of equal
/// Strength split.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Strength {
    ranking: Ranking,
    kickers: Kickers,
}

impl Strength {
    pub fn ranking(&self) -> Ranking {
        self.ranking
    }
    pub fn kickers(&self) -> Kickers {
        self.kickers
    }
}

impl From<CardSet> for Strength {
    fn from(set: CardSet) -> Self {
        Self::from(Evaluator::from(set))
    }
}

impl From<Evaluator> for Strength {
    fn from(evaluator: Evaluator) -> Self {
        let ranking = evaluator.find_ranking();
        let kickers = evaluator.find_kickers(ranking);
        Self { ranking, kickers }
    }
}

impl From<(Ranking, Kickers)> for Strength {
    fn from((ranking, kickers): (Ranking, Kickers)) -> Self {
        Self { ranking, kickers }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<18}", self.ranking)
    }
}
