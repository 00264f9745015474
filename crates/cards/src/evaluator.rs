use super::kicks::Kickers;
use super::rank::Rank;
use super::ranking::Ranking;
use super::set::CardSet;
use super::suit::Suit;

const WHEEL: u16 = 0b_1000000001111;

/// Finds the best 5-card hand within a set of 5 to 7 cards.
///
/// Works entirely on the bitset representation: straights fall out of
/// shifted rank masks, flushes out of per-suit popcounts, pairs and
/// sets out of per-rank nibble popcounts. No sorting, no allocation.
pub struct Evaluator(CardSet);

impl From<CardSet> for Evaluator {
    fn from(set: CardSet) -> Self {
        Self(set)
    }
}

impl Evaluator {
    pub fn find_ranking(&self) -> Ranking {
        None.or_else(|| self.find_straight_flush())
            .or_else(|| self.find_4_oak())
            .or_else(|| self.find_3_oak_2_oak())
            .or_else(|| self.find_flush())
            .or_else(|| self.find_straight())
            .or_else(|| self.find_3_oak())
            .or_else(|| self.find_2_oak_2_oak())
            .or_else(|| self.find_1_oak())
            .expect("at least one card in set")
    }

    pub fn find_kickers(&self, ranking: Ranking) -> Kickers {
        match ranking {
            Ranking::Flush(hi) => self.find_flush_kickers(hi),
            _ => match ranking.n_kickers() {
                0 => Kickers::default(),
                n => {
                    let ranks = u16::from(self.0) & ranking.mask();
                    Kickers::from(Self::keep_top(ranks, n))
                }
            },
        }
    }

    /// clear low bits until at most n remain
    fn keep_top(mut bits: u16, n: usize) -> u16 {
        while bits.count_ones() as usize > n {
            bits &= bits - 1;
        }
        bits
    }

    ///

    fn find_1_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(1, None).map(Ranking::HighCard)
    }
    fn find_3_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(3, None).map(Ranking::ThreeOAK)
    }
    fn find_4_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(4, None).map(Ranking::FourOAK)
    }
    fn find_2_oak_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(2, None).map(|hi| {
            self.find_rank_of_n_oak(2, Some(hi))
                .map(|lo| Ranking::TwoPair(hi, lo))
                .unwrap_or(Ranking::OnePair(hi))
        })
    }
    fn find_3_oak_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(3, None).and_then(|triple| {
            self.find_rank_of_n_oak(2, Some(triple))
                .map(|paired| Ranking::FullHouse(triple, paired))
        })
    }
    fn find_straight(&self) -> Option<Ranking> {
        self.find_rank_of_straight(self.0).map(Ranking::Straight)
    }
    fn find_flush(&self) -> Option<Ranking> {
        self.find_suit_of_flush().map(|suit| {
            let ranks = u16::from(self.0.of(&suit));
            Ranking::Flush(Rank::from(ranks))
        })
    }
    fn find_straight_flush(&self) -> Option<Ranking> {
        self.find_suit_of_flush().and_then(|suit| {
            self.find_rank_of_straight(self.0.of(&suit))
                .map(Ranking::StraightFlush)
        })
    }

    /// the four cards below the flush's high card, within the flush suit
    fn find_flush_kickers(&self, hi: Rank) -> Kickers {
        let suit = self.find_suit_of_flush().expect("flush ranking has a suit");
        let ranks = u16::from(self.0.of(&suit)) & !u16::from(hi);
        Kickers::from(Self::keep_top(ranks, 4))
    }

    fn find_rank_of_straight(&self, cards: CardSet) -> Option<Rank> {
        let ranks = u16::from(cards);
        let mut bits = ranks;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        if bits > 0 {
            Some(Rank::from(bits))
        } else if WHEEL == (WHEEL & ranks) {
            Some(Rank::Five)
        } else {
            None
        }
    }
    fn find_suit_of_flush(&self) -> Option<Suit> {
        Suit::all().into_iter().find(|s| self.0.of(s).size() >= 5)
    }
    fn find_rank_of_n_oak(&self, n: usize, skip: Option<Rank>) -> Option<Rank> {
        let cards = u64::from(self.0);
        Rank::all()
            .into_iter()
            .rev()
            .filter(|r| Some(*r) != skip)
            .find(|r| (cards & u64::from(*r)).count_ones() as usize >= n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strength::Strength;

    fn eval(s: &str) -> (Ranking, Kickers) {
        let eval = Evaluator::from(CardSet::try_from(s).unwrap());
        let ranking = eval.find_ranking();
        let kickers = eval.find_kickers(ranking);
        (ranking, kickers)
    }

    #[rustfmt::skip]
    #[test]
    fn high_card() {
        let (ranking, kickers) = eval("As Kh Qd Jc 9s");
        assert_eq!(ranking, Ranking::HighCard(Rank::Ace));
        assert_eq!(kickers, Kickers::from(vec![Rank::King, Rank::Queen, Rank::Jack, Rank::Nine]));
    }

    #[rustfmt::skip]
    #[test]
    fn one_pair() {
        let (ranking, kickers) = eval("As Ah Kd Qc Js");
        assert_eq!(ranking, Ranking::OnePair(Rank::Ace));
        assert_eq!(kickers, Kickers::from(vec![Rank::King, Rank::Queen, Rank::Jack]));
    }

    #[test]
    fn two_pair() {
        let (ranking, kickers) = eval("As Ah Kd Kc Qs");
        assert_eq!(ranking, Ranking::TwoPair(Rank::Ace, Rank::King));
        assert_eq!(kickers, Kickers::from(vec![Rank::Queen]));
    }

    #[test]
    fn three_oak() {
        let (ranking, kickers) = eval("As Ah Ad Kc Qs");
        assert_eq!(ranking, Ranking::ThreeOAK(Rank::Ace));
        assert_eq!(kickers, Kickers::from(vec![Rank::King, Rank::Queen]));
    }

    #[test]
    fn straight() {
        let (ranking, kickers) = eval("Ts Jh Qd Kc As");
        assert_eq!(ranking, Ranking::Straight(Rank::Ace));
        assert_eq!(kickers, Kickers::default());
    }

    #[rustfmt::skip]
    #[test]
    fn flush() {
        let (ranking, kickers) = eval("As Ks Qs Js 9s");
        assert_eq!(ranking, Ranking::Flush(Rank::Ace));
        assert_eq!(kickers, Kickers::from(vec![Rank::King, Rank::Queen, Rank::Jack, Rank::Nine]));
    }

    #[test]
    fn full_house() {
        let (ranking, kickers) = eval("2s 2h 2d 3c 3s");
        assert_eq!(ranking, Ranking::FullHouse(Rank::Two, Rank::Three));
        assert_eq!(kickers, Kickers::default());
    }

    #[test]
    fn four_oak() {
        let (ranking, kickers) = eval("As Ah Ad Ac Ks");
        assert_eq!(ranking, Ranking::FourOAK(Rank::Ace));
        assert_eq!(kickers, Kickers::from(vec![Rank::King]));
    }

    #[test]
    fn straight_flush() {
        let (ranking, kickers) = eval("Ts Js Qs Ks As");
        assert_eq!(ranking, Ranking::StraightFlush(Rank::Ace));
        assert_eq!(kickers, Kickers::default());
    }

    #[test]
    fn wheel_straight() {
        let (ranking, kickers) = eval("As 2h 3d 4c 5s");
        assert_eq!(ranking, Ranking::Straight(Rank::Five));
        assert_eq!(kickers, Kickers::default());
    }

    #[test]
    fn wheel_straight_flush() {
        let (ranking, kickers) = eval("As 2s 3s 4s 5s");
        assert_eq!(ranking, Ranking::StraightFlush(Rank::Five));
        assert_eq!(kickers, Kickers::default());
    }

    #[test]
    fn six_card_straight_takes_high_end() {
        let (ranking, kickers) = eval("As 2s 3h 4d 5c 6s");
        assert_eq!(ranking, Ranking::Straight(Rank::Six));
        assert_eq!(kickers, Kickers::default());
    }

    #[test]
    fn seven_card_hand() {
        let (ranking, kickers) = eval("As Ah Kd Kc Qs Jh 9d");
        assert_eq!(ranking, Ranking::TwoPair(Rank::Ace, Rank::King));
        assert_eq!(kickers, Kickers::from(vec![Rank::Queen]));
    }

    #[test]
    fn flush_over_straight() {
        let (ranking, _) = eval("4h 6h 7h 8h 9h Ts");
        assert_eq!(ranking, Ranking::Flush(Rank::Nine));
    }

    #[test]
    fn full_house_over_flush() {
        let (ranking, kickers) = eval("Kh Ah Ad As Ks Qs Js 9s");
        assert_eq!(ranking, Ranking::FullHouse(Rank::Ace, Rank::King));
        assert_eq!(kickers, Kickers::default());
    }

    #[test]
    fn four_oak_over_full_house() {
        let (ranking, kickers) = eval("As Ah Ad Ac Ks Kh Qd");
        assert_eq!(ranking, Ranking::FourOAK(Rank::Ace));
        assert_eq!(kickers, Kickers::from(vec![Rank::King]));
    }

    #[test]
    fn straight_flush_over_four_oak() {
        let (ranking, _) = eval("Ts Js Qs Ks As Ah Ad Ac");
        assert_eq!(ranking, Ranking::StraightFlush(Rank::Ace));
    }

    #[test]
    fn three_pair_takes_best_two() {
        let (ranking, kickers) = eval("As Ah Kd Kc Qs Qh Jd");
        assert_eq!(ranking, Ranking::TwoPair(Rank::Ace, Rank::King));
        assert_eq!(kickers, Kickers::from(vec![Rank::Queen]));
    }

    #[test]
    fn two_three_oak_make_full_house() {
        let (ranking, kickers) = eval("As Ah Ad Kc Ks Kh Qd");
        assert_eq!(ranking, Ranking::FullHouse(Rank::Ace, Rank::King));
        assert_eq!(kickers, Kickers::default());
    }

    #[test]
    fn seven_card_flush_keeps_best_five() {
        let lhs = Strength::from(CardSet::try_from("Ah Kh Qh Jh 9h 8h 2c").unwrap());
        let rhs = Strength::from(CardSet::try_from("Ah Kh Qh Jh 9h 2h 2c").unwrap());
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn equal_flush_high_splits_on_lower_cards() {
        let lhs = Strength::from(CardSet::try_from("Ah Kh Qh Jh 9h").unwrap());
        let rhs = Strength::from(CardSet::try_from("Ah Kh Qh Jh 8h").unwrap());
        assert!(lhs > rhs);
    }

    #[test]
    fn kickers_ignore_suits() {
        let lhs = Strength::from(CardSet::try_from("As Ah Kd Qc Js").unwrap());
        let rhs = Strength::from(CardSet::try_from("Ac Ad Kh Qs Jd").unwrap());
        assert_eq!(lhs, rhs);
    }
}
