use crate::seat::Seat;
use crate::seat::State;
use cardroom_core::Chips;

/// One pot band with the seats eligible to win it.
///
/// `eligible` holds hand-local seat indices. Folded seats are never
/// eligible, but their chips stay in whichever bands they reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pot {
    pub amount: Chips,
    pub eligible: Vec<usize>,
}

/// Side-pot partitioning by contribution level.
///
/// Each distinct total contribution among non-folded seats caps a band.
/// Ascending over bands `(lower, upper]`, a band's pot collects
/// `clamp(spent) - lower` from every seat that reached past `lower`,
/// and only non-folded seats that reached `upper` may win it. This
/// makes uncalled bets fall out naturally: the top band above everyone
/// else's contribution has a single eligible seat and returns to them.
pub struct Pots;

impl Pots {
    /// Partitions all committed chips into pots. The sum over pots
    /// always equals the sum of seat contributions.
    pub fn settle(seats: &[Seat]) -> Vec<Pot> {
        let mut levels = seats
            .iter()
            .filter(|s| s.state() != State::Folding)
            .map(|s| s.spent())
            .filter(|spent| *spent > 0)
            .collect::<Vec<Chips>>();
        levels.sort_unstable();
        levels.dedup();
        let mut pots = Vec::new();
        let mut lower = 0;
        for upper in levels {
            let amount = seats
                .iter()
                .map(|s| (s.spent().min(upper) - lower).max(0))
                .sum();
            let eligible = seats
                .iter()
                .enumerate()
                .filter(|(_, s)| s.state() != State::Folding)
                .filter(|(_, s)| s.spent() >= upper)
                .map(|(i, _)| i)
                .collect();
            pots.push(Pot { amount, eligible });
            lower = upper;
        }
        pots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardroom_cards::Hole;

    fn table(entries: &[(Chips, State)]) -> Vec<Seat> {
        let holes = [
            "As Ks", "Qs Js", "Ts 9s", "8s 7s", "6s 5s", "4s 3s", "2s 2h", "3h 4h", "5h 6h",
        ];
        entries
            .iter()
            .enumerate()
            .map(|(i, (spent, state))| {
                let mut seat = Seat::from((i, *spent, Hole::try_from(holes[i]).unwrap()));
                seat.bet(*spent);
                if *state == State::Folding {
                    seat.fold();
                }
                seat
            })
            .collect()
    }

    #[test]
    fn uncontested_single_pot() {
        let seats = table(&[(50, State::Betting), (50, State::Betting)]);
        let pots = Pots::settle(&seats);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 100);
        assert_eq!(pots[0].eligible, vec![0, 1]);
    }

    /// contributions {30, 80, 200, 200} band into a 120 pot for all,
    /// a 150 pot for the top three, and a 240 pot for the top two
    #[test]
    fn three_way_banding() {
        let seats = table(&[
            (30, State::Betting),
            (80, State::Betting),
            (200, State::Betting),
            (200, State::Betting),
        ]);
        let pots = Pots::settle(&seats);
        assert_eq!(pots.len(), 3);
        assert_eq!(pots[0].amount, 120);
        assert_eq!(pots[0].eligible, vec![0, 1, 2, 3]);
        assert_eq!(pots[1].amount, 150);
        assert_eq!(pots[1].eligible, vec![1, 2, 3]);
        assert_eq!(pots[2].amount, 240);
        assert_eq!(pots[2].eligible, vec![2, 3]);
    }

    #[test]
    fn folded_chips_stay_in_pots() {
        let seats = table(&[
            (60, State::Folding),
            (100, State::Betting),
            (100, State::Betting),
        ]);
        let pots = Pots::settle(&seats);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 260);
        assert_eq!(pots[0].eligible, vec![1, 2]);
    }

    #[test]
    fn uncalled_bet_returns_to_bettor() {
        let seats = table(&[
            (80, State::Betting),
            (100, State::Betting),
            (40, State::Folding),
        ]);
        let pots = Pots::settle(&seats);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, 200);
        assert_eq!(pots[0].eligible, vec![0, 1]);
        assert_eq!(pots[1].amount, 20);
        assert_eq!(pots[1].eligible, vec![1]);
    }

    #[test]
    fn conservation_over_bands() {
        let seats = table(&[
            (17, State::Betting),
            (93, State::Folding),
            (250, State::Betting),
            (250, State::Betting),
            (121, State::Betting),
        ]);
        let pots = Pots::settle(&seats);
        let total: Chips = seats.iter().map(Seat::spent).sum();
        let banded: Chips = pots.iter().map(|p| p.amount).sum();
        assert_eq!(total, banded);
    }
}
