use super::card::Card;
use super::suit::Suit;

/// An unordered set of cards in the 52 LSBs of a u64.
///
/// One bit per card, so unions and intersections are single instructions
/// and nothing ever touches the heap. Order falls out of bit position:
/// iterating yields cards from low rank to high.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct CardSet(u64);

impl CardSet {
    pub fn empty() -> Self {
        Self(0)
    }
    pub fn full() -> Self {
        Self(Self::mask())
    }

    pub fn size(&self) -> usize {
        self.0.count_ones() as usize
    }
    pub fn contains(&self, card: Card) -> bool {
        self.0 & u64::from(card) != 0
    }
    pub fn insert(&mut self, card: Card) {
        debug_assert!(!self.contains(card));
        self.0 |= u64::from(card);
    }
    pub fn remove(&mut self, card: Card) {
        self.0 &= !u64::from(card);
    }

    /// Disjoint union. Panics if the sets overlap.
    pub fn union(lhs: Self, rhs: Self) -> Self {
        assert!(lhs.0 & rhs.0 == 0);
        Self(lhs.0 | rhs.0)
    }

    /// The cards of one suit within this set.
    pub fn of(&self, suit: &Suit) -> Self {
        Self(self.0 & u64::from(*suit))
    }

    const fn mask() -> u64 {
        0x000FFFFFFFFFFFFF
    }
}

/// we can drain a set from low to high
/// by removing the lowest card until the set is empty
impl Iterator for CardSet {
    type Item = Card;
    fn next(&mut self) -> Option<Self::Item> {
        if self.size() == 0 {
            None
        } else {
            let card = Card::from(self.0.trailing_zeros() as u8);
            self.remove(card);
            Some(card)
        }
    }
}

/// u64 isomorphism
/// we OR the cards to get the bitstring
impl From<u64> for CardSet {
    fn from(n: u64) -> Self {
        Self(n & Self::mask())
    }
}
impl From<CardSet> for u64 {
    fn from(s: CardSet) -> Self {
        s.0
    }
}

/// Vec<Card> isomorphism (up to permutation, this always comes out sorted)
impl From<CardSet> for Vec<Card> {
    fn from(s: CardSet) -> Self {
        s.into_iter().collect()
    }
}
impl From<Vec<Card>> for CardSet {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards.into_iter().map(u64::from).fold(0u64, |a, b| a | b))
    }
}

/// one-way projection onto u16 rank masks
/// zero-allocation, zero iteration. just shredding bits
impl From<CardSet> for u16 {
    fn from(s: CardSet) -> Self {
        let mut x = u64::from(s);
        x |= x >> 1;
        x |= x >> 2;
        x &= 0x1111111111111;
        let mut y = u64::default();
        y |= (x >> 00) & 0x0001;
        y |= (x >> 03) & 0x0002;
        y |= (x >> 06) & 0x0004;
        y |= (x >> 09) & 0x0008;
        y |= (x >> 12) & 0x0010;
        y |= (x >> 15) & 0x0020;
        y |= (x >> 18) & 0x0040;
        y |= (x >> 21) & 0x0080;
        y |= (x >> 24) & 0x0100;
        y |= (x >> 27) & 0x0200;
        y |= (x >> 30) & 0x0400;
        y |= (x >> 33) & 0x0800;
        y |= (x >> 36) & 0x1000;
        y as u16
    }
}

/// str isomorphism
/// whitespace-separated card strs, e.g. "As Kd 2c"
impl TryFrom<&str> for CardSet {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.split_whitespace()
            .map(Card::try_from)
            .collect::<Result<Vec<Card>, _>>()
            .map(Self::from)
    }
}

impl std::fmt::Display for CardSet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for card in *self {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_u64() {
        let set = CardSet::try_from("Jc Ts 2c Js").unwrap();
        assert_eq!(set, CardSet::from(u64::from(set)));
    }

    #[test]
    fn card_iteration_is_sorted() {
        let mut iter = CardSet::try_from("Jc Ts 2c Js").unwrap().into_iter();
        assert_eq!(iter.next(), Some(Card::try_from("2c").unwrap()));
        assert_eq!(iter.next(), Some(Card::try_from("Ts").unwrap()));
        assert_eq!(iter.next(), Some(Card::try_from("Jc").unwrap()));
        assert_eq!(iter.next(), Some(Card::try_from("Js").unwrap()));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn ranks_in_suit() {
        let set = CardSet::try_from("2c 3d 4h 5s 6c 7d 8h 9s Tc Jd Qh Ks Ac").unwrap();
        assert_eq!(u16::from(set.of(&Suit::Club)), 0b_1000100010001);
        assert_eq!(u16::from(set.of(&Suit::Diamond)), 0b_0001000100010);
        assert_eq!(u16::from(set.of(&Suit::Heart)), 0b_0010001000100);
        assert_eq!(u16::from(set.of(&Suit::Spade)), 0b_0100010001000);
    }

    #[test]
    fn insert_remove_contains() {
        let mut set = CardSet::empty();
        let card = Card::try_from("Ah").unwrap();
        set.insert(card);
        assert!(set.contains(card));
        set.remove(card);
        assert!(!set.contains(card));
        assert_eq!(set.size(), 0);
    }

    #[test]
    fn full_deck_is_52() {
        assert_eq!(CardSet::full().size(), 52);
    }
}
