//! Card primitives and hand evaluation.
//!
//! Cards are represented compactly: a [`Card`](card::Card) fits in a u8,
//! an unordered set of cards fits in the 52 LSBs of a u64. Evaluation is
//! bitwise over that representation and imposes a total order on hands
//! via [`Strength`](strength::Strength).

pub mod board;
pub mod card;
pub mod deck;
pub mod evaluator;
pub mod hole;
pub mod kicks;
pub mod rank;
pub mod ranking;
pub mod set;
pub mod strength;
pub mod street;
pub mod suit;

pub use board::Board;
pub use card::Card;
pub use deck::Deck;
pub use deck::DeckError;
pub use hole::Hole;
pub use kicks::Kickers;
pub use rank::Rank;
pub use ranking::Ranking;
pub use set::CardSet;
pub use strength::Strength;
pub use street::Street;
pub use suit::Suit;
