//! Hold'em hand engine: betting rules, pot accounting, and settlement.
//!
//! This crate implements the rules of a single No-Limit Texas Hold'em hand
//! for 2 to 9 players, from blind posting through showdown. It knows nothing
//! about rooms, scheduling, or transports; it consumes validated actions and
//! either transitions or returns an error with state untouched.
//!
//! ## State
//!
//! - [`Hand`] — The authoritative state machine for one hand
//! - [`Seat`] — A participating player's stack, stake, and hole cards
//! - [`Stage`] — Where the hand is: a betting street, showdown, or finished
//!
//! ## Betting
//!
//! - [`Action`] — A player decision: fold, check, call, raise, all-in
//! - [`Round`] — One street's betting state: bet to match, raise size, reopen
//! - [`Entry`] — An append-only action log record for replay and audit
//!
//! ## Resolution
//!
//! - [`Pots`] — Side-pot banding by contribution level
//! - [`Showdown`] — Per-pot evaluation and chip awards
//! - [`Payout`] — A seat's winnings from settlement
mod action;
mod entry;
mod error;
mod hand;
mod pots;
mod round;
mod seat;
mod showdown;
mod stage;

pub use action::*;
pub use entry::*;
pub use error::*;
pub use hand::*;
pub use pots::*;
pub use round::*;
pub use seat::*;
pub use showdown::*;
pub use stage::*;
