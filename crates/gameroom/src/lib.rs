//! Async room layer: scheduling, seating, timeouts, and hand history.
//!
//! Each room is one tokio task that owns its table outright; all
//! mutation arrives over a command queue, so game state never sits
//! behind a lock. Turn deadlines share the same loop and resolve by
//! injecting the passive action for the seat on the clock.
//!
//! ## Rooms
//!
//! - [`Lobby`] — Opens, finds, and closes rooms
//! - [`Room`] / [`RoomHandle`] — The room task and its clonable client
//! - [`Table`] — Seating and hand lifecycle, free of concurrency
//! - [`Chair`] — A seated member's stack and presence between hands
//! - [`Timer`] — The decision deadline for the seat on turn
//!
//! ## Collaborators
//!
//! - [`Ledger`] — Chip custody outside the table; debit on buy-in,
//!   credit on cash-out
//! - [`Archive`] — Hand history sink fed after every settled hand
//!
//! ## Views
//!
//! - [`Snapshot`] — A viewer-specific picture with holes redacted
//! - [`ServerMessage`] — Ordered wire events for a transport layer
mod chair;
mod error;
mod ledger;
mod lobby;
mod message;
mod records;
mod room;
mod snapshot;
mod table;
mod timer;

pub use chair::Chair;
pub use chair::Presence;
pub use error::TableError;
pub use ledger::Archive;
pub use ledger::Bankroll;
pub use ledger::Journal;
pub use ledger::Ledger;
pub use ledger::Member;
pub use lobby::Lobby;
pub use message::Reveal;
pub use message::ServerMessage;
pub use message::Winner;
pub use records::HandRecord;
pub use records::PlayerRecord;
pub use room::Room;
pub use room::RoomHandle;
pub use snapshot::PayoutView;
pub use snapshot::SeatView;
pub use snapshot::Snapshot;
pub use table::Table;
pub use table::TableConfig;
pub use timer::Timer;
pub use timer::TimerConfig;
