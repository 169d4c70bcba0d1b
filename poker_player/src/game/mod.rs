//! Table model: cards, seats and the snapshot delivered at each betting
//! opportunity.

pub mod entities;
pub mod errors;

pub use entities::{Card, Chips, PlayerId, PlayerStatus, Rank, Seat, SeatIndex, Suit, TableSnapshot};
pub use errors::SnapshotError;
