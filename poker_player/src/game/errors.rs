//! Snapshot parsing and validation errors.

use thiserror::Error;

use super::entities::PlayerId;

/// Errors raised while turning wire data into a [`TableSnapshot`](super::entities::TableSnapshot)
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The payload isn't valid snapshot JSON
    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The seat list is empty
    #[error("Snapshot has no seats")]
    NoSeats,

    /// A seat index points past the end of the seat list
    #[error("Seat index {index} in `{field}` out of range for {seats} seats")]
    SeatOutOfRange {
        field: &'static str,
        index: usize,
        seats: usize,
    },

    /// Two seats share an id
    #[error("Duplicate seat id {0}")]
    DuplicateSeat(PlayerId),

    /// Unknown rank symbol
    #[error("Unknown rank: {0}")]
    UnknownRank(String),

    /// Unknown suit symbol
    #[error("Unknown suit: {0}")]
    UnknownSuit(String),

    /// Card text without both a rank and a suit
    #[error("Malformed card: {0:?}")]
    MalformedCard(String),
}
