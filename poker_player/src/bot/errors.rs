//! Decision engine error types.

use thiserror::Error;

use crate::game::{entities::SeatIndex, errors::SnapshotError};

/// Reasons the engine can't reach a decision. None of them escape
/// [`Player::on_bet_request`](super::player::Player::on_bet_request): they
/// all become a fold.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The snapshot's table geometry is unusable
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(#[from] SnapshotError),

    /// The acting seat didn't get its hole cards
    #[error("No hole cards for acting seat {seat}")]
    MissingHoleCards { seat: SeatIndex },
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
