//! # Poker Player
//!
//! A heuristic Texas Hold'em player that answers bet requests from a
//! tournament host.
//!
//! The host sends a full table snapshot for every decision and once more at
//! showdown. The player keeps no game state of its own beyond what it learns
//! about opponents: everything else is read off the snapshot.
//!
//! ## Core Modules
//!
//! - [`game`]: Snapshot entities (cards, seats, table) and their validation
//! - [`bot`]: Hand strength, opponent profiles and bet decisions
//!
//! ## Example
//!
//! ```
//! use poker_player::{Player, VERSION};
//!
//! let player: Player = Player::default();
//! assert!(player.profiles().is_empty());
//! assert!(VERSION.starts_with("poker_player "));
//! ```

/// Decision engine and opponent modeling.
pub mod bot;
pub use bot::{Decision, DecisionConfig, HeadsUpStyle, Player};

/// Snapshot entities and validation.
pub mod game;
pub use game::{Card, Chips, PlayerStatus, Seat, SnapshotError, TableSnapshot};

/// Reported by the `version` action.
pub const VERSION: &str = concat!("poker_player ", env!("CARGO_PKG_VERSION"));
