//! Decision engine for a seat at a heuristic poker table.
//!
//! This module implements:
//! - Hand strength: a cheap `[0, 1]` score from hole and community cards
//! - Table context: street and position classification
//! - Action inference: opponent folds, calls and raises read off consecutive
//!   snapshots
//! - Opponent profiles with a rolling aggressiveness score
//! - Tiered bet decisions (baseline, cautious, heads-up)
//!
//! ## Tiers
//!
//! ### Baseline
//! - Used whenever the table isn't aggressive
//! - Folds below 0.15, raises above 0.3, big-raises above 0.5
//!
//! ### Cautious
//! - Several opponents averaging above 0.7 aggressiveness
//! - Same shape as baseline with every threshold raised
//!
//! ### Heads-up
//! - A single opponent above 0.7 aggressiveness
//! - Trap (slow-play) or Counter (re-raise), per [`decision::HeadsUpStyle`]
//! - The only tier that bluffs, and never pre-flop
//!
//! ## Example
//!
//! ```
//! use poker_player::bot::{Player, decision::DecisionConfig, random::FixedSource};
//! use poker_player::game::TableSnapshot;
//!
//! let player = Player::with_rng(DecisionConfig::default(), FixedSource::constant(0.5));
//! let snapshot = TableSnapshot::from_json(
//!     r#"{
//!         "game_id": "g1", "round": 0, "bet_index": 2,
//!         "small_blind": 10, "current_buy_in": 20, "pot": 30,
//!         "minimum_raise": 20, "dealer": 0, "in_action": 1,
//!         "players": [
//!             {"id": 0, "name": "Albert", "status": "active", "stack": 990, "bet": 10},
//!             {"id": 1, "name": "Us", "status": "active", "stack": 1000, "bet": 0,
//!              "hole_cards": [{"rank": "A", "suit": "spades"}, {"rank": "A", "suit": "hearts"}]},
//!             {"id": 2, "name": "Chuck", "status": "active", "stack": 980, "bet": 20}
//!         ]
//!     }"#,
//! )
//! .unwrap();
//!
//! // Pocket aces: a big raise of to_call + 2 * minimum_raise
//! assert_eq!(player.on_bet_request(&snapshot), 60);
//! ```

pub mod context;
pub mod decision;
pub mod errors;
pub mod inference;
pub mod models;
pub mod player;
pub mod profiles;
pub mod random;
pub mod strength;

pub use context::{Position, Street};
pub use decision::{BetDecider, Decision, DecisionConfig, HeadsUpStyle, Play, Tier};
pub use errors::{EngineError, EngineResult};
pub use models::{ActionKind, OpponentProfile, ProfileKey, RecordedAction};
pub use player::Player;
pub use profiles::ProfileStore;
pub use random::{FixedSource, RandomSource, RngSource};
pub use strength::evaluate;
