//! Opponent profile models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::entities::{Card, Chips, PlayerId};

/// Number of most recent actions that feed the aggressiveness score.
pub const AGGRESSION_WINDOW: usize = 20;

/// Score reported for opponents without any recorded action.
pub const DEFAULT_AGGRESSIVENESS: f32 = 0.5;

/// Soft floor of the aggressiveness score.
pub const MIN_AGGRESSIVENESS: f32 = 0.1;

/// Soft ceiling of the aggressiveness score.
pub const MAX_AGGRESSIVENESS: f32 = 1.0;

/// Weight of the raise frequency in the score.
const RAISE_WEIGHT: f32 = 0.8;

/// Weight of the non-fold frequency in the score.
const STAY_WEIGHT: f32 = 0.2;

/// Profiles are scoped to a game so unrelated tables never share a record.
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct ProfileKey {
    pub game_id: String,
    pub player_id: PlayerId,
}

impl ProfileKey {
    pub fn new(game_id: impl Into<String>, player_id: PlayerId) -> Self {
        Self {
            game_id: game_id.into(),
            player_id,
        }
    }
}

impl fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.game_id, self.player_id)
    }
}

/// What an opponent did between two snapshots.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Fold,
    Call,
    Raise,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Fold => "folds",
            Self::Call => "calls",
            Self::Raise => "raises",
        };
        write!(f, "{repr}")
    }
}

/// One action as it lands in an opponent's history.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RecordedAction {
    pub round: u32,
    pub bet_index: u32,
    pub kind: ActionKind,
    /// The opponent's total bet for the round after acting.
    pub amount: Chips,
}

/// Everything known about one opponent.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct OpponentProfile {
    pub id: PlayerId,
    pub name: String,

    /// Full action history, oldest first
    pub actions: Vec<RecordedAction>,

    /// Derived from the last [`AGGRESSION_WINDOW`] actions
    pub aggressiveness: f32,

    /// Times the opponent's hand was shown at showdown
    pub showdowns: u32,

    /// Showdowns where the opponent took chips
    pub showdowns_won: u32,

    /// Chips collected at showdowns
    pub chips_won: u64,

    /// Hole cards revealed at the most recent showdown
    pub last_shown: Vec<Card>,

    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl OpponentProfile {
    /// Create an action-less profile with the default score
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.into(),
            actions: Vec::new(),
            aggressiveness: DEFAULT_AGGRESSIVENESS,
            showdowns: 0,
            showdowns_won: 0,
            chips_won: 0,
            last_shown: Vec::new(),
            first_seen: now,
            last_seen: now,
        }
    }

    /// Append an action and rescore.
    pub fn record(&mut self, action: RecordedAction) {
        self.actions.push(action);
        self.aggressiveness = aggressiveness(self.recent_actions());
        self.last_seen = Utc::now();
    }

    /// Record a showdown the opponent took part in.
    pub fn record_showdown(&mut self, chips_won: Chips, shown: &[Card]) {
        self.showdowns += 1;
        if chips_won > 0 {
            self.showdowns_won += 1;
            self.chips_won += u64::from(chips_won);
        }
        if !shown.is_empty() {
            self.last_shown = shown.to_vec();
        }
        self.last_seen = Utc::now();
    }

    /// The actions that currently feed the score.
    #[must_use]
    pub fn recent_actions(&self) -> &[RecordedAction] {
        let start = self.actions.len().saturating_sub(AGGRESSION_WINDOW);
        &self.actions[start..]
    }

    /// Fraction of showdowns won
    #[must_use]
    pub fn showdown_win_rate(&self) -> f32 {
        if self.showdowns == 0 {
            0.0
        } else {
            self.showdowns_won as f32 / self.showdowns as f32
        }
    }
}

/// Score a window of actions:
/// `raises/total * 0.8 + 0.2 * (1 - folds/total)`, clamped to
/// `[0.1, 1.0]`. An empty window scores the default.
#[must_use]
pub fn aggressiveness(window: &[RecordedAction]) -> f32 {
    if window.is_empty() {
        return DEFAULT_AGGRESSIVENESS;
    }

    let total = window.len() as f32;
    let raises = window
        .iter()
        .filter(|action| action.kind == ActionKind::Raise)
        .count() as f32;
    let folds = window
        .iter()
        .filter(|action| action.kind == ActionKind::Fold)
        .count() as f32;

    let score = (raises / total) * RAISE_WEIGHT + STAY_WEIGHT * (1.0 - folds / total);
    score.clamp(MIN_AGGRESSIVENESS, MAX_AGGRESSIVENESS)
}
