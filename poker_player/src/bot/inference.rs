//! Infer what opponents did by diffing consecutive snapshots.

use super::models::{ActionKind, RecordedAction};
use crate::game::entities::{Chips, PlayerId, PlayerStatus, TableSnapshot};
use std::collections::HashMap;

/// What's kept of a seat between two snapshots.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SeatDigest {
    pub bet: Chips,
    pub status: PlayerStatus,
}

/// The part of a snapshot needed to diff against the next one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SnapshotDigest {
    pub game_id: String,
    pub round: u32,
    pub bet_index: u32,
    pub seats: HashMap<PlayerId, SeatDigest>,
}

impl SnapshotDigest {
    /// Largest bet on the table when the digest was taken.
    #[must_use]
    pub fn max_bet(&self) -> Chips {
        self.seats.values().map(|seat| seat.bet).max().unwrap_or(0)
    }

    /// Whether `next` continues the same betting round strictly after this
    /// digest. Anything else is a boundary and must not be diffed.
    #[must_use]
    pub fn precedes(&self, next: &TableSnapshot) -> bool {
        self.game_id == next.game_id && self.round == next.round && self.bet_index < next.bet_index
    }
}

impl From<&TableSnapshot> for SnapshotDigest {
    fn from(snapshot: &TableSnapshot) -> Self {
        Self {
            game_id: snapshot.game_id.clone(),
            round: snapshot.round,
            bet_index: snapshot.bet_index,
            seats: snapshot
                .players
                .iter()
                .map(|seat| {
                    (
                        seat.id,
                        SeatDigest {
                            bet: seat.bet,
                            status: seat.status,
                        },
                    )
                })
                .collect(),
        }
    }
}

/// An opponent action read off the table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ObservedAction {
    pub player_id: PlayerId,
    pub name: String,
    pub action: RecordedAction,
}

/// Classify every opponent's move between `previous` and `current`.
///
/// Nothing is inferred without a previous digest, or when `current` starts a
/// new game or round or doesn't advance the bet index. The acting seat and
/// seats that are out are skipped. A fold is reported only on the transition
/// into `folded`: a seat that was already folded in `previous` yields nothing,
/// so a folder is not charged a fresh fold on every later snapshot of the
/// round. A bet increase is a raise when it tops the largest previous bet
/// and a call otherwise, ties included.
#[must_use]
pub fn infer_actions(
    previous: Option<&SnapshotDigest>,
    current: &TableSnapshot,
) -> Vec<ObservedAction> {
    let Some(previous) = previous.filter(|previous| previous.precedes(current)) else {
        return Vec::new();
    };

    let max_previous_bet = previous.max_bet();

    current
        .players
        .iter()
        .enumerate()
        .filter(|(idx, seat)| *idx != current.in_action && seat.status != PlayerStatus::Out)
        .filter_map(|(_, seat)| {
            let before = previous.seats.get(&seat.id);
            let kind = match seat.status {
                PlayerStatus::Folded => {
                    let already_folded =
                        before.is_some_and(|before| before.status == PlayerStatus::Folded);
                    (!already_folded).then_some(ActionKind::Fold)
                }
                _ => {
                    let previous_bet = before.map_or(0, |before| before.bet);
                    if seat.bet <= previous_bet {
                        None
                    } else if seat.bet > max_previous_bet {
                        Some(ActionKind::Raise)
                    } else {
                        Some(ActionKind::Call)
                    }
                }
            }?;

            Some(ObservedAction {
                player_id: seat.id,
                name: seat.name.clone(),
                action: RecordedAction {
                    round: current.round,
                    bet_index: current.bet_index,
                    kind,
                    amount: seat.bet,
                },
            })
        })
        .collect()
}
