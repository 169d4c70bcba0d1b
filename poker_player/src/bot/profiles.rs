//! In-memory opponent profile store.

use super::models::{DEFAULT_AGGRESSIVENESS, OpponentProfile, ProfileKey, RecordedAction};
use crate::game::entities::{Card, Chips};
use log::{debug, info};
use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

/// Opponent profiles for every game the player takes part in.
///
/// Records are created lazily, at most once per [`ProfileKey`], and mutated
/// in place afterwards. The store is owned by whoever drives the engine; it
/// isn't a global.
#[derive(Debug, Default)]
pub struct ProfileStore {
    profiles: RwLock<HashMap<ProfileKey, OpponentProfile>>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Profiles are statistics: a panic elsewhere doesn't make them unusable.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<ProfileKey, OpponentProfile>> {
        self.profiles.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<ProfileKey, OpponentProfile>> {
        self.profiles.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a copy of the profile for `key`, creating it first if needed.
    pub fn get_or_create(&self, key: &ProfileKey, name: &str) -> OpponentProfile {
        let mut profiles = self.write();
        Self::entry(&mut profiles, key, name).clone()
    }

    fn entry<'a>(
        profiles: &'a mut HashMap<ProfileKey, OpponentProfile>,
        key: &ProfileKey,
        name: &str,
    ) -> &'a mut OpponentProfile {
        profiles.entry(key.clone()).or_insert_with(|| {
            info!("Tracking new opponent {name} ({key})");
            OpponentProfile::new(key.player_id, name)
        })
    }

    /// Append an action to the opponent's history and rescore it.
    ///
    /// # Returns
    ///
    /// * `f32` - The updated aggressiveness score
    pub fn record_action(&self, key: &ProfileKey, name: &str, action: RecordedAction) -> f32 {
        let mut profiles = self.write();
        let profile = Self::entry(&mut profiles, key, name);
        debug!(
            "{} {} to {} (round {}, bet {})",
            profile.name, action.kind, action.amount, action.round, action.bet_index
        );
        profile.record(action);
        profile.aggressiveness
    }

    /// Record a showdown result for an opponent.
    pub fn record_showdown(&self, key: &ProfileKey, name: &str, chips_won: Chips, shown: &[Card]) {
        let mut profiles = self.write();
        Self::entry(&mut profiles, key, name).record_showdown(chips_won, shown);
    }

    /// Current aggressiveness score, or the neutral default for unknown
    /// opponents.
    #[must_use]
    pub fn aggressiveness(&self, key: &ProfileKey) -> f32 {
        self.read()
            .get(key)
            .map_or(DEFAULT_AGGRESSIVENESS, |profile| profile.aggressiveness)
    }

    /// Look up a profile without creating it.
    #[must_use]
    pub fn get(&self, key: &ProfileKey) -> Option<OpponentProfile> {
        self.read().get(key).cloned()
    }

    /// All profiles tracked for one game, ordered by player id.
    #[must_use]
    pub fn profiles_for_game(&self, game_id: &str) -> Vec<OpponentProfile> {
        let mut profiles: Vec<_> = self
            .read()
            .iter()
            .filter(|(key, _)| key.game_id == game_id)
            .map(|(_, profile)| profile.clone())
            .collect();
        profiles.sort_by_key(|profile| profile.id);
        profiles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::models::{ActionKind, MAX_AGGRESSIVENESS, MIN_AGGRESSIVENESS};

    fn raise(bet_index: u32) -> RecordedAction {
        RecordedAction {
            round: 0,
            bet_index,
            kind: ActionKind::Raise,
            amount: 40,
        }
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let store = ProfileStore::new();
        let key = ProfileKey::new("game", 1);

        let first = store.get_or_create(&key, "Albert");
        store.record_action(&key, "Albert", raise(1));
        let second = store.get_or_create(&key, "Renamed");

        assert_eq!(store.len(), 1);
        assert_eq!(first.aggressiveness, DEFAULT_AGGRESSIVENESS);
        assert_eq!(second.name, "Albert");
        assert_eq!(second.actions.len(), 1);
    }

    #[test]
    fn test_unknown_opponent_is_neutral() {
        let store = ProfileStore::new();
        assert_eq!(
            store.aggressiveness(&ProfileKey::new("game", 9)),
            DEFAULT_AGGRESSIVENESS
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_record_action_rescores() {
        let store = ProfileStore::new();
        let key = ProfileKey::new("game", 1);

        let score = store.record_action(&key, "Albert", raise(1));
        assert_eq!(score, MAX_AGGRESSIVENESS);

        let fold = RecordedAction {
            kind: ActionKind::Fold,
            ..raise(2)
        };
        for idx in 0..40 {
            let action = RecordedAction {
                bet_index: idx,
                ..fold.clone()
            };
            store.record_action(&key, "Albert", action);
        }
        assert_eq!(store.aggressiveness(&key), MIN_AGGRESSIVENESS);
    }

    #[test]
    fn test_games_are_isolated() {
        let store = ProfileStore::new();
        let table_a = ProfileKey::new("a", 1);
        let table_b = ProfileKey::new("b", 1);

        store.record_action(&table_a, "Albert", raise(1));

        assert_eq!(store.aggressiveness(&table_a), MAX_AGGRESSIVENESS);
        assert_eq!(store.aggressiveness(&table_b), DEFAULT_AGGRESSIVENESS);
        assert_eq!(store.profiles_for_game("a").len(), 1);
        assert!(store.profiles_for_game("b").is_empty());
    }

    #[test]
    fn test_showdown_creates_profile() {
        let store = ProfileStore::new();
        let key = ProfileKey::new("game", 4);
        store.record_showdown(&key, "Dave", 300, &[]);

        let profile = store.get(&key).unwrap();
        assert_eq!(profile.showdowns_won, 1);
        assert_eq!(profile.chips_won, 300);
        assert_eq!(profile.aggressiveness, DEFAULT_AGGRESSIVENESS);
    }
}
