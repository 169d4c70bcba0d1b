//! The player: the two entry points the hosting service calls.

use super::{
    context::{Position, Street},
    decision::{BetContext, BetDecider, Decision, DecisionConfig, OpponentContext},
    errors::{EngineError, EngineResult},
    inference::{SnapshotDigest, infer_actions},
    models::ProfileKey,
    profiles::ProfileStore,
    random::{RandomSource, RngSource},
    strength::evaluate,
};
use crate::game::entities::{Chips, TableSnapshot};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard, PoisonError},
};

/// A poker player that answers bet requests and learns from what its
/// opponents do.
///
/// Every call is synchronous and self-contained; internal state is behind
/// locks so one player can serve several tables at once. Opponent profiles
/// and the previous snapshot are kept per game.
///
/// # Example
///
/// ```
/// use poker_player::{Player, bot::decision::DecisionConfig, bot::random::FixedSource};
///
/// let player = Player::with_rng(DecisionConfig::default(), FixedSource::constant(0.5));
/// assert_eq!(player.profiles().len(), 0);
/// ```
#[derive(Debug)]
pub struct Player<R = RngSource<StdRng>> {
    decider: BetDecider,
    profiles: ProfileStore,
    /// Last snapshot seen per game id
    digests: Mutex<HashMap<String, SnapshotDigest>>,
    rng: Mutex<R>,
}

impl Player {
    /// A player drawing from an OS-seeded generator
    pub fn new(config: DecisionConfig) -> Self {
        Self::with_rng(config, RngSource::from_entropy())
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(DecisionConfig::default())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<R: RandomSource> Player<R> {
    pub fn with_rng(config: DecisionConfig, rng: R) -> Self {
        Self {
            decider: BetDecider::new(config),
            profiles: ProfileStore::new(),
            digests: Mutex::new(HashMap::new()),
            rng: Mutex::new(rng),
        }
    }

    #[must_use]
    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    #[must_use]
    pub fn config(&self) -> &DecisionConfig {
        self.decider.config()
    }

    #[must_use]
    pub fn version(&self) -> &'static str {
        crate::VERSION
    }

    /// Answer a betting opportunity with a chip amount; `0` folds.
    ///
    /// Never fails: a snapshot the engine can't work with is answered with
    /// a fold.
    pub fn on_bet_request(&self, snapshot: &TableSnapshot) -> Chips {
        self.bet_request(snapshot).amount
    }

    /// Like [`Player::on_bet_request`], but reports how the amount was
    /// chosen.
    pub fn bet_request(&self, snapshot: &TableSnapshot) -> Decision {
        self.decide_or_fold(snapshot)
    }

    /// Book showdown results for every opponent that showed cards or won
    /// chips, and close the hand's diff baseline.
    pub fn on_showdown(&self, snapshot: &TableSnapshot) {
        for (idx, seat) in snapshot.players.iter().enumerate() {
            if idx == snapshot.in_action {
                if let Some(won) = seat.amount_won {
                    info!("Showdown in {}: we won {won}", snapshot.game_id);
                }
                continue;
            }
            if seat.hole_cards.is_empty() && seat.amount_won.is_none() {
                continue;
            }
            let key = ProfileKey::new(snapshot.game_id.as_str(), seat.id);
            self.profiles.record_showdown(
                &key,
                &seat.name,
                seat.amount_won.unwrap_or(0),
                &seat.hole_cards,
            );
        }
        lock(&self.digests).remove(&snapshot.game_id);
    }

    /// Register the opponents, infer their actions since the previous
    /// snapshot of this game, and make `snapshot` the new baseline.
    fn observe(&self, snapshot: &TableSnapshot) {
        let observed = {
            let mut digests = lock(&self.digests);
            let observed = infer_actions(digests.get(&snapshot.game_id), snapshot);
            digests.insert(snapshot.game_id.clone(), SnapshotDigest::from(snapshot));
            observed
        };

        for (idx, seat) in snapshot.players.iter().enumerate() {
            if idx != snapshot.in_action {
                let key = ProfileKey::new(snapshot.game_id.as_str(), seat.id);
                self.profiles.get_or_create(&key, &seat.name);
            }
        }

        for action in observed {
            let key = ProfileKey::new(snapshot.game_id.as_str(), action.player_id);
            self.profiles.record_action(&key, &action.name, action.action);
        }
    }

    /// The one place where a failed decision turns into a fold.
    fn decide_or_fold(&self, snapshot: &TableSnapshot) -> Decision {
        self.try_decide(snapshot).unwrap_or_else(|err| {
            warn!(
                "Folding in game {} (round {}, bet {}): {err}",
                snapshot.game_id, snapshot.round, snapshot.bet_index
            );
            Decision::fallback()
        })
    }

    /// A snapshot that fails validation is never observed.
    fn try_decide(&self, snapshot: &TableSnapshot) -> EngineResult<Decision> {
        snapshot.validate()?;
        self.observe(snapshot);

        let seat = snapshot
            .acting_seat()
            .filter(|seat| seat.hole_cards.len() >= 2)
            .ok_or(EngineError::MissingHoleCards {
                seat: snapshot.in_action,
            })?;

        let strength = evaluate(&seat.hole_cards, &snapshot.community_cards);
        let street = Street::from_community_count(snapshot.community_cards.len());
        let position = Position::classify(
            snapshot.dealer,
            snapshot.in_action,
            snapshot.active_count(),
        );

        let scores: Vec<f32> = snapshot
            .active_opponents()
            .map(|opponent| {
                self.profiles
                    .aggressiveness(&ProfileKey::new(snapshot.game_id.as_str(), opponent.id))
            })
            .collect();
        let opponents = OpponentContext::from_scores(&scores);

        let ctx = BetContext {
            strength,
            position,
            street,
            to_call: snapshot.to_call(),
            minimum_raise: snapshot.minimum_raise,
            stack: seat.stack,
            small_blind: snapshot.small_blind,
            pot: snapshot.pot,
        };

        let decision = {
            let mut rng = lock(&self.rng);
            self.decider.decide(&ctx, &opponents, &mut *rng)
        };

        debug!(
            "Game {} bet {}: strength {strength:.2}, {position}, {street}, {} opponent(s) at {:.2} -> {} {} ({})",
            snapshot.game_id,
            snapshot.bet_index,
            opponents.active_opponents,
            opponents.mean_aggression,
            decision.play,
            decision.amount,
            decision.tier,
        );

        Ok(decision)
    }
}
