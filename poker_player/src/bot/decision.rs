//! Bet sizing and strategy selection.
//!
//! A decision combines hand strength, table context and what is known about
//! the opponents into a chip amount. There are three tiers:
//!
//! - **Baseline**: strength thresholds with pot-relative sizing.
//! - **Cautious**: several opponents who have been raising a lot; strictly
//!   tighter than baseline.
//! - **Heads-up**: a single aggressive opponent, handled by the configured
//!   [`HeadsUpStyle`].

use super::context::{Position, Street};
use super::random::RandomSource;
use crate::game::entities::Chips;
use enum_dispatch::enum_dispatch;
use std::{fmt, str::FromStr};

/// Policy parameters for bet decisions.
///
/// All strength thresholds are in `[0.0, 1.0]` and compared strictly
/// (`strength > threshold`) except the fold threshold, below which the
/// baseline tier always folds.
///
/// # Examples
///
/// ```
/// use poker_player::bot::decision::DecisionConfig;
///
/// let config = DecisionConfig::default();
/// assert_eq!(config.fold_threshold, 0.15);
/// assert_eq!(config.raise_threshold, 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionConfig {
    /// Strength below this folds in the baseline tier.
    ///
    /// **Typical**: 0.15
    pub fold_threshold: f32,

    /// Strength above this makes a big raise (`to_call + 2 * min_raise`).
    ///
    /// **Typical**: 0.5
    pub raise_threshold: f32,

    /// Strength above this makes a pot-sized raise.
    ///
    /// **Typical**: 0.3
    pub value_threshold: f32,

    /// Strength above this calls when the call is cheap.
    ///
    /// **Typical**: 0.2
    pub call_threshold: f32,

    /// A call is cheap when it costs at most this many small blinds.
    ///
    /// **Typical**: 4
    pub cheap_call_blinds: u32,

    /// Mean opponent aggressiveness above this switches off the baseline.
    ///
    /// **Range**: 0.1-1.0 (typical: 0.7)
    pub aggressive_table: f32,

    /// Against several aggressors: big raise above this strength.
    ///
    /// **Typical**: 0.7
    pub cautious_raise_threshold: f32,

    /// Against several aggressors: pot-sized raise above this strength.
    ///
    /// **Typical**: 0.5
    pub cautious_value_threshold: f32,

    /// Against several aggressors: cheap call above this strength.
    ///
    /// **Typical**: 0.35
    pub cautious_call_threshold: f32,

    /// Heads-up against an aggressor: strong hand above this strength.
    ///
    /// **Typical**: 0.6
    pub heads_up_strong_threshold: f32,

    /// Heads-up against an aggressor: playable hand above this strength.
    ///
    /// **Typical**: 0.35
    pub heads_up_medium_threshold: f32,

    /// Heads-up strong hands: a draw below this takes the quieter line
    /// (call when trapping, the huge raise when countering).
    ///
    /// **Typical**: 0.6
    pub strong_mix_probability: f64,

    /// Heads-up medium hands when countering: a draw below this raises.
    ///
    /// **Typical**: 0.5
    pub medium_raise_probability: f64,

    /// River bluff probability; earlier streets scale it down and pre-flop
    /// never bluffs.
    ///
    /// **Range**: 0.0-0.25 (typical: 0.25)
    pub bluff_probability: f64,

    /// How to play a single aggressive opponent.
    pub heads_up_style: HeadsUpStyle,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            fold_threshold: 0.15,
            raise_threshold: 0.5,
            value_threshold: 0.3,
            call_threshold: 0.2,
            cheap_call_blinds: 4,
            aggressive_table: 0.7,
            cautious_raise_threshold: 0.7,
            cautious_value_threshold: 0.5,
            cautious_call_threshold: 0.35,
            heads_up_strong_threshold: 0.6,
            heads_up_medium_threshold: 0.35,
            strong_mix_probability: 0.6,
            medium_raise_probability: 0.5,
            bluff_probability: 0.25,
            heads_up_style: HeadsUpStyle::default(),
        }
    }
}

/// The acting player's situation at a betting opportunity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BetContext {
    /// Hand strength in `[0, 1]`
    pub strength: f32,
    pub position: Position,
    pub street: Street,
    /// Chips needed to stay in the hand
    pub to_call: Chips,
    pub minimum_raise: Chips,
    /// Acting player's remaining chips; no bet ever exceeds it
    pub stack: Chips,
    pub small_blind: Chips,
    pub pot: Chips,
}

impl BetContext {
    /// Pot-relative bet, scaled by strength, position and street.
    #[must_use]
    pub fn pot_bet(&self) -> Chips {
        let ratio = f64::from(self.strength)
            * f64::from(self.position.bet_factor())
            * f64::from(self.street.bet_factor());
        // Saturating float-to-int cast
        (f64::from(self.pot) * ratio).round() as Chips
    }

    fn is_cheap(&self, config: &DecisionConfig) -> bool {
        self.to_call <= self.small_blind.saturating_mul(config.cheap_call_blinds)
    }
}

/// What is known about the opponents still in the hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpponentContext {
    pub active_opponents: usize,
    pub heads_up: bool,
    /// Mean aggressiveness over active opponents
    pub mean_aggression: f32,
}

impl OpponentContext {
    /// Build the context from the scores of the active opponents.
    #[must_use]
    pub fn from_scores(scores: &[f32]) -> Self {
        let mean_aggression = if scores.is_empty() {
            super::models::DEFAULT_AGGRESSIVENESS
        } else {
            scores.iter().sum::<f32>() / scores.len() as f32
        };
        Self {
            active_opponents: scores.len(),
            heads_up: scores.len() == 1,
            mean_aggression,
        }
    }

    /// No opponent adjustment.
    #[must_use]
    pub fn neutral(active_opponents: usize) -> Self {
        Self {
            active_opponents,
            heads_up: active_opponents == 1,
            mean_aggression: super::models::DEFAULT_AGGRESSIVENESS,
        }
    }
}

/// Kinds of bets, before sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Play {
    Fold,
    Call,
    /// `to_call + max(min_raise, pot_bet)`
    SmallRaise,
    /// `to_call + 2 * min_raise`
    BigRaise,
    /// `to_call + 3 * min_raise`
    HugeRaise,
    /// Sized like a small raise, made with a weak hand
    Bluff,
}

impl Play {
    /// Chips for this play, capped at the stack.
    #[must_use]
    pub fn size(self, ctx: &BetContext) -> Chips {
        let raise = |extra: Chips| ctx.to_call.saturating_add(extra);
        let amount = match self {
            Self::Fold => 0,
            Self::Call => ctx.to_call,
            Self::SmallRaise | Self::Bluff => raise(ctx.minimum_raise.max(ctx.pot_bet())),
            Self::BigRaise => raise(ctx.minimum_raise.saturating_mul(2)),
            Self::HugeRaise => raise(ctx.minimum_raise.saturating_mul(3)),
        };
        amount.min(ctx.stack)
    }
}

impl fmt::Display for Play {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Fold => "fold",
            Self::Call => "call",
            Self::SmallRaise => "small raise",
            Self::BigRaise => "big raise",
            Self::HugeRaise => "huge raise",
            Self::Bluff => "bluff",
        };
        write!(f, "{repr}")
    }
}

/// Which tier produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Baseline,
    Cautious,
    HeadsUp,
    /// No decision could be made; folded instead
    Fallback,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Baseline => "baseline",
            Self::Cautious => "cautious",
            Self::HeadsUp => "heads-up",
            Self::Fallback => "fallback",
        };
        write!(f, "{repr}")
    }
}

/// A sized bet and how it was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub tier: Tier,
    pub play: Play,
    pub amount: Chips,
}

impl Decision {
    /// The fold that stands in for a failed decision.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            tier: Tier::Fallback,
            play: Play::Fold,
            amount: 0,
        }
    }
}

/// Strategy for a single aggressive opponent.
#[enum_dispatch]
pub trait HeadsUpPlay {
    fn respond(
        &self,
        ctx: &BetContext,
        config: &DecisionConfig,
        rng: &mut dyn RandomSource,
    ) -> Play;
}

/// Exploit an aggressor by letting them bet: slow-play strong hands, call
/// down medium ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Trap;

impl HeadsUpPlay for Trap {
    fn respond(
        &self,
        ctx: &BetContext,
        config: &DecisionConfig,
        rng: &mut dyn RandomSource,
    ) -> Play {
        if ctx.strength > config.heads_up_strong_threshold {
            if rng.next_unit() < config.strong_mix_probability {
                Play::Call
            } else {
                Play::BigRaise
            }
        } else if ctx.strength > config.heads_up_medium_threshold {
            Play::Call
        } else if bluffs(ctx.street, config, rng) {
            Play::Bluff
        } else {
            Play::Fold
        }
    }
}

/// Exploit an aggressor by re-raising: big sizes with strong hands and a
/// coin flip between raising and calling with medium ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter;

impl HeadsUpPlay for Counter {
    fn respond(
        &self,
        ctx: &BetContext,
        config: &DecisionConfig,
        rng: &mut dyn RandomSource,
    ) -> Play {
        if ctx.strength > config.heads_up_strong_threshold {
            if rng.next_unit() < config.strong_mix_probability {
                Play::HugeRaise
            } else {
                Play::BigRaise
            }
        } else if ctx.strength > config.heads_up_medium_threshold {
            if rng.next_unit() < config.medium_raise_probability {
                Play::SmallRaise
            } else {
                Play::Call
            }
        } else if bluffs(ctx.street, config, rng) {
            Play::Bluff
        } else {
            Play::Fold
        }
    }
}

#[enum_dispatch(HeadsUpPlay)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadsUpStyle {
    Trap,
    Counter,
}

impl Default for HeadsUpStyle {
    fn default() -> Self {
        Self::Trap(Trap)
    }
}

impl fmt::Display for HeadsUpStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Trap(_) => "trap",
            Self::Counter(_) => "counter",
        };
        write!(f, "{repr}")
    }
}

impl FromStr for HeadsUpStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trap" => Ok(Trap.into()),
            "counter" => Ok(Counter.into()),
            other => Err(format!("unknown heads-up style: {other}")),
        }
    }
}

/// Scale of the bluff probability per street.
fn bluff_weight(street: Street) -> f64 {
    match street {
        Street::Flop => 0.4,
        Street::Turn => 0.7,
        Street::River => 1.0,
        Street::PreFlop | Street::Unknown => 0.0,
    }
}

/// Roll for a bluff. Streets that never bluff don't consume a draw.
fn bluffs(street: Street, config: &DecisionConfig, rng: &mut dyn RandomSource) -> bool {
    let probability = config.bluff_probability * bluff_weight(street);
    probability > 0.0 && rng.next_unit() < probability
}

/// Turns a situation into a bet.
#[derive(Debug, Clone, Default)]
pub struct BetDecider {
    config: DecisionConfig,
}

impl BetDecider {
    pub fn new(config: DecisionConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    /// Pick a tier from the opponent context and let it choose the play.
    pub fn decide(
        &self,
        ctx: &BetContext,
        opponents: &OpponentContext,
        rng: &mut dyn RandomSource,
    ) -> Decision {
        let aggressive = opponents.mean_aggression > self.config.aggressive_table;
        let (tier, play) = match (opponents.heads_up, aggressive) {
            (true, true) => (
                Tier::HeadsUp,
                self.config.heads_up_style.respond(ctx, &self.config, rng),
            ),
            (false, true) if opponents.active_opponents > 1 => (Tier::Cautious, self.cautious(ctx)),
            _ => (Tier::Baseline, self.baseline(ctx)),
        };

        Decision {
            tier,
            play,
            amount: play.size(ctx),
        }
    }

    fn baseline(&self, ctx: &BetContext) -> Play {
        let config = &self.config;
        let strength = ctx.strength;
        if strength < config.fold_threshold {
            Play::Fold
        } else if strength > config.raise_threshold {
            Play::BigRaise
        } else if strength > config.value_threshold {
            Play::SmallRaise
        } else if strength > config.call_threshold && ctx.is_cheap(config) {
            Play::Call
        } else {
            Play::Fold
        }
    }

    fn cautious(&self, ctx: &BetContext) -> Play {
        let config = &self.config;
        let strength = ctx.strength;
        if strength > config.cautious_raise_threshold {
            Play::BigRaise
        } else if strength > config.cautious_value_threshold {
            Play::SmallRaise
        } else if strength > config.cautious_call_threshold && ctx.is_cheap(config) {
            Play::Call
        } else {
            Play::Fold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::random::FixedSource;

    fn ctx(strength: f32) -> BetContext {
        BetContext {
            strength,
            position: Position::Middle,
            street: Street::Flop,
            to_call: 20,
            minimum_raise: 10,
            stack: 1000,
            small_blind: 10,
            pot: 100,
        }
    }

    fn aggressive(active_opponents: usize) -> OpponentContext {
        OpponentContext {
            active_opponents,
            heads_up: active_opponents == 1,
            mean_aggression: 0.9,
        }
    }

    fn decider(style: HeadsUpStyle) -> BetDecider {
        BetDecider::new(DecisionConfig {
            heads_up_style: style,
            ..DecisionConfig::default()
        })
    }

    #[test]
    fn test_strong_hand_on_the_river() {
        let decider = BetDecider::default();
        let ctx = BetContext {
            strength: 0.6,
            position: Position::Late,
            street: Street::River,
            ..ctx(0.6)
        };
        let decision = decider.decide(
            &ctx,
            &OpponentContext::neutral(3),
            &mut FixedSource::constant(0.0),
        );

        assert_eq!(decision.tier, Tier::Baseline);
        assert_eq!(decision.play, Play::BigRaise);
        assert_eq!(decision.amount, 40);
    }

    #[test]
    fn test_baseline_tiers() {
        let decider = BetDecider::default();
        let neutral = OpponentContext::neutral(2);
        let mut rng = FixedSource::constant(0.0);

        assert_eq!(decider.decide(&ctx(0.1), &neutral, &mut rng).amount, 0);
        // pot_bet = round(100 * 0.4 * 1.0 * 1.0) = 40
        assert_eq!(decider.decide(&ctx(0.4), &neutral, &mut rng).amount, 60);
        assert_eq!(decider.decide(&ctx(0.25), &neutral, &mut rng).amount, 20);
        assert_eq!(decider.decide(&ctx(0.18), &neutral, &mut rng).amount, 0);
    }

    #[test]
    fn test_small_raise_never_below_minimum_raise() {
        let decider = BetDecider::default();
        let tiny_pot = BetContext { pot: 10, ..ctx(0.4) };
        let decision = decider.decide(
            &tiny_pot,
            &OpponentContext::neutral(2),
            &mut FixedSource::constant(0.0),
        );
        assert_eq!(decision.play, Play::SmallRaise);
        assert_eq!(decision.amount, 30);
    }

    #[test]
    fn test_expensive_call_folds() {
        let decider = BetDecider::default();
        let pricey = BetContext { to_call: 50, ..ctx(0.25) };
        let decision = decider.decide(
            &pricey,
            &OpponentContext::neutral(2),
            &mut FixedSource::constant(0.0),
        );
        assert_eq!(decision.play, Play::Fold);
    }

    #[test]
    fn test_raises_are_capped_at_stack() {
        let decider = BetDecider::default();
        let short = BetContext { stack: 25, ..ctx(0.9) };
        let decision = decider.decide(
            &short,
            &OpponentContext::neutral(2),
            &mut FixedSource::constant(0.0),
        );
        assert_eq!(decision.play, Play::BigRaise);
        assert_eq!(decision.amount, 25);
    }

    #[test]
    fn test_cautious_tier_is_tighter() {
        let decider = BetDecider::default();
        let mut rng = FixedSource::constant(0.0);
        let pack = aggressive(3);

        // Baseline would big-raise 0.6; cautious only small-raises
        let decision = decider.decide(&ctx(0.6), &pack, &mut rng);
        assert_eq!(decision.tier, Tier::Cautious);
        assert_eq!(decision.play, Play::SmallRaise);

        assert_eq!(decider.decide(&ctx(0.8), &pack, &mut rng).play, Play::BigRaise);
        assert_eq!(decider.decide(&ctx(0.4), &pack, &mut rng).play, Play::Call);
        // Baseline would raise 0.32; cautious folds it
        assert_eq!(decider.decide(&ctx(0.32), &pack, &mut rng).play, Play::Fold);
    }

    #[test]
    fn test_trap_slow_plays_strong_hands() {
        let decider = decider(Trap.into());
        let heads_up = aggressive(1);

        let slow = decider.decide(&ctx(0.8), &heads_up, &mut FixedSource::constant(0.3));
        assert_eq!(slow.tier, Tier::HeadsUp);
        assert_eq!(slow.play, Play::Call);
        assert_eq!(slow.amount, 20);

        let fast = decider.decide(&ctx(0.8), &heads_up, &mut FixedSource::constant(0.7));
        assert_eq!(fast.play, Play::BigRaise);

        let medium = decider.decide(&ctx(0.4), &heads_up, &mut FixedSource::constant(0.0));
        assert_eq!(medium.play, Play::Call);
    }

    #[test]
    fn test_counter_raises_strong_hands() {
        let decider = decider(Counter.into());
        let heads_up = aggressive(1);

        let huge = decider.decide(&ctx(0.8), &heads_up, &mut FixedSource::constant(0.3));
        assert_eq!(huge.play, Play::HugeRaise);
        assert_eq!(huge.amount, 50);

        let big = decider.decide(&ctx(0.8), &heads_up, &mut FixedSource::constant(0.9));
        assert_eq!(big.play, Play::BigRaise);

        let medium_raise = decider.decide(&ctx(0.4), &heads_up, &mut FixedSource::constant(0.2));
        assert_eq!(medium_raise.play, Play::SmallRaise);
        let medium_call = decider.decide(&ctx(0.4), &heads_up, &mut FixedSource::constant(0.8));
        assert_eq!(medium_call.play, Play::Call);
    }

    #[test]
    fn test_bluffs_only_after_the_flop() {
        let decider = BetDecider::default();
        let heads_up = aggressive(1);

        let river = BetContext { street: Street::River, ..ctx(0.1) };
        let bluff = decider.decide(&river, &heads_up, &mut FixedSource::constant(0.2));
        assert_eq!(bluff.play, Play::Bluff);
        assert!(bluff.amount > river.to_call);

        // Flop probability is 0.25 * 0.4 = 0.1
        let flop = decider.decide(&ctx(0.1), &heads_up, &mut FixedSource::constant(0.2));
        assert_eq!(flop.play, Play::Fold);

        let preflop = BetContext { street: Street::PreFlop, ..ctx(0.1) };
        let folded = decider.decide(&preflop, &heads_up, &mut FixedSource::constant(0.0));
        assert_eq!(folded.play, Play::Fold);
        assert_eq!(folded.amount, 0);
    }

    #[test]
    fn test_no_opponents_is_baseline() {
        let decider = BetDecider::default();
        let alone = OpponentContext::from_scores(&[]);
        assert_eq!(alone.mean_aggression, 0.5);
        assert!(!alone.heads_up);
        assert_eq!(
            decider.decide(&ctx(0.6), &alone, &mut FixedSource::constant(0.0)).tier,
            Tier::Baseline
        );
    }

    #[test]
    fn test_opponent_context_from_scores() {
        let context = OpponentContext::from_scores(&[0.9]);
        assert!(context.heads_up);
        assert_eq!(context.active_opponents, 1);

        let context = OpponentContext::from_scores(&[0.2, 0.8]);
        assert!(!context.heads_up);
        assert!((context.mean_aggression - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_heads_up_style_parsing() {
        assert_eq!("trap".parse::<HeadsUpStyle>(), Ok(HeadsUpStyle::Trap(Trap)));
        assert_eq!("Counter".parse::<HeadsUpStyle>(), Ok(HeadsUpStyle::Counter(Counter)));
        assert!("gamble".parse::<HeadsUpStyle>().is_err());
        assert_eq!(HeadsUpStyle::default().to_string(), "trap");
    }

    #[test]
    fn test_pot_bet_scaling() {
        let late_river = BetContext {
            position: Position::Late,
            street: Street::River,
            ..ctx(0.5)
        };
        // 100 * 0.5 * 1.2 * 1.5 = 90
        assert_eq!(late_river.pot_bet(), 90);

        let early_preflop = BetContext {
            position: Position::Early,
            street: Street::PreFlop,
            ..ctx(0.5)
        };
        // 100 * 0.5 * 0.8 * 0.8 = 32
        assert_eq!(early_preflop.pot_bet(), 32);
    }
}
