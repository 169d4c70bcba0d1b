//! Heuristic hand strength.
//!
//! This is not a hand ranker. Pre-flop hands are bucketed by
//! pairs, suitedness, connectedness and high cards; post-flop hands look for a
//! handful of coarse patterns (a pair anywhere, four to a flush, four in a
//! row) over the hole and community cards combined.

use crate::game::entities::{Card, Rank, Suit};

// === Pre-flop values ===

/// Base strength of any pocket pair, raised by `rank_index / 30`.
const STRENGTH_POCKET_PAIR_BASE: f32 = 0.5;

/// Divisor applied to the pair rank index.
const POCKET_PAIR_RANK_DIVISOR: f32 = 30.0;

/// Both cards ten or better.
const STRENGTH_TWO_BROADWAY: f32 = 0.45;

/// One card ten or better, same suit.
const STRENGTH_ONE_BROADWAY_SUITED: f32 = 0.35;

/// One card ten or better, different suits.
const STRENGTH_ONE_BROADWAY: f32 = 0.30;

/// Suited connectors (gap of two ranks or less).
const STRENGTH_SUITED_CONNECTED: f32 = 0.25;

const STRENGTH_SUITED: f32 = 0.20;

const STRENGTH_CONNECTED: f32 = 0.15;

/// Everything else.
const STRENGTH_TRASH: f32 = 0.10;

/// Largest rank gap still counted as connected.
const CONNECTED_MAX_GAP: u8 = 2;

// === Post-flop values ===

/// A pair anywhere in the combined cards.
const STRENGTH_PAIR_PRESENT: f32 = 0.5;

/// Four cards of one suit.
const STRENGTH_FLUSH_DRAW: f32 = 0.4;

/// Four consecutive ranks.
const STRENGTH_STRAIGHT_DRAW: f32 = 0.3;

/// No pattern: base plus `highest_hole_rank_index / 15`.
const STRENGTH_HIGH_CARD_BASE: f32 = 0.1;

const HIGH_CARD_RANK_DIVISOR: f32 = 15.0;

/// Cards needed for a flush or straight draw.
const DRAW_LENGTH: usize = 4;

/// Estimate the strength of `hole` given the `community` cards, in `[0, 1]`.
///
/// Fewer than two hole cards yields `0.0`; extra hole cards beyond the first
/// two are ignored pre-flop and simply join the pool post-flop.
///
/// # Examples
///
/// ```
/// use poker_player::bot::strength::evaluate;
/// use poker_player::game::{Card, Rank, Suit};
///
/// let aces = [Card::new(Rank::Ace, Suit::Spade), Card::new(Rank::Ace, Suit::Heart)];
/// assert!((evaluate(&aces, &[]) - 0.9).abs() < 1e-6);
/// ```
#[must_use]
pub fn evaluate(hole: &[Card], community: &[Card]) -> f32 {
    let strength = match (hole, community) {
        ([first, second, ..], []) => preflop(*first, *second),
        ([_, _, ..], _) => postflop(hole, community),
        _ => 0.0,
    };
    strength.clamp(0.0, 1.0)
}

fn preflop(first: Card, second: Card) -> f32 {
    if first.rank == second.rank {
        return STRENGTH_POCKET_PAIR_BASE
            + f32::from(first.rank.index()) / POCKET_PAIR_RANK_DIVISOR;
    }

    let suited = first.suit == second.suit;
    let connected = first.rank.index().abs_diff(second.rank.index()) <= CONNECTED_MAX_GAP;

    match (first.rank.is_broadway(), second.rank.is_broadway()) {
        (true, true) => STRENGTH_TWO_BROADWAY,
        (true, false) | (false, true) if suited => STRENGTH_ONE_BROADWAY_SUITED,
        (true, false) | (false, true) => STRENGTH_ONE_BROADWAY,
        _ if suited && connected => STRENGTH_SUITED_CONNECTED,
        _ if suited => STRENGTH_SUITED,
        _ if connected => STRENGTH_CONNECTED,
        _ => STRENGTH_TRASH,
    }
}

fn postflop(hole: &[Card], community: &[Card]) -> f32 {
    let mut rank_counts = [0usize; Rank::ALL.len()];
    let mut suit_counts = [0usize; Suit::ALL.len()];
    for card in hole.iter().chain(community) {
        rank_counts[usize::from(card.rank.index())] += 1;
        suit_counts[suit_slot(card.suit)] += 1;
    }

    if rank_counts.iter().any(|&count| count >= 2) {
        return STRENGTH_PAIR_PRESENT;
    }
    if suit_counts.iter().any(|&count| count >= DRAW_LENGTH) {
        return STRENGTH_FLUSH_DRAW;
    }
    if longest_run(&rank_counts) >= DRAW_LENGTH {
        return STRENGTH_STRAIGHT_DRAW;
    }

    let highest = hole.iter().map(|card| card.rank.index()).max().unwrap_or(0);
    STRENGTH_HIGH_CARD_BASE + f32::from(highest) / HIGH_CARD_RANK_DIVISOR
}

fn suit_slot(suit: Suit) -> usize {
    match suit {
        Suit::Club => 0,
        Suit::Spade => 1,
        Suit::Diamond => 2,
        Suit::Heart => 3,
    }
}

/// Longest stretch of consecutive ranks present at least once. Counting by
/// rank makes duplicates irrelevant to the run.
fn longest_run(rank_counts: &[usize]) -> usize {
    let mut best = 0;
    let mut current = 0;
    for &count in rank_counts {
        if count > 0 {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}
