//! Categorical table context: betting street and seat position.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::entities::SeatIndex;

/// Betting street, derived from the number of community cards.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Street {
    PreFlop,
    Flop,
    Turn,
    River,
    /// Any community card count that can't occur in valid play.
    Unknown,
}

impl Street {
    #[must_use]
    pub fn from_community_count(count: usize) -> Self {
        match count {
            0 => Self::PreFlop,
            3 => Self::Flop,
            4 => Self::Turn,
            5 => Self::River,
            _ => Self::Unknown,
        }
    }

    /// Later streets justify larger pot-relative bets.
    #[must_use]
    pub fn bet_factor(self) -> f32 {
        match self {
            Self::PreFlop => 0.8,
            Self::Flop | Self::Unknown => 1.0,
            Self::Turn => 1.2,
            Self::River => 1.5,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::PreFlop => "pre-flop",
            Self::Flop => "flop",
            Self::Turn => "turn",
            Self::River => "river",
            Self::Unknown => "unknown",
        };
        write!(f, "{repr}")
    }
}

/// Where the acting seat sits relative to the dealer button.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Early,
    Middle,
    Late,
}

impl Position {
    /// Classify a seat by its distance from the first seat after the dealer.
    ///
    /// The table is split into thirds of `active_count`; with fewer than
    /// three active players the early band is empty, and an empty table is
    /// treated as late.
    ///
    /// # Examples
    ///
    /// ```
    /// use poker_player::bot::context::Position;
    ///
    /// // offset = (3 - 0 - 1 + 6) % 6 = 2, early < 2, middle < 4
    /// assert_eq!(Position::classify(0, 3, 6), Position::Middle);
    /// ```
    #[must_use]
    pub fn classify(dealer: SeatIndex, acting: SeatIndex, active_count: usize) -> Self {
        if active_count == 0 {
            return Self::Late;
        }

        // (acting - dealer - 1 + n) mod n, kept in unsigned arithmetic
        let n = active_count;
        let offset = (acting % n + n + n - dealer % n - 1) % n;

        if offset < n / 3 {
            Self::Early
        } else if offset < 2 * n / 3 {
            Self::Middle
        } else {
            Self::Late
        }
    }

    /// Acting later justifies larger bets.
    #[must_use]
    pub fn bet_factor(self) -> f32 {
        match self {
            Self::Early => 0.8,
            Self::Middle => 1.0,
            Self::Late => 1.2,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Early => "early",
            Self::Middle => "middle",
            Self::Late => "late",
        };
        write!(f, "{repr}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_street_from_community_count() {
        assert_eq!(Street::from_community_count(0), Street::PreFlop);
        assert_eq!(Street::from_community_count(3), Street::Flop);
        assert_eq!(Street::from_community_count(4), Street::Turn);
        assert_eq!(Street::from_community_count(5), Street::River);
        assert_eq!(Street::from_community_count(1), Street::Unknown);
        assert_eq!(Street::from_community_count(6), Street::Unknown);
    }

    #[test]
    fn test_six_handed_positions() {
        // Seat right after the dealer is first to act
        assert_eq!(Position::classify(0, 1, 6), Position::Early);
        assert_eq!(Position::classify(0, 2, 6), Position::Early);
        assert_eq!(Position::classify(0, 3, 6), Position::Middle);
        assert_eq!(Position::classify(0, 4, 6), Position::Middle);
        assert_eq!(Position::classify(0, 5, 6), Position::Late);
        assert_eq!(Position::classify(0, 0, 6), Position::Late);
    }

    #[test]
    fn test_wraps_around_the_dealer() {
        // offset = (1 - 4 - 1 + 6) % 6 = 2
        assert_eq!(Position::classify(4, 1, 6), Position::Middle);
        // offset = (4 - 4 - 1 + 6) % 6 = 5
        assert_eq!(Position::classify(4, 4, 6), Position::Late);
    }

    #[test]
    fn test_degenerate_tables() {
        assert_eq!(Position::classify(0, 0, 0), Position::Late);
        assert_eq!(Position::classify(3, 7, 1), Position::Late);
        // Heads-up: early band has zero width
        assert_eq!(Position::classify(0, 1, 2), Position::Middle);
        assert_eq!(Position::classify(0, 0, 2), Position::Late);
        // Seat indices beyond the active count don't overflow
        assert_eq!(Position::classify(8, 2, 3), Position::Late);
    }

    #[test]
    fn test_bet_factors() {
        assert_eq!(Position::Late.bet_factor(), 1.2);
        assert_eq!(Position::Early.bet_factor(), 0.8);
        assert_eq!(Street::PreFlop.bet_factor(), 0.8);
        assert_eq!(Street::River.bet_factor(), 1.5);
    }
}
