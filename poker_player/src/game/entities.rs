use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    fmt::{self},
    str::FromStr,
};

use super::errors::SnapshotError;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Suit {
    #[serde(rename = "clubs")]
    Club,
    #[serde(rename = "spades")]
    Spade,
    #[serde(rename = "diamonds")]
    Diamond,
    #[serde(rename = "hearts")]
    Heart,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Club, Suit::Spade, Suit::Diamond, Suit::Heart];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = match self {
            Self::Club => "♣",
            Self::Spade => "♠",
            Self::Diamond => "♦",
            Self::Heart => "♥",
        };
        write!(f, "{repr}")
    }
}

impl FromStr for Suit {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "c" | "club" | "clubs" | "♣" => Ok(Self::Club),
            "s" | "spade" | "spades" | "♠" => Ok(Self::Spade),
            "d" | "diamond" | "diamonds" | "♦" => Ok(Self::Diamond),
            "h" | "heart" | "hearts" | "♥" => Ok(Self::Heart),
            _ => Err(SnapshotError::UnknownSuit(s.to_string())),
        }
    }
}

/// Card ranks, deuce low and ace high. The wire format uses the printed
/// symbol of the rank.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[repr(u8)]
pub enum Rank {
    #[serde(rename = "2")]
    Two = 0,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
    #[serde(rename = "10", alias = "T")]
    Ten,
    #[serde(rename = "J")]
    Jack,
    #[serde(rename = "Q")]
    Queen,
    #[serde(rename = "K")]
    King,
    #[serde(rename = "A")]
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Position of the rank in the ordering, 0 (deuce) through 12 (ace).
    #[must_use]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Ten or better.
    #[must_use]
    pub fn is_broadway(self) -> bool {
        self >= Rank::Ten
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
            Self::Ace => "A",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Rank {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rank = match s.to_ascii_uppercase().as_str() {
            "T" => Self::Ten,
            upper => Self::ALL
                .into_iter()
                .find(|rank| rank.symbol() == upper)
                .ok_or_else(|| SnapshotError::UnknownRank(s.to_string()))?,
        };
        Ok(rank)
    }
}

/// A playing card. Cards carry no identity beyond their value.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let repr = format!("{}{}", self.rank, self.suit);
        write!(f, "{repr:>3}")
    }
}

/// Short card notation: rank symbol followed by a suit letter, e.g. `"Ah"`,
/// `"10s"`, `"Td"`.
impl FromStr for Card {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .char_indices()
            .last()
            .map(|(idx, _)| idx)
            .filter(|idx| *idx > 0)
            .ok_or_else(|| SnapshotError::MalformedCard(s.to_string()))?;
        let (rank, suit) = s.split_at(split);
        Ok(Self::new(rank.parse()?, suit.parse()?))
    }
}

/// Type alias for chip amounts. Stacks, bets and pots are whole chips.
pub type Chips = u32;

/// Type alias for seat positions at the table.
pub type SeatIndex = usize;

/// Identifier of a seat, stable across snapshots of one game.
pub type PlayerId = u64;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    Active,
    Folded,
    Out,
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Active => "active",
            Self::Folded => "folded",
            Self::Out => "out",
        };
        write!(f, "{repr}")
    }
}

/// One seat as seen in a table snapshot.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Seat {
    pub id: PlayerId,
    pub name: String,
    pub status: PlayerStatus,
    pub stack: Chips,
    pub bet: Chips,
    /// Only populated for the acting seat, or for every seat that showed
    /// down.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hole_cards: Vec<Card>,
    /// Present in showdown snapshots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_won: Option<Chips>,
}

impl Seat {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }
}

/// Everything the player gets to see at a betting opportunity.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct TableSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tournament_id: Option<String>,
    pub game_id: String,
    pub round: u32,
    pub bet_index: u32,
    pub small_blind: Chips,
    pub current_buy_in: Chips,
    pub pot: Chips,
    pub minimum_raise: Chips,
    pub dealer: SeatIndex,
    #[serde(default)]
    pub orbits: u32,
    pub in_action: SeatIndex,
    pub players: Vec<Seat>,
    #[serde(default)]
    pub community_cards: Vec<Card>,
}

impl TableSnapshot {
    /// Parse and validate a snapshot from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` if the JSON doesn't describe a snapshot or
    /// the snapshot fails [`TableSnapshot::validate`].
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Check the table geometry the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError` for an empty seat list, an out-of-range
    /// dealer or acting seat, or duplicate seat ids.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let seats = self.players.len();
        if seats == 0 {
            return Err(SnapshotError::NoSeats);
        }
        if self.in_action >= seats {
            return Err(SnapshotError::SeatOutOfRange {
                field: "in_action",
                index: self.in_action,
                seats,
            });
        }
        if self.dealer >= seats {
            return Err(SnapshotError::SeatOutOfRange {
                field: "dealer",
                index: self.dealer,
                seats,
            });
        }
        let mut ids = HashSet::with_capacity(seats);
        for seat in &self.players {
            if !ids.insert(seat.id) {
                return Err(SnapshotError::DuplicateSeat(seat.id));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn acting_seat(&self) -> Option<&Seat> {
        self.players.get(self.in_action)
    }

    /// Chips the acting seat must add to stay in the hand.
    #[must_use]
    pub fn to_call(&self) -> Chips {
        self.acting_seat()
            .map_or(self.current_buy_in, |seat| {
                self.current_buy_in.saturating_sub(seat.bet)
            })
    }

    /// Number of seats still contesting the hand, the acting seat included.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|seat| seat.is_active()).count()
    }

    /// Active seats other than the acting one.
    pub fn active_opponents(&self) -> impl Iterator<Item = &Seat> {
        self.players
            .iter()
            .enumerate()
            .filter(move |(idx, seat)| *idx != self.in_action && seat.is_active())
            .map(|(_, seat)| seat)
    }
}
