use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Rank {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
}

impl Rank {
    pub const ORDERED: [Rank; 5] = [Rank::One, Rank::Two, Rank::Three, Rank::Four, Rank::Five];

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Rank::One),
            2 => Some(Rank::Two),
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            _ => None,
        }
    }

    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Zero-based position of the rank, used for table indexing.
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// Copies of each card of this rank in a full deck, per color.
    pub const fn multiplicity(self) -> u8 {
        match self {
            Rank::One => 3,
            Rank::Two | Rank::Three | Rank::Four => 2,
            Rank::Five => 1,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl From<Rank> for u8 {
    fn from(rank: Rank) -> Self {
        rank.value()
    }
}

impl TryFrom<u8> for Rank {
    type Error = ParseRankError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rank::from_value(value).ok_or_else(|| ParseRankError(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRankError(pub String);

impl fmt::Display for ParseRankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rank must be between 1 and 5, got '{}'", self.0)
    }
}

impl std::error::Error for ParseRankError {}
