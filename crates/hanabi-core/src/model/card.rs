use crate::model::color::Color;
use crate::model::rank::Rank;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Number of distinct card types (color, rank).
pub const CARD_TYPES: usize = 25;

/// Total cards in a full deck.
pub const DECK_SIZE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub color: Color,
    pub rank: Rank,
}

impl Card {
    pub const fn new(color: Color, rank: Rank) -> Self {
        Self { color, rank }
    }

    /// Dense identifier in `0..CARD_TYPES`, color-major.
    pub const fn to_id(self) -> u8 {
        (self.color.index() * 5 + self.rank.index()) as u8
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        let id = id as usize;
        let color = match Color::from_index(id / 5) {
            Some(color) => color,
            None => return None,
        };
        match Rank::from_value((id % 5) as u8 + 1) {
            Some(rank) => Some(Card::new(color, rank)),
            None => None,
        }
    }

    /// Every card type in id order.
    pub fn all_types() -> impl Iterator<Item = Card> {
        Color::ALL
            .into_iter()
            .flat_map(|color| Rank::ORDERED.into_iter().map(move |rank| Card::new(color, rank)))
    }

    pub const fn multiplicity(self) -> u8 {
        self.rank.multiplicity()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.abbrev(), self.rank)
    }
}
