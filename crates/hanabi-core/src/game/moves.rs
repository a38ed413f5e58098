use crate::model::card::Card;
use crate::model::color::Color;
use crate::model::player::PlayerId;
use crate::model::rank::Rank;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Information revealed by a hint: one attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "attribute", content = "value", rename_all = "snake_case")]
pub enum Hint {
    Color(Color),
    Rank(Rank),
}

impl Hint {
    pub fn matches(self, card: Card) -> bool {
        match self {
            Hint::Color(color) => card.color == color,
            Hint::Rank(rank) => card.rank == rank,
        }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::Color(color) => write!(f, "color {color}"),
            Hint::Rank(rank) => write!(f, "number {rank}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Move {
    Discard { slot: usize },
    Play { slot: usize },
    Hint { target: PlayerId, hint: Hint },
}

impl Move {
    pub fn is_hint(&self) -> bool {
        matches!(self, Move::Hint { .. })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Discard { slot } => write!(f, "discard {slot}"),
            Move::Play { slot } => write!(f, "play {slot}"),
            Move::Hint { target, hint } => write!(f, "tell player {} about {hint}", target.0),
        }
    }
}
