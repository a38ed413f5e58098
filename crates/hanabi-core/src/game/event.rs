use super::moves::Hint;
use crate::model::card::Card;
use crate::model::player::PlayerId;
use serde::{Deserialize, Serialize};

/// What a player learns about the card drawn to refill a vacated slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "card", rename_all = "snake_case")]
pub enum Replacement {
    /// The deck was empty; the hand shrank by one.
    None,
    /// A card was drawn into the actor's own hand and the observer cannot see it.
    Concealed,
    Revealed(Card),
}

impl Replacement {
    pub const fn refilled(self) -> bool {
        !matches!(self, Replacement::None)
    }

    pub const fn revealed(self) -> Option<Card> {
        match self {
            Replacement::Revealed(card) => Some(card),
            _ => None,
        }
    }
}

/// Publicly observable consequence of one move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    HintGiven {
        giver: PlayerId,
        recipient: PlayerId,
        hint: Hint,
        matching_slots: Vec<usize>,
    },
    CardDiscarded {
        player: PlayerId,
        slot: usize,
        card: Card,
        replacement: Replacement,
    },
    CardPlayed {
        player: PlayerId,
        slot: usize,
        card: Card,
        replacement: Replacement,
        was_legal: bool,
    },
}

impl Event {
    /// The player whose move produced the event.
    pub fn actor(&self) -> PlayerId {
        match self {
            Event::HintGiven { giver, .. } => *giver,
            Event::CardDiscarded { player, .. } | Event::CardPlayed { player, .. } => *player,
        }
    }

    /// Returns the event as `observer` is allowed to see it: the actor never
    /// sees the card drawn into their own hand.
    pub fn observed_by(&self, observer: PlayerId) -> Event {
        let mut view = self.clone();
        if observer == self.actor() {
            match &mut view {
                Event::CardDiscarded { replacement, .. }
                | Event::CardPlayed { replacement, .. } => {
                    if replacement.refilled() {
                        *replacement = Replacement::Concealed;
                    }
                }
                Event::HintGiven { .. } => {}
            }
        }
        view
    }
}
