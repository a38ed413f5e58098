use super::{BeliefError, BeliefTracker, CardDistribution};
use crate::game::{Event, GameState, Hint};
use crate::model::card::Card;
use crate::model::color::Color;
use crate::model::player::PlayerId;
use crate::model::rank::Rank;
use serde::Serialize;

/// One player's knowledge of their own hand plus the next card of the deck.
///
/// Slot trackers follow the hand order: when a card leaves slot `i` the
/// trackers above it shift down one place and a copy of the deck tracker is
/// appended for the refill.
#[derive(Debug, Clone)]
pub struct BeliefState {
    owner: PlayerId,
    slots: Vec<BeliefTracker>,
    deck: BeliefTracker,
}

impl BeliefState {
    /// Starts from the full supply minus `visible`, one tracker per slot.
    pub fn new<'a, I>(owner: PlayerId, hand_size: usize, visible: I) -> Self
    where
        I: IntoIterator<Item = &'a Card>,
    {
        let deck = BeliefTracker::unseen(visible);
        Self {
            owner,
            slots: vec![deck.clone(); hand_size],
            deck,
        }
    }

    /// Builds a state from explicit trackers.
    pub fn with_trackers(owner: PlayerId, slots: Vec<BeliefTracker>, deck: BeliefTracker) -> Self {
        Self { owner, slots, deck }
    }

    /// Everything `owner` can see at the table: the other players' hands,
    /// the discard pile and the cards already on the stacks.
    pub fn from_game(owner: PlayerId, game: &GameState) -> Self {
        let mut visible: Vec<Card> = PlayerId::seats(game.players())
            .filter(|&seat| seat != owner)
            .flat_map(|seat| game.hand(seat).cards().to_vec())
            .collect();
        visible.extend_from_slice(game.discard_pile());
        for color in Color::ALL {
            for rank in Rank::ORDERED
                .into_iter()
                .take(usize::from(game.stack(color)))
            {
                visible.push(Card::new(color, rank));
            }
        }
        Self::new(owner, game.hand(owner).len(), visible.iter())
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn hand_size(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[BeliefTracker] {
        &self.slots
    }

    pub fn deck(&self) -> &BeliefTracker {
        &self.deck
    }

    /// Folds a public event into the owner's knowledge.
    pub fn on_event(&mut self, event: &Event) -> Result<(), BeliefError> {
        match event {
            Event::HintGiven {
                recipient,
                hint,
                matching_slots,
                ..
            } => {
                if *recipient == self.owner {
                    self.apply_hint(*hint, matching_slots)?;
                }
                Ok(())
            }
            Event::CardDiscarded {
                player,
                slot,
                card,
                replacement,
            }
            | Event::CardPlayed {
                player,
                slot,
                card,
                replacement,
                ..
            } => {
                if *player == self.owner {
                    self.observe_own_card(*slot, *card, replacement.refilled())
                } else {
                    if let Some(drawn) = replacement.revealed() {
                        self.observe_card(drawn);
                    }
                    Ok(())
                }
            }
        }
    }

    /// Matching slots learn the hint; every other slot learns its negation.
    pub fn apply_hint(&mut self, hint: Hint, matching_slots: &[usize]) -> Result<(), BeliefError> {
        let hand_size = self.slots.len();
        if let Some(&slot) = matching_slots.iter().find(|&&slot| slot >= hand_size) {
            return Err(BeliefError::UnknownSlot { slot, hand_size });
        }
        for (index, tracker) in self.slots.iter_mut().enumerate() {
            tracker.apply_hint(hint, matching_slots.contains(&index));
        }
        Ok(())
    }

    /// The owner's card at `slot` was revealed by a discard or play.
    pub fn observe_own_card(
        &mut self,
        slot: usize,
        card: Card,
        refilled: bool,
    ) -> Result<(), BeliefError> {
        let hand_size = self.slots.len();
        if slot >= hand_size {
            return Err(BeliefError::UnknownSlot { slot, hand_size });
        }
        self.observe_card(card);
        self.slots.remove(slot);
        if refilled {
            self.slots.push(self.deck.clone());
        }
        Ok(())
    }

    /// A copy of `card` became visible somewhere outside the owner's hand.
    pub fn observe_card(&mut self, card: Card) {
        for tracker in &mut self.slots {
            tracker.remove_instance(card);
        }
        self.deck.remove_instance(card);
    }

    /// Probability tables for diagnostics.
    pub fn snapshot(&self) -> Result<BeliefSnapshot, BeliefError> {
        let slots = self
            .slots
            .iter()
            .map(BeliefTracker::probabilities)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(BeliefSnapshot {
            owner: self.owner,
            slots,
            deck: self.deck.probabilities()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeliefSnapshot {
    pub owner: PlayerId,
    pub slots: Vec<CardDistribution>,
    pub deck: CardDistribution,
}
