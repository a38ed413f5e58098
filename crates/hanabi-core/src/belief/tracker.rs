use super::BeliefError;
use crate::game::Hint;
use crate::model::card::{CARD_TYPES, Card};
use crate::model::color::Color;
use crate::model::rank::Rank;
use serde::Serialize;
use std::fmt;

/// Remaining possible copies of each card type for one unknown card.
///
/// A fresh tracker starts from the deck multiplicities minus every card the
/// owner can see. Hints narrow it by zeroing whole rows or columns of the
/// color x rank table; revealed cards remove one copy at a time.
#[derive(Debug, Clone)]
pub struct BeliefTracker {
    counts: [u8; CARD_TYPES],
}

impl BeliefTracker {
    /// Every copy of every card type.
    pub fn full_supply() -> Self {
        let mut counts = [0u8; CARD_TYPES];
        for card in Card::all_types() {
            counts[card.to_id() as usize] = card.multiplicity();
        }
        Self { counts }
    }

    /// Full supply minus the given cards, floored at zero.
    pub fn unseen<'a, I>(visible: I) -> Self
    where
        I: IntoIterator<Item = &'a Card>,
    {
        let mut tracker = Self::full_supply();
        for card in visible {
            tracker.remove_instance(*card);
        }
        tracker
    }

    pub fn from_counts(counts: [u8; CARD_TYPES]) -> Self {
        Self { counts }
    }

    pub fn counts(&self) -> &[u8; CARD_TYPES] {
        &self.counts
    }

    pub fn remaining(&self, card: Card) -> u8 {
        self.counts[card.to_id() as usize]
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&count| u32::from(count)).sum()
    }

    pub fn has_options(&self) -> bool {
        self.counts.iter().any(|&count| count > 0)
    }

    /// The card is known to be `color`.
    pub fn constrain_color(&mut self, color: Color) {
        self.retain(|card| card.color == color);
    }

    pub fn exclude_color(&mut self, color: Color) {
        self.retain(|card| card.color != color);
    }

    /// The card is known to be `rank`.
    pub fn constrain_rank(&mut self, rank: Rank) {
        self.retain(|card| card.rank == rank);
    }

    pub fn exclude_rank(&mut self, rank: Rank) {
        self.retain(|card| card.rank != rank);
    }

    /// Narrows by a hint that did (`matched`) or did not touch this card.
    pub fn apply_hint(&mut self, hint: Hint, matched: bool) {
        match (hint, matched) {
            (Hint::Color(color), true) => self.constrain_color(color),
            (Hint::Color(color), false) => self.exclude_color(color),
            (Hint::Rank(rank), true) => self.constrain_rank(rank),
            (Hint::Rank(rank), false) => self.exclude_rank(rank),
        }
    }

    /// One copy of `card` is accounted for elsewhere.
    pub fn remove_instance(&mut self, card: Card) {
        let slot = &mut self.counts[card.to_id() as usize];
        *slot = slot.saturating_sub(1);
    }

    /// Counts normalized into probabilities.
    pub fn probabilities(&self) -> Result<CardDistribution, BeliefError> {
        let total = self.total();
        if total == 0 {
            return Err(BeliefError::NoRemainingOptions);
        }
        let total = f64::from(total);
        let mut probs = [0.0; CARD_TYPES];
        for (prob, &count) in probs.iter_mut().zip(self.counts.iter()) {
            *prob = f64::from(count) / total;
        }
        Ok(CardDistribution { probs })
    }

    fn retain(&mut self, keep: impl Fn(Card) -> bool) {
        for card in Card::all_types() {
            if !keep(card) {
                self.counts[card.to_id() as usize] = 0;
            }
        }
    }
}

impl fmt::Display for BeliefTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for rank in Rank::ORDERED {
            write!(f, " {:>2}", rank.value())?;
        }
        for color in Color::ALL {
            write!(f, "\n{}", color.abbrev())?;
            for rank in Rank::ORDERED {
                match self.remaining(Card::new(color, rank)) {
                    0 => write!(f, "   ")?,
                    count => write!(f, " {count:>2}")?,
                }
            }
        }
        Ok(())
    }
}

/// Probability of each card type, indexed by [`Card::to_id`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardDistribution {
    probs: [f64; CARD_TYPES],
}

impl CardDistribution {
    pub fn get(&self, card: Card) -> f64 {
        self.probs[card.to_id() as usize]
    }

    /// Every card type with its probability, zeros included.
    pub fn iter(&self) -> impl Iterator<Item = (Card, f64)> + '_ {
        Card::all_types().map(|card| (card, self.get(card)))
    }

    pub fn sum(&self) -> f64 {
        self.probs.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::color::Color::*;

    fn card(color: Color, rank: u8) -> Card {
        Card::new(color, Rank::from_value(rank).unwrap())
    }

    #[test]
    fn full_supply_matches_deck_composition() {
        let tracker = BeliefTracker::full_supply();
        assert_eq!(tracker.total(), 50);
        assert_eq!(tracker.remaining(card(Red, 1)), 3);
        assert_eq!(tracker.remaining(card(Blue, 3)), 2);
        assert_eq!(tracker.remaining(card(White, 5)), 1);
    }

    #[test]
    fn removal_floors_at_zero() {
        let mut tracker = BeliefTracker::full_supply();
        let five = card(Green, 5);
        tracker.remove_instance(five);
        tracker.remove_instance(five);
        assert_eq!(tracker.remaining(five), 0);
        assert_eq!(tracker.total(), 49);
    }

    #[test]
    fn color_constraint_zeroes_other_rows() {
        let mut tracker = BeliefTracker::full_supply();
        tracker.constrain_color(Yellow);
        assert_eq!(tracker.total(), 10);
        assert!(
            Card::all_types()
                .filter(|c| c.color != Yellow)
                .all(|c| tracker.remaining(c) == 0)
        );
    }

    #[test]
    fn exclusions_compose_with_constraints() {
        let mut tracker = BeliefTracker::full_supply();
        tracker.exclude_color(Red);
        tracker.exclude_color(Blue);
        tracker.constrain_rank(Rank::One);
        // Three colors left, three ones each.
        assert_eq!(tracker.total(), 9);
        tracker.exclude_rank(Rank::One);
        assert!(!tracker.has_options());
        assert_eq!(
            tracker.probabilities(),
            Err(BeliefError::NoRemainingOptions)
        );
    }

    #[test]
    fn probabilities_are_normalized_counts() {
        let mut tracker = BeliefTracker::full_supply();
        tracker.constrain_rank(Rank::Five);
        let dist = tracker.probabilities().unwrap();
        assert!((dist.sum() - 1.0).abs() < 1e-12);
        assert!((dist.get(card(White, 5)) - 0.2).abs() < 1e-12);
        assert_eq!(dist.get(card(White, 4)), 0.0);
    }

    #[test]
    fn display_leaves_exhausted_types_blank() {
        let mut tracker = BeliefTracker::full_supply();
        tracker.constrain_color(Red);
        tracker.remove_instance(card(Red, 5));
        let rendered = tracker.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "   1  2  3  4  5");
        assert_eq!(lines[1], "R  3  2  2  2   ");
        assert_eq!(lines[2].trim(), "G");
        assert_eq!(lines[4].trim(), "Y");
        assert_eq!(lines[5].trim(), "W");
    }
}
