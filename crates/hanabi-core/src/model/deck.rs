use crate::model::card::{Card, DECK_SIZE};
use crate::model::color::Color;
use crate::model::rank::Rank;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;

/// Ordered draw pile; the front is drawn first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for color in Color::ALL {
            for rank in Rank::ORDERED {
                for _ in 0..rank.multiplicity() {
                    cards.push(Card::new(color, rank));
                }
            }
        }
        Self::from_cards(cards)
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards: cards.into(),
        }
    }

    pub fn empty() -> Self {
        Self::from_cards(Vec::new())
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards: Vec<Card> = Self::standard().cards.into();
        cards.shuffle(rng);
        Self::from_cards(cards)
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
