use crate::model::card::Card;

/// Cards held by one player, slot 0 leftmost. New cards join at the back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn with_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Removes the card at `slot`, shifting later cards one place left.
    pub fn take(&mut self, slot: usize) -> Option<Card> {
        if slot < self.cards.len() {
            Some(self.cards.remove(slot))
        } else {
            None
        }
    }

    pub fn get(&self, slot: usize) -> Option<Card> {
        self.cards.get(slot).copied()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Slots whose card satisfies `pred`, in hand order.
    pub fn slots_where(&self, pred: impl Fn(Card) -> bool) -> Vec<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| pred(**card))
            .map(|(slot, _)| slot)
            .collect()
    }
}
