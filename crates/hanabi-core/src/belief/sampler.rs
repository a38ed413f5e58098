use super::{BeliefError, BeliefState, BeliefTracker, WeightedSampler};
use crate::model::card::Card;
use rand::Rng;

/// A concrete guess at the owner's hidden cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenState {
    pub hand: Vec<Card>,
    /// Next card of the deck, when one was requested.
    pub next_card: Option<Card>,
}

/// Draws hidden states consistent with a [`BeliefState`].
///
/// Slots are drawn in order and each draw removes one copy of the chosen
/// card from the trackers consulted afterwards, so no card type appears more
/// often than it can.
#[derive(Debug, Default, Clone, Copy)]
pub struct HiddenStateSampler;

impl HiddenStateSampler {
    pub fn sample<R: Rng + ?Sized>(
        &self,
        belief: &BeliefState,
        draw_next: bool,
        rng: &mut R,
    ) -> Result<HiddenState, BeliefError> {
        let mut drawn = Vec::with_capacity(belief.hand_size() + 1);
        for tracker in belief.slots() {
            let card = draw_excluding(tracker, &drawn, rng)?;
            drawn.push(card);
        }

        let next_card = if draw_next {
            Some(draw_excluding(belief.deck(), &drawn, rng)?)
        } else {
            None
        };

        Ok(HiddenState {
            hand: drawn,
            next_card,
        })
    }
}

fn draw_excluding<R: Rng + ?Sized>(
    tracker: &BeliefTracker,
    taken: &[Card],
    rng: &mut R,
) -> Result<Card, BeliefError> {
    let mut remaining = tracker.clone();
    for card in taken {
        remaining.remove_instance(*card);
    }
    let distribution = remaining.probabilities()?;
    let sampler = WeightedSampler::new(distribution.iter())?;
    Ok(*sampler.draw(rng))
}
