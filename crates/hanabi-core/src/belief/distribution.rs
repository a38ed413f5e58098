//! Draws from a finite set of weighted outcomes.

use super::BeliefError;
use rand::Rng;

/// Discrete distribution over `T`, built once and sampled many times.
///
/// Outcomes keep their insertion order; each owns a slice of the unit
/// interval proportional to its weight. Zero-weight outcomes are dropped at
/// construction so they can never be drawn.
#[derive(Debug, Clone)]
pub struct WeightedSampler<T> {
    outcomes: Vec<T>,
    upper_bounds: Vec<f64>,
}

impl<T> WeightedSampler<T> {
    pub fn new<I>(weights: I) -> Result<Self, BeliefError>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let mut outcomes = Vec::new();
        let mut cumulative = Vec::new();
        let mut total = 0.0_f64;

        for (outcome, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(BeliefError::InvalidDistribution);
            }
            if weight == 0.0 {
                continue;
            }
            total += weight;
            outcomes.push(outcome);
            cumulative.push(total);
        }

        if outcomes.is_empty() || total <= 0.0 {
            return Err(BeliefError::InvalidDistribution);
        }

        let mut upper_bounds: Vec<f64> = cumulative.into_iter().map(|c| c / total).collect();
        // Rounding may leave the last bound a hair under 1.0.
        if let Some(last) = upper_bounds.last_mut() {
            *last = 1.0;
        }

        Ok(Self {
            outcomes,
            upper_bounds,
        })
    }

    /// Returns one outcome with probability proportional to its weight.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        let roll: f64 = rng.r#gen();
        let index = self
            .upper_bounds
            .partition_point(|&bound| bound <= roll)
            .min(self.outcomes.len() - 1);
        &self.outcomes[index]
    }

    /// Number of outcomes with positive weight.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rand::rngs::mock::StepRng;

    #[test]
    fn rejects_degenerate_weights() {
        let empty: Vec<(u8, f64)> = Vec::new();
        assert_eq!(
            WeightedSampler::new(empty).err(),
            Some(BeliefError::InvalidDistribution)
        );
        assert_eq!(
            WeightedSampler::new([('a', 0.0), ('b', 0.0)]).err(),
            Some(BeliefError::InvalidDistribution)
        );
        assert_eq!(
            WeightedSampler::new([('a', 1.0), ('b', f64::NAN)]).err(),
            Some(BeliefError::InvalidDistribution)
        );
        assert_eq!(
            WeightedSampler::new([('a', -0.5), ('b', 1.0)]).err(),
            Some(BeliefError::InvalidDistribution)
        );
    }

    #[test]
    fn zero_weight_outcomes_are_never_drawn() {
        let sampler = WeightedSampler::new([('a', 0.0), ('b', 2.0), ('c', 0.0)]).unwrap();
        assert_eq!(sampler.len(), 1);
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..200 {
            assert_eq!(*sampler.draw(&mut rng), 'b');
        }
    }

    #[test]
    fn extreme_rolls_land_on_first_and_last_outcomes() {
        let sampler = WeightedSampler::new([(1, 0.3), (2, 0.3), (3, 0.4)]).unwrap();
        // StepRng yielding zero produces a roll of exactly 0.0.
        let mut low = StepRng::new(0, 0);
        assert_eq!(*sampler.draw(&mut low), 1);
        // All-ones bits produce the largest roll below 1.0.
        let mut high = StepRng::new(u64::MAX, 0);
        assert_eq!(*sampler.draw(&mut high), 3);
    }

    #[test]
    fn frequencies_follow_weights() {
        let sampler = WeightedSampler::new([("common", 3.0), ("rare", 1.0)]).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);
        let draws = 20_000;
        let common = (0..draws)
            .filter(|_| *sampler.draw(&mut rng) == "common")
            .count();
        let share = common as f64 / draws as f64;
        assert!((share - 0.75).abs() < 0.02, "observed share {share}");
    }

    #[test]
    fn weights_need_not_be_normalized() {
        let sampler = WeightedSampler::new([(0u8, 10.0), (1u8, 30.0)]).unwrap();
        let mut rng = SmallRng::seed_from_u64(9);
        let ones = (0..10_000).filter(|_| *sampler.draw(&mut rng) == 1).count();
        assert!((ones as f64 / 10_000.0 - 0.75).abs() < 0.03);
    }
}
