/// Tunables for the sampling agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotParams {
    /// Hidden-state samples drawn per candidate move.
    pub samples: usize,
    pub lives_weight: f64,
    pub tokens_weight: f64,
    /// Fixed RNG seed; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for BotParams {
    fn default() -> Self {
        Self {
            samples: 500,
            lives_weight: 1.0,
            tokens_weight: 0.5,
            seed: None,
        }
    }
}

impl BotParams {
    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub fn with_samples(mut self, samples: usize) -> Self {
        self.samples = samples.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let samples = read("HANABI_SAMPLES")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(defaults.samples);

        let lives_weight = read("HANABI_LIVES_WEIGHT")
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite() && *value >= 0.0)
            .unwrap_or(defaults.lives_weight);

        let tokens_weight = read("HANABI_TOKENS_WEIGHT")
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite() && *value >= 0.0)
            .unwrap_or(defaults.tokens_weight);

        let seed = read("HANABI_SEED").and_then(|raw| raw.trim().parse::<u64>().ok());

        Self {
            samples,
            lives_weight,
            tokens_weight,
            seed,
        }
    }
}
