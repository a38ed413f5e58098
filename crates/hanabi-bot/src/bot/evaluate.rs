use super::BotParams;
use hanabi_core::game::GameState;
use std::fmt;
use std::sync::Arc;

/// Facts about a game state that the value function reads.
pub trait ScoredState {
    fn is_winnable(&self) -> bool;
    fn score(&self) -> u32;
    fn lives(&self) -> u8;
    fn tokens(&self) -> u8;
}

impl ScoredState for GameState {
    fn is_winnable(&self) -> bool {
        GameState::is_winnable(self)
    }

    fn score(&self) -> u32 {
        GameState::score(self)
    }

    fn lives(&self) -> u8 {
        GameState::lives(self)
    }

    fn tokens(&self) -> u8 {
        GameState::tokens(self)
    }
}

/// Scores a hypothetical state; higher is better.
pub trait Evaluator<S> {
    fn evaluate(&self, state: &S) -> f64;
}

impl<S, F> Evaluator<S> for F
where
    F: Fn(&S) -> f64,
{
    fn evaluate(&self, state: &S) -> f64 {
        self(state)
    }
}

type Factor = Arc<dyn Fn(u8) -> f64 + Send + Sync>;

/// Score plus pluggable bonuses for remaining lives and hint tokens;
/// negative infinity once the game can no longer be completed.
#[derive(Clone)]
pub struct ValueFunction {
    lives: Factor,
    tokens: Factor,
}

impl ValueFunction {
    pub fn new<L, T>(lives: L, tokens: T) -> Self
    where
        L: Fn(u8) -> f64 + Send + Sync + 'static,
        T: Fn(u8) -> f64 + Send + Sync + 'static,
    {
        Self {
            lives: Arc::new(lives),
            tokens: Arc::new(tokens),
        }
    }

    pub fn linear(lives_weight: f64, tokens_weight: f64) -> Self {
        Self::new(
            move |lives| lives_weight * f64::from(lives),
            move |tokens| tokens_weight * f64::from(tokens),
        )
    }

    pub fn from_params(params: &BotParams) -> Self {
        Self::linear(params.lives_weight, params.tokens_weight)
    }
}

impl Default for ValueFunction {
    fn default() -> Self {
        Self::linear(1.0, 0.5)
    }
}

impl fmt::Debug for ValueFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueFunction").finish_non_exhaustive()
    }
}

impl<S: ScoredState> Evaluator<S> for ValueFunction {
    fn evaluate(&self, state: &S) -> f64 {
        if !state.is_winnable() {
            return f64::NEG_INFINITY;
        }
        f64::from(state.score()) + (self.lives)(state.lives()) + (self.tokens)(state.tokens())
    }
}
