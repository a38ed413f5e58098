mod decision;
mod error;
mod evaluate;
mod params;

pub use decision::{Decision, DecisionEngine, GameView, MoveEstimate};
pub use error::AgentError;
pub use evaluate::{Evaluator, ScoredState, ValueFunction};
pub use params::BotParams;

use hanabi_core::belief::{BeliefSnapshot, BeliefState};
use hanabi_core::game::{Event, GameState, Move};
use hanabi_core::model::player::PlayerId;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{Level, event};

/// Agent that keeps a belief about its own hand and picks moves by sampling
/// that belief.
#[derive(Debug)]
pub struct BayesianAgent {
    seat: PlayerId,
    belief: BeliefState,
    engine: DecisionEngine,
    value: ValueFunction,
    rng: SmallRng,
}

impl BayesianAgent {
    /// Sits down at `game` as `seat`; the belief starts from what the seat can see.
    pub fn new(seat: PlayerId, game: &GameState, params: &BotParams) -> Self {
        let rng = match params.seed {
            Some(seed) => SmallRng::seed_from_u64(seed ^ (u64::from(seat.0) << 32)),
            None => SmallRng::from_entropy(),
        };
        Self {
            seat,
            belief: BeliefState::from_game(seat, game),
            engine: DecisionEngine::new(params.samples),
            value: ValueFunction::from_params(params),
            rng,
        }
    }

    pub fn with_value_function(mut self, value: ValueFunction) -> Self {
        self.value = value;
        self
    }

    pub fn seat(&self) -> PlayerId {
        self.seat
    }

    pub fn beliefs(&self) -> &BeliefState {
        &self.belief
    }

    pub fn snapshot(&self) -> Result<BeliefSnapshot, AgentError> {
        Ok(self.belief.snapshot()?)
    }

    /// Scores every legal move for the current turn.
    pub fn decide(&mut self, game: &GameState) -> Result<Decision, AgentError> {
        let current = game.current_player();
        if current != self.seat {
            return Err(AgentError::OutOfTurn {
                seat: self.seat,
                current,
            });
        }
        self.engine
            .select(game, &self.belief, &self.value, &mut self.rng)
    }

    pub fn select_move(&mut self, game: &GameState) -> Result<Move, AgentError> {
        Ok(self.decide(game)?.chosen)
    }

    /// Folds an event, as seen from this seat, into the belief.
    pub fn on_event(&mut self, observed: &Event) -> Result<(), AgentError> {
        self.belief.on_event(observed)?;
        if tracing::enabled!(Level::DEBUG) {
            event!(
                target: "hanabi_bot::belief",
                Level::DEBUG,
                seat = %self.seat,
                actor = %observed.actor(),
                hand_size = self.belief.hand_size(),
                deck_options = self.belief.deck().total(),
            );
        }
        Ok(())
    }
}
