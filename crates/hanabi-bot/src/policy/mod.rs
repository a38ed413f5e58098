mod rule_based;

pub use rule_based::RuleBasedPolicy;

use crate::bot::{AgentError, BayesianAgent};
use hanabi_core::game::{Event, GameState, Move};
use hanabi_core::model::player::PlayerId;

/// Unified interface for anything that can occupy a seat at the table
pub trait Policy: Send {
    /// Short label used in logs and reports
    fn name(&self) -> &str;

    fn seat(&self) -> PlayerId;

    /// Choose a move for the current turn; only called on this seat's turn
    fn choose(&mut self, game: &GameState) -> Result<Move, AgentError>;

    /// Receive an event as this seat is allowed to see it
    fn observe(&mut self, event: &Event) -> Result<(), AgentError>;
}

impl Policy for BayesianAgent {
    fn name(&self) -> &str {
        "bayesian"
    }

    fn seat(&self) -> PlayerId {
        BayesianAgent::seat(self)
    }

    fn choose(&mut self, game: &GameState) -> Result<Move, AgentError> {
        self.select_move(game)
    }

    fn observe(&mut self, event: &Event) -> Result<(), AgentError> {
        self.on_event(event)
    }
}
