pub mod bot;
pub mod policy;
pub mod table;

pub use bot::{
    AgentError, BayesianAgent, BotParams, Decision, DecisionEngine, Evaluator, GameView,
    MoveEstimate, ScoredState, ValueFunction,
};
pub use policy::{Policy, RuleBasedPolicy};
pub use table::{Table, TableOutcome};
