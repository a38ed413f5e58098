use hanabi_core::belief::BeliefError;
use hanabi_core::game::RuleViolation;
use hanabi_core::model::player::PlayerId;
use std::fmt;

/// Failures that abort a decision or an event update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// The rules engine offered nothing to choose from.
    NoLegalMoves,
    /// The agent was asked to move while another seat is acting.
    OutOfTurn { seat: PlayerId, current: PlayerId },
    /// A table was assembled with the wrong number of policies.
    SeatMismatch { seats: usize, players: usize },
    /// The policy at table position `index` claims another seat.
    MisplacedSeat { index: usize, seat: PlayerId },
    Belief(BeliefError),
    Rules(RuleViolation),
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentError::NoLegalMoves => write!(f, "no legal moves available"),
            AgentError::OutOfTurn { seat, current } => {
                write!(f, "{seat} asked to move during the turn of {current}")
            }
            AgentError::SeatMismatch { seats, players } => {
                write!(f, "{seats} policies for a {players}-player game")
            }
            AgentError::MisplacedSeat { index, seat } => {
                write!(f, "policy for {seat} placed at position {index}")
            }
            AgentError::Belief(err) => write!(f, "belief update failed: {err}"),
            AgentError::Rules(err) => write!(f, "rule violation: {err}"),
        }
    }
}

impl std::error::Error for AgentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AgentError::Belief(err) => Some(err),
            AgentError::Rules(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BeliefError> for AgentError {
    fn from(err: BeliefError) -> Self {
        AgentError::Belief(err)
    }
}

impl From<RuleViolation> for AgentError {
    fn from(err: RuleViolation) -> Self {
        AgentError::Rules(err)
    }
}
