use std::fmt;

/// Invariant violations raised by belief tracking and sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeliefError {
    /// A weight set had no positive mass, or contained NaN, infinite or negative weights.
    InvalidDistribution,
    /// Every count of a tracker is zero.
    NoRemainingOptions,
    /// An event named a slot outside the tracked hand.
    UnknownSlot { slot: usize, hand_size: usize },
}

impl fmt::Display for BeliefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeliefError::InvalidDistribution => {
                write!(f, "weights must be finite, non-negative and not all zero")
            }
            BeliefError::NoRemainingOptions => {
                write!(f, "belief tracker has no remaining card options")
            }
            BeliefError::UnknownSlot { slot, hand_size } => {
                write!(f, "slot {slot} is not tracked (hand holds {hand_size})")
            }
        }
    }
}

impl std::error::Error for BeliefError {}
