//! Per-player knowledge of hidden cards.
//!
//! This module is composed of:
//! - `tracker`: per-card counts narrowed by hints and revealed cards (`BeliefTracker`).
//! - `state`: one tracker per hand slot plus one for the deck (`BeliefState`).
//! - `distribution`: weighted sampling over a finite outcome set.
//! - `sampler`: draws full hidden hands consistent with a belief state.

mod distribution;
mod error;
mod sampler;
mod state;
mod tracker;

pub use distribution::WeightedSampler;
pub use error::BeliefError;
pub use sampler::{HiddenState, HiddenStateSampler};
pub use state::{BeliefSnapshot, BeliefState};
pub use tracker::{BeliefTracker, CardDistribution};
