use super::moves::Move;
use super::state::{GameState, RuleViolation};
use serde::{Deserialize, Serialize};

/// Seeded game plus the moves made in it; enough to rebuild any position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameRecord {
    pub seed: u64,
    pub players: usize,
    pub lives: u8,
    pub moves: Vec<Move>,
}

impl GameRecord {
    pub fn new(seed: u64, players: usize, lives: u8) -> Self {
        Self {
            seed,
            players,
            lives,
            moves: Vec::new(),
        }
    }

    /// Deals the initial position this record starts from.
    pub fn initial_state(&self) -> Result<GameState, RuleViolation> {
        Ok(GameState::with_seed(self.players, self.seed)?.with_lives(self.lives))
    }

    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

    pub fn replay(&self) -> Result<GameState, RuleViolation> {
        let mut state = self.initial_state()?;
        for mv in &self.moves {
            state.apply(*mv)?;
        }
        Ok(state)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
