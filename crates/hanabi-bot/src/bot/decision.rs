use super::{AgentError, Evaluator};
use hanabi_core::belief::{BeliefState, HiddenStateSampler};
use hanabi_core::game::{GameState, Move, RuleViolation};
use hanabi_core::model::card::Card;
use rand::Rng;
use tracing::{Level, event};

/// The rules queries a decision needs, without access to the live game.
pub trait GameView {
    type State;

    fn legal_moves(&self) -> Vec<Move>;

    /// State after `mv` if the acting player held `hand` and the deck's next
    /// card were `next_card`. Must not touch the viewed game.
    fn hypothetical_outcome(
        &self,
        mv: Move,
        hand: &[Card],
        next_card: Option<Card>,
    ) -> Result<Self::State, RuleViolation>;

    fn deck_remaining(&self) -> usize;
}

impl GameView for GameState {
    type State = GameState;

    fn legal_moves(&self) -> Vec<Move> {
        GameState::legal_moves(self)
    }

    fn hypothetical_outcome(
        &self,
        mv: Move,
        hand: &[Card],
        next_card: Option<Card>,
    ) -> Result<GameState, RuleViolation> {
        self.hypothetical(hand, next_card, mv)
    }

    fn deck_remaining(&self) -> usize {
        GameState::deck_remaining(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveEstimate {
    pub mv: Move,
    pub expected: f64,
}

/// Outcome of one move selection, with every candidate's estimate in
/// enumeration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub chosen: Move,
    pub estimates: Vec<MoveEstimate>,
}

impl Decision {
    pub fn best_expected(&self) -> Option<f64> {
        self.estimates
            .iter()
            .find(|estimate| estimate.mv == self.chosen)
            .map(|estimate| estimate.expected)
    }
}

/// Monte-Carlo move selection: every legal move is scored by the average
/// value of its outcome over sampled hidden hands.
#[derive(Debug, Clone, Copy)]
pub struct DecisionEngine {
    samples: usize,
    sampler: HiddenStateSampler,
}

impl DecisionEngine {
    pub fn new(samples: usize) -> Self {
        Self {
            samples: samples.max(1),
            sampler: HiddenStateSampler,
        }
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn select<V, E, R>(
        &self,
        view: &V,
        belief: &BeliefState,
        evaluator: &E,
        rng: &mut R,
    ) -> Result<Decision, AgentError>
    where
        V: GameView,
        E: Evaluator<V::State>,
        R: Rng + ?Sized,
    {
        let moves = view.legal_moves();
        if moves.is_empty() {
            return Err(AgentError::NoLegalMoves);
        }

        let draw_next = view.deck_remaining() > 0;
        let mut estimates = Vec::with_capacity(moves.len());
        let mut best: Option<MoveEstimate> = None;

        for mv in moves {
            let mut total = 0.0;
            for _ in 0..self.samples {
                let hidden = self.sampler.sample(belief, draw_next, rng)?;
                let outcome = view.hypothetical_outcome(mv, &hidden.hand, hidden.next_card)?;
                total += evaluator.evaluate(&outcome);
            }
            let estimate = MoveEstimate {
                mv,
                expected: total / self.samples as f64,
            };
            // Ties keep the earlier move.
            if best.is_none_or(|current| estimate.expected > current.expected) {
                best = Some(estimate);
            }
            estimates.push(estimate);
        }

        let chosen = match best {
            Some(best) => best,
            None => return Err(AgentError::NoLegalMoves),
        };

        if tracing::enabled!(Level::INFO) {
            event!(
                target: "hanabi_bot::decision",
                Level::INFO,
                seat = %belief.owner(),
                candidates = estimates.len(),
                samples = self.samples,
                draw_next,
                chosen = %chosen.mv,
                expected = chosen.expected,
            );
        }

        Ok(Decision {
            chosen: chosen.mv,
            estimates,
        })
    }
}
