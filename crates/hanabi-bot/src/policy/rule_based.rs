use super::Policy;
use crate::bot::AgentError;
use hanabi_core::game::{Event, GameState, Move};
use hanabi_core::model::player::PlayerId;
use tracing::{Level, event};

/// Baseline that throws away its leftmost card every turn.
#[derive(Debug, Clone, Copy)]
pub struct RuleBasedPolicy {
    seat: PlayerId,
}

impl RuleBasedPolicy {
    pub fn new(seat: PlayerId) -> Self {
        Self { seat }
    }
}

impl Policy for RuleBasedPolicy {
    fn name(&self) -> &str {
        "rule_based"
    }

    fn seat(&self) -> PlayerId {
        self.seat
    }

    fn choose(&mut self, game: &GameState) -> Result<Move, AgentError> {
        let current = game.current_player();
        if current != self.seat {
            return Err(AgentError::OutOfTurn {
                seat: self.seat,
                current,
            });
        }

        let chosen = if game.hand(self.seat).is_empty() {
            game.legal_moves()
                .first()
                .copied()
                .ok_or(AgentError::NoLegalMoves)?
        } else {
            Move::Discard { slot: 0 }
        };

        event!(
            target: "hanabi_bot::decision",
            Level::DEBUG,
            seat = %self.seat,
            policy = "rule_based",
            chosen = %chosen,
        );
        Ok(chosen)
    }

    fn observe(&mut self, _event: &Event) -> Result<(), AgentError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discards_leftmost_card() {
        let game = GameState::with_seed(2, 3).unwrap();
        let mut policy = RuleBasedPolicy::new(PlayerId(0));
        assert_eq!(policy.choose(&game).unwrap(), Move::Discard { slot: 0 });
    }

    #[test]
    fn refuses_to_act_out_of_turn() {
        let game = GameState::with_seed(2, 3).unwrap();
        let mut policy = RuleBasedPolicy::new(PlayerId(1));
        assert_eq!(
            policy.choose(&game),
            Err(AgentError::OutOfTurn {
                seat: PlayerId(1),
                current: PlayerId(0)
            })
        );
    }
}
