use crate::bot::AgentError;
use crate::policy::Policy;
use hanabi_core::game::{Event, GameState, Move};

/// Final numbers of a finished (or abandoned) game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOutcome {
    pub score: u32,
    pub lives: u8,
    pub tokens: u8,
    pub turns: u32,
    pub winnable: bool,
    pub finished: bool,
    pub moves: Vec<Move>,
}

/// Turn loop: the real game plus one policy per seat.
///
/// Every event is delivered to every seat, filtered through
/// [`Event::observed_by`], before the next seat is asked to move.
pub struct Table {
    game: GameState,
    seats: Vec<Box<dyn Policy>>,
    moves: Vec<Move>,
}

impl Table {
    pub fn new(game: GameState, seats: Vec<Box<dyn Policy>>) -> Result<Self, AgentError> {
        if seats.len() != game.players() {
            return Err(AgentError::SeatMismatch {
                seats: seats.len(),
                players: game.players(),
            });
        }
        if let Some((index, policy)) = seats
            .iter()
            .enumerate()
            .find(|(index, policy)| policy.seat().index() != *index)
        {
            return Err(AgentError::MisplacedSeat {
                index,
                seat: policy.seat(),
            });
        }
        Ok(Self {
            game,
            seats,
            moves: Vec::new(),
        })
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn policy_name(&self, index: usize) -> Option<&str> {
        self.seats.get(index).map(|policy| policy.name())
    }

    /// Plays one turn. Returns `None` once the game is over.
    pub fn step(&mut self) -> Result<Option<Event>, AgentError> {
        if self.game.is_over() {
            return Ok(None);
        }

        let current = self.game.current_player();
        let mv = self.seats[current.index()].choose(&self.game)?;
        let event = self.game.apply(mv)?;
        self.moves.push(mv);

        for policy in &mut self.seats {
            let seat = policy.seat();
            policy.observe(&event.observed_by(seat))?;
        }
        Ok(Some(event))
    }

    /// Steps until the game ends or `max_turns` turns have been played.
    pub fn play_out(&mut self, max_turns: u32) -> Result<TableOutcome, AgentError> {
        while self.game.turns() < max_turns {
            if self.step()?.is_none() {
                break;
            }
        }
        Ok(self.outcome())
    }

    pub fn outcome(&self) -> TableOutcome {
        TableOutcome {
            score: self.game.score(),
            lives: self.game.lives(),
            tokens: self.game.tokens(),
            turns: self.game.turns(),
            winnable: self.game.is_winnable(),
            finished: self.game.is_over(),
            moves: self.moves.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::RuleBasedPolicy;
    use hanabi_core::model::player::PlayerId;

    fn discarders(players: usize) -> Vec<Box<dyn Policy>> {
        PlayerId::seats(players)
            .map(|seat| Box::new(RuleBasedPolicy::new(seat)) as Box<dyn Policy>)
            .collect()
    }

    #[test]
    fn rejects_wrong_seat_count() {
        let game = GameState::with_seed(3, 1).unwrap();
        let result = Table::new(game, discarders(2));
        assert!(matches!(
            result,
            Err(AgentError::SeatMismatch {
                seats: 2,
                players: 3
            })
        ));
    }

    #[test]
    fn rejects_seats_out_of_order() {
        let game = GameState::with_seed(2, 1).unwrap();
        let mut seats = discarders(2);
        seats.reverse();
        assert!(matches!(
            Table::new(game, seats),
            Err(AgentError::MisplacedSeat { index: 0, .. })
        ));
    }

    #[test]
    fn discard_only_game_ends_one_round_after_the_deck() {
        let game = GameState::with_seed(2, 17).unwrap();
        let mut table = Table::new(game, discarders(2)).unwrap();
        let outcome = table.play_out(1_000).unwrap();
        // Forty draws empty the deck, then each seat gets one final turn.
        assert!(outcome.finished);
        assert_eq!(outcome.turns, 42);
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.lives, 3);
        assert_eq!(outcome.tokens, 8);
        assert_eq!(outcome.moves.len(), 42);
        assert_eq!(table.step().unwrap(), None);
    }

    #[test]
    fn turn_limit_stops_early() {
        let game = GameState::with_seed(4, 2).unwrap();
        let mut table = Table::new(game, discarders(4)).unwrap();
        let outcome = table.play_out(5).unwrap();
        assert!(!outcome.finished);
        assert_eq!(outcome.turns, 5);
        assert_eq!(table.policy_name(3), Some("rule_based"));
    }
}
