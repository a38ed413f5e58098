use super::event::{Event, Replacement};
use super::moves::{Hint, Move};
use crate::model::card::{CARD_TYPES, Card};
use crate::model::color::Color;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::player::PlayerId;
use crate::model::rank::Rank;
use std::fmt;

pub const MAX_TOKENS: u8 = 8;
pub const DEFAULT_LIVES: u8 = 3;
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 5;

/// Authoritative game state and rule enforcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    hands: Vec<Hand>,
    hand_size: usize,
    deck: Deck,
    stacks: [u8; 5],
    discard_pile: Vec<Card>,
    lives: u8,
    tokens: u8,
    current: PlayerId,
    last_drawer: Option<PlayerId>,
    over: bool,
    turns: u32,
}

impl GameState {
    /// Deals a fresh game from the front of `deck`.
    pub fn new(players: usize, mut deck: Deck) -> Result<Self, RuleViolation> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players) {
            return Err(RuleViolation::PlayerCount { players });
        }

        let hand_size = hand_size_for(players);
        let hands = (0..players)
            .map(|_| {
                let cards = (0..hand_size).filter_map(|_| deck.draw()).collect();
                Hand::with_cards(cards)
            })
            .collect();

        Ok(Self {
            hands,
            hand_size,
            deck,
            stacks: [0; 5],
            discard_pile: Vec::new(),
            lives: DEFAULT_LIVES,
            tokens: MAX_TOKENS,
            current: PlayerId(0),
            last_drawer: None,
            over: false,
            turns: 0,
        })
    }

    pub fn with_seed(players: usize, seed: u64) -> Result<Self, RuleViolation> {
        Self::new(players, Deck::shuffled_with_seed(seed))
    }

    pub fn with_lives(mut self, lives: u8) -> Self {
        self.lives = lives;
        self
    }

    pub fn with_tokens(mut self, tokens: u8) -> Self {
        self.tokens = tokens.min(MAX_TOKENS);
        self
    }

    pub fn with_stacks(mut self, stacks: [u8; 5]) -> Self {
        self.stacks = stacks.map(|height| height.min(5));
        self
    }

    pub fn players(&self) -> usize {
        self.hands.len()
    }

    pub fn hand_size(&self) -> usize {
        self.hand_size
    }

    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.hands[player.index()]
    }

    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn tokens(&self) -> u8 {
        self.tokens
    }

    pub fn stacks(&self) -> &[u8; 5] {
        &self.stacks
    }

    pub fn stack(&self, color: Color) -> u8 {
        self.stacks[color.index()]
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn score(&self) -> u32 {
        self.stacks.iter().map(|&height| u32::from(height)).sum()
    }

    /// False once the discard pile holds every copy of some card type.
    pub fn is_winnable(&self) -> bool {
        let mut discarded = [0u8; CARD_TYPES];
        for card in &self.discard_pile {
            discarded[card.to_id() as usize] += 1;
        }
        Card::all_types().all(|card| discarded[card.to_id() as usize] < card.multiplicity())
    }

    /// Every move the current player may make, discards first, then plays,
    /// then hints per other player (colors before ranks, in hand order).
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.over {
            return Vec::new();
        }

        let hand_len = self.hands[self.current.index()].len();
        let mut moves: Vec<Move> = (0..hand_len).map(|slot| Move::Discard { slot }).collect();
        moves.extend((0..hand_len).map(|slot| Move::Play { slot }));

        if self.tokens == 0 {
            return moves;
        }

        for target in PlayerId::seats(self.players()) {
            if target == self.current {
                continue;
            }
            let hand = &self.hands[target.index()];
            let mut colors: Vec<Color> = Vec::new();
            let mut ranks: Vec<Rank> = Vec::new();
            for card in hand.iter() {
                if !colors.contains(&card.color) {
                    colors.push(card.color);
                }
                if !ranks.contains(&card.rank) {
                    ranks.push(card.rank);
                }
            }
            moves.extend(colors.into_iter().map(|color| Move::Hint {
                target,
                hint: Hint::Color(color),
            }));
            moves.extend(ranks.into_iter().map(|rank| Move::Hint {
                target,
                hint: Hint::Rank(rank),
            }));
        }

        moves
    }

    /// Applies `mv` for the current player and returns the public event.
    /// The state is untouched when the move breaks a rule.
    pub fn apply(&mut self, mv: Move) -> Result<Event, RuleViolation> {
        if self.over {
            return Err(RuleViolation::GameOver);
        }

        let actor = self.current;
        let event = match mv {
            Move::Discard { slot } => {
                let card = self.take_from_hand(actor, slot)?;
                self.tokens = (self.tokens + 1).min(MAX_TOKENS);
                self.discard_pile.push(card);
                let replacement = self.refill(actor);
                Event::CardDiscarded {
                    player: actor,
                    slot,
                    card,
                    replacement,
                }
            }
            Move::Play { slot } => {
                let card = self.take_from_hand(actor, slot)?;
                let was_legal = self.place(card);
                let replacement = self.refill(actor);
                Event::CardPlayed {
                    player: actor,
                    slot,
                    card,
                    replacement,
                    was_legal,
                }
            }
            Move::Hint { target, hint } => {
                let matching_slots = self.check_hint(actor, target, hint)?;
                self.tokens -= 1;
                Event::HintGiven {
                    giver: actor,
                    recipient: target,
                    hint,
                    matching_slots,
                }
            }
        };

        self.end_turn();
        Ok(event)
    }

    /// Returns the state that would follow `mv` if the current player held
    /// `hand` and the deck's next card were `next_card`. `self` is not touched
    /// and no event leaves this call.
    pub fn hypothetical(
        &self,
        hand: &[Card],
        next_card: Option<Card>,
        mv: Move,
    ) -> Result<GameState, RuleViolation> {
        let mut probe = self.clone();
        probe.hands[self.current.index()] = Hand::with_cards(hand.to_vec());
        probe.deck = Deck::from_cards(next_card.into_iter().collect());
        probe.apply(mv)?;
        Ok(probe)
    }

    fn take_from_hand(&mut self, player: PlayerId, slot: usize) -> Result<Card, RuleViolation> {
        let hand = &mut self.hands[player.index()];
        let hand_size = hand.len();
        hand.take(slot)
            .ok_or(RuleViolation::SlotOutOfRange { slot, hand_size })
    }

    fn check_hint(
        &self,
        actor: PlayerId,
        target: PlayerId,
        hint: Hint,
    ) -> Result<Vec<usize>, RuleViolation> {
        if self.tokens == 0 {
            return Err(RuleViolation::NoTokens);
        }
        if target == actor {
            return Err(RuleViolation::SelfHint);
        }
        if target.index() >= self.players() {
            return Err(RuleViolation::UnknownPlayer { player: target });
        }

        let hand = &self.hands[target.index()];
        let matching = hand.slots_where(|card| hint.matches(card));
        if matching.is_empty() {
            return Err(RuleViolation::HintMatchesNothing { target, hint });
        }
        Ok(matching)
    }

    /// Puts `card` on its stack when it continues it; otherwise it is lost
    /// to the discard pile along with a life.
    fn place(&mut self, card: Card) -> bool {
        let stack = &mut self.stacks[card.color.index()];
        if *stack + 1 == card.rank.value() {
            *stack = card.rank.value();
            if card.rank == Rank::Five {
                self.tokens = (self.tokens + 1).min(MAX_TOKENS);
                self.over = self.stacks.iter().all(|&height| height == 5);
            }
            true
        } else {
            self.discard_pile.push(card);
            self.lives = self.lives.saturating_sub(1);
            if self.lives == 0 {
                self.over = true;
            }
            false
        }
    }

    fn refill(&mut self, player: PlayerId) -> Replacement {
        match self.deck.draw() {
            Some(card) => {
                self.hands[player.index()].push(card);
                Replacement::Revealed(card)
            }
            None => Replacement::None,
        }
    }

    fn end_turn(&mut self) {
        match self.last_drawer {
            None if self.deck.is_empty() => self.last_drawer = Some(self.current),
            Some(drawer) if drawer == self.current => self.over = true,
            _ => {}
        }
        self.turns += 1;
        self.current = self.current.next(self.players());
    }
}

fn hand_size_for(players: usize) -> usize {
    if players > 3 { 4 } else { 5 }
}

/// A move the rules forbid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    GameOver,
    PlayerCount { players: usize },
    NoTokens,
    SelfHint,
    UnknownPlayer { player: PlayerId },
    HintMatchesNothing { target: PlayerId, hint: Hint },
    SlotOutOfRange { slot: usize, hand_size: usize },
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleViolation::GameOver => write!(f, "the game is already over"),
            RuleViolation::PlayerCount { players } => write!(
                f,
                "{players} players requested; the game supports {MIN_PLAYERS} to {MAX_PLAYERS}"
            ),
            RuleViolation::NoTokens => write!(f, "at least one token is required to give a hint"),
            RuleViolation::SelfHint => write!(f, "a player cannot hint themselves"),
            RuleViolation::UnknownPlayer { player } => write!(f, "{player} is not seated"),
            RuleViolation::HintMatchesNothing { target, hint } => {
                write!(f, "{target} holds no card matching {hint}")
            }
            RuleViolation::SlotOutOfRange { slot, hand_size } => {
                write!(f, "slot {slot} is outside a hand of {hand_size} cards")
            }
        }
    }
}

impl std::error::Error for RuleViolation {}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::color::Color::*;

    fn c(color: Color, rank: u8) -> Card {
        Card::new(color, Rank::from_value(rank).expect("valid rank"))
    }

    /// Fixed 50-card order: player hands first, then the draw pile.
    #[rustfmt::skip]
    pub(crate) fn test_deck() -> Deck {
        Deck::from_cards(vec![
            c(Red, 1), c(Green, 3), c(Blue, 1), c(Green, 3), c(Green, 2),
            c(Yellow, 5), c(Yellow, 2), c(Red, 4), c(White, 2), c(White, 5),
            c(Red, 5), c(Red, 1), c(Blue, 2), c(Green, 1), c(White, 4),
            c(White, 1), c(Yellow, 2), c(Blue, 4), c(Green, 1), c(White, 2),
            c(Blue, 3), c(Yellow, 1), c(Yellow, 3), c(White, 1), c(Green, 5),
            c(Red, 2), c(Yellow, 4), c(Blue, 1), c(Green, 4), c(White, 3),
            c(Blue, 5), c(Blue, 3), c(Green, 1), c(Yellow, 3), c(Green, 4),
            c(Blue, 4), c(Red, 3), c(Green, 2), c(Yellow, 1), c(Yellow, 1),
            c(Yellow, 4), c(Red, 1), c(White, 4), c(Blue, 1), c(White, 3),
            c(Red, 4), c(Red, 2), c(White, 1), c(Blue, 2), c(Red, 3),
        ])
    }

    fn hint_color(target: u8, color: Color) -> Move {
        Move::Hint {
            target: PlayerId(target),
            hint: Hint::Color(color),
        }
    }

    fn hint_rank(target: u8, rank: u8) -> Move {
        Move::Hint {
            target: PlayerId(target),
            hint: Hint::Rank(Rank::from_value(rank).unwrap()),
        }
    }

    #[test]
    fn deals_hand_sizes_by_player_count() {
        for (players, cards) in [(2, 5), (3, 5), (4, 4), (5, 4)] {
            let game = GameState::with_seed(players, 7).unwrap();
            for seat in PlayerId::seats(players) {
                assert_eq!(game.hand(seat).len(), cards);
            }
            assert_eq!(game.deck_remaining(), 50 - players * cards);
        }
        assert_eq!(
            GameState::with_seed(6, 7),
            Err(RuleViolation::PlayerCount { players: 6 })
        );
    }

    #[test]
    fn fresh_game_defaults() {
        let game = GameState::new(3, test_deck()).unwrap();
        assert_eq!(game.lives(), 3);
        assert_eq!(game.tokens(), 8);
        assert_eq!(game.current_player(), PlayerId(0));
        assert_eq!(game.score(), 0);
        assert!(game.is_winnable());
    }

    #[test]
    fn moves_advance_current_player() {
        let mut game = GameState::new(3, test_deck()).unwrap();
        game.apply(hint_color(1, Yellow)).unwrap();
        assert_eq!(game.current_player(), PlayerId(1));
        game.apply(hint_rank(0, 1)).unwrap();
        assert_eq!(game.current_player(), PlayerId(2));
        game.apply(Move::Discard { slot: 0 }).unwrap();
        assert_eq!(game.current_player(), PlayerId(0));
        game.apply(Move::Play { slot: 0 }).unwrap();
        assert_eq!(game.current_player(), PlayerId(1));
    }

    #[test]
    fn hints_cost_a_token_and_report_matching_slots() {
        let mut game = GameState::new(2, test_deck()).unwrap();
        let event = game.apply(hint_color(1, White)).unwrap();
        assert_eq!(game.tokens(), 7);
        assert_eq!(
            event,
            Event::HintGiven {
                giver: PlayerId(0),
                recipient: PlayerId(1),
                hint: Hint::Color(White),
                matching_slots: vec![3, 4],
            }
        );
    }

    #[test]
    fn hint_rule_violations_leave_state_untouched() {
        let game = GameState::new(2, test_deck()).unwrap();

        let mut probe = game.clone();
        assert!(matches!(
            probe.apply(hint_color(1, Blue)),
            Err(RuleViolation::HintMatchesNothing { .. })
        ));
        assert!(matches!(
            probe.apply(hint_rank(1, 1)),
            Err(RuleViolation::HintMatchesNothing { .. })
        ));
        assert_eq!(probe.apply(hint_color(0, Red)), Err(RuleViolation::SelfHint));
        assert_eq!(
            probe.apply(hint_color(4, Red)),
            Err(RuleViolation::UnknownPlayer {
                player: PlayerId(4)
            })
        );
        assert_eq!(probe, game);

        let mut broke = game.with_tokens(0);
        assert_eq!(broke.apply(hint_color(1, Red)), Err(RuleViolation::NoTokens));
        assert_eq!(broke.apply(hint_rank(1, 5)), Err(RuleViolation::NoTokens));
    }

    #[test]
    fn discard_restores_token_up_to_maximum() {
        let mut game = GameState::new(2, test_deck()).unwrap();
        game.apply(Move::Discard { slot: 0 }).unwrap();
        assert_eq!(game.tokens(), 8);

        let mut game = GameState::new(2, test_deck()).unwrap();
        game.apply(hint_rank(1, 5)).unwrap();
        game.apply(hint_rank(0, 1)).unwrap();
        assert_eq!(game.tokens(), 6);
        game.apply(Move::Discard { slot: 0 }).unwrap();
        assert_eq!(game.tokens(), 7);
    }

    #[test]
    fn discard_refills_from_deck_at_the_back() {
        let mut game = GameState::new(2, test_deck()).unwrap();
        let before = game.deck_remaining();
        let event = game.apply(Move::Discard { slot: 0 }).unwrap();
        assert_eq!(game.hand(PlayerId(0)).get(4), Some(c(Red, 5)));
        assert_eq!(game.deck_remaining(), before - 1);
        assert_eq!(
            event,
            Event::CardDiscarded {
                player: PlayerId(0),
                slot: 0,
                card: c(Red, 1),
                replacement: Replacement::Revealed(c(Red, 5)),
            }
        );
        game.apply(Move::Discard { slot: 0 }).unwrap();
        assert_eq!(game.discard_pile(), &[c(Red, 1), c(Yellow, 5)]);
    }

    #[test]
    fn correct_play_extends_stack() {
        let mut game = GameState::new(2, test_deck()).unwrap();
        let event = game.apply(Move::Play { slot: 0 }).unwrap();
        assert_eq!(game.stack(Red), 1);
        assert!(matches!(event, Event::CardPlayed { was_legal: true, .. }));
    }

    #[test]
    fn misplay_loses_life_and_discards() {
        let mut game = GameState::new(2, test_deck()).unwrap();
        let event = game.apply(Move::Play { slot: 1 }).unwrap();
        assert_eq!(game.stack(Green), 0);
        assert_eq!(game.lives(), 2);
        assert_eq!(game.discard_pile(), &[c(Green, 3)]);
        assert!(matches!(event, Event::CardPlayed { was_legal: false, .. }));

        let mut last_life = GameState::new(2, test_deck()).unwrap().with_lives(1);
        last_life.apply(Move::Play { slot: 1 }).unwrap();
        assert!(last_life.is_over());
        assert_eq!(last_life.legal_moves(), Vec::new());
        assert_eq!(
            last_life.apply(Move::Discard { slot: 0 }),
            Err(RuleViolation::GameOver)
        );
    }

    #[rustfmt::skip]
    fn red_run_deck() -> Deck {
        Deck::from_cards(vec![
            c(Red, 1), c(Red, 3), c(Red, 5), c(White, 2), c(White, 2),
            c(Red, 2), c(Red, 4), c(White, 1), c(White, 1), c(White, 1),
            c(White, 3), c(White, 3), c(White, 4), c(White, 4), c(White, 5),
            c(Green, 1),
        ])
    }

    #[test]
    fn completing_a_stack_grants_exactly_one_token() {
        for (before, after) in [(6, 7), (7, 8), (8, 8)] {
            let mut game = GameState::new(2, red_run_deck()).unwrap().with_tokens(before);
            for _ in 0..5 {
                game.apply(Move::Play { slot: 0 }).unwrap();
            }
            assert_eq!(game.stack(Red), 5);
            assert_eq!(game.tokens(), after);
        }
    }

    #[test]
    fn completing_every_stack_ends_the_game() {
        let mut game = GameState::new(2, test_deck())
            .unwrap()
            .with_stacks([5, 5, 5, 4, 5]);
        game.apply(Move::Discard { slot: 0 }).unwrap();
        assert!(!game.is_over());
        game.apply(Move::Play { slot: 0 }).unwrap();
        assert!(game.is_over());
        assert_eq!(game.score(), 25);
    }

    #[test]
    fn game_ends_one_round_after_last_card_drawn() {
        let deck = Deck::from_cards(vec![
            c(Red, 1), c(Red, 1), c(Red, 1), c(Red, 2), c(Red, 2),
            c(Red, 3), c(Red, 3), c(Red, 4), c(Red, 4), c(Red, 5),
            c(Blue, 1), c(Blue, 1), c(Blue, 1), c(Blue, 2), c(Blue, 2),
            c(White, 5),
        ]);
        let mut game = GameState::new(3, deck).unwrap();
        for _ in 0..3 {
            game.apply(Move::Discard { slot: 0 }).unwrap();
            assert!(!game.is_over());
        }
        game.apply(Move::Discard { slot: 0 }).unwrap();
        assert!(game.is_over());
    }

    #[test]
    fn empty_deck_shrinks_hand_and_reports_no_replacement() {
        let deck = Deck::from_cards((0..10).map(|_| c(Red, 1)).collect());
        let mut game = GameState::new(2, deck).unwrap();
        let event = game.apply(Move::Discard { slot: 2 }).unwrap();
        assert_eq!(game.hand(PlayerId(0)).len(), 4);
        assert!(matches!(
            event,
            Event::CardDiscarded {
                replacement: Replacement::None,
                ..
            }
        ));
    }

    #[test]
    fn discarding_every_copy_makes_game_unwinnable() {
        let mut game = GameState::new(3, test_deck()).unwrap();
        game.apply(Move::Discard { slot: 1 }).unwrap();
        assert!(game.is_winnable());
        // Player 1 throws away the only yellow five.
        game.apply(Move::Discard { slot: 0 }).unwrap();
        assert!(!game.is_winnable());
    }

    #[test]
    fn legal_moves_at_start_of_two_player_game() {
        let game = GameState::new(2, test_deck()).unwrap();
        let moves = game.legal_moves();
        assert_eq!(moves.len(), 16);
        assert_eq!(moves[0], Move::Discard { slot: 0 });
        assert_eq!(moves[5], Move::Play { slot: 0 });
        let expected_hints = [
            hint_color(1, Yellow),
            hint_color(1, Red),
            hint_color(1, White),
            hint_rank(1, 5),
            hint_rank(1, 2),
            hint_rank(1, 4),
        ];
        assert_eq!(&moves[10..], &expected_hints);
    }

    #[test]
    fn legal_moves_without_tokens_omit_hints() {
        let game = GameState::new(2, test_deck()).unwrap().with_tokens(0);
        let moves = game.legal_moves();
        assert_eq!(moves.len(), 10);
        assert!(moves.iter().all(|mv| !mv.is_hint()));
    }

    #[test]
    fn hypothetical_uses_supplied_hand_and_next_card() {
        let game = GameState::new(2, test_deck()).unwrap().with_tokens(1);
        let hand = [c(Red, 1), c(Green, 1), c(Blue, 1), c(Yellow, 1), c(White, 1)];
        let result = game
            .hypothetical(&hand, Some(c(Green, 5)), Move::Discard { slot: 0 })
            .unwrap();
        assert_eq!(result.tokens(), 2);
        assert_eq!(result.hand(PlayerId(0)).get(4), Some(c(Green, 5)));
        assert_eq!(result.discard_pile(), &[c(Red, 1)]);
        assert_eq!(game.tokens(), 1);
        assert_eq!(game.discard_pile(), &[] as &[Card]);
    }

    #[test]
    fn hypothetical_play_follows_supplied_hand() {
        let game = GameState::new(2, test_deck()).unwrap();
        let hand = [c(Blue, 1), c(Blue, 1), c(Blue, 1), c(Blue, 1), c(Blue, 1)];
        let result = game.hypothetical(&hand, None, Move::Play { slot: 3 }).unwrap();
        assert_eq!(result.stack(Blue), 1);
        assert_eq!(result.hand(PlayerId(0)).len(), 4);
        assert_eq!(game.stack(Blue), 0);
    }
}
