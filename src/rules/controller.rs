//! Mesa Checkers rules.
//!
//! `MesaRules` is stateless: every operation takes the `GameState` it works
//! on. Each mutating operation first validates against a shared borrow and
//! only then touches the state, so a rejected request leaves the state
//! exactly as it was.
//!
//! ## Turn structure
//!
//! 1. Place one token of your color on a pile that is not full and not
//!    topped by another color. That pile becomes active.
//! 2. Move the top `count` tokens of the active pile one orthogonal step.
//!    The group must be all your color, and the target must be shorter than
//!    the height the group's lowest token sits at.
//! 3. If the origin still shows your color, the target becomes active and
//!    you may move again. Otherwise the turn is complete.
//! 4. End the turn. The current player is checked for a win first, then the
//!    incoming player at the start of their turn.

use tracing::{debug, info, trace};

use crate::core::action::{Action, ValidMove};
use crate::core::board::{Position, MAX_PILE_HEIGHT};
use crate::core::player::PlayerId;
use crate::core::state::{GameState, TurnPhase};
use crate::error::{EngineError, RuleViolation};

use super::engine::{GameResult, RulesEngine};

/// The Mesa Checkers rule engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct MesaRules;

impl MesaRules {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    // === Placement ===

    /// Check that the current player may place at `pos`.
    pub fn check_placement(&self, state: &GameState, pos: Position) -> Result<(), EngineError> {
        match state.phase() {
            TurnPhase::Won(_) => return Err(RuleViolation::GameOver.into()),
            TurnPhase::TurnComplete => return Err(RuleViolation::TurnComplete.into()),
            TurnPhase::AwaitingMove => return Err(RuleViolation::AlreadyPlaced.into()),
            TurnPhase::AwaitingPlacement => {}
        }

        let pile = state.board().pile(pos)?;
        if pile.height() >= MAX_PILE_HEIGHT {
            return Err(RuleViolation::PileFull.into());
        }
        match pile.top_color() {
            Some(top) if top != state.current_color() => Err(RuleViolation::OpponentOnTop.into()),
            _ => Ok(()),
        }
    }

    /// Place a token of the current player's color at `pos`.
    ///
    /// On success `pos` becomes the active pile. The turn is not advanced.
    pub fn place_token(&self, state: &mut GameState, pos: Position) -> Result<(), EngineError> {
        if let Err(err) = self.check_placement(state, pos) {
            trace!(%pos, %err, "placement rejected");
            return Err(err);
        }

        let color = state.current_color();
        state.board_mut().pile_mut(pos)?.add_token(color.into());
        state.set_active_pile(pos);

        debug!(%color, %pos, "token placed");
        Ok(())
    }

    /// Every position the current player may place on.
    #[must_use]
    pub fn valid_placements(&self, state: &GameState) -> Vec<Position> {
        Position::all()
            .filter(|&pos| self.check_placement(state, pos).is_ok())
            .collect()
    }

    // === Moving ===

    /// Check that the current player may move `count` tokens to `to`.
    ///
    /// Returns the active pile's position.
    pub fn check_move(
        &self,
        state: &GameState,
        to: Position,
        count: usize,
    ) -> Result<Position, EngineError> {
        match state.phase() {
            TurnPhase::Won(_) => return Err(RuleViolation::GameOver.into()),
            TurnPhase::TurnComplete => return Err(RuleViolation::TurnComplete.into()),
            TurnPhase::AwaitingPlacement | TurnPhase::AwaitingMove => {}
        }

        let from = state.active_pile().ok_or(RuleViolation::NoActivePile)?;
        let board = state.board();
        let active = board.pile(from)?;
        let target = board.pile(to)?;

        if !board.orthogonally_adjacent(from, to) {
            return Err(RuleViolation::NotAdjacent.into());
        }
        if count == 0 {
            return Err(RuleViolation::ZeroCount.into());
        }
        if active.height() < count {
            return Err(RuleViolation::NotEnoughTokens.into());
        }
        if active.consecutive_from_top(state.current_color()) < count {
            return Err(RuleViolation::MixedColors.into());
        }
        // The lowest moved token sits at height `active - count + 1`; the
        // group must land strictly above the target's current top.
        if target.height() >= active.height() - count + 1 {
            return Err(RuleViolation::WouldDigIn.into());
        }

        Ok(from)
    }

    /// Move the top `count` tokens of the active pile onto `to`.
    ///
    /// The group keeps its order. If the origin still shows the current
    /// player's color, `to` becomes active for another move; otherwise the
    /// turn is complete (and `to` is still recorded as active).
    pub fn move_tokens(
        &self,
        state: &mut GameState,
        to: Position,
        count: usize,
    ) -> Result<(), EngineError> {
        let from = match self.check_move(state, to, count) {
            Ok(from) => from,
            Err(err) => {
                trace!(%to, count, %err, "move rejected");
                return Err(err);
            }
        };

        let color = state.current_color();
        let board = state.board_mut();
        let group = board
            .pile_mut(from)?
            .remove_tokens(count)
            .expect("active pile height was checked against count");
        let target = board.pile_mut(to)?;
        for token in group {
            target.add_token(token);
        }
        let can_continue = board.pile(from)?.top_color() == Some(color);

        state.set_active_pile(to);
        if !can_continue {
            state.complete_turn();
        }

        debug!(%color, %from, %to, count, can_continue, "tokens moved");
        Ok(())
    }

    /// Legal move targets from the active pile.
    ///
    /// One entry per in-bounds neighbor that accepts at least one token, in
    /// the order right, down, left, up. Empty when no pile is active, the
    /// turn is complete, or nothing can move; the driver should then
    /// `finish_turn`.
    #[must_use]
    pub fn valid_moves(&self, state: &GameState) -> Vec<ValidMove> {
        if state.phase() != TurnPhase::AwaitingMove {
            return Vec::new();
        }
        let Some(from) = state.active_pile() else {
            return Vec::new();
        };
        let board = state.board();
        let Ok(active) = board.pile(from) else {
            return Vec::new();
        };

        let height = active.height();
        let consecutive = active.consecutive_from_top(state.current_color());
        if consecutive == 0 {
            return Vec::new();
        }

        board
            .neighbors(from)
            .filter_map(|to| {
                let target_height = board.pile(to).ok()?.height();
                let max_count = (1..=consecutive)
                    .take_while(|&count| target_height < height - count + 1)
                    .last()?;
                Some(ValidMove::new(to, max_count))
            })
            .collect()
    }

    // === Turn Lifecycle ===

    /// Mark the turn complete while a pile is active.
    ///
    /// Used when the player stops early or `valid_moves` is empty.
    pub fn finish_turn(&self, state: &mut GameState) -> Result<(), EngineError> {
        match state.phase() {
            TurnPhase::Won(_) => Err(RuleViolation::GameOver.into()),
            TurnPhase::TurnComplete => Err(RuleViolation::TurnComplete.into()),
            TurnPhase::AwaitingPlacement => Err(RuleViolation::NoActivePile.into()),
            TurnPhase::AwaitingMove => {
                state.complete_turn();
                debug!(player = %state.current_player_id(), "turn finished");
                Ok(())
            }
        }
    }

    /// End a complete turn.
    ///
    /// If the current player satisfies the win condition the game ends in
    /// their favor, even if the opponent satisfies it too. Otherwise play
    /// passes to the other player, who wins immediately if the board already
    /// satisfies them. Returns the winner when the game just ended.
    pub fn end_turn(&self, state: &mut GameState) -> Result<Option<PlayerId>, EngineError> {
        match state.phase() {
            TurnPhase::Won(_) => return Err(RuleViolation::GameOver.into()),
            TurnPhase::AwaitingPlacement | TurnPhase::AwaitingMove => {
                return Err(RuleViolation::TurnNotComplete.into())
            }
            TurnPhase::TurnComplete => {}
        }

        if let Some(winner) = self.check_current_winner(state) {
            return Ok(Some(winner));
        }

        state.next_turn();
        debug!(player = %state.current_player_id(), color = %state.current_color(), "turn started");

        Ok(self.check_current_winner(state))
    }

    fn check_current_winner(&self, state: &mut GameState) -> Option<PlayerId> {
        let player = state.current_player_id();
        if !state.has_won(player) {
            return None;
        }
        state.declare_winner(player);
        info!(%player, color = %state.current_color(), "game won");
        Some(player)
    }
}

impl RulesEngine for MesaRules {
    fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        match state.phase() {
            TurnPhase::Won(_) => Vec::new(),
            TurnPhase::TurnComplete => vec![Action::EndTurn],
            TurnPhase::AwaitingPlacement => self
                .valid_placements(state)
                .into_iter()
                .map(Action::Place)
                .collect(),
            TurnPhase::AwaitingMove => {
                let mut actions: Vec<Action> = self
                    .valid_moves(state)
                    .iter()
                    .flat_map(ValidMove::actions)
                    .collect();
                actions.push(Action::FinishTurn);
                actions
            }
        }
    }

    fn apply_action(&self, state: &mut GameState, action: Action) -> Result<(), EngineError> {
        match action {
            Action::Place(pos) => self.place_token(state, pos),
            Action::Move { to, count } => self.move_tokens(state, to, count),
            Action::FinishTurn => self.finish_turn(state),
            Action::EndTurn => self.end_turn(state).map(|_| ()),
        }
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state.winner().map(|winner| GameResult { winner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::Board;
    use crate::core::color::Color::{self, Black, White};
    use crate::core::config::GameConfig;
    use crate::core::pile::Pile;
    use crate::error::BoardError;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    /// White to move with `active` already set.
    fn state_with(piles: &[(Position, &[Color])], active: Position) -> GameState {
        let mut board = Board::new();
        for (p, colors) in piles {
            board.set_pile(*p, Pile::from_colors(colors)).unwrap();
        }
        let mut state = GameState::with_board(GameConfig::default(), board).unwrap();
        state.set_active_pile(active);
        state
    }

    #[test]
    fn test_place_on_empty_board() {
        let rules = MesaRules::new();
        let mut state = GameState::default();

        rules.place_token(&mut state, pos(2, 2)).unwrap();

        let pile = state.board().pile(pos(2, 2)).unwrap();
        assert_eq!(pile.height(), 1);
        assert_eq!(pile.top_color(), Some(White));
        assert_eq!(state.active_pile(), Some(pos(2, 2)));
        assert!(!state.is_turn_complete());
        assert_eq!(state.current_player_id(), PlayerId::FIRST);
    }

    #[test]
    fn test_place_rejections() {
        let rules = MesaRules::new();
        let mut board = Board::new();
        board.set_pile(pos(0, 1), Pile::from_colors(&[White, White, White, White])).unwrap();
        board.set_pile(pos(0, 2), Pile::from_colors(&[White, Black])).unwrap();
        board.set_pile(pos(0, 3), Pile::from_colors(&[Color::Purple])).unwrap();
        let mut state = GameState::with_board(GameConfig::default(), board).unwrap();
        let before = state.clone();

        assert_eq!(
            rules.place_token(&mut state, pos(0, 1)),
            Err(RuleViolation::PileFull.into())
        );
        assert_eq!(
            rules.place_token(&mut state, pos(0, 2)),
            Err(RuleViolation::OpponentOnTop.into())
        );
        assert_eq!(
            rules.place_token(&mut state, pos(0, 3)),
            Err(RuleViolation::OpponentOnTop.into())
        );
        assert_eq!(
            rules.place_token(&mut state, pos(6, 0)),
            Err(BoardError::OutOfBounds { row: 6, col: 0 }.into())
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_place_on_own_color() {
        let rules = MesaRules::new();
        let mut state = state_with(&[(pos(1, 1), &[Black, White])], pos(1, 1));
        state.next_turn();
        state.next_turn();

        rules.place_token(&mut state, pos(1, 1)).unwrap();
        assert_eq!(state.board().pile(pos(1, 1)).unwrap().height(), 3);
    }

    #[test]
    fn test_place_twice_rejected() {
        let rules = MesaRules::new();
        let mut state = GameState::default();

        rules.place_token(&mut state, pos(2, 2)).unwrap();
        assert_eq!(
            rules.place_token(&mut state, pos(3, 3)),
            Err(RuleViolation::AlreadyPlaced.into())
        );
    }

    #[test]
    fn test_move_single_token_completes_turn() {
        let rules = MesaRules::new();
        let mut state = GameState::default();
        rules.place_token(&mut state, pos(2, 2)).unwrap();

        rules.move_tokens(&mut state, pos(2, 3), 1).unwrap();

        assert_eq!(state.board().pile(pos(2, 2)).unwrap().height(), 0);
        assert_eq!(state.board().pile(pos(2, 3)).unwrap().top_color(), Some(White));
        assert!(state.is_turn_complete());
        assert_eq!(state.active_pile(), Some(pos(2, 3)));
        assert_eq!(state.phase(), TurnPhase::TurnComplete);
    }

    #[test]
    fn test_move_can_chain() {
        let rules = MesaRules::new();
        let mut state = state_with(&[(pos(2, 2), &[White, White, White])], pos(2, 2));

        rules.move_tokens(&mut state, pos(2, 1), 1).unwrap();

        assert!(!state.is_turn_complete());
        assert_eq!(state.active_pile(), Some(pos(2, 1)));
        assert_eq!(state.board().pile(pos(2, 2)).unwrap().height(), 2);
    }

    #[test]
    fn test_move_preserves_group_order() {
        let rules = MesaRules::new();
        let mut state = state_with(
            &[
                (pos(2, 2), &[Black, White, White, White]),
                (pos(3, 2), &[Black]),
            ],
            pos(2, 2),
        );

        rules.move_tokens(&mut state, pos(3, 2), 2).unwrap();

        let target = state.board().pile(pos(3, 2)).unwrap();
        assert_eq!(target.tokens().len(), 3);
        assert_eq!(target.top_color(), Some(White));
        assert_eq!(target.tokens()[0].color, Black);
        assert_eq!(state.board().pile(pos(2, 2)).unwrap().height(), 2);
        assert!(!state.is_turn_complete());
    }

    #[test]
    fn test_move_rejections() {
        let rules = MesaRules::new();
        let mut state = state_with(
            &[
                (pos(2, 2), &[Black, White, White]),
                (pos(2, 3), &[Black, Black]),
            ],
            pos(2, 2),
        );
        let before = state.clone();

        let violation = |state: &mut GameState, to: Position, count: usize| {
            rules.move_tokens(state, to, count).unwrap_err().violation()
        };

        assert_eq!(violation(&mut state, pos(2, 2), 1), Some(RuleViolation::NotAdjacent));
        assert_eq!(violation(&mut state, pos(3, 3), 1), Some(RuleViolation::NotAdjacent));
        assert_eq!(violation(&mut state, pos(2, 4), 1), Some(RuleViolation::NotAdjacent));
        assert_eq!(violation(&mut state, pos(2, 1), 0), Some(RuleViolation::ZeroCount));
        assert_eq!(violation(&mut state, pos(2, 1), 4), Some(RuleViolation::NotEnoughTokens));
        assert_eq!(violation(&mut state, pos(2, 1), 3), Some(RuleViolation::MixedColors));
        // Lowest of two sits at height 2; target of height 2 would bury it.
        assert_eq!(violation(&mut state, pos(2, 3), 2), Some(RuleViolation::WouldDigIn));
        assert_eq!(state, before);

        rules.move_tokens(&mut state, pos(2, 3), 1).unwrap();
    }

    #[test]
    fn test_move_without_active_pile() {
        let rules = MesaRules::new();
        let mut state = GameState::default();

        assert_eq!(
            rules.move_tokens(&mut state, pos(0, 1), 1),
            Err(RuleViolation::NoActivePile.into())
        );
    }

    #[test]
    fn test_move_after_turn_complete() {
        let rules = MesaRules::new();
        let mut state = state_with(&[(pos(2, 2), &[White, White])], pos(2, 2));
        rules.finish_turn(&mut state).unwrap();

        assert_eq!(
            rules.move_tokens(&mut state, pos(2, 3), 1),
            Err(RuleViolation::TurnComplete.into())
        );
        assert_eq!(
            rules.place_token(&mut state, pos(4, 4)),
            Err(RuleViolation::TurnComplete.into())
        );
    }

    #[test]
    fn test_move_out_of_bounds() {
        let rules = MesaRules::new();
        let mut state = state_with(&[(pos(0, 5), &[White])], pos(0, 5));

        assert_eq!(
            rules.move_tokens(&mut state, pos(0, 6), 1),
            Err(BoardError::OutOfBounds { row: 0, col: 6 }.into())
        );
    }

    #[test]
    fn test_valid_moves_height_limit() {
        let rules = MesaRules::new();
        let state = state_with(
            &[(pos(2, 2), &[White, White, White]), (pos(2, 3), &[Black, Black])],
            pos(2, 2),
        );

        let moves = rules.valid_moves(&state);

        assert_eq!(
            moves,
            vec![
                ValidMove::new(pos(2, 3), 1),
                ValidMove::new(pos(3, 2), 3),
                ValidMove::new(pos(2, 1), 3),
                ValidMove::new(pos(1, 2), 3),
            ]
        );
    }

    #[test]
    fn test_valid_moves_limited_by_run() {
        let rules = MesaRules::new();
        let state = state_with(&[(pos(0, 0), &[Black, White, White])], pos(0, 0));

        let moves = rules.valid_moves(&state);

        assert_eq!(
            moves,
            vec![ValidMove::new(pos(0, 1), 2), ValidMove::new(pos(1, 0), 2)]
        );
    }

    #[test]
    fn test_valid_moves_omits_blocked_neighbors() {
        let rules = MesaRules::new();
        let state = state_with(
            &[
                (pos(0, 0), &[White]),
                (pos(0, 1), &[Black]),
                (pos(1, 0), &[White]),
            ],
            pos(0, 0),
        );

        assert!(rules.valid_moves(&state).is_empty());
    }

    #[test]
    fn test_valid_moves_empty_outside_move_phase() {
        let rules = MesaRules::new();
        let state = GameState::default();
        assert!(rules.valid_moves(&state).is_empty());

        let mut state = state_with(&[(pos(2, 2), &[White, White])], pos(2, 2));
        rules.finish_turn(&mut state).unwrap();
        assert!(rules.valid_moves(&state).is_empty());
    }

    #[test]
    fn test_valid_moves_empty_when_top_is_foreign() {
        let rules = MesaRules::new();
        let state = state_with(&[(pos(2, 2), &[White, Black])], pos(2, 2));
        assert!(rules.valid_moves(&state).is_empty());
    }

    #[test]
    fn test_finish_turn() {
        let rules = MesaRules::new();
        let mut state = GameState::default();

        assert_eq!(
            rules.finish_turn(&mut state),
            Err(RuleViolation::NoActivePile.into())
        );

        rules.place_token(&mut state, pos(1, 1)).unwrap();
        rules.finish_turn(&mut state).unwrap();
        assert_eq!(state.phase(), TurnPhase::TurnComplete);
        assert_eq!(
            rules.finish_turn(&mut state),
            Err(RuleViolation::TurnComplete.into())
        );
    }

    #[test]
    fn test_end_turn_advances() {
        let rules = MesaRules::new();
        let mut state = GameState::default();

        assert_eq!(
            rules.end_turn(&mut state),
            Err(RuleViolation::TurnNotComplete.into())
        );

        rules.place_token(&mut state, pos(2, 2)).unwrap();
        rules.move_tokens(&mut state, pos(2, 3), 1).unwrap();

        assert_eq!(rules.end_turn(&mut state), Ok(None));
        assert_eq!(state.current_player_id(), PlayerId::SECOND);
        assert_eq!(state.current_color(), Black);
        assert_eq!(state.active_pile(), None);
        assert!(!state.is_turn_complete());
    }

    #[test]
    fn test_end_turn_current_player_wins() {
        let rules = MesaRules::new();
        let mut state = state_with(
            &[
                (pos(0, 0), &[White]),
                (pos(0, 5), &[White]),
                (pos(5, 0), &[White]),
                (pos(2, 2), &[White]),
            ],
            pos(2, 2),
        );
        // Last corner fills during the turn.
        state
            .board_mut()
            .set_pile(pos(5, 5), Pile::from_colors(&[Black, White, Black, White]))
            .unwrap();
        rules.finish_turn(&mut state).unwrap();

        assert_eq!(rules.end_turn(&mut state), Ok(Some(PlayerId::FIRST)));
        assert_eq!(state.phase(), TurnPhase::Won(PlayerId::FIRST));
        assert_eq!(state.current_player_id(), PlayerId::FIRST);
        assert_eq!(
            rules.is_terminal(&state),
            Some(GameResult { winner: PlayerId::FIRST })
        );
        assert!(rules.legal_actions(&state).is_empty());
        assert_eq!(
            rules.place_token(&mut state, pos(3, 3)),
            Err(RuleViolation::GameOver.into())
        );
        assert_eq!(rules.end_turn(&mut state), Err(RuleViolation::GameOver.into()));
    }

    #[test]
    fn test_end_turn_incoming_player_wins() {
        let rules = MesaRules::new();
        let mut state = state_with(
            &[
                (pos(0, 0), &[Black]),
                (pos(0, 5), &[Black]),
                (pos(5, 0), &[Black]),
                (pos(5, 5), &[Black]),
                (pos(2, 2), &[White]),
            ],
            pos(2, 2),
        );
        rules.finish_turn(&mut state).unwrap();

        assert_eq!(rules.end_turn(&mut state), Ok(Some(PlayerId::SECOND)));
        assert_eq!(state.current_player_id(), PlayerId::SECOND);
        assert_eq!(state.winner(), Some(PlayerId::SECOND));
    }

    #[test]
    fn test_simultaneous_win_goes_to_current_player() {
        let rules = MesaRules::new();
        let full: &[Color] = &[White, Black, White, Black];
        let mut state = state_with(&[(pos(2, 2), &[White])], pos(2, 2));
        for corner in Board::CORNERS {
            state.board_mut().set_pile(corner, Pile::from_colors(full)).unwrap();
        }
        assert!(state.has_won(PlayerId::FIRST));
        assert!(state.has_won(PlayerId::SECOND));
        rules.finish_turn(&mut state).unwrap();

        assert_eq!(rules.end_turn(&mut state), Ok(Some(PlayerId::FIRST)));
    }

    #[test]
    fn test_legal_actions_by_phase() {
        let rules = MesaRules::new();
        let mut state = GameState::default();

        let placements = rules.legal_actions(&state);
        assert_eq!(placements.len(), 36);
        assert!(placements.iter().all(|a| matches!(a, Action::Place(_))));

        rules.apply_action(&mut state, Action::Place(pos(0, 0))).unwrap();
        let moves = rules.legal_actions(&state);
        assert_eq!(
            moves,
            vec![
                Action::Move { to: pos(0, 1), count: 1 },
                Action::Move { to: pos(1, 0), count: 1 },
                Action::FinishTurn,
            ]
        );

        rules.apply_action(&mut state, Action::Move { to: pos(1, 0), count: 1 }).unwrap();
        assert_eq!(rules.legal_actions(&state), vec![Action::EndTurn]);

        rules.apply_action(&mut state, Action::EndTurn).unwrap();
        assert_eq!(state.current_player_id(), PlayerId::SECOND);
        // (1,0) is White-topped and closed to Black.
        assert_eq!(rules.legal_actions(&state).len(), 35);
        assert!(!rules.is_legal(&state, Action::Place(pos(1, 0))));
    }
}
