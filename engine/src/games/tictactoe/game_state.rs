use crate::error::{GameError, InvalidMoveReason};
use super::board::Board;
use super::history::MoveHistory;
use super::types::{GameStatus, Mark, Move, TurnState};
use super::win_detector::{Line, WinSet, evaluate, find_winning_line, winning_lines};

/// What the renderer needs after an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub applied: Move,
    pub board: Board,
    pub status: GameStatus,
    pub winning_line: Option<Line>,
}

/// Board, win set and history for one game. Status and turn are derived on
/// demand: X always opens, so the side to move follows from the number of
/// applied moves.
#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    board: Board,
    win_set: WinSet,
    history: MoveHistory,
}

impl TicTacToeGameState {
    pub fn new(grid_size: usize) -> Result<Self, GameError> {
        let board = Board::new(grid_size)?;
        Ok(Self {
            board,
            win_set: winning_lines(grid_size),
            history: MoveHistory::new(),
        })
    }

    pub fn grid_size(&self) -> usize {
        self.board.size()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn win_set(&self) -> &WinSet {
        &self.win_set
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn status(&self) -> GameStatus {
        evaluate(&self.board, &self.win_set)
    }

    pub fn winning_line(&self) -> Option<Line> {
        find_winning_line(&self.board, &self.win_set).map(|(_, line)| line.clone())
    }

    pub fn turn_state(&self) -> TurnState {
        let status = self.status();
        if status.is_over() {
            return TurnState::GameOver(status);
        }
        if self.history.applied().len() % 2 == 0 {
            TurnState::XTurn
        } else {
            TurnState::OTurn
        }
    }

    pub fn current_mark(&self) -> Option<Mark> {
        self.turn_state().mark_to_move()
    }

    pub fn place_mark(&mut self, mark: Mark, index: usize) -> Result<MoveOutcome, GameError> {
        let Some(current_mark) = self.current_mark() else {
            return Err(GameError::InvalidMove(InvalidMoveReason::GameOver));
        };

        if mark == Mark::Empty {
            return Err(GameError::InvalidMove(InvalidMoveReason::EmptyMark));
        }

        if mark != current_mark {
            return Err(GameError::InvalidMove(InvalidMoveReason::WrongTurn));
        }

        self.board.place(index, mark)?;
        let mv = Move::new(index, mark);
        self.history.record(mv);

        Ok(self.outcome(mv))
    }

    /// Reverts the last applied move. Allowed after the game has ended.
    pub fn undo(&mut self) -> Result<Move, GameError> {
        let mv = *self.history.last_applied().ok_or(GameError::EmptyHistory)?;
        self.board.clear_cell(mv.index)?;
        self.history.undo()
    }

    pub fn redo(&mut self) -> Result<MoveOutcome, GameError> {
        if self.status().is_over() {
            return Err(GameError::InvalidMove(InvalidMoveReason::GameOver));
        }
        let mv = *self.history.peek_redo().ok_or(GameError::EmptyHistory)?;
        self.board.place(mv.index, mv.mark)?;
        self.history.redo()?;
        Ok(self.outcome(mv))
    }

    pub fn reset(&mut self) {
        self.board.clear();
        self.history.clear();
    }

    /// Starts a fresh game on a grid of `grid_size`, re-deriving the win set
    /// only when the size actually changes.
    pub fn resize(&mut self, grid_size: usize) -> Result<(), GameError> {
        if grid_size == self.grid_size() {
            self.reset();
            return Ok(());
        }
        *self = Self::new(grid_size)?;
        Ok(())
    }

    fn outcome(&self, applied: Move) -> MoveOutcome {
        let status = self.status();
        MoveOutcome {
            applied,
            board: self.board.clone(),
            status,
            winning_line: if status.winner().is_some() {
                self.winning_line()
            } else {
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(state: &mut TicTacToeGameState, moves: &[usize]) {
        for &index in moves {
            let mark = state.current_mark().unwrap();
            state.place_mark(mark, index).unwrap();
        }
    }

    #[test]
    fn test_initial_state_is_x_turn() {
        let state = TicTacToeGameState::new(3).unwrap();
        assert_eq!(state.turn_state(), TurnState::XTurn);
        assert_eq!(state.status(), GameStatus::InProgress);
    }

    #[test]
    fn test_turns_alternate() {
        let mut state = TicTacToeGameState::new(3).unwrap();
        state.place_mark(Mark::X, 4).unwrap();
        assert_eq!(state.turn_state(), TurnState::OTurn);
        state.place_mark(Mark::O, 0).unwrap();
        assert_eq!(state.turn_state(), TurnState::XTurn);
    }

    #[test]
    fn test_wrong_turn_is_rejected_without_change() {
        let mut state = TicTacToeGameState::new(3).unwrap();
        let result = state.place_mark(Mark::O, 4);
        assert_eq!(
            result,
            Err(GameError::InvalidMove(InvalidMoveReason::WrongTurn))
        );
        assert_eq!(state.board(), &Board::new(3).unwrap());
        assert!(state.history().applied().is_empty());
    }

    #[test]
    fn test_occupied_cell_is_rejected_without_change() {
        let mut state = TicTacToeGameState::new(3).unwrap();
        state.place_mark(Mark::X, 4).unwrap();
        let board_before = state.board().clone();

        let result = state.place_mark(Mark::O, 4);

        assert_eq!(
            result,
            Err(GameError::InvalidMove(InvalidMoveReason::CellOccupied))
        );
        assert_eq!(state.board(), &board_before);
        assert_eq!(state.history().applied().len(), 1);
        assert_eq!(state.turn_state(), TurnState::OTurn);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut state = TicTacToeGameState::new(3).unwrap();
        assert_eq!(
            state.place_mark(Mark::X, 42),
            Err(GameError::OutOfRange {
                index: 42,
                cell_count: 9
            })
        );
    }

    #[test]
    fn test_win_reports_line_and_ends_game() {
        let mut state = TicTacToeGameState::new(3).unwrap();
        play(&mut state, &[0, 3, 1, 4]);

        let outcome = state.place_mark(Mark::X, 2).unwrap();

        assert_eq!(outcome.status, GameStatus::Won(Mark::X));
        assert_eq!(outcome.winning_line, Some(vec![0, 1, 2]));
        assert_eq!(outcome.applied, Move::new(2, Mark::X));
        assert_eq!(
            state.turn_state(),
            TurnState::GameOver(GameStatus::Won(Mark::X))
        );
        assert_eq!(
            state.place_mark(Mark::O, 5),
            Err(GameError::InvalidMove(InvalidMoveReason::GameOver))
        );
    }

    #[test]
    fn test_full_board_is_draw() {
        let mut state = TicTacToeGameState::new(3).unwrap();
        play(&mut state, &[0, 1, 2, 4, 3, 5, 7, 6]);
        let outcome = state.place_mark(Mark::X, 8).unwrap();
        assert_eq!(outcome.status, GameStatus::Draw);
        assert_eq!(outcome.winning_line, None);
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut state = TicTacToeGameState::new(3).unwrap();
        play(&mut state, &[4, 0, 8]);
        let board_before = state.board().clone();
        let history_before = state.history().clone();

        let undone = state.undo().unwrap();
        assert_eq!(undone, Move::new(8, Mark::X));
        assert!(state.board().is_empty_at(8));
        assert_eq!(state.turn_state(), TurnState::XTurn);

        state.redo().unwrap();
        assert_eq!(state.board(), &board_before);
        assert_eq!(state.history().applied(), history_before.applied());
        assert_eq!(state.history().undone(), history_before.undone());
    }

    #[test]
    fn test_undo_after_win_reopens_game() {
        let mut state = TicTacToeGameState::new(3).unwrap();
        play(&mut state, &[0, 3, 1, 4, 2]);
        assert!(state.status().is_over());

        state.undo().unwrap();
        assert_eq!(state.turn_state(), TurnState::XTurn);
    }

    #[test]
    fn test_new_move_invalidates_redo() {
        let mut state = TicTacToeGameState::new(3).unwrap();
        play(&mut state, &[4, 0]);
        state.undo().unwrap();
        state.place_mark(Mark::O, 1).unwrap();
        assert_eq!(state.redo(), Err(GameError::EmptyHistory));
    }

    #[test]
    fn test_undo_on_fresh_game_fails() {
        let mut state = TicTacToeGameState::new(3).unwrap();
        assert_eq!(state.undo(), Err(GameError::EmptyHistory));
    }

    #[test]
    fn test_resize_rebuilds_win_set() {
        let mut state = TicTacToeGameState::new(3).unwrap();
        play(&mut state, &[4]);

        state.resize(4).unwrap();

        assert_eq!(state.board().cell_count(), 16);
        assert_eq!(state.win_set().len(), 10);
        assert!(state.history().applied().is_empty());
        assert_eq!(state.turn_state(), TurnState::XTurn);
    }

    #[test]
    fn test_reset_clears_board_and_history() {
        let mut state = TicTacToeGameState::new(3).unwrap();
        play(&mut state, &[4, 0]);
        state.undo().unwrap();

        state.reset();

        assert_eq!(state.board(), &Board::new(3).unwrap());
        assert!(!state.history().can_undo());
        assert!(!state.history().can_redo());
    }
}
