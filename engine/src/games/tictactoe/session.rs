use crate::config::Validate;
use crate::error::{GameError, InvalidMoveReason};
use crate::games::SessionRng;
use crate::log;
use super::bot_controller::{calculate_move, calculate_random_move};
use super::game_state::{MoveOutcome, TicTacToeGameState};
use super::settings::{GameMode, SessionSettings};
use super::types::{Mark, Move, TurnState};

/// One independent game context: settings, rules state and the RNG used by
/// the easy bot. Hosts keep one per game; nothing is shared between sessions.
pub struct TicTacToeSession {
    session_id: String,
    settings: SessionSettings,
    game_state: TicTacToeGameState,
    rng: SessionRng,
}

impl TicTacToeSession {
    pub fn new(
        session_id: impl Into<String>,
        settings: SessionSettings,
        rng: SessionRng,
    ) -> Result<Self, GameError> {
        settings.validate().map_err(GameError::InvalidSettings)?;
        let game_state = TicTacToeGameState::new(settings.grid_size)?;
        let session_id = session_id.into();

        log!(
            "[session:{}] Started {:?} game on {}x{} ({:?}, seed {})",
            session_id,
            settings.mode,
            settings.grid_size,
            settings.grid_size,
            settings.difficulty,
            rng.seed()
        );

        Ok(Self {
            session_id,
            settings,
            game_state,
            rng,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn game_state(&self) -> &TicTacToeGameState {
        &self.game_state
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn turn_state(&self) -> TurnState {
        self.game_state.turn_state()
    }

    /// The computer always plays O in single mode.
    pub fn bot_mark(&self) -> Option<Mark> {
        match self.settings.mode {
            GameMode::Single => Some(Mark::O),
            GameMode::Multi => None,
        }
    }

    pub fn is_bot_turn(&self) -> bool {
        self.bot_mark().is_some() && self.game_state.current_mark() == self.bot_mark()
    }

    /// Applies a human move without triggering the bot, for hosts that
    /// schedule `play_bot_turn` themselves.
    pub fn place_mark(&mut self, mark: Mark, index: usize) -> Result<MoveOutcome, GameError> {
        if self.bot_mark() == Some(mark) {
            return Err(GameError::InvalidMove(InvalidMoveReason::WrongTurn));
        }

        match self.game_state.place_mark(mark, index) {
            Ok(outcome) => {
                if outcome.status.is_over() {
                    log!(
                        "[session:{}] Game over after {} at {}: {:?}",
                        self.session_id,
                        mark,
                        index,
                        outcome.status
                    );
                }
                Ok(outcome)
            }
            Err(e) => {
                log!(
                    "[session:{}] Rejected {} at {}: {}",
                    self.session_id,
                    mark,
                    index,
                    e
                );
                Err(e)
            }
        }
    }

    /// Applies a human move and, in single mode, the bot's reply.
    pub fn play_turn(&mut self, mark: Mark, index: usize) -> Result<Vec<MoveOutcome>, GameError> {
        let mut outcomes = vec![self.place_mark(mark, index)?];
        if self.is_bot_turn() {
            outcomes.push(self.play_bot_turn()?);
        }
        Ok(outcomes)
    }

    pub fn play_bot_turn(&mut self) -> Result<MoveOutcome, GameError> {
        let Some(bot_mark) = self.bot_mark() else {
            return Err(GameError::InvalidMove(InvalidMoveReason::NoBotOpponent));
        };
        if !self.is_bot_turn() {
            return Err(GameError::InvalidMove(match self.turn_state() {
                TurnState::GameOver(_) => InvalidMoveReason::GameOver,
                _ => InvalidMoveReason::WrongTurn,
            }));
        }

        let index = self.suggest_move()?;
        log!(
            "[session:{}] Bot {} plays {}",
            self.session_id,
            bot_mark,
            index
        );
        self.game_state.place_mark(bot_mark, index)
    }

    /// Picks a move for whichever side is to move using the configured
    /// difficulty. A search that runs out of budget falls back to a random
    /// empty cell.
    pub fn suggest_move(&mut self) -> Result<usize, GameError> {
        let Some(mark) = self.game_state.current_mark() else {
            return Err(GameError::InvalidMove(InvalidMoveReason::GameOver));
        };

        let result = calculate_move(
            self.settings.difficulty,
            self.game_state.board(),
            self.game_state.win_set(),
            mark,
            self.settings.search_budget(),
            &mut self.rng,
        );

        match result {
            Err(GameError::SearchTimeout { nodes }) => {
                log!(
                    "[session:{}] Search for {} gave up after {} nodes, choosing randomly",
                    self.session_id,
                    mark,
                    nodes
                );
                calculate_random_move(self.game_state.board(), &mut self.rng)
            }
            other => other,
        }
    }

    /// In single mode keeps undoing until the human (X) is to move again, so
    /// the bot's reply and the move it answered disappear together.
    pub fn undo(&mut self) -> Result<Vec<Move>, GameError> {
        let mut undone = vec![self.game_state.undo()?];
        while self.is_bot_turn() && self.game_state.history().can_undo() {
            undone.push(self.game_state.undo()?);
        }
        Ok(undone)
    }

    pub fn redo(&mut self) -> Result<Vec<MoveOutcome>, GameError> {
        let mut redone = vec![self.game_state.redo()?];
        while self.is_bot_turn() && self.game_state.history().can_redo() {
            redone.push(self.game_state.redo()?);
        }
        Ok(redone)
    }

    pub fn reset(&mut self) {
        self.game_state.reset();
        log!("[session:{}] Reset", self.session_id);
    }

    /// Applies new settings and starts a fresh game. The board and win set
    /// are rebuilt when the grid size changes.
    pub fn reconfigure(&mut self, settings: SessionSettings) -> Result<(), GameError> {
        settings.validate().map_err(GameError::InvalidSettings)?;
        self.game_state.resize(settings.grid_size)?;
        self.settings = settings;
        log!(
            "[session:{}] Reconfigured to {:?} {:?} on {}x{}",
            self.session_id,
            self.settings.mode,
            self.settings.difficulty,
            self.settings.grid_size,
            self.settings.grid_size
        );
        Ok(())
    }
}
