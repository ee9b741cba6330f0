mod board;
mod bot_controller;
mod game_state;
mod history;
mod session;
mod settings;
mod types;
mod win_detector;

pub use board::Board;
pub use bot_controller::{
    SearchBudget, SearchResult, best_move, best_move_for, calculate_move, calculate_random_move,
    minimax, search,
};
pub use game_state::{MoveOutcome, TicTacToeGameState};
pub use history::MoveHistory;
pub use session::TicTacToeSession;
pub use settings::{DEFAULT_SEARCH_NODE_BUDGET, Difficulty, GameMode, SessionSettings};
pub use types::{GameStatus, Mark, Move, TurnState};
pub use win_detector::{Line, WinSet, check_win, evaluate, find_winning_line, winning_lines};
