use serde::{Deserialize, Serialize};

use crate::error::{GameError, InvalidMoveReason};
use crate::games::SessionRng;
use super::board::Board;
use super::settings::Difficulty;
use super::types::Mark;
use super::win_detector::{WinSet, check_win};

/// Caps the number of positions one search may visit. `None` searches the
/// whole tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchBudget {
    pub max_nodes: Option<u64>,
}

impl SearchBudget {
    pub fn unlimited() -> Self {
        Self { max_nodes: None }
    }

    pub fn nodes(max_nodes: u64) -> Self {
        Self {
            max_nodes: Some(max_nodes),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub index: usize,
    pub score: i32,
    pub nodes: u64,
}

pub fn calculate_move(
    difficulty: Difficulty,
    board: &Board,
    win_set: &WinSet,
    bot_mark: Mark,
    budget: SearchBudget,
    rng: &mut SessionRng,
) -> Result<usize, GameError> {
    match difficulty {
        Difficulty::Easy => calculate_random_move(board, rng),
        Difficulty::Hard => best_move_for(board, win_set, bot_mark, budget),
    }
}

pub fn calculate_random_move(board: &Board, rng: &mut SessionRng) -> Result<usize, GameError> {
    let available_moves = board.available_moves();
    if available_moves.is_empty() {
        return Err(GameError::SearchPrecondition);
    }
    let idx = rng.random_range(0..available_moves.len());
    Ok(available_moves[idx])
}

/// Optimal reply for O, the computer side.
pub fn best_move(board: &Board, win_set: &WinSet, budget: SearchBudget) -> Result<usize, GameError> {
    best_move_for(board, win_set, Mark::O, budget)
}

pub fn best_move_for(
    board: &Board,
    win_set: &WinSet,
    bot_mark: Mark,
    budget: SearchBudget,
) -> Result<usize, GameError> {
    search(board, win_set, bot_mark, budget).map(|result| result.index)
}

/// Tries every empty cell in ascending order and keeps the first one with the
/// highest minimax score.
pub fn search(
    board: &Board,
    win_set: &WinSet,
    bot_mark: Mark,
    budget: SearchBudget,
) -> Result<SearchResult, GameError> {
    let mut searcher = Searcher::new(win_set, bot_mark, board.cell_count(), budget)?;
    let available_moves = board.available_moves();
    if available_moves.is_empty() {
        return Err(GameError::SearchPrecondition);
    }

    let mut board = board.clone();
    let mut best: Option<(usize, i32)> = None;

    for index in available_moves {
        let alpha = best.map_or(i32::MIN, |(_, score)| score);

        board.set(index, bot_mark);
        let score = searcher.minimax(&mut board, 0, false, alpha, i32::MAX);
        board.set(index, Mark::Empty);
        let score = score?;

        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }

    let (index, score) = best.ok_or(GameError::SearchPrecondition)?;
    Ok(SearchResult {
        index,
        score,
        nodes: searcher.nodes,
    })
}

/// Scores `board` from O's point of view: an O win at `depth` is worth
/// `cells + 1 - depth`, an X win the negation, a full board zero. On 3x3 that
/// is the familiar `10 - depth`.
pub fn minimax(
    board: &mut Board,
    win_set: &WinSet,
    depth: i32,
    is_maximizing: bool,
) -> Result<i32, GameError> {
    let mut searcher = Searcher::new(
        win_set,
        Mark::O,
        board.cell_count(),
        SearchBudget::unlimited(),
    )?;
    searcher.minimax(board, depth, is_maximizing, i32::MIN, i32::MAX)
}

struct Searcher<'a> {
    win_set: &'a WinSet,
    bot_mark: Mark,
    opponent_mark: Mark,
    win_score: i32,
    nodes: u64,
    max_nodes: Option<u64>,
}

impl<'a> Searcher<'a> {
    fn new(
        win_set: &'a WinSet,
        bot_mark: Mark,
        cell_count: usize,
        budget: SearchBudget,
    ) -> Result<Self, GameError> {
        let opponent_mark = bot_mark
            .opponent()
            .ok_or(GameError::InvalidMove(InvalidMoveReason::EmptyMark))?;
        Ok(Self {
            win_set,
            bot_mark,
            opponent_mark,
            win_score: cell_count as i32 + 1,
            nodes: 0,
            max_nodes: budget.max_nodes,
        })
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        depth: i32,
        is_maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> Result<i32, GameError> {
        self.nodes += 1;
        if let Some(max_nodes) = self.max_nodes
            && self.nodes > max_nodes
        {
            return Err(GameError::SearchTimeout { nodes: self.nodes });
        }

        if let Some(winner) = check_win(board, self.win_set) {
            return Ok(if winner == self.bot_mark {
                self.win_score - depth
            } else {
                depth - self.win_score
            });
        }

        let moves = board.available_moves();
        if moves.is_empty() {
            return Ok(0);
        }

        if is_maximizing {
            let mut max_eval = i32::MIN;
            for index in moves {
                board.set(index, self.bot_mark);
                let eval = self.minimax(board, depth + 1, false, alpha, beta);
                board.set(index, Mark::Empty);
                let eval = eval?;

                max_eval = max_eval.max(eval);
                alpha = alpha.max(eval);
                if beta <= alpha {
                    break;
                }
            }
            Ok(max_eval)
        } else {
            let mut min_eval = i32::MAX;
            for index in moves {
                board.set(index, self.opponent_mark);
                let eval = self.minimax(board, depth + 1, true, alpha, beta);
                board.set(index, Mark::Empty);
                let eval = eval?;

                min_eval = min_eval.min(eval);
                beta = beta.min(eval);
                if beta <= alpha {
                    break;
                }
            }
            Ok(min_eval)
        }
    }
}
