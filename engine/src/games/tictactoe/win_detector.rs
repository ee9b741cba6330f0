use super::board::Board;
use super::types::{GameStatus, Mark};

pub type Line = Vec<usize>;

/// All candidate winning lines for one grid size: rows and columns
/// interleaved by index, then the main diagonal and the anti-diagonal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinSet {
    size: usize,
    lines: Vec<Line>,
}

impl WinSet {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

pub fn winning_lines(size: usize) -> WinSet {
    let mut lines = Vec::with_capacity(2 * size + 2);

    for i in 0..size {
        lines.push((0..size).map(|j| i * size + j).collect());
        lines.push((0..size).map(|j| j * size + i).collect());
    }

    lines.push((0..size).map(|i| i * (size + 1)).collect());
    lines.push((0..size).map(|i| (i + 1) * (size - 1)).collect());

    WinSet { size, lines }
}

fn line_owner(board: &Board, line: &[usize]) -> Option<Mark> {
    let first = board.cells()[*line.first()?];
    if first == Mark::Empty {
        return None;
    }
    line.iter()
        .all(|&index| board.cells()[index] == first)
        .then_some(first)
}

pub fn find_winning_line<'a>(board: &Board, win_set: &'a WinSet) -> Option<(Mark, &'a Line)> {
    assert_eq!(
        board.size(),
        win_set.size(),
        "board and win set disagree on grid size"
    );

    win_set
        .lines
        .iter()
        .find_map(|line| line_owner(board, line).map(|mark| (mark, line)))
}

pub fn check_win(board: &Board, win_set: &WinSet) -> Option<Mark> {
    find_winning_line(board, win_set).map(|(mark, _)| mark)
}

pub fn evaluate(board: &Board, win_set: &WinSet) -> GameStatus {
    if let Some(winner) = check_win(board, win_set) {
        return GameStatus::Won(winner);
    }
    if board.is_full() {
        return GameStatus::Draw;
    }
    GameStatus::InProgress
}
