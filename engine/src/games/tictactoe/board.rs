use std::fmt;

use crate::error::{GameError, InvalidMoveReason};
use super::types::Mark;

/// Square grid stored row-major; cell `index` sits at row `index / size`,
/// column `index % size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Mark>,
    size: usize,
}

impl Board {
    pub fn new(size: usize) -> Result<Self, GameError> {
        if size < 1 {
            return Err(GameError::InvalidGridSize(size));
        }
        Ok(Self {
            cells: vec![Mark::Empty; size * size],
            size,
        })
    }

    /// Rebuilds a board from a row-major snapshot; the cell count must be a
    /// non-zero perfect square.
    pub fn from_cells(cells: Vec<Mark>) -> Result<Self, GameError> {
        let size = cells.len().isqrt();
        if size == 0 || size * size != cells.len() {
            return Err(GameError::InvalidGridSize(cells.len()));
        }
        Ok(Self { cells, size })
    }

    #[cfg(test)]
    pub(crate) fn from_pattern(pattern: &str) -> Self {
        let cells: Vec<Mark> = pattern
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| match c {
                'X' => Mark::X,
                'O' => Mark::O,
                _ => Mark::Empty,
            })
            .collect();
        Self::from_cells(cells).expect("pattern must describe a square board")
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Mark] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        self.get(index) == Some(Mark::Empty)
    }

    /// Rejects without touching the board: `OutOfRange` for a bad index,
    /// `InvalidMove` for an occupied cell or an empty mark.
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), GameError> {
        self.check_index(index)?;
        if mark == Mark::Empty {
            return Err(GameError::InvalidMove(InvalidMoveReason::EmptyMark));
        }
        if self.cells[index] != Mark::Empty {
            return Err(GameError::InvalidMove(InvalidMoveReason::CellOccupied));
        }
        self.cells[index] = mark;
        Ok(())
    }

    pub fn clear_cell(&mut self, index: usize) -> Result<(), GameError> {
        self.check_index(index)?;
        self.cells[index] = Mark::Empty;
        Ok(())
    }

    pub(crate) fn set(&mut self, index: usize, mark: Mark) {
        self.cells[index] = mark;
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    pub fn clear(&mut self) {
        self.cells.fill(Mark::Empty);
    }

    pub fn available_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Mark::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    fn check_index(&self, index: usize) -> Result<(), GameError> {
        if index >= self.cells.len() {
            return Err(GameError::OutOfRange {
                index,
                cell_count: self.cells.len(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_index, row) in self.cells.chunks(self.size).enumerate() {
            if row_index > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(|mark| mark.symbol().to_string()).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
