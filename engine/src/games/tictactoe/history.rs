use crate::error::GameError;
use super::types::Move;

/// Undo and redo are stack transfers between `applied` and `undone`; only
/// `record` invalidates the redo side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    applied: Vec<Move>,
    undone: Vec<Move>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, mv: Move) {
        self.applied.push(mv);
        self.undone.clear();
    }

    pub fn undo(&mut self) -> Result<Move, GameError> {
        let mv = self.applied.pop().ok_or(GameError::EmptyHistory)?;
        self.undone.push(mv);
        Ok(mv)
    }

    pub fn redo(&mut self) -> Result<Move, GameError> {
        let mv = self.undone.pop().ok_or(GameError::EmptyHistory)?;
        self.applied.push(mv);
        Ok(mv)
    }

    pub fn peek_redo(&self) -> Option<&Move> {
        self.undone.last()
    }

    pub fn last_applied(&self) -> Option<&Move> {
        self.applied.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.applied.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn applied(&self) -> &[Move] {
        &self.applied
    }

    pub fn undone(&self) -> &[Move] {
        &self.undone
    }

    pub fn clear(&mut self) {
        self.applied.clear();
        self.undone.clear();
    }
}
