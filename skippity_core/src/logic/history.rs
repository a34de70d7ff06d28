use crate::engine::Move;
use serde::{Deserialize, Serialize};

/// A stack of moves that refuses pushes beyond its capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStack {
    moves: Vec<Move>,
    capacity: usize,
}

impl MoveStack {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            moves: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns `false` (and drops the move) when the stack is full.
    pub fn push(&mut self, mv: Move) -> bool {
        if self.is_full() {
            log::warn!("move stack full ({} entries), dropping {mv:?}", self.capacity);
            return false;
        }
        self.moves.push(mv);
        true
    }

    pub fn pop(&mut self) -> Option<Move> {
        self.moves.pop()
    }

    pub fn peek(&self) -> Option<&Move> {
        self.moves.last()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.moves.len() >= self.capacity
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves.iter()
    }
}

/// One player's linear undo/redo history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLog {
    undo: MoveStack,
    redo: MoveStack,
}

impl MoveLog {
    /// A log sized for a `board_size` x `board_size` board; no game can hold
    /// more captures than cells.
    #[must_use]
    pub fn for_board(board_size: usize) -> Self {
        let capacity = board_size * board_size;
        Self {
            undo: MoveStack::new(capacity),
            redo: MoveStack::new(capacity),
        }
    }

    /// Records a freshly committed move. New moves invalidate redo history.
    pub fn record(&mut self, mv: Move) {
        self.undo.push(mv);
        self.redo.clear();
    }

    /// Moves the latest move onto the redo stack and returns it.
    pub fn take_undo(&mut self) -> Option<Move> {
        let mv = self.undo.pop()?;
        self.redo.push(mv);
        Some(mv)
    }

    /// Moves the latest undone move back onto the undo stack and returns it.
    pub fn take_redo(&mut self) -> Option<Move> {
        let mv = self.redo.pop()?;
        self.undo.push(mv);
        Some(mv)
    }

    pub const fn undo_stack(&self) -> &MoveStack {
        &self.undo
    }

    pub const fn redo_stack(&self) -> &MoveStack {
        &self.redo
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
