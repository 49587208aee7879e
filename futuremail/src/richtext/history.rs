//! Snapshot undo/redo history

use std::collections::VecDeque;

/// Default number of snapshots kept for undo
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Bounded undo/redo stacks of whole-value snapshots
#[derive(Debug, Clone)]
pub struct History<T> {
    undo: VecDeque<T>,
    redo: Vec<T>,
    limit: usize,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl<T> History<T> {
    /// History keeping at most `limit` undo steps
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Remember the state before a mutation; drops any redo steps
    pub fn record(&mut self, before: T) {
        if self.undo.len() == self.limit {
            self.undo.pop_front();
        }
        self.undo.push_back(before);
        self.redo.clear();
    }

    /// Step back, trading `current` for the previous snapshot
    pub fn undo(&mut self, current: T) -> Result<T, T> {
        match self.undo.pop_back() {
            Some(previous) => {
                self.redo.push(current);
                Ok(previous)
            }
            None => Err(current),
        }
    }

    /// Step forward again after an undo
    pub fn redo(&mut self, current: T) -> Result<T, T> {
        match self.redo.pop() {
            Some(next) => {
                self.undo.push_back(current);
                Ok(next)
            }
            None => Err(current),
        }
    }

    /// Whether an undo step is available
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether a redo step is available
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
