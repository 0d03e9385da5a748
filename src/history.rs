//! Undo history.
//!
//! The console pushes the position before every move. Undoing `n` moves pops
//! `n` positions and returns the oldest one popped, which becomes the current
//! position again.

use crate::board::BoardState;
use crate::error::{GameError, Result};

#[derive(Clone, Debug, Default)]
pub struct History {
    stack: Vec<BoardState>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the position before a move.
    pub fn push(&mut self, state: BoardState) {
        self.stack.push(state);
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// Undo up to `n` moves and return the position to restore.
    ///
    /// If fewer than `n` positions are stored, everything is undone.
    ///
    /// # Errors
    /// - [`GameError::Parse`] if `n` is zero
    /// - [`GameError::NothingToUndo`] if the history is empty
    pub fn undo(&mut self, n: usize) -> Result<BoardState> {
        if n == 0 {
            return Err(GameError::Parse("undo count must be positive".to_string()));
        }
        let keep = self.stack.len().saturating_sub(n);
        self.stack.drain(keep..).next().ok_or(GameError::NothingToUndo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PlayerId;
    use crate::movegen::{Rules, legal_moves};

    fn line_of_play(len: usize) -> Vec<BoardState> {
        let mut states = vec![BoardState::default()];
        for _ in 0..len {
            let state = *states.last().unwrap();
            let mv = legal_moves(&state, state.turn(), Rules::default())[0];
            states.push(state.apply(&mv).unwrap());
        }
        states
    }

    #[test]
    fn test_undo_one() {
        let states = line_of_play(2);
        let mut history = History::new();
        history.push(states[0]);
        history.push(states[1]);
        assert_eq!(history.undo(1).unwrap(), states[1]);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_undo_several() {
        let states = line_of_play(3);
        let mut history = History::new();
        for s in &states[..3] {
            history.push(*s);
        }
        let restored = history.undo(2).unwrap();
        assert_eq!(restored, states[1]);
        assert_eq!(restored.turn(), PlayerId::Player2);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_undo_more_than_stored() {
        let states = line_of_play(2);
        let mut history = History::new();
        history.push(states[0]);
        history.push(states[1]);
        assert_eq!(history.undo(5).unwrap(), states[0]);
        assert!(history.is_empty());
    }

    #[test]
    fn test_undo_errors() {
        let mut history = History::new();
        assert_eq!(history.undo(1), Err(GameError::NothingToUndo));
        history.push(BoardState::default());
        assert!(matches!(history.undo(0), Err(GameError::Parse(_))));
        assert_eq!(history.len(), 1);
    }
}
