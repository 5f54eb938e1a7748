//! Move batches and the pending/undo bookkeeping that plays them.
//!
//! A [`MoveSetSequence`] is a queue of batches still to play plus a stack of
//! batches already played. [`MoveSetSequence::pop`] moves the head of the
//! queue onto the stack; [`MoveSetSequence::undo`] moves it back and hands out
//! a reversed copy for animation, leaving the stored batch untouched so it can
//! be replayed.

mod move_set;

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

pub use move_set::MoveSet;

/// Pending queue and undo stack of [`MoveSet`]s with progress counters.
///
/// `remaining() + current() == total()` holds after every call.
#[derive(Debug, Clone, Default)]
pub struct MoveSetSequence {
    pending: VecDeque<Arc<MoveSet>>,
    undo_stack: Vec<Arc<MoveSet>>,
    total_move_sets: usize,
    total_checkpoints: usize,
    current_checkpoint: usize,
}

impl MoveSetSequence {
    /// Sequence that will play `move_sets` in order.
    #[must_use]
    pub fn new(move_sets: Vec<MoveSet>) -> Self {
        let total_checkpoints = move_sets.iter().filter(|s| s.checkpoint).count();
        let pending: VecDeque<Arc<MoveSet>> = move_sets.into_iter().map(Arc::new).collect();
        Self {
            total_move_sets: pending.len(),
            pending,
            undo_stack: Vec::new(),
            total_checkpoints,
            current_checkpoint: 0,
        }
    }

    /// Take the next batch to play forward.
    ///
    /// Returns `None` (and changes nothing) when every batch has been played.
    pub fn pop(&mut self) -> Option<Arc<MoveSet>> {
        let move_set = self.pending.pop_front()?;
        if move_set.checkpoint {
            self.current_checkpoint += 1;
        }
        self.undo_stack.push(Arc::clone(&move_set));
        log::debug!("pop: {self}");
        Some(move_set)
    }

    /// Step back over the most recently played batch.
    ///
    /// The stored batch returns to the head of the queue; the returned value
    /// is a fresh reversed copy to animate. Returns `None` when nothing has
    /// been played.
    pub fn undo(&mut self) -> Option<Arc<MoveSet>> {
        let move_set = self.undo_stack.pop()?;
        if move_set.checkpoint {
            self.current_checkpoint -= 1;
        }
        let reversed = Arc::new(move_set.reverse());
        self.pending.push_front(move_set);
        log::debug!("undo: {self}");
        Some(reversed)
    }

    /// Next batch [`MoveSetSequence::pop`] would return.
    #[must_use]
    pub fn peek_next(&self) -> Option<&Arc<MoveSet>> {
        self.pending.front()
    }

    /// Batch [`MoveSetSequence::undo`] would step back over (unreversed).
    #[must_use]
    pub fn peek_last(&self) -> Option<&Arc<MoveSet>> {
        self.undo_stack.last()
    }

    /// Total number of batches.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total_move_sets
    }

    /// Batches still to play.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }

    /// Batches already played.
    #[must_use]
    pub fn current(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of checkpoint batches.
    #[must_use]
    pub fn total_checkpoints(&self) -> usize {
        self.total_checkpoints
    }

    /// Checkpoint batches already played.
    #[must_use]
    pub fn current_checkpoint(&self) -> usize {
        self.current_checkpoint
    }

    /// Whether every batch has been played.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.pending.is_empty()
    }

    /// Progress over checkpoints, e.g. `Move #2 / #5`.
    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("Move #{} / #{}", self.current_checkpoint, self.total_checkpoints)
    }
}

impl fmt::Display for MoveSetSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} move sets, checkpoint {} of {}",
            self.current(),
            self.total_move_sets,
            self.current_checkpoint,
            self.total_checkpoints
        )
    }
}
