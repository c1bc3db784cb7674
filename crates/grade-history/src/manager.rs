//! Per-image undo/redo stacks.

use grade_core::ImageIdent;
use grade_model::AdjustmentRecord;
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Maximum entries kept per stack; the oldest are evicted first.
pub const MAX_ENTRIES: usize = 50;

#[derive(Debug, Default)]
struct Stacks {
    undo: VecDeque<AdjustmentRecord>,
    redo: Vec<AdjustmentRecord>,
}

/// Bounded undo/redo history, scoped by image identity.
///
/// All mutation is expected to come from a single logical owner per image
/// (the scheduler); the manager itself does no locking.
#[derive(Debug, Default)]
pub struct HistoryManager {
    states: HashMap<ImageIdent, Stacks>,
}

impl HistoryManager {
    /// Creates an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `snapshot` (the state prior to a committed mutation).
    ///
    /// Truncates the undo stack to the most recent [`MAX_ENTRIES`] and
    /// clears the redo stack - committing new work forfeits the redo
    /// branch.
    pub fn push(&mut self, id: &ImageIdent, snapshot: AdjustmentRecord) {
        let stacks = self.states.entry(id.clone()).or_default();
        stacks.undo.push_back(snapshot);
        while stacks.undo.len() > MAX_ENTRIES {
            stacks.undo.pop_front();
        }
        stacks.redo.clear();
    }

    /// Steps back one entry.
    ///
    /// `current` is the caller's present record; it moves onto the redo
    /// stack and the most recent undo snapshot is returned. `None` when
    /// there is nothing to undo.
    pub fn undo(
        &mut self,
        id: &ImageIdent,
        current: &AdjustmentRecord,
    ) -> Option<AdjustmentRecord> {
        let stacks = self.states.get_mut(id)?;
        let restored = stacks.undo.pop_back()?;
        stacks.redo.push(*current);
        while stacks.redo.len() > MAX_ENTRIES {
            stacks.redo.remove(0);
        }
        debug!(image = %id, "undo");
        Some(restored)
    }

    /// Steps forward one entry; the mirror of [`undo`](Self::undo).
    pub fn redo(
        &mut self,
        id: &ImageIdent,
        current: &AdjustmentRecord,
    ) -> Option<AdjustmentRecord> {
        let stacks = self.states.get_mut(id)?;
        let restored = stacks.redo.pop()?;
        stacks.undo.push_back(*current);
        while stacks.undo.len() > MAX_ENTRIES {
            stacks.undo.pop_front();
        }
        debug!(image = %id, "redo");
        Some(restored)
    }

    /// Number of undo entries held for `id`.
    pub fn undo_len(&self, id: &ImageIdent) -> usize {
        self.states.get(id).map_or(0, |s| s.undo.len())
    }

    /// Number of redo entries held for `id`.
    pub fn redo_len(&self, id: &ImageIdent) -> usize {
        self.states.get(id).map_or(0, |s| s.redo.len())
    }

    /// Snapshot of both stacks (oldest first) for persistence.
    pub fn stacks(&self, id: &ImageIdent) -> (Vec<AdjustmentRecord>, Vec<AdjustmentRecord>) {
        match self.states.get(id) {
            Some(s) => (s.undo.iter().copied().collect(), s.redo.clone()),
            None => (Vec::new(), Vec::new()),
        }
    }

    /// Replaces the stacks for `id`, e.g. with freshly loaded state.
    pub fn restore(
        &mut self,
        id: &ImageIdent,
        undo: Vec<AdjustmentRecord>,
        redo: Vec<AdjustmentRecord>,
    ) {
        let mut stacks = Stacks {
            undo: undo.into(),
            redo,
        };
        while stacks.undo.len() > MAX_ENTRIES {
            stacks.undo.pop_front();
        }
        stacks.redo.truncate(MAX_ENTRIES);
        self.states.insert(id.clone(), stacks);
    }
}
