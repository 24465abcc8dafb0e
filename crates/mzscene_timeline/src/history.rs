// SPDX-License-Identifier: MIT OR Apache-2.0
//! Bounded undo/redo log of whole-timeline snapshots.
//!
//! Every mutating model operation captures a deep copy of the timeline
//! state before it runs. Undo and redo swap whole snapshots; the log never
//! stores diffs.

use crate::event::TimelineEvent;
use std::collections::VecDeque;

/// Maximum undo history depth.
pub const MAX_UNDO_STACK: usize = 50;

/// Deep copy of the timeline state at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Human-readable action label ("add showPicture", "delete event", ...)
    pub action: String,
    /// Events at snapshot time
    pub events: Vec<TimelineEvent>,
    /// Selection at snapshot time
    pub selected: Option<usize>,
    /// Playhead at snapshot time
    pub current_frame: u32,
}

/// Undo/redo stacks.
///
/// The undo stack is capped at [`MAX_UNDO_STACK`] with FIFO eviction; the
/// redo stack is unbounded but cleared whenever a new action is recorded.
#[derive(Debug, Default)]
pub struct History {
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
}

impl History {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a snapshot taken before a new action.
    ///
    /// Invalidates the redo stack (linear history) and evicts the oldest
    /// snapshot past the depth cap.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.undo.push_back(snapshot);
        while self.undo.len() > MAX_UNDO_STACK {
            self.undo.pop_front();
        }
        self.redo.clear();
    }

    /// Pop the most recent undo snapshot, parking `current` on the redo
    /// stack. Returns `None` (and drops `current`) when there is nothing
    /// to undo.
    pub fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Pop the most recent redo snapshot, parking `current` on the undo
    /// stack. Returns `None` when there is nothing to redo.
    pub fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo.pop()?;
        self.undo.push_back(current);
        Some(next)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Get undo stack depth
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Get redo stack depth
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Get the label of the action the next undo would revert
    pub fn undo_action(&self) -> Option<&str> {
        self.undo.back().map(|s| s.action.as_str())
    }

    /// Drop all history
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
