// SPDX-License-Identifier: MIT OR Apache-2.0
//! The mutable timeline document: events, selection, playhead, history.
//!
//! All editor state lives here and is threaded through operations by
//! `&mut` — there are no module-level globals. Callers mutate through the
//! public operations and re-render afterwards; the model does no
//! notification of its own.

use crate::event::{
    ErasePicture, EventKind, EventType, MovePicture, RotatePicture, ScreenFlash, ShowPicture,
    ShowText, TimelineEvent, TintPicture, Wait, MAX_PICTURE_NUMBER,
};
use crate::history::{History, Snapshot};
use crate::ordering::sort_events;
use crate::scene::{SceneData, DEFAULT_TIMELINE_LENGTH, SCENE_FORMAT_VERSION};
use tracing::{debug, warn};

/// Frames inserted events push same-lane neighbours to the right.
const INSERT_SHIFT_FRAMES: u32 = 10;

/// The timeline document and everything the editor mutates.
#[derive(Debug, Default)]
pub struct TimelineModel {
    events: Vec<TimelineEvent>,
    selected: Option<usize>,
    current_frame: u32,
    timeline_length: u32,
    insert_order_counter: u64,
    history: History,
    dirty: bool,
    clipboard: Option<TimelineEvent>,
}

impl TimelineModel {
    /// Create an empty timeline
    pub fn new() -> Self {
        Self {
            timeline_length: DEFAULT_TIMELINE_LENGTH,
            ..Self::default()
        }
    }

    /// Get the events in their current array order
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Get the selected event's index
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Get the selected event
    pub fn selected_event(&self) -> Option<&TimelineEvent> {
        self.selected.and_then(|i| self.events.get(i))
    }

    /// Select an event by index; out-of-range clears the selection
    pub fn select_event(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.events.len());
    }

    /// Get the playhead frame
    pub fn current_frame(&self) -> u32 {
        self.current_frame
    }

    /// Move the playhead (not undoable)
    pub fn set_current_frame(&mut self, frame: u32) {
        self.current_frame = frame;
    }

    /// Get the nominal timeline length in frames
    pub fn timeline_length(&self) -> u32 {
        self.timeline_length
    }

    /// Set the nominal timeline length in frames
    pub fn set_timeline_length(&mut self, frames: u32) {
        self.timeline_length = frames;
    }

    /// Last frame covered by any event's rendered interval
    pub fn content_end_frame(&self) -> i64 {
        self.events
            .iter()
            .map(TimelineEvent::end_frame)
            .max()
            .unwrap_or(0)
    }

    /// Whether there are changes since the last save/load
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flag unsaved changes (idempotent)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Clear the unsaved-changes flag (idempotent)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Get the undo/redo history
    pub fn history(&self) -> &History {
        &self.history
    }

    fn next_insert_order(&mut self) -> u64 {
        self.insert_order_counter += 1;
        self.insert_order_counter
    }

    /// Lowest picture slot in 1..=100 not used by a Show Picture event.
    ///
    /// Exhaustion is a soft policy: with all slots taken the first slot is
    /// reused and a warning logged, never an error.
    pub fn next_picture_number(&self) -> i32 {
        let used: Vec<i32> = self
            .events
            .iter()
            .filter_map(|e| match &e.kind {
                EventKind::ShowPicture(p) => Some(p.picture_number),
                _ => None,
            })
            .collect();
        for n in 1..=MAX_PICTURE_NUMBER {
            if !used.contains(&n) {
                return n;
            }
        }
        warn!("all picture numbers (1-{MAX_PICTURE_NUMBER}) in use, reusing #1");
        1
    }

    /// Picture slot of the most recent Show Picture in array order, or 1
    pub fn last_used_picture_number(&self) -> i32 {
        self.events
            .iter()
            .rev()
            .find_map(|e| match &e.kind {
                EventKind::ShowPicture(p) => Some(p.picture_number),
                _ => None,
            })
            .unwrap_or(1)
    }

    /// Build a new event of the given kind at the playhead, with creation
    /// defaults and a fresh insert order.
    pub fn create_default_event(&mut self, event_type: EventType) -> TimelineEvent {
        let kind = match event_type {
            EventType::ShowPicture => EventKind::ShowPicture(ShowPicture {
                picture_number: self.next_picture_number(),
                ..Default::default()
            }),
            EventType::MovePicture => EventKind::MovePicture(MovePicture {
                picture_number: self.last_used_picture_number(),
                ..Default::default()
            }),
            EventType::RotatePicture => EventKind::RotatePicture(RotatePicture {
                picture_number: self.last_used_picture_number(),
                ..Default::default()
            }),
            EventType::TintPicture => EventKind::TintPicture(TintPicture {
                picture_number: self.last_used_picture_number(),
                ..Default::default()
            }),
            EventType::ErasePicture => EventKind::ErasePicture(ErasePicture {
                picture_number: self.last_used_picture_number(),
            }),
            EventType::ShowText => EventKind::ShowText(ShowText::default()),
            EventType::Wait => EventKind::Wait(Wait::default()),
            EventType::ScreenFlash => EventKind::ScreenFlash(ScreenFlash::default()),
        };
        let order = self.next_insert_order();
        TimelineEvent::new(self.current_frame, order, kind)
    }

    /// Add a default event of the given kind at the playhead.
    ///
    /// Existing events in the new event's lane at or after the playhead are
    /// shifted right so the insertion doesn't visually collide with them.
    pub fn add_event(&mut self, event_type: EventType) {
        self.save_state(format!("add {}", event_type.name()));
        let event = self.create_default_event(event_type);
        debug!(kind = event_type.name(), frame = self.current_frame, "add event");

        let insert_frame = self.current_frame;
        let insert_lane = event_type.lane();
        for existing in &mut self.events {
            if existing.lane() == insert_lane && existing.start_frame >= insert_frame {
                existing.start_frame += INSERT_SHIFT_FRAMES;
            }
        }

        self.events.push(event.clone());
        sort_events(&mut self.events);
        self.select_matching(&event);
    }

    /// Add a Show Picture event pre-filled with an image path (drag-drop
    /// from the image browser). No lane shift is applied.
    pub fn add_picture_event(&mut self, image_name: &str) {
        self.save_state("add picture");
        let mut event = self.create_default_event(EventType::ShowPicture);
        if let EventKind::ShowPicture(p) = &mut event.kind {
            p.image_name = image_name.to_string();
        }
        self.events.push(event.clone());
        sort_events(&mut self.events);
        self.select_matching(&event);
    }

    /// Delete the selected event, keeping the selection on its neighbour
    pub fn delete_selected_event(&mut self) {
        let Some(index) = self.selected else { return };
        debug!(index, "delete event");
        self.save_state("delete event");
        self.events.remove(index);
        self.selected = if self.events.is_empty() {
            None
        } else {
            Some(index.min(self.events.len() - 1))
        };
    }

    /// Duplicate the selected event.
    ///
    /// Text duplicates land after the last text event (+10 frames) so
    /// messages never stack; everything else lands one frame after its
    /// original. The copy keeps the original's insert order.
    pub fn duplicate_selected_event(&mut self) {
        let Some(index) = self.selected else { return };
        self.save_state("duplicate");
        let mut duplicate = self.events[index].clone();

        if duplicate.is_text() {
            let last_text_frame = self
                .events
                .iter()
                .filter(|e| e.is_text())
                .map(|e| e.start_frame)
                .max()
                .unwrap_or(self.current_frame);
            duplicate.start_frame = last_text_frame + 10;
        } else {
            duplicate.start_frame = self.events[index].start_frame + 1;
        }

        self.events.push(duplicate.clone());
        sort_events(&mut self.events);
        self.select_matching(&duplicate);
    }

    /// Move an event to a new start frame (timeline drag).
    ///
    /// When a text event ends up within 10 frames of another text event,
    /// the other event is pushed back to the dragged event's original
    /// frame; the text lane renders a single row, so near-coincident
    /// messages would hide one another.
    pub fn move_event(&mut self, index: usize, new_frame: u32) {
        if index >= self.events.len() {
            return;
        }
        self.save_state("move event on timeline");
        self.selected = Some(index);
        let original_frame = self.events[index].start_frame;
        self.events[index].start_frame = new_frame;

        if self.events[index].is_text() {
            let dragged_start = i64::from(new_frame);
            let stacked = self.events.iter_mut().enumerate().find(|(i, e)| {
                *i != index
                    && e.is_text()
                    && (i64::from(e.start_frame) - dragged_start).abs() < 10
            });
            if let Some((_, other)) = stacked {
                other.start_frame = original_frame;
            }
        }

        let moved = self.events[index].clone();
        sort_events(&mut self.events);
        self.select_matching(&moved);
        self.mark_dirty();
    }

    /// Copy the selected event to the clipboard slot
    pub fn copy_selected_event(&mut self) {
        self.clipboard = self.selected_event().cloned();
        if let Some(event) = &self.clipboard {
            debug!(kind = ?event.kind.event_type(), "copied event");
        }
    }

    /// Paste the clipboard event at the playhead.
    ///
    /// A pasted text event that would land at or before the last existing
    /// text event is pushed 10 frames past it instead.
    pub fn paste_event(&mut self) {
        let Some(mut event) = self.clipboard.clone() else { return };
        self.save_state("paste event");
        event.start_frame = self.current_frame;

        if event.is_text() {
            let last_text_frame = self
                .events
                .iter()
                .filter(|e| e.is_text())
                .map(|e| e.start_frame)
                .max();
            if let Some(last) = last_text_frame {
                if event.start_frame <= last {
                    event.start_frame = last + 10;
                }
            }
        }

        self.events.push(event.clone());
        sort_events(&mut self.events);
        self.select_matching(&event);
    }

    /// Remove every event and rewind the playhead (undoable)
    pub fn clear_scene(&mut self) {
        if self.events.is_empty() {
            return;
        }
        self.save_state("clear scene");
        self.events.clear();
        self.selected = None;
        self.current_frame = 0;
    }

    /// Snapshot the current state under an action label, then flag the
    /// document dirty. Called before every mutation so undo restores the
    /// pre-action state.
    pub fn save_state(&mut self, action: impl Into<String>) {
        let snapshot = self.capture(action);
        self.history.record(snapshot);
        self.mark_dirty();
    }

    /// Restore the state before the last recorded action. No-op when the
    /// undo stack is empty. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        let current = self.capture("redo");
        match self.history.undo(current) {
            Some(snapshot) => {
                debug!(action = %snapshot.action, "undo");
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Re-apply the last undone action. No-op when the redo stack is
    /// empty. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        let current = self.capture("undo");
        match self.history.redo(current) {
            Some(snapshot) => {
                debug!("redo");
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Replace the whole document with a loaded scene.
    ///
    /// Re-seeds the insert-order counter past the highest loaded order so
    /// newly created events keep sorting after their same-frame peers, and
    /// starts with fresh history and a clean flag.
    pub fn load_scene(&mut self, scene: SceneData) {
        self.insert_order_counter = scene
            .events
            .iter()
            .map(|e| e.insert_order)
            .max()
            .unwrap_or(0);
        self.events = scene.events;
        self.timeline_length = if scene.timeline_length != 0 {
            scene.timeline_length
        } else {
            DEFAULT_TIMELINE_LENGTH
        };
        self.selected = if self.events.is_empty() { None } else { Some(0) };
        self.current_frame = 0;
        self.clipboard = None;
        self.history.clear();
        self.mark_clean();
    }

    /// Reset to an empty document with fresh history
    pub fn new_scene(&mut self) {
        debug!("new scene");
        self.events.clear();
        self.selected = None;
        self.current_frame = 0;
        self.history.clear();
        self.mark_clean();
    }

    /// Capture the current document as a scene for saving
    pub fn to_scene(&self) -> SceneData {
        SceneData {
            version: SCENE_FORMAT_VERSION,
            timeline_length: self.timeline_length,
            events: self.events.clone(),
        }
    }

    fn capture(&self, action: impl Into<String>) -> Snapshot {
        Snapshot {
            action: action.into(),
            events: self.events.clone(),
            selected: self.selected,
            current_frame: self.current_frame,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.events = snapshot.events;
        self.selected = snapshot.selected;
        self.current_frame = snapshot.current_frame;
    }

    // Re-resolve the selection by identity after a sort. The stable sort
    // keeps the just-pushed event last among fully equal ties, so the last
    // match is always the event we inserted.
    fn select_matching(&mut self, target: &TimelineEvent) {
        self.selected = self.events.iter().rposition(|e| e == target);
    }
}
