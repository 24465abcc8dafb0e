// SPDX-License-Identifier: MIT OR Apache-2.0
//! Preview playback over the timeline.
//!
//! The controller is driven by an external fixed-period timer; each tick
//! advances the playhead one frame. Text events gate playback: the playhead
//! parks on the message until the viewer acknowledges it, and each message
//! fires once per pass. Past the last rendered frame the playhead wraps to
//! the start.

use crate::model::TimelineModel;
use std::collections::HashSet;

/// Playback state machine for scene preview.
#[derive(Debug, Default)]
pub struct PlaybackController {
    playing: bool,
    waiting_for_text: bool,
    // messages already shown this pass, by insert order
    processed_text: HashSet<u64>,
}

impl PlaybackController {
    /// Create a stopped controller
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether playback is running
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether playback is parked on a text event
    pub fn is_waiting_for_text(&self) -> bool {
        self.waiting_for_text
    }

    /// Start playing from the current playhead.
    ///
    /// A text event sitting exactly on the playhead gates playback
    /// immediately, before the first tick.
    pub fn play(&mut self, model: &TimelineModel) {
        self.playing = true;
        self.waiting_for_text = false;
        self.processed_text.clear();
        if let Some(order) = self.pending_text_at(model, model.current_frame()) {
            self.waiting_for_text = true;
            self.processed_text.insert(order);
        }
    }

    /// Pause, keeping the playhead where it is
    pub fn pause(&mut self) {
        self.playing = false;
        self.waiting_for_text = false;
    }

    /// Stop and rewind the playhead to frame 0
    pub fn stop(&mut self, model: &mut TimelineModel) {
        self.pause();
        model.set_current_frame(0);
        self.processed_text.clear();
    }

    /// Toggle between playing and paused
    pub fn toggle(&mut self, model: &TimelineModel) {
        if self.playing {
            self.pause();
        } else {
            self.play(model);
        }
    }

    /// Release a text gate so the next tick advances again
    pub fn acknowledge_text(&mut self) {
        if self.waiting_for_text && self.playing {
            self.waiting_for_text = false;
        }
    }

    /// Advance one frame. Returns whether the playhead moved.
    pub fn tick(&mut self, model: &mut TimelineModel) -> bool {
        if !self.playing || self.waiting_for_text {
            return false;
        }

        let frame = model.current_frame() + 1;
        model.set_current_frame(frame);

        if let Some(order) = self.pending_text_at(model, frame) {
            self.waiting_for_text = true;
            self.processed_text.insert(order);
            return true;
        }

        if i64::from(frame) > model.content_end_frame() {
            model.set_current_frame(0);
            self.processed_text.clear();
            if let Some(order) = self.pending_text_at(model, 0) {
                self.waiting_for_text = true;
                self.processed_text.insert(order);
            }
        }

        true
    }

    fn pending_text_at(&self, model: &TimelineModel, frame: u32) -> Option<u64> {
        model
            .events()
            .iter()
            .find(|e| {
                e.is_text() && e.start_frame == frame && !self.processed_text.contains(&e.insert_order)
            })
            .map(|e| e.insert_order)
    }
}
