// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline model for MZ Scene Studio.
//!
//! This crate provides the scene-editing core:
//! - Typed timeline events with lane/duration classification
//! - Deterministic multi-key event ordering
//! - Sub-row packing of overlapping events for rendering
//! - The mutable timeline document with snapshot-based undo/redo
//! - Scene file (de)serialization
//! - Preview playback control
//!
//! ## Architecture
//!
//! Everything here is synchronous, in-memory state transition. Rendering,
//! file dialogs and engine execution are collaborators that call into the
//! [`model::TimelineModel`] and read the derived layouts back out.

pub mod event;
pub mod history;
pub mod model;
pub mod ordering;
pub mod packing;
pub mod playback;
pub mod scene;

pub use event::{
    ErasePicture, EventKind, EventType, Lane, MovePicture, RotatePicture, ScreenFlash,
    ShowPicture, ShowText, TimelineEvent, TintPicture, Wait, MAX_PICTURE_NUMBER,
};
pub use history::{History, Snapshot, MAX_UNDO_STACK};
pub use model::TimelineModel;
pub use ordering::{compare_events, sort_events};
pub use packing::{pack_events, Placement, TimelineLayout, LANE_HEIGHT};
pub use playback::PlaybackController;
pub use scene::{SceneData, SceneError, DEFAULT_TIMELINE_LENGTH, SCENE_FORMAT_VERSION};
