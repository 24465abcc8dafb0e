// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline event types and the lane/duration classification rules.

use serde::{Deserialize, Serialize};

/// Highest picture slot number the engine supports.
pub const MAX_PICTURE_NUMBER: i32 = 100;

/// Visual/semantic track an event belongs to, derived from its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    /// Picture manipulation (show/move/rotate/erase)
    Pictures,
    /// Screen effects and waits
    Effects,
    /// Message text
    Text,
}

impl Lane {
    /// Number of lanes on the timeline
    pub const COUNT: usize = 3;

    /// Get all lanes in display order
    pub fn all() -> &'static [Lane] {
        &[Lane::Pictures, Lane::Effects, Lane::Text]
    }

    /// Get the lane's row index on the timeline
    pub fn index(self) -> usize {
        match self {
            Lane::Pictures => 0,
            Lane::Effects => 1,
            Lane::Text => 2,
        }
    }

    /// Get the display label
    pub fn label(self) -> &'static str {
        match self {
            Lane::Pictures => "Pictures",
            Lane::Effects => "Effects",
            Lane::Text => "Text",
        }
    }
}

/// Kind discriminant for timeline events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    /// Show a picture
    ShowPicture,
    /// Move/transform a shown picture
    MovePicture,
    /// Spin a shown picture
    RotatePicture,
    /// Tint a shown picture
    TintPicture,
    /// Erase a shown picture
    ErasePicture,
    /// Display a message box
    ShowText,
    /// Idle for a number of frames
    Wait,
    /// Flash the screen
    ScreenFlash,
}

impl EventType {
    /// Get all event types in toolbar order
    pub fn all() -> &'static [EventType] {
        &[
            EventType::ShowPicture,
            EventType::MovePicture,
            EventType::RotatePicture,
            EventType::TintPicture,
            EventType::ErasePicture,
            EventType::ShowText,
            EventType::Wait,
            EventType::ScreenFlash,
        ]
    }

    /// Get the serialized tag name
    pub fn name(self) -> &'static str {
        match self {
            EventType::ShowPicture => "showPicture",
            EventType::MovePicture => "movePicture",
            EventType::RotatePicture => "rotatePicture",
            EventType::TintPicture => "tintPicture",
            EventType::ErasePicture => "erasePicture",
            EventType::ShowText => "showText",
            EventType::Wait => "wait",
            EventType::ScreenFlash => "screenFlash",
        }
    }

    /// Get the lane this event type renders in
    pub fn lane(self) -> Lane {
        match self {
            EventType::ShowPicture
            | EventType::MovePicture
            | EventType::RotatePicture
            | EventType::ErasePicture => Lane::Pictures,
            EventType::TintPicture | EventType::ScreenFlash | EventType::Wait => Lane::Effects,
            EventType::ShowText => Lane::Text,
        }
    }

    /// Get the fixed sort priority among events at the same frame
    /// (pictures before effects before text)
    pub fn sort_priority(self) -> u8 {
        match self {
            EventType::ShowPicture => 0,
            EventType::MovePicture => 1,
            EventType::RotatePicture => 2,
            EventType::TintPicture => 3,
            EventType::ErasePicture => 4,
            EventType::ScreenFlash => 5,
            EventType::Wait => 6,
            EventType::ShowText => 7,
        }
    }
}

fn default_scale() -> i32 {
    100
}

fn default_opacity() -> i32 {
    255
}

fn default_duration() -> i32 {
    60
}

fn default_wait_frames() -> i32 {
    60
}

fn default_flash_color() -> i32 {
    255
}

fn default_flash_intensity() -> i32 {
    170
}

fn default_flash_duration() -> i32 {
    8
}

fn default_text_position() -> i32 {
    2
}

fn default_true() -> bool {
    true
}

/// Show Picture payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowPicture {
    /// Picture slot (1..=100)
    #[serde(default)]
    pub picture_number: i32,
    /// Image path relative to the project pictures folder; may be empty
    #[serde(default)]
    pub image_name: String,
    /// 0 = upper-left, 1 = center
    #[serde(default)]
    pub origin: i32,
    /// 0 = direct coordinates, 1 = variables
    #[serde(default)]
    pub position_type: i32,
    /// X position in pixels
    #[serde(default)]
    pub x: i32,
    /// Y position in pixels
    #[serde(default)]
    pub y: i32,
    /// Horizontal scale percent
    #[serde(default = "default_scale")]
    pub scale_x: i32,
    /// Vertical scale percent
    #[serde(default = "default_scale")]
    pub scale_y: i32,
    /// Opacity (0..=255)
    #[serde(default = "default_opacity")]
    pub opacity: i32,
    /// Blend mode (0..=3)
    #[serde(default)]
    pub blend: i32,
}

impl Default for ShowPicture {
    fn default() -> Self {
        Self {
            picture_number: 1,
            image_name: String::new(),
            origin: 0,
            position_type: 0,
            x: 0,
            y: 0,
            scale_x: 100,
            scale_y: 100,
            opacity: 255,
            blend: 0,
        }
    }
}

/// Move Picture payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovePicture {
    /// Picture slot to move
    #[serde(default)]
    pub picture_number: i32,
    /// 0 = upper-left, 1 = center
    #[serde(default)]
    pub origin: i32,
    /// 0 = direct coordinates, 1 = variables
    #[serde(default)]
    pub position_type: i32,
    /// Target X position
    #[serde(default)]
    pub x: i32,
    /// Target Y position
    #[serde(default)]
    pub y: i32,
    /// Target horizontal scale percent
    #[serde(default = "default_scale")]
    pub scale_x: i32,
    /// Target vertical scale percent
    #[serde(default = "default_scale")]
    pub scale_y: i32,
    /// Target opacity
    #[serde(default = "default_opacity")]
    pub opacity: i32,
    /// Blend mode
    #[serde(default)]
    pub blend: i32,
    /// Move duration in frames
    #[serde(default = "default_duration")]
    pub duration: i32,
    // Absent deserializes as false to match the exported command; the
    // creation factory sets true.
    /// Whether playback waits for the move to finish
    #[serde(default)]
    pub wait: bool,
    /// Easing curve (0..=3)
    #[serde(default)]
    pub easing_type: i32,
}

impl Default for MovePicture {
    fn default() -> Self {
        Self {
            picture_number: 1,
            origin: 0,
            position_type: 0,
            x: 0,
            y: 0,
            scale_x: 100,
            scale_y: 100,
            opacity: 255,
            blend: 0,
            duration: 60,
            wait: true,
            easing_type: 0,
        }
    }
}

/// Rotate Picture payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotatePicture {
    /// Picture slot to rotate
    #[serde(default)]
    pub picture_number: i32,
    /// Signed rotation speed; 0 stops rotation
    #[serde(default)]
    pub speed: i32,
}

impl Default for RotatePicture {
    fn default() -> Self {
        Self {
            picture_number: 1,
            speed: 0,
        }
    }
}

/// Tint Picture payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TintPicture {
    /// Picture slot to tint
    #[serde(default)]
    pub picture_number: i32,
    /// Red offset (-255..=255)
    #[serde(default)]
    pub red: i32,
    /// Green offset (-255..=255)
    #[serde(default)]
    pub green: i32,
    /// Blue offset (-255..=255)
    #[serde(default)]
    pub blue: i32,
    /// Gray saturation (0..=255)
    #[serde(default)]
    pub gray: i32,
    /// Tint duration in frames
    #[serde(default = "default_duration")]
    pub duration: i32,
    /// Whether playback waits for the tint to finish
    #[serde(default = "default_true")]
    pub wait: bool,
}

impl Default for TintPicture {
    fn default() -> Self {
        Self {
            picture_number: 1,
            red: 0,
            green: 0,
            blue: 0,
            gray: 0,
            duration: 60,
            wait: true,
        }
    }
}

/// Erase Picture payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErasePicture {
    /// Picture slot to erase
    #[serde(default)]
    pub picture_number: i32,
}

impl Default for ErasePicture {
    fn default() -> Self {
        Self { picture_number: 1 }
    }
}

/// Show Text payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowText {
    /// Message body; may contain newlines
    #[serde(default)]
    pub text: String,
    /// Face image name; empty for no face
    #[serde(default)]
    pub face_name: String,
    /// Index within the face sheet
    #[serde(default)]
    pub face_index: i32,
    /// 0 = window, 1 = dim, 2 = transparent
    #[serde(default)]
    pub background: i32,
    /// 0 = top, 1 = middle, 2 = bottom
    #[serde(default = "default_text_position")]
    pub position: i32,
}

impl Default for ShowText {
    fn default() -> Self {
        Self {
            text: String::new(),
            face_name: String::new(),
            face_index: 0,
            background: 0,
            position: 2,
        }
    }
}

/// Wait payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wait {
    /// Frames to wait
    #[serde(default = "default_wait_frames")]
    pub frames: i32,
}

impl Default for Wait {
    fn default() -> Self {
        Self { frames: 60 }
    }
}

/// Flash Screen payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenFlash {
    /// Flash red component (0..=255)
    #[serde(default = "default_flash_color")]
    pub red: i32,
    /// Flash green component (0..=255)
    #[serde(default = "default_flash_color")]
    pub green: i32,
    /// Flash blue component (0..=255)
    #[serde(default = "default_flash_color")]
    pub blue: i32,
    /// Flash intensity (0..=255)
    #[serde(default = "default_flash_intensity")]
    pub intensity: i32,
    /// Flash duration in frames
    #[serde(default = "default_flash_duration")]
    pub duration: i32,
    /// Whether playback waits for the flash to finish
    #[serde(default = "default_true")]
    pub wait: bool,
}

impl Default for ScreenFlash {
    fn default() -> Self {
        Self {
            red: 255,
            green: 255,
            blue: 255,
            intensity: 170,
            duration: 8,
            wait: true,
        }
    }
}

/// Event payload, tagged by the serialized `type` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventKind {
    /// Show a picture
    ShowPicture(ShowPicture),
    /// Move/transform a shown picture
    MovePicture(MovePicture),
    /// Spin a shown picture
    RotatePicture(RotatePicture),
    /// Tint a shown picture
    TintPicture(TintPicture),
    /// Erase a shown picture
    ErasePicture(ErasePicture),
    /// Display a message box
    ShowText(ShowText),
    /// Idle for a number of frames
    Wait(Wait),
    /// Flash the screen
    ScreenFlash(ScreenFlash),
    /// Unrecognized `type` tag; kept so future scene files still load
    #[serde(other)]
    Unknown,
}

// Zero falls back, mirroring the scene format where these fields are
// optional and zero never names a real value.
fn nz(value: i32, fallback: i32) -> i32 {
    if value != 0 {
        value
    } else {
        fallback
    }
}

impl EventKind {
    /// Get the kind discriminant; `None` for unrecognized kinds
    pub fn event_type(&self) -> Option<EventType> {
        match self {
            EventKind::ShowPicture(_) => Some(EventType::ShowPicture),
            EventKind::MovePicture(_) => Some(EventType::MovePicture),
            EventKind::RotatePicture(_) => Some(EventType::RotatePicture),
            EventKind::TintPicture(_) => Some(EventType::TintPicture),
            EventKind::ErasePicture(_) => Some(EventType::ErasePicture),
            EventKind::ShowText(_) => Some(EventType::ShowText),
            EventKind::Wait(_) => Some(EventType::Wait),
            EventKind::ScreenFlash(_) => Some(EventType::ScreenFlash),
            EventKind::Unknown => None,
        }
    }

    /// Get the lane this event renders in; unrecognized kinds land in Pictures
    pub fn lane(&self) -> Lane {
        self.event_type().map_or(Lane::Pictures, EventType::lane)
    }

    /// Get the sort priority among events at the same frame;
    /// unrecognized kinds sort with the pictures
    pub fn sort_priority(&self) -> u8 {
        self.event_type().map_or(0, EventType::sort_priority)
    }

    /// Rendered duration in frames.
    ///
    /// Rule order matters: the fixed 1-frame kinds win outright, then a
    /// caller-supplied duration wins over the per-kind defaults.
    pub fn duration(&self) -> i32 {
        match self {
            EventKind::ShowText(_) => 1,
            EventKind::ErasePicture(_) => 1,
            EventKind::Wait(w) => nz(w.frames, 60),
            EventKind::ScreenFlash(f) => nz(f.duration, 8),
            EventKind::MovePicture(m) => nz(m.duration, 60),
            EventKind::TintPicture(t) => nz(t.duration, 60),
            EventKind::ShowPicture(_) => 30,
            EventKind::RotatePicture(_) => 30,
            EventKind::Unknown => 20,
        }
    }

    /// Picture slot this event targets, if any
    pub fn picture_number(&self) -> Option<i32> {
        match self {
            EventKind::ShowPicture(p) => Some(p.picture_number),
            EventKind::MovePicture(p) => Some(p.picture_number),
            EventKind::RotatePicture(p) => Some(p.picture_number),
            EventKind::TintPicture(p) => Some(p.picture_number),
            EventKind::ErasePicture(p) => Some(p.picture_number),
            _ => None,
        }
    }
}

/// A timed command on the scene timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Frame at which the event begins
    #[serde(rename = "startFrame", default)]
    pub start_frame: u32,
    /// Monotonic creation counter; sort tie-break only
    #[serde(rename = "_insertOrder", default)]
    pub insert_order: u64,
    /// Typed payload
    #[serde(flatten)]
    pub kind: EventKind,
}

impl TimelineEvent {
    /// Create an event at a frame
    pub fn new(start_frame: u32, insert_order: u64, kind: EventKind) -> Self {
        Self {
            start_frame,
            insert_order,
            kind,
        }
    }

    /// Get the lane this event renders in
    pub fn lane(&self) -> Lane {
        self.kind.lane()
    }

    /// Get the rendered duration in frames
    pub fn duration(&self) -> i32 {
        self.kind.duration()
    }

    /// Get the exclusive end frame of the rendered interval
    pub fn end_frame(&self) -> i64 {
        i64::from(self.start_frame) + i64::from(self.duration())
    }

    /// Whether this is a Show Text event
    pub fn is_text(&self) -> bool {
        matches!(self.kind, EventKind::ShowText(_))
    }
}
