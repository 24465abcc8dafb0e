// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene file shape and (de)serialization.
//!
//! A scene is the JSON document `{version, timelineLength, events}`. The
//! host decides where the bytes live; this module only guarantees the
//! structural round trip of the data model.

use crate::event::TimelineEvent;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current scene format version.
pub const SCENE_FORMAT_VERSION: u32 = 1;

/// Default nominal timeline length in frames (5 seconds at 60 fps).
pub const DEFAULT_TIMELINE_LENGTH: u32 = 300;

/// Scene (de)serialization errors.
#[derive(Debug, Error)]
pub enum SceneError {
    /// The scene document is not valid JSON for the scene shape
    #[error("malformed scene: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Serialized scene document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneData {
    /// Format version
    #[serde(default = "default_version")]
    pub version: u32,
    /// Nominal timeline length in frames
    #[serde(default = "default_timeline_length")]
    pub timeline_length: u32,
    /// Timeline events
    #[serde(default)]
    pub events: Vec<TimelineEvent>,
}

fn default_version() -> u32 {
    SCENE_FORMAT_VERSION
}

fn default_timeline_length() -> u32 {
    DEFAULT_TIMELINE_LENGTH
}

impl Default for SceneData {
    fn default() -> Self {
        Self {
            version: SCENE_FORMAT_VERSION,
            timeline_length: DEFAULT_TIMELINE_LENGTH,
            events: Vec::new(),
        }
    }
}

impl SceneData {
    /// Parse a scene from JSON text
    pub fn from_json_str(text: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize the scene to pretty-printed JSON text
    pub fn to_json_string(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventKind, EventType};
    use crate::model::TimelineModel;

    #[test]
    fn empty_document_gets_defaults() {
        let scene = SceneData::from_json_str("{}").unwrap();
        assert_eq!(scene.version, SCENE_FORMAT_VERSION);
        assert_eq!(scene.timeline_length, DEFAULT_TIMELINE_LENGTH);
        assert!(scene.events.is_empty());
    }

    #[test]
    fn scene_round_trips_through_json() {
        let mut model = TimelineModel::new();
        model.add_event(EventType::ShowPicture);
        model.set_current_frame(30);
        model.add_event(EventType::ShowText);
        model.set_timeline_length(450);

        let text = model.to_scene().to_json_string().unwrap();
        let loaded = SceneData::from_json_str(&text).unwrap();
        assert_eq!(loaded, model.to_scene());
    }

    #[test]
    fn events_keep_scene_field_names() {
        let mut model = TimelineModel::new();
        model.add_event(EventType::ScreenFlash);
        let text = model.to_scene().to_json_string().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["timelineLength"], 300);
        assert_eq!(value["events"][0]["type"], "screenFlash");
        assert_eq!(value["events"][0]["_insertOrder"], 1);
        assert_eq!(value["events"][0]["startFrame"], 0);
    }

    #[test]
    fn unknown_event_types_survive_loading() {
        let scene = SceneData::from_json_str(
            r#"{"version":1,"timelineLength":300,
                "events":[{"type":"shakeScreen","startFrame":12},
                          {"type":"wait","startFrame":0,"frames":30}]}"#,
        )
        .unwrap();
        assert_eq!(scene.events.len(), 2);
        assert_eq!(scene.events[0].kind, EventKind::Unknown);
    }

    #[test]
    fn garbage_is_a_malformed_scene() {
        assert!(SceneData::from_json_str("not json").is_err());
        assert!(SceneData::from_json_str(r#"{"events": 5}"#).is_err());
    }
}
