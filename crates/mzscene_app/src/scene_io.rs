// SPDX-License-Identifier: MIT OR Apache-2.0
//! Reading and writing `.mzscene` files.

use anyhow::{Context, Result};
use mzscene_timeline::SceneData;
use std::fs;
use std::path::Path;
use tracing::info;

/// Read a scene document from disk
pub fn read_scene(path: &Path) -> Result<SceneData> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading scene file {}", path.display()))?;
    let scene = SceneData::from_json_str(&text)
        .with_context(|| format!("parsing scene file {}", path.display()))?;
    info!(path = %path.display(), events = scene.events.len(), "scene loaded");
    Ok(scene)
}

/// Write a scene document to disk as pretty-printed JSON
pub fn write_scene(path: &Path, scene: &SceneData) -> Result<()> {
    let text = scene.to_json_string().context("serializing scene")?;
    fs::write(path, text)
        .with_context(|| format!("writing scene file {}", path.display()))?;
    info!(path = %path.display(), "scene saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mzscene_timeline::{EventType, TimelineModel};

    #[test]
    fn scene_files_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intro.mzscene");

        let mut model = TimelineModel::new();
        model.add_event(EventType::ShowPicture);
        model.set_current_frame(45);
        model.add_event(EventType::ScreenFlash);
        let scene = model.to_scene();

        write_scene(&path, &scene).unwrap();
        let loaded = read_scene(&path).unwrap();
        assert_eq!(loaded, scene);
    }

    #[test]
    fn missing_file_has_context() {
        let err = read_scene(Path::new("/nonexistent/intro.mzscene")).unwrap_err();
        assert!(err.to_string().contains("intro.mzscene"));
    }
}
