// SPDX-License-Identifier: MIT OR Apache-2.0
//! Splicing exported commands into RPG Maker MZ map files.
//!
//! Map files are edited structurally as `serde_json::Value` so every field
//! the editor doesn't know about survives the round trip. Commands are
//! inserted into an event page's command list just before its trailing
//! terminator; the engine owns the rest of the file.

use mzscene_export::MzCommand;
use serde_json::Value;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Map export errors.
#[derive(Debug, Error)]
pub enum MapExportError {
    /// The map file does not exist in the project's data directory
    #[error("map file not found: {0}")]
    MapFileNotFound(PathBuf),

    /// No event with this id exists in the map
    #[error("event id {0} not found in map")]
    EventNotFound(u32),

    /// The event has no page at this index
    #[error("page {0} not found in event")]
    PageNotFound(usize),

    /// The map JSON is missing a structure the splice needs
    #[error("malformed map data: {0}")]
    Malformed(&'static str),

    /// The resolved path escapes the project directory
    #[error("path escapes the project directory: {0}")]
    UnsafePath(PathBuf),

    /// I/O failure reading or writing the map file
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The map file is not valid JSON
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Get the data-directory file name for a map id, e.g. `Map003.json`
pub fn map_file_name(map_id: u32) -> String {
    format!("Map{map_id:03}.json")
}

/// Check that `requested`, resolved against `base`, stays inside `base`.
///
/// Purely lexical (`..` and `.` are folded without touching the
/// filesystem). `Path::starts_with` compares whole components, so
/// `/projects-evil` never passes as being inside `/projects`.
pub fn is_path_safe(base: &Path, requested: &Path) -> bool {
    let base = lexical_normalize(base);
    let joined = lexical_normalize(&base.join(requested));
    joined.starts_with(&base)
}

fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Join a project-relative path, rejecting escapes
fn resolve_project_file(
    project_path: &Path,
    relative: &Path,
) -> Result<PathBuf, MapExportError> {
    if !is_path_safe(project_path, relative) {
        return Err(MapExportError::UnsafePath(relative.to_path_buf()));
    }
    Ok(project_path.join(relative))
}

/// Insert commands into an event page's command list, in place.
///
/// The insertion point is just before the page's trailing end command, so
/// the spliced scene runs ahead of whatever the page already did last.
/// Returns the number of commands inserted.
pub fn splice_into_page(
    map: &mut Value,
    event_id: u32,
    page_index: usize,
    commands: &[MzCommand],
) -> Result<usize, MapExportError> {
    let events = map
        .get_mut("events")
        .and_then(Value::as_array_mut)
        .ok_or(MapExportError::Malformed("map has no events array"))?;

    // the events array is 1-indexed with null placeholders
    let map_event = events
        .iter_mut()
        .find(|e| e.get("id").and_then(Value::as_u64) == Some(u64::from(event_id)))
        .ok_or(MapExportError::EventNotFound(event_id))?;

    let page = map_event
        .get_mut("pages")
        .and_then(Value::as_array_mut)
        .and_then(|pages| pages.get_mut(page_index))
        .ok_or(MapExportError::PageNotFound(page_index))?;

    let list = page
        .get_mut("list")
        .and_then(Value::as_array_mut)
        .ok_or(MapExportError::Malformed("event page has no command list"))?;

    let insert_at = list.len().saturating_sub(1);
    for (offset, command) in commands.iter().enumerate() {
        list.insert(insert_at + offset, serde_json::to_value(command)?);
    }
    Ok(commands.len())
}

/// Splice commands into a map file on disk and write it back.
pub fn export_to_map(
    project_path: &Path,
    map_id: u32,
    event_id: u32,
    page_index: usize,
    commands: &[MzCommand],
) -> Result<usize, MapExportError> {
    let relative = Path::new("data").join(map_file_name(map_id));
    let map_file = resolve_project_file(project_path, &relative)?;
    if !map_file.is_file() {
        return Err(MapExportError::MapFileNotFound(map_file));
    }

    info!(map_id, event_id, page_index, "export to map");
    let text = fs::read_to_string(&map_file)?;
    let mut map: Value = serde_json::from_str(&text)?;
    let count = splice_into_page(&mut map, event_id, page_index, commands)?;
    fs::write(&map_file, serde_json::to_string_pretty(&map)?)?;

    info!(count, "export complete");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mzscene_export::codes;
    use serde_json::json;

    fn sample_map() -> Value {
        json!({
            "displayName": "Throne Room",
            "tilesetId": 4,
            "events": [
                null,
                {
                    "id": 1,
                    "name": "Cutscene Trigger",
                    "pages": [{
                        "trigger": 0,
                        "list": [
                            {"code": 101, "indent": 0, "parameters": ["", 0, 0, 2]},
                            {"code": 401, "indent": 0, "parameters": ["Welcome."]},
                            {"code": 0, "indent": 0, "parameters": []}
                        ]
                    }]
                }
            ]
        })
    }

    fn sample_commands() -> Vec<MzCommand> {
        vec![
            MzCommand::new(codes::SHOW_PICTURE, vec![json!(1), json!("castle")]),
            MzCommand::new(codes::WAIT, vec![json!(60)]),
        ]
    }

    #[test]
    fn splice_inserts_before_the_terminator() {
        let mut map = sample_map();
        let count = splice_into_page(&mut map, 1, 0, &sample_commands()).unwrap();
        assert_eq!(count, 2);

        let list = map["events"][1]["pages"][0]["list"].as_array().unwrap();
        assert_eq!(list.len(), 5);
        let codes: Vec<i64> = list.iter().map(|c| c["code"].as_i64().unwrap()).collect();
        assert_eq!(codes, [101, 401, 231, 230, 0]);
    }

    #[test]
    fn splice_leaves_unrelated_map_data_alone() {
        let mut map = sample_map();
        splice_into_page(&mut map, 1, 0, &sample_commands()).unwrap();
        assert_eq!(map["displayName"], "Throne Room");
        assert_eq!(map["tilesetId"], 4);
        assert_eq!(map["events"][0], Value::Null);
        assert_eq!(map["events"][1]["pages"][0]["trigger"], 0);
    }

    #[test]
    fn missing_event_and_page_are_typed_errors() {
        let mut map = sample_map();
        let err = splice_into_page(&mut map, 9, 0, &sample_commands()).unwrap_err();
        assert!(matches!(err, MapExportError::EventNotFound(9)));

        let err = splice_into_page(&mut map, 1, 3, &sample_commands()).unwrap_err();
        assert!(matches!(err, MapExportError::PageNotFound(3)));
    }

    #[test]
    fn map_without_events_is_malformed() {
        let mut map = json!({"tilesetId": 1});
        let err = splice_into_page(&mut map, 1, 0, &sample_commands()).unwrap_err();
        assert!(matches!(err, MapExportError::Malformed(_)));
    }

    #[test]
    fn path_guard_accepts_project_children() {
        let base = Path::new("/projects/mygame");
        assert!(is_path_safe(base, Path::new("data/Map001.json")));
        assert!(is_path_safe(base, Path::new("data/../data/Map001.json")));
    }

    #[test]
    fn path_guard_rejects_escapes() {
        let base = Path::new("/projects/mygame");
        assert!(!is_path_safe(base, Path::new("../othergame/data/Map001.json")));
        assert!(!is_path_safe(base, Path::new("/etc/passwd")));
        // sibling directory sharing a name prefix
        assert!(!is_path_safe(base, Path::new("../mygame-evil/data.json")));
    }

    #[test]
    fn export_round_trips_through_disk() {
        let project = tempfile::tempdir().unwrap();
        let data_dir = project.path().join("data");
        fs::create_dir(&data_dir).unwrap();
        let map_path = data_dir.join(map_file_name(7));
        fs::write(&map_path, serde_json::to_string(&sample_map()).unwrap()).unwrap();

        let count = export_to_map(project.path(), 7, 1, 0, &sample_commands()).unwrap();
        assert_eq!(count, 2);

        let written: Value =
            serde_json::from_str(&fs::read_to_string(&map_path).unwrap()).unwrap();
        let list = written["events"][1]["pages"][0]["list"].as_array().unwrap();
        assert_eq!(list[list.len() - 1]["code"], 0);
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn export_reports_missing_map_file() {
        let project = tempfile::tempdir().unwrap();
        fs::create_dir(project.path().join("data")).unwrap();
        let err = export_to_map(project.path(), 1, 1, 0, &sample_commands()).unwrap_err();
        assert!(matches!(err, MapExportError::MapFileNotFound(_)));
    }
}
