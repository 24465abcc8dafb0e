// SPDX-License-Identifier: MIT OR Apache-2.0
//! Conversion from timeline events to engine commands.
//!
//! The defaulting here is a compatibility surface, not a style choice:
//! geometry-style fields treat zero as absent (`nz`), while the
//! face/background/position fields and the tint/flash waits carry their
//! deserialized values verbatim so explicit `0`/`false` survive. Changing
//! either direction changes the exported map data.

use crate::command::{codes, MzCommand};
use mzscene_timeline::{EventKind, TimelineEvent};
use serde_json::json;

// Zero falls back, like the scene format's optional numeric fields.
fn nz(value: i32, fallback: i32) -> i32 {
    if value != 0 {
        value
    } else {
        fallback
    }
}

/// Convert timeline events, in the order given, to engine commands.
///
/// Pure and total: events with unrecognized kinds produce no commands, and
/// no terminator is appended — splicing into a host command list is the
/// caller's concern.
pub fn convert_to_mz_format(events: &[TimelineEvent]) -> Vec<MzCommand> {
    let mut commands = Vec::new();

    for event in events {
        match &event.kind {
            EventKind::ShowPicture(p) => {
                commands.push(MzCommand::new(
                    codes::SHOW_PICTURE,
                    vec![
                        json!(nz(p.picture_number, 1)),
                        json!(p.image_name),
                        json!(p.origin),
                        json!(p.position_type),
                        json!(p.x),
                        json!(p.y),
                        json!(nz(p.scale_x, 100)),
                        json!(nz(p.scale_y, 100)),
                        json!(nz(p.opacity, 255)),
                        json!(p.blend),
                    ],
                ));
            }

            EventKind::MovePicture(p) => {
                commands.push(MzCommand::new(
                    codes::MOVE_PICTURE,
                    vec![
                        json!(nz(p.picture_number, 1)),
                        json!(0), // unused
                        json!(p.origin),
                        json!(p.position_type),
                        json!(p.x),
                        json!(p.y),
                        json!(nz(p.scale_x, 100)),
                        json!(nz(p.scale_y, 100)),
                        json!(nz(p.opacity, 255)),
                        json!(p.blend),
                        json!(nz(p.duration, 60)),
                        json!(p.wait),
                        json!(p.easing_type),
                    ],
                ));
            }

            EventKind::RotatePicture(p) => {
                commands.push(MzCommand::new(
                    codes::ROTATE_PICTURE,
                    vec![json!(nz(p.picture_number, 1)), json!(p.speed)],
                ));
            }

            EventKind::TintPicture(p) => {
                commands.push(MzCommand::new(
                    codes::TINT_PICTURE,
                    vec![
                        json!(nz(p.picture_number, 1)),
                        json!([p.red, p.green, p.blue, p.gray]),
                        json!(nz(p.duration, 60)),
                        json!(p.wait),
                    ],
                ));
            }

            EventKind::ErasePicture(p) => {
                commands.push(MzCommand::new(
                    codes::ERASE_PICTURE,
                    vec![json!(nz(p.picture_number, 1))],
                ));
            }

            EventKind::ShowText(p) => {
                commands.push(MzCommand::new(
                    codes::SHOW_TEXT,
                    vec![
                        json!(p.face_name),
                        json!(p.face_index),
                        json!(p.background),
                        json!(p.position),
                    ],
                ));
                // one 401 per line; an empty message still emits one line
                for line in p.text.split('\n') {
                    commands.push(MzCommand::new(codes::TEXT_LINE, vec![json!(line)]));
                }
            }

            EventKind::Wait(p) => {
                commands.push(MzCommand::new(codes::WAIT, vec![json!(nz(p.frames, 60))]));
            }

            EventKind::ScreenFlash(p) => {
                commands.push(MzCommand::new(
                    codes::FLASH_SCREEN,
                    vec![
                        json!([p.red, p.green, p.blue, p.intensity]),
                        json!(nz(p.duration, 8)),
                        json!(p.wait),
                    ],
                ));
            }

            EventKind::Unknown => {}
        }
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    // Deserializing from sparse JSON exercises the same absent-field
    // behavior scene files have.
    fn event(value: Value) -> TimelineEvent {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn show_picture_defaults() {
        let commands = convert_to_mz_format(&[event(json!({"type": "showPicture"}))]);
        assert_eq!(
            serde_json::to_value(&commands).unwrap(),
            json!([{
                "code": 231,
                "indent": 0,
                "parameters": [1, "", 0, 0, 0, 0, 100, 100, 255, 0]
            }])
        );
    }

    #[test]
    fn explicit_zero_geometry_falls_back() {
        let commands = convert_to_mz_format(&[event(json!({
            "type": "showPicture",
            "pictureNumber": 0,
            "scaleX": 0,
            "scaleY": 0,
            "opacity": 0
        }))]);
        assert_eq!(
            commands[0].parameters,
            vec![
                json!(1),
                json!(""),
                json!(0),
                json!(0),
                json!(0),
                json!(0),
                json!(100),
                json!(100),
                json!(255),
                json!(0)
            ]
        );
    }

    #[test]
    fn move_picture_defaults_and_wait() {
        let commands = convert_to_mz_format(&[event(json!({"type": "movePicture"}))]);
        assert_eq!(
            commands[0].parameters,
            vec![
                json!(1),
                json!(0),
                json!(0),
                json!(0),
                json!(0),
                json!(0),
                json!(100),
                json!(100),
                json!(255),
                json!(0),
                json!(60),
                json!(false), // absent wait exports false for moves
                json!(0)
            ]
        );

        let commands = convert_to_mz_format(&[event(json!({
            "type": "movePicture",
            "duration": 45,
            "wait": true,
            "easingType": 2
        }))]);
        assert_eq!(commands[0].parameters[10], json!(45));
        assert_eq!(commands[0].parameters[11], json!(true));
        assert_eq!(commands[0].parameters[12], json!(2));
    }

    #[test]
    fn rotate_and_erase() {
        let commands = convert_to_mz_format(&[
            event(json!({"type": "rotatePicture", "pictureNumber": 3, "speed": -4})),
            event(json!({"type": "erasePicture"})),
        ]);
        assert_eq!(commands[0].code, 233);
        assert_eq!(commands[0].parameters, vec![json!(3), json!(-4)]);
        assert_eq!(commands[1].code, 235);
        assert_eq!(commands[1].parameters, vec![json!(1)]);
    }

    #[test]
    fn tint_wait_defaults_on_but_false_survives() {
        let commands = convert_to_mz_format(&[event(json!({
            "type": "tintPicture",
            "red": -100,
            "gray": 255
        }))]);
        assert_eq!(commands[0].code, 234);
        assert_eq!(
            commands[0].parameters,
            vec![json!(1), json!([-100, 0, 0, 255]), json!(60), json!(true)]
        );

        let commands = convert_to_mz_format(&[event(json!({
            "type": "tintPicture",
            "wait": false
        }))]);
        assert_eq!(commands[0].parameters[3], json!(false));
    }

    #[test]
    fn show_text_expands_one_command_per_line() {
        let commands = convert_to_mz_format(&[event(json!({
            "type": "showText",
            "text": "Line 1\nLine 2"
        }))]);
        let codes: Vec<i32> = commands.iter().map(|c| c.code).collect();
        assert_eq!(codes, [101, 401, 401]);
        assert_eq!(commands[1].parameters, vec![json!("Line 1")]);
        assert_eq!(commands[2].parameters, vec![json!("Line 2")]);
    }

    #[test]
    fn empty_text_still_emits_one_line() {
        let commands = convert_to_mz_format(&[event(json!({"type": "showText"}))]);
        let codes: Vec<i32> = commands.iter().map(|c| c.code).collect();
        assert_eq!(codes, [101, 401]);
        assert_eq!(commands[0].parameters, vec![json!(""), json!(0), json!(0), json!(2)]);
        assert_eq!(commands[1].parameters, vec![json!("")]);
    }

    #[test]
    fn show_text_preserves_explicit_zero_position() {
        let commands = convert_to_mz_format(&[event(json!({
            "type": "showText",
            "faceName": "Actor1",
            "faceIndex": 0,
            "background": 1,
            "position": 0
        }))]);
        assert_eq!(
            commands[0].parameters,
            vec![json!("Actor1"), json!(0), json!(1), json!(0)]
        );
    }

    #[test]
    fn wait_frames_default() {
        let commands = convert_to_mz_format(&[
            event(json!({"type": "wait"})),
            event(json!({"type": "wait", "frames": 120})),
        ]);
        assert_eq!(commands[0].parameters, vec![json!(60)]);
        assert_eq!(commands[1].parameters, vec![json!(120)]);
    }

    #[test]
    fn screen_flash_defaults_preserve_explicit_zeroes() {
        let commands = convert_to_mz_format(&[event(json!({"type": "screenFlash"}))]);
        assert_eq!(
            commands[0].parameters,
            vec![json!([255, 255, 255, 170]), json!(8), json!(true)]
        );

        let commands = convert_to_mz_format(&[event(json!({
            "type": "screenFlash",
            "red": 0,
            "intensity": 0,
            "wait": false
        }))]);
        assert_eq!(
            commands[0].parameters,
            vec![json!([0, 255, 255, 0]), json!(8), json!(false)]
        );
    }

    #[test]
    fn unknown_kinds_are_skipped_silently() {
        let commands = convert_to_mz_format(&[
            event(json!({"type": "shakeScreen", "power": 9})),
            event(json!({"type": "wait"})),
        ]);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].code, 230);
    }

    #[test]
    fn output_preserves_event_order() {
        let commands = convert_to_mz_format(&[
            event(json!({"type": "showPicture"})),
            event(json!({"type": "screenFlash"})),
            event(json!({"type": "erasePicture"})),
        ]);
        let codes: Vec<i32> = commands.iter().map(|c| c.code).collect();
        assert_eq!(codes, [231, 224, 235]);
    }

    #[test]
    fn no_terminator_is_appended() {
        let commands = convert_to_mz_format(&[event(json!({"type": "wait"}))]);
        assert!(commands.iter().all(|c| c.code != codes::END));
    }
}
