// SPDX-License-Identifier: MIT OR Apache-2.0
//! The fixed-schema command records RPG Maker MZ stores in map files.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event command codes used by the exporter.
pub mod codes {
    /// Show Picture
    pub const SHOW_PICTURE: i32 = 231;
    /// Move Picture
    pub const MOVE_PICTURE: i32 = 232;
    /// Rotate Picture
    pub const ROTATE_PICTURE: i32 = 233;
    /// Tint Picture
    pub const TINT_PICTURE: i32 = 234;
    /// Erase Picture
    pub const ERASE_PICTURE: i32 = 235;
    /// Show Text header (face, background, position)
    pub const SHOW_TEXT: i32 = 101;
    /// One line of message text following a Show Text header
    pub const TEXT_LINE: i32 = 401;
    /// Wait
    pub const WAIT: i32 = 230;
    /// Flash Screen
    pub const FLASH_SCREEN: i32 = 224;
    /// Terminator closing every command list
    pub const END: i32 = 0;
}

/// One engine event command: `{code, indent, parameters}`.
///
/// Parameters are a heterogeneous ordered array; their meaning is fixed per
/// command code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MzCommand {
    /// Engine command code
    pub code: i32,
    /// Nesting depth; always 0 for exported commands
    pub indent: i32,
    /// Positional parameters
    pub parameters: Vec<Value>,
}

impl MzCommand {
    /// Create a top-level command
    pub fn new(code: i32, parameters: Vec<Value>) -> Self {
        Self {
            code,
            indent: 0,
            parameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_to_the_engine_shape() {
        let command = MzCommand::new(codes::WAIT, vec![json!(60)]);
        let value = serde_json::to_value(&command).unwrap();
        assert_eq!(value, json!({"code": 230, "indent": 0, "parameters": [60]}));
    }
}
