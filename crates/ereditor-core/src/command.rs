//! Engine commands and active-state queries.
//!
//! `Command` names an engine-defined operation; the UI never edits the
//! document any other way. Both enums serialize as `{"type": "...", ...}` so
//! the browser binding can hand them straight to a JavaScript engine shim.

use serde::{Deserialize, Serialize};

/// Paragraph/heading alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// Mark types whose attributes the toolbar reads back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarkType {
    /// Carries the text `color` attribute.
    TextStyle,
    Highlight,
    Link,
}

impl MarkType {
    pub fn as_str(self) -> &'static str {
        match self {
            MarkType::TextStyle => "textStyle",
            MarkType::Highlight => "highlight",
            MarkType::Link => "link",
        }
    }
}

/// A named engine operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Command {
    // History
    Undo,
    Redo,

    // Inline marks
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    ToggleStrike,
    ToggleCode,

    // Blocks
    ToggleHeading { level: u8 },
    ToggleBulletList,
    ToggleOrderedList,
    ToggleTaskList,
    ToggleBlockquote,
    ToggleCodeBlock,
    SetHorizontalRule,
    SetTextAlign { alignment: Alignment },

    // Colors
    SetColor { color: String },
    UnsetColor,
    ToggleHighlight { color: String },
    UnsetHighlight,

    // Links and media. Link commands apply to the whole link mark around the
    // cursor, not only the selected slice.
    SetLink { href: String },
    UnsetLink,
    SetImage {
        src: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },
    SetVideo { src: String },

    // Tables
    InsertTable {
        rows: u32,
        cols: u32,
        #[serde(rename = "withHeaderRow")]
        with_header_row: bool,
    },
    AddColumnAfter,
    DeleteColumn,
    AddRowAfter,
    DeleteRow,
    DeleteTable,
}

impl Command {
    /// The 3x3 table with a header row inserted by the toolbar.
    pub fn default_table() -> Self {
        Command::InsertTable {
            rows: 3,
            cols: 3,
            with_header_row: true,
        }
    }
}

/// Predicate for "is this formatting active at the selection".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ActiveQuery {
    Bold,
    Italic,
    Underline,
    Strike,
    Code,
    Heading { level: u8 },
    BulletList,
    OrderedList,
    TaskList,
    Blockquote,
    CodeBlock,
    TextAlign { alignment: Alignment },
    Link,
    Table,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_wire_format() {
        let json = serde_json::to_value(Command::ToggleHeading { level: 2 }).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "toggleHeading", "level": 2 }));

        let json = serde_json::to_value(Command::default_table()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "insertTable", "rows": 3, "cols": 3, "withHeaderRow": true })
        );

        let json = serde_json::to_value(Command::SetImage {
            src: "a.png".into(),
            alt: None,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "type": "setImage", "src": "a.png" }));
    }

    #[test]
    fn test_query_wire_format() {
        let json = serde_json::to_value(ActiveQuery::TextAlign {
            alignment: Alignment::Center,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "textAlign", "alignment": "center" })
        );
    }
}
