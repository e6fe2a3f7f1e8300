//! UI actions and input events.
//!
//! `UiAction` is what a control does when activated. It is serialized into
//! the `data-action` attribute of rendered controls so the host can route
//! delegated clicks back without knowing the control layout. `UiEvent` is the
//! full set of inputs the root editor accepts from the host.

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::host::Key;

/// The three modal dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DialogKind {
    Link,
    Image,
    Video,
}

/// The two color pickers in the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PickerKind {
    TextColor,
    Highlight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PickerOp {
    /// Trigger button: open or close the popover.
    Toggle,
    /// A swatch was chosen.
    Select(String),
    Reset,
}

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportFormat {
    #[default]
    Html,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportOp {
    Toggle,
    Format(ExportFormat),
    Copy,
}

/// Buttons inside the open dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DialogOp {
    Submit,
    Cancel,
    Remove,
}

/// What a control does when activated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UiAction {
    Command { command: Command },
    OpenDialog { dialog: DialogKind },
    Picker { picker: PickerKind, op: PickerOp },
    Export { op: ExportOp },
    Dialog { op: DialogOp },
    ToggleFullscreen,
}

impl UiAction {
    pub fn command(command: Command) -> Self {
        UiAction::Command { command }
    }

    /// Encode for a `data-action` attribute.
    pub fn encode(&self) -> String {
        // Enums of strings and numbers only; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Decode a `data-action` attribute value.
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Text inputs inside dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    LinkUrl,
    ImageSrc,
    ImageAlt,
    VideoUrl,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::LinkUrl => "linkUrl",
            Field::ImageSrc => "imageSrc",
            Field::ImageAlt => "imageAlt",
            Field::VideoUrl => "videoUrl",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "linkUrl" => Some(Field::LinkUrl),
            "imageSrc" => Some(Field::ImageSrc),
            "imageAlt" => Some(Field::ImageAlt),
            "videoUrl" => Some(Field::VideoUrl),
            _ => None,
        }
    }
}

/// Input from the host to the root editor.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// A control carrying `action` was clicked.
    Action(UiAction),
    /// A dialog field's value changed.
    Input { field: Field, value: String },
    /// A key was pressed inside a dialog field.
    FieldKey { field: Field, key: Key },
    /// The dialog overlay itself (not the dialog body) was clicked.
    OverlayClick,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_encoding() {
        let action = UiAction::Picker {
            picker: PickerKind::Highlight,
            op: PickerOp::Select("#ff0000".into()),
        };
        let raw = action.encode();
        assert_eq!(
            raw,
            r##"{"type":"picker","picker":"highlight","op":{"select":"#ff0000"}}"##
        );
        assert_eq!(UiAction::decode(&raw).unwrap(), action);

        let raw = UiAction::command(Command::ToggleBold).encode();
        assert_eq!(raw, r#"{"type":"command","command":{"type":"toggleBold"}}"#);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(UiAction::decode("{\"type\":\"launchMissiles\"}").is_err());
    }

    #[test]
    fn test_field_names() {
        for field in [Field::LinkUrl, Field::ImageSrc, Field::ImageAlt, Field::VideoUrl] {
            assert_eq!(Field::parse(field.as_str()), Some(field));
        }
    }
}
