//! ereditor-core: rich-text editor chrome over an external document engine.
//!
//! This crate provides:
//! - `EditorEngine` trait: the command/query/notification surface of the engine
//! - `RichTextEditor<E>`: toolbar, bubble menu, dialogs, status bar and export,
//!   all driven through the engine trait
//! - `standalone::create`: mount-by-selector over any `MountHost`
//! - `view`: HTML rendering of the chrome with delegated `data-action` routing
//!
//! Nothing here touches a DOM; see `ereditor-browser` for that.

pub mod actions;
pub mod bubble_menu;
pub mod button;
pub mod color_picker;
pub mod command;
pub mod dialog;
pub mod editor;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod export;
pub mod host;
pub mod image;
pub mod labels;
pub mod options;
pub mod standalone;
pub mod status_bar;
pub mod toolbar;
pub mod view;

#[cfg(test)]
mod test_support;

pub use actions::{
    DialogKind, DialogOp, ExportFormat, ExportOp, Field, PickerKind, PickerOp, UiAction, UiEvent,
};
pub use bubble_menu::{BubbleMenu, MenuPosition, MenuSize, compute_position};
pub use button::MenuButton;
pub use color_picker::{ColorEvent, ColorPicker, DEFAULT_PALETTE};
pub use command::{ActiveQuery, Alignment, Command, MarkType};
pub use dialog::{ActiveDialog, DialogOutcome, DialogResult};
pub use editor::{EditorCallbacks, EditorHost, RichTextEditor};
pub use emitter::{EventEmitter, Subscription};
pub use engine::{
    Content, EditorEngine, EngineEvent, EngineEvents, EngineListener, EngineSetup, Rect,
    SelectionRange,
};
pub use error::EditorError;
pub use export::{ClipboardPlatform, ExportPanel, get_html, get_json};
pub use host::{HostEvent, HostEvents, Key, NodeId, dispatch_host_event};
pub use image::{ImageInserter, data_url};
pub use labels::{LabelKey, LabelOverrides, Labels};
pub use options::EditorOptions;
pub use smol_str::SmolStr;
pub use standalone::{MountHost, StandaloneInstance, create};
pub use status_bar::{StatusBar, character_count, word_count};
pub use toolbar::Toolbar;
pub use view::Chrome;
