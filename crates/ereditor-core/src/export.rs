//! HTML/JSON export and the export panel.

use crate::actions::{ExportFormat, ExportOp};
use crate::engine::EditorEngine;

/// Clipboard writes. Fire-and-forget: implementations log failures.
pub trait ClipboardPlatform {
    fn write_text(&self, text: &str);
}

/// The engine's HTML serialization, verbatim.
pub fn get_html(engine: &dyn EditorEngine) -> String {
    engine.html()
}

/// The engine's document snapshot, pretty-printed with two-space indentation.
/// Object keys keep the order the engine produced them in.
pub fn get_json(engine: &dyn EditorEngine) -> String {
    let snapshot = engine.json();
    serde_json::to_string_pretty(&snapshot).unwrap_or_else(|e| {
        tracing::warn!("failed to serialize document snapshot: {}", e);
        String::from("{}")
    })
}

/// Toggleable panel showing the document as HTML or JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportPanel {
    open: bool,
    format: ExportFormat,
}

impl ExportPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn set_format(&mut self, format: ExportFormat) {
        self.format = format;
    }

    /// Current output in the active format.
    pub fn output(&self, engine: &dyn EditorEngine) -> String {
        match self.format {
            ExportFormat::Html => get_html(engine),
            ExportFormat::Json => get_json(engine),
        }
    }

    /// Copy the current output.
    pub fn copy(&self, engine: &dyn EditorEngine, clipboard: &dyn ClipboardPlatform) {
        let output = self.output(engine);
        tracing::debug!(format = ?self.format, len = output.len(), "copying export output");
        clipboard.write_text(&output);
    }

    pub fn apply(
        &mut self,
        op: ExportOp,
        engine: &dyn EditorEngine,
        clipboard: &dyn ClipboardPlatform,
    ) {
        match op {
            ExportOp::Toggle => self.toggle(),
            ExportOp::Format(format) => self.set_format(format),
            ExportOp::Copy => self.copy(engine, clipboard),
        }
    }
}
