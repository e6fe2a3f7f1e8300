//! The document engine abstraction.
//!
//! The engine owns the document model, schema, history and serialization. This
//! crate only talks to it through [`EditorEngine`]: commands in, state queries
//! and notifications out. All methods take `&self`; engines are shared handles
//! with their own interior mutability, so a change listener may query the
//! engine (or the host may call back into it) while a command is running.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::command::{ActiveQuery, Command, MarkType};
use crate::emitter::{EventEmitter, Subscription};
use crate::error::EditorError;

/// Ordered document positions of the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionRange {
    pub from: usize,
    pub to: usize,
}

impl SelectionRange {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    pub fn caret(pos: usize) -> Self {
        Self { from: pos, to: pos }
    }

    pub fn is_collapsed(&self) -> bool {
        self.from == self.to
    }
}

/// Viewport-relative rectangle, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Document content as markup or as a structured snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Html(String),
    Json(serde_json::Value),
}

impl From<&str> for Content {
    fn from(html: &str) -> Self {
        Content::Html(html.to_string())
    }
}

impl From<String> for Content {
    fn from(html: String) -> Self {
        Content::Html(html)
    }
}

/// Notifications an engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EngineEvent {
    /// Any state change, including selection-only transactions.
    Transaction,
    /// The selection moved.
    SelectionUpdate,
    /// The document content changed.
    Update,
}

impl EngineEvent {
    pub const ALL: [EngineEvent; 3] = [
        EngineEvent::Transaction,
        EngineEvent::SelectionUpdate,
        EngineEvent::Update,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EngineEvent::Transaction => "transaction",
            EngineEvent::SelectionUpdate => "selectionUpdate",
            EngineEvent::Update => "update",
        }
    }
}

/// Listener for engine notifications. Receives the emitting engine.
pub type EngineListener = dyn Fn(&dyn EditorEngine);

/// Everything an engine needs at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSetup {
    pub content: Content,
    pub editable: bool,
    pub placeholder: Option<String>,
    /// When true the host intercepts image paste/drop and inserts the image
    /// itself; the engine must not handle those events natively.
    pub intercept_images: bool,
}

/// The command/query/notification surface of a document engine.
pub trait EditorEngine {
    /// Run a command. Returns whether the engine applied it.
    fn run(&self, command: &Command) -> bool;

    /// Whether `command` could run right now.
    fn can(&self, command: &Command) -> bool;

    fn is_active(&self, query: &ActiveQuery) -> bool;

    /// An attribute of the mark at the selection, e.g. `link.href`.
    fn attribute(&self, mark: MarkType, name: &str) -> Option<String>;

    fn selection(&self) -> SelectionRange;

    /// Screen coordinates of a document position, if it is rendered.
    fn coords_at_pos(&self, pos: usize) -> Option<Rect>;

    /// Engine-serialized HTML.
    fn html(&self) -> String;

    /// Structured document snapshot.
    fn json(&self) -> serde_json::Value;

    /// Plain-text projection of the document.
    fn text(&self) -> String;

    fn set_content(&self, content: &Content) -> Result<(), EditorError>;

    fn is_editable(&self) -> bool;

    fn set_editable(&self, editable: bool);

    /// Register a listener for `event`. Dropping the guard removes it.
    fn on(&self, event: EngineEvent, listener: Rc<EngineListener>) -> Subscription;

    /// Tear down the engine. Further calls are no-ops.
    fn destroy(&self);
}

/// Per-event listener registries for engine implementations.
#[derive(Debug, Default, Clone)]
pub struct EngineEvents {
    transaction: EventEmitter<EngineListener>,
    selection_update: EventEmitter<EngineListener>,
    update: EventEmitter<EngineListener>,
}

impl EngineEvents {
    pub fn new() -> Self {
        Self::default()
    }

    fn emitter(&self, event: EngineEvent) -> &EventEmitter<EngineListener> {
        match event {
            EngineEvent::Transaction => &self.transaction,
            EngineEvent::SelectionUpdate => &self.selection_update,
            EngineEvent::Update => &self.update,
        }
    }

    pub fn subscribe(&self, event: EngineEvent, listener: Rc<EngineListener>) -> Subscription {
        self.emitter(event).subscribe(listener)
    }

    /// Call every listener for `event` with `engine`.
    pub fn emit(&self, event: EngineEvent, engine: &dyn EditorEngine) {
        for listener in self.emitter(event).snapshot() {
            listener(engine);
        }
    }

    pub fn listener_count(&self, event: EngineEvent) -> usize {
        self.emitter(event).len()
    }

    pub fn total_listeners(&self) -> usize {
        EngineEvent::ALL
            .iter()
            .map(|event| self.listener_count(*event))
            .sum()
    }
}
