//! In-memory engine and clipboard for unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::json;

use crate::command::{ActiveQuery, Command, MarkType};
use crate::emitter::Subscription;
use crate::engine::{
    Content, EditorEngine, EngineEvent, EngineEvents, EngineListener, EngineSetup, Rect,
    SelectionRange,
};
use crate::error::EditorError;
use crate::export::ClipboardPlatform;

#[derive(Debug)]
struct MockState {
    html: String,
    json: serde_json::Value,
    text: String,
    selection: SelectionRange,
    editable: bool,
    destroyed: bool,
    active: Vec<ActiveQuery>,
    blocked: Vec<Command>,
    coords: Vec<(usize, Rect)>,
    attributes: Vec<(MarkType, String, String)>,
    commands: Vec<Command>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            html: String::new(),
            json: json!({ "type": "doc", "content": [] }),
            text: String::new(),
            selection: SelectionRange::caret(0),
            editable: true,
            destroyed: false,
            active: Vec::new(),
            blocked: Vec::new(),
            coords: Vec::new(),
            attributes: Vec::new(),
            commands: Vec::new(),
        }
    }
}

/// Records commands, serves canned state and emits notifications on demand.
#[derive(Debug, Default)]
pub struct MockEngine {
    state: RefCell<MockState>,
    events: EngineEvents,
    setup: RefCell<Option<EngineSetup>>,
}

/// Crude tag stripper for the text projection of canned markup.
fn strip_tags(html: &str) -> String {
    let mut text = String::new();
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

/// Serialize a document snapshot the way a schema-driven engine would, for
/// the handful of node and mark types tests use.
fn snapshot_html(node: &serde_json::Value, out: &mut String) {
    let children = |out: &mut String| {
        for child in node["content"].as_array().into_iter().flatten() {
            snapshot_html(child, out);
        }
    };
    match node["type"].as_str() {
        Some("doc") => children(out),
        Some("paragraph") => {
            out.push_str("<p>");
            children(out);
            out.push_str("</p>");
        }
        Some("heading") => {
            let level = node["attrs"]["level"].as_u64().unwrap_or(1);
            out.push_str(&format!("<h{level}>"));
            children(out);
            out.push_str(&format!("</h{level}>"));
        }
        Some("text") => {
            let tags: Vec<&str> = node["marks"]
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(|mark| match mark["type"].as_str() {
                    Some("bold") => Some("strong"),
                    Some("italic") => Some("em"),
                    Some("code") => Some("code"),
                    _ => None,
                })
                .collect();
            for tag in &tags {
                out.push_str(&format!("<{tag}>"));
            }
            out.push_str(node["text"].as_str().unwrap_or_default());
            for tag in tags.iter().rev() {
                out.push_str(&format!("</{tag}>"));
            }
        }
        _ => {}
    }
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_html(html: &str) -> Self {
        let engine = Self::new();
        engine.load(&Content::Html(html.to_string()));
        engine
    }

    pub fn with_json(json: serde_json::Value) -> Self {
        let engine = Self::new();
        engine.load(&Content::Json(json));
        engine
    }

    /// Build the way an engine factory would.
    pub fn from_setup(setup: EngineSetup) -> Self {
        let engine = Self::new();
        engine.load(&setup.content);
        engine.state.borrow_mut().editable = setup.editable;
        *engine.setup.borrow_mut() = Some(setup);
        engine
    }

    fn load(&self, content: &Content) {
        let mut state = self.state.borrow_mut();
        match content {
            Content::Html(html) => {
                state.text = strip_tags(html);
                state.html = html.clone();
            }
            Content::Json(value) => {
                let mut html = String::new();
                snapshot_html(value, &mut html);
                state.text = strip_tags(&html);
                state.html = html;
                state.json = value.clone();
            }
        }
    }

    pub fn setup(&self) -> Option<EngineSetup> {
        self.setup.borrow().clone()
    }

    pub fn commands(&self) -> Vec<Command> {
        self.state.borrow().commands.clone()
    }

    pub fn last_command(&self) -> Option<Command> {
        self.state.borrow().commands.last().cloned()
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.borrow().destroyed
    }

    pub fn listener_count(&self, event: EngineEvent) -> usize {
        self.events.listener_count(event)
    }

    pub fn total_listeners(&self) -> usize {
        self.events.total_listeners()
    }

    pub fn set_active(&self, query: ActiveQuery, active: bool) {
        let mut state = self.state.borrow_mut();
        state.active.retain(|q| *q != query);
        if active {
            state.active.push(query);
        }
    }

    /// Make `can(command)` and `run(command)` report false.
    pub fn block(&self, command: Command) {
        self.state.borrow_mut().blocked.push(command);
    }

    pub fn unblock(&self, command: &Command) {
        self.state.borrow_mut().blocked.retain(|c| c != command);
    }

    pub fn set_coords(&self, pos: usize, rect: Rect) {
        let mut state = self.state.borrow_mut();
        state.coords.retain(|(p, _)| *p != pos);
        state.coords.push((pos, rect));
    }

    pub fn set_attribute(&self, mark: MarkType, name: &str, value: &str) {
        self.state
            .borrow_mut()
            .attributes
            .push((mark, name.to_string(), value.to_string()));
    }

    /// Move the selection and notify, as a click or drag would.
    pub fn select(&self, range: SelectionRange) {
        self.state.borrow_mut().selection = range;
        self.events.emit(EngineEvent::Transaction, self);
        self.events.emit(EngineEvent::SelectionUpdate, self);
    }

    /// Replace the document as user typing would, and notify.
    pub fn type_html(&self, html: &str) {
        self.load(&Content::Html(html.to_string()));
        self.events.emit(EngineEvent::Transaction, self);
        self.events.emit(EngineEvent::Update, self);
    }

    /// Emit a bare transaction with no document change.
    pub fn transaction(&self) {
        self.events.emit(EngineEvent::Transaction, self);
    }
}

impl EditorEngine for MockEngine {
    fn run(&self, command: &Command) -> bool {
        {
            let mut state = self.state.borrow_mut();
            if state.destroyed || state.blocked.contains(command) {
                return false;
            }
            state.commands.push(command.clone());
        }
        self.events.emit(EngineEvent::Transaction, self);
        self.events.emit(EngineEvent::Update, self);
        true
    }

    fn can(&self, command: &Command) -> bool {
        let state = self.state.borrow();
        !state.destroyed && !state.blocked.contains(command)
    }

    fn is_active(&self, query: &ActiveQuery) -> bool {
        self.state.borrow().active.contains(query)
    }

    fn attribute(&self, mark: MarkType, name: &str) -> Option<String> {
        self.state
            .borrow()
            .attributes
            .iter()
            .rev()
            .find(|(m, n, _)| *m == mark && n == name)
            .map(|(_, _, value)| value.clone())
    }

    fn selection(&self) -> SelectionRange {
        self.state.borrow().selection
    }

    fn coords_at_pos(&self, pos: usize) -> Option<Rect> {
        self.state
            .borrow()
            .coords
            .iter()
            .find(|(p, _)| *p == pos)
            .map(|(_, rect)| *rect)
    }

    fn html(&self) -> String {
        self.state.borrow().html.clone()
    }

    fn json(&self) -> serde_json::Value {
        self.state.borrow().json.clone()
    }

    fn text(&self) -> String {
        self.state.borrow().text.clone()
    }

    fn set_content(&self, content: &Content) -> Result<(), EditorError> {
        if self.is_destroyed() {
            return Err(EditorError::engine("engine destroyed"));
        }
        self.load(content);
        self.events.emit(EngineEvent::Transaction, self);
        Ok(())
    }

    fn is_editable(&self) -> bool {
        self.state.borrow().editable
    }

    fn set_editable(&self, editable: bool) {
        self.state.borrow_mut().editable = editable;
    }

    fn on(&self, event: EngineEvent, listener: Rc<EngineListener>) -> Subscription {
        self.events.subscribe(event, listener)
    }

    fn destroy(&self) {
        self.state.borrow_mut().destroyed = true;
    }
}

/// Clipboard that records writes.
#[derive(Debug, Default)]
pub struct RecordingClipboard {
    writes: RefCell<Vec<String>>,
}

impl RecordingClipboard {
    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }
}

impl ClipboardPlatform for RecordingClipboard {
    fn write_text(&self, text: &str) {
        self.writes.borrow_mut().push(text.to_string());
    }
}

/// Counts calls; handy as a listener body.
#[derive(Debug, Default, Clone)]
pub struct Counter(Rc<Cell<u32>>);

impl Counter {
    pub fn bump(&self) {
        self.0.set(self.0.get() + 1);
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }
}
