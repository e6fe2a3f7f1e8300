//! `EditorEngine` over a JavaScript engine object.
//!
//! The page supplies an object with the methods declared on [`EngineShim`],
//! typically a thin wrapper around a ProseMirror-based editor. Commands and
//! queries cross the boundary as plain JSON-shaped objects.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ereditor_core::{
    ActiveQuery, Command, Content, EditorEngine, EditorError, EngineEvent, EngineEvents,
    EngineListener, MarkType, Rect, SelectionRange, Subscription,
};
use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(typescript_custom_section)]
const ENGINE_TS: &str = r#"
export type EReditorEngineEvent = "transaction" | "selectionUpdate" | "update";

export interface EReditorEngine {
    run(command: { type: string; [key: string]: unknown }): boolean;
    can(command: { type: string; [key: string]: unknown }): boolean;
    isActive(query: { type: string; [key: string]: unknown }): boolean;
    getAttribute(mark: "textStyle" | "highlight" | "link", name: string): string | undefined;
    selection(): { from: number; to: number };
    coordsAtPos(pos: number): { left: number; right: number; top: number; bottom: number } | null;
    getHTML(): string;
    getJSON(): object;
    getText(): string;
    setContent(content: string | object): void;
    isEditable(): boolean;
    setEditable(editable: boolean): void;
    on(event: EReditorEngineEvent, callback: () => void): void;
    off(event: EReditorEngineEvent, callback: () => void): void;
    destroy(): void;
}
"#;

#[wasm_bindgen]
extern "C" {
    /// A document engine implemented in JavaScript.
    #[wasm_bindgen(typescript_type = "EReditorEngine")]
    pub type EngineShim;

    #[wasm_bindgen(method, catch)]
    fn run(this: &EngineShim, command: &JsValue) -> Result<bool, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn can(this: &EngineShim, command: &JsValue) -> Result<bool, JsValue>;

    #[wasm_bindgen(method, js_name = isActive)]
    fn is_active(this: &EngineShim, query: &JsValue) -> bool;

    #[wasm_bindgen(method, js_name = getAttribute)]
    fn get_attribute(this: &EngineShim, mark: &str, name: &str) -> Option<String>;

    #[wasm_bindgen(method)]
    fn selection(this: &EngineShim) -> JsValue;

    #[wasm_bindgen(method, js_name = coordsAtPos)]
    fn coords_at_pos(this: &EngineShim, pos: u32) -> JsValue;

    #[wasm_bindgen(method, js_name = getHTML)]
    fn get_html(this: &EngineShim) -> String;

    #[wasm_bindgen(method, js_name = getJSON)]
    fn get_json(this: &EngineShim) -> JsValue;

    #[wasm_bindgen(method, js_name = getText)]
    fn get_text(this: &EngineShim) -> String;

    #[wasm_bindgen(method, catch, js_name = setContent)]
    fn set_content(this: &EngineShim, content: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = isEditable)]
    fn is_editable(this: &EngineShim) -> bool;

    #[wasm_bindgen(method, js_name = setEditable)]
    fn set_editable(this: &EngineShim, editable: bool);

    #[wasm_bindgen(method)]
    fn on(this: &EngineShim, event: &str, callback: &Function);

    #[wasm_bindgen(method)]
    fn off(this: &EngineShim, event: &str, callback: &Function);

    #[wasm_bindgen(method)]
    fn destroy(this: &EngineShim);
}

/// Serialize into plain JS objects (not `Map`s).
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Option<JsValue> {
    match value.serialize(&serde_wasm_bindgen::Serializer::json_compatible()) {
        Ok(js) => Some(js),
        Err(e) => {
            tracing::warn!("failed to convert value for JavaScript: {}", e);
            None
        }
    }
}

struct Inner {
    shim: EngineShim,
    events: EngineEvents,
    bridges: RefCell<Vec<(EngineEvent, Closure<dyn Fn()>)>>,
    destroyed: Cell<bool>,
}

impl Inner {
    fn detach(&self) {
        for (event, callback) in self.bridges.borrow_mut().drain(..) {
            self.shim.off(event.as_str(), callback.as_ref().unchecked_ref());
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.detach();
    }
}

/// [`EditorEngine`] backed by an [`EngineShim`]. Cheap to clone.
#[derive(Clone)]
pub struct JsEngine {
    inner: Rc<Inner>,
}

impl JsEngine {
    /// Wrap `shim` and forward its notifications to subscribed listeners.
    pub fn new(shim: EngineShim) -> Self {
        let inner = Rc::new(Inner {
            shim,
            events: EngineEvents::new(),
            bridges: RefCell::new(Vec::new()),
            destroyed: Cell::new(false),
        });

        let bridges = EngineEvent::ALL
            .into_iter()
            .map(|event| {
                let weak = Rc::downgrade(&inner);
                let callback = Closure::<dyn Fn()>::new(move || {
                    if let Some(inner) = weak.upgrade() {
                        let engine = JsEngine { inner };
                        engine.inner.events.emit(event, &engine);
                    }
                });
                inner.shim.on(event.as_str(), callback.as_ref().unchecked_ref());
                (event, callback)
            })
            .collect();
        *inner.bridges.borrow_mut() = bridges;

        Self { inner }
    }

    /// The page's engine object.
    pub fn shim(&self) -> &EngineShim {
        &self.inner.shim
    }

    fn live(&self) -> Option<&EngineShim> {
        (!self.inner.destroyed.get()).then_some(&self.inner.shim)
    }
}

impl EditorEngine for JsEngine {
    fn run(&self, command: &Command) -> bool {
        let (Some(shim), Some(js)) = (self.live(), to_js(command)) else {
            return false;
        };
        shim.run(&js).unwrap_or_else(|e| {
            tracing::warn!(?command, "engine command threw: {:?}", e);
            false
        })
    }

    fn can(&self, command: &Command) -> bool {
        let (Some(shim), Some(js)) = (self.live(), to_js(command)) else {
            return false;
        };
        shim.can(&js).unwrap_or(false)
    }

    fn is_active(&self, query: &ActiveQuery) -> bool {
        let (Some(shim), Some(js)) = (self.live(), to_js(query)) else {
            return false;
        };
        shim.is_active(&js)
    }

    fn attribute(&self, mark: MarkType, name: &str) -> Option<String> {
        self.live()?
            .get_attribute(mark.as_str(), name)
            .filter(|value| !value.is_empty())
    }

    fn selection(&self) -> SelectionRange {
        self.live()
            .and_then(|shim| serde_wasm_bindgen::from_value(shim.selection()).ok())
            .unwrap_or_default()
    }

    fn coords_at_pos(&self, pos: usize) -> Option<Rect> {
        let coords = self.live()?.coords_at_pos(pos as u32);
        if coords.is_null() || coords.is_undefined() {
            return None;
        }
        serde_wasm_bindgen::from_value(coords).ok()
    }

    fn html(&self) -> String {
        self.live().map(EngineShim::get_html).unwrap_or_default()
    }

    fn json(&self) -> serde_json::Value {
        let Some(shim) = self.live() else {
            return serde_json::Value::Object(Default::default());
        };
        serde_wasm_bindgen::from_value(shim.get_json()).unwrap_or_else(|e| {
            tracing::warn!("engine returned unreadable JSON: {}", e);
            serde_json::Value::Object(Default::default())
        })
    }

    fn text(&self) -> String {
        self.live().map(EngineShim::get_text).unwrap_or_default()
    }

    fn set_content(&self, content: &Content) -> Result<(), EditorError> {
        let Some(shim) = self.live() else {
            return Ok(());
        };
        let js = match content {
            Content::Html(html) => JsValue::from_str(html),
            Content::Json(json) => {
                to_js(json).ok_or_else(|| EditorError::engine("content is not representable"))?
            }
        };
        shim.set_content(&js)
            .map_err(|e| EditorError::engine(format!("setContent threw: {e:?}")))
    }

    fn is_editable(&self) -> bool {
        self.live().is_some_and(EngineShim::is_editable)
    }

    fn set_editable(&self, editable: bool) {
        if let Some(shim) = self.live() {
            shim.set_editable(editable);
        }
    }

    fn on(&self, event: EngineEvent, listener: Rc<EngineListener>) -> Subscription {
        self.inner.events.subscribe(event, listener)
    }

    fn destroy(&self) {
        if self.inner.destroyed.replace(true) {
            return;
        }
        self.inner.detach();
        self.inner.shim.destroy();
        tracing::debug!("engine destroyed");
    }
}
