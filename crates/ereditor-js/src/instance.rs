//! `create()` and the instance handle exposed to JavaScript.

use std::rc::Rc;

use ereditor_browser::{BrowserHost, BrowserView};
use ereditor_core::{EditorCallbacks, EditorError, EditorOptions, EngineSetup, StandaloneInstance};
use js_sys::{Function, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

use crate::engine::{EngineShim, JsEngine, to_js};

#[wasm_bindgen(typescript_custom_section)]
const OPTIONS_TS: &str = r#"
export interface EReditorSetup {
    content: string | object;
    editable: boolean;
    placeholder?: string;
    interceptImages: boolean;
}

export interface EReditorOptions {
    engine: (element: HTMLElement, setup: EReditorSetup) => EReditorEngine;
    content?: string | object;
    placeholder?: string;
    editable?: boolean;
    showToolbar?: boolean;
    showBubbleMenu?: boolean;
    showWordCount?: boolean;
    showExportPanel?: boolean;
    showFullscreenToggle?: boolean;
    enableImageUpload?: boolean;
    labels?: Record<string, string>;
    colors?: string[];
    onChange?: (html: string) => void;
    onChangeJSON?: (json: object) => void;
    onReady?: (engine: EReditorEngine) => void;
}
"#;

/// A mounted editor.
#[wasm_bindgen]
pub struct EditorInstance {
    inner: StandaloneInstance<JsEngine, BrowserView>,
}

#[wasm_bindgen]
impl EditorInstance {
    /// Unmount the editor and destroy its engine. Safe to call repeatedly.
    #[wasm_bindgen]
    pub fn destroy(&self) {
        self.inner.destroy();
    }

    #[wasm_bindgen(js_name = isDestroyed)]
    pub fn is_destroyed(&self) -> bool {
        self.inner.is_destroyed()
    }

    /// Engine HTML, or `""` after destroy.
    #[wasm_bindgen(js_name = getHTML)]
    pub fn get_html(&self) -> String {
        self.inner.get_html()
    }

    /// Engine JSON snapshot, or `{}` after destroy.
    #[wasm_bindgen(js_name = getJSON)]
    pub fn get_json(&self) -> Result<JsValue, JsError> {
        to_js(&self.inner.get_json()).ok_or_else(|| JsError::new("Serialization error"))
    }

    /// Replace the document. Does not fire `onChange`.
    #[wasm_bindgen(js_name = setContent)]
    pub fn set_content(&self, html: &str) -> Result<(), JsError> {
        self.inner.set_content(html).map_err(js_error)
    }

    #[wasm_bindgen(js_name = setEditable)]
    pub fn set_editable(&self, editable: bool) {
        self.inner.set_editable(editable);
    }
}

fn js_error(e: EditorError) -> JsError {
    JsError::new(&e.to_string())
}

/// Mount an editor into the element matching `selector`.
#[wasm_bindgen]
pub fn create(
    selector: &str,
    #[wasm_bindgen(unchecked_param_type = "EReditorOptions")] options: JsValue,
) -> Result<EditorInstance, JsError> {
    let parsed = parse_options(&options)?;
    let callbacks = callbacks(&options);
    let factory = function(&options, "engine");
    let host = BrowserHost::new(move |element: &HtmlElement, setup: EngineSetup| {
        build_engine(factory.as_ref(), element, &setup)
    });
    let inner = ereditor_core::create(&host, selector, parsed, callbacks).map_err(js_error)?;
    Ok(EditorInstance { inner })
}

fn parse_options(options: &JsValue) -> Result<EditorOptions, JsError> {
    if options.is_undefined() || options.is_null() {
        return Ok(EditorOptions::default());
    }
    serde_wasm_bindgen::from_value(options.clone())
        .map_err(|e| JsError::new(&format!("Invalid options: {}", e)))
}

fn function(options: &JsValue, key: &str) -> Option<Function> {
    if !options.is_object() {
        return None;
    }
    Reflect::get(options, &JsValue::from_str(key))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

fn build_engine(
    factory: Option<&Function>,
    element: &HtmlElement,
    setup: &EngineSetup,
) -> Result<JsEngine, EditorError> {
    let factory = factory.ok_or_else(|| {
        EditorError::engine("options.engine must be a function (element, setup) => engine")
    })?;
    let setup = to_js(setup).ok_or_else(|| EditorError::engine("unrepresentable engine setup"))?;
    let shim = factory
        .call2(&JsValue::NULL, element, &setup)
        .map_err(|e| EditorError::engine(format!("engine factory threw: {e:?}")))?;
    if !shim.is_object() {
        return Err(EditorError::engine("engine factory did not return an object"));
    }
    Ok(JsEngine::new(shim.unchecked_into::<EngineShim>()))
}

fn report(name: &str, result: Result<JsValue, JsValue>) {
    if let Err(e) = result {
        tracing::warn!("{} callback threw: {:?}", name, e);
    }
}

fn callbacks(options: &JsValue) -> EditorCallbacks<JsEngine> {
    let mut callbacks = EditorCallbacks::default();

    if let Some(f) = function(options, "onChange") {
        callbacks.on_change = Some(Rc::new(move |html: &str| {
            report("onChange", f.call1(&JsValue::NULL, &JsValue::from_str(html)));
        }));
    }

    if let Some(f) = function(options, "onChangeJSON") {
        callbacks.on_change_json = Some(Rc::new(move |json: &serde_json::Value| {
            if let Some(json) = to_js(json) {
                report("onChangeJSON", f.call1(&JsValue::NULL, &json));
            }
        }));
    }

    if let Some(f) = function(options, "onReady") {
        callbacks.on_ready = Some(Box::new(move |engine: &Rc<JsEngine>| {
            report("onReady", f.call1(&JsValue::NULL, engine.shim()));
        }));
    }

    callbacks
}
