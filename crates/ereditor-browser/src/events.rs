//! DOM event wiring.
//!
//! Chrome controls are handled by delegation on the wrapper: a click is
//! resolved to the nearest `data-action` element and decoded into a
//! [`UiAction`]. Document-level pointer and key events feed the editor's
//! [`HostEvents`](ereditor_core::HostEvents). Image paste and drop are
//! intercepted in the capture phase, before the engine sees them.

use std::rc::{Rc, Weak};

use ereditor_core::view::{OVERLAY_ATTR, UPLOAD_ATTR};
use ereditor_core::{
    EditorEngine, Field, HostEvent, Key, NodeId, RichTextEditor, UiAction, UiEvent,
};
use gloo_events::{EventListener, EventListenerOptions, EventListenerPhase};
use js_sys::Uint8Array;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    ClipboardEvent, DataTransfer, DragEvent, Element, Event, File, HtmlInputElement, KeyboardEvent,
};

use crate::render::Renderer;

const ACTION_SELECTOR: &str = "[data-action]";

/// Attach every listener the editor chrome needs. Dropping the returned
/// listeners detaches them.
pub fn install<E: EditorEngine + 'static>(
    editor: &Rc<RichTextEditor<E>>,
    renderer: &Rc<Renderer>,
) -> Vec<EventListener> {
    let document = gloo_utils::document();
    let skeleton = renderer.skeleton();
    let weak = Rc::downgrade(editor);
    let mut listeners = Vec::new();

    let editor = weak.clone();
    listeners.push(EventListener::new(&document, "mousedown", move |event| {
        let Some(editor) = editor.upgrade() else {
            return;
        };
        let target = event_element(event).and_then(|el| widget_id(&el));
        editor.dispatch_host(&HostEvent::PointerDown { target });
    }));

    let editor = weak.clone();
    listeners.push(EventListener::new(&document, "keydown", move |event| {
        let Some(editor) = editor.upgrade() else {
            return;
        };
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let key = Key::from_dom(&event.key());
        editor.dispatch_host(&HostEvent::KeyDown { key });
    }));

    // Keep the engine's selection when pressing a chrome control.
    listeners.push(EventListener::new_with_options(
        &skeleton.wrapper,
        "mousedown",
        EventListenerOptions::enable_prevent_default(),
        |event| {
            if event_element(event).and_then(|el| closest(&el, ACTION_SELECTOR)).is_some() {
                event.prevent_default();
            }
        },
    ));

    let editor = weak.clone();
    let wrapper = skeleton.wrapper.clone();
    listeners.push(EventListener::new(&skeleton.wrapper, "click", move |event| {
        let Some(editor) = editor.upgrade() else {
            return;
        };
        let Some(target) = event_element(event) else {
            return;
        };
        if target.has_attribute(OVERLAY_ATTR) {
            editor.handle(UiEvent::OverlayClick);
            return;
        }
        let Some(control) = closest(&target, ACTION_SELECTOR) else {
            return;
        };
        if !wrapper.contains(Some(&*control)) {
            return;
        }
        let Some(raw) = control.get_attribute("data-action") else {
            return;
        };
        match UiAction::decode(&raw) {
            Ok(action) => editor.handle(UiEvent::Action(action)),
            Err(e) => tracing::warn!("unreadable chrome action {:?}: {}", raw, e),
        }
    }));

    let editor = weak.clone();
    listeners.push(EventListener::new(&skeleton.dialog, "input", move |event| {
        let Some(editor) = editor.upgrade() else {
            return;
        };
        let Some((field, input)) = field_input(event) else {
            return;
        };
        editor.handle(UiEvent::Input {
            field,
            value: input.value(),
        });
    }));

    let editor = weak.clone();
    listeners.push(EventListener::new(&skeleton.dialog, "keydown", move |event| {
        let Some(editor) = editor.upgrade() else {
            return;
        };
        let (Some((field, _)), Some(key)) = (field_input(event), event.dyn_ref::<KeyboardEvent>())
        else {
            return;
        };
        let key = Key::from_dom(&key.key());
        if matches!(key, Key::Other(_)) {
            return;
        }
        editor.handle(UiEvent::FieldKey { field, key });
    }));

    let editor = weak.clone();
    let render = Rc::downgrade(renderer);
    listeners.push(EventListener::new(&skeleton.dialog, "change", move |event| {
        let Some(input) = event_element(event)
            .filter(|el| el.has_attribute(UPLOAD_ATTR))
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        upload_into_dialog(editor.clone(), render.clone(), file);
    }));

    let options = EventListenerOptions {
        phase: EventListenerPhase::Capture,
        passive: false,
    };
    let editor = weak.clone();
    listeners.push(EventListener::new_with_options(
        &skeleton.content,
        "paste",
        options,
        move |event| {
            let data = event
                .dyn_ref::<ClipboardEvent>()
                .and_then(ClipboardEvent::clipboard_data);
            intercept_image(&editor, event, data);
        },
    ));

    let editor = weak;
    listeners.push(EventListener::new_with_options(
        &skeleton.content,
        "drop",
        options,
        move |event| {
            let data = event.dyn_ref::<DragEvent>().and_then(DragEvent::data_transfer);
            intercept_image(&editor, event, data);
        },
    ));

    listeners
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn closest(el: &Element, selector: &str) -> Option<Element> {
    el.closest(selector).ok().flatten()
}

/// The innermost rendered widget containing `el`.
fn widget_id(el: &Element) -> Option<NodeId> {
    let widget = closest(el, "[data-node]")?;
    let raw = widget.get_attribute("data-node")?;
    raw.parse().ok().map(NodeId)
}

fn field_input(event: &Event) -> Option<(Field, HtmlInputElement)> {
    let input = event_element(event)?.dyn_into::<HtmlInputElement>().ok()?;
    let field = Field::parse(&input.get_attribute("data-field")?)?;
    Some((field, input))
}

/// Read a file's bytes.
pub async fn read_file(file: &File) -> Result<Vec<u8>, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

fn declared_mime(file: &File) -> Option<String> {
    Some(file.type_()).filter(|mime| !mime.is_empty())
}

fn upload_into_dialog<E: EditorEngine + 'static>(
    editor: Weak<RichTextEditor<E>>,
    renderer: Weak<Renderer>,
    file: File,
) {
    wasm_bindgen_futures::spawn_local(async move {
        let bytes = match read_file(&file).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("failed to read uploaded image: {:?}", e);
                return;
            }
        };
        let Some(editor) = editor.upgrade() else {
            return;
        };
        if !editor.load_image_file(&bytes, declared_mime(&file).as_deref()) {
            return;
        }
        if let Some(renderer) = renderer.upgrade() {
            renderer.sync_image_src(&editor);
        }
    });
}

fn intercept_image<E: EditorEngine + 'static>(
    editor: &Weak<RichTextEditor<E>>,
    event: &Event,
    data: Option<DataTransfer>,
) {
    let (Some(editor), Some(data)) = (editor.upgrade(), data) else {
        return;
    };
    let items = data.items();
    let types: Vec<String> = (0..items.length())
        .filter_map(|i| items.get(i))
        .map(|item| item.type_())
        .collect();
    let Some(index) = editor.intercepts_image(types.iter().map(String::as_str)) else {
        return;
    };
    event.prevent_default();
    event.stop_propagation();

    let Some(file) = items
        .get(index as u32)
        .and_then(|item| item.get_as_file().ok().flatten())
    else {
        tracing::warn!("image item {} has no file", index);
        return;
    };
    let Some(inserter) = editor.image_inserter() else {
        return;
    };
    let mime = declared_mime(&file);
    wasm_bindgen_futures::spawn_local(async move {
        let read = async { read_file(&file).await.map_err(|e| format!("{:?}", e)) };
        inserter.insert_from(read, mime).await;
    });
}
