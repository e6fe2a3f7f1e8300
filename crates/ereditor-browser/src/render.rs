//! Chrome rendering into the DOM.
//!
//! Each slot is replaced only when its markup changed. The dialog shell is
//! replaced only when a different dialog opens, so the focused input keeps
//! its caret while the user types; the dialog buttons are swapped
//! independently.
//!
//! Rendering is deferred to a microtask. Change notifications arrive while
//! the editor is mid-update, and rendering reads editor state.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use ereditor_core::view::DIALOG_ACTIONS_SLOT;
use ereditor_core::{ActiveDialog, Chrome, EditorEngine, Field, MenuSize, RichTextEditor};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

/// The elements an editor renders into.
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub wrapper: HtmlElement,
    pub toolbar: HtmlElement,
    pub bubble: HtmlElement,
    /// The engine mounts its editable surface here.
    pub content: HtmlElement,
    pub status: HtmlElement,
    pub dialog: HtmlElement,
}

impl Skeleton {
    /// Create the (detached) element tree.
    pub fn build(document: &Document) -> Result<Self, JsValue> {
        let wrapper = element(document, "div")?;
        wrapper.set_class_name("editor-wrapper");
        let toolbar = slot(document, "toolbar")?;
        let bubble = slot(document, "bubble")?;
        let content = element(document, "div")?;
        content.set_class_name("editor-content");
        let status = slot(document, "status")?;
        let dialog = slot(document, "dialog")?;
        for child in [&toolbar, &bubble, &content, &status, &dialog] {
            wrapper.append_child(child)?;
        }
        Ok(Self {
            wrapper,
            toolbar,
            bubble,
            content,
            status,
            dialog,
        })
    }
}

fn element(document: &Document, tag: &str) -> Result<HtmlElement, JsValue> {
    Ok(document.create_element(tag)?.unchecked_into())
}

fn slot(document: &Document, name: &str) -> Result<HtmlElement, JsValue> {
    let el = element(document, "div")?;
    el.set_attribute("data-slot", name)?;
    Ok(el)
}

#[derive(Default)]
struct Rendered {
    chrome: Chrome,
    bubble_size: Option<MenuSize>,
}

/// Applies [`Chrome`] snapshots to a [`Skeleton`].
pub struct Renderer {
    skeleton: Skeleton,
    rendered: RefCell<Rendered>,
    pending: Cell<bool>,
}

impl Renderer {
    pub fn new(skeleton: Skeleton) -> Rc<Self> {
        Rc::new(Self {
            skeleton,
            rendered: RefCell::new(Rendered::default()),
            pending: Cell::new(false),
        })
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// Queue a render. Bursts of notifications coalesce into one.
    pub fn schedule<E: EditorEngine + 'static>(self: &Rc<Self>, editor: Weak<RichTextEditor<E>>) {
        if self.pending.replace(true) {
            return;
        }
        let renderer = Rc::downgrade(self);
        wasm_bindgen_futures::spawn_local(async move {
            let Some(renderer) = renderer.upgrade() else {
                return;
            };
            renderer.pending.set(false);
            if let Some(editor) = editor.upgrade() {
                renderer.render(&editor);
            }
        });
    }

    /// Render now, then measure the bubble menu and re-place it if its size
    /// changed.
    pub fn render<E: EditorEngine + 'static>(&self, editor: &RichTextEditor<E>) {
        if editor.is_destroyed() {
            return;
        }
        self.apply(&editor.chrome());

        let size = self.measure_bubble();
        let resized = {
            let mut rendered = self.rendered.borrow_mut();
            let resized = rendered.bubble_size != size;
            rendered.bubble_size = size;
            resized
        };
        if resized {
            tracing::trace!(?size, "bubble menu resized");
            editor.set_bubble_size(size);
            self.apply(&editor.chrome());
        }
    }

    fn apply(&self, next: &Chrome) {
        let mut rendered = self.rendered.borrow_mut();
        let prev = &rendered.chrome;
        let skeleton = &self.skeleton;

        if next.wrapper_class != prev.wrapper_class {
            skeleton.wrapper.set_class_name(next.wrapper_class);
        }
        update_slot(&skeleton.toolbar, &prev.toolbar, &next.toolbar);
        update_slot(&skeleton.bubble, &prev.bubble, &next.bubble);
        update_slot(&skeleton.status, &prev.status, &next.status);

        let new_shell = next.dialog_kind != prev.dialog_kind;
        if new_shell {
            skeleton
                .dialog
                .set_inner_html(next.dialog.as_deref().unwrap_or(""));
        }
        if new_shell || next.dialog_actions != prev.dialog_actions {
            if let Some(actions) = query(&skeleton.dialog, &format!("[{DIALOG_ACTIONS_SLOT}]")) {
                actions.set_inner_html(next.dialog_actions.as_deref().unwrap_or(""));
            }
        }
        if new_shell {
            focus_autofocus(&skeleton.dialog);
        }

        rendered.chrome = next.clone();
    }

    fn measure_bubble(&self) -> Option<MenuSize> {
        let menu = self.skeleton.bubble.first_element_child()?;
        let rect = menu.get_bounding_client_rect();
        Some(MenuSize {
            width: rect.width(),
            height: rect.height(),
        })
    }

    /// Push the image dialog's source into its input after a file upload.
    /// The shell is not rebuilt for value changes.
    pub fn sync_image_src<E: EditorEngine + 'static>(&self, editor: &RichTextEditor<E>) {
        let src = match editor.toolbar().dialog() {
            Some(ActiveDialog::Image(image)) => image.src().to_string(),
            _ => return,
        };
        let selector = format!("[data-field=\"{}\"]", Field::ImageSrc.as_str());
        if let Some(input) = query(&self.skeleton.dialog, &selector)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_value(&src);
        }
    }
}

fn update_slot(slot: &HtmlElement, prev: &Option<String>, next: &Option<String>) {
    if prev != next {
        slot.set_inner_html(next.as_deref().unwrap_or(""));
    }
}

pub(crate) fn query(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

fn focus_autofocus(root: &Element) {
    let Some(input) = query(root, "[autofocus]").and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    if let Err(e) = input.focus() {
        tracing::debug!("could not focus dialog input: {:?}", e);
    }
}
