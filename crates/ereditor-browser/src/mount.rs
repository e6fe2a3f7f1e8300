//! Mounting an editor into a page element.

use std::cell::OnceCell;
use std::marker::PhantomData;
use std::rc::Rc;

use ereditor_core::{
    EditorEngine, EditorError, EditorHost, EngineSetup, HostEvents, MountHost, RichTextEditor,
    Subscription,
};
use gloo_events::EventListener;
use web_sys::{Document, Element, HtmlElement};

use crate::clipboard::BrowserClipboard;
use crate::events;
use crate::render::{Renderer, Skeleton};

/// A container found by selector, plus the skeleton built for it once the
/// engine is created.
pub struct BrowserMount {
    container: Element,
    skeleton: OnceCell<Skeleton>,
}

impl BrowserMount {
    pub fn container(&self) -> &Element {
        &self.container
    }
}

/// [`MountHost`] over the page document. `factory` builds the engine on the
/// content element.
pub struct BrowserHost<E, F> {
    document: Document,
    factory: F,
    _engine: PhantomData<fn() -> E>,
}

impl<E, F> BrowserHost<E, F>
where
    F: Fn(&HtmlElement, EngineSetup) -> Result<E, EditorError>,
{
    pub fn new(factory: F) -> Self {
        Self::with_document(gloo_utils::document(), factory)
    }

    pub fn with_document(document: Document, factory: F) -> Self {
        Self {
            document,
            factory,
            _engine: PhantomData,
        }
    }
}

/// The mounted chrome. Dropping it detaches listeners and removes the
/// rendered tree from the container.
pub struct BrowserView {
    renderer: Rc<Renderer>,
    _listeners: Vec<EventListener>,
    _chrome: Subscription,
}

impl BrowserView {
    pub fn skeleton(&self) -> &Skeleton {
        self.renderer.skeleton()
    }
}

impl Drop for BrowserView {
    fn drop(&mut self) {
        self.renderer.skeleton().wrapper.remove();
    }
}

impl<E, F> MountHost for BrowserHost<E, F>
where
    E: EditorEngine + 'static,
    F: Fn(&HtmlElement, EngineSetup) -> Result<E, EditorError>,
{
    type Engine = E;
    type Mount = BrowserMount;
    type View = BrowserView;

    fn locate(&self, selector: &str) -> Option<BrowserMount> {
        let container = match self.document.query_selector(selector) {
            Ok(found) => found?,
            Err(e) => {
                tracing::warn!(selector, "invalid selector: {:?}", e);
                return None;
            }
        };
        Some(BrowserMount {
            container,
            skeleton: OnceCell::new(),
        })
    }

    fn editor_host(&self, _mount: &BrowserMount) -> EditorHost {
        EditorHost {
            events: HostEvents::new(),
            clipboard: Rc::new(BrowserClipboard),
        }
    }

    fn create_engine(&self, mount: &BrowserMount, setup: EngineSetup) -> Result<E, EditorError> {
        let skeleton = Skeleton::build(&self.document)
            .map_err(|e| EditorError::host(format!("failed to build editor tree: {e:?}")))?;
        mount
            .container
            .append_child(&skeleton.wrapper)
            .map_err(|e| EditorError::host(format!("failed to attach editor tree: {e:?}")))?;
        let engine = (self.factory)(&skeleton.content, setup);
        if engine.is_err() {
            skeleton.wrapper.remove();
            return engine;
        }
        let _ = mount.skeleton.set(skeleton);
        engine
    }

    fn attach(
        &self,
        mount: BrowserMount,
        editor: &Rc<RichTextEditor<E>>,
    ) -> Result<BrowserView, EditorError> {
        let skeleton = mount
            .skeleton
            .into_inner()
            .ok_or_else(|| EditorError::host("editor tree missing at attach"))?;
        let renderer = Renderer::new(skeleton);

        let weak = Rc::downgrade(editor);
        let scheduler = Rc::downgrade(&renderer);
        let chrome = editor.subscribe_chrome(Rc::new(move || {
            if let Some(renderer) = scheduler.upgrade() {
                renderer.schedule(weak.clone());
            }
        }));
        let listeners = events::install(editor, &renderer);
        renderer.render(editor);
        tracing::debug!("editor chrome attached");

        Ok(BrowserView {
            renderer,
            _listeners: listeners,
            _chrome: chrome,
        })
    }
}
