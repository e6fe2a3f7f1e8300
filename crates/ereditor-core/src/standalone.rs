//! Mount-by-selector entry point and the imperative instance handle.

use std::cell::RefCell;
use std::rc::Rc;

use crate::editor::{EditorCallbacks, EditorHost, RichTextEditor};
use crate::engine::{Content, EditorEngine, EngineSetup};
use crate::error::EditorError;
use crate::options::EditorOptions;

/// What a platform provides to mount an editor into a container it finds by
/// selector.
pub trait MountHost {
    type Engine: EditorEngine + 'static;
    /// A located container.
    type Mount;
    /// Keeps the rendered chrome and its listeners alive. Dropping it
    /// removes them.
    type View;

    /// Find the container. Must not render anything.
    fn locate(&self, selector: &str) -> Option<Self::Mount>;

    fn editor_host(&self, mount: &Self::Mount) -> EditorHost;

    fn create_engine(
        &self,
        mount: &Self::Mount,
        setup: EngineSetup,
    ) -> Result<Self::Engine, EditorError>;

    fn attach(
        &self,
        mount: Self::Mount,
        editor: &Rc<RichTextEditor<Self::Engine>>,
    ) -> Result<Self::View, EditorError>;
}

struct Mounted<E: EditorEngine + 'static, V> {
    editor: Rc<RichTextEditor<E>>,
    view: V,
}

/// Handle returned by [`create`]. After [`destroy`](Self::destroy) every
/// getter returns an empty value and every setter does nothing.
pub struct StandaloneInstance<E: EditorEngine + 'static, V> {
    mounted: RefCell<Option<Mounted<E, V>>>,
}

/// Mount an editor into the element matching `selector`.
///
/// Fails with [`EditorError::MountTargetNotFound`] before any engine is built
/// or anything is rendered.
pub fn create<H: MountHost>(
    host: &H,
    selector: &str,
    options: EditorOptions,
    callbacks: EditorCallbacks<H::Engine>,
) -> Result<StandaloneInstance<H::Engine, H::View>, EditorError> {
    let mount = host
        .locate(selector)
        .ok_or_else(|| EditorError::MountTargetNotFound {
            selector: selector.to_string(),
        })?;
    let editor_host = host.editor_host(&mount);
    let editor = RichTextEditor::mount(
        |setup| host.create_engine(&mount, setup),
        options,
        callbacks,
        editor_host,
    )?;
    let editor = Rc::new(editor);
    let view = host.attach(mount, &editor)?;
    tracing::debug!(selector, "standalone editor created");
    Ok(StandaloneInstance {
        mounted: RefCell::new(Some(Mounted { editor, view })),
    })
}

impl<E: EditorEngine + 'static, V> StandaloneInstance<E, V> {
    pub fn editor(&self) -> Option<Rc<RichTextEditor<E>>> {
        self.mounted.borrow().as_ref().map(|m| m.editor.clone())
    }

    pub fn is_destroyed(&self) -> bool {
        self.mounted.borrow().is_none()
    }

    /// Unmount the chrome and tear down the engine. Safe to call repeatedly.
    pub fn destroy(&self) {
        let Some(Mounted { editor, view }) = self.mounted.borrow_mut().take() else {
            return;
        };
        drop(view);
        editor.destroy();
        tracing::debug!("standalone editor destroyed");
    }

    /// Engine HTML, or `""` after destroy.
    pub fn get_html(&self) -> String {
        self.editor()
            .map(|editor| editor.engine().html())
            .unwrap_or_default()
    }

    /// Engine JSON snapshot, or `{}` after destroy.
    pub fn get_json(&self) -> serde_json::Value {
        self.editor()
            .map(|editor| editor.engine().json())
            .unwrap_or_else(|| serde_json::Value::Object(Default::default()))
    }

    pub fn set_content(&self, markup: &str) -> Result<(), EditorError> {
        match self.editor() {
            Some(editor) => editor.engine().set_content(&Content::Html(markup.to_string())),
            None => Ok(()),
        }
    }

    pub fn set_editable(&self, editable: bool) {
        if let Some(editor) = self.editor() {
            editor.engine().set_editable(editable);
        }
    }
}
