//! The root editor: engine construction, change notification, fullscreen and
//! UI event routing.

use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};

use crate::actions::{PickerKind, UiAction};
use crate::actions::UiEvent;
use crate::bubble_menu::{BubbleMenu, MenuSize};
use crate::emitter::{EventEmitter, Subscription};
use crate::engine::{EditorEngine, EngineEvent, EngineSetup};
use crate::error::EditorError;
use crate::export::ClipboardPlatform;
use crate::host::{HostEvent, HostEvents, Key, dispatch_host_event};
use crate::image::{ImageInserter, first_image_item};
use crate::labels::Labels;
use crate::options::EditorOptions;
use crate::status_bar::StatusBar;
use crate::toolbar::{Toolbar, command_enabled, dialog_command};
use crate::view::{
    Chrome, render_bubble, render_dialog, render_dialog_actions, render_status, render_toolbar,
    wrapper_class,
};

pub type ChangeCallback = Rc<dyn Fn(&str)>;
pub type JsonChangeCallback = Rc<dyn Fn(&serde_json::Value)>;
pub type ReadyCallback<E> = Box<dyn FnOnce(&Rc<E>)>;

/// Caller hooks. All optional.
pub struct EditorCallbacks<E> {
    /// Engine HTML after every content change.
    pub on_change: Option<ChangeCallback>,
    /// Engine JSON snapshot after every content change.
    pub on_change_json: Option<JsonChangeCallback>,
    /// Called once, right after the engine is constructed.
    pub on_ready: Option<ReadyCallback<E>>,
}

impl<E> Default for EditorCallbacks<E> {
    fn default() -> Self {
        Self {
            on_change: None,
            on_change_json: None,
            on_ready: None,
        }
    }
}

/// Platform services the editor needs from its host.
#[derive(Clone)]
pub struct EditorHost {
    pub events: HostEvents,
    pub clipboard: Rc<dyn ClipboardPlatform>,
}

/// Listener for "the chrome needs re-rendering".
pub type ChangeListener = dyn Fn();

pub struct RichTextEditor<E: EditorEngine + 'static> {
    engine: Rc<E>,
    options: EditorOptions,
    labels: Labels,
    host: EditorHost,
    toolbar: RefCell<Toolbar>,
    bubble: RefCell<BubbleMenu>,
    fullscreen: Rc<Cell<bool>>,
    escape_listener: Rc<RefCell<Option<Subscription>>>,
    subscriptions: RefCell<Vec<Subscription>>,
    changed: EventEmitter<ChangeListener>,
    alive: RefCell<Option<Rc<()>>>,
    destroyed: Cell<bool>,
}

impl<E: EditorEngine + 'static> RichTextEditor<E> {
    /// Resolve options, build the engine through `factory` and wire up
    /// notifications.
    pub fn mount<F>(
        factory: F,
        options: EditorOptions,
        callbacks: EditorCallbacks<E>,
        host: EditorHost,
    ) -> Result<Self, EditorError>
    where
        F: FnOnce(EngineSetup) -> Result<E, EditorError>,
    {
        let labels = Labels::resolve(options.labels.as_ref());
        let setup = EngineSetup {
            content: options.initial_content(),
            editable: options.editable,
            placeholder: options.placeholder.clone(),
            intercept_images: options.enable_image_upload,
        };
        let engine = Rc::new(factory(setup)?);
        let changed: EventEmitter<ChangeListener> = EventEmitter::new();

        let mut subscriptions = Vec::new();
        let EditorCallbacks {
            on_change,
            on_change_json,
            on_ready,
        } = callbacks;
        if on_change.is_some() || on_change_json.is_some() {
            subscriptions.push(engine.on(
                EngineEvent::Update,
                Rc::new(move |engine: &dyn EditorEngine| {
                    if let Some(on_change) = &on_change {
                        on_change(&engine.html());
                    }
                    if let Some(on_change_json) = &on_change_json {
                        on_change_json(&engine.json());
                    }
                }),
            ));
        }

        let mut bubble = BubbleMenu::new();
        if options.show_bubble_menu {
            bubble.mount(&*engine);
        }
        // After the bubble menu, so renders see its fresh coordinates.
        for event in [EngineEvent::Transaction, EngineEvent::Update] {
            let changed = changed.clone();
            subscriptions.push(engine.on(
                event,
                Rc::new(move |_: &dyn EditorEngine| notify(&changed)),
            ));
        }

        let toolbar = Toolbar::new(options.colors.as_deref());
        tracing::debug!(
            toolbar = options.show_toolbar,
            bubble_menu = options.show_bubble_menu,
            image_upload = options.enable_image_upload,
            "editor mounted"
        );

        let editor = Self {
            engine,
            options,
            labels,
            host,
            toolbar: RefCell::new(toolbar),
            bubble: RefCell::new(bubble),
            fullscreen: Rc::new(Cell::new(false)),
            escape_listener: Rc::new(RefCell::new(None)),
            subscriptions: RefCell::new(subscriptions),
            changed,
            alive: RefCell::new(Some(Rc::new(()))),
            destroyed: Cell::new(false),
        };

        if let Some(on_ready) = on_ready {
            on_ready(&editor.engine);
        }
        Ok(editor)
    }

    pub fn engine(&self) -> &Rc<E> {
        &self.engine
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn host_events(&self) -> &HostEvents {
        &self.host.events
    }

    pub fn toolbar(&self) -> Ref<'_, Toolbar> {
        self.toolbar.borrow()
    }

    pub fn bubble_menu(&self) -> Ref<'_, BubbleMenu> {
        self.bubble.borrow()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.get()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    /// Get notified whenever the rendered chrome may have changed.
    pub fn subscribe_chrome(&self, listener: Rc<ChangeListener>) -> Subscription {
        self.changed.subscribe(listener)
    }

    /// Route one UI event. Ignored after destroy.
    pub fn handle(&self, event: UiEvent) {
        if self.is_destroyed() {
            tracing::debug!(?event, "event after destroy ignored");
            return;
        }
        if let UiEvent::Action(UiAction::ToggleFullscreen) = event {
            self.toggle_fullscreen();
            return;
        }
        let Ok(mut toolbar) = self.toolbar.try_borrow_mut() else {
            tracing::warn!(?event, "re-entrant UI event ignored");
            return;
        };
        let engine: &dyn EditorEngine = &*self.engine;
        let command = match event {
            UiEvent::Action(UiAction::Command { command }) => {
                if command_enabled(engine, &command) {
                    Some(command)
                } else {
                    tracing::debug!(?command, "disabled control ignored");
                    None
                }
            }
            UiEvent::Action(UiAction::OpenDialog { dialog }) => {
                toolbar.open_dialog(dialog, engine);
                None
            }
            UiEvent::Action(UiAction::Picker { picker, op }) => {
                toolbar.picker_op(picker, &op, &self.host.events)
            }
            UiEvent::Action(UiAction::Export { op }) => {
                toolbar.export_op(op, engine, &*self.host.clipboard);
                None
            }
            UiEvent::Action(UiAction::Dialog { op }) => {
                toolbar.dialog_button(op).and_then(dialog_command)
            }
            UiEvent::Action(UiAction::ToggleFullscreen) => None,
            UiEvent::Input { field, value } => {
                toolbar.dialog_input(field, value);
                None
            }
            UiEvent::FieldKey { key, .. } => toolbar.dialog_key(&key).and_then(dialog_command),
            UiEvent::OverlayClick => toolbar.overlay_click().and_then(dialog_command),
        };
        // Engines notify synchronously while running, and listeners may read
        // the chrome.
        drop(toolbar);
        if let Some(command) = command {
            if !engine.run(&command) {
                tracing::debug!(?command, "command not applied");
            }
        }
        notify(&self.changed);
    }

    /// Deliver a document-level event to the chrome's scoped listeners.
    /// Notifies chrome subscribers when an open picker was dismissed.
    pub fn dispatch_host(&self, event: &HostEvent) {
        if self.is_destroyed() {
            return;
        }
        let before = self.open_pickers();
        dispatch_host_event(&self.host.events, event);
        if self.open_pickers() != before {
            notify(&self.changed);
        }
    }

    fn open_pickers(&self) -> Option<(bool, bool)> {
        let toolbar = self.toolbar.try_borrow().ok()?;
        Some((
            toolbar.picker(PickerKind::TextColor).is_open(),
            toolbar.picker(PickerKind::Highlight).is_open(),
        ))
    }

    /// Enter or leave fullscreen. Escape leaves it; the key listener exists
    /// only while fullscreen is on.
    pub fn toggle_fullscreen(&self) {
        let entering = !self.fullscreen.get();
        self.fullscreen.set(entering);
        if entering {
            let fullscreen: Weak<Cell<bool>> = Rc::downgrade(&self.fullscreen);
            let slot: Weak<RefCell<Option<Subscription>>> = Rc::downgrade(&self.escape_listener);
            let changed = self.changed.clone();
            let subscription = self.host.events.subscribe(Rc::new(move |event: &HostEvent| {
                let HostEvent::KeyDown { key: Key::Escape } = event else {
                    return;
                };
                if let Some(fullscreen) = fullscreen.upgrade() {
                    fullscreen.set(false);
                }
                let released = slot.upgrade().and_then(|slot| slot.borrow_mut().take());
                drop(released);
                tracing::debug!("fullscreen exited by escape");
                notify(&changed);
            }));
            *self.escape_listener.borrow_mut() = Some(subscription);
        } else {
            let released = self.escape_listener.borrow_mut().take();
            drop(released);
        }
        tracing::debug!(fullscreen = entering, "fullscreen toggled");
        notify(&self.changed);
    }

    /// Whether a paste/drop with these item types is taken over by the editor.
    /// Returns the index of the image item to insert.
    pub fn intercepts_image<'a>(
        &self,
        mime_types: impl IntoIterator<Item = &'a str>,
    ) -> Option<usize> {
        if !self.options.enable_image_upload || self.is_destroyed() {
            return None;
        }
        let index = first_image_item(mime_types)?;
        tracing::debug!(index, "intercepting image paste/drop");
        Some(index)
    }

    /// A handle for inserting an image once its bytes have been read.
    pub fn image_inserter(&self) -> Option<ImageInserter<E>> {
        let alive = self.alive.borrow();
        Some(ImageInserter::new(&self.engine, alive.as_ref()?))
    }

    /// Feed an uploaded file into the open image dialog.
    pub fn load_image_file(&self, bytes: &[u8], declared_mime: Option<&str>) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let Ok(mut toolbar) = self.toolbar.try_borrow_mut() else {
            return false;
        };
        let loaded = toolbar.dialog_image_file(bytes, declared_mime);
        drop(toolbar);
        if loaded {
            notify(&self.changed);
        }
        loaded
    }

    /// Record the rendered bubble menu's size. `None` when it is not in the
    /// document.
    pub fn set_bubble_size(&self, size: Option<MenuSize>) {
        if self.is_destroyed() || !self.options.show_bubble_menu {
            return;
        }
        self.bubble.borrow().set_measured(size, &*self.engine);
    }

    /// Render every chrome slot for the current state.
    pub fn chrome(&self) -> Chrome {
        let fullscreen = self.is_fullscreen();
        if self.is_destroyed() {
            return Chrome {
                wrapper_class: wrapper_class(fullscreen),
                ..Chrome::default()
            };
        }
        let engine: &dyn EditorEngine = &*self.engine;
        let labels = &self.labels;
        let toolbar = self.toolbar.borrow();
        let bubble = self.bubble.borrow();
        let dialog = toolbar.dialog();
        Chrome {
            wrapper_class: wrapper_class(fullscreen),
            toolbar: self.options.show_toolbar.then(|| {
                render_toolbar(
                    &toolbar.groups(engine, labels, &self.options, fullscreen),
                    labels,
                )
            }),
            bubble: self
                .options
                .show_bubble_menu
                .then(|| render_bubble(&bubble.buttons(engine, labels), bubble.coords())),
            dialog_kind: dialog.map(|d| d.kind()),
            dialog: dialog.map(|d| render_dialog(d, labels)),
            dialog_actions: dialog.map(|d| render_dialog_actions(d, labels)),
            status: self
                .options
                .show_word_count
                .then(|| render_status(StatusBar::from_engine(engine), labels)),
        }
    }

    /// Release every listener and tear down the engine. Idempotent.
    pub fn destroy(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        let subscriptions = std::mem::take(&mut *self.subscriptions.borrow_mut());
        drop(subscriptions);
        let escape = self.escape_listener.borrow_mut().take();
        drop(escape);
        if let Ok(mut bubble) = self.bubble.try_borrow_mut() {
            bubble.unmount();
        }
        if let Ok(toolbar) = self.toolbar.try_borrow() {
            toolbar.close_popovers();
        }
        let alive = self.alive.borrow_mut().take();
        drop(alive);
        self.engine.destroy();
        tracing::debug!("editor destroyed");
    }
}

impl<E: EditorEngine + 'static> Drop for RichTextEditor<E> {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn notify(changed: &EventEmitter<ChangeListener>) {
    for listener in changed.snapshot() {
        listener();
    }
}
