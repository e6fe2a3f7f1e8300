//! Swatch popover for text and highlight colors.
//!
//! Closed until the trigger is pressed. While open it holds a global
//! pointer-down subscription so a press anywhere outside its own widget
//! closes it. Every path to closed releases that subscription.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::actions::{PickerKind, PickerOp};
use crate::emitter::Subscription;
use crate::host::{HostEvent, HostEvents, NodeId};

/// Palette used when the caller supplies none.
pub const DEFAULT_PALETTE: [&str; 24] = [
    "#000000", "#434343", "#666666", "#999999", "#cccccc", "#ffffff", //
    "#e74c3c", "#e67e22", "#f1c40f", "#2ecc71", "#3498db", "#9b59b6", //
    "#c0392b", "#d35400", "#f39c12", "#27ae60", "#2980b9", "#8e44ad", //
    "#1abc9c", "#16a085", "#2c3e50", "#34495e", "#7f8c8d", "#95a5a6",
];

/// What the picker reports when it closes with a choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorEvent {
    Selected(String),
    Reset,
}

#[derive(Default)]
struct PickerState {
    open: bool,
    outside_click: Option<Subscription>,
}

impl PickerState {
    /// Mark closed and hand back the listener guard so the caller can drop it
    /// after releasing the borrow.
    fn close(&mut self) -> Option<Subscription> {
        self.open = false;
        self.outside_click.take()
    }
}

pub struct ColorPicker {
    kind: PickerKind,
    node: NodeId,
    palette: Vec<String>,
    state: Rc<RefCell<PickerState>>,
}

impl ColorPicker {
    pub fn new(kind: PickerKind, node: NodeId, palette: Option<&[String]>) -> Self {
        let palette = match palette {
            Some(colors) if !colors.is_empty() => colors.to_vec(),
            _ => DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        };
        Self {
            kind,
            node,
            palette,
            state: Rc::new(RefCell::new(PickerState::default())),
        }
    }

    pub fn kind(&self) -> PickerKind {
        self.kind
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn palette(&self) -> &[String] {
        &self.palette
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().open
    }

    pub fn toggle(&self, host: &HostEvents) {
        if self.is_open() {
            self.close();
        } else {
            self.open(host);
        }
    }

    pub fn open(&self, host: &HostEvents) {
        if self.is_open() {
            return;
        }

        let weak: Weak<RefCell<PickerState>> = Rc::downgrade(&self.state);
        let node = self.node;
        let subscription = host.subscribe(Rc::new(move |event: &HostEvent| {
            let HostEvent::PointerDown { target } = event else {
                return;
            };
            if *target == Some(node) {
                return;
            }
            let Some(state) = weak.upgrade() else {
                return;
            };
            let released = state.borrow_mut().close();
            drop(released);
            tracing::trace!(%node, "color picker closed by outside click");
        }));

        let mut state = self.state.borrow_mut();
        state.open = true;
        state.outside_click = Some(subscription);
    }

    pub fn close(&self) {
        let released = self.state.borrow_mut().close();
        drop(released);
    }

    /// Choose a swatch. Only palette colors are accepted, and only while open.
    pub fn select(&self, color: &str) -> Option<ColorEvent> {
        if !self.is_open() || !self.palette.iter().any(|c| c == color) {
            return None;
        }
        self.close();
        Some(ColorEvent::Selected(color.to_string()))
    }

    pub fn reset(&self) -> Option<ColorEvent> {
        if !self.is_open() {
            return None;
        }
        self.close();
        Some(ColorEvent::Reset)
    }

    /// Apply a routed picker operation.
    pub fn apply(&self, op: &PickerOp, host: &HostEvents) -> Option<ColorEvent> {
        match op {
            PickerOp::Toggle => {
                self.toggle(host);
                None
            }
            PickerOp::Select(color) => self.select(color),
            PickerOp::Reset => self.reset(),
        }
    }
}

impl Drop for ColorPicker {
    fn drop(&mut self) {
        // Release the global listener even if torn down while open.
        self.close();
    }
}

impl std::fmt::Debug for ColorPicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorPicker")
            .field("kind", &self.kind)
            .field("node", &self.node)
            .field("open", &self.is_open())
            .finish()
    }
}
