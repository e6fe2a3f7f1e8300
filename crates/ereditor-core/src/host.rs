//! Document-level input delivered by the host (browser or otherwise).
//!
//! Controls that need global listeners (outside-click for popovers, Escape
//! for fullscreen) subscribe to [`HostEvents`] and hold the returned guard
//! only while they need it.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::emitter::EventEmitter;

/// Identifies a rendered widget. Hosts resolve an event target to the
/// nearest enclosing widget id (`data-node` attribute in the DOM).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The keys the editor chrome reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Escape,
    /// Anything else, by its `KeyboardEvent.key` value.
    Other(SmolStr),
}

impl Key {
    /// Convert from a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            other => Key::Other(SmolStr::new(other)),
        }
    }
}

/// Global input events.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Pointer pressed anywhere in the document. `target` is the innermost
    /// widget containing the event target, if any.
    PointerDown { target: Option<NodeId> },
    /// Key pressed anywhere in the document.
    KeyDown { key: Key },
}

pub type HostListener = dyn Fn(&HostEvent);

/// Registry of global input listeners, owned by the host.
pub type HostEvents = EventEmitter<HostListener>;

/// Deliver `event` to every current listener.
pub fn dispatch_host_event(events: &HostEvents, event: &HostEvent) {
    for listener in events.snapshot() {
        listener(event);
    }
}
