//! Floating formatting menu that follows a non-empty selection.
//!
//! The menu is positioned in viewport coordinates, centered over the selection
//! and just above its top edge. Positions are recomputed on every selection
//! update and every transaction. A collapsed selection, or a menu that has not
//! been measured by the host yet, has no position and the menu is hidden.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::button::MenuButton;
use crate::command::{ActiveQuery, Command};
use crate::emitter::Subscription;
use crate::engine::{EditorEngine, EngineEvent, Rect, SelectionRange};
use crate::labels::Labels;

/// Vertical gap between the menu and the selection, in CSS pixels.
pub const BUBBLE_GAP: f64 = 8.0;

/// Fixed-position offsets for the menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuPosition {
    pub left: f64,
    pub top: f64,
}

/// Rendered size of the menu, reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuSize {
    pub width: f64,
    pub height: f64,
}

/// Center over the selection horizontally and sit above its highest line.
/// Not clamped to the viewport.
pub fn compute_position(start: Rect, end: Rect, size: MenuSize) -> MenuPosition {
    MenuPosition {
        left: (start.left + end.right) / 2.0 - size.width / 2.0,
        top: start.top.min(end.top) - size.height - BUBBLE_GAP,
    }
}

/// Position for the engine's current selection, if the menu should show.
pub fn position_for(engine: &dyn EditorEngine, size: Option<MenuSize>) -> Option<MenuPosition> {
    let SelectionRange { from, to } = engine.selection();
    if from == to {
        return None;
    }
    let size = size?;
    let start = engine.coords_at_pos(from)?;
    let end = engine.coords_at_pos(to)?;
    Some(compute_position(start, end, size))
}

#[derive(Debug, Default)]
struct BubbleState {
    coords: Option<MenuPosition>,
    size: Option<MenuSize>,
}

fn update(state: &RefCell<BubbleState>, engine: &dyn EditorEngine) {
    let size = state.borrow().size;
    let coords = position_for(engine, size);
    state.borrow_mut().coords = coords;
}

/// Selection-following menu state and its engine subscriptions.
#[derive(Debug, Default)]
pub struct BubbleMenu {
    state: Rc<RefCell<BubbleState>>,
    subscriptions: Vec<Subscription>,
}

impl BubbleMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Start following `engine`'s selection. Mounting twice is a no-op.
    pub fn mount(&mut self, engine: &dyn EditorEngine) {
        if self.is_mounted() {
            return;
        }
        for event in [EngineEvent::SelectionUpdate, EngineEvent::Transaction] {
            let weak: Weak<RefCell<BubbleState>> = Rc::downgrade(&self.state);
            let subscription = engine.on(
                event,
                Rc::new(move |engine: &dyn EditorEngine| {
                    if let Some(state) = weak.upgrade() {
                        update(&state, engine);
                    }
                }),
            );
            self.subscriptions.push(subscription);
        }
        update(&self.state, engine);
        tracing::debug!("bubble menu mounted");
    }

    /// Stop following the selection and hide.
    pub fn unmount(&mut self) {
        self.subscriptions.clear();
        self.state.borrow_mut().coords = None;
        tracing::debug!("bubble menu unmounted");
    }

    /// Record the host's measurement of the rendered menu and reposition.
    /// `None` means the menu element is gone.
    pub fn set_measured(&self, size: Option<MenuSize>, engine: &dyn EditorEngine) {
        self.state.borrow_mut().size = size;
        update(&self.state, engine);
    }

    pub fn coords(&self) -> Option<MenuPosition> {
        self.state.borrow().coords
    }

    pub fn is_visible(&self) -> bool {
        self.coords().is_some()
    }

    pub fn buttons(&self, engine: &dyn EditorEngine, labels: &Labels) -> Vec<MenuButton> {
        vec![
            MenuButton::command(engine, &labels.bold, "B", Command::ToggleBold, Some(ActiveQuery::Bold)),
            MenuButton::command(
                engine,
                &labels.italic,
                "I",
                Command::ToggleItalic,
                Some(ActiveQuery::Italic),
            ),
            MenuButton::command(
                engine,
                &labels.underline,
                "U",
                Command::ToggleUnderline,
                Some(ActiveQuery::Underline),
            ),
            MenuButton::command(
                engine,
                &labels.strikethrough,
                "S",
                Command::ToggleStrike,
                Some(ActiveQuery::Strike),
            ),
            MenuButton::command(engine, &labels.code, "<>", Command::ToggleCode, Some(ActiveQuery::Code)),
        ]
    }
}
