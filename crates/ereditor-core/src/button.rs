//! Toolbar/bubble-menu buttons.

use crate::actions::UiAction;
use crate::command::{ActiveQuery, Command};
use crate::engine::EditorEngine;

/// A stateless control bound to one action.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuButton {
    /// Tooltip / accessible label.
    pub title: String,
    /// Glyph shown on the button.
    pub icon: &'static str,
    pub action: UiAction,
    pub active: bool,
    pub disabled: bool,
}

impl MenuButton {
    pub fn new(title: impl Into<String>, icon: &'static str, action: UiAction) -> Self {
        Self {
            title: title.into(),
            icon,
            action,
            active: false,
            disabled: false,
        }
    }

    /// A button that runs `command`, active when `query` holds.
    pub fn command(
        engine: &dyn EditorEngine,
        title: &str,
        icon: &'static str,
        command: Command,
        query: Option<ActiveQuery>,
    ) -> Self {
        let active = query.is_some_and(|q| engine.is_active(&q));
        Self::new(title, icon, UiAction::command(command)).active(active)
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// CSS classes for the rendered button.
    pub fn class(&self) -> &'static str {
        if self.active {
            "menu-button is-active"
        } else {
            "menu-button"
        }
    }
}
