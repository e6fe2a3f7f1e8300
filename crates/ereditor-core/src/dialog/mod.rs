//! Modal dialogs for links, images and videos.
//!
//! Each dialog is a small controlled form. Submission is gated on a non-empty
//! primary field; Enter submits when valid, Escape cancels, and a click on the
//! overlay (outside the dialog body) cancels. Invalid input never errors, it
//! just leaves submit disabled.

mod image;
mod link;
mod video;

pub use image::{ImageDialog, ImageSubmit};
pub use link::LinkDialog;
pub use video::VideoDialog;

use crate::actions::{DialogKind, DialogOp, Field};
use crate::host::Key;

/// How a dialog was closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome<T> {
    Submit(T),
    Cancel,
    /// Only offered by the link dialog when editing an existing link.
    Remove,
}

/// Shared keyboard contract: Enter submits if valid, Escape cancels.
fn on_key<T>(
    key: &Key,
    submit: impl FnOnce() -> Option<DialogOutcome<T>>,
) -> Option<DialogOutcome<T>> {
    match key {
        Key::Enter => submit(),
        Key::Escape => Some(DialogOutcome::Cancel),
        Key::Other(_) => None,
    }
}

/// The dialog currently shown by the toolbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveDialog {
    Link(LinkDialog),
    Image(ImageDialog),
    Video(VideoDialog),
}

/// A closed dialog's result, ready to be turned into engine commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    Link(DialogOutcome<String>),
    Image(DialogOutcome<ImageSubmit>),
    Video(DialogOutcome<String>),
}

impl DialogResult {
    pub fn is_cancel(&self) -> bool {
        matches!(
            self,
            DialogResult::Link(DialogOutcome::Cancel)
                | DialogResult::Image(DialogOutcome::Cancel)
                | DialogResult::Video(DialogOutcome::Cancel)
        )
    }
}

impl ActiveDialog {
    pub fn kind(&self) -> DialogKind {
        match self {
            ActiveDialog::Link(_) => DialogKind::Link,
            ActiveDialog::Image(_) => DialogKind::Image,
            ActiveDialog::Video(_) => DialogKind::Video,
        }
    }

    pub fn can_submit(&self) -> bool {
        match self {
            ActiveDialog::Link(d) => d.can_submit(),
            ActiveDialog::Image(d) => d.can_submit(),
            ActiveDialog::Video(d) => d.can_submit(),
        }
    }

    /// Update a field. Fields that belong to another dialog are ignored.
    pub fn input(&mut self, field: Field, value: String) {
        match (self, field) {
            (ActiveDialog::Link(d), Field::LinkUrl) => d.set_url(value),
            (ActiveDialog::Image(d), Field::ImageSrc) => d.set_src(value),
            (ActiveDialog::Image(d), Field::ImageAlt) => d.set_alt(value),
            (ActiveDialog::Video(d), Field::VideoUrl) => d.set_url(value),
            (dialog, field) => {
                tracing::debug!(kind = ?dialog.kind(), ?field, "input for a field not in this dialog");
            }
        }
    }

    pub fn key_down(&self, key: &Key) -> Option<DialogResult> {
        match self {
            ActiveDialog::Link(d) => d.key_down(key).map(DialogResult::Link),
            ActiveDialog::Image(d) => d.key_down(key).map(DialogResult::Image),
            ActiveDialog::Video(d) => d.key_down(key).map(DialogResult::Video),
        }
    }

    pub fn button(&self, op: DialogOp) -> Option<DialogResult> {
        match (self, op) {
            (ActiveDialog::Link(d), DialogOp::Submit) => d.submit().map(DialogResult::Link),
            (ActiveDialog::Image(d), DialogOp::Submit) => d.submit().map(DialogResult::Image),
            (ActiveDialog::Video(d), DialogOp::Submit) => d.submit().map(DialogResult::Video),
            (ActiveDialog::Link(d), DialogOp::Remove) => d.remove().map(DialogResult::Link),
            (_, DialogOp::Remove) => None,
            (_, DialogOp::Cancel) => Some(self.cancel()),
        }
    }

    /// Overlay clicks and the cancel button both land here.
    pub fn cancel(&self) -> DialogResult {
        match self {
            ActiveDialog::Link(_) => DialogResult::Link(DialogOutcome::Cancel),
            ActiveDialog::Image(_) => DialogResult::Image(DialogOutcome::Cancel),
            ActiveDialog::Video(_) => DialogResult::Video(DialogOutcome::Cancel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_foreign_field_is_ignored() {
        let mut dialog = ActiveDialog::Video(VideoDialog::new());
        dialog.input(Field::LinkUrl, "https://x".into());
        assert!(!dialog.can_submit());
    }

    #[test]
    fn test_remove_only_on_link_dialog() {
        let dialog = ActiveDialog::Image(ImageDialog::new());
        assert_eq!(dialog.button(DialogOp::Remove), None);
        let dialog = ActiveDialog::Link(LinkDialog::new("https://a"));
        assert_eq!(
            dialog.button(DialogOp::Remove),
            Some(DialogResult::Link(DialogOutcome::Remove))
        );
    }

    #[test]
    fn test_cancel_button_and_overlay_agree() {
        let dialog = ActiveDialog::Video(VideoDialog::new());
        assert_eq!(dialog.button(DialogOp::Cancel), Some(dialog.cancel()));
        assert!(dialog.cancel().is_cancel());
    }
}
