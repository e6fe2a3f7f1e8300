use crate::host::Key;

use super::{DialogOutcome, on_key};

/// Link insertion/editing form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDialog {
    initial_url: String,
    url: String,
}

impl LinkDialog {
    /// `initial_url` is the href of the link at the selection, or empty.
    pub fn new(initial_url: impl Into<String>) -> Self {
        let initial_url = initial_url.into();
        Self {
            url: initial_url.clone(),
            initial_url,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: String) {
        self.url = url;
    }

    pub fn can_submit(&self) -> bool {
        !self.url.is_empty()
    }

    /// "Remove" is offered only when editing an existing link.
    pub fn can_remove(&self) -> bool {
        !self.initial_url.is_empty()
    }

    pub fn submit(&self) -> Option<DialogOutcome<String>> {
        self.can_submit()
            .then(|| DialogOutcome::Submit(self.url.clone()))
    }

    pub fn remove(&self) -> Option<DialogOutcome<String>> {
        self.can_remove().then_some(DialogOutcome::Remove)
    }

    pub fn key_down(&self, key: &Key) -> Option<DialogOutcome<String>> {
        on_key(key, || self.submit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_url_blocks_submit() {
        let dialog = LinkDialog::new("");
        assert!(!dialog.can_submit());
        assert_eq!(dialog.submit(), None);
        assert_eq!(dialog.key_down(&Key::Enter), None);
    }

    #[test]
    fn test_enter_submits_exactly_the_url() {
        let mut dialog = LinkDialog::new("");
        dialog.set_url("https://example.org".into());
        assert_eq!(
            dialog.key_down(&Key::Enter),
            Some(DialogOutcome::Submit("https://example.org".into()))
        );
    }

    #[test]
    fn test_escape_cancels_even_with_valid_url() {
        let dialog = LinkDialog::new("https://example.org");
        assert_eq!(dialog.key_down(&Key::Escape), Some(DialogOutcome::Cancel));
        assert_eq!(dialog.key_down(&Key::Other("a".into())), None);
    }

    #[test]
    fn test_remove_requires_existing_link() {
        assert!(!LinkDialog::new("").can_remove());
        assert_eq!(LinkDialog::new("").remove(), None);

        let mut dialog = LinkDialog::new("https://old");
        assert_eq!(dialog.url(), "https://old");
        // Clearing the field does not hide "remove"; it tracks the original link.
        dialog.set_url(String::new());
        assert!(dialog.can_remove());
        assert!(!dialog.can_submit());
    }
}
