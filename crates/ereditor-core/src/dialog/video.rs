use crate::host::Key;

use super::{DialogOutcome, on_key};

/// Video embed form (YouTube or direct URL).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoDialog {
    url: String,
}

impl VideoDialog {
    pub fn new() -> Self {
        Self::default()
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

    pub fn submit(&self) -> Option<DialogOutcome<String>> {
        self.can_submit()
            .then(|| DialogOutcome::Submit(self.url.clone()))
    }

    pub fn key_down(&self, key: &Key) -> Option<DialogOutcome<String>> {
        on_key(key, || self.submit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_gated_on_url() {
        let mut dialog = VideoDialog::new();
        assert_eq!(dialog.key_down(&Key::Enter), None);
        dialog.set_url("https://youtu.be/dQw4w9WgXcQ".into());
        assert_eq!(
            dialog.submit(),
            Some(DialogOutcome::Submit("https://youtu.be/dQw4w9WgXcQ".into()))
        );
    }
}
