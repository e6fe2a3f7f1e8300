use crate::host::Key;
use crate::image::data_url;

use super::{DialogOutcome, on_key};

/// A submitted image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSubmit {
    pub src: String,
    /// Empty alt text is passed as `None`.
    pub alt: Option<String>,
}

/// Image form: URL, optional alt text, or a file converted to a data URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageDialog {
    src: String,
    alt: String,
}

impl ImageDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn alt(&self) -> &str {
        &self.alt
    }

    pub fn set_src(&mut self, src: String) {
        self.src = src;
    }

    pub fn set_alt(&mut self, alt: String) {
        self.alt = alt;
    }

    /// Fill the source from an uploaded file's bytes.
    pub fn set_file(&mut self, bytes: &[u8], declared_mime: Option<&str>) {
        self.src = data_url(bytes, declared_mime);
    }

    pub fn can_submit(&self) -> bool {
        !self.src.is_empty()
    }

    pub fn submit(&self) -> Option<DialogOutcome<ImageSubmit>> {
        self.can_submit().then(|| {
            DialogOutcome::Submit(ImageSubmit {
                src: self.src.clone(),
                alt: (!self.alt.is_empty()).then(|| self.alt.clone()),
            })
        })
    }

    pub fn key_down(&self, key: &Key) -> Option<DialogOutcome<ImageSubmit>> {
        on_key(key, || self.submit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alt_is_optional() {
        let mut dialog = ImageDialog::new();
        dialog.set_alt("a cat".into());
        assert_eq!(dialog.submit(), None);

        dialog.set_src("https://example.org/cat.png".into());
        assert_eq!(
            dialog.key_down(&Key::Enter),
            Some(DialogOutcome::Submit(ImageSubmit {
                src: "https://example.org/cat.png".into(),
                alt: Some("a cat".into()),
            }))
        );

        dialog.set_alt(String::new());
        assert_eq!(
            dialog.submit(),
            Some(DialogOutcome::Submit(ImageSubmit {
                src: "https://example.org/cat.png".into(),
                alt: None,
            }))
        );
    }

    #[test]
    fn test_file_upload_fills_src() {
        let mut dialog = ImageDialog::new();
        dialog.set_file(b"GIF89a\x01\x00\x01\x00", Some("image/gif"));
        assert!(dialog.src().starts_with("data:image/gif;base64,"));
        assert!(dialog.can_submit());
    }
}
