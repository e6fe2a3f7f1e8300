//! Image bytes to `data:` URLs, and liveness-gated insertion.
//!
//! Reading a pasted/dropped/uploaded file is asynchronous. By the time the
//! bytes arrive the editor may have been destroyed, so insertion goes through
//! an [`ImageInserter`] holding only weak references: a completed read for a
//! dead editor is dropped instead of touching a stale engine.

use std::fmt::Display;
use std::future::Future;
use std::rc::{Rc, Weak};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use mime_sniffer::MimeTypeSniffer;

use crate::command::Command;
use crate::engine::EditorEngine;

const FALLBACK_MIME: &str = "application/octet-stream";

/// Encode `bytes` as a base64 `data:` URL. The MIME type is sniffed from the
/// content, falling back to `declared_mime`.
pub fn data_url(bytes: &[u8], declared_mime: Option<&str>) -> String {
    let mime = bytes
        .sniff_mime_type()
        .filter(|m| *m != FALLBACK_MIME)
        .or(declared_mime)
        .unwrap_or(FALLBACK_MIME);
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

pub fn is_image_mime(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// Index of the first image among a paste/drop's item types.
pub fn first_image_item<'a>(mime_types: impl IntoIterator<Item = &'a str>) -> Option<usize> {
    mime_types.into_iter().position(is_image_mime)
}

/// Inserts images into an engine for as long as its editor is alive.
pub struct ImageInserter<E: ?Sized> {
    engine: Weak<E>,
    alive: Weak<()>,
}

impl<E: ?Sized> Clone for ImageInserter<E> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            alive: self.alive.clone(),
        }
    }
}

impl<E: EditorEngine + ?Sized> ImageInserter<E> {
    /// `alive` is the editor's lifetime token; the inserter goes dead when the
    /// last strong reference to it is dropped.
    pub fn new(engine: &Rc<E>, alive: &Rc<()>) -> Self {
        Self {
            engine: Rc::downgrade(engine),
            alive: Rc::downgrade(alive),
        }
    }

    pub fn is_live(&self) -> bool {
        self.alive.strong_count() > 0 && self.engine.strong_count() > 0
    }

    /// Insert an image node. Returns false if the editor is gone.
    pub fn insert(&self, src: String, alt: Option<String>) -> bool {
        if self.alive.upgrade().is_none() {
            tracing::debug!("editor destroyed before image insertion, dropping image");
            return false;
        }
        let Some(engine) = self.engine.upgrade() else {
            tracing::debug!("engine dropped before image insertion, dropping image");
            return false;
        };
        engine.run(&Command::SetImage { src, alt })
    }

    /// Await `read`, convert the bytes and insert them if still live.
    pub async fn insert_from<F, Err>(self, read: F, declared_mime: Option<String>) -> bool
    where
        F: Future<Output = Result<Vec<u8>, Err>>,
        Err: Display,
    {
        let bytes = match read.await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("failed to read image data: {}", e);
                return false;
            }
        };
        let src = data_url(&bytes, declared_mime.as_deref());
        self.insert(src, None)
    }
}
