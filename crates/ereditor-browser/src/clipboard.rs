//! Browser clipboard implementation.
//!
//! Implements `ClipboardPlatform` with the async Clipboard API. Writes are
//! fire-and-forget; failures are logged.

use ereditor_core::ClipboardPlatform;
use wasm_bindgen::JsValue;

/// Clipboard backed by `navigator.clipboard`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserClipboard;

impl ClipboardPlatform for BrowserClipboard {
    fn write_text(&self, text: &str) {
        let text = text.to_string();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = write_text(&text).await {
                tracing::warn!("Clipboard write failed: {:?}", e);
            }
        });
    }
}

/// Write plain text to the system clipboard.
pub async fn write_text(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let clipboard = window.navigator().clipboard();
    wasm_bindgen_futures::JsFuture::from(clipboard.write_text(text)).await?;
    tracing::debug!(bytes = text.len(), "copied export output");
    Ok(())
}
