//! WASM bindings for the ereditor rich-text editor.
//!
//! Provides the `create(selector, options)` entry point for pages that load
//! the editor as a script. The document engine is supplied by the page
//! through `options.engine`.

mod engine;
mod instance;

pub use engine::*;
pub use instance::*;

use tracing::Level;
use tracing::subscriber::set_global_default;
use tracing_subscriber::Registry;
use tracing_subscriber::layer::SubscriberExt;
use wasm_bindgen::prelude::*;

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );
    let reg = Registry::default().with(wasm_layer);
    let _ = set_global_default(reg);
}
