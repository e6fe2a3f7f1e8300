//! Browser DOM layer for ereditor.
//!
//! This crate mounts the editor chrome into a page, generic over any
//! `EditorEngine` implementation. It assumes a `wasm32-unknown-unknown`
//! target environment.
//!
//! # Architecture
//!
//! - `mount`: `BrowserHost`, the `MountHost` over the page document
//! - `render`: slot-diffing chrome renderer and bubble menu measurement
//! - `events`: delegated control clicks, dialog fields, image paste/drop
//! - `clipboard`: `ClipboardPlatform` over `navigator.clipboard`
//!
//! # Re-exports
//!
//! This crate re-exports `ereditor-core` for convenience, so consumers
//! only need to depend on `ereditor-browser`.

// Re-export core crate
pub use ereditor_core;
pub use ereditor_core::*;

pub mod clipboard;
pub mod events;
pub mod mount;
pub mod render;

pub use clipboard::BrowserClipboard;
pub use mount::{BrowserHost, BrowserMount, BrowserView};
pub use render::{Renderer, Skeleton};
