//! Error types for editor construction and host integration.

use miette::Diagnostic;
use thiserror::Error;

/// Errors surfaced at the editor's public boundary.
///
/// Most UI paths never fail: invalid dialog input just disables submission.
/// These cover mount and engine/host failures.
#[derive(Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum EditorError {
    /// No element matched the selector passed to a standalone mount.
    #[error("EReditor: element not found for selector \"{selector}\"")]
    #[diagnostic(
        code(ereditor::mount::not_found),
        help("make sure the element exists in the document before calling create()")
    )]
    MountTargetNotFound { selector: String },

    /// The engine rejected an operation or could not be constructed.
    #[error("engine error: {0}")]
    #[diagnostic(code(ereditor::engine))]
    Engine(String),

    /// A host (DOM) operation failed.
    #[error("host error: {0}")]
    #[diagnostic(code(ereditor::host))]
    Host(String),
}

impl EditorError {
    pub fn engine(message: impl Into<String>) -> Self {
        EditorError::Engine(message.into())
    }

    pub fn host(message: impl Into<String>) -> Self {
        EditorError::Host(message.into())
    }
}
