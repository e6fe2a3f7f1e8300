//! Editor configuration consumed at construction.

use serde::{Deserialize, Serialize};

use crate::engine::Content;
use crate::labels::LabelOverrides;

/// Content shown when the caller supplies none.
pub const WELCOME_CONTENT: &str = r#"
<h2>Welcome to EReditor</h2>
<p>A rich text editor built with <strong>Rust</strong> and <strong>WebAssembly</strong>.</p>
<p>Try out the toolbar above or select text to see the bubble menu. Here are some things you can do:</p>
<ul>
  <li>Format text with <strong>bold</strong>, <em>italic</em>, <u>underline</u>, and <s>strikethrough</s></li>
  <li>Create headings, lists, and blockquotes</li>
  <li>Insert tables, images, and links</li>
  <li>Change text and highlight colors</li>
  <li>Export your content as HTML or JSON</li>
</ul>
<blockquote><p>Start editing to see the magic happen!</p></blockquote>
"#;

fn yes() -> bool {
    true
}

/// UI configuration. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorOptions {
    /// Initial content as markup or a structured snapshot.
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub placeholder: Option<String>,
    #[serde(default = "yes")]
    pub editable: bool,
    #[serde(default = "yes")]
    pub show_toolbar: bool,
    #[serde(default = "yes")]
    pub show_bubble_menu: bool,
    #[serde(default = "yes")]
    pub show_export_panel: bool,
    #[serde(default = "yes")]
    pub show_word_count: bool,
    #[serde(default = "yes")]
    pub show_fullscreen_toggle: bool,
    #[serde(default = "yes")]
    pub enable_image_upload: bool,
    #[serde(default)]
    pub labels: Option<LabelOverrides>,
    /// Color palette for the text/highlight pickers.
    #[serde(default)]
    pub colors: Option<Vec<String>>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            content: None,
            placeholder: None,
            editable: true,
            show_toolbar: true,
            show_bubble_menu: true,
            show_export_panel: true,
            show_word_count: true,
            show_fullscreen_toggle: true,
            enable_image_upload: true,
            labels: None,
            colors: None,
        }
    }
}

impl EditorOptions {
    /// The caller's content, or the welcome document.
    pub fn initial_content(&self) -> Content {
        self.content
            .clone()
            .unwrap_or_else(|| Content::Html(WELCOME_CONTENT.to_string()))
    }
}
