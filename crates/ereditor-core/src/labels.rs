//! User-facing strings for every UI affordance.
//!
//! [`Labels`] is the fully-resolved mapping handed to every control. Hosts
//! localize by supplying a partial [`LabelOverrides`], which is merged over
//! the built-in defaults key by key.

use serde::{Deserialize, Serialize};

macro_rules! define_labels {
    ($( $field:ident / $variant:ident : $default:literal ),* $(,)?) => {
        /// Resolved label mapping. Every key always has a value.
        #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
        #[serde(rename_all = "camelCase")]
        pub struct Labels {
            $(pub $field: String,)*
        }

        /// Partial label mapping supplied by the host.
        ///
        /// Unknown keys in serialized input are ignored.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        pub struct LabelOverrides {
            $(
                #[serde(skip_serializing_if = "Option::is_none")]
                pub $field: Option<String>,
            )*
        }

        /// One key per label.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum LabelKey {
            $($variant,)*
        }

        impl LabelKey {
            pub const ALL: &'static [LabelKey] = &[$(LabelKey::$variant,)*];
        }

        impl Default for Labels {
            fn default() -> Self {
                Self {
                    $($field: $default.to_string(),)*
                }
            }
        }

        impl Labels {
            /// Look up a label by key.
            pub fn get(&self, key: LabelKey) -> &str {
                match key {
                    $(LabelKey::$variant => &self.$field,)*
                }
            }

            /// Overwrite the keys present in `overrides`, leaving the rest untouched.
            pub fn merge(mut self, overrides: &LabelOverrides) -> Self {
                $(
                    if let Some(value) = &overrides.$field {
                        self.$field = value.clone();
                    }
                )*
                self
            }
        }

        impl LabelOverrides {
            /// Set a single key.
            pub fn set(&mut self, key: LabelKey, value: impl Into<String>) {
                match key {
                    $(LabelKey::$variant => self.$field = Some(value.into()),)*
                }
            }

            /// The override for `key`, if one was supplied.
            pub fn get(&self, key: LabelKey) -> Option<&str> {
                match key {
                    $(LabelKey::$variant => self.$field.as_deref(),)*
                }
            }
        }
    };
}

define_labels! {
    // History
    undo / Undo: "Undo",
    redo / Redo: "Redo",

    // Text formatting
    bold / Bold: "Bold",
    italic / Italic: "Italic",
    underline / Underline: "Underline",
    strikethrough / Strikethrough: "Strikethrough",
    inline_code / InlineCode: "Inline Code",

    // Headings
    heading1 / Heading1: "Heading 1",
    heading2 / Heading2: "Heading 2",
    heading3 / Heading3: "Heading 3",

    // Lists
    bullet_list / BulletList: "Bullet List",
    ordered_list / OrderedList: "Ordered List",
    task_list / TaskList: "Task List",

    // Blocks
    blockquote / Blockquote: "Blockquote",
    code_block / CodeBlock: "Code Block",
    horizontal_rule / HorizontalRule: "Horizontal Rule",

    // Alignment
    align_left / AlignLeft: "Align Left",
    align_center / AlignCenter: "Align Center",
    align_right / AlignRight: "Align Right",

    // Colors
    text_color / TextColor: "Text Color",
    highlight / Highlight: "Highlight",
    reset_color / ResetColor: "Reset",

    // Media
    link / Link: "Link",
    image / Image: "Image",
    video / Video: "Video",

    // Table
    insert_table / InsertTable: "Insert Table",
    add_column / AddColumn: "Add Column",
    delete_column / DeleteColumn: "Delete Column",
    add_row / AddRow: "Add Row",
    delete_row / DeleteRow: "Delete Row",
    delete_table / DeleteTable: "Delete Table",

    // Export
    export / Export: "Export",
    copy / Copy: "Copy",

    // Fullscreen
    fullscreen / Fullscreen: "Fullscreen",
    exit_fullscreen / ExitFullscreen: "Exit Fullscreen",

    // Link dialog
    insert_link / InsertLink: "Insert Link",
    link_url_placeholder / LinkUrlPlaceholder: "https://example.com",
    remove_link / RemoveLink: "Remove",
    apply / Apply: "Apply",
    cancel / Cancel: "Cancel",

    // Image dialog
    insert_image / InsertImage: "Insert Image",
    image_url_placeholder / ImageUrlPlaceholder: "Image URL",
    image_alt_placeholder / ImageAltPlaceholder: "Alt text (optional)",
    upload_file / UploadFile: "Upload File",
    or_upload_file / OrUploadFile: "Or upload a file:",
    insert / Insert: "Insert",

    // Video dialog
    insert_video / InsertVideo: "Insert Video",
    video_url_placeholder / VideoUrlPlaceholder: "YouTube or video URL",

    // Export panel
    html / Html: "HTML",
    json / Json: "JSON",

    // Status bar
    words / Words: "words",
    characters / Characters: "characters",

    // Bubble menu
    code / Code: "Code",
}

impl Labels {
    /// Merge `overrides` over the defaults.
    pub fn resolve(overrides: Option<&LabelOverrides>) -> Self {
        match overrides {
            Some(overrides) => Self::default().merge(overrides),
            None => Self::default(),
        }
    }
}
