//! HTML rendering of the editor chrome.
//!
//! The chrome is split into independent slots so a host can replace only the
//! parts that changed. Every control carries its [`UiAction`] as JSON in a
//! `data-action` attribute; dialog inputs carry `data-field`; color picker
//! wrappers carry `data-node` for outside-click detection.

use std::fmt;

use markdown_weaver_escape::{FmtWriter, StrWrite, escape_html};

use crate::actions::{DialogKind, DialogOp, ExportFormat, ExportOp, Field, PickerKind, PickerOp, UiAction};
use crate::bubble_menu::MenuPosition;
use crate::button::MenuButton;
use crate::dialog::ActiveDialog;
use crate::labels::Labels;
use crate::status_bar::StatusBar;
use crate::toolbar::{ExportView, PickerView, ToolbarGroup, ToolbarItem};

/// Attribute marking the dialog overlay; clicks whose target carries it cancel.
pub const OVERLAY_ATTR: &str = "data-overlay";
/// Attribute marking the container the dialog actions slot renders into.
pub const DIALOG_ACTIONS_SLOT: &str = "data-dialog-actions";
/// Attribute on the image dialog's file input.
pub const UPLOAD_ATTR: &str = "data-upload";

/// Rendered chrome, one string per slot. `None` slots are not shown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chrome {
    pub wrapper_class: &'static str,
    pub toolbar: Option<String>,
    pub bubble: Option<String>,
    /// Which dialog is open. Hosts rebuild the dialog shell only when this
    /// changes, so typing into a field never replaces the focused input.
    pub dialog_kind: Option<DialogKind>,
    /// Dialog shell: overlay, title and inputs.
    pub dialog: Option<String>,
    /// Buttons inside the dialog shell, rendered into [`DIALOG_ACTIONS_SLOT`].
    pub dialog_actions: Option<String>,
    pub status: Option<String>,
}

pub fn wrapper_class(fullscreen: bool) -> &'static str {
    if fullscreen {
        "editor-wrapper is-fullscreen"
    } else {
        "editor-wrapper"
    }
}

struct ChromeWriter<W> {
    writer: W,
}

impl<W: StrWrite> ChromeWriter<W> {
    fn new(writer: W) -> Self {
        Self { writer }
    }

    #[inline]
    fn write(&mut self, s: &str) -> Result<(), W::Error> {
        self.writer.write_str(s)
    }

    #[inline]
    fn text(&mut self, s: &str) -> Result<(), W::Error> {
        escape_html(&mut self.writer, s)
    }

    fn attr(&mut self, name: &str, value: &str) -> Result<(), W::Error> {
        self.write(" ")?;
        self.write(name)?;
        self.write("=\"")?;
        escape_html(&mut self.writer, value)?;
        self.write("\"")
    }

    fn action(&mut self, action: &UiAction) -> Result<(), W::Error> {
        self.attr("data-action", &action.encode())
    }

    fn action_button(
        &mut self,
        class: &str,
        action: &UiAction,
        disabled: bool,
        label: &str,
    ) -> Result<(), W::Error> {
        self.write("<button type=\"button\"")?;
        self.attr("class", class)?;
        self.action(action)?;
        if disabled {
            self.write(" disabled")?;
        }
        self.write(">")?;
        self.text(label)?;
        self.write("</button>")
    }

    fn menu_button(&mut self, button: &MenuButton) -> Result<(), W::Error> {
        self.write("<button type=\"button\"")?;
        self.attr("class", button.class())?;
        self.attr("title", &button.title)?;
        self.action(&button.action)?;
        if button.disabled {
            self.write(" disabled")?;
        }
        self.write(">")?;
        self.text(button.icon)?;
        self.write("</button>")
    }

    fn toolbar(&mut self, groups: &[ToolbarGroup], labels: &Labels) -> Result<(), W::Error> {
        self.write("<div class=\"toolbar\">")?;
        for (i, group) in groups.iter().enumerate() {
            if i > 0 {
                self.write("<div class=\"toolbar-divider\"></div>")?;
            }
            self.write("<div class=\"toolbar-group\"")?;
            self.attr("data-group", group.name)?;
            self.write(">")?;
            for item in &group.items {
                match item {
                    ToolbarItem::Button(button) => self.menu_button(button)?,
                    ToolbarItem::ColorPicker(picker) => self.color_picker(picker, labels)?,
                    ToolbarItem::Export(export) => self.export(export, labels)?,
                }
            }
            self.write("</div>")?;
        }
        self.write("</div>")
    }

    fn color_picker(&mut self, picker: &PickerView, labels: &Labels) -> Result<(), W::Error> {
        let action = |op| UiAction::Picker {
            picker: picker.kind,
            op,
        };

        self.write("<div class=\"color-picker-wrapper\"")?;
        self.attr("data-node", &picker.node.to_string())?;
        self.write("><button type=\"button\"")?;
        self.attr(
            "class",
            if picker.is_active() {
                "menu-button is-active"
            } else {
                "menu-button"
            },
        )?;
        self.attr("title", &picker.title)?;
        self.action(&action(PickerOp::Toggle))?;
        self.write("><span")?;
        self.attr(
            "class",
            match picker.kind {
                PickerKind::TextColor => "color-picker-icon",
                PickerKind::Highlight => "color-picker-icon is-highlight",
            },
        )?;
        self.attr(
            "style",
            &format!(
                "border-bottom: 3px solid {}",
                picker.current.as_deref().unwrap_or("transparent")
            ),
        )?;
        self.write(">")?;
        self.text(picker.icon)?;
        self.write("</span></button>")?;

        if picker.open {
            self.write("<div class=\"color-picker-dropdown\">")?;
            self.action_button(
                "color-reset",
                &action(PickerOp::Reset),
                false,
                &labels.reset_color,
            )?;
            self.write("<div class=\"color-grid\">")?;
            for color in &picker.palette {
                self.write("<button type=\"button\" class=\"color-swatch\"")?;
                self.attr("style", &format!("background: {color}"))?;
                self.attr("title", color)?;
                self.action(&action(PickerOp::Select(color.clone())))?;
                self.write("></button>")?;
            }
            self.write("</div></div>")?;
        }
        self.write("</div>")
    }

    fn export(&mut self, export: &ExportView, labels: &Labels) -> Result<(), W::Error> {
        self.write("<div class=\"export-panel\">")?;
        self.menu_button(&export.toggle)?;
        if let Some(output) = &export.output {
            self.write("<div class=\"export-dropdown\"><div class=\"export-tabs\">")?;
            for (format, label) in [(ExportFormat::Html, &labels.html), (ExportFormat::Json, &labels.json)] {
                let class = if export.format == format {
                    "export-tab active"
                } else {
                    "export-tab"
                };
                self.action_button(
                    class,
                    &UiAction::Export {
                        op: ExportOp::Format(format),
                    },
                    false,
                    label,
                )?;
            }
            self.write("</div><pre class=\"export-output\">")?;
            self.text(output)?;
            self.write("</pre>")?;
            self.action_button(
                "dialog-btn primary",
                &UiAction::Export { op: ExportOp::Copy },
                false,
                &labels.copy,
            )?;
            self.write("</div>")?;
        }
        self.write("</div>")
    }

    fn bubble(&mut self, buttons: &[MenuButton], coords: Option<MenuPosition>) -> Result<(), W::Error> {
        self.write("<div class=\"bubble-toolbar\"")?;
        let style = match coords {
            Some(MenuPosition { left, top }) => {
                format!("position: fixed; top: {top}px; left: {left}px")
            }
            // Laid out but invisible so the host can measure it.
            None => String::from("position: fixed; top: 0px; left: 0px; visibility: hidden"),
        };
        self.attr("style", &style)?;
        self.write(">")?;
        for button in buttons {
            self.menu_button(button)?;
        }
        self.write("</div>")
    }

    fn input(
        &mut self,
        kind: &str,
        field: Field,
        placeholder: &str,
        value: &str,
        autofocus: bool,
    ) -> Result<(), W::Error> {
        self.write("<input")?;
        self.attr("type", kind)?;
        self.attr("data-field", field.as_str())?;
        self.attr("placeholder", placeholder)?;
        self.attr("value", value)?;
        if autofocus {
            self.write(" autofocus")?;
        }
        self.write(">")
    }

    fn dialog(&mut self, dialog: &ActiveDialog, labels: &Labels) -> Result<(), W::Error> {
        self.write("<div class=\"dialog-overlay\" ")?;
        self.write(OVERLAY_ATTR)?;
        self.write("><div class=\"dialog\"><h3>")?;
        match dialog {
            ActiveDialog::Link(link) => {
                self.text(&labels.insert_link)?;
                self.write("</h3>")?;
                self.input("url", Field::LinkUrl, &labels.link_url_placeholder, link.url(), true)?;
            }
            ActiveDialog::Image(image) => {
                self.text(&labels.insert_image)?;
                self.write("</h3>")?;
                self.input("url", Field::ImageSrc, &labels.image_url_placeholder, image.src(), true)?;
                self.input("text", Field::ImageAlt, &labels.image_alt_placeholder, image.alt(), false)?;
                self.write("<p class=\"dialog-hint\">")?;
                self.text(&labels.or_upload_file)?;
                self.write("</p><label class=\"dialog-btn dialog-upload\">")?;
                self.text(&labels.upload_file)?;
                self.write("<input type=\"file\" accept=\"image/*\" hidden ")?;
                self.write(UPLOAD_ATTR)?;
                self.write("></label>")?;
            }
            ActiveDialog::Video(video) => {
                self.text(&labels.insert_video)?;
                self.write("</h3>")?;
                self.input("url", Field::VideoUrl, &labels.video_url_placeholder, video.url(), true)?;
            }
        }
        self.write("<div class=\"dialog-actions\" ")?;
        self.write(DIALOG_ACTIONS_SLOT)?;
        self.write("></div></div></div>")
    }

    fn dialog_actions(&mut self, dialog: &ActiveDialog, labels: &Labels) -> Result<(), W::Error> {
        let op = |op| UiAction::Dialog { op };
        if let ActiveDialog::Link(link) = dialog {
            if link.can_remove() {
                self.action_button("dialog-btn danger", &op(DialogOp::Remove), false, &labels.remove_link)?;
            }
        }
        self.action_button("dialog-btn", &op(DialogOp::Cancel), false, &labels.cancel)?;
        let submit = match dialog {
            ActiveDialog::Link(_) => &labels.apply,
            ActiveDialog::Image(_) | ActiveDialog::Video(_) => &labels.insert,
        };
        self.action_button(
            "dialog-btn primary",
            &op(DialogOp::Submit),
            !dialog.can_submit(),
            submit,
        )
    }

    fn status(&mut self, status: StatusBar, labels: &Labels) -> Result<(), W::Error> {
        write!(self.writer, "<div class=\"status-bar\"><span>{} ", status.words)?;
        self.text(&labels.words)?;
        write!(
            self.writer,
            "</span><span class=\"status-bar-divider\">|</span><span>{} ",
            status.characters
        )?;
        self.text(&labels.characters)?;
        self.write("</span></div>")
    }
}

fn render(f: impl FnOnce(&mut ChromeWriter<FmtWriter<&mut String>>) -> fmt::Result) -> String {
    let mut out = String::new();
    if let Err(e) = f(&mut ChromeWriter::new(FmtWriter(&mut out))) {
        tracing::error!("failed to render editor chrome: {}", e);
    }
    out
}

pub fn render_toolbar(groups: &[ToolbarGroup], labels: &Labels) -> String {
    render(|w| w.toolbar(groups, labels))
}

pub fn render_bubble(buttons: &[MenuButton], coords: Option<MenuPosition>) -> String {
    render(|w| w.bubble(buttons, coords))
}

pub fn render_dialog(dialog: &ActiveDialog, labels: &Labels) -> String {
    render(|w| w.dialog(dialog, labels))
}

pub fn render_dialog_actions(dialog: &ActiveDialog, labels: &Labels) -> String {
    render(|w| w.dialog_actions(dialog, labels))
}

pub fn render_status(status: StatusBar, labels: &Labels) -> String {
    render(|w| w.status(status, labels))
}
