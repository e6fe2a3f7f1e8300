//! The main toolbar: grouped controls, color pickers, export panel and the
//! link/image/video dialogs.
//!
//! Control state (active, disabled, table editing controls) is read from the
//! engine each time [`Toolbar::groups`] is called, so it always matches the
//! latest transaction.

use crate::actions::{
    DialogKind, DialogOp, ExportFormat, ExportOp, Field, PickerKind, PickerOp, UiAction,
};
use crate::button::MenuButton;
use crate::color_picker::{ColorEvent, ColorPicker};
use crate::command::{ActiveQuery, Alignment, Command, MarkType};
use crate::dialog::{
    ActiveDialog, DialogOutcome, DialogResult, ImageDialog, ImageSubmit, LinkDialog, VideoDialog,
};
use crate::engine::EditorEngine;
use crate::export::{ClipboardPlatform, ExportPanel};
use crate::host::{HostEvents, Key, NodeId};
use crate::labels::Labels;
use crate::options::EditorOptions;

/// Widget ids of the two color pickers, for outside-click detection.
pub const TEXT_COLOR_NODE: NodeId = NodeId(1);
pub const HIGHLIGHT_NODE: NodeId = NodeId(2);

/// A color picker as rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerView {
    pub kind: PickerKind,
    pub node: NodeId,
    pub title: String,
    pub icon: &'static str,
    /// Color of the mark at the selection; drawn as the trigger underline.
    pub current: Option<String>,
    pub open: bool,
    pub palette: Vec<String>,
}

impl PickerView {
    /// The trigger is highlighted while a color is applied.
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }
}

/// The export control as rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportView {
    pub toggle: MenuButton,
    pub open: bool,
    pub format: ExportFormat,
    /// Present only while the panel is open.
    pub output: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarItem {
    Button(MenuButton),
    ColorPicker(PickerView),
    Export(ExportView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarGroup {
    pub name: &'static str,
    pub items: Vec<ToolbarItem>,
}

impl ToolbarGroup {
    fn buttons(name: &'static str, buttons: Vec<MenuButton>) -> Self {
        Self {
            name,
            items: buttons.into_iter().map(ToolbarItem::Button).collect(),
        }
    }
}

/// The engine command a closed dialog turns into, if any.
pub fn dialog_command(result: DialogResult) -> Option<Command> {
    match result {
        DialogResult::Link(DialogOutcome::Submit(href)) => Some(Command::SetLink { href }),
        DialogResult::Link(DialogOutcome::Remove) => Some(Command::UnsetLink),
        DialogResult::Image(DialogOutcome::Submit(ImageSubmit { src, alt })) => {
            Some(Command::SetImage { src, alt })
        }
        DialogResult::Video(DialogOutcome::Submit(src)) => Some(Command::SetVideo { src }),
        _ => None,
    }
}

/// Whether a command's control is enabled. History controls follow the
/// engine's `can`; every other command is always enabled.
pub fn command_enabled(engine: &dyn EditorEngine, command: &Command) -> bool {
    match command {
        Command::Undo | Command::Redo => engine.can(command),
        _ => true,
    }
}

fn color_command(kind: PickerKind, event: ColorEvent) -> Command {
    match (kind, event) {
        (PickerKind::TextColor, ColorEvent::Selected(color)) => Command::SetColor { color },
        (PickerKind::TextColor, ColorEvent::Reset) => Command::UnsetColor,
        (PickerKind::Highlight, ColorEvent::Selected(color)) => Command::ToggleHighlight { color },
        (PickerKind::Highlight, ColorEvent::Reset) => Command::UnsetHighlight,
    }
}

#[derive(Debug)]
pub struct Toolbar {
    text_color: ColorPicker,
    highlight: ColorPicker,
    export: ExportPanel,
    dialog: Option<ActiveDialog>,
}

impl Toolbar {
    pub fn new(palette: Option<&[String]>) -> Self {
        Self {
            text_color: ColorPicker::new(PickerKind::TextColor, TEXT_COLOR_NODE, palette),
            highlight: ColorPicker::new(PickerKind::Highlight, HIGHLIGHT_NODE, palette),
            export: ExportPanel::new(),
            dialog: None,
        }
    }

    pub fn picker(&self, kind: PickerKind) -> &ColorPicker {
        match kind {
            PickerKind::TextColor => &self.text_color,
            PickerKind::Highlight => &self.highlight,
        }
    }

    /// Close both color pickers, releasing their outside-click listeners.
    pub fn close_popovers(&self) {
        self.text_color.close();
        self.highlight.close();
    }

    pub fn export_panel(&self) -> &ExportPanel {
        &self.export
    }

    pub fn dialog(&self) -> Option<&ActiveDialog> {
        self.dialog.as_ref()
    }

    /// Build the control groups for the current engine state.
    pub fn groups(
        &self,
        engine: &dyn EditorEngine,
        labels: &Labels,
        options: &EditorOptions,
        fullscreen: bool,
    ) -> Vec<ToolbarGroup> {
        let btn = |title: &str, icon: &'static str, command: Command, query: Option<ActiveQuery>| {
            MenuButton::command(engine, title, icon, command, query)
        };

        let mut groups = vec![
            ToolbarGroup::buttons(
                "history",
                vec![
                    btn(&labels.undo, "↩", Command::Undo, None)
                        .disabled(!command_enabled(engine, &Command::Undo)),
                    btn(&labels.redo, "↪", Command::Redo, None)
                        .disabled(!command_enabled(engine, &Command::Redo)),
                ],
            ),
            ToolbarGroup::buttons(
                "marks",
                vec![
                    btn(&labels.bold, "B", Command::ToggleBold, Some(ActiveQuery::Bold)),
                    btn(&labels.italic, "I", Command::ToggleItalic, Some(ActiveQuery::Italic)),
                    btn(
                        &labels.underline,
                        "U",
                        Command::ToggleUnderline,
                        Some(ActiveQuery::Underline),
                    ),
                    btn(
                        &labels.strikethrough,
                        "S",
                        Command::ToggleStrike,
                        Some(ActiveQuery::Strike),
                    ),
                    btn(&labels.inline_code, "<>", Command::ToggleCode, Some(ActiveQuery::Code)),
                ],
            ),
            ToolbarGroup::buttons(
                "headings",
                [(1u8, &labels.heading1, "H1"), (2, &labels.heading2, "H2"), (3, &labels.heading3, "H3")]
                    .into_iter()
                    .map(|(level, title, icon)| {
                        btn(
                            title,
                            icon,
                            Command::ToggleHeading { level },
                            Some(ActiveQuery::Heading { level }),
                        )
                    })
                    .collect(),
            ),
            ToolbarGroup::buttons(
                "lists",
                vec![
                    btn(
                        &labels.bullet_list,
                        "•≡",
                        Command::ToggleBulletList,
                        Some(ActiveQuery::BulletList),
                    ),
                    btn(
                        &labels.ordered_list,
                        "1.",
                        Command::ToggleOrderedList,
                        Some(ActiveQuery::OrderedList),
                    ),
                    btn(&labels.task_list, "☑", Command::ToggleTaskList, Some(ActiveQuery::TaskList)),
                ],
            ),
            ToolbarGroup::buttons(
                "blocks",
                vec![
                    btn(
                        &labels.blockquote,
                        "❝",
                        Command::ToggleBlockquote,
                        Some(ActiveQuery::Blockquote),
                    ),
                    btn(&labels.code_block, "{ }", Command::ToggleCodeBlock, Some(ActiveQuery::CodeBlock)),
                    btn(&labels.horizontal_rule, "─", Command::SetHorizontalRule, None),
                ],
            ),
            ToolbarGroup::buttons(
                "alignment",
                [
                    (Alignment::Left, &labels.align_left, "≡←"),
                    (Alignment::Center, &labels.align_center, "≡↔"),
                    (Alignment::Right, &labels.align_right, "≡→"),
                ]
                .into_iter()
                .map(|(alignment, title, icon)| {
                    btn(
                        title,
                        icon,
                        Command::SetTextAlign { alignment },
                        Some(ActiveQuery::TextAlign { alignment }),
                    )
                })
                .collect(),
            ),
            ToolbarGroup {
                name: "colors",
                items: vec![
                    ToolbarItem::ColorPicker(self.picker_view(
                        &self.text_color,
                        &labels.text_color,
                        engine.attribute(MarkType::TextStyle, "color"),
                    )),
                    ToolbarItem::ColorPicker(self.picker_view(
                        &self.highlight,
                        &labels.highlight,
                        engine.attribute(MarkType::Highlight, "color"),
                    )),
                ],
            },
        ];

        let mut media = vec![
            MenuButton::new(
                &labels.link,
                "🔗",
                UiAction::OpenDialog {
                    dialog: DialogKind::Link,
                },
            )
            .active(engine.is_active(&ActiveQuery::Link)),
        ];
        if options.enable_image_upload {
            media.push(MenuButton::new(
                &labels.image,
                "🖼",
                UiAction::OpenDialog {
                    dialog: DialogKind::Image,
                },
            ));
        }
        media.push(MenuButton::new(
            &labels.video,
            "▶",
            UiAction::OpenDialog {
                dialog: DialogKind::Video,
            },
        ));
        groups.push(ToolbarGroup::buttons("media", media));

        let mut table = vec![btn(&labels.insert_table, "⊞", Command::default_table(), None)];
        if engine.is_active(&ActiveQuery::Table) {
            table.extend([
                btn(&labels.add_column, "+|", Command::AddColumnAfter, None),
                btn(&labels.delete_column, "-|", Command::DeleteColumn, None),
                btn(&labels.add_row, "+―", Command::AddRowAfter, None),
                btn(&labels.delete_row, "-―", Command::DeleteRow, None),
                btn(&labels.delete_table, "✕", Command::DeleteTable, None),
            ]);
        }
        groups.push(ToolbarGroup::buttons("table", table));

        if options.show_export_panel {
            let toggle = MenuButton::new(
                &labels.export,
                "⤓",
                UiAction::Export {
                    op: ExportOp::Toggle,
                },
            )
            .active(self.export.is_open());
            groups.push(ToolbarGroup {
                name: "export",
                items: vec![ToolbarItem::Export(ExportView {
                    toggle,
                    open: self.export.is_open(),
                    format: self.export.format(),
                    output: self.export.is_open().then(|| self.export.output(engine)),
                })],
            });
        }

        if options.show_fullscreen_toggle {
            let (title, icon) = if fullscreen {
                (&labels.exit_fullscreen, "⤡")
            } else {
                (&labels.fullscreen, "⤢")
            };
            groups.push(ToolbarGroup::buttons(
                "fullscreen",
                vec![MenuButton::new(title, icon, UiAction::ToggleFullscreen).active(fullscreen)],
            ));
        }

        groups
    }

    fn picker_view(&self, picker: &ColorPicker, title: &str, current: Option<String>) -> PickerView {
        PickerView {
            kind: picker.kind(),
            node: picker.node(),
            title: title.to_string(),
            icon: "A",
            current: current.filter(|c| !c.is_empty()),
            open: picker.is_open(),
            palette: picker.palette().to_vec(),
        }
    }

    /// Route a picker operation. A choice or reset yields the engine command
    /// to run.
    pub fn picker_op(&self, kind: PickerKind, op: &PickerOp, host: &HostEvents) -> Option<Command> {
        let event = self.picker(kind).apply(op, host)?;
        Some(color_command(kind, event))
    }

    pub fn export_op(
        &mut self,
        op: ExportOp,
        engine: &dyn EditorEngine,
        clipboard: &dyn ClipboardPlatform,
    ) {
        self.export.apply(op, engine, clipboard);
    }

    /// Show a dialog. The link dialog starts from the href at the selection.
    pub fn open_dialog(&mut self, kind: DialogKind, engine: &dyn EditorEngine) {
        let dialog = match kind {
            DialogKind::Link => ActiveDialog::Link(LinkDialog::new(
                engine
                    .attribute(MarkType::Link, "href")
                    .unwrap_or_default(),
            )),
            DialogKind::Image => ActiveDialog::Image(ImageDialog::new()),
            DialogKind::Video => ActiveDialog::Video(VideoDialog::new()),
        };
        tracing::debug!(?kind, "dialog opened");
        self.dialog = Some(dialog);
    }

    pub fn dialog_input(&mut self, field: Field, value: String) {
        if let Some(dialog) = &mut self.dialog {
            dialog.input(field, value);
        }
    }

    /// Fill the image dialog's source from an uploaded file.
    pub fn dialog_image_file(&mut self, bytes: &[u8], declared_mime: Option<&str>) -> bool {
        match &mut self.dialog {
            Some(ActiveDialog::Image(dialog)) => {
                dialog.set_file(bytes, declared_mime);
                true
            }
            _ => false,
        }
    }

    pub fn dialog_key(&mut self, key: &Key) -> Option<DialogResult> {
        let result = self.dialog.as_ref()?.key_down(key)?;
        Some(self.finish_dialog(result))
    }

    pub fn dialog_button(&mut self, op: DialogOp) -> Option<DialogResult> {
        let result = self.dialog.as_ref()?.button(op)?;
        Some(self.finish_dialog(result))
    }

    pub fn overlay_click(&mut self) -> Option<DialogResult> {
        let result = self.dialog.as_ref()?.cancel();
        Some(self.finish_dialog(result))
    }

    /// Close the dialog. The caller runs whatever [`dialog_command`] the
    /// result implies.
    fn finish_dialog(&mut self, result: DialogResult) -> DialogResult {
        self.dialog = None;
        tracing::debug!(cancelled = result.is_cancel(), "dialog closed");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostEvent, dispatch_host_event};
    use crate::test_support::{MockEngine, RecordingClipboard};

    fn names(groups: &[ToolbarGroup]) -> Vec<&'static str> {
        groups.iter().map(|g| g.name).collect()
    }

    fn group<'a>(groups: &'a [ToolbarGroup], name: &str) -> &'a ToolbarGroup {
        groups.iter().find(|g| g.name == name).unwrap()
    }

    fn button_titles(group: &ToolbarGroup) -> Vec<&str> {
        group
            .items
            .iter()
            .filter_map(|item| match item {
                ToolbarItem::Button(b) => Some(b.title.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_default_groups() {
        let engine = MockEngine::new();
        let toolbar = Toolbar::new(None);
        let groups = toolbar.groups(&engine, &Labels::default(), &EditorOptions::default(), false);
        assert_eq!(
            names(&groups),
            [
                "history",
                "marks",
                "headings",
                "lists",
                "blocks",
                "alignment",
                "colors",
                "media",
                "table",
                "export",
                "fullscreen"
            ]
        );
        assert_eq!(
            button_titles(group(&groups, "marks")),
            ["Bold", "Italic", "Underline", "Strikethrough", "Inline Code"]
        );
    }

    #[test]
    fn test_optional_groups_follow_options() {
        let engine = MockEngine::new();
        let toolbar = Toolbar::new(None);
        let options = EditorOptions {
            show_export_panel: false,
            show_fullscreen_toggle: false,
            enable_image_upload: false,
            ..EditorOptions::default()
        };
        let groups = toolbar.groups(&engine, &Labels::default(), &options, false);
        assert!(!names(&groups).contains(&"export"));
        assert!(!names(&groups).contains(&"fullscreen"));
        assert_eq!(button_titles(group(&groups, "media")), ["Link", "Video"]);
    }

    #[test]
    fn test_undo_redo_disabled_when_engine_cannot() {
        let engine = MockEngine::new();
        engine.block(Command::Undo);
        let toolbar = Toolbar::new(None);
        let groups = toolbar.groups(&engine, &Labels::default(), &EditorOptions::default(), false);
        let ToolbarItem::Button(undo) = &group(&groups, "history").items[0] else {
            panic!("expected a button");
        };
        let ToolbarItem::Button(redo) = &group(&groups, "history").items[1] else {
            panic!("expected a button");
        };
        assert!(undo.disabled);
        assert!(!redo.disabled);
    }

    #[test]
    fn test_table_controls_only_inside_table() {
        let engine = MockEngine::new();
        let toolbar = Toolbar::new(None);
        let labels = Labels::default();
        let options = EditorOptions::default();

        let groups = toolbar.groups(&engine, &labels, &options, false);
        assert_eq!(button_titles(group(&groups, "table")), ["Insert Table"]);

        engine.set_active(ActiveQuery::Table, true);
        let groups = toolbar.groups(&engine, &labels, &options, false);
        assert_eq!(
            button_titles(group(&groups, "table")),
            [
                "Insert Table",
                "Add Column",
                "Delete Column",
                "Add Row",
                "Delete Row",
                "Delete Table"
            ]
        );

        engine.set_active(ActiveQuery::Table, false);
        let groups = toolbar.groups(&engine, &labels, &options, false);
        assert_eq!(button_titles(group(&groups, "table")).len(), 1);
    }

    #[test]
    fn test_labels_flow_into_titles() {
        let engine = MockEngine::new();
        let toolbar = Toolbar::new(None);
        let mut overrides = crate::labels::LabelOverrides::default();
        overrides.bold = Some("Gras".into());
        overrides.exit_fullscreen = Some("Quitter".into());
        let labels = Labels::resolve(Some(&overrides));
        let groups = toolbar.groups(&engine, &labels, &EditorOptions::default(), true);
        assert_eq!(button_titles(group(&groups, "marks"))[0], "Gras");
        assert_eq!(button_titles(group(&groups, "fullscreen")), ["Quitter"]);
    }

    #[test]
    fn test_picker_selection_yields_color_commands() {
        let host = HostEvents::new();
        let toolbar = Toolbar::new(None);

        assert_eq!(toolbar.picker_op(PickerKind::TextColor, &PickerOp::Toggle, &host), None);
        assert_eq!(
            toolbar.picker_op(PickerKind::TextColor, &PickerOp::Select("#e74c3c".into()), &host),
            Some(Command::SetColor {
                color: "#e74c3c".into()
            })
        );

        toolbar.picker_op(PickerKind::Highlight, &PickerOp::Toggle, &host);
        assert_eq!(
            toolbar.picker_op(PickerKind::Highlight, &PickerOp::Reset, &host),
            Some(Command::UnsetHighlight)
        );
        assert_eq!(toolbar.picker_op(PickerKind::Highlight, &PickerOp::Reset, &host), None);
        assert!(host.is_empty());
    }

    #[test]
    fn test_picker_view_shows_current_color() {
        let engine = MockEngine::new();
        engine.set_attribute(MarkType::TextStyle, "color", "#3498db");
        let host = HostEvents::new();
        let toolbar = Toolbar::new(None);
        toolbar.picker(PickerKind::Highlight).open(&host);

        let groups = toolbar.groups(&engine, &Labels::default(), &EditorOptions::default(), false);
        let colors = group(&groups, "colors");
        let [ToolbarItem::ColorPicker(text), ToolbarItem::ColorPicker(highlight)] =
            colors.items.as_slice()
        else {
            panic!("expected two pickers");
        };
        assert_eq!(text.current.as_deref(), Some("#3498db"));
        assert!(text.is_active());
        assert!(!text.open);
        assert!(!highlight.is_active());
        assert!(highlight.open);

        dispatch_host_event(&host, &HostEvent::PointerDown { target: None });
        assert!(!toolbar.picker(PickerKind::Highlight).is_open());
    }

    #[test]
    fn test_link_dialog_prefills_and_submits() {
        let engine = MockEngine::new();
        engine.set_attribute(MarkType::Link, "href", "https://old.example");
        let mut toolbar = Toolbar::new(None);

        toolbar.open_dialog(DialogKind::Link, &engine);
        let Some(ActiveDialog::Link(link)) = toolbar.dialog() else {
            panic!("expected link dialog");
        };
        assert_eq!(link.url(), "https://old.example");
        assert!(link.can_remove());

        toolbar.dialog_input(Field::LinkUrl, "https://new.example".into());
        let result = toolbar.dialog_key(&Key::Enter);
        assert_eq!(
            result,
            Some(DialogResult::Link(DialogOutcome::Submit(
                "https://new.example".into()
            )))
        );
        assert!(toolbar.dialog().is_none());
        assert_eq!(
            result.and_then(dialog_command),
            Some(Command::SetLink {
                href: "https://new.example".into()
            })
        );
    }

    #[test]
    fn test_link_remove_unsets_link() {
        let engine = MockEngine::new();
        engine.set_attribute(MarkType::Link, "href", "https://old.example");
        let mut toolbar = Toolbar::new(None);
        toolbar.open_dialog(DialogKind::Link, &engine);
        let result = toolbar.dialog_button(DialogOp::Remove);
        assert_eq!(result.and_then(dialog_command), Some(Command::UnsetLink));
    }

    #[test]
    fn test_escape_and_overlay_cancel_without_commands() {
        let engine = MockEngine::new();
        let mut toolbar = Toolbar::new(None);

        toolbar.open_dialog(DialogKind::Video, &engine);
        toolbar.dialog_input(Field::VideoUrl, "https://youtu.be/x".into());
        let result = toolbar.dialog_key(&Key::Escape);
        assert!(result.as_ref().is_some_and(|r| r.is_cancel()));
        assert_eq!(result.and_then(dialog_command), None);
        assert!(toolbar.dialog().is_none());

        toolbar.open_dialog(DialogKind::Image, &engine);
        let result = toolbar.overlay_click();
        assert!(result.as_ref().is_some_and(|r| r.is_cancel()));
        assert_eq!(result.and_then(dialog_command), None);
    }

    #[test]
    fn test_invalid_submit_keeps_dialog_open() {
        let engine = MockEngine::new();
        let mut toolbar = Toolbar::new(None);
        toolbar.open_dialog(DialogKind::Image, &engine);
        assert_eq!(toolbar.dialog_key(&Key::Enter), None);
        assert_eq!(toolbar.dialog_button(DialogOp::Submit), None);
        assert!(toolbar.dialog().is_some());
    }

    #[test]
    fn test_image_upload_then_submit() {
        let engine = MockEngine::new();
        let mut toolbar = Toolbar::new(None);
        assert!(!toolbar.dialog_image_file(b"GIF89a", None));

        toolbar.open_dialog(DialogKind::Image, &engine);
        assert!(toolbar.dialog_image_file(b"GIF89a", Some("image/gif")));
        toolbar.dialog_input(Field::ImageAlt, "tiny".into());
        let result = toolbar.dialog_button(DialogOp::Submit);

        let Some(Command::SetImage { src, alt }) = result.and_then(dialog_command) else {
            panic!("expected an image insertion");
        };
        assert!(src.starts_with("data:image/gif;base64,"));
        assert_eq!(alt.as_deref(), Some("tiny"));
    }

    #[test]
    fn test_export_panel_output_only_when_open() {
        let engine = MockEngine::with_html("<p>x</p>");
        let clipboard = RecordingClipboard::default();
        let mut toolbar = Toolbar::new(None);
        let labels = Labels::default();
        let options = EditorOptions::default();

        let export = |toolbar: &Toolbar| {
            let groups = toolbar.groups(&engine, &labels, &options, false);
            match &group(&groups, "export").items[0] {
                ToolbarItem::Export(view) => view.clone(),
                other => panic!("unexpected item {other:?}"),
            }
        };
        assert_eq!(export(&toolbar).output, None);

        toolbar.export_op(ExportOp::Toggle, &engine, &clipboard);
        assert_eq!(export(&toolbar).output.as_deref(), Some("<p>x</p>"));
    }

    #[test]
    fn test_dialog_command_mapping() {
        assert_eq!(
            dialog_command(DialogResult::Video(DialogOutcome::Submit("v".into()))),
            Some(Command::SetVideo { src: "v".into() })
        );
        assert_eq!(dialog_command(DialogResult::Image(DialogOutcome::Cancel)), None);
    }
}
