//! Toolbar buttons and their hit areas.
//!
//! The first row holds the style buttons, the second the filename field,
//! the export button, the auto-save checkbox and the image button.
//! Button positions depend only on the toolbar area and the filename, so
//! rendering and mouse hit-testing share [`toolbar_buttons`].

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

use crate::document::{Alignment, InlineStyle, StyleCommand, StyleSet};
use crate::export::effective_filename;

/// Minimum width of the filename field, in columns.
const FILENAME_FIELD_MIN: u16 = 16;

/// Text drawn before the filename field.
pub const FILE_LABEL: &str = " File:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Style(StyleCommand),
    FocusFilename,
    Export,
    ToggleAutoSave,
    InsertImage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarButton {
    pub action: ToolbarAction,
    pub label: String,
    pub rect: Rect,
}

const STYLE_BUTTONS: [(&str, &str); 8] = [
    ("BOLD", " B "),
    ("ITALIC", " I "),
    ("UNDERLINE", " U "),
    ("STRIKETHROUGH", " S "),
    ("left-align", " Left "),
    ("center-align", " Center "),
    ("right-align", " Right "),
    ("justify", " Justify "),
];

pub fn autosave_label(enabled: bool) -> &'static str {
    if enabled {
        " [x] Auto-save "
    } else {
        " [ ] Auto-save "
    }
}

/// Label shown in the filename field: the edited name, or the fallback
/// name when the field is empty.
pub fn filename_field_label(filename: &str) -> String {
    format!(" {} ", effective_filename(filename))
}

/// Lay out every toolbar button inside `area`.
///
/// Buttons that do not fit are clipped or dropped.
pub fn toolbar_buttons(area: Rect, filename: &str, autosave_enabled: bool) -> Vec<ToolbarButton> {
    let mut buttons = Vec::new();
    if area.height == 0 {
        return buttons;
    }

    let mut cursor = Placer::new(area, 0);
    for (idx, (identifier, label)) in STYLE_BUTTONS.into_iter().enumerate() {
        if idx == 4 {
            cursor.skip(2);
        }
        if let Some(command) = StyleCommand::parse(identifier) {
            cursor.place(&mut buttons, ToolbarAction::Style(command), label.to_string());
        }
    }

    if area.height < 2 {
        return buttons;
    }
    let mut cursor = Placer::new(area, 1);
    cursor.skip(UnicodeWidthStr::width(FILE_LABEL));
    let field = filename_field_label(filename);
    let pad =
        usize::from(FILENAME_FIELD_MIN).saturating_sub(UnicodeWidthStr::width(field.as_str()));
    cursor.place(
        &mut buttons,
        ToolbarAction::FocusFilename,
        format!("{field}{}", " ".repeat(pad)),
    );
    cursor.skip(1);
    cursor.place(&mut buttons, ToolbarAction::Export, " Save ".to_string());
    cursor.skip(2);
    cursor.place(
        &mut buttons,
        ToolbarAction::ToggleAutoSave,
        autosave_label(autosave_enabled).to_string(),
    );
    cursor.skip(2);
    cursor.place(&mut buttons, ToolbarAction::InsertImage, " Image ".to_string());
    buttons
}

/// Action of the button under (`col`, `row`), if any.
pub fn toolbar_hit(buttons: &[ToolbarButton], col: u16, row: u16) -> Option<ToolbarAction> {
    buttons
        .iter()
        .find(|button| {
            let r = button.rect;
            col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
        })
        .map(|button| button.action)
}

/// Whether the button for `action` is shown as active.
pub fn is_active(
    action: ToolbarAction,
    inline: StyleSet,
    alignment: Option<Alignment>,
    autosave_enabled: bool,
) -> bool {
    match action {
        ToolbarAction::Style(StyleCommand::Inline(style)) => inline.contains(style),
        ToolbarAction::Style(StyleCommand::Block(align)) => alignment == Some(align),
        ToolbarAction::ToggleAutoSave => autosave_enabled,
        ToolbarAction::FocusFilename | ToolbarAction::Export | ToolbarAction::InsertImage => false,
    }
}

/// Inline style a style button demonstrates on its own label.
pub const fn label_style(action: ToolbarAction) -> Option<InlineStyle> {
    match action {
        ToolbarAction::Style(StyleCommand::Inline(style)) => Some(style),
        _ => None,
    }
}

struct Placer {
    area: Rect,
    y: u16,
    x: u16,
}

impl Placer {
    const fn new(area: Rect, row: u16) -> Self {
        Self {
            area,
            y: area.y + row,
            x: area.x + 1,
        }
    }

    fn skip(&mut self, cols: usize) {
        let cols = u16::try_from(cols).unwrap_or(u16::MAX);
        self.x = self.x.saturating_add(cols);
    }

    fn place(&mut self, buttons: &mut Vec<ToolbarButton>, action: ToolbarAction, label: String) {
        let right = self.area.x + self.area.width;
        let width = u16::try_from(UnicodeWidthStr::width(label.as_str())).unwrap_or(u16::MAX);
        if self.x < right {
            buttons.push(ToolbarButton {
                action,
                label,
                rect: Rect::new(self.x, self.y, width.min(right - self.x), 1),
            });
        }
        self.x = self.x.saturating_add(width).saturating_add(1);
    }
}
