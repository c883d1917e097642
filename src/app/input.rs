use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::model::Focus;
use crate::app::{App, Message, Model};
use crate::document::{Alignment, InlineStyle, Motion, Position, StyleCommand};
use crate::ui::layout::{DOCUMENT_PADDING, position_at, visual_rows};
use crate::ui::toolbar::{ToolbarAction, toolbar_buttons, toolbar_hit};

/// Rows scrolled per mouse wheel step.
const WHEEL_ROWS: usize = 3;

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Paste(text) => Self::handle_paste(text, model),
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            _ => None,
        }
    }

    fn handle_paste(text: &str, model: &Model) -> Option<Message> {
        match &model.focus {
            Focus::Editor => Some(Message::InsertText(text.to_string())),
            Focus::Filename => {
                let line = text.lines().next().unwrap_or_default();
                Some(Message::FilenameInput(format!("{}{line}", model.filename)))
            }
            Focus::ImagePath(path) => {
                let line = text.lines().next().unwrap_or_default().trim();
                Some(Message::ImagePathInput(format!("{path}{line}")))
            }
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        // Global shortcuts work regardless of focus.
        match key.code {
            KeyCode::Char('q' | 'c') if ctrl => return Some(Message::Quit),
            KeyCode::Char('s') if ctrl => return Some(Message::ExportFile),
            KeyCode::F(1) => return Some(Message::ToggleHelp),
            KeyCode::F(3) => return Some(Message::ToggleAutoSave),
            _ => {}
        }

        match &model.focus {
            Focus::Filename => Self::handle_field_key(key, &model.filename, ctrl || alt)
                .map(|edit| edit.map_or(Message::FocusEditor, Message::FilenameInput)),
            Focus::ImagePath(path) => {
                if key.code == KeyCode::Enter {
                    let path = path.trim();
                    return Some(if path.is_empty() {
                        Message::CancelImagePrompt
                    } else {
                        Message::InsertImage(path.into())
                    });
                }
                Self::handle_field_key(key, path, ctrl || alt)
                    .map(|edit| edit.map_or(Message::CancelImagePrompt, Message::ImagePathInput))
            }
            Focus::Editor => Self::handle_editor_key(key, ctrl, alt, model.keyboard_enhanced),
        }
    }

    /// Single-line field editing.
    ///
    /// `Some(Some(text))` is an edit, `Some(None)` leaves the field.
    fn handle_field_key(key: KeyEvent, current: &str, modified: bool) -> Option<Option<String>> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => Some(None),
            KeyCode::Backspace => {
                let mut next = current.to_string();
                next.pop();
                Some(Some(next))
            }
            KeyCode::Char(c) if !modified => {
                let mut next = current.to_string();
                next.push(c);
                Some(Some(next))
            }
            _ => None,
        }
    }

    /// Without keyboard enhancement the terminal sends Ctrl-i as a bare
    /// Tab, so Tab toggles italic there and only moves to the filename
    /// field when the two keys can be told apart.
    fn handle_editor_key(
        key: KeyEvent,
        ctrl: bool,
        alt: bool,
        keyboard_enhanced: bool,
    ) -> Option<Message> {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let motion = |plain: Motion| {
            if shift {
                Message::ExtendSelection(plain)
            } else {
                Message::MoveCursor(plain)
            }
        };
        let inline = |style| Some(Message::ToggleStyle(StyleCommand::Inline(style)));
        let align = |alignment| Some(Message::ToggleStyle(StyleCommand::Block(alignment)));

        match key.code {
            // Styling
            KeyCode::Char('b') if ctrl => inline(InlineStyle::Bold),
            KeyCode::Char('i') if ctrl => inline(InlineStyle::Italic),
            KeyCode::Char('u') if ctrl => inline(InlineStyle::Underline),
            KeyCode::Char('t') if ctrl => inline(InlineStyle::Strikethrough),
            KeyCode::Char('l') if alt => align(Alignment::Left),
            KeyCode::Char('e') if alt => align(Alignment::Center),
            KeyCode::Char('r') if alt => align(Alignment::Right),
            KeyCode::Char('j') if alt => align(Alignment::Justify),

            // Toolbar
            KeyCode::Char('f') if ctrl => Some(Message::FocusFilename),
            KeyCode::Char('o') if ctrl => Some(Message::StartImagePrompt),
            KeyCode::Char('a') if ctrl => Some(Message::SelectAll),
            KeyCode::Tab if keyboard_enhanced => Some(Message::FocusFilename),
            KeyCode::Tab => inline(InlineStyle::Italic),

            // Navigation
            KeyCode::Left => Some(motion(Motion::Left)),
            KeyCode::Right => Some(motion(Motion::Right)),
            KeyCode::Up => Some(motion(Motion::Up)),
            KeyCode::Down => Some(motion(Motion::Down)),
            KeyCode::Home if ctrl => Some(motion(Motion::DocumentStart)),
            KeyCode::End if ctrl => Some(motion(Motion::DocumentEnd)),
            KeyCode::Home => Some(motion(Motion::BlockStart)),
            KeyCode::End => Some(motion(Motion::BlockEnd)),
            KeyCode::PageUp => Some(Message::ScrollUp(10)),
            KeyCode::PageDown => Some(Message::ScrollDown(10)),

            // Editing
            KeyCode::Enter => Some(Message::SplitBlock),
            KeyCode::Backspace => Some(Message::DeleteBackward),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Char(c) if !ctrl && !alt => Some(Message::InsertChar(c)),

            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return match mouse.kind {
                MouseEventKind::Down(_) => Some(Message::HideHelp),
                _ => None,
            };
        }

        let areas = model.areas();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if point_in_rect(mouse.column, mouse.row, areas.toolbar) {
                    let buttons =
                        toolbar_buttons(areas.toolbar, &model.filename, model.autosave_enabled);
                    return toolbar_hit(&buttons, mouse.column, mouse.row).map(toolbar_message);
                }
                let pos = document_position(model, mouse.column, mouse.row, false)?;
                if mouse.modifiers.contains(KeyModifiers::SHIFT) {
                    Some(Message::SelectTo(pos))
                } else if model.focus == Focus::Editor {
                    Some(Message::MoveTo(pos))
                } else {
                    // First click back into the document only returns focus.
                    Some(Message::FocusEditor)
                }
            }
            MouseEventKind::Drag(MouseButton::Left) if model.focus == Focus::Editor => {
                document_position(model, mouse.column, mouse.row, true).map(Message::SelectTo)
            }
            MouseEventKind::ScrollUp => Some(Message::ScrollUp(WHEEL_ROWS)),
            MouseEventKind::ScrollDown => Some(Message::ScrollDown(WHEEL_ROWS)),
            _ => None,
        }
    }
}

const fn toolbar_message(action: ToolbarAction) -> Message {
    match action {
        ToolbarAction::Style(command) => Message::ToggleStyle(command),
        ToolbarAction::FocusFilename => Message::FocusFilename,
        ToolbarAction::Export => Message::ExportFile,
        ToolbarAction::ToggleAutoSave => Message::ToggleAutoSave,
        ToolbarAction::InsertImage => Message::StartImagePrompt,
    }
}

const fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Document position under a screen cell.
///
/// With `clamp`, rows above or below the document area map to its first
/// or last visible row (for drags that leave the area).
fn document_position(model: &Model, col: u16, row: u16, clamp: bool) -> Option<Position> {
    let area = model.areas().document;
    if area.height == 0 {
        return None;
    }
    let bottom = area.y + area.height - 1;
    let row = if clamp {
        row.clamp(area.y, bottom)
    } else if row < area.y || row > bottom {
        return None;
    } else {
        row
    };
    let width = model.text_width();
    let rows = visual_rows(&model.document, width);
    let row_idx = model.scroll_offset + usize::from(row - area.y);
    let text_col = usize::from(col.saturating_sub(area.x + DOCUMENT_PADDING));
    Some(position_at(&model.document, &rows, row_idx, text_col, width))
}
