use std::path::PathBuf;

use crate::app::Model;
use crate::app::model::{Focus, ToastLevel};
use crate::document::{
    Block, Motion, Position, StyleCommand, toggle_alignment, toggle_inline_style,
};
use crate::embed::image_marker;

/// All possible events and actions in the application.
///
/// These represent user input, timer ticks and background completions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    InsertChar(char),
    /// Insert text at the cursor (paste)
    InsertText(String),
    /// Split the block at the cursor (Enter)
    SplitBlock,
    /// Delete selection or char before cursor (Backspace)
    DeleteBackward,
    /// Delete selection or char at cursor (Delete)
    DeleteForward,

    // Cursor and selection
    MoveCursor(Motion),
    /// Move the focus, keeping the anchor (Shift + movement)
    ExtendSelection(Motion),
    SelectAll,
    /// Place the cursor (mouse click)
    MoveTo(Position),
    /// Extend the selection to a position (mouse drag)
    SelectTo(Position),

    // Styling
    /// Toggle an inline style or block alignment
    ToggleStyle(StyleCommand),

    // Filename field
    FocusFilename,
    /// Replace the filename with the edited text
    FilenameInput(String),
    /// Return keyboard focus to the document
    FocusEditor,

    // Images
    /// Open the image path prompt
    StartImagePrompt,
    /// Update the image path being typed
    ImagePathInput(String),
    CancelImagePrompt,
    /// Start reading an image file
    InsertImage(PathBuf),
    /// An image read finished
    ImageLoaded { path: PathBuf, data_url: String },
    /// An image read failed
    ImageFailed { path: PathBuf, error: String },

    // Persistence
    /// Flip the auto-save checkbox
    ToggleAutoSave,
    /// The auto-save period elapsed
    AutoSaveTick,
    /// Export the document as plain text
    ExportFile,

    // Window
    ToggleHelp,
    HideHelp,
    ScrollUp(usize),
    ScrollDown(usize),
    /// Terminal resized
    Resize(u16, u16),

    /// Quit the application
    Quit,
}

impl Message {
    /// Whether handling this message can move the cursor or change the
    /// document layout.
    const fn moves_cursor(&self) -> bool {
        matches!(
            self,
            Self::InsertChar(_)
                | Self::InsertText(_)
                | Self::SplitBlock
                | Self::DeleteBackward
                | Self::DeleteForward
                | Self::MoveCursor(_)
                | Self::ExtendSelection(_)
                | Self::SelectAll
                | Self::MoveTo(_)
                | Self::SelectTo(_)
                | Self::ToggleStyle(_)
                | Self::Resize(..)
        )
    }
}

/// Normalize pasted text: CRLF and CR become `\n`, tabs become spaces,
/// other control characters are dropped.
fn clean_text(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\t' => out.push_str("    "),
            '\n' => out.push('\n'),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// File, storage and thread work happens in the side-effect handler.
pub fn update(mut model: Model, msg: Message) -> Model {
    let keep_cursor_visible = msg.moves_cursor();

    match msg {
        Message::InsertChar(ch) => {
            if !ch.is_control() {
                model.document.insert_char(ch);
            } else if ch == '\t' {
                model.document.insert_text("    ");
            }
        }
        Message::InsertText(text) => {
            model.document.insert_text(&clean_text(&text));
        }
        Message::SplitBlock => model.document.split_block(),
        Message::DeleteBackward => {
            model.document.delete_backward();
        }
        Message::DeleteForward => {
            model.document.delete_forward();
        }

        Message::MoveCursor(motion) => model.document.move_cursor(motion, false),
        Message::ExtendSelection(motion) => model.document.move_cursor(motion, true),
        Message::SelectAll => model.document.select_all(),
        Message::MoveTo(pos) => model.document.set_cursor(pos),
        Message::SelectTo(pos) => model.document.extend_selection_to(pos),

        Message::ToggleStyle(command) => {
            model.document = match command {
                StyleCommand::Inline(style) => toggle_inline_style(&model.document, style),
                StyleCommand::Block(alignment) => toggle_alignment(&model.document, alignment),
            };
        }

        Message::FocusFilename => model.focus = Focus::Filename,
        Message::FilenameInput(name) => model.filename = name,
        Message::FocusEditor | Message::CancelImagePrompt => model.focus = Focus::Editor,

        Message::StartImagePrompt => model.focus = Focus::ImagePath(String::new()),
        Message::ImagePathInput(path) => {
            if model.image_prompt().is_some() {
                model.focus = Focus::ImagePath(path);
            }
        }
        Message::InsertImage(_) => {
            model.focus = Focus::Editor;
            model.pending_image_reads += 1;
        }
        Message::ImageLoaded { path, data_url } => {
            model.pending_image_reads = model.pending_image_reads.saturating_sub(1);
            model.document.push_block(Block::from_text(&image_marker(&data_url)));
            let name = path
                .file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string());
            model.show_toast(ToastLevel::Info, format!("Inserted image {name}"));
        }
        Message::ImageFailed { path: _, error } => {
            model.pending_image_reads = model.pending_image_reads.saturating_sub(1);
            model.show_toast(ToastLevel::Error, format!("Image failed: {error}"));
        }

        Message::ToggleAutoSave => model.autosave_enabled = !model.autosave_enabled,
        // Handled entirely by side effects.
        Message::AutoSaveTick | Message::ExportFile => {}

        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,
        Message::ScrollUp(n) => model.scroll_by(-isize::try_from(n).unwrap_or(isize::MAX)),
        Message::ScrollDown(n) => model.scroll_by(isize::try_from(n).unwrap_or(isize::MAX)),
        Message::Resize(width, height) => model.size = (width, height),

        Message::Quit => model.should_quit = true,
    }

    if keep_cursor_visible {
        model.ensure_cursor_visible();
    }
    model
}
