use super::*;
use crate::app::{Message, Model, update};
use crate::document::{
    Alignment, Block, Document, InlineStyle, Run, StyleCommand, StyleSet,
};
use crate::ui::toolbar::{ToolbarAction, toolbar_buttons};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Position;
use ratatui::style::{Color, Modifier};
use std::path::PathBuf;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn draw(model: &Model) -> Terminal<TestBackend> {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal
}

fn row_text(buffer: &Buffer, row: u16) -> String {
    (0..buffer.area.width)
        .map(|col| buffer[(col, row)].symbol())
        .collect()
}

fn screen_text(buffer: &Buffer) -> String {
    (0..buffer.area.height)
        .map(|row| row_text(buffer, row))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_toolbar_shows_style_and_file_controls() {
    let terminal = draw(&Model::default());
    let buffer = terminal.backend().buffer();

    let first = row_text(buffer, 0);
    for label in [" B ", " I ", " U ", " S ", " Left ", " Center ", " Right ", " Justify "] {
        assert!(first.contains(label), "missing {label:?} in {first:?}");
    }
    let second = row_text(buffer, 1);
    assert!(second.contains("File:"));
    assert!(second.contains("document.txt"));
    assert!(second.contains("Save"));
    assert!(second.contains("[ ] Auto-save"));
    assert!(second.contains("Image"));
}

#[test]
fn test_autosave_checkbox_reflects_state() {
    let model = update(Model::default(), Message::ToggleAutoSave);
    let terminal = draw(&model);
    let buffer = terminal.backend().buffer();
    assert!(row_text(buffer, 1).contains("[x] Auto-save"));
    assert!(row_text(buffer, 23).contains("[auto-save]"));
}

#[test]
fn test_bold_text_renders_with_bold_modifier() {
    let bold: StyleSet = [InlineStyle::Bold].into_iter().collect();
    let doc = Document::from_blocks(vec![Block::from_runs(vec![
        Run::new("Hi", bold),
        Run::plain(" there"),
    ])]);
    let model = Model::new(doc, (80, 24));
    let terminal = draw(&model);
    let buffer = terminal.backend().buffer();

    assert_eq!(buffer[(1, 2)].symbol(), "H");
    assert!(buffer[(1, 2)].modifier.contains(Modifier::BOLD));
    assert_eq!(buffer[(4, 2)].symbol(), "t");
    assert!(!buffer[(4, 2)].modifier.contains(Modifier::BOLD));
}

#[test]
fn test_centered_block_is_offset() {
    let doc = Document::from_blocks(vec![
        Block::from_text("abcd").with_alignment(Some(Alignment::Center)),
    ]);
    let terminal = draw(&Model::new(doc, (80, 24)));
    let buffer = terminal.backend().buffer();
    // 78 text columns: (78 / 2) - (4 / 2) = 37, plus one column of padding.
    assert_eq!(buffer[(38, 2)].symbol(), "a");
    assert_eq!(buffer[(41, 2)].symbol(), "d");
}

#[test]
fn test_right_aligned_block_ends_at_margin() {
    let doc = Document::from_blocks(vec![
        Block::from_text("end").with_alignment(Some(Alignment::Right)),
    ]);
    let terminal = draw(&Model::new(doc, (80, 24)));
    let buffer = terminal.backend().buffer();
    assert_eq!(buffer[(78, 2)].symbol(), "d");
    assert_eq!(buffer[(79, 2)].symbol(), " ");
}

#[test]
fn test_image_block_renders_placeholder() {
    let doc = Document::from_plain_text("Hello\n![image](data:image/png;base64,AAAA)");
    let terminal = draw(&Model::new(doc, (80, 24)));
    let buffer = terminal.backend().buffer();
    assert!(row_text(buffer, 2).contains("Hello"));
    assert!(row_text(buffer, 3).contains("[image: image/png, 3 B]"));
    assert!(!screen_text(buffer).contains("base64"));
}

#[test]
fn test_active_style_button_is_highlighted() {
    let model = update(Model::default(), Message::InsertText("Hello".into()));
    let model = update(model, Message::SelectAll);
    let model = update(
        model,
        Message::ToggleStyle(StyleCommand::Inline(InlineStyle::Bold)),
    );
    let terminal = draw(&model);
    let buffer = terminal.backend().buffer();

    let buttons = toolbar_buttons(model.areas().toolbar, "", false);
    let rect_of = |action| {
        buttons
            .iter()
            .find(|b| b.action == action)
            .map(|b| b.rect)
            .unwrap()
    };
    let bold = rect_of(ToolbarAction::Style(StyleCommand::Inline(InlineStyle::Bold)));
    let italic = rect_of(ToolbarAction::Style(StyleCommand::Inline(InlineStyle::Italic)));
    assert_eq!(buffer[(bold.x, bold.y)].bg, Color::Cyan);
    assert_ne!(buffer[(italic.x, italic.y)].bg, Color::Cyan);
}

#[test]
fn test_selection_is_highlighted() {
    let model = update(Model::default(), Message::InsertText("Hello".into()));
    let model = update(model, Message::SelectAll);
    let terminal = draw(&model);
    let buffer = terminal.backend().buffer();
    assert_eq!(buffer[(1, 2)].bg, Color::Blue);
    assert_eq!(buffer[(5, 2)].bg, Color::Blue);
    assert_ne!(buffer[(6, 2)].bg, Color::Blue);
}

#[test]
fn test_cursor_follows_text() {
    let model = update(Model::default(), Message::InsertText("Hi".into()));
    let mut terminal = draw(&model);
    assert_eq!(terminal.get_cursor_position().unwrap(), Position::new(3, 2));
}

#[test]
fn test_status_bar_shows_position_and_filename() {
    let model = update(Model::default(), Message::InsertText("ab\ncd".into()));
    let model = update(model, Message::FilenameInput("notes.txt".into()));
    let terminal = draw(&model);
    let status = row_text(terminal.backend().buffer(), 23);
    assert!(status.contains("notes.txt"));
    assert!(status.contains("Ln 2, Col 3"));
    assert!(status.contains("F1:help"));
}

#[test]
fn test_focused_filename_field_shows_typed_text() {
    let model = update(Model::default(), Message::FocusFilename);
    let model = update(model, Message::FilenameInput("out".into()));
    let terminal = draw(&model);
    let toolbar = row_text(terminal.backend().buffer(), 1);
    assert!(toolbar.contains(" out"));
    assert!(!toolbar.contains("document.txt"));
}

#[test]
fn test_image_prompt_bar() {
    let model = update(Model::default(), Message::StartImagePrompt);
    let model = update(model, Message::ImagePathInput("pic.png".into()));
    let terminal = draw(&model);
    let prompt = row_text(terminal.backend().buffer(), 22);
    assert!(prompt.contains("Image path: pic.png"));
}

#[test]
fn test_toast_bar_shows_error() {
    let model = update(
        Model::default(),
        Message::ImageFailed {
            path: PathBuf::from("x.png"),
            error: "boom".into(),
        },
    );
    let terminal = draw(&model);
    let toast = row_text(terminal.backend().buffer(), 22);
    assert!(toast.contains("[error] Image failed: boom"));
}

#[test]
fn test_help_overlay_lists_shortcuts() {
    let mut model = update(Model::new(Document::empty(), (80, 40)), Message::ToggleHelp);
    model.config_global_path = Some(PathBuf::from("/cfg/inkpad/config"));
    let mut terminal = Terminal::new(TestBackend::new(80, 40)).unwrap();
    terminal.draw(|frame| render(&model, frame)).unwrap();
    let screen = screen_text(terminal.backend().buffer());
    assert!(screen.contains("Help"));
    assert!(screen.contains("Ctrl-b"));
    assert!(screen.contains("Ctrl-s"));
    assert!(screen.contains("/cfg/inkpad/config"));
}

#[test]
fn test_scrolled_document_starts_at_offset() {
    let text = (0..50)
        .map(|i| format!("line {i}"))
        .collect::<Vec<_>>()
        .join("\n");
    let model = Model::new(Document::from_plain_text(&text), (80, 24));
    let model = update(model, Message::ScrollDown(10));
    let terminal = draw(&model);
    let buffer = terminal.backend().buffer();
    assert!(row_text(buffer, 2).starts_with(" line 10 "));
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let model = Model::new(Document::from_plain_text("Hello"), (4, 2));
    let mut terminal = Terminal::new(TestBackend::new(4, 2)).unwrap();
    terminal.draw(|frame| render(&model, frame)).unwrap();
}
