use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::{Model, ToastLevel};
use crate::export::effective_filename;

const PROMPT_LABEL: &str = "Image path: ";

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let focus = model.document.selection().focus;
    let autosave_indicator = if model.autosave_enabled {
        "  [auto-save]"
    } else {
        ""
    };
    let image_indicator = if model.pending_image_reads > 0 {
        "  [reading image]"
    } else {
        ""
    };

    let status = format!(
        " {}  Ln {}, Col {}{}{}  F1:help",
        effective_filename(&model.filename),
        focus.block + 1,
        focus.offset + 1,
        autosave_indicator,
        image_indicator,
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}

pub fn render_image_prompt(model: &Model, frame: &mut Frame, area: Rect) {
    let Some(path) = model.image_prompt() else {
        return;
    };
    let text = format!("{PROMPT_LABEL}{path}");
    let bar = Paragraph::new(format!("{text}  Enter: insert  Esc: cancel"))
        .style(Style::default().bg(Color::Blue).fg(Color::White));
    frame.render_widget(bar, area);

    let typed = u16::try_from(UnicodeWidthStr::width(text.as_str())).unwrap_or(u16::MAX);
    if typed < area.width {
        frame.set_cursor_position((area.x + typed, area.y));
    }
}
