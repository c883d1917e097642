use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let display = |path: Option<&std::path::PathBuf>, fallback: &str| {
        path.map_or_else(|| fallback.to_string(), |p| p.display().to_string())
    };
    let global_cfg = display(model.config_global_path.as_ref(), "<unknown>");
    let local_cfg = display(model.config_local_path.as_ref(), "<none>");
    let storage = display(model.storage_dir.as_ref(), "<none>");

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let mut all_lines: Vec<Line> = Vec::new();

    // Formatting
    all_lines.push(Line::styled("Formatting", section_style));
    all_lines.push(Line::raw("  Ctrl-b / Ctrl-i     Bold / italic"));
    all_lines.push(Line::raw("  Ctrl-u / Ctrl-t     Underline / strikethrough"));
    all_lines.push(Line::raw("  Alt-l / Alt-e       Align left / center"));
    all_lines.push(Line::raw("  Alt-r / Alt-j       Align right / justify"));
    all_lines.push(Line::raw("  Toolbar click       Same as the shortcuts"));
    all_lines.push(Line::raw(""));

    // Editing
    all_lines.push(Line::styled("Editing", section_style));
    all_lines.push(Line::raw("  Arrows, Home/End    Move cursor"));
    all_lines.push(Line::raw("  Shift+movement      Extend selection"));
    all_lines.push(Line::raw("  Ctrl+Home/End       Document start / end"));
    all_lines.push(Line::raw("  Ctrl-a              Select all"));
    all_lines.push(Line::raw("  Mouse drag          Select text"));
    all_lines.push(Line::raw("  PageUp/PageDown     Scroll"));
    all_lines.push(Line::raw(""));

    // File
    all_lines.push(Line::styled("File", section_style));
    all_lines.push(Line::raw("  Ctrl-f              Edit filename"));
    all_lines.push(Line::raw("  Ctrl-s              Save as plain text"));
    all_lines.push(Line::raw("  F3                  Toggle auto-save"));
    all_lines.push(Line::raw("  Ctrl-o              Insert image"));
    all_lines.push(Line::raw(""));

    // Other
    all_lines.push(Line::styled("Other", section_style));
    all_lines.push(Line::raw("  Ctrl-q / Ctrl-c     Quit"));
    all_lines.push(Line::raw("  F1                  Toggle help"));
    all_lines.push(Line::raw(""));

    // Config
    all_lines.push(Line::styled("Config", section_style));
    all_lines.push(Line::raw(format!("  Global: {global_cfg}")));
    all_lines.push(Line::raw(format!("  Local override: {local_cfg}")));
    all_lines.push(Line::raw(format!("  Auto-save store: {storage}")));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Inner area: border(1) + padding(1) on each side = 4
    let inner = Rect::new(
        popup.x + 2,
        popup.y + 2,
        popup.width.saturating_sub(4),
        popup.height.saturating_sub(4),
    );

    // Reserve 1 row at bottom for footer hint
    let content_height = inner.height.saturating_sub(1);
    let content_area = Rect::new(inner.x, inner.y, inner.width, content_height);
    frame.render_widget(Paragraph::new(all_lines), content_area);

    let footer_area = Rect::new(inner.x, inner.y + content_height, inner.width, 1);
    let footer = Line::styled("any key closes", dim_style);
    frame.render_widget(Paragraph::new(footer), footer_area);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
