use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::{Focus, Model};
use crate::document::{Document, Position, StyleSet, current_alignment, current_inline_style};

use super::layout::{
    DOCUMENT_PADDING, VisualRow, align_offset, cursor_column, image_label, row_of, row_width,
    visual_rows,
};
use super::style::{
    button_style, field_style, image_placeholder_style, modifier_for, selection_style,
    text_style, toolbar_style,
};
use super::toolbar::{FILE_LABEL, ToolbarAction, is_active, label_style, toolbar_buttons};
use super::{overlays, status};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let areas = model.areas();

    render_toolbar(model, frame, areas.toolbar);
    render_document(model, frame, areas.document);

    if let Some(prompt) = areas.prompt {
        status::render_image_prompt(model, frame, prompt);
    }
    if let Some(toast) = areas.toast {
        status::render_toast_bar(model, frame, toast);
    }
    status::render_status_bar(model, frame, areas.status);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}

fn render_toolbar(model: &Model, frame: &mut Frame, area: Rect) {
    if area.height == 0 {
        return;
    }
    frame.render_widget(Paragraph::new("").style(toolbar_style()), area);

    let inline = current_inline_style(&model.document);
    let alignment = current_alignment(&model.document);
    let filename_focused = model.focus == Focus::Filename;

    if area.height > 1 {
        let label_area = Rect::new(area.x + 1, area.y + 1, area.width.saturating_sub(1), 1);
        frame.render_widget(Paragraph::new(FILE_LABEL).style(toolbar_style()), label_area);
    }

    for button in toolbar_buttons(area, &model.filename, model.autosave_enabled) {
        let (text, style) = if button.action == ToolbarAction::FocusFilename {
            let text = if filename_focused {
                // Show what is typed, not the fallback name.
                format!(" {}", model.filename)
            } else {
                button.label.clone()
            };
            (text, field_style(filename_focused))
        } else {
            let active = is_active(button.action, inline, alignment, model.autosave_enabled);
            let mut style = button_style(active);
            if let Some(demo) = label_style(button.action) {
                style = style.add_modifier(modifier_for(demo));
            }
            (button.label.clone(), style)
        };
        frame.render_widget(Paragraph::new(text.clone()).style(style), button.rect);

        if button.action == ToolbarAction::FocusFilename && filename_focused {
            let typed = u16::try_from(UnicodeWidthStr::width(text.as_str())).unwrap_or(u16::MAX);
            let x = button.rect.x.saturating_add(typed);
            if x < button.rect.x + button.rect.width {
                frame.set_cursor_position((x, button.rect.y));
            }
        }
    }
}

fn render_document(model: &Model, frame: &mut Frame, area: Rect) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let doc = &model.document;
    let width = model.text_width();
    let rows = visual_rows(doc, width);
    let text_x = area.x + DOCUMENT_PADDING.min(area.width);
    let text_w = area.width.saturating_sub(DOCUMENT_PADDING * 2).max(1);

    for (screen_row, row) in rows
        .iter()
        .skip(model.scroll_offset)
        .take(usize::from(area.height))
        .enumerate()
    {
        let y = area.y + u16::try_from(screen_row).unwrap_or(u16::MAX);
        let line = if row.image {
            image_line(doc, *row, width)
        } else {
            text_line(doc, *row, width)
        };
        frame.render_widget(Paragraph::new(line), Rect::new(text_x, y, text_w, 1));
    }

    if model.focus != Focus::Editor {
        return;
    }
    let focus = doc.selection().focus;
    let cursor_row = row_of(&rows, focus);
    if cursor_row < model.scroll_offset
        || cursor_row >= model.scroll_offset + usize::from(area.height)
    {
        return;
    }
    let col = cursor_column(doc, rows[cursor_row], focus, width);
    let x = usize::from(text_x) + col.min(width);
    let y = area.y + u16::try_from(cursor_row - model.scroll_offset).unwrap_or(u16::MAX);
    frame.set_cursor_position((u16::try_from(x).unwrap_or(u16::MAX), y));
}

fn selection_bounds(doc: &Document) -> Option<(Position, Position)> {
    let selection = doc.selection();
    (!selection.is_collapsed()).then(|| (selection.start(), selection.end()))
}

fn is_selected(bounds: Option<(Position, Position)>, pos: Position) -> bool {
    bounds.is_some_and(|(start, end)| start <= pos && pos < end)
}

fn text_line(doc: &Document, row: VisualRow, width: usize) -> Line<'static> {
    let Some(block) = doc.block(row.block) else {
        return Line::default();
    };
    let bounds = selection_bounds(doc);
    let pad = align_offset(block.alignment, row_width(block, row), width);

    let mut spans = vec![Span::raw(" ".repeat(pad))];
    let mut current: Option<(String, Style)> = None;
    let chars = block
        .runs()
        .iter()
        .flat_map(|run| run.text.chars().map(move |ch| (ch, run.styles)));
    for (offset, (ch, styles)) in chars.enumerate().skip(row.start).take(row.end - row.start) {
        let style = char_style(styles, is_selected(bounds, Position::new(row.block, offset)));
        if let Some((text, current_style)) = current.as_mut()
            && *current_style == style
        {
            text.push(ch);
            continue;
        }
        if let Some((text, finished)) = current.replace((ch.to_string(), style)) {
            spans.push(Span::styled(text, finished));
        }
    }
    if let Some((text, style)) = current {
        spans.push(Span::styled(text, style));
    }
    Line::from(spans)
}

fn char_style(styles: StyleSet, selected: bool) -> Style {
    let style = text_style(styles);
    if selected { selection_style(style) } else { style }
}

fn image_line(doc: &Document, row: VisualRow, width: usize) -> Line<'static> {
    let Some(block) = doc.block(row.block) else {
        return Line::default();
    };
    let label = image_label(block).unwrap_or_default();
    let pad = align_offset(block.alignment, row_width(block, row), width);
    let bounds = selection_bounds(doc);
    let style = if is_selected(bounds, Position::new(row.block, 0)) {
        selection_style(image_placeholder_style())
    } else {
        image_placeholder_style()
    };
    Line::from(vec![Span::raw(" ".repeat(pad)), Span::styled(label, style)])
}
