//! Screen geometry shared by rendering and mouse hit-testing.
//!
//! Blocks are soft-wrapped into visual rows. A row covers a contiguous
//! char range of one block; spaces may hang past the right edge so that a
//! wrapped word never starts with a space.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;

use crate::document::{Alignment, Block, Document, Position};

/// Rows taken by the toolbar at the top of the screen.
pub const TOOLBAR_HEIGHT: u16 = 2;
/// Blank columns on each side of the document text.
pub const DOCUMENT_PADDING: u16 = 1;

const IMAGE_PREFIX: &str = "![image](";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenAreas {
    pub toolbar: Rect,
    pub document: Rect,
    pub prompt: Option<Rect>,
    pub toast: Option<Rect>,
    pub status: Rect,
}

/// Split the screen into toolbar, document and footer bars.
///
/// Footer rows are laid out bottom-up: status, then toast, then prompt.
pub fn screen_areas(area: Rect, prompt: bool, toast: bool) -> ScreenAreas {
    let row = |from_bottom: u16| Rect {
        y: area.y + area.height.saturating_sub(from_bottom),
        height: 1.min(area.height),
        ..area
    };
    let status = row(1);
    let toast_rect = toast.then(|| row(2));
    let prompt_rect = prompt.then(|| row(2 + u16::from(toast)));

    let footer = 1 + u16::from(toast) + u16::from(prompt);
    let toolbar_height = TOOLBAR_HEIGHT.min(area.height.saturating_sub(footer));
    let toolbar = Rect {
        height: toolbar_height,
        ..area
    };
    let document = Rect {
        y: area.y + toolbar_height,
        height: area.height.saturating_sub(toolbar_height + footer),
        ..area
    };
    ScreenAreas {
        toolbar,
        document,
        prompt: prompt_rect,
        toast: toast_rect,
        status,
    }
}

/// Columns available for document text inside `document`.
pub fn text_width(document: Rect) -> usize {
    usize::from(document.width.saturating_sub(DOCUMENT_PADDING * 2).max(1))
}

pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

/// One screen row of document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualRow {
    pub block: usize,
    /// First char offset covered by the row.
    pub start: usize,
    /// One past the last char offset covered by the row.
    pub end: usize,
    /// The row shows an embedded image placeholder.
    pub image: bool,
}

/// Short label for a block holding only an embedded image reference.
pub fn image_label(block: &Block) -> Option<String> {
    let text = block.text();
    let url = text.strip_prefix(IMAGE_PREFIX)?.strip_suffix(')')?;
    let rest = url.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    let bytes = payload.len() / 4 * 3;
    #[allow(clippy::cast_precision_loss)]
    let size = if bytes >= 1024 * 1024 {
        format!("{:.1} MiB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    };
    Some(format!("[image: {mime}, {size}]"))
}

/// Char ranges of the rows `block` wraps into at `width` columns.
pub fn wrap_block(block: &Block, width: usize) -> Vec<(usize, usize)> {
    let chars: Vec<char> = block.text().chars().collect();
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut start = 0;
    let mut col = 0;
    let mut break_after: Option<usize> = None;
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        let w = char_width(ch);
        if col + w > width && i > start && ch != ' ' {
            let brk = match break_after {
                Some(idx) if idx > start => idx,
                _ => i,
            };
            rows.push((start, brk));
            start = brk;
            col = chars[start..i].iter().copied().map(char_width).sum();
            break_after = None;
            continue;
        }
        col += w;
        if ch == ' ' {
            break_after = Some(i + 1);
        }
        i += 1;
    }
    rows.push((start, chars.len()));
    rows
}

/// All visual rows of the document, in screen order.
pub fn visual_rows(doc: &Document, width: usize) -> Vec<VisualRow> {
    let mut rows = Vec::new();
    for (idx, block) in doc.blocks().iter().enumerate() {
        if image_label(block).is_some() {
            rows.push(VisualRow {
                block: idx,
                start: 0,
                end: block.len(),
                image: true,
            });
            continue;
        }
        rows.extend(
            wrap_block(block, width)
                .into_iter()
                .map(|(start, end)| VisualRow {
                    block: idx,
                    start,
                    end,
                    image: false,
                }),
        );
    }
    rows
}

/// Index of the row showing `pos`.
///
/// An offset on a wrap boundary belongs to the row that starts there.
pub fn row_of(rows: &[VisualRow], pos: Position) -> usize {
    rows.iter()
        .rposition(|row| row.block == pos.block && row.start <= pos.offset)
        .or_else(|| rows.iter().position(|row| row.block == pos.block))
        .unwrap_or(0)
}

/// Display width of the text covered by `row`.
pub fn row_width(block: &Block, row: VisualRow) -> usize {
    if row.image {
        return image_label(block).map_or(0, |label| label.chars().map(char_width).sum());
    }
    block
        .text()
        .chars()
        .skip(row.start)
        .take(row.end - row.start)
        .map(char_width)
        .sum()
}

/// Horizontal offset of a row of `row_width` columns inside `area_width`.
///
/// Justified text is shown flush left.
pub fn align_offset(alignment: Option<Alignment>, row_width: usize, area_width: usize) -> usize {
    match alignment {
        Some(Alignment::Center) => (area_width / 2).saturating_sub(row_width / 2),
        Some(Alignment::Right) => area_width.saturating_sub(row_width),
        Some(Alignment::Left | Alignment::Justify) | None => 0,
    }
}

/// Column of `pos` relative to the start of the text area.
pub fn cursor_column(doc: &Document, row: VisualRow, pos: Position, area_width: usize) -> usize {
    let Some(block) = doc.block(row.block) else {
        return 0;
    };
    let offset = align_offset(block.alignment, row_width(block, row), area_width);
    if row.image {
        return if pos.offset == 0 {
            offset
        } else {
            offset + row_width(block, row)
        };
    }
    let within: usize = block
        .text()
        .chars()
        .skip(row.start)
        .take(pos.offset.saturating_sub(row.start))
        .map(char_width)
        .sum();
    offset + within
}

/// Document position under column `col` (relative to the text area) of `row`.
pub fn position_at(
    doc: &Document,
    rows: &[VisualRow],
    row_idx: usize,
    col: usize,
    area_width: usize,
) -> Position {
    let Some(&row) = rows.get(row_idx) else {
        let last = doc.block_count() - 1;
        let len = doc.block(last).map_or(0, Block::len);
        return Position::new(last, len);
    };
    let Some(block) = doc.block(row.block) else {
        return Position::default();
    };
    let rel = col.saturating_sub(align_offset(block.alignment, row_width(block, row), area_width));
    if row.image {
        let offset = if rel == 0 { 0 } else { row.end };
        return Position::new(row.block, offset);
    }

    let mut acc = 0;
    let text = block.text();
    for (idx, ch) in text.chars().enumerate().skip(row.start).take(row.end - row.start) {
        let w = char_width(ch);
        if acc + w > rel {
            return Position::new(row.block, idx);
        }
        acc += w;
    }
    let last_in_block = rows
        .get(row_idx + 1)
        .is_none_or(|next| next.block != row.block);
    let offset = if last_in_block || row.end == row.start {
        row.end
    } else {
        row.end - 1
    };
    Position::new(row.block, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows_for(text: &str, width: usize) -> Vec<String> {
        let block = Block::from_text(text);
        let chars: Vec<char> = text.chars().collect();
        wrap_block(&block, width)
            .into_iter()
            .map(|(s, e)| chars[s..e].iter().collect())
            .collect()
    }

    #[test]
    fn test_wrap_breaks_at_spaces() {
        assert_eq!(rows_for("hello world", 5), vec!["hello ", "world"]);
        assert_eq!(rows_for("aa bb cc", 6), vec!["aa bb ", "cc"]);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        assert_eq!(rows_for("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_wrap_empty_block_is_one_row() {
        assert_eq!(wrap_block(&Block::new(), 10), vec![(0, 0)]);
    }

    #[test]
    fn test_wrap_counts_wide_chars() {
        assert_eq!(rows_for("日本語", 4), vec!["日本", "語"]);
    }

    #[test]
    fn test_screen_areas_stack_footer_rows() {
        let areas = screen_areas(Rect::new(0, 0, 80, 24), true, true);
        assert_eq!(areas.toolbar, Rect::new(0, 0, 80, 2));
        assert_eq!(areas.document, Rect::new(0, 2, 80, 19));
        assert_eq!(areas.prompt, Some(Rect::new(0, 21, 80, 1)));
        assert_eq!(areas.toast, Some(Rect::new(0, 22, 80, 1)));
        assert_eq!(areas.status, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn test_screen_areas_tiny_terminal() {
        let areas = screen_areas(Rect::new(0, 0, 10, 1), false, false);
        assert_eq!(areas.document.height, 0);
        assert_eq!(areas.toolbar.height, 0);
        assert_eq!(areas.status, Rect::new(0, 0, 10, 1));
    }

    #[test]
    fn test_row_of_prefers_row_starting_at_boundary() {
        let doc = Document::from_plain_text("hello world\nx");
        let rows = visual_rows(&doc, 5);
        assert_eq!(rows.len(), 3);
        assert_eq!(row_of(&rows, Position::new(0, 5)), 0);
        assert_eq!(row_of(&rows, Position::new(0, 6)), 1);
        assert_eq!(row_of(&rows, Position::new(0, 11)), 1);
        assert_eq!(row_of(&rows, Position::new(1, 0)), 2);
    }

    #[test]
    fn test_image_block_is_a_single_labelled_row() {
        let marker = format!("![image](data:image/png;base64,{})", "A".repeat(4096));
        let doc = Document::from_plain_text(&format!("Hello\n{marker}"));
        let rows = visual_rows(&doc, 20);
        assert_eq!(rows.len(), 2);
        assert!(rows[1].image);
        assert_eq!(
            image_label(&doc.blocks()[1]).as_deref(),
            Some("[image: image/png, 3.0 KiB]")
        );
        assert_eq!(image_label(&doc.blocks()[0]), None);
    }

    #[test]
    fn test_position_at_maps_columns_to_offsets() {
        let doc = Document::from_plain_text("hello world");
        let rows = visual_rows(&doc, 5);
        assert_eq!(position_at(&doc, &rows, 0, 2, 5), Position::new(0, 2));
        assert_eq!(position_at(&doc, &rows, 0, 40, 5), Position::new(0, 5));
        assert_eq!(position_at(&doc, &rows, 1, 40, 5), Position::new(0, 11));
        assert_eq!(position_at(&doc, &rows, 9, 0, 5), Position::new(0, 11));
    }

    #[test]
    fn test_alignment_shifts_columns() {
        let doc = Document::from_blocks(vec![
            Block::from_text("abcd").with_alignment(Some(Alignment::Right)),
        ]);
        let rows = visual_rows(&doc, 10);
        assert_eq!(cursor_column(&doc, rows[0], Position::new(0, 0), 10), 6);
        assert_eq!(position_at(&doc, &rows, 0, 7, 10), Position::new(0, 1));
        assert_eq!(align_offset(Some(Alignment::Center), 4, 10), 3);
        assert_eq!(align_offset(Some(Alignment::Justify), 4, 10), 0);
    }
}
