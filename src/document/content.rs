use super::style::current_inline_style;
use super::types::{Block, Position, Selection, StyleSet};

/// Cursor motions understood by [`Document::move_cursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    /// Start of the current block (Home)
    BlockStart,
    /// End of the current block (End)
    BlockEnd,
    /// Start of the document (Ctrl+Home)
    DocumentStart,
    /// End of the document (Ctrl+End)
    DocumentEnd,
}

/// The content model: blocks of styled runs plus a selection.
///
/// A document always holds at least one block, and the selection always
/// points at valid positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub(super) blocks: Vec<Block>,
    pub(super) selection: Selection,
    /// Styles for the next inserted text at a collapsed cursor.
    pub(super) pending_style: Option<StyleSet>,
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

impl Document {
    /// A document with a single empty block.
    pub fn empty() -> Self {
        Self::from_blocks(Vec::new())
    }

    /// Build a document of unstyled blocks, one per line of `text`.
    pub fn from_plain_text(text: &str) -> Self {
        Self::from_blocks(text.split('\n').map(Block::from_text).collect())
    }

    /// Build a document from blocks, with the cursor at the start.
    pub fn from_blocks(mut blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            blocks.push(Block::new());
        }
        Self {
            blocks,
            selection: Selection::default(),
            pending_style: None,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, idx: usize) -> Option<&Block> {
        self.blocks.get(idx)
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub const fn selection(&self) -> Selection {
        self.selection
    }

    pub const fn pending_style(&self) -> Option<StyleSet> {
        self.pending_style
    }

    /// Whether the document holds no text at all.
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(Block::is_empty) && self.blocks.len() == 1
    }

    /// The raw characters of the document, blocks joined by `\n`.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Text covered by the selection, blocks joined by `\n`.
    pub fn selected_text(&self) -> String {
        let start = self.selection.start();
        let end = self.selection.end();
        let mut parts = Vec::new();
        for idx in start.block..=end.block {
            let text = self.blocks[idx].text();
            let from = if idx == start.block { start.offset } else { 0 };
            let to = if idx == end.block {
                end.offset
            } else {
                text.chars().count()
            };
            parts.push(text.chars().skip(from).take(to.saturating_sub(from)).collect::<String>());
        }
        parts.join("\n")
    }

    /// Replace the selection, clamping both ends into the document.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = Selection::new(self.clamp(selection.anchor), self.clamp(selection.focus));
        self.pending_style = None;
    }

    /// Place a caret at `pos`.
    pub fn set_cursor(&mut self, pos: Position) {
        self.set_selection(Selection::collapsed(pos));
    }

    /// Move the focus to `pos`, keeping the anchor.
    pub fn extend_selection_to(&mut self, pos: Position) {
        let anchor = self.selection.anchor;
        self.set_selection(Selection::new(anchor, pos));
    }

    pub fn select_all(&mut self) {
        let last = self.blocks.len() - 1;
        let end = Position::new(last, self.blocks[last].len());
        self.set_selection(Selection::new(Position::default(), end));
    }

    /// Insert text at the cursor, replacing any selection.
    ///
    /// Newlines split the current block. Inserted text takes the current
    /// inline style (pending override, or the style before the cursor).
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let styles = current_inline_style(self);
        self.delete_selection();

        let mut pos = self.selection.focus;
        let mut lines = text.split('\n');
        if let Some(first) = lines.next() {
            self.blocks[pos.block].insert_text(pos.offset, first, styles);
            pos.offset += first.chars().count();
        }
        for line in lines {
            let mut next = self.blocks[pos.block].split_off(pos.offset);
            next.insert_text(0, line, styles);
            pos = Position::new(pos.block + 1, line.chars().count());
            self.blocks.insert(pos.block, next);
        }

        self.selection = Selection::collapsed(pos);
        self.pending_style = None;
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_text(ch.encode_utf8(&mut buf));
    }

    /// Split the current block at the cursor (Enter).
    pub fn split_block(&mut self) {
        self.insert_text("\n");
    }

    /// Delete the selection, or the char before the cursor (Backspace).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_backward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let pos = self.selection.focus;
        let deleted = if pos.offset > 0 {
            self.blocks[pos.block].remove_range(pos.offset - 1, pos.offset);
            self.selection = Selection::collapsed(Position::new(pos.block, pos.offset - 1));
            true
        } else if pos.block > 0 {
            let prev_len = self.blocks[pos.block - 1].len();
            let current = self.blocks.remove(pos.block);
            self.blocks[pos.block - 1].append(current);
            self.selection = Selection::collapsed(Position::new(pos.block - 1, prev_len));
            true
        } else {
            false
        };
        self.pending_style = None;
        deleted
    }

    /// Delete the selection, or the char at the cursor (Delete).
    ///
    /// Returns `true` if anything was deleted.
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let pos = self.selection.focus;
        let len = self.blocks[pos.block].len();
        let deleted = if pos.offset < len {
            self.blocks[pos.block].remove_range(pos.offset, pos.offset + 1);
            true
        } else if pos.block + 1 < self.blocks.len() {
            let next = self.blocks.remove(pos.block + 1);
            self.blocks[pos.block].append(next);
            true
        } else {
            false
        };
        self.pending_style = None;
        deleted
    }

    /// Move the cursor, or extend the selection when `extend` is set.
    ///
    /// Without `extend`, Left/Right on a selection collapse it to its
    /// start/end.
    pub fn move_cursor(&mut self, motion: Motion, extend: bool) {
        let sel = self.selection;
        let target = match motion {
            Motion::Left if !extend && !sel.is_collapsed() => sel.start(),
            Motion::Right if !extend && !sel.is_collapsed() => sel.end(),
            _ => self.step(sel.focus, motion),
        };
        self.selection = if extend {
            Selection::new(sel.anchor, target)
        } else {
            Selection::collapsed(target)
        };
        self.pending_style = None;
    }

    /// Append a block at the end of the document.
    ///
    /// Existing blocks and the selection are left untouched.
    pub fn push_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Remove the selected text. Returns `false` for a collapsed selection.
    fn delete_selection(&mut self) -> bool {
        if self.selection.is_collapsed() {
            return false;
        }
        let start = self.selection.start();
        let end = self.selection.end();
        if start.block == end.block {
            self.blocks[start.block].remove_range(start.offset, end.offset);
        } else {
            let tail = self.blocks[end.block].split_off(end.offset);
            let _ = self.blocks[start.block].split_off(start.offset);
            self.blocks[start.block].append(tail);
            self.blocks.drain(start.block + 1..=end.block);
        }
        self.selection = Selection::collapsed(start);
        true
    }

    fn step(&self, pos: Position, motion: Motion) -> Position {
        let len = |idx: usize| self.blocks[idx].len();
        let last = self.blocks.len() - 1;
        match motion {
            Motion::Left => {
                if pos.offset > 0 {
                    Position::new(pos.block, pos.offset - 1)
                } else if pos.block > 0 {
                    Position::new(pos.block - 1, len(pos.block - 1))
                } else {
                    pos
                }
            }
            Motion::Right => {
                if pos.offset < len(pos.block) {
                    Position::new(pos.block, pos.offset + 1)
                } else if pos.block < last {
                    Position::new(pos.block + 1, 0)
                } else {
                    pos
                }
            }
            Motion::Up => {
                if pos.block > 0 {
                    Position::new(pos.block - 1, pos.offset.min(len(pos.block - 1)))
                } else {
                    Position::default()
                }
            }
            Motion::Down => {
                if pos.block < last {
                    Position::new(pos.block + 1, pos.offset.min(len(pos.block + 1)))
                } else {
                    Position::new(last, len(last))
                }
            }
            Motion::BlockStart => Position::new(pos.block, 0),
            Motion::BlockEnd => Position::new(pos.block, len(pos.block)),
            Motion::DocumentStart => Position::default(),
            Motion::DocumentEnd => Position::new(last, len(last)),
        }
    }

    fn clamp(&self, pos: Position) -> Position {
        let block = pos.block.min(self.blocks.len() - 1);
        Position::new(block, pos.offset.min(self.blocks[block].len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Alignment, InlineStyle, Run};

    fn doc_with_cursor_at_end(text: &str) -> Document {
        let mut doc = Document::from_plain_text(text);
        doc.move_cursor(Motion::DocumentEnd, false);
        doc
    }

    #[test]
    fn test_empty_document_has_one_block() {
        let doc = Document::empty();
        assert_eq!(doc.block_count(), 1);
        assert!(doc.is_empty());
        assert_eq!(doc.plain_text(), "");
    }

    #[test]
    fn test_from_plain_text_splits_on_newlines() {
        let doc = Document::from_plain_text("one\ntwo\n");
        assert_eq!(doc.block_count(), 3);
        assert_eq!(doc.plain_text(), "one\ntwo\n");
    }

    #[test]
    fn test_typing_builds_text_and_moves_cursor() {
        let mut doc = Document::empty();
        for ch in "Hello".chars() {
            doc.insert_char(ch);
        }
        assert_eq!(doc.plain_text(), "Hello");
        assert_eq!(doc.selection().focus, Position::new(0, 5));
    }

    #[test]
    fn test_insert_text_with_newlines_splits_blocks() {
        let mut doc = doc_with_cursor_at_end("ab");
        doc.move_cursor(Motion::Left, false);
        doc.insert_text("1\n2\n3");
        assert_eq!(doc.plain_text(), "a1\n2\n3b");
        assert_eq!(doc.selection().focus, Position::new(2, 1));
    }

    #[test]
    fn test_split_block_keeps_alignment() {
        let mut doc = Document::from_blocks(vec![
            Block::from_text("Title").with_alignment(Some(Alignment::Center)),
        ]);
        doc.move_cursor(Motion::BlockEnd, false);
        doc.split_block();
        assert_eq!(doc.block_count(), 2);
        assert_eq!(doc.blocks()[1].alignment, Some(Alignment::Center));
        assert_eq!(doc.selection().focus, Position::new(1, 0));
    }

    #[test]
    fn test_delete_backward_joins_blocks() {
        let mut doc = Document::from_plain_text("ab\ncd");
        doc.set_cursor(Position::new(1, 0));
        assert!(doc.delete_backward());
        assert_eq!(doc.plain_text(), "abcd");
        assert_eq!(doc.selection().focus, Position::new(0, 2));
    }

    #[test]
    fn test_delete_backward_at_start_is_noop() {
        let mut doc = Document::from_plain_text("ab");
        assert!(!doc.delete_backward());
        assert_eq!(doc.plain_text(), "ab");
    }

    #[test]
    fn test_delete_forward_joins_next_block() {
        let mut doc = Document::from_plain_text("ab\ncd");
        doc.set_cursor(Position::new(0, 2));
        assert!(doc.delete_forward());
        assert_eq!(doc.plain_text(), "abcd");
        doc.move_cursor(Motion::DocumentEnd, false);
        assert!(!doc.delete_forward());
    }

    #[test]
    fn test_delete_selection_across_blocks() {
        let mut doc = Document::from_plain_text("Hello\nbig\nworld");
        doc.set_selection(Selection::new(Position::new(2, 2), Position::new(0, 2)));
        assert!(doc.delete_backward());
        assert_eq!(doc.plain_text(), "Herld");
        assert_eq!(doc.selection(), Selection::collapsed(Position::new(0, 2)));
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut doc = Document::from_plain_text("Hello");
        doc.select_all();
        doc.insert_char('X');
        assert_eq!(doc.plain_text(), "X");
    }

    #[test]
    fn test_select_all_covers_whole_document() {
        let mut doc = Document::from_plain_text("ab\ncde");
        doc.select_all();
        assert_eq!(doc.selection().start(), Position::new(0, 0));
        assert_eq!(doc.selection().end(), Position::new(1, 3));
        assert_eq!(doc.selected_text(), "ab\ncde");
    }

    #[test]
    fn test_motion_wraps_between_blocks() {
        let mut doc = Document::from_plain_text("ab\ncd");
        doc.set_cursor(Position::new(0, 2));
        doc.move_cursor(Motion::Right, false);
        assert_eq!(doc.selection().focus, Position::new(1, 0));
        doc.move_cursor(Motion::Left, false);
        assert_eq!(doc.selection().focus, Position::new(0, 2));
    }

    #[test]
    fn test_vertical_motion_clamps_offset() {
        let mut doc = Document::from_plain_text("long line\nab");
        doc.set_cursor(Position::new(0, 7));
        doc.move_cursor(Motion::Down, false);
        assert_eq!(doc.selection().focus, Position::new(1, 2));
        doc.move_cursor(Motion::Down, false);
        assert_eq!(doc.selection().focus, Position::new(1, 2));
        doc.move_cursor(Motion::Up, false);
        assert_eq!(doc.selection().focus, Position::new(0, 2));
    }

    #[test]
    fn test_left_collapses_selection_to_start() {
        let mut doc = Document::from_plain_text("Hello");
        doc.select_all();
        doc.move_cursor(Motion::Left, false);
        assert_eq!(doc.selection(), Selection::collapsed(Position::new(0, 0)));
    }

    #[test]
    fn test_extend_keeps_anchor() {
        let mut doc = Document::from_plain_text("Hello");
        doc.move_cursor(Motion::Right, true);
        doc.move_cursor(Motion::Right, true);
        assert_eq!(doc.selection().anchor, Position::new(0, 0));
        assert_eq!(doc.selected_text(), "He");
    }

    #[test]
    fn test_set_selection_clamps_out_of_range() {
        let mut doc = Document::from_plain_text("ab");
        doc.set_cursor(Position::new(9, 9));
        assert_eq!(doc.selection().focus, Position::new(0, 2));
    }

    #[test]
    fn test_push_block_preserves_existing_formatting() {
        let bold = StyleSet::empty().with(InlineStyle::Bold);
        let mut doc = Document::from_blocks(vec![Block::from_runs(vec![Run::new("Hi", bold)])]);
        doc.push_block(Block::from_text("tail"));
        assert_eq!(doc.plain_text(), "Hi\ntail");
        assert_eq!(doc.blocks()[0].style_at(0), bold);
    }
}
