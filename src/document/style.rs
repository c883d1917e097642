//! Style toggles and active-style derivation.
//!
//! Every function here is pure: it reads a [`Document`] and, for the
//! toggles, returns a new one. Callers replace their document wholesale.

use super::content::Document;
use super::types::{Alignment, InlineStyle, StyleSet};

/// A parsed toolbar style identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleCommand {
    Inline(InlineStyle),
    Block(Alignment),
}

impl StyleCommand {
    /// Parse `BOLD`, `ITALIC`, `UNDERLINE`, `STRIKETHROUGH`, `left-align`,
    /// `center-align`, `right-align` or `justify`.
    pub fn parse(identifier: &str) -> Option<Self> {
        InlineStyle::parse(identifier)
            .map(Self::Inline)
            .or_else(|| Alignment::parse(identifier).map(Self::Block))
    }
}

/// Toggle the style named by `identifier`. Unknown identifiers are ignored.
pub fn apply_style_command(doc: &Document, identifier: &str) -> Document {
    match StyleCommand::parse(identifier) {
        Some(StyleCommand::Inline(style)) => toggle_inline_style(doc, style),
        Some(StyleCommand::Block(alignment)) => toggle_alignment(doc, alignment),
        None => doc.clone(),
    }
}

/// Inline styles in effect at the selection.
///
/// A non-empty selection reports the styles of its first char, or of the
/// first char after it when the selection starts at the end of a block.
pub fn current_inline_style(doc: &Document) -> StyleSet {
    let sel = doc.selection;
    if sel.is_collapsed() {
        if let Some(pending) = doc.pending_style {
            return pending;
        }
        let pos = sel.focus;
        let block = &doc.blocks[pos.block];
        if pos.offset > 0 {
            return block.style_at(pos.offset - 1);
        }
        if !block.is_empty() {
            return block.style_at(0);
        }
        return doc.blocks[..pos.block]
            .iter()
            .rev()
            .find(|b| !b.is_empty())
            .map_or_else(StyleSet::empty, |b| b.style_at(b.len() - 1));
    }

    let start = sel.start();
    let block = &doc.blocks[start.block];
    if start.offset < block.len() {
        return block.style_at(start.offset);
    }
    doc.blocks[start.block + 1..]
        .iter()
        .find(|b| !b.is_empty())
        .map_or_else(StyleSet::empty, |b| b.style_at(0))
}

/// Alignment of the block holding the focus.
pub fn current_alignment(doc: &Document) -> Option<Alignment> {
    doc.blocks[doc.selection.focus.block].alignment
}

/// Toggle an inline style on the selection.
///
/// With a selection, the style is removed from every selected char if
/// it is currently active, otherwise added to every selected char. At a
/// collapsed cursor the pending style for the next insertion is toggled.
pub fn toggle_inline_style(doc: &Document, style: InlineStyle) -> Document {
    let mut next = doc.clone();
    let sel = doc.selection;
    if sel.is_collapsed() {
        let base = doc
            .pending_style
            .unwrap_or_else(|| current_inline_style(doc));
        next.pending_style = Some(base.toggled(style));
        return next;
    }

    let remove = current_inline_style(doc).contains(style);
    let start = sel.start();
    let end = sel.end();
    for idx in start.block..=end.block {
        let block = &mut next.blocks[idx];
        let from = if idx == start.block { start.offset } else { 0 };
        let to = if idx == end.block {
            end.offset
        } else {
            block.len()
        };
        block.map_styles(from, to, |styles| {
            if remove {
                styles.without(style)
            } else {
                styles.with(style)
            }
        });
    }
    next.pending_style = None;
    next
}

/// Toggle a block alignment on every block touched by the selection.
///
/// If all of them already carry `alignment` it is cleared, otherwise it
/// replaces whatever alignment they had.
pub fn toggle_alignment(doc: &Document, alignment: Alignment) -> Document {
    let mut next = doc.clone();
    let range = doc.selection.start().block..=doc.selection.end().block;
    let all_set = next.blocks[range.clone()]
        .iter()
        .all(|block| block.alignment == Some(alignment));
    let value = if all_set { None } else { Some(alignment) };
    for block in &mut next.blocks[range] {
        block.alignment = value;
    }
    next
}
