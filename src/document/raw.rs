//! Structured (JSON) form of a document used for persistence records.
//!
//! ```json
//! {"blocks":[{"key":"b0","text":"Hello","type":"unstyled",
//!   "inlineStyleRanges":[{"offset":0,"length":5,"style":"BOLD"}]}]}
//! ```
//!
//! Offsets and lengths count chars. Each style is written as maximal
//! contiguous ranges.

use serde::{Deserialize, Serialize};

use super::content::Document;
use super::types::{Alignment, Block, InlineStyle, Run, StyleSet};

/// Block type written for blocks without an alignment.
pub const UNSTYLED_BLOCK_TYPE: &str = "unstyled";

/// Errors raised while decoding a persistence record.
#[derive(Debug, thiserror::Error)]
pub enum RawDocumentError {
    #[error("invalid persistence record: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    pub blocks: Vec<RawBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    pub key: String,
    pub text: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub inline_style_ranges: Vec<RawStyleRange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: String,
}

impl RawDocument {
    pub fn from_document(doc: &Document) -> Self {
        let blocks = doc
            .blocks()
            .iter()
            .enumerate()
            .map(|(idx, block)| RawBlock {
                key: format!("b{idx}"),
                text: block.text(),
                block_type: block
                    .alignment
                    .map_or(UNSTYLED_BLOCK_TYPE, Alignment::name)
                    .to_string(),
                inline_style_ranges: style_ranges(block),
            })
            .collect();
        Self { blocks }
    }

    /// Rebuild a document. Unknown styles and block types are ignored,
    /// and ranges past the end of a block are truncated.
    pub fn to_document(&self) -> Document {
        Document::from_blocks(self.blocks.iter().flat_map(RawBlock::to_blocks).collect())
    }

    /// Serialize to a compact JSON string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, RawDocumentError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a JSON persistence record.
    ///
    /// # Errors
    /// Returns an error if `json` is not a valid record.
    pub fn from_json(json: &str) -> Result<Self, RawDocumentError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl RawBlock {
    /// A record block whose text holds line breaks becomes one block per
    /// line. Every piece keeps the record's alignment.
    fn to_blocks(&self) -> Vec<Block> {
        let chars: Vec<char> = self.text.chars().collect();
        let mut styles = vec![StyleSet::empty(); chars.len()];
        for range in &self.inline_style_ranges {
            let Some(style) = InlineStyle::parse(&range.style) else {
                continue;
            };
            let end = range.offset.saturating_add(range.length).min(chars.len());
            for slot in styles.iter_mut().take(end).skip(range.offset) {
                *slot = slot.with(style);
            }
        }

        let alignment = Alignment::parse(&self.block_type);
        let mut blocks = Vec::new();
        let mut runs: Vec<Run> = Vec::new();
        for (ch, style) in chars.into_iter().zip(styles) {
            if ch == '\n' {
                blocks.push(Block::from_runs(std::mem::take(&mut runs)).with_alignment(alignment));
                continue;
            }
            match runs.last_mut() {
                Some(run) if run.styles == style => run.text.push(ch),
                _ => runs.push(Run::new(ch.to_string(), style)),
            }
        }
        blocks.push(Block::from_runs(runs).with_alignment(alignment));
        blocks
    }
}

fn style_ranges(block: &Block) -> Vec<RawStyleRange> {
    let mut ranges = Vec::new();
    for style in InlineStyle::ALL {
        let mut offset = 0;
        let mut open: Option<usize> = None;
        for run in block.runs() {
            let len = run.char_len();
            match (run.styles.contains(style), open) {
                (true, None) => open = Some(offset),
                (false, Some(start)) => {
                    ranges.push(range(start, offset, style));
                    open = None;
                }
                _ => {}
            }
            offset += len;
        }
        if let Some(start) = open {
            ranges.push(range(start, offset, style));
        }
    }
    ranges
}

fn range(start: usize, end: usize, style: InlineStyle) -> RawStyleRange {
    RawStyleRange {
        offset: start,
        length: end - start,
        style: style.name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Position, Selection, toggle_alignment, toggle_inline_style};

    fn styled_document() -> Document {
        let mut doc = Document::from_plain_text("Hello world\nsecond");
        doc.set_selection(Selection::new(Position::new(0, 0), Position::new(0, 5)));
        let doc = toggle_inline_style(&doc, InlineStyle::Bold);
        let mut doc = toggle_inline_style(&doc, InlineStyle::Italic);
        doc.set_selection(Selection::new(Position::new(0, 3), Position::new(0, 8)));
        let mut doc = toggle_inline_style(&doc, InlineStyle::Underline);
        doc.set_cursor(Position::new(1, 0));
        toggle_alignment(&doc, crate::document::Alignment::Center)
    }

    #[test]
    fn test_serializes_nested_structure() {
        let raw = RawDocument::from_document(&styled_document());
        let value: serde_json::Value = serde_json::from_str(&raw.to_json().unwrap()).unwrap();
        let first = &value["blocks"][0];
        assert_eq!(first["key"], "b0");
        assert_eq!(first["text"], "Hello world");
        assert_eq!(first["type"], "unstyled");
        assert_eq!(value["blocks"][1]["type"], "center-align");

        let ranges = first["inlineStyleRanges"].as_array().unwrap();
        assert!(ranges.contains(&serde_json::json!({"offset": 0, "length": 5, "style": "BOLD"})));
        assert!(ranges.contains(&serde_json::json!({"offset": 0, "length": 5, "style": "ITALIC"})));
        assert!(
            ranges.contains(&serde_json::json!({"offset": 3, "length": 5, "style": "UNDERLINE"}))
        );
        assert_eq!(ranges.len(), 3);
    }

    #[test]
    fn test_record_restores_blocks() {
        let doc = styled_document();
        let json = RawDocument::from_document(&doc).to_json().unwrap();
        let restored = RawDocument::from_json(&json).unwrap().to_document();
        assert_eq!(restored.blocks(), doc.blocks());
        assert_eq!(restored.selection(), Selection::default());
    }

    #[test]
    fn test_unknown_styles_and_types_are_ignored() {
        let json = r#"{"blocks":[{"key":"x","text":"abc","type":"header-one",
            "inlineStyleRanges":[{"offset":1,"length":10,"style":"BOLD"},
                                 {"offset":0,"length":1,"style":"CODE"}]}]}"#;
        let doc = RawDocument::from_json(json).unwrap().to_document();
        let block = &doc.blocks()[0];
        assert_eq!(block.alignment, None);
        assert_eq!(block.style_at(0), StyleSet::empty());
        assert!(block.style_at(2).contains(InlineStyle::Bold));
        assert_eq!(block.runs().len(), 2);
    }

    #[test]
    fn test_line_breaks_in_record_text_split_blocks() {
        let json = r#"{"blocks":[{"key":"b0","text":"ab\ncd","type":"right-align",
            "inlineStyleRanges":[{"offset":3,"length":2,"style":"BOLD"}]}]}"#;
        let doc = RawDocument::from_json(json).unwrap().to_document();
        assert_eq!(doc.blocks().len(), 2);
        assert_eq!(doc.blocks()[0].text(), "ab");
        assert_eq!(doc.blocks()[1].text(), "cd");
        assert_eq!(doc.blocks()[0].style_at(1), StyleSet::empty());
        assert!(doc.blocks()[1].style_at(0).contains(InlineStyle::Bold));
        assert!(doc.blocks()[1].style_at(1).contains(InlineStyle::Bold));
        for block in doc.blocks() {
            assert_eq!(block.alignment, Some(Alignment::Right));
            assert!(!block.text().contains('\n'));
        }
        assert_eq!(doc.plain_text(), "ab\ncd");
    }

    #[test]
    fn test_missing_ranges_default_to_empty() {
        let json = r#"{"blocks":[{"key":"x","text":"plain","type":"unstyled"}]}"#;
        let doc = RawDocument::from_json(json).unwrap().to_document();
        assert_eq!(doc.plain_text(), "plain");
    }

    #[test]
    fn test_empty_block_list_yields_one_empty_block() {
        let doc = RawDocument::from_json(r#"{"blocks":[]}"#).unwrap().to_document();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_malformed_record_is_an_error() {
        assert!(RawDocument::from_json("{not json").is_err());
        assert!(RawDocument::from_json(r#"{"items":[]}"#).is_err());
    }
}
