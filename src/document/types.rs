//! Core types for the rich-text document model.

use std::fmt;

/// A character-range formatting attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

impl InlineStyle {
    /// Every inline style, in toolbar order.
    pub const ALL: [Self; 4] = [Self::Bold, Self::Italic, Self::Underline, Self::Strikethrough];

    /// The identifier used in persistence records (`BOLD`, `ITALIC`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bold => "BOLD",
            Self::Italic => "ITALIC",
            Self::Underline => "UNDERLINE",
            Self::Strikethrough => "STRIKETHROUGH",
        }
    }

    /// Parse a style identifier. Unknown identifiers yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|style| style.name() == name)
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Bold => 0b0001,
            Self::Italic => 0b0010,
            Self::Underline => 0b0100,
            Self::Strikethrough => 0b1000,
        }
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of inline styles applied to a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StyleSet(u8);

impl StyleSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, style: InlineStyle) -> bool {
        self.0 & style.bit() != 0
    }

    /// This set with `style` added.
    #[must_use]
    pub const fn with(self, style: InlineStyle) -> Self {
        Self(self.0 | style.bit())
    }

    /// This set with `style` removed.
    #[must_use]
    pub const fn without(self, style: InlineStyle) -> Self {
        Self(self.0 & !style.bit())
    }

    /// This set with `style` flipped.
    #[must_use]
    pub const fn toggled(self, style: InlineStyle) -> Self {
        Self(self.0 ^ style.bit())
    }

    /// Styles in the set, in toolbar order.
    pub fn iter(self) -> impl Iterator<Item = InlineStyle> {
        InlineStyle::ALL
            .into_iter()
            .filter(move |style| self.contains(*style))
    }
}

impl FromIterator<InlineStyle> for StyleSet {
    fn from_iter<I: IntoIterator<Item = InlineStyle>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

/// Paragraph-level alignment of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    pub const ALL: [Self; 4] = [Self::Left, Self::Center, Self::Right, Self::Justify];

    /// The block type identifier (`left-align`, `center-align`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Left => "left-align",
            Self::Center => "center-align",
            Self::Right => "right-align",
            Self::Justify => "justify",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|align| align.name() == name)
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A contiguous piece of text sharing one style set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub styles: StyleSet,
}

impl Run {
    pub fn new(text: impl Into<String>, styles: StyleSet) -> Self {
        Self {
            text: text.into(),
            styles,
        }
    }

    /// An unstyled run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, StyleSet::empty())
    }

    /// Length in chars.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A paragraph: styled runs plus an optional alignment.
///
/// Runs are kept normalized: no empty runs, and no two adjacent runs
/// share the same style set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    runs: Vec<Run>,
    pub alignment: Option<Alignment>,
}

impl Block {
    /// An empty, unaligned block.
    pub const fn new() -> Self {
        Self {
            runs: Vec::new(),
            alignment: None,
        }
    }

    /// An unstyled block holding `text` (which must not contain newlines).
    pub fn from_text(text: &str) -> Self {
        Self::from_runs(vec![Run::plain(text)])
    }

    pub fn from_runs(runs: Vec<Run>) -> Self {
        let mut block = Self {
            runs,
            alignment: None,
        };
        block.normalize();
        block
    }

    #[must_use]
    pub const fn with_alignment(mut self, alignment: Option<Alignment>) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.runs.iter().map(Run::char_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Styles of the char at `offset`, or the empty set past the end.
    pub fn style_at(&self, offset: usize) -> StyleSet {
        let mut seen = 0;
        for run in &self.runs {
            let len = run.char_len();
            if offset < seen + len {
                return run.styles;
            }
            seen += len;
        }
        StyleSet::empty()
    }

    pub(crate) fn insert_text(&mut self, offset: usize, text: &str, styles: StyleSet) {
        let (mut before, after) = split_runs(std::mem::take(&mut self.runs), offset);
        before.push(Run::new(text, styles));
        before.extend(after);
        self.runs = before;
        self.normalize();
    }

    pub(crate) fn remove_range(&mut self, start: usize, end: usize) {
        if end <= start {
            return;
        }
        let (mut before, rest) = split_runs(std::mem::take(&mut self.runs), start);
        let (_, after) = split_runs(rest, end - start);
        before.extend(after);
        self.runs = before;
        self.normalize();
    }

    /// Rewrite the style set of every char in `start..end`.
    pub(crate) fn map_styles(
        &mut self,
        start: usize,
        end: usize,
        f: impl Fn(StyleSet) -> StyleSet,
    ) {
        if end <= start {
            return;
        }
        let (mut before, rest) = split_runs(std::mem::take(&mut self.runs), start);
        let (middle, after) = split_runs(rest, end - start);
        before.extend(middle.into_iter().map(|run| Run {
            styles: f(run.styles),
            ..run
        }));
        before.extend(after);
        self.runs = before;
        self.normalize();
    }

    /// Split at `offset`, keeping the head and returning the tail.
    ///
    /// The tail keeps this block's alignment.
    pub(crate) fn split_off(&mut self, offset: usize) -> Self {
        let (before, after) = split_runs(std::mem::take(&mut self.runs), offset);
        self.runs = before;
        self.normalize();
        Self::from_runs(after).with_alignment(self.alignment)
    }

    /// Append another block's runs, keeping this block's alignment.
    pub(crate) fn append(&mut self, other: Self) {
        self.runs.extend(other.runs);
        self.normalize();
    }

    fn normalize(&mut self) {
        let mut merged: Vec<Run> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if run.text.is_empty() {
                continue;
            }
            match merged.last_mut() {
                Some(last) if last.styles == run.styles => last.text.push_str(&run.text),
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }
}

/// Byte index of the `char_offset`-th char, or the string length past the end.
pub(crate) fn byte_index(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map_or(text.len(), |(idx, _)| idx)
}

fn split_runs(runs: Vec<Run>, offset: usize) -> (Vec<Run>, Vec<Run>) {
    let mut before = Vec::new();
    let mut after = Vec::new();
    let mut seen = 0;
    for run in runs {
        let len = run.char_len();
        if seen + len <= offset {
            before.push(run);
        } else if seen >= offset {
            after.push(run);
        } else {
            let at = byte_index(&run.text, offset - seen);
            let (head, tail) = run.text.split_at(at);
            before.push(Run::new(head, run.styles));
            after.push(Run::new(tail, run.styles));
        }
        seen += len;
    }
    (before, after)
}

/// A position in the document: block index plus char offset in that block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub block: usize,
    pub offset: usize,
}

impl Position {
    pub const fn new(block: usize, offset: usize) -> Self {
        Self { block, offset }
    }
}

/// A selection between an anchor and a focus (the moving end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub anchor: Position,
    pub focus: Position,
}

impl Selection {
    pub const fn new(anchor: Position, focus: Position) -> Self {
        Self { anchor, focus }
    }

    /// A caret at `pos`.
    pub const fn collapsed(pos: Position) -> Self {
        Self {
            anchor: pos,
            focus: pos,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// The earlier of anchor and focus.
    pub fn start(&self) -> Position {
        self.anchor.min(self.focus)
    }

    /// The later of anchor and focus.
    pub fn end(&self) -> Position {
        self.anchor.max(self.focus)
    }
}
