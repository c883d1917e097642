//! Rich-text document model.
//!
//! A [`Document`] is an ordered list of [`Block`]s, each an ordered list
//! of styled [`Run`]s, plus a [`Selection`] of (block, char offset)
//! positions. Editing methods live on [`Document`]; style toggles are
//! pure functions in [`style`]; [`raw`] holds the JSON persistence form.

mod content;
pub mod raw;
pub mod style;
mod types;

pub use content::{Document, Motion};
pub use raw::{RawDocument, RawDocumentError};
pub use style::{
    StyleCommand, apply_style_command, current_alignment, current_inline_style,
    toggle_alignment, toggle_inline_style,
};
pub use types::{Alignment, Block, InlineStyle, Position, Run, Selection, StyleSet};
