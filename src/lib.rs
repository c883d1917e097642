// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. storage::StorageError)
    clippy::module_name_repetitions
)]

//! # Inkpad
//!
//! A terminal rich-text editor.
//!
//! Inkpad edits styled paragraphs in the terminal with:
//! - Bold, italic, underline and strikethrough
//! - Left, center, right and justified paragraphs
//! - Plain-text export (`document.txt` by default)
//! - Periodic auto-save to a key-value store
//! - Images embedded as base64 data URLs
//!
//! ## Architecture
//!
//! Inkpad uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`document`]: Rich-text model and style toggles
//! - [`ui`]: Terminal UI components
//! - [`storage`]: Key-value persistence
//! - [`autosave`]: Auto-save timer and snapshots
//! - [`export`]: Plain-text export
//! - [`embed`]: Image data URLs

pub mod app;
pub mod autosave;
pub mod config;
pub mod document;
pub mod embed;
pub mod export;
pub mod storage;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::document::{Alignment, Document, InlineStyle, StyleCommand, StyleSet};
    pub use crate::storage::{DirStorage, MemoryStorage, Storage};
}
