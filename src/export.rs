//! Plain-text export.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::document::Document;

/// Filename used when the filename field is empty.
pub const DEFAULT_FILENAME: &str = "document.txt";

/// The filename an export will actually write.
pub fn effective_filename(filename: &str) -> &str {
    if filename.is_empty() {
        DEFAULT_FILENAME
    } else {
        filename
    }
}

/// Write the document's plain text to `dir/<filename>`.
///
/// Styling is discarded and blocks are joined with `\n`. The name is used
/// as given (no extension is enforced) and an existing file is replaced.
///
/// # Errors
/// Returns an error if the directory cannot be created or the file
/// cannot be written.
pub fn export_plain_text(doc: &Document, filename: &str, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(effective_filename(filename));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create export dir {}", parent.display()))?;
    }
    fs::write(&path, doc.plain_text())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{InlineStyle, toggle_inline_style};
    use tempfile::tempdir;

    #[test]
    fn test_empty_filename_falls_back_to_default() {
        assert_eq!(effective_filename(""), "document.txt");
        assert_eq!(effective_filename("notes.md"), "notes.md");
        assert_eq!(effective_filename("no-extension"), "no-extension");
    }

    #[test]
    fn test_export_writes_plain_text_bytes() {
        let dir = tempdir().unwrap();
        let doc = Document::from_plain_text("Hello\n\nworld");
        let path = export_plain_text(&doc, "", dir.path()).unwrap();
        assert_eq!(path, dir.path().join("document.txt"));
        assert_eq!(fs::read(&path).unwrap(), doc.plain_text().into_bytes());
    }

    #[test]
    fn test_export_discards_styling() {
        let dir = tempdir().unwrap();
        let mut doc = Document::from_plain_text("Hello");
        doc.select_all();
        let doc = toggle_inline_style(&doc, InlineStyle::Bold);
        let path = export_plain_text(&doc, "bold.txt", dir.path()).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "Hello");
    }

    #[test]
    fn test_export_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        export_plain_text(&Document::from_plain_text("first"), "a.txt", dir.path()).unwrap();
        let path =
            export_plain_text(&Document::from_plain_text("second"), "a.txt", dir.path()).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "second");
    }

    #[test]
    fn test_export_failure_is_reported() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let err = export_plain_text(&Document::empty(), "out.txt", &blocker).unwrap_err();
        assert!(err.to_string().contains("Failed to"));
    }
}
