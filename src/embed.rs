//! Image embedding via data URLs.
//!
//! Files are read on a background thread; completions are collected by the
//! event loop with [`ImageReader::try_recv`].

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// MIME type of `bytes`, from their magic number.
///
/// Unknown content is accepted and labelled `application/octet-stream`.
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes).map_or(FALLBACK_MIME, |format| format.to_mime_type())
}

/// Encode `bytes` as `data:<mime>;base64,<payload>`.
pub fn encode_data_url(bytes: &[u8]) -> String {
    format!("data:{};base64,{}", sniff_mime(bytes), STANDARD.encode(bytes))
}

/// Read a file and encode it as a data URL.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn read_data_url(path: &Path) -> Result<String, EmbedError> {
    let bytes = std::fs::read(path).map_err(|source| EmbedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(encode_data_url(&bytes))
}

/// The text reference inserted into a document for an embedded image.
pub fn image_marker(data_url: &str) -> String {
    format!("![image]({data_url})")
}

/// Completion of a background image read.
#[derive(Debug)]
pub struct ImageRead {
    pub path: PathBuf,
    pub result: Result<String, EmbedError>,
}

/// Reads image files off the event loop thread.
///
/// Dropping the reader drops any completion that has not been received.
pub struct ImageReader {
    tx: Sender<ImageRead>,
    rx: Receiver<ImageRead>,
    pending: usize,
}

impl ImageReader {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx, pending: 0 }
    }

    /// Start reading `path` in the background.
    pub fn spawn(&mut self, path: PathBuf) {
        let tx = self.tx.clone();
        self.pending += 1;
        std::thread::spawn(move || {
            let result = read_data_url(&path);
            // The receiver is gone once the app has shut down.
            let _ = tx.send(ImageRead { path, result });
        });
    }

    /// Next finished read, if any. Never blocks.
    pub fn try_recv(&mut self) -> Option<ImageRead> {
        let read = self.rx.try_recv().ok()?;
        self.pending = self.pending.saturating_sub(1);
        Some(read)
    }

    /// Number of reads started but not yet received.
    pub const fn pending(&self) -> usize {
        self.pending
    }
}

impl Default for ImageReader {
    fn default() -> Self {
        Self::new()
    }
}
