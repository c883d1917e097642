use std::time::Instant;

use tracing::{debug, info, warn};

use crate::app::{App, Message, Model, ToastLevel, update};
use crate::autosave::{AutoSaveTimer, save_snapshot};
use crate::embed::ImageReader;
use crate::export::export_plain_text;
use crate::storage::Storage;

/// Resources owned by the event loop alongside the [`Model`].
///
/// The model stays plain data; everything that touches the outside world
/// lives here.
pub(super) struct Runtime {
    pub(super) storage: Box<dyn Storage>,
    pub(super) autosave: AutoSaveTimer,
    pub(super) images: ImageReader,
    started: Instant,
}

impl Runtime {
    pub(super) fn new(storage: Box<dyn Storage>, autosave: AutoSaveTimer) -> Self {
        Self {
            storage,
            autosave,
            images: ImageReader::new(),
            started: Instant::now(),
        }
    }

    /// Milliseconds since the runtime was created.
    pub(super) fn now_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl App {
    /// Run `msg` through [`update`], then perform its side effects.
    pub(super) fn dispatch(model: &mut Model, runtime: &mut Runtime, msg: Message, now_ms: u64) {
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model, runtime, &side_msg, now_ms);
    }

    /// Feed due auto-save ticks and finished image reads into the model.
    ///
    /// Returns `true` if any message was dispatched.
    pub(super) fn poll_background(model: &mut Model, runtime: &mut Runtime, now_ms: u64) -> bool {
        let mut dispatched = false;
        if runtime.autosave.take_due(now_ms) {
            Self::dispatch(model, runtime, Message::AutoSaveTick, now_ms);
            dispatched = true;
        }
        while let Some(read) = runtime.images.try_recv() {
            let msg = match read.result {
                Ok(data_url) => Message::ImageLoaded {
                    path: read.path,
                    data_url,
                },
                Err(err) => Message::ImageFailed {
                    path: read.path,
                    error: err.to_string(),
                },
            };
            Self::dispatch(model, runtime, msg, now_ms);
            dispatched = true;
        }
        dispatched
    }

    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        runtime: &mut Runtime,
        msg: &Message,
        now_ms: u64,
    ) {
        match msg {
            Message::ToggleAutoSave => {
                runtime.autosave.set_enabled(model.autosave_enabled, now_ms);
                debug!(enabled = model.autosave_enabled, "auto-save toggled");
            }
            Message::AutoSaveTick => {
                if !model.autosave_enabled {
                    return;
                }
                match save_snapshot(&model.document, runtime.storage.as_mut()) {
                    Ok(bytes) => debug!(bytes, "auto-saved document"),
                    Err(err) => warn!(error = %err, "auto-save failed"),
                }
            }
            Message::ExportFile => {
                match export_plain_text(&model.document, &model.filename, &model.export_dir) {
                    Ok(path) => {
                        info!(path = %path.display(), "exported document");
                        model.show_toast(ToastLevel::Info, format!("Saved {}", path.display()));
                    }
                    Err(err) => {
                        warn!(error = ?err, "export failed");
                        model.show_toast(ToastLevel::Error, format!("Save failed: {err:#}"));
                    }
                }
            }
            Message::InsertImage(path) => {
                debug!(path = %path.display(), "reading image");
                runtime.images.spawn(path.clone());
            }
            Message::ImageFailed { path, error } => {
                warn!(path = %path.display(), error, "image read failed");
            }
            Message::ImageLoaded { path, data_url } => {
                info!(path = %path.display(), len = data_url.len(), "embedded image");
            }
            _ => {}
        }
    }
}
