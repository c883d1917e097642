//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! Every message, whether it came from the keyboard, the auto-save timer
//! or a finished image read, goes through the same queue and is applied
//! to the model in arrival order.

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Focus, Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;
use std::time::Duration;

use crate::autosave::DEFAULT_AUTOSAVE_PERIOD;
use crate::export::DEFAULT_FILENAME;
use crate::storage::default_storage_dir;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    filename: String,
    export_dir: PathBuf,
    storage_dir: PathBuf,
    autosave_enabled: bool,
    autosave_period: Duration,
    restore: bool,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create an application with an empty document and default settings.
    pub fn new() -> Self {
        Self {
            filename: DEFAULT_FILENAME.to_string(),
            export_dir: PathBuf::from("."),
            storage_dir: default_storage_dir(),
            autosave_enabled: false,
            autosave_period: DEFAULT_AUTOSAVE_PERIOD,
            restore: false,
            config_global_path: None,
            config_local_path: None,
        }
    }

    /// Prefill the export filename field.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Set the directory exports are written into.
    pub fn with_export_dir(mut self, dir: PathBuf) -> Self {
        self.export_dir = dir;
        self
    }

    /// Set the directory backing the auto-save store.
    pub fn with_storage_dir(mut self, dir: PathBuf) -> Self {
        self.storage_dir = dir;
        self
    }

    /// Start with the auto-save checkbox ticked.
    pub const fn with_autosave(mut self, enabled: bool) -> Self {
        self.autosave_enabled = enabled;
        self
    }

    /// Override the auto-save period.
    pub const fn with_autosave_period(mut self, period: Duration) -> Self {
        self.autosave_period = period;
        self
    }

    /// Load the last auto-saved document on startup.
    pub const fn with_restore(mut self, restore: bool) -> Self {
        self.restore = restore;
        self
    }

    /// Set config paths to show in help.
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
