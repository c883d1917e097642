use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::DefaultTerminal;
use tracing::{debug, info, warn};

use crate::app::effects::Runtime;
use crate::app::{App, Model, ToastLevel};
use crate::autosave::{AutoSaveTimer, load_snapshot};
use crate::document::Document;
use crate::storage::{DirStorage, Storage};

/// Longest wait for input before re-checking timers and background work.
const IDLE_POLL: Duration = Duration::from_millis(250);
/// Poll interval while an image read is in flight.
const BACKGROUND_POLL: Duration = Duration::from_millis(50);

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let storage = DirStorage::new(&self.storage_dir);
        info!(root = %storage.root().display(), "auto-save store");

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal: inkpad requires an interactive terminal")?;
        let size = terminal.size()?;
        let mut model = self.initial_model(&storage, (size.width, size.height));
        model.keyboard_enhanced = enable_terminal_features();

        let mut runtime = Runtime::new(Box::new(storage), AutoSaveTimer::new(self.autosave_period));
        if model.autosave_enabled {
            runtime.autosave.enable(runtime.now_ms());
        }

        let result = Self::event_loop(&mut terminal, &mut model, &mut runtime);

        if model.keyboard_enhanced {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = execute!(stdout(), DisableBracketedPaste, DisableMouseCapture);
        ratatui::restore();

        if runtime.images.pending() > 0 {
            debug!(pending = runtime.images.pending(), "dropping unfinished image reads");
        }
        info!("exiting");
        result
    }

    /// Build the starting model, restoring the auto-saved document when asked.
    pub(super) fn initial_model(&self, storage: &dyn Storage, size: (u16, u16)) -> Model {
        let mut model = Model::new(Document::empty(), size);
        model.filename.clone_from(&self.filename);
        model.autosave_enabled = self.autosave_enabled;
        model.export_dir.clone_from(&self.export_dir);
        model.storage_dir = Some(self.storage_dir.clone());
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);

        if self.restore {
            match load_snapshot(storage) {
                Ok(Some(document)) => {
                    info!(blocks = document.block_count(), "restored auto-saved document");
                    model.document = document;
                    model.show_toast(ToastLevel::Info, "Restored auto-saved document");
                }
                Ok(None) => {
                    model.show_toast(ToastLevel::Info, "No auto-saved document to restore");
                }
                Err(err) => {
                    warn!(error = %err, "restore failed");
                    model.show_toast(ToastLevel::Warning, format!("Restore failed: {err}"));
                }
            }
        }
        model
    }

    fn poll_timeout(model: &Model, runtime: &Runtime, now_ms: u64) -> Duration {
        let mut timeout = IDLE_POLL;
        if let Some(due) = runtime.autosave.time_until_due(now_ms) {
            timeout = timeout.min(due);
        }
        if model.pending_image_reads > 0 || runtime.images.pending() > 0 {
            timeout = timeout.min(BACKGROUND_POLL);
        }
        timeout
    }

    fn event_loop(
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        runtime: &mut Runtime,
    ) -> Result<()> {
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }
            let now_ms = runtime.now_ms();
            if Self::poll_background(model, runtime, now_ms) {
                needs_render = true;
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }

            let timeout = Self::poll_timeout(model, runtime, now_ms);
            if event::poll(timeout)? {
                if let Some(msg) = Self::handle_event(&event::read()?, model) {
                    let event_ms = runtime.now_ms();
                    Self::dispatch(model, runtime, msg, event_ms);
                    needs_render = true;
                }

                // Coalesce key repeat bursts and pastes into a single render.
                while event::poll(Duration::ZERO)? {
                    if let Some(msg) = Self::handle_event(&event::read()?, model) {
                        let event_ms = runtime.now_ms();
                        Self::dispatch(model, runtime, msg, event_ms);
                        needs_render = true;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Turn on mouse capture, bracketed paste and, where the terminal
/// supports it, unambiguous key reporting (so Ctrl+I is not Tab).
///
/// Returns whether keyboard enhancement was pushed.
fn enable_terminal_features() -> bool {
    if let Err(err) = execute!(stdout(), EnableMouseCapture, EnableBracketedPaste) {
        warn!(error = %err, "failed to enable mouse capture or bracketed paste");
    }
    let supported = crossterm::terminal::supports_keyboard_enhancement().unwrap_or(false);
    if !supported {
        return false;
    }
    execute!(
        stdout(),
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
    )
    .is_ok()
}
