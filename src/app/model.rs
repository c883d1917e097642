use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::document::Document;
use crate::export::DEFAULT_FILENAME;
use crate::ui::layout::{ScreenAreas, row_of, screen_areas, text_width, visual_rows};

const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// Where keyboard input goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Focus {
    /// The document body.
    #[default]
    Editor,
    /// The filename field in the toolbar.
    Filename,
    /// The image path prompt, holding the path typed so far.
    ImagePath(String),
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug)]
pub struct Model {
    /// The document being edited
    pub document: Document,
    /// Export filename as typed; starts as the default name and falls
    /// back to it when cleared
    pub filename: String,
    /// Auto-save checkbox state
    pub autosave_enabled: bool,
    pub focus: Focus,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Terminal size (width, height)
    pub size: (u16, u16),
    /// First visible document row
    pub scroll_offset: usize,
    /// Directory exports are written into
    pub export_dir: PathBuf,
    /// Directory of the auto-save store, shown in help
    pub storage_dir: Option<PathBuf>,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    /// Image reads started but not yet finished
    pub pending_image_reads: usize,
    /// The terminal reports Ctrl-i apart from Tab
    pub keyboard_enhanced: bool,
    toast: Option<Toast>,
}

impl Model {
    pub fn new(document: Document, terminal_size: (u16, u16)) -> Self {
        Self {
            document,
            size: terminal_size,
            ..Self::default()
        }
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Path typed into the image prompt, when it is open.
    pub fn image_prompt(&self) -> Option<&str> {
        match &self.focus {
            Focus::ImagePath(path) => Some(path),
            Focus::Editor | Focus::Filename => None,
        }
    }

    /// Screen regions for the current terminal size and footer state.
    pub fn areas(&self) -> ScreenAreas {
        screen_areas(
            Rect::new(0, 0, self.size.0, self.size.1),
            self.image_prompt().is_some(),
            self.toast.is_some(),
        )
    }

    /// Columns available to document text.
    pub fn text_width(&self) -> usize {
        text_width(self.areas().document)
    }

    pub fn document_height(&self) -> usize {
        usize::from(self.areas().document.height)
    }

    pub(super) fn max_scroll(&self) -> usize {
        visual_rows(&self.document, self.text_width())
            .len()
            .saturating_sub(self.document_height().max(1))
    }

    pub(super) fn scroll_by(&mut self, delta: isize) {
        let max = self.max_scroll();
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta).min(max);
    }

    /// Scroll just enough to keep the cursor row on screen.
    pub(super) fn ensure_cursor_visible(&mut self) {
        let height = self.document_height().max(1);
        let rows = visual_rows(&self.document, self.text_width());
        let row = row_of(&rows, self.document.selection().focus);
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + height {
            self.scroll_offset = row + 1 - height;
        }
        self.scroll_offset = self
            .scroll_offset
            .min(rows.len().saturating_sub(height));
    }
}

impl Default for Model {
    fn default() -> Self {
        Self {
            document: Document::empty(),
            filename: DEFAULT_FILENAME.to_string(),
            autosave_enabled: false,
            focus: Focus::Editor,
            help_visible: false,
            should_quit: false,
            size: (80, 24),
            scroll_offset: 0,
            export_dir: PathBuf::from("."),
            storage_dir: None,
            config_global_path: None,
            config_local_path: None,
            pending_image_reads: 0,
            keyboard_enhanced: false,
            toast: None,
        }
    }
}
