//! Periodic auto-save.
//!
//! [`AutoSaveTimer`] is a two-state scheduler (disabled / enabled) driven
//! by the event loop clock in milliseconds. While enabled it fires once
//! per period; the loop turns each firing into a snapshot write.

use std::time::Duration;

use thiserror::Error;

use crate::document::{Document, RawDocument, RawDocumentError};
use crate::storage::{AUTOSAVE_KEY, Storage, StorageError};

/// Interval between auto-save snapshots.
pub const DEFAULT_AUTOSAVE_PERIOD: Duration = Duration::from_secs(5);

/// Shortest accepted auto-save period in milliseconds.
pub const MIN_AUTOSAVE_PERIOD_MS: u64 = 100;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Record(#[from] RawDocumentError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoSaveTimer {
    period_ms: u64,
    next_due_ms: Option<u64>,
}

impl AutoSaveTimer {
    /// A disabled timer with the given period (at least 1 ms).
    pub fn new(period: Duration) -> Self {
        let period_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX)
            .max(MIN_AUTOSAVE_PERIOD_MS);
        Self {
            period_ms,
            next_due_ms: None,
        }
    }

    pub const fn period_ms(&self) -> u64 {
        self.period_ms
    }

    pub const fn is_enabled(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// Start ticking; the first tick is one period after `now_ms`.
    ///
    /// Enabling an already enabled timer keeps its schedule.
    pub const fn enable(&mut self, now_ms: u64) {
        if self.next_due_ms.is_none() {
            self.next_due_ms = Some(now_ms.saturating_add(self.period_ms));
        }
    }

    /// Cancel the pending tick. Nothing is flushed.
    pub const fn disable(&mut self) {
        self.next_due_ms = None;
    }

    pub const fn set_enabled(&mut self, enabled: bool, now_ms: u64) {
        if enabled {
            self.enable(now_ms);
        } else {
            self.disable();
        }
    }

    /// Returns `true` once per elapsed period and schedules the next tick.
    ///
    /// A loop that stalled past several periods gets a single tick, and the
    /// next one is a full period from now.
    pub fn take_due(&mut self, now_ms: u64) -> bool {
        let Some(due) = self.next_due_ms else {
            return false;
        };
        if now_ms < due {
            return false;
        }
        let next = due.saturating_add(self.period_ms);
        self.next_due_ms = Some(if next > now_ms {
            next
        } else {
            now_ms.saturating_add(self.period_ms)
        });
        true
    }

    /// Time until the next tick, or `None` while disabled.
    pub fn time_until_due(&self, now_ms: u64) -> Option<Duration> {
        self.next_due_ms
            .map(|due| Duration::from_millis(due.saturating_sub(now_ms)))
    }
}

impl Default for AutoSaveTimer {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOSAVE_PERIOD)
    }
}

/// Serialize `doc` and overwrite the auto-save record.
///
/// # Errors
/// Returns an error if serialization or the storage write fails.
pub fn save_snapshot(doc: &Document, storage: &mut dyn Storage) -> Result<usize, SnapshotError> {
    let json = RawDocument::from_document(doc).to_json()?;
    storage.set_item(AUTOSAVE_KEY, &json)?;
    Ok(json.len())
}

/// Load the auto-save record, if one exists.
///
/// # Errors
/// Returns an error if storage cannot be read or the record is malformed.
pub fn load_snapshot(storage: &dyn Storage) -> Result<Option<Document>, SnapshotError> {
    let Some(json) = storage.get_item(AUTOSAVE_KEY)? else {
        return Ok(None);
    };
    Ok(Some(RawDocument::from_json(&json)?.to_document()))
}
