//! Fixed-interval autosave.
//!
//! The host drives [`Autosave::tick`] from a timer (or any event loop) with
//! the current time and editor content. A write happens at most once per
//! interval, and every write overwrites the previous draft.

#[cfg(test)]
#[path = "autosave_test.rs"]
mod autosave_test;

use crate::draft::{DraftError, DraftStore};

/// Milliseconds between automatic draft writes.
pub const AUTOSAVE_INTERVAL_MS: u64 = 5_000;

#[derive(Debug, Clone)]
pub struct Autosave {
    key: String,
    interval_ms: u64,
    last_write_ms: u64,
}

impl Autosave {
    /// Start an autosave for `key`. The first write is due one interval after `started_ms`.
    #[must_use]
    pub fn new(key: &str, started_ms: u64) -> Self {
        Self::with_interval(key, started_ms, AUTOSAVE_INTERVAL_MS)
    }

    /// An interval of zero writes on every tick.
    #[must_use]
    pub fn with_interval(key: &str, started_ms: u64, interval_ms: u64) -> Self {
        Self { key: key.to_owned(), interval_ms, last_write_ms: started_ms }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Whether a write is due at `now_ms`.
    #[must_use]
    pub fn is_due(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_write_ms) >= self.interval_ms
    }

    /// Write `content` if the interval has elapsed. Returns whether a write happened.
    ///
    /// A failed write leaves the schedule untouched so the next tick retries.
    ///
    /// # Errors
    ///
    /// Propagates the store's [`DraftError`].
    pub fn tick<S: DraftStore + ?Sized>(
        &mut self,
        now_ms: u64,
        content: &str,
        store: &mut S,
    ) -> Result<bool, DraftError> {
        if !self.is_due(now_ms) {
            return Ok(false);
        }
        self.save_now(now_ms, content, store)?;
        Ok(true)
    }

    /// Write `content` immediately and restart the interval from `now_ms`.
    ///
    /// # Errors
    ///
    /// Propagates the store's [`DraftError`].
    pub fn save_now<S: DraftStore + ?Sized>(
        &mut self,
        now_ms: u64,
        content: &str,
        store: &mut S,
    ) -> Result<(), DraftError> {
        store.save(&self.key, content)?;
        self.last_write_ms = now_ms;
        Ok(())
    }

    /// Drop the stored draft (after a successful upload, say).
    ///
    /// # Errors
    ///
    /// Propagates the store's [`DraftError`].
    pub fn clear<S: DraftStore + ?Sized>(&self, store: &mut S) -> Result<(), DraftError> {
        store.remove(&self.key)
    }
}
