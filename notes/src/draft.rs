//! Local draft storage.
//!
//! Drafts are the not-yet-synced content of the open note or sketch. They live
//! under fixed keys so a reload picks up where the user left off. In the
//! browser they go to `localStorage` (feature `hydrate`); elsewhere, and in
//! tests, [`MemoryDrafts`] stands in.

#[cfg(test)]
#[path = "draft_test.rs"]
mod draft_test;

use std::collections::HashMap;

/// Draft key for the note editor.
pub const NOTES_KEY: &str = "notes";

/// Draft key for the sketch canvas.
pub const SKETCH_KEY: &str = "sketch";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("draft storage unavailable")]
    Unavailable,
    #[error("failed to read draft {0}")]
    Read(String),
    #[error("failed to write draft {0}")]
    Write(String),
}

/// Key/value storage for drafts. Writes overwrite.
pub trait DraftStore {
    /// Fetch the draft stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::Read`] if the backing store rejects the read.
    fn load(&self, key: &str) -> Result<Option<String>, DraftError>;

    /// # Errors
    ///
    /// Returns [`DraftError::Write`] if the backing store rejects the write
    /// (for example, quota exceeded).
    fn save(&mut self, key: &str, content: &str) -> Result<(), DraftError>;

    /// # Errors
    ///
    /// Returns [`DraftError::Write`] if the backing store rejects the removal.
    fn remove(&mut self, key: &str) -> Result<(), DraftError>;
}

/// In-process draft store.
#[derive(Debug, Clone, Default)]
pub struct MemoryDrafts {
    entries: HashMap<String, String>,
}

impl MemoryDrafts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DraftStore for MemoryDrafts {
    fn load(&self, key: &str) -> Result<Option<String>, DraftError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, content: &str) -> Result<(), DraftError> {
        self.entries.insert(key.to_owned(), content.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), DraftError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Drafts in the browser's `localStorage`.
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone)]
pub struct LocalStorageDrafts {
    storage: web_sys::Storage,
}

#[cfg(feature = "hydrate")]
impl LocalStorageDrafts {
    /// Bind to the window's `localStorage`.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::Unavailable`] outside a browser window or when
    /// storage access is denied (private browsing, sandboxed frames).
    pub fn open() -> Result<Self, DraftError> {
        let window = web_sys::window().ok_or(DraftError::Unavailable)?;
        let storage = window
            .local_storage()
            .map_err(|_| DraftError::Unavailable)?
            .ok_or(DraftError::Unavailable)?;
        Ok(Self { storage })
    }
}

#[cfg(feature = "hydrate")]
impl DraftStore for LocalStorageDrafts {
    fn load(&self, key: &str) -> Result<Option<String>, DraftError> {
        self.storage.get_item(key).map_err(|e| {
            log::warn!("draft read failed for {key}: {e:?}");
            DraftError::Read(key.to_owned())
        })
    }

    fn save(&mut self, key: &str, content: &str) -> Result<(), DraftError> {
        self.storage.set_item(key, content).map_err(|e| {
            log::warn!("draft write failed for {key}: {e:?}");
            DraftError::Write(key.to_owned())
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), DraftError> {
        self.storage.remove_item(key).map_err(|e| {
            log::warn!("draft remove failed for {key}: {e:?}");
            DraftError::Write(key.to_owned())
        })
    }
}
