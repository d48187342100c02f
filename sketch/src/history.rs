//! Snapshots and the bounded undo/redo history.
//!
//! A [`Snapshot`] is the serialized form of a [`SketchDoc`] at one moment.
//! Snapshots are immutable and cheap to clone, so the history stores whole
//! documents rather than diffs.
//!
//! [`History`] keeps two stacks: `undo` holds past states with the most recent
//! last, `redo` holds undone states with the most recently undone on top.
//! Entries move between the stacks and are never duplicated, so the two stacks
//! stay disjoint. Recording a new edit clears `redo`.
//!
//! Below the undo stack sits a *baseline*: the state before the first recorded
//! edit. Undoing the last remaining entry restores the baseline, which is the
//! empty canvas for a new sketch and the loaded content for an existing one.
//! When the undo stack overflows its capacity the oldest entry is folded into
//! the baseline, so undo never reaches further back than the retained window.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use std::collections::VecDeque;
use std::sync::Arc;

use crate::SketchError;
use crate::consts::HISTORY_CAPACITY;
use crate::doc::{FORMAT_VERSION, SketchDoc};

const EMPTY_DOC_JSON: &str = r#"{"version":1,"objects":[]}"#;

/// Serialized canvas contents at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot(Arc<str>);

impl Snapshot {
    /// Snapshot of an empty canvas.
    #[must_use]
    pub fn empty() -> Self {
        Self(Arc::from(EMPTY_DOC_JSON))
    }

    /// Serialize `doc`.
    ///
    /// # Errors
    ///
    /// Returns [`SketchError::Snapshot`] if serialization fails.
    pub fn capture(doc: &SketchDoc) -> Result<Self, SketchError> {
        let json = serde_json::to_string(doc)?;
        Ok(Self(Arc::from(json)))
    }

    /// Accept snapshot JSON produced elsewhere (e.g. fetched from the server).
    ///
    /// The text is parsed once so that a malformed payload is rejected here
    /// rather than on a later undo.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid sketch document.
    pub fn from_json(json: &str) -> Result<Self, SketchError> {
        let snapshot = Self(Arc::from(json));
        snapshot.restore()?;
        Ok(snapshot)
    }

    /// Build a snapshot from an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is not a valid sketch document.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, SketchError> {
        let doc: SketchDoc = serde_json::from_value(value.clone())?;
        check_version(&doc)?;
        Self::capture(&doc)
    }

    /// Deserialize back into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is malformed or from a newer format.
    pub fn restore(&self) -> Result<SketchDoc, SketchError> {
        let doc: SketchDoc = serde_json::from_str(&self.0)?;
        check_version(&doc)?;
        Ok(doc)
    }

    /// The snapshot as a JSON value, ready to embed in a request body.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON.
    pub fn to_value(&self) -> Result<serde_json::Value, SketchError> {
        Ok(serde_json::from_str(&self.0)?)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn check_version(doc: &SketchDoc) -> Result<(), SketchError> {
    if doc.version > FORMAT_VERSION {
        return Err(SketchError::UnsupportedVersion(doc.version));
    }
    Ok(())
}

/// Bounded undo/redo stack of snapshots.
#[derive(Debug, Clone)]
pub struct History {
    baseline: Snapshot,
    undo: VecDeque<Snapshot>,
    /// Top of the redo stack is the last element.
    redo: Vec<Snapshot>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Snapshot::empty())
    }
}

impl History {
    /// Create a history whose undo floor is `baseline`.
    #[must_use]
    pub fn new(baseline: Snapshot) -> Self {
        Self::with_capacity(baseline, HISTORY_CAPACITY)
    }

    /// Create a history retaining at most `capacity` undo entries (minimum 1).
    #[must_use]
    pub fn with_capacity(baseline: Snapshot, capacity: usize) -> Self {
        Self { baseline, undo: VecDeque::new(), redo: Vec::new(), capacity: capacity.max(1) }
    }

    /// Push the state produced by a new edit. Clears the redo stack.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.redo.clear();
        self.undo.push_back(snapshot);
        if self.undo.len() > self.capacity {
            if let Some(oldest) = self.undo.pop_front() {
                self.baseline = oldest;
            }
        }
    }

    /// Step back one edit.
    ///
    /// Returns the state the canvas should now show, or `None` when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        let latest = self.undo.pop_back()?;
        self.redo.push(latest);
        Some(self.current())
    }

    /// Re-apply the most recently undone edit.
    ///
    /// Returns the state the canvas should now show, or `None` when there is
    /// nothing to redo.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let next = self.redo.pop()?;
        self.undo.push_back(next);
        self.undo.back()
    }

    /// Drop both stacks and start over from `baseline`.
    pub fn reset(&mut self, baseline: Snapshot) {
        self.baseline = baseline;
        self.undo.clear();
        self.redo.clear();
    }

    /// The state the canvas shows according to the history.
    #[must_use]
    pub fn current(&self) -> &Snapshot {
        self.undo.back().unwrap_or(&self.baseline)
    }

    #[must_use]
    pub fn baseline(&self) -> &Snapshot {
        &self.baseline
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Past states, oldest first.
    pub fn undo_entries(&self) -> impl Iterator<Item = &Snapshot> {
        self.undo.iter()
    }

    /// Undone states, next-to-redo first.
    pub fn redo_entries(&self) -> impl Iterator<Item = &Snapshot> {
        self.redo.iter().rev()
    }
}
