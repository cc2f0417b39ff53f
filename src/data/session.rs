//! The single-slot dataset cache.

use super::Dataset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// The most recently opened dataset and where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedSession {
    /// Path the dataset was inspected from.
    pub source_locator: PathBuf,
    /// Parsed metadata.
    pub dataset: Dataset,
}

impl CachedSession {
    /// Create a new session.
    pub fn new(source_locator: PathBuf, dataset: Dataset) -> Self {
        Self {
            source_locator,
            dataset,
        }
    }

    /// File name of the source, for titles.
    pub fn display_name(&self) -> String {
        display_name(&self.source_locator)
    }
}

/// Derive a display name from a path, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Holds at most one session. Writes replace the slot.
#[derive(Debug, Default)]
pub struct SessionCache {
    slot: Mutex<Option<Arc<CachedSession>>>,
}

impl SessionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored session.
    pub fn put(&self, source_locator: PathBuf, dataset: Dataset) -> Arc<CachedSession> {
        let session = Arc::new(CachedSession::new(source_locator, dataset));
        self.restore(Arc::clone(&session));
        session
    }

    /// Install an already-built session, e.g. one loaded from workspace state.
    pub fn restore(&self, session: Arc<CachedSession>) {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        *slot = Some(session);
    }

    /// The current session, if any file was opened.
    pub fn get(&self) -> Option<Arc<CachedSession>> {
        self.slot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
