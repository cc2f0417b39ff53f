//! Workspace-scoped key/value state.
//!
//! State lives in `<workspace>/.ekman/state.json` as a JSON object. Only the
//! `lastDataset` key is used; other keys are preserved on write.

use super::CachedSession;
use crate::error::{EkmanError, Result};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Key under which the last opened dataset is stored.
pub const LAST_DATASET_KEY: &str = "lastDataset";

/// JSON-file backed workspace state.
#[derive(Debug, Clone)]
pub struct WorkspaceState {
    path: PathBuf,
}

impl WorkspaceState {
    /// State file for the given workspace directory.
    pub fn for_workspace(workspace: &Path) -> Self {
        Self {
            path: workspace.join(".ekman").join("state.json"),
        }
    }

    /// Location of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session, if any.
    pub fn last_dataset(&self) -> Result<Option<CachedSession>> {
        let mut entries = self.read_entries()?;
        match entries.remove(LAST_DATASET_KEY) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Store the session, replacing the previous one.
    pub fn set_last_dataset(&self, session: &CachedSession) -> Result<()> {
        let mut entries = self.read_entries().unwrap_or_else(|e| {
            tracing::warn!("Discarding unreadable workspace state: {}", e);
            Map::new()
        });
        entries.insert(LAST_DATASET_KEY.to_string(), serde_json::to_value(session)?);

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| EkmanError::file_open(dir.to_path_buf(), e))?;
        }
        let text = serde_json::to_string_pretty(&Value::Object(entries))?;
        fs::write(&self.path, text).map_err(|e| EkmanError::file_open(self.path.clone(), e))
    }

    fn read_entries(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let text =
            fs::read_to_string(&self.path).map_err(|e| EkmanError::file_open(self.path.clone(), e))?;
        match serde_json::from_str(&text)? {
            Value::Object(entries) => Ok(entries),
            _ => Ok(Map::new()),
        }
    }
}
