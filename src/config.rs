//! User configuration.
//!
//! Settings live in `<config_dir>/ekman/config.toml`, or wherever the
//! `EKMAN_CONFIG` environment variable points. A missing file means
//! defaults.
//!
//! ```toml
//! python_path = "/opt/conda/bin/python"
//! timeout_secs = 60
//! chart_js = "https://cdn.jsdelivr.net/npm/chart.js"
//! ```

use crate::error::{EkmanError, Result};
use crate::render::DEFAULT_CHART_JS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "EKMAN_CONFIG";

/// Persistent user settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interpreter used to run the inspection script, resolved via `PATH`.
    pub python_path: String,
    /// Seconds to wait for the inspection script.
    pub timeout_secs: u64,
    /// `src` of the Chart.js bundle referenced by variable pages.
    pub chart_js: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            python_path: "python".to_string(),
            timeout_secs: 60,
            chart_js: DEFAULT_CHART_JS.to_string(),
        }
    }
}

impl Config {
    /// Location of the config file.
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir()
            .ok_or_else(|| EkmanError::Config("Unable to determine config directory".to_string()))?;
        Ok(dir.join("ekman").join("config.toml"))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`, falling back to defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text =
            fs::read_to_string(path).map_err(|e| EkmanError::file_open(path.to_path_buf(), e))?;
        Ok(toml::from_str(&text)?)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::default_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| EkmanError::file_open(dir.to_path_buf(), e))?;
        }
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text).map_err(|e| EkmanError::file_open(path.to_path_buf(), e))
    }

    /// Inspection timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
