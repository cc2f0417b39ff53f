//! Delegated file inspection.
//!
//! Ekman never decodes netCDF itself. An external interpreter runs an
//! embedded xarray script against the file and prints the metadata as
//! JSON, which is validated and normalized here.

mod process;

pub use process::{run, ProcessOutput};

use crate::data::Dataset;
use crate::error::{EkmanError, Result};
use serde_json::Value;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tokio::sync::Notify;

/// Script run by the interpreter, with the file path as its only argument.
pub const INSPECT_SCRIPT: &str = include_str!("inspect_dataset.py");

/// Import check run once at startup.
pub const PROBE_SCRIPT: &str = "import xarray; import netCDF4";

/// File extensions offered when picking a file.
pub const DATASET_EXTENSIONS: &[&str] = &["nc", "nc4", "cdf", "h5"];

/// Shared flag used to abandon a running inspection.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<CancelState>);

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.cancelled.store(true, Ordering::SeqCst);
        self.0.notify.notify_waiters();
    }

    /// Check whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once cancellation is requested.
    pub async fn cancelled(&self) {
        loop {
            // Registered before the check so a concurrent cancel is not missed.
            let notified = self.0.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Something that can turn a file path into dataset metadata.
pub trait Inspector: Send + Sync {
    /// Inspect the file at `path`.
    fn inspect(&self, path: &Path, cancel: &CancelToken) -> Result<Dataset>;

    /// Check that the inspector's dependencies are installed.
    fn probe(&self) -> Result<()>;
}

/// Runs the embedded script with a Python interpreter.
#[derive(Debug, Clone)]
pub struct PythonInspector {
    interpreter: String,
    timeout: Duration,
}

impl PythonInspector {
    /// Create an inspector for the given interpreter command.
    pub fn new(interpreter: impl Into<String>, timeout: Duration) -> Self {
        Self {
            interpreter: interpreter.into(),
            timeout,
        }
    }

    /// Interpreter command in use.
    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }
}

impl Inspector for PythonInspector {
    fn inspect(&self, path: &Path, cancel: &CancelToken) -> Result<Dataset> {
        let mut command = Command::new(&self.interpreter);
        command.arg("-c").arg(INSPECT_SCRIPT).arg(path);

        let output = run(command, self.timeout, cancel)?;
        parse_output(&output)
    }

    fn probe(&self) -> Result<()> {
        let mut command = Command::new(&self.interpreter);
        command.arg("-c").arg(PROBE_SCRIPT);

        match run(command, self.timeout, &CancelToken::new()) {
            Ok(output) if output.status.success() => Ok(()),
            Ok(output) => {
                tracing::warn!("Dependency probe failed: {}", output.stderr.trim());
                Err(EkmanError::DependencyMissing)
            },
            Err(e) => {
                tracing::warn!("Dependency probe could not run: {}", e);
                Err(EkmanError::DependencyMissing)
            },
        }
    }
}

/// Classify a finished inspection run.
///
/// A reported `error` field wins over the exit status, so a script that
/// prints its failure and exits non-zero surfaces its own message.
pub fn parse_output(output: &ProcessOutput) -> Result<Dataset> {
    let parsed = serde_json::from_str::<Value>(&output.stdout);

    if let Ok(value) = &parsed {
        if let Some(message) = reported_error(value) {
            return Err(EkmanError::CollaboratorReported(message));
        }
    }

    if !output.status.success() {
        let stderr = output.stderr.trim();
        let message = if stderr.is_empty() {
            format!("inspection exited with {}", output.status)
        } else {
            stderr.to_string()
        };
        return Err(EkmanError::launch(message));
    }

    match parsed {
        Ok(value @ Value::Object(_)) => Ok(Dataset::from_json(&value)),
        _ => Err(EkmanError::CollaboratorOutput {
            output: output.stdout.clone(),
        }),
    }
}

fn reported_error(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
