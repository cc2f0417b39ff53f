//! Running a collaborator process with a deadline.

use super::CancelToken;
use crate::error::{EkmanError, Result};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Everything a finished process produced.
#[derive(Debug)]
pub struct ProcessOutput {
    /// Exit status.
    pub status: ExitStatus,
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr.
    pub stderr: String,
}

/// Run `command` to completion, killing it on timeout or cancellation.
///
/// Blocks the calling thread on a private current-thread runtime. The
/// deadline covers both the exit and the end of its output, so a
/// descendant holding a pipe open cannot outlive it.
pub fn run(command: Command, limit: Duration, cancel: &CancelToken) -> Result<ProcessOutput> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_async(command, limit, cancel))
}

async fn run_async(
    mut command: Command,
    limit: Duration,
    cancel: &CancelToken,
) -> Result<ProcessOutput> {
    tracing::debug!("Running {:?}", command);

    let child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| EkmanError::launch(e.to_string()))?;

    // Dropping the output future drops the child, which kills it.
    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::info!("Inspection cancelled");
            Err(EkmanError::Cancelled)
        },
        result = timeout(limit, child.wait_with_output()) => match result {
            Ok(output) => {
                let output = output?;
                Ok(ProcessOutput {
                    status: output.status,
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                })
            },
            Err(_) => {
                tracing::warn!("Collaborator timed out after {} seconds", limit.as_secs());
                Err(EkmanError::CollaboratorTimeout {
                    secs: limit.as_secs(),
                })
            },
        },
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Instant;

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    #[test]
    fn test_captures_both_streams() {
        let out = run(
            sh("echo out; echo err >&2; exit 3"),
            Duration::from_secs(10),
            &CancelToken::new(),
        )
        .unwrap();
        assert_eq!(out.status.code(), Some(3));
        assert_eq!(out.stdout, "out\n");
        assert_eq!(out.stderr, "err\n");
    }

    #[test]
    fn test_timeout_kills_the_child() {
        let started = Instant::now();
        let err = run(sh("sleep 30"), Duration::from_millis(200), &CancelToken::new()).unwrap_err();
        assert!(matches!(err, EkmanError::CollaboratorTimeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_timeout_covers_descendant_holding_the_pipe() {
        let started = Instant::now();
        let err = run(
            sh("sleep 5 & echo '{}'; exit 0"),
            Duration::from_secs(1),
            &CancelToken::new(),
        )
        .unwrap_err();
        assert!(matches!(err, EkmanError::CollaboratorTimeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_cancel_stops_the_child() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let err = run(sh("sleep 30"), Duration::from_secs(30), &cancel).unwrap_err();
        assert!(matches!(err, EkmanError::Cancelled));
    }

    #[test]
    fn test_cancel_from_another_thread() {
        let cancel = CancelToken::new();
        let remote = cancel.clone();
        let canceller = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(200));
            remote.cancel();
        });

        let started = Instant::now();
        let err = run(sh("sleep 30"), Duration::from_secs(30), &cancel).unwrap_err();
        canceller.join().unwrap();
        assert!(matches!(err, EkmanError::Cancelled));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_missing_program_is_launch_failure() {
        let err = run(
            Command::new("/nonexistent/ekman-python"),
            Duration::from_secs(1),
            &CancelToken::new(),
        )
        .unwrap_err();
        assert!(matches!(err, EkmanError::CollaboratorLaunch { .. }));
    }
}
