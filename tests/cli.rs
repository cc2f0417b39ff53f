//! End-to-end tests of the `ekman` binary with fake interpreters.

#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DATASET_JSON: &str = r#"{
  "dims": {"x": 1},
  "coords": {},
  "data_vars": {"t": {"dims": ["x"], "shape": [1], "dtype": "float32",
                      "attrs": {"u": "K"}, "sample_data": [1, 2], "encoding": {}}},
  "attrs": {"title": "<b>demo</b>"}
}"#;

struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("demo.nc"), b"CDF\x01").unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write an executable standing in for python.
    fn fake_python(&self, name: &str, body: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn printing(&self, json: &str) -> PathBuf {
        self.fake_python("python-ok", &format!("cat <<'JSON'\n{}\nJSON", json))
    }

    fn ekman(&self) -> Command {
        let mut cmd = Command::cargo_bin("ekman").unwrap();
        cmd.current_dir(self.path())
            .env("EKMAN_CONFIG", self.path().join("config.toml"))
            .env("EKMAN_WORKSPACE", self.path())
            .env_remove("EKMAN_PYTHON");
        cmd
    }

    fn open_demo(&self) {
        let python = self.printing(DATASET_JSON);
        self.ekman()
            .arg("--python")
            .arg(&python)
            .args(["open", "demo.nc"])
            .assert()
            .success();
    }
}

#[test]
fn test_open_prints_outline() {
    let env = TestEnv::new();
    let python = env.printing(DATASET_JSON);

    env.ekman()
        .arg("--python")
        .arg(&python)
        .args(["open", "demo.nc"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("demo.nc\n"))
        .stdout(predicate::str::contains("x (1)"))
        .stdout(predicate::str::contains("u: \"K\""))
        .stdout(predicate::str::contains("[0]: 1"))
        .stdout(predicate::str::contains("[1]: 2"));

    assert!(env.path().join(".ekman").join("state.json").exists());
}

#[test]
fn test_tree_reads_persisted_session() {
    let env = TestEnv::new();
    env.open_demo();

    env.ekman()
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::contains("├── Dimensions"))
        .stdout(predicate::str::contains("└── Data Variables"))
        .stdout(predicate::str::contains("Sample Data"));
}

#[test]
fn test_tree_without_session_warns() {
    let env = TestEnv::new();

    env.ekman()
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No dataset loaded"));
}

#[test]
fn test_html_view_is_written_and_escaped() {
    let env = TestEnv::new();
    env.open_demo();

    env.ekman()
        .arg("html")
        .assert()
        .success()
        .stdout(predicate::str::contains("demo.html"));

    let html = fs::read_to_string(env.path().join("demo.html")).unwrap();
    assert!(html.contains("<summary>Data Variables</summary>"));
    assert!(html.contains("&quot;&lt;b&gt;demo&lt;/b&gt;&quot;"));
    assert!(!html.contains("<b>demo</b>"));
}

#[test]
fn test_show_variable_to_stdout() {
    let env = TestEnv::new();
    env.open_demo();

    env.ekman()
        .args(["show", "t", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<h1>t</h1>"))
        .stdout(predicate::str::contains("x (1)"))
        .stdout(predicate::str::contains("new Chart"));

    env.ekman()
        .args(["show", "missing", "--stdout"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Variable not found: missing"));
}

#[test]
fn test_views_without_session_fail() {
    let env = TestEnv::new();

    env.ekman()
        .arg("html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No dataset loaded"));
}

#[test]
fn test_reported_error_keeps_previous_session() {
    let env = TestEnv::new();
    env.open_demo();
    let failing = env.fake_python(
        "python-err",
        "echo '{\"error\": \"NetCDF: Unknown file format\"}'; exit 1",
    );

    env.ekman()
        .arg("--python")
        .arg(&failing)
        .args(["open", "demo.nc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Python error: NetCDF: Unknown file format"));

    env.ekman()
        .arg("tree")
        .assert()
        .success()
        .stdout(predicate::str::contains("u: \"K\""));
}

#[test]
fn test_stderr_is_surfaced_on_crash() {
    let env = TestEnv::new();
    let crashing = env.fake_python(
        "python-crash",
        "echo 'ModuleNotFoundError: No module named xarray' >&2; exit 1",
    );

    env.ekman()
        .arg("--python")
        .arg(&crashing)
        .args(["open", "demo.nc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No module named xarray"));
}

#[test]
fn test_unparseable_output() {
    let env = TestEnv::new();
    let noisy = env.fake_python("python-noise", "echo 'hello from python'");

    env.ekman()
        .arg("--python")
        .arg(&noisy)
        .args(["open", "demo.nc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse Python output: hello from python"));
}

#[test]
fn test_inspection_timeout() {
    let env = TestEnv::new();
    let slow = env.fake_python("python-slow", "exec sleep 20");

    env.ekman()
        .arg("--python")
        .arg(&slow)
        .args(["--timeout", "1", "open", "demo.nc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timed out"));
}

#[test]
fn test_check_reports_missing_dependencies() {
    let env = TestEnv::new();
    let failing = env.fake_python("python-bare", "exit 1");

    env.ekman()
        .arg("--python")
        .arg(&failing)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Python, xarray, or netCDF4 not found",
        ));

    let ok = env.fake_python("python-full", "exit 0");
    env.ekman()
        .arg("--python")
        .arg(&ok)
        .arg("check")
        .assert()
        .success();
}

#[test]
fn test_select_interpreter_is_used_by_later_runs() {
    let env = TestEnv::new();
    let python = env.printing(DATASET_JSON);

    env.ekman()
        .arg("select-interpreter")
        .arg(&python)
        .assert()
        .success()
        .stdout(predicate::str::contains("Interpreter set to"));

    let config = fs::read_to_string(env.path().join("config.toml")).unwrap();
    assert!(config.contains("python-ok"));

    env.ekman()
        .args(["open", "demo.nc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("t"));
}
