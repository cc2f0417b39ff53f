//! Application state and logic.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::commands::{page_file_name, write_page, Workspace};
use crate::data::{display_name, Dataset, DisplayNode};
use crate::error::Result;
use crate::explorer::ExplorerState;
use crate::file_browser::FileBrowserState;
use crate::inspector::CancelToken;
use crate::ui::{StatusLevel, Theme};

/// An inspection running on a worker thread.
#[derive(Debug)]
struct PendingInspection {
    path: PathBuf,
    cancel: CancelToken,
    result: Receiver<Result<Dataset>>,
}

/// Application state.
#[derive(Debug)]
pub struct App {
    /// Cache, persistence and inspector.
    pub workspace: Workspace,
    /// Explorer state (tree navigation + details).
    pub explorer: ExplorerState,
    /// File browser state.
    pub file_browser: FileBrowserState,
    /// File browser mode.
    pub file_browser_mode: bool,
    /// Status message.
    pub status: String,
    /// Severity of the status message.
    pub status_level: StatusLevel,
    /// Current theme.
    pub theme: Theme,
    /// Directory HTML pages are written to.
    pub output_dir: PathBuf,
    pending: Option<PendingInspection>,
    probe: Option<Receiver<Result<()>>>,
}

impl App {
    /// Create a new application instance showing the workspace's last session.
    pub fn new(workspace: Workspace, output_dir: PathBuf) -> Self {
        let mut app = Self {
            workspace,
            explorer: ExplorerState::new(),
            file_browser: FileBrowserState::new(),
            file_browser_mode: false,
            status: "Ready".to_string(),
            status_level: StatusLevel::Info,
            theme: Theme::GruvboxDark,
            output_dir,
            pending: None,
            probe: None,
        };

        if let Some(session) = app.workspace.session() {
            app.set_status(format!("{} restored", session.display_name()));
            app.explorer.load_session(session);
        }

        app
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
        self.status_level = StatusLevel::Info;
    }

    fn set_warning(&mut self, message: impl Into<String>) {
        self.status = message.into();
        self.status_level = StatusLevel::Warning;
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.status = message.into();
        self.status_level = StatusLevel::Error;
    }

    /// Run the dependency probe in the background.
    pub fn start_dependency_check(&mut self) {
        let inspector = self.workspace.inspector();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(inspector.probe());
        });
        self.probe = Some(rx);
    }

    /// Open a file, or show the file browser when no path is given.
    pub fn open_file(&mut self, path: Option<PathBuf>) {
        match path {
            Some(path) => self.start_inspection(path),
            None => {
                if let Some(dir) = self
                    .workspace
                    .session()
                    .and_then(|s| s.source_locator.parent().map(Path::to_path_buf))
                {
                    self.file_browser.current_dir = dir;
                }
                self.file_browser.load_directory();
                self.file_browser_mode = true;
                self.set_status(format!("Browsing: {}", self.file_browser.current_dir.display()));
            },
        }
    }

    /// Start inspecting `path` on a worker thread.
    ///
    /// Only one inspection runs at a time; further requests are refused
    /// until it finishes or is cancelled.
    pub fn start_inspection(&mut self, path: PathBuf) {
        if let Some(pending) = &self.pending {
            let busy = display_name(&pending.path);
            self.set_warning(format!("Still inspecting {} (Esc to cancel)", busy));
            return;
        }

        let path = match std::fs::canonicalize(&path) {
            Ok(p) => p,
            Err(e) => {
                self.set_error(format!("Failed to resolve path: {}", e));
                return;
            },
        };

        let inspector = self.workspace.inspector();
        let cancel = CancelToken::new();
        let (tx, rx) = mpsc::channel();
        {
            let path = path.clone();
            let cancel = cancel.clone();
            thread::spawn(move || {
                let _ = tx.send(inspector.inspect(&path, &cancel));
            });
        }

        self.set_status(format!("Inspecting {}... (Esc to cancel)", display_name(&path)));
        self.pending = Some(PendingInspection {
            path,
            cancel,
            result: rx,
        });
    }

    /// Whether an inspection is running.
    pub fn is_inspecting(&self) -> bool {
        self.pending.is_some()
    }

    /// Cancel the running inspection, if any.
    pub fn cancel_inspection(&mut self) {
        if let Some(pending) = &self.pending {
            pending.cancel.cancel();
            self.set_status(format!("Cancelling {}...", display_name(&pending.path)));
        }
    }

    /// Collect results of background work. Called once per frame.
    pub fn poll(&mut self) {
        self.poll_probe();
        self.poll_inspection();
    }

    fn poll_probe(&mut self) {
        let Some(rx) = &self.probe else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(())) => self.probe = None,
            Ok(Err(e)) => {
                self.probe = None;
                tracing::warn!("{}", e);
                self.set_warning(e.to_string());
            },
            Err(TryRecvError::Empty) => {},
            Err(TryRecvError::Disconnected) => self.probe = None,
        }
    }

    fn poll_inspection(&mut self) {
        let Some(pending) = &self.pending else {
            return;
        };
        let outcome = match pending.result.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                self.pending = None;
                self.set_error("Inspection worker stopped unexpectedly");
                return;
            },
        };

        let Some(pending) = self.pending.take() else {
            return;
        };
        match outcome {
            Ok(dataset) => {
                let session = self.workspace.install(pending.path, dataset);
                self.set_status(format!("{} loaded", session.display_name()));
                self.explorer.load_session(session);
                self.file_browser_mode = false;
            },
            Err(e) => {
                tracing::error!("Error loading {}: {}", pending.path.display(), e);
                self.set_error(format!("Failed to inspect {}: {}", display_name(&pending.path), e));
            },
        }
    }

    /// Get the current node.
    pub fn current_node(&self) -> Option<&DisplayNode> {
        self.explorer.current_node()
    }

    /// Write the detail page of the variable under the cursor.
    pub fn show_variable_detail(&mut self) {
        let Some(variable) = self.current_node().and_then(|n| n.variable.clone()) else {
            self.set_status("Select a variable to preview");
            return;
        };
        let Some(session) = self.workspace.session() else {
            self.set_warning("No dataset loaded. Open a file first.");
            return;
        };

        let html = self.workspace.show_variable_detail(&variable);
        let file_name = page_file_name(&session, Some(&variable.name));
        match write_page(&self.output_dir, &file_name, &html) {
            Ok(path) => self.set_status(format!("Preview: {}", path.display())),
            Err(e) => self.set_error(format!("Failed to write preview: {}", e)),
        }
    }

    /// Write the whole-dataset page.
    pub fn show_html_view(&mut self) {
        let Some(session) = self.workspace.session() else {
            self.set_warning("No dataset loaded. Open a file first.");
            return;
        };
        let result = self
            .workspace
            .show_html_view()
            .and_then(|html| write_page(&self.output_dir, &page_file_name(&session, None), &html));
        match result {
            Ok(path) => self.set_status(format!("HTML view: {}", path.display())),
            Err(e) => self.set_error(format!("Failed to write HTML view: {}", e)),
        }
    }

    /// Toggle preview panel.
    pub fn toggle_preview(&mut self) {
        self.explorer.toggle_preview();
        let state = if self.explorer.show_preview { "ON" } else { "OFF" };
        self.set_status(format!("Details: {}", state));
    }

    /// Cycle to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.set_status(format!("Theme: {}", self.theme.name()));
    }

    /// Show the key help in the status bar.
    pub fn show_help(&mut self) {
        self.set_status(
            "Help: q=quit, j/k=nav, l/h=expand/collapse, o=open, Enter=preview, H=html, t=details, T=theme",
        );
    }

    /// Scroll preview down.
    pub fn scroll_preview_down(&mut self) {
        self.explorer.scroll_down();
    }

    /// Scroll preview up.
    pub fn scroll_preview_up(&mut self) {
        self.explorer.scroll_up();
    }

    /// Toggle show hidden files.
    pub fn toggle_hidden(&mut self) {
        self.file_browser.toggle_hidden();
        let state = if self.file_browser.show_hidden { "ON" } else { "OFF" };
        self.set_status(format!("Show hidden: {}", state));
    }

    /// Navigate to selected file/directory in browser.
    pub fn browser_select(&mut self) {
        if let Some(path) = self.file_browser.select_current() {
            self.start_inspection(path);
        }
    }

    /// Navigate to parent directory in file browser.
    pub fn browser_parent(&mut self) {
        self.file_browser.go_to_parent();
        self.set_status(format!("Browsing: {}", self.file_browser.current_dir.display()));
    }

    /// Leave the file browser without opening anything.
    pub fn close_file_browser(&mut self) {
        self.file_browser_mode = false;
        self.set_status("Ready");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::FakeInspector;
    use crate::error::EkmanError;
    use crate::render::RenderOptions;
    use serde_json::json;
    use std::fs;
    use std::time::{Duration, Instant};

    fn app(dir: &Path, result: Result<Dataset>) -> App {
        let ws = Workspace::with_inspector(
            dir,
            FakeInspector::returning(result),
            RenderOptions::default(),
        );
        App::new(ws, dir.join("out"))
    }

    fn wait_for_inspection(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.is_inspecting() && Instant::now() < deadline {
            app.poll();
            thread::sleep(Duration::from_millis(5));
        }
        assert!(!app.is_inspecting());
    }

    fn dataset() -> Dataset {
        Dataset::from_json(&json!({"data_vars": {"t": {"sample_data": [1]}}}))
    }

    #[test]
    fn test_inspection_loads_outline() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("t.nc");
        fs::write(&file, b"").unwrap();
        let mut app = app(dir.path(), Ok(dataset()));

        app.open_file(Some(file));
        wait_for_inspection(&mut app);

        assert_eq!(app.status, "t.nc loaded");
        assert_eq!(app.explorer.visible_items().len(), 3);
        assert!(app.workspace.session().is_some());
    }

    #[test]
    fn test_failed_inspection_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("t.nc");
        fs::write(&file, b"").unwrap();
        let mut app = app(
            dir.path(),
            Err(EkmanError::CollaboratorReported("unknown format".into())),
        );

        app.open_file(Some(file));
        wait_for_inspection(&mut app);

        assert_eq!(app.status_level, StatusLevel::Error);
        assert!(app.status.contains("unknown format"));
        assert!(app.workspace.session().is_none());
    }

    #[test]
    fn test_views_without_session_warn() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path(), Ok(dataset()));

        app.show_html_view();
        assert_eq!(app.status_level, StatusLevel::Warning);
        app.show_variable_detail();
        assert_eq!(app.status, "Select a variable to preview");
    }

    #[test]
    fn test_variable_preview_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path(), Ok(Dataset::default()));
        let session = app.workspace.install(PathBuf::from("/data/air.nc"), dataset());
        app.explorer.load_session(session);

        app.explorer.goto_last();
        app.explorer.expand_current();
        app.explorer.cursor_down();
        app.show_variable_detail();

        let written = dir.path().join("out").join("air-t.html");
        assert!(written.exists(), "{}", app.status);
        assert!(fs::read_to_string(written).unwrap().contains("<h1>t</h1>"));
    }

    #[test]
    fn test_no_path_opens_file_browser() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path(), Ok(dataset()));
        app.open_file(None);
        assert!(app.file_browser_mode);
        app.close_file_browser();
        assert!(!app.file_browser_mode);
    }
}
