//! The host command surface.
//!
//! [`Workspace`] owns the session cache, the workspace state file and the
//! inspector. The terminal UI and the CLI subcommands both drive it.

use crate::config::Config;
use crate::data::{display_name, CachedSession, Dataset, SessionCache, Variable, WorkspaceState};
use crate::error::{EkmanError, Result};
use crate::inspector::{CancelToken, Inspector, PythonInspector};
use crate::render::{render_dataset_page, render_variable_page, RenderOptions};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Everything needed to open files and render views for one workspace.
pub struct Workspace {
    cache: SessionCache,
    state: WorkspaceState,
    inspector: Arc<dyn Inspector>,
    render: RenderOptions,
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("cache", &self.cache)
            .field("state", &self.state)
            .field("render", &self.render)
            .finish_non_exhaustive()
    }
}

impl Workspace {
    /// Create a workspace rooted at `dir` using the configured interpreter.
    ///
    /// The last dataset stored in the workspace is restored if readable.
    pub fn open(dir: &Path, config: &Config) -> Self {
        let inspector = PythonInspector::new(config.python_path.clone(), config.timeout());
        let render = RenderOptions {
            chart_js: config.chart_js.clone(),
        };
        let workspace = Self::with_inspector(dir, Arc::new(inspector), render);
        workspace.restore();
        workspace
    }

    /// Create an empty workspace with a custom inspector.
    pub fn with_inspector(dir: &Path, inspector: Arc<dyn Inspector>, render: RenderOptions) -> Self {
        Self {
            cache: SessionCache::new(),
            state: WorkspaceState::for_workspace(dir),
            inspector,
            render,
        }
    }

    fn restore(&self) {
        match self.state.last_dataset() {
            Ok(Some(session)) => {
                tracing::info!("Restored {}", session.source_locator.display());
                self.cache.restore(Arc::new(session));
            },
            Ok(None) => {},
            Err(e) => tracing::warn!("Ignoring workspace state: {}", e),
        }
    }

    /// Inspector used for opens and the dependency probe.
    pub fn inspector(&self) -> Arc<dyn Inspector> {
        Arc::clone(&self.inspector)
    }

    /// The current session, if any.
    pub fn session(&self) -> Option<Arc<CachedSession>> {
        self.cache.get()
    }

    /// Inspect `path` and make it the current session.
    ///
    /// On any failure the previous session stays in place.
    pub fn open_file(&self, path: &Path, cancel: &CancelToken) -> Result<Arc<CachedSession>> {
        let path = fs::canonicalize(path).map_err(|e| EkmanError::file_open(path.to_path_buf(), e))?;
        match self.inspector.inspect(&path, cancel) {
            Ok(dataset) => Ok(self.install(path, dataset)),
            Err(e) => {
                tracing::error!("Error inspecting {}: {}", path.display(), e);
                Err(e)
            },
        }
    }

    /// Make an already inspected dataset the current session.
    pub fn install(&self, path: PathBuf, dataset: Dataset) -> Arc<CachedSession> {
        tracing::info!(
            "Loaded {} ({} coords, {} data vars)",
            display_name(&path),
            dataset.coords.len(),
            dataset.data_vars.len()
        );
        let session = self.cache.put(path, dataset);
        if let Err(e) = self.state.set_last_dataset(&session) {
            tracing::warn!("Failed to persist workspace state: {}", e);
        }
        session
    }

    /// Whole-dataset HTML for the current session.
    pub fn show_html_view(&self) -> Result<String> {
        let session = self.session().ok_or(EkmanError::NoSession)?;
        Ok(render_dataset_page(&session))
    }

    /// Detail HTML for one variable.
    pub fn show_variable_detail(&self, variable: &Variable) -> String {
        render_variable_page(variable, &self.render)
    }

    /// Detail HTML for the variable called `name` in the current session.
    pub fn show_variable_named(&self, name: &str) -> Result<String> {
        let session = self.session().ok_or(EkmanError::NoSession)?;
        let variable = session
            .dataset
            .variable(name)
            .ok_or_else(|| EkmanError::variable_not_found(name))?;
        Ok(self.show_variable_detail(variable))
    }

    /// Run the dependency probe.
    pub fn check_dependencies(&self) -> Result<()> {
        self.inspector.probe()
    }
}

/// File name for a written page: `<stem>.html` or `<stem>-<variable>.html`.
///
/// Characters outside `[A-Za-z0-9._-]` are replaced so hostile variable
/// names cannot escape the output directory.
pub fn page_file_name(session: &CachedSession, variable: Option<&str>) -> String {
    let stem = session
        .source_locator
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "dataset".to_string());
    let name = match variable {
        Some(var) => format!("{}-{}", stem, var),
        None => stem,
    };
    let safe: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.html", safe.trim_start_matches('.'))
}

/// Write `html` to `dir/file_name`, creating `dir` if needed.
pub fn write_page(dir: &Path, file_name: &str, html: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| EkmanError::file_open(dir.to_path_buf(), e))?;
    let path = dir.join(file_name);
    fs::write(&path, html).map_err(|e| EkmanError::file_open(path.clone(), e))?;
    tracing::info!("Wrote {}", path.display());
    Ok(path)
}

/// Persist a new interpreter setting and return the config file path.
pub fn select_interpreter(python_path: &str) -> Result<PathBuf> {
    let mut config = Config::load()?;
    config.python_path = python_path.to_string();
    let path = config.save()?;
    tracing::info!("Interpreter set to {}", python_path);
    Ok(path)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    /// Inspector returning canned results, recording every call.
    pub(crate) struct FakeInspector {
        pub(crate) result: Mutex<Option<Result<Dataset>>>,
        pub(crate) calls: Mutex<Vec<PathBuf>>,
    }

    impl FakeInspector {
        pub(crate) fn returning(result: Result<Dataset>) -> Arc<Self> {
            Arc::new(Self {
                result: Mutex::new(Some(result)),
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    impl Inspector for FakeInspector {
        fn inspect(&self, path: &Path, _cancel: &CancelToken) -> Result<Dataset> {
            self.calls.lock().unwrap().push(path.to_path_buf());
            self.result
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Err(EkmanError::Cancelled))
        }

        fn probe(&self) -> Result<()> {
            Err(EkmanError::DependencyMissing)
        }
    }

    fn sample_dataset() -> Dataset {
        Dataset::from_json(&json!({
            "dims": {"x": 1},
            "data_vars": {"t": {"attrs": {"u": "K"}, "sample_data": [1, 2]}}
        }))
    }

    fn data_file(dir: &Path) -> PathBuf {
        let path = dir.join("t.nc");
        fs::write(&path, b"CDF").unwrap();
        path
    }

    #[test]
    fn test_open_file_fills_cache_and_state() {
        let dir = tempfile::tempdir().unwrap();
        let fake = FakeInspector::returning(Ok(sample_dataset()));
        let ws = Workspace::with_inspector(dir.path(), fake.clone(), RenderOptions::default());

        let session = ws.open_file(&data_file(dir.path()), &CancelToken::new()).unwrap();
        assert_eq!(session.display_name(), "t.nc");
        assert_eq!(fake.calls.lock().unwrap().len(), 1);

        let restored = Workspace::with_inspector(dir.path(), fake, RenderOptions::default());
        assert!(restored.session().is_none());
        restored.restore();
        assert_eq!(restored.session().unwrap().dataset, sample_dataset());
    }

    #[test]
    fn test_failed_open_keeps_previous_session() {
        let dir = tempfile::tempdir().unwrap();
        let fake = FakeInspector::returning(Ok(sample_dataset()));
        let ws = Workspace::with_inspector(dir.path(), fake.clone(), RenderOptions::default());
        let file = data_file(dir.path());
        ws.open_file(&file, &CancelToken::new()).unwrap();

        *fake.result.lock().unwrap() = Some(Err(EkmanError::CollaboratorReported("boom".into())));
        let err = ws.open_file(&file, &CancelToken::new()).unwrap_err();
        assert!(err.is_inspection_failure());
        assert_eq!(ws.session().unwrap().dataset, sample_dataset());
    }

    #[test]
    fn test_missing_file_is_not_inspected() {
        let dir = tempfile::tempdir().unwrap();
        let fake = FakeInspector::returning(Ok(sample_dataset()));
        let ws = Workspace::with_inspector(dir.path(), fake.clone(), RenderOptions::default());

        let err = ws
            .open_file(&dir.path().join("missing.nc"), &CancelToken::new())
            .unwrap_err();
        assert!(matches!(err, EkmanError::FileOpen { .. }));
        assert!(fake.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_views_without_session_warn() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::with_inspector(
            dir.path(),
            FakeInspector::returning(Ok(Dataset::default())),
            RenderOptions::default(),
        );
        assert!(matches!(ws.show_html_view(), Err(EkmanError::NoSession)));
        assert!(matches!(ws.show_variable_named("t"), Err(EkmanError::NoSession)));
    }

    #[test]
    fn test_page_file_names_are_sanitized() {
        let session = CachedSession::new(PathBuf::from("/data/air.2m.nc"), Dataset::default());
        assert_eq!(page_file_name(&session, None), "air.2m.html");
        assert_eq!(page_file_name(&session, Some("t2m")), "air.2m-t2m.html");
        assert_eq!(page_file_name(&session, Some("../x y")), "air.2m-.._x_y.html");
    }

    #[test]
    fn test_write_page_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_page(&dir.path().join("out"), "a.html", "<p>hi</p>").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "<p>hi</p>");
    }

    #[test]
    fn test_variable_detail_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::with_inspector(
            dir.path(),
            FakeInspector::returning(Ok(Dataset::default())),
            RenderOptions::default(),
        );
        ws.install(PathBuf::from("/data/t.nc"), sample_dataset());

        let html = ws.show_variable_named("t").unwrap();
        assert!(html.contains("<h1>t</h1>"));
        assert!(matches!(
            ws.show_variable_named("nope"),
            Err(EkmanError::VariableNotFound { .. })
        ));
    }
}
