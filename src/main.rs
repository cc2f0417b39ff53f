//! Ekman - a terminal explorer for netCDF metadata.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ekman::app::App;
use ekman::commands::{page_file_name, select_interpreter, write_page, Workspace};
use ekman::config::Config;
use ekman::inspector::CancelToken;
use ekman::{outline, ui, EkmanError};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ekman", version)]
#[command(about = "A terminal explorer for netCDF metadata", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Enable logging to specified file
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    /// Python interpreter used for inspection
    #[arg(long, env = "EKMAN_PYTHON", global = true)]
    python: Option<String>,

    /// Seconds to wait for the inspection script
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Workspace directory holding the last opened dataset
    #[arg(long, env = "EKMAN_WORKSPACE", global = true)]
    workspace: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse the outline interactively (default)
    Explore {
        /// Dataset to open; without one the last dataset is shown
        file: Option<PathBuf>,
    },
    /// Inspect a file, cache it and print its outline
    Open {
        /// Dataset to inspect
        file: PathBuf,
    },
    /// Print the fully expanded outline of the cached dataset
    Tree,
    /// Write the whole-dataset HTML view
    Html {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Write the HTML preview of one variable
    Show {
        /// Coordinate or data variable name
        variable: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Persist the interpreter used for inspection
    SelectInterpreter {
        /// Interpreter name or path
        python: String,
    },
    /// Check that Python, xarray and netCDF4 are available
    Check,
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Output file (default: <file stem>[-<variable>].html in the current directory)
    #[arg(short, long, conflicts_with = "stdout")]
    out: Option<PathBuf>,

    /// Print the document instead of writing a file
    #[arg(long)]
    stdout: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting Ekman");
    }

    let mut config = Config::load()?;
    if let Some(python) = &args.python {
        config.python_path = python.clone();
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }

    let workspace_dir = match &args.workspace {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let result = match args.command {
        None => explore(Workspace::open(&workspace_dir, &config), None),
        Some(Command::Explore { file }) => explore(Workspace::open(&workspace_dir, &config), file),
        Some(Command::Open { file }) => {
            let workspace = Workspace::open(&workspace_dir, &config);
            let session = workspace.open_file(&file, &CancelToken::new())?;
            print!("{}", outline::format_outline(&session));
            Ok(())
        },
        Some(Command::Tree) => {
            let workspace = Workspace::open(&workspace_dir, &config);
            match workspace.session() {
                Some(session) => print!("{}", outline::format_outline(&session)),
                None => eprintln!("Warning: {}", EkmanError::NoSession),
            }
            Ok(())
        },
        Some(Command::Html { output }) => {
            let workspace = Workspace::open(&workspace_dir, &config);
            let html = workspace.show_html_view()?;
            let default_name = workspace
                .session()
                .map(|s| page_file_name(&s, None))
                .unwrap_or_else(|| "dataset.html".to_string());
            emit(&output, &default_name, &html)
        },
        Some(Command::Show { variable, output }) => {
            let workspace = Workspace::open(&workspace_dir, &config);
            let html = workspace.show_variable_named(&variable)?;
            let default_name = workspace
                .session()
                .map(|s| page_file_name(&s, Some(&variable)))
                .unwrap_or_else(|| format!("{}.html", variable));
            emit(&output, &default_name, &html)
        },
        Some(Command::SelectInterpreter { python }) => {
            let path = select_interpreter(&python)?;
            println!("Interpreter set to {} ({})", python, path.display());
            Ok(())
        },
        Some(Command::Check) => {
            let workspace = Workspace::open(&workspace_dir, &config);
            workspace.check_dependencies()?;
            println!("{}: xarray and netCDF4 are available", config.python_path);
            Ok(())
        },
    };

    if args.log.is_some() {
        tracing::info!("Ekman exited");
    }

    result
}

/// Print or write a rendered page.
fn emit(output: &OutputArgs, default_name: &str, html: &str) -> Result<()> {
    if output.stdout {
        print!("{}", html);
        return Ok(());
    }

    let path = match &output.out {
        Some(path) => {
            let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
            let dir = dir.map(PathBuf::from).unwrap_or(std::env::current_dir()?);
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| default_name.to_string());
            write_page(&dir, &name, html)?
        },
        None => write_page(&std::env::current_dir()?, default_name, html)?,
    };
    println!("Wrote {}", path.display());
    Ok(())
}

fn explore(workspace: Workspace, file: Option<PathBuf>) -> Result<()> {
    // Validate path if provided
    if let Some(ref path) = file {
        if !path.exists() {
            anyhow::bail!("Path not found: {}", path.display());
        }
    }

    let mut app = App::new(workspace, std::env::current_dir()?);
    app.start_dependency_check();
    if file.is_some() || app.workspace.session().is_none() {
        app.open_file(file);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let mut pending_g = false; // For 'gg' vim binding

    loop {
        app.poll();
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // Quit works in every mode
        if let (KeyModifiers::NONE, KeyCode::Char('q')) = (key.modifiers, key.code) {
            app.cancel_inspection();
            return Ok(());
        }

        if app.is_inspecting() {
            if key.code == KeyCode::Esc {
                app.cancel_inspection();
            }
            continue;
        }

        // File browser mode
        if app.file_browser_mode {
            match (key.modifiers, key.code) {
                (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
                    app.file_browser.cursor_up();
                },
                (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
                    app.file_browser.cursor_down();
                },
                (KeyModifiers::NONE, KeyCode::Enter)
                | (KeyModifiers::NONE, KeyCode::Char('l'))
                | (KeyModifiers::NONE, KeyCode::Right) => {
                    app.browser_select();
                },
                (KeyModifiers::NONE, KeyCode::Char('h')) | (KeyModifiers::NONE, KeyCode::Left) => {
                    app.browser_parent();
                },
                (KeyModifiers::NONE, KeyCode::Char('.')) => {
                    app.toggle_hidden();
                },
                (KeyModifiers::NONE, KeyCode::Esc) => {
                    app.close_file_browser();
                },
                _ => {},
            }
            continue;
        }

        // Normal mode
        match (key.modifiers, key.code) {
            // Navigation
            (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
                app.explorer.cursor_up();
            },
            (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
                app.explorer.cursor_down();
            },
            (KeyModifiers::NONE, KeyCode::Left) | (KeyModifiers::NONE, KeyCode::Char('h')) => {
                app.explorer.collapse_current();
            },
            (KeyModifiers::NONE, KeyCode::Right) | (KeyModifiers::NONE, KeyCode::Char('l')) => {
                app.explorer.expand_current();
            },

            // Vim navigation
            (KeyModifiers::NONE, KeyCode::Char('g')) => {
                if pending_g {
                    app.explorer.goto_first();
                    pending_g = false;
                } else {
                    pending_g = true;
                }
                continue;
            },
            (KeyModifiers::SHIFT, KeyCode::Char('G')) => {
                app.explorer.goto_last();
            },

            // Commands
            (KeyModifiers::NONE, KeyCode::Enter) => {
                app.show_variable_detail();
            },
            (KeyModifiers::SHIFT, KeyCode::Char('H')) => {
                app.show_html_view();
            },
            (KeyModifiers::NONE, KeyCode::Char('o')) => {
                app.open_file(None);
            },
            (KeyModifiers::NONE, KeyCode::Char('t')) => {
                app.toggle_preview();
            },
            (KeyModifiers::SHIFT, KeyCode::Char('T')) => {
                app.cycle_theme();
            },
            (_, KeyCode::Char('?')) => {
                app.show_help();
            },

            // Preview scrolling
            (KeyModifiers::CONTROL, KeyCode::Char('d')) | (KeyModifiers::SHIFT, KeyCode::Char('J')) => {
                app.scroll_preview_down();
            },
            (KeyModifiers::CONTROL, KeyCode::Char('u')) | (KeyModifiers::SHIFT, KeyCode::Char('K')) => {
                app.scroll_preview_up();
            },

            _ => {},
        }
        pending_g = false;
    }
}
