//! Ekman - a terminal explorer for netCDF metadata.
//!
//! Ekman hands a data file to an external Python interpreter running xarray,
//! caches the returned metadata, and presents it as an expandable outline
//! and as standalone HTML pages.
//!
//! # Features
//!
//! - Delegated inspection with a timeout and cancellation
//! - Single-slot session cache persisted per workspace
//! - Incrementally expanded outline of dimensions, coordinates and variables
//! - Escaped HTML detail pages with a sample chart
//!
//! # Example
//!
//! ```ignore
//! use ekman::commands::Workspace;
//! use ekman::config::Config;
//! use ekman::inspector::CancelToken;
//! use std::path::Path;
//!
//! let workspace = Workspace::open(Path::new("."), &Config::load()?);
//! let session = workspace.open_file(Path::new("air.nc"), &CancelToken::new())?;
//! print!("{}", ekman::outline::format_outline(&session));
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod commands;
pub mod config;
pub mod data;
pub mod error;
pub mod explorer;
pub mod file_browser;
pub mod inspector;
pub mod outline;
pub mod render;
pub mod ui;

pub use error::{EkmanError, Result};
