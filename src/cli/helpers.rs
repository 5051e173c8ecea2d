//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use std::thread;
use std::time::Duration;

use clap::ValueEnum;
use miette::Result;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::config::Config;
use crate::core::project::Project;
use crate::core::store::{CatalogStore, StoreError};

/// Attempts made for a write that keeps hitting a locked catalog
const BUSY_ATTEMPTS: u32 = 3;

/// An opened project catalog with the configuration it was opened under
pub struct Catalog {
    pub project: Project,
    pub config: Config,
    pub store: CatalogStore,
}

/// Locate the project (honoring `--project`) and load its configuration
pub fn load_project(global: &GlobalOpts) -> Result<(Project, Config)> {
    let project = match &global.project {
        Some(path) => Project::discover_from(path),
        None => Project::discover(),
    }
    .map_err(|e| miette::miette!("{}", e))?;

    let config = Config::load_for(Some(&project));
    Ok((project, config))
}

/// Locate the project and open its catalog
pub fn open_catalog(global: &GlobalOpts) -> Result<Catalog> {
    let (project, config) = load_project(global)?;
    let store = CatalogStore::open_project(&project, &config)?;
    Ok(Catalog {
        project,
        config,
        store,
    })
}

/// Pick the effective output format.
///
/// An explicit `--format` wins, then the configured `default_format`, then
/// the command's own default.
pub fn resolve_format(format: OutputFormat, config: &Config, fallback: OutputFormat) -> OutputFormat {
    if format != OutputFormat::Auto {
        return format;
    }
    config
        .default_format
        .as_deref()
        .and_then(|name| OutputFormat::from_str(name, true).ok())
        .filter(|f| *f != OutputFormat::Auto)
        .unwrap_or(fallback)
}

/// Run a catalog operation, retrying while the database reports busy.
///
/// Only errors classified as retryable are retried; the last error is
/// returned once the attempts are exhausted.
pub fn retry_busy<T>(mut op: impl FnMut() -> Result<T, StoreError>) -> Result<T, StoreError> {
    let mut attempt = 1;
    loop {
        match op() {
            Err(e) if e.is_retryable() && attempt < BUSY_ATTEMPTS => {
                tracing::warn!(attempt, error = %e, "catalog busy, retrying");
                thread::sleep(Duration::from_millis(100 * u64::from(attempt)));
                attempt += 1;
            }
            result => return result,
        }
    }
}

/// Parse a `column=value` attribute assignment
pub fn parse_attr(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing column name in '{}'", s));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Display an optional value, using "-" for missing ones
pub fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

/// Truncate a string to max_len, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
