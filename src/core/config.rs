//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::pivot::FOOTPRINT_SLOTS;
use crate::core::project::Project;
use crate::core::store::DEFAULT_BUSY_TIMEOUT;

/// edaparts configuration with layered hierarchy
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog database file; relative paths resolve against `.edaparts/`
    pub database: Option<PathBuf>,

    /// Footprint columns per library view row
    pub footprint_slots: Option<usize>,

    /// Milliseconds a statement waits on a locked catalog
    pub busy_timeout_ms: Option<u64>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, discovering the project from
    /// the current directory
    pub fn load() -> Self {
        Self::load_for(Project::discover().ok().as_ref())
    }

    /// Load configuration from all sources, merging in priority order
    pub fn load_for(project: Option<&Project>) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/edaparts/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Project config (.edaparts/config.yaml)
        if let Some(project) = project {
            if let Some(project_config) = Self::read_file(&project.config_path()) {
                config.merge(project_config);
            }
        }

        // 4. Environment variables
        config.apply_env(|key| std::env::var(key).ok());

        config
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
                None
            }
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "edaparts")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Apply `EDAPARTS_*` overrides
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(database) = lookup("EDAPARTS_DATABASE") {
            self.database = Some(PathBuf::from(database));
        }
        if let Some(slots) = lookup("EDAPARTS_FOOTPRINT_SLOTS") {
            match slots.parse() {
                Ok(n) => self.footprint_slots = Some(n),
                Err(_) => tracing::warn!(value = %slots, "EDAPARTS_FOOTPRINT_SLOTS is not a number"),
            }
        }
        if let Some(timeout) = lookup("EDAPARTS_BUSY_TIMEOUT_MS") {
            match timeout.parse() {
                Ok(ms) => self.busy_timeout_ms = Some(ms),
                Err(_) => tracing::warn!(value = %timeout, "EDAPARTS_BUSY_TIMEOUT_MS is not a number"),
            }
        }
        if let Some(format) = lookup("EDAPARTS_FORMAT") {
            self.default_format = Some(format);
        }
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.database.is_some() {
            self.database = other.database;
        }
        if other.footprint_slots.is_some() {
            self.footprint_slots = other.footprint_slots;
        }
        if other.busy_timeout_ms.is_some() {
            self.busy_timeout_ms = other.busy_timeout_ms;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Catalog location for a project
    pub fn database_path(&self, project: &Project) -> PathBuf {
        match &self.database {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => project.project_dir().join(path),
            None => project.catalog_path(),
        }
    }

    /// Footprint slot count, at least one
    pub fn footprint_slots(&self) -> usize {
        self.footprint_slots.unwrap_or(FOOTPRINT_SLOTS).max(1)
    }

    pub fn busy_timeout(&self) -> Duration {
        self.busy_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_BUSY_TIMEOUT)
    }
}
