//! SQLite-backed component catalog
//!
//! The store holds:
//! - Base component records (`component`)
//! - One type-attribute table per `ComponentKind`, keyed by component id
//! - Footprint and symbol references per CAD tool
//! - Component/footprint and component/symbol associations
//! - Fingerprints of materialized library views (`catalog_meta`)
//!
//! Reads that must observe one consistent state (view projection) go
//! through `snapshot()`, which opens a deferred read transaction. Writes run
//! in immediate transactions so a component and its attribute row always
//! land together.

mod components;
mod error;
pub(crate) mod references;
mod schema;
mod types;

pub use error::StoreError;
pub use types::*;

pub(crate) use components::{kind_of, load_component};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use rusqlite::{params, Connection, OptionalExtension, Transaction};

use crate::core::config::Config;
use crate::core::project::Project;

/// Current schema version
const SCHEMA_VERSION: i32 = 2;

/// Default time a statement waits on a locked database
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Shorthand for store results
pub type Result<T> = std::result::Result<T, StoreError>;

/// The component catalog backed by SQLite
pub struct CatalogStore {
    conn: Connection,
    path: Option<PathBuf>,
}

impl CatalogStore {
    /// Open or create the catalog database at `path`
    pub fn open(path: &Path, busy_timeout: Duration) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // WAL keeps readers on their snapshot while a writer commits
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        let mut store = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        store.configure(busy_timeout)?;
        store.ensure_schema()?;

        tracing::debug!(path = %path.display(), "opened catalog");
        Ok(store)
    }

    /// Open the catalog of a project, honoring configured location and timeouts
    pub fn open_project(project: &Project, config: &Config) -> Result<Self> {
        Self::open(&config.database_path(project), config.busy_timeout())
    }

    /// Open a private in-memory catalog
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self { conn, path: None };
        store.configure(DEFAULT_BUSY_TIMEOUT)?;
        store.ensure_schema()?;
        Ok(store)
    }

    fn configure(&mut self, busy_timeout: Duration) -> Result<()> {
        self.conn.busy_timeout(busy_timeout)?;
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
    }

    /// Create the schema on a fresh database, refuse unknown versions
    fn ensure_schema(&mut self) -> Result<()> {
        let has_version_table: bool = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
                [],
                |row| row.get::<_, i64>(0),
            )
            .map(|n| n > 0)?;

        if !has_version_table {
            return self.init_schema();
        }

        let found: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?
            .unwrap_or(0);

        if found != SCHEMA_VERSION {
            return Err(StoreError::SchemaMismatch {
                found,
                expected: SCHEMA_VERSION,
            });
        }

        Ok(())
    }

    /// Location of the database file (`None` when in memory)
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Begin a read transaction pinned to one snapshot of the catalog.
    ///
    /// Every read issued through the returned transaction observes the same
    /// committed state; concurrent writers are not blocked.
    pub fn snapshot(&self) -> Result<Transaction<'_>> {
        Ok(self.conn.unchecked_transaction()?)
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Read a value from the metadata table
    pub fn meta(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row(
                "SELECT value FROM catalog_meta WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?)
    }

    /// Write a value into the metadata table
    pub fn set_meta(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO catalog_meta (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a value from the metadata table
    pub fn delete_meta(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM catalog_meta WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Get catalog statistics
    pub fn statistics(&self) -> Result<StoreStats> {
        let count = |sql: &str| -> Result<usize> {
            Ok(self.conn.query_row(sql, [], |row| row.get::<_, i64>(0))? as usize)
        };

        let mut by_kind = Vec::new();
        for kind in crate::core::identity::ComponentKind::all() {
            let n = count(&format!("SELECT COUNT(*) FROM {}", kind.table()))?;
            by_kind.push((*kind, n));
        }

        let db_size_bytes = self
            .path
            .as_ref()
            .and_then(|p| fs::metadata(p).ok())
            .map(|m| m.len())
            .unwrap_or(0);

        Ok(StoreStats {
            total_components: count("SELECT COUNT(*) FROM component")?,
            total_footprints: count("SELECT COUNT(*) FROM footprint_ref")?,
            total_symbols: count("SELECT COUNT(*) FROM library_ref")?,
            footprint_associations: count("SELECT COUNT(*) FROM component_footprint_asc")?,
            symbol_associations: count("SELECT COUNT(*) FROM component_library_asc")?,
            materialized_views: count(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'view'",
            )?,
            by_kind,
            db_size_bytes,
        })
    }

    /// Execute raw SQL query (read-only)
    pub fn query_raw(&self, sql: &str) -> Result<Vec<Vec<Option<String>>>> {
        let mut stmt = self.conn.prepare(sql)?;
        if !stmt.readonly() {
            return Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery));
        }
        let column_count = stmt.column_count();

        let rows = stmt.query_map([], |row| {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                values.push(value_to_text(row.get::<_, rusqlite::types::Value>(i)?));
            }
            Ok(values)
        })?;

        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Get column names for a query
    pub fn query_columns(&self, sql: &str) -> Result<Vec<String>> {
        let stmt = self.conn.prepare(sql)?;
        Ok(stmt.column_names().iter().map(|s| s.to_string()).collect())
    }
}

/// Render a SQLite value as text, keeping NULL distinct
pub(crate) fn value_to_text(value: rusqlite::types::Value) -> Option<String> {
    match value {
        rusqlite::types::Value::Null => None,
        rusqlite::types::Value::Integer(i) => Some(i.to_string()),
        rusqlite::types::Value::Real(f) => Some(f.to_string()),
        rusqlite::types::Value::Text(s) => Some(s),
        rusqlite::types::Value::Blob(_) => Some("<blob>".to_string()),
    }
}

/// Current time as stored in the catalog (UTC, second precision)
pub(crate) fn now_text() -> String {
    format_datetime(&Utc::now())
}

/// Format a timestamp the way the catalog stores it
pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a stored timestamp. Unreadable values are logged and read as the
/// Unix epoch.
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(e) => {
            tracing::warn!(value = s, error = %e, "unreadable timestamp in catalog");
            Utc.timestamp_opt(0, 0).single().unwrap_or_default()
        }
    }
}
