//! Database schema initialization

use rusqlite::params;

use super::{CatalogStore, Result, SCHEMA_VERSION};
use crate::core::identity::ComponentKind;

impl CatalogStore {
    /// Initialize database schema
    pub(super) fn init_schema(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;

        tx.execute_batch(
            r#"
            -- Schema version tracking
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            -- Common attributes of every component
            CREATE TABLE IF NOT EXISTS component (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                mpn TEXT NOT NULL,
                manufacturer TEXT NOT NULL,
                created_on TEXT NOT NULL,
                updated_on TEXT NOT NULL,
                value TEXT,
                package TEXT,
                description TEXT,
                comment_altium TEXT,
                comment_kicad TEXT,
                is_through_hole INTEGER,
                operating_temperature_min TEXT,
                operating_temperature_max TEXT,
                UNIQUE (mpn, manufacturer)
            );
            CREATE INDEX IF NOT EXISTS idx_component_package ON component(package);

            -- Footprints of one CAD tool
            CREATE TABLE IF NOT EXISTS footprint_ref (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                cad_type TEXT NOT NULL CHECK (cad_type IN ('KICAD', 'ALTIUM')),
                alias TEXT,
                reference TEXT NOT NULL,
                path TEXT,
                description TEXT
            );
            CREATE INDEX IF NOT EXISTS idx_footprint_ref_cad ON footprint_ref(cad_type);

            -- Schematic symbols of one CAD tool
            CREATE TABLE IF NOT EXISTS library_ref (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                cad_type TEXT NOT NULL CHECK (cad_type IN ('KICAD', 'ALTIUM')),
                alias TEXT,
                reference TEXT NOT NULL,
                path TEXT,
                description TEXT
            );
            CREATE INDEX IF NOT EXISTS idx_library_ref_cad ON library_ref(cad_type);

            -- Component <-> footprint edges
            CREATE TABLE IF NOT EXISTS component_footprint_asc (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                component_id INTEGER NOT NULL,
                footprint_ref_id INTEGER NOT NULL,
                UNIQUE (component_id, footprint_ref_id),
                FOREIGN KEY (component_id) REFERENCES component(id) ON DELETE CASCADE,
                FOREIGN KEY (footprint_ref_id) REFERENCES footprint_ref(id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_cfa_footprint ON component_footprint_asc(footprint_ref_id);

            -- Component <-> symbol edges (one per CAD tool expected, not enforced)
            CREATE TABLE IF NOT EXISTS component_library_asc (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                component_id INTEGER NOT NULL,
                library_ref_id INTEGER NOT NULL,
                created_on TEXT NOT NULL,
                FOREIGN KEY (component_id) REFERENCES component(id) ON DELETE CASCADE,
                FOREIGN KEY (library_ref_id) REFERENCES library_ref(id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_cla_component ON component_library_asc(component_id);
            CREATE INDEX IF NOT EXISTS idx_cla_library ON component_library_asc(library_ref_id);

            -- Catalog metadata (materialized view fingerprints)
            CREATE TABLE IF NOT EXISTS catalog_meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;

        for kind in ComponentKind::all() {
            tx.execute_batch(&type_table_sql(*kind))?;
        }

        tx.execute(
            "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;

        tx.commit()?;
        tracing::debug!(version = SCHEMA_VERSION, "initialized catalog schema");
        Ok(())
    }
}

/// DDL of the attribute table of one component kind
fn type_table_sql(kind: ComponentKind) -> String {
    let columns: String = kind
        .attribute_columns()
        .iter()
        .map(|c| format!("                {} TEXT,\n", c.column))
        .collect();

    format!(
        "CREATE TABLE IF NOT EXISTS {table} (\n                id INTEGER PRIMARY KEY,\n{columns}                FOREIGN KEY (id) REFERENCES component(id) ON DELETE CASCADE\n            );",
        table = kind.table(),
        columns = columns,
    )
}
