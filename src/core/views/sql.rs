//! Library views materialized as SQLite views
//!
//! CAD tools that read the catalog through a database-library driver query
//! these views directly. The generated SQL follows the same rank-then-project
//! pivot and newest-symbol tie-break as the in-process projector.

use rusqlite::{params, OptionalExtension, TransactionBehavior};
use sha2::{Digest, Sha256};

use super::catalog::{self, ViewDefinition, COMMON_LABELS};
use crate::core::identity::CadType;
use crate::core::pivot::FOOTPRINT_DELIMITER;
use crate::core::store::{CatalogStore, Result};

/// Quote an SQL identifier
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote an SQL string literal
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Label expression of a footprint or symbol row aliased `alias`
fn label_sql(cad: CadType, table_alias: &str) -> String {
    match cad {
        CadType::KiCad => format!(
            "CASE WHEN {t}.alias IS NOT NULL AND {t}.alias <> '' \
             THEN {t}.alias || ':' || {t}.reference ELSE {t}.reference END",
            t = table_alias
        ),
        CadType::Altium => format!("{}.reference", table_alias),
    }
}

/// `CREATE VIEW` statement of a library view with `slots` footprint slots
pub fn create_view_sql(view: &ViewDefinition, slots: usize) -> String {
    let slots = slots.max(1);
    let cad = quote_literal(view.cad.as_str());

    let pivot_columns: Vec<String> = (1..=slots)
        .map(|rank| {
            format!(
                "        MAX(CASE WHEN rank = {rank} THEN label END) AS footprint_{rank}"
            )
        })
        .collect();
    // Ranks fill slots from the first one, so every slot after the first
    // contributes a delimiter only when it is set. `'x' || NULL` is NULL.
    let delimiter = quote_literal(&FOOTPRINT_DELIMITER.to_string());
    let joined_slots = (2..=slots)
        .map(|rank| format!("COALESCE({} || p.footprint_{}, '')", delimiter, rank))
        .fold("COALESCE(p.footprint_1, '')".to_string(), |acc, slot| {
            format!("{} || {}", acc, slot)
        });

    let base = [
        "c.mpn".to_string(),
        "c.value".to_string(),
        "c.manufacturer".to_string(),
        "c.created_on".to_string(),
        "c.updated_on".to_string(),
        "c.package".to_string(),
        "c.description".to_string(),
        format!("c.{}", view.cad.comment_column()),
        "c.operating_temperature_min".to_string(),
        "c.operating_temperature_max".to_string(),
        "s.label".to_string(),
        joined_slots,
    ];

    let mut select: Vec<String> = base
        .iter()
        .zip(COMMON_LABELS)
        .map(|(expr, label)| format!("    {} AS {}", expr, quote_ident(label)))
        .collect();
    select.extend(
        view.kind
            .attribute_columns()
            .iter()
            .map(|c| format!("    t.{} AS {}", c.column, quote_ident(c.label))),
    );

    let filter = match view.package {
        Some(package) => format!("\nWHERE c.package = {}", quote_literal(package)),
        None => String::new(),
    };

    format!(
        "CREATE VIEW {name} AS
WITH ranked AS (
    SELECT a.component_id,
        {footprint_label} AS label,
        ROW_NUMBER() OVER (PARTITION BY a.component_id ORDER BY f.id) AS rank
    FROM (SELECT DISTINCT component_id, footprint_ref_id FROM component_footprint_asc) a
    JOIN footprint_ref f ON f.id = a.footprint_ref_id
    WHERE f.cad_type = {cad}
),
pivot AS (
    SELECT component_id,
{pivot_columns}
    FROM ranked
    GROUP BY component_id
),
symbol AS (
    SELECT a.component_id,
        {symbol_label} AS label,
        ROW_NUMBER() OVER (PARTITION BY a.component_id ORDER BY a.created_on DESC, a.id DESC) AS pick
    FROM component_library_asc a
    JOIN library_ref l ON l.id = a.library_ref_id
    WHERE l.cad_type = {cad}
)
SELECT
{select}
FROM component c
JOIN {table} t ON t.id = c.id
LEFT JOIN pivot p ON p.component_id = c.id
LEFT JOIN symbol s ON s.component_id = c.id AND s.pick = 1{filter}
ORDER BY c.id DESC",
        name = quote_ident(view.name),
        footprint_label = label_sql(view.cad, "f"),
        symbol_label = label_sql(view.cad, "l"),
        cad = cad,
        pivot_columns = pivot_columns.join(",\n"),
        select = select.join(",\n"),
        table = view.kind.table(),
        filter = filter,
    )
}

/// `DROP VIEW` statement of a library view
pub fn drop_view_sql(view: &ViewDefinition) -> String {
    format!("DROP VIEW IF EXISTS {}", quote_ident(view.name))
}

/// SHA-256 of a view definition, hex encoded
pub fn fingerprint(sql: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(sql.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn meta_key(view: &ViewDefinition) -> String {
    format!("view:{}", view.name)
}

/// Outcome of a materialization pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeStats {
    pub created: usize,
    pub replaced: usize,
    pub unchanged: usize,
}

/// Creates and drops the catalog's library views inside the store
pub struct ViewMaterializer<'a> {
    store: &'a mut CatalogStore,
    slots: usize,
}

impl<'a> ViewMaterializer<'a> {
    pub fn new(store: &'a mut CatalogStore, slots: usize) -> Self {
        Self { store, slots }
    }

    /// Create or replace every library view whose definition changed
    pub fn materialize(&mut self) -> Result<MaterializeStats> {
        let mut stats = MaterializeStats::default();
        let tx = self
            .store
            .conn_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        for view in catalog::all() {
            let sql = create_view_sql(view, self.slots);
            let print = fingerprint(&sql);
            let key = meta_key(view);

            let stored: Option<String> = tx
                .query_row(
                    "SELECT value FROM catalog_meta WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()?;
            let exists = tx
                .query_row(
                    "SELECT 1 FROM sqlite_master WHERE type = 'view' AND name = ?1",
                    params![view.name],
                    |_| Ok(()),
                )
                .optional()?
                .is_some();

            if exists && stored.as_deref() == Some(print.as_str()) {
                stats.unchanged += 1;
                continue;
            }

            tx.execute_batch(&drop_view_sql(view))?;
            tx.execute_batch(&sql)?;
            tx.execute(
                "INSERT OR REPLACE INTO catalog_meta (key, value) VALUES (?1, ?2)",
                params![key, print],
            )?;

            if exists {
                stats.replaced += 1;
            } else {
                stats.created += 1;
            }
            tracing::debug!(view = view.name, replaced = exists, "materialized view");
        }

        tx.commit()?;
        Ok(stats)
    }

    /// Drop every library view. Returns how many existed.
    pub fn drop_all(&mut self) -> Result<usize> {
        let tx = self
            .store
            .conn_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut dropped = 0;
        for view in catalog::all() {
            let exists = tx
                .query_row(
                    "SELECT 1 FROM sqlite_master WHERE type = 'view' AND name = ?1",
                    params![view.name],
                    |_| Ok(()),
                )
                .optional()?
                .is_some();
            if exists {
                tx.execute_batch(&drop_view_sql(view))?;
                dropped += 1;
            }
            tx.execute(
                "DELETE FROM catalog_meta WHERE key = ?1",
                params![meta_key(view)],
            )?;
        }

        tx.commit()?;
        Ok(dropped)
    }
}
