//! Shared access to the `footprint_ref` and `library_ref` tables
//!
//! Both tables have the same shape; footprints and symbols differ only in
//! the association table that links them to components.

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{Result, StoreError};
use crate::core::identity::CadType;
use crate::entities::{LibraryObject, LibraryObjectDraft};

/// Which reference table an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RefTable {
    Footprint,
    Library,
}

impl RefTable {
    pub(crate) fn table(&self) -> &'static str {
        match self {
            RefTable::Footprint => "footprint_ref",
            RefTable::Library => "library_ref",
        }
    }

    pub(crate) fn not_found(&self, id: i64) -> StoreError {
        match self {
            RefTable::Footprint => StoreError::FootprintNotFound(id),
            RefTable::Library => StoreError::LibraryNotFound(id),
        }
    }
}

pub(crate) fn insert_ref(
    conn: &Connection,
    table: RefTable,
    draft: &LibraryObjectDraft,
) -> Result<LibraryObject> {
    conn.execute(
        &format!(
            "INSERT INTO {} (cad_type, alias, reference, path, description)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            table.table()
        ),
        params![
            draft.cad.as_str(),
            draft.alias,
            draft.reference,
            draft.path,
            draft.description
        ],
    )?;

    Ok(LibraryObject {
        id: conn.last_insert_rowid(),
        cad: draft.cad,
        alias: draft.alias.clone(),
        reference: draft.reference.clone(),
        path: draft.path.clone(),
        description: draft.description.clone(),
    })
}

pub(crate) fn get_ref(conn: &Connection, table: RefTable, id: i64) -> Result<LibraryObject> {
    conn.query_row(
        &format!(
            "SELECT id, cad_type, alias, reference, path, description FROM {} WHERE id = ?1",
            table.table()
        ),
        params![id],
        ref_from_row,
    )
    .optional()?
    .ok_or_else(|| table.not_found(id))
}

pub(crate) fn list_refs(
    conn: &Connection,
    table: RefTable,
    cad: Option<CadType>,
) -> Result<Vec<LibraryObject>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, cad_type, alias, reference, path, description FROM {}
         WHERE ?1 IS NULL OR cad_type = ?1
         ORDER BY id",
        table.table()
    ))?;
    let rows = stmt.query_map(params![cad.map(|c| c.as_str())], ref_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub(crate) fn ref_exists(conn: &Connection, table: RefTable, id: i64) -> Result<bool> {
    Ok(conn
        .query_row(
            &format!("SELECT 1 FROM {} WHERE id = ?1", table.table()),
            params![id],
            |_| Ok(()),
        )
        .optional()?
        .is_some())
}

/// Read a CAD tool tag from a column
pub(crate) fn cad_from_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<CadType> {
    let tag: String = row.get(idx)?;
    tag.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn ref_from_row(row: &Row<'_>) -> rusqlite::Result<LibraryObject> {
    Ok(LibraryObject {
        id: row.get(0)?,
        cad: cad_from_column(row, 1)?,
        alias: row.get(2)?,
        reference: row.get(3)?,
        path: row.get(4)?,
        description: row.get(5)?,
    })
}
