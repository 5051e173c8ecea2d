//! Footprint references and the component/footprint association
//!
//! Footprints belong to one CAD tool. A component may carry any number of
//! footprints of each tool; views read them back per tool, ordered by
//! footprint id, and hand them to the column pivot.

use rusqlite::{params, Connection, TransactionBehavior};

use crate::core::identity::CadType;
use crate::core::store::references::{self, cad_from_column, RefTable};
use crate::core::store::{kind_of, CatalogStore, Result, StoreError};
use crate::entities::{FootprintRef, LibraryObjectDraft};

/// One footprint of one component, rendered for a CAD tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FootprintEntry {
    pub component_id: i64,
    pub footprint_id: i64,
    pub label: String,
}

impl CatalogStore {
    /// Register a footprint reference
    pub fn create_footprint(&self, draft: &LibraryObjectDraft) -> Result<FootprintRef> {
        let footprint = references::insert_ref(self.conn(), RefTable::Footprint, draft)?;
        tracing::debug!(id = footprint.id, label = %footprint.label(), "created footprint");
        Ok(footprint)
    }

    pub fn get_footprint(&self, id: i64) -> Result<FootprintRef> {
        references::get_ref(self.conn(), RefTable::Footprint, id)
    }

    /// List footprint references, optionally for one CAD tool
    pub fn list_footprints(&self, cad: Option<CadType>) -> Result<Vec<FootprintRef>> {
        references::list_refs(self.conn(), RefTable::Footprint, cad)
    }

    /// Attach footprints to a component.
    ///
    /// Every id must exist. Footprints already attached are skipped, so the
    /// call is idempotent. Returns the ids attached to the component
    /// afterwards.
    pub fn attach_footprints(&mut self, component_id: i64, footprint_ids: &[i64]) -> Result<Vec<i64>> {
        let tx = self
            .conn_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if kind_of(&tx, component_id)?.is_none() {
            return Err(StoreError::ComponentNotFound(component_id));
        }

        let mut added = 0;
        for &footprint_id in footprint_ids {
            if !references::ref_exists(&tx, RefTable::Footprint, footprint_id)? {
                return Err(StoreError::FootprintNotFound(footprint_id));
            }
            added += tx.execute(
                "INSERT OR IGNORE INTO component_footprint_asc (component_id, footprint_ref_id)
                 VALUES (?1, ?2)",
                params![component_id, footprint_id],
            )?;
        }

        let attached = footprint_ids_for(&tx, component_id)?;
        tx.commit()?;

        tracing::debug!(
            component_id,
            added,
            skipped = footprint_ids.len() - added,
            "attached footprints"
        );
        Ok(attached)
    }

    /// Remove one footprint from a component. Returns false if it was not
    /// attached; a missing component is an error.
    pub fn detach_footprint(&mut self, component_id: i64, footprint_id: i64) -> Result<bool> {
        let tx = self
            .conn_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if kind_of(&tx, component_id)?.is_none() {
            return Err(StoreError::ComponentNotFound(component_id));
        }
        let removed = tx.execute(
            "DELETE FROM component_footprint_asc WHERE component_id = ?1 AND footprint_ref_id = ?2",
            params![component_id, footprint_id],
        )?;
        tx.commit()?;
        Ok(removed > 0)
    }

    /// Footprint ids of a component, all CAD tools, ascending
    pub fn footprint_ids_for(&self, component_id: i64) -> Result<Vec<i64>> {
        footprint_ids_for(self.conn(), component_id)
    }

    /// Footprint labels of one component for one CAD tool, in slot order
    pub fn footprint_labels(&self, component_id: i64, cad: CadType) -> Result<Vec<String>> {
        Ok(footprint_entries(self.conn(), cad)?
            .into_iter()
            .filter(|e| e.component_id == component_id)
            .map(|e| e.label)
            .collect())
    }

    /// Footprint entries of every component for one CAD tool
    pub fn footprint_entries(&self, cad: CadType) -> Result<Vec<FootprintEntry>> {
        footprint_entries(self.conn(), cad)
    }
}

fn footprint_ids_for(conn: &Connection, component_id: i64) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare(
        "SELECT footprint_ref_id FROM component_footprint_asc
         WHERE component_id = ?1
         ORDER BY footprint_ref_id",
    )?;
    let ids = stmt.query_map(params![component_id], |row| row.get(0))?;
    Ok(ids.collect::<rusqlite::Result<Vec<i64>>>()?)
}

/// Component/footprint pairs for one CAD tool, ordered by footprint id then
/// component id
pub(crate) fn footprint_entries(conn: &Connection, cad: CadType) -> Result<Vec<FootprintEntry>> {
    let mut stmt = conn.prepare(
        "SELECT a.component_id, f.id, f.cad_type, f.alias, f.reference
         FROM component_footprint_asc a
         JOIN footprint_ref f ON f.id = a.footprint_ref_id
         WHERE f.cad_type = ?1
         ORDER BY f.id, a.component_id",
    )?;

    let rows = stmt.query_map(params![cad.as_str()], |row| {
        let cad = cad_from_column(row, 2)?;
        let alias: Option<String> = row.get(3)?;
        let reference: String = row.get(4)?;
        Ok(FootprintEntry {
            component_id: row.get(0)?,
            footprint_id: row.get(1)?,
            label: cad.label(alias.as_deref(), &reference),
        })
    })?;

    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}
