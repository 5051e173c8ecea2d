//! Symbol references and the component/symbol association
//!
//! A component is expected to carry one symbol per CAD tool, but the
//! association table does not enforce it. When several candidates exist the
//! most recently created association wins (`created_on` descending, then
//! association id descending), and the component is reported as ambiguous.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use rusqlite::{params, Connection, TransactionBehavior};

use crate::core::identity::CadType;
use crate::core::store::references::{self, cad_from_column, RefTable};
use crate::core::store::{kind_of, now_text, CatalogStore, Result, StoreError};
use crate::entities::{LibraryObjectDraft, LibraryRef};

/// A symbol association that may represent a component in a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolCandidate {
    pub component_id: i64,
    pub association_id: i64,
    pub library_id: i64,
    pub created_on: String,
    pub label: String,
}

impl SymbolCandidate {
    /// Ordering of the tie-break: greater wins
    fn recency(&self, other: &Self) -> Ordering {
        self.created_on
            .cmp(&other.created_on)
            .then(self.association_id.cmp(&other.association_id))
    }
}

/// Winning symbol per component, plus candidate counts where there was a choice
#[derive(Debug, Clone, Default)]
pub struct SymbolSelection {
    pub selected: HashMap<i64, SymbolCandidate>,
    /// component id -> number of candidates, only for components with more than one
    pub ambiguous: BTreeMap<i64, usize>,
}

impl SymbolSelection {
    pub fn label_for(&self, component_id: i64) -> Option<&str> {
        self.selected
            .get(&component_id)
            .map(|c| c.label.as_str())
    }
}

/// Pick one symbol per component
pub fn select_symbols(candidates: Vec<SymbolCandidate>) -> SymbolSelection {
    let mut selection = SymbolSelection::default();
    let mut counts: HashMap<i64, usize> = HashMap::new();

    for candidate in candidates {
        *counts.entry(candidate.component_id).or_default() += 1;
        let wins = selection
            .selected
            .get(&candidate.component_id)
            .map_or(true, |current| current.recency(&candidate) == Ordering::Less);
        if wins {
            selection.selected.insert(candidate.component_id, candidate);
        }
    }

    selection.ambiguous = counts.into_iter().filter(|(_, n)| *n > 1).collect();
    selection
}

impl CatalogStore {
    /// Register a schematic symbol reference
    pub fn create_library_ref(&self, draft: &LibraryObjectDraft) -> Result<LibraryRef> {
        let symbol = references::insert_ref(self.conn(), RefTable::Library, draft)?;
        tracing::debug!(id = symbol.id, label = %symbol.label(), "created symbol");
        Ok(symbol)
    }

    pub fn get_library_ref(&self, id: i64) -> Result<LibraryRef> {
        references::get_ref(self.conn(), RefTable::Library, id)
    }

    pub fn list_library_refs(&self, cad: Option<CadType>) -> Result<Vec<LibraryRef>> {
        references::list_refs(self.conn(), RefTable::Library, cad)
    }

    /// Associate a symbol with a component. Returns the association id.
    ///
    /// A component that already has a symbol of the same CAD tool keeps it;
    /// views will prefer the new association since it is the most recent.
    pub fn attach_symbol(&mut self, component_id: i64, library_id: i64) -> Result<i64> {
        let tx = self
            .conn_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if kind_of(&tx, component_id)?.is_none() {
            return Err(StoreError::ComponentNotFound(component_id));
        }
        let symbol = references::get_ref(&tx, RefTable::Library, library_id)?;

        let existing: i64 = tx.query_row(
            "SELECT COUNT(*) FROM component_library_asc a
             JOIN library_ref l ON l.id = a.library_ref_id
             WHERE a.component_id = ?1 AND l.cad_type = ?2",
            params![component_id, symbol.cad.as_str()],
            |row| row.get(0),
        )?;
        if existing > 0 {
            tracing::warn!(
                component_id,
                cad = %symbol.cad,
                existing,
                "component already has a symbol for this CAD tool, newest association wins"
            );
        }

        tx.execute(
            "INSERT INTO component_library_asc (component_id, library_ref_id, created_on)
             VALUES (?1, ?2, ?3)",
            params![component_id, library_id, now_text()],
        )?;
        let association_id = tx.last_insert_rowid();
        tx.commit()?;

        tracing::debug!(component_id, library_id, association_id, "attached symbol");
        Ok(association_id)
    }

    /// Remove every association between a component and a symbol.
    /// Returns false if there was none; a missing component is an error.
    pub fn detach_symbol(&mut self, component_id: i64, library_id: i64) -> Result<bool> {
        let tx = self
            .conn_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if kind_of(&tx, component_id)?.is_none() {
            return Err(StoreError::ComponentNotFound(component_id));
        }
        let removed = tx.execute(
            "DELETE FROM component_library_asc WHERE component_id = ?1 AND library_ref_id = ?2",
            params![component_id, library_id],
        )?;
        tx.commit()?;
        Ok(removed > 0)
    }

    /// Symbols associated with a component, all CAD tools, by association order
    pub fn symbols_for(&self, component_id: i64) -> Result<Vec<LibraryRef>> {
        let mut ids_stmt = self.conn().prepare(
            "SELECT library_ref_id FROM component_library_asc WHERE component_id = ?1 ORDER BY id",
        )?;
        let ids = ids_stmt
            .query_map(params![component_id], |row| row.get::<_, i64>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        ids.into_iter()
            .map(|id| references::get_ref(self.conn(), RefTable::Library, id))
            .collect()
    }

    /// The symbol a view shows for a component and CAD tool
    pub fn selected_symbol(&self, component_id: i64, cad: CadType) -> Result<Option<LibraryRef>> {
        let candidates = symbol_candidates(self.conn(), cad)?
            .into_iter()
            .filter(|c| c.component_id == component_id)
            .collect();
        match select_symbols(candidates).selected.remove(&component_id) {
            Some(winner) => Ok(Some(self.get_library_ref(winner.library_id)?)),
            None => Ok(None),
        }
    }
}

/// Every symbol association of one CAD tool
pub(crate) fn symbol_candidates(conn: &Connection, cad: CadType) -> Result<Vec<SymbolCandidate>> {
    let mut stmt = conn.prepare(
        "SELECT a.component_id, a.id, l.id, a.created_on, l.cad_type, l.alias, l.reference
         FROM component_library_asc a
         JOIN library_ref l ON l.id = a.library_ref_id
         WHERE l.cad_type = ?1
         ORDER BY a.component_id, a.id",
    )?;

    let rows = stmt.query_map(params![cad.as_str()], |row| {
        let cad = cad_from_column(row, 4)?;
        let alias: Option<String> = row.get(5)?;
        let reference: String = row.get(6)?;
        Ok(SymbolCandidate {
            component_id: row.get(0)?,
            association_id: row.get(1)?,
            library_id: row.get(2)?,
            created_on: row.get(3)?,
            label: cad.label(alias.as_deref(), &reference),
        })
    })?;

    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{resistor_draft, set_symbol_association_time, symbol};

    fn candidate(component_id: i64, association_id: i64, created_on: &str, label: &str) -> SymbolCandidate {
        SymbolCandidate {
            component_id,
            association_id,
            library_id: association_id,
            created_on: created_on.to_string(),
            label: label.to_string(),
        }
    }

    #[test]
    fn test_select_prefers_latest_created() {
        let selection = select_symbols(vec![
            candidate(1, 5, "2024-01-02T00:00:00Z", "new"),
            candidate(1, 9, "2024-01-01T00:00:00Z", "old"),
            candidate(2, 3, "2024-01-01T00:00:00Z", "only"),
        ]);
        assert_eq!(selection.label_for(1), Some("new"));
        assert_eq!(selection.label_for(2), Some("only"));
        assert_eq!(selection.ambiguous.get(&1), Some(&2));
        assert!(!selection.ambiguous.contains_key(&2));
    }

    #[test]
    fn test_select_breaks_time_ties_by_association_id() {
        let ts = "2024-01-01T00:00:00Z";
        let forward = select_symbols(vec![candidate(1, 1, ts, "a"), candidate(1, 2, ts, "b")]);
        let backward = select_symbols(vec![candidate(1, 2, ts, "b"), candidate(1, 1, ts, "a")]);
        assert_eq!(forward.label_for(1), Some("b"));
        assert_eq!(backward.label_for(1), Some("b"));
    }

    #[test]
    fn test_attach_symbol_and_select() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        let c = store.create_component(&resistor_draft("R1")).unwrap();
        let old = symbol(&store, CadType::KiCad, "Device", "R");
        let new = symbol(&store, CadType::KiCad, "Device", "R_Small");
        let altium = symbol(&store, CadType::Altium, "", "RES");

        store.attach_symbol(c.id, old).unwrap();
        store.attach_symbol(c.id, altium).unwrap();
        store.attach_symbol(c.id, new).unwrap();
        set_symbol_association_time(&store, old, "2024-01-01T00:00:00Z");
        set_symbol_association_time(&store, new, "2024-06-01T00:00:00Z");

        let kicad = store.selected_symbol(c.id, CadType::KiCad).unwrap().unwrap();
        assert_eq!(kicad.label(), "Device:R_Small");
        let altium_sym = store.selected_symbol(c.id, CadType::Altium).unwrap().unwrap();
        assert_eq!(altium_sym.label(), "RES");
        assert_eq!(store.symbols_for(c.id).unwrap().len(), 3);
    }

    #[test]
    fn test_attach_symbol_validates_ids() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        let c = store.create_component(&resistor_draft("R1")).unwrap();
        let s = symbol(&store, CadType::KiCad, "Device", "R");

        assert!(matches!(
            store.attach_symbol(c.id, s + 10),
            Err(StoreError::LibraryNotFound(_))
        ));
        assert!(matches!(
            store.attach_symbol(c.id + 10, s),
            Err(StoreError::ComponentNotFound(_))
        ));
    }

    #[test]
    fn test_detach_symbol() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        let c = store.create_component(&resistor_draft("R1")).unwrap();
        let s = symbol(&store, CadType::KiCad, "Device", "R");
        store.attach_symbol(c.id, s).unwrap();

        assert!(store.detach_symbol(c.id, s).unwrap());
        assert!(store.selected_symbol(c.id, CadType::KiCad).unwrap().is_none());
        assert!(!store.detach_symbol(c.id, s).unwrap());
    }

    #[test]
    fn test_detach_symbol_from_missing_component() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        let s = symbol(&store, CadType::KiCad, "Device", "R");
        assert!(matches!(
            store.detach_symbol(99, s),
            Err(StoreError::ComponentNotFound(99))
        ));
    }
}
