//! In-process evaluation of a library view
//!
//! One evaluation:
//! 1. Opens a read snapshot of the catalog
//! 2. Selects the members (component joined with the view's attribute table)
//! 3. Pivots the CAD tool's footprints into slots
//! 4. Picks one symbol per member
//!
//! and assembles one row per member, newest component first.

use std::collections::HashSet;
use std::io::Write;

use rusqlite::{params, Connection};
use serde::Serialize;

use super::catalog::{self, ViewDefinition, FOOTPRINTS_COLUMN, SYMBOL_COLUMN};
use crate::core::footprints::footprint_entries;
use crate::core::library::{select_symbols, symbol_candidates};
use crate::core::pivot::{FootprintPivot, Overflow};
use crate::core::store::{CatalogStore, Result, StoreError};

/// One row of a projected view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectedRow {
    pub component_id: i64,
    /// Pivoted footprint labels before joining
    pub footprint_slots: Vec<Option<String>>,
    /// Cells aligned with `Projection::columns`
    pub values: Vec<Option<String>>,
}

/// Data-quality signals raised while projecting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectionDiagnostics {
    /// Members with more footprints than slots
    pub truncated: Vec<TruncatedFootprints>,
    /// Members with several symbols for the view's CAD tool
    pub ambiguous_symbols: Vec<AmbiguousSymbol>,
}

impl ProjectionDiagnostics {
    pub fn is_clean(&self) -> bool {
        self.truncated.is_empty() && self.ambiguous_symbols.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TruncatedFootprints {
    pub component_id: i64,
    pub total: usize,
    pub discarded: usize,
}

impl From<Overflow> for TruncatedFootprints {
    fn from(o: Overflow) -> Self {
        Self {
            component_id: o.component_id,
            total: o.total,
            discarded: o.discarded,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AmbiguousSymbol {
    pub component_id: i64,
    pub candidates: usize,
}

/// A fully evaluated view
#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    pub view: ViewDefinition,
    pub columns: Vec<String>,
    pub rows: Vec<ProjectedRow>,
    pub diagnostics: ProjectionDiagnostics,
}

impl Projection {
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    pub fn row_for(&self, component_id: i64) -> Option<&ProjectedRow> {
        self.rows.iter().find(|r| r.component_id == component_id)
    }

    /// Cell of a component's row under a column label
    pub fn value(&self, component_id: i64, label: &str) -> Option<&str> {
        let idx = self.column_index(label)?;
        self.row_for(component_id)?.values.get(idx)?.as_deref()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the projection as CSV with a header row; nulls become empty cells
    pub fn to_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row.values.iter().map(|v| v.as_deref().unwrap_or("")))?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Rows as JSON objects keyed by column label; nulls stay null
    pub fn to_json(&self) -> serde_json::Value {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let object: serde_json::Map<String, serde_json::Value> = self
                    .columns
                    .iter()
                    .zip(&row.values)
                    .map(|(label, value)| {
                        let value = value
                            .clone()
                            .map_or(serde_json::Value::Null, serde_json::Value::String);
                        (label.clone(), value)
                    })
                    .collect();
                serde_json::Value::Object(object)
            })
            .collect();
        serde_json::Value::Array(rows)
    }
}

/// Evaluates library views against a catalog
pub struct ViewProjector<'a> {
    store: &'a CatalogStore,
    pivot: FootprintPivot,
}

impl<'a> ViewProjector<'a> {
    pub fn new(store: &'a CatalogStore) -> Self {
        Self {
            store,
            pivot: FootprintPivot::default(),
        }
    }

    /// Projector with a non-default number of footprint slots
    pub fn with_slots(store: &'a CatalogStore, slots: usize) -> Self {
        Self {
            store,
            pivot: FootprintPivot::new(slots),
        }
    }

    /// Evaluate a view by name
    pub fn project_named(&self, name: &str) -> Result<Projection> {
        let view = catalog::find(name).ok_or_else(|| StoreError::ViewNotFound(name.to_string()))?;
        self.project(view)
    }

    /// Evaluate a view from one consistent snapshot of the catalog
    pub fn project(&self, view: &ViewDefinition) -> Result<Projection> {
        let tx = self.store.snapshot()?;

        let members = member_rows(&tx, view)?;
        let pivot = self.pivot.pivot(footprint_entries(&tx, view.cad)?);
        let symbols = select_symbols(symbol_candidates(&tx, view.cad)?);

        tx.commit()?;

        let member_ids: HashSet<i64> = members.iter().map(|m| m.0).collect();
        let mut diagnostics = ProjectionDiagnostics::default();

        for overflow in pivot.overflows() {
            if !member_ids.contains(&overflow.component_id) {
                continue;
            }
            tracing::warn!(
                view = view.name,
                component_id = overflow.component_id,
                total = overflow.total,
                discarded = overflow.discarded,
                "footprints exceed slot capacity, extra footprints dropped"
            );
            diagnostics.truncated.push(overflow.into());
        }

        for (&component_id, &candidates) in &symbols.ambiguous {
            if !member_ids.contains(&component_id) {
                continue;
            }
            tracing::warn!(
                view = view.name,
                component_id,
                candidates,
                "several symbols for one CAD tool, using the newest association"
            );
            diagnostics.ambiguous_symbols.push(AmbiguousSymbol {
                component_id,
                candidates,
            });
        }

        let rows: Vec<ProjectedRow> = members
            .into_iter()
            .map(|(component_id, mut values)| {
                let slots = pivot.row(component_id);
                values[SYMBOL_COLUMN] = symbols.label_for(component_id).map(String::from);
                values[FOOTPRINTS_COLUMN] = Some(slots.display());
                ProjectedRow {
                    component_id,
                    footprint_slots: slots.slots,
                    values,
                }
            })
            .collect();

        tracing::debug!(view = view.name, rows = rows.len(), "projected view");

        Ok(Projection {
            view: *view,
            columns: view.columns().into_iter().map(String::from).collect(),
            rows,
            diagnostics,
        })
    }
}

/// Members of a view with every cell filled except Symbol and Footprints
fn member_rows(conn: &Connection, view: &ViewDefinition) -> Result<Vec<(i64, Vec<Option<String>>)>> {
    let attributes: Vec<String> = view
        .kind
        .attribute_columns()
        .iter()
        .map(|c| format!("t.{}", c.column))
        .collect();
    let mut select = vec![
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
        // Symbol and Footprints are filled after the joins
        "NULL".to_string(),
        "NULL".to_string(),
    ];
    select.extend(attributes);

    let sql = format!(
        "SELECT c.id, {} FROM component c
         JOIN {} t ON t.id = c.id
         WHERE ?1 IS NULL OR c.package = ?1
         ORDER BY c.id DESC",
        select.join(", "),
        view.kind.table()
    );

    let width = select.len();
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![view.package], |row| {
        let id: i64 = row.get(0)?;
        let values = (1..=width)
            .map(|i| row.get::<_, Option<String>>(i))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok((id, values))
    })?;

    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::{CadType, ComponentKind};
    use crate::core::testing::{
        draft_of_kind, footprint, resistor_draft, set_symbol_association_time, symbol,
        transformer_draft,
    };
    use crate::core::views::catalog::find;

    fn view(name: &str) -> &'static ViewDefinition {
        find(name).unwrap()
    }

    #[test]
    fn test_scenario_two_footprints_and_symbol() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        let c = store.create_component(&transformer_draft("750311-019")).unwrap();
        let f1 = footprint(&store, CadType::KiCad, "a", "b");
        let f2 = footprint(&store, CadType::KiCad, "c", "d");
        let s = symbol(&store, CadType::KiCad, "x", "y");
        store.attach_footprints(c.id, &[f2, f1]).unwrap();
        store.attach_symbol(c.id, s).unwrap();

        let projection = ViewProjector::new(&store)
            .project(view("KiCad Transformers"))
            .unwrap();
        assert_eq!(projection.len(), 1);
        assert_eq!(projection.value(c.id, "Footprints"), Some("a:b;c:d"));
        assert_eq!(projection.value(c.id, "Symbol"), Some("x:y"));
        assert_eq!(projection.value(c.id, "Number of Windings"), Some("2"));
        assert_eq!(projection.value(c.id, "Part Number"), Some("750311-019"));
        assert!(projection.diagnostics.is_clean());
    }

    #[test]
    fn test_scenario_no_footprints_no_symbol() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        let c = store
            .create_component(&draft_of_kind(ComponentKind::VoltageRegulatorDcdc, "TPS54331"))
            .unwrap();

        let projection = ViewProjector::new(&store)
            .project(view("KiCad Regulators DCDC"))
            .unwrap();
        let row = projection.row_for(c.id).unwrap();
        assert_eq!(projection.value(c.id, "Footprints"), Some(""));
        assert_eq!(projection.value(c.id, "Symbol"), None);
        assert_eq!(row.footprint_slots, vec![None, None, None, None]);
    }

    #[test]
    fn test_scenario_two_symbols_newest_wins() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        let c = store.create_component(&resistor_draft("R1")).unwrap();
        let older = symbol(&store, CadType::KiCad, "Device", "R_Old");
        let newer = symbol(&store, CadType::KiCad, "Device", "R_New");
        store.attach_symbol(c.id, newer).unwrap();
        store.attach_symbol(c.id, older).unwrap();
        set_symbol_association_time(&store, newer, "2025-02-01T00:00:00Z");
        set_symbol_association_time(&store, older, "2024-02-01T00:00:00Z");

        let projection = ViewProjector::new(&store)
            .project(view("KiCad Resistors"))
            .unwrap();
        assert_eq!(projection.len(), 1);
        assert_eq!(projection.value(c.id, "Symbol"), Some("Device:R_New"));
        assert_eq!(
            projection.diagnostics.ambiguous_symbols,
            vec![AmbiguousSymbol {
                component_id: c.id,
                candidates: 2
            }]
        );
    }

    #[test]
    fn test_fifth_footprint_truncated_with_diagnostic() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        let c = store.create_component(&resistor_draft("R1")).unwrap();
        let ids: Vec<i64> = (1..=5)
            .map(|i| footprint(&store, CadType::KiCad, "lib", &format!("fp{}", i)))
            .collect();
        store.attach_footprints(c.id, &ids).unwrap();

        let projection = ViewProjector::new(&store)
            .project(view("KiCad Resistors"))
            .unwrap();
        assert_eq!(
            projection.value(c.id, "Footprints"),
            Some("lib:fp1;lib:fp2;lib:fp3;lib:fp4")
        );
        assert_eq!(
            projection.diagnostics.truncated,
            vec![TruncatedFootprints {
                component_id: c.id,
                total: 5,
                discarded: 1
            }]
        );
    }

    #[test]
    fn test_one_row_per_component_under_heavy_associations() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        let a = store.create_component(&resistor_draft("R1")).unwrap();
        let b = store.create_component(&resistor_draft("R2")).unwrap();
        let fps: Vec<i64> = (0..6)
            .map(|i| footprint(&store, CadType::KiCad, "lib", &format!("fp{}", i)))
            .collect();
        let syms: Vec<i64> = (0..3)
            .map(|i| symbol(&store, CadType::KiCad, "lib", &format!("s{}", i)))
            .collect();
        for component in [a.id, b.id] {
            store.attach_footprints(component, &fps).unwrap();
            for s in &syms {
                store.attach_symbol(component, *s).unwrap();
            }
        }

        let projection = ViewProjector::new(&store)
            .project(view("KiCad Resistors"))
            .unwrap();
        let ids: Vec<i64> = projection.rows.iter().map(|r| r.component_id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[test]
    fn test_cad_tool_scoping() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        let c = store.create_component(&resistor_draft("R1")).unwrap();
        let kicad = footprint(&store, CadType::KiCad, "Resistor_SMD", "R_0603");
        let altium = footprint(&store, CadType::Altium, "Resistors", "RESC1608X55N");
        let s = symbol(&store, CadType::KiCad, "Device", "R");
        store.attach_footprints(c.id, &[kicad, altium]).unwrap();
        store.attach_symbol(c.id, s).unwrap();

        let projection = ViewProjector::new(&store)
            .project(view("Altium Resistors"))
            .unwrap();
        assert_eq!(projection.value(c.id, "Footprints"), Some("RESC1608X55N"));
        assert_eq!(projection.value(c.id, "Symbol"), None);
        assert_eq!(projection.value(c.id, "Comment"), Some("=Value"));

        let projection = ViewProjector::new(&store)
            .project(view("KiCad Resistors"))
            .unwrap();
        assert_eq!(projection.value(c.id, "Comment"), Some("10k 1%"));
    }

    #[test]
    fn test_membership_follows_attribute_table_and_package() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        let mut r1210 = resistor_draft("R1210");
        r1210.package = Some("1210 (3225 Metric)".to_string());
        let r1210 = store.create_component(&r1210).unwrap();
        let mut r0603 = resistor_draft("R0603");
        r0603.package = Some("0603 (1608 Metric)".to_string());
        store.create_component(&r0603).unwrap();
        store.create_component(&transformer_draft("T1")).unwrap();

        let projector = ViewProjector::new(&store);
        assert_eq!(projector.project(view("KiCad Resistors")).unwrap().len(), 2);
        let sub = projector.project(view("KiCad Resistors 1210")).unwrap();
        assert_eq!(sub.len(), 1);
        assert_eq!(sub.rows[0].component_id, r1210.id);
    }

    #[test]
    fn test_projection_is_idempotent() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        let c = store.create_component(&resistor_draft("R1")).unwrap();
        let f = footprint(&store, CadType::KiCad, "a", "b");
        store.attach_footprints(c.id, &[f]).unwrap();

        let projector = ViewProjector::new(&store);
        let first = projector.project(view("KiCad Resistors")).unwrap();
        let second = projector.project(view("KiCad Resistors")).unwrap();
        assert_eq!(first.rows, second.rows);
    }

    #[test]
    fn test_configured_slot_count() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        let c = store.create_component(&resistor_draft("R1")).unwrap();
        let ids: Vec<i64> = (1..=3)
            .map(|i| footprint(&store, CadType::KiCad, "", &format!("fp{}", i)))
            .collect();
        store.attach_footprints(c.id, &ids).unwrap();

        let projection = ViewProjector::with_slots(&store, 2)
            .project(view("KiCad Resistors"))
            .unwrap();
        assert_eq!(projection.value(c.id, "Footprints"), Some("fp1;fp2"));
        assert_eq!(projection.diagnostics.truncated.len(), 1);
    }

    #[test]
    fn test_unknown_view_name() {
        let store = CatalogStore::open_in_memory().unwrap();
        let err = ViewProjector::new(&store)
            .project_named("KiCad Inductors")
            .unwrap_err();
        assert!(matches!(err, StoreError::ViewNotFound(_)));
    }

    #[test]
    fn test_csv_and_json_exports() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        let c = store.create_component(&resistor_draft("R1")).unwrap();
        let f1 = footprint(&store, CadType::KiCad, "a", "b");
        let f2 = footprint(&store, CadType::KiCad, "c", "d");
        store.attach_footprints(c.id, &[f1, f2]).unwrap();

        let projection = ViewProjector::new(&store)
            .project(view("KiCad Resistors"))
            .unwrap();

        let mut out = Vec::new();
        projection.to_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("Part Number,Value,Manufacturer"));
        assert!(lines.next().unwrap().contains("a:b;c:d"));

        let json = projection.to_json();
        assert_eq!(json[0]["Footprints"], "a:b;c:d");
        assert!(json[0]["Symbol"].is_null());
        assert_eq!(json[0]["Tolerance"], "1%");
    }
}
