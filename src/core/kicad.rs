//! KiCad HTTP-library style projections
//!
//! KiCad browses a remote library as categories of parts, each part carrying
//! a symbol id and a map of named fields. These projections produce that
//! shape from the catalog without the HTTP layer.

use std::collections::BTreeMap;

use rusqlite::params;
use serde::Serialize;

use crate::core::footprints::footprint_entries;
use crate::core::identity::{CadType, ComponentKind};
use crate::core::library::{select_symbols, symbol_candidates};
use crate::core::store::{load_component, CatalogStore, Result, StoreError};
use crate::entities::Component;

/// A KiCad library category: one component kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KiCadCategory {
    pub id: usize,
    pub name: String,
    #[serde(skip)]
    pub kind: ComponentKind,
}

/// Every category, sorted by name. Ids are stable across calls.
pub fn categories() -> Vec<KiCadCategory> {
    let mut categories: Vec<KiCadCategory> = ComponentKind::all()
        .iter()
        .enumerate()
        .map(|(idx, kind)| KiCadCategory {
            // ids start at 1
            id: idx + 1,
            name: kind.display_name().to_string(),
            kind: *kind,
        })
        .collect();
    categories.sort_by(|a, b| a.name.cmp(&b.name));
    categories
}

pub fn category(id: usize) -> Option<KiCadCategory> {
    categories().into_iter().find(|c| c.id == id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KiCadPartProperty {
    pub value: String,
    pub visible: bool,
}

impl KiCadPartProperty {
    fn hidden(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            visible: false,
        }
    }
}

/// A part as KiCad's HTTP library expects it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KiCadPart {
    pub id: i64,
    pub name: String,
    #[serde(rename = "symbolIdStr")]
    pub symbol_id: String,
    pub fields: BTreeMap<String, KiCadPartProperty>,
}

impl CatalogStore {
    /// Components of a category that have a KiCad symbol, newest first
    pub fn kicad_category_components(&self, category_id: usize) -> Result<Vec<Component>> {
        let category = category(category_id).ok_or(StoreError::CategoryNotFound(category_id))?;
        tracing::debug!(category_id, kind = %category.kind, "listing category components");

        let tx = self.snapshot()?;
        let ids = {
            let mut stmt = tx.prepare(&format!(
                "SELECT DISTINCT c.id FROM component c
                 JOIN {} t ON t.id = c.id
                 JOIN component_library_asc a ON a.component_id = c.id
                 JOIN library_ref l ON l.id = a.library_ref_id
                 WHERE l.cad_type = ?1
                 ORDER BY c.id DESC",
                category.kind.table()
            ))?;
            let rows = stmt.query_map(params![CadType::KiCad.as_str()], |row| row.get::<_, i64>(0))?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        };

        let mut components = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(component) = load_component(&tx, id)? {
                components.push(component);
            }
        }
        tx.commit()?;
        Ok(components)
    }

    /// KiCad part of a component: its KiCad symbol plus every known field
    pub fn kicad_part(&self, component_id: i64) -> Result<KiCadPart> {
        let tx = self.snapshot()?;

        let component =
            load_component(&tx, component_id)?.ok_or(StoreError::ComponentNotFound(component_id))?;

        let candidates = symbol_candidates(&tx, CadType::KiCad)?
            .into_iter()
            .filter(|c| c.component_id == component_id)
            .collect();
        let symbol = select_symbols(candidates)
            .selected
            .remove(&component_id)
            .ok_or(StoreError::MissingSymbol(component_id, CadType::KiCad))?;

        let footprint = footprint_entries(&tx, CadType::KiCad)?
            .into_iter()
            .find(|e| e.component_id == component_id);
        tx.commit()?;

        let mut fields = part_fields(&component)?;
        if let Some(comment) = &component.comment_kicad {
            fields.insert(
                "Comment".to_string(),
                KiCadPartProperty {
                    value: comment.clone(),
                    visible: true,
                },
            );
        }
        if let Some(footprint) = footprint {
            fields.insert("Footprint".to_string(), KiCadPartProperty::hidden(footprint.label));
        }

        Ok(KiCadPart {
            id: component.id,
            name: component.mpn,
            symbol_id: symbol.label,
            fields,
        })
    }
}

/// Hidden fields for every non-null base and type attribute
fn part_fields(component: &Component) -> Result<BTreeMap<String, KiCadPartProperty>> {
    let mut fields = BTreeMap::new();
    let mut put = |column: &str, value: Option<String>| {
        if let Some(value) = value {
            fields.insert(title_case(column), KiCadPartProperty::hidden(value));
        }
    };

    put("mpn", Some(component.mpn.clone()));
    put("manufacturer", Some(component.manufacturer.clone()));
    put("value", component.value.clone());
    put("package", component.package.clone());
    put("description", component.description.clone());
    put(
        "is_through_hole",
        component
            .is_through_hole
            .map(|b| if b { "True" } else { "False" }.to_string()),
    );
    put("operating_temperature_min", component.operating_temperature_min.clone());
    put("operating_temperature_max", component.operating_temperature_max.clone());
    put(
        "created_on",
        Some(crate::core::store::format_datetime(&component.created_on)),
    );
    put(
        "updated_on",
        Some(crate::core::store::format_datetime(&component.updated_on)),
    );

    let columns = component.kind().attribute_columns();
    for (column, value) in columns.iter().zip(component.attributes.values()?) {
        put(column.column, value);
    }

    Ok(fields)
}

/// `operating_temperature_min` -> `Operating Temperature Min`
fn title_case(column: &str) -> String {
    column
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{footprint, resistor_draft, symbol, transformer_draft};

    #[test]
    fn test_categories_sorted_with_stable_ids() {
        let cats = categories();
        assert_eq!(cats.len(), ComponentKind::all().len());
        let names: Vec<&str> = cats.iter().map(|c| c.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        let resistor = cats.iter().find(|c| c.kind == ComponentKind::Resistor).unwrap();
        assert_eq!(resistor.id, 1);
        assert_eq!(category(1).unwrap().kind, ComponentKind::Resistor);
        assert!(category(0).is_none());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("operating_temperature_min"), "Operating Temperature Min");
        assert_eq!(title_case("mpn"), "Mpn");
        assert_eq!(title_case("rds_on"), "Rds On");
    }

    #[test]
    fn test_category_components_require_kicad_symbol() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        let with = store.create_component(&resistor_draft("R1")).unwrap();
        let without = store.create_component(&resistor_draft("R2")).unwrap();
        let other = store.create_component(&transformer_draft("T1")).unwrap();
        let k = symbol(&store, CadType::KiCad, "Device", "R");
        let a = symbol(&store, CadType::Altium, "", "RES");
        store.attach_symbol(with.id, k).unwrap();
        store.attach_symbol(with.id, k).unwrap();
        store.attach_symbol(without.id, a).unwrap();
        store.attach_symbol(other.id, k).unwrap();

        let parts = store.kicad_category_components(1).unwrap();
        let ids: Vec<i64> = parts.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![with.id]);

        assert!(matches!(
            store.kicad_category_components(99),
            Err(StoreError::CategoryNotFound(99))
        ));
    }

    #[test]
    fn test_part_fields() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        let mut draft = resistor_draft("RC1210");
        draft.package = Some("1210 (3225 Metric)".to_string());
        let c = store.create_component(&draft).unwrap();
        let s = symbol(&store, CadType::KiCad, "Device", "R");
        let f2 = footprint(&store, CadType::KiCad, "Resistor_SMD", "R_1210");
        let f_alt = footprint(&store, CadType::Altium, "", "RESC3225");
        store.attach_symbol(c.id, s).unwrap();
        store.attach_footprints(c.id, &[f_alt, f2]).unwrap();

        let part = store.kicad_part(c.id).unwrap();
        assert_eq!(part.name, "RC1210");
        assert_eq!(part.symbol_id, "Device:R");
        assert_eq!(part.fields["Mpn"].value, "RC1210");
        assert_eq!(part.fields["Power Max"], KiCadPartProperty::hidden("0.5W"));
        assert_eq!(part.fields["Package"].value, "1210 (3225 Metric)");
        assert_eq!(
            part.fields["Comment"],
            KiCadPartProperty {
                value: "10k 1%".to_string(),
                visible: true
            }
        );
        assert_eq!(part.fields["Footprint"].value, "Resistor_SMD:R_1210");
        assert!(!part.fields.contains_key("Comment Altium"));
        assert!(!part.fields.contains_key("Description"));
        assert!(!part.fields.contains_key("Id"));

        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["symbolIdStr"], "Device:R");
    }

    #[test]
    fn test_part_requires_symbol_and_component() {
        let mut store = CatalogStore::open_in_memory().unwrap();
        let c = store.create_component(&resistor_draft("R1")).unwrap();

        assert!(matches!(
            store.kicad_part(c.id),
            Err(StoreError::MissingSymbol(_, CadType::KiCad))
        ));
        assert!(matches!(
            store.kicad_part(c.id + 1),
            Err(StoreError::ComponentNotFound(_))
        ));
    }
}
