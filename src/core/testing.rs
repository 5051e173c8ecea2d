//! Fixtures shared by unit tests

use rusqlite::params;

use crate::core::identity::{CadType, ComponentKind};
use crate::core::store::CatalogStore;
use crate::entities::attributes::{Resistor, Transformer};
use crate::entities::{ComponentDraft, LibraryObjectDraft, TypeAttributes};

pub(crate) fn resistor_draft(mpn: &str) -> ComponentDraft {
    let mut draft = ComponentDraft::new(
        mpn,
        "Yageo",
        TypeAttributes::Resistor(Resistor {
            tolerance: Some("1%".to_string()),
            power_max: Some("0.5W".to_string()),
        }),
    );
    draft.value = Some("10k".to_string());
    draft.comment_kicad = Some("10k 1%".to_string());
    draft.comment_altium = Some("=Value".to_string());
    draft
}

pub(crate) fn transformer_draft(mpn: &str) -> ComponentDraft {
    let mut draft = ComponentDraft::new(
        mpn,
        "Wurth Elektronik",
        TypeAttributes::Transformer(Transformer {
            number_of_windings: Some("2".to_string()),
            nps_turns_ratio: Some("1:1".to_string()),
            ..Default::default()
        }),
    );
    draft.package = Some("SMD".to_string());
    draft
}

pub(crate) fn draft_of_kind(kind: ComponentKind, mpn: &str) -> ComponentDraft {
    ComponentDraft::new(mpn, "Texas Instruments", TypeAttributes::empty(kind))
}

pub(crate) fn footprint(store: &CatalogStore, cad: CadType, alias: &str, reference: &str) -> i64 {
    let alias = (!alias.is_empty()).then_some(alias);
    store
        .create_footprint(&LibraryObjectDraft::new(cad, alias, reference))
        .unwrap()
        .id
}

pub(crate) fn symbol(store: &CatalogStore, cad: CadType, alias: &str, reference: &str) -> i64 {
    let alias = (!alias.is_empty()).then_some(alias);
    store
        .create_library_ref(&LibraryObjectDraft::new(cad, alias, reference))
        .unwrap()
        .id
}

/// Rewrite the creation time of every symbol association of a library ref
pub(crate) fn set_symbol_association_time(store: &CatalogStore, library_id: i64, created_on: &str) {
    store
        .conn()
        .execute(
            "UPDATE component_library_asc SET created_on = ?2 WHERE library_ref_id = ?1",
            params![library_id, created_on],
        )
        .unwrap();
}
