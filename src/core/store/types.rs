//! Store query and statistics types

use crate::core::identity::ComponentKind;

/// Catalog statistics
#[derive(Debug, Clone, Default)]
pub struct StoreStats {
    pub total_components: usize,
    pub by_kind: Vec<(ComponentKind, usize)>,
    pub total_footprints: usize,
    pub total_symbols: usize,
    pub footprint_associations: usize,
    pub symbol_associations: usize,
    pub materialized_views: usize,
    pub db_size_bytes: u64,
}

/// Filter for listing components
#[derive(Debug, Clone, Default)]
pub struct ComponentFilter {
    /// Only components of this kind
    pub kind: Option<ComponentKind>,
    /// Exact package match
    pub package: Option<String>,
    /// Substring match on mpn, manufacturer or description
    pub search: Option<String>,
    pub limit: Option<usize>,
}

impl ComponentFilter {
    pub fn kind(kind: ComponentKind) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }
}
