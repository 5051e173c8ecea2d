//! Core module - catalog storage, associations and library views

pub mod config;
pub mod footprints;
pub mod identity;
pub mod kicad;
pub mod library;
pub mod pivot;
pub mod project;
pub mod store;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use footprints::FootprintEntry;
pub use identity::{CadType, ComponentKind, IdParseError};
pub use kicad::{KiCadCategory, KiCadPart, KiCadPartProperty};
pub use library::{SymbolCandidate, SymbolSelection};
pub use pivot::{FootprintPivot, PivotTable, SlotRow, FOOTPRINT_SLOTS};
pub use project::{Project, ProjectError};
pub use store::{CatalogStore, ComponentFilter, StoreError, StoreStats};
pub use views::{Projection, ViewDefinition, ViewMaterializer, ViewProjector};
