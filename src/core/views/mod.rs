//! Library views: per (component kind, CAD tool) flattened relations
//!
//! - `catalog`: the static set of named views and their column layout
//! - `projector`: evaluates a view in process from one read snapshot
//! - `sql`: renders and materializes the same views as SQLite views

pub mod catalog;
pub mod projector;
pub mod sql;

pub use catalog::{all, find, ViewDefinition, COMMON_LABELS};
pub use projector::{
    AmbiguousSymbol, ProjectedRow, Projection, ProjectionDiagnostics, TruncatedFootprints,
    ViewProjector,
};
pub use sql::{create_view_sql, drop_view_sql, MaterializeStats, ViewMaterializer};
