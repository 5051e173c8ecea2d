//! Catalog store errors

use miette::Diagnostic;
use rusqlite::ErrorCode;
use thiserror::Error;

use crate::core::identity::{CadType, ComponentKind};
use crate::entities::attributes::AttributeError;

/// Errors raised by the catalog store and the views derived from it
#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    /// The database was locked or the statement was interrupted. Retrying
    /// the whole operation is safe: nothing partial was returned.
    #[error("catalog database is busy: {0}")]
    #[diagnostic(
        code(edaparts::store::busy),
        help("another process is writing to the catalog; retry the command")
    )]
    Busy(#[source] rusqlite::Error),

    #[error("catalog database error: {0}")]
    #[diagnostic(code(edaparts::store::sqlite))]
    Sqlite(#[source] rusqlite::Error),

    #[error("catalog schema version {found} does not match supported version {expected}")]
    #[diagnostic(code(edaparts::store::schema_version))]
    SchemaMismatch { found: i32, expected: i32 },

    #[error("component {0} not found")]
    #[diagnostic(code(edaparts::store::component_not_found))]
    ComponentNotFound(i64),

    #[error("footprint reference {0} not found")]
    #[diagnostic(code(edaparts::store::footprint_not_found))]
    FootprintNotFound(i64),

    #[error("library reference {0} not found")]
    #[diagnostic(code(edaparts::store::library_not_found))]
    LibraryNotFound(i64),

    #[error("component {mpn} from {manufacturer} already exists")]
    #[diagnostic(code(edaparts::store::duplicate_component))]
    DuplicateComponent { mpn: String, manufacturer: String },

    #[error("component {id} is a {existing}, it cannot hold {requested} attributes")]
    #[diagnostic(
        code(edaparts::store::kind_mismatch),
        help("delete the component and create it again with the new kind")
    )]
    KindMismatch {
        id: i64,
        existing: ComponentKind,
        requested: ComponentKind,
    },

    #[error("component {id} is {mpn} from {manufacturer}, its identity cannot change")]
    #[diagnostic(
        code(edaparts::store::identity_change),
        help("delete the component and create it again under the new identity")
    )]
    IdentityChange {
        id: i64,
        mpn: String,
        manufacturer: String,
    },

    #[error("category {0} does not exist")]
    #[diagnostic(code(edaparts::store::category_not_found))]
    CategoryNotFound(usize),

    #[error("component {0} has no associated {1} symbol")]
    #[diagnostic(code(edaparts::store::missing_symbol))]
    MissingSymbol(i64, CadType),

    #[error("view '{0}' does not exist")]
    #[diagnostic(
        code(edaparts::store::view_not_found),
        help("run `edaparts view list` to see the available views")
    )]
    ViewNotFound(String),

    #[error(transparent)]
    #[diagnostic(code(edaparts::store::attribute))]
    Attribute(#[from] AttributeError),

    #[error("export failed: {0}")]
    #[diagnostic(code(edaparts::store::export))]
    Export(#[from] csv::Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(edaparts::store::io))]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Whether the failed operation can be retried as a whole
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Busy(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        if is_busy(&err) {
            StoreError::Busy(err)
        } else {
            StoreError::Sqlite(err)
        }
    }
}

fn is_busy(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => matches!(
            e.code,
            ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked | ErrorCode::OperationInterrupted
        ),
        _ => false,
    }
}
