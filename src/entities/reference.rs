//! Footprint and symbol references into a CAD tool's libraries

use serde::{Deserialize, Serialize};

use crate::core::identity::CadType;

/// A footprint or schematic symbol definition inside one CAD tool's library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryObject {
    pub id: i64,

    /// CAD tool this object belongs to
    pub cad: CadType,

    /// Library alias / namespace (KiCad nickname)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// Name of the footprint or symbol inside the library
    pub reference: String,

    /// Location of the library file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LibraryObject {
    /// Label as rendered for its CAD tool
    pub fn label(&self) -> String {
        self.cad.label(self.alias.as_deref(), &self.reference)
    }
}

/// A PCB footprint reference
pub type FootprintRef = LibraryObject;

/// A schematic symbol reference
pub type LibraryRef = LibraryObject;

/// Field values used to register a footprint or symbol reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryObjectDraft {
    pub cad: CadType,
    #[serde(default)]
    pub alias: Option<String>,
    pub reference: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl LibraryObjectDraft {
    pub fn new(cad: CadType, alias: Option<&str>, reference: impl Into<String>) -> Self {
        Self {
            cad,
            alias: alias.map(String::from),
            reference: reference.into(),
            path: None,
            description: None,
        }
    }
}
