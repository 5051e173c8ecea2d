//! Component entity - the common attributes of every catalog part

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::identity::{CadType, ComponentKind};
use crate::entities::attributes::TypeAttributes;

/// A stored component together with its type-specific attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Catalog identity, assigned on creation
    pub id: i64,

    /// Manufacturer part number
    pub mpn: String,

    pub manufacturer: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Package code (e.g., "1210 (3225 Metric)")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Comment text shown by KiCad
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_kicad: Option<String>,

    /// Comment text shown by Altium
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_altium: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_through_hole: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_temperature_min: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_temperature_max: Option<String>,

    pub created_on: DateTime<Utc>,

    pub updated_on: DateTime<Utc>,

    /// Type-specific attributes (exactly one variant per component)
    pub attributes: TypeAttributes,
}

impl Component {
    /// Category of this component
    pub fn kind(&self) -> ComponentKind {
        self.attributes.kind()
    }

    /// Comment text for the given CAD tool
    pub fn comment_for(&self, cad: CadType) -> Option<&str> {
        match cad {
            CadType::KiCad => self.comment_kicad.as_deref(),
            CadType::Altium => self.comment_altium.as_deref(),
        }
    }
}

/// Field values used to create or update a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDraft {
    pub mpn: String,
    pub manufacturer: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub comment_kicad: Option<String>,
    #[serde(default)]
    pub comment_altium: Option<String>,
    #[serde(default)]
    pub is_through_hole: Option<bool>,
    #[serde(default)]
    pub operating_temperature_min: Option<String>,
    #[serde(default)]
    pub operating_temperature_max: Option<String>,
    pub attributes: TypeAttributes,
}

impl ComponentDraft {
    /// Draft with the required fields set and everything else empty
    pub fn new(
        mpn: impl Into<String>,
        manufacturer: impl Into<String>,
        attributes: TypeAttributes,
    ) -> Self {
        Self {
            mpn: mpn.into(),
            manufacturer: manufacturer.into(),
            value: None,
            package: None,
            description: None,
            comment_kicad: None,
            comment_altium: None,
            is_through_hole: None,
            operating_temperature_min: None,
            operating_temperature_max: None,
            attributes,
        }
    }

    pub fn kind(&self) -> ComponentKind {
        self.attributes.kind()
    }
}

impl From<&Component> for ComponentDraft {
    fn from(component: &Component) -> Self {
        Self {
            mpn: component.mpn.clone(),
            manufacturer: component.manufacturer.clone(),
            value: component.value.clone(),
            package: component.package.clone(),
            description: component.description.clone(),
            comment_kicad: component.comment_kicad.clone(),
            comment_altium: component.comment_altium.clone(),
            is_through_hole: component.is_through_hole,
            operating_temperature_min: component.operating_temperature_min.clone(),
            operating_temperature_max: component.operating_temperature_max.clone(),
            attributes: component.attributes.clone(),
        }
    }
}
