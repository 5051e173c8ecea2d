//! Static catalog of the library views offered to CAD tools
//!
//! Each view pairs one component kind with one CAD tool, optionally narrowed
//! to a single package code.

use serde::Serialize;

use crate::core::identity::{CadType, ComponentKind};

/// Labels every view starts with, in order
pub static COMMON_LABELS: &[&str] = &[
    "Part Number",
    "Value",
    "Manufacturer",
    "Created On",
    "Updated On",
    "Package",
    "Description",
    "Comment",
    "Minimum Operating Temperature",
    "Maximum Operating Temperature",
    "Symbol",
    "Footprints",
];

/// Position of the symbol label in `COMMON_LABELS`
pub const SYMBOL_COLUMN: usize = 10;

/// Position of the footprints display field in `COMMON_LABELS`
pub const FOOTPRINTS_COLUMN: usize = 11;

/// A named (kind, CAD tool) library view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewDefinition {
    pub name: &'static str,
    pub kind: ComponentKind,
    pub cad: CadType,
    /// Exact package code members must have
    pub package: Option<&'static str>,
}

impl ViewDefinition {
    const fn new(name: &'static str, kind: ComponentKind, cad: CadType) -> Self {
        Self {
            name,
            kind,
            cad,
            package: None,
        }
    }

    const fn with_package(mut self, package: &'static str) -> Self {
        self.package = Some(package);
        self
    }

    /// Output column labels: common prefix, then the kind's attributes
    pub fn columns(&self) -> Vec<&'static str> {
        COMMON_LABELS
            .iter()
            .copied()
            .chain(self.kind.attribute_columns().iter().map(|c| c.label))
            .collect()
    }
}

static VIEWS: &[ViewDefinition] = &[
    ViewDefinition::new("KiCad Resistors", ComponentKind::Resistor, CadType::KiCad),
    ViewDefinition::new("KiCad Resistors 1210", ComponentKind::Resistor, CadType::KiCad)
        .with_package("1210 (3225 Metric)"),
    ViewDefinition::new(
        "KiCad Capacitors Ceramic",
        ComponentKind::CapacitorCeramic,
        CadType::KiCad,
    ),
    ViewDefinition::new("KiCad Transformers", ComponentKind::Transformer, CadType::KiCad),
    ViewDefinition::new(
        "KiCad Regulators DCDC",
        ComponentKind::VoltageRegulatorDcdc,
        CadType::KiCad,
    ),
    ViewDefinition::new(
        "KiCad Regulators Linear",
        ComponentKind::VoltageRegulatorLinear,
        CadType::KiCad,
    ),
    ViewDefinition::new(
        "KiCad Power Management eFuse Hotswap",
        ComponentKind::PowerManagementEfuseHotswap,
        CadType::KiCad,
    ),
    ViewDefinition::new("LED Indicators", ComponentKind::LedIndicator, CadType::KiCad),
    ViewDefinition::new("Altium Resistors", ComponentKind::Resistor, CadType::Altium),
    ViewDefinition::new("Altium Transformers", ComponentKind::Transformer, CadType::Altium),
    ViewDefinition::new(
        "Altium Regulators DCDC",
        ComponentKind::VoltageRegulatorDcdc,
        CadType::Altium,
    ),
];

/// Every library view
pub fn all() -> &'static [ViewDefinition] {
    VIEWS
}

/// Look up a view by name, ignoring case
pub fn find(name: &str) -> Option<&'static ViewDefinition> {
    let name = name.trim();
    VIEWS.iter().find(|v| v.name.eq_ignore_ascii_case(name))
}
