//! Identity enumerations: CAD tools and component kinds
//!
//! Components carry no discriminator column. A component's kind is the
//! type-attribute table that holds its row, so `ComponentKind` doubles as the
//! table name of each variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// CAD tools that consume the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CadType {
    /// KiCad (database and HTTP libraries)
    KiCad,
    /// Altium Designer (database libraries)
    Altium,
}

impl CadType {
    /// Stored tag of the CAD tool
    pub fn as_str(&self) -> &'static str {
        match self {
            CadType::KiCad => "KICAD",
            CadType::Altium => "ALTIUM",
        }
    }

    /// Human readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            CadType::KiCad => "KiCad",
            CadType::Altium => "Altium",
        }
    }

    /// Get all supported CAD tools
    pub fn all() -> &'static [CadType] {
        &[CadType::KiCad, CadType::Altium]
    }

    /// Component column holding the comment text shown by this tool
    pub fn comment_column(&self) -> &'static str {
        match self {
            CadType::KiCad => "comment_kicad",
            CadType::Altium => "comment_altium",
        }
    }

    /// Render a footprint or symbol reference the way this tool expects it.
    ///
    /// KiCad addresses library items as `alias:reference`. Altium database
    /// libraries take the bare reference, as does KiCad when no alias is set.
    pub fn label(&self, alias: Option<&str>, reference: &str) -> String {
        match (self, alias) {
            (CadType::KiCad, Some(alias)) if !alias.is_empty() => {
                format!("{}:{}", alias, reference)
            }
            _ => reference.to_string(),
        }
    }
}

impl fmt::Display for CadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for CadType {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "KICAD" => Ok(CadType::KiCad),
            "ALTIUM" => Ok(CadType::Altium),
            _ => Err(IdParseError::UnknownCadType(s.to_string())),
        }
    }
}

/// Component categories, one per type-attribute table.
///
/// New kinds go at the end: KiCad category ids follow this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Resistor,
    CapacitorCeramic,
    Transformer,
    VoltageRegulatorDcdc,
    VoltageRegulatorLinear,
    PowerManagementEfuseHotswap,
    LedIndicator,
    Amplifier,
    CapacitorTantalum,
    CrystalOscillator,
    DiodeRectifier,
    DiodeTvs,
    DiscreteLogic,
    FerriteBead,
    Opamp,
    OptocouplerLinear,
    OscillatorOscillator,
    Potentiometer,
    PowerInductor,
    SwitchPushbutton,
    Transducer,
    TransistorMosfet,
    TransistorArrayMosfet,
    Triac,
}

impl ComponentKind {
    /// Type tag, also the name of the attribute table
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Resistor => "resistor",
            ComponentKind::CapacitorCeramic => "capacitor_ceramic",
            ComponentKind::Transformer => "transformer",
            ComponentKind::VoltageRegulatorDcdc => "voltage_regulator_dcdc",
            ComponentKind::VoltageRegulatorLinear => "voltage_regulator_linear",
            ComponentKind::PowerManagementEfuseHotswap => "power_management_efuse_hotswap",
            ComponentKind::LedIndicator => "led_indicator",
            ComponentKind::Amplifier => "amplifier",
            ComponentKind::CapacitorTantalum => "capacitor_tantalum",
            ComponentKind::CrystalOscillator => "crystal_oscillator",
            ComponentKind::DiodeRectifier => "diode_rectifier",
            ComponentKind::DiodeTvs => "diode_tvs",
            ComponentKind::DiscreteLogic => "discrete_logic",
            ComponentKind::FerriteBead => "ferrite_bead",
            ComponentKind::Opamp => "opamp",
            ComponentKind::OptocouplerLinear => "optocoupler_linear",
            ComponentKind::OscillatorOscillator => "oscillator_oscillator",
            ComponentKind::Potentiometer => "potentiometer",
            ComponentKind::PowerInductor => "power_inductor",
            ComponentKind::SwitchPushbutton => "switch_pushbutton",
            ComponentKind::Transducer => "transducer",
            ComponentKind::TransistorMosfet => "transistor_mosfet",
            ComponentKind::TransistorArrayMosfet => "transistor_array_mosfet",
            ComponentKind::Triac => "triac",
        }
    }

    /// Attribute table holding rows of this kind
    pub fn table(&self) -> &'static str {
        self.as_str()
    }

    /// Human readable category name
    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentKind::Resistor => "Resistor",
            ComponentKind::CapacitorCeramic => "Capacitor Ceramic",
            ComponentKind::Transformer => "Transformer",
            ComponentKind::VoltageRegulatorDcdc => "Voltage Regulator DCDC",
            ComponentKind::VoltageRegulatorLinear => "Voltage Regulator Linear",
            ComponentKind::PowerManagementEfuseHotswap => "Power Management eFuse Hotswap",
            ComponentKind::LedIndicator => "LED Indicator",
            ComponentKind::Amplifier => "Amplifier",
            ComponentKind::CapacitorTantalum => "Capacitor Tantalum",
            ComponentKind::CrystalOscillator => "Crystal Oscillator",
            ComponentKind::DiodeRectifier => "Diode Rectifier",
            ComponentKind::DiodeTvs => "Diode TVS",
            ComponentKind::DiscreteLogic => "Discrete Logic",
            ComponentKind::FerriteBead => "Ferrite Bead",
            ComponentKind::Opamp => "Opamp",
            ComponentKind::OptocouplerLinear => "Optocoupler Linear",
            ComponentKind::OscillatorOscillator => "Oscillator Oscillator",
            ComponentKind::Potentiometer => "Potentiometer",
            ComponentKind::PowerInductor => "Power Inductor",
            ComponentKind::SwitchPushbutton => "Switch Pushbutton",
            ComponentKind::Transducer => "Transducer",
            ComponentKind::TransistorMosfet => "Transistor MOSFET",
            ComponentKind::TransistorArrayMosfet => "Transistor Array MOSFET",
            ComponentKind::Triac => "Triac",
        }
    }

    /// Get all component kinds
    pub fn all() -> &'static [ComponentKind] {
        &[
            ComponentKind::Resistor,
            ComponentKind::CapacitorCeramic,
            ComponentKind::Transformer,
            ComponentKind::VoltageRegulatorDcdc,
            ComponentKind::VoltageRegulatorLinear,
            ComponentKind::PowerManagementEfuseHotswap,
            ComponentKind::LedIndicator,
            ComponentKind::Amplifier,
            ComponentKind::CapacitorTantalum,
            ComponentKind::CrystalOscillator,
            ComponentKind::DiodeRectifier,
            ComponentKind::DiodeTvs,
            ComponentKind::DiscreteLogic,
            ComponentKind::FerriteBead,
            ComponentKind::Opamp,
            ComponentKind::OptocouplerLinear,
            ComponentKind::OscillatorOscillator,
            ComponentKind::Potentiometer,
            ComponentKind::PowerInductor,
            ComponentKind::SwitchPushbutton,
            ComponentKind::Transducer,
            ComponentKind::TransistorMosfet,
            ComponentKind::TransistorArrayMosfet,
            ComponentKind::Triac,
        ]
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| IdParseError::UnknownKind(s.to_string()))
    }
}

/// Errors that can occur when parsing identity tags
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("unknown CAD tool '{0}' (expected kicad or altium)")]
    UnknownCadType(String),

    #[error("unknown component kind '{0}'")]
    UnknownKind(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cad_type_parse_is_case_insensitive() {
        assert_eq!("kicad".parse::<CadType>().unwrap(), CadType::KiCad);
        assert_eq!("KiCad".parse::<CadType>().unwrap(), CadType::KiCad);
        assert_eq!("ALTIUM".parse::<CadType>().unwrap(), CadType::Altium);
        assert!(matches!(
            "eagle".parse::<CadType>(),
            Err(IdParseError::UnknownCadType(_))
        ));
    }

    #[test]
    fn test_cad_type_serializes_as_stored_tag() {
        let json = serde_json::to_string(&CadType::KiCad).unwrap();
        assert_eq!(json, "\"KICAD\"");
        let parsed: CadType = serde_json::from_str("\"ALTIUM\"").unwrap();
        assert_eq!(parsed, CadType::Altium);
    }

    #[test]
    fn test_kicad_label_pairs_alias_and_reference() {
        assert_eq!(
            CadType::KiCad.label(Some("Resistor_SMD"), "R_1210_3225Metric"),
            "Resistor_SMD:R_1210_3225Metric"
        );
        assert_eq!(CadType::KiCad.label(None, "R_1210"), "R_1210");
        assert_eq!(CadType::KiCad.label(Some(""), "R_1210"), "R_1210");
    }

    #[test]
    fn test_altium_label_is_bare_reference() {
        assert_eq!(CadType::Altium.label(Some("Resistors"), "RESC3225X65N"), "RESC3225X65N");
    }

    #[test]
    fn test_component_kind_parse_accepts_separators() {
        assert_eq!(
            "led-indicator".parse::<ComponentKind>().unwrap(),
            ComponentKind::LedIndicator
        );
        assert_eq!(
            "Voltage Regulator DCDC".parse::<ComponentKind>().unwrap(),
            ComponentKind::VoltageRegulatorDcdc
        );
        assert_eq!(
            "Transistor Array MOSFET".parse::<ComponentKind>().unwrap(),
            ComponentKind::TransistorArrayMosfet
        );
        assert_eq!(
            "diode-tvs".parse::<ComponentKind>().unwrap(),
            ComponentKind::DiodeTvs
        );
        assert!(matches!(
            "capacitor".parse::<ComponentKind>(),
            Err(IdParseError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_component_kind_serde_matches_table() {
        for kind in ComponentKind::all() {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json.as_str(), Some(kind.table()));
        }
    }
}
