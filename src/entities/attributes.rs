//! Type-specific attribute sets
//!
//! Every component owns exactly one of these variants, stored in the table
//! named by its `ComponentKind` under the component's id. Attribute values are
//! free text (units included), as entered by the catalog maintainer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::identity::ComponentKind;

/// One type-specific column and the label it gets in library views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeColumn {
    /// Column name in the attribute table
    pub column: &'static str,
    /// Human readable label exposed to CAD tools
    pub label: &'static str,
}

impl AttributeColumn {
    const fn new(column: &'static str, label: &'static str) -> Self {
        Self { column, label }
    }
}

static RESISTOR_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("tolerance", "Tolerance"),
    AttributeColumn::new("power_max", "Power Max"),
];

static CAPACITOR_CERAMIC_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("tolerance", "Tolerance"),
    AttributeColumn::new("voltage", "Voltage"),
    AttributeColumn::new("composition", "Composition"),
];

static TRANSFORMER_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("number_of_windings", "Number of Windings"),
    AttributeColumn::new("primary_dc_resistance", "Primary DC Resistance"),
    AttributeColumn::new("secondary_dc_resistance", "Secondary DC Resistance"),
    AttributeColumn::new("tertiary_dc_resistance", "Tertiary DC Resistance"),
    AttributeColumn::new("leakage_inductance", "Leakage Inductance"),
    AttributeColumn::new("primary_inductance", "Primary Inductance"),
    AttributeColumn::new("secondary_current_rating", "Secondary Current Rating"),
    AttributeColumn::new("tertiary_current_rating", "Tertiary Current Rating"),
    AttributeColumn::new("primary_voltage_rating", "Primary Voltage Rating"),
    AttributeColumn::new("secondary_voltage_rating", "Secondary Voltage Rating"),
    AttributeColumn::new("tertiary_voltage_rating", "Tertiary Voltage Rating"),
    AttributeColumn::new("nps_turns_ratio", "Turns Ratio Primary:Secondary"),
    AttributeColumn::new("npt_turns_ratio", "Turns Ratio Primary:Tertiary"),
];

static VOLTAGE_REGULATOR_DCDC_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("voltage_input_min", "Voltage Input Min"),
    AttributeColumn::new("voltage_output_min_fixed", "Voltage Output Min Fixed"),
    AttributeColumn::new("voltage_output_max", "Voltage Output Max"),
    AttributeColumn::new("current_output", "Current Output"),
    AttributeColumn::new("frequency_switching", "Frequency Switching"),
    AttributeColumn::new("topology", "Topology"),
    AttributeColumn::new("output_type", "Output Type"),
    AttributeColumn::new("number_of_outputs", "Number of Outputs"),
];

static VOLTAGE_REGULATOR_LINEAR_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("gain_bandwidth", "Gain Bandwidth"),
    AttributeColumn::new("output_type", "Output Type"),
    AttributeColumn::new("voltage_output_min_fixed", "Voltage Output Min Fixed"),
    AttributeColumn::new("voltage_output_max", "Voltage Output Max"),
    AttributeColumn::new("voltage_dropout_max", "Voltage Dropout Max"),
    AttributeColumn::new("current_supply_max", "Current Supply Max"),
    AttributeColumn::new("current_output", "Current Output"),
    AttributeColumn::new("pssr", "PSRR"),
];

static EFUSE_HOTSWAP_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("fet_type", "FET Type"),
    AttributeColumn::new("rds_on", "Rds On"),
    AttributeColumn::new("current_max", "Current Max"),
    AttributeColumn::new("current_min", "Current Min"),
    AttributeColumn::new("voltage_input_min", "Voltage Input Min"),
    AttributeColumn::new("voltage_input_max", "Voltage Input Max"),
    AttributeColumn::new("current_over_response", "Current Over Response"),
    AttributeColumn::new("voltage_over_response", "Voltage Over Response"),
    AttributeColumn::new("features", "Features"),
];

static LED_INDICATOR_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("forward_voltage", "Forward Voltage"),
    AttributeColumn::new("color", "Color"),
    AttributeColumn::new("lens_style", "Lens Style"),
    AttributeColumn::new("lens_transparency", "Lens Transparency"),
    AttributeColumn::new("dominant_wavelength", "Dominant Wavelength"),
    AttributeColumn::new("test_current", "Test Current"),
    AttributeColumn::new("lens_size", "Lens Size"),
];

static AMPLIFIER_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("gain_bandwidth", "Gain Bandwidth"),
    AttributeColumn::new("output_type", "Output Type"),
    AttributeColumn::new("input_type", "Input Type"),
    AttributeColumn::new("amplifier_type", "Amplifier Type"),
    AttributeColumn::new("slew_rate", "Slew Rate"),
    AttributeColumn::new("voltage_supplies", "Voltage Supplies"),
    AttributeColumn::new("voltage_input_offset", "Voltage Input Offset"),
    AttributeColumn::new("current_output", "Current Output"),
    AttributeColumn::new("current_quiescent", "Current Quiescent"),
    AttributeColumn::new("number_of_channels", "Number of Channels"),
    AttributeColumn::new("cmrr", "CMRR"),
    AttributeColumn::new("voltage_common_mode_max", "Voltage Common Mode Max"),
    AttributeColumn::new("voltage_input_max", "Voltage Input Max"),
    AttributeColumn::new("bandwidth", "Bandwidth"),
    AttributeColumn::new("features", "Features"),
];

static CAPACITOR_TANTALUM_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("tolerance", "Tolerance"),
    AttributeColumn::new("voltage", "Voltage"),
    AttributeColumn::new("esr", "ESR"),
    AttributeColumn::new("lifetime_temperature", "Lifetime Temperature"),
];

static CRYSTAL_OSCILLATOR_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("load_capacitance", "Load Capacitance"),
    AttributeColumn::new("frequency", "Frequency"),
    AttributeColumn::new("frequency_tolerance", "Frequency Tolerance"),
];

static DIODE_RECTIFIER_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("forward_voltage", "Forward Voltage"),
    AttributeColumn::new("reverse_current_leakage", "Reverse Current Leakage"),
    AttributeColumn::new("max_forward_average_current", "Max Forward Average Current"),
    AttributeColumn::new("max_reverse_vrrm", "Max Reverse VRRM"),
    AttributeColumn::new("diode_type", "Diode Type"),
];

static DIODE_TVS_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("voltage_reverse_standoff", "Voltage Reverse Standoff"),
    AttributeColumn::new("voltage_breakdown_min", "Voltage Breakdown Min"),
    AttributeColumn::new("voltage_clamping_max", "Voltage Clamping Max"),
];

static DISCRETE_LOGIC_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("logic_family", "Logic Family"),
    AttributeColumn::new("logic_type", "Logic Type"),
    AttributeColumn::new("number_of_bits", "Number of Bits"),
    AttributeColumn::new("propagation_delay", "Propagation Delay"),
    AttributeColumn::new("supply_voltage_max", "Supply Voltage Max"),
    AttributeColumn::new("supply_voltage_min", "Supply Voltage Min"),
    AttributeColumn::new("logic_function", "Logic Function"),
];

static FERRITE_BEAD_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("number_of_lines", "Number of Lines"),
    AttributeColumn::new("dc_resistance", "DC Resistance"),
    AttributeColumn::new("impedance_freq", "Impedance @ Frequency"),
    AttributeColumn::new("current_rating", "Current Rating"),
];

static OPAMP_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("gain_bandwidth", "Gain Bandwidth"),
    AttributeColumn::new("output_type", "Output Type"),
    AttributeColumn::new("input_type", "Input Type"),
    AttributeColumn::new("amplifier_type", "Amplifier Type"),
    AttributeColumn::new("slew_rate", "Slew Rate"),
    AttributeColumn::new("voltage_supplies", "Voltage Supplies"),
    AttributeColumn::new("voltage_input_offset", "Voltage Input Offset"),
    AttributeColumn::new("current_output", "Current Output"),
    AttributeColumn::new("number_of_channels", "Number of Channels"),
];

static OPTOCOUPLER_LINEAR_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("voltage_isolation", "Voltage Isolation"),
    AttributeColumn::new("transfer_gain", "Transfer Gain"),
    AttributeColumn::new("input_forward_voltage", "Input Forward Voltage"),
    AttributeColumn::new("servo_gain", "Servo Gain"),
    AttributeColumn::new("forward_gain", "Forward Gain"),
    AttributeColumn::new("non_linearity", "Non Linearity"),
];

static OSCILLATOR_OSCILLATOR_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("base_resonator", "Base Resonator"),
    AttributeColumn::new("current_supply_max", "Current Supply Max"),
    AttributeColumn::new("frequency", "Frequency"),
    AttributeColumn::new("frequency_stability", "Frequency Stability"),
    AttributeColumn::new("voltage_supply", "Voltage Supply"),
    AttributeColumn::new("output_type", "Output Type"),
];

static POTENTIOMETER_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("power_max", "Power Max"),
    AttributeColumn::new("tolerance", "Tolerance"),
    AttributeColumn::new("resistance_min", "Resistance Min"),
    AttributeColumn::new("resistance_max", "Resistance Max"),
    AttributeColumn::new("number_of_turns", "Number of Turns"),
];

static POWER_INDUCTOR_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("tolerance", "Tolerance"),
    AttributeColumn::new("resistance_dcr", "Resistance DCR"),
    AttributeColumn::new("inductance_freq_test", "Inductance Test Frequency"),
    AttributeColumn::new("current_rating", "Current Rating"),
    AttributeColumn::new("current_saturation", "Current Saturation"),
    AttributeColumn::new("core_material", "Core Material"),
];

static SWITCH_PUSHBUTTON_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("function", "Function"),
    AttributeColumn::new("dc_voltage_rating", "DC Voltage Rating"),
    AttributeColumn::new("ac_voltage_rating", "AC Voltage Rating"),
    AttributeColumn::new("current_rating", "Current Rating"),
    AttributeColumn::new("circuit_type", "Circuit Type"),
];

static TRANSDUCER_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("input_magnitude", "Input Magnitude"),
    AttributeColumn::new("output_type", "Output Type"),
    AttributeColumn::new("proportional_gain", "Proportional Gain"),
    AttributeColumn::new("supply_voltage", "Supply Voltage"),
];

static TRANSISTOR_MOSFET_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("rds_on", "Rds On"),
    AttributeColumn::new("vgs_max", "Vgs Max"),
    AttributeColumn::new("vgs_th", "Vgs Threshold"),
    AttributeColumn::new("vds_max", "Vds Max"),
    AttributeColumn::new("ids_max", "Ids Max"),
    AttributeColumn::new("power_max", "Power Max"),
    AttributeColumn::new("channel_type", "Channel Type"),
];

static TRANSISTOR_ARRAY_MOSFET_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("number_of_channels", "Number of Channels"),
    AttributeColumn::new("rds_on", "Rds On"),
    AttributeColumn::new("vgs_max", "Vgs Max"),
    AttributeColumn::new("vgs_th", "Vgs Threshold"),
    AttributeColumn::new("vds_max", "Vds Max"),
    AttributeColumn::new("ids_max", "Ids Max"),
    AttributeColumn::new("current_total_max", "Current Total Max"),
    AttributeColumn::new("power_max", "Power Max"),
    AttributeColumn::new("channel_type", "Channel Type"),
];

static TRIAC_COLUMNS: &[AttributeColumn] = &[
    AttributeColumn::new("power_max", "Power Max"),
    AttributeColumn::new("vdrm", "VDRM"),
    AttributeColumn::new("current_rating", "Current Rating"),
    AttributeColumn::new("dl_dt", "dI/dt"),
    AttributeColumn::new("trigger_current", "Trigger Current"),
    AttributeColumn::new("latching_current", "Latching Current"),
    AttributeColumn::new("holding_current", "Holding Current"),
    AttributeColumn::new("gate_trigger_voltage", "Gate Trigger Voltage"),
    AttributeColumn::new("emitter_forward_current", "Emitter Forward Current"),
    AttributeColumn::new("emitter_forward_voltage", "Emitter Forward Voltage"),
    AttributeColumn::new("triac_type", "Triac Type"),
];

impl ComponentKind {
    /// Type-specific columns of this kind, in view order
    pub fn attribute_columns(&self) -> &'static [AttributeColumn] {
        match self {
            ComponentKind::Resistor => RESISTOR_COLUMNS,
            ComponentKind::CapacitorCeramic => CAPACITOR_CERAMIC_COLUMNS,
            ComponentKind::Transformer => TRANSFORMER_COLUMNS,
            ComponentKind::VoltageRegulatorDcdc => VOLTAGE_REGULATOR_DCDC_COLUMNS,
            ComponentKind::VoltageRegulatorLinear => VOLTAGE_REGULATOR_LINEAR_COLUMNS,
            ComponentKind::PowerManagementEfuseHotswap => EFUSE_HOTSWAP_COLUMNS,
            ComponentKind::LedIndicator => LED_INDICATOR_COLUMNS,
            ComponentKind::Amplifier => AMPLIFIER_COLUMNS,
            ComponentKind::CapacitorTantalum => CAPACITOR_TANTALUM_COLUMNS,
            ComponentKind::CrystalOscillator => CRYSTAL_OSCILLATOR_COLUMNS,
            ComponentKind::DiodeRectifier => DIODE_RECTIFIER_COLUMNS,
            ComponentKind::DiodeTvs => DIODE_TVS_COLUMNS,
            ComponentKind::DiscreteLogic => DISCRETE_LOGIC_COLUMNS,
            ComponentKind::FerriteBead => FERRITE_BEAD_COLUMNS,
            ComponentKind::Opamp => OPAMP_COLUMNS,
            ComponentKind::OptocouplerLinear => OPTOCOUPLER_LINEAR_COLUMNS,
            ComponentKind::OscillatorOscillator => OSCILLATOR_OSCILLATOR_COLUMNS,
            ComponentKind::Potentiometer => POTENTIOMETER_COLUMNS,
            ComponentKind::PowerInductor => POWER_INDUCTOR_COLUMNS,
            ComponentKind::SwitchPushbutton => SWITCH_PUSHBUTTON_COLUMNS,
            ComponentKind::Transducer => TRANSDUCER_COLUMNS,
            ComponentKind::TransistorMosfet => TRANSISTOR_MOSFET_COLUMNS,
            ComponentKind::TransistorArrayMosfet => TRANSISTOR_ARRAY_MOSFET_COLUMNS,
            ComponentKind::Triac => TRIAC_COLUMNS,
        }
    }
}

/// Resistor attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resistor {
    pub tolerance: Option<String>,
    pub power_max: Option<String>,
}

/// Multilayer ceramic capacitor attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacitorCeramic {
    pub tolerance: Option<String>,
    pub voltage: Option<String>,
    pub composition: Option<String>,
}

/// Transformer attributes, up to three windings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transformer {
    pub number_of_windings: Option<String>,
    pub primary_dc_resistance: Option<String>,
    pub secondary_dc_resistance: Option<String>,
    pub tertiary_dc_resistance: Option<String>,
    pub leakage_inductance: Option<String>,
    pub primary_inductance: Option<String>,
    pub secondary_current_rating: Option<String>,
    pub tertiary_current_rating: Option<String>,
    pub primary_voltage_rating: Option<String>,
    pub secondary_voltage_rating: Option<String>,
    pub tertiary_voltage_rating: Option<String>,
    pub nps_turns_ratio: Option<String>,
    pub npt_turns_ratio: Option<String>,
}

/// Switching (DC-DC) regulator attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoltageRegulatorDcdc {
    pub voltage_input_min: Option<String>,
    pub voltage_output_min_fixed: Option<String>,
    pub voltage_output_max: Option<String>,
    pub current_output: Option<String>,
    pub frequency_switching: Option<String>,
    pub topology: Option<String>,
    pub output_type: Option<String>,
    pub number_of_outputs: Option<String>,
}

/// Linear regulator (LDO) attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoltageRegulatorLinear {
    pub gain_bandwidth: Option<String>,
    pub output_type: Option<String>,
    pub voltage_output_min_fixed: Option<String>,
    pub voltage_output_max: Option<String>,
    pub voltage_dropout_max: Option<String>,
    pub current_supply_max: Option<String>,
    pub current_output: Option<String>,
    pub pssr: Option<String>,
}

/// eFuse / hot-swap controller attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerManagementEfuseHotswap {
    pub fet_type: Option<String>,
    pub rds_on: Option<String>,
    pub current_max: Option<String>,
    pub current_min: Option<String>,
    pub voltage_input_min: Option<String>,
    pub voltage_input_max: Option<String>,
    pub current_over_response: Option<String>,
    pub voltage_over_response: Option<String>,
    pub features: Option<String>,
}

/// Indicator LED attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedIndicator {
    pub forward_voltage: Option<String>,
    pub color: Option<String>,
    pub lens_style: Option<String>,
    pub lens_transparency: Option<String>,
    pub dominant_wavelength: Option<String>,
    pub test_current: Option<String>,
    pub lens_size: Option<String>,
}

/// Amplifier attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Amplifier {
    pub gain_bandwidth: Option<String>,
    pub output_type: Option<String>,
    pub input_type: Option<String>,
    pub amplifier_type: Option<String>,
    pub slew_rate: Option<String>,
    pub voltage_supplies: Option<String>,
    pub voltage_input_offset: Option<String>,
    pub current_output: Option<String>,
    pub current_quiescent: Option<String>,
    pub number_of_channels: Option<String>,
    pub cmrr: Option<String>,
    pub voltage_common_mode_max: Option<String>,
    pub voltage_input_max: Option<String>,
    pub bandwidth: Option<String>,
    pub features: Option<String>,
}

/// Tantalum capacitor attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacitorTantalum {
    pub tolerance: Option<String>,
    pub voltage: Option<String>,
    pub esr: Option<String>,
    pub lifetime_temperature: Option<String>,
}

/// Crystal attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrystalOscillator {
    pub load_capacitance: Option<String>,
    pub frequency: Option<String>,
    pub frequency_tolerance: Option<String>,
}

/// Rectifier diode attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiodeRectifier {
    pub forward_voltage: Option<String>,
    pub reverse_current_leakage: Option<String>,
    pub max_forward_average_current: Option<String>,
    pub max_reverse_vrrm: Option<String>,
    pub diode_type: Option<String>,
}

/// TVS diode attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiodeTvs {
    pub voltage_reverse_standoff: Option<String>,
    pub voltage_breakdown_min: Option<String>,
    pub voltage_clamping_max: Option<String>,
}

/// Discrete logic IC attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscreteLogic {
    pub logic_family: Option<String>,
    pub logic_type: Option<String>,
    pub number_of_bits: Option<String>,
    pub propagation_delay: Option<String>,
    pub supply_voltage_max: Option<String>,
    pub supply_voltage_min: Option<String>,
    pub logic_function: Option<String>,
}

/// Ferrite bead attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FerriteBead {
    pub number_of_lines: Option<String>,
    pub dc_resistance: Option<String>,
    pub impedance_freq: Option<String>,
    pub current_rating: Option<String>,
}

/// Operational amplifier attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Opamp {
    pub gain_bandwidth: Option<String>,
    pub output_type: Option<String>,
    pub input_type: Option<String>,
    pub amplifier_type: Option<String>,
    pub slew_rate: Option<String>,
    pub voltage_supplies: Option<String>,
    pub voltage_input_offset: Option<String>,
    pub current_output: Option<String>,
    pub number_of_channels: Option<String>,
}

/// Linear optocoupler attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptocouplerLinear {
    pub voltage_isolation: Option<String>,
    pub transfer_gain: Option<String>,
    pub input_forward_voltage: Option<String>,
    pub servo_gain: Option<String>,
    pub forward_gain: Option<String>,
    pub non_linearity: Option<String>,
}

/// Packaged oscillator attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OscillatorOscillator {
    pub base_resonator: Option<String>,
    pub current_supply_max: Option<String>,
    pub frequency: Option<String>,
    pub frequency_stability: Option<String>,
    pub voltage_supply: Option<String>,
    pub output_type: Option<String>,
}

/// Potentiometer attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Potentiometer {
    pub power_max: Option<String>,
    pub tolerance: Option<String>,
    pub resistance_min: Option<String>,
    pub resistance_max: Option<String>,
    pub number_of_turns: Option<String>,
}

/// Power inductor attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerInductor {
    pub tolerance: Option<String>,
    pub resistance_dcr: Option<String>,
    pub inductance_freq_test: Option<String>,
    pub current_rating: Option<String>,
    pub current_saturation: Option<String>,
    pub core_material: Option<String>,
}

/// Push button switch attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitchPushbutton {
    pub function: Option<String>,
    pub dc_voltage_rating: Option<String>,
    pub ac_voltage_rating: Option<String>,
    pub current_rating: Option<String>,
    pub circuit_type: Option<String>,
}

/// Transducer attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transducer {
    pub input_magnitude: Option<String>,
    pub output_type: Option<String>,
    pub proportional_gain: Option<String>,
    pub supply_voltage: Option<String>,
}

/// MOSFET attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransistorMosfet {
    pub rds_on: Option<String>,
    pub vgs_max: Option<String>,
    pub vgs_th: Option<String>,
    pub vds_max: Option<String>,
    pub ids_max: Option<String>,
    pub power_max: Option<String>,
    pub channel_type: Option<String>,
}

/// MOSFET array attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransistorArrayMosfet {
    pub number_of_channels: Option<String>,
    pub rds_on: Option<String>,
    pub vgs_max: Option<String>,
    pub vgs_th: Option<String>,
    pub vds_max: Option<String>,
    pub ids_max: Option<String>,
    pub current_total_max: Option<String>,
    pub power_max: Option<String>,
    pub channel_type: Option<String>,
}

/// Triac and opto-triac attributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Triac {
    pub power_max: Option<String>,
    pub vdrm: Option<String>,
    pub current_rating: Option<String>,
    pub dl_dt: Option<String>,
    pub trigger_current: Option<String>,
    pub latching_current: Option<String>,
    pub holding_current: Option<String>,
    pub gate_trigger_voltage: Option<String>,
    pub emitter_forward_current: Option<String>,
    pub emitter_forward_voltage: Option<String>,
    pub triac_type: Option<String>,
}

/// The type-specific attribute set of a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypeAttributes {
    Resistor(Resistor),
    CapacitorCeramic(CapacitorCeramic),
    Transformer(Transformer),
    VoltageRegulatorDcdc(VoltageRegulatorDcdc),
    VoltageRegulatorLinear(VoltageRegulatorLinear),
    PowerManagementEfuseHotswap(PowerManagementEfuseHotswap),
    LedIndicator(LedIndicator),
    Amplifier(Amplifier),
    CapacitorTantalum(CapacitorTantalum),
    CrystalOscillator(CrystalOscillator),
    DiodeRectifier(DiodeRectifier),
    DiodeTvs(DiodeTvs),
    DiscreteLogic(DiscreteLogic),
    FerriteBead(FerriteBead),
    Opamp(Opamp),
    OptocouplerLinear(OptocouplerLinear),
    OscillatorOscillator(OscillatorOscillator),
    Potentiometer(Potentiometer),
    PowerInductor(PowerInductor),
    SwitchPushbutton(SwitchPushbutton),
    Transducer(Transducer),
    TransistorMosfet(TransistorMosfet),
    TransistorArrayMosfet(TransistorArrayMosfet),
    Triac(Triac),
}

impl TypeAttributes {
    /// Empty attribute set of the given kind
    pub fn empty(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Resistor => TypeAttributes::Resistor(Resistor::default()),
            ComponentKind::CapacitorCeramic => {
                TypeAttributes::CapacitorCeramic(CapacitorCeramic::default())
            }
            ComponentKind::Transformer => TypeAttributes::Transformer(Transformer::default()),
            ComponentKind::VoltageRegulatorDcdc => {
                TypeAttributes::VoltageRegulatorDcdc(VoltageRegulatorDcdc::default())
            }
            ComponentKind::VoltageRegulatorLinear => {
                TypeAttributes::VoltageRegulatorLinear(VoltageRegulatorLinear::default())
            }
            ComponentKind::PowerManagementEfuseHotswap => {
                TypeAttributes::PowerManagementEfuseHotswap(PowerManagementEfuseHotswap::default())
            }
            ComponentKind::LedIndicator => TypeAttributes::LedIndicator(LedIndicator::default()),
            ComponentKind::Amplifier => TypeAttributes::Amplifier(Amplifier::default()),
            ComponentKind::CapacitorTantalum => {
                TypeAttributes::CapacitorTantalum(CapacitorTantalum::default())
            }
            ComponentKind::CrystalOscillator => {
                TypeAttributes::CrystalOscillator(CrystalOscillator::default())
            }
            ComponentKind::DiodeRectifier => {
                TypeAttributes::DiodeRectifier(DiodeRectifier::default())
            }
            ComponentKind::DiodeTvs => TypeAttributes::DiodeTvs(DiodeTvs::default()),
            ComponentKind::DiscreteLogic => TypeAttributes::DiscreteLogic(DiscreteLogic::default()),
            ComponentKind::FerriteBead => TypeAttributes::FerriteBead(FerriteBead::default()),
            ComponentKind::Opamp => TypeAttributes::Opamp(Opamp::default()),
            ComponentKind::OptocouplerLinear => {
                TypeAttributes::OptocouplerLinear(OptocouplerLinear::default())
            }
            ComponentKind::OscillatorOscillator => {
                TypeAttributes::OscillatorOscillator(OscillatorOscillator::default())
            }
            ComponentKind::Potentiometer => TypeAttributes::Potentiometer(Potentiometer::default()),
            ComponentKind::PowerInductor => TypeAttributes::PowerInductor(PowerInductor::default()),
            ComponentKind::SwitchPushbutton => {
                TypeAttributes::SwitchPushbutton(SwitchPushbutton::default())
            }
            ComponentKind::Transducer => TypeAttributes::Transducer(Transducer::default()),
            ComponentKind::TransistorMosfet => {
                TypeAttributes::TransistorMosfet(TransistorMosfet::default())
            }
            ComponentKind::TransistorArrayMosfet => {
                TypeAttributes::TransistorArrayMosfet(TransistorArrayMosfet::default())
            }
            ComponentKind::Triac => TypeAttributes::Triac(Triac::default()),
        }
    }

    /// Kind of this attribute set
    pub fn kind(&self) -> ComponentKind {
        match self {
            TypeAttributes::Resistor(_) => ComponentKind::Resistor,
            TypeAttributes::CapacitorCeramic(_) => ComponentKind::CapacitorCeramic,
            TypeAttributes::Transformer(_) => ComponentKind::Transformer,
            TypeAttributes::VoltageRegulatorDcdc(_) => ComponentKind::VoltageRegulatorDcdc,
            TypeAttributes::VoltageRegulatorLinear(_) => ComponentKind::VoltageRegulatorLinear,
            TypeAttributes::PowerManagementEfuseHotswap(_) => {
                ComponentKind::PowerManagementEfuseHotswap
            }
            TypeAttributes::LedIndicator(_) => ComponentKind::LedIndicator,
            TypeAttributes::Amplifier(_) => ComponentKind::Amplifier,
            TypeAttributes::CapacitorTantalum(_) => ComponentKind::CapacitorTantalum,
            TypeAttributes::CrystalOscillator(_) => ComponentKind::CrystalOscillator,
            TypeAttributes::DiodeRectifier(_) => ComponentKind::DiodeRectifier,
            TypeAttributes::DiodeTvs(_) => ComponentKind::DiodeTvs,
            TypeAttributes::DiscreteLogic(_) => ComponentKind::DiscreteLogic,
            TypeAttributes::FerriteBead(_) => ComponentKind::FerriteBead,
            TypeAttributes::Opamp(_) => ComponentKind::Opamp,
            TypeAttributes::OptocouplerLinear(_) => ComponentKind::OptocouplerLinear,
            TypeAttributes::OscillatorOscillator(_) => ComponentKind::OscillatorOscillator,
            TypeAttributes::Potentiometer(_) => ComponentKind::Potentiometer,
            TypeAttributes::PowerInductor(_) => ComponentKind::PowerInductor,
            TypeAttributes::SwitchPushbutton(_) => ComponentKind::SwitchPushbutton,
            TypeAttributes::Transducer(_) => ComponentKind::Transducer,
            TypeAttributes::TransistorMosfet(_) => ComponentKind::TransistorMosfet,
            TypeAttributes::TransistorArrayMosfet(_) => ComponentKind::TransistorArrayMosfet,
            TypeAttributes::Triac(_) => ComponentKind::Triac,
        }
    }

    /// Values aligned with `kind().attribute_columns()`
    pub fn values(&self) -> Result<Vec<Option<String>>, AttributeError> {
        let encoded = serde_json::to_value(self)?;
        Ok(self
            .kind()
            .attribute_columns()
            .iter()
            .map(|col| {
                encoded
                    .get(col.column)
                    .and_then(|v| v.as_str())
                    .map(String::from)
            })
            .collect())
    }

    /// Rebuild an attribute set from values aligned with the kind's columns
    pub fn from_values(
        kind: ComponentKind,
        values: Vec<Option<String>>,
    ) -> Result<Self, AttributeError> {
        let columns = kind.attribute_columns();
        if values.len() != columns.len() {
            return Err(AttributeError::Arity {
                kind,
                expected: columns.len(),
                found: values.len(),
            });
        }

        let mut map = serde_json::Map::new();
        map.insert(
            "type".to_string(),
            serde_json::Value::String(kind.as_str().to_string()),
        );
        for (col, value) in columns.iter().zip(values) {
            let value = value.map_or(serde_json::Value::Null, serde_json::Value::String);
            map.insert(col.column.to_string(), value);
        }

        Ok(serde_json::from_value(serde_json::Value::Object(map))?)
    }

    /// Copy of this set with the given `column = value` pairs applied.
    /// An empty value clears the column.
    pub fn with_updates(&self, updates: &[(String, String)]) -> Result<Self, AttributeError> {
        let kind = self.kind();
        let columns = kind.attribute_columns();
        let mut values = self.values()?;

        for (key, value) in updates {
            let idx = columns
                .iter()
                .position(|c| c.column == key.as_str())
                .ok_or_else(|| AttributeError::UnknownColumn {
                    kind,
                    column: key.clone(),
                })?;
            values[idx] = if value.is_empty() {
                None
            } else {
                Some(value.clone())
            };
        }

        Self::from_values(kind, values)
    }
}

/// Errors raised while converting attribute sets
#[derive(Debug, Error)]
pub enum AttributeError {
    #[error("{kind} has no attribute '{column}'")]
    UnknownColumn { kind: ComponentKind, column: String },

    #[error("{kind} expects {expected} attribute values, got {found}")]
    Arity {
        kind: ComponentKind,
        expected: usize,
        found: usize,
    },

    #[error("attribute encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}
