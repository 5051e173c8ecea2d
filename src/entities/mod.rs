//! Catalog entity types

pub mod attributes;
pub mod component;
pub mod reference;

pub use attributes::{
    AttributeColumn, AttributeError, CapacitorCeramic, LedIndicator, PowerManagementEfuseHotswap,
    Resistor, Transformer, TypeAttributes, VoltageRegulatorDcdc, VoltageRegulatorLinear,
};
pub use component::{Component, ComponentDraft};
pub use reference::{FootprintRef, LibraryObject, LibraryObjectDraft, LibraryRef};
