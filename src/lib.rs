//! edaparts: an electronic component catalog with CAD library views
//!
//! Components, their type-specific attributes, and their footprint and
//! schematic symbol references live in a SQLite catalog. Per CAD tool
//! (KiCad, Altium) library views flatten that catalog into one row per
//! component, ready for a CAD tool's database-library driver.

pub mod cli;
pub mod core;
pub mod entities;
