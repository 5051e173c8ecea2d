//! CLI command implementations

pub mod cmp;
pub mod completions;
pub mod db;
pub mod fp;
pub mod init;
pub mod kicad;
pub mod sym;
pub mod view;
