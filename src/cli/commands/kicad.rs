//! `edaparts kicad` command - KiCad HTTP-library style output
//!
//! Produces the documents a KiCad HTTP library serves: the category list,
//! the parts of one category, and the detail of one part.

use clap::Subcommand;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{open_catalog, resolve_format};
use crate::cli::table::RowTable;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::kicad;

#[derive(Subcommand, Debug)]
pub enum KicadCommands {
    /// List categories (one per component kind)
    Categories,

    /// List the parts of a category that have a KiCad symbol
    Parts {
        /// Category ID
        category: usize,
    },

    /// Show one part with its fields
    Part {
        /// Component ID
        id: i64,
    },
}

pub fn run(cmd: KicadCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        KicadCommands::Categories => run_categories(global),
        KicadCommands::Parts { category } => run_parts(category, global),
        KicadCommands::Part { id } => run_part(id, global),
    }
}

fn run_categories(global: &GlobalOpts) -> Result<()> {
    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Json,
        other => other,
    };

    let mut table = RowTable::new(["id", "name"]);
    for category in kicad::categories() {
        table.push(vec![Some(category.id.to_string()), Some(category.name)]);
    }
    table.print(format)
}

fn run_parts(category: usize, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    let format = resolve_format(global.format, &catalog.config, OutputFormat::Json);

    let components = catalog.store.kicad_category_components(category)?;
    let mut table = RowTable::new(["id", "name", "description"]);
    for component in components {
        table.push(vec![
            Some(component.id.to_string()),
            Some(component.mpn),
            component.description,
        ]);
    }
    table.print(format)
}

fn run_part(id: i64, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    let format = resolve_format(global.format, &catalog.config, OutputFormat::Json);
    let part = catalog.store.kicad_part(id)?;

    match format {
        OutputFormat::Yaml => print!("{}", serde_yml::to_string(&part).into_diagnostic()?),
        OutputFormat::Id => println!("{}", part.id),
        _ => println!(
            "{}",
            serde_json::to_string_pretty(&part).into_diagnostic()?
        ),
    }
    Ok(())
}
