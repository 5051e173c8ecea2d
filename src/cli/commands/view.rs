//! `edaparts view` command - CAD library views
//!
//! Views are evaluated in process from one read snapshot (`view show`) or
//! materialized as SQLite views inside the catalog (`view materialize`) so
//! that a CAD tool's database-library driver can read them directly.

use std::io;

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{open_catalog, resolve_format, retry_busy};
use crate::cli::table::RowTable;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::store::StoreError;
use crate::core::views::{self, create_view_sql, Projection, ViewMaterializer, ViewProjector};

#[derive(Subcommand, Debug)]
pub enum ViewCommands {
    /// List the library views
    List,

    /// Evaluate a view and print its rows
    Show {
        /// View name (e.g., "KiCad Resistors")
        name: String,

        /// Footprint columns per row (default: configured footprint_slots)
        #[arg(long)]
        slots: Option<usize>,
    },

    /// Print the CREATE VIEW statement of a view
    Sql {
        /// View name
        name: String,

        /// Footprint columns per row (default: configured footprint_slots)
        #[arg(long)]
        slots: Option<usize>,
    },

    /// Create or refresh the library views inside the catalog database
    Materialize {
        /// Drop the views instead
        #[arg(long)]
        drop: bool,
    },
}

pub fn run(cmd: ViewCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ViewCommands::List => run_list(global),
        ViewCommands::Show { name, slots } => run_show(&name, slots, global),
        ViewCommands::Sql { name, slots } => run_sql(&name, slots, global),
        ViewCommands::Materialize { drop } => run_materialize(drop, global),
    }
}

fn run_list(global: &GlobalOpts) -> Result<()> {
    let format = match global.format {
        OutputFormat::Auto => OutputFormat::Tsv,
        other => other,
    };

    let mut table = RowTable::new(["Name", "Kind", "CAD", "Package", "Columns"]);
    for view in views::all() {
        table.push(vec![
            Some(view.name.to_string()),
            Some(view.kind.as_str().to_string()),
            Some(view.cad.as_str().to_string()),
            view.package.map(String::from),
            Some(view.columns().len().to_string()),
        ]);
    }
    table.print(format)
}

fn run_show(name: &str, slots: Option<usize>, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    let format = resolve_format(global.format, &catalog.config, OutputFormat::Tsv);
    let slots = slots.unwrap_or_else(|| catalog.config.footprint_slots());

    let projection = ViewProjector::with_slots(&catalog.store, slots).project_named(name)?;

    match format {
        OutputFormat::Csv => projection.to_csv(io::stdout().lock())?,
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&projection.to_json()).into_diagnostic()?
        ),
        other => projection_table(&projection).print(other)?,
    }

    if !global.quiet {
        report_diagnostics(&projection);
    }
    Ok(())
}

fn projection_table(projection: &Projection) -> RowTable {
    let mut table = RowTable::new(projection.columns.iter().cloned());
    for row in &projection.rows {
        table.push(row.values.clone());
    }
    table
}

/// Data-quality findings go to stderr so piped rows stay clean
fn report_diagnostics(projection: &Projection) {
    for t in &projection.diagnostics.truncated {
        eprintln!(
            "{} component {} has {} footprints, {} not shown",
            style("warning:").yellow(),
            t.component_id,
            t.total,
            t.discarded
        );
    }
    for a in &projection.diagnostics.ambiguous_symbols {
        eprintln!(
            "{} component {} has {} {} symbols, showing the newest",
            style("warning:").yellow(),
            a.component_id,
            a.candidates,
            projection.view.cad
        );
    }
}

fn run_sql(name: &str, slots: Option<usize>, global: &GlobalOpts) -> Result<()> {
    let view = views::find(name).ok_or_else(|| StoreError::ViewNotFound(name.to_string()))?;
    let slots = match slots {
        Some(n) => n.max(1),
        None => {
            let (_, config) = crate::cli::helpers::load_project(global)?;
            config.footprint_slots()
        }
    };
    println!("{}", create_view_sql(view, slots));
    Ok(())
}

fn run_materialize(drop: bool, global: &GlobalOpts) -> Result<()> {
    let mut catalog = open_catalog(global)?;
    let slots = catalog.config.footprint_slots();

    if drop {
        let dropped = retry_busy(|| ViewMaterializer::new(&mut catalog.store, slots).drop_all())?;
        if !global.quiet {
            println!("{} Dropped {} view(s)", style("✓").green(), style(dropped).cyan());
        }
        return Ok(());
    }

    let stats = retry_busy(|| ViewMaterializer::new(&mut catalog.store, slots).materialize())?;
    if !global.quiet {
        println!(
            "{} Materialized library views ({} footprint slots)",
            style("✓").green(),
            slots
        );
        println!("  Created:   {}", style(stats.created).green());
        println!("  Replaced:  {}", style(stats.replaced).yellow());
        println!("  Unchanged: {}", style(stats.unchanged).dim());
    }
    Ok(())
}
