//! `edaparts db` command - Inspect the catalog database
//!
//! The catalog is a SQLite database holding components, their type
//! attributes, footprint and symbol references, and any materialized library
//! views. `db query` runs read-only SQL against it, which is also how the
//! materialized views can be checked without a CAD tool.

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{open_catalog, resolve_format};
use crate::cli::table::RowTable;
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(Subcommand, Debug)]
pub enum DbCommands {
    /// Show catalog statistics
    Status,

    /// Execute SQL query against the catalog (read-only)
    Query {
        /// SQL query to execute
        sql: String,
    },
}

pub fn run(cmd: DbCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        DbCommands::Status => run_status(global),
        DbCommands::Query { sql } => run_query(&sql, global),
    }
}

fn run_status(global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    let stats = catalog.store.statistics()?;

    let location = catalog
        .store
        .path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| ":memory:".to_string());

    println!("{}", style("Catalog Status").bold());
    println!("{}", style("─".repeat(40)).dim());
    println!("  Location:          {}", location);
    println!("  Components:        {}", style(stats.total_components).cyan());
    println!("  Footprints:        {}", style(stats.total_footprints).cyan());
    println!("  Symbols:           {}", style(stats.total_symbols).cyan());
    println!(
        "  Footprint links:   {}",
        style(stats.footprint_associations).cyan()
    );
    println!("  Symbol links:      {}", style(stats.symbol_associations).cyan());
    println!(
        "  Materialized views: {}",
        style(stats.materialized_views).cyan()
    );
    println!(
        "  Database size:     {} KB",
        style(stats.db_size_bytes / 1024).cyan()
    );

    if stats.total_components > 0 {
        println!();
        println!("  {}", style("By Kind:").bold());
        for (kind, count) in &stats.by_kind {
            if *count > 0 {
                println!("    {:<32} {}", kind.as_str(), count);
            }
        }
    }

    Ok(())
}

fn run_query(sql: &str, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    let format = resolve_format(global.format, &catalog.config, OutputFormat::Tsv);

    let columns = catalog.store.query_columns(sql)?;
    let rows = catalog.store.query_raw(sql)?;

    let mut table = RowTable::new(columns);
    for row in rows {
        table.push(row);
    }
    table.print(format)
}
