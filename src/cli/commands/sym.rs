//! `edaparts sym` command - Schematic symbol references and component symbols

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::commands::fp::{reference_table, RefArgs};
use crate::cli::helpers::{open_catalog, resolve_format, retry_busy};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::identity::CadType;

#[derive(Subcommand, Debug)]
pub enum SymCommands {
    /// Register a symbol reference
    Add(RefArgs),

    /// List symbol references
    List {
        /// Only references of this CAD tool
        #[arg(long)]
        cad: Option<CadType>,
    },

    /// Associate a symbol with a component
    Attach {
        /// Component ID
        component: i64,

        /// Symbol reference ID
        symbol: i64,
    },

    /// Remove a symbol from a component
    Detach {
        /// Component ID
        component: i64,

        /// Symbol reference ID
        symbol: i64,
    },
}

pub fn run(cmd: SymCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        SymCommands::Add(args) => run_add(args, global),
        SymCommands::List { cad } => run_list(cad, global),
        SymCommands::Attach { component, symbol } => run_attach(component, symbol, global),
        SymCommands::Detach { component, symbol } => run_detach(component, symbol, global),
    }
}

fn run_add(args: RefArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    let draft = args.into_draft();
    let symbol = retry_busy(|| catalog.store.create_library_ref(&draft))?;

    if global.quiet {
        println!("{}", symbol.id);
    } else {
        println!(
            "{} Created symbol {} ({})",
            style("✓").green(),
            style(symbol.id).cyan(),
            style(symbol.label()).yellow()
        );
    }
    Ok(())
}

fn run_list(cad: Option<CadType>, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    let format = resolve_format(global.format, &catalog.config, OutputFormat::Tsv);
    let symbols = catalog.store.list_library_refs(cad)?;
    reference_table(&symbols).print(format)
}

fn run_attach(component: i64, symbol: i64, global: &GlobalOpts) -> Result<()> {
    let mut catalog = open_catalog(global)?;
    let association = retry_busy(|| catalog.store.attach_symbol(component, symbol))?;

    if !global.quiet {
        println!(
            "{} Attached symbol {} to component {} (association {})",
            style("✓").green(),
            style(symbol).cyan(),
            style(component).cyan(),
            association
        );
    }
    Ok(())
}

fn run_detach(component: i64, symbol: i64, global: &GlobalOpts) -> Result<()> {
    let mut catalog = open_catalog(global)?;
    let removed = retry_busy(|| catalog.store.detach_symbol(component, symbol))?;

    if global.quiet {
        return Ok(());
    }
    if removed {
        println!(
            "{} Detached symbol {} from component {}",
            style("✓").green(),
            style(symbol).cyan(),
            style(component).cyan()
        );
    } else {
        println!(
            "{} Symbol {} is not attached to component {}",
            style("!").yellow(),
            symbol,
            component
        );
    }
    Ok(())
}
