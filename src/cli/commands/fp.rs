//! `edaparts fp` command - Footprint references and component footprints

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::helpers::{open_catalog, resolve_format, retry_busy};
use crate::cli::table::RowTable;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::identity::CadType;
use crate::entities::reference::{LibraryObject, LibraryObjectDraft};

#[derive(Subcommand, Debug)]
pub enum FpCommands {
    /// Register a footprint reference
    Add(RefArgs),

    /// List footprint references
    List {
        /// Only references of this CAD tool
        #[arg(long)]
        cad: Option<CadType>,
    },

    /// Associate footprints with a component
    Attach {
        /// Component ID
        component: i64,

        /// Footprint reference IDs
        #[arg(required = true)]
        footprints: Vec<i64>,
    },

    /// Remove a footprint from a component
    Detach {
        /// Component ID
        component: i64,

        /// Footprint reference ID
        footprint: i64,
    },
}

/// Fields of a footprint or symbol reference
#[derive(clap::Args, Debug)]
pub struct RefArgs {
    /// CAD tool owning the library (kicad, altium)
    #[arg(long)]
    pub cad: CadType,

    /// Library alias (KiCad library nickname)
    #[arg(long)]
    pub alias: Option<String>,

    /// Name inside the library
    pub reference: String,

    /// Library file location
    #[arg(long)]
    pub path: Option<String>,

    #[arg(long)]
    pub description: Option<String>,
}

impl RefArgs {
    pub fn into_draft(self) -> LibraryObjectDraft {
        let mut draft = LibraryObjectDraft::new(self.cad, self.alias.as_deref(), self.reference);
        draft.path = self.path;
        draft.description = self.description;
        draft
    }
}

/// Tabulate footprint or symbol references
pub fn reference_table(refs: &[LibraryObject]) -> RowTable {
    let mut table = RowTable::new(["ID", "CAD", "Alias", "Reference", "Label", "Path", "Description"]);
    for r in refs {
        table.push(vec![
            Some(r.id.to_string()),
            Some(r.cad.as_str().to_string()),
            r.alias.clone(),
            Some(r.reference.clone()),
            Some(r.label()),
            r.path.clone(),
            r.description.clone(),
        ]);
    }
    table
}

pub fn run(cmd: FpCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        FpCommands::Add(args) => run_add(args, global),
        FpCommands::List { cad } => run_list(cad, global),
        FpCommands::Attach {
            component,
            footprints,
        } => run_attach(component, &footprints, global),
        FpCommands::Detach {
            component,
            footprint,
        } => run_detach(component, footprint, global),
    }
}

fn run_add(args: RefArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    let draft = args.into_draft();
    let footprint = retry_busy(|| catalog.store.create_footprint(&draft))?;

    if global.quiet {
        println!("{}", footprint.id);
    } else {
        println!(
            "{} Created footprint {} ({})",
            style("✓").green(),
            style(footprint.id).cyan(),
            style(footprint.label()).yellow()
        );
    }
    Ok(())
}

fn run_list(cad: Option<CadType>, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    let format = resolve_format(global.format, &catalog.config, OutputFormat::Tsv);
    let footprints = catalog.store.list_footprints(cad)?;
    reference_table(&footprints).print(format)
}

fn run_attach(component: i64, footprints: &[i64], global: &GlobalOpts) -> Result<()> {
    let mut catalog = open_catalog(global)?;
    let attached = retry_busy(|| catalog.store.attach_footprints(component, footprints))?;

    if !global.quiet {
        println!(
            "{} Component {} now has {} footprint(s)",
            style("✓").green(),
            style(component).cyan(),
            style(attached.len()).cyan()
        );
    }
    Ok(())
}

fn run_detach(component: i64, footprint: i64, global: &GlobalOpts) -> Result<()> {
    let mut catalog = open_catalog(global)?;
    let removed = retry_busy(|| catalog.store.detach_footprint(component, footprint))?;

    if global.quiet {
        return Ok(());
    }
    if removed {
        println!(
            "{} Detached footprint {} from component {}",
            style("✓").green(),
            style(footprint).cyan(),
            style(component).cyan()
        );
    } else {
        println!(
            "{} Footprint {} is not attached to component {}",
            style("!").yellow(),
            footprint,
            component
        );
    }
    Ok(())
}
