//! `edaparts init` command - Initialize a new catalog project

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::Path;

use crate::core::config::Config;
use crate::core::project::{Project, ProjectError};
use crate::core::store::CatalogStore;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Rewrite .edaparts/config.yaml even if the project already exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    // Create directory if it doesn't exist
    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    let project = if args.force {
        Project::init_force(&path)
    } else {
        Project::init(&path)
    };

    match project {
        Ok(project) => {
            // Opening creates the catalog schema
            let config = Config::load_for(Some(&project));
            let store = CatalogStore::open_project(&project, &config)?;
            tracing::debug!(root = %project.root().display(), "initialized project");

            println!(
                "{} Initialized edaparts project at {}",
                style("✓").green(),
                style(project.root().display()).cyan()
            );
            println!();
            print_structure(project.root(), store.path());
            println!();
            println!("Next steps:");
            println!(
                "  {} Register a footprint",
                style("edaparts fp add --cad kicad --alias Resistor_SMD R_1206_3216Metric").yellow()
            );
            println!(
                "  {} Add a component",
                style("edaparts cmp add resistor --mpn RC1206FR-0710KL --manufacturer Yageo").yellow()
            );
            println!(
                "  {} Browse a library view",
                style("edaparts view show \"KiCad Resistors\"").yellow()
            );
            Ok(())
        }
        Err(ProjectError::AlreadyExists(path)) => {
            println!(
                "{} edaparts project already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            println!();
            println!(
                "Use {} to rewrite the project configuration",
                style("edaparts init --force").yellow()
            );
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}

fn print_structure(root: &Path, catalog: Option<&Path>) {
    println!("Created project structure:");
    println!("  {}", style(".edaparts/").dim());
    println!("  {}", style(".edaparts/config.yaml").dim());
    if let Some(catalog) = catalog {
        let shown = catalog.strip_prefix(root).unwrap_or(catalog);
        println!("  {}", style(shown.display()).dim());
    }
}
