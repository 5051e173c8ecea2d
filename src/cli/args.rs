//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    cmp::CmpCommands, completions::CompletionsArgs, db::DbCommands, fp::FpCommands,
    init::InitArgs, kicad::KicadCommands, sym::SymCommands, view::ViewCommands,
};

#[derive(Parser)]
#[command(name = "edaparts")]
#[command(author, version, about = "Electronic component catalog with CAD library views")]
#[command(long_about = "Maintains a catalog of electronic components with their footprints and \
schematic symbols, and exposes per CAD tool (KiCad, Altium) flattened library views that \
database-library drivers can query directly.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project root (default: auto-detect by finding .edaparts/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new edaparts project
    Init(InitArgs),

    /// Component management
    #[command(subcommand)]
    Cmp(CmpCommands),

    /// Footprint references and component footprints
    #[command(subcommand)]
    Fp(FpCommands),

    /// Schematic symbol references and component symbols
    #[command(subcommand)]
    Sym(SymCommands),

    /// CAD library views
    #[command(subcommand)]
    View(ViewCommands),

    /// KiCad HTTP-library style categories and parts
    #[command(subcommand)]
    Kicad(KicadCommands),

    /// Catalog database inspection
    #[command(subcommand)]
    Db(DbCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (yaml for show, tsv for list)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}
