//! `edaparts cmp` command - Component management

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::helpers::{open_catalog, or_dash, parse_attr, resolve_format, retry_busy};
use crate::cli::table::RowTable;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::identity::ComponentKind;
use crate::core::store::{CatalogStore, ComponentFilter};
use crate::entities::attributes::TypeAttributes;
use crate::entities::component::{Component, ComponentDraft};

#[derive(Subcommand, Debug)]
pub enum CmpCommands {
    /// Add a component to the catalog
    Add(AddArgs),

    /// List components with filtering
    List(ListArgs),

    /// Show a component's details, footprints and symbols
    Show {
        /// Component ID
        id: i64,
    },

    /// Update fields of an existing component
    Set(SetArgs),

    /// Delete a component and its associations
    Rm {
        /// Component ID
        id: i64,
    },
}

/// Common component fields
#[derive(clap::Args, Debug, Default)]
pub struct FieldArgs {
    /// Nominal value (e.g., "10k")
    #[arg(long)]
    pub value: Option<String>,

    /// Package code (e.g., "0603 (1608 Metric)")
    #[arg(long)]
    pub package: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Comment shown by KiCad
    #[arg(long)]
    pub comment_kicad: Option<String>,

    /// Comment shown by Altium
    #[arg(long)]
    pub comment_altium: Option<String>,

    /// Through-hole mounting (true/false)
    #[arg(long)]
    pub through_hole: Option<bool>,

    /// Minimum operating temperature
    #[arg(long)]
    pub temp_min: Option<String>,

    /// Maximum operating temperature
    #[arg(long)]
    pub temp_max: Option<String>,

    /// Type attribute as COLUMN=VALUE (repeatable; empty value clears)
    #[arg(long = "attr", value_name = "COLUMN=VALUE", value_parser = parse_attr)]
    pub attrs: Vec<(String, String)>,
}

impl FieldArgs {
    /// Apply the given fields to a draft; empty strings clear optional fields
    fn apply(&self, draft: &mut ComponentDraft) -> Result<()> {
        let set = |target: &mut Option<String>, value: &Option<String>| {
            if let Some(v) = value {
                *target = if v.is_empty() { None } else { Some(v.clone()) };
            }
        };
        set(&mut draft.value, &self.value);
        set(&mut draft.package, &self.package);
        set(&mut draft.description, &self.description);
        set(&mut draft.comment_kicad, &self.comment_kicad);
        set(&mut draft.comment_altium, &self.comment_altium);
        set(&mut draft.operating_temperature_min, &self.temp_min);
        set(&mut draft.operating_temperature_max, &self.temp_max);
        if self.through_hole.is_some() {
            draft.is_through_hole = self.through_hole;
        }
        if !self.attrs.is_empty() {
            draft.attributes = draft.attributes.with_updates(&self.attrs).into_diagnostic()?;
        }
        Ok(())
    }
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Component kind (resistor, capacitor_ceramic, transformer, ...)
    pub kind: ComponentKind,

    /// Manufacturer part number
    #[arg(long)]
    pub mpn: String,

    #[arg(long)]
    pub manufacturer: String,

    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Component ID
    pub id: i64,

    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Only components of this kind
    #[arg(long, short = 'k')]
    pub kind: Option<ComponentKind>,

    /// Exact package match
    #[arg(long)]
    pub package: Option<String>,

    /// Search in MPN, manufacturer and description
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Limit the number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Show only the count of matching components
    #[arg(long)]
    pub count: bool,
}

pub fn run(cmd: CmpCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        CmpCommands::Add(args) => run_add(args, global),
        CmpCommands::List(args) => run_list(args, global),
        CmpCommands::Show { id } => run_show(id, global),
        CmpCommands::Set(args) => run_set(args, global),
        CmpCommands::Rm { id } => run_rm(id, global),
    }
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut catalog = open_catalog(global)?;

    let mut draft = ComponentDraft::new(
        args.mpn,
        args.manufacturer,
        TypeAttributes::empty(args.kind),
    );
    args.fields.apply(&mut draft)?;

    let component = retry_busy(|| catalog.store.create_component(&draft))?;

    if global.quiet {
        println!("{}", component.id);
    } else {
        println!(
            "{} Created {} {} ({})",
            style("✓").green(),
            component.kind(),
            style(component.id).cyan(),
            style(&component.mpn).yellow()
        );
    }
    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    let format = resolve_format(global.format, &catalog.config, OutputFormat::Tsv);

    let filter = ComponentFilter {
        kind: args.kind,
        package: args.package,
        search: args.search,
        limit: args.limit,
    };
    let components = catalog.store.list_components(&filter)?;

    if args.count {
        println!("{}", components.len());
        return Ok(());
    }

    let mut table = RowTable::new([
        "ID",
        "Kind",
        "MPN",
        "Manufacturer",
        "Value",
        "Package",
        "Description",
    ]);
    for component in &components {
        table.push(vec![
            Some(component.id.to_string()),
            Some(component.kind().as_str().to_string()),
            Some(component.mpn.clone()),
            Some(component.manufacturer.clone()),
            component.value.clone(),
            component.package.clone(),
            component.description.clone(),
        ]);
    }
    table.print(format)?;

    if !global.quiet && matches!(format, OutputFormat::Tsv) {
        println!();
        println!("{} component(s) found.", style(components.len()).cyan());
    }
    Ok(())
}

fn run_show(id: i64, global: &GlobalOpts) -> Result<()> {
    let catalog = open_catalog(global)?;
    let format = resolve_format(global.format, &catalog.config, OutputFormat::Auto);
    let component = catalog.store.get_component(id)?;

    match format {
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&component).into_diagnostic()?);
        }
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&component).into_diagnostic()?
            );
        }
        OutputFormat::Id => println!("{}", component.id),
        _ => print_component(&catalog.store, &component)?,
    }
    Ok(())
}

fn print_component(store: &CatalogStore, component: &Component) -> Result<()> {
    println!("{}", style("─".repeat(60)).dim());
    println!(
        "{}: {}",
        style("ID").bold(),
        style(component.id).cyan()
    );
    println!("{}: {}", style("Kind").bold(), component.kind().display_name());
    println!("{}: {}", style("MPN").bold(), style(&component.mpn).yellow());
    println!("{}: {}", style("Manufacturer").bold(), component.manufacturer);
    println!("{}: {}", style("Value").bold(), or_dash(component.value.as_deref()));
    println!("{}: {}", style("Package").bold(), or_dash(component.package.as_deref()));
    println!(
        "{}: {}",
        style("Description").bold(),
        or_dash(component.description.as_deref())
    );
    println!(
        "{}: {}",
        style("Comment (KiCad)").bold(),
        or_dash(component.comment_kicad.as_deref())
    );
    println!(
        "{}: {}",
        style("Comment (Altium)").bold(),
        or_dash(component.comment_altium.as_deref())
    );
    if let Some(tht) = component.is_through_hole {
        println!("{}: {}", style("Through Hole").bold(), tht);
    }
    if component.operating_temperature_min.is_some() || component.operating_temperature_max.is_some()
    {
        println!(
            "{}: {} .. {}",
            style("Operating Temperature").bold(),
            or_dash(component.operating_temperature_min.as_deref()),
            or_dash(component.operating_temperature_max.as_deref())
        );
    }

    let columns = component.kind().attribute_columns();
    let values = component.attributes.values().into_diagnostic()?;
    println!("{}", style("─".repeat(60)).dim());
    for (column, value) in columns.iter().zip(&values) {
        println!("{}: {}", style(column.label).bold(), or_dash(value.as_deref()));
    }

    let footprints = store
        .footprint_ids_for(component.id)?
        .into_iter()
        .map(|fid| store.get_footprint(fid))
        .collect::<Result<Vec<_>, _>>()?;
    let symbols = store.symbols_for(component.id)?;

    println!("{}", style("─".repeat(60)).dim());
    println!("{}:", style("Footprints").bold());
    if footprints.is_empty() {
        println!("  {}", style("(none)").dim());
    }
    for fp in &footprints {
        println!("  {:<4} {:<7} {}", fp.id, fp.cad.display_name(), fp.label());
    }
    println!("{}:", style("Symbols").bold());
    if symbols.is_empty() {
        println!("  {}", style("(none)").dim());
    }
    for sym in &symbols {
        println!("  {:<4} {:<7} {}", sym.id, sym.cad.display_name(), sym.label());
    }

    println!("{}", style("─".repeat(60)).dim());
    println!(
        "{}: {}   {}: {}",
        style("Created").dim(),
        component.created_on.format("%Y-%m-%d %H:%M"),
        style("Updated").dim(),
        component.updated_on.format("%Y-%m-%d %H:%M")
    );
    Ok(())
}

fn run_set(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    let mut catalog = open_catalog(global)?;
    let existing = catalog.store.get_component(args.id)?;

    let mut draft = ComponentDraft::from(&existing);
    args.fields.apply(&mut draft)?;

    let updated = retry_busy(|| catalog.store.update_component(args.id, &draft))?;

    if !global.quiet {
        println!(
            "{} Updated {} {}",
            style("✓").green(),
            updated.kind(),
            style(updated.id).cyan()
        );
    }
    Ok(())
}

fn run_rm(id: i64, global: &GlobalOpts) -> Result<()> {
    let mut catalog = open_catalog(global)?;
    retry_busy(|| catalog.store.delete_component(id))?;

    if !global.quiet {
        println!("{} Deleted component {}", style("✓").green(), style(id).cyan());
    }
    Ok(())
}
