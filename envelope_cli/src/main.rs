//! # Envelope CLI
//!
//! Terminal front-end for the envelope compliance engine: browse the
//! material catalog and the standards table, and check a project file.
//!
//! Logs go to stderr (`RUST_LOG` or `-v`), so `--json` output on stdout
//! can be piped.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use envelope_core::calculations::{evaluate_with, ComplianceResult};
use envelope_core::errors::CalcResult;
use envelope_core::parameters::{ClimateZone, ElementType, ExteriorColor, IsolationPlacement, ProjectType};
use envelope_core::project::Project;
use envelope_core::{file_io, MaterialCatalog, StandardsTable};

#[derive(Parser)]
#[command(name = "envelope")]
#[command(about = "Envelope CLI - thermal compliance checks for building-envelope layers", long_about = None)]
struct Cli {
    /// Material catalog TOML replacing the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Standards table TOML replacing the built-in one
    #[arg(long, global = true)]
    standards: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List material categories
    Materials,
    /// List manufacturers offering a material
    Manufacturers {
        material: String,
    },
    /// List products of a manufacturer, with thickness range and properties
    Products {
        material: String,
        manufacturer: String,
    },
    /// List the selectable project parameter options
    Options,
    /// Show the required-resistance table
    Standards {
        /// Restrict to one project type
        project_type: Option<String>,
    },
    /// Evaluate a project file
    Evaluate {
        /// Path to the .envp project file
        project_path: PathBuf,
        /// Evaluate a saved model instead of the current layers
        #[arg(long)]
        model: Option<String>,
    },
}

fn main() -> CalcResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let catalog = match &cli.catalog {
        Some(path) => file_io::load_catalog(path)?,
        None => MaterialCatalog::builtin().clone(),
    };

    match cli.command {
        Commands::Materials => print_list(&catalog.list_materials(), cli.json),
        Commands::Manufacturers { material } => print_list(&catalog.list_manufacturers(&material), cli.json),
        Commands::Products {
            material,
            manufacturer,
        } => cmd_products(&catalog, &material, &manufacturer, cli.json),
        Commands::Options => {
            cmd_options();
            Ok(())
        }
        Commands::Standards { project_type } => {
            let table = load_table(cli.standards.as_deref())?;
            cmd_standards(&table, project_type.as_deref(), cli.json)
        }
        Commands::Evaluate { project_path, model } => {
            let table = load_table(cli.standards.as_deref())?;
            cmd_evaluate(&catalog, &table, &project_path, model.as_deref(), cli.json)
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_table(path: Option<&Path>) -> CalcResult<StandardsTable> {
    match path {
        Some(path) => file_io::load_standards(path),
        None => Ok(StandardsTable::builtin().clone()),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| envelope_core::CalcError::serialization(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn print_list(items: &[&str], json: bool) -> CalcResult<()> {
    if json {
        return print_json(items);
    }
    if items.is_empty() {
        println!("(none)");
    }
    for item in items {
        println!("{}", item);
    }
    Ok(())
}

fn cmd_products(catalog: &MaterialCatalog, material: &str, manufacturer: &str, json: bool) -> CalcResult<()> {
    let records: Vec<_> = catalog
        .list_products(material, manufacturer)
        .into_iter()
        .filter_map(|product| catalog.resolve(material, manufacturer, product))
        .collect();

    if json {
        return print_json(&records);
    }
    if records.is_empty() {
        println!("No products for {} / {}", material, manufacturer);
        return Ok(());
    }

    println!("{:<28} {:>14} {:>10} {:>10}", "Product", "Thickness (cm)", "λ W/(m·K)", "ρ kg/m³");
    for record in records {
        let range = if record.is_fixed_thickness() {
            format!("{}", record.min_thickness_cm)
        } else {
            format!("{}-{}", record.min_thickness_cm, record.max_thickness_cm)
        };
        println!(
            "{:<28} {:>14} {:>10.4} {:>10.0}",
            record.product, range, record.thermal_conductivity, record.specific_mass
        );
    }
    Ok(())
}

fn cmd_options() {
    println!("Project types:");
    for t in ProjectType::ALL {
        println!("  {:<32} {}", t.code(), t.display_name());
    }
    println!("Climate zones:");
    for z in ClimateZone::ALL {
        println!("  {:<32} {}", z.code(), z.display_name());
    }
    println!("Element types:");
    for e in ElementType::ALL {
        println!("  {:<32} {}", e.code(), e.display_name());
    }
    println!("Isolation placement:");
    for p in IsolationPlacement::ALL {
        println!("  {:<32} {}", p.code(), p.display_name());
    }
    println!("Exterior color:");
    for c in ExteriorColor::ALL {
        println!("  {:<32} {}", c.code(), c.display_name());
    }
}

fn cmd_standards(table: &StandardsTable, project_type: Option<&str>, json: bool) -> CalcResult<()> {
    let project_types = match project_type {
        Some(p) => vec![p],
        None => table.project_types(),
    };

    if json {
        let mut selected = BTreeMap::new();
        for project_type in &project_types {
            let mut elements = BTreeMap::new();
            for element_type in table.element_types(project_type) {
                elements.insert(element_type, table.entry(project_type, element_type)?);
            }
            selected.insert(*project_type, elements);
        }
        return print_json(&selected);
    }

    for line in standards_lines(table, &project_types)? {
        println!("{}", line);
    }
    Ok(())
}

/// Text rendering of the requirement tables for the given project types.
fn standards_lines(table: &StandardsTable, project_types: &[&str]) -> CalcResult<Vec<String>> {
    let mut lines = Vec::new();
    for &project_type in project_types {
        let element_types = table.element_types(project_type);
        if element_types.is_empty() {
            lines.push(format!("No requirements defined for project type '{}'", project_type));
            continue;
        }
        for element_type in element_types {
            let entry = table.entry(project_type, element_type)?;
            lines.push(format!("{} / {}", project_type, element_type));
            let masses: Vec<String> = entry.masses.iter().map(|m| format!("{:>6}", m)).collect();
            lines.push(format!("  mass  {}", masses.join(" ")));
            for zone in entry.zones() {
                let values: Vec<String> = entry
                    .zone_values(zone)
                    .unwrap_or_default()
                    .iter()
                    .map(|v| format!("{:>6}", v))
                    .collect();
                lines.push(format!("  {:<5} {}", zone, values.join(" ")));
            }
        }
    }
    Ok(lines)
}

fn cmd_evaluate(
    catalog: &MaterialCatalog,
    table: &StandardsTable,
    project_path: &Path,
    model: Option<&str>,
    json: bool,
) -> CalcResult<()> {
    let mut project = file_io::load_project(project_path)?;
    if let Some(name) = model {
        project.load_model(name)?;
    }

    let items = project.resolved_items(catalog);
    let skipped = project.layer_count() - items.len();
    if skipped > 0 {
        tracing::warn!(skipped, "layers without a catalog match were left out");
    }

    let result = evaluate_with(table, &items, &project.parameters);
    let metrics = project.metrics(catalog);

    if json {
        return print_json(&serde_json::json!({
            "result": result,
            "metrics": metrics,
        }));
    }

    print_report(&project, catalog, &result);
    println!();
    println!("Assembly:");
    println!("  Total thickness: {:.1} cm", metrics.total_thickness_cm);
    println!(
        "  Insulation:      {:.0}% {}",
        metrics.insulation_ratio * 100.0,
        if metrics.is_well_insulated { "(well insulated)" } else { "" }
    );
    Ok(())
}

fn print_report(project: &Project, catalog: &MaterialCatalog, result: &ComplianceResult) {
    println!("═══════════════════════════════════════");
    println!("  {}", project.meta.name);
    println!("═══════════════════════════════════════");
    println!();

    let params = &project.parameters;
    println!("Parameters:");
    println!("  Project type: {}", params.project_type);
    println!("  Zone:         {}", params.project_location);
    println!("  Element:      {}", params.element_type);
    println!("  Insulation:   {}", params.isolation_placement);
    println!("  Color:        {}", params.exterior_color);
    println!();

    println!("Layers:");
    let mut resistances = result.per_layer_resistance.iter();
    for layer in &project.layers {
        if layer.resolve(catalog).is_some() {
            let r = resistances.next().copied().unwrap_or(f64::NAN);
            println!(
                "  {:<40} {:>6.1} cm  R = {:.3}",
                format!("{} / {}", layer.material, layer.product),
                layer.thickness_cm,
                r
            );
        } else {
            println!("  {:<40} (not in catalog)", format!("{} / {}", layer.material, layer.product));
        }
    }
    println!();

    println!("Results:");
    println!("  Thermal resistance:  {:.3} m²K/W", result.total_thermal_resistance);
    println!("  R-value:             {:.3} m²K/W", result.total_r_value);
    println!("  U-value:             {:.3} W/m²K", result.u_value);
    println!("  Areal mass:          {:.2} kg/m²", result.total_areal_mass);
    if let Some(required) = result.required_resistance {
        println!(
            "  Required resistance: {:.3} m²K/W {}",
            required,
            status_icon(result.passes())
        );
    }
    println!();
    println!("═══════════════════════════════════════");
    println!("  {}", result.message());
    println!("═══════════════════════════════════════");
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
