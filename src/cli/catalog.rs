use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::catalog::store::SpeciesCatalog;
use crate::cli::{load_catalog, OutputFormat, CATALOG_ENV};
use crate::core::record::SpeciesRecord;
use crate::core::region::BarcodeRegion;
use crate::core::sequence::{normalize, NucleotideSequence};
use crate::core::types::SpeciesId;
use crate::matching::engine::list_samples;
use crate::utils::validation::validate_authenticity;

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,

    /// Path to custom catalog file
    #[arg(long, global = true, env = CATALOG_ENV)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List all records in the catalog
    List {
        /// Only records with a barcode for this region (ITS, RBCL, MATK)
        #[arg(long)]
        region: Option<BarcodeRegion>,
    },

    /// Show details of a specific record
    Show {
        /// Record ID
        #[arg(required = true)]
        id: String,
    },

    /// Export the catalog to a file
    Export {
        /// Output file path
        #[arg(short, long, required = true)]
        output: PathBuf,
    },

    /// One representative sequence per common name
    Samples,

    /// Add a species record to a catalog file
    Add {
        /// Unique record ID (e.g., "`panax_ginseng`")
        #[arg(long, required = true)]
        id: String,

        /// Scientific name (e.g., "Panax ginseng")
        #[arg(long, required = true)]
        species: String,

        /// Common name (e.g., "Asian Ginseng")
        #[arg(long, required = true)]
        common_name: String,

        /// Barcode as REGION=SEQUENCE; repeat for each region
        #[arg(long = "barcode", required = true, value_parser = parse_barcode)]
        barcodes: Vec<(BarcodeRegion, NucleotideSequence)>,

        /// Authenticity weight in [0, 1] (defaults to 1.0 when omitted)
        #[arg(long)]
        authenticity: Option<f64>,

        /// Catalog file to add to (created if missing)
        #[arg(long, required = true)]
        append_to: PathBuf,

        /// Overwrite if ID already exists in catalog
        #[arg(long)]
        force: bool,
    },
}

fn parse_barcode(s: &str) -> Result<(BarcodeRegion, NucleotideSequence), String> {
    let (region, sequence) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected REGION=SEQUENCE, got '{s}'"))?;
    let region: BarcodeRegion = region.parse()?;
    let sequence = normalize(sequence).map_err(|e| e.to_string())?;
    Ok((region, sequence))
}

/// Execute catalog subcommand
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or written, or a record
/// is not found.
pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::List { region } => run_list(args.catalog, region, format, verbose),
        CatalogCommands::Show { id } => run_show(&id, args.catalog, format),
        CatalogCommands::Export { output } => run_export(&output, args.catalog),
        CatalogCommands::Samples => run_samples(args.catalog, format),
        CatalogCommands::Add {
            id,
            species,
            common_name,
            barcodes,
            authenticity,
            append_to,
            force,
        } => {
            let mut record = SpeciesRecord::new(id, species, common_name);
            record.barcodes.extend(barcodes);
            if let Some(weight) = authenticity {
                validate_authenticity(weight)?;
                record.authenticity = Some(weight);
            }
            run_add(record, &append_to, force)
        }
    }
}

fn run_list(
    catalog_path: Option<PathBuf>,
    region: Option<BarcodeRegion>,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;

    if verbose {
        eprintln!("Loaded catalog with {} records", catalog.len());
    }

    let filtered: Vec<&SpeciesRecord> = match region {
        Some(region) => catalog.records_with_region(region),
        None => catalog.records.iter().collect(),
    };

    match format {
        OutputFormat::Text => {
            let id_width = filtered
                .iter()
                .map(|r| r.id.0.len())
                .max()
                .unwrap_or(2)
                .max(2);
            let species_width = filtered
                .iter()
                .map(|r| r.species.len().min(35))
                .max()
                .unwrap_or(7)
                .max(7);
            let common_width = filtered
                .iter()
                .map(|r| r.common_name.len().min(25))
                .max()
                .unwrap_or(11)
                .max(11);

            let total_width = id_width + species_width + common_width + 16 + 12 + 4;

            println!("Species Catalog ({} records)\n", filtered.len());
            println!(
                "{:<id_w$} {:<sp_w$} {:<cn_w$} {:<16} {:>12}",
                "ID",
                "Species",
                "Common name",
                "Regions",
                "Authenticity",
                id_w = id_width,
                sp_w = species_width,
                cn_w = common_width,
            );
            println!("{}", "-".repeat(total_width));

            for r in &filtered {
                println!(
                    "{:<id_w$} {:<sp_w$} {:<cn_w$} {:<16} {:>12.2}",
                    r.id.0,
                    truncate(&r.species, species_width),
                    truncate(&r.common_name, common_width),
                    region_list(r),
                    r.authenticity_weight(),
                    id_w = id_width,
                    sp_w = species_width,
                    cn_w = common_width,
                );
                if verbose {
                    for (region, sequence) in &r.barcodes {
                        println!("  └─ {region:<5} {} bp", sequence.len());
                    }
                }
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = filtered
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "id": r.id.0,
                        "species": r.species,
                        "common_name": r.common_name,
                        "regions": r.barcodes.keys().collect::<Vec<_>>(),
                        "authenticity": r.authenticity_weight(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("id\tspecies\tcommon_name\tregions\tauthenticity");
            for r in &filtered {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    r.id.0,
                    r.species,
                    r.common_name,
                    region_list(r),
                    r.authenticity_weight()
                );
            }
        }
    }

    Ok(())
}

fn run_show(id: &str, catalog_path: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;

    let record = catalog
        .get(&SpeciesId::new(id))
        .ok_or_else(|| anyhow::anyhow!("Record '{}' not found", id))?;

    match format {
        OutputFormat::Text => {
            println!("Species: {}\n", record.species);
            println!("ID:           {}", record.id);
            println!("Common name:  {}", record.common_name);
            match record.authenticity {
                Some(weight) => println!("Authenticity: {weight:.2}"),
                None => println!("Authenticity: 1.00 (default)"),
            }
            println!("Barcodes:     {}", record.barcodes.len());
            for (region, sequence) in &record.barcodes {
                println!("\n  {region} ({} bp)", sequence.len());
                println!("  {sequence}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
        OutputFormat::Tsv => {
            println!("id\tregion\tlength\tsequence");
            for (region, sequence) in &record.barcodes {
                println!("{}\t{region}\t{}\t{sequence}", record.id, sequence.len());
            }
        }
    }

    Ok(())
}

fn run_export(output: &std::path::Path, catalog_path: Option<PathBuf>) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;

    let json = catalog.to_json()?;
    std::fs::write(output, json)?;

    println!(
        "Exported {} records to {}",
        catalog.len(),
        output.display()
    );

    Ok(())
}

fn run_samples(catalog_path: Option<PathBuf>, format: OutputFormat) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog_path.as_deref())?;
    let samples = list_samples(&catalog.records);

    match format {
        OutputFormat::Text => {
            for (common_name, sequence) in &samples {
                println!("{common_name}\n  {sequence}");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&samples)?),
        OutputFormat::Tsv => {
            println!("common_name\tsequence");
            for (common_name, sequence) in &samples {
                println!("{common_name}\t{sequence}");
            }
        }
    }

    Ok(())
}

fn run_add(record: SpeciesRecord, catalog_path: &std::path::Path, force: bool) -> anyhow::Result<()> {
    let mut catalog = if catalog_path.exists() {
        SpeciesCatalog::load_from_file(catalog_path)?
    } else {
        SpeciesCatalog::new()
    };

    let id = record.id.clone();
    if catalog.get(&id).is_some() {
        if force {
            eprintln!("Warning: Overwriting existing record '{id}'");
        } else {
            anyhow::bail!("Record '{id}' already exists in catalog. Use --force to overwrite.");
        }
    }

    catalog.add_record(record);
    std::fs::write(catalog_path, catalog.to_json()?)?;

    println!(
        "Added record '{}' to {} ({} total records)",
        id,
        catalog_path.display(),
        catalog.len()
    );

    Ok(())
}

fn region_list(record: &SpeciesRecord) -> String {
    record
        .barcodes
        .keys()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
