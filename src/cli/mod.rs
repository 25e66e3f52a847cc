//! Command-line interface for barcode-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **identify**: Identify the species for one or more query sequences
//! - **compare**: Positional similarity between two sequences
//! - **catalog**: List, show, export or sample records from the catalog
//! - **serve**: Start the HTTP API
//!
//! ## Usage
//!
//! ```text
//! # Identify a pasted sequence
//! barcode-solver identify --sequence CGTAACAAGGTTTCCGTAGG
//!
//! # Identify every record in a FASTA file, JSON output
//! barcode-solver identify samples.fa --format json
//!
//! # Pipe from another tool
//! cat query.txt | barcode-solver identify -
//!
//! # Use a custom catalog
//! barcode-solver identify samples.fa --catalog my_plants.json
//!
//! # Start the API
//! barcode-solver serve --port 8000
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::catalog::store::SpeciesCatalog;

pub mod catalog;
pub mod compare;
pub mod identify;

/// Environment variable naming a catalog file to use instead of the embedded one
pub const CATALOG_ENV: &str = "BARCODE_CATALOG";

#[derive(Parser)]
#[command(name = "barcode-solver")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Identify plant species from DNA barcode sequences")]
#[command(
    long_about = "barcode-solver identifies a plant species from a short DNA sequence.\n\nThe sequence is classified into a barcode region (ITS, rbcL or matK) and compared against a catalog of reference barcodes, reporting:\n- The best-matching species and its common name\n- The raw positional match percentage\n- A confidence score weighted by the reference record's authenticity"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Identify the species for one or more DNA sequences
    Identify(identify::IdentifyArgs),

    /// Compare two sequences position by position
    Compare(compare::CompareArgs),

    /// Inspect the species catalog
    Catalog(catalog::CatalogArgs),

    /// Start the web server
    Serve(ServeArgs),
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8000")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,

    /// Path to custom catalog file
    #[arg(long, env = CATALOG_ENV)]
    pub catalog: Option<PathBuf>,

    /// Re-read the catalog file on every request (requires --catalog)
    #[arg(long, requires = "catalog")]
    pub live: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load a custom catalog when a path is given, otherwise the embedded one
///
/// # Errors
///
/// Returns an error if the catalog cannot be read or parsed.
pub fn load_catalog(path: Option<&Path>) -> anyhow::Result<SpeciesCatalog> {
    let catalog = match path {
        Some(path) => SpeciesCatalog::load_from_file(path)
            .map_err(|e| anyhow::anyhow!("{}: {e}", path.display()))?,
        None => SpeciesCatalog::load_embedded()?,
    };

    tracing::debug!(
        records = catalog.len(),
        regions = catalog.prototypes.len(),
        "Loaded catalog"
    );

    Ok(catalog)
}
