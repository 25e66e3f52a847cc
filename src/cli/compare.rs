use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_catalog, OutputFormat, CATALOG_ENV};
use crate::core::region::BarcodeRegion;
use crate::core::sequence::{normalize, NucleotideSequence};
use crate::core::types::SpeciesId;
use crate::matching::classifier::classify;
use crate::matching::scoring::similarity;

#[derive(Args)]
pub struct CompareArgs {
    /// First sequence
    #[arg(required = true)]
    pub sequence_a: String,

    /// Second sequence, or a record ID from the catalog (with --record)
    #[arg(required = true)]
    pub sequence_b: String,

    /// Treat the second argument as a record ID from the catalog
    #[arg(long)]
    pub record: bool,

    /// Region of the record's barcode to compare against (default: the
    /// region the first sequence classifies into)
    #[arg(long, requires = "record")]
    pub region: Option<BarcodeRegion>,

    /// Path to custom catalog file
    #[arg(long, env = CATALOG_ENV)]
    pub catalog: Option<PathBuf>,
}

struct Comparison {
    a: NucleotideSequence,
    b: NucleotideSequence,
    region_a: Option<BarcodeRegion>,
    region_b: Option<BarcodeRegion>,
    similarity: f64,
}

/// Execute compare subcommand
///
/// # Errors
///
/// Returns an error if either sequence is invalid, the catalog cannot be
/// loaded, or the requested record/region does not exist.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: CompareArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;

    let a = normalize(&args.sequence_a).map_err(|e| anyhow::anyhow!("Sequence A: {e}"))?;
    let region_a = classify(&a, &catalog.prototypes);

    let b = if args.record {
        let id = SpeciesId::new(&args.sequence_b);
        let record = catalog
            .get(&id)
            .ok_or_else(|| anyhow::anyhow!("Record '{}' not found in catalog", args.sequence_b))?;

        let region = args.region.or(region_a).ok_or_else(|| {
            anyhow::anyhow!("Sequence A matches no barcode region; pass --region")
        })?;

        if verbose {
            eprintln!("Comparing against {} {} barcode", record.species, region);
        }

        record.barcode(region).cloned().ok_or_else(|| {
            anyhow::anyhow!("Record '{}' has no {region} barcode", args.sequence_b)
        })?
    } else {
        normalize(&args.sequence_b).map_err(|e| anyhow::anyhow!("Sequence B: {e}"))?
    };

    let comparison = Comparison {
        region_b: classify(&b, &catalog.prototypes),
        similarity: similarity(a.as_bytes(), b.as_bytes()),
        a,
        b,
        region_a,
    };

    match format {
        OutputFormat::Text => print_text_comparison(&comparison),
        OutputFormat::Json => print_json_comparison(&comparison)?,
        OutputFormat::Tsv => print_tsv_comparison(&comparison),
    }

    Ok(())
}

fn region_label(region: Option<BarcodeRegion>) -> String {
    region.map_or_else(|| "unclassified".to_string(), |r| r.to_string())
}

fn print_text_comparison(c: &Comparison) {
    println!("Comparison Results");
    println!("{}", "=".repeat(60));

    println!("\nSequence A:");
    println!("  Length: {} bp", c.a.len());
    println!("  Region: {}", region_label(c.region_a));

    println!("\nSequence B:");
    println!("  Length: {} bp", c.b.len());
    println!("  Region: {}", region_label(c.region_b));

    println!("\nSimilarity:");
    println!("  Compared positions: {}", c.a.len().min(c.b.len()));
    println!("  Positional match: {:.2}%", c.similarity * 100.0);
}

fn print_json_comparison(c: &Comparison) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "sequence_a": {
            "length": c.a.len(),
            "region": c.region_a,
        },
        "sequence_b": {
            "length": c.b.len(),
            "region": c.region_b,
        },
        "compared_positions": c.a.len().min(c.b.len()),
        "similarity": c.similarity,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_comparison(c: &Comparison) {
    println!("length_a\tlength_b\tregion_a\tregion_b\tsimilarity");
    println!(
        "{}\t{}\t{}\t{}\t{:.4}",
        c.a.len(),
        c.b.len(),
        region_label(c.region_a),
        region_label(c.region_b),
        c.similarity
    );
}
