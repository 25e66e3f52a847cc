use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::catalog::store::SpeciesCatalog;
use crate::cli::{load_catalog, OutputFormat, CATALOG_ENV};
use crate::core::sequence::normalize;
use crate::matching::classifier::{score_regions, RegionScore};
use crate::matching::engine::{AnalysisError, MatchResult, MatchingEngine};
use crate::parsing::fasta::{parse_query_file, parse_query_text, QuerySequence};

#[derive(Args)]
pub struct IdentifyArgs {
    /// Input file (FASTA, optionally gzipped, or raw sequence text)
    /// Use '-' for stdin
    #[arg(required_unless_present = "sequence", conflicts_with = "sequence")]
    pub input: Option<PathBuf>,

    /// Sequence given directly on the command line
    #[arg(short, long)]
    pub sequence: Option<String>,

    /// Path to custom catalog file
    #[arg(long, env = CATALOG_ENV)]
    pub catalog: Option<PathBuf>,

    /// Show the similarity of each query to every region prototype
    #[arg(long)]
    pub show_regions: bool,
}

/// Outcome for one query, as rendered in JSON output
#[derive(Serialize)]
struct QueryReport<'a> {
    query: &'a str,
    #[serde(flatten)]
    outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    region_scores: Option<Vec<RegionScore>>,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Outcome {
    Match { result: MatchResult },
    InvalidSequence { error: String },
    NoMatch { error: String },
}

impl From<Result<MatchResult, AnalysisError>> for Outcome {
    fn from(result: Result<MatchResult, AnalysisError>) -> Self {
        match result {
            Ok(result) => Self::Match { result },
            Err(e @ AnalysisError::InvalidSequence(_)) => Self::InvalidSequence {
                error: e.to_string(),
            },
            Err(e @ AnalysisError::NoMatch { .. }) => Self::NoMatch {
                error: e.to_string(),
            },
        }
    }
}

/// Execute identify subcommand
///
/// # Errors
///
/// Returns an error if the input or catalog cannot be read. Queries that fail
/// validation or find no match are reported, not treated as errors.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: IdentifyArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let queries = read_queries(&args)?;
    let catalog = load_catalog(args.catalog.as_deref())?;

    if verbose {
        eprintln!(
            "Loaded catalog with {} records and {} region prototypes",
            catalog.len(),
            catalog.prototypes.len()
        );
        eprintln!("Read {} query sequence(s)", queries.len());
    }

    if catalog.is_empty() {
        eprintln!("Warning: Catalog is empty, no records to match against.");
    }

    let reports = build_reports(&queries, &catalog, args.show_regions);

    match format {
        OutputFormat::Text => print_text_results(&reports),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Tsv => print_tsv_results(&reports),
    }

    Ok(())
}

fn read_queries(args: &IdentifyArgs) -> anyhow::Result<Vec<QuerySequence>> {
    use std::io::{self, Read};

    if let Some(sequence) = &args.sequence {
        return Ok(vec![QuerySequence::new("query", sequence.clone())]);
    }

    let Some(input) = &args.input else {
        anyhow::bail!("No input given: pass a file, '-' for stdin, or --sequence");
    };

    // Handle stdin
    if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(parse_query_text(&buffer)?);
    }

    Ok(parse_query_file(input)?)
}

fn build_reports<'a>(
    queries: &'a [QuerySequence],
    catalog: &SpeciesCatalog,
    show_regions: bool,
) -> Vec<QueryReport<'a>> {
    let engine = MatchingEngine::new(&catalog.prototypes, &catalog.records);

    queries
        .iter()
        .map(|query| {
            let outcome = Outcome::from(engine.analyze(&query.raw));
            tracing::debug!(query = %query.name, "Analyzed query");

            let region_scores = if show_regions {
                normalize(&query.raw)
                    .ok()
                    .map(|seq| score_regions(&seq, &catalog.prototypes))
            } else {
                None
            };

            QueryReport {
                query: &query.name,
                outcome,
                region_scores,
            }
        })
        .collect()
}

fn print_text_results(reports: &[QueryReport]) {
    for (i, report) in reports.iter().enumerate() {
        if i > 0 {
            println!("\n{}", "─".repeat(60));
        }

        println!("\nQuery: {}", report.query);

        match &report.outcome {
            Outcome::Match { result } => {
                println!(
                    "   {} ({}) [{}]",
                    result.matched_species,
                    result.common_name,
                    result.confidence.label()
                );
                println!("   ID: {}", result.species_id);
                println!("   Region: {}", result.barcode_region);
                println!("   Match: {:.1}%", result.match_percentage);
                println!("   Confidence score: {:.3}", result.confidence_score);
                println!("   Sequence length: {} bp", result.sequence.len());
            }
            Outcome::InvalidSequence { error } | Outcome::NoMatch { error } => {
                println!("   {error}");
            }
        }

        if let Some(scores) = &report.region_scores {
            println!("\n   Region similarity:");
            for RegionScore { region, score } in scores {
                println!("   - {region:<5} {:.1}%", score * 100.0);
            }
        }
    }
}

fn print_tsv_results(reports: &[QueryReport]) {
    println!(
        "query\tstatus\tspecies\tcommon_name\tregion\tmatch_percentage\tconfidence_score\tconfidence"
    );

    for report in reports {
        match &report.outcome {
            Outcome::Match { result } => println!(
                "{}\tmatch\t{}\t{}\t{}\t{:.2}\t{:.4}\t{:?}",
                report.query,
                result.matched_species,
                result.common_name,
                result.barcode_region,
                result.match_percentage,
                result.confidence_score,
                result.confidence
            ),
            Outcome::InvalidSequence { .. } => {
                println!("{}\tinvalid_sequence\t\t\t\t\t\t", report.query);
            }
            Outcome::NoMatch { .. } => println!("{}\tno_match\t\t\t\t\t\t", report.query),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_reports_mixed_outcomes() {
        let catalog = SpeciesCatalog::load_embedded().unwrap();
        let queries = vec![
            QuerySequence::new(
                "ginseng",
                "CGTAACAAGGTTTCCGTAGGTGAACCTGCGGAAGGATCATTGTCGAAACCTGCATAGCAGAA",
            ),
            QuerySequence::new("garbage", "xyz123"),
        ];

        let reports = build_reports(&queries, &catalog, true);
        assert_eq!(reports.len(), 2);

        match &reports[0].outcome {
            Outcome::Match { result } => assert_eq!(result.matched_species, "Panax ginseng"),
            _ => panic!("expected a match"),
        }
        assert_eq!(reports[0].region_scores.as_ref().map(Vec::len), Some(3));

        assert!(matches!(
            reports[1].outcome,
            Outcome::InvalidSequence { .. }
        ));
        assert!(reports[1].region_scores.is_none());
    }

    #[test]
    fn test_report_json_shape() {
        let catalog = SpeciesCatalog::load_embedded().unwrap();
        let queries = vec![QuerySequence::new("q", "ATGTCACCACAAACAGAGACTAAAGCAAGTGTTGG")];

        let reports = build_reports(&queries, &catalog, false);
        let json = serde_json::to_value(&reports).unwrap();

        assert_eq!(json[0]["query"], "q");
        assert_eq!(json[0]["status"], "match");
        assert_eq!(json[0]["result"]["barcodeRegion"], "RBCL");
        assert!(json[0].get("region_scores").is_none());
    }
}
