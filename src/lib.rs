//! # barcode-solver
//!
//! A library for identifying plant species from short DNA barcode sequences.
//!
//! Herbal products and botanical samples are often sold under a common name
//! with no guarantee of what is actually in the bag. A short stretch of DNA
//! from a standard barcode locus is usually enough to tell species apart.
//!
//! `barcode-solver` first works out which barcode region a sequence comes from
//! (ITS, rbcL or matK), then compares it against the reference barcodes for
//! that region in a species catalog and reports the closest record.
//!
//! ## Features
//!
//! - **Region classification**: Picks the locus a sequence most resembles
//! - **Species search**: Finds the closest reference barcode for that locus
//! - **Authenticity weighting**: Scales confidence by how trusted a reference is
//! - **Embedded catalog**: A validated default catalog is compiled in
//! - **Live catalogs**: A catalog file can be re-read on every request
//!
//! ## Example
//!
//! ```rust
//! use barcode_solver::{AnalysisError, MatchingEngine, SpeciesCatalog};
//!
//! // Load the embedded catalog of reference barcodes
//! let catalog = SpeciesCatalog::load_embedded().unwrap();
//! let engine = MatchingEngine::new(&catalog.prototypes, &catalog.records);
//!
//! let result = engine
//!     .analyze("cgtaacaagg tttccgtagg tgaacctgcg gaaggatcat tgtcgaaacc tgcatagcag aa")
//!     .unwrap();
//! println!("{} ({:.1}%)", result.matched_species, result.match_percentage);
//!
//! assert!(matches!(
//!     engine.analyze("not dna"),
//!     Err(AnalysisError::InvalidSequence(_))
//! ));
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Species catalog storage and record sources
//! - [`core`]: Sequences, regions, records and result types
//! - [`matching`]: Scoring, region classification and species search
//! - [`parsing`]: Readers for FASTA and raw-text query input
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: HTTP API

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::source::{CatalogFile, RecordSource};
pub use catalog::store::{CatalogError, SpeciesCatalog};
pub use core::record::SpeciesRecord;
pub use core::region::{BarcodeRegion, RegionPrototypes};
pub use core::sequence::{normalize, NucleotideSequence, SequenceError};
pub use core::types::*;
pub use matching::classifier::classify;
pub use matching::engine::{analyze, list_samples, search, AnalysisError, MatchResult, MatchingEngine};
pub use matching::scoring::similarity;
