//! Barcode classification, scoring and species search.
//!
//! This module provides the analysis core:
//!
//! - [`similarity`]: Positional similarity between two sequences
//! - [`classify`]: Picks the barcode region a sequence most resembles
//! - [`search`]: Finds the best-matching species record for a classified sequence
//! - [`analyze`]: Normalize → classify → search in one call
//!
//! ## Matching Algorithm
//!
//! 1. **Normalization**: Whitespace is removed and the rest upper-cased; anything
//!    outside A/T/G/C is rejected
//! 2. **Region classification**: The query is scored against each region prototype;
//!    the strictly highest score wins, ties go to the earlier prototype
//! 3. **Species search**: Every record with a barcode for that region is scored the
//!    same way; the strictly highest score wins, ties go to the earlier record
//!
//! Scores compare symbols index by index over the shorter sequence's length. There
//! is no alignment, so insertions and deletions shift everything after them out of
//! register.
//!
//! The core takes all reference data as parameters and performs no I/O or logging.
//!
//! ## Example
//!
//! ```rust
//! use barcode_solver::{analyze, SpeciesCatalog};
//!
//! let catalog = SpeciesCatalog::load_embedded().unwrap();
//! let result = analyze(
//!     "CGTAACAAGGTTTCCGTAGGTGAACCTGCGGAAGGATCATTGTCGAAACCTGCATAGCAGAA",
//!     &catalog.prototypes,
//!     &catalog.records,
//! )
//! .unwrap();
//!
//! assert_eq!(result.matched_species, "Panax ginseng");
//! assert_eq!(result.barcode_region.to_string(), "ITS");
//! ```
//!
//! [`similarity`]: scoring::similarity
//! [`classify`]: classifier::classify
//! [`search`]: engine::search
//! [`analyze`]: engine::analyze

pub mod classifier;
pub mod engine;
pub mod scoring;
