//! Core data types for barcode identification.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`NucleotideSequence`]: A validated A/T/G/C sequence produced by [`normalize`]
//! - [`BarcodeRegion`], [`RegionPrototypes`]: Marker loci and their classification prototypes
//! - [`SpeciesRecord`]: A reference organism with per-region barcodes
//! - [`SpeciesId`], [`Confidence`]: Identifier and result classification types
//!
//! ## Regions
//!
//! | Region | Genome      | Typical use                  |
//! |--------|-------------|------------------------------|
//! | ITS    | Nuclear     | Species-level discrimination |
//! | RBCL   | Chloroplast | Genus/family placement       |
//! | MATK   | Chloroplast | Species-level, land plants   |
//!
//! [`NucleotideSequence`]: sequence::NucleotideSequence
//! [`normalize`]: sequence::normalize
//! [`BarcodeRegion`]: region::BarcodeRegion
//! [`RegionPrototypes`]: region::RegionPrototypes
//! [`SpeciesRecord`]: record::SpeciesRecord
//! [`SpeciesId`]: types::SpeciesId
//! [`Confidence`]: types::Confidence

pub mod record;
pub mod region;
pub mod sequence;
pub mod types;
