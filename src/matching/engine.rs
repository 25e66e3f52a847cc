use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::core::record::SpeciesRecord;
use crate::core::region::{BarcodeRegion, RegionPrototypes};
use crate::core::sequence::{normalize, NucleotideSequence, SequenceError};
use crate::core::types::{Confidence, SpeciesId};
use crate::matching::classifier::classify;
use crate::matching::scoring::similarity;

/// Non-success outcomes of [`analyze`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error(transparent)]
    InvalidSequence(#[from] SequenceError),

    /// `region` is `None` when the sequence matched no region prototype
    #[error("No match found: {}", no_match_detail(.region))]
    NoMatch { region: Option<BarcodeRegion> },
}

fn no_match_detail(region: &Option<BarcodeRegion>) -> String {
    match region {
        Some(r) => format!("no reference record has a {r} barcode"),
        None => "sequence does not resemble any barcode region".to_string(),
    }
}

/// Best-matching species for an analyzed sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub species_id: SpeciesId,

    /// Scientific name of the matched record
    pub matched_species: String,

    pub common_name: String,

    /// Region the query was classified into and compared on
    pub barcode_region: BarcodeRegion,

    /// Raw positional similarity scaled to 0-100
    pub match_percentage: f64,

    /// Raw similarity weighted by the record's authenticity
    pub confidence_score: f64,

    #[serde(rename = "confidenceLevel")]
    pub confidence: Confidence,

    /// The normalized query that was analyzed
    pub sequence: NucleotideSequence,
}

impl MatchResult {
    fn new(
        record: &SpeciesRecord,
        region: BarcodeRegion,
        score: f64,
        sequence: &NucleotideSequence,
    ) -> Self {
        let confidence_score = score * record.authenticity_weight();

        Self {
            species_id: record.id.clone(),
            matched_species: record.species.clone(),
            common_name: record.common_name.clone(),
            barcode_region: region,
            match_percentage: score * 100.0,
            confidence_score,
            confidence: Confidence::from_score(confidence_score),
            sequence: sequence.clone(),
        }
    }

    /// Raw match fraction in [0, 1]
    pub fn match_fraction(&self) -> f64 {
        self.match_percentage / 100.0
    }
}

/// Find the candidate whose `region` barcode is most similar to `seq`.
///
/// Candidates are scanned in order; only a strictly higher score replaces
/// the current best, so ties keep the earlier record. Records without a
/// barcode for `region` are skipped. A best score of 0.0 from an actual
/// comparison is still a match; `None` means there was nothing to compare
/// (no region, no candidates, or no candidate carrying the region).
pub fn search(
    seq: &NucleotideSequence,
    region: Option<BarcodeRegion>,
    candidates: &[SpeciesRecord],
) -> Option<MatchResult> {
    let region = region?;
    let mut best: Option<(&SpeciesRecord, f64)> = None;

    for record in candidates {
        let Some(reference) = record.barcode(region) else {
            continue;
        };
        let score = similarity(seq.as_bytes(), reference.as_bytes());

        match best {
            Some((_, highest)) if score <= highest => {}
            _ => best = Some((record, score)),
        }
    }

    best.map(|(record, score)| MatchResult::new(record, region, score, seq))
}

/// Normalize, classify and search in one step.
///
/// # Errors
///
/// Returns `AnalysisError::InvalidSequence` if `raw` fails normalization and
/// `AnalysisError::NoMatch` if no region or no comparable record is found.
pub fn analyze(
    raw: &str,
    prototypes: &RegionPrototypes,
    candidates: &[SpeciesRecord],
) -> Result<MatchResult, AnalysisError> {
    let seq = normalize(raw)?;
    let region = classify(&seq, prototypes);
    search(&seq, region, candidates).ok_or(AnalysisError::NoMatch { region })
}

/// One representative sequence per common name.
///
/// Each record contributes its first barcode in canonical region order;
/// records without barcodes are skipped. When two records share a common
/// name the later one wins.
pub fn list_samples(records: &[SpeciesRecord]) -> BTreeMap<String, NucleotideSequence> {
    let mut samples = BTreeMap::new();
    for record in records {
        if let Some((_, sequence)) = record.representative_barcode() {
            samples.insert(record.common_name.clone(), sequence.clone());
        }
    }
    samples
}

/// Convenience wrapper binding prototypes and a record snapshot together
pub struct MatchingEngine<'a> {
    prototypes: &'a RegionPrototypes,
    records: &'a [SpeciesRecord],
}

impl<'a> MatchingEngine<'a> {
    pub fn new(prototypes: &'a RegionPrototypes, records: &'a [SpeciesRecord]) -> Self {
        Self {
            prototypes,
            records,
        }
    }

    /// Analyze raw input against the bound snapshot
    ///
    /// # Errors
    ///
    /// See [`analyze`].
    pub fn analyze(&self, raw: &str) -> Result<MatchResult, AnalysisError> {
        analyze(raw, self.prototypes, self.records)
    }

    pub fn classify(&self, seq: &NucleotideSequence) -> Option<BarcodeRegion> {
        classify(seq, self.prototypes)
    }

    pub fn samples(&self) -> BTreeMap<String, NucleotideSequence> {
        list_samples(self.records)
    }
}
