use serde::Serialize;

use crate::core::region::{BarcodeRegion, RegionPrototypes};
use crate::core::sequence::NucleotideSequence;
use crate::matching::scoring::similarity;

/// Similarity of a query against one region prototype
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionScore {
    pub region: BarcodeRegion,
    pub score: f64,
}

/// Score a sequence against every prototype, in prototype order
pub fn score_regions(seq: &NucleotideSequence, prototypes: &RegionPrototypes) -> Vec<RegionScore> {
    prototypes
        .iter()
        .map(|(region, prototype)| RegionScore {
            region,
            score: similarity(seq.as_bytes(), prototype.as_bytes()),
        })
        .collect()
}

/// Pick the region whose prototype is most similar to `seq`.
///
/// Only a strictly higher score replaces the current best, so ties go to the
/// prototype that comes first. Returns `None` when no prototype scores above
/// zero, including when `prototypes` is empty.
pub fn classify(seq: &NucleotideSequence, prototypes: &RegionPrototypes) -> Option<BarcodeRegion> {
    let mut best: Option<BarcodeRegion> = None;
    let mut highest = 0.0;

    for RegionScore { region, score } in score_regions(seq, prototypes) {
        if score > highest {
            highest = score;
            best = Some(region);
        }
    }

    best
}
