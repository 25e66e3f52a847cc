use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::region::BarcodeRegion;
use crate::core::sequence::NucleotideSequence;
use crate::core::types::SpeciesId;

/// Weight applied when a record carries no authenticity value
pub const DEFAULT_AUTHENTICITY: f64 = 1.0;

/// A reference organism with its barcode sequences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    /// Unique identifier
    pub id: SpeciesId,

    /// Scientific name, e.g. "Panax ginseng"
    pub species: String,

    /// Common name, e.g. "Asian Ginseng"
    pub common_name: String,

    /// Reference sequence per region. Not every region need be present;
    /// iteration follows the canonical region order.
    #[serde(default)]
    pub barcodes: BTreeMap<BarcodeRegion, NucleotideSequence>,

    /// Prior confidence in this record's reference data, in [0, 1]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticity: Option<f64>,
}

impl SpeciesRecord {
    pub fn new(
        id: impl Into<String>,
        species: impl Into<String>,
        common_name: impl Into<String>,
    ) -> Self {
        Self {
            id: SpeciesId::new(id),
            species: species.into(),
            common_name: common_name.into(),
            barcodes: BTreeMap::new(),
            authenticity: None,
        }
    }

    #[must_use]
    pub fn with_barcode(mut self, region: BarcodeRegion, sequence: NucleotideSequence) -> Self {
        self.barcodes.insert(region, sequence);
        self
    }

    #[must_use]
    pub fn with_authenticity(mut self, weight: f64) -> Self {
        self.authenticity = Some(weight);
        self
    }

    pub fn barcode(&self, region: BarcodeRegion) -> Option<&NucleotideSequence> {
        self.barcodes.get(&region)
    }

    pub fn has_region(&self, region: BarcodeRegion) -> bool {
        self.barcodes.contains_key(&region)
    }

    pub fn authenticity_weight(&self) -> f64 {
        self.authenticity.unwrap_or(DEFAULT_AUTHENTICITY)
    }

    /// First barcode in canonical region order, used as the record's sample
    pub fn representative_barcode(&self) -> Option<(BarcodeRegion, &NucleotideSequence)> {
        self.barcodes.iter().next().map(|(r, s)| (*r, s))
    }
}
