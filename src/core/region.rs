use serde::{Deserialize, Serialize};

use crate::core::sequence::{is_normalized, NucleotideSequence};

/// A DNA barcode marker locus.
///
/// Declaration order is the canonical region order: it orders the per-record
/// barcode maps and breaks ties in [`RegionPrototypes::standard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BarcodeRegion {
    /// Nuclear ribosomal internal transcribed spacer
    Its,
    /// Chloroplast ribulose-bisphosphate carboxylase large subunit
    Rbcl,
    /// Chloroplast maturase K
    Matk,
}

impl BarcodeRegion {
    pub const ALL: [Self; 3] = [Self::Its, Self::Rbcl, Self::Matk];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Its => "ITS",
            Self::Rbcl => "RBCL",
            Self::Matk => "MATK",
        }
    }
}

impl std::fmt::Display for BarcodeRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for BarcodeRegion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!("Unknown barcode region '{s}' (expected one of: ITS, RBCL, MATK)")
            })
    }
}

/// One region and the prototype sequence used to recognise it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionPrototype {
    pub region: BarcodeRegion,
    pub prototype: NucleotideSequence,
}

/// Ordered reference prototypes for region classification.
///
/// Order is significant: when two regions score equally, the one added first
/// wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionPrototypes(Vec<RegionPrototype>);

const ITS_PROTOTYPE: &str = "CGTAACAAGGTTTCCGTAGGTGAACCTGCGGAAGGATCATTG";
const RBCL_PROTOTYPE: &str = "ATGTCACCACAAACAGAGACTAAAGCAAGT";
const MATK_PROTOTYPE: &str = "ACCCAGTCCATCTGGAAATCTTGGTTCAGG";

const _: () = assert!(
    is_normalized(ITS_PROTOTYPE) && is_normalized(RBCL_PROTOTYPE) && is_normalized(MATK_PROTOTYPE)
);

impl RegionPrototypes {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Built-in prototypes for ITS, RBCL and MATK, in that order
    pub fn standard() -> Self {
        Self::new()
            .with(BarcodeRegion::Its, NucleotideSequence::from_static(ITS_PROTOTYPE))
            .with(BarcodeRegion::Rbcl, NucleotideSequence::from_static(RBCL_PROTOTYPE))
            .with(BarcodeRegion::Matk, NucleotideSequence::from_static(MATK_PROTOTYPE))
    }

    /// Append a prototype. A region that is already present keeps its
    /// original position and gets the new sequence.
    pub fn push(&mut self, region: BarcodeRegion, prototype: NucleotideSequence) {
        if let Some(existing) = self.0.iter_mut().find(|p| p.region == region) {
            existing.prototype = prototype;
        } else {
            self.0.push(RegionPrototype { region, prototype });
        }
    }

    pub fn with(mut self, region: BarcodeRegion, prototype: NucleotideSequence) -> Self {
        self.push(region, prototype);
        self
    }

    pub fn get(&self, region: BarcodeRegion) -> Option<&NucleotideSequence> {
        self.0
            .iter()
            .find(|p| p.region == region)
            .map(|p| &p.prototype)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BarcodeRegion, &NucleotideSequence)> {
        self.0.iter().map(|p| (p.region, &p.prototype))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sequence::normalize;

    #[test]
    fn test_region_parse_case_insensitive() {
        assert_eq!("its".parse::<BarcodeRegion>(), Ok(BarcodeRegion::Its));
        assert_eq!(" RbcL ".parse::<BarcodeRegion>(), Ok(BarcodeRegion::Rbcl));
        assert_eq!("MATK".parse::<BarcodeRegion>(), Ok(BarcodeRegion::Matk));
        assert!("trnH".parse::<BarcodeRegion>().is_err());
    }

    #[test]
    fn test_region_serde_uppercase() {
        assert_eq!(
            serde_json::to_string(&BarcodeRegion::Rbcl).unwrap(),
            "\"RBCL\""
        );
        let region: BarcodeRegion = serde_json::from_str("\"MATK\"").unwrap();
        assert_eq!(region, BarcodeRegion::Matk);
    }

    #[test]
    fn test_standard_prototypes_in_declaration_order() {
        let prototypes = RegionPrototypes::standard();
        let regions: Vec<BarcodeRegion> = prototypes.iter().map(|(r, _)| r).collect();
        assert_eq!(regions, BarcodeRegion::ALL.to_vec());
        assert_eq!(
            prototypes.get(BarcodeRegion::Rbcl).unwrap().as_str(),
            RBCL_PROTOTYPE
        );
    }

    #[test]
    fn test_standard_prototypes_are_normalized() {
        let prototypes = RegionPrototypes::standard();
        assert_eq!(prototypes.len(), BarcodeRegion::ALL.len());
        for (region, raw) in [
            (BarcodeRegion::Its, ITS_PROTOTYPE),
            (BarcodeRegion::Rbcl, RBCL_PROTOTYPE),
            (BarcodeRegion::Matk, MATK_PROTOTYPE),
        ] {
            assert_eq!(prototypes.get(region), Some(&normalize(raw).unwrap()));
        }
    }

    #[test]
    fn test_push_existing_region_keeps_position() {
        let mut prototypes = RegionPrototypes::standard();
        prototypes.push(BarcodeRegion::Its, normalize("AAAA").unwrap());

        assert_eq!(prototypes.len(), 3);
        let (first, seq) = prototypes.iter().next().unwrap();
        assert_eq!(first, BarcodeRegion::Its);
        assert_eq!(seq.as_str(), "AAAA");
    }
}
