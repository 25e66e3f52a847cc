use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

use crate::core::record::SpeciesRecord;
use crate::core::region::{BarcodeRegion, RegionPrototypes};
use crate::core::types::SpeciesId;
use crate::utils::validation::{check_record_limit, validate_authenticity, ValidationError};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    Invalid(#[from] ValidationError),
}

/// Catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    pub created_at: String,
    #[serde(default)]
    pub regions: RegionPrototypes,
    pub records: Vec<SpeciesRecord>,
}

/// Region prototypes plus the ordered species records, with lookup indexes
#[derive(Debug, Clone)]
pub struct SpeciesCatalog {
    /// Prototypes used to classify a query's region
    pub prototypes: RegionPrototypes,

    /// All records, in insertion order
    pub records: Vec<SpeciesRecord>,

    /// Index: species ID -> index in records vec
    id_to_index: HashMap<SpeciesId, usize>,

    /// Index: region -> indices of records carrying that region, ascending
    region_to_records: HashMap<BarcodeRegion, Vec<usize>>,
}

impl SpeciesCatalog {
    /// Create an empty catalog using the standard region prototypes
    pub fn new() -> Self {
        Self::with_prototypes(RegionPrototypes::standard())
    }

    pub fn with_prototypes(prototypes: RegionPrototypes) -> Self {
        Self {
            prototypes,
            records: Vec::new(),
            id_to_index: HashMap::new(),
            region_to_records: HashMap::new(),
        }
    }

    /// Load the embedded default catalog
    pub fn load_embedded() -> Result<Self, CatalogError> {
        // Validated at compile time by build.rs
        const EMBEDDED_CATALOG: &str = include_str!("../../catalogs/plant_barcodes.json");
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load catalog from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse catalog from JSON string.
    ///
    /// A catalog without a `regions` section falls back to the standard
    /// prototypes.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            tracing::warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION,
                data.version
            );
        }

        check_record_limit(data.records.len())?;

        let mut seen_regions = HashSet::new();
        for (region, _) in data.regions.iter() {
            if !seen_regions.insert(region) {
                return Err(ValidationError::DuplicateRegion(region.to_string()).into());
            }
        }

        let prototypes = if data.regions.is_empty() {
            RegionPrototypes::standard()
        } else {
            data.regions
        };

        let mut seen = HashSet::new();
        let mut catalog = Self::with_prototypes(prototypes);
        for record in data.records {
            if let Some(weight) = record.authenticity {
                validate_authenticity(weight)?;
            }
            if !seen.insert(record.id.clone()) {
                return Err(ValidationError::DuplicateId(record.id.0).into());
            }
            catalog.add_record(record);
        }

        Ok(catalog)
    }

    /// Add a record to the end of the catalog.
    ///
    /// A record whose id is already present replaces the earlier one in place,
    /// keeping its position.
    pub fn add_record(&mut self, record: SpeciesRecord) {
        if let Some(&index) = self.id_to_index.get(&record.id) {
            self.records[index] = record;
            self.rebuild_region_index();
            return;
        }

        let index = self.records.len();
        self.id_to_index.insert(record.id.clone(), index);
        for region in record.barcodes.keys() {
            self.region_to_records
                .entry(*region)
                .or_default()
                .push(index);
        }
        self.records.push(record);
    }

    fn rebuild_region_index(&mut self) {
        self.region_to_records.clear();
        for (index, record) in self.records.iter().enumerate() {
            for region in record.barcodes.keys() {
                self.region_to_records
                    .entry(*region)
                    .or_default()
                    .push(index);
            }
        }
    }

    /// Get a record by ID
    pub fn get(&self, id: &SpeciesId) -> Option<&SpeciesRecord> {
        self.id_to_index.get(id).map(|&idx| &self.records[idx])
    }

    /// Records carrying a barcode for `region`, in catalog order
    pub fn records_with_region(&self, region: BarcodeRegion) -> Vec<&SpeciesRecord> {
        self.region_to_records
            .get(&region)
            .map(|indices| indices.iter().map(|&i| &self.records[i]).collect())
            .unwrap_or_default()
    }

    /// Export catalog to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            regions: self.prototypes.clone(),
            records: self.records.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Number of records in catalog
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if catalog has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for SpeciesCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sequence::normalize;

    #[test]
    fn test_load_embedded_catalog() {
        let catalog = SpeciesCatalog::load_embedded().unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.prototypes, RegionPrototypes::standard());
    }

    #[test]
    fn test_catalog_get_by_id() {
        let catalog = SpeciesCatalog::load_embedded().unwrap();

        let ginseng = catalog.get(&SpeciesId::new("panax_ginseng")).unwrap();
        assert_eq!(ginseng.species, "Panax ginseng");
        assert_eq!(ginseng.common_name, "Asian Ginseng");
        assert_eq!(ginseng.authenticity, Some(0.97));
        assert_eq!(ginseng.barcodes.len(), 3);
    }

    #[test]
    fn test_catalog_get_nonexistent() {
        let catalog = SpeciesCatalog::load_embedded().unwrap();
        assert!(catalog.get(&SpeciesId::new("nonexistent")).is_none());
    }

    #[test]
    fn test_catalog_preserves_record_order() {
        let catalog = SpeciesCatalog::load_embedded().unwrap();
        let ids: Vec<&str> = catalog.records.iter().map(|r| r.id.0.as_str()).collect();
        assert_eq!(ids, ["panax_ginseng", "ocimum_basilicum", "curcuma_longa"]);
    }

    #[test]
    fn test_catalog_to_json_round_trip() {
        let catalog = SpeciesCatalog::load_embedded().unwrap();
        let json = catalog.to_json().unwrap();

        assert!(json.contains("\"version\""));
        assert!(json.contains("\"regions\""));
        assert!(json.contains("panax_ginseng"));

        let reloaded = SpeciesCatalog::from_json(&json).unwrap();
        assert_eq!(reloaded.records, catalog.records);
        assert_eq!(reloaded.prototypes, catalog.prototypes);
    }

    #[test]
    fn test_missing_regions_use_standard_prototypes() {
        let json = r#"{"version": "1.0.0", "created_at": "", "records": []}"#;
        let catalog = SpeciesCatalog::from_json(json).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.prototypes, RegionPrototypes::standard());
    }

    #[test]
    fn test_rejects_invalid_records() {
        let bad_weight = r#"{"version": "1.0.0", "created_at": "", "records": [
            {"id": "a", "species": "A", "common_name": "A", "authenticity": 1.5}
        ]}"#;
        assert!(matches!(
            SpeciesCatalog::from_json(bad_weight),
            Err(CatalogError::Invalid(ValidationError::AuthenticityOutOfRange(_)))
        ));

        let duplicate = r#"{"version": "1.0.0", "created_at": "", "records": [
            {"id": "a", "species": "A", "common_name": "A"},
            {"id": "a", "species": "B", "common_name": "B"}
        ]}"#;
        assert!(matches!(
            SpeciesCatalog::from_json(duplicate),
            Err(CatalogError::Invalid(ValidationError::DuplicateId(_)))
        ));

        let duplicate_region = r#"{"version": "1.0.0", "created_at": "", "regions": [
            {"region": "ITS", "prototype": "ACGT"},
            {"region": "RBCL", "prototype": "CCCC"},
            {"region": "ITS", "prototype": "GGGG"}
        ], "records": []}"#;
        assert!(matches!(
            SpeciesCatalog::from_json(duplicate_region),
            Err(CatalogError::Invalid(ValidationError::DuplicateRegion(ref r))) if r == "ITS"
        ));

        let bad_sequence = r#"{"version": "1.0.0", "created_at": "", "records": [
            {"id": "a", "species": "A", "common_name": "A", "barcodes": {"ITS": "ACGN"}}
        ]}"#;
        assert!(matches!(
            SpeciesCatalog::from_json(bad_sequence),
            Err(CatalogError::ParseError(_))
        ));
    }

    #[test]
    fn test_add_record_and_region_index() {
        let mut catalog = SpeciesCatalog::new();
        assert!(catalog.is_empty());

        catalog.add_record(
            SpeciesRecord::new("a", "A a", "Alpha")
                .with_barcode(BarcodeRegion::Its, normalize("ACGT").unwrap()),
        );
        catalog.add_record(
            SpeciesRecord::new("b", "B b", "Beta")
                .with_barcode(BarcodeRegion::Rbcl, normalize("ACGT").unwrap()),
        );
        assert_eq!(catalog.len(), 2);

        let its: Vec<&str> = catalog
            .records_with_region(BarcodeRegion::Its)
            .iter()
            .map(|r| r.id.0.as_str())
            .collect();
        assert_eq!(its, ["a"]);
        assert!(catalog.records_with_region(BarcodeRegion::Matk).is_empty());

        // Replacing a record keeps its slot and refreshes the region index
        catalog.add_record(
            SpeciesRecord::new("a", "A a", "Alpha")
                .with_barcode(BarcodeRegion::Matk, normalize("ACGT").unwrap()),
        );
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.records[0].id, SpeciesId::new("a"));
        assert!(catalog.records_with_region(BarcodeRegion::Its).is_empty());
        assert_eq!(catalog.records_with_region(BarcodeRegion::Matk).len(), 1);
    }
}
