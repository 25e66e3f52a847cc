use std::path::{Path, PathBuf};

use crate::catalog::store::{CatalogError, SpeciesCatalog};
use crate::core::record::SpeciesRecord;
use crate::core::region::BarcodeRegion;

/// Supplies species record snapshots to the analysis boundary.
///
/// Snapshots are returned in a stable insertion order; the search engine
/// breaks score ties by that order. With a region filter, only records
/// carrying a barcode for that region are returned, order preserved.
pub trait RecordSource: Send + Sync {
    /// Fetch the current records
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` when the backing store cannot deliver data.
    fn snapshot(&self, region: Option<BarcodeRegion>) -> Result<Vec<SpeciesRecord>, CatalogError>;
}

impl RecordSource for SpeciesCatalog {
    fn snapshot(&self, region: Option<BarcodeRegion>) -> Result<Vec<SpeciesRecord>, CatalogError> {
        Ok(match region {
            Some(region) => self
                .records_with_region(region)
                .into_iter()
                .cloned()
                .collect(),
            None => self.records.clone(),
        })
    }
}

/// A catalog file that is re-read on every snapshot, so edits show up
/// without restarting the server
#[derive(Debug, Clone)]
pub struct CatalogFile {
    path: PathBuf,
}

impl CatalogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for CatalogFile {
    fn snapshot(&self, region: Option<BarcodeRegion>) -> Result<Vec<SpeciesRecord>, CatalogError> {
        SpeciesCatalog::load_from_file(&self.path)?.snapshot(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_catalog_snapshot_filters_by_region() {
        let mut catalog = SpeciesCatalog::load_embedded().unwrap();
        catalog.add_record(SpeciesRecord::new("empty", "Nullus", "Nothing"));

        assert_eq!(catalog.snapshot(None).unwrap().len(), 4);

        let its = catalog.snapshot(Some(BarcodeRegion::Its)).unwrap();
        let ids: Vec<&str> = its.iter().map(|r| r.id.0.as_str()).collect();
        assert_eq!(ids, ["panax_ginseng", "ocimum_basilicum", "curcuma_longa"]);
    }

    #[test]
    fn test_catalog_file_reads_current_contents() {
        let mut temp = NamedTempFile::with_suffix(".json").unwrap();
        temp.write_all(
            br#"{"version": "1.0.0", "created_at": "", "records": [
                {"id": "a", "species": "A a", "common_name": "Alpha", "barcodes": {"ITS": "ACGT"}}
            ]}"#,
        )
        .unwrap();
        temp.flush().unwrap();

        let source = CatalogFile::new(temp.path());
        let records = source.snapshot(None).unwrap();
        assert_eq!(records.len(), 1);
        assert!(source.snapshot(Some(BarcodeRegion::Rbcl)).unwrap().is_empty());
    }

    #[test]
    fn test_catalog_file_missing_is_error() {
        let source = CatalogFile::new("/nonexistent/catalog.json");
        assert!(matches!(
            source.snapshot(None),
            Err(CatalogError::ReadError(_))
        ));
    }
}
