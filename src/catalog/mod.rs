//! Species reference catalog storage and record snapshots.
//!
//! The catalog holds the region prototypes used for classification and the
//! species records searched for matches. An embedded catalog is compiled into
//! the binary, but custom catalogs can also be loaded from JSON files.
//!
//! ## Embedded Catalog
//!
//! The default catalog covers three medicinal/culinary plants with ITS, rbcL
//! and matK barcodes:
//!
//! - **Panax ginseng** (Asian Ginseng)
//! - **Ocimum basilicum** (Sweet Basil)
//! - **Curcuma longa** (Turmeric)
//!
//! ## Example
//!
//! ```rust
//! use barcode_solver::SpeciesCatalog;
//! use barcode_solver::core::types::SpeciesId;
//!
//! let catalog = SpeciesCatalog::load_embedded().unwrap();
//!
//! for record in &catalog.records {
//!     println!("{} ({})", record.species, record.common_name);
//! }
//!
//! let basil = catalog.get(&SpeciesId::new("ocimum_basilicum"));
//! assert!(basil.is_some());
//! ```
//!
//! ## Record Sources
//!
//! The HTTP boundary reads records through [`RecordSource`], which returns
//! snapshots in stable insertion order. [`SpeciesCatalog`] serves them from
//! memory; [`CatalogFile`] re-reads a JSON file on every request.
//!
//! [`RecordSource`]: source::RecordSource
//! [`SpeciesCatalog`]: store::SpeciesCatalog
//! [`CatalogFile`]: source::CatalogFile

pub mod source;
pub mod store;
