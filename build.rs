use std::path::Path;

const NUCLEOTIDES: &[u8] = b"ATGC";
const REGIONS: &[&str] = &["ITS", "RBCL", "MATK"];

fn main() {
    let catalog_path = Path::new("catalogs/plant_barcodes.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the catalog file before building.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    assert!(
        catalog.is_object(),
        "\n\nCATALOG BUILD ERROR: Root must be a JSON object\n\
         Got: {catalog}\n"
    );

    let regions = required_array(catalog, "regions");
    let mut seen_regions = std::collections::HashSet::new();
    for (i, region) in regions.iter().enumerate() {
        let name = validate_region(region, i);
        assert!(
            seen_regions.insert(name.clone()),
            "\n\nCATALOG BUILD ERROR: Duplicate prototype for region '{name}' (index {i})\n"
        );
    }

    let records = required_array(catalog, "records");
    let total_barcodes = validate_records(records);

    println!(
        "cargo:warning=Validated catalog: {} regions, {} records, {total_barcodes} barcodes",
        regions.len(),
        records.len()
    );
}

fn required_array<'a>(catalog: &'a serde_json::Value, field: &str) -> &'a Vec<serde_json::Value> {
    let value = catalog.get(field).unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Missing '{field}' field\n\
             The catalog must have a top-level '{field}' array.\n"
        );
    });

    value.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: '{field}' must be an array\n\
             Got: {value}\n"
        );
    })
}

fn validate_region(region: &serde_json::Value, index: usize) -> String {
    let name = region
        .get("region")
        .and_then(|v| v.as_str())
        .unwrap_or_else(|| {
            panic!("\n\nCATALOG BUILD ERROR: Region at index {index} missing 'region' field\n")
        });

    assert!(
        REGIONS.contains(&name),
        "\n\nCATALOG BUILD ERROR: Unknown region '{name}' (index {index})\n\
         Expected one of: {}\n",
        REGIONS.join(", ")
    );

    let prototype = region.get("prototype").and_then(|v| v.as_str());
    validate_sequence(prototype, &format!("region '{name}' prototype"));

    name.to_string()
}

fn validate_records(records: &[serde_json::Value]) -> usize {
    let mut total_barcodes = 0;

    for (i, record) in records.iter().enumerate() {
        let record_id = record
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or("<unknown>");

        for field in ["id", "species", "common_name", "barcodes"] {
            assert!(
                record.get(field).is_some(),
                "\n\nCATALOG BUILD ERROR: Record '{record_id}' (index {i}) missing '{field}' field\n"
            );
        }

        if let Some(weight) = record.get("authenticity").and_then(serde_json::Value::as_f64) {
            assert!(
                (0.0..=1.0).contains(&weight),
                "\n\nCATALOG BUILD ERROR: Record '{record_id}' authenticity {weight} outside [0, 1]\n"
            );
        }

        if let Some(barcodes) = record.get("barcodes").and_then(|b| b.as_object()) {
            for (region, sequence) in barcodes {
                assert!(
                    REGIONS.contains(&region.as_str()),
                    "\n\nCATALOG BUILD ERROR: Record '{record_id}' has unknown region '{region}'\n"
                );
                validate_sequence(
                    sequence.as_str(),
                    &format!("record '{record_id}' {region} barcode"),
                );
            }
            total_barcodes += barcodes.len();
        }
    }

    total_barcodes
}

fn validate_sequence(sequence: Option<&str>, what: &str) {
    let sequence = sequence.unwrap_or_else(|| {
        panic!("\n\nCATALOG BUILD ERROR: Missing sequence for {what}\n");
    });

    assert!(
        !sequence.is_empty() && sequence.bytes().all(|b| NUCLEOTIDES.contains(&b)),
        "\n\nCATALOG BUILD ERROR: Invalid sequence for {what}\n\
         Sequences must be non-empty uppercase A/T/G/C.\n"
    );
}

fn set_build_dependencies() {
    // Tell cargo to rerun if catalog changes
    println!("cargo:rerun-if-changed=catalogs/plant_barcodes.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
