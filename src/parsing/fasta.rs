//! Query input reading using noodles.
//!
//! Query sequences come from FASTA files (one query per record) or from raw
//! text (the whole text is one query). Sequences are returned as read;
//! normalization happens during analysis so each query reports its own
//! validation result.
//!
//! Supported FASTA extensions:
//! - `.fa`, `.fasta`, `.fna`, `.fas` (uncompressed)
//! - any of the above with `.gz` or `.bgz` (gzip compressed)

use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use noodles::fasta;

use crate::parsing::ParseError;
use crate::utils::validation::check_query_limit;

/// One named query sequence, not yet normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySequence {
    pub name: String,
    pub raw: String,
}

impl QuerySequence {
    pub fn new(name: impl Into<String>, raw: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw: raw.into(),
        }
    }
}

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    let stripped = path_str
        .strip_suffix(".gz")
        .or_else(|| path_str.strip_suffix(".bgz"))
        .unwrap_or(&path_str);

    matches!(
        Path::new(stripped)
            .extension()
            .and_then(OsStr::to_str),
        Some("fa" | "fasta" | "fna" | "fas")
    )
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Read query sequences from a file.
///
/// FASTA files (by extension, or any file whose first non-blank character is
/// `>`) yield one query per record. Anything else is read as a single raw
/// query named after the file stem.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles`
/// if FASTA parsing fails, `ParseError::InvalidFormat` if no sequences are
/// found, or `ParseError::Limit` if there are too many records.
pub fn parse_query_file(path: &Path) -> Result<Vec<QuerySequence>, ParseError> {
    if is_gzipped(path) {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(GzDecoder::new(file));
        return parse_fasta_reader(&mut fasta::io::Reader::new(reader));
    }

    let text = std::fs::read_to_string(path)?;
    if is_fasta_file(path) || looks_like_fasta(&text) {
        return parse_fasta_reader(&mut fasta::io::Reader::new(text.trim_start().as_bytes()));
    }

    let name = path
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("query");
    single_query(name, text)
}

/// Read query sequences from text (e.g. stdin).
///
/// # Errors
///
/// Same as [`parse_query_file`], minus file I/O.
pub fn parse_query_text(text: &str) -> Result<Vec<QuerySequence>, ParseError> {
    if looks_like_fasta(text) {
        parse_fasta_reader(&mut fasta::io::Reader::new(text.trim_start().as_bytes()))
    } else {
        single_query("query", text.to_string())
    }
}

fn looks_like_fasta(text: &str) -> bool {
    text.trim_start().starts_with('>')
}

fn single_query(name: &str, text: String) -> Result<Vec<QuerySequence>, ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequence found in input".to_string(),
        ));
    }
    Ok(vec![QuerySequence::new(name, text)])
}

/// Parse from a noodles FASTA reader
fn parse_fasta_reader<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<Vec<QuerySequence>, ParseError> {
    let mut queries = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        if let Some(err) = check_query_limit(queries.len()) {
            return Err(err.into());
        }

        let name = String::from_utf8_lossy(record.name()).to_string();
        let raw = String::from_utf8_lossy(record.sequence().as_ref()).to_string();
        queries.push(QuerySequence::new(name, raw));
    }

    if queries.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA input".to_string(),
        ));
    }

    Ok(queries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_is_fasta_file() {
        assert!(is_fasta_file(Path::new("query.fa")));
        assert!(is_fasta_file(Path::new("query.fasta")));
        assert!(is_fasta_file(Path::new("query.fas")));
        assert!(is_fasta_file(Path::new("query.fa.gz")));
        assert!(is_fasta_file(Path::new("query.fna.bgz")));
        assert!(is_fasta_file(Path::new("/path/to/Query.FA")));

        assert!(!is_fasta_file(Path::new("query.txt")));
        assert!(!is_fasta_file(Path::new("query.json")));
        assert!(!is_fasta_file(Path::new("query.gz")));
    }

    #[test]
    fn test_parse_fasta_file() {
        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b">sample1 leaf\nACGTACGT\nACGT\n>sample2\nggcc\n")
            .unwrap();
        temp.flush().unwrap();

        let queries = parse_query_file(temp.path()).unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].name, "sample1");
        assert_eq!(queries[0].raw, "ACGTACGTACGT");
        assert_eq!(queries[1].name, "sample2");
        assert_eq!(queries[1].raw, "ggcc");
    }

    #[test]
    fn test_parse_gzipped_fasta_file() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b">q\nACGT\n").unwrap();
        let compressed = encoder.finish().unwrap();

        let mut temp = NamedTempFile::with_suffix(".fa.gz").unwrap();
        temp.write_all(&compressed).unwrap();
        temp.flush().unwrap();

        let queries = parse_query_file(temp.path()).unwrap();
        assert_eq!(queries, vec![QuerySequence::new("q", "ACGT")]);
    }

    #[test]
    fn test_parse_raw_text_file() {
        let mut temp = NamedTempFile::with_suffix(".txt").unwrap();
        temp.write_all(b"acgt acgt\nacgt\n").unwrap();
        temp.flush().unwrap();

        let queries = parse_query_file(temp.path()).unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].raw, "acgt acgt\nacgt\n");
    }

    #[test]
    fn test_parse_query_text() {
        let queries = parse_query_text(">a\nAC\nGT\n>b\nTT\n").unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].raw, "ACGT");

        let queries = parse_query_text("ACGT\n").unwrap();
        assert_eq!(queries, vec![QuerySequence::new("query", "ACGT\n")]);
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_query_text("   \n").is_err());

        let mut temp = NamedTempFile::with_suffix(".fa").unwrap();
        temp.write_all(b"").unwrap();
        temp.flush().unwrap();
        assert!(parse_query_file(temp.path()).is_err());
    }
}
