//! Readers for query sequence input.
//!
//! This module provides:
//!
//! - **FASTA files**: One query per record, plain or gzip/bgzip compressed
//! - **Raw text**: A pasted or piped sequence, read as a single query
//!
//! ## Example
//!
//! ```rust
//! use barcode_solver::parsing::fasta::parse_query_text;
//!
//! let queries = parse_query_text(">leaf_1\nCGTAACAAGG\nTTTCCGTAGG\n").unwrap();
//! assert_eq!(queries[0].name, "leaf_1");
//! assert_eq!(queries[0].raw, "CGTAACAAGGTTTCCGTAGG");
//! ```

use thiserror::Error;

use crate::utils::validation::ValidationError;

pub mod fasta;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("{0}")]
    Limit(#[from] ValidationError),
}
