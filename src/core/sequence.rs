use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Symbols accepted in a normalized sequence
pub const NUCLEOTIDES: [u8; 4] = [b'A', b'T', b'G', b'C'];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Invalid DNA sequence: no nucleotides after removing whitespace")]
    Empty,

    #[error("Invalid DNA sequence: unexpected symbol '{symbol}' at position {position}")]
    InvalidSymbol { symbol: char, position: usize },
}

/// A validated DNA sequence: non-empty, uppercase, whitespace-free, A/T/G/C only.
///
/// The only way to build one is [`normalize`] (or deserializing, which goes
/// through the same path), so every value upholds the invariant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NucleotideSequence(String);

impl NucleotideSequence {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a normalized sequence
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Wrap a constant that passes [`is_normalized`]
    pub(crate) fn from_static(sequence: &'static str) -> Self {
        debug_assert!(is_normalized(sequence));
        Self(sequence.to_string())
    }
}

/// True when `s` is non-empty and consists only of uppercase A/T/G/C.
///
/// Usable in constant context to check built-in sequences at compile time.
pub(crate) const fn is_normalized(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'A' | b'T' | b'G' | b'C' => {}
            _ => return false,
        }
        i += 1;
    }
    true
}

impl std::fmt::Display for NucleotideSequence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<[u8]> for NucleotideSequence {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl TryFrom<String> for NucleotideSequence {
    type Error = SequenceError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        normalize(&raw)
    }
}

impl std::str::FromStr for NucleotideSequence {
    type Err = SequenceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        normalize(raw)
    }
}

impl From<NucleotideSequence> for String {
    fn from(sequence: NucleotideSequence) -> Self {
        sequence.0
    }
}

/// Clean raw text into a canonical nucleotide sequence.
///
/// All whitespace is removed (including interior newlines from pasted or
/// wrapped input) and the rest is upper-cased. Ambiguity codes such as `N`
/// are rejected like any other symbol outside A/T/G/C.
///
/// # Errors
///
/// Returns `SequenceError::Empty` if nothing is left after stripping
/// whitespace, or `SequenceError::InvalidSymbol` for the first symbol that is
/// not a nucleotide. Positions are counted in the cleaned sequence.
pub fn normalize(raw: &str) -> Result<NucleotideSequence, SequenceError> {
    let mut cleaned = String::with_capacity(raw.len());

    for c in raw.chars().filter(|c| !c.is_whitespace()) {
        let upper = c.to_ascii_uppercase();
        if !u8::try_from(upper).is_ok_and(|b| NUCLEOTIDES.contains(&b)) {
            return Err(SequenceError::InvalidSymbol {
                symbol: c,
                position: cleaned.len(),
            });
        }
        cleaned.push(upper);
    }

    if cleaned.is_empty() {
        return Err(SequenceError::Empty);
    }

    Ok(NucleotideSequence(cleaned))
}
