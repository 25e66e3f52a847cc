//! Centralized validation and helper functions.

/// Maximum raw sequence length accepted from a client (DOS protection)
pub const MAX_SEQUENCE_LENGTH: usize = 100_000;

/// Maximum number of records allowed in a single catalog (DOS protection)
pub const MAX_RECORDS: usize = 100_000;

/// Maximum number of query sequences read from one input file
pub const MAX_QUERIES: usize = 10_000;

/// Security and data validation error types
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Sequence too long: {0} characters exceeds maximum of {MAX_SEQUENCE_LENGTH}")]
    SequenceTooLong(usize),
    #[error("Too many records: {0} exceeds maximum of {MAX_RECORDS}")]
    TooManyRecords(usize),
    #[error("Too many query sequences: exceeds maximum of {MAX_QUERIES}")]
    TooManyQueries,
    #[error("Authenticity weight {0} is outside [0, 1]")]
    AuthenticityOutOfRange(f64),
    #[error("Duplicate record id '{0}'")]
    DuplicateId(String),
    #[error("Duplicate prototype for region '{0}'")]
    DuplicateRegion(String),
}

/// Check a raw input before it is normalized.
///
/// The length counted is the raw character length, whitespace included.
/// Input whose byte length is within the limit is accepted without counting.
///
/// # Errors
///
/// Returns `ValidationError::SequenceTooLong` above [`MAX_SEQUENCE_LENGTH`].
///
/// # Examples
///
/// ```
/// use barcode_solver::utils::validation::check_sequence_length;
///
/// assert!(check_sequence_length("ACGT").is_ok());
/// assert!(check_sequence_length(&"A".repeat(100_001)).is_err());
/// ```
pub fn check_sequence_length(raw: &str) -> Result<(), ValidationError> {
    // A character is at least one byte
    if raw.len() <= MAX_SEQUENCE_LENGTH {
        return Ok(());
    }

    let chars = raw.chars().count();
    if chars > MAX_SEQUENCE_LENGTH {
        Err(ValidationError::SequenceTooLong(chars))
    } else {
        Ok(())
    }
}

/// Check a catalog's record count
///
/// # Errors
///
/// Returns `ValidationError::TooManyRecords` above [`MAX_RECORDS`].
pub fn check_record_limit(count: usize) -> Result<(), ValidationError> {
    if count > MAX_RECORDS {
        Err(ValidationError::TooManyRecords(count))
    } else {
        Ok(())
    }
}

/// Check if adding another query would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new query.
#[must_use]
pub fn check_query_limit(count: usize) -> Option<ValidationError> {
    if count >= MAX_QUERIES {
        Some(ValidationError::TooManyQueries)
    } else {
        None
    }
}

/// Authenticity weights must be finite and within [0, 1]
///
/// # Errors
///
/// Returns `ValidationError::AuthenticityOutOfRange` otherwise.
pub fn validate_authenticity(weight: f64) -> Result<(), ValidationError> {
    if (0.0..=1.0).contains(&weight) {
        Ok(())
    } else {
        Err(ValidationError::AuthenticityOutOfRange(weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_sequence_length() {
        assert!(check_sequence_length("").is_ok());
        assert!(check_sequence_length(&"A".repeat(MAX_SEQUENCE_LENGTH)).is_ok());
        assert_eq!(
            check_sequence_length(&"A".repeat(MAX_SEQUENCE_LENGTH + 1)),
            Err(ValidationError::SequenceTooLong(MAX_SEQUENCE_LENGTH + 1))
        );
    }

    #[test]
    fn test_check_sequence_length_counts_characters() {
        // Two bytes per character, so the byte length is over the limit
        let multibyte = "å".repeat(MAX_SEQUENCE_LENGTH / 2 + 1);
        assert!(multibyte.len() > MAX_SEQUENCE_LENGTH);
        assert!(check_sequence_length(&multibyte).is_ok());

        let too_many = "å".repeat(MAX_SEQUENCE_LENGTH + 1);
        assert_eq!(
            check_sequence_length(&too_many),
            Err(ValidationError::SequenceTooLong(MAX_SEQUENCE_LENGTH + 1))
        );
    }

    #[test]
    fn test_check_record_limit() {
        assert!(check_record_limit(0).is_ok());
        assert!(check_record_limit(MAX_RECORDS).is_ok());
        assert!(check_record_limit(MAX_RECORDS + 1).is_err());
    }

    #[test]
    fn test_check_query_limit() {
        assert!(check_query_limit(0).is_none());
        assert!(check_query_limit(MAX_QUERIES - 1).is_none());
        assert!(check_query_limit(MAX_QUERIES).is_some());
    }

    #[test]
    fn test_validate_authenticity() {
        assert!(validate_authenticity(0.0).is_ok());
        assert!(validate_authenticity(0.97).is_ok());
        assert!(validate_authenticity(1.0).is_ok());
        assert!(validate_authenticity(1.01).is_err());
        assert!(validate_authenticity(-0.1).is_err());
        assert!(validate_authenticity(f64::NAN).is_err());
    }
}
