/// Safely convert usize to f64 for fraction calculations
///
/// Barcode lengths are far below the 2^53 limit where f64 loses integer
/// precision, so the cast is exact in practice.
#[inline]
pub(crate) fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Positional similarity between two sequences.
///
/// Symbols are compared index by index over the shared prefix of length
/// `L = min(len(a), len(b))` and the fraction of equal pairs is returned.
/// There is no alignment: nothing is shifted, and whatever extends past `L`
/// in the longer sequence is ignored rather than counted as mismatches.
///
/// Returns 0.0 when either operand is empty.
#[must_use]
pub fn similarity(a: &[u8], b: &[u8]) -> f64 {
    let shared = a.len().min(b.len());
    if shared == 0 {
        return 0.0;
    }

    let matches = a.iter().zip(b).filter(|(x, y)| x == y).count();
    count_to_f64(matches) / count_to_f64(shared)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_similarity_identical() {
        assert!((similarity(b"ACGT", b"ACGT") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_similarity_counts_positional_matches() {
        // A=A, C!=G, G=G, T!=A
        assert!((similarity(b"ACGT", b"AGGA") - 0.5).abs() < f64::EPSILON);
        assert!((similarity(b"AAAA", b"TTTT") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_similarity_ignores_length_difference() {
        // Only the shared prefix counts; the trailing GGGG is not a mismatch
        assert!((similarity(b"ACGT", b"ACGTGGGG") - 1.0).abs() < f64::EPSILON);
        assert!((similarity(b"ACGTGGGG", b"ACGA") - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_similarity_no_shifting() {
        // Same content offset by one position scores as mismatching
        assert!((similarity(b"ACACAC", b"CACACA") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_similarity_empty_operand() {
        assert!((similarity(b"", b"ACGT") - 0.0).abs() < f64::EPSILON);
        assert!((similarity(b"ACGT", b"") - 0.0).abs() < f64::EPSILON);
        assert!((similarity(b"", b"") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_similarity_bounds_and_symmetry() {
        let seqs: [&[u8]; 6] = [b"A", b"ACGT", b"TTGCA", b"GGGGGGGG", b"CATCAT", b"ATGC"];
        for a in seqs {
            for b in seqs {
                let ab = similarity(a, b);
                let ba = similarity(b, a);
                assert!((0.0..=1.0).contains(&ab));
                assert!((ab - ba).abs() < f64::EPSILON);
            }
        }
    }
}
