//! Similarity score derived from an alignment

use crate::alignment::{align, Alignment};

/// Similarity percentage from an unchanged-token count and the two sequence lengths.
///
/// Both empty scores 100, exactly one empty scores 0. Otherwise the unchanged
/// count is divided by the longer length. The result is clamped to [0, 100].
pub fn similarity(unchanged: usize, origin_len: usize, candidate_len: usize) -> f64 {
    match (origin_len, candidate_len) {
        (0, 0) => 100.0,
        (0, _) | (_, 0) => 0.0,
        _ => {
            let longest = origin_len.max(candidate_len) as f64;
            (unchanged as f64 / longest * 100.0).clamp(0.0, 100.0)
        }
    }
}

/// Score a candidate token sequence against the origin sequence
pub fn score<S: AsRef<str>>(origin: &[S], candidate: &[S]) -> f64 {
    if origin.is_empty() || candidate.is_empty() {
        return similarity(0, origin.len(), candidate.len());
    }

    align(origin, candidate).score()
}

impl Alignment {
    /// Similarity score of this alignment
    pub fn score(&self) -> f64 {
        similarity(self.unchanged_count(), self.origin_len(), self.candidate_len())
    }
}

/// Display form of a score: two decimals, no rounding of the stored value
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}
