//! Alignment result with normalized cost.

use crate::path::AlignmentPath;

/// Normalize a raw alignment cost by the combined length of both sequences.
///
/// `raw_cost / (n + m)`, which makes costs of different-length pairs comparable.
#[must_use]
pub fn normalize_cost(raw_cost: f64, n: usize, m: usize) -> f64 {
    raw_cost / (n + m) as f64
}

/// Outcome of aligning one reference sequence (`n` frames) against one candidate (`m` frames).
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentResult {
    /// Optimal path. `None` when produced by the aggregate solver.
    pub path: Option<AlignmentPath>,
    /// Total DTW cost.
    pub raw_cost: f64,
    /// `raw_cost / (n + m)`.
    pub normalized_cost: f64,
    /// Frame count of the reference sequence.
    pub reference_len: usize,
    /// Frame count of the candidate sequence.
    pub candidate_len: usize,
}

impl AlignmentResult {
    /// Build a result carrying an explicit path.
    #[must_use]
    pub fn with_path(path: AlignmentPath, raw_cost: f64, n: usize, m: usize) -> Self {
        Self {
            path: Some(path),
            ..Self::without_path(raw_cost, n, m)
        }
    }

    /// Build a cost-only result.
    #[must_use]
    pub fn without_path(raw_cost: f64, n: usize, m: usize) -> Self {
        Self {
            path: None,
            raw_cost,
            normalized_cost: normalize_cost(raw_cost, n, m),
            reference_len: n,
            candidate_len: m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_by_total_length() {
        assert_eq!(normalize_cost(6.0, 2, 4), 1.0);
        assert_eq!(normalize_cost(0.0, 1, 1), 0.0);
    }

    #[test]
    fn cost_only_result() {
        let r = AlignmentResult::without_path(3.0, 1, 2);
        assert!(r.path.is_none());
        assert_eq!(r.raw_cost, 3.0);
        assert_eq!(r.normalized_cost, 1.0);
        assert_eq!((r.reference_len, r.candidate_len), (1, 2));
    }
}
