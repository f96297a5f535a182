//! Alignment path and per-cell move tags.

/// Predecessor move recorded for one cell of the DTW recurrence.
///
/// The declaration order is the tie-break priority: when several moves reach
/// the same minimal cost, the earliest variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Step {
    /// Both indices advance (diagonal).
    Match = 0,
    /// Only the left index advances.
    Insertion = 1,
    /// Only the right index advances.
    Deletion = 2,
}

/// An ordered sequence of `(i, j)` frame correspondences from `(0, 0)` to `(n-1, m-1)`.
///
/// Consecutive pairs differ by exactly one of `(1, 1)`, `(1, 0)` or `(0, 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentPath(Vec<(usize, usize)>);

impl AlignmentPath {
    pub(crate) fn new(pairs: Vec<(usize, usize)>) -> Self {
        debug_assert_eq!(pairs.first(), Some(&(0, 0)));
        Self(pairs)
    }

    /// Return the index pairs in forward order.
    #[must_use]
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.0
    }

    /// Return the number of pairs in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the path contains no pairs. Never true for a solver-produced path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the move taken to reach each pair after the first.
    #[must_use]
    pub fn steps(&self) -> Vec<Step> {
        self.0
            .windows(2)
            .map(|w| match (w[1].0 - w[0].0, w[1].1 - w[0].1) {
                (1, 1) => Step::Match,
                (1, 0) => Step::Insertion,
                _ => Step::Deletion,
            })
            .collect()
    }

    /// Consume and return the index pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(usize, usize)> {
        self.0
    }
}

impl<'a> IntoIterator for &'a AlignmentPath {
    type Item = &'a (usize, usize);
    type IntoIter = std::slice::Iter<'a, (usize, usize)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
