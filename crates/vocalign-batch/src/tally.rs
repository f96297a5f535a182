//! Occurrence counts of segment labels (e.g. phones) across a corpus.

use std::collections::HashMap;

use rayon::iter::{FromParallelIterator, IntoParallelIterator, ParallelIterator};

/// Counts how often each label occurs.
///
/// Tallies are plain values: build one per worker and [`merge`](Self::merge)
/// them, or collect a parallel iterator of labels directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTally {
    counts: HashMap<String, u64>,
}

impl LabelTally {
    /// Create an empty tally.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `label`.
    pub fn record(&mut self, label: impl Into<String>) {
        self.record_n(label, 1);
    }

    /// Count `n` occurrences of `label`.
    pub fn record_n(&mut self, label: impl Into<String>, n: u64) {
        if n == 0 {
            return;
        }
        *self.counts.entry(label.into()).or_insert(0) += n;
    }

    /// Return how often `label` was seen (0 if never).
    #[must_use]
    pub fn count(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Add every count of `other` into `self`.
    pub fn merge(&mut self, other: LabelTally) {
        for (label, n) in other.counts {
            *self.counts.entry(label).or_insert(0) += n;
        }
    }

    /// Return the `n` most frequent labels.
    ///
    /// Sorted by count descending, ties broken by label ascending so the
    /// result does not depend on hash order.
    #[must_use]
    pub fn top(&self, n: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(label, &count)| (label.as_str(), count))
            .collect();
        entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }

    /// Number of distinct labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of occurrences across all labels.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

impl<S: Into<String>> Extend<S> for LabelTally {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for label in iter {
            self.record(label);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for LabelTally {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tally = Self::new();
        tally.extend(iter);
        tally
    }
}

impl<S: Into<String> + Send> FromParallelIterator<S> for LabelTally {
    fn from_par_iter<I>(par_iter: I) -> Self
    where
        I: IntoParallelIterator<Item = S>,
    {
        par_iter
            .into_par_iter()
            .fold(LabelTally::new, |mut tally, label| {
                tally.record(label);
                tally
            })
            .reduce(LabelTally::new, |mut a, b| {
                a.merge(b);
                a
            })
    }
}

#[cfg(test)]
mod tests {
    use rayon::prelude::*;

    use super::*;

    #[test]
    fn counts_occurrences() {
        let tally: LabelTally = ["iy", "aa", "iy", "sh", "iy"].into_iter().collect();
        assert_eq!(tally.count("iy"), 3);
        assert_eq!(tally.count("aa"), 1);
        assert_eq!(tally.count("zh"), 0);
        assert_eq!(tally.len(), 3);
        assert_eq!(tally.total(), 5);
    }

    #[test]
    fn record_n_zero_is_a_no_op() {
        let mut tally = LabelTally::new();
        tally.record_n("iy", 0);
        assert!(tally.is_empty());
        tally.record_n("iy", 4);
        assert_eq!(tally.count("iy"), 4);
    }

    #[test]
    fn top_breaks_ties_by_label() {
        let tally: LabelTally = ["t", "s", "s", "n", "n", "a"].into_iter().collect();
        assert_eq!(tally.top(3), vec![("n", 2), ("s", 2), ("a", 1)]);
        assert_eq!(tally.top(10).len(), 4);
        assert!(tally.top(0).is_empty());
    }

    #[test]
    fn merge_adds_counts() {
        let mut a: LabelTally = ["iy", "aa"].into_iter().collect();
        let b: LabelTally = ["iy", "uw"].into_iter().collect();
        a.merge(b);
        assert_eq!(a.count("iy"), 2);
        assert_eq!(a.count("uw"), 1);
        assert_eq!(a.total(), 4);
    }

    #[test]
    fn merge_is_order_independent() {
        let a: LabelTally = ["iy", "aa", "iy"].into_iter().collect();
        let b: LabelTally = ["aa", "sh"].into_iter().collect();
        let c: LabelTally = ["sh", "iy", "t"].into_iter().collect();

        let mut left = a.clone();
        left.merge(b.clone());
        left.merge(c.clone());

        let mut bc = b;
        bc.merge(c);
        let mut right = bc;
        right.merge(a);

        assert_eq!(left, right);
    }

    #[test]
    fn parallel_collect_matches_serial() {
        let labels: Vec<String> = (0..1000).map(|i| format!("p{}", i % 37)).collect();
        let serial: LabelTally = labels.iter().cloned().collect();
        let parallel: LabelTally = labels.par_iter().cloned().collect();
        assert_eq!(serial, parallel);
        assert_eq!(parallel.total(), 1000);
    }
}
