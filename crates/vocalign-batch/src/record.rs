//! Rows of the comparison table.

use std::fmt;

/// Whether a row holds a computed cost or a failure placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    /// The candidate was aligned; costs are meaningful.
    Aligned,
    /// The alignment failed; costs are the zero sentinel.
    Failed,
}

impl RecordStatus {
    /// Return the lowercase name used in artifacts.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aligned => "aligned",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the comparison table: a candidate's cost against the reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRecord {
    /// Candidate label (e.g. speaker or file identifier).
    pub label: String,
    /// Total DTW cost, `0.0` for a zero-filled failure.
    pub raw_cost: f64,
    /// `raw_cost / (n + m)`, `0.0` for a zero-filled failure.
    pub normalized_cost: f64,
    /// Free-form tag (prompt, phone or channel identifier).
    pub tag: String,
    /// Distinguishes a genuine zero cost from a failure sentinel.
    pub status: RecordStatus,
}

impl ComparisonRecord {
    pub(crate) fn aligned(label: String, tag: String, raw_cost: f64, normalized_cost: f64) -> Self {
        Self {
            label,
            raw_cost,
            normalized_cost,
            tag,
            status: RecordStatus::Aligned,
        }
    }

    pub(crate) fn failed(label: String, tag: String) -> Self {
        Self {
            label,
            raw_cost: 0.0,
            normalized_cost: 0.0,
            tag,
            status: RecordStatus::Failed,
        }
    }

    /// Return true if this row is a failure placeholder.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.status == RecordStatus::Failed
    }
}
