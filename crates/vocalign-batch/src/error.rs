//! Error types for batch comparison runs.

use vocalign_dtw::AlignError;

/// Errors from reference-vs-candidates comparison runs.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// Returned under [`FailurePolicy::Strict`](crate::FailurePolicy::Strict)
    /// when a candidate cannot be aligned.
    #[error("alignment of candidate \"{label}\" failed")]
    CandidateFailed {
        /// Label of the failing candidate.
        label: String,
        /// Underlying alignment error.
        source: AlignError,
    },

    /// Returned when two candidates share a label.
    #[error("duplicate candidate label \"{label}\"")]
    DuplicateLabel {
        /// The repeated label.
        label: String,
    },
}
