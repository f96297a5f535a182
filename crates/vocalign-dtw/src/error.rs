//! Error types for sequence validation, distance computation and alignment.

/// Errors from sequence construction, distance matrix building and DTW alignment.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AlignError {
    /// Returned when the two sequences of a comparison have different frame dimensions.
    #[error("frame dimension mismatch: left has {left} components, right has {right}")]
    DimensionMismatch {
        /// Frame dimension of the left (reference) sequence.
        left: usize,
        /// Frame dimension of the right (candidate) sequence.
        right: usize,
    },

    /// Returned when an input cannot be aligned at all (e.g. a sequence with zero frames).
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Human-readable description of what was wrong.
        reason: String,
    },

    /// Returned when a channel contains an all-zero frame and must be excluded.
    #[error("channel \"{channel}\" contains an all-zero frame")]
    DegenerateChannel {
        /// Name of the offending channel.
        channel: String,
    },

    /// Returned when a frame distance is not finite (NaN from an unscreened zero vector).
    #[error("non-finite frame distance {value} at ({row}, {col})")]
    AlignmentFailure {
        /// Frame index in the left sequence.
        row: usize,
        /// Frame index in the right sequence.
        col: usize,
        /// The offending distance value.
        value: f64,
    },

    /// Returned when a frame has a different number of components than the first frame.
    #[error("frame {frame} has {got} components, expected {expected}")]
    RaggedFrame {
        /// Index of the offending frame.
        frame: usize,
        /// Dimension established by the first frame.
        expected: usize,
        /// Dimension of the offending frame.
        got: usize,
    },

    /// Returned when a sequence contains NaN or an infinity.
    #[error("non-finite value at frame {frame}, component {component}")]
    NonFiniteValue {
        /// Frame index of the first non-finite value.
        frame: usize,
        /// Component index within that frame.
        component: usize,
    },

    /// Returned when channels fused side by side disagree on their frame count.
    #[error("channel \"{channel}\" has {got} frames, expected {expected}")]
    FrameCountMismatch {
        /// Name of the offending channel.
        channel: String,
        /// Frame count of the first fused channel.
        expected: usize,
        /// Frame count of the offending channel.
        got: usize,
    },
}

impl AlignError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}
