//! Dynamic time warping for multivariate feature sequences.
//!
//! Pure math library, zero I/O. Provides validated sequences, cosine and
//! Euclidean frame metrics, dense distance matrices, the cost/traceback DTW
//! solver with explicit path recovery, a cost-only rolling-buffer solver for
//! fused multichannel frames, and zero-vector channel screening.

mod dtw;
mod error;
mod guard;
mod matrix;
mod metric;
mod path;
mod result;
mod sequence;

pub use dtw::{CostMatrix, SolverMode, aggregate_distance, align, align_sequences};
pub use error::AlignError;
pub use guard::{has_degenerate_row, screen_channel};
pub use matrix::DistanceMatrix;
pub use metric::Metric;
pub use path::{AlignmentPath, Step};
pub use result::{AlignmentResult, normalize_cost};
pub use sequence::Sequence;
