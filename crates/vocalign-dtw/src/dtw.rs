//! DTW cost/path solver and the aggregate (cost-only) multivariate solver.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, instrument};

use crate::error::AlignError;
use crate::matrix::{DistanceMatrix, check_pair};
use crate::metric::Metric;
use crate::path::{AlignmentPath, Step};
use crate::result::AlignmentResult;
use crate::sequence::Sequence;

/// Cumulative DTW cost for every prefix pair of frames.
///
/// Backed by the full `(n+1) × (m+1)` recurrence buffer; the infinite border
/// row and column are hidden, so `get(i, j)` is the minimal cost of aligning
/// the first `i + 1` left frames with the first `j + 1` right frames.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Return the number of rows (left frames).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Return the number of columns (right frames).
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Return the cumulative cost at interior cell `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows` or `j >= cols`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.rows && j < self.cols, "cost index ({i}, {j}) out of bounds");
        self.data[(i + 1) * (self.cols + 1) + j + 1]
    }

    /// Return interior row `i`.
    #[must_use]
    pub fn row(&self, i: usize) -> &[f64] {
        let start = (i + 1) * (self.cols + 1) + 1;
        &self.data[start..start + self.cols]
    }

    /// Return the total alignment cost, i.e. the cost at `(rows - 1, cols - 1)`.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.get(self.rows - 1, self.cols - 1)
    }
}

/// Solve DTW over a precomputed distance matrix.
///
/// Fills the cost recurrence row by row. Each cell picks the cheapest of
/// `[match, insertion, deletion]` = `[C[i][j], C[i][j+1], C[i+1][j]]` in the
/// one-based border layout; ties go to the earliest candidate in that list.
/// The path is recovered by following the recorded moves back from
/// `(n-1, m-1)` to `(0, 0)`.
///
/// Runs in O(n * m) time and space.
#[must_use]
#[instrument(skip(dist), fields(n = dist.rows(), m = dist.cols()))]
pub fn align(dist: &DistanceMatrix) -> (AlignmentPath, CostMatrix) {
    let n = dist.rows();
    let m = dist.cols();
    let width = m + 1;

    let mut cost = vec![f64::INFINITY; (n + 1) * width];
    cost[0] = 0.0;
    let mut traceback = vec![Step::Match; n * m];

    for i in 0..n {
        let row = dist.row(i);
        for j in 0..m {
            let matched = cost[i * width + j];
            let insertion = cost[i * width + j + 1];
            let deletion = cost[(i + 1) * width + j];

            let (best, step) = if matched <= insertion && matched <= deletion {
                (matched, Step::Match)
            } else if insertion <= deletion {
                (insertion, Step::Insertion)
            } else {
                (deletion, Step::Deletion)
            };

            cost[(i + 1) * width + j + 1] = row[j] + best;
            traceback[i * m + j] = step;
        }
    }

    let mut pairs = Vec::with_capacity(n + m - 1);
    let mut i = n - 1;
    let mut j = m - 1;
    loop {
        pairs.push((i, j));
        if i == 0 && j == 0 {
            break;
        }
        match traceback[i * m + j] {
            Step::Match => {
                i -= 1;
                j -= 1;
            }
            Step::Insertion => i -= 1,
            Step::Deletion => j -= 1,
        }
    }
    pairs.reverse();

    let cost = CostMatrix {
        rows: n,
        cols: m,
        data: cost,
    };
    debug!(total = cost.total(), path_len = pairs.len(), "alignment solved");
    (AlignmentPath::new(pairs), cost)
}

/// Compute only the terminal DTW cost between two multivariate sequences.
///
/// Uses the same recurrence as [`align`] in dependent mode: the frame
/// distance is taken once over the whole frame vector. Keeps a rolling
/// two-row buffer of `m + 1` slots and computes frame distances on the fly,
/// so no distance matrix or traceback is allocated. Slot 0 of each row is the
/// infinite border column.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`AlignError::InvalidInput`] | Either sequence has zero frames |
/// | [`AlignError::DimensionMismatch`] | Frame dimensions differ |
/// | [`AlignError::AlignmentFailure`] | A frame distance is not finite |
#[instrument(skip(x, y), fields(n = x.len(), m = y.len(), dim = x.dim()))]
pub fn aggregate_distance(x: &Sequence, y: &Sequence, metric: Metric) -> Result<f64, AlignError> {
    check_pair(x, y)?;
    let m = y.len();

    let mut prev = vec![f64::INFINITY; m + 1];
    let mut curr = vec![f64::INFINITY; m + 1];
    prev[0] = 0.0;

    for (row, u) in x.frames().enumerate() {
        curr[0] = f64::INFINITY;
        for (col, v) in y.frames().enumerate() {
            let d = metric.distance(u, v);
            if !d.is_finite() {
                return Err(AlignError::AlignmentFailure { row, col, value: d });
            }
            curr[col + 1] = d + prev[col].min(prev[col + 1]).min(curr[col]);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let total = prev[m];
    debug!(total, "aggregate distance computed");
    Ok(total)
}

/// Build the distance matrix, solve it and normalize the cost for one pair.
///
/// # Errors
///
/// Same as [`DistanceMatrix::build`].
pub fn align_sequences(
    x: &Sequence,
    y: &Sequence,
    metric: Metric,
) -> Result<AlignmentResult, AlignError> {
    let dist = DistanceMatrix::build(x, y, metric)?;
    let (path, cost) = align(&dist);
    Ok(AlignmentResult::with_path(path, cost.total(), x.len(), y.len()))
}

/// Which solver produces the cost of a comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SolverMode {
    /// Distance matrix + cost/traceback solver; the result carries the path.
    #[default]
    ExplicitPath,
    /// Rolling-buffer solver over the fused frames; scalar cost only.
    Aggregate,
}

impl SolverMode {
    /// Align `x` against `y` with this solver.
    ///
    /// # Errors
    ///
    /// Same as [`DistanceMatrix::build`] / [`aggregate_distance`].
    pub fn run(self, x: &Sequence, y: &Sequence, metric: Metric) -> Result<AlignmentResult, AlignError> {
        match self {
            Self::ExplicitPath => align_sequences(x, y, metric),
            Self::Aggregate => {
                let raw = aggregate_distance(x, y, metric)?;
                Ok(AlignmentResult::without_path(raw, x.len(), y.len()))
            }
        }
    }

    /// Return the lowercase name used on the command line and in artifacts.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExplicitPath => "path",
            Self::Aggregate => "aggregate",
        }
    }
}

impl fmt::Display for SolverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolverMode {
    type Err = AlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "path" => Ok(Self::ExplicitPath),
            "aggregate" => Ok(Self::Aggregate),
            other => Err(AlignError::invalid(format!(
                "unknown solver mode: {other} (expected path or aggregate)"
            ))),
        }
    }
}
