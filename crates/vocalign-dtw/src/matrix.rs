//! Dense pointwise distance matrix between two sequences.

use std::ops::Index;

use tracing::instrument;

use crate::error::AlignError;
use crate::metric::Metric;
use crate::sequence::Sequence;

/// N×M matrix of frame distances, `get(i, j) == metric(x[i], y[j])`.
///
/// Stored row-major. Always non-empty, with every entry finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Build the distance matrix between every frame of `x` and every frame of `y`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`AlignError::InvalidInput`] | Either sequence has zero frames |
    /// | [`AlignError::DimensionMismatch`] | Frame dimensions differ |
    /// | [`AlignError::AlignmentFailure`] | A frame distance is not finite (e.g. cosine of a zero frame) |
    #[instrument(skip(x, y), fields(n = x.len(), m = y.len(), dim = x.dim()))]
    pub fn build(x: &Sequence, y: &Sequence, metric: Metric) -> Result<Self, AlignError> {
        check_pair(x, y)?;

        let rows = x.len();
        let cols = y.len();
        let mut data = Vec::with_capacity(rows * cols);
        for (row, u) in x.frames().enumerate() {
            for (col, v) in y.frames().enumerate() {
                let value = metric.distance(u, v);
                if !value.is_finite() {
                    return Err(AlignError::AlignmentFailure { row, col, value });
                }
                data.push(value);
            }
        }
        Ok(Self { rows, cols, data })
    }

    /// Create a matrix from precomputed rows of distances.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`AlignError::InvalidInput`] | No rows, an empty row, or a row of different length |
    /// | [`AlignError::AlignmentFailure`] | A value is negative, NaN or infinite |
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, AlignError> {
        let n = rows.len();
        let m = rows.first().map_or(0, Vec::len);
        if n == 0 || m == 0 {
            return Err(AlignError::invalid("distance matrix must be non-empty"));
        }

        let mut data = Vec::with_capacity(n * m);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != m {
                return Err(AlignError::invalid(format!(
                    "distance matrix row {row} has {} columns, expected {m}",
                    values.len()
                )));
            }
            if let Some(col) = values.iter().position(|v| !v.is_finite() || *v < 0.0) {
                return Err(AlignError::AlignmentFailure {
                    row,
                    col,
                    value: values[col],
                });
            }
            data.extend(values);
        }
        Ok(Self {
            rows: n,
            cols: m,
            data,
        })
    }

    /// Return the number of rows (frames of the left sequence).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Return the number of columns (frames of the right sequence).
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Return the distance between frame `i` of the left and frame `j` of the right sequence.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows` or `j >= cols`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.rows, "row index {i} out of bounds for {} rows", self.rows);
        assert!(j < self.cols, "column index {j} out of bounds for {} columns", self.cols);
        self.data[i * self.cols + j]
    }

    /// Return row `i` as a slice.
    #[must_use]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterate over rows in order.
    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.cols)
    }
}

impl Index<(usize, usize)> for DistanceMatrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of bounds");
        &self.data[i * self.cols + j]
    }
}

/// Validate that two sequences can be compared frame by frame.
pub(crate) fn check_pair(x: &Sequence, y: &Sequence) -> Result<(), AlignError> {
    if x.is_empty() || y.is_empty() {
        return Err(AlignError::invalid(format!(
            "cannot align empty sequence ({} vs {} frames)",
            x.len(),
            y.len()
        )));
    }
    if x.dim() != y.dim() {
        return Err(AlignError::DimensionMismatch {
            left: x.dim(),
            right: y.dim(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(frames: Vec<Vec<f64>>) -> Sequence {
        Sequence::new(frames).unwrap()
    }

    #[test]
    fn cosine_identity_pair() {
        let x = seq(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let m = DistanceMatrix::build(&x, &x, Metric::Cosine).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 2);
        assert_eq!(m.row(0), &[0.0, 1.0]);
        assert_eq!(m.row(1), &[1.0, 0.0]);
    }

    #[test]
    fn euclidean_rectangular() {
        let x = seq(vec![vec![0.0], vec![1.0], vec![3.0]]);
        let y = seq(vec![vec![1.0], vec![2.0]]);
        let m = DistanceMatrix::build(&x, &y, Metric::Euclidean).unwrap();
        assert_eq!((m.rows(), m.cols()), (3, 2));
        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(0, 1), 2.0);
        assert_eq!(m.get(1, 0), 0.0);
        assert_eq!(m[(2, 1)], 1.0);
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let x = seq(vec![vec![1.0, 2.0]]);
        let y = seq(vec![vec![1.0, 2.0, 3.0]]);
        let result = DistanceMatrix::build(&x, &y, Metric::Euclidean);
        assert_eq!(result, Err(AlignError::DimensionMismatch { left: 2, right: 3 }));
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let x = seq(vec![]);
        let y = seq(vec![vec![1.0]]);
        assert!(matches!(
            DistanceMatrix::build(&x, &y, Metric::Cosine),
            Err(AlignError::InvalidInput { .. })
        ));
        assert!(matches!(
            DistanceMatrix::build(&y, &x, Metric::Cosine),
            Err(AlignError::InvalidInput { .. })
        ));
    }

    #[test]
    fn zero_frame_under_cosine_fails() {
        let x = seq(vec![vec![1.0, 1.0], vec![0.0, 0.0]]);
        let y = seq(vec![vec![1.0, 0.0]]);
        let result = DistanceMatrix::build(&x, &y, Metric::Cosine);
        assert!(matches!(
            result,
            Err(AlignError::AlignmentFailure { row: 1, col: 0, .. })
        ));
    }

    #[test]
    fn from_rows_validates_shape_and_values() {
        assert!(DistanceMatrix::from_rows(vec![]).is_err());
        assert!(DistanceMatrix::from_rows(vec![vec![]]).is_err());
        assert!(DistanceMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).is_err());
        assert!(matches!(
            DistanceMatrix::from_rows(vec![vec![1.0, -2.0]]),
            Err(AlignError::AlignmentFailure { row: 0, col: 1, .. })
        ));
        let m = DistanceMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m.iter_rows().count(), 2);
        assert_eq!(m.get(1, 0), 3.0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_out_of_bounds_panics() {
        let m = DistanceMatrix::from_rows(vec![vec![1.0]]).unwrap();
        let _ = m.get(1, 0);
    }
}
