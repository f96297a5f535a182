//! Multivariate sequence type with validation guarantees.

use std::ops::Index;

use crate::error::AlignError;

/// Owned, validated multivariate sequence: an ordered list of frames, each a
/// vector of `dim` finite values.
///
/// Frames are stored row-major in a single flat buffer. A sequence may hold
/// zero frames (an upstream slice can be empty); every alignment operation
/// rejects such a sequence with [`AlignError::InvalidInput`].
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    data: Vec<f64>,
    dim: usize,
}

impl Sequence {
    /// Create a sequence from a list of frames.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`AlignError::InvalidInput`] | The first frame has zero components |
    /// | [`AlignError::RaggedFrame`] | A frame's length differs from the first frame's |
    /// | [`AlignError::NonFiniteValue`] | Any value is NaN or infinite |
    pub fn new(frames: Vec<Vec<f64>>) -> Result<Self, AlignError> {
        let Some(first) = frames.first() else {
            return Ok(Self {
                data: Vec::new(),
                dim: 0,
            });
        };
        let dim = first.len();
        if dim == 0 {
            return Err(AlignError::invalid("frames must have at least one component"));
        }

        let mut data = Vec::with_capacity(frames.len() * dim);
        for (frame, values) in frames.into_iter().enumerate() {
            if values.len() != dim {
                return Err(AlignError::RaggedFrame {
                    frame,
                    expected: dim,
                    got: values.len(),
                });
            }
            data.extend(values);
        }
        Self::from_flat(data, dim)
    }

    /// Create a sequence from a row-major flat buffer of `dim`-component frames.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`AlignError::InvalidInput`] | `dim` is zero |
    /// | [`AlignError::RaggedFrame`] | `data.len()` is not a multiple of `dim` |
    /// | [`AlignError::NonFiniteValue`] | Any value is NaN or infinite |
    pub fn from_flat(data: Vec<f64>, dim: usize) -> Result<Self, AlignError> {
        if dim == 0 {
            return Err(AlignError::invalid("frame dimension must be at least 1"));
        }
        if data.len() % dim != 0 {
            return Err(AlignError::RaggedFrame {
                frame: data.len() / dim,
                expected: dim,
                got: data.len() % dim,
            });
        }
        if let Some(index) = data.iter().position(|v| !v.is_finite()) {
            return Err(AlignError::NonFiniteValue {
                frame: index / dim,
                component: index % dim,
            });
        }
        Ok(Self { data, dim })
    }

    /// Return the number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        if self.dim == 0 { 0 } else { self.data.len() / self.dim }
    }

    /// Return true if the sequence has no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Return the number of components per frame. Zero for an empty sequence
    /// built from an empty frame list.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Return frame `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    #[must_use]
    pub fn frame(&self, i: usize) -> &[f64] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// Iterate over frames in order.
    pub fn frames(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.dim.max(1))
    }

    /// Return the row-major flat buffer.
    #[must_use]
    pub fn as_flat(&self) -> &[f64] {
        &self.data
    }

    /// Consume and return the row-major flat buffer.
    #[must_use]
    pub fn into_flat(self) -> Vec<f64> {
        self.data
    }
}

impl Index<usize> for Sequence {
    type Output = [f64];

    fn index(&self, index: usize) -> &Self::Output {
        self.frame(index)
    }
}

impl TryFrom<Vec<Vec<f64>>> for Sequence {
    type Error = AlignError;

    fn try_from(frames: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::new(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_frame_list_is_allowed() {
        let seq = Sequence::new(vec![]).unwrap();
        assert!(seq.is_empty());
        assert_eq!(seq.len(), 0);
        assert_eq!(seq.frames().count(), 0);
    }

    #[test]
    fn rejects_zero_component_frames() {
        let result = Sequence::new(vec![vec![], vec![]]);
        assert!(matches!(result, Err(AlignError::InvalidInput { .. })));
    }

    #[test]
    fn rejects_ragged_frames() {
        let result = Sequence::new(vec![vec![1.0, 2.0], vec![3.0], vec![4.0, 5.0]]);
        assert_eq!(
            result,
            Err(AlignError::RaggedFrame {
                frame: 1,
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn rejects_nan() {
        let result = Sequence::new(vec![vec![1.0, 2.0], vec![3.0, f64::NAN]]);
        assert_eq!(
            result,
            Err(AlignError::NonFiniteValue {
                frame: 1,
                component: 1
            })
        );
    }

    #[test]
    fn rejects_infinity_in_flat_buffer() {
        let result = Sequence::from_flat(vec![0.0, f64::INFINITY, 1.0], 3);
        assert!(matches!(
            result,
            Err(AlignError::NonFiniteValue {
                frame: 0,
                component: 1
            })
        ));
    }

    #[test]
    fn from_flat_rejects_partial_frame() {
        let result = Sequence::from_flat(vec![1.0, 2.0, 3.0], 2);
        assert!(matches!(result, Err(AlignError::RaggedFrame { frame: 1, .. })));
    }

    #[test]
    fn from_flat_rejects_zero_dim() {
        assert!(matches!(
            Sequence::from_flat(vec![], 0),
            Err(AlignError::InvalidInput { .. })
        ));
    }

    #[test]
    fn frame_access() {
        let seq = Sequence::new(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap();
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.dim(), 2);
        assert_eq!(seq.frame(1), &[3.0, 4.0]);
        assert_eq!(&seq[2], &[5.0, 6.0]);
        let frames: Vec<&[f64]> = seq.frames().collect();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0], &[1.0, 2.0]);
        assert_eq!(frames[2], &[5.0, 6.0]);
    }

    #[test]
    fn flat_roundtrip_keeps_layout() {
        let seq = Sequence::from_flat(vec![1.0, 2.0, 3.0, 4.0], 2).unwrap();
        assert_eq!(seq.as_flat(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(seq.into_flat(), vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn try_from_frames() {
        let seq: Result<Sequence, _> = vec![vec![1.0], vec![2.0]].try_into();
        assert_eq!(seq.unwrap().len(), 2);
    }
}
