//! Pointwise frame distance metrics.

use std::fmt;
use std::str::FromStr;

use crate::error::AlignError;

/// Distance between two frames of equal dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Cosine distance `1 - (u·v) / (‖u‖ ‖v‖)`, clamped to `[0, 2]` against
    /// rounding. NaN when either frame is the zero vector.
    #[default]
    Cosine,
    /// Euclidean (L2) distance.
    Euclidean,
}

impl Metric {
    /// Compute the distance between `u` and `v`.
    ///
    /// Both slices must have the same length; callers validate dimensions
    /// before reaching the per-frame loop.
    #[inline]
    #[must_use]
    pub fn distance(self, u: &[f64], v: &[f64]) -> f64 {
        debug_assert_eq!(u.len(), v.len());
        match self {
            Self::Cosine => cosine(u, v),
            Self::Euclidean => euclidean(u, v),
        }
    }

    /// Return the lowercase name used on the command line and in artifacts.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cosine => "cosine",
            Self::Euclidean => "euclidean",
        }
    }
}

fn cosine(u: &[f64], v: &[f64]) -> f64 {
    let mut dot = 0.0;
    let mut norm_u = 0.0;
    let mut norm_v = 0.0;
    for (&a, &b) in u.iter().zip(v) {
        dot += a * b;
        norm_u += a * a;
        norm_v += b * b;
    }
    // 0/0 yields NaN for a zero frame, which the matrix builder reports.
    // NaN passes through clamp unchanged.
    (1.0 - dot / (norm_u * norm_v).sqrt()).clamp(0.0, 2.0)
}

fn euclidean(u: &[f64], v: &[f64]) -> f64 {
    u.iter()
        .zip(v)
        .map(|(&a, &b)| (a - b).powi(2))
        .sum::<f64>()
        .sqrt()
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = AlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cosine" => Ok(Self::Cosine),
            "euclidean" => Ok(Self::Euclidean),
            other => Err(AlignError::invalid(format!(
                "unknown metric: {other} (expected cosine or euclidean)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cosine_orthogonal_is_one() {
        let d = Metric::Cosine.distance(&[1.0, 0.0], &[0.0, 1.0]);
        assert!((d - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_parallel_is_zero() {
        let d = Metric::Cosine.distance(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
        assert!(d.abs() < 1e-12);
    }

    #[test]
    fn cosine_opposite_is_two() {
        let d = Metric::Cosine.distance(&[1.0, -1.0], &[-1.0, 1.0]);
        assert!((d - 2.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_zero_vector_is_nan() {
        assert!(Metric::Cosine.distance(&[0.0, 0.0], &[1.0, 0.0]).is_nan());
    }

    #[test]
    fn euclidean_three_four_five() {
        let d = Metric::Euclidean.distance(&[0.0, 0.0], &[3.0, 4.0]);
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn euclidean_zero_vector_is_defined() {
        assert_eq!(Metric::Euclidean.distance(&[0.0, 0.0], &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("cosine".parse::<Metric>().unwrap(), Metric::Cosine);
        assert_eq!("euclidean".parse::<Metric>().unwrap(), Metric::Euclidean);
        assert!("manhattan".parse::<Metric>().is_err());
        assert_eq!(Metric::Euclidean.to_string(), "euclidean");
    }

    #[test]
    fn default_is_cosine() {
        assert_eq!(Metric::default(), Metric::Cosine);
    }
}
