//! Zero-vector screening for channels headed into cosine-based alignment.

use crate::error::AlignError;
use crate::sequence::Sequence;

/// Return true if any frame of `channel` is the all-zero vector.
///
/// Cosine distance is undefined for a zero frame, so such a channel must be
/// kept out of fused input.
#[must_use]
pub fn has_degenerate_row(channel: &Sequence) -> bool {
    channel.frames().any(|frame| frame.iter().all(|&v| v == 0.0))
}

/// Screen a named channel, returning [`AlignError::DegenerateChannel`] if it
/// contains an all-zero frame.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`AlignError::DegenerateChannel`] | [`has_degenerate_row`] holds for `channel` |
pub fn screen_channel(name: &str, channel: &Sequence) -> Result<(), AlignError> {
    if has_degenerate_row(channel) {
        return Err(AlignError::DegenerateChannel {
            channel: name.to_string(),
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
    fn detects_single_zero_row() {
        let ch = seq(vec![vec![1.0, 2.0, 3.0], vec![0.0, 0.0, 0.0], vec![4.0, 5.0, 6.0]]);
        assert!(has_degenerate_row(&ch));
    }

    #[test]
    fn partial_zeros_are_fine() {
        let ch = seq(vec![vec![0.0, 0.0, 1.0], vec![0.0, 2.0, 0.0]]);
        assert!(!has_degenerate_row(&ch));
    }

    #[test]
    fn negative_zero_counts_as_zero() {
        let ch = seq(vec![vec![-0.0, 0.0]]);
        assert!(has_degenerate_row(&ch));
    }

    #[test]
    fn empty_channel_has_no_degenerate_row() {
        assert!(!has_degenerate_row(&seq(vec![])));
    }

    #[test]
    fn screen_names_the_channel() {
        let ch = seq(vec![vec![0.0, 0.0]]);
        assert_eq!(
            screen_channel("tongue tip", &ch),
            Err(AlignError::DegenerateChannel {
                channel: "tongue tip".into()
            })
        );
        assert!(screen_channel("upper lip", &seq(vec![vec![1.0, 0.0]])).is_ok());
    }
}
