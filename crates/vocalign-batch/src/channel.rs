//! Named channels, zero-vector screening and frame-wise channel fusion.

use tracing::{debug, warn};
use vocalign_dtw::{AlignError, Sequence, screen_channel};

/// One named sub-stream of a recording, e.g. an articulatory sensor with
/// three coordinate components per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    /// Channel name, matched between reference and candidate.
    pub name: String,
    /// Frames of this channel.
    pub data: Sequence,
}

impl Channel {
    /// Create a named channel.
    #[must_use]
    pub fn new(name: impl Into<String>, data: Sequence) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// Why a channel was left out of a fusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionReason {
    /// The reference channel contains an all-zero frame.
    DegenerateInReference,
    /// The candidate channel contains an all-zero frame.
    DegenerateInCandidate,
    /// The candidate has a channel the reference does not.
    MissingInReference,
}

/// A channel that did not take part in a fusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludedChannel {
    /// Channel name.
    pub name: String,
    /// Reason for the exclusion.
    pub reason: ExclusionReason,
}

/// Reference and candidate frames built from the channels both sides share.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelFusion {
    /// Concatenated reference frames.
    pub reference: Sequence,
    /// Concatenated candidate frames.
    pub candidate: Sequence,
    /// Names of the fused channels, in concatenation order.
    pub channels: Vec<String>,
    /// Channels left out, reference exclusions first.
    pub excluded: Vec<ExcludedChannel>,
}

/// Reference channels after zero-vector screening.
///
/// Screen once, then fuse against any number of candidates.
#[derive(Debug, Clone)]
pub struct ScreenedReference<'a> {
    usable: Vec<&'a Channel>,
    excluded: Vec<ExcludedChannel>,
}

impl<'a> ScreenedReference<'a> {
    /// Screen the reference channels, excluding every degenerate one.
    pub fn new(channels: &'a [Channel]) -> Self {
        let mut usable = Vec::with_capacity(channels.len());
        let mut excluded = Vec::new();
        for channel in channels {
            match screen_channel(&channel.name, &channel.data) {
                Ok(()) => usable.push(channel),
                Err(e) => {
                    warn!(error = %e, "excluding reference channel");
                    excluded.push(ExcludedChannel {
                        name: channel.name.clone(),
                        reason: ExclusionReason::DegenerateInReference,
                    });
                }
            }
        }
        Self { usable, excluded }
    }

    /// Return the usable reference channel called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a Channel> {
        self.usable.iter().copied().find(|c| c.name == name)
    }

    /// Return the names of the usable reference channels.
    pub fn usable_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.usable.iter().map(|c| c.name.as_str())
    }

    /// Return the reference channels excluded by screening.
    #[must_use]
    pub fn excluded(&self) -> &[ExcludedChannel] {
        &self.excluded
    }

    /// Pair every usable candidate channel with its reference counterpart.
    ///
    /// Candidate order is kept. A candidate channel whose reference
    /// counterpart was screened out is skipped without a second exclusion
    /// entry.
    pub(crate) fn pair<'c>(
        &self,
        candidate: &'c [Channel],
    ) -> (Vec<(&'a Channel, &'c Channel)>, Vec<ExcludedChannel>) {
        let mut pairs = Vec::with_capacity(candidate.len());
        let mut excluded = Vec::new();
        for channel in candidate {
            if let Err(e) = screen_channel(&channel.name, &channel.data) {
                warn!(error = %e, "excluding candidate channel");
                excluded.push(ExcludedChannel {
                    name: channel.name.clone(),
                    reason: ExclusionReason::DegenerateInCandidate,
                });
                continue;
            }
            match self.get(&channel.name) {
                Some(reference) => pairs.push((reference, channel)),
                None if self.excluded.iter().any(|e| e.name == channel.name) => {}
                None => {
                    warn!(channel = %channel.name, "candidate channel missing in reference");
                    excluded.push(ExcludedChannel {
                        name: channel.name.clone(),
                        reason: ExclusionReason::MissingInReference,
                    });
                }
            }
        }
        (pairs, excluded)
    }

    /// Fuse the channels shared with `candidate` into one frame per time step on each side.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`AlignError::InvalidInput`] | No channel survives screening on both sides |
    /// | [`AlignError::FrameCountMismatch`] | Channels on one side disagree on frame count |
    pub fn fuse(&self, candidate: &[Channel]) -> Result<ChannelFusion, AlignError> {
        let (pairs, candidate_excluded) = self.pair(candidate);
        if pairs.is_empty() {
            return Err(AlignError::InvalidInput {
                reason: "no usable channel shared with the reference".to_string(),
            });
        }

        let reference_parts: Vec<&Channel> = pairs.iter().map(|(r, _)| *r).collect();
        let candidate_parts: Vec<&Channel> = pairs.iter().map(|(_, c)| *c).collect();
        let reference = hstack(&reference_parts)?;
        let candidate = hstack(&candidate_parts)?;
        let channels: Vec<String> = pairs.iter().map(|(_, c)| c.name.clone()).collect();
        debug!(
            channels = channels.len(),
            dim = reference.dim(),
            "channels fused"
        );

        let mut excluded = self.excluded.clone();
        excluded.extend(candidate_excluded);
        Ok(ChannelFusion {
            reference,
            candidate,
            channels,
            excluded,
        })
    }
}

/// Screen both sides and fuse the shared channels.
///
/// Equivalent to `ScreenedReference::new(reference).fuse(candidate)`.
///
/// # Errors
///
/// Same as [`ScreenedReference::fuse`].
pub fn fuse_channels(reference: &[Channel], candidate: &[Channel]) -> Result<ChannelFusion, AlignError> {
    ScreenedReference::new(reference).fuse(candidate)
}

/// Concatenate channels frame by frame.
fn hstack(parts: &[&Channel]) -> Result<Sequence, AlignError> {
    let frames = parts[0].data.len();
    for part in parts {
        if part.data.len() != frames {
            return Err(AlignError::FrameCountMismatch {
                channel: part.name.clone(),
                expected: frames,
                got: part.data.len(),
            });
        }
    }

    let dim: usize = parts.iter().map(|p| p.data.dim()).sum();
    let mut data = Vec::with_capacity(frames * dim);
    for t in 0..frames {
        for part in parts {
            data.extend_from_slice(part.data.frame(t));
        }
    }
    Sequence::from_flat(data, dim)
}
