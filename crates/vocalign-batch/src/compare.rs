//! Reference-vs-candidates comparison runs.

use std::collections::HashSet;

use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};
use vocalign_dtw::{AlignError, AlignmentResult, Sequence};

use crate::channel::{Channel, ScreenedReference};
use crate::config::{BatchConfig, FailurePolicy, SortOrder};
use crate::error::BatchError;
use crate::record::ComparisonRecord;

/// Alignment outcome of one candidate before a failure policy is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateOutcome {
    /// Candidate label.
    pub label: String,
    /// Record tag (the configured tag, or the channel name for per-channel runs).
    pub tag: String,
    /// The alignment, or why it could not be computed.
    pub result: Result<AlignmentResult, AlignError>,
}

impl BatchConfig {
    /// Align every candidate against `reference` and build the comparison table.
    ///
    /// `normalized_cost = raw_cost / (n + m)` with `n` reference frames and `m`
    /// candidate frames. Failed candidates are handled per [`FailurePolicy`];
    /// rows keep candidate order unless a [`SortOrder`] is configured.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`BatchError::DuplicateLabel`] | Two candidates share a label |
    /// | [`BatchError::CandidateFailed`] | A candidate failed under [`FailurePolicy::Strict`] |
    pub fn compare_to_reference<L>(
        &self,
        reference: &Sequence,
        candidates: &[(L, Sequence)],
    ) -> Result<Vec<ComparisonRecord>, BatchError>
    where
        L: AsRef<str> + Sync,
    {
        let outcomes = self.compare_outcomes(reference, candidates)?;
        self.tabulate(outcomes)
    }

    /// Align every candidate against `reference`, returning the raw per-candidate outcomes.
    ///
    /// Use this instead of [`compare_to_reference`][Self::compare_to_reference]
    /// to apply a custom failure policy.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::DuplicateLabel`] if two candidates share a label.
    #[instrument(skip_all, fields(n_candidates = candidates.len(), metric = %self.metric, mode = %self.mode))]
    pub fn compare_outcomes<L>(
        &self,
        reference: &Sequence,
        candidates: &[(L, Sequence)],
    ) -> Result<Vec<CandidateOutcome>, BatchError>
    where
        L: AsRef<str> + Sync,
    {
        check_labels(candidates.iter().map(|(l, _)| l.as_ref()))?;

        let run = |(label, candidate): &(L, Sequence)| {
            let result = self.mode.run(reference, candidate, self.metric);
            self.outcome(label.as_ref(), self.tag.clone(), result)
        };
        let outcomes = if self.parallel {
            candidates.par_iter().map(run).collect()
        } else {
            candidates.iter().map(run).collect()
        };
        Ok(outcomes)
    }

    /// Fuse the channels each candidate shares with the reference, then align
    /// the fused frames and build the comparison table.
    ///
    /// Reference channels are screened once. A candidate whose channels
    /// cannot be fused counts as a failed alignment.
    ///
    /// # Errors
    ///
    /// Same as [`compare_to_reference`][Self::compare_to_reference].
    #[instrument(skip_all, fields(n_candidates = candidates.len(), metric = %self.metric, mode = %self.mode))]
    pub fn compare_channels_to_reference<L>(
        &self,
        reference: &[Channel],
        candidates: &[(L, Vec<Channel>)],
    ) -> Result<Vec<ComparisonRecord>, BatchError>
    where
        L: AsRef<str> + Sync,
    {
        check_labels(candidates.iter().map(|(l, _)| l.as_ref()))?;
        let screened = ScreenedReference::new(reference);

        let run = |(label, channels): &(L, Vec<Channel>)| {
            let result = screened
                .fuse(channels)
                .and_then(|fused| self.mode.run(&fused.reference, &fused.candidate, self.metric));
            self.outcome(label.as_ref(), self.tag.clone(), result)
        };
        let outcomes: Vec<CandidateOutcome> = if self.parallel {
            candidates.par_iter().map(run).collect()
        } else {
            candidates.iter().map(run).collect()
        };
        self.tabulate(outcomes)
    }

    /// Align each channel a candidate shares with the reference on its own.
    ///
    /// Produces one row per (candidate, channel) pair, in candidate order and
    /// then candidate channel order, tagged with the channel name. Degenerate
    /// and unshared channels are skipped.
    ///
    /// # Errors
    ///
    /// Same as [`compare_to_reference`][Self::compare_to_reference].
    #[instrument(skip_all, fields(n_candidates = candidates.len(), metric = %self.metric, mode = %self.mode))]
    pub fn compare_per_channel<L>(
        &self,
        reference: &[Channel],
        candidates: &[(L, Vec<Channel>)],
    ) -> Result<Vec<ComparisonRecord>, BatchError>
    where
        L: AsRef<str> + Sync,
    {
        check_labels(candidates.iter().map(|(l, _)| l.as_ref()))?;
        let screened = ScreenedReference::new(reference);

        let run = |(label, channels): &(L, Vec<Channel>)| -> Vec<CandidateOutcome> {
            let (pairs, _) = screened.pair(channels);
            pairs
                .into_iter()
                .map(|(r, c)| {
                    let result = self.mode.run(&r.data, &c.data, self.metric);
                    self.outcome(label.as_ref(), c.name.clone(), result)
                })
                .collect()
        };
        let nested: Vec<Vec<CandidateOutcome>> = if self.parallel {
            candidates.par_iter().map(run).collect()
        } else {
            candidates.iter().map(run).collect()
        };
        self.tabulate(nested.into_iter().flatten().collect())
    }

    fn outcome(
        &self,
        label: &str,
        tag: String,
        result: Result<AlignmentResult, AlignError>,
    ) -> CandidateOutcome {
        match &result {
            Ok(r) => debug!(
                label,
                tag = %tag,
                raw_cost = r.raw_cost,
                normalized_cost = r.normalized_cost,
                "candidate aligned"
            ),
            Err(e) => debug!(label, tag = %tag, error = %e, "candidate failed"),
        }
        CandidateOutcome {
            label: label.to_string(),
            tag,
            result,
        }
    }

    /// Apply the failure policy and sort order to raw outcomes.
    fn tabulate(&self, outcomes: Vec<CandidateOutcome>) -> Result<Vec<ComparisonRecord>, BatchError> {
        let total = outcomes.len();
        let mut failed = 0usize;
        let mut records = Vec::with_capacity(total);

        for CandidateOutcome { label, tag, result } in outcomes {
            match result {
                Ok(r) => records.push(ComparisonRecord::aligned(
                    label,
                    tag,
                    r.raw_cost,
                    r.normalized_cost,
                )),
                Err(source) => {
                    failed += 1;
                    match self.failure_policy {
                        FailurePolicy::ZeroFill => {
                            warn!(label = %label, error = %source, "alignment failed, recording zero cost");
                            records.push(ComparisonRecord::failed(label, tag));
                        }
                        FailurePolicy::Drop => {
                            warn!(label = %label, error = %source, "alignment failed, dropping candidate");
                        }
                        FailurePolicy::Strict => {
                            return Err(BatchError::CandidateFailed { label, source });
                        }
                    }
                }
            }
        }

        sort_records(&mut records, self.sort);
        info!(total, failed, rows = records.len(), "comparison table built");
        Ok(records)
    }
}

fn check_labels<'a>(labels: impl Iterator<Item = &'a str>) -> Result<(), BatchError> {
    let mut seen = HashSet::new();
    for label in labels {
        if !seen.insert(label) {
            return Err(BatchError::DuplicateLabel {
                label: label.to_string(),
            });
        }
    }
    Ok(())
}

/// Stable sort; ties keep candidate order.
fn sort_records(records: &mut [ComparisonRecord], order: SortOrder) {
    match order {
        SortOrder::Input => {}
        SortOrder::Label => records.sort_by(|a, b| a.label.cmp(&b.label)),
        SortOrder::RawCost => records.sort_by(|a, b| a.raw_cost.total_cmp(&b.raw_cost)),
        SortOrder::NormalizedCost => {
            records.sort_by(|a, b| a.normalized_cost.total_cmp(&b.normalized_cost));
        }
    }
}
