//! Batch comparison of candidate sequences against a reference.
//!
//! Turns many pairwise DTW alignments into one ordered comparison table with
//! normalized costs, fuses named channels after zero-vector screening, and
//! counts labels with a mergeable accumulator.

mod channel;
mod compare;
mod config;
mod error;
mod record;
mod tally;

pub use channel::{
    Channel, ChannelFusion, ExcludedChannel, ExclusionReason, ScreenedReference, fuse_channels,
};
pub use compare::CandidateOutcome;
pub use config::{BatchConfig, FailurePolicy, SortOrder};
pub use error::BatchError;
pub use record::{ComparisonRecord, RecordStatus};
pub use tally::LabelTally;
