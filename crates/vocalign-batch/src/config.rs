//! Configuration builder for reference-vs-candidates comparison runs.

use vocalign_dtw::{Metric, SolverMode};

/// What to do with a candidate whose alignment fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Keep the row with `raw_cost = 0` and [`RecordStatus::Failed`](crate::RecordStatus::Failed).
    #[default]
    ZeroFill,
    /// Omit the row from the table.
    Drop,
    /// Abort the whole run with [`BatchError::CandidateFailed`](crate::BatchError::CandidateFailed).
    Strict,
}

/// Row order of the comparison table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Candidate order as given.
    #[default]
    Input,
    /// Ascending by label.
    Label,
    /// Ascending by raw cost.
    RawCost,
    /// Ascending by normalized cost.
    NormalizedCost,
}

/// Configuration for a comparison run.
///
/// Construct via [`BatchConfig::new`], then chain `with_*` methods to override defaults.
///
/// # Defaults
///
/// | Parameter        | Default                     |
/// |------------------|-----------------------------|
/// | `mode`           | `SolverMode::ExplicitPath`  |
/// | `failure_policy` | `FailurePolicy::ZeroFill`   |
/// | `sort`           | `SortOrder::Input`          |
/// | `tag`            | `""`                        |
/// | `parallel`       | `true`                      |
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub(crate) metric: Metric,
    pub(crate) mode: SolverMode,
    pub(crate) failure_policy: FailurePolicy,
    pub(crate) sort: SortOrder,
    pub(crate) tag: String,
    pub(crate) parallel: bool,
}

impl BatchConfig {
    /// Create a configuration comparing frames with `metric`.
    #[must_use]
    pub fn new(metric: Metric) -> Self {
        Self {
            metric,
            mode: SolverMode::ExplicitPath,
            failure_policy: FailurePolicy::ZeroFill,
            sort: SortOrder::Input,
            tag: String::new(),
            parallel: true,
        }
    }

    /// Set the solver used for every candidate.
    #[must_use]
    pub fn with_mode(mut self, mode: SolverMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set how failed candidates are reported.
    #[must_use]
    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Set the row order of the output table.
    #[must_use]
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Set the tag written into every record (e.g. a prompt or phone identifier).
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Enable or disable aligning candidates on the rayon thread pool.
    ///
    /// Output order is identical either way.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Return the frame metric.
    #[must_use]
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Return the solver mode.
    #[must_use]
    pub fn mode(&self) -> SolverMode {
        self.mode
    }

    /// Return the failure policy.
    #[must_use]
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Return the table sort order.
    #[must_use]
    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Return the record tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Return whether candidates are aligned in parallel.
    #[must_use]
    pub fn parallel(&self) -> bool {
        self.parallel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = BatchConfig::new(Metric::Cosine);
        assert_eq!(config.metric(), Metric::Cosine);
        assert_eq!(config.mode(), SolverMode::ExplicitPath);
        assert_eq!(config.failure_policy(), FailurePolicy::ZeroFill);
        assert_eq!(config.sort(), SortOrder::Input);
        assert_eq!(config.tag(), "");
        assert!(config.parallel());
    }

    #[test]
    fn builder_overrides() {
        let config = BatchConfig::new(Metric::Euclidean)
            .with_mode(SolverMode::Aggregate)
            .with_failure_policy(FailurePolicy::Strict)
            .with_sort(SortOrder::Label)
            .with_tag("ema_iy")
            .with_parallel(false);
        assert_eq!(config.mode(), SolverMode::Aggregate);
        assert_eq!(config.failure_policy(), FailurePolicy::Strict);
        assert_eq!(config.sort(), SortOrder::Label);
        assert_eq!(config.tag(), "ema_iy");
        assert!(!config.parallel());
    }
}
