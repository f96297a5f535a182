//! JSON and CSV writers for comparison tables and single alignments.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};
use vocalign_batch::ComparisonRecord;
use vocalign_dtw::{AlignmentResult, Step};

use crate::IoError;
use crate::domain::ExperimentName;

/// Writes comparison and alignment results under one output directory.
///
/// Creates the output directory on construction if it does not exist.
/// Output files are named `{experiment}_comparison.json`,
/// `{experiment}_comparison.csv` and `{experiment}_alignment.json`.
pub struct ResultWriter {
    output_dir: PathBuf,
    experiment: ExperimentName,
}

impl ResultWriter {
    /// Create a new writer targeting the given directory and experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), experiment = %experiment))]
    pub fn new(output_dir: &Path, experiment: ExperimentName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            experiment,
        })
    }

    /// Return the path of the artifact `{experiment}_{suffix}.{ext}`.
    #[must_use]
    pub fn artifact_path(&self, suffix: &str, ext: &str) -> PathBuf {
        self.output_dir.join(self.experiment.file_name(suffix, ext))
    }

    /// Write a comparison table to `{experiment}_comparison.json`.
    ///
    /// Rows keep the order of `records`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`IoError::Encode`] | The table cannot be serialized |
    /// | [`IoError::WriteFile`] | The file cannot be written |
    #[instrument(skip_all, fields(rows = records.len()))]
    pub fn write_comparison(
        &self,
        reference_label: &str,
        records: &[ComparisonRecord],
    ) -> Result<PathBuf, IoError> {
        let path = self.artifact_path("comparison", "json");
        let artifact = ComparisonArtifact {
            experiment: self.experiment.as_str(),
            reference: reference_label,
            n_candidates: records.len(),
            n_failed: records.iter().filter(|r| r.is_failed()).count(),
            records: records.iter().map(RecordRow::from).collect(),
        };
        let json = serde_json::to_string_pretty(&artifact).map_err(|e| IoError::Encode {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        write_file(&path, json.as_bytes())?;

        info!(path = %path.display(), "comparison table written");
        Ok(path)
    }

    /// Write a comparison table to `{experiment}_comparison.csv`.
    ///
    /// Columns: `label,raw_cost,normalized_cost,tag,status`.
    ///
    /// # Errors
    ///
    /// Same as [`write_comparison`](Self::write_comparison).
    #[instrument(skip_all, fields(rows = records.len()))]
    pub fn write_comparison_csv(&self, records: &[ComparisonRecord]) -> Result<PathBuf, IoError> {
        let path = self.artifact_path("comparison", "csv");
        let encode = |reason: String| IoError::Encode {
            path: path.clone(),
            reason,
        };

        let mut wtr = csv::Writer::from_writer(Vec::new());
        if records.is_empty() {
            wtr.write_record(["label", "raw_cost", "normalized_cost", "tag", "status"])
                .map_err(|e| encode(e.to_string()))?;
        }
        for record in records {
            wtr.serialize(RecordRow::from(record))
                .map_err(|e| encode(e.to_string()))?;
        }
        let bytes = wtr.into_inner().map_err(|e| encode(e.to_string()))?;
        write_file(&path, &bytes)?;

        info!(path = %path.display(), "comparison csv written");
        Ok(path)
    }

    /// Write one alignment (path pairs, moves and costs) to `{experiment}_alignment.json`.
    ///
    /// `path` and `steps` are `null` for aggregate-only results.
    ///
    /// # Errors
    ///
    /// Same as [`write_comparison`](Self::write_comparison).
    #[instrument(skip_all, fields(label = label))]
    pub fn write_alignment(&self, label: &str, result: &AlignmentResult) -> Result<PathBuf, IoError> {
        let path = self.artifact_path("alignment", "json");
        let artifact = AlignmentArtifact {
            experiment: self.experiment.as_str(),
            label,
            reference_len: result.reference_len,
            candidate_len: result.candidate_len,
            raw_cost: result.raw_cost,
            normalized_cost: result.normalized_cost,
            path: result.path.as_ref().map(|p| p.pairs()),
            steps: result
                .path
                .as_ref()
                .map(|p| p.steps().into_iter().map(step_name).collect()),
        };
        let json = serde_json::to_string_pretty(&artifact).map_err(|e| IoError::Encode {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        write_file(&path, json.as_bytes())?;

        info!(path = %path.display(), "alignment written");
        Ok(path)
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), IoError> {
    fs::write(path, contents).map_err(|e| IoError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}

fn step_name(step: Step) -> &'static str {
    match step {
        Step::Match => "match",
        Step::Insertion => "insertion",
        Step::Deletion => "deletion",
    }
}

// --- Shadow structs for serialization ---

#[derive(Serialize)]
struct ComparisonArtifact<'a> {
    experiment: &'a str,
    reference: &'a str,
    n_candidates: usize,
    n_failed: usize,
    records: Vec<RecordRow<'a>>,
}

#[derive(Serialize)]
struct RecordRow<'a> {
    label: &'a str,
    raw_cost: f64,
    normalized_cost: f64,
    tag: &'a str,
    status: &'static str,
}

impl<'a> From<&'a ComparisonRecord> for RecordRow<'a> {
    fn from(r: &'a ComparisonRecord) -> Self {
        Self {
            label: &r.label,
            raw_cost: r.raw_cost,
            normalized_cost: r.normalized_cost,
            tag: &r.tag,
            status: r.status.as_str(),
        }
    }
}

#[derive(Serialize)]
struct AlignmentArtifact<'a> {
    experiment: &'a str,
    label: &'a str,
    reference_len: usize,
    candidate_len: usize,
    raw_cost: f64,
    normalized_cost: f64,
    path: Option<&'a [(usize, usize)]>,
    steps: Option<Vec<&'static str>>,
}
