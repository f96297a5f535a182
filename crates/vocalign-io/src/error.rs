//! I/O error types for vocalign-io.

use std::path::PathBuf;

use vocalign_dtw::AlignError;

/// Errors from sequence file reading and result serialization.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when the input file does not exist or is unreadable.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the CSV parser encounters a malformed record.
    #[error("CSV parse error in {path} at byte offset {offset}")]
    CsvParse {
        /// Path to the CSV file.
        path: PathBuf,
        /// Byte offset where the error occurred.
        offset: u64,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// Returned when the CSV file contains a header but zero frame rows.
    #[error("empty sequence (no frame rows) in {path}")]
    EmptyDataset {
        /// Path to the CSV file.
        path: PathBuf,
    },

    /// Returned when a frame row has a different number of columns than the header.
    #[error("inconsistent row length in {path}: frame {frame} has {got} columns, expected {expected}")]
    InconsistentRowLength {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based frame index (excluding header).
        frame: usize,
        /// Expected number of columns (from header).
        expected: usize,
        /// Actual number of columns in this row.
        got: usize,
    },

    /// Returned when a cell value is NaN, Inf, or otherwise not a finite float.
    #[error("non-finite value in {path}: frame {frame}, column {column}, raw value \"{raw}\"")]
    NonFiniteValue {
        /// Path to the CSV file.
        path: PathBuf,
        /// Zero-based frame index (excluding header).
        frame: usize,
        /// Zero-based column index.
        column: usize,
        /// The raw string value that failed to parse.
        raw: String,
    },

    /// Returned when parsed frames do not form a valid sequence.
    #[error("invalid sequence in {path}")]
    InvalidSequence {
        /// Path to the CSV file.
        path: PathBuf,
        /// Validation error from the sequence constructor.
        source: AlignError,
    },

    /// Returned when the experiment name contains characters outside `[a-zA-Z0-9_-]`.
    #[error("invalid experiment name \"{name}\": must match [a-zA-Z0-9_-]+")]
    InvalidExperimentName {
        /// The invalid name.
        name: String,
    },

    /// Returned when the output directory cannot be created.
    #[error("cannot create output directory {path}")]
    OutputDirCreate {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a result file cannot be written.
    #[error("cannot write file {path}")]
    WriteFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when a result table cannot be encoded.
    #[error("cannot encode {path}")]
    Encode {
        /// Path of the artifact being written.
        path: PathBuf,
        /// Underlying serializer message.
        reason: String,
    },
}
