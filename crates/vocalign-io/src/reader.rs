//! CSV frame sequence reader with full input validation.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};
use vocalign_dtw::Sequence;

use crate::IoError;

/// Reads one frame sequence from a CSV file.
///
/// Expected CSV format:
/// - Header row required (one name per feature component, e.g. `c0,c1,...`)
/// - One row per frame, in time order
/// - All rows must have the same number of columns, all numeric
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::EmptyDataset`] | Zero frame rows after header |
/// | [`IoError::InconsistentRowLength`] | Row has different column count than header |
/// | [`IoError::NonFiniteValue`] | Cell is NaN, Inf, or unparseable float |
/// | [`IoError::InvalidSequence`] | Frames rejected by [`Sequence::new`] |
pub struct SequenceReader {
    path: PathBuf,
}

impl SequenceReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Return the label used for this file in comparison tables (the file stem).
    #[must_use]
    pub fn label(&self) -> String {
        self.path
            .file_stem()
            .map_or_else(|| self.path.display().to_string(), |s| s.to_string_lossy().into_owned())
    }

    /// Read and validate the CSV file, returning a [`Sequence`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<Sequence, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true) so a short row surfaces as InconsistentRowLength
        // instead of a low-level CsvParse error.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let header = rdr.headers().map_err(|e| self.csv_error(e))?;
        let expected = header.len();
        debug!(expected, "read CSV header");

        let mut frames = Vec::new();
        for (frame, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.csv_error(e))?;
            if record.len() != expected {
                return Err(IoError::InconsistentRowLength {
                    path: self.path.clone(),
                    frame,
                    expected,
                    got: record.len(),
                });
            }

            let mut values = Vec::with_capacity(expected);
            for (column, raw) in record.iter().enumerate() {
                let value = raw
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| IoError::NonFiniteValue {
                        path: self.path.clone(),
                        frame,
                        column,
                        raw: raw.to_string(),
                    })?;
                values.push(value);
            }
            frames.push(values);
        }

        if frames.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        let sequence = Sequence::new(frames).map_err(|e| IoError::InvalidSequence {
            path: self.path.clone(),
            source: e,
        })?;
        info!(
            frames = sequence.len(),
            dim = sequence.dim(),
            "sequence loaded"
        );
        Ok(sequence)
    }

    fn csv_error(&self, e: csv::Error) -> IoError {
        IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn read_valid_frames() {
        let f = write_csv("c0,c1,c2\n1.0,0.0,0.5\n0.0,1.0,0.5\n0.2,0.2,0.2\n0.9,0.1,0.0\n");
        let seq = SequenceReader::new(f.path()).read().unwrap();
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.dim(), 3);
        assert_eq!(seq.frame(1), &[0.0, 1.0, 0.5]);
    }

    #[test]
    fn single_frame_single_column() {
        let f = write_csv("mfcc0\n-3.25\n");
        let seq = SequenceReader::new(f.path()).read().unwrap();
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.frame(0), &[-3.25]);
    }

    #[test]
    fn whitespace_around_cells_is_ignored() {
        let f = write_csv("x, y\n 1.5 , 2.5\n");
        let seq = SequenceReader::new(f.path()).read().unwrap();
        assert_eq!(seq.frame(0), &[1.5, 2.5]);
    }

    #[test]
    fn label_is_file_stem() {
        let reader = SequenceReader::new(Path::new("/data/ema/F01_iy.csv"));
        assert_eq!(reader.label(), "F01_iy");
    }

    #[test]
    fn error_file_not_found() {
        let result = SequenceReader::new(Path::new("/nonexistent/file.csv")).read();
        assert!(matches!(result, Err(IoError::FileNotFound { .. })));
    }

    #[test]
    fn error_empty_dataset() {
        let f = write_csv("c0,c1,c2\n");
        let result = SequenceReader::new(f.path()).read();
        assert!(matches!(result, Err(IoError::EmptyDataset { .. })));
    }

    #[test]
    fn error_inconsistent_row_length() {
        let f = write_csv("c0,c1,c2\n1.0,2.0,3.0\n1.0,2.0\n");
        let result = SequenceReader::new(f.path()).read();
        assert!(matches!(
            result,
            Err(IoError::InconsistentRowLength {
                frame: 1,
                expected: 3,
                got: 2,
                ..
            })
        ));
    }

    #[test]
    fn error_non_finite_values() {
        for bad in ["NaN", "inf", "-Inf", "abc", ""] {
            let f = write_csv(&format!("c0,c1\n1.0,{bad}\n"));
            let result = SequenceReader::new(f.path()).read();
            assert!(
                matches!(result, Err(IoError::NonFiniteValue { frame: 0, column: 1, .. })),
                "{bad:?} should be rejected"
            );
        }
    }
}
