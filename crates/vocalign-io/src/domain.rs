//! Domain types for vocalign-io.

use std::fmt;

use crate::IoError;

/// A validated experiment name for output file naming.
///
/// Must match `[a-zA-Z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentName(String);

impl ExperimentName {
    /// Parse and validate an experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidExperimentName`] if the name is empty or
    /// contains characters outside `[a-zA-Z0-9_-]`.
    pub fn new(name: String) -> Result<Self, IoError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(IoError::InvalidExperimentName { name });
        }
        Ok(Self(name))
    }

    /// Return the experiment name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the artifact file name `{experiment}_{suffix}.{ext}`.
    pub(crate) fn file_name(&self, suffix: &str, ext: &str) -> String {
        format!("{}_{suffix}.{ext}", self.0)
    }
}

impl fmt::Display for ExperimentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn experiment_name_valid() {
        let name = ExperimentName::new("iy-prompt_01".to_string()).unwrap();
        assert_eq!(name.as_str(), "iy-prompt_01");
        assert_eq!(name.to_string(), "iy-prompt_01");
        assert_eq!(name.file_name("comparison", "csv"), "iy-prompt_01_comparison.csv");
    }

    #[test]
    fn experiment_name_rejects_empty() {
        let name = ExperimentName::new(String::new());
        assert!(matches!(name, Err(IoError::InvalidExperimentName { .. })));
    }

    #[test]
    fn experiment_name_rejects_special_chars() {
        for bad in ["my experiment", "a/b", "../up", "x.y"] {
            let name = ExperimentName::new(bad.to_string());
            assert!(
                matches!(name, Err(IoError::InvalidExperimentName { .. })),
                "{bad} should be rejected"
            );
        }
    }
}
