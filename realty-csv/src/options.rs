//! Options controlling a conversion run.

use std::{fs, path::PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::error::Error;

/// Default directory scanned for extracts, relative to the working directory.
pub const DEFAULT_INPUT_DIR: &str = "XML";
/// Default directory receiving the tables, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "OUT";
/// Default file name pattern of extracts.
pub const DEFAULT_INPUT_PATTERN: &str = "*.xml";

/// Where a run reads from, where it writes to, and how output files are stamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Glob matched case-insensitively against file names in `input_dir`.
    pub input_pattern: String,
    /// Fixed run timestamp; the local time at converter creation when `None`.
    pub timestamp: Option<NaiveDateTime>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            input_pattern: DEFAULT_INPUT_PATTERN.to_string(),
            timestamp: None,
        }
    }
}

impl ConvertOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_dir(mut self, input_dir: impl Into<PathBuf>) -> Self {
        self.input_dir = input_dir.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_input_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.input_pattern = pattern.into();
        self
    }

    pub fn with_timestamp(mut self, timestamp: Option<NaiveDateTime>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The fixed timestamp, or the current local time.
    pub fn run_timestamp(&self) -> NaiveDateTime {
        self.timestamp.unwrap_or_else(|| Local::now().naive_local())
    }

    /// Creates the input and output directories if they do not exist yet.
    pub fn ensure_dirs(&self) -> Result<(), Error> {
        fs::create_dir_all(&self.input_dir)?;
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_defaults() {
        let options = ConvertOptions::new();
        assert_eq!(options.input_dir, PathBuf::from("XML"));
        assert_eq!(options.output_dir, PathBuf::from("OUT"));
        assert_eq!(options.input_pattern, "*.xml");
        assert_eq!(options.timestamp, None);
    }

    #[test]
    fn test_fixed_timestamp_is_used() {
        let at = NaiveDate::from_ymd_opt(2023, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let options = ConvertOptions::new().with_timestamp(Some(at));
        assert_eq!(options.run_timestamp(), at);
    }

    #[test]
    fn test_ensure_dirs_creates_both() {
        let tmp = tempfile::tempdir().unwrap();
        let options = ConvertOptions::new()
            .with_input_dir(tmp.path().join("in"))
            .with_output_dir(tmp.path().join("nested").join("out"));

        options.ensure_dirs().unwrap();
        assert!(options.input_dir.is_dir());
        assert!(options.output_dir.is_dir());
        // second call is a no-op
        options.ensure_dirs().unwrap();
    }
}
