//! Recording file naming
//!
//! Recordings are named `<stem>.flac`, then `<stem>1.flac`, `<stem>2.flac`, ...
//! A new recording never overwrites an existing file.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::domain::error::InvalidStemError;

/// Default file stem for recordings
pub const DEFAULT_STEM: &str = "Record";

/// Container extension for recordings
pub const RECORDING_EXTENSION: &str = "flac";

/// Validated recording file stem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingName {
    stem: String,
}

impl RecordingName {
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// File name for the given suffix. Suffix 0 has no number.
    pub fn file_name(&self, suffix: u32) -> String {
        if suffix == 0 {
            format!("{}.{}", self.stem, RECORDING_EXTENSION)
        } else {
            format!("{}{}.{}", self.stem, suffix, RECORDING_EXTENSION)
        }
    }

    /// First path in `dir` that does not exist yet, probing suffixes in order
    pub fn next_available(&self, dir: &Path) -> PathBuf {
        let mut suffix = 0;
        loop {
            let candidate = dir.join(self.file_name(suffix));
            if !candidate.exists() {
                return candidate;
            }
            suffix += 1;
        }
    }

    /// Suffix of a file name produced by this stem, if it is one
    pub fn suffix_of(&self, file_name: &str) -> Option<u32> {
        let rest = file_name.strip_prefix(&self.stem)?;
        let number = rest.strip_suffix(RECORDING_EXTENSION)?.strip_suffix('.')?;
        if number.is_empty() {
            return Some(0);
        }
        if !number.bytes().all(|b| b.is_ascii_digit()) || number.starts_with('0') {
            return None;
        }
        number.parse().ok()
    }
}

impl Default for RecordingName {
    fn default() -> Self {
        Self {
            stem: DEFAULT_STEM.to_string(),
        }
    }
}

impl FromStr for RecordingName {
    type Err = InvalidStemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stem = s.trim();
        let invalid = stem.is_empty()
            || stem.contains(['/', '\\', '.'])
            || stem.chars().any(char::is_control)
            || stem.ends_with(|c: char| c.is_ascii_digit());

        if invalid {
            return Err(InvalidStemError {
                input: s.to_string(),
            });
        }

        Ok(Self {
            stem: stem.to_string(),
        })
    }
}

impl fmt::Display for RecordingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stem)
    }
}
