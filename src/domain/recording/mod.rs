//! Recording value objects

mod file_name;

pub use file_name::{RecordingName, DEFAULT_STEM, RECORDING_EXTENSION};
