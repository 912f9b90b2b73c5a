//! Recording port interfaces

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Recording errors
#[derive(Debug, Clone, Error)]
pub enum RecordingError {
    #[error("No audio input device available")]
    NoAudioDevice,

    #[error("Failed to prepare recording: {0}")]
    PrepareFailed(String),

    #[error("Failed to start recording: {0}")]
    StartFailed(String),

    #[error("Recording failed: {0}")]
    RecordingFailed(String),

    #[error("Failed to write recording: {0}")]
    WriteFailed(String),
}

/// An open capture bound to one output file.
///
/// Dropping the handle without calling [`CaptureHandle::finish`] stops the
/// capture and discards the file. `finish` may block while the file is
/// encoded, so callers run it off the async runtime.
pub trait CaptureHandle: Send + 'static {
    /// Destination file of this capture
    fn path(&self) -> &Path;

    /// Stop capturing and write the file.
    ///
    /// # Returns
    /// The path of the written recording
    fn finish(self) -> Result<PathBuf, RecordingError>;
}

/// Port for microphone capture into a file
pub trait AudioRecorder: Send + Sync {
    type Handle: CaptureHandle;

    /// Prepare and start a capture that will be written to `path`.
    ///
    /// Returns once the capture is running, or with the error that kept it
    /// from starting.
    fn open(&self, path: &Path) -> Result<Self::Handle, RecordingError>;
}
