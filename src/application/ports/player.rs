//! Playback port interfaces

use std::path::Path;

use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    #[error("No audio output device available: {0}")]
    NoAudioDevice(String),

    #[error("Failed to open recording: {0}")]
    OpenFailed(String),

    #[error("Failed to decode recording: {0}")]
    DecodeFailed(String),

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),
}

/// Invoked once when playback reaches the end of the file.
/// Never invoked after an explicit stop.
pub type CompletionCallback = Box<dyn FnOnce() + Send + 'static>;

/// An open playback of one file.
///
/// Dropping the handle stops playback.
pub trait PlaybackHandle: Send {
    /// Stop playback and release the output device
    fn stop(self) -> Result<(), PlaybackError>;
}

/// Port for playing a recording back
pub trait AudioPlayer: Send + Sync {
    type Handle: PlaybackHandle;

    /// Open `path` and start playing it.
    ///
    /// # Arguments
    /// * `path` - The recording to play
    /// * `on_complete` - Called from the playback thread on natural completion
    fn open(&self, path: &Path, on_complete: CompletionCallback)
        -> Result<Self::Handle, PlaybackError>;
}
