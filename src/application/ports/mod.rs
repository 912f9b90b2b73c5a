//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod audio_cue;
pub mod config;
pub mod notifier;
pub mod permissions;
pub mod player;
pub mod recorder;

// Re-export common types
pub use audio_cue::{AudioCue, AudioCueError, AudioCueType};
pub use config::ConfigStore;
pub use notifier::{NotificationError, NotificationIcon, Notifier};
pub use permissions::{PermissionStatus, Permissions};
pub use player::{AudioPlayer, CompletionCallback, PlaybackError, PlaybackHandle};
pub use recorder::{AudioRecorder, CaptureHandle, RecordingError};
