//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with cpal, rodio, notify-rust and the filesystem.

pub mod audio_cue;
pub mod config;
pub mod notification;
pub mod permissions;
pub mod playback;
pub mod recording;

// Re-export adapters
pub use audio_cue::{create_audio_cue, NoOpAudioCue, RodioAudioCue};
pub use config::XdgConfigStore;
pub use notification::{create_notifier, NotifierChain, NotifyRustNotifier, TerminalNotifier};
pub use permissions::DesktopPermissions;
pub use playback::{RodioPlayback, RodioPlayer};
pub use recording::{CpalCapture, CpalRecorder};
