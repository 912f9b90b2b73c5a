//! Session state and status line values

use std::fmt;
use thiserror::Error;

/// Lifecycle states. Recording and playback never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Recording,
    Playing,
}

impl SessionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Playing => "playing",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Text shown in the status display after each transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusLine {
    #[default]
    Ready,
    RecordingInProgress,
    /// Recording stopped by the user and saved
    RecordingInterrupted,
    Listening,
    /// Playback reached the end of the file
    PlaybackEnded,
    /// Playback stopped by the user
    PlaybackStopped,
}

impl StatusLine {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::RecordingInProgress => "Recording in progress",
            Self::RecordingInterrupted => "Recording interrupted",
            Self::Listening => "Listening recording",
            Self::PlaybackEnded => "Recording ended",
            Self::PlaybackStopped => "Recording stopped",
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an action is not allowed in the current state
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while {current_state}")]
pub struct InvalidStateTransition {
    pub current_state: SessionState,
    pub action: String,
}

impl InvalidStateTransition {
    pub fn new(current_state: SessionState, action: impl Into<String>) -> Self {
        Self {
            current_state,
            action: action.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_idle() {
        assert_eq!(SessionState::default(), SessionState::Idle);
        assert_eq!(StatusLine::default(), StatusLine::Ready);
    }

    #[test]
    fn state_display() {
        assert_eq!(SessionState::Idle.to_string(), "idle");
        assert_eq!(SessionState::Recording.to_string(), "recording");
        assert_eq!(SessionState::Playing.to_string(), "playing");
    }

    #[test]
    fn status_line_text() {
        assert_eq!(
            StatusLine::RecordingInProgress.to_string(),
            "Recording in progress"
        );
        assert_eq!(StatusLine::Listening.to_string(), "Listening recording");
        assert_eq!(StatusLine::PlaybackEnded.to_string(), "Recording ended");
        assert_eq!(StatusLine::PlaybackStopped.to_string(), "Recording stopped");
    }

    #[test]
    fn error_display() {
        let err = InvalidStateTransition::new(SessionState::Playing, "start recording");
        let msg = err.to_string();
        assert!(msg.contains("start recording"));
        assert!(msg.contains("playing"));
    }
}
