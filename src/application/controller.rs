//! Recording/playback lifecycle controller
//!
//! State machine:
//!   IDLE -> RECORDING (start_recording)
//!   RECORDING -> IDLE (stop_recording)
//!   IDLE -> PLAYING (start_playing)
//!   PLAYING -> IDLE (stop_playing, or playback completion)
//!
//! There is no transition between RECORDING and PLAYING. Every refused
//! action leaves the state unchanged and shows a notice.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

use crate::domain::recording::RecordingName;
use crate::domain::session::{InvalidStateTransition, SessionState, StatusLine};

use super::ports::{
    AudioCue, AudioCueType, AudioPlayer, AudioRecorder, CaptureHandle, CompletionCallback,
    NotificationIcon, Notifier, PermissionStatus, Permissions, PlaybackError, PlaybackHandle,
    RecordingError,
};

/// Title used for every notice
const NOTICE_TITLE: &str = "Voice Memo";

/// Identifies one playback session
pub type PlaybackId = u64;

/// Message sent by the playback adapter when a file has been played to the end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackFinished {
    pub id: PlaybackId,
}

/// The four user actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    StartRecording,
    StopRecording,
    StartPlaying,
    StopPlaying,
}

/// Errors from the lifecycle controller.
/// Each one has already been shown to the user as a notice.
#[derive(Debug, Error)]
pub enum MemoError {
    #[error(transparent)]
    InvalidState(#[from] InvalidStateTransition),

    #[error("Nothing has been recorded")]
    NothingRecorded,

    #[error("Recording permissions denied ({0})")]
    PermissionDenied(PermissionStatus),

    #[error("Recording failed: {0}")]
    Recording(#[from] RecordingError),

    #[error("Playback failed: {0}")]
    Playback(#[from] PlaybackError),
}

/// Where recordings are written and how they are named
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub output_dir: PathBuf,
    pub recording_name: RecordingName,
}

/// Active session. Handles only exist inside the variant that owns them.
enum Session<H, K> {
    Idle,
    Recording(H),
    Playing { id: PlaybackId, handle: K },
}

/// Lifecycle controller owning at most one capture or playback at a time
pub struct MemoController<R, P, N, C, G>
where
    R: AudioRecorder,
    P: AudioPlayer,
    N: Notifier,
    C: AudioCue,
    G: Permissions,
{
    recorder: R,
    player: P,
    notifier: N,
    audio_cue: C,
    permissions: G,
    config: ControllerConfig,
    session: Session<R::Handle, P::Handle>,
    last_recorded: Option<PathBuf>,
    status: StatusLine,
    next_playback_id: PlaybackId,
    completions: UnboundedSender<PlaybackFinished>,
}

impl<R, P, N, C, G> MemoController<R, P, N, C, G>
where
    R: AudioRecorder,
    P: AudioPlayer,
    N: Notifier,
    C: AudioCue,
    G: Permissions,
{
    /// Create a new controller in idle state.
    ///
    /// Playback completions are sent to `completions`; feed them back
    /// through [`MemoController::on_playback_finished`].
    pub fn new(
        recorder: R,
        player: P,
        notifier: N,
        audio_cue: C,
        permissions: G,
        config: ControllerConfig,
        completions: UnboundedSender<PlaybackFinished>,
    ) -> Self {
        Self {
            recorder,
            player,
            notifier,
            audio_cue,
            permissions,
            config,
            session: Session::Idle,
            last_recorded: None,
            status: StatusLine::Ready,
            next_playback_id: 0,
            completions,
        }
    }

    /// Get the current state
    pub fn state(&self) -> SessionState {
        match self.session {
            Session::Idle => SessionState::Idle,
            Session::Recording(_) => SessionState::Recording,
            Session::Playing { .. } => SessionState::Playing,
        }
    }

    /// Get the status display text
    pub fn status(&self) -> StatusLine {
        self.status
    }

    /// Most recent successfully saved recording
    pub fn last_recorded(&self) -> Option<&Path> {
        self.last_recorded.as_deref()
    }

    /// File being written by the active recording
    pub fn recording_path(&self) -> Option<&Path> {
        match &self.session {
            Session::Recording(handle) => Some(handle.path()),
            _ => None,
        }
    }

    /// Run one user action
    pub async fn perform(&mut self, action: Action) -> Result<(), MemoError> {
        match action {
            Action::StartRecording => self.start_recording().await,
            Action::StopRecording => self.stop_recording().await,
            Action::StartPlaying => self.start_playing().await,
            Action::StopPlaying => self.stop_playing().await,
        }
    }

    /// Transition from IDLE to RECORDING
    pub async fn start_recording(&mut self) -> Result<(), MemoError> {
        match self.state() {
            SessionState::Recording => {
                return self.refuse("start recording", "Already recording").await
            }
            SessionState::Playing => {
                return self.refuse("start recording", "Playback in progress").await
            }
            SessionState::Idle => {}
        }

        self.ensure_permissions().await?;

        let path = self
            .config
            .recording_name
            .next_available(&self.config.output_dir);

        self.play_cue(AudioCueType::RecordingStart).await;

        let handle = match self.recorder.open(&path) {
            Ok(handle) => handle,
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to prepare recording");
                self.play_cue(AudioCueType::Denied).await;
                self.notice(
                    &format!("Could not start recording: {}", e),
                    NotificationIcon::Error,
                )
                .await;
                return Err(e.into());
            }
        };

        info!(path = %path.display(), "Recording started");
        self.session = Session::Recording(handle);
        self.status = StatusLine::RecordingInProgress;
        Ok(())
    }

    /// Transition from RECORDING to IDLE, keeping the file
    pub async fn stop_recording(&mut self) -> Result<(), MemoError> {
        let handle = match std::mem::replace(&mut self.session, Session::Idle) {
            Session::Recording(handle) => handle,
            other => {
                self.session = other;
                return self.refuse("stop recording", "Recording not started").await;
            }
        };

        let finished = tokio::task::spawn_blocking(move || handle.finish())
            .await
            .unwrap_or_else(|e| {
                Err(RecordingError::RecordingFailed(format!(
                    "Finish task failed: {}",
                    e
                )))
            });

        match finished {
            Ok(path) => {
                info!(path = %path.display(), "Recording saved");
                let message = format!("File saved: {}", display_name(&path));
                self.last_recorded = Some(path);
                self.status = StatusLine::RecordingInterrupted;
                self.notice(&message, NotificationIcon::Success).await;
                self.play_cue(AudioCueType::RecordingStop).await;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to save recording");
                self.status = StatusLine::Ready;
                self.notice(
                    &format!("Recording was not saved: {}", e),
                    NotificationIcon::Error,
                )
                .await;
                Err(e.into())
            }
        }
    }

    /// Transition from IDLE to PLAYING on the last saved recording
    pub async fn start_playing(&mut self) -> Result<(), MemoError> {
        let Some(path) = self.last_recorded.clone() else {
            debug!("Playback requested before any recording");
            self.notice("Nothing has been recorded", NotificationIcon::Warning)
                .await;
            return Err(MemoError::NothingRecorded);
        };

        match self.state() {
            SessionState::Playing => {
                return self.refuse("start playback", "Already playing").await
            }
            SessionState::Recording => {
                return self
                    .refuse("start playback", "Recording in progress")
                    .await
            }
            SessionState::Idle => {}
        }

        let id = self.next_playback_id;
        self.next_playback_id += 1;

        let completions = self.completions.clone();
        let on_complete: CompletionCallback = Box::new(move || {
            // The receiver only goes away when the session loop has ended
            let _ = completions.send(PlaybackFinished { id });
        });

        match self.player.open(&path, on_complete) {
            Ok(handle) => {
                info!(id, path = %path.display(), "Playback started");
                self.session = Session::Playing { id, handle };
                self.status = StatusLine::Listening;
                Ok(())
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to prepare playback");
                self.notice(
                    &format!("Could not play {}: {}", display_name(&path), e),
                    NotificationIcon::Error,
                )
                .await;
                Err(e.into())
            }
        }
    }

    /// Transition from PLAYING to IDLE on user request
    pub async fn stop_playing(&mut self) -> Result<(), MemoError> {
        let (id, handle) = match std::mem::replace(&mut self.session, Session::Idle) {
            Session::Playing { id, handle } => (id, handle),
            other => {
                self.session = other;
                return self.refuse("stop playback", "Nothing is playing").await;
            }
        };

        if let Err(e) = handle.stop() {
            warn!(id, error = %e, "Playback did not stop cleanly");
        }
        info!(id, "Playback stopped");
        self.status = StatusLine::PlaybackStopped;
        Ok(())
    }

    /// Transition from PLAYING to IDLE when the player reports the end of file.
    /// Completions of an earlier playback are ignored.
    pub fn on_playback_finished(&mut self, done: PlaybackFinished) {
        match std::mem::replace(&mut self.session, Session::Idle) {
            Session::Playing { id, handle } if id == done.id => {
                drop(handle);
                info!(id, "Playback finished");
                self.status = StatusLine::PlaybackEnded;
            }
            other => {
                self.session = other;
                debug!(id = done.id, "Ignoring stale playback completion");
            }
        }
    }

    /// Release whatever is active. An active recording is saved.
    pub async fn shutdown(&mut self) {
        let result = match self.state() {
            SessionState::Recording => self.stop_recording().await,
            SessionState::Playing => self.stop_playing().await,
            SessionState::Idle => Ok(()),
        };
        if let Err(e) = result {
            warn!(error = %e, "Shutdown did not release cleanly");
        }
    }

    async fn ensure_permissions(&self) -> Result<(), MemoError> {
        if self.permissions.check().is_granted() {
            return Ok(());
        }

        let status = self.permissions.request();
        if status.is_granted() {
            self.notice("Permission Granted", NotificationIcon::Success)
                .await;
            return Ok(());
        }

        warn!(%status, "Recording permissions denied");
        self.notice("Permission Denied", NotificationIcon::Error).await;
        self.play_cue(AudioCueType::Denied).await;
        Err(MemoError::PermissionDenied(status))
    }

    async fn refuse(&self, action: &str, message: &str) -> Result<(), MemoError> {
        let err = InvalidStateTransition::new(self.state(), action);
        debug!(%err, "Action refused");
        self.notice(message, NotificationIcon::Warning).await;
        Err(err.into())
    }

    async fn notice(&self, message: &str, icon: NotificationIcon) {
        if let Err(e) = self.notifier.notify(NOTICE_TITLE, message, icon).await {
            warn!(error = %e, "Failed to show notice");
        }
    }

    async fn play_cue(&self, cue: AudioCueType) {
        if let Err(e) = self.audio_cue.play(cue).await {
            warn!(?cue, error = %e, "Failed to play audio cue");
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
