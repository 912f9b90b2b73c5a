//! Rodio-based playback adapter
//!
//! The output stream is not `Send`, so each playback runs on its own thread.
//! The thread reports natural completion through the completion callback;
//! an explicit stop never triggers it.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink};
use tracing::{debug, warn};

use crate::application::ports::{AudioPlayer, CompletionCallback, PlaybackError, PlaybackHandle};

/// How often the playback thread checks for stop or end of file
const POLL_INTERVAL: Duration = Duration::from_millis(50);

type FileDecoder = Decoder<BufReader<File>>;

/// Audio player using rodio
pub struct RodioPlayer;

impl RodioPlayer {
    /// Create a new rodio-based player
    pub fn new() -> Self {
        Self
    }

    /// Open and probe the file on the caller's thread so format errors
    /// are reported before any device is touched
    fn decode(path: &Path) -> Result<FileDecoder, PlaybackError> {
        let file = File::open(path)
            .map_err(|e| PlaybackError::OpenFailed(format!("{}: {}", path.display(), e)))?;
        Decoder::new(BufReader::new(file)).map_err(|e| PlaybackError::DecodeFailed(e.to_string()))
    }

    /// Body of the playback thread
    fn run_playback(
        decoder: FileDecoder,
        stop: Arc<AtomicBool>,
        on_complete: CompletionCallback,
        ready: mpsc::Sender<Result<(), PlaybackError>>,
    ) {
        let (_stream, stream_handle) = match OutputStream::try_default() {
            Ok(output) => output,
            Err(e) => {
                let _ = ready.send(Err(PlaybackError::NoAudioDevice(e.to_string())));
                return;
            }
        };

        let sink = match Sink::try_new(&stream_handle) {
            Ok(sink) => sink,
            Err(e) => {
                let _ = ready.send(Err(PlaybackError::PlaybackFailed(e.to_string())));
                return;
            }
        };

        sink.append(decoder);
        let _ = ready.send(Ok(()));

        while !stop.load(Ordering::SeqCst) {
            if sink.empty() {
                debug!("Playback reached end of file");
                on_complete();
                return;
            }
            thread::sleep(POLL_INTERVAL);
        }

        sink.stop();
    }
}

impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioPlayer for RodioPlayer {
    type Handle = RodioPlayback;

    fn open(
        &self,
        path: &Path,
        on_complete: CompletionCallback,
    ) -> Result<RodioPlayback, PlaybackError> {
        let decoder = Self::decode(path)?;

        let mut playback = RodioPlayback {
            stop: Arc::new(AtomicBool::new(false)),
            worker: None,
        };

        let (ready_tx, ready_rx) = mpsc::channel();
        let stop = Arc::clone(&playback.stop);

        let worker = thread::Builder::new()
            .name("memo-playback".into())
            .spawn(move || RodioPlayer::run_playback(decoder, stop, on_complete, ready_tx))
            .map_err(|e| PlaybackError::PlaybackFailed(e.to_string()))?;
        playback.worker = Some(worker);

        match ready_rx.recv() {
            Ok(result) => result?,
            Err(_) => {
                return Err(PlaybackError::PlaybackFailed(
                    "Playback thread exited before starting".into(),
                ))
            }
        }

        Ok(playback)
    }
}

/// Running playback; dropping it stops the sound
pub struct RodioPlayback {
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl RodioPlayback {
    fn stop_worker(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Playback thread panicked");
            }
        }
    }
}

impl PlaybackHandle for RodioPlayback {
    fn stop(mut self) -> Result<(), PlaybackError> {
        self.stop_worker();
        Ok(())
    }
}

impl Drop for RodioPlayback {
    fn drop(&mut self) {
        self.stop_worker();
    }
}
