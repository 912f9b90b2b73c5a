//! Cross-platform microphone capture using cpal
//!
//! The cpal stream is not `Send`, so it lives on a dedicated capture thread.
//! The handle owns the thread's stop flag and join handle. Samples are mixed
//! to mono while capturing, then resampled and encoded to FLAC on finish.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex as StdMutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use rubato::{FftFixedIn, Resampler};
use tracing::{debug, error, warn};

use super::flac_encoder::{encode_to_flac, NARROWBAND_SAMPLE_RATE};
use crate::application::ports::{AudioRecorder, CaptureHandle, RecordingError};

/// How often the capture thread checks its stop flag
const POLL_INTERVAL: Duration = Duration::from_millis(20);

type SampleBuffer = Arc<StdMutex<Vec<i16>>>;

/// Microphone recorder writing narrowband mono FLAC files
pub struct CpalRecorder {
    target_sample_rate: u32,
}

impl CpalRecorder {
    /// Create a recorder storing files at the narrowband rate
    pub fn new() -> Self {
        Self {
            target_sample_rate: NARROWBAND_SAMPLE_RATE,
        }
    }

    /// Get the default input device
    pub(crate) fn get_input_device() -> Result<cpal::Device, RecordingError> {
        let host = cpal::default_host();
        host.default_input_device()
            .ok_or(RecordingError::NoAudioDevice)
    }

    /// Get a suitable input configuration, preferring mono and a range
    /// that includes the target rate
    fn get_input_config(
        device: &cpal::Device,
        target_rate: u32,
    ) -> Result<(StreamConfig, SampleFormat), RecordingError> {
        let supported_configs = device.supported_input_configs().map_err(|e| {
            RecordingError::StartFailed(format!("Failed to get configs: {}", e))
        })?;

        let includes_target = |config: &cpal::SupportedStreamConfigRange| {
            config.min_sample_rate().0 <= target_rate && config.max_sample_rate().0 >= target_rate
        };

        let mut best_config: Option<cpal::SupportedStreamConfigRange> = None;

        for config in supported_configs {
            if config.sample_format() != SampleFormat::I16
                && config.sample_format() != SampleFormat::F32
            {
                continue;
            }

            let is_better = match &best_config {
                None => true,
                Some(current) => {
                    let fewer_channels = config.channels() < current.channels();
                    let better_rate = includes_target(&config) && !includes_target(current);
                    fewer_channels || better_rate
                }
            };
            if is_better {
                best_config = Some(config);
            }
        }

        let config_range = best_config.ok_or(RecordingError::StartFailed(
            "No suitable config found".into(),
        ))?;

        // Use target sample rate if supported, otherwise the lowest available
        let sample_rate = if includes_target(&config_range) {
            SampleRate(target_rate)
        } else {
            config_range.min_sample_rate()
        };

        let sample_format = config_range.sample_format();
        let config = StreamConfig {
            channels: config_range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, sample_format))
    }

    /// Build and start the input stream on the current thread
    fn start_stream(
        buffer: &SampleBuffer,
        running: &Arc<AtomicBool>,
        target_rate: u32,
    ) -> Result<(cpal::Stream, u32), RecordingError> {
        let device = Self::get_input_device()?;
        let (config, sample_format) = Self::get_input_config(&device, target_rate)?;
        let sample_rate = config.sample_rate.0;
        let channels = config.channels;

        debug!(sample_rate, channels, ?sample_format, "Opening input stream");

        let on_error = |err: cpal::StreamError| error!("Audio input stream error: {}", err);

        let stream = match sample_format {
            SampleFormat::I16 => {
                let buffer = Arc::clone(buffer);
                let running = Arc::clone(running);
                device.build_input_stream(
                    &config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        if running.load(Ordering::SeqCst) {
                            push_mono(&buffer, data, channels);
                        }
                    },
                    on_error,
                    None,
                )
            }

            SampleFormat::F32 => {
                let buffer = Arc::clone(buffer);
                let running = Arc::clone(running);
                device.build_input_stream(
                    &config,
                    move |data: &[f32], _: &cpal::InputCallbackInfo| {
                        if running.load(Ordering::SeqCst) {
                            let i16_data: Vec<i16> =
                                data.iter().map(|&s| (s * 32767.0) as i16).collect();
                            push_mono(&buffer, &i16_data, channels);
                        }
                    },
                    on_error,
                    None,
                )
            }

            _ => {
                return Err(RecordingError::StartFailed(
                    "Unsupported sample format".into(),
                ))
            }
        }
        .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

        stream
            .play()
            .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

        Ok((stream, sample_rate))
    }

    /// Body of the capture thread: start the stream, report readiness,
    /// then keep the stream alive until the stop flag clears
    fn run_capture(
        buffer: SampleBuffer,
        running: Arc<AtomicBool>,
        target_rate: u32,
        ready: mpsc::Sender<Result<u32, RecordingError>>,
    ) {
        let stream = match Self::start_stream(&buffer, &running, target_rate) {
            Ok((stream, sample_rate)) => {
                let _ = ready.send(Ok(sample_rate));
                stream
            }
            Err(e) => {
                let _ = ready.send(Err(e));
                return;
            }
        };

        while running.load(Ordering::SeqCst) {
            thread::sleep(POLL_INTERVAL);
        }

        drop(stream);
    }

    /// Resample mono audio from the device rate to the target rate
    fn resample(
        samples: &[i16],
        source_rate: u32,
        target_rate: u32,
    ) -> Result<Vec<i16>, RecordingError> {
        if source_rate == target_rate {
            return Ok(samples.to_vec());
        }

        let samples_f32: Vec<f32> = samples.iter().map(|&s| s as f32 / 32768.0).collect();

        let ratio = target_rate as f64 / source_rate as f64;
        let output_len = (samples_f32.len() as f64 * ratio).ceil() as usize;

        let mut resampler = FftFixedIn::<f32>::new(
            source_rate as usize,
            target_rate as usize,
            1024, // Chunk size
            2,    // Sub-chunks
            1,    // Mono
        )
        .map_err(|e| RecordingError::RecordingFailed(format!("Resampler init failed: {}", e)))?;

        let mut output = Vec::with_capacity(output_len);
        let mut input_pos = 0;

        while input_pos < samples_f32.len() {
            let frames_needed = resampler.input_frames_next();
            let end_pos = (input_pos + frames_needed).min(samples_f32.len());

            // Pad the final chunk with silence
            let mut chunk = samples_f32[input_pos..end_pos].to_vec();
            chunk.resize(frames_needed, 0.0);
            let chunk = vec![chunk];

            let resampled = resampler.process(&chunk, None).map_err(|e| {
                RecordingError::RecordingFailed(format!("Resampling failed: {}", e))
            })?;

            output.extend(resampled[0].iter().map(|&s| (s * 32767.0) as i16));
            input_pos = end_pos;
        }

        output.truncate(output_len);

        Ok(output)
    }

    /// Mix interleaved multi-channel audio to mono
    fn stereo_to_mono(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels == 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|chunk| {
                let sum: i32 = chunk.iter().map(|&s| s as i32).sum();
                (sum / channels as i32) as i16
            })
            .collect()
    }
}

impl Default for CpalRecorder {
    fn default() -> Self {
        Self::new()
    }
}

fn push_mono(buffer: &SampleBuffer, data: &[i16], channels: u16) {
    let mono = CpalRecorder::stereo_to_mono(data, channels);
    if let Ok(mut buffer) = buffer.lock() {
        buffer.extend_from_slice(&mono);
    }
}

impl AudioRecorder for CpalRecorder {
    type Handle = CpalCapture;

    fn open(&self, path: &Path) -> Result<CpalCapture, RecordingError> {
        let file = File::create(path).map_err(|e| {
            RecordingError::PrepareFailed(format!("{}: {}", path.display(), e))
        })?;

        // From here on, dropping `capture` removes the unfinished file
        let mut capture = CpalCapture {
            path: path.to_path_buf(),
            file: Some(file),
            buffer: Arc::new(StdMutex::new(Vec::new())),
            running: Arc::new(AtomicBool::new(true)),
            device_sample_rate: 0,
            target_sample_rate: self.target_sample_rate,
            worker: None,
            saved: false,
        };

        let (ready_tx, ready_rx) = mpsc::channel();
        let buffer = Arc::clone(&capture.buffer);
        let running = Arc::clone(&capture.running);
        let target_rate = self.target_sample_rate;

        let worker = thread::Builder::new()
            .name("memo-capture".into())
            .spawn(move || CpalRecorder::run_capture(buffer, running, target_rate, ready_tx))
            .map_err(|e| RecordingError::StartFailed(e.to_string()))?;
        capture.worker = Some(worker);

        capture.device_sample_rate = match ready_rx.recv() {
            Ok(result) => result?,
            Err(_) => {
                return Err(RecordingError::StartFailed(
                    "Capture thread exited before starting".into(),
                ))
            }
        };

        Ok(capture)
    }
}

/// Running capture bound to one output file
pub struct CpalCapture {
    path: PathBuf,
    file: Option<File>,
    buffer: SampleBuffer,
    running: Arc<AtomicBool>,
    device_sample_rate: u32,
    target_sample_rate: u32,
    worker: Option<JoinHandle<()>>,
    saved: bool,
}

impl CpalCapture {
    /// Stop the capture thread and wait for it to release the device
    fn stop_worker(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Capture thread panicked");
            }
        }
    }
}

impl CaptureHandle for CpalCapture {
    fn path(&self) -> &Path {
        &self.path
    }

    fn finish(mut self) -> Result<PathBuf, RecordingError> {
        self.stop_worker();

        let samples = {
            let mut buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *buffer)
        };

        if samples.is_empty() {
            return Err(RecordingError::RecordingFailed(
                "No audio data captured".to_string(),
            ));
        }

        let resampled =
            CpalRecorder::resample(&samples, self.device_sample_rate, self.target_sample_rate)?;
        let encoded = encode_to_flac(&resampled, self.target_sample_rate)
            .map_err(|e| RecordingError::RecordingFailed(e.to_string()))?;

        let mut file = self
            .file
            .take()
            .ok_or_else(|| RecordingError::WriteFailed("Output file already closed".into()))?;
        file.write_all(&encoded)
            .and_then(|_| file.sync_all())
            .map_err(|e| RecordingError::WriteFailed(e.to_string()))?;

        debug!(
            path = %self.path.display(),
            bytes = encoded.len(),
            samples = resampled.len(),
            "Recording written"
        );

        self.saved = true;
        Ok(self.path.clone())
    }
}

impl Drop for CpalCapture {
    fn drop(&mut self) {
        self.stop_worker();
        if !self.saved {
            self.file.take();
            if let Err(e) = fs::remove_file(&self.path) {
                debug!(path = %self.path.display(), error = %e, "Could not remove unfinished recording");
            }
        }
    }
}
