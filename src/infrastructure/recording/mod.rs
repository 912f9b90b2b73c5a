//! Recording infrastructure module
//!
//! Captures the default microphone with cpal and stores narrowband
//! mono FLAC files.

mod cpal_recorder;
mod flac_encoder;

pub use cpal_recorder::{CpalCapture, CpalRecorder};
pub use flac_encoder::{encode_to_flac, EncodingError, NARROWBAND_SAMPLE_RATE};
