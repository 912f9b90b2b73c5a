//! Chimes synthesized with rodio
//!
//! Each cue is a short melody of sine notes. The melodies are plain data so
//! their shape can be checked without an output device.

use std::time::Duration;

use async_trait::async_trait;
use rodio::source::{SineWave, Source, Zero};
use rodio::{OutputStream, Sink};

use crate::application::ports::{AudioCue, AudioCueError, AudioCueType};

/// Sample rate of the silent gaps between notes
const GAP_SAMPLE_RATE: u32 = 44_100;

/// One note of a cue melody
#[derive(Debug, Clone, Copy, PartialEq)]
struct Note {
    hz: f32,
    ms: u64,
    /// Silence after the note
    rest_ms: u64,
    level: f32,
}

const fn note(hz: f32, ms: u64, rest_ms: u64, level: f32) -> Note {
    Note {
        hz,
        ms,
        rest_ms,
        level,
    }
}

// A4 up to E5
const START: &[Note] = &[note(440.0, 70, 0, 0.25), note(659.3, 140, 0, 0.25)];
// E5 down to A4
const STOP: &[Note] = &[note(659.3, 70, 0, 0.25), note(440.0, 140, 0, 0.25)];
// Low A3, twice
const DENIED: &[Note] = &[note(220.0, 90, 50, 0.3), note(220.0, 90, 0, 0.3)];

fn melody(cue: AudioCueType) -> &'static [Note] {
    match cue {
        AudioCueType::RecordingStart => START,
        AudioCueType::RecordingStop => STOP,
        AudioCueType::Denied => DENIED,
    }
}

/// Plays cues on the default output device
#[derive(Default)]
pub struct RodioAudioCue;

impl RodioAudioCue {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AudioCue for RodioAudioCue {
    async fn play(&self, cue_type: AudioCueType) -> Result<(), AudioCueError> {
        let notes = melody(cue_type);
        tokio::task::spawn_blocking(move || play_notes(notes))
            .await
            .map_err(|e| AudioCueError::PlaybackFailed(format!("Cue task failed: {}", e)))?
    }
}

/// Sine source for one note, faded in to avoid a click
fn tone(n: &Note) -> impl Source<Item = f32> + Send {
    let length = Duration::from_millis(n.ms);
    SineWave::new(n.hz)
        .take_duration(length)
        .fade_in(length / 4)
        .amplify(n.level)
}

/// Blocks until the last note has played
fn play_notes(notes: &[Note]) -> Result<(), AudioCueError> {
    let (_stream, output) = OutputStream::try_default()
        .map_err(|e| AudioCueError::DeviceNotAvailable(e.to_string()))?;
    let sink = Sink::try_new(&output).map_err(|e| AudioCueError::PlaybackFailed(e.to_string()))?;

    for n in notes {
        sink.append(tone(n));
        if n.rest_ms > 0 {
            sink.append(
                Zero::<f32>::new(1, GAP_SAMPLE_RATE).take_duration(Duration::from_millis(n.rest_ms)),
            );
        }
    }
    sink.sleep_until_end();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitches(cue: AudioCueType) -> Vec<f32> {
        melody(cue).iter().map(|n| n.hz).collect()
    }

    #[test]
    fn start_rises_and_stop_falls() {
        let start = pitches(AudioCueType::RecordingStart);
        let stop = pitches(AudioCueType::RecordingStop);

        assert!(start.windows(2).all(|w| w[0] < w[1]));
        assert!(stop.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(start.iter().rev().copied().collect::<Vec<_>>(), stop);
    }

    #[test]
    fn denied_repeats_a_low_note_with_a_rest() {
        let notes = melody(AudioCueType::Denied);

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].hz, notes[1].hz);
        assert!(notes[0].hz < melody(AudioCueType::RecordingStart)[0].hz);
        assert!(notes[0].rest_ms > 0);
    }

    #[test]
    fn every_cue_is_short_and_quiet() {
        for cue in [
            AudioCueType::RecordingStart,
            AudioCueType::RecordingStop,
            AudioCueType::Denied,
        ] {
            let total: u64 = melody(cue).iter().map(|n| n.ms + n.rest_ms).sum();
            assert!(total <= 300, "{:?} lasts {}ms", cue, total);
            assert!(melody(cue).iter().all(|n| n.level > 0.0 && n.level <= 0.5));
        }
    }

    #[tokio::test]
    #[ignore = "Requires audio hardware"]
    async fn plays_on_default_output() {
        let cue = RodioAudioCue::new();
        for cue_type in [
            AudioCueType::RecordingStart,
            AudioCueType::RecordingStop,
            AudioCueType::Denied,
        ] {
            assert!(cue.play(cue_type).await.is_ok());
        }
    }
}
