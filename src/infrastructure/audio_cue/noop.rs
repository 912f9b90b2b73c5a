//! No-op audio cue adapter, used when audio cues are disabled

use async_trait::async_trait;

use crate::application::ports::{AudioCue, AudioCueError, AudioCueType};

pub struct NoOpAudioCue;

impl NoOpAudioCue {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpAudioCue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioCue for NoOpAudioCue {
    async fn play(&self, _cue_type: AudioCueType) -> Result<(), AudioCueError> {
        Ok(())
    }
}
