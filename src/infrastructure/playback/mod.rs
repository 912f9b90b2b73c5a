//! Playback infrastructure module
//!
//! Plays saved recordings on the default output device with rodio.

mod rodio_player;

pub use rodio_player::{RodioPlayback, RodioPlayer};
