//! Application layer - Use cases and port interfaces
//!
//! Contains the recording/playback lifecycle controller and the trait
//! definitions for the systems it drives.

pub mod controller;
pub mod ports;

// Re-export the controller
pub use controller::{
    Action, ControllerConfig, MemoController, MemoError, PlaybackFinished, PlaybackId,
};
