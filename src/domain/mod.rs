//! Domain layer - Core business logic
//!
//! Contains the session state machine types, recording file naming,
//! the configuration value object and domain errors.

pub mod config;
pub mod error;
pub mod recording;
pub mod session;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use recording::{RecordingName, RECORDING_EXTENSION};
pub use session::{InvalidStateTransition, SessionState, StatusLine};
