//! Voice Memo - record and replay short voice notes
//!
//! This crate records narrowband voice memos from the default microphone,
//! saves them as FLAC files and plays the most recent one back.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Session states, recording names, configuration and errors
//! - **Application**: The record/playback lifecycle controller and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, rodio, notify-rust, filesystem)
//! - **CLI**: Command-line interface, interactive session and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
