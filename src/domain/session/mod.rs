//! Recording/playback session state

mod state;

pub use state::{InvalidStateTransition, SessionState, StatusLine};
