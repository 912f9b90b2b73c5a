//! Interactive session commands

use std::fmt;
use std::str::FromStr;

use crate::application::Action;

/// A line typed into the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Record,
    Stop,
    Play,
    StopPlay,
    Status,
    Help,
    Quit,
}

impl SessionCommand {
    /// Controller action this command triggers, if any
    pub const fn action(&self) -> Option<Action> {
        match self {
            Self::Record => Some(Action::StartRecording),
            Self::Stop => Some(Action::StopRecording),
            Self::Play => Some(Action::StartPlaying),
            Self::StopPlay => Some(Action::StopPlaying),
            Self::Status | Self::Help | Self::Quit => None,
        }
    }
}

/// Error for input that names no command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown command: '{}'. Type 'help' for commands.", self.0)
    }
}

impl std::error::Error for UnknownCommand {}

impl FromStr for SessionCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        match input.to_lowercase().as_str() {
            "record" | "r" => Ok(Self::Record),
            "stop" | "s" => Ok(Self::Stop),
            "play" | "p" => Ok(Self::Play),
            "stop-play" | "x" => Ok(Self::StopPlay),
            "status" => Ok(Self::Status),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            _ => Err(UnknownCommand(input.to_string())),
        }
    }
}
