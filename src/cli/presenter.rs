//! CLI presenter for output formatting

use std::io::{self, Write};

use colored::*;

use crate::domain::session::{SessionState, StatusLine};

/// Session commands shown by `help`, with their short forms
const HELP_ENTRIES: &[(&str, &str)] = &[
    ("record, r", "Start recording a new memo"),
    ("stop, s", "Stop recording and save the memo"),
    ("play, p", "Play the last saved memo"),
    ("stop-play, x", "Stop playback"),
    ("status", "Show the current state"),
    ("help, h", "Show this help"),
    ("quit, q", "Stop any activity and exit"),
];

/// Presenter for CLI output formatting
pub struct Presenter;

impl Presenter {
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print the input prompt without a newline
    pub fn prompt(&self) {
        print!("{} ", ">".dimmed());
        let _ = io::stdout().flush();
    }

    /// Print the status line for the current state
    pub fn status(&self, state: SessionState, line: StatusLine) {
        println!("{}", self.format_status(state, line));
    }

    /// Format a status line. The marker color follows the state.
    pub fn format_status(&self, state: SessionState, line: StatusLine) -> String {
        let marker = match state {
            SessionState::Idle => "●".dimmed(),
            SessionState::Recording => "●".red(),
            SessionState::Playing => "▶".cyan(),
        };
        format!("{} {}", marker, line)
    }

    /// Print the session command list
    pub fn help(&self) {
        println!("{}", "Commands:".bold());
        for (names, description) in HELP_ENTRIES {
            println!("  {:<14} {}", names.cyan(), description);
        }
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_status_shows_line_text() {
        colored::control::set_override(false);
        let presenter = Presenter::new();
        assert_eq!(
            presenter.format_status(SessionState::Idle, StatusLine::Ready),
            "● Ready"
        );
        assert_eq!(
            presenter.format_status(SessionState::Playing, StatusLine::Listening),
            "▶ Listening recording"
        );
    }

    #[test]
    fn help_lists_every_command() {
        let names: Vec<&str> = HELP_ENTRIES.iter().map(|(n, _)| *n).collect();
        for expected in ["record, r", "stop, s", "play, p", "stop-play, x", "quit, q"] {
            assert!(names.contains(&expected));
        }
    }
}
