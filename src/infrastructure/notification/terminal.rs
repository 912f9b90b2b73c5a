//! Terminal notice adapter

use async_trait::async_trait;
use colored::Colorize;

use crate::application::ports::{NotificationError, NotificationIcon, Notifier};

/// Prints notices to stderr
pub struct TerminalNotifier;

impl TerminalNotifier {
    pub fn new() -> Self {
        Self
    }

    /// Format a notice line. The title is omitted; every notice is ours.
    fn format(message: &str, icon: NotificationIcon) -> String {
        let marker = match icon {
            NotificationIcon::Info => "ℹ".cyan(),
            NotificationIcon::Success => "✓".green(),
            NotificationIcon::Warning => "⚠".yellow(),
            NotificationIcon::Error => "✗".red(),
        };
        format!("{} {}", marker, message)
    }
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for TerminalNotifier {
    async fn notify(
        &self,
        _title: &str,
        message: &str,
        icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        eprintln!("{}", Self::format(message, icon));
        Ok(())
    }
}
