//! Desktop notices through notify-rust

use async_trait::async_trait;
use notify_rust::{Notification, Timeout};

use crate::application::ports::{NotificationError, NotificationIcon, Notifier};

const APP_NAME: &str = "Voice Memo";

/// How long a notice stays on screen
const DISPLAY_TIME: Timeout = Timeout::Milliseconds(3000);

/// Mirrors notices to the desktop notification area
#[derive(Default)]
pub struct NotifyRustNotifier;

impl NotifyRustNotifier {
    pub fn new() -> Self {
        Self
    }
}

fn notification(title: &str, message: &str, icon: NotificationIcon) -> Notification {
    let mut notice = Notification::new();
    notice
        .appname(APP_NAME)
        .summary(title)
        .body(message)
        .icon(icon.icon_name())
        .timeout(DISPLAY_TIME);
    notice
}

#[async_trait]
impl Notifier for NotifyRustNotifier {
    async fn notify(
        &self,
        title: &str,
        message: &str,
        icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        let notice = notification(title, message, icon);

        // show() waits on the notification server
        tokio::task::spawn_blocking(move || match notice.show() {
            Ok(_) => Ok(()),
            Err(e) => Err(NotificationError::SendFailed(e.to_string())),
        })
        .await
        .map_err(|e| NotificationError::SendFailed(format!("Notice task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_carries_title_message_and_icon() {
        let notice = notification("Voice Memo", "File saved: Record.flac", NotificationIcon::Success);

        assert_eq!(notice.appname, "Voice Memo");
        assert_eq!(notice.summary, "Voice Memo");
        assert_eq!(notice.body, "File saved: Record.flac");
        assert_eq!(notice.icon, "dialog-ok");
    }

    #[test]
    fn error_notices_use_the_error_icon() {
        let notice = notification("Voice Memo", "Permission Denied", NotificationIcon::Error);
        assert_eq!(notice.icon, "dialog-error");
    }
}
