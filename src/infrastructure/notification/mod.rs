//! Notification infrastructure module
//!
//! Notices always go to the terminal. Desktop notifications through
//! notify-rust are added on request.

mod notify_rust;
mod terminal;

pub use notify_rust::NotifyRustNotifier;
pub use terminal::TerminalNotifier;

use async_trait::async_trait;

use crate::application::ports::{NotificationError, NotificationIcon, Notifier};

/// Sends each notice to every notifier in order.
/// The first failure is returned after all notifiers ran.
pub struct NotifierChain {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierChain {
    pub fn new(notifiers: Vec<Box<dyn Notifier>>) -> Self {
        Self { notifiers }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.notifiers.len()
    }
}

#[async_trait]
impl Notifier for NotifierChain {
    async fn notify(
        &self,
        title: &str,
        message: &str,
        icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        let mut first_error = None;
        for notifier in &self.notifiers {
            if let Err(e) = notifier.notify(title, message, icon).await {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// Create the notifier for the session: terminal, plus desktop if enabled
pub fn create_notifier(desktop: bool) -> NotifierChain {
    let mut notifiers: Vec<Box<dyn Notifier>> = vec![Box::new(TerminalNotifier::new())];
    if desktop {
        notifiers.push(Box::new(NotifyRustNotifier::new()));
    }
    NotifierChain::new(notifiers)
}
