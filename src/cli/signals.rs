//! Input and shutdown signals for the interactive session

use std::io::BufRead;
use std::thread;

use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tracing::debug;

/// Session signals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionSignal {
    /// A line read from stdin
    Input(String),
    /// Stop the session (SIGINT/SIGTERM or end of input)
    Shutdown,
}

/// Session signal handler
///
/// Merges stdin lines and OS shutdown signals into one channel. End of
/// input counts as a shutdown.
pub struct SessionSignalHandler {
    receiver: mpsc::Receiver<SessionSignal>,
}

impl SessionSignalHandler {
    /// Start listening on stdin and for SIGINT/SIGTERM
    pub fn new() -> Result<Self, std::io::Error> {
        let (tx, rx) = mpsc::channel(16);

        let tx_int = tx.clone();
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            sigint.recv().await;
            debug!("Received SIGINT");
            let _ = tx_int.send(SessionSignal::Shutdown).await;
        });

        let tx_term = tx.clone();
        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            sigterm.recv().await;
            debug!("Received SIGTERM");
            let _ = tx_term.send(SessionSignal::Shutdown).await;
        });

        // Stdin reads block and cannot be cancelled; keep them off the runtime
        thread::Builder::new()
            .name("memo-stdin".into())
            .spawn(move || forward_lines(std::io::stdin().lock(), tx))?;

        Ok(Self { receiver: rx })
    }

    /// Build a handler over an existing channel
    pub fn from_receiver(receiver: mpsc::Receiver<SessionSignal>) -> Self {
        Self { receiver }
    }

    /// Wait for the next signal
    pub async fn recv(&mut self) -> Option<SessionSignal> {
        self.receiver.recv().await
    }
}

/// Send each line as input, then a shutdown at end of input
fn forward_lines<R: BufRead>(reader: R, tx: mpsc::Sender<SessionSignal>) {
    for line in reader.lines() {
        match line {
            Ok(line) => {
                if tx.blocking_send(SessionSignal::Input(line)).is_err() {
                    return;
                }
            }
            Err(e) => {
                debug!("stdin read failed: {}", e);
                break;
            }
        }
    }
    let _ = tx.blocking_send(SessionSignal::Shutdown);
}
