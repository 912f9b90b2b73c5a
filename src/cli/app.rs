//! Interactive session runner

use std::io::IsTerminal;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::process::ExitCode;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info, warn};

use crate::application::ports::{
    AudioCue, AudioPlayer, AudioRecorder, ConfigStore, Notifier, Permissions,
};
use crate::application::{ControllerConfig, MemoController, PlaybackFinished};
use crate::domain::config::AppConfig;
use crate::domain::recording::RecordingName;
use crate::infrastructure::{
    create_audio_cue, create_notifier, CpalRecorder, DesktopPermissions, RodioPlayer,
};

use super::commands::SessionCommand;
use super::presenter::Presenter;
use super::signals::{SessionSignal, SessionSignalHandler};

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Resolved options for an interactive session
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub output_dir: PathBuf,
    pub recording_name: RecordingName,
    pub notify: bool,
    pub audio_cue: bool,
}

/// Run the interactive record/playback session until quit or end of input
pub async fn run_session(options: SessionOptions) -> ExitCode {
    let presenter = Presenter::new();

    let mut signals = match SessionSignalHandler::new() {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let (completions_tx, mut completions) = mpsc::unbounded_channel();
    let mut controller = MemoController::new(
        CpalRecorder::new(),
        RodioPlayer::new(),
        create_notifier(options.notify),
        create_audio_cue(options.audio_cue),
        DesktopPermissions::new(&options.output_dir),
        ControllerConfig {
            output_dir: options.output_dir.clone(),
            recording_name: options.recording_name.clone(),
        },
        completions_tx,
    );

    info!(dir = %options.output_dir.display(), "Session started");
    presenter.info(&format!(
        "Recordings are saved to {}. Type 'help' for commands.",
        options.output_dir.display()
    ));
    presenter.status(controller.state(), controller.status());

    let interactive = std::io::stdin().is_terminal();
    session_loop(
        &mut controller,
        &mut signals,
        &mut completions,
        &presenter,
        interactive,
    )
    .await;

    controller.shutdown().await;
    info!("Session ended");
    ExitCode::from(EXIT_SUCCESS)
}

async fn session_loop<R, P, N, C, G>(
    controller: &mut MemoController<R, P, N, C, G>,
    signals: &mut SessionSignalHandler,
    completions: &mut UnboundedReceiver<PlaybackFinished>,
    presenter: &Presenter,
    interactive: bool,
) where
    R: AudioRecorder,
    P: AudioPlayer,
    N: Notifier,
    C: AudioCue,
    G: Permissions,
{
    loop {
        if interactive {
            presenter.prompt();
        }

        tokio::select! {
            biased;

            Some(done) = completions.recv() => {
                let before = controller.status();
                controller.on_playback_finished(done);
                if controller.status() != before {
                    presenter.status(controller.state(), controller.status());
                }
            }
            signal = signals.recv() => match signal {
                Some(SessionSignal::Input(line)) => {
                    if handle_line(controller, presenter, &line).await.is_break() {
                        return;
                    }
                }
                Some(SessionSignal::Shutdown) | None => {
                    debug!("Shutdown requested");
                    return;
                }
            },
        }
    }
}

/// Run one input line. Breaks on quit.
async fn handle_line<R, P, N, C, G>(
    controller: &mut MemoController<R, P, N, C, G>,
    presenter: &Presenter,
    line: &str,
) -> ControlFlow<()>
where
    R: AudioRecorder,
    P: AudioPlayer,
    N: Notifier,
    C: AudioCue,
    G: Permissions,
{
    if line.trim().is_empty() {
        return ControlFlow::Continue(());
    }

    let command = match line.parse::<SessionCommand>() {
        Ok(command) => command,
        Err(e) => {
            presenter.warn(&e.to_string());
            return ControlFlow::Continue(());
        }
    };

    if let Some(action) = command.action() {
        let before = (controller.state(), controller.status());
        // Failures have already been shown as notices
        if let Err(e) = controller.perform(action).await {
            debug!(?action, error = %e, "Action did not complete");
        }
        if (controller.state(), controller.status()) != before {
            presenter.status(controller.state(), controller.status());
        }
        return ControlFlow::Continue(());
    }

    match command {
        SessionCommand::Quit => return ControlFlow::Break(()),
        SessionCommand::Help => presenter.help(),
        SessionCommand::Status => {
            presenter.status(controller.state(), controller.status());
            if let Some(path) = controller.last_recorded() {
                presenter.key_value("last", &path.display().to_string());
            }
        }
        _ => {}
    }
    ControlFlow::Continue(())
}

/// Load and merge configuration from file and CLI
pub async fn load_merged_config<S: ConfigStore>(store: &S, cli_config: AppConfig) -> AppConfig {
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %store.path().display(), error = %e, "Ignoring unreadable config file");
            AppConfig::empty()
        }
    };

    // Merge: defaults < file < cli
    AppConfig::defaults().merge(file_config).merge(cli_config)
}
