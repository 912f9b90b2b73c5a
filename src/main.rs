//! Voice Memo CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use voice_memo::application::ports::ConfigStore;
use voice_memo::cli::{
    app::{load_merged_config, run_session, SessionOptions, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    list_cmd::handle_list_command,
    presenter::Presenter,
};
use voice_memo::domain::config::AppConfig;
use voice_memo::domain::recording::RecordingName;
use voice_memo::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let presenter = Presenter::new();
    let store = XdgConfigStore::new();

    let list = match cli.command {
        Some(Commands::Config { action }) => {
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::List) => true,
        None => false,
    };

    // Build CLI config from args
    let cli_config = AppConfig {
        output_dir: cli.dir,
        file_stem: None,
        notify: cli.notify.then_some(true),
        audio_cue: cli.audio_cue.then_some(true),
    };

    let config = load_merged_config(&store, cli_config).await;

    let recording_name = match config.file_stem.as_deref() {
        Some(stem) => match stem.parse::<RecordingName>() {
            Ok(name) => name,
            Err(e) => {
                presenter.error(&format!("{} (set in {})", e, store.path().display()));
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        },
        None => RecordingName::default(),
    };
    let output_dir = config.output_dir_or_default();

    if list {
        if let Err(e) = handle_list_command(&output_dir, &recording_name, &presenter).await {
            presenter.error(&format!("Failed to list recordings: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    let options = SessionOptions {
        output_dir,
        recording_name,
        notify: config.notify_or_default(),
        audio_cue: config.audio_cue_or_default(),
    };

    run_session(options).await
}
