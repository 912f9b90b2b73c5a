//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

/// Voice Memo - record and replay short voice notes
#[derive(Parser, Debug)]
#[command(name = "voice-memo")]
#[command(version)]
#[command(about = "Record voice memos from the microphone and play them back")]
#[command(long_about = None)]
pub struct Cli {
    /// Directory recordings are saved to
    #[arg(long, value_name = "DIR")]
    pub dir: Option<String>,

    /// Show desktop notifications
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Play a short chime when recording starts and stops
    #[arg(long)]
    pub audio_cue: bool,

    /// Subcommand; without one an interactive session starts
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List saved recordings
    List,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["output_dir", "file_stem", "notify", "audio_cue"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["voice-memo"]);
        assert!(cli.dir.is_none());
        assert!(!cli.notify);
        assert!(!cli.audio_cue);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from(["voice-memo", "-n", "--audio-cue", "--dir", "/tmp/memos"]);
        assert!(cli.notify);
        assert!(cli.audio_cue);
        assert_eq!(cli.dir, Some("/tmp/memos".to_string()));
    }

    #[test]
    fn cli_parses_list() {
        let cli = Cli::parse_from(["voice-memo", "list"]);
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::parse_from(["voice-memo", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["voice-memo", "config", "set", "file_stem", "Memo"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "file_stem");
            assert_eq!(value, "Memo");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("output_dir"));
        assert!(is_valid_config_key("file_stem"));
        assert!(is_valid_config_key("audio_cue"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
