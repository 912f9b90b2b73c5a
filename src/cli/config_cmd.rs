//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::recording::RecordingName;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_known_key(key)?;

    let config = store.load().await?;
    let value = read_value(&config, key);
    presenter.output(value.as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = read_value(&config, key);
        presenter.key_value(key, value.as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_known_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

/// Validate `value` for `key` and store it in `config`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };
    let boolean = || {
        parse_bool(value).map_err(|_| invalid("Value must be 'true' or 'false'".to_string()))
    };

    match key {
        "output_dir" => {
            if value.trim().is_empty() {
                return Err(invalid("Directory must not be empty".to_string()));
            }
            config.output_dir = Some(value.to_string());
        }
        "file_stem" => {
            let name = value
                .parse::<RecordingName>()
                .map_err(|e| invalid(e.to_string()))?;
            config.file_stem = Some(name.stem().to_string());
        }
        "notify" => config.notify = Some(boolean()?),
        "audio_cue" => config.audio_cue = Some(boolean()?),
        _ => return Err(invalid("Unknown key".to_string())),
    }
    Ok(())
}

fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "output_dir" => config.output_dir.clone(),
        "file_stem" => config.file_stem.clone(),
        "notify" => config.notify.map(|b| b.to_string()),
        "audio_cue" => config.audio_cue.map(|b| b.to_string()),
        _ => None,
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::XdgConfigStore;

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("false"), Ok(false));
        assert_eq!(parse_bool("yes"), Ok(true));
        assert_eq!(parse_bool("no"), Ok(false));
        assert_eq!(parse_bool("1"), Ok(true));
        assert_eq!(parse_bool("0"), Ok(false));
        assert!(parse_bool("invalid").is_err());
    }

    #[test]
    fn apply_valid_values() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "file_stem", " Memo ").unwrap();
        apply_value(&mut config, "notify", "yes").unwrap();
        apply_value(&mut config, "output_dir", "/tmp/memos").unwrap();

        assert_eq!(config.file_stem, Some("Memo".to_string()));
        assert_eq!(config.notify, Some(true));
        assert_eq!(config.output_dir, Some("/tmp/memos".to_string()));
        assert!(config.audio_cue.is_none());
    }

    #[test]
    fn apply_rejects_bad_stem() {
        let mut config = AppConfig::empty();
        let err = apply_value(&mut config, "file_stem", "take2").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { ref key, .. } if key == "file_stem"));
        assert!(config.file_stem.is_none());
    }

    #[test]
    fn apply_rejects_bad_bool() {
        let mut config = AppConfig::empty();
        assert!(apply_value(&mut config, "audio_cue", "loud").is_err());
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(ensure_known_key("api_key").is_err());
        assert!(ensure_known_key("file_stem").is_ok());
    }

    #[tokio::test]
    async fn set_persists_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        let presenter = Presenter::new();

        let action = ConfigAction::Set {
            key: "file_stem".to_string(),
            value: "Memo".to_string(),
        };
        handle_config_command(action, &store, &presenter)
            .await
            .unwrap();

        let config = store.load().await.unwrap();
        assert_eq!(config.file_stem, Some("Memo".to_string()));
    }
}
