//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Directory name used under the platform data and config directories
pub const APP_DIR_NAME: &str = "voice-memo";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub output_dir: Option<String>,
    pub file_stem: Option<String>,
    pub notify: Option<bool>,
    pub audio_cue: Option<bool>,
}

impl AppConfig {
    /// Create config with default values.
    /// `output_dir` stays unset so the platform data directory is used.
    pub fn defaults() -> Self {
        Self {
            output_dir: None,
            file_stem: Some("Record".to_string()),
            notify: Some(false),
            audio_cue: Some(false),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            output_dir: other.output_dir.or(self.output_dir),
            file_stem: other.file_stem.or(self.file_stem),
            notify: other.notify.or(self.notify),
            audio_cue: other.audio_cue.or(self.audio_cue),
        }
    }

    /// Recording directory, or `<data dir>/voice-memo/recordings` if not set
    pub fn output_dir_or_default(&self) -> PathBuf {
        match self.output_dir.as_deref() {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => Self::default_output_dir(),
        }
    }

    /// Platform default recording directory
    pub fn default_output_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
            .join("recordings")
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    /// Get audio cue setting, or false if not set
    pub fn audio_cue_or_default(&self) -> bool {
        self.audio_cue.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert!(config.output_dir.is_none());
        assert_eq!(config.file_stem, Some("Record".to_string()));
        assert_eq!(config.notify, Some(false));
        assert_eq!(config.audio_cue, Some(false));
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.output_dir.is_none());
        assert!(config.file_stem.is_none());
        assert!(config.notify.is_none());
        assert!(config.audio_cue.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            output_dir: Some("/base".to_string()),
            file_stem: Some("Record".to_string()),
            notify: Some(true),
            ..Default::default()
        };

        let other = AppConfig {
            output_dir: Some("/other".to_string()),
            file_stem: None, // Should not override
            notify: Some(false),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.output_dir, Some("/other".to_string()));
        assert_eq!(merged.file_stem, Some("Record".to_string()));
        assert_eq!(merged.notify, Some(false));
    }

    #[test]
    fn output_dir_uses_configured_path() {
        let config = AppConfig {
            output_dir: Some("/tmp/memos".to_string()),
            ..Default::default()
        };
        assert_eq!(config.output_dir_or_default(), PathBuf::from("/tmp/memos"));
    }

    #[test]
    fn output_dir_defaults_under_app_dir() {
        let path = AppConfig::empty().output_dir_or_default();
        assert!(path.ends_with("voice-memo/recordings"));
    }

    #[test]
    fn boolean_defaults() {
        let config = AppConfig::empty();
        assert!(!config.notify_or_default());
        assert!(!config.audio_cue_or_default());
    }
}
