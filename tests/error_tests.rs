//! Error scenario integration tests

use std::process::Command;

fn voice_memo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_voice-memo"))
}

fn with_config_home(dir: &tempfile::TempDir) -> Command {
    let mut cmd = voice_memo_bin();
    cmd.env("XDG_CONFIG_HOME", dir.path());
    cmd
}

#[test]
fn config_get_unknown_key() {
    let config_home = tempfile::tempdir().unwrap();
    let output = with_config_home(&config_home)
        .args(["config", "get", "unknown_key"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_unknown_key() {
    let config_home = tempfile::tempdir().unwrap();
    let output = with_config_home(&config_home)
        .args(["config", "set", "unknown_key", "value"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_bool() {
    let config_home = tempfile::tempdir().unwrap();
    let output = with_config_home(&config_home)
        .args(["config", "set", "notify", "maybe"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("true") && stderr.contains("false"),
        "Expected error about boolean value, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_stem() {
    let config_home = tempfile::tempdir().unwrap();
    let output = with_config_home(&config_home)
        .args(["config", "set", "file_stem", "../escape"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid file stem"),
        "Expected error about file stem, got: {}",
        stderr
    );
}

#[test]
fn invalid_stem_in_config_file_is_usage_error() {
    let config_home = tempfile::tempdir().unwrap();
    let recordings = tempfile::tempdir().unwrap();
    let config_dir = config_home.path().join("voice-memo");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "file_stem = \"take2\"\n").unwrap();

    let output = with_config_home(&config_home)
        .arg("--dir")
        .arg(recordings.path())
        .arg("list")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid file stem"));
}

#[test]
fn unknown_subcommand() {
    let output = voice_memo_bin()
        .arg("dance")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}
