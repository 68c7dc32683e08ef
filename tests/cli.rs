use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary home directory
fn temp_home() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get config file path in the temp home
fn config_file_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".warroom").join("config.json")
}

const BINARY_NAME: &str = "warroom";

fn warroom(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.env("HOME", home.path()).env("NONINTERACTIVE", "1");
    cmd
}

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(contains("Terminal war room"))
        .stdout(contains("modules"));
}

#[test]
/// Setting a field writes ~/.warroom/config.json with the normalized value.
fn config_set_writes_settings_file() {
    let tmp = temp_home();
    let config_path = config_file_path(&tmp);
    assert!(!config_path.exists());

    warroom(&tmp)
        .args(["config", "set", "relay-url", " relay.example.com/ "])
        .assert()
        .success()
        .stdout(contains("https://relay.example.com"));

    let stored = fs::read_to_string(&config_path).unwrap();
    assert!(stored.contains("\"RELAY_URL\": \"https://relay.example.com\""));
    // Empty fields are not written.
    assert!(!stored.contains("BACKEND_API_KEY"));
}

#[test]
/// Keys are masked when the settings are shown.
fn config_show_masks_keys() {
    let tmp = temp_home();
    warroom(&tmp)
        .args(["config", "set", "relay-key", "hunter2-secret"])
        .assert()
        .success();

    warroom(&tmp)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(contains("cret"))
        .stdout(contains("hunter2-secret").not());
}

#[test]
/// Invalid URLs are rejected and nothing is written.
fn config_set_rejects_invalid_url() {
    let tmp = temp_home();
    warroom(&tmp)
        .args(["config", "set", "gateway-url", "not a host"])
        .assert()
        .failure()
        .stderr(contains("[ERROR]"));
    assert!(!config_file_path(&tmp).exists());
}

#[test]
/// Clearing removes the file, and clearing again still succeeds.
fn config_clear_is_idempotent() {
    let tmp = temp_home();
    let config_path = config_file_path(&tmp);
    fs::create_dir_all(config_path.parent().unwrap()).unwrap();
    fs::write(&config_path, r#"{"GUILD_ID":"1"}"#).unwrap();

    warroom(&tmp)
        .args(["config", "clear"])
        .assert()
        .success()
        .stdout(contains("Settings cleared"));
    assert!(!config_path.exists());

    warroom(&tmp).args(["config", "clear"]).assert().success();
}

#[test]
/// Command options that are not a JSON object are rejected before any request.
fn exec_rejects_non_object_options() {
    let tmp = temp_home();
    for options in ["[]", "5"] {
        warroom(&tmp)
            .args(["exec", "ban", "--options", options])
            .assert()
            .failure()
            .stderr(contains("Options must be a JSON object"));
    }
}

#[test]
/// Without a snapshot key, taking a snapshot fails locally.
fn snapshot_requires_key() {
    let tmp = temp_home();
    warroom(&tmp)
        .args(["snapshot"])
        .assert()
        .failure()
        .stderr(contains("snapshot key"));
}
