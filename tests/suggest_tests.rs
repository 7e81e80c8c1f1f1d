//! Suggest command tests
//!
//! Everything here runs without an API key, so the interesting behavior is
//! input validation and the error surface: which failure wins, what exit
//! code it maps to, and what the hint tells the user to do.

use assert_cmd::Command;
use predicates::prelude::*;

mod common;
use common::fixtures;

fn get_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_smart-kitchen"))
}

#[test]
fn test_suggest_without_input_fails_with_usage_error() {
    let home = fixtures::app_home().expect("Failed to create app home");

    let mut cmd = get_bin();
    cmd.env("SMART_KITCHEN_HOME", home.path())
        .env_remove("GEMINI_API_KEY")
        .arg("suggest")
        .assert()
        .failure()
        .code(64)
        .stderr(predicate::str::contains("No input supplied"))
        .stderr(predicate::str::contains(
            "Provide one of --text, --image, or --audio",
        ));
}

#[test]
fn test_suggest_with_blank_text_counts_as_no_input() {
    let home = fixtures::app_home().expect("Failed to create app home");

    let mut cmd = get_bin();
    cmd.env("SMART_KITCHEN_HOME", home.path())
        .env_remove("GEMINI_API_KEY")
        .arg("suggest")
        .arg("--text")
        .arg("   ")
        .assert()
        .failure()
        .code(64)
        .stderr(predicate::str::contains("No input supplied"));
}

#[test]
fn test_suggest_with_missing_image_fails_with_file_error() {
    let home = fixtures::app_home().expect("Failed to create app home");
    let missing = home.path().join("no-such-photo.jpg");

    let mut cmd = get_bin();
    cmd.env("SMART_KITCHEN_HOME", home.path())
        .env_remove("GEMINI_API_KEY")
        .arg("suggest")
        .arg("--image")
        .arg(&missing)
        .assert()
        .failure()
        .code(66)
        .stderr(predicate::str::contains("File not found"))
        .stderr(predicate::str::contains("no-such-photo.jpg"));
}

#[test]
fn test_suggest_with_text_but_no_api_key_fails_with_config_error() {
    let home = fixtures::app_home().expect("Failed to create app home");

    let mut cmd = get_bin();
    cmd.env("SMART_KITCHEN_HOME", home.path())
        .env_remove("GEMINI_API_KEY")
        .arg("suggest")
        .arg("--text")
        .arg("tomatoes, basil, mozzarella")
        .assert()
        .failure()
        .code(78)
        .stderr(predicate::str::contains("API key not set: GEMINI_API_KEY"))
        .stderr(predicate::str::contains(
            "Set the GEMINI_API_KEY environment variable",
        ));
}

#[test]
fn test_suggest_reads_image_before_checking_the_api_key() {
    let home = fixtures::app_home().expect("Failed to create app home");
    let image = fixtures::sample_image(&home).expect("Failed to create image");

    let mut cmd = get_bin();
    cmd.env("SMART_KITCHEN_HOME", home.path())
        .env_remove("GEMINI_API_KEY")
        .arg("suggest")
        .arg("--image")
        .arg(&image)
        .assert()
        .failure()
        .code(78)
        .stderr(predicate::str::contains("API key not set"));
}

#[test]
fn test_suggest_with_invalid_config_fails_with_config_error() {
    let home = fixtures::app_home().expect("Failed to create app home");
    fixtures::write_config(&home, "this is [ not valid toml").expect("Failed to write config");

    let mut cmd = get_bin();
    cmd.env("SMART_KITCHEN_HOME", home.path())
        .env_remove("GEMINI_API_KEY")
        .arg("suggest")
        .arg("--text")
        .arg("tomatoes")
        .assert()
        .failure()
        .code(78)
        .stderr(predicate::str::contains("Invalid configuration file"));
}
