//! Speak command tests
//!
//! Synthesis needs a live API key, so these cover input validation and the
//! offline error surface only.

use assert_cmd::Command;
use predicates::prelude::*;

mod common;
use common::fixtures;

fn get_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_smart-kitchen"))
}

#[test]
fn test_speak_with_empty_text_fails_with_usage_error() {
    let home = fixtures::app_home().expect("Failed to create app home");

    let mut cmd = get_bin();
    cmd.env("SMART_KITCHEN_HOME", home.path())
        .env_remove("GEMINI_API_KEY")
        .arg("speak")
        .arg("   ")
        .assert()
        .failure()
        .code(64)
        .stderr(predicate::str::contains("No input supplied"));
}

#[test]
fn test_speak_without_api_key_fails_with_config_error() {
    let home = fixtures::app_home().expect("Failed to create app home");
    let output = home.path().join("speech.wav");

    let mut cmd = get_bin();
    cmd.env("SMART_KITCHEN_HOME", home.path())
        .env_remove("GEMINI_API_KEY")
        .arg("speak")
        .arg("Dinner is ready")
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .code(78)
        .stderr(predicate::str::contains("API key not set: GEMINI_API_KEY"));

    assert!(
        !output.exists(),
        "No output file should be written when synthesis never ran"
    );
}

#[test]
fn test_speak_requires_a_text_argument() {
    let home = fixtures::app_home().expect("Failed to create app home");

    let mut cmd = get_bin();
    cmd.env("SMART_KITCHEN_HOME", home.path())
        .arg("speak")
        .assert()
        .failure()
        .code(2);
}
