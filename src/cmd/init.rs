//! Init command implementation
//!
//! Handles the `smart-kitchen init` command which writes a default
//! `smart-kitchen.toml` so settings are easy to discover and edit.

use crate::ai::gemini::API_KEY_ENV;
use crate::cmd::{app_config_root, DATA_DIR_NAME};
use crate::config::{ConfigFile, ConfigLoader, CONFIG_FILE_NAME};
use anyhow::Result;
use console::{style, Emoji};

static PAN: Emoji = Emoji("🍳", ">");
static CHECKMARK: Emoji = Emoji("✅", "[OK]");
static INFO: Emoji = Emoji("ℹ️", "i");

/// Write a default configuration file into the application root.
///
/// Refuses to overwrite an existing file.
pub fn cmd_init() -> Result<()> {
    println!(
        "{} {} Initializing smart-kitchen",
        PAN,
        style("smart-kitchen init").bold()
    );
    println!();

    let root = app_config_root()?;

    if ConfigLoader::exists(&root) {
        println!(
            "{} Config file already exists: {}",
            style("⚠️").yellow(),
            style(CONFIG_FILE_NAME).cyan()
        );
        println!("   Delete it first or edit manually to update.");
        return Ok(());
    }

    let config = ConfigFile::default();
    ConfigLoader::save(&config, &root)?;

    println!(
        "{} Created {}",
        CHECKMARK,
        style(root.join(CONFIG_FILE_NAME).display().to_string()).cyan()
    );
    println!();
    println!("{}  Defaults:", INFO);
    println!("   recipe model   = {}", style(&config.ai.recipe_model).green());
    println!("   speech model   = {}", style(&config.ai.speech_model).green());
    println!("   voice          = {}", style(&config.ai.voice).green());
    println!(
        "   data directory = {}",
        style(format!("{}/", DATA_DIR_NAME)).green()
    );
    println!();
    println!(
        "Set {} before requesting recipes, and add an [auth] table to use accounts.",
        style(API_KEY_ENV).bold()
    );
    Ok(())
}
