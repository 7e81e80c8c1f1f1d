//! Completions command implementation
//!
//! Handles the `smart-kitchen completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap_complete::{generate, Shell};
use std::io::Write;

/// Generate shell completion scripts
///
/// Outputs completion script for the specified shell to stdout.
/// Users can redirect this to their shell's completion directory.
///
/// # Examples
///
/// ```bash
/// # Bash
/// smart-kitchen completions bash > /etc/bash_completion.d/smart-kitchen
///
/// # Zsh
/// smart-kitchen completions zsh > ~/.zfunc/_smart-kitchen
///
/// # Fish
/// smart-kitchen completions fish > ~/.config/fish/completions/smart-kitchen.fish
/// ```
pub fn cmd_completions(shell: Shell) {
    write_completions(shell, &mut std::io::stdout());
}

// The command structure is re-created here since Cli lives in main.rs.
fn write_completions(shell: Shell, out: &mut dyn Write) {
    use clap::{Arg, ArgAction, Command};

    let mut cmd = Command::new("smart-kitchen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("AI kitchen assistant")
        .arg(
            Arg::new("no-emoji")
                .long("no-emoji")
                .help("Disable emoji output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(Command::new("session").about("Interactive kitchen session"))
        .subcommand(Command::new("suggest").about("Suggest recipes from text, a photo, or audio"))
        .subcommand(Command::new("shopping").about("Manage the shopping list"))
        .subcommand(Command::new("favorites").about("List favorite recipes"))
        .subcommand(Command::new("speak").about("Synthesize speech for a piece of text"))
        .subcommand(Command::new("account").about("Manage the signed-in account"))
        .subcommand(Command::new("init").about("Initialize smart-kitchen configuration"))
        .subcommand(Command::new("completions").about("Generate shell completions"));

    let bin_name = "smart-kitchen".to_string();
    generate(shell, &mut cmd, bin_name, out);
}
