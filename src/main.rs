use clap::{Parser, Subcommand};
use clap_complete::Shell;
use smart_kitchen::cmd::{self, AccountAction, ShoppingAction};
use std::path::PathBuf;
use std::process;

/// AI kitchen assistant
///
/// smart-kitchen turns a photo, an audio clip, or a text description of
/// what's in your fridge into recipe suggestions, with a persistent
/// shopping list and favorite recipes.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive kitchen session
    Session,

    /// Suggest recipes from text, a photo, or audio
    Suggest {
        /// Free-text ingredient description
        #[arg(long)]
        text: Option<String>,

        /// Photo of fridge contents
        #[arg(long, value_name = "FILE")]
        image: Option<PathBuf>,

        /// Audio clip describing ingredients
        #[arg(long, value_name = "FILE")]
        audio: Option<PathBuf>,

        /// Dietary filter label (repeatable)
        #[arg(short, long = "filter", value_name = "LABEL")]
        filters: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the shopping list
    Shopping {
        #[command(subcommand)]
        action: Option<ShoppingCommands>,
    },

    /// List favorite recipes
    Favorites,

    /// Synthesize speech for a piece of text
    Speak {
        /// Text to read aloud
        text: String,

        /// Output WAV file
        #[arg(short, long, value_name = "FILE", default_value = "speech.wav")]
        output: PathBuf,
    },

    /// Manage the signed-in account
    Account {
        #[command(subcommand)]
        action: AccountCommands,
    },

    /// Initialize smart-kitchen configuration
    Init,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ShoppingCommands {
    /// Print the list and its item count
    Show,

    /// Remove one item from a recipe's entry (names match exactly)
    Remove {
        /// Recipe entry holding the item
        recipe: String,

        /// Item name
        item: String,
    },

    /// Remove a whole recipe entry
    RemoveRecipe {
        /// Recipe entry to drop
        recipe: String,
    },

    /// Clear the list
    Clear,
}

#[derive(Subcommand)]
enum AccountCommands {
    /// Create an account with email and password
    Signup {
        /// Email address to register
        email: String,
    },

    /// Sign in with email and password
    Login {
        /// Email address of the account
        email: String,
    },

    /// Sign in through an OAuth provider
    LoginOauth {
        /// Provider name
        #[arg(default_value = "google")]
        provider: String,
    },

    /// Sign out and clear the stored session
    Logout,

    /// Show who is signed in
    Whoami,
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    // Set console emoji mode based on CLI flag
    if cli.no_emoji {
        std::env::set_var("NO_EMOJI", "1");
    }

    let result = match &cli.command {
        Some(Commands::Session) => cmd::cmd_session(),
        Some(Commands::Suggest {
            text,
            image,
            audio,
            filters,
            json,
        }) => cmd::cmd_suggest(
            text.as_deref(),
            image.as_deref(),
            audio.as_deref(),
            filters,
            *json,
        ),
        Some(Commands::Shopping { action }) => {
            let action = match action {
                None | Some(ShoppingCommands::Show) => ShoppingAction::Show,
                Some(ShoppingCommands::Remove { recipe, item }) => ShoppingAction::Remove {
                    recipe: recipe.as_str(),
                    item: item.as_str(),
                },
                Some(ShoppingCommands::RemoveRecipe { recipe }) => ShoppingAction::RemoveRecipe {
                    recipe: recipe.as_str(),
                },
                Some(ShoppingCommands::Clear) => ShoppingAction::Clear,
            };
            cmd::cmd_shopping(action)
        }
        Some(Commands::Favorites) => cmd::cmd_favorites(),
        Some(Commands::Speak { text, output }) => cmd::cmd_speak(text, output),
        Some(Commands::Account { action }) => {
            let action = match action {
                AccountCommands::Signup { email } => AccountAction::SignUp {
                    email: email.as_str(),
                },
                AccountCommands::Login { email } => AccountAction::Login {
                    email: email.as_str(),
                },
                AccountCommands::LoginOauth { provider } => AccountAction::LoginOauth {
                    provider: provider.as_str(),
                },
                AccountCommands::Logout => AccountAction::Logout,
                AccountCommands::Whoami => AccountAction::Whoami,
            };
            cmd::cmd_account(action)
        }
        Some(Commands::Init) => cmd::cmd_init(),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(*shell);
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("smart-kitchen v{}", env!("CARGO_PKG_VERSION"));
            println!("AI kitchen assistant\n");
            println!("Usage: smart-kitchen <COMMAND>\n");
            println!("Commands:");
            println!("  session     Interactive kitchen session");
            println!("  suggest     Suggest recipes from text, a photo, or audio");
            println!("  shopping    Manage the shopping list");
            println!("  favorites   List favorite recipes");
            println!("  speak       Synthesize speech for a piece of text");
            println!("  account     Manage the signed-in account");
            println!("  init        Initialize smart-kitchen configuration");
            println!("\nRun 'smart-kitchen <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use smart_kitchen::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
