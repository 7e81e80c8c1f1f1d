//! Account command
//!
//! Handles `smart-kitchen account`: sign-up, sign-in, OAuth sign-in,
//! sign-out, and the current-identity check. Signing in switches the
//! storage namespace for shopping list and favorites to the user id.

use crate::auth::{self, AuthChange, AuthClient, SignUpOutcome};
use crate::cmd::AppContext;
use crate::store::FileStore;
use anyhow::Result;
use console::{style, Emoji};
use std::io::{self, BufRead, Write};

static KEY: Emoji = Emoji("🔑", "[KEY]");
static CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// One account operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountAction<'a> {
    /// Create an account with email and password.
    SignUp {
        /// Email address to register
        email: &'a str,
    },
    /// Sign in with email and password.
    Login {
        /// Email address of the account
        email: &'a str,
    },
    /// Print the provider authorize URL for a browser sign-in.
    LoginOauth {
        /// OAuth provider name, such as `google`
        provider: &'a str,
    },
    /// Sign out and clear the stored session.
    Logout,
    /// Show who is signed in.
    Whoami,
}

/// Run one account operation.
pub fn cmd_account(action: AccountAction<'_>) -> Result<()> {
    let ctx = AppContext::load()?;

    match action {
        AccountAction::Whoami => {
            // Reads the stored session directly; works without an [auth]
            // config table and without the network.
            match auth::stored_session(&ctx.store) {
                Some(session) => match &session.user.email {
                    Some(email) => println!(
                        "Signed in as {} ({})",
                        style(email).cyan(),
                        session.user.id
                    ),
                    None => println!("Signed in as {}", style(&session.user.id).cyan()),
                },
                None => println!("Not signed in."),
            }
        }
        AccountAction::SignUp { email } => {
            let mut client = connect(&ctx)?;
            let password = prompt_password()?;
            match client.sign_up(email, &password)? {
                SignUpOutcome::SignedIn(session) => {
                    println!(
                        "{} Account created. Signed in as {}",
                        CHECKMARK,
                        style(email).cyan()
                    );
                    print_namespace_note(session.namespace());
                }
                SignUpOutcome::ConfirmationRequired => {
                    println!("Account created. Check your email to confirm it, then run:");
                    println!("  smart-kitchen account login {}", email);
                }
            }
        }
        AccountAction::Login { email } => {
            let mut client = connect(&ctx)?;
            let password = prompt_password()?;
            let session = client.sign_in(email, &password)?;
            println!("{} Signed in as {}", CHECKMARK, style(email).cyan());
            print_namespace_note(session.namespace());
        }
        AccountAction::LoginOauth { provider } => {
            let client = connect(&ctx)?;
            println!("{} Open this URL in your browser to sign in:", KEY);
            println!();
            println!("  {}", style(client.authorize_url(provider)).cyan());
            println!();
            println!("After approving, sign in here with: smart-kitchen account login <email>");
        }
        AccountAction::Logout => {
            let mut client = connect(&ctx)?;
            if client.session().is_none() {
                println!("Not signed in.");
            } else {
                client.sign_out();
                println!("Signed out. Back to the local shopping list and favorites.");
            }
        }
    }
    Ok(())
}

fn connect(ctx: &AppContext) -> Result<AuthClient<FileStore>> {
    let mut client = ctx.auth_client()?;
    client.set_listener(|change| match change {
        AuthChange::SignedIn(user) => log::info!("Auth state: signed in as {}", user.id),
        AuthChange::SignedOut => log::info!("Auth state: signed out"),
    });
    Ok(client)
}

fn print_namespace_note(namespace: &str) {
    log::debug!("Documents now namespaced under '{}'", namespace);
    println!("Your shopping list and favorites now follow this account.");
}

fn prompt_password() -> Result<String> {
    // No terminal-control dependency in the stack, so input stays visible.
    print!("Password (input is visible): ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
