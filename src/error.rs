//! Enhanced error types with contextual suggestions
//!
//! Provides structured error types that include:
//! - Actionable error messages
//! - Suggested fixes and recovery actions
//! - Documentation links
//! - Proper exit codes for scripting
//!
//! # Examples
//!
//! ```no_run
//! use smart_kitchen::error::ErrorFormatter;
//! use smart_kitchen::shopping::ShoppingList;
//! use smart_kitchen::store::FileStore;
//!
//! let store = FileStore::new(".smart-kitchen");
//! let list = ShoppingList::load(store, "local");
//! println!("{} items to buy", list.total_item_count());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Enhanced smart-kitchen errors with contextual suggestions
#[derive(Error, Debug)]
pub enum KitchenError {
    /// No ingredient input was supplied
    #[error("No input supplied")]
    InputMissing {
        /// Operation that needed input
        operation: String,
    },

    /// A collaborator request failed
    #[error("{service} request failed: {detail}")]
    RequestFailed {
        /// Which collaborator was called (ingestion, substitution, speech, auth)
        service: String,
        /// Transport or HTTP-level failure detail
        detail: String,
    },

    /// A collaborator returned output that did not match the expected shape
    #[error("{service} response could not be parsed: {detail}")]
    UnparseableResponse {
        /// Which collaborator was called
        service: String,
        /// Parse failure detail
        detail: String,
    },

    /// The AI service API key environment variable is not set
    #[error("API key not set: {env_var}")]
    ApiKeyMissing {
        /// Name of the environment variable holding the key
        env_var: String,
    },

    /// Configuration file exists but could not be parsed
    #[error("Invalid configuration file: {path}")]
    ConfigInvalid {
        /// Path to the config file
        path: PathBuf,
        /// Parse failure detail
        detail: String,
    },

    /// File not found during operation
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to missing file
        path: PathBuf,
        /// Operation that required the file
        operation: String,
    },

    /// Operation requires a signed-in account
    #[error("Not signed in")]
    AuthRequired {
        /// Operation requiring an account
        operation: String,
    },

    /// Sign-up or sign-in was rejected by the identity service
    #[error("Authentication failed: {detail}")]
    AuthFailed {
        /// Rejection detail from the service
        detail: String,
    },

    /// Account commands used without an `[auth]` section in the config
    #[error("Account service not configured")]
    AccountsNotConfigured,

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl KitchenError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// Returns a user-friendly suggestion for how to fix the error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use smart_kitchen::error::KitchenError;
    ///
    /// let error = KitchenError::ApiKeyMissing {
    ///     env_var: "GEMINI_API_KEY".to_string(),
    /// };
    ///
    /// let suggestion = error.suggestion();
    /// assert!(suggestion.is_some());
    /// assert!(suggestion.unwrap().contains("GEMINI_API_KEY"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::InputMissing { operation } => Some(format!(
                "Provide one of --text, --image, or --audio to {}",
                operation
            )),
            Self::RequestFailed { .. } => {
                Some("Check your network connection and submit again".to_string())
            }
            Self::UnparseableResponse { .. } => {
                Some("Submit the request again; the service occasionally returns malformed output".to_string())
            }
            Self::ApiKeyMissing { env_var } => Some(format!(
                "Set the {} environment variable to your AI service API key",
                env_var
            )),
            Self::ConfigInvalid { path, .. } => Some(format!(
                "Fix the TOML syntax in {} or delete the file to use defaults",
                path.display()
            )),
            Self::FileNotFound { path, operation } => Some(format!(
                "Ensure {} exists before running {}",
                path.display(),
                operation
            )),
            Self::AuthRequired { operation } => Some(format!(
                "Sign in first: smart-kitchen account login <email> (needed for {})",
                operation
            )),
            Self::AuthFailed { .. } => Some(
                "Check the email and password, or create an account with: smart-kitchen account signup <email>"
                    .to_string(),
            ),
            Self::AccountsNotConfigured => Some(
                "Add an [auth] table with base_url and anon_key to smart-kitchen.toml".to_string(),
            ),
            Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is accessible",
                context
            )),
        }
    }

    /// Get documentation URL for this error.
    ///
    /// Returns a URL to relevant documentation for resolving this error type.
    pub fn docs_url(&self) -> Option<&str> {
        match self {
            Self::ApiKeyMissing { .. } => {
                Some("https://github.com/smart-kitchen/smart-kitchen#api-key")
            }
            Self::ConfigInvalid { .. } => {
                Some("https://github.com/smart-kitchen/smart-kitchen#configuration")
            }
            Self::AuthRequired { .. } | Self::AuthFailed { .. } | Self::AccountsNotConfigured => {
                Some("https://github.com/smart-kitchen/smart-kitchen#accounts")
            }
            _ => None,
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Returns Unix-style exit codes based on the error type, following sysexits.h conventions.
    ///
    /// # Examples
    ///
    /// ```
    /// use smart_kitchen::error::KitchenError;
    ///
    /// let error = KitchenError::InputMissing {
    ///     operation: "suggest".to_string(),
    /// };
    ///
    /// assert_eq!(error.exit_code(), 64); // EX_USAGE
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InputMissing { .. } => 64,      // EX_USAGE (sysexits.h)
            Self::RequestFailed { .. } => 69,     // EX_UNAVAILABLE
            Self::UnparseableResponse { .. } => 76, // EX_PROTOCOL
            Self::ApiKeyMissing { .. } => 78,     // EX_CONFIG
            Self::ConfigInvalid { .. } => 78,     // EX_CONFIG
            Self::FileNotFound { .. } => 66,      // EX_NOINPUT
            Self::AuthRequired { .. } => 77,      // EX_NOPERM
            Self::AuthFailed { .. } => 77,        // EX_NOPERM
            Self::AccountsNotConfigured => 78,    // EX_CONFIG
            Self::Io { .. } => 74,                // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with suggestions and documentation links
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        // Main error message
        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        // Error chain (caused by)
        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        // Try to downcast to KitchenError for suggestions
        if let Some(k_error) = error.downcast_ref::<KitchenError>() {
            // Suggestions
            if let Some(suggestion) = k_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }

            // Documentation link
            if let Some(docs) = k_error.docs_url() {
                output.push_str(&format!("{} {}\n", style("docs:").blue(), docs));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(k_error) = error.downcast_ref::<KitchenError>() {
            k_error.exit_code()
        } else {
            1 // Generic error
        }
    }
}
