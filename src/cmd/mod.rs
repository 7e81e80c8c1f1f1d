//! Command handlers for the smart-kitchen CLI
//!
//! This module contains all command implementations, organized by
//! functionality. Each submodule handles a specific CLI command.

pub mod account;
pub mod completions;
pub mod favorites;
pub mod init;
pub mod present;
pub mod session;
pub mod shopping;
pub mod speak;
pub mod suggest;

// Re-export command functions for convenient access
pub use account::{cmd_account, AccountAction};
pub use completions::cmd_completions;
pub use favorites::cmd_favorites;
pub use init::cmd_init;
pub use session::cmd_session;
pub use shopping::{cmd_shopping, ShoppingAction};
pub use speak::cmd_speak;
pub use suggest::cmd_suggest;

use crate::ai::GeminiClient;
use crate::auth::{self, AuthClient};
use crate::config::{ConfigFile, ConfigLoader};
use crate::error::KitchenError;
use crate::favorites::Favorites;
use crate::shopping::ShoppingList;
use crate::store::{FileStore, ANONYMOUS_NAMESPACE};
use anyhow::Result;
use std::path::PathBuf;

/// Environment variable overriding the application root directory.
pub const HOME_ENV: &str = "SMART_KITCHEN_HOME";

/// Default data directory name under the application root.
pub const DATA_DIR_NAME: &str = ".smart-kitchen";

/// Everything a command needs: configuration, the document store, and
/// the active storage namespace.
pub struct AppContext {
    /// Directory holding the config file
    pub root: PathBuf,
    /// Loaded configuration (defaults when no file exists)
    pub config: ConfigFile,
    /// File-backed document store
    pub store: FileStore,
    /// Namespace documents are read and written under
    pub namespace: String,
}

impl AppContext {
    /// Load configuration and restore the persisted sign-in, if any.
    pub fn load() -> Result<Self> {
        let root = app_config_root()?;
        let config = ConfigLoader::load(&root)?;
        let data_dir = match &config.data_dir {
            Some(dir) => root.join(dir),
            None => root.join(DATA_DIR_NAME),
        };
        let store = FileStore::new(data_dir);
        let namespace = auth::stored_session(&store)
            .map(|session| session.user.id)
            .unwrap_or_else(|| ANONYMOUS_NAMESPACE.to_string());
        log::debug!("Using namespace '{}'", namespace);
        Ok(Self {
            root,
            config,
            store,
            namespace,
        })
    }

    /// The shopping list for the active namespace.
    pub fn shopping_list(&self) -> ShoppingList<FileStore> {
        ShoppingList::load(self.store.clone(), &self.namespace)
    }

    /// The favorites document for the active namespace.
    pub fn favorites(&self) -> Favorites<FileStore> {
        Favorites::load(self.store.clone(), &self.namespace)
    }

    /// An AI client, requiring `GEMINI_API_KEY` in the environment.
    pub fn assistant(&self) -> Result<GeminiClient> {
        GeminiClient::from_env(&self.config.ai)
    }

    /// An auth client, requiring an `[auth]` config table.
    pub fn auth_client(&self) -> Result<AuthClient<FileStore>> {
        let settings = self
            .config
            .auth
            .as_ref()
            .ok_or(KitchenError::AccountsNotConfigured)?;
        AuthClient::new(&settings.base_url, &settings.anon_key, self.store.clone())
    }
}

/// The directory holding `smart-kitchen.toml`: `SMART_KITCHEN_HOME` when
/// set, the working directory otherwise.
pub(crate) fn app_config_root() -> Result<PathBuf> {
    match std::env::var_os(HOME_ENV) {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => Ok(std::env::current_dir()?),
    }
}
