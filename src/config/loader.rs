//! Configuration file loading and saving

use super::file::{ConfigFile, CONFIG_FILE_NAME};
use crate::error::KitchenError;
use anyhow::{Context, Result};
use std::path::Path;

/// Handles loading and saving configuration files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from smart-kitchen.toml in the given directory
    ///
    /// A missing file yields the default configuration; a malformed file is
    /// an error.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use smart_kitchen::config::ConfigLoader;
    /// use std::path::Path;
    ///
    /// let config = ConfigLoader::load(Path::new("."))?;
    /// println!("Recipe model: {}", config.ai.recipe_model);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(root: &Path) -> Result<ConfigFile> {
        let config_path = root.join(CONFIG_FILE_NAME);

        // Read file atomically - no TOCTOU race window
        let contents = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Return default config if file doesn't exist
                return Ok(ConfigFile::default());
            }
            Err(e) => {
                return Err(e).context("Failed to read smart-kitchen.toml");
            }
        };

        let config: ConfigFile =
            toml_edit::de::from_str(&contents).map_err(|e| KitchenError::ConfigInvalid {
                path: config_path.clone(),
                detail: e.to_string(),
            })?;

        config.ai.validate().context("Invalid ai configuration")?;
        if let Some(ref auth) = config.auth {
            auth.validate().context("Invalid auth configuration")?;
        }

        Ok(config)
    }

    /// Save config to smart-kitchen.toml in the given directory
    pub fn save(config: &ConfigFile, root: &Path) -> Result<()> {
        let config_path = root.join(CONFIG_FILE_NAME);

        let contents =
            toml_edit::ser::to_string_pretty(config).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents).context("Failed to write smart-kitchen.toml")?;

        Ok(())
    }

    /// Check if a config file exists in the given directory
    pub fn exists(root: &Path) -> bool {
        root.join(CONFIG_FILE_NAME).exists()
    }
}
