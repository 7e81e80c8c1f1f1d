//! Configuration file management for smart-kitchen
//!
//! This module provides:
//! - smart-kitchen.toml config file support
//! - AI service and identity service settings with sensible defaults
//! - Data-directory and dietary-filter configuration

pub mod file;
pub mod loader;

pub use file::{AiSettings, AuthSettings, ConfigFile, CONFIG_FILE_NAME};
pub use loader::ConfigLoader;
