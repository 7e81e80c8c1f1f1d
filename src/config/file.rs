//! Configuration file data structures

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "smart-kitchen.toml";

/// smart-kitchen configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Directory for persisted documents (defaults to `.smart-kitchen`
    /// under the app root)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Dietary filter labels applied to every ingestion request
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dietary_filters: Vec<String>,

    /// AI service settings
    #[serde(default)]
    pub ai: AiSettings,

    /// Identity service settings; account commands are disabled when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthSettings>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            data_dir: None,
            dietary_filters: Vec::new(),
            ai: AiSettings::default(),
            auth: None,
        }
    }
}

/// AI service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSettings {
    /// Service base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for ingredient identification and substitutions
    #[serde(default = "default_recipe_model")]
    pub recipe_model: String,

    /// Model used for text-to-speech
    #[serde(default = "default_speech_model")]
    pub speech_model: String,

    /// Prebuilt voice name for speech synthesis
    #[serde(default = "default_voice")]
    pub voice: String,

    /// Sample rate of the raw speech audio in Hz
    #[serde(default = "default_speech_sample_rate")]
    pub speech_sample_rate: u32,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            recipe_model: default_recipe_model(),
            speech_model: default_speech_model(),
            voice: default_voice(),
            speech_sample_rate: default_speech_sample_rate(),
        }
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_recipe_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_speech_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_voice() -> String {
    "Kore".to_string()
}

fn default_speech_sample_rate() -> u32 {
    24_000
}

impl AiSettings {
    /// Validate that the settings can drive a request
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            anyhow::bail!("ai.base_url must not be empty");
        }
        if self.speech_sample_rate == 0 {
            anyhow::bail!("ai.speech_sample_rate must be greater than zero");
        }
        Ok(())
    }
}

/// Identity service settings (GoTrue-style REST API)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Service base URL, e.g. `https://project.supabase.co`
    pub base_url: String,

    /// Publishable (anon) API key sent with every request
    pub anon_key: String,
}

impl AuthSettings {
    /// Validate that the settings can drive a request
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            anyhow::bail!("auth.base_url must not be empty");
        }
        if self.anon_key.is_empty() {
            anyhow::bail!("auth.anon_key must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::loader::ConfigLoader;
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_file_default_has_service_defaults() {
        let config = ConfigFile::default();
        assert_eq!(config.ai.recipe_model, "gemini-2.5-flash");
        assert_eq!(config.ai.speech_model, "gemini-2.5-flash-preview-tts");
        assert_eq!(config.ai.voice, "Kore");
        assert_eq!(config.ai.speech_sample_rate, 24_000);
        assert!(config.auth.is_none());
        assert!(config.dietary_filters.is_empty());
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_config_file_save_and_load_preserves_values() {
        let temp_dir = TempDir::new().unwrap();

        let config = ConfigFile {
            data_dir: Some(PathBuf::from("documents")),
            dietary_filters: vec!["vegetarian".to_string()],
            ai: AiSettings {
                voice: "Puck".to_string(),
                ..AiSettings::default()
            },
            auth: Some(AuthSettings {
                base_url: "https://project.supabase.co".to_string(),
                anon_key: "anon-123".to_string(),
            }),
        };

        ConfigLoader::save(&config, temp_dir.path()).unwrap();

        let loaded = ConfigLoader::load(temp_dir.path()).unwrap();
        assert_eq!(loaded.data_dir, Some(PathBuf::from("documents")));
        assert_eq!(loaded.dietary_filters, vec!["vegetarian".to_string()]);
        assert_eq!(loaded.ai.voice, "Puck");
        assert_eq!(
            loaded.auth.as_ref().map(|a| a.anon_key.as_str()),
            Some("anon-123")
        );
    }

    #[test]
    fn test_partial_ai_table_keeps_defaults_for_other_fields() {
        let toml = r#"
[ai]
recipe_model = "gemini-2.0-flash"
"#;
        let config: ConfigFile = toml_edit::de::from_str(toml).unwrap();
        assert_eq!(config.ai.recipe_model, "gemini-2.0-flash");
        assert_eq!(config.ai.voice, "Kore");
        assert_eq!(config.ai.speech_sample_rate, 24_000);
    }

    #[test]
    fn test_ai_settings_validate_rejects_empty_base_url() {
        let settings = AiSettings {
            base_url: String::new(),
            ..AiSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_ai_settings_validate_rejects_zero_sample_rate() {
        let settings = AiSettings {
            speech_sample_rate: 0,
            ..AiSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_auth_settings_validate_requires_both_fields() {
        let missing_key = AuthSettings {
            base_url: "https://project.supabase.co".to_string(),
            anon_key: String::new(),
        };
        assert!(missing_key.validate().is_err());

        let missing_url = AuthSettings {
            base_url: String::new(),
            anon_key: "anon-123".to_string(),
        };
        assert!(missing_url.validate().is_err());

        let complete = AuthSettings {
            base_url: "https://project.supabase.co".to_string(),
            anon_key: "anon-123".to_string(),
        };
        assert!(complete.validate().is_ok());
    }

    #[test]
    fn test_config_serialize_skips_absent_sections() {
        let serialized = toml_edit::ser::to_string(&ConfigFile::default()).unwrap();
        assert!(!serialized.contains("auth"));
        assert!(!serialized.contains("data_dir"));
        assert!(!serialized.contains("dietary_filters"));
    }
}
