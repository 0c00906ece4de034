//! InsightDeck configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main InsightDeck configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeckConfig {
    /// Record store configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Classification provider configuration
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

/// Record store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the collection files
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: crate::insights::store::FileStore::default_dir(),
        }
    }
}

/// Classification provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Provider model name
    pub model: String,

    /// Provider API base URL
    pub base_url: String,

    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_toml_round_trip() {
        let config = DeckConfig::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        let back: DeckConfig = toml::from_str(&toml).unwrap();
        assert_eq!(back.classifier.model, config.classifier.model);
        assert_eq!(back.storage.data_dir, config.storage.data_dir);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: DeckConfig = toml::from_str(
            r#"
            [classifier]
            model = "gemini-2.0-flash"
            base_url = "https://example.test"
            api_key_env = "MY_KEY"
            "#,
        )
        .unwrap();
        assert_eq!(config.classifier.model, "gemini-2.0-flash");
        assert_eq!(
            config.storage.data_dir,
            StorageConfig::default().data_dir
        );
    }
}
