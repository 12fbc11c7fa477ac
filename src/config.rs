use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::language::Language;

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub generation: GenerationDefaults,
}

/// Data directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default catalog data directory.
    pub data_dir: Option<PathBuf>,
}

/// Defaults applied to generation requests that leave fields unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationDefaults {
    /// Default output language.
    pub language: Language,
    /// Palette preselected for color sampling.
    pub palette_id: Option<String>,
    /// Free text prepended to every generated prompt.
    pub prefix: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            generation: GenerationDefaults::default(),
        }
    }
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            language: Language::En,
            palette_id: None,
            prefix: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/charagen/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e} — using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {} — using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Resolved catalog data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("charagen").join("prompt data"))
                .unwrap_or_else(|| PathBuf::from("prompt data"))
        })
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("charagen").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.data.data_dir.is_none());
        assert_eq!(config.generation.language, Language::En);
        assert!(config.generation.palette_id.is_none());
    }

    #[test]
    fn test_data_dir_override() {
        let mut config = AppConfig::default();
        config.data.data_dir = Some(PathBuf::from("/tmp/catalogs"));
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/catalogs"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = AppConfig::default();
        config.generation.language = Language::Zh;
        config.generation.palette_id = Some("pastel".to_string());
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.generation.language, Language::Zh);
        assert_eq!(deserialized.generation.palette_id.as_deref(), Some("pastel"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("[generation]\nlanguage = \"zh\"\n").unwrap();
        assert_eq!(config.generation.language, Language::Zh);
        assert!(config.data.data_dir.is_none());
    }
}
