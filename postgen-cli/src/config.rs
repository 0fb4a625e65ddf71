// ABOUTME: Configuration file loading, validation, and hierarchical merging for postgen
// ABOUTME: Supports TOML config files with XDG Base Directory specification compliance

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use crate::catalog::Tone;
use postgen_sdk::constants::search;

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Config {
    #[serde(default, deserialize_with = "validate_tone")]
    pub default_tone: Option<String>,
    #[serde(default)]
    pub default_format: Option<String>,
    /// First entry is the drafting language; the rest are translation targets
    #[serde(default)]
    pub languages: Option<Vec<String>>,
    #[serde(default)]
    pub output_dir: Option<String>,
    /// JSON prompt-catalog override file
    #[serde(default)]
    pub catalog_path: Option<String>,
    #[serde(default)]
    pub chat: Option<ChatConfig>,
    #[serde(default)]
    pub search: Option<SearchConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct ChatConfig {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct SearchConfig {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub display: Option<u32>,
    #[serde(default, deserialize_with = "validate_sort")]
    pub sort: Option<String>,
}

impl Config {
    /// Load configuration from standard XDG-compliant locations
    pub fn load() -> Result<Self> {
        let paths = Self::get_config_paths();
        Self::load_from_paths(&paths.iter().map(|p| p.as_str()).collect::<Vec<_>>())
    }

    /// Load configuration from specific file paths in order of precedence
    pub fn load_from_paths(paths: &[&str]) -> Result<Self> {
        let mut config = Config::default();

        for path in paths {
            // Apply in order - later paths override earlier ones
            if let Ok(file_config) = Self::load_from_file(path) {
                config = config.merge(file_config);
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a single file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "Failed to parse TOML config file: {}",
                path.as_ref().display()
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get standard config file paths in order of precedence (highest first)
    pub fn get_config_paths() -> Vec<String> {
        let mut paths = Vec::new();

        // 1. Project-specific config (highest precedence)
        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(
                current_dir
                    .join("postgen.toml")
                    .to_string_lossy()
                    .to_string(),
            );
        }

        // 2. XDG config home
        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            let path = PathBuf::from(config_home).join("postgen").join("config.toml");
            paths.push(path.to_string_lossy().to_string());
        }

        // 3. User config directory fallback
        if let Some(home_dir) = dirs::home_dir() {
            let path = home_dir
                .join(".config")
                .join("postgen")
                .join("config.toml");
            paths.push(path.to_string_lossy().to_string());
        }

        paths
    }

    /// Merge this config with another, giving precedence to the other config
    pub fn merge(self, other: Config) -> Config {
        Config {
            default_tone: other.default_tone.or(self.default_tone),
            default_format: other.default_format.or(self.default_format),
            languages: other.languages.or(self.languages),
            output_dir: other.output_dir.or(self.output_dir),
            catalog_path: other.catalog_path.or(self.catalog_path),
            chat: match (self.chat, other.chat) {
                (Some(base), Some(other)) => Some(base.merge(other)),
                (Some(base), None) => Some(base),
                (None, Some(other)) => Some(other),
                (None, None) => None,
            },
            search: match (self.search, other.search) {
                (Some(base), Some(other)) => Some(base.merge(other)),
                (Some(base), None) => Some(base),
                (None, Some(other)) => Some(other),
                (None, None) => None,
            },
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref languages) = self.languages {
            if languages.is_empty() {
                return Err(anyhow!("languages must not be an empty list"));
            }
        }

        if let Some(ref search_config) = self.search {
            search_config
                .validate()
                .context("Invalid search configuration")?;
        }

        Ok(())
    }
}

impl ChatConfig {
    pub fn merge(self, other: ChatConfig) -> ChatConfig {
        ChatConfig {
            model: other.model.or(self.model),
            api_url: other.api_url.or(self.api_url),
            temperature: other.temperature.or(self.temperature),
            max_tokens: other.max_tokens.or(self.max_tokens),
        }
    }
}

impl SearchConfig {
    pub fn merge(self, other: SearchConfig) -> SearchConfig {
        SearchConfig {
            api_url: other.api_url.or(self.api_url),
            display: other.display.or(self.display),
            sort: other.sort.or(self.sort),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(display) = self.display {
            if display == 0 || display > search::MAX_DISPLAY {
                return Err(anyhow!(
                    "display must be between 1 and {}, got {}",
                    search::MAX_DISPLAY,
                    display
                ));
            }
        }
        Ok(())
    }
}

// Custom deserializer for tone validation
fn validate_tone<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    // Handle the case where the field might not be present
    let value: Option<Option<String>> = Option::deserialize(deserializer).ok();
    let value = value.flatten();

    if let Some(ref tone) = value {
        if Tone::is_known_choice(tone) {
            Ok(value)
        } else {
            Err(D::Error::custom(format!(
                "Invalid tone '{}'. Must be one of: formal, casual, humorous, informative (or 1-4)",
                tone
            )))
        }
    } else {
        Ok(None)
    }
}

// Custom deserializer for search sort validation
fn validate_sort<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let value: Option<Option<String>> = Option::deserialize(deserializer).ok();
    let value = value.flatten();

    if let Some(ref sort) = value {
        match sort.as_str() {
            "sim" | "date" => Ok(value),
            _ => Err(D::Error::custom(format!(
                "Invalid sort '{}'. Must be one of: sim, date",
                sort
            ))),
        }
    } else {
        Ok(None)
    }
}
