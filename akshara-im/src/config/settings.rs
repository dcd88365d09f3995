//! Settings configuration
//!
//! Manages user-configurable settings for the IME.
//! Default values are defined in `config/default.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use akshara_engine::LanguageId;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::engine::EngineConfig;
use crate::core::mode::ModeConfig;

/// Default configuration TOML embedded from config/default.toml
const DEFAULT_CONFIG_TOML: &str = include_str!("../../config/default.toml");

/// Configuration settings for the IME
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Prediction and auto-commit settings
    pub prediction: PredictionSettings,
    /// Keyboard behavior settings
    pub keyboard: KeyboardSettings,
}

/// Prediction-related settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionSettings {
    /// Whether predictions are requested at all
    pub enabled: bool,
    /// Commit the best prediction on space
    pub auto_commit: bool,
    /// Allow auto-commit of a prediction that does not start with the composition
    pub auto_correct: bool,
    /// Confidence a prediction must exceed to be auto-committed
    pub auto_commit_threshold: f64,
    /// Shortest composition (in scalars) that triggers predictions
    pub min_trigger_len: usize,
    /// Longest composition (in scalars) that triggers predictions
    pub max_trigger_len: usize,
}

/// Keyboard settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardSettings {
    /// Second shift press locks shift
    pub caps_lock: bool,
    /// Language of a new session
    pub default_language: LanguageId,
    /// Languages cycled by the locale-switch key
    pub languages: Vec<LanguageId>,
}

impl Default for Settings {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("embedded default.toml must be valid")
    }
}

/// Recursively merge `overlay` TOML values on top of `base`.
fn merge_toml(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                if let Some(base_value) = base_table.get_mut(key) {
                    merge_toml(base_value, value);
                } else {
                    base_table.insert(key.clone(), value.clone());
                }
            }
        }
        (base, _) => {
            *base = overlay.clone();
        }
    }
}

/// Parse user TOML content merged on top of default.toml.
fn parse_with_defaults(user_content: &str) -> Result<Settings> {
    let mut base: toml::Value = toml::from_str(DEFAULT_CONFIG_TOML)?;
    let user: toml::Value = toml::from_str(user_content)?;
    merge_toml(&mut base, &user);
    let settings: Settings = base.try_into()?;
    settings.validate()?;
    Ok(settings)
}

/// Get the project directories for akshara-im.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "akshara", "akshara-im")
}

impl Settings {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the configuration file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get the directory scanned for user layout documents.
    ///
    /// Default: `~/.local/share/akshara-im/layouts/`
    pub fn layout_dir() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.data_dir().join("layouts"))
    }

    /// Load settings from the default configuration file.
    /// Falls back to embedded default.toml if the config file does not exist.
    pub fn load() -> Result<Self> {
        let Some(config_file) = Self::config_file() else {
            warn!("Could not determine config directory, using defaults");
            return Ok(Self::default());
        };

        if !config_file.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        debug!("Loading config from {:?}", config_file);
        let content = fs::read_to_string(&config_file)?;
        parse_with_defaults(&content)
    }

    /// Load settings from a specific file, merged on top of defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        parse_with_defaults(&content)
    }

    /// Save settings to the default configuration file
    pub fn save(&self) -> Result<()> {
        let Some(config_file) = Self::config_file() else {
            anyhow::bail!("Could not determine config directory");
        };
        debug!("Saving config to {:?}", config_file);
        self.save_to(&config_file)
    }

    /// Save settings to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let p = &self.prediction;
        if !(0.0..=1.0).contains(&p.auto_commit_threshold) {
            anyhow::bail!(
                "prediction.auto_commit_threshold must be within 0.0..=1.0, got {}",
                p.auto_commit_threshold
            );
        }
        if p.min_trigger_len > p.max_trigger_len {
            anyhow::bail!(
                "prediction.min_trigger_len ({}) exceeds max_trigger_len ({})",
                p.min_trigger_len,
                p.max_trigger_len
            );
        }
        if self.keyboard.languages.is_empty() {
            anyhow::bail!("keyboard.languages must name at least one language");
        }
        Ok(())
    }

    /// Languages cycled by the locale-switch key, starting with the default.
    ///
    /// The default language is prepended when the list does not contain it.
    pub fn enabled_languages(&self) -> Vec<LanguageId> {
        let mut languages = self.keyboard.languages.clone();
        if !languages.contains(&self.keyboard.default_language) {
            languages.insert(0, self.keyboard.default_language);
        }
        languages
    }

    /// Engine configuration derived from these settings
    pub fn engine_config(&self) -> EngineConfig {
        let p = &self.prediction;
        EngineConfig {
            predictions_enabled: p.enabled,
            auto_commit_enabled: p.auto_commit,
            auto_correct_enabled: p.auto_correct,
            auto_commit_threshold: p.auto_commit_threshold,
            min_trigger_len: p.min_trigger_len,
            max_trigger_len: p.max_trigger_len,
        }
    }

    /// Input-mode configuration derived from these settings
    pub fn mode_config(&self) -> ModeConfig {
        ModeConfig {
            caps_lock: self.keyboard.caps_lock,
        }
    }
}
