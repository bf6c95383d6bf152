//! Configuration file support for bgdraw.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/bgdraw/config.toml`. Settings cover stroke appearance, fading,
//! the stroke limit, and where drawings are saved.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{DrawingConfig, StorageConfig};

use crate::draw::DrawingStyle;
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Documented default configuration written by `--init-config`.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../config.example.toml");

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// width = 5.0
/// color = "white"
/// fade_time = 120.0
/// max_items = 128
///
/// [storage]
/// directory = "~/drawings"
/// extension = "txt"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Stroke defaults (width, color, fade time, stroke limit)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Save/load location
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Validated ranges:
    /// - `width`: 1.0 - 50.0
    /// - `fade_time`: 0.0 - 600.0
    /// - `max_items`: 0 - 2048
    pub fn validate_and_clamp(&mut self) {
        if !(1.0..=50.0).contains(&self.drawing.width) {
            log::warn!(
                "Invalid width {:.1}, clamping to 1.0-50.0 range",
                self.drawing.width
            );
            self.drawing.width = if self.drawing.width.is_nan() {
                1.0
            } else {
                self.drawing.width.clamp(1.0, 50.0)
            };
        }

        if !(0.0..=600.0).contains(&self.drawing.fade_time) {
            log::warn!(
                "Invalid fade_time {:.1}, clamping to 0-600 range",
                self.drawing.fade_time
            );
            self.drawing.fade_time = if self.drawing.fade_time.is_nan() {
                0.0
            } else {
                self.drawing.fade_time.clamp(0.0, 600.0)
            };
        }

        if self.drawing.max_items > 2048 {
            log::warn!(
                "Invalid max_items {}, clamping to 0-2048 range",
                self.drawing.max_items
            );
            self.drawing.max_items = 2048;
        }

        let extension = self.storage.extension.trim().trim_start_matches('.');
        if extension.is_empty() || extension.contains(['/', '\\']) {
            log::warn!(
                "Invalid storage extension '{}', falling back to 'txt'",
                self.storage.extension
            );
            self.storage.extension = "txt".to_string();
        }
    }

    /// Stroke settings for the current frame.
    pub fn drawing_style(&self) -> DrawingStyle {
        DrawingStyle {
            width: self.drawing.width,
            color: self.drawing.color.to_color(),
            fade_time: self.drawing.fade_time,
            max_items: self.drawing.max_items,
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/bgdraw/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("bgdraw");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path, or returns defaults if it
    /// does not exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to `~/.config/bgdraw/config.toml`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory cannot be created
    /// - The config cannot be serialized to TOML
    /// - The file cannot be written
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Creates a default configuration file with documentation comments.
    ///
    /// Writes the example config from `config.example.toml` to the user's config
    /// directory and returns where it went.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A config file already exists at the target path
    /// - The config directory cannot be created
    /// - The file cannot be written
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        fs::write(&config_path, DEFAULT_CONFIG_TOML)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;

        info!("Created default config at {}", config_path.display());
        Ok(config_path)
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
