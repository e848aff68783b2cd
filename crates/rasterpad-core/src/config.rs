//! Application configuration.

use crate::color::Rgba8;
use crate::tools::{ToolKind, ToolSettings};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration.
///
/// Every field has a default, so a configuration file only needs to list
/// the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Canvas background, also painted by the eraser and by clear.
    pub background: Rgba8,
    /// Tool selected at startup.
    pub tool: ToolKind,
    /// Drawing color at startup.
    pub color: Rgba8,
    /// Stroke width at startup.
    pub brush_width: f64,
    /// Fill flag at startup.
    pub fill: bool,
    /// JPEG export quality (1-100).
    pub jpeg_quality: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Rgba8::WHITE,
            tool: ToolKind::Brush,
            color: Rgba8::BLACK,
            brush_width: ToolSettings::DEFAULT_WIDTH,
            fill: false,
            jpeg_quality: 90,
        }
    }
}

impl AppConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.brush_width.is_finite() && self.brush_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "brush_width must be positive, got {}",
                self.brush_width
            )));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::Invalid(format!(
                "jpeg_quality must be within 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }

    /// Initial tool settings.
    pub fn tool_settings(&self) -> ToolSettings {
        ToolSettings {
            tool: self.tool,
            color: self.color,
            width: self.brush_width,
            fill: self.fill,
        }
    }
}
