//! Configuration and settings management for StitchKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in platform-specific directories.
//!
//! Configuration is organized into logical sections:
//! - Stitch settings (pitch, canvas-to-physical scale)
//! - Canvas settings (extent, cursor steps)
//! - Connection settings (port, baud rate, timing)
//! - File settings (output directory)
//!
//! Missing sections and keys fall back to their defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use stitchkit_core::{ScaleConfig, MIN_STITCH_PITCH_MM};

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Directory name under the platform config directory
pub const APP_DIR_NAME: &str = "stitchkit";

/// Default config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Stitch geometry settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StitchSettings {
    /// Distance between stitches in mm
    pub pitch_mm: f64,
    /// Canvas pixels per physical mm
    pub pixels_per_mm: f64,
}

impl Default for StitchSettings {
    fn default() -> Self {
        let scale = ScaleConfig::default();
        Self {
            pitch_mm: scale.pitch_mm,
            pixels_per_mm: scale.pixels_per_mm,
        }
    }
}

impl StitchSettings {
    pub fn scale(&self) -> ScaleConfig {
        ScaleConfig::new(self.pitch_mm, self.pixels_per_mm)
    }
}

/// Drawing canvas settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub width_px: f64,
    pub height_px: f64,
    /// Cursor movement per key press
    pub cursor_step_px: f64,
    /// Step multiplier while a direction key is held
    pub fast_step_multiplier: f64,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width_px: 800.0,
            height_px: 800.0,
            cursor_step_px: 1.0,
            fast_step_multiplier: 5.0,
        }
    }
}

/// Controller connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// Serial port name
    pub port: String,
    /// Baud rate for serial connections
    pub baud_rate: u32,
    /// Read/write timeout in milliseconds
    pub timeout_ms: u64,
    /// Wait after opening the port while the controller resets
    pub settle_delay_ms: u64,
    /// Pause between stitch commands
    pub command_delay_ms: u64,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            port: "COM3".to_string(),
            baud_rate: 115200,
            timeout_ms: 1000,
            settle_delay_ms: 2000,
            command_delay_ms: 100,
        }
    }
}

/// Pattern file settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    /// Where single-pattern files are saved
    pub output_directory: PathBuf,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("."),
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub stitch: StitchSettings,
    pub canvas: CanvasSettings,
    pub connection: ConnectionSettings,
    pub files: FileSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> ConfigResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        Some(other) => Err(ConfigError::UnsupportedFormat(other.to_string())),
        None => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Platform config directory for StitchKit (e.g. `~/.config/stitchkit`).
pub fn config_dir() -> ConfigResult<PathBuf> {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| {
            ConfigError::UnsupportedPlatform("no config or home directory".to_string())
        })
}

/// Default config file location.
pub fn default_config_path() -> ConfigResult<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, content)?;

        tracing::info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Load `path` if given, else the default config file if it exists,
    /// else the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        match default_config_path() {
            Ok(default_path) if default_path.is_file() => Self::load_from_file(&default_path),
            Ok(_) => Ok(Self::default()),
            Err(e) => {
                tracing::debug!("No config directory ({}), using defaults", e);
                Ok(Self::default())
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let positive = |key: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::invalid(key, format!("must be > 0, got {}", value)))
            }
        };

        positive("stitch.pitch_mm", self.stitch.pitch_mm)?;
        if self.stitch.pitch_mm < MIN_STITCH_PITCH_MM {
            return Err(SettingsError::invalid(
                "stitch.pitch_mm",
                format!(
                    "must be at least {} mm, got {}",
                    MIN_STITCH_PITCH_MM, self.stitch.pitch_mm
                ),
            ));
        }
        positive("stitch.pixels_per_mm", self.stitch.pixels_per_mm)?;
        positive("canvas.width_px", self.canvas.width_px)?;
        positive("canvas.height_px", self.canvas.height_px)?;
        positive("canvas.cursor_step_px", self.canvas.cursor_step_px)?;
        positive("canvas.fast_step_multiplier", self.canvas.fast_step_multiplier)?;

        if self.connection.port.trim().is_empty() {
            return Err(SettingsError::invalid("connection.port", "must not be empty"));
        }
        if self.connection.baud_rate == 0 {
            return Err(SettingsError::invalid("connection.baud_rate", "must be > 0"));
        }
        if self.connection.timeout_ms == 0 {
            return Err(SettingsError::invalid("connection.timeout_ms", "must be > 0"));
        }

        Ok(())
    }

    /// Stitch pitch and canvas scale
    pub fn scale(&self) -> ScaleConfig {
        self.stitch.scale()
    }
}
