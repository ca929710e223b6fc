//! StitchKit Settings Crate
//!
//! Stitch geometry, canvas, connection and file settings, loaded from and
//! saved to JSON or TOML files in the platform config directory.

pub mod config;
pub mod error;

pub use config::{CanvasSettings, Config, ConnectionSettings, FileSettings, StitchSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
