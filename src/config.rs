// src/config.rs

//! Defines the configuration structures for the grid surface and the
//! number encoding.
//!
//! This module provides a set of structs that can be deserialized from a
//! JSON configuration file to customize the grid's dimensions, appearance,
//! and scale factor. Default values match the original fixed layout: a
//! 106 x 17 grid with 2px grey separator lines and a scale factor of 17.
//!
//! Per the single-writer design, the configuration is threaded explicitly
//! through constructors; there is no process-wide global.

use serde::{Deserialize, Serialize};

use crate::color::{Color, NamedColor};
use log::{info, warn};

// --- Top-Level Configuration Structure ---

/// Represents the complete configuration for the application.
///
/// This struct is the root of the configuration and is intended to be
/// deserialized from a configuration file. It groups settings into logical
/// categories.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)] // Apply default values for the entire struct if a field is missing.
pub struct Config {
    /// Grid layout and color settings.
    pub appearance: AppearanceConfig,
    /// Number encoding settings.
    pub encoding: EncodingConfig,
}

impl Config {
    /// Loads configuration from the file named by the `BITPLOT_CONFIG`
    /// environment variable, falling back to defaults when the variable is
    /// unset or the file is unreadable or invalid.
    pub fn load_or_default() -> Self {
        let Some(path) = std::env::var_os("BITPLOT_CONFIG") else {
            return Self::default();
        };
        let path = std::path::PathBuf::from(path);
        let config: Config = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Ignoring malformed config {}: {}", path.display(), e);
                    return Self::default();
                }
            },
            Err(e) => {
                warn!("Could not read config {}: {}", path.display(), e);
                return Self::default();
            }
        };
        if !config.is_valid() {
            warn!(
                "Config {} has degenerate dimensions or scale; using defaults",
                path.display()
            );
            return Self::default();
        }
        info!("Loaded configuration from {}", path.display());
        config
    }

    /// A configuration is usable when the grid has at least one cell, the
    /// separator thickness is non-negative, and the scale factor is non-zero.
    pub fn is_valid(&self) -> bool {
        self.appearance.columns > 0
            && self.appearance.rows > 0
            && self.appearance.line_thickness >= 0.0
            && self.encoding.scale_factor > 0
    }
}

// --- Appearance Configuration ---

/// Defines the grid's layout and colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Number of cell columns in the grid.
    pub columns: usize,
    /// Number of cell rows in the grid.
    pub rows: usize,
    /// Thickness of the grid's separator lines in pixels.
    pub line_thickness: f64,
    /// Color of the separator lines.
    pub grid_color: Color,
    /// Fill color of an active cell.
    pub active_color: Color,
    /// Fill color of an inactive cell.
    pub inactive_color: Color,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        AppearanceConfig {
            columns: 106,
            rows: 17,
            line_thickness: 2.0,
            grid_color: Color::Named(NamedColor::Grey),
            active_color: Color::Named(NamedColor::White),
            inactive_color: Color::Named(NamedColor::Black),
        }
    }
}

// --- Encoding Configuration ---

/// Defines how the grid's bit pattern relates to the displayed number.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    /// Multiplier relating the externally displayed decimal number to the
    /// grid's raw encoded integer. Imports must be divisible by it. Matches
    /// the grid's row count in the default layout.
    pub scale_factor: u32,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        EncodingConfig { scale_factor: 17 }
    }
}
