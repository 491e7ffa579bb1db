// src/color.rs

//! Defines color-related enums (`NamedColor`, `Color`) used by the
//! configuration and by render commands handed to drivers.

use serde::{Deserialize, Serialize};

/// The handful of named colors the grid surface needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedColor {
    Black,
    White,
    Grey,
}

impl NamedColor {
    /// Returns the `Color::Rgb` representation of this named color.
    pub fn to_rgb_color(&self) -> Color {
        match self {
            NamedColor::Black => Color::Rgb(0, 0, 0),
            NamedColor::White => Color::Rgb(255, 255, 255),
            NamedColor::Grey => Color::Rgb(128, 128, 128),
        }
    }
}

/// Represents a concrete color value handed to a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// A named color from the fixed palette.
    Named(NamedColor),
    /// An RGB true color, with each component from 0 to 255.
    Rgb(u8, u8, u8),
}

impl Color {
    /// Resolves the color to raw RGB components.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        match *self {
            Color::Named(named) => match named.to_rgb_color() {
                Color::Rgb(r, g, b) => (r, g, b),
                // to_rgb_color only ever returns Rgb
                Color::Named(_) => unreachable!(),
            },
            Color::Rgb(r, g, b) => (r, g, b),
        }
    }

    /// Approximate perceived brightness (0-255), used by raster drivers that
    /// reduce colors to an on/off display.
    pub fn luminance(&self) -> u8 {
        let (r, g, b) = self.to_rgb();
        ((r as u16 * 2 + g as u16 * 5 + b as u16) / 8) as u8
    }
}
