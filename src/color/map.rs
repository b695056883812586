// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ColorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lower-case `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parses `#rrggbb` or `rrggbb`.
    pub fn from_hex(value: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidHex { value: value.to_owned() };
        let digits = value.strip_prefix('#').unwrap_or(value);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Euclidean distance in RGB space.
    pub fn distance(self, other: Self) -> f64 {
        let d = |a: u8, b: u8| f64::from(a) - f64::from(b);
        (d(self.r, other.r).powi(2) + d(self.g, other.g).powi(2) + d(self.b, other.b).powi(2)).sqrt()
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(value: Rgb) -> Self {
        [value.r, value.g, value.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Maps a scalar to a color.
pub trait ColorMap: Send + Sync {
    fn color_at(&self, value: f64) -> Rgb;

    fn hex_at(&self, value: f64) -> String {
        self.color_at(value).to_hex()
    }
}

fn check_range(min: f64, max: f64) -> Result<(), ColorError> {
    // Also rejects NaN bounds.
    if min < max {
        Ok(())
    } else {
        Err(ColorError::InvalidRange { min, max })
    }
}

/// Linear `[min, max]` to `[0, 255]` on all channels, clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrayscaleColorMap {
    min: f64,
    max: f64,
}

impl GrayscaleColorMap {
    pub fn new(min: f64, max: f64) -> Result<Self, ColorError> {
        check_range(min, max)?;
        Ok(Self { min, max })
    }
}

impl ColorMap for GrayscaleColorMap {
    fn color_at(&self, value: f64) -> Rgb {
        let value = if value.is_nan() { self.min } else { value.clamp(self.min, self.max) };
        let normalized = (value - self.min) / (self.max - self.min);
        let level = (normalized * 255.0) as u8;
        Rgb::new(level, level, level)
    }
}

/// Piecewise-linear interpolation across an ordered list of palette stops.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedColorMap {
    colors: Vec<Rgb>,
    min: f64,
    max: f64,
}

impl InterpolatedColorMap {
    pub fn new(colors: Vec<Rgb>, min: f64, max: f64, reverse: bool) -> Result<Self, ColorError> {
        if colors.is_empty() {
            return Err(ColorError::EmptyPalette);
        }
        check_range(min, max)?;
        let mut colors = colors;
        if reverse {
            colors.reverse();
        }
        Ok(Self { colors, min, max })
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

impl ColorMap for InterpolatedColorMap {
    fn color_at(&self, value: f64) -> Rgb {
        let first = self.colors[0];
        let last = self.colors[self.colors.len() - 1];
        if value.is_nan() || value <= self.min {
            return first;
        }
        if value >= self.max {
            return last;
        }

        let normalized = (value - self.min) / (self.max - self.min);
        let position = normalized * (self.colors.len() - 1) as f64;
        let lower_idx = position as usize;
        let upper_idx = (lower_idx + 1).min(self.colors.len() - 1);
        let t = position - lower_idx as f64;

        let lower = self.colors[lower_idx];
        let upper = self.colors[upper_idx];
        let mix = |a: u8, b: u8| (f64::from(a) * (1.0 - t) + f64::from(b) * t) as u8;
        Rgb::new(mix(lower.r, upper.r), mix(lower.g, upper.g), mix(lower.b, upper.b))
    }
}
