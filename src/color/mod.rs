// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Score-to-color mapping.
//!
//! Renderers compute a [`ScoreRange`] from a snapshot, resolve a [`ColorSpec`] over it once, and
//! then color every node through [`node_fill_color`].

mod map;
mod palette;
mod resolve;

pub use map::{ColorMap, GrayscaleColorMap, InterpolatedColorMap, Rgb};
pub use palette::{default_colormap_name, get_colormap, list_colormap_names, palette};
pub use resolve::{
    apply_status_color, node_fill_color, resolve_colormap, ColorFn, ColorSpec, ScoreRange,
    INVALID_COLOR, ROOT_COLOR, RUNNING_COLOR,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    #[error("min_value ({min}) must be less than max_value ({max})")]
    InvalidRange { min: f64, max: f64 },
    #[error("color data must not be empty")]
    EmptyPalette,
    #[error("colormap '{name}' not found; available colormaps: {}", .available.join(", "))]
    UnknownColormap { name: String, available: Vec<String> },
    #[error("colormap table could not be loaded: {message}")]
    PaletteTable { message: String },
    #[error("invalid hex color '{value}'")]
    InvalidHex { value: String },
    #[error("invalid color spec: {reason}")]
    InvalidSpec { reason: String },
}
