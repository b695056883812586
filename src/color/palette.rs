// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Bundled named-palette table.
//!
//! The table ships inside the binary and is parsed once, on first use. A parse failure is cached
//! too, so every later lookup fails with the same error.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Deserialize;

use super::map::{InterpolatedColorMap, Rgb};
use super::ColorError;

const BUNDLED_PALETTES: &str = include_str!("../../assets/colormaps.json");

static PALETTES: OnceLock<Result<PaletteTable, ColorError>> = OnceLock::new();

#[derive(Debug, Deserialize)]
struct PaletteFile {
    default: String,
    colormaps: BTreeMap<String, PaletteEntry>,
}

#[derive(Debug, Deserialize)]
struct PaletteEntry {
    colors: Vec<Rgb>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PaletteTable {
    default: String,
    colormaps: BTreeMap<String, Vec<Rgb>>,
}

impl PaletteTable {
    pub(crate) fn parse(raw: &str) -> Result<Self, ColorError> {
        let file: PaletteFile = serde_json::from_str(raw)
            .map_err(|err| ColorError::PaletteTable { message: err.to_string() })?;

        let mut colormaps = BTreeMap::new();
        for (name, entry) in file.colormaps {
            if entry.colors.is_empty() {
                return Err(ColorError::PaletteTable {
                    message: format!("palette '{name}' has no colors"),
                });
            }
            colormaps.insert(name, entry.colors);
        }
        if !colormaps.contains_key(&file.default) {
            return Err(ColorError::PaletteTable {
                message: format!("default palette '{}' is not defined", file.default),
            });
        }
        Ok(Self { default: file.default, colormaps })
    }

    pub(crate) fn names(&self) -> Vec<String> {
        self.colormaps.keys().cloned().collect()
    }

    pub(crate) fn get(&self, name: &str) -> Result<&[Rgb], ColorError> {
        self.colormaps.get(name).map(Vec::as_slice).ok_or_else(|| ColorError::UnknownColormap {
            name: name.to_owned(),
            available: self.names(),
        })
    }
}

fn table() -> Result<&'static PaletteTable, ColorError> {
    PALETTES.get_or_init(|| PaletteTable::parse(BUNDLED_PALETTES)).as_ref().map_err(Clone::clone)
}

/// Sorted names of every bundled palette.
pub fn list_colormap_names() -> Result<Vec<String>, ColorError> {
    Ok(table()?.names())
}

pub fn default_colormap_name() -> Result<&'static str, ColorError> {
    Ok(table()?.default.as_str())
}

pub fn palette(name: &str) -> Result<&'static [Rgb], ColorError> {
    table()?.get(name)
}

/// Builds an interpolated colormap from a bundled palette.
pub fn get_colormap(
    name: &str,
    min: f64,
    max: f64,
    reverse: bool,
) -> Result<InterpolatedColorMap, ColorError> {
    InterpolatedColorMap::new(palette(name)?.to_vec(), min, max, reverse)
}
