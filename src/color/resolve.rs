// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::map::ColorMap;
use super::palette::{default_colormap_name, get_colormap};
use super::ColorError;
use crate::model::{NodeSnapshot, TrialStatus};

/// A resolved value-to-hex function shared by every renderer.
pub type ColorFn = Arc<dyn Fn(f64) -> String + Send + Sync>;

pub const RUNNING_COLOR: &str = "#C277DC";
pub const INVALID_COLOR: &str = "#76502E";
/// Neutral color for the root and for nodes without a real score.
pub const ROOT_COLOR: &str = "#AAAAAA";

const PALETTE_REVERSE_SUFFIX: &str = "_r";

/// What the caller asked to color scores with.
#[derive(Clone, Default)]
pub enum ColorSpec {
    /// The bundled default palette.
    #[default]
    Default,
    Named { name: String, reverse: bool },
    Map(Arc<dyn ColorMap>),
    Func(ColorFn),
}

impl ColorSpec {
    /// Palette by name; a trailing `_r` selects the reversed palette.
    pub fn named(name: &str) -> Self {
        match name.strip_suffix(PALETTE_REVERSE_SUFFIX) {
            Some(base) if !base.is_empty() => Self::Named { name: base.to_owned(), reverse: true },
            _ => Self::Named { name: name.to_owned(), reverse: false },
        }
    }

    pub fn map(map: impl ColorMap + 'static) -> Self {
        Self::Map(Arc::new(map))
    }

    pub fn func(f: impl Fn(f64) -> String + Send + Sync + 'static) -> Self {
        Self::Func(Arc::new(f))
    }
}

impl fmt::Debug for ColorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Named { name, reverse } => {
                f.debug_struct("Named").field("name", name).field("reverse", reverse).finish()
            }
            Self::Map(_) => f.write_str("Map(..)"),
            Self::Func(_) => f.write_str("Func(..)"),
        }
    }
}

impl FromStr for ColorSpec {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ColorError::InvalidSpec { reason: "colormap name must not be empty".into() });
        }
        Ok(Self::named(trimmed))
    }
}

/// The score interval colors are resolved over.
///
/// Built from the real scores of a snapshot: negative sentinels and NaN are excluded, an empty set
/// falls back to `[0, 1]`, and a single distinct value is widened by `0.5` on both sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRange {
    min: f64,
    max: f64,
    degenerate: bool,
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0, degenerate: false }
    }
}

impl ScoreRange {
    pub fn new(min: f64, max: f64) -> Result<Self, ColorError> {
        if min < max {
            Ok(Self { min, max, degenerate: false })
        } else {
            Err(ColorError::InvalidRange { min, max })
        }
    }

    pub fn from_scores(scores: impl IntoIterator<Item = f64>) -> Self {
        let mut bounds: Option<(f64, f64)> = None;
        for score in scores.into_iter().filter(|s| s.is_finite() && *s >= 0.0) {
            bounds = Some(match bounds {
                None => (score, score),
                Some((lo, hi)) => (lo.min(score), hi.max(score)),
            });
        }
        match bounds {
            None => Self::default(),
            Some((lo, hi)) if lo == hi => Self { min: lo - 0.5, max: hi + 0.5, degenerate: true },
            Some((lo, hi)) => Self { min: lo, max: hi, degenerate: false },
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// True when every real score was equal and the range had to be widened.
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// `count` evenly spaced values from `min` to `max`; a degenerate range repeats its midpoint.
    pub fn samples(&self, count: usize) -> Vec<f64> {
        if self.degenerate || count < 2 {
            let mid = (self.min + self.max) / 2.0;
            let value = if self.degenerate { mid } else { self.min };
            return vec![value; count];
        }
        let span = self.max - self.min;
        (0..count).map(|i| self.min + span * (i as f64 / (count - 1) as f64)).collect()
    }
}

/// Turns a [`ColorSpec`] into a value-to-hex function over `range`.
pub fn resolve_colormap(spec: &ColorSpec, range: ScoreRange) -> Result<ColorFn, ColorError> {
    match spec {
        ColorSpec::Default => {
            let cmap = get_colormap(default_colormap_name()?, range.min, range.max, false)?;
            Ok(Arc::new(move |value| cmap.hex_at(value)))
        }
        ColorSpec::Named { name, reverse } => {
            let cmap = get_colormap(name, range.min, range.max, *reverse)?;
            Ok(Arc::new(move |value| cmap.hex_at(value)))
        }
        ColorSpec::Map(map) => {
            let map = Arc::clone(map);
            Ok(Arc::new(move |value| map.hex_at(value)))
        }
        ColorSpec::Func(f) => Ok(Arc::clone(f)),
    }
}

/// Final override layer: running, invalid and root nodes get fixed colors.
pub fn apply_status_color(status: Option<&TrialStatus>, default_color: &str) -> String {
    match status {
        Some(TrialStatus::Running) => RUNNING_COLOR.to_owned(),
        Some(TrialStatus::Invalid) => INVALID_COLOR.to_owned(),
        Some(TrialStatus::Root) => ROOT_COLOR.to_owned(),
        _ => default_color.to_owned(),
    }
}

/// Fill color of a node: palette color for real scores, neutral otherwise, then status override.
pub fn node_fill_color(node: &NodeSnapshot, color_fn: &ColorFn) -> String {
    if node.has_real_score() {
        apply_status_color(node.status.as_ref(), &color_fn(node.score))
    } else {
        apply_status_color(node.status.as_ref(), ROOT_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        apply_status_color, resolve_colormap, ColorSpec, ScoreRange, INVALID_COLOR, ROOT_COLOR,
        RUNNING_COLOR,
    };
    use crate::color::{get_colormap, ColorError, ColorMap, GrayscaleColorMap};
    use crate::model::TrialStatus;
    use rstest::rstest;

    #[rstest]
    #[case("viridis", "viridis", false)]
    #[case("viridis_r", "viridis", true)]
    #[case("_r", "_r", false)]
    fn names_parse_reverse_suffix(#[case] raw: &str, #[case] name: &str, #[case] reverse: bool) {
        match raw.parse::<ColorSpec>().expect("spec") {
            ColorSpec::Named { name: parsed, reverse: parsed_reverse } => {
                assert_eq!(parsed, name);
                assert_eq!(parsed_reverse, reverse);
            }
            other => panic!("unexpected spec: {other:?}"),
        }
    }

    #[test]
    fn empty_spec_string_is_rejected() {
        assert!(matches!("  ".parse::<ColorSpec>(), Err(ColorError::InvalidSpec { .. })));
    }

    #[test]
    fn score_range_excludes_sentinels_and_widens_degenerate_sets() {
        let range = ScoreRange::from_scores([-1.0, 0.3, 0.9, f64::NAN]);
        assert_eq!((range.min(), range.max(), range.is_degenerate()), (0.3, 0.9, false));

        let flat = ScoreRange::from_scores([-1.0, 0.4, 0.4]);
        assert!(flat.is_degenerate());
        assert!(flat.min() < flat.max());
        let samples = flat.samples(100);
        assert_eq!(samples.len(), 100);
        assert!(samples.iter().all(|s| (s - 0.4).abs() < 1e-9));

        assert_eq!(ScoreRange::from_scores([-1.0]), ScoreRange::default());
    }

    #[test]
    fn samples_span_the_range_evenly() {
        let samples = ScoreRange::new(0.0, 1.0).expect("range").samples(5);
        assert_eq!(samples, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn every_spec_kind_resolves_to_hex() {
        let range = ScoreRange::new(0.0, 100.0).expect("range");

        let named = resolve_colormap(&ColorSpec::named("viridis"), range).expect("named");
        assert_eq!(named(50.0), "#21918c");

        let reversed = resolve_colormap(&ColorSpec::named("viridis_r"), range).expect("reversed");
        assert_eq!(reversed(0.0), "#fde725");

        let map = resolve_colormap(&ColorSpec::map(GrayscaleColorMap::new(0.0, 1.0).expect("g")), range)
            .expect("map");
        assert_eq!(map(1.0), "#ffffff");

        let func = resolve_colormap(
            &ColorSpec::func(|v| if v > 0.5 { "#ff0000".into() } else { "#0000ff".into() }),
            range,
        )
        .expect("func");
        assert_eq!(func(0.7), "#ff0000");

        let default = resolve_colormap(&ColorSpec::Default, range).expect("default");
        let classic = get_colormap("classic", 0.0, 100.0, false).expect("classic");
        assert_eq!(default(25.0), classic.hex_at(25.0));
    }

    #[test]
    fn unknown_names_surface_at_resolution() {
        let range = ScoreRange::default();
        assert!(matches!(
            resolve_colormap(&ColorSpec::named("nope"), range),
            Err(ColorError::UnknownColormap { .. })
        ));
    }

    #[test]
    fn palette_interpolation_is_smooth() {
        let range = ScoreRange::new(0.0, 100.0).expect("range");
        let cmap = get_colormap("viridis", range.min(), range.max(), false).expect("viridis");
        let colors: Vec<_> = (0..=100).map(|i| cmap.color_at(f64::from(i))).collect();
        for pair in colors.windows(2) {
            assert!(pair[0].distance(pair[1]) < 12.0, "{:?} -> {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn status_overrides_computed_color() {
        assert_eq!(apply_status_color(Some(&TrialStatus::Running), "#000000"), RUNNING_COLOR);
        assert_eq!(apply_status_color(Some(&TrialStatus::Invalid), "#000000"), INVALID_COLOR);
        assert_eq!(apply_status_color(Some(&TrialStatus::Root), "#000000"), ROOT_COLOR);
        assert_eq!(apply_status_color(Some(&TrialStatus::Complete), "#000000"), "#000000");
        assert_eq!(apply_status_color(None, "#123456"), "#123456");
    }
}
