// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The render facade: from a search state (or a prebuilt snapshot) to an artifact on disk.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt::{self, Debug};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::VisError;
use crate::model::{Annotations, SearchState, VisualizationSnapshot};
use crate::render::{
    dump_snapshot, render_graphviz, render_html, render_mermaid, DumpFormat, GraphvizFormat,
    MermaidFormat, RenderOptions,
};
use crate::snapshot::{
    build_snapshot, build_snapshot_with, FormatterChain, SnapshotOptions, StateFormatter,
};

/// Every format string [`render`] accepts (case-insensitively).
pub const SUPPORTED_FORMATS: [&str; 14] = [
    "png", "pdf", "svg", "jpg", "jpeg", "dot", "gv", "json", "yaml", "yml", "mermaid", "md",
    "markdown", "html",
];

/// Prefix of the file name generated when the output path is a directory.
pub const GENERATED_BASENAME_PREFIX: &str = "dryad_";

const MIN_SUGGESTION_SIMILARITY: f64 = 0.6;

/// A parsed output format, grouped by the backend family that produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Graphviz(GraphvizFormat),
    Mermaid(MermaidFormat),
    Dump(DumpFormat),
    Html,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Graphviz(format) => format.extension(),
            Self::Mermaid(MermaidFormat::Mermaid) => "mermaid",
            Self::Mermaid(MermaidFormat::Md) => "md",
            Self::Mermaid(MermaidFormat::Markdown) => "markdown",
            Self::Dump(format) => format.extension(),
            Self::Html => "html",
        }
    }

    /// File extension of the written artifact.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Graphviz(format) => format.extension(),
            Self::Mermaid(format) => format.extension(),
            Self::Dump(format) => format.extension(),
            Self::Html => "html",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = VisError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        let format = match normalized.as_str() {
            "png" => Self::Graphviz(GraphvizFormat::Png),
            "pdf" => Self::Graphviz(GraphvizFormat::Pdf),
            "svg" => Self::Graphviz(GraphvizFormat::Svg),
            "jpg" => Self::Graphviz(GraphvizFormat::Jpg),
            "jpeg" => Self::Graphviz(GraphvizFormat::Jpeg),
            "dot" => Self::Graphviz(GraphvizFormat::Dot),
            "gv" => Self::Graphviz(GraphvizFormat::Gv),
            "json" => Self::Dump(DumpFormat::Json),
            "yaml" => Self::Dump(DumpFormat::Yaml),
            "yml" => Self::Dump(DumpFormat::Yml),
            "mermaid" => Self::Mermaid(MermaidFormat::Mermaid),
            "md" => Self::Mermaid(MermaidFormat::Md),
            "markdown" => Self::Mermaid(MermaidFormat::Markdown),
            "html" => Self::Html,
            _ => {
                return Err(VisError::UnsupportedFormat {
                    format: raw.to_owned(),
                    supported: SUPPORTED_FORMATS.to_vec(),
                    suggestion: closest_format(&normalized),
                })
            }
        };
        Ok(format)
    }
}

fn closest_format(needle: &str) -> Option<&'static str> {
    if needle.is_empty() {
        return None;
    }
    SUPPORTED_FORMATS
        .iter()
        .map(|candidate| (*candidate, rapidfuzz::fuzz::ratio(needle.chars(), candidate.chars())))
        .filter(|(_, ratio)| *ratio >= MIN_SUGGESTION_SIMILARITY)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate)
}

/// Anything [`render`] can turn into a snapshot.
pub trait RenderInput {
    /// The snapshot to render. `annotations` only apply when a snapshot is built here.
    fn to_snapshot(
        &self,
        annotations: Option<&Annotations>,
    ) -> Result<Cow<'_, VisualizationSnapshot>, VisError>;
}

impl RenderInput for VisualizationSnapshot {
    fn to_snapshot(
        &self,
        _annotations: Option<&Annotations>,
    ) -> Result<Cow<'_, VisualizationSnapshot>, VisError> {
        Ok(Cow::Borrowed(self))
    }
}

impl<St> RenderInput for St
where
    St: SearchState,
    St::Payload: Serialize + Debug,
{
    fn to_snapshot(
        &self,
        annotations: Option<&Annotations>,
    ) -> Result<Cow<'_, VisualizationSnapshot>, VisError> {
        let options = SnapshotOptions { annotations, ..SnapshotOptions::default() };
        build_snapshot(self, &options).map(Cow::Owned)
    }
}

/// A search state paired with a caller-supplied payload formatter.
///
/// When the formatter fails on a node, the payload's `Debug` text is used before the
/// placeholder. Payloads without `Debug` go through [`build_snapshot_with`] and are rendered as a
/// prebuilt snapshot.
pub struct FormattedState<'a, St: ?Sized, F: ?Sized> {
    state: &'a St,
    formatter: &'a F,
}

impl<'a, St: ?Sized, F: ?Sized> FormattedState<'a, St, F> {
    pub fn new(state: &'a St, formatter: &'a F) -> Self {
        Self { state, formatter }
    }
}

impl<'a, St, F> RenderInput for FormattedState<'a, St, F>
where
    St: SearchState + ?Sized,
    St::Payload: Debug,
    F: StateFormatter<St::Payload>,
{
    fn to_snapshot(
        &self,
        annotations: Option<&Annotations>,
    ) -> Result<Cow<'_, VisualizationSnapshot>, VisError> {
        let options = SnapshotOptions { annotations, ..SnapshotOptions::default() };
        let chain = FormatterChain::custom(self.formatter);
        build_snapshot_with(self.state, &chain, &options).map(Cow::Owned)
    }
}

/// An existing directory gets a timestamped basename inside it; anything else is used verbatim.
pub fn resolve_output_path(output_basename: &Path) -> PathBuf {
    if !output_basename.is_dir() {
        return output_basename.to_path_buf();
    }
    let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let generated = output_basename.join(format!("{GENERATED_BASENAME_PREFIX}{stamp}"));
    warn!(
        path = %generated.display(),
        "output path is a directory; generated a timestamped basename (renders within the same second overwrite each other)"
    );
    generated
}

/// Renders `input` as `format` to `<output_basename>.<ext>` and returns the written path.
pub fn render<I>(
    input: &I,
    output_basename: impl AsRef<Path>,
    format: &str,
    options: &RenderOptions,
) -> Result<PathBuf, VisError>
where
    I: RenderInput + ?Sized,
{
    let format: OutputFormat = format.parse()?;
    let snapshot = input.to_snapshot(options.annotations.as_ref())?;
    let basename = resolve_output_path(output_basename.as_ref());
    render_snapshot(&snapshot, &basename, format, options)
}

/// Dispatches one already-parsed format to its backend.
pub fn render_snapshot(
    snapshot: &VisualizationSnapshot,
    basename: &Path,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<PathBuf, VisError> {
    debug!(format = %format, basename = %basename.display(), "rendering snapshot");
    match format {
        OutputFormat::Graphviz(format) => {
            render_graphviz(snapshot, basename, format, &options.graphviz, &options.color_map)
        }
        OutputFormat::Mermaid(format) => {
            render_mermaid(snapshot, basename, format, &options.mermaid, &options.color_map)
        }
        OutputFormat::Dump(format) => dump_snapshot(snapshot, basename, format, &options.dump),
        OutputFormat::Html => render_html(snapshot, basename, &options.html, &options.color_map),
    }
}

/// Renders several formats of one snapshot. All format strings are validated before anything is
/// written; formats that would write the same file are rendered once.
///
/// This is the one operation that fans out: the backends run on the rayon pool, each over the
/// shared immutable snapshot and each single-threaded. [`render`] never spawns work.
pub fn render_formats<I>(
    input: &I,
    output_basename: impl AsRef<Path>,
    formats: &[&str],
    options: &RenderOptions,
) -> Result<Vec<PathBuf>, VisError>
where
    I: RenderInput + ?Sized,
{
    let parsed = formats.iter().map(|raw| raw.parse()).collect::<Result<Vec<OutputFormat>, _>>()?;
    let mut extensions = HashSet::new();
    let unique: Vec<OutputFormat> =
        parsed.into_iter().filter(|format| extensions.insert(format.extension())).collect();

    let snapshot = input.to_snapshot(options.annotations.as_ref())?;
    let basename = resolve_output_path(output_basename.as_ref());
    unique
        .par_iter()
        .map(|format| render_snapshot(&snapshot, &basename, *format, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{
        closest_format, render, resolve_output_path, FormattedState, OutputFormat, RenderInput,
        GENERATED_BASENAME_PREFIX, SUPPORTED_FORMATS,
    };
    use crate::error::{ErrorKind, VisError};
    use crate::model::{AlgoDiagnostics, NodeId, Tree, TreeState};
    use crate::render::{DumpFormat, GraphvizFormat, MermaidFormat, RenderOptions};
    use crate::snapshot::{FormatError, StateFormatter, UNFORMATTABLE_STATE};

    /// Refuses payloads ending in `b`.
    struct RefusesB;

    impl StateFormatter<String> for RefusesB {
        fn format_state(&self, state: &String) -> Result<String, FormatError> {
            if state.ends_with('b') {
                return Err(FormatError::custom("cannot format drafts ending in b"));
            }
            Ok(state.to_uppercase())
        }
    }

    fn drafts() -> TreeState<String> {
        let mut tree = Tree::with_root();
        tree.add_node(NodeId::ROOT, "draft a".to_owned(), 0.3).expect("a");
        tree.add_node(NodeId::ROOT, "draft b".to_owned(), 0.9).expect("b");
        TreeState::new(tree, AlgoDiagnostics::None)
    }

    #[rstest]
    #[case("PNG", OutputFormat::Graphviz(GraphvizFormat::Png))]
    #[case(" jpeg ", OutputFormat::Graphviz(GraphvizFormat::Jpeg))]
    #[case("Yml", OutputFormat::Dump(DumpFormat::Yml))]
    #[case("markdown", OutputFormat::Mermaid(MermaidFormat::Markdown))]
    #[case("HTML", OutputFormat::Html)]
    fn formats_parse_case_insensitively(#[case] raw: &str, #[case] expected: OutputFormat) {
        assert_eq!(raw.parse::<OutputFormat>().expect("format"), expected);
    }

    #[test]
    fn every_supported_format_round_trips_through_its_name() {
        for name in SUPPORTED_FORMATS {
            let format: OutputFormat = name.parse().expect("supported");
            assert_eq!(format.as_str(), name);
        }
    }

    #[test]
    fn unknown_format_lists_every_supported_value() {
        let err = "bmp".parse::<OutputFormat>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        let message = err.to_string();
        for name in SUPPORTED_FORMATS {
            assert!(message.contains(name), "{name} missing from: {message}");
        }
    }

    #[rstest]
    #[case("jsn", Some("json"))]
    #[case("pnj", Some("png"))]
    #[case("htm", Some("html"))]
    #[case("zzzzzz", None)]
    #[case("", None)]
    fn suggestions_pick_the_closest_format(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(closest_format(raw), expected);
    }

    #[test]
    fn suggestion_is_part_of_the_error() {
        let err = "JSNO".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, VisError::UnsupportedFormat { suggestion: Some("json"), .. }));
        assert!(err.to_string().contains("did you mean 'json'?"));
    }

    #[test]
    fn directories_get_a_timestamped_basename() {
        let dir = tempfile::tempdir().expect("tempdir");
        let resolved = resolve_output_path(dir.path());
        assert_eq!(resolved.parent(), Some(dir.path()));
        let name = resolved.file_name().and_then(|n| n.to_str()).expect("name");
        assert!(name.starts_with(GENERATED_BASENAME_PREFIX));
        assert_eq!(name.len(), GENERATED_BASENAME_PREFIX.len() + "YYYYmmdd_HHMMSS".len());

        let file = dir.path().join("run");
        assert_eq!(resolve_output_path(&file), file);
    }

    #[test]
    fn failing_caller_formatter_falls_back_to_debug_text() {
        let state = drafts();
        let input = FormattedState::new(&state, &RefusesB);
        let snapshot = input.to_snapshot(None).expect("snapshot");

        assert_eq!(snapshot.node(NodeId::new(0)).expect("a").state_repr, "DRAFT A");
        let b = &snapshot.node(NodeId::new(1)).expect("b").state_repr;
        assert_eq!(b, "\"draft b\"");
        assert_ne!(b, UNFORMATTABLE_STATE);
    }

    #[test]
    fn rendered_dump_keeps_the_fallback_text() {
        let dir = tempfile::tempdir().expect("tempdir");
        let state = drafts();
        let path = render(
            &FormattedState::new(&state, &RefusesB),
            dir.path().join("drafts"),
            "json",
            &RenderOptions::default(),
        )
        .expect("render");

        let dump: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).expect("read")).expect("json");
        let reprs: Vec<&str> = dump["nodes"]
            .as_array()
            .expect("nodes")
            .iter()
            .filter_map(|node| node["state_repr"].as_str())
            .collect();
        assert!(reprs.contains(&"\"draft b\""), "{reprs:?}");
    }

    #[test]
    fn unsupported_format_fails_before_touching_the_input() {
        let dir = tempfile::tempdir().expect("tempdir");
        let snapshot = crate::render::test_utils::sample_snapshot();
        let err = render(&snapshot, dir.path().join("x"), "tiff", &RenderOptions::default())
            .unwrap_err();
        assert!(matches!(err, VisError::UnsupportedFormat { .. }));
        assert_eq!(std::fs::read_dir(dir.path()).expect("dir").count(), 0);
    }
}
