// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Renderer backends.
//!
//! Every backend consumes one validated [`VisualizationSnapshot`], a [`ColorSpec`] and its own
//! option struct, and writes `<basename>.<ext>`. The diagram backends also expose an in-memory
//! form ([`DotGraph`], [`MermaidDiagram`]) for callers that want the source rather than a file.
//! A missing optional runtime dependency is always reported as
//! [`VisError::DependencyNotFound`], never as a generic render failure.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::color::{resolve_colormap, ColorFn, ColorSpec, ScoreRange};
use crate::error::VisError;
use crate::model::{Annotations, NodeSnapshot};

pub mod dump;
pub mod graphviz;
pub mod html;
pub mod mermaid;
#[cfg(test)]
pub(crate) mod test_utils;
mod text;

pub use dump::{dump_snapshot, snapshot_to_value, DumpFormat, DumpOptions};
pub use graphviz::{find_dot_executable, render_graphviz, DotGraph, GraphvizFormat, GraphvizOptions};
pub use html::{html_document, render_html, HtmlOptions, HtmlTheme, LegendSample, LEGEND_SAMPLE_COUNT};
pub use mermaid::{render_mermaid, MermaidDiagram, MermaidFormat, MermaidOptions};

/// Options for every backend, plus the snapshot-level knobs the render facade needs.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Score coloring shared by all colored backends.
    pub color_map: ColorSpec,
    /// Extra snapshot metadata, used only when the facade builds the snapshot itself.
    pub annotations: Option<Annotations>,
    pub graphviz: GraphvizOptions,
    pub mermaid: MermaidOptions,
    pub dump: DumpOptions,
    pub html: HtmlOptions,
}

impl RenderOptions {
    pub fn with_color_map(mut self, color_map: ColorSpec) -> Self {
        self.color_map = color_map;
        self
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = Some(annotations);
        self
    }
}

/// `<basename>.<extension>`; any dot already in the basename is kept.
pub(crate) fn output_path(basename: &Path, extension: &str) -> PathBuf {
    let mut raw = basename.as_os_str().to_owned();
    raw.push(".");
    raw.push(extension);
    PathBuf::from(raw)
}

pub(crate) fn write_artifact(
    backend: &'static str,
    path: PathBuf,
    bytes: &[u8],
) -> Result<PathBuf, VisError> {
    match std::fs::write(&path, bytes) {
        Ok(()) => {
            debug!(backend, path = %path.display(), bytes = bytes.len(), "artifact written");
            Ok(path)
        }
        Err(err) => Err(VisError::write_failed(backend, path, err)),
    }
}

/// Score range of the given scores (sentinels excluded, degenerate ranges widened) and the color
/// function resolved against it.
pub(crate) fn score_colors<'a>(
    nodes: impl IntoIterator<Item = &'a NodeSnapshot>,
    spec: &ColorSpec,
) -> Result<(ScoreRange, ColorFn), VisError> {
    let range = ScoreRange::from_scores(
        nodes.into_iter().filter(|node| node.has_real_score()).map(|node| node.score),
    );
    let color_fn = resolve_colormap(spec, range)?;
    Ok((range, color_fn))
}

/// Hover text for a node: id, score, status, action, metrics and annotations, one per line.
pub(crate) fn node_tooltip(node: &NodeSnapshot) -> String {
    let mut out = format!("Node ID: {}\nScore: {:.4}", node.id, node.score);
    if let Some(status) = &node.status {
        let _ = write!(out, "\nStatus: {status}");
    }
    if let Some(action) = &node.action_from_parent {
        let _ = write!(out, "\nAction: {action}");
    }
    if !node.algo_metrics.is_empty() {
        out.push_str("\nMetrics:");
        for metric in node.algo_metrics.values() {
            let _ = write!(
                out,
                "\n  {}: {}",
                metric.display_name,
                text::plain_text(&metric.display_value)
            );
        }
    }
    if !node.annotations.is_empty() {
        out.push_str("\nAnnotations:");
        for (key, value) in &node.annotations {
            match value {
                Value::String(text) => {
                    let _ = write!(out, "\n  {key}: {text}");
                }
                other => {
                    let _ = write!(out, "\n  {key}: {other}");
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use serde_json::json;

    use super::{node_tooltip, output_path, score_colors};
    use crate::color::ColorSpec;
    use crate::model::{AlgoMetric, NodeId, TrialStatus};
    use crate::render::test_utils::sample_snapshot;

    #[test]
    fn output_path_appends_the_extension() {
        assert_eq!(output_path(Path::new("out/run"), "json"), Path::new("out/run.json"));
        assert_eq!(output_path(Path::new("out/run.v2"), "md"), Path::new("out/run.v2.md"));
    }

    #[test]
    fn tooltip_lists_status_action_metrics_and_annotations() {
        let snapshot = sample_snapshot();
        let mut node = snapshot.node(NodeId::new(0)).cloned().expect("node");
        node.algo_metrics
            .insert("visits".into(), AlgoMetric::new("Visits", "<b>3</b>"));
        node.annotations.insert("note".into(), json!("keep"));
        node.annotations.insert("rank".into(), json!(1));

        let tooltip = node_tooltip(&node);
        assert_eq!(
            tooltip,
            "Node ID: 0\nScore: 0.3000\nStatus: COMPLETE\nAction: refine\nMetrics:\n  Visits: 3\n\
             Annotations:\n  note: keep\n  rank: 1"
        );
        assert_eq!(node.status, Some(TrialStatus::Complete));
    }

    #[test]
    fn score_colors_ignore_sentinel_scores() {
        let snapshot = sample_snapshot();
        let (range, color_fn) = score_colors(snapshot.nodes(), &ColorSpec::default()).expect("colors");
        assert_eq!((range.min(), range.max()), (0.3, 0.9));
        assert_eq!(color_fn(0.3), "#f8696b");
    }
}
