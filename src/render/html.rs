// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Self-contained interactive HTML document.
//!
//! Colors, legend samples and node positions are computed here; the bundled template only draws
//! them. All snapshot text reaches the page as JSON data and is inserted with `textContent`, so
//! node state representations cannot inject markup.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use super::dump::{snapshot_to_value, DumpOptions};
use super::{output_path, score_colors, write_artifact};
use crate::color::{node_fill_color, ColorSpec};
use crate::error::VisError;
use crate::model::{Annotations, NodeId, VisualizationSnapshot};

/// Number of evenly spaced legend samples across the score range.
pub const LEGEND_SAMPLE_COUNT: usize = 100;

const BACKEND: &str = "html";
/// Node fields the page needs to place and select nodes; a field filter never drops them.
const LAYOUT_FIELDS: [&str; 2] = ["id", "parent_id"];
#[cfg_attr(not(feature = "html"), allow(dead_code))]
const TEMPLATE_NAME: &str = "tree.html.j2";
#[cfg_attr(not(feature = "html"), allow(dead_code))]
const TEMPLATE: &str = include_str!("../../assets/tree.html.j2");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HtmlTheme {
    #[default]
    Light,
    Dark,
}

impl HtmlTheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for HtmlTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HtmlTheme {
    type Err = VisError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(VisError::InvalidOption {
                option: "theme",
                reason: format!("unknown theme '{raw}'; expected 'light' or 'dark'"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    pub theme: HtmlTheme,
    /// Page title; defaults to the snapshot's algorithm name.
    pub title: Option<String>,
    /// Which node fields reach the embedded data (`indent` is ignored).
    pub fields: DumpOptions,
    /// Insert adapter metric values as markup. When false they are shown as plain text.
    pub render_metric_markup: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            theme: HtmlTheme::default(),
            title: None,
            fields: DumpOptions::default(),
            render_metric_markup: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendSample {
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct ColormapStats {
    min_score: f64,
    max_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
struct NodePosition {
    x: f64,
    depth: usize,
}

/// Everything the template needs, embedded as one JSON payload.
#[derive(Debug, Serialize)]
struct DocumentData<'a> {
    snapshot: Value,
    metadata: &'a Annotations,
    node_colors: BTreeMap<String, String>,
    legend: Vec<LegendSample>,
    colormap_stats: ColormapStats,
    layout: BTreeMap<String, NodePosition>,
    render_metric_markup: bool,
}

#[cfg_attr(not(feature = "html"), allow(dead_code))]
#[derive(Debug, Serialize)]
struct DocumentContext<'a> {
    title: String,
    theme: HtmlTheme,
    data: DocumentData<'a>,
}

fn document_data<'a>(
    snapshot: &'a VisualizationSnapshot,
    options: &HtmlOptions,
    colors: &ColorSpec,
) -> Result<DocumentData<'a>, VisError> {
    let (range, color_fn) = score_colors(snapshot.nodes(), colors)?;

    let node_colors = snapshot
        .nodes()
        .iter()
        .map(|node| (node.id.to_string(), node_fill_color(node, &color_fn)))
        .collect();
    let legend = range
        .samples(LEGEND_SAMPLE_COUNT)
        .into_iter()
        .map(|value| LegendSample { value, color: color_fn(value) })
        .collect();

    Ok(DocumentData {
        snapshot: snapshot_to_value(snapshot, &embedded_fields(&options.fields))?,
        metadata: snapshot.metadata(),
        node_colors,
        legend,
        colormap_stats: ColormapStats { min_score: range.min(), max_score: range.max() },
        layout: tidy_layout(snapshot)
            .into_iter()
            .map(|(id, pos)| (id.to_string(), pos))
            .collect(),
        render_metric_markup: options.render_metric_markup,
    })
}

fn embedded_fields(fields: &DumpOptions) -> DumpOptions {
    let mut fields = fields.clone();
    if let Some(include) = fields.include_fields.as_mut() {
        for required in LAYOUT_FIELDS {
            if !include.iter().any(|field| field == required) {
                include.push(required.to_owned());
            }
        }
    }
    fields
}

/// Leaves take consecutive slots left to right (children in edge order); a parent sits midway
/// between its first and last child. Nodes unreachable from the root get no position.
fn tidy_layout(snapshot: &VisualizationSnapshot) -> BTreeMap<NodeId, NodePosition> {
    let mut children: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
    for edge in snapshot.edges() {
        children.entry(edge.source).or_default().push(edge.target);
    }

    let mut positions = BTreeMap::new();
    let mut seen = HashSet::new();
    let mut next_leaf = 0.0;
    let root = snapshot.root().id;
    let mut stack = vec![(root, 0usize, false)];
    seen.insert(root);

    while let Some((id, depth, expanded)) = stack.pop() {
        let kids: Vec<NodeId> = children.get(&id).map(Vec::as_slice).unwrap_or(&[]).to_vec();
        if expanded {
            let placed: Vec<f64> =
                kids.iter().filter_map(|kid| positions.get(kid).map(|p: &NodePosition| p.x)).collect();
            let x = match (placed.first(), placed.last()) {
                (Some(first), Some(last)) => (first + last) / 2.0,
                _ => {
                    let x = next_leaf;
                    next_leaf += 1.0;
                    x
                }
            };
            positions.insert(id, NodePosition { x, depth });
            continue;
        }

        stack.push((id, depth, true));
        for kid in kids.into_iter().rev() {
            if seen.insert(kid) {
                stack.push((kid, depth + 1, false));
            }
        }
    }
    positions
}

/// Renders the document to a string.
#[cfg(feature = "html")]
pub fn html_document(
    snapshot: &VisualizationSnapshot,
    options: &HtmlOptions,
    colors: &ColorSpec,
) -> Result<String, VisError> {
    let data = document_data(snapshot, options, colors)?;
    let title = options
        .title
        .clone()
        .or_else(|| snapshot.algorithm().map(|name| format!("{name} search tree")))
        .unwrap_or_else(|| "Search tree".to_owned());
    let context = DocumentContext { title, theme: options.theme, data };

    let mut env = minijinja::Environment::new();
    env.set_auto_escape_callback(|_| minijinja::AutoEscape::Html);
    env.add_template(TEMPLATE_NAME, TEMPLATE)
        .map_err(|err| VisError::render_with(BACKEND, "invalid bundled template", err))?;
    let template = env
        .get_template(TEMPLATE_NAME)
        .map_err(|err| VisError::render_with(BACKEND, "bundled template missing", err))?;
    template
        .render(&context)
        .map_err(|err| VisError::render_with(BACKEND, "failed to render template", err))
}

#[cfg(not(feature = "html"))]
pub fn html_document(
    snapshot: &VisualizationSnapshot,
    options: &HtmlOptions,
    colors: &ColorSpec,
) -> Result<String, VisError> {
    let _ = document_data(snapshot, options, colors)?;
    Err(VisError::DependencyNotFound {
        dependency: "minijinja",
        hint: "HTML output needs the `html` feature of dryad".to_owned(),
    })
}

/// Writes `<basename>.html` and returns its path.
pub fn render_html(
    snapshot: &VisualizationSnapshot,
    output_basename: &Path,
    options: &HtmlOptions,
    colors: &ColorSpec,
) -> Result<PathBuf, VisError> {
    let document = html_document(snapshot, options, colors)?;
    write_artifact(BACKEND, output_path(output_basename, "html"), document.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::{document_data, tidy_layout, HtmlOptions, HtmlTheme, LEGEND_SAMPLE_COUNT};
    use crate::color::{ColorSpec, ROOT_COLOR, RUNNING_COLOR};
    use crate::model::{NodeId, TrialStatus, VisualizationSnapshot};
    use crate::render::test_utils::{node, sample_snapshot};
    use crate::render::DumpOptions;

    #[test]
    fn node_colors_apply_sentinel_and_status_rules() {
        let snapshot = sample_snapshot();
        let data = document_data(&snapshot, &HtmlOptions::default(), &ColorSpec::default())
            .expect("data");
        assert_eq!(data.node_colors["-1"], ROOT_COLOR);
        assert_eq!(data.node_colors["0"], "#f8696b");
        assert_eq!(data.node_colors["1"], RUNNING_COLOR);
    }

    #[test]
    fn legend_spans_the_score_range() {
        let snapshot = sample_snapshot();
        let data = document_data(&snapshot, &HtmlOptions::default(), &ColorSpec::default())
            .expect("data");
        assert_eq!(data.legend.len(), LEGEND_SAMPLE_COUNT);
        assert_eq!(data.legend[0].value, 0.3);
        assert!((data.legend[LEGEND_SAMPLE_COUNT - 1].value - 0.9).abs() < 1e-12);
        assert_eq!(data.legend[0].color, "#f8696b");
        assert_eq!((data.colormap_stats.min_score, data.colormap_stats.max_score), (0.3, 0.9));
    }

    #[test]
    fn degenerate_range_repeats_one_sample() {
        let nodes = vec![
            node(-1, None, -1.0, "ROOT", None, Some(TrialStatus::Root)),
            node(0, Some(-1), 0.5, "a", None, None),
            node(1, Some(-1), 0.5, "b", None, None),
        ];
        let edges = nodes
            .iter()
            .filter_map(|n| {
                n.parent_id.map(|p| crate::model::EdgeSnapshot { source: p, target: n.id, action: None })
            })
            .collect();
        let snapshot =
            VisualizationSnapshot::create_with_metadata(nodes, edges, Vec::new(), "Flat", None)
                .expect("snapshot");

        let data = document_data(&snapshot, &HtmlOptions::default(), &ColorSpec::default())
            .expect("data");
        assert_eq!(data.legend.len(), LEGEND_SAMPLE_COUNT);
        assert!(data.legend.iter().all(|s| s == &data.legend[0]));
        assert!(data.colormap_stats.min_score < data.colormap_stats.max_score);
    }

    #[test]
    fn field_filter_keeps_layout_fields() {
        let options = HtmlOptions {
            fields: DumpOptions {
                include_fields: Some(vec!["score".to_owned()]),
                ..DumpOptions::default()
            },
            ..HtmlOptions::default()
        };
        let snapshot = sample_snapshot();
        let data = document_data(&snapshot, &options, &ColorSpec::default())
            .expect("data");
        let nodes = data.snapshot["nodes"].as_array().expect("nodes");
        assert_eq!(nodes.len(), 4);
        for node in nodes {
            let mut keys: Vec<&str> =
                node.as_object().expect("record").keys().map(String::as_str).collect();
            keys.sort_unstable();
            assert_eq!(keys, ["id", "parent_id", "score"]);
        }
        assert_eq!(options.fields.include_fields, Some(vec!["score".to_owned()]));
    }

    #[test]
    fn layout_centers_parents_over_children() {
        let layout = tidy_layout(&sample_snapshot());
        // Leaves: node 2 (under 0) then node 1.
        assert_eq!(layout[&NodeId::new(2)].x, 0.0);
        assert_eq!(layout[&NodeId::new(1)].x, 1.0);
        assert_eq!(layout[&NodeId::new(0)].x, 0.0);
        assert_eq!(layout[&NodeId::ROOT].x, 0.5);
        assert_eq!(layout[&NodeId::new(2)].depth, 2);
    }

    #[test]
    fn themes_parse_case_insensitively() {
        assert_eq!("Dark".parse::<HtmlTheme>().expect("dark"), HtmlTheme::Dark);
        assert!("sepia".parse::<HtmlTheme>().is_err());
    }

    #[cfg(feature = "html")]
    mod document {
        use regex::Regex;
        use serde_json::Value;

        use super::super::{html_document, render_html, HtmlOptions, HtmlTheme};
        use crate::color::ColorSpec;
        use crate::render::test_utils::sample_snapshot;

        fn payload(document: &str) -> Value {
            let re = Regex::new(
                r#"(?s)<script id="dryad-data" type="application/json">(.*?)</script>"#,
            )
            .expect("regex");
            let raw = re.captures(document).expect("data script")[1].to_owned();
            serde_json::from_str(&raw).expect("payload json")
        }

        #[test]
        fn untrusted_text_cannot_open_tags() {
            let options = HtmlOptions {
                title: Some("<b>run".to_owned()),
                ..HtmlOptions::default()
            };
            let document =
                html_document(&sample_snapshot(), &options, &ColorSpec::default()).expect("html");

            assert!(document.contains("<title>&lt;b&gt;run</title>"));
            assert_eq!(document.matches("<script").count(), 2);
            let data = payload(&document);
            assert_eq!(data["snapshot"]["nodes"][2]["state_repr"], "draft \"b\" <script>");
        }

        #[test]
        fn payload_carries_colors_legend_and_flags() {
            let options = HtmlOptions {
                theme: HtmlTheme::Dark,
                render_metric_markup: false,
                ..HtmlOptions::default()
            };
            let document =
                html_document(&sample_snapshot(), &options, &ColorSpec::default()).expect("html");

            assert!(document.contains("data-theme=\"dark\""));
            let data = payload(&document);
            assert_eq!(data["legend"].as_array().map(Vec::len), Some(100));
            assert_eq!(data["render_metric_markup"], false);
            assert_eq!(data["node_colors"]["-1"], "#AAAAAA");
            assert_eq!(data["metadata"]["algorithm"], "StandardMCTS");
        }

        #[test]
        fn writes_an_html_file() {
            let dir = tempfile::tempdir().expect("tempdir");
            let path = render_html(
                &sample_snapshot(),
                &dir.path().join("tree"),
                &HtmlOptions::default(),
                &ColorSpec::default(),
            )
            .expect("render");
            assert_eq!(path, dir.path().join("tree.html"));
            let text = std::fs::read_to_string(path).expect("read");
            assert!(text.starts_with("<!DOCTYPE html>"));
            assert!(text.contains("<title>StandardMCTS search tree</title>"));
        }
    }
}
