// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mermaid flowchart export, optionally wrapped in a Markdown fence.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use super::text::{escape_mermaid, truncate_label};
use super::{output_path, score_colors, write_artifact};
use crate::color::{node_fill_color, ColorSpec};
use crate::error::VisError;
use crate::model::{NodeId, NodeSnapshot, VisualizationSnapshot};

mod ident;

pub use ident::MermaidIdentError;

const BACKEND: &str = "mermaid";
const NODE_STROKE: &str = "stroke:#333,stroke-width:2px";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MermaidFormat {
    Mermaid,
    Md,
    Markdown,
}

impl MermaidFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Mermaid => "mermaid",
            Self::Md | Self::Markdown => "md",
        }
    }

    pub fn is_markdown(self) -> bool {
        !matches!(self, Self::Mermaid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MermaidOptions {
    /// Mermaid theme name for the init directive (`default`, `dark`, `forest`, ...).
    pub theme: String,
    /// Keep at most this many node definitions: the root plus the best-scoring nodes.
    pub max_nodes: Option<usize>,
    pub max_label_length: usize,
}

impl Default for MermaidOptions {
    fn default() -> Self {
        Self { theme: "default".to_owned(), max_nodes: None, max_label_length: 20 }
    }
}

/// Mermaid `graph TD` source for a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MermaidDiagram {
    source: String,
}

impl MermaidDiagram {
    pub fn from_snapshot(
        snapshot: &VisualizationSnapshot,
        options: &MermaidOptions,
        colors: &ColorSpec,
    ) -> Result<Self, VisError> {
        ident::validate_theme(&options.theme).map_err(|err| VisError::InvalidOption {
            option: "theme",
            reason: format!("'{}' {err}", options.theme),
        })?;

        let nodes = retained_nodes(snapshot, options.max_nodes);
        let kept: BTreeSet<NodeId> = nodes.iter().map(|node| node.id).collect();
        let (_, color_fn) = score_colors(nodes.iter().copied(), colors)?;

        let mut source = format!("%%{{init: {{'theme':'{}'}}}}%%\ngraph TD", options.theme);
        for node in &nodes {
            let ident = node_ident(node.id)?;
            let _ = write!(source, "\n    {ident}[\"{}\"]", node_label(node, options));
            let _ = write!(
                source,
                "\n    style {ident} fill:{},{NODE_STROKE}",
                node_fill_color(node, &color_fn)
            );
        }

        for edge in snapshot.edges() {
            if !(kept.contains(&edge.source) && kept.contains(&edge.target)) {
                continue;
            }
            let source_ident = node_ident(edge.source)?;
            let target_ident = node_ident(edge.target)?;
            match edge.action.as_deref().filter(|action| !action.is_empty()) {
                Some(action) => {
                    let _ = write!(
                        source,
                        "\n    {source_ident} -->|\"{}\"| {target_ident}",
                        escape_mermaid(action)
                    );
                }
                None => {
                    let _ = write!(source, "\n    {source_ident} --> {target_ident}");
                }
            }
        }

        Ok(Self { source })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn into_source(self) -> String {
        self.source
    }

    pub fn to_markdown(&self) -> String {
        format!("```mermaid\n{}\n```", self.source)
    }
}

fn node_ident(id: NodeId) -> Result<String, VisError> {
    let ident = ident::node_ident(id);
    ident::validate_mermaid_ident(&ident)
        .map_err(|err| VisError::render(BACKEND, format!("node identifier '{ident}' {err}")))?;
    Ok(ident)
}

fn node_label(node: &NodeSnapshot, options: &MermaidOptions) -> String {
    if node.is_root() {
        return "ROOT".to_owned();
    }
    format!(
        "ID: {}<br/>Score: {:.2}<br/>{}",
        node.id,
        node.score,
        escape_mermaid(&truncate_label(&node.state_repr, options.max_label_length))
    )
}

/// Root first, then (under a cap) the highest-scoring non-root nodes. A cap of zero keeps only
/// the root.
fn retained_nodes(snapshot: &VisualizationSnapshot, max_nodes: Option<usize>) -> Vec<&NodeSnapshot> {
    let all = snapshot.nodes();
    let Some(cap) = max_nodes.filter(|cap| all.len() > *cap) else {
        return all.iter().collect();
    };

    let mut non_root: Vec<&NodeSnapshot> = all.iter().filter(|node| !node.is_root()).collect();
    non_root.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut kept = Vec::with_capacity(cap.max(1));
    kept.push(snapshot.root());
    kept.extend(non_root.into_iter().take(cap.saturating_sub(1)));
    kept
}

/// Writes `<basename>.mermaid`, or `<basename>.md` with a fenced block, and returns its path.
pub fn render_mermaid(
    snapshot: &VisualizationSnapshot,
    output_basename: &Path,
    format: MermaidFormat,
    options: &MermaidOptions,
    colors: &ColorSpec,
) -> Result<PathBuf, VisError> {
    let diagram = MermaidDiagram::from_snapshot(snapshot, options, colors)?;
    let text = if format.is_markdown() { diagram.to_markdown() } else { diagram.into_source() };
    write_artifact(BACKEND, output_path(output_basename, format.extension()), text.as_bytes())
}
