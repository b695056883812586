// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Static diagrams through Graphviz.
//!
//! The DOT source is always produced in-process. Image formats pipe it through the `dot`
//! executable (found via `DRYAD_DOT` or on `PATH`); `dot`/`gv` write the source itself.

use std::env;
use std::fmt::Write as _;
use std::io::{ErrorKind as IoErrorKind, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use super::text::{escape_dot, truncate_label};
use super::{node_tooltip, output_path, score_colors, write_artifact};
use crate::color::{node_fill_color, ColorSpec};
use crate::error::VisError;
use crate::model::{NodeSnapshot, VisualizationSnapshot};

/// Environment variable naming the `dot` executable to use instead of the one on `PATH`.
pub const DOT_ENV_VAR: &str = "DRYAD_DOT";

const BACKEND: &str = "graphviz";
const DOT_INSTALL_HINT: &str =
    "install Graphviz (https://graphviz.org/download/) or set DRYAD_DOT to the dot executable";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphvizFormat {
    Png,
    Pdf,
    Svg,
    Jpg,
    Jpeg,
    Dot,
    Gv,
}

impl GraphvizFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Pdf => "pdf",
            Self::Svg => "svg",
            Self::Jpg => "jpg",
            Self::Jpeg => "jpeg",
            Self::Dot => "dot",
            Self::Gv => "gv",
        }
    }

    /// True when the artifact is the DOT source itself.
    pub fn is_source(self) -> bool {
        matches!(self, Self::Dot | Self::Gv)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphvizOptions {
    /// Graph label shown at the top.
    pub title: Option<String>,
    pub show_scores: bool,
    /// State representations longer than this are cut and marked with `...`.
    pub max_label_length: usize,
    /// `dot` executable to use; takes precedence over `DRYAD_DOT` and `PATH`.
    pub dot_executable: Option<PathBuf>,
}

impl Default for GraphvizOptions {
    fn default() -> Self {
        Self { title: None, show_scores: true, max_label_length: 20, dot_executable: None }
    }
}

/// An in-memory Graphviz digraph of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotGraph {
    source: String,
}

impl DotGraph {
    pub fn from_snapshot(
        snapshot: &VisualizationSnapshot,
        options: &GraphvizOptions,
        colors: &ColorSpec,
    ) -> Result<Self, VisError> {
        let (_, color_fn) = score_colors(snapshot.nodes(), colors)?;

        let comment = options.title.as_deref().unwrap_or("Tree Visualization");
        let mut source = format!("// {}\ndigraph {{\n", comment.replace(['\n', '\r'], " "));
        if let Some(title) = &options.title {
            let _ = writeln!(
                source,
                "\tgraph [label=\"{}\", labelloc=\"t\", fontsize=\"16\"];",
                escape_dot(title)
            );
        }

        for node in snapshot.nodes() {
            let _ = writeln!(
                source,
                "\t\"{}\" [label=\"{}\", style=\"filled\", fillcolor=\"{}\", tooltip=\"{}\"];",
                node.id,
                node_label(node, options),
                node_fill_color(node, &color_fn),
                escape_dot(&node_tooltip(node)),
            );
        }

        for edge in snapshot.edges() {
            match &edge.action {
                Some(action) => {
                    let _ = writeln!(
                        source,
                        "\t\"{}\" -> \"{}\" [label=\"{}\"];",
                        edge.source,
                        edge.target,
                        escape_dot(action)
                    );
                }
                None => {
                    let _ = writeln!(source, "\t\"{}\" -> \"{}\";", edge.source, edge.target);
                }
            }
        }
        source.push_str("}\n");

        Ok(Self { source })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn into_source(self) -> String {
        self.source
    }

    /// Renders to `format`; source formats need no `dot` executable.
    pub fn render_bytes(&self, format: GraphvizFormat) -> Result<Vec<u8>, VisError> {
        self.render_bytes_with(format, None)
    }

    /// Like [`DotGraph::render_bytes`], running `dot_executable` when given instead of the
    /// discovered `dot`.
    pub fn render_bytes_with(
        &self,
        format: GraphvizFormat,
        dot_executable: Option<&Path>,
    ) -> Result<Vec<u8>, VisError> {
        if format.is_source() {
            return Ok(self.source.as_bytes().to_vec());
        }
        let dot = match dot_executable {
            Some(path) => which::which(path).map_err(|err| VisError::DependencyNotFound {
                dependency: "dot",
                hint: format!("configured dot executable {} is not usable ({err})", path.display()),
            })?,
            None => find_dot_executable()?,
        };
        run_dot(&dot, format, &self.source)
    }
}

/// Already-escaped DOT label for a node. The root is always `ROOT`.
fn node_label(node: &NodeSnapshot, options: &GraphvizOptions) -> String {
    if node.is_root() {
        return "ROOT".to_owned();
    }
    let mut parts = vec![format!("ID: {}", node.id)];
    if options.show_scores {
        parts.push(format!("Score: {:.2}", node.score));
    }
    parts.push(escape_dot(&truncate_label(&node.state_repr, options.max_label_length)));
    parts.join("\\n")
}

/// Locates `dot`: `DRYAD_DOT` when set, otherwise the first match on `PATH`.
pub fn find_dot_executable() -> Result<PathBuf, VisError> {
    if let Some(raw) = env::var_os(DOT_ENV_VAR).filter(|value| !value.is_empty()) {
        return which::which(&raw).map_err(|err| VisError::DependencyNotFound {
            dependency: "dot",
            hint: format!("{DOT_ENV_VAR}={} is not executable ({err})", Path::new(&raw).display()),
        });
    }
    which::which("dot").map_err(|_| VisError::DependencyNotFound {
        dependency: "dot",
        hint: DOT_INSTALL_HINT.to_owned(),
    })
}

fn run_dot(dot: &Path, format: GraphvizFormat, source: &str) -> Result<Vec<u8>, VisError> {
    debug!(dot = %dot.display(), format = format.extension(), "running dot");
    let mut child = Command::new(dot)
        .arg(format!("-T{}", format.extension()))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| match err.kind() {
            IoErrorKind::NotFound => VisError::DependencyNotFound {
                dependency: "dot",
                hint: DOT_INSTALL_HINT.to_owned(),
            },
            _ => VisError::render_with(BACKEND, "failed to launch dot", err),
        })?;

    // `dot` reads the whole graph before writing anything, so feeding stdin first cannot block.
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| VisError::render(BACKEND, "dot stdin was not captured"))?;
    stdin
        .write_all(source.as_bytes())
        .map_err(|err| VisError::render_with(BACKEND, "failed to send the graph to dot", err))?;
    drop(stdin);

    let output = child
        .wait_with_output()
        .map_err(|err| VisError::render_with(BACKEND, "failed to collect dot output", err))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VisError::render(
            BACKEND,
            format!("dot exited with {}: {}", output.status, stderr.trim()),
        ));
    }
    Ok(output.stdout)
}

/// Writes `<basename>.<ext>` and returns its path.
pub fn render_graphviz(
    snapshot: &VisualizationSnapshot,
    output_basename: &Path,
    format: GraphvizFormat,
    options: &GraphvizOptions,
    colors: &ColorSpec,
) -> Result<PathBuf, VisError> {
    let graph = DotGraph::from_snapshot(snapshot, options, colors)?;
    let bytes = graph.render_bytes_with(format, options.dot_executable.as_deref())?;
    write_artifact(BACKEND, output_path(output_basename, format.extension()), &bytes)
}
