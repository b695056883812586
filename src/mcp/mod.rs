// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Session-tool boundary.
//!
//! A session server owns the search state; it hands it here together with
//! [`TreeVisualizationParams`] and relays either the response or the typed failure to its client.
//! Both shapes publish JSON schemas for tool registration.

use std::fmt::Debug;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;
use tracing::debug;

use crate::color::ColorSpec;
use crate::model::SearchState;
use crate::pipeline::{OutputFormat, SUPPORTED_FORMATS};
use crate::render::{DotGraph, GraphvizOptions};
use crate::snapshot::{build_snapshot, SnapshotOptions};

mod types;

pub use types::{TreeVisualizationParams, TreeVisualizationResponse, VisualizationFailure};

/// JSON schema of the request parameters.
pub fn tree_visualization_params_schema() -> schemars::Schema {
    schemars::schema_for!(TreeVisualizationParams)
}

/// Snapshots `state` and produces its Graphviz source, plus the rendered image for image formats.
pub fn get_tree_visualization<St>(
    state: &St,
    params: &TreeVisualizationParams,
) -> Result<TreeVisualizationResponse, VisualizationFailure>
where
    St: SearchState + ?Sized,
    St::Payload: Serialize + Debug,
{
    let format = match params.format.parse::<OutputFormat>()? {
        OutputFormat::Graphviz(format) => format,
        other => {
            let graphviz: Vec<&str> = SUPPORTED_FORMATS
                .iter()
                .copied()
                .filter(|name| matches!(name.parse(), Ok(OutputFormat::Graphviz(_))))
                .collect();
            return Err(VisualizationFailure::InvalidRequest {
                message: format!(
                    "format '{other}' is not a Graphviz format; use one of: {}",
                    graphviz.join(", ")
                ),
            });
        }
    };

    let snapshot = build_snapshot(state, &SnapshotOptions::default())?;
    let options = GraphvizOptions {
        title: params.title.clone(),
        show_scores: params.show_scores,
        max_label_length: params.max_label_length,
        ..GraphvizOptions::default()
    };
    let graph = DotGraph::from_snapshot(&snapshot, &options, &ColorSpec::default())?;

    let artifact_base64 = if format.is_source() {
        None
    } else {
        Some(STANDARD.encode(graph.render_bytes(format)?))
    };
    debug!(
        format = format.extension(),
        nodes = snapshot.nodes().len(),
        image = artifact_base64.is_some(),
        "tree visualization generated"
    );

    Ok(TreeVisualizationResponse {
        format: format.extension().to_owned(),
        dot_source: graph.into_source(),
        node_count: snapshot.nodes().len() as u64,
        visualization_generated: true,
        artifact_base64,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        get_tree_visualization, tree_visualization_params_schema, TreeVisualizationParams,
        VisualizationFailure,
    };
    use crate::error::VisError;
    use crate::model::{AlgoDiagnostics, NodeId, Tree, TreeState};

    fn state() -> TreeState<String> {
        let mut tree = Tree::with_root();
        let a = tree.add_node(NodeId::ROOT, "alpha".to_owned(), 0.25).expect("a");
        tree.add_node(a, "beta".to_owned(), 0.75).expect("b");
        TreeState::new(tree, AlgoDiagnostics::None)
    }

    #[test]
    fn params_fill_defaults() {
        let params: TreeVisualizationParams = serde_json::from_value(json!({})).expect("params");
        assert_eq!(params, TreeVisualizationParams::default());
        assert_eq!(params.format, "png");
        assert!(params.show_scores);
        assert_eq!(params.max_label_length, 20);
    }

    #[test]
    fn schema_lists_every_parameter() {
        let schema = serde_json::to_value(tree_visualization_params_schema()).expect("schema");
        for key in ["format", "show_scores", "max_label_length", "title"] {
            assert!(schema["properties"].get(key).is_some(), "{key} missing from schema");
        }
    }

    #[test]
    fn dot_format_returns_source_without_an_image() {
        let params = TreeVisualizationParams {
            format: "DOT".to_owned(),
            title: Some("Session 7".to_owned()),
            show_scores: false,
            ..TreeVisualizationParams::default()
        };
        let response = get_tree_visualization(&state(), &params).expect("response");

        assert_eq!(response.format, "dot");
        assert_eq!(response.node_count, 3);
        assert!(response.visualization_generated);
        assert_eq!(response.artifact_base64, None);
        assert!(response.dot_source.contains("label=\"Session 7\""));
        assert!(response.dot_source.contains("label=\"ID: 1\\nbeta\""));

        let wire = serde_json::to_value(&response).expect("json");
        assert!(wire.get("artifact_base64").is_none());
    }

    #[test]
    fn non_graphviz_formats_are_rejected() {
        let params = TreeVisualizationParams { format: "json".to_owned(), ..Default::default() };
        let failure = get_tree_visualization(&state(), &params).unwrap_err();
        assert!(matches!(failure, VisualizationFailure::InvalidRequest { .. }));
        assert!(failure.message().contains("png, pdf, svg, jpg, jpeg, dot, gv"));
    }

    #[test]
    fn failures_are_tagged_by_kind() {
        let missing: TreeState<String> = TreeState::without_tree("Session", AlgoDiagnostics::None);
        let failure = get_tree_visualization(&missing, &TreeVisualizationParams::default())
            .unwrap_err();
        let wire = serde_json::to_value(&failure).expect("json");
        assert_eq!(wire["kind"], "invalid_state");

        let dependency = VisualizationFailure::from(VisError::DependencyNotFound {
            dependency: "dot",
            hint: "install Graphviz".to_owned(),
        });
        assert_eq!(
            serde_json::to_value(&dependency).expect("json"),
            json!({"kind": "missing_dependency", "dependency": "dot", "message": "dot not found: install Graphviz"})
        );

        let render = VisualizationFailure::from(VisError::Render {
            backend: "graphviz",
            message: "dot exited with 1".to_owned(),
            source: None,
        });
        assert!(matches!(render, VisualizationFailure::RenderFailed { .. }));
    }
}
