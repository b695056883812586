// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{
    AlgoMetric, Annotations, EdgeSnapshot, NodeId, NodeSnapshot, TrialStatus,
    VisualizationSnapshot,
};

pub(crate) fn node(
    id: i64,
    parent: Option<i64>,
    score: f64,
    state_repr: &str,
    action: Option<&str>,
    status: Option<TrialStatus>,
) -> NodeSnapshot {
    NodeSnapshot {
        id: NodeId::new(id),
        trial_id: None,
        parent_id: parent.map(NodeId::new),
        depth: parent.map_or(0, |p| if p < 0 { 1 } else { 2 }),
        score,
        state_repr: state_repr.to_owned(),
        action_from_parent: action.map(str::to_owned),
        created_at: None,
        completed_at: None,
        status,
        annotations: Annotations::new(),
        algo_metrics: Default::default(),
    }
}

fn edges_of(nodes: &[NodeSnapshot]) -> Vec<EdgeSnapshot> {
    nodes
        .iter()
        .filter_map(|n| {
            n.parent_id.map(|parent| EdgeSnapshot {
                source: parent,
                target: n.id,
                action: n.action_from_parent.clone(),
            })
        })
        .collect()
}

/// root -> {0: 0.3 complete "refine", 1: 0.9 running "retry"}, 0 -> 2: 0.6 invalid (no action).
pub(crate) fn sample_snapshot() -> VisualizationSnapshot {
    let mut nodes = vec![
        node(-1, None, -1.0, "ROOT", None, Some(TrialStatus::Root)),
        node(0, Some(-1), 0.3, "draft a", Some("refine"), Some(TrialStatus::Complete)),
        node(1, Some(-1), 0.9, "draft \"b\" <script>", Some("retry"), Some(TrialStatus::Running)),
        node(2, Some(0), 0.6, "a much longer state representation", None, Some(TrialStatus::Invalid)),
    ];
    nodes[3]
        .algo_metrics
        .insert("visits".into(), AlgoMetric::new("Visits", "4"));
    let edges = edges_of(&nodes);
    VisualizationSnapshot::create_with_metadata(nodes, edges, Vec::new(), "StandardMCTS", None)
        .expect("sample snapshot")
}

/// Root plus `non_root` children of the root, scored `0.0, 0.1, ...` in id order.
pub(crate) fn fan_snapshot(non_root: usize) -> VisualizationSnapshot {
    let mut nodes = vec![node(-1, None, -1.0, "ROOT", None, Some(TrialStatus::Root))];
    nodes.extend((0..non_root).map(|i| {
        node(i as i64, Some(-1), i as f64 / 10.0, &format!("s{i}"), Some("expand"), None)
    }));
    let edges = edges_of(&nodes);
    VisualizationSnapshot::create_with_metadata(nodes, edges, Vec::new(), "Fan", None)
        .expect("fan snapshot")
}
