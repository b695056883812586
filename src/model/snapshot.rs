// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The immutable, validated projection every renderer consumes.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ids::{NodeId, TrialId};
use super::trial::TrialStatus;

/// Free-form key/value data (node annotations, snapshot metadata).
pub type Annotations = Map<String, Value>;

/// A pre-formatted metric, ready to be shown as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgoMetric {
    pub display_name: String,
    pub display_value: String,
}

impl AlgoMetric {
    pub fn new(display_name: impl Into<String>, display_value: impl Into<String>) -> Self {
        Self { display_name: display_name.into(), display_value: display_value.into() }
    }
}

pub type AlgoMetrics = BTreeMap<String, AlgoMetric>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub trial_id: Option<TrialId>,
    pub parent_id: Option<NodeId>,
    pub depth: usize,
    pub score: f64,
    pub state_repr: String,
    pub action_from_parent: Option<String>,
    pub created_at: Option<String>,
    pub completed_at: Option<String>,
    pub status: Option<TrialStatus>,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default)]
    pub algo_metrics: AlgoMetrics,
}

impl NodeSnapshot {
    /// Serialized field names, in record order.
    pub const FIELD_NAMES: [&'static str; 12] = [
        "id",
        "trial_id",
        "parent_id",
        "depth",
        "score",
        "state_repr",
        "action_from_parent",
        "created_at",
        "completed_at",
        "status",
        "annotations",
        "algo_metrics",
    ];

    pub fn is_root(&self) -> bool {
        self.id.is_root()
    }

    /// True when the score is a real evaluation rather than the "not scored yet" sentinel.
    pub fn has_real_score(&self) -> bool {
        !self.is_root() && self.score >= 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub source: NodeId,
    pub target: NodeId,
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSnapshot {
    pub trial_id: TrialId,
    pub node_to_expand: NodeId,
    pub action: String,
    pub score: Option<f64>,
    pub created_at: String,
    pub completed_at: Option<String>,
    pub trial_status: TrialStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot must contain at least one node (root)")]
    NoNodes,
    #[error("snapshot must contain a root node (id={})", NodeId::ROOT)]
    MissingRoot,
    #[error("snapshot contains {count} root nodes")]
    MultipleRoots { count: usize },
    #[error("node id {id} appears more than once")]
    DuplicateNodeId { id: NodeId },
    #[error("non-root node {id} has no parent")]
    MissingParent { id: NodeId },
    #[error("node {id} references parent {parent}, which is not in the snapshot")]
    DanglingParent { id: NodeId, parent: NodeId },
    #[error("expected {expected} edges for {nodes} nodes, found {edges}")]
    EdgeCountMismatch { nodes: usize, edges: usize, expected: usize },
}

/// Immutable snapshot of a search state: nodes, edges, trials and metadata.
///
/// Every constructor (including deserialization) validates the structural invariants: exactly one
/// root, every non-root node parented inside the snapshot, and one edge per non-root node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot")]
pub struct VisualizationSnapshot {
    nodes: Vec<NodeSnapshot>,
    edges: Vec<EdgeSnapshot>,
    trials: Vec<TrialSnapshot>,
    metadata: Annotations,
    #[serde(skip)]
    root_idx: usize,
}

#[derive(Deserialize)]
struct RawSnapshot {
    nodes: Vec<NodeSnapshot>,
    #[serde(default)]
    edges: Vec<EdgeSnapshot>,
    #[serde(default)]
    trials: Vec<TrialSnapshot>,
    #[serde(default)]
    metadata: Annotations,
}

impl TryFrom<RawSnapshot> for VisualizationSnapshot {
    type Error = SnapshotError;

    fn try_from(raw: RawSnapshot) -> Result<Self, Self::Error> {
        Self::new(raw.nodes, raw.edges, raw.trials, raw.metadata)
    }
}

impl VisualizationSnapshot {
    pub fn new(
        nodes: Vec<NodeSnapshot>,
        edges: Vec<EdgeSnapshot>,
        trials: Vec<TrialSnapshot>,
        metadata: Annotations,
    ) -> Result<Self, SnapshotError> {
        let root_idx = validate(&nodes, &edges)?;
        Ok(Self { nodes, edges, trials, metadata, root_idx })
    }

    /// Builds the snapshot with generated metadata (`created_at`, `algorithm`, `dryad_version`,
    /// and the node/edge/trial counts). `additional` is merged last and wins on key collisions.
    pub fn create_with_metadata(
        nodes: Vec<NodeSnapshot>,
        edges: Vec<EdgeSnapshot>,
        trials: Vec<TrialSnapshot>,
        algorithm: &str,
        additional: Option<&Annotations>,
    ) -> Result<Self, SnapshotError> {
        let non_root = nodes.iter().filter(|node| !node.is_root()).count();
        let mut metadata = Annotations::new();
        metadata.insert("created_at".into(), Value::from(chrono::Utc::now().to_rfc3339()));
        metadata.insert("algorithm".into(), Value::from(algorithm));
        metadata.insert("dryad_version".into(), Value::from(crate::VERSION));
        metadata.insert("num_nodes".into(), Value::from(non_root));
        metadata.insert("num_edges".into(), Value::from(edges.len()));
        metadata.insert("num_trials".into(), Value::from(trials.len()));
        if let Some(additional) = additional {
            metadata.extend(additional.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Self::new(nodes, edges, trials, metadata)
    }

    pub fn nodes(&self) -> &[NodeSnapshot] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeSnapshot] {
        &self.edges
    }

    pub fn trials(&self) -> &[TrialSnapshot] {
        &self.trials
    }

    pub fn metadata(&self) -> &Annotations {
        &self.metadata
    }

    pub fn root(&self) -> &NodeSnapshot {
        &self.nodes[self.root_idx]
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeSnapshot> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Scores of nodes that carry a real evaluation (root and negative sentinels excluded).
    pub fn real_scores(&self) -> impl Iterator<Item = f64> + '_ {
        self.nodes.iter().filter(|node| node.has_real_score()).map(|node| node.score)
    }

    pub fn algorithm(&self) -> Option<&str> {
        self.metadata.get("algorithm").and_then(Value::as_str)
    }
}

fn validate(nodes: &[NodeSnapshot], edges: &[EdgeSnapshot]) -> Result<usize, SnapshotError> {
    if nodes.is_empty() {
        return Err(SnapshotError::NoNodes);
    }

    let mut seen = BTreeSet::new();
    for node in nodes {
        if !seen.insert(node.id) {
            return Err(SnapshotError::DuplicateNodeId { id: node.id });
        }
    }

    let roots = nodes.iter().filter(|node| node.is_root()).count();
    let root_idx = match roots {
        0 => return Err(SnapshotError::MissingRoot),
        1 => nodes.iter().position(NodeSnapshot::is_root).ok_or(SnapshotError::MissingRoot)?,
        count => return Err(SnapshotError::MultipleRoots { count }),
    };

    // Parents may appear before or after their children.
    for node in nodes.iter().filter(|node| !node.is_root()) {
        let parent = node.parent_id.ok_or(SnapshotError::MissingParent { id: node.id })?;
        if !seen.contains(&parent) {
            return Err(SnapshotError::DanglingParent { id: node.id, parent });
        }
    }

    let expected = nodes.len() - 1;
    if edges.len() != expected {
        return Err(SnapshotError::EdgeCountMismatch {
            nodes: nodes.len(),
            edges: edges.len(),
            expected,
        });
    }

    Ok(root_idx)
}
