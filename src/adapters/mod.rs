// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Algorithm adapters: per-family extraction of display metrics.
//!
//! The snapshot builder resolves one adapter per state through the [`AdapterRegistry`] and asks
//! it for the metrics of every node. Adapters only ever see read-only diagnostics and the tree
//! topology; their output is already formatted for display.

mod bandit;
mod breadth_first;
mod leaf_queue;
pub(crate) mod markup;
mod mcts;
#[cfg(feature = "pruning")]
mod pruning;
mod registry;
mod thompson;


pub use bandit::MultiArmedBanditUcbAdapter;
pub use breadth_first::TreeOfThoughtsBfsAdapter;
pub use leaf_queue::BestFirstSearchAdapter;
pub use mcts::StandardMctsAdapter;
#[cfg(feature = "pruning")]
pub use pruning::SubtreePruningAdapter;
pub use registry::{
    global_registry, lookup_adapter, register_adapter, AdapterLookup, AdapterRegistry,
    UNKNOWN_ALGORITHM,
};
pub use thompson::ThompsonSamplingAdapter;

use crate::model::{AlgoDiagnostics, AlgoMetrics, NodeId, TreeTopology};

/// Per-node facts an adapter may read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeInfo {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub depth: usize,
    pub score: f64,
}

/// Everything an adapter is handed for one node.
#[derive(Clone, Copy)]
pub struct NodeContext<'a> {
    pub node: NodeInfo,
    pub diagnostics: &'a AlgoDiagnostics,
    pub tree: &'a dyn TreeTopology,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AdapterError {
    #[error("inconsistent diagnostics for node {node}: {reason}")]
    Inconsistent { node: NodeId, reason: String },
}

/// Extraction strategy for one algorithm family.
///
/// Implementations must be side-effect free. Diagnostics of a different family yield an empty
/// map; an `Err` is treated by the builder as "no metrics for this node".
pub trait VisualizerAdapter: Send + Sync {
    fn extract_node_metrics(&self, ctx: &NodeContext<'_>) -> Result<AlgoMetrics, AdapterError>;

    fn algorithm_name(&self, diagnostics: &AlgoDiagnostics) -> String;
}
