// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::markup::yes_no;
use super::{AdapterError, NodeContext, VisualizerAdapter};
use crate::model::{AlgoDiagnostics, AlgoMetric, AlgoMetrics};

/// Queue position of best-first search leaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestFirstSearchAdapter;

impl VisualizerAdapter for BestFirstSearchAdapter {
    fn extract_node_metrics(&self, ctx: &NodeContext<'_>) -> Result<AlgoMetrics, AdapterError> {
        let AlgoDiagnostics::LeafQueue(stats) = ctx.diagnostics else {
            return Ok(AlgoMetrics::new());
        };

        let queued = stats
            .ranked()
            .into_iter()
            .enumerate()
            .find(|(_, leaf)| leaf.node == ctx.node.id)
            .map(|(idx, leaf)| (idx + 1, leaf.score));

        let mut metrics = AlgoMetrics::new();
        metrics.insert("is_leaf".into(), AlgoMetric::new("Is Leaf Node", yes_no(queued.is_some())));
        metrics.insert(
            "leaf_rank".into(),
            AlgoMetric::new(
                "Leaf Rank (1-indexed)",
                queued.map_or_else(|| "N/A".to_owned(), |(rank, _)| rank.to_string()),
            ),
        );
        metrics.insert(
            "leaf_score".into(),
            AlgoMetric::new(
                "Leaf Score",
                queued.map_or_else(|| "N/A".to_owned(), |(_, score)| format!("{score:.4}")),
            ),
        );
        Ok(metrics)
    }

    fn algorithm_name(&self, _diagnostics: &AlgoDiagnostics) -> String {
        "BestFirstSearch".to_owned()
    }
}
