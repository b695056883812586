// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::markup::fmt_opt3;
use super::{AdapterError, NodeContext, VisualizerAdapter};
use crate::model::{AlgoDiagnostics, AlgoMetric, AlgoMetrics};

/// Visit counts, mean value, prior and UCT score of standard MCTS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardMctsAdapter {
    pub exploration_weight: f64,
}

impl Default for StandardMctsAdapter {
    fn default() -> Self {
        Self { exploration_weight: std::f64::consts::SQRT_2 }
    }
}

impl VisualizerAdapter for StandardMctsAdapter {
    fn extract_node_metrics(&self, ctx: &NodeContext<'_>) -> Result<AlgoMetrics, AdapterError> {
        let AlgoDiagnostics::Mcts(stats) = ctx.diagnostics else {
            return Ok(AlgoMetrics::new());
        };
        let id = ctx.node.id;

        let parent_visits = ctx
            .node
            .parent
            .map_or(1, |parent| stats.visit_counts.get(&parent).copied().unwrap_or(1));
        let visits = stats.visit_counts.get(&id).copied().unwrap_or(0);
        let value_sum = stats.value_sums.get(&id).copied().unwrap_or(0.0);
        let prior = stats.priors.get(&id).copied();

        let exploitation = (visits > 0).then(|| value_sum / visits as f64);
        // ln(1) = 0 and an unvisited node has no bonus; both yield N/A.
        let exploration = match prior {
            Some(prior) if visits > 0 && parent_visits > 1 => Some(
                self.exploration_weight
                    * prior
                    * ((parent_visits as f64).ln() / visits as f64).sqrt(),
            ),
            _ => None,
        };
        let uct = exploitation.zip(exploration).map(|(mean, bonus)| mean + bonus);

        let mut metrics = AlgoMetrics::new();
        metrics.insert("visits".into(), AlgoMetric::new("Visits", visits.to_string()));
        metrics.insert("mean".into(), AlgoMetric::new("Mean (Exploitation)", fmt_opt3(exploitation)));
        metrics.insert("prior".into(), AlgoMetric::new("Prior", fmt_opt3(prior)));
        metrics.insert("uct_score".into(), AlgoMetric::new("UCT Score", fmt_opt3(uct)));
        Ok(metrics)
    }

    fn algorithm_name(&self, _diagnostics: &AlgoDiagnostics) -> String {
        "StandardMCTS".to_owned()
    }
}
