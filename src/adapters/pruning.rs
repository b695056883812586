// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::markup::{escape_html, li, mean, ul, yes_no};
use super::{AdapterError, NodeContext, VisualizerAdapter};
use crate::model::{AlgoDiagnostics, AlgoMetric, AlgoMetrics};

/// Subtree statistics of the mixed-model adaptive branching search, including a prune hint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubtreePruningAdapter;

impl VisualizerAdapter for SubtreePruningAdapter {
    fn extract_node_metrics(&self, ctx: &NodeContext<'_>) -> Result<AlgoMetrics, AdapterError> {
        let AlgoDiagnostics::SubtreePruning(stats) = ctx.diagnostics else {
            return Ok(AlgoMetrics::new());
        };

        let mut rewards = Vec::new();
        let mut by_action: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        let mut by_child: BTreeMap<usize, Vec<f64>> = BTreeMap::new();
        for (descendant, child_idx) in ctx.tree.descendants_by_child(ctx.node.id) {
            let Some(observation) = stats.observations.get(&descendant) else {
                continue;
            };
            rewards.push(observation.reward);
            by_action.entry(observation.action.as_str()).or_default().push(observation.reward);
            by_child.entry(child_idx).or_default().push(observation.reward);
        }
        if rewards.is_empty() {
            return Ok(AlgoMetrics::new());
        }

        let total = stats.observations.len() as f64;
        let action_items = by_action.iter().map(|(action, rewards)| {
            let mean = mean(rewards).unwrap_or_default();
            let ucb = mean + (2.0 * total.ln() / rewards.len() as f64).sqrt();
            li(format!(
                "{}: len = {}, mean = {mean:.3}, UCB Score = {ucb:.3}",
                escape_html(action),
                rewards.len()
            ))
        });
        let child_items = by_child.iter().map(|(child_idx, rewards)| {
            let mean = mean(rewards).unwrap_or_default();
            li(format!("child #{child_idx}: n={}, mean={mean:.3}", rewards.len()))
        });

        let mut metrics = AlgoMetrics::new();
        metrics.insert(
            "prunable".into(),
            AlgoMetric::new("Prunable", yes_no(stats.config.is_prunable(&rewards))),
        );
        metrics.insert("rewards_by_action".into(), AlgoMetric::new("Rewards by Action", ul(action_items)));
        metrics.insert("rewards_by_child".into(), AlgoMetric::new("Rewards by Child", ul(child_items)));
        Ok(metrics)
    }

    fn algorithm_name(&self, _diagnostics: &AlgoDiagnostics) -> String {
        "ABMCTSM".to_owned()
    }
}
