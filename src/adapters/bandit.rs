// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::markup::{escape_html, li, mean, ul};
use super::{AdapterError, NodeContext, VisualizerAdapter};
use crate::model::{AlgoDiagnostics, AlgoMetric, AlgoMetrics};

/// Per-action sample statistics and UCB scores of a flat multi-armed bandit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiArmedBanditUcbAdapter {
    pub exploration_weight: f64,
}

impl Default for MultiArmedBanditUcbAdapter {
    fn default() -> Self {
        Self { exploration_weight: std::f64::consts::SQRT_2 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActionStats {
    len: usize,
    min: f64,
    max: f64,
    mean: f64,
    median: f64,
    stdev: f64,
}

impl ActionStats {
    fn of(scores: &[f64]) -> Option<Self> {
        let mean = mean(scores)?;
        let mut sorted = scores.to_vec();
        sorted.sort_by(f64::total_cmp);
        let len = sorted.len();
        let median = if len % 2 == 1 {
            sorted[len / 2]
        } else {
            (sorted[len / 2 - 1] + sorted[len / 2]) / 2.0
        };
        // Sample standard deviation; a single sample has none.
        let stdev = if len > 1 {
            let var = sorted.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (len - 1) as f64;
            var.sqrt()
        } else {
            0.0
        };
        Some(Self { len, min: sorted[0], max: sorted[len - 1], mean, median, stdev })
    }

    fn describe(&self) -> String {
        format!(
            "len = {}, min = {:.3}, max = {:.3}, mean = {:.3}, median = {:.3}, stdev = {:.3}",
            self.len, self.min, self.max, self.mean, self.median, self.stdev
        )
    }
}

impl VisualizerAdapter for MultiArmedBanditUcbAdapter {
    fn extract_node_metrics(&self, ctx: &NodeContext<'_>) -> Result<AlgoMetrics, AdapterError> {
        let AlgoDiagnostics::Bandit(stats) = ctx.diagnostics else {
            return Ok(AlgoMetrics::new());
        };
        let total: usize = stats.scores_by_action.values().map(Vec::len).sum();
        if total == 0 {
            return Ok(AlgoMetrics::new());
        }

        let items = stats.scores_by_action.iter().map(|(action, scores)| {
            let action = escape_html(action);
            match ActionStats::of(scores) {
                Some(data) => {
                    let bonus = self.exploration_weight * ((total as f64).ln() / data.len as f64).sqrt();
                    li(format!(
                        "<b>{action}</b>: UCB Score = {:.3} ({})",
                        data.mean + bonus,
                        data.describe()
                    ))
                }
                None => li(format!("<b>{action}</b>: UCB Score = N/A (len = 0)")),
            }
        });

        let mut metrics = AlgoMetrics::new();
        metrics.insert("total_len".into(), AlgoMetric::new("Total Samples Recorded", total.to_string()));
        metrics.insert("action_stats".into(), AlgoMetric::new("Action Statistics", ul(items)));
        Ok(metrics)
    }

    fn algorithm_name(&self, _diagnostics: &AlgoDiagnostics) -> String {
        "MultiArmedBanditUCB".to_owned()
    }
}
