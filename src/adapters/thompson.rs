// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::markup::{escape_html, fmt_dist, li, mean, ul};
use super::{AdapterError, NodeContext, VisualizerAdapter};
use crate::model::{
    AlgoDiagnostics, AlgoMetric, AlgoMetrics, NodeId, ProbDist, StackedAction, ThompsonModel,
};

/// Posterior summaries of Thompson-sampling adaptive branching, one rendering per strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThompsonSamplingAdapter;

impl VisualizerAdapter for ThompsonSamplingAdapter {
    fn extract_node_metrics(&self, ctx: &NodeContext<'_>) -> Result<AlgoMetrics, AdapterError> {
        let AlgoDiagnostics::Thompson(stats) = ctx.diagnostics else {
            return Ok(AlgoMetrics::new());
        };
        let Some(model) = stats.models.get(&ctx.node.id) else {
            return Ok(AlgoMetrics::new());
        };

        let markup = match model {
            ThompsonModel::Stack { actions } => stacked(actions),
            ThompsonModel::BanditThompson { shared, action_priors, children } => {
                let priors = stats
                    .rewards_by_action
                    .keys()
                    .map(|action| {
                        let prior = action_priors.get(action).ok_or_else(|| {
                            AdapterError::Inconsistent {
                                node: ctx.node.id,
                                reason: format!("no prior recorded for action '{action}'"),
                            }
                        })?;
                        Ok(li(format!("{} ~ {}", escape_html(action), fmt_dist(prior))))
                    })
                    .collect::<Result<Vec<_>, AdapterError>>()?;
                shared_split(&fmt_dist(&shared.gen), priors, &fmt_dist(&shared.cont), children)
            }
            ThompsonModel::BanditUcb { shared, children } => {
                let total: usize = stats.rewards_by_action.values().map(Vec::len).sum();
                let scores = stats.rewards_by_action.iter().map(|(action, rewards)| {
                    let ucb = mean(rewards).and_then(|mean| {
                        (total > 0).then(|| {
                            mean + (2.0 * (total as f64).ln() / rewards.len() as f64).sqrt()
                        })
                    });
                    let ucb = ucb.map_or_else(|| "N/A".to_owned(), |score| score.to_string());
                    li(format!("{}: UCB Score = {ucb}", escape_html(action)))
                });
                shared_split(
                    &fmt_dist(&shared.gen),
                    scores.collect(),
                    &fmt_dist(&shared.cont),
                    children,
                )
            }
        };

        let mut metrics = AlgoMetrics::new();
        metrics.insert("action_probas".into(), AlgoMetric::new("Action Probabilities", markup));
        Ok(metrics)
    }

    fn algorithm_name(&self, _diagnostics: &AlgoDiagnostics) -> String {
        "ABMCTSA".to_owned()
    }
}

fn child_items(children: &BTreeMap<NodeId, ProbDist>) -> Vec<String> {
    children.iter().map(|(id, dist)| li(format!("{id} ~ {}", fmt_dist(dist)))).collect()
}

fn stacked(actions: &BTreeMap<String, StackedAction>) -> String {
    ul(actions.iter().map(|(action, model)| {
        let cont = format!("CONT ~ {}{}", fmt_dist(&model.split.cont), ul(child_items(&model.children)));
        let split = ul([li(format!("GEN ~ {}", fmt_dist(&model.split.gen))), li(cont)]);
        li(format!("{} ~ {}{split}", escape_html(action), fmt_dist(&model.dist)))
    }))
}

fn shared_split(
    gen: &str,
    gen_items: Vec<String>,
    cont: &str,
    children: &BTreeMap<NodeId, ProbDist>,
) -> String {
    ul([
        li(format!("GEN ~ {gen}{}", ul(gen_items))),
        li(format!("CONT ~ {cont}{}", ul(child_items(children)))),
    ])
}
