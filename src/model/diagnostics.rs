// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only algorithm diagnostics handed to metric adapters.
//!
//! Each search family exposes a different bookkeeping shape. The snapshot pipeline never
//! interprets these; only the matching adapter in [`crate::adapters`] does.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

use super::ids::NodeId;

/// Visit-count/UCT bookkeeping, keyed by node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MctsStats {
    pub visit_counts: BTreeMap<NodeId, u64>,
    pub value_sums: BTreeMap<NodeId, f64>,
    pub priors: BTreeMap<NodeId, f64>,
}

/// Posterior summary for one arm of a Thompson-sampling model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbDist {
    Beta { a: f64, b: f64 },
    /// Normal with a scaled-inverse-chi-squared prior on the variance.
    Gaussian { m: f64, kappa: f64, nu: f64, tau_square: f64 },
}

/// The generate-vs-continue split of one model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenCont {
    pub gen: ProbDist,
    pub cont: ProbDist,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StackedAction {
    pub dist: ProbDist,
    pub split: GenCont,
    pub children: BTreeMap<NodeId, ProbDist>,
}

/// Per-node Thompson model; exactly one model-selection strategy is active at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum ThompsonModel {
    /// One stacked model per action.
    Stack { actions: BTreeMap<String, StackedAction> },
    /// A shared generate/continue split with per-action priors sampled by Thompson sampling.
    BanditThompson {
        shared: GenCont,
        action_priors: BTreeMap<String, ProbDist>,
        children: BTreeMap<NodeId, ProbDist>,
    },
    /// A shared generate/continue split with actions chosen by UCB over the reward history.
    BanditUcb { shared: GenCont, children: BTreeMap<NodeId, ProbDist> },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThompsonStats {
    pub models: BTreeMap<NodeId, ThompsonModel>,
    pub rewards_by_action: BTreeMap<String, Vec<f64>>,
}

/// One reward observed when a node was expanded.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub reward: f64,
    pub action: String,
}

/// Thresholds deciding whether a subtree has converged enough to be pruned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PruningConfig {
    pub min_subtree_size: usize,
    pub same_score_proportion_threshold: f64,
}

impl Default for PruningConfig {
    fn default() -> Self {
        Self { min_subtree_size: 4, same_score_proportion_threshold: 0.75 }
    }
}

impl PruningConfig {
    /// A subtree is prunable once it holds at least `min_subtree_size` observations and one
    /// reward value accounts for at least `same_score_proportion_threshold` of them.
    pub fn is_prunable(&self, rewards: &[f64]) -> bool {
        if rewards.is_empty() || rewards.len() < self.min_subtree_size {
            return false;
        }
        let mut counts: Vec<(f64, usize)> = Vec::new();
        for &reward in rewards {
            match counts.iter_mut().find(|(value, _)| *value == reward) {
                Some((_, count)) => *count += 1,
                None => counts.push((reward, 1)),
            }
        }
        let dominant = counts.iter().map(|(_, count)| *count).max().unwrap_or(0);
        dominant as f64 / rewards.len() as f64 >= self.same_score_proportion_threshold
    }
}

/// Subtree-pruning bookkeeping: every expansion's observation, keyed by the expanded node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PruningStats {
    pub observations: BTreeMap<NodeId, Observation>,
    pub config: PruningConfig,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueuedLeaf {
    pub node: NodeId,
    pub score: f64,
}

/// Priority-queue bookkeeping: leaves waiting to be expanded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeafQueueStats {
    pub leaves: Vec<QueuedLeaf>,
}

impl LeafQueueStats {
    /// Leaves in pop order: descending score, ties broken by ascending node id.
    pub fn ranked(&self) -> Vec<QueuedLeaf> {
        let mut ranked = self.leaves.clone();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.node.cmp(&b.node)));
        ranked
    }
}

/// Flat multi-armed bandit bookkeeping: every reward recorded per action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BanditStats {
    pub scores_by_action: BTreeMap<String, Vec<f64>>,
}

/// Diagnostics exposed by a search state, one variant per supported family.
#[derive(Default)]
pub enum AlgoDiagnostics {
    Mcts(MctsStats),
    Thompson(ThompsonStats),
    SubtreePruning(PruningStats),
    LeafQueue(LeafQueueStats),
    Bandit(BanditStats),
    BreadthFirst,
    /// Host-defined diagnostics, read by a host-registered adapter.
    Custom(Box<dyn Any + Send + Sync>),
    #[default]
    None,
}

impl AlgoDiagnostics {
    /// Registry key of the built-in adapter for this variant.
    pub fn default_type_name(&self) -> Option<&'static str> {
        match self {
            Self::Mcts(_) => Some("MCTSState"),
            Self::Thompson(_) => Some("ABMCTSAAlgoState"),
            Self::SubtreePruning(_) => Some("ABMCTSMState"),
            Self::LeafQueue(_) => Some("BFSState"),
            Self::Bandit(_) => Some("UCBState"),
            Self::BreadthFirst => Some("ToTBFSState"),
            Self::Custom(_) | Self::None => None,
        }
    }

    pub fn custom<T: Any>(&self) -> Option<&T> {
        match self {
            Self::Custom(inner) => inner.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl fmt::Debug for AlgoDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mcts(stats) => f.debug_tuple("Mcts").field(stats).finish(),
            Self::Thompson(stats) => f.debug_tuple("Thompson").field(stats).finish(),
            Self::SubtreePruning(stats) => f.debug_tuple("SubtreePruning").field(stats).finish(),
            Self::LeafQueue(stats) => f.debug_tuple("LeafQueue").field(stats).finish(),
            Self::Bandit(stats) => f.debug_tuple("Bandit").field(stats).finish(),
            Self::BreadthFirst => f.write_str("BreadthFirst"),
            Self::Custom(_) => f.write_str("Custom(..)"),
            Self::None => f.write_str("None"),
        }
    }
}
