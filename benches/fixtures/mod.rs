// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use dryad::model::{
    AlgoDiagnostics, MctsStats, NodeId, Trial, TrialId, TrialStatus, TrialStore, Tree, TreeState,
};
use dryad::{build_snapshot, SnapshotOptions, VisualizationSnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    pub depth: usize,
    pub branching: usize,
    pub label_len: usize,
}

impl Params {
    pub const fn new(depth: usize, branching: usize, label_len: usize) -> Self {
        Self { depth, branching, label_len }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    Medium,
    WideLongLabels,
}

impl Case {
    pub const fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::WideLongLabels => "wide_long_labels",
        }
    }

    pub const fn params(self) -> Params {
        match self {
            Self::Small => Params::new(3, 3, 16),
            Self::Medium => Params::new(5, 4, 32),
            Self::WideLongLabels => Params::new(3, 24, 256),
        }
    }

    pub const ALL: [Self; 3] = [Self::Small, Self::Medium, Self::WideLongLabels];
}

fn label(id: usize, len: usize) -> String {
    let mut out = format!("state_{id:05}_");
    while out.len() < len {
        out.push('x');
    }
    out.truncate(len.max(1));
    out
}

/// Full tree of `depth` levels below the root, `branching` children per node, every node backed
/// by a finished trial and MCTS statistics.
pub fn state(params: Params) -> TreeState<String> {
    let mut tree = Tree::with_root();
    let mut trials = TrialStore::new();
    let mut stats = MctsStats::default();

    let mut frontier = vec![NodeId::ROOT];
    let mut next = 0usize;
    for _ in 0..params.depth {
        let mut level = Vec::with_capacity(frontier.len() * params.branching);
        for &parent in &frontier {
            for k in 0..params.branching {
                let score = ((next * 37) % 101) as f64 / 100.0;
                let trial_id = TrialId::new(format!("trial-{next}")).expect("trial id");
                let id = tree
                    .add_node_with_trial(parent, label(next, params.label_len), score, trial_id.clone())
                    .expect("add node");
                trials.insert_finished(Trial {
                    trial_id,
                    node_to_expand: parent,
                    action: format!("action_{k}"),
                    score: Some(score),
                    created_at: "2026-01-01T00:00:00Z".to_owned(),
                    completed_at: Some("2026-01-01T00:00:01Z".to_owned()),
                    trial_status: TrialStatus::Complete,
                });
                let visits = (next % 7 + 1) as u64;
                stats.visit_counts.insert(id, visits);
                stats.value_sums.insert(id, score * visits as f64);
                stats.priors.insert(id, 1.0 / params.branching as f64);
                level.push(id);
                next += 1;
            }
        }
        frontier = level;
    }
    stats.visit_counts.insert(NodeId::ROOT, next as u64);

    TreeState::new(tree, AlgoDiagnostics::Mcts(stats)).with_trials(trials)
}

pub fn snapshot(case: Case) -> VisualizationSnapshot {
    build_snapshot(&state(case.params()), &SnapshotOptions::default()).expect("snapshot")
}
