// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt::Debug;

use serde::Serialize;

use super::formatter::{FormatterChain, StateFormatter};
use crate::adapters::{lookup_adapter, AdapterRegistry, NodeContext, NodeInfo};
use crate::error::VisError;
use crate::model::{
    Annotations, EdgeSnapshot, Node, NodeSnapshot, SearchState, TrialRecord, TrialSnapshot,
    TrialStatus, TrialStore, VisualizationSnapshot,
};

/// Optional knobs of a snapshot build.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotOptions<'a> {
    /// Merged into the snapshot metadata last; caller keys win.
    pub annotations: Option<&'a Annotations>,
    /// Adapter registry to consult instead of the process-wide one.
    pub registry: Option<&'a AdapterRegistry>,
}

impl<'a> SnapshotOptions<'a> {
    pub fn with_annotations(mut self, annotations: &'a Annotations) -> Self {
        self.annotations = Some(annotations);
        self
    }

    pub fn with_registry(mut self, registry: &'a AdapterRegistry) -> Self {
        self.registry = Some(registry);
        self
    }
}

/// Builds a snapshot with the default formatter chain (structured serialization, then `Debug`).
pub fn build_snapshot<St>(
    state: &St,
    options: &SnapshotOptions<'_>,
) -> Result<VisualizationSnapshot, VisError>
where
    St: SearchState + ?Sized,
    St::Payload: Serialize + Debug,
{
    build_snapshot_with(state, &FormatterChain::<St::Payload>::structured(), options)
}

/// Builds a snapshot formatting node payloads with `formatter`.
///
/// A failing formatter degrades only that node to a placeholder; pass a [`FormatterChain`] to
/// try further strategies first.
pub fn build_snapshot_with<St, F>(
    state: &St,
    formatter: &F,
    options: &SnapshotOptions<'_>,
) -> Result<VisualizationSnapshot, VisError>
where
    St: SearchState + ?Sized,
    F: StateFormatter<St::Payload> + ?Sized,
{
    let type_name = state.state_type_name();
    let tree = state.tree().ok_or_else(|| {
        VisError::invalid_state(format!("state of type '{type_name}' does not expose a tree"))
    })?;
    let trials = state.trial_store();
    let diagnostics = state.diagnostics();

    let adapter = match options.registry {
        Some(registry) => registry.lookup(type_name),
        None => lookup_adapter(type_name),
    };
    let algorithm = adapter.algorithm_name(diagnostics);

    let mut nodes = Vec::with_capacity(tree.len());
    let mut edges = Vec::with_capacity(tree.len().saturating_sub(1));
    for node in tree.nodes() {
        let join = join_trial(node, trials);

        let state_repr = if node.is_root() {
            "ROOT".to_owned()
        } else {
            let payload = node.state().ok_or_else(|| {
                VisError::invalid_state(format!(
                    "non-root node {} must have an associated state",
                    node.id()
                ))
            })?;
            formatter.format_state(payload).unwrap_or_else(|err| {
                tracing::debug!(node = %node.id(), error = %err, "state formatter failed");
                super::UNFORMATTABLE_STATE.to_owned()
            })
        };

        let ctx = NodeContext {
            node: NodeInfo {
                id: node.id(),
                parent: node.parent(),
                depth: node.depth(),
                score: node.score(),
            },
            diagnostics,
            tree,
        };
        let algo_metrics = adapter.extract(&ctx);

        if let Some(parent) = node.parent() {
            edges.push(EdgeSnapshot {
                source: parent,
                target: node.id(),
                action: join.action.clone(),
            });
        }

        nodes.push(NodeSnapshot {
            id: node.id(),
            trial_id: node.trial_id().cloned(),
            parent_id: node.parent(),
            depth: node.depth(),
            score: node.score(),
            state_repr,
            action_from_parent: join.action,
            created_at: join.created_at,
            completed_at: join.completed_at,
            status: join.status,
            annotations: Annotations::new(),
            algo_metrics,
        });
    }

    let trial_snapshots = trials.map(trial_snapshots).unwrap_or_default();

    Ok(VisualizationSnapshot::create_with_metadata(
        nodes,
        edges,
        trial_snapshots,
        &algorithm,
        options.annotations,
    )?)
}

#[derive(Debug, Default)]
struct TrialJoin {
    action: Option<String>,
    created_at: Option<String>,
    completed_at: Option<String>,
    status: Option<TrialStatus>,
}

fn join_trial<S>(node: &Node<S>, trials: Option<&TrialStore>) -> TrialJoin {
    let mut join = TrialJoin {
        status: node.is_root().then_some(TrialStatus::Root),
        ..TrialJoin::default()
    };
    let Some(trial_id) = node.trial_id() else {
        return join;
    };

    match trials.and_then(|store| store.lookup(trial_id)) {
        Some(TrialRecord::Finished(trial)) => {
            join.action = Some(trial.action.clone());
            join.created_at = Some(trial.created_at.clone());
            join.completed_at = trial.completed_at.clone();
            join.status = Some(trial.trial_status.clone());
        }
        Some(TrialRecord::Running(trial)) => {
            join.action = Some(trial.action.clone());
            join.created_at = Some(trial.created_at.clone());
            join.status = Some(TrialStatus::Running);
        }
        // The record was reclaimed after the node landed in the tree.
        None => {
            if join.status.is_none() {
                join.status = Some(TrialStatus::Complete);
            }
        }
    }
    join
}

fn trial_snapshots(store: &TrialStore) -> Vec<TrialSnapshot> {
    let finished = store.finished().values().map(|trial| TrialSnapshot {
        trial_id: trial.trial_id.clone(),
        node_to_expand: trial.node_to_expand,
        action: trial.action.clone(),
        score: trial.score,
        created_at: trial.created_at.clone(),
        completed_at: trial.completed_at.clone(),
        trial_status: trial.trial_status.clone(),
    });
    // Running trials never carry a score or completion time, whatever the record says.
    let running = store.running().values().map(|trial| TrialSnapshot {
        trial_id: trial.trial_id.clone(),
        node_to_expand: trial.node_to_expand,
        action: trial.action.clone(),
        score: None,
        created_at: trial.created_at.clone(),
        completed_at: None,
        trial_status: TrialStatus::Running,
    });
    finished.chain(running).collect()
}
