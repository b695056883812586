// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! The upstream contract (tree, trials, diagnostics, [`SearchState`]) on one side and the
//! immutable [`VisualizationSnapshot`] that renderers consume on the other.

pub mod diagnostics;
pub mod ids;
pub mod snapshot;
pub mod state;
pub mod tree;
pub mod trial;

pub use diagnostics::{
    AlgoDiagnostics, BanditStats, GenCont, LeafQueueStats, MctsStats, Observation, PruningConfig,
    PruningStats, ProbDist, QueuedLeaf, StackedAction, ThompsonModel, ThompsonStats,
};
pub use ids::{NodeId, TrialId, TrialIdError};
pub use snapshot::{
    AlgoMetric, AlgoMetrics, Annotations, EdgeSnapshot, NodeSnapshot, SnapshotError,
    TrialSnapshot, VisualizationSnapshot,
};
pub use state::{SearchState, TreeState};
pub use tree::{Node, Tree, TreeError, TreeTopology, ROOT_SCORE};
pub use trial::{Trial, TrialRecord, TrialStatus, TrialStore};
