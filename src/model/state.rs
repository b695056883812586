// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::diagnostics::AlgoDiagnostics;
use super::tree::Tree;
use super::trial::TrialStore;

/// Read-only view of a live search state.
///
/// The snapshot builder checks [`SearchState::tree`] once and fails with an invalid-state error
/// when it is absent; a missing trial store is fine and yields trial-less snapshots.
pub trait SearchState {
    type Payload;

    /// Runtime type name used to look up the metric adapter.
    fn state_type_name(&self) -> &str;

    fn tree(&self) -> Option<&Tree<Self::Payload>>;

    fn trial_store(&self) -> Option<&TrialStore> {
        None
    }

    fn diagnostics(&self) -> &AlgoDiagnostics;
}

/// Ready-made [`SearchState`] for hosts that hold their tree, trials and diagnostics directly.
#[derive(Debug)]
pub struct TreeState<S> {
    type_name: String,
    tree: Option<Tree<S>>,
    trials: Option<TrialStore>,
    diagnostics: AlgoDiagnostics,
}

impl<S> TreeState<S> {
    /// Names the state after its diagnostics family, so the built-in adapter is picked up.
    pub fn new(tree: Tree<S>, diagnostics: AlgoDiagnostics) -> Self {
        let type_name = diagnostics.default_type_name().unwrap_or("TreeState").to_owned();
        Self { type_name, tree: Some(tree), trials: None, diagnostics }
    }

    /// A state that carries no tree at all; snapshotting it is an invalid-state error.
    pub fn without_tree(type_name: impl Into<String>, diagnostics: AlgoDiagnostics) -> Self {
        Self { type_name: type_name.into(), tree: None, trials: None, diagnostics }
    }

    pub fn named(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = type_name.into();
        self
    }

    pub fn with_trials(mut self, trials: TrialStore) -> Self {
        self.trials = Some(trials);
        self
    }

    pub fn tree_mut(&mut self) -> Option<&mut Tree<S>> {
        self.tree.as_mut()
    }

    pub fn trials_mut(&mut self) -> &mut TrialStore {
        self.trials.get_or_insert_with(TrialStore::default)
    }

    pub fn diagnostics_mut(&mut self) -> &mut AlgoDiagnostics {
        &mut self.diagnostics
    }
}

impl<S> SearchState for TreeState<S> {
    type Payload = S;

    fn state_type_name(&self) -> &str {
        &self.type_name
    }

    fn tree(&self) -> Option<&Tree<S>> {
        self.tree.as_ref()
    }

    fn trial_store(&self) -> Option<&TrialStore> {
        self.trials.as_ref()
    }

    fn diagnostics(&self) -> &AlgoDiagnostics {
        &self.diagnostics
    }
}
