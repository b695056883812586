// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing::{debug, warn};

use super::{
    BestFirstSearchAdapter, MultiArmedBanditUcbAdapter, NodeContext, StandardMctsAdapter,
    ThompsonSamplingAdapter, TreeOfThoughtsBfsAdapter, VisualizerAdapter,
};
use crate::model::{AlgoDiagnostics, AlgoMetrics};

/// Algorithm name reported when no adapter is registered for a state type.
pub const UNKNOWN_ALGORITHM: &str = "Unknown";

static GLOBAL_REGISTRY: OnceLock<RwLock<AdapterRegistry>> = OnceLock::new();

/// Mapping from state type name to adapter. Last registration wins.
#[derive(Clone, Default)]
pub struct AdapterRegistry {
    adapters: HashMap<String, Arc<dyn VisualizerAdapter>>,
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterRegistry").field("names", &self.names()).finish()
    }
}

impl AdapterRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the built-in adapters.
    pub fn with_builtins() -> Self {
        let mut adapters: HashMap<String, Arc<dyn VisualizerAdapter>> = HashMap::new();
        adapters.insert("MCTSState".into(), Arc::new(StandardMctsAdapter::default()));
        adapters.insert("ABMCTSAAlgoState".into(), Arc::new(ThompsonSamplingAdapter));
        adapters.insert("BFSState".into(), Arc::new(BestFirstSearchAdapter));
        adapters.insert("UCBState".into(), Arc::new(MultiArmedBanditUcbAdapter::default()));
        adapters.insert("ToTBFSState".into(), Arc::new(TreeOfThoughtsBfsAdapter));
        #[cfg(feature = "pruning")]
        adapters.insert("ABMCTSMState".into(), Arc::new(super::SubtreePruningAdapter::default()));
        Self { adapters }
    }

    /// Registers `adapter` for `state_type_name`, replacing (with a warning) any earlier one.
    pub fn register(
        &mut self,
        state_type_name: impl Into<String>,
        adapter: Arc<dyn VisualizerAdapter>,
    ) -> Option<Arc<dyn VisualizerAdapter>> {
        let state_type_name = state_type_name.into();
        let previous = self.adapters.insert(state_type_name.clone(), adapter);
        if previous.is_some() {
            warn!(state_type = %state_type_name, "adapter already registered; overwriting");
        }
        previous
    }

    /// Looks up the adapter for `state_type_name`; a miss is logged and reported as
    /// [`AdapterLookup::Missing`].
    pub fn lookup(&self, state_type_name: &str) -> AdapterLookup {
        match self.adapters.get(state_type_name) {
            Some(adapter) => AdapterLookup::Found(Arc::clone(adapter)),
            None => {
                warn!(
                    state_type = %state_type_name,
                    "no adapter registered for state type; node metrics will be empty"
                );
                AdapterLookup::Missing { state_type_name: state_type_name.to_owned() }
            }
        }
    }

    pub fn contains(&self, state_type_name: &str) -> bool {
        self.adapters.contains_key(state_type_name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.adapters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Result of an adapter lookup. A missing adapter behaves like one that returns no metrics.
#[derive(Clone)]
pub enum AdapterLookup {
    Found(Arc<dyn VisualizerAdapter>),
    Missing { state_type_name: String },
}

impl fmt::Debug for AdapterLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(_) => f.write_str("Found(..)"),
            Self::Missing { state_type_name } => {
                f.debug_struct("Missing").field("state_type_name", state_type_name).finish()
            }
        }
    }
}

impl AdapterLookup {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing { .. })
    }

    pub fn algorithm_name(&self, diagnostics: &AlgoDiagnostics) -> String {
        match self {
            Self::Found(adapter) => adapter.algorithm_name(diagnostics),
            Self::Missing { .. } => UNKNOWN_ALGORITHM.to_owned(),
        }
    }

    /// Metrics for one node; adapter errors degrade to an empty map.
    pub fn extract(&self, ctx: &NodeContext<'_>) -> AlgoMetrics {
        let Self::Found(adapter) = self else {
            return AlgoMetrics::new();
        };
        adapter.extract_node_metrics(ctx).unwrap_or_else(|err| {
            debug!(node = %ctx.node.id, error = %err, "metric extraction failed; using empty metrics");
            AlgoMetrics::new()
        })
    }
}

/// The process-wide registry, created with the built-in adapters on first use.
pub fn global_registry() -> &'static RwLock<AdapterRegistry> {
    GLOBAL_REGISTRY.get_or_init(|| RwLock::new(AdapterRegistry::with_builtins()))
}

/// Registers an adapter in the process-wide registry. Hosts should serialize registration.
pub fn register_adapter(
    state_type_name: impl Into<String>,
    adapter: Arc<dyn VisualizerAdapter>,
) -> Option<Arc<dyn VisualizerAdapter>> {
    let mut registry = global_registry().write().unwrap_or_else(PoisonError::into_inner);
    registry.register(state_type_name, adapter)
}

pub fn lookup_adapter(state_type_name: &str) -> AdapterLookup {
    let registry = global_registry().read().unwrap_or_else(PoisonError::into_inner);
    registry.lookup(state_type_name)
}
