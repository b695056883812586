// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{AdapterError, NodeContext, VisualizerAdapter};
use crate::model::{AlgoDiagnostics, AlgoMetrics};

/// Tree-of-thoughts breadth-first search exposes no per-node metrics yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeOfThoughtsBfsAdapter;

impl VisualizerAdapter for TreeOfThoughtsBfsAdapter {
    fn extract_node_metrics(&self, _ctx: &NodeContext<'_>) -> Result<AlgoMetrics, AdapterError> {
        Ok(AlgoMetrics::new())
    }

    fn algorithm_name(&self, _diagnostics: &AlgoDiagnostics) -> String {
        "TreeOfThoughtsBFS".to_owned()
    }
}
