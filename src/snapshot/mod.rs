// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Snapshot builder: projects a live [`SearchState`](crate::model::SearchState) into an immutable
//! [`VisualizationSnapshot`](crate::model::VisualizationSnapshot).
//!
//! Per-node problems (formatter failures, adapter errors) degrade that node only. A missing tree
//! or a non-root node without payload is an invalid state and aborts the build.

mod builder;
mod formatter;


pub use builder::{build_snapshot, build_snapshot_with, SnapshotOptions};
pub use formatter::{
    DebugFormatter, FormatError, FormatterChain, StateFormatter, StructuredFormatter,
    UNFORMATTABLE_STATE,
};
