// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Dryad: snapshot-and-render pipeline for tree-search state.
//!
//! A search algorithm exposes its tree, trial records and diagnostics through
//! [`SearchState`](model::SearchState). [`build_snapshot`] turns that into an immutable
//! [`VisualizationSnapshot`], with per-algorithm metrics contributed by the adapters in
//! [`adapters`]. The backends in [`render`] write the snapshot as Graphviz, Mermaid, JSON/YAML or a
//! self-contained interactive HTML page; [`render()`] and [`render_formats`] are the one-call
//! facade over both steps.

pub mod adapters;
pub mod color;
pub mod error;
pub mod mcp;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod snapshot;

/// Crate version, recorded in snapshot metadata as `dryad_version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{ErrorKind, VisError};
pub use model::{VisualizationSnapshot, TreeState};
pub use pipeline::{
    render, render_formats, render_snapshot, FormattedState, OutputFormat, RenderInput,
    SUPPORTED_FORMATS,
};
pub use render::RenderOptions;
pub use snapshot::{build_snapshot, build_snapshot_with, SnapshotOptions};
