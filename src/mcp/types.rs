// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, VisError};

fn default_format() -> String {
    "png".to_owned()
}

fn default_show_scores() -> bool {
    true
}

fn default_max_label_length() -> usize {
    20
}

/// Options a session tool passes along with the session's current search state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TreeVisualizationParams {
    /// Graphviz output format: `png`, `pdf`, `svg`, `jpg`, `jpeg`, `dot` or `gv`.
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_show_scores")]
    pub show_scores: bool,
    #[serde(default = "default_max_label_length")]
    pub max_label_length: usize,
    #[serde(default)]
    pub title: Option<String>,
}

impl Default for TreeVisualizationParams {
    fn default() -> Self {
        Self {
            format: default_format(),
            show_scores: default_show_scores(),
            max_label_length: default_max_label_length(),
            title: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TreeVisualizationResponse {
    pub format: String,
    pub dot_source: String,
    /// Snapshot nodes, root included.
    pub node_count: u64,
    pub visualization_generated: bool,
    /// Rendered image bytes (standard base64) for image formats; absent for `dot`/`gv`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_base64: Option<String>,
}

/// A failed visualization request, shaped so the tool can give actionable guidance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisualizationFailure {
    MissingDependency { dependency: String, message: String },
    RenderFailed { message: String },
    InvalidState { message: String },
    InvalidRequest { message: String },
}

impl VisualizationFailure {
    pub fn message(&self) -> &str {
        match self {
            Self::MissingDependency { message, .. }
            | Self::RenderFailed { message }
            | Self::InvalidState { message }
            | Self::InvalidRequest { message } => message,
        }
    }
}

impl From<VisError> for VisualizationFailure {
    fn from(err: VisError) -> Self {
        let message = err.to_string();
        match (err.kind(), &err) {
            (_, VisError::DependencyNotFound { dependency, .. }) => {
                Self::MissingDependency { dependency: (*dependency).to_owned(), message }
            }
            (ErrorKind::InvalidState, _) => Self::InvalidState { message },
            (ErrorKind::InvalidInput, _) => Self::InvalidRequest { message },
            (ErrorKind::Render | ErrorKind::DependencyNotFound, _) => Self::RenderFailed { message },
        }
    }
}
