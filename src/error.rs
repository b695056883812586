// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Error taxonomy shared by the snapshot builder, renderers and the render facade.

use std::error::Error as StdError;
use std::path::PathBuf;

use crate::color::ColorError;
use crate::model::SnapshotError;

pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Coarse classification used by boundary code (e.g. the session tool) to pick a response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidState,
    DependencyNotFound,
    Render,
    InvalidInput,
}

#[derive(Debug, thiserror::Error)]
pub enum VisError {
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },

    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("{dependency} not found: {hint}")]
    DependencyNotFound { dependency: &'static str, hint: String },

    #[error("{backend} render failed: {message}")]
    Render {
        backend: &'static str,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error(
        "unsupported format '{format}'{}; supported formats: {}",
        did_you_mean(.suggestion),
        .supported.join(", ")
    )]
    UnsupportedFormat {
        format: String,
        supported: Vec<&'static str>,
        suggestion: Option<&'static str>,
    },

    #[error("invalid option `{option}`: {reason}")]
    InvalidOption { option: &'static str, reason: String },

    #[error(transparent)]
    Color(#[from] ColorError),
}

fn did_you_mean(suggestion: &Option<&str>) -> String {
    suggestion.map(|s| format!(" (did you mean '{s}'?)")).unwrap_or_default()
}

impl VisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidState { .. } | Self::Snapshot(_) => ErrorKind::InvalidState,
            Self::DependencyNotFound { .. } => ErrorKind::DependencyNotFound,
            Self::Render { .. } => ErrorKind::Render,
            Self::UnsupportedFormat { .. } | Self::InvalidOption { .. } | Self::Color(_) => {
                ErrorKind::InvalidInput
            }
        }
    }

    pub(crate) fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState { reason: reason.into() }
    }

    pub(crate) fn render(backend: &'static str, message: impl Into<String>) -> Self {
        Self::Render { backend, message: message.into(), source: None }
    }

    pub(crate) fn render_with(
        backend: &'static str,
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::Render { backend, message: message.into(), source: Some(source.into()) }
    }

    pub(crate) fn write_failed(backend: &'static str, path: PathBuf, source: std::io::Error) -> Self {
        Self::render_with(backend, format!("failed to write {}", path.display()), source)
    }
}
