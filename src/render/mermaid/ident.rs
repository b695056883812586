// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use crate::model::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MermaidIdentError {
    Empty,
    ContainsWhitespace,
    InvalidChar { ch: char },
}

impl fmt::Display for MermaidIdentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("must not be empty"),
            Self::ContainsWhitespace => f.write_str("must not contain whitespace"),
            Self::InvalidChar { ch } => write!(f, "contains invalid character: '{ch}'"),
        }
    }
}

impl std::error::Error for MermaidIdentError {}

pub(super) fn validate_mermaid_ident(ident: &str) -> Result<(), MermaidIdentError> {
    if ident.is_empty() {
        return Err(MermaidIdentError::Empty);
    }
    if ident.chars().any(|c| c.is_whitespace()) {
        return Err(MermaidIdentError::ContainsWhitespace);
    }
    if let Some(ch) = ident.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '_') {
        return Err(MermaidIdentError::InvalidChar { ch });
    }
    Ok(())
}

/// Mermaid node identifier for a snapshot node: `node_root`, `node<id>`, or `node_n<abs>` for
/// other negative ids.
pub(super) fn node_ident(id: NodeId) -> String {
    match id.get() {
        _ if id.is_root() => "node_root".to_owned(),
        raw if raw >= 0 => format!("node{raw}"),
        raw => format!("node_n{}", raw.unsigned_abs()),
    }
}

/// Mermaid theme names are spliced into an init directive, so they must be plain words.
pub(super) fn validate_theme(theme: &str) -> Result<(), MermaidIdentError> {
    if theme.is_empty() {
        return Err(MermaidIdentError::Empty);
    }
    match theme.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '_' && *c != '-') {
        Some(ch) if ch.is_whitespace() => Err(MermaidIdentError::ContainsWhitespace),
        Some(ch) => Err(MermaidIdentError::InvalidChar { ch }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::{node_ident, validate_mermaid_ident, validate_theme, MermaidIdentError};
    use crate::model::NodeId;

    #[test]
    fn node_idents_are_valid_for_every_id() {
        for (raw, expected) in [(-1, "node_root"), (0, "node0"), (42, "node42"), (-7, "node_n7")] {
            let ident = node_ident(NodeId::new(raw));
            assert_eq!(ident, expected);
            assert_eq!(validate_mermaid_ident(&ident), Ok(()));
        }
    }

    #[test]
    fn validation_rejects_separators() {
        assert_eq!(validate_mermaid_ident(""), Err(MermaidIdentError::Empty));
        assert_eq!(validate_mermaid_ident("a b"), Err(MermaidIdentError::ContainsWhitespace));
        assert_eq!(validate_mermaid_ident("node-1"), Err(MermaidIdentError::InvalidChar { ch: '-' }));
    }

    #[test]
    fn themes_must_be_plain_words() {
        assert_eq!(validate_theme("dark"), Ok(()));
        assert_eq!(validate_theme("base-2"), Ok(()));
        assert_eq!(validate_theme("x'}}%%"), Err(MermaidIdentError::InvalidChar { ch: '\'' }));
        assert_eq!(validate_theme("a b"), Err(MermaidIdentError::ContainsWhitespace));
    }
}
