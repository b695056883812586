// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Node payload formatting strategies.

use std::fmt::Debug;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Text used when every strategy of a chain failed for a node.
pub const UNFORMATTABLE_STATE: &str = "<unformattable state>";

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("structured serialization failed")]
    Structured(#[source] serde_json::Error),
    #[error("{message}")]
    Custom { message: String },
}

impl FormatError {
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom { message: message.into() }
    }
}

/// Turns a node payload into its display string.
///
/// Plain closures `Fn(&S) -> String` are formatters; implement the trait directly for a
/// strategy that can fail.
pub trait StateFormatter<S: ?Sized> {
    fn format_state(&self, state: &S) -> Result<String, FormatError>;
}

impl<S: ?Sized, F> StateFormatter<S> for F
where
    F: Fn(&S) -> String,
{
    fn format_state(&self, state: &S) -> Result<String, FormatError> {
        Ok(self(state))
    }
}

/// Formats through the payload's structured field mapping: string payloads are used verbatim,
/// everything else becomes compact JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredFormatter;

impl<S: Serialize + ?Sized> StateFormatter<S> for StructuredFormatter {
    fn format_state(&self, state: &S) -> Result<String, FormatError> {
        match serde_json::to_value(state).map_err(FormatError::Structured)? {
            Value::String(text) => Ok(text),
            other => Ok(other.to_string()),
        }
    }
}

/// Formats through `Debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugFormatter;

impl<S: Debug + ?Sized> StateFormatter<S> for DebugFormatter {
    fn format_state(&self, state: &S) -> Result<String, FormatError> {
        Ok(format!("{state:?}"))
    }
}

/// Ordered strategies; the first one that succeeds wins.
pub struct FormatterChain<'a, S: ?Sized> {
    strategies: Vec<&'a dyn StateFormatter<S>>,
}

impl<'a, S: ?Sized> Default for FormatterChain<'a, S> {
    fn default() -> Self {
        Self { strategies: Vec::new() }
    }
}

impl<'a, S: ?Sized> FormatterChain<'a, S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, strategy: &'a dyn StateFormatter<S>) -> Self {
        self.strategies.push(strategy);
        self
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Never fails: falls back to [`UNFORMATTABLE_STATE`].
    pub fn format(&self, state: &S) -> String {
        for (idx, strategy) in self.strategies.iter().enumerate() {
            match strategy.format_state(state) {
                Ok(text) => return text,
                Err(err) => debug!(strategy = idx, error = %err, "state formatter failed"),
            }
        }
        UNFORMATTABLE_STATE.to_owned()
    }
}

impl<'a, S: Serialize + Debug + ?Sized> FormatterChain<'a, S> {
    /// Structured serialization first, `Debug` as the fallback.
    pub fn structured() -> Self {
        Self::new().then(&StructuredFormatter).then(&DebugFormatter)
    }
}

impl<'a, S: Debug + ?Sized> FormatterChain<'a, S> {
    /// A caller-supplied formatter with `Debug` as the fallback.
    pub fn custom(formatter: &'a dyn StateFormatter<S>) -> Self {
        Self::new().then(formatter).then(&DebugFormatter)
    }
}

impl<'a, S: ?Sized> StateFormatter<S> for FormatterChain<'a, S> {
    fn format_state(&self, state: &S) -> Result<String, FormatError> {
        Ok(self.format(state))
    }
}
