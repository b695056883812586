// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Structured dumps (JSON, YAML) of a snapshot.
//!
//! Both encodings serialize the same [`Value`] produced by [`snapshot_to_value`], so they agree on
//! content and key order.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use super::{output_path, write_artifact};
use crate::error::VisError;
use crate::model::{NodeSnapshot, VisualizationSnapshot};

const ALGO_METRICS_FIELD: &str = "algo_metrics";
const ANNOTATIONS_FIELD: &str = "annotations";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DumpFormat {
    Json,
    Yaml,
    Yml,
}

impl DumpFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Yml => "yml",
        }
    }

    fn backend(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml | Self::Yml => "yaml",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpOptions {
    /// Node fields to keep; `None` keeps every field. Names must be node record fields.
    pub include_fields: Option<Vec<String>>,
    pub include_algo_metrics: bool,
    pub include_annotations: bool,
    /// JSON indentation width; `0` writes compact JSON. YAML ignores it.
    pub indent: usize,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            include_fields: None,
            include_algo_metrics: true,
            include_annotations: true,
            indent: 2,
        }
    }
}

/// The nested record structure both encodings serialize: `nodes`, `edges`, `trials`, `metadata`.
pub fn snapshot_to_value(
    snapshot: &VisualizationSnapshot,
    options: &DumpOptions,
) -> Result<Value, VisError> {
    if let Some(fields) = &options.include_fields {
        if let Some(unknown) = fields.iter().find(|f| !NodeSnapshot::FIELD_NAMES.contains(&f.as_str())) {
            return Err(VisError::InvalidOption {
                option: "include_fields",
                reason: format!(
                    "unknown node field '{unknown}'; expected one of: {}",
                    NodeSnapshot::FIELD_NAMES.join(", ")
                ),
            });
        }
    }

    let nodes = snapshot
        .nodes()
        .iter()
        .map(|node| node_record(node, options))
        .collect::<Result<Vec<_>, _>>()?;

    let mut out = Map::new();
    out.insert("nodes".into(), Value::Array(nodes));
    out.insert("edges".into(), to_value(snapshot.edges())?);
    out.insert("trials".into(), to_value(snapshot.trials())?);
    out.insert("metadata".into(), Value::Object(snapshot.metadata().clone()));
    Ok(Value::Object(out))
}

fn node_record(node: &NodeSnapshot, options: &DumpOptions) -> Result<Value, VisError> {
    let Value::Object(mut record) = to_value(node)? else {
        return Err(VisError::render("json", "node did not serialize to a record"));
    };
    if let Some(fields) = &options.include_fields {
        record.retain(|key, _| fields.iter().any(|f| f == key));
    }
    if !options.include_algo_metrics {
        record.remove(ALGO_METRICS_FIELD);
    }
    if !options.include_annotations {
        record.remove(ANNOTATIONS_FIELD);
    }
    Ok(Value::Object(record))
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, VisError> {
    serde_json::to_value(value)
        .map_err(|err| VisError::render_with("json", "failed to convert snapshot to records", err))
}

/// JSON text of `value`, indented by `indent` spaces (`0` = compact).
pub(crate) fn to_json_string(value: &Value, indent: usize) -> Result<String, VisError> {
    if indent == 0 {
        return serde_json::to_string(value)
            .map_err(|err| VisError::render_with("json", "failed to encode JSON", err));
    }
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|err| VisError::render_with("json", "failed to encode JSON", err))?;
    String::from_utf8(buf).map_err(|err| VisError::render_with("json", "encoded JSON is not UTF-8", err))
}

#[cfg(feature = "yaml")]
pub(crate) fn to_yaml_string(value: &Value) -> Result<String, VisError> {
    serde_yaml::to_string(value)
        .map_err(|err| VisError::render_with("yaml", "failed to encode YAML", err))
}

#[cfg(not(feature = "yaml"))]
pub(crate) fn to_yaml_string(_value: &Value) -> Result<String, VisError> {
    Err(VisError::DependencyNotFound {
        dependency: "serde_yaml",
        hint: "YAML output needs the `yaml` feature of dryad".to_owned(),
    })
}

/// Writes `<basename>.<ext>` and returns its path.
pub fn dump_snapshot(
    snapshot: &VisualizationSnapshot,
    output_basename: &Path,
    format: DumpFormat,
    options: &DumpOptions,
) -> Result<PathBuf, VisError> {
    let value = snapshot_to_value(snapshot, options)?;
    let text = match format {
        DumpFormat::Json => to_json_string(&value, options.indent)?,
        DumpFormat::Yaml | DumpFormat::Yml => to_yaml_string(&value)?,
    };
    write_artifact(format.backend(), output_path(output_basename, format.extension()), text.as_bytes())
}
