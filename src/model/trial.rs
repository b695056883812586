// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Dryad-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Dryad and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ids::{NodeId, TrialId};

/// Lifecycle status of a trial, also used as the display status of a node.
///
/// Serialized as the upper-case status string; algorithm-defined statuses round-trip through
/// [`TrialStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrialStatus {
    Root,
    Running,
    Complete,
    Invalid,
    Other(String),
}

impl TrialStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Root => "ROOT",
            Self::Running => "RUNNING",
            Self::Complete => "COMPLETE",
            Self::Invalid => "INVALID",
            Self::Other(other) => other,
        }
    }
}

impl fmt::Display for TrialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for TrialStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "ROOT" => Self::Root,
            "RUNNING" => Self::Running,
            "COMPLETE" => Self::Complete,
            "INVALID" => Self::Invalid,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for TrialStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<TrialStatus> for String {
    fn from(value: TrialStatus) -> Self {
        match value {
            TrialStatus::Other(other) => other,
            known => known.as_str().to_owned(),
        }
    }
}

/// One attempt to expand `node_to_expand` with `action`.
#[derive(Debug, Clone, PartialEq)]
pub struct Trial {
    pub trial_id: TrialId,
    pub node_to_expand: NodeId,
    pub action: String,
    pub score: Option<f64>,
    pub created_at: String,
    pub completed_at: Option<String>,
    pub trial_status: TrialStatus,
}

/// Where a trial record was found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrialRecord<'a> {
    Finished(&'a Trial),
    Running(&'a Trial),
}

/// Finished and running trials, keyed by trial id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrialStore {
    finished: BTreeMap<TrialId, Trial>,
    running: BTreeMap<TrialId, Trial>,
}

impl TrialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finished(&self) -> &BTreeMap<TrialId, Trial> {
        &self.finished
    }

    pub fn running(&self) -> &BTreeMap<TrialId, Trial> {
        &self.running
    }

    pub fn insert_finished(&mut self, trial: Trial) {
        self.finished.insert(trial.trial_id.clone(), trial);
    }

    pub fn insert_running(&mut self, trial: Trial) {
        self.running.insert(trial.trial_id.clone(), trial);
    }

    /// Looks a trial up, preferring the finished record when both collections hold one.
    pub fn lookup(&self, trial_id: &TrialId) -> Option<TrialRecord<'_>> {
        self.finished
            .get(trial_id)
            .map(TrialRecord::Finished)
            .or_else(|| self.running.get(trial_id).map(TrialRecord::Running))
    }
}

#[cfg(test)]
mod tests {
    use super::{Trial, TrialRecord, TrialStatus, TrialStore};
    use crate::model::{NodeId, TrialId};

    fn trial(id: &str, status: &str) -> Trial {
        Trial {
            trial_id: TrialId::new(id).expect("trial id"),
            node_to_expand: NodeId::ROOT,
            action: "expand".to_owned(),
            score: Some(0.5),
            created_at: "2026-01-01T00:00:00Z".to_owned(),
            completed_at: None,
            trial_status: TrialStatus::from(status),
        }
    }

    #[test]
    fn status_strings_round_trip() {
        for raw in ["ROOT", "RUNNING", "COMPLETE", "INVALID", "PRUNED"] {
            let status = TrialStatus::from(raw);
            assert_eq!(String::from(status.clone()), raw);
            let json = serde_json::to_string(&status).expect("json");
            assert_eq!(json, format!("\"{raw}\""));
        }
        assert_eq!(TrialStatus::from("PRUNED"), TrialStatus::Other("PRUNED".to_owned()));
    }

    #[test]
    fn lookup_prefers_finished_record() {
        let mut store = TrialStore::new();
        store.insert_running(trial("t1", "RUNNING"));
        store.insert_finished(trial("t1", "COMPLETE"));
        store.insert_running(trial("t2", "RUNNING"));

        let t1 = TrialId::new("t1").expect("id");
        let t2 = TrialId::new("t2").expect("id");
        let missing = TrialId::new("t3").expect("id");
        assert!(matches!(store.lookup(&t1), Some(TrialRecord::Finished(_))));
        assert!(matches!(store.lookup(&t2), Some(TrialRecord::Running(_))));
        assert!(store.lookup(&missing).is_none());
    }
}
