//! Aging status: how long a task has sat in its current stage.
//!
//! Independent of the age counter and the stage classifier — this only
//! looks at the stage entry timestamp against per-stage thresholds.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::Stage;
use crate::time::hours_between;

/// UI-facing severity flag. Ordered: Normal < Warning < Overdue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgingStatus {
    Normal,
    Warning,
    Overdue,
}

impl AgingStatus {
    /// Badge text for list views.
    pub fn badge(self) -> &'static str {
        match self {
            AgingStatus::Normal => "",
            AgingStatus::Warning => "!",
            AgingStatus::Overdue => "!!",
        }
    }
}

/// Per-stage warn/expire thresholds, in hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageThresholds {
    pub warn_hours: f64,
    pub expire_hours: f64,
}

/// Read-only mapping of stage -> thresholds, owned by the configuration
/// store. Stages without an entry (queue, done) are never flagged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPolicy {
    thresholds: HashMap<Stage, StageThresholds>,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        let mut thresholds = HashMap::new();
        thresholds.insert(Stage::Do, StageThresholds { warn_hours: 24.0, expire_hours: 30.0 });
        thresholds.insert(Stage::Doing, StageThresholds { warn_hours: 6.0, expire_hours: 7.0 });
        // "today" has no real warn window: past one hour it is overdue.
        thresholds.insert(Stage::Today, StageThresholds { warn_hours: 1.0, expire_hours: 1.0 });
        Self { thresholds }
    }
}

impl ThresholdPolicy {
    /// A policy that never flags anything.
    pub fn empty() -> Self {
        Self { thresholds: HashMap::new() }
    }

    pub fn get(&self, stage: Stage) -> Option<StageThresholds> {
        self.thresholds.get(&stage).copied()
    }

    /// Override the thresholds for one stage.
    pub fn set(&mut self, stage: Stage, thresholds: StageThresholds) {
        self.thresholds.insert(stage, thresholds);
    }
}

/// Flag a task within its current stage based on elapsed time there.
pub fn annotate_aging_status(
    stage: Stage,
    stage_entry_date: DateTime<Utc>,
    now: DateTime<Utc>,
    policy: &ThresholdPolicy,
) -> AgingStatus {
    let Some(t) = policy.get(stage) else {
        return AgingStatus::Normal;
    };

    let elapsed = hours_between(stage_entry_date, now);
    if elapsed >= t.expire_hours {
        AgingStatus::Overdue
    } else if elapsed >= t.warn_hours {
        AgingStatus::Warning
    } else {
        AgingStatus::Normal
    }
}
