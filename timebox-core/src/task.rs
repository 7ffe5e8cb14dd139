//! Task model for the time-boxed stage workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule::ScheduleDescriptor;

/// A task's current bucket in the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Queue,
    Do,
    Doing,
    Today,
    Done,
}

impl Stage {
    pub const ALL: [Stage; 5] = [Stage::Queue, Stage::Do, Stage::Doing, Stage::Today, Stage::Done];

    pub fn label(self) -> &'static str {
        match self {
            Stage::Queue => "queue",
            Stage::Do => "do",
            Stage::Doing => "doing",
            Stage::Today => "today",
            Stage::Done => "done",
        }
    }
}

/// One record in a task's stage history. Append-only: never mutated after
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageHistoryEntry {
    pub stage: Stage,
    pub entry_date: DateTime<Utc>,

    /// Whole days spent in the stage; set on the closing record only.
    #[serde(default)]
    pub days_in_stage: Option<i64>,
}

/// Core task type.
///
/// Storage lives elsewhere; this stays small and serializable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub schedule: Option<ScheduleDescriptor>,

    pub time_stage: Stage,

    /// When the task entered its current stage. Reset on every stage move.
    pub stage_entry_date: DateTime<Utc>,

    #[serde(default)]
    pub history: Vec<StageHistoryEntry>,
}

impl Task {
    pub fn new(id: impl Into<String>, title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            created_at: now,
            schedule: None,
            time_stage: Stage::Queue,
            stage_entry_date: now,
            history: vec![StageHistoryEntry {
                stage: Stage::Queue,
                entry_date: now,
                days_in_stage: None,
            }],
        }
    }

    pub fn with_schedule(mut self, schedule: ScheduleDescriptor) -> Self {
        self.schedule = Some(schedule);
        self
    }

    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.time_stage = stage;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_task_opens_queue_history() {
        let now = Utc.with_ymd_and_hms(2026, 2, 21, 8, 0, 0).unwrap();
        let t = Task::new("t1", "write report", now);

        assert_eq!(t.time_stage, Stage::Queue);
        assert_eq!(t.stage_entry_date, now);
        assert_eq!(t.history.len(), 1);
        assert_eq!(t.history[0].stage, Stage::Queue);
        assert_eq!(t.history[0].days_in_stage, None);
    }

    #[test]
    fn test_task_round_trips_through_json() {
        let now = Utc.with_ymd_and_hms(2026, 2, 21, 8, 0, 0).unwrap();
        let t = Task::new("t1", "write report", now).with_stage(Stage::Doing);

        let json = serde_json::to_string(&t).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
        assert!(json.contains(r#""time_stage":"doing""#));
    }
}
