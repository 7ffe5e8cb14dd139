//! Automatic stage selection for scheduled tasks.
//!
//! Manual stage moves always win; the classifier only runs when a sweep (or
//! a schedule edit) asks for it, and only for enabled schedules.

use chrono::{DateTime, Duration, Utc};

use crate::schedule::ScheduleDescriptor;
use crate::task::{Stage, StageHistoryEntry, Task};
use crate::time::start_of_day;

// Threshold bands for the automatic scheduling policy. Fixed policy
// constants; the per-stage aging thresholds are a separate, configurable
// concept.
const DOING_WINDOW_DAYS: i64 = 7;
const DO_WINDOW_DAYS: i64 = 30;

/// Map days-remaining to the stage a task should occupy.
pub fn classify_stage(days_remaining: Option<i64>) -> Stage {
    match days_remaining {
        None => Stage::Queue,
        Some(d) if d <= 0 => Stage::Today,
        Some(d) if d <= DOING_WINDOW_DAYS => Stage::Doing,
        Some(d) if d <= DO_WINDOW_DAYS => Stage::Do,
        Some(_) => Stage::Queue,
    }
}

/// Whole days until the lead-adjusted due point, start-of-day truncation on
/// both sides.
///
/// Rounds differently from `compute_age` on purpose: the classifier works
/// on calendar days, the age counter on elapsed 24h periods.
pub fn effective_days_remaining(schedule: &ScheduleDescriptor, now: DateTime<Utc>) -> Option<i64> {
    let date = schedule.date?;
    let lead =
        Duration::days(schedule.lead_days.max(0)) + Duration::hours(schedule.lead_hours.max(0));
    let effective = (start_of_day(date) - lead).date_naive();
    Some((effective - now.date_naive()).num_days())
}

/// Result of a stage move, for logging and history inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageChange {
    pub from: Stage,
    pub to: Stage,
    pub days_in_stage: i64,
}

/// Move a task to `new_stage`: reset the entry timestamp and append the
/// closing record for the old stage plus the opening record for the new one.
pub fn apply_stage(task: &mut Task, new_stage: Stage, now: DateTime<Utc>) -> StageChange {
    let days_in_stage = (now - task.stage_entry_date).num_days();
    task.history.push(StageHistoryEntry {
        stage: task.time_stage,
        entry_date: task.stage_entry_date,
        days_in_stage: Some(days_in_stage),
    });
    task.history.push(StageHistoryEntry {
        stage: new_stage,
        entry_date: now,
        days_in_stage: None,
    });

    let change = StageChange {
        from: task.time_stage,
        to: new_stage,
        days_in_stage,
    };
    task.time_stage = new_stage;
    task.stage_entry_date = now;
    change
}

/// One re-scheduling pass over a single task. Returns the move, if any.
///
/// Completed tasks and tasks without an enabled, dated schedule are left
/// where they are.
pub fn auto_schedule(task: &mut Task, now: DateTime<Utc>) -> Option<StageChange> {
    if task.time_stage == Stage::Done {
        return None;
    }
    let schedule = task.schedule.as_ref()?;
    if !schedule.enabled || schedule.date.is_none() {
        return None;
    }

    let target = classify_stage(effective_days_remaining(schedule, now));
    if target == task.time_stage {
        return None;
    }
    Some(apply_stage(task, target, now))
}
