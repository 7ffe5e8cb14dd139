//! Signed task "age": days until, or past, the effective deadline.
//!
//! Sign convention: positive = on track / ahead, negative = behind. The UI
//! colors positive ages green and negative ages red.

use chrono::{DateTime, Duration, Utc};

use crate::task::Task;
use crate::time::{days_until, start_of_day};

/// Compute a task's age in whole days against `now`.
///
/// Three regimes:
/// - no schedule or no date: elapsed days since creation, always
///   non-negative — an unscheduled task is never "overdue", only old;
/// - due today or past due: remaining days, pushed out by `duration_days`
///   so the grace window elapses before the value goes negative;
/// - still ahead of the due date: remaining days, or the countdown to the
///   lead-window entry while that is still positive. Once inside the lead
///   window the value reverts to plain remaining days rather than going
///   negative on lead accounting alone.
///
/// `lead_hours`/`duration_hours` do not participate here; they only shift
/// the stage classifier's effective due point.
pub fn compute_age(task: &Task, now: DateTime<Utc>) -> i64 {
    let Some((schedule, due_date)) = task
        .schedule
        .as_ref()
        .and_then(|s| s.date.map(|d| (s, d)))
    else {
        return (now - task.created_at).num_days().abs();
    };

    let due = start_of_day(due_date);
    let remaining = days_until(due, now);

    if remaining < 1 {
        if schedule.duration_days <= 0 {
            return remaining;
        }
        // Grace window: the zero-point moves out by the expected effort.
        return days_until(due + Duration::days(schedule.duration_days), now);
    }

    if schedule.lead_days <= 0 {
        return remaining;
    }
    let adjusted = remaining - schedule.lead_days;
    if adjusted > 0 { adjusted } else { remaining }
}
