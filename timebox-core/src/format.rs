//! Human-readable schedule summaries for list views. Pure formatting.

use crate::schedule::{Frequency, RecurrenceEnd, RecurrenceRule, ScheduleDescriptor};

/// One-line summary of a schedule: cadence, lead/duration annotations and
/// the alarm glyph. Empty for a bare schedule.
pub fn describe_schedule(schedule: &ScheduleDescriptor) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(rule) = &schedule.recurring {
        parts.push(describe_recurrence(rule));
    }
    if schedule.lead_days > 0 || schedule.lead_hours > 0 {
        parts.push(format!(
            "lead {}",
            describe_offset(schedule.lead_days, schedule.lead_hours)
        ));
    }
    if schedule.duration_days > 0 || schedule.duration_hours > 0 {
        parts.push(format!(
            "takes {}",
            describe_offset(schedule.duration_days, schedule.duration_hours)
        ));
    }
    if schedule.alarm_active() {
        parts.push("\u{23f0}".to_string());
    }

    parts.join(", ")
}

/// Compact cadence description, e.g. "every 2 weeks on Mon, Wed until
/// 2026-09-01".
pub fn describe_recurrence(rule: &RecurrenceRule) -> String {
    let unit = match rule.freq {
        Frequency::Daily => "day",
        Frequency::Weekly => "week",
        Frequency::Monthly => "month",
        Frequency::Yearly => "year",
    };

    let step = rule.step();
    let mut out = if step == 1 {
        format!("every {unit}")
    } else {
        format!("every {step} {unit}s")
    };

    if rule.freq == Frequency::Weekly && !rule.week_days.is_empty() {
        let days: Vec<&str> = rule.week_days.iter().map(|d| d.short_label()).collect();
        out.push_str(" on ");
        out.push_str(&days.join(", "));
    }
    if rule.workdays_only {
        out.push_str(" (workdays)");
    }

    match rule.ends {
        RecurrenceEnd::Never => {}
        RecurrenceEnd::OnDate { date } => {
            out.push_str(&format!(" until {}", date.format("%Y-%m-%d")));
        }
        RecurrenceEnd::AfterOccurrences { occurrences } => {
            out.push_str(&format!(" x{occurrences}"));
        }
    }

    out
}

fn describe_offset(days: i64, hours: i64) -> String {
    match (days > 0, hours > 0) {
        (true, true) => format!("{days}d {hours}h"),
        (true, false) => format!("{days}d"),
        _ => format!("{hours}h"),
    }
}
