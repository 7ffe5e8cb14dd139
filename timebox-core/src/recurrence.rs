//! Recurrence stepping: concrete occurrence dates from a recurrence rule.
//!
//! Date-only and deterministic. The anchor (the schedule's reference date)
//! counts as the first occurrence of the series.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::schedule::{Frequency, RecurrenceEnd, RecurrenceRule};

// Upper bound on candidates examined per query, so a rule whose end clause
// filters everything out cannot loop forever.
const SEARCH_CAP: usize = 4096;

/// First occurrence strictly after `after`, or None when the series has
/// ended (or never reaches past `after` within the search horizon).
///
/// `workdays_only` rolls weekend occurrences forward to Monday; end bounds
/// apply to the rolled date the caller would actually see.
pub fn next_occurrence(
    rule: &RecurrenceRule,
    anchor: NaiveDate,
    after: NaiveDate,
) -> Option<NaiveDate> {
    let mut remaining = match rule.ends {
        RecurrenceEnd::AfterOccurrences { occurrences } => Some(occurrences),
        _ => None,
    };

    for date in raw_occurrences(rule, anchor).take(SEARCH_CAP) {
        if let Some(r) = remaining.as_mut() {
            if *r == 0 {
                return None;
            }
            *r -= 1;
        }

        let date = if rule.workdays_only { roll_to_workday(date) } else { date };

        if let RecurrenceEnd::OnDate { date: end } = rule.ends {
            if date > end {
                return None;
            }
        }
        if date > after {
            return Some(date);
        }
    }
    None
}

/// The cadence dates of the series, unrolled. Input ranges are bounded so a
/// date-overflowing rule terminates instead of filtering forever.
fn raw_occurrences(rule: &RecurrenceRule, anchor: NaiveDate) -> Box<dyn Iterator<Item = NaiveDate>> {
    let step = rule.step() as u64;
    let span = 0u64..SEARCH_CAP as u64;
    match rule.freq {
        Frequency::Daily => Box::new(
            span.filter_map(move |n| anchor.checked_add_days(Days::new(n.saturating_mul(step)))),
        ),
        Frequency::Weekly if rule.week_days.is_empty() => Box::new(span.filter_map(move |n| {
            anchor.checked_add_days(Days::new(n.saturating_mul(step).saturating_mul(7)))
        })),
        Frequency::Weekly => {
            let mut offsets: Vec<u64> =
                rule.week_days.iter().map(|d| d.days_from_monday()).collect();
            offsets.sort_unstable();
            offsets.dedup();

            let week_start = start_of_week(anchor);
            Box::new(
                span.flat_map(move |w| {
                    let week = week_start
                        .checked_add_days(Days::new(w.saturating_mul(step).saturating_mul(7)));
                    offsets.clone().into_iter().filter_map(move |off| {
                        week.and_then(|ws| ws.checked_add_days(Days::new(off)))
                    })
                })
                .filter(move |d| *d >= anchor),
            )
        }
        // Months addition clamps to the last valid day (Jan 31 + 1 month =
        // Feb 28/29), which is the behavior we want for month-end anchors.
        Frequency::Monthly => Box::new(span.filter_map(move |n| {
            u32::try_from(n.saturating_mul(step))
                .ok()
                .and_then(|m| anchor.checked_add_months(Months::new(m)))
        })),
        Frequency::Yearly => Box::new(span.filter_map(move |n| {
            u32::try_from(n.saturating_mul(step).saturating_mul(12))
                .ok()
                .and_then(|m| anchor.checked_add_months(Months::new(m)))
        })),
    }
}

fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

fn roll_to_workday(date: NaiveDate) -> NaiveDate {
    let shift = match date.weekday() {
        Weekday::Sat => 2,
        Weekday::Sun => 1,
        _ => 0,
    };
    date.checked_add_days(Days::new(shift)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::WeekDay;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_daily_with_interval() {
        let rule = RecurrenceRule::new(Frequency::Daily).every(3);
        let anchor = day(2026, 2, 21);
        assert_eq!(next_occurrence(&rule, anchor, anchor), Some(day(2026, 2, 24)));
        assert_eq!(
            next_occurrence(&rule, anchor, day(2026, 2, 25)),
            Some(day(2026, 2, 27))
        );
    }

    #[test]
    fn test_zero_interval_treated_as_one() {
        let rule = RecurrenceRule::new(Frequency::Daily).every(0);
        let anchor = day(2026, 2, 21);
        assert_eq!(next_occurrence(&rule, anchor, anchor), Some(day(2026, 2, 22)));
    }

    #[test]
    fn test_weekly_on_listed_days() {
        // Anchor is a Saturday; rule fires Mon + Wed.
        let rule = RecurrenceRule::new(Frequency::Weekly)
            .on_week_days(&[WeekDay::Wed, WeekDay::Mon]);
        let anchor = day(2026, 2, 21);

        assert_eq!(next_occurrence(&rule, anchor, anchor), Some(day(2026, 2, 23)));
        assert_eq!(
            next_occurrence(&rule, anchor, day(2026, 2, 23)),
            Some(day(2026, 2, 25))
        );
        assert_eq!(
            next_occurrence(&rule, anchor, day(2026, 2, 25)),
            Some(day(2026, 3, 2))
        );
    }

    #[test]
    fn test_biweekly_skips_off_weeks() {
        // Anchor Monday 2026-02-23, every 2 weeks on Monday.
        let rule = RecurrenceRule::new(Frequency::Weekly)
            .every(2)
            .on_week_days(&[WeekDay::Mon]);
        let anchor = day(2026, 2, 23);
        assert_eq!(next_occurrence(&rule, anchor, anchor), Some(day(2026, 3, 9)));
    }

    #[test]
    fn test_weekly_without_days_uses_anchor_weekday() {
        let rule = RecurrenceRule::new(Frequency::Weekly);
        let anchor = day(2026, 2, 21); // Saturday
        assert_eq!(next_occurrence(&rule, anchor, anchor), Some(day(2026, 2, 28)));
    }

    #[test]
    fn test_monthly_clamps_to_short_months() {
        let rule = RecurrenceRule::new(Frequency::Monthly);
        let anchor = day(2026, 1, 31);
        assert_eq!(next_occurrence(&rule, anchor, anchor), Some(day(2026, 2, 28)));
        assert_eq!(
            next_occurrence(&rule, anchor, day(2026, 2, 28)),
            Some(day(2026, 3, 31))
        );
    }

    #[test]
    fn test_yearly() {
        let rule = RecurrenceRule::new(Frequency::Yearly);
        let anchor = day(2026, 2, 21);
        assert_eq!(next_occurrence(&rule, anchor, anchor), Some(day(2027, 2, 21)));
    }

    #[test]
    fn test_workdays_only_rolls_weekend_forward() {
        // Anchor Friday 2026-02-20, daily: Sat + Sun both roll to Monday.
        let rule = RecurrenceRule::new(Frequency::Daily).workdays_only();
        let anchor = day(2026, 2, 20);
        assert_eq!(next_occurrence(&rule, anchor, anchor), Some(day(2026, 2, 23)));
    }

    #[test]
    fn test_ends_on_date() {
        let rule = RecurrenceRule::new(Frequency::Daily)
            .ending(RecurrenceEnd::OnDate { date: day(2026, 2, 23) });
        let anchor = day(2026, 2, 21);
        assert_eq!(
            next_occurrence(&rule, anchor, day(2026, 2, 22)),
            Some(day(2026, 2, 23))
        );
        assert_eq!(next_occurrence(&rule, anchor, day(2026, 2, 23)), None);
    }

    #[test]
    fn test_ends_after_occurrences_counts_the_anchor() {
        // Three occurrences total: Feb 21, 22, 23.
        let rule = RecurrenceRule::new(Frequency::Daily)
            .ending(RecurrenceEnd::AfterOccurrences { occurrences: 3 });
        let anchor = day(2026, 2, 21);
        assert_eq!(
            next_occurrence(&rule, anchor, day(2026, 2, 22)),
            Some(day(2026, 2, 23))
        );
        assert_eq!(next_occurrence(&rule, anchor, day(2026, 2, 23)), None);
    }
}
