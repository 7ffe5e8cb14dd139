use chrono::{Duration, NaiveDate, TimeZone, Utc};
use timebox_core::{
    AgingStatus, ScheduleDescriptor, Stage, Task, ThresholdPolicy, annotate_aging_status,
    auto_schedule, compute_age,
};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn unscheduled_task_ages_one_day_per_day() {
    let created = Utc.with_ymd_and_hms(2026, 2, 21, 9, 0, 0).unwrap();
    let t = Task::new("t1", "someday", created);

    assert_eq!(compute_age(&t, created), 0);
    assert_eq!(compute_age(&t, created + Duration::days(1)), 1);
}

#[test]
fn dated_task_hits_zero_then_goes_negative() {
    let now = Utc.with_ymd_and_hms(2026, 2, 21, 0, 0, 0).unwrap();
    let t = Task::new("t1", "due today", now)
        .with_schedule(ScheduleDescriptor::on(day(2026, 2, 21)));

    assert_eq!(compute_age(&t, now), 0);
    assert_eq!(compute_age(&t, now + Duration::days(1)), -1);
}

#[test]
fn doing_task_past_expire_threshold_is_overdue() {
    let policy = ThresholdPolicy::default();
    let now = Utc.with_ymd_and_hms(2026, 2, 21, 16, 0, 0).unwrap();
    let entered = now - Duration::hours(8);

    assert_eq!(
        annotate_aging_status(Stage::Doing, entered, now, &policy),
        AgingStatus::Overdue
    );
}

#[test]
fn scheduled_task_walks_the_stages_as_the_deadline_nears() {
    let created = Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap();
    let mut t = Task::new("t1", "conference talk", created)
        .with_schedule(ScheduleDescriptor::on(day(2026, 2, 21)));

    // 20 days out: the "do" window.
    let change = auto_schedule(&mut t, created).unwrap();
    assert_eq!(change.from, Stage::Queue);
    assert_eq!(change.to, Stage::Do);

    // 6 days out: "doing".
    let later = Utc.with_ymd_and_hms(2026, 2, 15, 8, 0, 0).unwrap();
    let change = auto_schedule(&mut t, later).unwrap();
    assert_eq!(change.to, Stage::Doing);
    assert_eq!(change.days_in_stage, 14);

    // Due day: "today". No further move on a repeat sweep.
    let due_day = Utc.with_ymd_and_hms(2026, 2, 21, 8, 0, 0).unwrap();
    assert_eq!(auto_schedule(&mut t, due_day).unwrap().to, Stage::Today);
    assert!(auto_schedule(&mut t, due_day).is_none());

    // History: opening at creation, then closing+opening per move.
    assert_eq!(t.history.len(), 7);
    assert!(t.history.iter().filter(|h| h.days_in_stage.is_some()).count() == 3);
}

#[test]
fn aging_severity_never_regresses_through_a_stage_lifetime() {
    let policy = ThresholdPolicy::default();
    let entered = Utc.with_ymd_and_hms(2026, 2, 21, 8, 0, 0).unwrap();

    for stage in Stage::ALL {
        let mut last = AgingStatus::Normal;
        for minutes in (0..=60 * 36).step_by(30) {
            let s =
                annotate_aging_status(stage, entered, entered + Duration::minutes(minutes), &policy);
            assert!(s >= last, "{} regressed at minute {minutes}", stage.label());
            last = s;
        }
    }
}
