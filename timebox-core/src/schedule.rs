//! Schedule descriptor: due date/time, lead and duration windows, recurrence.
//!
//! Every field is optional from the caller's point of view; serde fills the
//! rest with defaults so partially-entered schedules deserialize cleanly.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::{local_instant, parse_time_of_day};

/// When a task is due and the time allowances around that point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScheduleDescriptor {
    /// Whether automatic scheduling acts on this task.
    pub enabled: bool,

    /// Calendar date component, no time-of-day.
    pub date: Option<NaiveDate>,

    /// "HH:MM" or "HH:MM:SS", independent of `date`.
    pub time: Option<String>,

    /// Advance-notice offset before the due point. Preparation starts here.
    pub lead_days: i64,
    pub lead_hours: i64,

    /// Expected effort: grace window after the due point during which
    /// lateness is not penalized.
    pub duration_days: i64,
    pub duration_hours: i64,

    pub alarm_enabled: bool,

    /// Repeat cadence. `date` (when present) anchors the reference
    /// occurrence.
    pub recurring: Option<RecurrenceRule>,
}

impl ScheduleDescriptor {
    /// Active schedule due on `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            enabled: true,
            date: Some(date),
            ..Self::default()
        }
    }

    pub fn at(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_lead(mut self, days: i64, hours: i64) -> Self {
        self.lead_days = days;
        self.lead_hours = hours;
        self
    }

    pub fn with_duration(mut self, days: i64, hours: i64) -> Self {
        self.duration_days = days;
        self.duration_hours = hours;
        self
    }

    pub fn with_recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.recurring = Some(rule);
        self
    }

    pub fn with_alarm(mut self) -> Self {
        self.alarm_enabled = true;
        self
    }

    /// An alarm needs a wall-clock time to fire at; without one it stays off.
    pub fn alarm_active(&self) -> bool {
        self.alarm_enabled && self.time.is_some()
    }

    /// Parsed `time` component, if set.
    pub fn time_of_day(&self) -> Result<Option<NaiveTime>, ValidationError> {
        match &self.time {
            Some(t) => parse_time_of_day("time", t).map(Some),
            None => Ok(None),
        }
    }

    /// Concrete UTC instant for `date` + `time` in an IANA timezone,
    /// midnight when no time-of-day is set. None without a date.
    pub fn due_instant_local(&self, timezone: &str) -> Result<Option<DateTime<Utc>>, ValidationError> {
        let Some(date) = self.date else {
            return Ok(None);
        };
        let time = self.time_of_day()?;
        local_instant("date", date, time, timezone).map(Some)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Weekday codes for weekly rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekDay {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl WeekDay {
    pub fn days_from_monday(self) -> u64 {
        match self {
            WeekDay::Mon => 0,
            WeekDay::Tue => 1,
            WeekDay::Wed => 2,
            WeekDay::Thu => 3,
            WeekDay::Fri => 4,
            WeekDay::Sat => 5,
            WeekDay::Sun => 6,
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            WeekDay::Mon => "Mon",
            WeekDay::Tue => "Tue",
            WeekDay::Wed => "Wed",
            WeekDay::Thu => "Thu",
            WeekDay::Fri => "Fri",
            WeekDay::Sat => "Sat",
            WeekDay::Sun => "Sun",
        }
    }
}

/// How a recurrence series terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case", tag = "type")]
pub enum RecurrenceEnd {
    #[default]
    Never,
    OnDate { date: NaiveDate },
    AfterOccurrences { occurrences: u32 },
}

/// Repeat cadence for a scheduled task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    #[serde(rename = "type")]
    pub freq: Frequency,

    /// Every `interval` days/weeks/months/years. Zero is treated as 1.
    #[serde(default = "default_interval")]
    pub interval: u32,

    /// Weekly only: which weekdays the rule fires on. Empty means the
    /// anchor date's weekday.
    #[serde(default)]
    pub week_days: Vec<WeekDay>,

    /// Roll weekend occurrences forward to the next Monday.
    #[serde(default)]
    pub workdays_only: bool,

    #[serde(default)]
    pub ends: RecurrenceEnd,
}

fn default_interval() -> u32 {
    1
}

impl RecurrenceRule {
    pub fn new(freq: Frequency) -> Self {
        Self {
            freq,
            interval: 1,
            week_days: Vec::new(),
            workdays_only: false,
            ends: RecurrenceEnd::Never,
        }
    }

    pub fn every(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    pub fn on_week_days(mut self, days: &[WeekDay]) -> Self {
        self.week_days = days.to_vec();
        self
    }

    pub fn workdays_only(mut self) -> Self {
        self.workdays_only = true;
        self
    }

    pub fn ending(mut self, ends: RecurrenceEnd) -> Self {
        self.ends = ends;
        self
    }

    /// Effective interval with the zero floor applied.
    pub fn step(&self) -> u32 {
        self.interval.max(1)
    }
}
