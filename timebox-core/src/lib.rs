//! timebox-core: temporal state engine for the time-boxed task workflow.
//!
//! Everything here is a deterministic function of its inputs plus an
//! explicit `now` instant. Persistence and the clock belong to the caller;
//! the engine never reads global time.

pub mod age;
pub mod aging;
pub mod error;
pub mod format;
pub mod recurrence;
pub mod schedule;
pub mod stage;
pub mod task;
pub mod time;

pub use age::compute_age;
pub use aging::{AgingStatus, StageThresholds, ThresholdPolicy, annotate_aging_status};
pub use error::ValidationError;
pub use format::{describe_recurrence, describe_schedule};
pub use recurrence::next_occurrence;
pub use schedule::{Frequency, RecurrenceEnd, RecurrenceRule, ScheduleDescriptor, WeekDay};
pub use stage::{StageChange, apply_stage, auto_schedule, classify_stage, effective_days_remaining};
pub use task::{Stage, StageHistoryEntry, Task};
