use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use regex::Regex;

use timebox_core::{
    ScheduleDescriptor, Stage, Task, annotate_aging_status, apply_stage, auto_schedule,
    compute_age, describe_schedule, next_occurrence,
    time::{parse_date, parse_time_of_day},
};

mod config;
mod state;

#[derive(Parser, Debug)]
#[command(name = "timebox", version, about = "Time-boxed task workflow CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a task, optionally with a schedule
    Add {
        title: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Due time of day (HH:MM or HH:MM:SS)
        #[arg(long)]
        time: Option<String>,

        /// Advance-notice window before the due date
        #[arg(long, default_value_t = 0)]
        lead_days: i64,
        #[arg(long, default_value_t = 0)]
        lead_hours: i64,

        /// Expected effort: grace window after the due date
        #[arg(long, default_value_t = 0)]
        duration_days: i64,
        #[arg(long, default_value_t = 0)]
        duration_hours: i64,

        /// Fire a notification at the scheduled time (needs --time)
        #[arg(long)]
        alarm: bool,
    },

    /// List tasks with age and aging-status badges
    List {
        /// Only this stage (queue|do|doing|today|done)
        #[arg(long)]
        stage: Option<String>,

        /// Regex filter on the title
        #[arg(long)]
        filter: Option<String>,
    },

    /// Re-run automatic stage classification over all scheduled tasks
    Sweep,

    /// Move a task to done
    Complete { id: String },

    /// Show the config path, writing a default config on first run
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let now = Utc::now();

    match cli.command {
        Command::Add {
            title,
            due,
            time,
            lead_days,
            lead_hours,
            duration_days,
            duration_hours,
            alarm,
        } => add_task(
            title,
            due,
            time,
            lead_days,
            lead_hours,
            duration_days,
            duration_hours,
            alarm,
            now,
        ),
        Command::List { stage, filter } => list_tasks(stage, filter, now),
        Command::Sweep => sweep(now),
        Command::Complete { id } => complete(&id, now),
        Command::Config => show_config(),
    }
}

fn show_config() -> Result<()> {
    let p = config::config_path()?;
    if !p.exists() {
        config::save_config(&config::Config::default())?;
        println!("Wrote default config to {}", p.display());
    } else {
        println!("{}", p.display());
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn add_task(
    title: String,
    due: Option<String>,
    time: Option<String>,
    lead_days: i64,
    lead_hours: i64,
    duration_days: i64,
    duration_hours: i64,
    alarm: bool,
    now: DateTime<Utc>,
) -> Result<()> {
    let mut task = Task::new(format!("task-{}", now.timestamp_millis()), title, now);

    if due.is_some() || time.is_some() {
        let mut schedule = ScheduleDescriptor::default();
        schedule.enabled = true;
        if let Some(d) = &due {
            schedule.date = Some(parse_date("due", d)?);
        }
        if let Some(t) = &time {
            // Validate up front so a typo fails here, not at render time.
            parse_time_of_day("time", t)?;
            schedule.time = Some(t.clone());
        }
        schedule.lead_days = lead_days;
        schedule.lead_hours = lead_hours;
        schedule.duration_days = duration_days;
        schedule.duration_hours = duration_hours;
        schedule.alarm_enabled = alarm;
        task.schedule = Some(schedule);
    } else if alarm {
        bail!("--alarm needs --time");
    }

    let mut tasks = state::read_tasks()?;
    println!("Added {} ({})", task.id, task.title);
    tasks.push(task);
    state::write_tasks(&tasks)?;
    Ok(())
}

fn list_tasks(stage: Option<String>, filter: Option<String>, now: DateTime<Utc>) -> Result<()> {
    let cfg = config::load_config()?;
    let policy = cfg.threshold_policy();
    let tasks = state::read_tasks()?;

    let stage = stage.map(|s| parse_stage(&s)).transpose()?;
    let filter = filter
        .map(|f| Regex::new(&f).with_context(|| format!("invalid filter regex: {f}")))
        .transpose()?;

    let mut shown = 0usize;
    for task in &tasks {
        if let Some(s) = stage {
            if task.time_stage != s {
                continue;
            }
        }
        if let Some(re) = &filter {
            if !re.is_match(&task.title) {
                continue;
            }
        }

        let age = compute_age(task, now);
        let status = annotate_aging_status(task.time_stage, task.stage_entry_date, now, &policy);

        let mut notes: Vec<String> = Vec::new();
        if let Some(schedule) = &task.schedule {
            let summary = describe_schedule(schedule);
            if !summary.is_empty() {
                notes.push(summary);
            }
            if let (Some(rule), Some(anchor)) = (&schedule.recurring, schedule.date) {
                if let Some(next) = next_occurrence(rule, anchor, now.date_naive()) {
                    notes.push(format!("next {next}"));
                }
            }
            if schedule.alarm_active() {
                if let Some(instant) = schedule.due_instant_local(&cfg.timezone)? {
                    notes.push(format!("rings {}", instant.to_rfc3339()));
                }
            }
        }
        let notes = if notes.is_empty() {
            String::new()
        } else {
            format!("  ({})", notes.join("; "))
        };

        println!(
            "[{:>5}] {:<2} age={:>4} {} | {}{}",
            task.time_stage.label(),
            status.badge(),
            age,
            task.id,
            task.title,
            notes
        );
        shown += 1;
    }

    println!("\n{} of {} tasks", shown, tasks.len());
    Ok(())
}

fn sweep(now: DateTime<Utc>) -> Result<()> {
    let mut tasks = state::read_tasks()?;

    let mut moved = 0usize;
    for task in tasks.iter_mut() {
        if let Some(change) = auto_schedule(task, now) {
            println!(
                "{}: {} -> {} ({}d in {})",
                task.id,
                change.from.label(),
                change.to.label(),
                change.days_in_stage,
                change.from.label()
            );
            moved += 1;
        }
    }

    state::write_tasks(&tasks)?;
    println!("Moved {} of {} tasks", moved, tasks.len());
    Ok(())
}

fn complete(id: &str, now: DateTime<Utc>) -> Result<()> {
    let mut tasks = state::read_tasks()?;

    let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
        bail!("no task with id {id}");
    };
    if task.time_stage == Stage::Done {
        bail!("{id} is already done");
    }

    let change = apply_stage(task, Stage::Done, now);
    println!(
        "{}: {} -> done after {}d",
        id,
        change.from.label(),
        change.days_in_stage
    );

    state::write_tasks(&tasks)?;
    Ok(())
}

fn parse_stage(value: &str) -> Result<Stage> {
    match value {
        "queue" => Ok(Stage::Queue),
        "do" => Ok(Stage::Do),
        "doing" => Ok(Stage::Doing),
        "today" => Ok(Stage::Today),
        "done" => Ok(Stage::Done),
        other => bail!("unknown stage {other:?} (expected queue|do|doing|today|done)"),
    }
}
