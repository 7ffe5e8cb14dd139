use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use timebox_core::Task;

pub fn timebox_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".timebox"))
}

pub fn ensure_timebox_home() -> Result<PathBuf> {
    let dir = timebox_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn tasks_path() -> Result<PathBuf> {
    Ok(ensure_timebox_home()?.join("tasks.json"))
}

pub fn read_tasks() -> Result<Vec<Task>> {
    let p = tasks_path()?;
    if !p.exists() {
        return Ok(Vec::new());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(serde_json::from_str(&s)?)
}

pub fn write_tasks(tasks: &[Task]) -> Result<()> {
    let p = tasks_path()?;
    let json = serde_json::to_string_pretty(tasks)?;
    fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}
