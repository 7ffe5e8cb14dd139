use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use timebox_core::{Stage, StageThresholds, ThresholdPolicy};

use crate::state::ensure_timebox_home;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// IANA timezone used to resolve schedule date + time into an instant.
    pub timezone: String,

    /// Per-stage aging threshold overrides; unset stages keep the defaults.
    pub thresholds: ThresholdOverrides,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ThresholdOverrides {
    pub r#do: Option<StageThresholds>,
    pub doing: Option<StageThresholds>,
    pub today: Option<StageThresholds>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            thresholds: ThresholdOverrides::default(),
        }
    }
}

impl Config {
    /// Engine threshold policy: defaults plus any configured overrides.
    pub fn threshold_policy(&self) -> ThresholdPolicy {
        let mut policy = ThresholdPolicy::default();
        if let Some(t) = self.thresholds.r#do {
            policy.set(Stage::Do, t);
        }
        if let Some(t) = self.thresholds.doing {
            policy.set(Stage::Doing, t);
        }
        if let Some(t) = self.thresholds.today {
            policy.set(Stage::Today, t);
        }
        policy
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_timebox_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s)?)
}

pub fn save_config(config: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(config)?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}
