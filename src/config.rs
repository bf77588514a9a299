use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

pub const ATTENDANCE_THRESHOLD: u32 = 75;
pub const MARKS_THRESHOLD: f64 = 60.0;
pub const STUDY_PLAN_SIZE: usize = 3;
pub const DEFAULT_CREDITS: u32 = 3;

/// Upper bounds for each marks component and for the subject total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarksCaps {
    pub mid1: f64,
    pub mid2: f64,
    pub assignment: f64,
    pub max_marks: f64,
}

impl Default for MarksCaps {
    fn default() -> Self {
        MarksCaps {
            mid1: 30.0,
            mid2: 30.0,
            assignment: 40.0,
            max_marks: 100.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub caps: MarksCaps,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("data"),
            caps: MarksCaps::default(),
        }
    }
}

impl Config {
    /// Reads `DASHBOARD_*` variables from the environment (and `.env` when
    /// the caller has loaded it), falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        let data_dir = lookup("DASHBOARD_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let caps = MarksCaps {
            mid1: read_cap(&lookup, "DASHBOARD_MID1_CAP", defaults.caps.mid1)?,
            mid2: read_cap(&lookup, "DASHBOARD_MID2_CAP", defaults.caps.mid2)?,
            assignment: read_cap(&lookup, "DASHBOARD_ASSIGNMENT_CAP", defaults.caps.assignment)?,
            max_marks: read_cap(&lookup, "DASHBOARD_MAX_MARKS", defaults.caps.max_marks)?,
        };

        Ok(Config { data_dir, caps })
    }
}

fn read_cap(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: f64) -> Result<f64> {
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };

    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| DashboardError::invalid(format!("{key} must be a number, got {raw:?}")))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(DashboardError::invalid(format!(
            "{key} must be a positive number, got {raw:?}"
        )));
    }

    Ok(value)
}
