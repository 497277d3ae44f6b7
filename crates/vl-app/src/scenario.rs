//! Scenario files: a named configuration plus a starting charge.
//!
//! Scenarios are small YAML documents used by the CLI to set up an
//! experiment without clicking through the control surface.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use vl_core::{clamp_percent, Configuration};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub config: Configuration,
    /// Starting battery charge, 0..=100. Defaults to a fresh battery.
    #[serde(default = "default_charge")]
    pub charge_percent: f64,
}

fn default_charge() -> f64 {
    100.0
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            config: Configuration::default(),
            charge_percent: 100.0,
        }
    }
}

impl Scenario {
    /// Validate the embedded configuration and clamp the charge.
    pub fn validate(&mut self) -> AppResult<()> {
        self.config.validate()?;
        if !self.charge_percent.is_finite() {
            return Err(AppError::Scenario(
                "charge_percent must be a finite number".to_string(),
            ));
        }
        self.charge_percent = clamp_percent(self.charge_percent);
        Ok(())
    }
}

/// Load and validate a scenario from a YAML file.
pub fn load_scenario(path: &Path) -> AppResult<Scenario> {
    let content = fs::read_to_string(path).map_err(|source| AppError::ScenarioFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut scenario: Scenario = serde_yaml::from_str(&content)?;
    scenario.validate()?;
    Ok(scenario)
}
