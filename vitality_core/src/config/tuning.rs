//! Tunable vitality constants

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::ConfigError;

/// Tunable values for a simulation
///
/// Owned by the [`Simulation`](crate::Simulation) instead of living in a
/// global, so independent simulations can use different tuning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VitalityConfig {
    #[serde(default)]
    pub shield: ShieldDefaults,
    #[serde(default)]
    pub roles: RoleTuning,
}

impl VitalityConfig {
    /// Load config from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let config: VitalityConfig = super::load_toml(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse config from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: VitalityConfig = super::parse_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let shield = &self.shield;
        if !(shield.efficacy > 0.0 && shield.efficacy <= 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "shield.efficacy must be in (0, 1], got {}",
                shield.efficacy
            )));
        }
        if shield.limit < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "shield.limit must not be negative, got {}",
                shield.limit
            )));
        }
        if shield.sustain < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "shield.sustain must not be negative, got {}",
                shield.sustain
            )));
        }
        Ok(())
    }
}

/// Parameters used by `ShieldPool::add_default_process`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShieldDefaults {
    #[serde(default = "default_limit")]
    pub limit: f64,
    /// Amount lost per second once sustain runs out
    #[serde(default = "default_decay")]
    pub decay: f64,
    /// Fraction of incoming damage absorbed
    #[serde(default = "default_efficacy")]
    pub efficacy: f64,
    /// Seconds before decay starts
    #[serde(default)]
    pub sustain: f64,
    #[serde(default)]
    pub persistent: bool,
}

impl Default for ShieldDefaults {
    fn default() -> Self {
        ShieldDefaults {
            limit: default_limit(),
            decay: default_decay(),
            efficacy: default_efficacy(),
            sustain: 0.0,
            persistent: false,
        }
    }
}

fn default_limit() -> f64 {
    75.0
}
fn default_decay() -> f64 {
    1.2
}
fn default_efficacy() -> f64 {
    0.7
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleTuning {
    /// Name of the role given to entities when they die
    #[serde(default)]
    pub death_role: Option<String>,
}
