use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::{ModelError, Result, AIR_DENSITY_MSL, DEFAULT_TIME_STEP, GRAVITY};

/// Environment constants shared by a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Timestep of simulation (s)
    pub dt: f64,
    /// Gravitational acceleration (m/s^2)
    pub g: f64,
    /// Air density (kg/m^3), sea level by default
    pub rho: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_TIME_STEP,
            g: GRAVITY,
            rho: AIR_DENSITY_MSL,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("dt", self.dt), ("g", self.g), ("rho", self.rho)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ModelError::Configuration(format!(
                    "simulation {} must be positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }
}
