use log::warn;
use serde::{Deserialize, Serialize};

use crate::utils::{ModelError, Result};

/// Electrical and mechanical constants of a brushless motor.
///
/// See: http://learningrc.com/motor-kv/, http://web.mit.edu/first/scooter/motormath.pdf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorModel {
    /// Motor constant, where omega = k_m * back_emf, and k_m = 1/k_e.
    k_m: f64,
    /// Back-EMF constant, back_emf = k_e * omega.
    k_e: Option<f64>,
    /// Torque constant, where torque Q = k_q * current. Equal to k_e.
    k_q: Option<f64>,
}

/// Raw motor parameters as supplied by a caller or a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorConfig {
    pub k_m: f64,
    #[serde(default)]
    pub k_e: Option<f64>,
    #[serde(default)]
    pub k_q: Option<f64>,
}

impl MotorConfig {
    pub fn new(k_m: f64) -> Self {
        Self {
            k_m,
            k_e: None,
            k_q: None,
        }
    }

    pub fn build(&self) -> Result<MotorModel> {
        if !(self.k_m.is_finite() && self.k_m > 0.0) {
            return Err(ModelError::Configuration(format!(
                "motor constant k_m must be positive, got {}",
                self.k_m
            )));
        }

        let motor = MotorModel {
            k_m: self.k_m,
            k_e: self.k_e,
            k_q: self.k_q,
        };

        if !motor.is_consistent(1e-9) {
            warn!(
                "Motor constants disagree with k_e = k_q = 1/k_m: k_m={}, k_e={:?}, k_q={:?}",
                motor.k_m, motor.k_e, motor.k_q
            );
        }

        Ok(motor)
    }
}

impl MotorModel {
    /// Creates a motor from its motor constant alone.
    pub fn new(k_m: f64) -> Result<Self> {
        MotorConfig::new(k_m).build()
    }

    /// Creates a motor with k_e and k_q filled in from 1/k_m.
    pub fn with_derived_constants(k_m: f64) -> Result<Self> {
        MotorConfig {
            k_m,
            k_e: Some(1.0 / k_m),
            k_q: Some(1.0 / k_m),
        }
        .build()
    }

    pub fn k_m(&self) -> f64 {
        self.k_m
    }

    pub fn k_e(&self) -> Option<f64> {
        self.k_e
    }

    pub fn k_q(&self) -> Option<f64> {
        self.k_q
    }

    /// Checks the supplied constants against k_e = k_q = 1/k_m, relative to
    /// `tolerance`. Absent constants are not checked.
    pub fn is_consistent(&self, tolerance: f64) -> bool {
        let expected = 1.0 / self.k_m;
        let close = |value: f64| (value - expected).abs() <= tolerance * expected.abs().max(1.0);
        self.k_e.map_or(true, close) && self.k_q.map_or(true, close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_motor_only_k_m() {
        let motor = MotorModel::new(0.02).unwrap();
        assert_eq!(motor.k_m(), 0.02);
        assert!(motor.k_e().is_none());
        assert!(motor.k_q().is_none());
        assert!(motor.is_consistent(1e-9));
    }

    #[test]
    fn test_derived_constants() {
        let motor = MotorModel::with_derived_constants(0.02).unwrap();
        assert_relative_eq!(motor.k_e().unwrap(), 50.0);
        assert_relative_eq!(motor.k_q().unwrap(), 50.0);
        assert!(motor.is_consistent(1e-9));
    }

    #[test]
    fn test_inconsistent_constants_still_build() {
        let motor = MotorConfig {
            k_m: 0.02,
            k_e: Some(50.0),
            k_q: Some(10.0),
        }
        .build()
        .unwrap();
        assert!(!motor.is_consistent(1e-9));
    }

    #[test]
    fn test_non_positive_k_m() {
        assert!(MotorModel::new(0.0).unwrap_err().is_configuration());
        assert!(MotorModel::new(-1.0).unwrap_err().is_configuration());
        assert!(MotorModel::new(f64::NAN).unwrap_err().is_configuration());
    }

    #[test]
    fn test_config_from_yaml_defaults() {
        let config: MotorConfig = serde_yaml::from_str("k_m: 0.5").unwrap();
        assert_eq!(config, MotorConfig::new(0.5));
    }
}
