use log::debug;
use nalgebra::{DVector, Matrix3, Vector4};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::path::Path;

use super::propeller::{PropellerConfig, PropellerModel};
use crate::components::multirotor::ControlAllocation;
use crate::utils::{ensure_finite, invert_matrix3, ModelError, Result, DEFAULT_VEHICLE_MASS};

/// Spin direction of a propeller, looking down from the top of the vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpinDirection {
    Clockwise,
    CounterClockwise,
}

impl SpinDirection {
    /// +1 for clockwise, -1 for counter-clockwise.
    pub fn sign(self) -> f64 {
        match self {
            SpinDirection::Clockwise => 1.0,
            SpinDirection::CounterClockwise => -1.0,
        }
    }

    pub fn from_sign(sign: i8) -> Result<Self> {
        match sign {
            1 => Ok(SpinDirection::Clockwise),
            -1 => Ok(SpinDirection::CounterClockwise),
            other => Err(ModelError::Configuration(format!(
                "spin direction must be 1 or -1, got {}",
                other
            ))),
        }
    }

    /// Default pattern: even indices clockwise, odd indices counter-clockwise.
    pub fn alternating(index: usize) -> Self {
        if index % 2 == 0 {
            SpinDirection::Clockwise
        } else {
            SpinDirection::CounterClockwise
        }
    }
}

/// Raw vehicle description. Entries of `angles`, `distances` and `clockwise`
/// correspond by index to `propellers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleConfig {
    pub propellers: Vec<PropellerConfig>,
    /// Angle (rad) of each propeller arm from the positive x-axis (forward) of the body frame.
    pub angles: Vec<f64>,
    /// Distance (m) of each propeller from the centre of mass.
    pub distances: Vec<f64>,
    /// 1 if the motor spins clockwise, -1 if counter-clockwise, looking from the top.
    /// Alternates clockwise/counter-clockwise when absent.
    #[serde(default)]
    pub clockwise: Option<Vec<i8>>,
    #[serde(default)]
    pub mass: Option<f64>,
    /// Row-major 3x3 inertia matrix (kg·m²), identity when absent.
    #[serde(default)]
    pub inertia_matrix: Option<[[f64; 3]; 3]>,
}

/// A multirotor with its inverse inertia and control allocation derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleModel {
    propellers: Vec<PropellerModel>,
    angles: Vec<f64>,
    distances: Vec<f64>,
    clockwise: Vec<SpinDirection>,
    mass: f64,
    inertia_matrix: Matrix3<f64>,
    inertia_matrix_inverse: Matrix3<f64>,
    allocation: ControlAllocation,
}

impl VehicleConfig {
    pub fn new(propellers: Vec<PropellerConfig>, angles: Vec<f64>, distances: Vec<f64>) -> Self {
        Self {
            propellers,
            angles,
            distances,
            clockwise: None,
            mass: None,
            inertia_matrix: None,
        }
    }

    /// Arms evenly spaced around the body, the first along the x-axis, all
    /// at the same distance from the centre of mass.
    pub fn symmetric(propellers: Vec<PropellerConfig>, distance: f64) -> Self {
        let n = propellers.len();
        let angles = (0..n).map(|i| 2.0 * PI * i as f64 / n as f64).collect();
        Self::new(propellers, angles, vec![distance; n])
    }

    /// A 1 kg quadcopter in the plus configuration with 6x3 propellers.
    pub fn generic_quadcopter() -> Self {
        Self {
            mass: Some(1.0),
            inertia_matrix: Some([[0.01, 0.0, 0.0], [0.0, 0.01, 0.0], [0.0, 0.0, 0.02]]),
            ..Self::symmetric(vec![PropellerConfig::generic_6x3(); 4], 0.2)
        }
    }

    pub fn with_clockwise(mut self, clockwise: Vec<i8>) -> Self {
        self.clockwise = Some(clockwise);
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    pub fn with_inertia_matrix(mut self, inertia: Matrix3<f64>) -> Self {
        // nalgebra converts column by column
        self.inertia_matrix = Some(inertia.transpose().into());
        self
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a YAML vehicle description from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&file_contents)
    }

    pub fn build(&self) -> Result<VehicleModel> {
        let n = self.propellers.len();
        if n == 0 {
            return Err(ModelError::Configuration(
                "vehicle needs at least one propeller".to_string(),
            ));
        }
        check_len("angles", self.angles.len(), n)?;
        check_len("distances", self.distances.len(), n)?;
        ensure_finite("angles", &self.angles)?;
        ensure_finite("distances", &self.distances)?;

        let propellers = self
            .propellers
            .iter()
            .map(PropellerConfig::build)
            .collect::<Result<Vec<_>>>()?;

        let inertia_matrix = match self.inertia_matrix {
            Some(rows) => Matrix3::from_fn(|i, j| rows[i][j]),
            None => Matrix3::identity(),
        };
        let inertia_matrix_inverse = invert_matrix3(&inertia_matrix)?;

        let clockwise = match &self.clockwise {
            Some(signs) => {
                check_len("clockwise", signs.len(), n)?;
                signs
                    .iter()
                    .map(|&sign| SpinDirection::from_sign(sign))
                    .collect::<Result<Vec<_>>>()?
            }
            None => (0..n).map(SpinDirection::alternating).collect(),
        };

        let allocation = ControlAllocation::from_propellers(
            &propellers,
            &self.angles,
            &self.distances,
            &clockwise,
        )?;

        debug!(
            "Built vehicle with {} propellers, mass {} kg, allocation {}",
            n,
            self.mass.unwrap_or(DEFAULT_VEHICLE_MASS),
            if allocation.is_allocated() { "available" } else { "unavailable" }
        );

        Ok(VehicleModel {
            propellers,
            angles: self.angles.clone(),
            distances: self.distances.clone(),
            clockwise,
            mass: self.mass.unwrap_or(DEFAULT_VEHICLE_MASS),
            inertia_matrix,
            inertia_matrix_inverse,
            allocation,
        })
    }
}

fn check_len(name: &str, len: usize, expected: usize) -> Result<()> {
    if len == expected {
        Ok(())
    } else {
        Err(ModelError::Configuration(format!(
            "expected {} {} (one per propeller), got {}",
            expected, name, len
        )))
    }
}

impl VehicleModel {
    pub fn propellers(&self) -> &[PropellerModel] {
        &self.propellers
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    pub fn clockwise(&self) -> &[SpinDirection] {
        &self.clockwise
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inertia_matrix(&self) -> &Matrix3<f64> {
        &self.inertia_matrix
    }

    pub fn inertia_matrix_inverse(&self) -> &Matrix3<f64> {
        &self.inertia_matrix_inverse
    }

    pub fn allocation(&self) -> &ControlAllocation {
        &self.allocation
    }

    /// Per-propeller omega^2 that holds the vehicle's weight with no net
    /// moment, or `None` without an allocation.
    pub fn hover_omega_squared(&self, g: f64) -> Option<DVector<f64>> {
        // Vertical force is positive down
        let wrench = Vector4::new(-self.mass * g, 0.0, 0.0, 0.0);
        self.allocation.allocate(&wrench)
    }
}
