use log::debug;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use super::motor::{MotorConfig, MotorModel};
use crate::utils::{
    ensure_finite, three_quarter_pitch_angle, ModelError, Result, DEFAULT_BLADE_COUNT,
    DEFAULT_LIFT_CURVE_SLOPE, DEFAULT_MEAN_CHORD, DEFAULT_PROP_DIAMETER, DEFAULT_PROP_EFFICIENCY,
    DEFAULT_PROP_PITCH, INCHES_TO_METRES,
};

/// Raw propeller parameters. Every optional field falls back to the defaults
/// of a generic 6x3 two-bladed propeller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropellerConfig {
    /// Moment of inertia of the propeller and rotor (kg·m²).
    pub moment_of_inertia: f64,
    /// Manufacturer diameter (inches).
    #[serde(default)]
    pub diameter: Option<f64>,
    /// Manufacturer pitch (inches).
    #[serde(default)]
    pub pitch: Option<f64>,
    /// Lift curve slope, d C_L / d alpha.
    #[serde(default)]
    pub a: Option<f64>,
    /// Number of blades.
    #[serde(default)]
    pub b: Option<u32>,
    /// Mean chord length (m) of the blade.
    #[serde(default)]
    pub c: Option<f64>,
    /// Propeller efficiency.
    #[serde(default)]
    pub eta: Option<f64>,
    /// Thrust coefficient, thrust = k_thrust * omega^2.
    #[serde(default)]
    pub k_thrust: Option<f64>,
    /// Torque coefficient, torque = k_torque * omega^2.
    #[serde(default)]
    pub k_torque: Option<f64>,
    /// Motor driving the propeller, otherwise the speed response is instantaneous.
    #[serde(default)]
    pub motor: Option<MotorConfig>,
}

/// A propeller with its blade geometry derived from the manufacturer
/// diameter and pitch.
#[allow(non_snake_case)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropellerModel {
    moment_of_inertia: f64,
    diameter: f64,
    pitch: f64,
    a: f64,
    b: u32,
    c: f64,
    eta: f64,
    k_thrust: Option<f64>,
    k_torque: Option<f64>,
    motor: Option<MotorModel>,

    /// Radius in metres.
    R: f64,
    /// Area of the propeller disc in metres squared.
    A: f64,
    /// Pitch angle at the root of the blade.
    theta0: f64,
    /// Change in pitch angle towards the tip of the blade.
    theta1: f64,
}

/// How the rotor speed responds to a command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotorResponse<'a> {
    /// Rotor speed follows the command immediately.
    Instantaneous,
    /// Rotor speed is driven through the motor's dynamics.
    Dynamic(&'a MotorModel),
}

impl PropellerConfig {
    pub fn new(moment_of_inertia: f64) -> Self {
        Self {
            moment_of_inertia,
            diameter: None,
            pitch: None,
            a: None,
            b: None,
            c: None,
            eta: None,
            k_thrust: None,
            k_torque: None,
            motor: None,
        }
    }

    /// A 6x3 propeller with thrust and torque coefficients set.
    pub fn generic_6x3() -> Self {
        Self {
            k_thrust: Some(1e-5),
            k_torque: Some(1e-7),
            ..Self::new(9e-5)
        }
    }

    pub fn with_size(mut self, diameter: f64, pitch: f64) -> Self {
        self.diameter = Some(diameter);
        self.pitch = Some(pitch);
        self
    }

    pub fn with_coefficients(mut self, k_thrust: f64, k_torque: f64) -> Self {
        self.k_thrust = Some(k_thrust);
        self.k_torque = Some(k_torque);
        self
    }

    pub fn with_motor(mut self, motor: MotorConfig) -> Self {
        self.motor = Some(motor);
        self
    }

    pub fn build(&self) -> Result<PropellerModel> {
        let diameter = self.diameter.unwrap_or(DEFAULT_PROP_DIAMETER);
        let pitch = self.pitch.unwrap_or(DEFAULT_PROP_PITCH);
        validate_positive("diameter", diameter)?;
        validate_positive("pitch", pitch)?;
        let coefficients: Vec<f64> = self.k_thrust.iter().chain(&self.k_torque).copied().collect();
        ensure_finite("propeller coefficients", &coefficients)?;

        let motor = self.motor.as_ref().map(MotorConfig::build).transpose()?;

        let radius = diameter * INCHES_TO_METRES;
        let disc_area = PI * radius.powi(2);
        // Pitch is reduced linearly from root to tip so lift stays even as
        // blade velocity increases with radius.
        let angle = three_quarter_pitch_angle(diameter, pitch);
        let theta0 = 2.0 * angle;
        let theta1 = -4.0 / 3.0 * angle;

        debug!(
            "Propeller {}x{}: R={:.4} m, A={:.5} m^2, theta0={:.4}, theta1={:.4}",
            diameter, pitch, radius, disc_area, theta0, theta1
        );

        Ok(PropellerModel {
            moment_of_inertia: self.moment_of_inertia,
            diameter,
            pitch,
            a: self.a.unwrap_or(DEFAULT_LIFT_CURVE_SLOPE),
            b: self.b.unwrap_or(DEFAULT_BLADE_COUNT),
            c: self.c.unwrap_or(DEFAULT_MEAN_CHORD),
            eta: self.eta.unwrap_or(DEFAULT_PROP_EFFICIENCY),
            k_thrust: self.k_thrust,
            k_torque: self.k_torque,
            motor,
            R: radius,
            A: disc_area,
            theta0,
            theta1,
        })
    }
}

fn validate_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ModelError::Configuration(format!(
            "propeller {} must be positive, got {}",
            name, value
        )))
    }
}

impl PropellerModel {
    pub fn moment_of_inertia(&self) -> f64 {
        self.moment_of_inertia
    }

    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn lift_curve_slope(&self) -> f64 {
        self.a
    }

    pub fn blade_count(&self) -> u32 {
        self.b
    }

    pub fn mean_chord(&self) -> f64 {
        self.c
    }

    pub fn efficiency(&self) -> f64 {
        self.eta
    }

    pub fn k_thrust(&self) -> Option<f64> {
        self.k_thrust
    }

    pub fn k_torque(&self) -> Option<f64> {
        self.k_torque
    }

    pub fn motor(&self) -> Option<&MotorModel> {
        self.motor.as_ref()
    }

    pub fn motor_response(&self) -> MotorResponse<'_> {
        match &self.motor {
            Some(motor) => MotorResponse::Dynamic(motor),
            None => MotorResponse::Instantaneous,
        }
    }

    /// Radius (m).
    pub fn radius(&self) -> f64 {
        self.R
    }

    /// Disc area (m²).
    pub fn disc_area(&self) -> f64 {
        self.A
    }

    pub fn theta0(&self) -> f64 {
        self.theta0
    }

    pub fn theta1(&self) -> f64 {
        self.theta1
    }

    /// Both aerodynamic coefficients, if the propeller supplies them.
    pub fn coefficients(&self) -> Option<(f64, f64)> {
        self.k_thrust.zip(self.k_torque)
    }
}
