use multirotor::{PropellerConfig, VehicleConfig};
use std::f64::consts::PI;

pub const K_THRUST: f64 = 1e-5;
pub const K_TORQUE: f64 = 1e-7;
pub const ARM_LENGTH: f64 = 0.2;

/// Propeller with both aerodynamic coefficients
pub fn create_test_propeller() -> PropellerConfig {
    PropellerConfig::new(1e-4).with_coefficients(K_THRUST, K_TORQUE)
}

/// Quadcopter in the plus configuration, arms at 0, 90, 180 and 270 degrees
pub fn create_plus_quad() -> VehicleConfig {
    VehicleConfig::new(
        vec![create_test_propeller(); 4],
        vec![0.0, PI / 2.0, PI, 3.0 * PI / 2.0],
        vec![ARM_LENGTH; 4],
    )
}

/// Quadcopter in the X configuration
pub fn create_x_quad() -> VehicleConfig {
    VehicleConfig::new(
        vec![create_test_propeller(); 4],
        vec![PI / 4.0, 3.0 * PI / 4.0, 5.0 * PI / 4.0, 7.0 * PI / 4.0],
        vec![ARM_LENGTH; 4],
    )
}

/// Hexacopter with evenly spaced arms
pub fn create_hexacopter() -> VehicleConfig {
    VehicleConfig::symmetric(vec![create_test_propeller(); 6], ARM_LENGTH)
}
