pub const GRAVITY: f64 = 9.81; // m/s^2
pub const AIR_DENSITY_MSL: f64 = 1.225; // kg/m^3
pub const DEFAULT_TIME_STEP: f64 = 1e-2; // s

pub const INCHES_TO_METRES: f64 = 0.0254;

// Manufacturer "diameter x pitch" of the default propeller (inches)
pub const DEFAULT_PROP_DIAMETER: f64 = 6.0;
pub const DEFAULT_PROP_PITCH: f64 = 3.0;

/// Lift curve slope used in the example of Stevens & Lewis (eq 2.2-6a).
pub const DEFAULT_LIFT_CURVE_SLOPE: f64 = 5.7;
pub const DEFAULT_BLADE_COUNT: u32 = 2;
pub const DEFAULT_MEAN_CHORD: f64 = 0.0274; // m
pub const DEFAULT_PROP_EFFICIENCY: f64 = 1.0;

pub const DEFAULT_VEHICLE_MASS: f64 = 1.0; // kg
