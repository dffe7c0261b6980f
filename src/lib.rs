pub mod components;
pub mod resources;
pub mod utils;

pub use components::{
    ControlAllocation, MotorConfig, MotorModel, MotorResponse, PropellerConfig, PropellerModel,
    SpinDirection, VehicleConfig, VehicleModel,
};
pub use resources::SimulationConfig;
pub use utils::{ModelError, Result};
