mod allocation;
mod config;

pub use allocation::{ControlAllocation, FZ_ROW, MX_ROW, MY_ROW, MZ_ROW};
pub use config::{
    MotorConfig, MotorModel, MotorResponse, PropellerConfig, PropellerModel, SpinDirection,
    VehicleConfig, VehicleModel,
};
