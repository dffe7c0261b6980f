pub mod multirotor;

pub use multirotor::{
    ControlAllocation, MotorConfig, MotorModel, MotorResponse, PropellerConfig, PropellerModel,
    SpinDirection, VehicleConfig, VehicleModel,
};
