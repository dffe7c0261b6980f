mod motor;
mod propeller;
mod vehicle;

pub use motor::{MotorConfig, MotorModel};
pub use propeller::{MotorResponse, PropellerConfig, PropellerModel};
pub use vehicle::{SpinDirection, VehicleConfig, VehicleModel};
