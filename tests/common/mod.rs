#![allow(dead_code)]

mod assertions;
mod fixtures;

// Re-export
pub use assertions::{assert_matrix_eq, assert_pseudo_inverse_valid, assert_vehicle_valid};
pub use fixtures::*;
