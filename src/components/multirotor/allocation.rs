use log::debug;
use nalgebra::{DMatrix, DVector, Vector4};
use serde::{Deserialize, Serialize};

use crate::components::multirotor::{PropellerModel, SpinDirection};
use crate::utils::{ensure_finite, pseudo_inverse, ModelError, Result};

/// Row of the allocation matrix for each component of the body wrench.
pub const FZ_ROW: usize = 0;
pub const MX_ROW: usize = 1;
pub const MY_ROW: usize = 2;
pub const MZ_ROW: usize = 3;

/// Linear map between per-propeller angular velocity squared and the body
/// wrench `[Fz, Mx, My, Mz]`.
///
/// Only available when every propeller supplies both a thrust and a torque
/// coefficient. Callers must handle the `Unallocated` case before using the
/// vehicle for control allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControlAllocation {
    Unallocated,
    Allocated {
        /// 4 x N, wrench = matrix * omega^2.
        matrix: DMatrix<f64>,
        /// N x 4 Moore-Penrose pseudoinverse of `matrix`.
        pseudo_inverse: DMatrix<f64>,
    },
}

impl ControlAllocation {
    /// Builds the allocation for a set of propellers.
    ///
    /// Column `i` is `[-k_thrust, k_thrust * x, k_thrust * y, k_torque * spin]`
    /// with `x = d sin(angle)` and `y = d cos(angle)`. Vertical force is
    /// positive down, so thrust enters negative.
    pub fn from_propellers(
        propellers: &[PropellerModel],
        angles: &[f64],
        distances: &[f64],
        clockwise: &[SpinDirection],
    ) -> Result<Self> {
        let n = propellers.len();
        if angles.len() != n || distances.len() != n || clockwise.len() != n {
            return Err(ModelError::Configuration(format!(
                "allocation needs one angle, distance and spin per propeller: \
                 {} propellers, {} angles, {} distances, {} spins",
                n,
                angles.len(),
                distances.len(),
                clockwise.len()
            )));
        }
        ensure_finite("angles", angles)?;
        ensure_finite("distances", distances)?;

        let coefficients: Option<Vec<(f64, f64)>> =
            propellers.iter().map(PropellerModel::coefficients).collect();
        let coefficients = match coefficients {
            Some(coefficients) => coefficients,
            None => {
                debug!("Not every propeller has k_thrust and k_torque, allocation disabled");
                return Ok(ControlAllocation::Unallocated);
            }
        };

        let mut matrix = DMatrix::zeros(4, n);
        for (i, &(k_thrust, k_torque)) in coefficients.iter().enumerate() {
            let x = distances[i] * angles[i].sin();
            let y = distances[i] * angles[i].cos();
            matrix[(FZ_ROW, i)] = -k_thrust;
            matrix[(MX_ROW, i)] = k_thrust * x;
            matrix[(MY_ROW, i)] = k_thrust * y;
            matrix[(MZ_ROW, i)] = k_torque * clockwise[i].sign();
        }

        let pseudo_inverse = pseudo_inverse(&matrix)?;
        debug!("Control allocation built for {} propellers", n);

        Ok(ControlAllocation::Allocated {
            matrix,
            pseudo_inverse,
        })
    }

    pub fn is_allocated(&self) -> bool {
        matches!(self, ControlAllocation::Allocated { .. })
    }

    pub fn matrix(&self) -> Option<&DMatrix<f64>> {
        match self {
            ControlAllocation::Allocated { matrix, .. } => Some(matrix),
            ControlAllocation::Unallocated => None,
        }
    }

    pub fn pseudo_inverse(&self) -> Option<&DMatrix<f64>> {
        match self {
            ControlAllocation::Allocated { pseudo_inverse, .. } => Some(pseudo_inverse),
            ControlAllocation::Unallocated => None,
        }
    }

    /// Body wrench `[Fz, Mx, My, Mz]` produced by per-propeller omega^2.
    pub fn wrench(&self, omega_squared: &DVector<f64>) -> Result<Option<Vector4<f64>>> {
        let matrix = match self.matrix() {
            Some(matrix) => matrix,
            None => return Ok(None),
        };
        if omega_squared.len() != matrix.ncols() {
            return Err(ModelError::Configuration(format!(
                "expected {} propeller speeds, got {}",
                matrix.ncols(),
                omega_squared.len()
            )));
        }
        let wrench = matrix * omega_squared;
        Ok(Some(Vector4::new(wrench[0], wrench[1], wrench[2], wrench[3])))
    }

    /// Minimum-norm per-propeller omega^2 commands for a desired wrench.
    ///
    /// When no exact solution exists the least-squares solution is returned.
    pub fn allocate(&self, wrench: &Vector4<f64>) -> Option<DVector<f64>> {
        self.pseudo_inverse().map(|pinv| {
            pinv * DVector::from_column_slice(wrench.as_slice())
        })
    }
}
