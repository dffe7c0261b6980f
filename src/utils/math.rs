use nalgebra::{DMatrix, Matrix3, SVD};

use super::errors::{ModelError, Result};

/// Blade pitch angle at three quarters of the radius for a propeller with
/// the given manufacturer diameter and pitch (both in the same length unit).
#[inline]
pub fn three_quarter_pitch_angle(diameter: f64, pitch: f64) -> f64 {
    pitch.atan2(2.0 * std::f64::consts::PI * 0.75 * diameter / 2.0)
}

/// Singular values below this fraction of the largest are treated as zero.
pub const PINV_RCOND: f64 = 1e-15;

/// Sweep limit for the SVD, which otherwise iterates until convergence.
pub const SVD_MAX_ITERATIONS: usize = 1000;

/// Fails if any of `values` is NaN or infinite.
pub fn ensure_finite(name: &str, values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        None => Ok(()),
        Some(i) => Err(ModelError::Configuration(format!(
            "{}[{}] must be finite, got {}",
            name, i, values[i]
        ))),
    }
}

/// Invert a 3x3 matrix, failing if it is singular or the result is not finite.
pub fn invert_matrix3(matrix: &Matrix3<f64>) -> Result<Matrix3<f64>> {
    let inverse = matrix.try_inverse().ok_or_else(|| {
        ModelError::SingularMatrix(format!("matrix is not invertible: {:?}", matrix))
    })?;

    if inverse.iter().all(|x| x.is_finite()) {
        Ok(inverse)
    } else {
        Err(ModelError::SingularMatrix(format!(
            "matrix inverse is not finite: {:?}",
            matrix
        )))
    }
}

/// Moore-Penrose pseudoinverse through the SVD.
///
/// Singular values below `PINV_RCOND * sigma_max` are treated as zero, so
/// rank-deficient and underdetermined matrices give the
/// minimum-norm least-squares inverse instead of an error.
pub fn pseudo_inverse(matrix: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    let (rows, cols) = matrix.shape();
    if rows == 0 || cols == 0 {
        return Ok(DMatrix::zeros(cols, rows));
    }

    let svd = SVD::try_new(matrix.clone(), true, true, f64::EPSILON, SVD_MAX_ITERATIONS)
        .ok_or_else(|| {
            ModelError::Computation(format!(
                "SVD of {}x{} matrix did not converge",
                rows, cols
            ))
        })?;
    if svd.singular_values.iter().any(|s| !s.is_finite()) {
        return Err(ModelError::Computation(format!(
            "SVD of {}x{} matrix has non-finite singular values",
            rows, cols
        )));
    }
    let tolerance = PINV_RCOND * svd.singular_values.max();

    let pinv = svd
        .pseudo_inverse(tolerance)
        .map_err(|e| ModelError::Computation(e.to_string()))?;
    if pinv.iter().all(|x| x.is_finite()) {
        Ok(pinv)
    } else {
        Err(ModelError::Computation(format!(
            "pseudoinverse of {}x{} matrix is not finite",
            rows, cols
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_invert_diagonal() {
        let m = Matrix3::from_diagonal(&nalgebra::Vector3::new(2.0, 4.0, 8.0));
        let inv = invert_matrix3(&m).unwrap();
        assert_relative_eq!(inv[(0, 0)], 0.5);
        assert_relative_eq!(inv[(1, 1)], 0.25);
        assert_relative_eq!(inv[(2, 2)], 0.125);
    }

    #[test]
    fn test_invert_singular() {
        let result = invert_matrix3(&Matrix3::zeros());
        assert!(matches!(result, Err(ModelError::SingularMatrix(_))));
    }

    #[test]
    fn test_pseudo_inverse_of_square_matches_inverse() {
        let m = DMatrix::from_row_slice(2, 2, &[4.0, 7.0, 2.0, 6.0]);
        let pinv = pseudo_inverse(&m).unwrap();
        let identity = &m * &pinv;
        assert_relative_eq!(identity, DMatrix::identity(2, 2), epsilon = 1e-12);
    }

    #[test]
    fn test_pseudo_inverse_rank_deficient() {
        // Second row duplicates the first
        let m = DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 1.0, 2.0, 3.0]);
        let pinv = pseudo_inverse(&m).unwrap();
        assert_eq!(pinv.shape(), (3, 2));
        assert_relative_eq!(&m * &pinv * &m, m, epsilon = 1e-12);
        assert!(pinv.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_pseudo_inverse_zero_matrix() {
        let pinv = pseudo_inverse(&DMatrix::zeros(4, 3)).unwrap();
        assert_eq!(pinv, DMatrix::zeros(3, 4));
    }

    #[test]
    fn test_pseudo_inverse_non_finite() {
        let mut m = DMatrix::from_element(4, 4, 1.0);
        m[(1, 2)] = f64::NAN;
        assert!(matches!(pseudo_inverse(&m), Err(ModelError::Computation(_))));

        m[(1, 2)] = f64::INFINITY;
        assert!(matches!(pseudo_inverse(&m), Err(ModelError::Computation(_))));
    }

    #[test]
    fn test_ensure_finite() {
        assert!(ensure_finite("angles", &[0.0, 1.0]).is_ok());
        let err = ensure_finite("angles", &[0.0, f64::NAN]).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("angles[1]"));
    }

    #[test]
    fn test_three_quarter_pitch_angle() {
        // 6x3 propeller: atan(3 / (0.75 * pi * 6))
        let expected = (3.0 / (0.75 * std::f64::consts::PI * 6.0)).atan();
        assert_relative_eq!(three_quarter_pitch_angle(6.0, 3.0), expected, epsilon = 1e-15);
    }
}
