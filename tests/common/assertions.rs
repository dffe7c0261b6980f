use approx::assert_relative_eq;
use multirotor::VehicleModel;
use nalgebra::DMatrix;

/// Assert that two matrices have the same shape and approximately equal entries
#[track_caller]
pub fn assert_matrix_eq(actual: &DMatrix<f64>, expected: &DMatrix<f64>, epsilon: f64) {
    assert_eq!(actual.shape(), expected.shape(), "Matrix shapes differ");
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert_relative_eq!(*a, *e, epsilon = epsilon, max_relative = 1e-9);
    }
}

/// Assert the Moore-Penrose conditions M M+ M = M and M+ M M+ = M+
#[track_caller]
pub fn assert_pseudo_inverse_valid(matrix: &DMatrix<f64>, pinv: &DMatrix<f64>) {
    let (rows, cols) = matrix.shape();
    assert_eq!(pinv.shape(), (cols, rows), "Pseudoinverse has the wrong shape");

    let scale = matrix.amax();
    assert_matrix_eq(&(matrix * pinv * matrix), matrix, scale * 1e-10);

    let pinv_scale = pinv.amax();
    assert_matrix_eq(&(pinv * matrix * pinv), pinv, pinv_scale * 1e-10);
}

/// Assert that a built vehicle is internally consistent
#[track_caller]
pub fn assert_vehicle_valid(vehicle: &VehicleModel) {
    let n = vehicle.propellers().len();
    assert!(n > 0, "Vehicle has no propellers");
    assert_eq!(vehicle.angles().len(), n);
    assert_eq!(vehicle.distances().len(), n);
    assert_eq!(vehicle.clockwise().len(), n);

    assert!(
        vehicle.inertia_matrix_inverse().iter().all(|x| x.is_finite()),
        "Inverse inertia matrix contains non-finite values"
    );

    for prop in vehicle.propellers() {
        assert!(prop.radius() > 0.0, "Propeller radius must be positive");
        assert!(prop.disc_area() > 0.0, "Propeller disc area must be positive");
        assert!(prop.theta0().is_finite() && prop.theta1().is_finite());
    }

    let allocation = vehicle.allocation();
    assert_eq!(
        allocation.matrix().is_some(),
        allocation.pseudo_inverse().is_some(),
        "Allocation matrix and pseudoinverse must be present together"
    );
    if let (Some(matrix), Some(pinv)) = (allocation.matrix(), allocation.pseudo_inverse()) {
        assert_eq!(matrix.shape(), (4, n));
        assert_pseudo_inverse_valid(matrix, pinv);
    }
}
