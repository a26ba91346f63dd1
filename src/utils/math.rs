// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Math utilities

use nalgebra::{Matrix4, UnitQuaternion, Vector3};

/// Rotation from XYZ Euler angles in degrees, applied X first, then Y, then Z
pub fn euler_degrees(angles: &Vector3<f64>) -> UnitQuaternion<f64> {
    let rx = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), angles.x.to_radians());
    let ry = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angles.y.to_radians());
    let rz = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angles.z.to_radians());
    rz * ry * rx
}

/// Affine matrix that scales, then rotates, then translates
pub fn compose_trs(
    translation: &Vector3<f64>,
    rotation_degrees: &Vector3<f64>,
    scale: &Vector3<f64>,
) -> Matrix4<f64> {
    Matrix4::new_translation(translation)
        * euler_degrees(rotation_degrees).to_homogeneous()
        * Matrix4::new_nonuniform_scaling(scale)
}

/// Matrix from row-major nested arrays
pub fn matrix_from_rows(rows: &[[f64; 4]; 4]) -> Matrix4<f64> {
    Matrix4::from_fn(|r, c| rows[r][c])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_compose_trs_order() {
        let m = compose_trs(
            &Vector3::new(10.0, 0.0, 0.0),
            &Vector3::new(0.0, 0.0, 90.0),
            &Vector3::new(2.0, 1.0, 1.0),
        );
        let p = m.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(10.0, 2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_matrix_from_rows() {
        let m = matrix_from_rows(&[
            [1.0, 0.0, 0.0, 5.0],
            [0.0, 1.0, 0.0, 6.0],
            [0.0, 0.0, 1.0, 7.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert_eq!(m.transform_point(&Point3::origin()), Point3::new(5.0, 6.0, 7.0));
    }
}
