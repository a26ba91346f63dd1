// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Principal-axis oriented bounding boxes
//!
//! The box axes are the eigenvectors of the population covariance of the
//! point cloud. This is a heuristic fit, not the minimal-volume box.
//!
//! Eigenvectors are only unique up to sign, and not unique at all inside a
//! repeated eigenvalue's eigenspace, so the frame is normalized:
//!
//! * axes are sorted by eigenvalue, largest variance first;
//! * eigenvalues closer than `eigen_tie_tolerance` (relative to the largest)
//!   are tied. Three tied values give the world basis. With two tied values
//!   the distinct axis is kept and the tied plane is spanned starting from
//!   the world axis (x, y, then z) least aligned with the distinct axis;
//! * axes 0 and 1 are flipped so their largest-magnitude component is
//!   positive (lowest index on equal magnitudes) and axis 2 is their cross
//!   product, which keeps the frame right-handed and the mesh wound outward.

use super::box_mesh::UNIT_CUBE_CORNERS;
use super::{Aabb, PointCloud};
use crate::config::KernelConfig;
use crate::error::{BoundsError, BoundsResult};
use nalgebra::{Matrix3, Point3, SymmetricEigen, Vector3};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Orthonormal right-handed basis and its center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedFrame {
    /// Unit axes as columns, largest variance first
    pub axes: Matrix3<f64>,
    /// World-space origin of the frame
    pub center: Point3<f64>,
}

impl OrientedFrame {
    pub fn axis(&self, index: usize) -> Vector3<f64> {
        self.axes.column(index).into_owned()
    }

    /// Coordinates of a world point relative to the frame
    pub fn to_local(&self, point: &Point3<f64>) -> Vector3<f64> {
        self.axes.tr_mul(&(point - self.center))
    }

    /// World point for frame-relative coordinates
    pub fn to_world(&self, local: &Vector3<f64>) -> Point3<f64> {
        self.center + self.axes * local
    }
}

/// Oriented bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obb {
    pub frame: OrientedFrame,
    /// Half-extents along the frame axes
    pub half_extents: Vector3<f64>,
    /// Covariance eigenvalues matching the frame axes
    pub eigenvalues: Vector3<f64>,
}

impl Obb {
    /// Fit a box to the principal axes of `cloud`
    pub fn from_cloud(cloud: &PointCloud, config: &KernelConfig) -> BoundsResult<Self> {
        let count = cloud.len();
        if count < 3 {
            return Err(BoundsError::InsufficientGeometry { vertices: count });
        }

        let parallel = config.is_parallel(count);
        let bounds = Aabb::from_cloud(cloud, parallel)?;
        if bounds.size().amax() <= config.degenerate_extent {
            return Err(BoundsError::InsufficientGeometry { vertices: count });
        }

        let (_, cov) = center_covariance(cloud, parallel).ok_or(BoundsError::EmptySelection)?;
        let (axes, eigenvalues) = principal_axes(&cov, config)?;
        let (mins, maxs) = project_extents(cloud, &axes, parallel)?;

        let half_extents = (maxs - mins) / 2.0;
        let local_center = mins + half_extents;
        let frame = OrientedFrame {
            axes,
            center: Point3::from(axes * local_center),
        };

        debug!(
            points = count,
            eigenvalues = ?eigenvalues.as_slice(),
            half_extents = ?half_extents.as_slice(),
            "fitted oriented box"
        );

        Ok(Self {
            frame,
            half_extents,
            eigenvalues,
        })
    }

    /// World-space corners in canonical box order
    pub fn corners(&self) -> [Point3<f64>; 8] {
        UNIT_CUBE_CORNERS
            .map(|sign| self.frame.to_world(&Vector3::from(sign).component_mul(&self.half_extents)))
    }

    pub fn center(&self) -> Point3<f64> {
        self.frame.center
    }

    /// Check whether `point` lies inside the box, allowing `tolerance` slack
    pub fn contains(&self, point: &Point3<f64>, tolerance: f64) -> bool {
        let local = self.frame.to_local(point);
        (0..3).all(|i| local[i].abs() <= self.half_extents[i] + tolerance)
    }
}

/// Population covariance (normalized by N) of a point cloud.
pub fn covariance(cloud: &PointCloud, parallel: bool) -> Option<Matrix3<f64>> {
    center_covariance(cloud, parallel).map(|(_, cov)| cov)
}

/// Centroid and population covariance of a point cloud.
pub fn center_covariance(cloud: &PointCloud, parallel: bool) -> Option<(Point3<f64>, Matrix3<f64>)> {
    let center = cloud.centroid(parallel)?;
    let normalizer = 1.0 / cloud.len() as f64;

    let cov = cloud.reduce(
        parallel,
        |chunk| {
            chunk.iter().fold(Matrix3::zeros(), |acc: Matrix3<f64>, p| {
                let cp = p - center;
                acc + cp * (cp * normalizer).transpose()
            })
        },
        |a, b| a + b,
    )?;

    Some((center, cov))
}

/// Eigen-decompose `cov` into a normalized orthonormal frame.
///
/// Returns the axes as columns and the matching eigenvalues.
pub fn principal_axes(
    cov: &Matrix3<f64>,
    config: &KernelConfig,
) -> BoundsResult<(Matrix3<f64>, Vector3<f64>)> {
    if !cov.iter().all(|v| v.is_finite()) {
        return Err(BoundsError::degeneracy("covariance matrix is not finite"));
    }

    let eigen = SymmetricEigen::try_new(*cov, f64::EPSILON, config.max_eigen_iterations)
        .ok_or_else(|| {
            BoundsError::degeneracy(format!(
                "eigen solver did not converge within {} iterations",
                config.max_eigen_iterations
            ))
        })?;

    if !eigen.eigenvalues.iter().chain(eigen.eigenvectors.iter()).all(|v| v.is_finite()) {
        return Err(BoundsError::degeneracy("eigen decomposition produced non-finite values"));
    }

    // Stable sort: equal eigenvalues keep the solver's column order.
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| eigen.eigenvalues[b].total_cmp(&eigen.eigenvalues[a]));

    let values = Vector3::new(
        eigen.eigenvalues[order[0]],
        eigen.eigenvalues[order[1]],
        eigen.eigenvalues[order[2]],
    );
    let vectors = order.map(|i| eigen.eigenvectors.column(i).into_owned());

    let scale = values.amax().max(f64::MIN_POSITIVE);
    let tied = |a: f64, b: f64| (a - b).abs() <= config.eigen_tie_tolerance * scale;

    let axes = match (tied(values[0], values[1]), tied(values[1], values[2])) {
        (true, true) => {
            debug!("isotropic covariance, using the world basis");
            Matrix3::identity()
        }
        (false, true) => {
            debug!("minor eigenvalues tied, spanning the tied plane from the world axes");
            let major = vectors[0].normalize();
            right_handed(&major, &seed_in_plane(&major))
        }
        (true, false) => {
            debug!("major eigenvalues tied, spanning the tied plane from the world axes");
            let minor = vectors[2].normalize();
            let first = seed_in_plane(&minor);
            right_handed(&first, &minor.cross(&first))
        }
        (false, false) => right_handed(&vectors[0], &vectors[1]),
    };

    check_orthonormal(&axes, config.orthogonality_tolerance)?;
    Ok((axes, values))
}

/// Per-axis min and max of the cloud projected onto `axes`
fn project_extents(
    cloud: &PointCloud,
    axes: &Matrix3<f64>,
    parallel: bool,
) -> BoundsResult<(Vector3<f64>, Vector3<f64>)> {
    cloud
        .reduce(
            parallel,
            |chunk| {
                let mut mins = Vector3::repeat(f64::INFINITY);
                let mut maxs = Vector3::repeat(f64::NEG_INFINITY);
                for point in chunk {
                    let local = axes.tr_mul(&point.coords);
                    mins = mins.inf(&local);
                    maxs = maxs.sup(&local);
                }
                (mins, maxs)
            },
            |(amin, amax), (bmin, bmax)| (amin.inf(&bmin), amax.sup(&bmax)),
        )
        .ok_or(BoundsError::EmptySelection)
}

/// Unit vector orthogonal to `normal`, seeded from the world axis least
/// aligned with it
fn seed_in_plane(normal: &Vector3<f64>) -> Vector3<f64> {
    let seed = (0..3)
        .min_by(|&a, &b| normal[a].abs().total_cmp(&normal[b].abs()))
        .unwrap_or(0);
    let axis = Vector3::ith(seed, 1.0);
    (axis - normal * normal.dot(&axis)).normalize()
}

/// Flip `v` so its largest-magnitude component is positive
fn canonical_sign(v: &Vector3<f64>) -> Vector3<f64> {
    let dominant = (0..3)
        .reduce(|best, i| if v[i].abs() > v[best].abs() { i } else { best })
        .unwrap_or(0);
    if v[dominant] < 0.0 {
        -v
    } else {
        *v
    }
}

/// Frame from two axes, completing it with their cross product
fn right_handed(first: &Vector3<f64>, second: &Vector3<f64>) -> Matrix3<f64> {
    let x = canonical_sign(&first.normalize());
    let y = canonical_sign(&second.normalize());
    let z = x.cross(&y);
    Matrix3::from_columns(&[x, y, z])
}

fn check_orthonormal(axes: &Matrix3<f64>, tolerance: f64) -> BoundsResult<()> {
    if !axes.iter().all(|v| v.is_finite()) {
        return Err(BoundsError::degeneracy("principal axes are not finite"));
    }

    let deviation = (axes.tr_mul(axes) - Matrix3::identity()).amax();
    if deviation > tolerance {
        return Err(BoundsError::degeneracy(format!(
            "principal axes deviate from orthonormal by {:.3e}",
            deviation
        )));
    }

    if axes.determinant() <= 0.0 {
        return Err(BoundsError::degeneracy("principal frame is not right-handed"));
    }
    Ok(())
}
