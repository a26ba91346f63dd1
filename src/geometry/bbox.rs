// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Axis-aligned bounding boxes

use super::box_mesh::UNIT_CUBE_CORNERS;
use super::PointCloud;
use crate::error::{BoundsError, BoundsResult};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Closed `[min, max]` interval along one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisExtent {
    pub min: f64,
    pub max: f64,
}

impl AxisExtent {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn midpoint(&self) -> f64 {
        self.min + (self.max - self.min) / 2.0
    }

    pub fn half_range(&self) -> f64 {
        (self.max - self.min) / 2.0
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Box that any point supersedes on the first `expand_to_include`
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Tightest box around `points`
    pub fn from_points(points: &[Point3<f64>]) -> BoundsResult<Self> {
        if points.is_empty() {
            return Err(BoundsError::EmptySelection);
        }

        let mut bbox = Self::empty();
        for point in points {
            bbox.expand_to_include(point);
        }
        bbox.finite()
    }

    /// Tightest box around a cloud, scanned in chunks
    pub fn from_cloud(cloud: &PointCloud, parallel: bool) -> BoundsResult<Self> {
        let bbox = cloud
            .reduce(
                parallel,
                |chunk| {
                    let mut partial = Self::empty();
                    for point in chunk {
                        partial.expand_to_include(point);
                    }
                    partial
                },
                |a, b| a.merge(&b),
            )
            .ok_or(BoundsError::EmptySelection)?;

        bbox.finite()
    }

    fn finite(self) -> BoundsResult<Self> {
        if self.min.iter().chain(self.max.iter()).all(|c| c.is_finite()) {
            Ok(self)
        } else {
            Err(BoundsError::degeneracy("bounding box has non-finite extents"))
        }
    }

    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);

        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Smallest box containing both boxes
    pub fn merge(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// The three per-axis intervals
    pub fn extents(&self) -> [AxisExtent; 3] {
        [
            AxisExtent::new(self.min.x, self.max.x),
            AxisExtent::new(self.min.y, self.max.y),
            AxisExtent::new(self.min.z, self.max.z),
        ]
    }

    pub fn center(&self) -> Point3<f64> {
        let [x, y, z] = self.extents();
        Point3::new(x.midpoint(), y.midpoint(), z.midpoint())
    }

    pub fn half_extents(&self) -> Vector3<f64> {
        let [x, y, z] = self.extents();
        Vector3::new(x.half_range(), y.half_range(), z.half_range())
    }

    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn volume(&self) -> f64 {
        let size = self.size();
        size.x * size.y * size.z
    }

    /// World-space corners in canonical box order
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let center = self.center();
        let half = self.half_extents();
        UNIT_CUBE_CORNERS.map(|sign| center + Vector3::from(sign).component_mul(&half))
    }

    /// Check whether `point` lies inside the box, allowing `tolerance` slack
    pub fn contains(&self, point: &Point3<f64>, tolerance: f64) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] - tolerance && point[i] <= self.max[i] + tolerance)
    }

    /// Check if two bounding boxes are approximately equal within tolerance
    pub fn approx_eq(&self, other: &Aabb, tolerance: f64) -> bool {
        (self.min - other.min).amax() < tolerance && (self.max - other.max).amax() < tolerance
    }
}
