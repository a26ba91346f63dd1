// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Box descriptions handed from the builders to the mesh generator

use super::{Aabb, Obb, OrientedFrame};
use crate::config::ObbCenter;
use crate::operator::VolumeKind;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Extent of a box around its placement center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoxShape {
    /// World-axis aligned half-extents
    Axis { half_extents: Vector3<f64> },
    /// Explicit world-space corners in canonical order, with the frame and
    /// half-extents they were built from
    Corners {
        corners: [Point3<f64>; 8],
        frame: OrientedFrame,
        half_extents: Vector3<f64>,
    },
}

/// Result of either builder: where the box is placed and how far it reaches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxDescription {
    /// World-space placement center; the mesh origin lands here
    pub center: Point3<f64>,
    pub shape: BoxShape,
}

impl BoxDescription {
    pub fn axis_aligned(aabb: &Aabb) -> Self {
        Self {
            center: aabb.center(),
            shape: BoxShape::Axis {
                half_extents: aabb.half_extents(),
            },
        }
    }

    /// Oriented box anchored according to `policy`; `placement` is the
    /// world AABB of the objects' bounding-box corners.
    pub fn oriented(obb: &Obb, placement: &Aabb, policy: ObbCenter) -> Self {
        Self {
            center: reconcile_center(obb, placement, policy),
            shape: BoxShape::Corners {
                corners: obb.corners(),
                frame: obb.frame,
                half_extents: obb.half_extents,
            },
        }
    }

    pub fn kind(&self) -> VolumeKind {
        match self.shape {
            BoxShape::Axis { .. } => VolumeKind::Aabb,
            BoxShape::Corners { .. } => VolumeKind::Obb,
        }
    }

    pub fn half_extents(&self) -> Vector3<f64> {
        match self.shape {
            BoxShape::Axis { half_extents } | BoxShape::Corners { half_extents, .. } => half_extents,
        }
    }
}

/// Pick the world-space anchor of an oriented box.
///
/// The default anchors the box at the AABB midpoint of the objects while its
/// orientation and extent come from the principal-axis fit. For asymmetric
/// distributions the box's own center then differs from its placement origin;
/// the corners stay where the fit put them either way.
pub fn reconcile_center(obb: &Obb, placement: &Aabb, policy: ObbCenter) -> Point3<f64> {
    match policy {
        ObbCenter::AabbMidpoint => placement.center(),
        ObbCenter::FrameCenter => obb.center(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KernelConfig;
    use crate::geometry::PointCloud;

    fn skewed_cloud() -> PointCloud {
        PointCloud::from_points(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(0.0, 0.0, 3.0),
        ])
    }

    #[test]
    fn test_axis_aligned_description() {
        let aabb = Aabb::new(Point3::new(-0.5, -0.5, -0.5), Point3::new(2.5, 0.5, 0.5));
        let description = BoxDescription::axis_aligned(&aabb);
        assert_eq!(description.center, Point3::new(1.0, 0.0, 0.0));
        assert_eq!(description.half_extents(), Vector3::new(1.5, 0.5, 0.5));
        assert_eq!(description.kind(), VolumeKind::Aabb);
    }

    #[test]
    fn test_reconcile_center_policies() {
        let cloud = skewed_cloud();
        let obb = Obb::from_cloud(&cloud, &KernelConfig::default()).unwrap();
        let placement = Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(5.0, 1.0, 1.0));

        let hybrid = BoxDescription::oriented(&obb, &placement, ObbCenter::AabbMidpoint);
        assert_eq!(hybrid.center, Point3::new(2.0, 0.0, 0.0));
        assert_eq!(hybrid.kind(), VolumeKind::Obb);

        let framed = BoxDescription::oriented(&obb, &placement, ObbCenter::FrameCenter);
        assert_eq!(framed.center, obb.center());

        // corners are world-space in both cases
        assert_eq!(hybrid.shape, framed.shape);
    }
}
