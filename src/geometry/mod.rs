// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry module - bounding volumes and box meshes

mod bbox;
mod box_mesh;
mod description;
mod obb;
mod point_cloud;

pub use bbox::{Aabb, AxisExtent};
pub use box_mesh::{BoxMesh, Quad, BOX_FACES, UNIT_CUBE_CORNERS};
pub use description::{reconcile_center, BoxDescription, BoxShape};
pub use obb::{center_covariance, covariance, principal_axes, Obb, OrientedFrame};
pub use point_cloud::{PointCloud, REDUCTION_CHUNK};
