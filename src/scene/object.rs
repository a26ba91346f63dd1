// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Selected objects as supplied by the host scene

use crate::geometry::{Aabb, PointCloud};
use nalgebra::{Matrix4, Point3};
use serde::{Deserialize, Serialize};

/// One selected object: its world transform and local geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    /// Local-to-world affine transform
    pub world_transform: Matrix4<f64>,
    /// Local-space bounding box corners
    pub bound_box: [Point3<f64>; 8],
    /// Local-space vertex positions
    pub vertices: Vec<Point3<f64>>,
}

impl SceneObject {
    /// Object whose bounding box is the local AABB of its vertices.
    ///
    /// An object without vertices gets a bounding box collapsed at its
    /// origin, as the host reports for empty meshes.
    pub fn new(
        name: impl Into<String>,
        world_transform: Matrix4<f64>,
        vertices: Vec<Point3<f64>>,
    ) -> Self {
        let bound_box = Aabb::from_points(&vertices)
            .map(|bbox| bbox.corners())
            .unwrap_or([Point3::origin(); 8]);

        Self {
            name: name.into(),
            world_transform,
            bound_box,
            vertices,
        }
    }

    pub fn with_bound_box(
        name: impl Into<String>,
        world_transform: Matrix4<f64>,
        bound_box: [Point3<f64>; 8],
        vertices: Vec<Point3<f64>>,
    ) -> Self {
        Self {
            name: name.into(),
            world_transform,
            bound_box,
            vertices,
        }
    }

    /// Name with everything from the first `.` removed, if anything is left
    pub fn base_name(&self) -> Option<&str> {
        base_name(&self.name)
    }

    /// Append the world-space bounding box corners to `cloud`
    pub fn gather_bound_corners(&self, cloud: &mut PointCloud) {
        cloud.extend_transformed(&self.world_transform, &self.bound_box);
    }

    /// Append the world-space vertices to `cloud`
    pub fn gather_vertices(&self, cloud: &mut PointCloud) {
        cloud.extend_transformed(&self.world_transform, &self.vertices);
    }
}

/// Strip a host disambiguation suffix such as `.001`
pub fn base_name(name: &str) -> Option<&str> {
    let stem = name.find('.').map_or(name, |dot| &name[..dot]);
    if stem.is_empty() {
        None
    } else {
        Some(stem)
    }
}

/// Base name of a selection: the first object that yields one
pub fn selection_base_name(objects: &[SceneObject]) -> Option<&str> {
    objects.iter().find_map(SceneObject::base_name)
}
