// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Box mesh representation and generator
//!
//! Every box, axis-aligned or oriented, shares one topology: eight corners
//! in canonical order and six quads wound so their normals point away from
//! the box center (for a right-handed corner set).

use super::description::{BoxDescription, BoxShape};
use anyhow::{bail, Result};
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Unit cube corners in canonical order: bottom ring (z = -1) then top ring.
pub const UNIT_CUBE_CORNERS: [[f64; 3]; 8] = [
    [1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

/// Quad faces: bottom, top, +x, -y, -x, +y
pub const BOX_FACES: [[usize; 4]; 6] = [
    [0, 1, 2, 3],
    [4, 7, 6, 5],
    [0, 4, 5, 1],
    [1, 5, 6, 2],
    [2, 6, 7, 3],
    [4, 0, 3, 7],
];

/// Quad defined by four vertex indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quad {
    pub indices: [usize; 4],
}

impl Quad {
    pub fn new(indices: [usize; 4]) -> Self {
        Self { indices }
    }

    /// Split into two triangles sharing the first vertex
    pub fn triangles(&self) -> [[usize; 3]; 2] {
        let [a, b, c, d] = self.indices;
        [[a, b, c], [a, c, d]]
    }
}

/// Eight-vertex, six-quad box mesh, local to the box's placement origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxMesh {
    pub vertices: [Point3<f64>; 8],
    pub faces: [Quad; 6],
}

impl BoxMesh {
    /// Axis-aligned box scaled component-wise by `half_extents`
    pub fn from_half_extents(half_extents: &Vector3<f64>) -> Self {
        let vertices = UNIT_CUBE_CORNERS
            .map(|sign| Point3::from(Vector3::from(sign).component_mul(half_extents)));
        Self::with_vertices(vertices)
    }

    /// Box through world-space `corners`, re-expressed relative to `center`
    pub fn from_corners(corners: &[Point3<f64>; 8], center: &Point3<f64>) -> Self {
        let vertices = corners.map(|corner| Point3::from(corner - center));
        Self::with_vertices(vertices)
    }

    /// Generate the mesh for a validated description
    pub fn from_description(description: &BoxDescription) -> Self {
        match &description.shape {
            BoxShape::Axis { half_extents } => Self::from_half_extents(half_extents),
            BoxShape::Corners { corners, .. } => Self::from_corners(corners, &description.center),
        }
    }

    fn with_vertices(vertices: [Point3<f64>; 8]) -> Self {
        Self {
            vertices,
            faces: BOX_FACES.map(Quad::new),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Mean of the eight vertices
    pub fn centroid(&self) -> Point3<f64> {
        let sum = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc: Vector3<f64>, v| acc + v.coords);
        Point3::from(sum / 8.0)
    }

    /// Unnormalized face normal by Newell's method
    pub fn face_normal(&self, face: usize) -> Vector3<f64> {
        let indices = self.faces[face].indices;
        let mut normal = Vector3::zeros();
        for i in 0..4 {
            let current = &self.vertices[indices[i]];
            let next = &self.vertices[indices[(i + 1) % 4]];
            normal.x += (current.y - next.y) * (current.z + next.z);
            normal.y += (current.z - next.z) * (current.x + next.x);
            normal.z += (current.x - next.x) * (current.y + next.y);
        }
        normal
    }

    /// Fan triangulation, two triangles per quad
    pub fn triangles(&self) -> Vec<[usize; 3]> {
        self.faces.iter().flat_map(|quad| quad.triangles()).collect()
    }

    /// Copy of the mesh moved to `location`
    pub fn translated(&self, location: &Point3<f64>) -> [Point3<f64>; 8] {
        self.vertices.map(|v| v + location.coords)
    }

    /// Check the topology invariant: every face holds four distinct valid
    /// indices and every vertex is a corner of exactly three faces.
    pub fn validate(&self) -> Result<()> {
        let mut uses = [0usize; 8];
        for (f, face) in self.faces.iter().enumerate() {
            for (i, &index) in face.indices.iter().enumerate() {
                if index >= self.vertices.len() {
                    bail!("face {} references vertex {} out of range", f, index);
                }
                if face.indices[..i].contains(&index) {
                    bail!("face {} repeats vertex {}", f, index);
                }
                uses[index] += 1;
            }
        }

        if let Some(vertex) = uses.iter().position(|&n| n != 3) {
            bail!(
                "vertex {} is a corner of {} faces, expected 3",
                vertex,
                uses[vertex]
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_unit_cube_topology() {
        let mesh = BoxMesh::from_half_extents(&Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.face_count(), 6);
        mesh.validate().unwrap();
        assert_eq!(mesh.triangles().len(), 12);
    }

    #[test]
    fn test_face_normals_point_outward() {
        let mesh = BoxMesh::from_half_extents(&Vector3::new(3.0, 0.5, 2.0));
        let centroid = mesh.centroid();
        let expected = [
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ];

        for (face, direction) in expected.iter().enumerate() {
            let normal = mesh.face_normal(face).normalize();
            assert_relative_eq!(normal, *direction, epsilon = 1e-12);

            let face_center = mesh.faces[face]
                .indices
                .iter()
                .fold(Vector3::<f64>::zeros(), |acc, &i| acc + mesh.vertices[i].coords)
                / 4.0;
            assert!(normal.dot(&(face_center - centroid.coords)) > 0.0);
        }
    }

    #[test]
    fn test_scaling_is_component_wise() {
        let mesh = BoxMesh::from_half_extents(&Vector3::new(1.5, 0.5, 0.25));
        assert_eq!(mesh.vertices[0], Point3::new(1.5, 0.5, -0.25));
        assert_eq!(mesh.vertices[6], Point3::new(-1.5, -0.5, 0.25));
    }

    #[test]
    fn test_from_corners_recenters() {
        let center = Point3::new(10.0, -2.0, 4.0);
        let corners = UNIT_CUBE_CORNERS.map(|s| center + Vector3::from(s));
        let mesh = BoxMesh::from_corners(&corners, &center);

        assert_eq!(mesh.vertices[0], Point3::new(1.0, 1.0, -1.0));
        assert_eq!(mesh.centroid(), Point3::origin());
        assert_eq!(mesh.translated(&center), corners);
    }

    #[test]
    fn test_validate_rejects_bad_topology() {
        let mut mesh = BoxMesh::from_half_extents(&Vector3::new(1.0, 1.0, 1.0));
        mesh.faces[0] = Quad::new([0, 0, 2, 3]);
        assert!(mesh.validate().is_err());

        mesh.faces[0] = Quad::new([0, 1, 2, 9]);
        assert!(mesh.validate().is_err());
    }
}
