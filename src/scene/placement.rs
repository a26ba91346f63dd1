// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Contract between the kernel and the scene that receives its boxes

use crate::geometry::BoxMesh;
use anyhow::Result;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Object names already in use by the host scene
pub trait Namespace {
    fn is_taken(&self, name: &str) -> bool;

    /// First `"{stem}_{n}"` not taken, counting `n` up from 0.
    ///
    /// Terminates for any finite namespace.
    fn next_unused_name(&self, stem: &str) -> String {
        let mut n: u64 = 0;
        loop {
            let candidate = format!("{}_{}", stem, n);
            if !self.is_taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// How the host should display a collision box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayHints {
    pub wireframe: bool,
    pub hide_render: bool,
}

impl Default for DisplayHints {
    fn default() -> Self {
        Self {
            wireframe: true,
            hide_render: true,
        }
    }
}

/// Everything the host needs to create one box object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRequest {
    pub name: String,
    /// Destination collection, created on demand; `None` keeps the object in
    /// the scene's default collection
    pub collection: Option<String>,
    pub mesh: BoxMesh,
    /// World-space location of the mesh origin
    pub location: Point3<f64>,
    pub display: DisplayHints,
}

/// An object the host created for a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    /// Final name, which the host may have suffixed
    pub name: String,
    pub collection: String,
    pub mesh: BoxMesh,
    pub location: Point3<f64>,
    pub display: DisplayHints,
}

impl PlacedObject {
    /// World-space mesh vertices
    pub fn world_vertices(&self) -> [Point3<f64>; 8] {
        self.mesh.translated(&self.location)
    }
}

/// Host scene able to receive generated boxes
pub trait Placement: Namespace {
    fn place(&mut self, request: PlacementRequest) -> Result<PlacedObject>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Names(HashSet<String>);

    impl Namespace for Names {
        fn is_taken(&self, name: &str) -> bool {
            self.0.contains(name)
        }
    }

    #[test]
    fn test_next_unused_name_starts_at_zero() {
        let names = Names(HashSet::new());
        assert_eq!(names.next_unused_name("UBX_Foo"), "UBX_Foo_0");
    }

    #[test]
    fn test_next_unused_name_skips_taken() {
        let names = Names(
            ["UBX_Foo_0", "UBX_Foo_1", "UBX_Foo_3"]
                .into_iter()
                .map(String::from)
                .collect(),
        );
        assert_eq!(names.next_unused_name("UBX_Foo"), "UBX_Foo_2");
        assert_eq!(names.next_unused_name("UBX_Bar"), "UBX_Bar_0");
    }
}
