// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! UBX collision box kernel
//!
//! Computes axis-aligned and principal-axis oriented bounding boxes around
//! selected scene objects and places them back into the scene as named,
//! wireframe box meshes grouped into per-object collections.

pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod operator;
pub mod scene;
pub mod utils;

pub use config::{KernelConfig, ObbCenter};
pub use error::{BoundsError, BoundsResult};
pub use geometry::{Aabb, BoxDescription, BoxMesh, Obb, OrientedFrame, PointCloud};
pub use io::{import_scene_file, parse_scene, Report};
pub use operator::{
    create_aabb, create_aabb_per_object, create_collision, create_obb, create_obb_per_object,
    CollisionBox, CreatedBox, Grouping, VolumeKind,
};
pub use scene::{Namespace, Placement, SceneGraph, SceneObject};

use anyhow::Result;
use std::path::Path;

/// Import a scene file and place one box of `kind` around its objects
pub fn bound_file(
    path: impl AsRef<Path>,
    kind: VolumeKind,
) -> Result<(SceneGraph, Vec<CreatedBox>)> {
    let objects = import_scene_file(path)?;
    let config = KernelConfig::default();
    let mut scene = SceneGraph::with_objects(&objects);
    let created = create_collision(&objects, kind, Grouping::Selection, &config, &mut scene)?;
    Ok((scene, created))
}
