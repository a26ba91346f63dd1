// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Collision box operations
//!
//! Two bounding-volume kinds, each available for the whole selection or for
//! every object on its own. All boxes of a request are computed before the
//! first one is placed, so a failing request places nothing.

use crate::config::KernelConfig;
use crate::error::{BoundsError, BoundsResult};
use crate::geometry::{Aabb, BoxDescription, BoxMesh, Obb, PointCloud};
use crate::scene::{
    selection_base_name, DisplayHints, Namespace, PlacedObject, Placement, PlacementRequest,
    SceneObject,
};
use anyhow::{Context, Result};
use clap::ValueEnum;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Bounding volume flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VolumeKind {
    /// Axis-aligned box over the objects' bounding-box corners
    Aabb,
    /// Principal-axis box over every vertex
    Obb,
}

impl fmt::Display for VolumeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aabb => write!(f, "AABB"),
            Self::Obb => write!(f, "OBB"),
        }
    }
}

/// How a selection is split into bounding requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    /// One box enclosing every selected object
    Selection,
    /// One box per selected object
    PerObject,
}

/// A computed box, ready to be named and placed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionBox {
    /// Base name the box is named after, if the objects offered one
    pub base_name: Option<String>,
    pub description: BoxDescription,
    pub mesh: BoxMesh,
}

impl CollisionBox {
    fn new(objects: &[SceneObject], description: BoxDescription) -> Self {
        Self {
            base_name: selection_base_name(objects).map(str::to_string),
            mesh: BoxMesh::from_description(&description),
            description,
        }
    }

    pub fn kind(&self) -> VolumeKind {
        self.description.kind()
    }

    pub fn center(&self) -> Point3<f64> {
        self.description.center
    }
}

/// A placed box together with the computation that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedBox {
    pub collision: CollisionBox,
    pub object: PlacedObject,
}

fn bound_corner_cloud(objects: &[SceneObject]) -> PointCloud {
    let mut cloud = PointCloud::with_capacity(objects.len() * 8);
    for object in objects {
        object.gather_bound_corners(&mut cloud);
    }
    cloud
}

fn vertex_cloud(objects: &[SceneObject]) -> PointCloud {
    let capacity = objects.iter().map(|object| object.vertices.len()).sum();
    let mut cloud = PointCloud::with_capacity(capacity);
    for object in objects {
        object.gather_vertices(&mut cloud);
    }
    cloud
}

/// Axis-aligned box around the world bounding-box corners of `objects`
pub fn build_aabb(objects: &[SceneObject], config: &KernelConfig) -> BoundsResult<CollisionBox> {
    if objects.is_empty() {
        return Err(BoundsError::EmptySelection);
    }

    let corners = bound_corner_cloud(objects);
    let aabb = Aabb::from_cloud(&corners, config.is_parallel(corners.len()))?;
    debug!(objects = objects.len(), center = ?aabb.center(), "built axis-aligned box");

    Ok(CollisionBox::new(objects, BoxDescription::axis_aligned(&aabb)))
}

/// Principal-axis box around every world vertex of `objects`, anchored per
/// `config.obb_center`
pub fn build_obb(objects: &[SceneObject], config: &KernelConfig) -> BoundsResult<CollisionBox> {
    if objects.is_empty() {
        return Err(BoundsError::EmptySelection);
    }

    let vertices = vertex_cloud(objects);
    let obb = Obb::from_cloud(&vertices, config)?;

    let corners = bound_corner_cloud(objects);
    let placement = Aabb::from_cloud(&corners, config.is_parallel(corners.len()))?;
    let description = BoxDescription::oriented(&obb, &placement, config.obb_center);
    debug!(
        objects = objects.len(),
        vertices = vertices.len(),
        center = ?description.center,
        "built oriented box"
    );

    Ok(CollisionBox::new(objects, description))
}

pub fn build(
    objects: &[SceneObject],
    kind: VolumeKind,
    config: &KernelConfig,
) -> BoundsResult<CollisionBox> {
    match kind {
        VolumeKind::Aabb => build_aabb(objects, config),
        VolumeKind::Obb => build_obb(objects, config),
    }
}

/// Compute every box of a request without touching the scene
pub fn plan(
    objects: &[SceneObject],
    kind: VolumeKind,
    grouping: Grouping,
    config: &KernelConfig,
) -> BoundsResult<Vec<CollisionBox>> {
    if objects.is_empty() {
        return Err(BoundsError::EmptySelection);
    }

    match grouping {
        Grouping::Selection => Ok(vec![build(objects, kind, config)?]),
        Grouping::PerObject => objects
            .iter()
            .map(|object| build(std::slice::from_ref(object), kind, config))
            .collect(),
    }
}

/// Name, collection and display hints for a computed box
pub fn placement_request(
    collision: &CollisionBox,
    namespace: &impl Namespace,
    config: &KernelConfig,
) -> PlacementRequest {
    let (name, collection) = match &collision.base_name {
        Some(base) => (
            namespace.next_unused_name(&format!("{}{}", config.name_prefix, base)),
            Some(format!("{}{}", config.collection_prefix, base)),
        ),
        None => {
            let fallback = match collision.kind() {
                VolumeKind::Aabb => &config.aabb_fallback_name,
                VolumeKind::Obb => &config.obb_fallback_name,
            };
            (fallback.clone(), None)
        }
    };

    PlacementRequest {
        name,
        collection,
        mesh: collision.mesh.clone(),
        location: collision.center(),
        display: DisplayHints::default(),
    }
}

/// Compute and place collision boxes for `objects`
pub fn create_collision<P: Placement>(
    objects: &[SceneObject],
    kind: VolumeKind,
    grouping: Grouping,
    config: &KernelConfig,
    scene: &mut P,
) -> Result<Vec<CreatedBox>> {
    let planned = plan(objects, kind, grouping, config)?;

    let mut created = Vec::with_capacity(planned.len());
    for collision in planned {
        let request = placement_request(&collision, &*scene, config);
        let requested = request.name.clone();
        let object = scene
            .place(request)
            .with_context(|| format!("Failed to place {}", requested))?;
        info!(
            name = %object.name,
            collection = %object.collection,
            kind = %kind,
            "placed collision box"
        );
        created.push(CreatedBox { collision, object });
    }

    Ok(created)
}

/// One axis-aligned box for the whole selection
pub fn create_aabb<P: Placement>(
    objects: &[SceneObject],
    config: &KernelConfig,
    scene: &mut P,
) -> Result<Vec<CreatedBox>> {
    create_collision(objects, VolumeKind::Aabb, Grouping::Selection, config, scene)
}

/// One axis-aligned box per selected object
pub fn create_aabb_per_object<P: Placement>(
    objects: &[SceneObject],
    config: &KernelConfig,
    scene: &mut P,
) -> Result<Vec<CreatedBox>> {
    create_collision(objects, VolumeKind::Aabb, Grouping::PerObject, config, scene)
}

/// One oriented box for the whole selection
pub fn create_obb<P: Placement>(
    objects: &[SceneObject],
    config: &KernelConfig,
    scene: &mut P,
) -> Result<Vec<CreatedBox>> {
    create_collision(objects, VolumeKind::Obb, Grouping::Selection, config, scene)
}

/// One oriented box per selected object
pub fn create_obb_per_object<P: Placement>(
    objects: &[SceneObject],
    config: &KernelConfig,
    scene: &mut P,
) -> Result<Vec<CreatedBox>> {
    create_collision(objects, VolumeKind::Obb, Grouping::PerObject, config, scene)
}
