// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! In-memory scene graph implementing the placement contract

use super::{Namespace, PlacedObject, Placement, PlacementRequest, SceneObject};
use ahash::{AHashMap, AHashSet};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Name of the root collection every scene starts with
pub const SCENE_COLLECTION: &str = "Scene Collection";

/// Named group of objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    /// Parent collection, `None` for the root
    pub parent: Option<String>,
    /// Object names linked into this collection
    pub objects: Vec<String>,
}

/// Minimal host scene: a flat object namespace and a collection tree
#[derive(Debug, Clone)]
pub struct SceneGraph {
    names: AHashSet<String>,
    placed: Vec<PlacedObject>,
    collections: Vec<Collection>,
    collection_index: AHashMap<String, usize>,
}

impl SceneGraph {
    pub fn new() -> Self {
        let mut graph = Self {
            names: AHashSet::new(),
            placed: Vec::new(),
            collections: Vec::new(),
            collection_index: AHashMap::new(),
        };
        graph.push_collection(SCENE_COLLECTION, None);
        graph
    }

    /// Scene already holding `objects` in its root collection
    pub fn with_objects(objects: &[SceneObject]) -> Self {
        let mut graph = Self::new();
        for object in objects {
            graph.register(&object.name);
        }
        graph
    }

    /// Record an existing object name in the root collection
    pub fn register(&mut self, name: &str) -> bool {
        if !self.names.insert(name.to_string()) {
            return false;
        }
        self.collections[0].objects.push(name.to_string());
        true
    }

    fn push_collection(&mut self, name: &str, parent: Option<&str>) -> usize {
        let index = self.collections.len();
        self.collections.push(Collection {
            name: name.to_string(),
            parent: parent.map(str::to_string),
            objects: Vec::new(),
        });
        self.collection_index.insert(name.to_string(), index);
        index
    }

    /// Index of the named collection, created under the root if absent
    pub fn ensure_collection(&mut self, name: &str) -> usize {
        if let Some(&index) = self.collection_index.get(name) {
            return index;
        }
        debug!(collection = name, "creating collection");
        self.push_collection(name, Some(SCENE_COLLECTION))
    }

    /// Host-style deduplication: `name`, then `name.001`, `name.002`, ...
    fn claim_name(&mut self, requested: &str) -> String {
        let mut name = requested.to_string();
        let mut n = 0u32;
        while self.names.contains(&name) {
            n += 1;
            name = format!("{}.{:03}", requested, n);
        }
        if n > 0 {
            warn!(requested, assigned = %name, "object name taken, host suffix applied");
        }
        self.names.insert(name.clone());
        name
    }

    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collection_index
            .get(name)
            .map(|&index| &self.collections[index])
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    /// Objects placed through [`Placement::place`], in order
    pub fn placed(&self) -> &[PlacedObject] {
        &self.placed
    }

    /// Number of objects in the namespace, placed or registered
    pub fn object_count(&self) -> usize {
        self.names.len()
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Namespace for SceneGraph {
    fn is_taken(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

impl Placement for SceneGraph {
    fn place(&mut self, request: PlacementRequest) -> Result<PlacedObject> {
        if request.name.is_empty() {
            bail!("cannot place an object without a name");
        }

        let name = self.claim_name(&request.name);
        let index = match &request.collection {
            Some(collection) => self.ensure_collection(collection),
            None => 0,
        };
        self.collections[index].objects.push(name.clone());

        let placed = PlacedObject {
            name,
            collection: self.collections[index].name.clone(),
            mesh: request.mesh,
            location: request.location,
            display: request.display,
        };
        self.placed.push(placed.clone());
        Ok(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoxMesh;
    use crate::scene::DisplayHints;
    use nalgebra::{Point3, Vector3};

    fn request(name: &str, collection: Option<&str>) -> PlacementRequest {
        PlacementRequest {
            name: name.to_string(),
            collection: collection.map(str::to_string),
            mesh: BoxMesh::from_half_extents(&Vector3::new(1.0, 1.0, 1.0)),
            location: Point3::new(1.0, 2.0, 3.0),
            display: DisplayHints::default(),
        }
    }

    #[test]
    fn test_place_into_new_collection() -> Result<()> {
        let mut scene = SceneGraph::new();
        let placed = scene.place(request("UBX_Crate_0", Some("Collision_Crate")))?;

        assert_eq!(placed.collection, "Collision_Crate");
        assert!(scene.is_taken("UBX_Crate_0"));

        let collection = scene.collection("Collision_Crate").unwrap();
        assert_eq!(collection.parent.as_deref(), Some(SCENE_COLLECTION));
        assert_eq!(collection.objects, vec!["UBX_Crate_0".to_string()]);

        // moved out of the root collection
        let root = scene.collection(SCENE_COLLECTION).unwrap();
        assert!(root.objects.is_empty());
        Ok(())
    }

    #[test]
    fn test_existing_collection_is_reused() -> Result<()> {
        let mut scene = SceneGraph::new();
        scene.place(request("UBX_Crate_0", Some("Collision_Crate")))?;
        scene.place(request("UBX_Crate_1", Some("Collision_Crate")))?;

        assert_eq!(scene.collections().len(), 2);
        assert_eq!(scene.collection("Collision_Crate").unwrap().objects.len(), 2);
        Ok(())
    }

    #[test]
    fn test_fixed_name_gets_host_suffix() -> Result<()> {
        let mut scene = SceneGraph::new();
        let first = scene.place(request("UBX_AABB", None))?;
        let second = scene.place(request("UBX_AABB", None))?;

        assert_eq!(first.name, "UBX_AABB");
        assert_eq!(second.name, "UBX_AABB.001");
        assert_eq!(first.collection, SCENE_COLLECTION);
        Ok(())
    }

    #[test]
    fn test_registered_names_are_taken() {
        let mut scene = SceneGraph::new();
        assert!(scene.register("UBX_Foo_0"));
        assert!(!scene.register("UBX_Foo_0"));
        assert_eq!(scene.next_unused_name("UBX_Foo"), "UBX_Foo_1");
        assert_eq!(scene.object_count(), 1);
    }

    #[test]
    fn test_unnamed_request_is_rejected() {
        let mut scene = SceneGraph::new();
        assert!(scene.place(request("", None)).is_err());
        assert!(scene.placed().is_empty());
    }
}
