// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene boundary - selected objects in, placed boxes out

mod graph;
mod object;
mod placement;

pub use graph::{Collection, SceneGraph, SCENE_COLLECTION};
pub use object::{base_name, selection_base_name, SceneObject};
pub use placement::{DisplayHints, Namespace, PlacedObject, Placement, PlacementRequest};
