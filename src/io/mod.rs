// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - scene import and result reports

mod importer;
mod report;

pub use importer::{
    import_scene_file, parse_scene, ComponentTransform, MatrixTransform, ObjectSpec, SceneFile,
    TransformSpec,
};
pub use report::{BoxReport, Report};
