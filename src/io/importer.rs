// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! JSON scene importer

use crate::scene::SceneObject;
use crate::utils::math::{compose_trs, matrix_from_rows};
use anyhow::{bail, Context, Result};
use nalgebra::{Matrix4, Point3, Vector3};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Scene file as written by an exporter script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneFile {
    pub objects: Vec<ObjectSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<TransformSpec>,
    #[serde(default)]
    pub vertices: Vec<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_box: Option<[[f64; 3]; 8]>,
}

/// Row-major 4x4 matrix
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatrixTransform {
    pub matrix: [[f64; 4]; 4],
}

/// Scale, then XYZ Euler rotation in degrees, then translation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentTransform {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<[f64; 3]>,
}

/// Local-to-world transform, either a full matrix or its components.
/// Input matching neither shape is a parse error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransformSpec {
    Matrix(MatrixTransform),
    Components(ComponentTransform),
}

impl TransformSpec {
    pub fn to_matrix(&self) -> Matrix4<f64> {
        match self {
            Self::Matrix(MatrixTransform { matrix }) => matrix_from_rows(matrix),
            Self::Components(ComponentTransform {
                translation,
                rotation,
                scale,
            }) => compose_trs(
                &translation.map_or_else(Vector3::zeros, Vector3::from),
                &rotation.map_or_else(Vector3::zeros, Vector3::from),
                &scale.map_or_else(|| Vector3::repeat(1.0), Vector3::from),
            ),
        }
    }
}

impl ObjectSpec {
    fn into_object(self) -> Result<SceneObject> {
        if self.vertices.is_empty() && self.bound_box.is_none() {
            bail!("object '{}' has neither vertices nor a bound_box", self.name);
        }

        let transform = self
            .transform
            .as_ref()
            .map_or_else(Matrix4::identity, TransformSpec::to_matrix);
        if transform.iter().any(|v| !v.is_finite()) {
            bail!("object '{}' has a non-finite transform", self.name);
        }

        let vertices: Vec<Point3<f64>> = self.vertices.into_iter().map(Point3::from).collect();
        Ok(match self.bound_box {
            Some(corners) => {
                SceneObject::with_bound_box(self.name, transform, corners.map(Point3::from), vertices)
            }
            None => SceneObject::new(self.name, transform, vertices),
        })
    }
}

/// Parse scene JSON into selected objects, in file order
pub fn parse_scene(source: &str) -> Result<Vec<SceneObject>> {
    let scene: SceneFile = serde_json::from_str(source).context("Invalid scene JSON")?;
    let objects = scene
        .objects
        .into_iter()
        .map(ObjectSpec::into_object)
        .collect::<Result<Vec<_>>>()?;
    debug!(objects = objects.len(), "parsed scene");
    Ok(objects)
}

/// Import a scene file
pub fn import_scene_file(path: impl AsRef<Path>) -> Result<Vec<SceneObject>> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene file: {}", path.display()))?;

    parse_scene(&source).with_context(|| format!("Failed to parse scene file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_import_scene_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(
            file,
            r#"{{"objects": [{{"name": "Crate", "vertices": [[0,0,0],[1,2,3]]}}]}}"#
        )?;

        let objects = import_scene_file(file.path())?;
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].name, "Crate");
        assert_eq!(objects[0].world_transform, Matrix4::identity());
        assert_eq!(objects[0].bound_box[4], Point3::new(1.0, 2.0, 3.0));
        Ok(())
    }

    #[test]
    fn test_matrix_transform_is_row_major() -> Result<()> {
        let objects = parse_scene(
            r#"{"objects": [{"name": "A", "vertices": [[0,0,0]],
                "transform": {"matrix": [[1,0,0,4],[0,1,0,5],[0,0,1,6],[0,0,0,1]]}}]}"#,
        )?;
        let world = objects[0].world_transform.transform_point(&Point3::origin());
        assert_eq!(world, Point3::new(4.0, 5.0, 6.0));
        Ok(())
    }

    #[test]
    fn test_component_transform() -> Result<()> {
        let objects = parse_scene(
            r#"{"objects": [{"name": "A", "vertices": [[1,0,0]],
                "transform": {"translation": [0,0,1], "rotation": [0,0,90], "scale": [3,1,1]}}]}"#,
        )?;
        let world = objects[0].world_transform.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(world, Point3::new(0.0, 3.0, 1.0), epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_short_matrix_is_rejected() {
        let err = parse_scene(
            r#"{"objects": [{"name": "A", "vertices": [[0,0,0]],
                "transform": {"matrix": [[1,0,0,4],[0,1,0,5],[0,0,1,6]]}}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid scene JSON"));
    }

    #[test]
    fn test_unknown_transform_key_is_rejected() {
        let err = parse_scene(
            r#"{"objects": [{"name": "A", "vertices": [[0,0,0]],
                "transform": {"translate": [10,0,0]}}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid scene JSON"));
    }

    #[test]
    fn test_explicit_bound_box_is_kept() -> Result<()> {
        let objects = parse_scene(
            r#"{"objects": [{"name": "Empty", "bound_box":
                [[1,1,-1],[1,-1,-1],[-1,-1,-1],[-1,1,-1],[1,1,1],[1,-1,1],[-1,-1,1],[-1,1,1]]}]}"#,
        )?;
        assert!(objects[0].vertices.is_empty());
        assert_eq!(objects[0].bound_box[0], Point3::new(1.0, 1.0, -1.0));
        Ok(())
    }

    #[test]
    fn test_object_without_geometry_is_rejected() {
        let result = parse_scene(r#"{"objects": [{"name": "Ghost"}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(import_scene_file("/nonexistent/scene.json").is_err());
    }
}
