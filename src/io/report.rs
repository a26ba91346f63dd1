// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! JSON summary of the boxes a run placed

use crate::geometry::{BoxShape, BOX_FACES};
use crate::operator::{CreatedBox, Grouping, VolumeKind};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One placed box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxReport {
    pub name: String,
    pub collection: String,
    pub kind: VolumeKind,
    /// World-space placement center
    pub center: [f64; 3],
    pub half_extents: [f64; 3],
    /// Frame axes as rows, oriented boxes only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axes: Option<[[f64; 3]; 3]>,
    /// World-space mesh vertices
    pub vertices: Vec<[f64; 3]>,
    pub faces: Vec<[usize; 4]>,
}

impl From<&CreatedBox> for BoxReport {
    fn from(created: &CreatedBox) -> Self {
        let description = &created.collision.description;
        let axes: Option<[[f64; 3]; 3]> = match &description.shape {
            BoxShape::Axis { .. } => None,
            BoxShape::Corners { frame, .. } => Some([0, 1, 2].map(|i| frame.axis(i).into())),
        };

        Self {
            name: created.object.name.clone(),
            collection: created.object.collection.clone(),
            kind: description.kind(),
            center: description.center.into(),
            half_extents: description.half_extents().into(),
            axes,
            vertices: created
                .object
                .world_vertices()
                .iter()
                .map(|v| v.coords.into())
                .collect(),
            faces: BOX_FACES.to_vec(),
        }
    }
}

/// Result of one scene run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub source: String,
    pub kind: VolumeKind,
    pub grouping: Grouping,
    pub boxes: Vec<BoxReport>,
}

impl Report {
    pub fn new(
        source: impl Into<String>,
        kind: VolumeKind,
        grouping: Grouping,
        created: &[CreatedBox],
    ) -> Self {
        Self {
            source: source.into(),
            kind,
            grouping,
            boxes: created.iter().map(BoxReport::from).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }

    /// Write JSON report
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write report: {}", path.display()))
    }
}
