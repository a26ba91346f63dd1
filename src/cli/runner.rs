// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Scene runner: import, compute, place, time

use crate::config::KernelConfig;
use crate::io::{self, Report};
use crate::operator::{create_collision, CreatedBox, Grouping, VolumeKind};
use crate::scene::{SceneGraph, SceneObject};
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// Result of running one scene
pub struct SceneRun {
    pub source: PathBuf,
    pub scene: SceneGraph,
    pub created: Vec<CreatedBox>,
    pub duration: Duration,
}

impl SceneRun {
    pub fn report(&self, kind: VolumeKind, grouping: Grouping) -> Report {
        Report::new(self.source.display().to_string(), kind, grouping, &self.created)
    }
}

/// Runner for collision box requests
pub struct Runner {
    config: KernelConfig,
}

impl Runner {
    pub fn new(config: KernelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KernelConfig {
        &self.config
    }

    /// Place boxes for `objects` into a fresh scene that already holds them
    pub fn run_objects(
        &self,
        objects: &[SceneObject],
        kind: VolumeKind,
        grouping: Grouping,
    ) -> Result<(SceneGraph, Vec<CreatedBox>)> {
        let mut scene = SceneGraph::with_objects(objects);
        let created = create_collision(objects, kind, grouping, &self.config, &mut scene)?;
        Ok((scene, created))
    }

    /// Import a scene file and place its boxes
    pub fn run_scene(&self, path: &Path, kind: VolumeKind, grouping: Grouping) -> Result<SceneRun> {
        let start = Instant::now();

        let objects = io::import_scene_file(path)?;
        let (scene, created) = self
            .run_objects(&objects, kind, grouping)
            .with_context(|| format!("Failed to create {} boxes for {}", kind, path.display()))?;

        Ok(SceneRun {
            source: path.to_path_buf(),
            scene,
            created,
            duration: start.elapsed(),
        })
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(KernelConfig::default())
    }
}

fn is_scene_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == "json")
}

/// Expand files and directories into the scene files they hold
pub fn discover_scenes(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut scenes = Vec::new();

    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if is_scene_file(entry.path()) {
                    scenes.push(entry.path().to_path_buf());
                }
            }
        } else if input.is_file() {
            scenes.push(input.clone());
        } else {
            bail!("Input not found: {}", input.display());
        }
    }

    // Sort for consistent ordering
    scenes.sort();
    scenes.dedup();

    Ok(scenes)
}
