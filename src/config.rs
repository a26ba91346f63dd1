// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Kernel configuration system

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up by [`KernelConfig::load`]
pub const CONFIG_FILE: &str = "ubx.toml";

/// Where an oriented box is anchored in world space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObbCenter {
    /// Midpoint of the world AABB of the objects' bounding-box corners.
    AabbMidpoint,
    /// Center of the principal-axis box itself.
    FrameCenter,
}

impl Default for ObbCenter {
    fn default() -> Self {
        Self::AabbMidpoint
    }
}

/// Kernel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Prefix of every generated object name
    pub name_prefix: String,
    /// Prefix of the collection a box is placed into
    pub collection_prefix: String,
    /// Name used for an AABB when no base name is available
    pub aabb_fallback_name: String,
    /// Name used for an OBB when no base name is available
    pub obb_fallback_name: String,
    /// Relative distance under which two eigenvalues count as equal
    pub eigen_tie_tolerance: f64,
    /// Maximum deviation of the eigenvector Gram matrix from identity
    pub orthogonality_tolerance: f64,
    /// Iteration cap for the symmetric eigen solver
    pub max_eigen_iterations: usize,
    /// Extent under which a point cloud is considered a single point
    pub degenerate_extent: f64,
    /// Point count from which reductions run on the rayon pool
    pub parallel_threshold: usize,
    /// Placement anchor of oriented boxes
    pub obb_center: ObbCenter,
    /// Verbose output
    pub verbose: bool,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            name_prefix: "UBX_".to_string(),
            collection_prefix: "Collision_".to_string(),
            aabb_fallback_name: "UBX_AABB".to_string(),
            obb_fallback_name: "UBX_OBB".to_string(),
            eigen_tie_tolerance: 1e-9,
            orthogonality_tolerance: 1e-6,
            max_eigen_iterations: 1000,
            degenerate_extent: 1e-12,
            parallel_threshold: 65_536,
            obb_center: ObbCenter::AabbMidpoint,
            verbose: false,
        }
    }
}

impl KernelConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: KernelConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };

        Ok(config.with_env_overrides())
    }

    /// Apply `UBX_*` environment variable overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(threshold) = std::env::var("UBX_PARALLEL_THRESHOLD") {
            if let Ok(threshold) = threshold.parse() {
                self.parallel_threshold = threshold;
            }
        }

        if let Ok(prefix) = std::env::var("UBX_NAME_PREFIX") {
            self.name_prefix = prefix;
        }

        if let Ok(prefix) = std::env::var("UBX_COLLECTION_PREFIX") {
            self.collection_prefix = prefix;
        }

        if let Ok(verbose) = std::env::var("UBX_VERBOSE") {
            self.verbose = parse_flag(&verbose).unwrap_or(false);
        }

        self
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Whether a cloud of `len` points is reduced on the rayon pool
    pub fn is_parallel(&self, len: usize) -> bool {
        len >= self.parallel_threshold
    }
}

/// Boolean environment value: `true`/`1`/`yes`/`on` or `false`/`0`/`no`/`off`
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_reference_naming() {
        let config = KernelConfig::default();
        assert_eq!(config.name_prefix, "UBX_");
        assert_eq!(config.collection_prefix, "Collision_");
        assert_eq!(config.aabb_fallback_name, "UBX_AABB");
        assert_eq!(config.obb_fallback_name, "UBX_OBB");
        assert_eq!(config.obb_center, ObbCenter::AabbMidpoint);
    }

    #[test]
    fn test_save_and_reload() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("ubx.toml");

        let mut config = KernelConfig::default();
        config.parallel_threshold = 12;
        config.obb_center = ObbCenter::FrameCenter;
        config.save(&path)?;

        let loaded = KernelConfig::from_file(&path)?;
        assert_eq!(loaded.parallel_threshold, 12);
        assert_eq!(loaded.obb_center, ObbCenter::FrameCenter);
        Ok(())
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("ubx.toml");
        std::fs::write(&path, "obb_center = \"frame_center\"\n")?;

        let loaded = KernelConfig::from_file(&path)?;
        assert_eq!(loaded.obb_center, ObbCenter::FrameCenter);
        assert_eq!(loaded.name_prefix, "UBX_");
        Ok(())
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("Yes"), Some(true));
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_malformed_file_is_reported() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("ubx.toml");
        std::fs::write(&path, "parallel_threshold = \"many\"\n")?;

        let err = KernelConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
        Ok(())
    }
}
