// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types for bounding-volume computation

use thiserror::Error;

/// Failures detected while building a bounding volume.
///
/// Every variant is raised before any mesh is generated, so a caller that
/// receives one of these can be sure nothing was placed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundsError {
    /// No input objects, or no points to scan.
    #[error("nothing to bound: the selection is empty")]
    EmptySelection,

    /// Too few vertices (or all coincident) for a principal-axis fit.
    #[error("oriented box needs at least 3 non-coincident vertices, got {vertices}")]
    InsufficientGeometry { vertices: usize },

    /// The eigen solver did not yield three finite orthonormal axes.
    #[error("numerical degeneracy: {0}")]
    NumericalDegeneracy(String),
}

impl BoundsError {
    pub(crate) fn degeneracy(reason: impl Into<String>) -> Self {
        Self::NumericalDegeneracy(reason.into())
    }
}

/// Result alias for the core builders
pub type BoundsResult<T> = std::result::Result<T, BoundsError>;
