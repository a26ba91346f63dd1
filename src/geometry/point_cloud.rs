// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! World-space point clouds and deterministic chunked reductions

use nalgebra::{Matrix4, Point3, Vector3};
use rayon::prelude::*;

/// Number of points folded into one partial result.
///
/// Chunk boundaries never depend on the thread count, so a reduction gives
/// the same bits whether the chunks run on the rayon pool or in a loop.
pub const REDUCTION_CHUNK: usize = 4096;

/// Ordered world-space points gathered for a single bounding request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    points: Vec<Point3<f64>>,
}

impl PointCloud {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    pub fn from_points(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }

    pub fn push(&mut self, point: Point3<f64>) {
        self.points.push(point);
    }

    /// Map local-space points through `transform` and append them
    pub fn extend_transformed(&mut self, transform: &Matrix4<f64>, local: &[Point3<f64>]) {
        self.points.reserve(local.len());
        for point in local {
            self.points.push(transform.transform_point(point));
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point3<f64>] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point3<f64>> {
        self.points.iter()
    }

    /// Arithmetic mean of the points, `None` when empty
    pub fn centroid(&self, parallel: bool) -> Option<Point3<f64>> {
        let (sum, count) = self.reduce(
            parallel,
            |chunk| {
                let sum = chunk
                    .iter()
                    .fold(Vector3::zeros(), |acc: Vector3<f64>, p| acc + p.coords);
                (sum, chunk.len())
            },
            |(a, n), (b, m)| (a + b, n + m),
        )?;

        Some(Point3::from(sum / count as f64))
    }

    /// Compute one partial per chunk and fold the partials in chunk order
    pub(crate) fn reduce<T, M, F>(&self, parallel: bool, map: M, fold: F) -> Option<T>
    where
        T: Send,
        M: Fn(&[Point3<f64>]) -> T + Sync + Send,
        F: FnMut(T, T) -> T,
    {
        let partials: Vec<T> = if parallel {
            self.points.par_chunks(REDUCTION_CHUNK).map(&map).collect()
        } else {
            self.points.chunks(REDUCTION_CHUNK).map(&map).collect()
        };

        partials.into_iter().reduce(fold)
    }
}

impl From<Vec<Point3<f64>>> for PointCloud {
    fn from(points: Vec<Point3<f64>>) -> Self {
        Self::from_points(points)
    }
}

impl FromIterator<Point3<f64>> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Point3<f64>>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a Point3<f64>;
    type IntoIter = std::slice::Iter<'a, Point3<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
