// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::{Matrix4, Point3, Rotation3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ubx::geometry::{Aabb, Obb, PointCloud};
use ubx::operator::{plan, Grouping, VolumeKind};
use ubx::{KernelConfig, SceneObject};

const SIZES: [usize; 3] = [1_000, 100_000, 1_000_000];

/// Stretched, rotated point cloud
fn cloud(len: usize) -> PointCloud {
    let mut rng = StdRng::seed_from_u64(7);
    let rotation = Rotation3::from_euler_angles(0.3, -0.7, 1.1);
    (0..len)
        .map(|_| {
            let local = Vector3::new(
                rng.gen_range(-4.0..4.0),
                rng.gen_range(-2.0..2.0),
                rng.gen_range(-1.0..1.0),
            );
            Point3::from(rotation * local)
        })
        .collect()
}

fn bench_aabb(c: &mut Criterion) {
    let mut group = c.benchmark_group("aabb");

    for &len in &SIZES {
        let points = cloud(len);
        group.bench_with_input(BenchmarkId::new("sequential", len), &points, |b, points| {
            b.iter(|| Aabb::from_cloud(black_box(points), false).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("parallel", len), &points, |b, points| {
            b.iter(|| Aabb::from_cloud(black_box(points), true).unwrap());
        });
    }

    group.finish();
}

fn bench_obb(c: &mut Criterion) {
    let mut group = c.benchmark_group("obb");

    let sequential = KernelConfig {
        parallel_threshold: usize::MAX,
        ..KernelConfig::default()
    };
    let parallel = KernelConfig {
        parallel_threshold: 0,
        ..KernelConfig::default()
    };

    for &len in &SIZES {
        let points = cloud(len);
        group.bench_with_input(BenchmarkId::new("sequential", len), &points, |b, points| {
            b.iter(|| Obb::from_cloud(black_box(points), &sequential).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("parallel", len), &points, |b, points| {
            b.iter(|| Obb::from_cloud(black_box(points), &parallel).unwrap());
        });
    }

    group.finish();
}

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");
    let config = KernelConfig::default();

    let objects: Vec<SceneObject> = (0..64)
        .map(|i| {
            let offset = Vector3::new(i as f64 * 3.0, 0.0, 0.0);
            SceneObject::new(
                format!("Rock.{:03}", i),
                Matrix4::new_translation(&offset),
                cloud(2_000).points().to_vec(),
            )
        })
        .collect();

    for kind in [VolumeKind::Aabb, VolumeKind::Obb] {
        group.bench_function(format!("{}_selection", kind), |b| {
            b.iter(|| plan(black_box(&objects), kind, Grouping::Selection, &config).unwrap());
        });
        group.bench_function(format!("{}_per_object", kind), |b| {
            b.iter(|| plan(black_box(&objects), kind, Grouping::PerObject, &config).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_aabb, bench_obb, bench_plan);
criterion_main!(benches);
