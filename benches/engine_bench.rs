// ABOUTME: Criterion benchmarks for the motion analysis hot path
// ABOUTME: Measures per-frame session processing and the geometric kernel

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kinema Motion Intelligence

//! Criterion benchmarks for the per-frame analysis pipeline.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use kinema_engine::geometry;
use kinema_engine::landmarks::LANDMARK_COUNT;
use kinema_engine::{
    BodyJoint, Difficulty, EngineConfig, ExerciseCatalog, ExerciseKind, ExerciseSession, Landmark,
    PoseFrame,
};

fn arm_frame(theta_deg: f64) -> PoseFrame {
    let theta = theta_deg.to_radians();
    let mut lm = vec![Landmark::with_visibility(0.5, 0.5, 0.9); LANDMARK_COUNT];
    lm[BodyJoint::LeftShoulder.index()] = Landmark::with_visibility(0.6, 0.4, 0.9);
    lm[BodyJoint::RightShoulder.index()] = Landmark::with_visibility(0.4, 0.4, 0.9);
    lm[BodyJoint::LeftHip.index()] = Landmark::with_visibility(0.6, 0.7, 0.9);
    lm[BodyJoint::RightHip.index()] = Landmark::with_visibility(0.4, 0.7, 0.9);
    lm[BodyJoint::LeftElbow.index()] = Landmark::with_visibility(
        0.15f64.mul_add(theta.sin(), 0.6),
        0.15f64.mul_add(theta.cos(), 0.4),
        0.9,
    );
    lm[BodyJoint::RightElbow.index()] = Landmark::with_visibility(
        0.15f64.mul_add(-theta.sin(), 0.4),
        0.15f64.mul_add(theta.cos(), 0.4),
        0.9,
    );
    PoseFrame::new(lm)
}

fn bench_geometry(c: &mut Criterion) {
    let a = Landmark::new(0.2, 0.7);
    let b = Landmark::new(0.5, 0.4);
    let p = Landmark::new(0.8, 0.9);

    c.bench_function("geometry/angle", |bencher| {
        bencher.iter(|| geometry::angle(black_box(&a), black_box(&b), black_box(&p)));
    });
}

fn bench_process_frame(c: &mut Criterion) {
    let catalog = ExerciseCatalog::default();
    // Pre-rendered 30Hz rep cycle: down, up, hold, down.
    let frames: Vec<PoseFrame> = (0..120)
        .map(|i| {
            let theta = match i % 4 {
                0 => 10.0,
                1 | 2 => 160.0,
                _ => 10.0,
            };
            arm_frame(theta)
        })
        .collect();

    let mut group = c.benchmark_group("session");
    group.throughput(Throughput::Elements(frames.len() as u64));
    group.bench_function("process_frame/arm_raise", |bencher| {
        bencher.iter(|| {
            let mut session = ExerciseSession::new(
                ExerciseKind::ArmRaise,
                Difficulty::Intermediate,
                &catalog,
                EngineConfig::default(),
            )
            .unwrap();
            for (i, frame) in frames.iter().enumerate() {
                black_box(session.process_frame(frame, i as f64 * 33.0));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_geometry, bench_process_frame);
criterion_main!(benches);
