// ABOUTME: Integration tests for the motion quality analyzer
// ABOUTME: Covers history bounds, speed/smoothness classes, and feedback rate limiting

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kinema Motion Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use kinema_engine::config::MotionConfig;
use kinema_engine::messages;
use kinema_engine::motion_quality::{MotionQualityAnalyzer, MotionSmoothness, MotionSpeed};

fn seeded(config: MotionConfig) -> MotionQualityAnalyzer {
    MotionQualityAnalyzer::with_seed(config, 42)
}

/// Config with praise disabled so smooth/normal movement yields no feedback.
fn no_praise() -> MotionConfig {
    MotionConfig {
        praise_probability: 0.0,
        ..MotionConfig::default()
    }
}

#[test]
fn insufficient_history_reports_neutral() {
    let mut analyzer = seeded(no_praise());
    for i in 0..4 {
        analyzer.update(0.5, 0.5, f64::from(i) * 100.0);
    }

    let snapshot = analyzer.analyze();
    assert_eq!(snapshot.speed, MotionSpeed::Normal);
    assert_eq!(snapshot.smoothness, MotionSmoothness::Smooth);
    assert!(!snapshot.is_moving);
    assert!(snapshot.feedback.is_none());
}

#[test]
fn history_is_bounded() {
    let mut analyzer = seeded(no_praise());
    for i in 0..50 {
        analyzer.update(0.5, 0.5, f64::from(i) * 100.0);
    }
    assert_eq!(analyzer.history_len(), 30);
}

#[test]
fn stationary_point_reports_not_moving() {
    let mut analyzer = seeded(no_praise());
    for i in 0..10 {
        analyzer.update(0.5, 0.5, f64::from(i) * 100.0);
    }

    let snapshot = analyzer.analyze();
    assert!(!snapshot.is_moving);
    assert_eq!(snapshot.feedback.unwrap(), messages::MOTION_NO_MOVEMENT);
}

#[test]
fn steady_moderate_movement_is_normal_and_smooth() {
    let mut analyzer = seeded(no_praise());
    // 0.01 units per 100ms = 0.1 units/s
    for i in 0..10 {
        analyzer.update(0.01f64.mul_add(f64::from(i), 0.2), 0.5, f64::from(i) * 100.0);
    }

    let snapshot = analyzer.analyze();
    assert!(snapshot.is_moving);
    assert_eq!(snapshot.speed, MotionSpeed::Normal);
    assert_eq!(snapshot.smoothness, MotionSmoothness::Smooth);
    assert!(snapshot.feedback.is_none());
}

#[test]
fn rapid_movement_reads_too_fast() {
    let mut analyzer = seeded(no_praise());
    // 0.05 units per 100ms = 0.5 units/s
    for i in 0..10 {
        analyzer.update(0.05 * f64::from(i), 0.5, f64::from(i) * 100.0);
    }

    let snapshot = analyzer.analyze();
    assert_eq!(snapshot.speed, MotionSpeed::TooFast);
    assert_eq!(snapshot.feedback.unwrap(), messages::MOTION_TOO_FAST);
}

#[test]
fn crawling_movement_reads_too_slow() {
    let mut analyzer = seeded(no_praise());
    // 0.0015 units per 100ms = 0.015 units/s: moving, but under the slow bar
    for i in 0..10 {
        analyzer.update(0.0015f64.mul_add(f64::from(i), 0.2), 0.5, f64::from(i) * 100.0);
    }

    let snapshot = analyzer.analyze();
    assert!(snapshot.is_moving);
    assert_eq!(snapshot.speed, MotionSpeed::TooSlow);
    assert_eq!(snapshot.feedback.unwrap(), messages::MOTION_TOO_SLOW);
}

#[test]
fn alternating_lurches_read_jerky() {
    let mut analyzer = seeded(no_praise());
    // Steps alternate 0.05 and 0.0 per 100ms: velocities 0.5 and 0.0,
    // mean ~0.28 (not too fast), variance ~0.06 (over the jerky bar).
    let mut x = 0.1;
    for i in 0..10 {
        if i % 2 == 1 {
            x += 0.05;
        }
        analyzer.update(x, 0.5, f64::from(i) * 100.0);
    }

    let snapshot = analyzer.analyze();
    assert_eq!(snapshot.smoothness, MotionSmoothness::Jerky);
    assert_eq!(snapshot.speed, MotionSpeed::Normal);
    assert_eq!(snapshot.feedback.unwrap(), messages::MOTION_JERKY);
}

#[test]
fn feedback_is_rate_limited_to_one_per_interval() {
    let mut analyzer = seeded(no_praise());
    for i in 0..10 {
        analyzer.update(0.5, 0.5, f64::from(i) * 100.0);
    }

    let first = analyzer.analyze();
    assert!(first.feedback.is_some());

    // More stationary samples still within 3 seconds of the first message.
    for i in 10..20 {
        analyzer.update(0.5, 0.5, f64::from(i) * 100.0);
    }
    let second = analyzer.analyze();
    assert!(
        second.feedback.is_none(),
        "no second message within the rate-limit window"
    );

    // Past the window a new message is allowed.
    for i in 0..10 {
        analyzer.update(0.5, 0.5, 5000.0 + f64::from(i) * 100.0);
    }
    let third = analyzer.analyze();
    assert!(third.feedback.is_some());
}

#[test]
fn guaranteed_praise_fires_for_smooth_movement() {
    let config = MotionConfig {
        praise_probability: 1.0,
        ..MotionConfig::default()
    };
    let mut analyzer = seeded(config);
    for i in 0..10 {
        analyzer.update(0.01f64.mul_add(f64::from(i), 0.2), 0.5, f64::from(i) * 100.0);
    }

    let snapshot = analyzer.analyze();
    assert_eq!(snapshot.feedback.unwrap(), messages::MOTION_SMOOTH_PRAISE);
}

#[test]
fn fixed_seed_is_deterministic() {
    let run = || {
        let mut analyzer = seeded(MotionConfig::default());
        let mut feedback = Vec::new();
        for round in 0..5 {
            let base = f64::from(round) * 4000.0;
            for i in 0..10 {
                analyzer.update(
                    0.01f64.mul_add(f64::from(i), 0.2),
                    0.5,
                    base + f64::from(i) * 100.0,
                );
            }
            feedback.push(analyzer.analyze().feedback);
        }
        feedback
    };

    assert_eq!(run(), run(), "same seed must produce the same feedback");
}
