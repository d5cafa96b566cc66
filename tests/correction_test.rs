// ABOUTME: Integration tests for the correction calculator
// ABOUTME: Covers target lookup, visibility gating, deadband, and directional hints

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kinema Motion Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use kinema_engine::correction::{corrections, Direction};
use kinema_engine::landmarks::LANDMARK_COUNT;
use kinema_engine::{BodyJoint, ExerciseCatalog, ExerciseKind, Landmark, PoseFrame, Stage};

fn frame_with(joints: &[(BodyJoint, f64, f64, f64)]) -> PoseFrame {
    let mut lm = vec![Landmark::with_visibility(0.5, 0.5, 0.9); LANDMARK_COUNT];
    for &(joint, x, y, visibility) in joints {
        lm[joint.index()] = Landmark::with_visibility(x, y, visibility);
    }
    PoseFrame::new(lm)
}

#[test]
fn undeclared_stage_yields_empty_list() {
    let catalog = ExerciseCatalog::default();
    let definition = catalog.definition(ExerciseKind::TorsoTwist).unwrap();
    let frame = frame_with(&[]);

    // The torso twist declares targets for center only.
    assert!(corrections(&frame, definition, Stage::Left).is_empty());
}

#[test]
fn declared_stage_yields_one_entry_per_visible_joint() {
    let catalog = ExerciseCatalog::default();
    let definition = catalog.definition(ExerciseKind::ArmRaise).unwrap();
    let frame = frame_with(&[]);

    let result = corrections(&frame, definition, Stage::Up);
    assert_eq!(result.len(), 4, "arm raise declares four up targets");
}

#[test]
fn low_visibility_joints_are_skipped() {
    let catalog = ExerciseCatalog::default();
    let definition = catalog.definition(ExerciseKind::ArmRaise).unwrap();
    let frame = frame_with(&[(BodyJoint::LeftWrist, 0.5, 0.5, 0.4)]);

    let result = corrections(&frame, definition, Stage::Up);
    assert_eq!(result.len(), 3);
    assert!(result.iter().all(|c| c.joint != BodyJoint::LeftWrist));
}

#[test]
fn directional_hints_point_toward_target() {
    let catalog = ExerciseCatalog::default();
    let definition = catalog.definition(ExerciseKind::ArmRaise).unwrap();
    // Left wrist target for up is (0.72, 0.22); current is down-left of it.
    let frame = frame_with(&[(BodyJoint::LeftWrist, 0.5, 0.6, 0.9)]);

    let result = corrections(&frame, definition, Stage::Up);
    let wrist = result
        .iter()
        .find(|c| c.joint == BodyJoint::LeftWrist)
        .unwrap();

    assert!(wrist.directions.contains(&Direction::Right));
    assert!(wrist.directions.contains(&Direction::Up));
    assert!(wrist.distance > 0.4);
    assert_eq!(wrist.joint_name, "left_wrist");
}

#[test]
fn deadband_suppresses_hints_near_target() {
    let catalog = ExerciseCatalog::default();
    let definition = catalog.definition(ExerciseKind::ArmRaise).unwrap();
    // Within 0.03 of the (0.72, 0.22) target on both axes.
    let frame = frame_with(&[(BodyJoint::LeftWrist, 0.71, 0.23, 0.9)]);

    let result = corrections(&frame, definition, Stage::Up);
    let wrist = result
        .iter()
        .find(|c| c.joint == BodyJoint::LeftWrist)
        .unwrap();

    assert!(wrist.directions.is_empty());
    assert!(wrist.distance < 0.03);
}

#[test]
fn distance_is_euclidean_to_target() {
    let catalog = ExerciseCatalog::default();
    let definition = catalog.definition(ExerciseKind::KneeRaise).unwrap();
    // Left knee target for up is (0.55, 0.52).
    let frame = frame_with(&[(BodyJoint::LeftKnee, 0.55, 0.82, 0.9)]);

    let result = corrections(&frame, definition, Stage::Up);
    let knee = result
        .iter()
        .find(|c| c.joint == BodyJoint::LeftKnee)
        .unwrap();

    assert!((knee.distance - 0.3).abs() < 1e-9);
    assert_eq!(knee.directions, vec![Direction::Up]);
}
