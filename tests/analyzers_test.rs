// ABOUTME: Integration tests for the per-exercise stage/rep analyzers
// ABOUTME: Covers hysteresis, rep rules, visibility gating, and form scoring

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kinema Motion Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use kinema_engine::analyzers::ExerciseAnalyzer;
use kinema_engine::landmarks::LANDMARK_COUNT;
use kinema_engine::messages;
use kinema_engine::{BodyJoint, ExerciseCatalog, ExerciseKind, FormQuality, Landmark, PoseFrame, Stage};

/// Full-body frame with every joint visible at a neutral position.
fn base_landmarks() -> Vec<Landmark> {
    vec![Landmark::with_visibility(0.5, 0.5, 0.9); LANDMARK_COUNT]
}

fn set(landmarks: &mut [Landmark], joint: BodyJoint, x: f64, y: f64) {
    landmarks[joint.index()] = Landmark::with_visibility(x, y, 0.9);
}

/// Arm-raise frame where both arms sit at `theta` degrees of elevation
/// (angle at the shoulder between elbow and hip), shoulders level.
fn arm_frame(theta_deg: f64) -> PoseFrame {
    let theta = theta_deg.to_radians();
    let mut lm = base_landmarks();
    set(&mut lm, BodyJoint::LeftShoulder, 0.6, 0.4);
    set(&mut lm, BodyJoint::RightShoulder, 0.4, 0.4);
    set(&mut lm, BodyJoint::LeftHip, 0.6, 0.7);
    set(&mut lm, BodyJoint::RightHip, 0.4, 0.7);
    set(
        &mut lm,
        BodyJoint::LeftElbow,
        0.15f64.mul_add(theta.sin(), 0.6),
        0.15f64.mul_add(theta.cos(), 0.4),
    );
    set(
        &mut lm,
        BodyJoint::RightElbow,
        0.15f64.mul_add(-theta.sin(), 0.4),
        0.15f64.mul_add(theta.cos(), 0.4),
    );
    PoseFrame::new(lm)
}

/// Arm-raise frame with independent left/right elevation angles.
fn asymmetric_arm_frame(left_deg: f64, right_deg: f64, right_shoulder_y: f64) -> PoseFrame {
    let (lt, rt) = (left_deg.to_radians(), right_deg.to_radians());
    let mut lm = base_landmarks();
    set(&mut lm, BodyJoint::LeftShoulder, 0.6, 0.4);
    set(&mut lm, BodyJoint::RightShoulder, 0.4, right_shoulder_y);
    set(&mut lm, BodyJoint::LeftHip, 0.6, 0.7);
    set(&mut lm, BodyJoint::RightHip, 0.4, right_shoulder_y + 0.3);
    set(
        &mut lm,
        BodyJoint::LeftElbow,
        0.15f64.mul_add(lt.sin(), 0.6),
        0.15f64.mul_add(lt.cos(), 0.4),
    );
    set(
        &mut lm,
        BodyJoint::RightElbow,
        0.15f64.mul_add(-rt.sin(), 0.4),
        0.15f64.mul_add(rt.cos(), right_shoulder_y),
    );
    PoseFrame::new(lm)
}

/// Torso-twist frame with the shoulder midpoint offset from the hip
/// midpoint by `offset`, both pairs level.
fn twist_frame(offset: f64) -> PoseFrame {
    let mut lm = base_landmarks();
    set(&mut lm, BodyJoint::LeftShoulder, 0.55 + offset, 0.4);
    set(&mut lm, BodyJoint::RightShoulder, 0.45 + offset, 0.4);
    set(&mut lm, BodyJoint::LeftHip, 0.55, 0.7);
    set(&mut lm, BodyJoint::RightHip, 0.45, 0.7);
    PoseFrame::new(lm)
}

/// Knee-raise frame with per-leg hip flexion angles (degrees).
fn knee_frame(left_deg: f64, right_deg: f64) -> PoseFrame {
    let (lt, rt) = (left_deg.to_radians(), right_deg.to_radians());
    let mut lm = base_landmarks();
    set(&mut lm, BodyJoint::LeftShoulder, 0.6, 0.3);
    set(&mut lm, BodyJoint::RightShoulder, 0.4, 0.3);
    set(&mut lm, BodyJoint::LeftHip, 0.6, 0.6);
    set(&mut lm, BodyJoint::RightHip, 0.4, 0.6);
    set(
        &mut lm,
        BodyJoint::LeftKnee,
        0.3f64.mul_add(lt.sin(), 0.6),
        0.3f64.mul_add(-lt.cos(), 0.6),
    );
    set(
        &mut lm,
        BodyJoint::RightKnee,
        0.3f64.mul_add(-rt.sin(), 0.4),
        0.3f64.mul_add(-rt.cos(), 0.6),
    );
    PoseFrame::new(lm)
}

fn analyzer(kind: ExerciseKind) -> ExerciseAnalyzer {
    let catalog = ExerciseCatalog::default();
    ExerciseAnalyzer::for_definition(catalog.definition(kind).unwrap())
}

// === Arm raise ===

#[test]
fn arm_raise_round_trip_counts_one_rep() {
    let mut a = analyzer(ExerciseKind::ArmRaise);
    let sequence = [10.0, 10.0, 160.0, 160.0, 10.0, 10.0];

    let mut completions = 0;
    let mut final_reps = 0;
    for theta in sequence {
        let result = a.analyze(&arm_frame(theta));
        if result.rep_completed {
            completions += 1;
        }
        final_reps = result.reps;
    }

    assert_eq!(completions, 1, "rep_completed should fire exactly once");
    assert_eq!(final_reps, 1);
    assert_eq!(a.state().stage, Stage::Down);
}

#[test]
fn arm_raise_hysteresis_band_never_counts() {
    let mut a = analyzer(ExerciseKind::ArmRaise);
    for i in 0..40 {
        let theta = if i % 2 == 0 { 151.0 } else { 149.0 };
        let result = a.analyze(&arm_frame(theta));
        assert_eq!(result.reps, 0, "oscillation near up threshold must not count");
    }
}

#[test]
fn arm_raise_down_without_up_never_counts() {
    let mut a = analyzer(ExerciseKind::ArmRaise);
    for _ in 0..10 {
        let result = a.analyze(&arm_frame(10.0));
        assert_eq!(result.reps, 0);
    }
}

#[test]
fn reps_are_monotonically_non_decreasing() {
    let mut a = analyzer(ExerciseKind::ArmRaise);
    let thetas = [
        10.0, 100.0, 160.0, 140.0, 30.0, 160.0, 151.0, 149.0, 10.0, 45.0, 170.0, 20.0,
    ];
    let mut last_reps = 0;
    for theta in thetas {
        let result = a.analyze(&arm_frame(theta));
        assert!(result.reps >= last_reps, "reps must never decrease");
        last_reps = result.reps;
    }
}

#[test]
fn visibility_gate_short_circuits() {
    let mut a = analyzer(ExerciseKind::ArmRaise);
    a.analyze(&arm_frame(160.0));
    let before = a.state().clone();

    let mut lm = base_landmarks();
    lm[BodyJoint::LeftShoulder.index()] = Landmark::with_visibility(0.6, 0.4, 0.1);
    let result = a.analyze(&PoseFrame::new(lm));

    assert!(!result.is_visible);
    assert!(!result.rep_completed);
    assert_eq!(result.stage, before.stage);
    assert_eq!(result.reps, before.reps);
    assert_eq!(result.form.score, 0);
    assert_eq!(result.form.suggestions, vec![messages::SHOW_FULL_BODY.to_owned()]);
    assert!(result.angles.is_empty());
}

#[test]
fn arm_raise_reports_angles() {
    let mut a = analyzer(ExerciseKind::ArmRaise);
    let result = a.analyze(&arm_frame(90.0));
    assert!((result.angles["left_arm"] - 90.0).abs() < 1.0);
    assert!((result.angles["right_arm"] - 90.0).abs() < 1.0);
    assert!((result.angles["average"] - 90.0).abs() < 1.0);
}

// === Torso twist ===

#[test]
fn torso_twist_staying_at_center_counts_nothing() {
    let mut a = analyzer(ExerciseKind::TorsoTwist);
    for _ in 0..20 {
        let result = a.analyze(&twist_frame(0.0));
        assert_eq!(result.stage, Stage::Center);
        assert_eq!(result.reps, 0);
    }
}

#[test]
fn torso_twist_counts_on_return_to_center() {
    let mut a = analyzer(ExerciseKind::TorsoTwist);
    a.analyze(&twist_frame(0.0));
    a.analyze(&twist_frame(0.2));
    let back = a.analyze(&twist_frame(0.0));
    assert!(back.rep_completed);
    assert_eq!(back.reps, 1);

    // Staying at center afterwards adds nothing.
    let again = a.analyze(&twist_frame(0.0));
    assert!(!again.rep_completed);
    assert_eq!(again.reps, 1);
}

#[test]
fn torso_twist_counts_both_directions() {
    let mut a = analyzer(ExerciseKind::TorsoTwist);
    a.analyze(&twist_frame(0.2));
    a.analyze(&twist_frame(0.0));
    a.analyze(&twist_frame(-0.2));
    let result = a.analyze(&twist_frame(0.0));
    assert_eq!(result.reps, 2);
}

#[test]
fn torso_twist_initial_stage_is_center() {
    let a = analyzer(ExerciseKind::TorsoTwist);
    assert_eq!(a.state().stage, Stage::Center);
}

#[test]
fn torso_twist_stage_classification() {
    let mut a = analyzer(ExerciseKind::TorsoTwist);
    assert_eq!(a.analyze(&twist_frame(0.2)).stage, Stage::Left);
    assert_eq!(a.analyze(&twist_frame(-0.2)).stage, Stage::Right);
    assert_eq!(a.analyze(&twist_frame(0.05)).stage, Stage::Center);
}

// === Knee raise ===

#[test]
fn knee_raise_single_leg_counts() {
    let mut a = analyzer(ExerciseKind::KneeRaise);
    a.analyze(&knee_frame(170.0, 170.0));
    let up = a.analyze(&knee_frame(60.0, 170.0));
    assert_eq!(up.stage, Stage::Up);
    let down = a.analyze(&knee_frame(170.0, 170.0));
    assert!(down.rep_completed);
    assert_eq!(down.reps, 1);
    assert_eq!(down.stage, Stage::Down);
}

#[test]
fn knee_raise_legs_accumulate_independently() {
    let mut a = analyzer(ExerciseKind::KneeRaise);
    a.analyze(&knee_frame(170.0, 170.0));
    // Left leg cycle
    a.analyze(&knee_frame(60.0, 170.0));
    a.analyze(&knee_frame(170.0, 170.0));
    // Right leg cycle
    a.analyze(&knee_frame(170.0, 60.0));
    let result = a.analyze(&knee_frame(170.0, 170.0));
    assert_eq!(result.reps, 2);
}

#[test]
fn knee_raise_simultaneous_legs_count_two() {
    let mut a = analyzer(ExerciseKind::KneeRaise);
    a.analyze(&knee_frame(170.0, 170.0));
    a.analyze(&knee_frame(60.0, 60.0));
    let result = a.analyze(&knee_frame(170.0, 170.0));
    assert!(result.rep_completed);
    assert_eq!(result.reps, 2);
}

#[test]
fn knee_raise_hysteresis_band_keeps_leg_stage() {
    let mut a = analyzer(ExerciseKind::KneeRaise);
    a.analyze(&knee_frame(60.0, 170.0));
    // 120 degrees is inside the band; the left leg stays up.
    let mid = a.analyze(&knee_frame(120.0, 170.0));
    assert_eq!(mid.stage, Stage::Up);
    assert_eq!(mid.reps, 0);
}

// === Form evaluation ===

#[test]
fn form_scores_stay_within_bounds() {
    let mut a = analyzer(ExerciseKind::ArmRaise);
    let frames = [
        arm_frame(10.0),
        asymmetric_arm_frame(160.0, 20.0, 0.4),
        asymmetric_arm_frame(170.0, 10.0, 0.48),
        arm_frame(160.0),
    ];
    for frame in &frames {
        let result = a.analyze(frame);
        assert!(result.form.score <= 100);
    }
}

#[test]
fn asymmetry_and_tilt_penalties_band_as_warn() {
    let mut a = analyzer(ExerciseKind::ArmRaise);
    let result = a.analyze(&asymmetric_arm_frame(160.0, 20.0, 0.48));
    // -20 asymmetry, -15 shoulder tilt
    assert_eq!(result.form.score, 65);
    assert_eq!(result.form.quality, FormQuality::Warn);
    assert_eq!(result.form.issues.len(), 2);
    assert_eq!(result.form.suggestions.len(), 2);
    assert_eq!(a.state().consecutive_warnings, 1);
    assert_eq!(a.state().consecutive_bad_form, 0);
}

#[test]
fn good_form_resets_counters() {
    let mut a = analyzer(ExerciseKind::ArmRaise);
    a.analyze(&asymmetric_arm_frame(160.0, 20.0, 0.48));
    assert_eq!(a.state().consecutive_warnings, 1);
    a.analyze(&arm_frame(90.0));
    assert_eq!(a.state().consecutive_warnings, 0);
    assert_eq!(a.state().last_quality, FormQuality::Good);
}

#[test]
fn evaluate_form_does_not_advance_stage() {
    let mut a = analyzer(ExerciseKind::ArmRaise);
    let feedback = a.evaluate_form(&arm_frame(160.0));
    assert_eq!(feedback.quality, FormQuality::Good);
    assert_eq!(a.state().stage, Stage::Down);
    assert_eq!(a.state().reps, 0);
}

#[test]
fn knee_raise_penalizes_low_knee_while_up() {
    let mut a = analyzer(ExerciseKind::KneeRaise);
    a.analyze(&knee_frame(60.0, 170.0));
    // Left leg sags into the band: still up, but not lifted high enough.
    let result = a.analyze(&knee_frame(130.0, 170.0));
    assert_eq!(result.stage, Stage::Up);
    assert!(result
        .form
        .issues
        .iter()
        .any(|issue| issue == messages::ISSUE_LOW_KNEE));
}

// === Reset ===

#[test]
fn reset_restores_initial_state() {
    let mut a = analyzer(ExerciseKind::ArmRaise);
    a.analyze(&arm_frame(160.0));
    a.analyze(&arm_frame(10.0));
    assert_eq!(a.state().reps, 1);

    a.reset();
    assert_eq!(a.state().reps, 0);
    assert_eq!(a.state().stage, Stage::Down);

    // The armed flag must also be cleared: a lone down frame counts nothing.
    let result = a.analyze(&arm_frame(10.0));
    assert_eq!(result.reps, 0);
}

#[test]
fn torso_twist_reset_returns_to_center() {
    let mut a = analyzer(ExerciseKind::TorsoTwist);
    a.analyze(&twist_frame(0.2));
    a.reset();
    assert_eq!(a.state().stage, Stage::Center);
    // The visited direction is cleared; returning to center counts nothing.
    let result = a.analyze(&twist_frame(0.0));
    assert_eq!(result.reps, 0);
}
