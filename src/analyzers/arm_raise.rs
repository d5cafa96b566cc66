// ABOUTME: Arm-raise stage machine with an armed up-to-down rep rule
// ABOUTME: Averages both arms' shoulder elevation angles with hysteresis thresholds

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kinema Motion Intelligence

use std::collections::HashMap;

use tracing::{debug, info};

use super::{AnalysisResult, AnalyzerState, FormFeedback, FormScore, Stage};
use crate::catalog::{ExerciseDefinition, ExerciseThresholds};
use crate::geometry;
use crate::landmarks::{BodyJoint, Landmark, PoseFrame};
use crate::messages;

/// Arm-raise analyzer.
///
/// Elevation is the angle at the shoulder between the elbow and the hip
/// (the hip ray gives the angle its directionality). Both arms are
/// averaged; the band between the up and down thresholds changes nothing,
/// so single-sample flicker near the midpoint never flips the stage.
///
/// A rep counts only on a clean up-to-down traversal: the `armed` flag is
/// set on the transition into `Up` and a rep requires it plus `Up` as the
/// immediately preceding stage.
#[derive(Debug)]
pub struct ArmRaiseAnalyzer {
    state: AnalyzerState,
    thresholds: ExerciseThresholds,
    required_joints: Vec<BodyJoint>,
    armed: bool,
}

/// Landmarks the arm-raise geometry reads each frame.
struct ArmLandmarks<'a> {
    left_shoulder: &'a Landmark,
    right_shoulder: &'a Landmark,
    left_elbow: &'a Landmark,
    right_elbow: &'a Landmark,
    left_hip: &'a Landmark,
    right_hip: &'a Landmark,
}

impl ArmRaiseAnalyzer {
    /// Build from a catalog definition, copying the thresholds it needs.
    #[must_use]
    pub fn new(definition: &ExerciseDefinition) -> Self {
        Self {
            state: AnalyzerState::new(Stage::Down),
            thresholds: definition.thresholds.clone(),
            required_joints: definition.required_joints.clone(),
            armed: false,
        }
    }

    /// Analyze one frame.
    pub fn analyze(&mut self, frame: &PoseFrame) -> AnalysisResult {
        let Some(lm) = self.gated_landmarks(frame) else {
            return AnalysisResult::not_visible(&self.state);
        };

        let left = geometry::angle(lm.left_elbow, lm.left_shoulder, lm.left_hip);
        let right = geometry::angle(lm.right_elbow, lm.right_shoulder, lm.right_hip);
        let average = f64::midpoint(left, right);

        let mut rep_completed = false;
        if average >= self.thresholds.up_angle {
            if self.state.stage != Stage::Up {
                self.state.transition(Stage::Up);
                self.armed = true;
                debug!(stage = %self.state.stage, average, "arm raise reached up");
            }
        } else if average <= self.thresholds.down_angle {
            if self.armed && self.state.stage == Stage::Up {
                self.state.reps += 1;
                self.armed = false;
                rep_completed = true;
                info!(reps = self.state.reps, "arm raise rep completed");
            }
            if self.state.stage != Stage::Down {
                self.state.transition(Stage::Down);
            }
        }
        // Values inside the hysteresis band leave the stage unchanged.

        let form = self.form_from_geometry(left, right, &lm);
        let angles = HashMap::from([
            ("left_arm".to_owned(), left),
            ("right_arm".to_owned(), right),
            ("average".to_owned(), average),
        ]);

        AnalysisResult {
            stage: self.state.stage,
            reps: self.state.reps,
            rep_completed,
            form,
            angles,
            is_visible: true,
        }
    }

    /// Evaluate form without advancing the stage machine.
    pub fn evaluate_form(&mut self, frame: &PoseFrame) -> FormFeedback {
        self.gated_landmarks(frame).map_or_else(
            FormFeedback::not_visible,
            |lm| {
                let left = geometry::angle(lm.left_elbow, lm.left_shoulder, lm.left_hip);
                let right = geometry::angle(lm.right_elbow, lm.right_shoulder, lm.right_hip);
                self.form_from_geometry(left, right, &lm)
            },
        )
    }

    /// Restore initial state.
    pub fn reset(&mut self) {
        self.state = AnalyzerState::new(Stage::Down);
        self.armed = false;
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &AnalyzerState {
        &self.state
    }

    fn gated_landmarks<'a>(&self, frame: &'a PoseFrame) -> Option<ArmLandmarks<'a>> {
        if !frame.all_visible(&self.required_joints) {
            return None;
        }
        Some(ArmLandmarks {
            left_shoulder: frame.get(BodyJoint::LeftShoulder)?,
            right_shoulder: frame.get(BodyJoint::RightShoulder)?,
            left_elbow: frame.get(BodyJoint::LeftElbow)?,
            right_elbow: frame.get(BodyJoint::RightElbow)?,
            left_hip: frame.get(BodyJoint::LeftHip)?,
            right_hip: frame.get(BodyJoint::RightHip)?,
        })
    }

    fn form_from_geometry(&mut self, left: f64, right: f64, lm: &ArmLandmarks<'_>) -> FormFeedback {
        let mut score = FormScore::new();

        if (left - right).abs() > self.thresholds.symmetry_diff {
            score.penalize(20, messages::ISSUE_ASYMMETRY, messages::SUGGEST_ASYMMETRY);
        }
        if (lm.left_shoulder.y - lm.right_shoulder.y).abs() > self.thresholds.shoulder_tilt {
            score.penalize(
                15,
                messages::ISSUE_SHOULDER_TILT,
                messages::SUGGEST_SHOULDER_TILT,
            );
        }

        let (score, issues, suggestions) = score.finish();
        let quality = self.state.record_quality(score);
        FormFeedback {
            quality,
            score,
            issues,
            suggestions,
        }
    }
}
