// ABOUTME: Knee-raise stage machine with independent per-leg sub-stages
// ABOUTME: Each leg counts its own up-to-down transitions; displayed stage is the union

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kinema Motion Intelligence

use std::collections::HashMap;

use tracing::info;

use super::{AnalysisResult, AnalyzerState, FormFeedback, FormScore, Stage};
use crate::catalog::{ExerciseDefinition, ExerciseThresholds};
use crate::geometry;
use crate::landmarks::{BodyJoint, Landmark, PoseFrame};
use crate::messages;

/// Per-leg sub-stage for the knee raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LegStage {
    Up,
    Down,
}

/// Knee-raise analyzer.
///
/// Hip flexion (angle at the hip between shoulder and knee) is tracked
/// per leg; a small flexion angle means the knee is lifted. Each leg
/// carries its own up/down sub-stage and contributes reps independently,
/// so alternating legs accumulate from both. Both legs completing on one
/// frame counts two reps.
#[derive(Debug)]
pub struct KneeRaiseAnalyzer {
    state: AnalyzerState,
    thresholds: ExerciseThresholds,
    required_joints: Vec<BodyJoint>,
    left_leg: LegStage,
    right_leg: LegStage,
}

struct KneeLandmarks<'a> {
    left_shoulder: &'a Landmark,
    right_shoulder: &'a Landmark,
    left_hip: &'a Landmark,
    right_hip: &'a Landmark,
    left_knee: &'a Landmark,
    right_knee: &'a Landmark,
}

impl KneeRaiseAnalyzer {
    /// Build from a catalog definition, copying the thresholds it needs.
    #[must_use]
    pub fn new(definition: &ExerciseDefinition) -> Self {
        Self {
            state: AnalyzerState::new(Stage::Down),
            thresholds: definition.thresholds.clone(),
            required_joints: definition.required_joints.clone(),
            left_leg: LegStage::Down,
            right_leg: LegStage::Down,
        }
    }

    /// Analyze one frame.
    pub fn analyze(&mut self, frame: &PoseFrame) -> AnalysisResult {
        let Some(lm) = self.gated_landmarks(frame) else {
            return AnalysisResult::not_visible(&self.state);
        };

        let left = geometry::angle(lm.left_shoulder, lm.left_hip, lm.left_knee);
        let right = geometry::angle(lm.right_shoulder, lm.right_hip, lm.right_knee);

        let mut completed = 0_u32;
        completed += Self::advance_leg(&mut self.left_leg, left, &self.thresholds);
        completed += Self::advance_leg(&mut self.right_leg, right, &self.thresholds);
        if completed > 0 {
            self.state.reps += completed;
            info!(
                reps = self.state.reps,
                completed, "knee raise rep(s) completed"
            );
        }

        let display = if self.left_leg == LegStage::Up || self.right_leg == LegStage::Up {
            Stage::Up
        } else {
            Stage::Down
        };
        if display != self.state.stage {
            self.state.transition(display);
        }

        let form = self.form_from_geometry(left, right, &lm);
        let angles = HashMap::from([
            ("left_hip_flexion".to_owned(), left),
            ("right_hip_flexion".to_owned(), right),
        ]);

        AnalysisResult {
            stage: self.state.stage,
            reps: self.state.reps,
            rep_completed: completed > 0,
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
                let left = geometry::angle(lm.left_shoulder, lm.left_hip, lm.left_knee);
                let right = geometry::angle(lm.right_shoulder, lm.right_hip, lm.right_knee);
                self.form_from_geometry(left, right, &lm)
            },
        )
    }

    /// Restore initial state.
    pub fn reset(&mut self) {
        self.state = AnalyzerState::new(Stage::Down);
        self.left_leg = LegStage::Down;
        self.right_leg = LegStage::Down;
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &AnalyzerState {
        &self.state
    }

    fn gated_landmarks<'a>(&self, frame: &'a PoseFrame) -> Option<KneeLandmarks<'a>> {
        if !frame.all_visible(&self.required_joints) {
            return None;
        }
        Some(KneeLandmarks {
            left_shoulder: frame.get(BodyJoint::LeftShoulder)?,
            right_shoulder: frame.get(BodyJoint::RightShoulder)?,
            left_hip: frame.get(BodyJoint::LeftHip)?,
            right_hip: frame.get(BodyJoint::RightHip)?,
            left_knee: frame.get(BodyJoint::LeftKnee)?,
            right_knee: frame.get(BodyJoint::RightKnee)?,
        })
    }

    /// Advance one leg's sub-stage; returns 1 when the leg closed an
    /// up-to-down cycle. Angles inside the hysteresis band change nothing.
    fn advance_leg(leg: &mut LegStage, flexion: f64, thresholds: &ExerciseThresholds) -> u32 {
        if flexion < thresholds.up_angle {
            *leg = LegStage::Up;
            0
        } else if flexion > thresholds.down_angle {
            let completed = u32::from(*leg == LegStage::Up);
            *leg = LegStage::Down;
            completed
        } else {
            0
        }
    }

    fn form_from_geometry(&mut self, left: f64, right: f64, lm: &KneeLandmarks<'_>) -> FormFeedback {
        let mut score = FormScore::new();

        // The lifted knee is the leg with the smaller flexion angle.
        if self.state.stage == Stage::Up && left.min(right) > self.thresholds.min_lift_angle {
            score.penalize(20, messages::ISSUE_LOW_KNEE, messages::SUGGEST_LOW_KNEE);
        }
        if (lm.left_shoulder.y - lm.right_shoulder.y).abs() > self.thresholds.shoulder_tilt {
            score.penalize(
                15,
                messages::ISSUE_SHOULDER_TILT,
                messages::SUGGEST_SHOULDER_TILT,
            );
        }
        if (lm.left_hip.y - lm.right_hip.y).abs() > self.thresholds.hip_tilt {
            score.penalize(15, messages::ISSUE_HIP_TILT, messages::SUGGEST_HIP_TILT);
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
