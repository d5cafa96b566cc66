// ABOUTME: Torso-twist stage machine counting returns to center after a visited direction
// ABOUTME: Classifies left/center/right from the shoulder-to-hip horizontal offset

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kinema Motion Intelligence

use std::collections::HashMap;

use tracing::{debug, info};

use super::{AnalysisResult, AnalyzerState, FormFeedback, FormScore, Stage};
use crate::catalog::{ExerciseDefinition, ExerciseThresholds};
use crate::geometry;
use crate::landmarks::{BodyJoint, Landmark, PoseFrame};
use crate::messages;

/// Shoulder tilt beyond this while twisted reads as leaning, not rotating.
const LEAN_THRESHOLD: f64 = 0.08;

/// Torso-twist analyzer.
///
/// The twist signal is the horizontal offset of the shoulder midpoint from
/// the hip midpoint. A rep counts on the transition into `Center`, and
/// only when a non-center direction was visited since the last count:
/// staying at center forever counts nothing.
#[derive(Debug)]
pub struct TorsoTwistAnalyzer {
    state: AnalyzerState,
    thresholds: ExerciseThresholds,
    required_joints: Vec<BodyJoint>,
    /// Last non-center direction entered since the previous counted rep
    visited_direction: Option<Stage>,
}

struct TwistLandmarks<'a> {
    left_shoulder: &'a Landmark,
    right_shoulder: &'a Landmark,
    left_hip: &'a Landmark,
    right_hip: &'a Landmark,
}

impl TorsoTwistAnalyzer {
    /// Build from a catalog definition, copying the thresholds it needs.
    #[must_use]
    pub fn new(definition: &ExerciseDefinition) -> Self {
        Self {
            state: AnalyzerState::new(Stage::Center),
            thresholds: definition.thresholds.clone(),
            required_joints: definition.required_joints.clone(),
            visited_direction: None,
        }
    }

    /// Analyze one frame.
    pub fn analyze(&mut self, frame: &PoseFrame) -> AnalysisResult {
        let Some(lm) = self.gated_landmarks(frame) else {
            return AnalysisResult::not_visible(&self.state);
        };

        let shoulder_mid = geometry::midpoint(lm.left_shoulder, lm.right_shoulder);
        let hip_mid = geometry::midpoint(lm.left_hip, lm.right_hip);
        let offset = shoulder_mid.x - hip_mid.x;

        let next = if offset > self.thresholds.offset_threshold {
            Stage::Left
        } else if offset < -self.thresholds.offset_threshold {
            Stage::Right
        } else {
            Stage::Center
        };

        let mut rep_completed = false;
        if next != self.state.stage {
            if next == Stage::Center {
                // A rep requires leaving center and coming back, not
                // hovering at the center threshold.
                if self.visited_direction.is_some() {
                    self.state.reps += 1;
                    self.visited_direction = None;
                    rep_completed = true;
                    info!(reps = self.state.reps, "torso twist rep completed");
                }
            } else {
                self.visited_direction = Some(next);
                debug!(direction = %next, offset, "torso twist direction entered");
            }
            self.state.transition(next);
        }

        let form = self.form_from_geometry(&lm);
        let angles = HashMap::from([("offset".to_owned(), offset)]);

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
        self.gated_landmarks(frame)
            .map_or_else(FormFeedback::not_visible, |lm| self.form_from_geometry(&lm))
    }

    /// Restore initial state. The torso twist starts at `Center`, not a
    /// generic resting stage.
    pub fn reset(&mut self) {
        self.state = AnalyzerState::new(Stage::Center);
        self.visited_direction = None;
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &AnalyzerState {
        &self.state
    }

    fn gated_landmarks<'a>(&self, frame: &'a PoseFrame) -> Option<TwistLandmarks<'a>> {
        if !frame.all_visible(&self.required_joints) {
            return None;
        }
        Some(TwistLandmarks {
            left_shoulder: frame.get(BodyJoint::LeftShoulder)?,
            right_shoulder: frame.get(BodyJoint::RightShoulder)?,
            left_hip: frame.get(BodyJoint::LeftHip)?,
            right_hip: frame.get(BodyJoint::RightHip)?,
        })
    }

    fn form_from_geometry(&mut self, lm: &TwistLandmarks<'_>) -> FormFeedback {
        let mut score = FormScore::new();
        let shoulder_tilt = (lm.left_shoulder.y - lm.right_shoulder.y).abs();

        if self.state.stage != Stage::Center && shoulder_tilt > LEAN_THRESHOLD {
            score.penalize(15, messages::ISSUE_TORSO_LEAN, messages::SUGGEST_TORSO_LEAN);
        } else if shoulder_tilt > self.thresholds.shoulder_tilt {
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
