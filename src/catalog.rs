// ABOUTME: Static exercise catalog with stage vocabularies, thresholds, and target poses
// ABOUTME: Immutable configuration resource built once at startup and shared by reference

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kinema Motion Intelligence

//! # Exercise Catalog
//!
//! One [`ExerciseDefinition`] per supported exercise: camera orientation,
//! the exercise's stage vocabulary, hysteresis thresholds, the joints the
//! visibility gate requires, and declared target poses for corrective
//! guidance.
//!
//! The catalog is read-only after construction; analyzers copy the
//! thresholds they need at construction time.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analyzers::Stage;
use crate::errors::{EngineError, EngineResult};
use crate::landmarks::BodyJoint;

/// Supported exercise types. Closed set; adding an exercise means adding a
/// variant plus an analyzer implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    /// Bilateral lateral arm raise, front camera
    ArmRaise,
    /// Standing torso rotation, front camera
    TorsoTwist,
    /// Alternating high-knee raise, front camera
    KneeRaise,
}

impl ExerciseKind {
    /// Stable string key used by external callers.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ArmRaise => "arm_raise",
            Self::TorsoTwist => "torso_twist",
            Self::KneeRaise => "knee_raise",
        }
    }
}

impl FromStr for ExerciseKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arm_raise" => Ok(Self::ArmRaise),
            "torso_twist" => Ok(Self::TorsoTwist),
            "knee_raise" => Ok(Self::KneeRaise),
            other => Err(EngineError::UnknownExercise(other.to_owned())),
        }
    }
}

/// Which way the user must face the camera for the exercise's geometry to
/// be observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraOrientation {
    /// User faces the camera
    Front,
    /// User stands side-on to the camera
    Side,
}

/// Named numeric thresholds consumed by the stage machines and form
/// evaluators. Units: degrees for angles, normalized coordinates for
/// offsets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseThresholds {
    /// Angle at/above (arm raise) or below (knee raise) which the movement
    /// reads as up (degrees)
    pub up_angle: f64,
    /// Angle at/below (arm raise) or above (knee raise) which the movement
    /// reads as down (degrees)
    pub down_angle: f64,
    /// Left/right angle difference beyond which form reads as asymmetric
    /// (degrees)
    pub symmetry_diff: f64,
    /// Shoulder-to-hip horizontal offset classifying a twist direction
    pub offset_threshold: f64,
    /// Shoulder height difference beyond which shoulders read as tilted
    pub shoulder_tilt: f64,
    /// Hip height difference beyond which hips read as tilted
    pub hip_tilt: f64,
    /// Knee-raise hip flexion angle above which a lifted knee reads as too
    /// low while in the up stage (degrees)
    pub min_lift_angle: f64,
}

/// A declared ideal joint position for one stage of an exercise.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TargetKeypoint {
    /// Joint the target applies to
    pub joint: BodyJoint,
    /// Ideal horizontal position, normalized
    pub x: f64,
    /// Ideal vertical position, normalized
    pub y: f64,
}

/// Static configuration for one exercise. Created at process start, never
/// mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    /// Exercise this definition describes
    pub kind: ExerciseKind,
    /// Human-readable name
    pub display_name: String,
    /// Camera orientation the exercise requires
    pub orientation: CameraOrientation,
    /// Ordered stage vocabulary; the analyzer's stage is always one of these
    pub stages: Vec<Stage>,
    /// Numeric thresholds for stage detection and form evaluation
    pub thresholds: ExerciseThresholds,
    /// Joints the visibility gate checks before any geometry runs
    pub required_joints: Vec<BodyJoint>,
    /// Joint the motion-quality analyzer tracks for this exercise
    pub tracked_joint: BodyJoint,
    /// Declared target poses per stage, for corrective guidance
    pub target_poses: HashMap<Stage, Vec<TargetKeypoint>>,
}

/// The read-only exercise catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseCatalog {
    definitions: HashMap<ExerciseKind, ExerciseDefinition>,
}

impl Default for ExerciseCatalog {
    fn default() -> Self {
        let mut definitions = HashMap::new();
        definitions.insert(ExerciseKind::ArmRaise, arm_raise_definition());
        definitions.insert(ExerciseKind::TorsoTwist, torso_twist_definition());
        definitions.insert(ExerciseKind::KneeRaise, knee_raise_definition());
        Self { definitions }
    }
}

impl ExerciseCatalog {
    /// Load a catalog from a JSON document.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidConfig`] when parsing fails, or
    /// [`EngineError::InvalidDefinition`] when a parsed definition is
    /// internally inconsistent.
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        for definition in catalog.definitions.values() {
            validate_definition(definition)?;
        }
        Ok(catalog)
    }

    /// Definition for an exercise kind.
    ///
    /// # Errors
    /// Returns [`EngineError::UnknownExercise`] when the catalog carries no
    /// definition for the kind. With the default catalog this indicates a
    /// caller bug, which is why it hard-fails rather than degrading.
    pub fn definition(&self, kind: ExerciseKind) -> EngineResult<&ExerciseDefinition> {
        self.definitions
            .get(&kind)
            .ok_or_else(|| EngineError::UnknownExercise(kind.key().to_owned()))
    }

    /// Definition looked up by external string key.
    ///
    /// # Errors
    /// Returns [`EngineError::UnknownExercise`] for unrecognized keys.
    pub fn definition_for_key(&self, key: &str) -> EngineResult<&ExerciseDefinition> {
        self.definition(key.parse()?)
    }

    /// Exercise kinds the catalog knows.
    pub fn kinds(&self) -> impl Iterator<Item = ExerciseKind> + '_ {
        self.definitions.keys().copied()
    }
}

/// Reject definitions that would put a stage machine into an impossible
/// configuration. Hysteresis direction depends on the exercise: arm-raise
/// angles grow toward up, knee-raise flexion shrinks toward up.
fn validate_definition(definition: &ExerciseDefinition) -> EngineResult<()> {
    let fail = |reason: &str| {
        Err(EngineError::InvalidDefinition {
            exercise: definition.kind.key().to_owned(),
            reason: reason.to_owned(),
        })
    };

    if definition.stages.is_empty() {
        return fail("empty stage vocabulary");
    }
    if definition.required_joints.is_empty() {
        return fail("no required joints declared");
    }
    match definition.kind {
        ExerciseKind::ArmRaise => {
            if definition.thresholds.up_angle <= definition.thresholds.down_angle {
                return fail("up angle must exceed down angle");
            }
        }
        ExerciseKind::KneeRaise => {
            if definition.thresholds.up_angle >= definition.thresholds.down_angle {
                return fail("up angle must be below down angle");
            }
        }
        ExerciseKind::TorsoTwist => {
            if definition.thresholds.offset_threshold <= 0.0 {
                return fail("offset threshold must be positive");
            }
        }
    }
    Ok(())
}

fn arm_raise_definition() -> ExerciseDefinition {
    ExerciseDefinition {
        kind: ExerciseKind::ArmRaise,
        display_name: "Arm Raise".to_owned(),
        orientation: CameraOrientation::Front,
        stages: vec![Stage::Up, Stage::Down],
        thresholds: ExerciseThresholds {
            up_angle: 150.0,
            down_angle: 50.0,
            symmetry_diff: 15.0,
            offset_threshold: 0.0,
            shoulder_tilt: 0.05,
            hip_tilt: 0.05,
            min_lift_angle: 0.0,
        },
        required_joints: vec![
            BodyJoint::LeftShoulder,
            BodyJoint::RightShoulder,
            BodyJoint::LeftElbow,
            BodyJoint::RightElbow,
            BodyJoint::LeftHip,
            BodyJoint::RightHip,
        ],
        tracked_joint: BodyJoint::RightWrist,
        target_poses: HashMap::from([
            (
                Stage::Up,
                vec![
                    TargetKeypoint {
                        joint: BodyJoint::LeftWrist,
                        x: 0.72,
                        y: 0.22,
                    },
                    TargetKeypoint {
                        joint: BodyJoint::RightWrist,
                        x: 0.28,
                        y: 0.22,
                    },
                    TargetKeypoint {
                        joint: BodyJoint::LeftElbow,
                        x: 0.66,
                        y: 0.30,
                    },
                    TargetKeypoint {
                        joint: BodyJoint::RightElbow,
                        x: 0.34,
                        y: 0.30,
                    },
                ],
            ),
            (
                Stage::Down,
                vec![
                    TargetKeypoint {
                        joint: BodyJoint::LeftWrist,
                        x: 0.58,
                        y: 0.62,
                    },
                    TargetKeypoint {
                        joint: BodyJoint::RightWrist,
                        x: 0.42,
                        y: 0.62,
                    },
                ],
            ),
        ]),
    }
}

fn torso_twist_definition() -> ExerciseDefinition {
    ExerciseDefinition {
        kind: ExerciseKind::TorsoTwist,
        display_name: "Torso Twist".to_owned(),
        orientation: CameraOrientation::Front,
        stages: vec![Stage::Center, Stage::Left, Stage::Right],
        thresholds: ExerciseThresholds {
            up_angle: 0.0,
            down_angle: 0.0,
            symmetry_diff: 0.0,
            offset_threshold: 0.12,
            shoulder_tilt: 0.05,
            hip_tilt: 0.05,
            min_lift_angle: 0.0,
        },
        required_joints: vec![
            BodyJoint::LeftShoulder,
            BodyJoint::RightShoulder,
            BodyJoint::LeftHip,
            BodyJoint::RightHip,
        ],
        tracked_joint: BodyJoint::LeftShoulder,
        target_poses: HashMap::from([(
            Stage::Center,
            vec![
                TargetKeypoint {
                    joint: BodyJoint::LeftShoulder,
                    x: 0.58,
                    y: 0.32,
                },
                TargetKeypoint {
                    joint: BodyJoint::RightShoulder,
                    x: 0.42,
                    y: 0.32,
                },
            ],
        )]),
    }
}

fn knee_raise_definition() -> ExerciseDefinition {
    ExerciseDefinition {
        kind: ExerciseKind::KneeRaise,
        display_name: "Knee Raise".to_owned(),
        orientation: CameraOrientation::Front,
        stages: vec![Stage::Up, Stage::Down],
        thresholds: ExerciseThresholds {
            up_angle: 80.0,
            down_angle: 160.0,
            symmetry_diff: 0.0,
            offset_threshold: 0.0,
            shoulder_tilt: 0.05,
            hip_tilt: 0.05,
            min_lift_angle: 100.0,
        },
        required_joints: vec![
            BodyJoint::LeftShoulder,
            BodyJoint::RightShoulder,
            BodyJoint::LeftHip,
            BodyJoint::RightHip,
            BodyJoint::LeftKnee,
            BodyJoint::RightKnee,
        ],
        tracked_joint: BodyJoint::LeftKnee,
        target_poses: HashMap::from([(
            Stage::Up,
            vec![
                TargetKeypoint {
                    joint: BodyJoint::LeftKnee,
                    x: 0.55,
                    y: 0.52,
                },
                TargetKeypoint {
                    joint: BodyJoint::RightKnee,
                    x: 0.45,
                    y: 0.52,
                },
            ],
        )]),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn default_catalog_has_three_exercises() {
        let catalog = ExerciseCatalog::default();
        assert_eq!(catalog.kinds().count(), 3);
    }

    #[test]
    fn unknown_key_hard_fails() {
        let catalog = ExerciseCatalog::default();
        assert!(matches!(
            catalog.definition_for_key("handstand"),
            Err(EngineError::UnknownExercise(_))
        ));
    }

    #[test]
    fn catalog_round_trips_through_json() {
        let catalog = ExerciseCatalog::default();
        let json = serde_json::to_string(&catalog).unwrap();
        let reloaded = ExerciseCatalog::from_json_str(&json).unwrap();
        assert_eq!(reloaded.kinds().count(), 3);
    }

    #[test]
    fn inverted_hysteresis_fails_validation() {
        let mut catalog = ExerciseCatalog::default();
        let definition = catalog
            .definitions
            .get_mut(&ExerciseKind::ArmRaise)
            .unwrap();
        definition.thresholds.up_angle = 40.0;

        let json = serde_json::to_string(&catalog).unwrap();
        assert!(matches!(
            ExerciseCatalog::from_json_str(&json),
            Err(EngineError::InvalidDefinition { .. })
        ));
    }
}
