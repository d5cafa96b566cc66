// ABOUTME: Correction calculator comparing current landmarks against declared target poses
// ABOUTME: Emits per-joint distance and coarse directional hints for corrective UI overlays

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kinema Motion Intelligence

//! # Correction Calculator
//!
//! Compares the current frame against the catalog's declared target pose
//! for a stage and produces per-joint correction data.
//!
//! Triggered independently of the stage pipeline (e.g. by a UI toggle),
//! keyed by the analyzer's current or target stage.

use serde::Serialize;

use crate::analyzers::Stage;
use crate::catalog::ExerciseDefinition;
use crate::landmarks::{BodyJoint, PoseFrame};

/// Visibility a joint needs before correction guidance is offered for it.
/// Stricter than the stage-analysis gate; a vague landmark position makes
/// a misleading arrow.
const CORRECTION_VISIBILITY: f64 = 0.5;

/// Per-axis delta below which no directional hint is emitted.
const DIRECTION_DEADBAND: f64 = 0.03;

/// Coarse directional hint toward a target position, in image coordinates
/// (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Move toward smaller x
    Left,
    /// Move toward larger x
    Right,
    /// Move toward smaller y
    Up,
    /// Move toward larger y
    Down,
}

/// Correction data for one declared target joint. Output-only; hosts
/// serialize it for UI overlays but never feed it back.
#[derive(Debug, Clone, Serialize)]
pub struct JointCorrection {
    /// Joint the correction applies to
    pub joint: BodyJoint,
    /// Stable `snake_case` joint name for UI labels
    pub joint_name: &'static str,
    /// Current position (x, y), normalized
    pub current: (f64, f64),
    /// Declared target position (x, y), normalized
    pub target: (f64, f64),
    /// Euclidean distance from current to target
    pub distance: f64,
    /// Directional hints, at most one per axis
    pub directions: Vec<Direction>,
}

/// Compute corrections for a frame against the definition's declared
/// target pose for `stage`.
///
/// Joints that are missing or below the correction visibility gate are
/// skipped; a stage with no declared targets yields an empty list.
#[must_use]
pub fn corrections(
    frame: &PoseFrame,
    definition: &ExerciseDefinition,
    stage: Stage,
) -> Vec<JointCorrection> {
    let Some(targets) = definition.target_poses.get(&stage) else {
        return Vec::new();
    };

    targets
        .iter()
        .filter_map(|target| {
            if !frame.is_visible_above(target.joint, CORRECTION_VISIBILITY) {
                return None;
            }
            let current = frame.get(target.joint)?;

            let dx = target.x - current.x;
            let dy = target.y - current.y;
            let mut directions = Vec::new();
            if dx < -DIRECTION_DEADBAND {
                directions.push(Direction::Left);
            } else if dx > DIRECTION_DEADBAND {
                directions.push(Direction::Right);
            }
            if dy < -DIRECTION_DEADBAND {
                directions.push(Direction::Up);
            } else if dy > DIRECTION_DEADBAND {
                directions.push(Direction::Down);
            }

            Some(JointCorrection {
                joint: target.joint,
                joint_name: target.joint.name(),
                current: (current.x, current.y),
                target: (target.x, target.y),
                distance: dx.hypot(dy),
                directions,
            })
        })
        .collect()
}
