// ABOUTME: Landmark frame types and the fixed 33-joint body index scheme
// ABOUTME: Implements the visibility gate used before any geometric computation

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kinema Motion Intelligence

//! # Pose Landmarks
//!
//! One [`Landmark`] per tracked body joint, coordinates normalized to
//! `[0, 1]` in camera space, produced once per frame by an external pose
//! estimator.
//!
//! A [`PoseFrame`] is the ordered 33-entry array using the standard
//! full-body joint index scheme ([`BodyJoint`]).

use serde::{Deserialize, Serialize};

/// Minimum landmark confidence for a joint to count as visible.
///
/// A landmark with no reported visibility is treated as visible; estimators
/// that omit the field are trusted to have pruned low-confidence points.
pub const VISIBILITY_THRESHOLD: f64 = 0.3;

/// Number of joints in the full-body pose schema.
pub const LANDMARK_COUNT: usize = 33;

/// A single tracked body-joint position with optional confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position, normalized to `[0, 1]` (0 = left edge of frame)
    pub x: f64,
    /// Vertical position, normalized to `[0, 1]` (0 = top edge of frame)
    pub y: f64,
    /// Estimator confidence in `[0, 1]`, if reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<f64>,
}

impl Landmark {
    /// Create a landmark without a visibility estimate.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            visibility: None,
        }
    }

    /// Create a landmark with a visibility estimate.
    #[must_use]
    pub const fn with_visibility(x: f64, y: f64, visibility: f64) -> Self {
        Self {
            x,
            y,
            visibility: Some(visibility),
        }
    }

    /// Whether this landmark clears the visibility gate.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visibility.is_none_or(|v| v > VISIBILITY_THRESHOLD)
    }
}

/// Joint indices of the standard 33-point full-body pose schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)] // Variant names are the documentation
pub enum BodyJoint {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl BodyJoint {
    /// Index of this joint in the landmark array.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase `snake_case` name used in correction output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEyeInner => "left_eye_inner",
            Self::LeftEye => "left_eye",
            Self::LeftEyeOuter => "left_eye_outer",
            Self::RightEyeInner => "right_eye_inner",
            Self::RightEye => "right_eye",
            Self::RightEyeOuter => "right_eye_outer",
            Self::LeftEar => "left_ear",
            Self::RightEar => "right_ear",
            Self::MouthLeft => "mouth_left",
            Self::MouthRight => "mouth_right",
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftPinky => "left_pinky",
            Self::RightPinky => "right_pinky",
            Self::LeftIndex => "left_index",
            Self::RightIndex => "right_index",
            Self::LeftThumb => "left_thumb",
            Self::RightThumb => "right_thumb",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
            Self::LeftKnee => "left_knee",
            Self::RightKnee => "right_knee",
            Self::LeftAnkle => "left_ankle",
            Self::RightAnkle => "right_ankle",
            Self::LeftHeel => "left_heel",
            Self::RightHeel => "right_heel",
            Self::LeftFootIndex => "left_foot_index",
            Self::RightFootIndex => "right_foot_index",
        }
    }
}

/// One frame of pose landmarks, ordered by [`BodyJoint`] index.
///
/// Immutable once constructed; the engine never mutates frames, it only
/// reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseFrame {
    landmarks: Vec<Landmark>,
}

impl PoseFrame {
    /// Wrap an ordered landmark array.
    ///
    /// Frames shorter than the full 33-joint schema are accepted; joints
    /// past the end simply read as absent, which the visibility gate turns
    /// into an "insufficient data" analysis result rather than an error.
    #[must_use]
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    /// Landmark for a joint, if the frame carries it.
    #[must_use]
    pub fn get(&self, joint: BodyJoint) -> Option<&Landmark> {
        self.landmarks.get(joint.index())
    }

    /// Whether a joint is present and clears the visibility gate.
    #[must_use]
    pub fn is_visible(&self, joint: BodyJoint) -> bool {
        self.get(joint).is_some_and(Landmark::is_visible)
    }

    /// Whether a joint is present with visibility above a custom threshold.
    ///
    /// Correction guidance uses a stricter gate (0.5) than stage analysis.
    #[must_use]
    pub fn is_visible_above(&self, joint: BodyJoint, threshold: f64) -> bool {
        self.get(joint)
            .is_some_and(|lm| lm.visibility.is_none_or(|v| v > threshold))
    }

    /// Whether every listed joint clears the visibility gate.
    #[must_use]
    pub fn all_visible(&self, joints: &[BodyJoint]) -> bool {
        joints.iter().all(|&j| self.is_visible(j))
    }

    /// Number of landmarks in the frame.
    #[must_use]
    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    /// Whether the frame is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}
