// ABOUTME: Constant coaching-string tables for form, tempo, and motion feedback
// ABOUTME: Kept as one immutable module so callers and tests share exact wording

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kinema Motion Intelligence

//! # Coaching Messages
//!
//! Every human-readable string the engine emits lives here.
//!
//! The engine produces structured signals plus these fixed strings; a
//! downstream collaborator turns them into spoken or rendered coaching.

/// Suggestion emitted when required landmarks fail the visibility gate.
pub const SHOW_FULL_BODY: &str = "Please step back so your full body is visible";

/// Issue: left/right angles differ beyond the symmetry threshold.
pub const ISSUE_ASYMMETRY: &str = "Left and right sides are moving unevenly";
/// Suggestion paired with [`ISSUE_ASYMMETRY`].
pub const SUGGEST_ASYMMETRY: &str = "Move both sides together at the same height";

/// Issue: shoulders are not level.
pub const ISSUE_SHOULDER_TILT: &str = "Shoulders are tilted";
/// Suggestion paired with [`ISSUE_SHOULDER_TILT`].
pub const SUGGEST_SHOULDER_TILT: &str = "Keep your shoulders level";

/// Issue: knee not lifted high enough during the up stage.
pub const ISSUE_LOW_KNEE: &str = "Knee is not lifted high enough";
/// Suggestion paired with [`ISSUE_LOW_KNEE`].
pub const SUGGEST_LOW_KNEE: &str = "Lift your knee toward hip height";

/// Issue: torso leaning sideways during a twist.
pub const ISSUE_TORSO_LEAN: &str = "Torso is leaning instead of rotating";
/// Suggestion paired with [`ISSUE_TORSO_LEAN`].
pub const SUGGEST_TORSO_LEAN: &str = "Keep your hips still and rotate from the waist";

/// Issue: hips are not level.
pub const ISSUE_HIP_TILT: &str = "Hips are tilted";
/// Suggestion paired with [`ISSUE_HIP_TILT`].
pub const SUGGEST_HIP_TILT: &str = "Keep your hips level and stable";

/// Tempo: much faster than the ideal cadence.
pub const TEMPO_TOO_FAST_STRONG: &str = "Way too fast - slow down and control the movement";
/// Tempo: mildly faster than the ideal cadence.
pub const TEMPO_TOO_FAST_MILD: &str = "A little fast - try slowing down slightly";
/// Tempo: much slower than the ideal cadence.
pub const TEMPO_TOO_SLOW_STRONG: &str = "Very slow - try to keep the movement flowing";
/// Tempo: mildly slower than the ideal cadence.
pub const TEMPO_TOO_SLOW_MILD: &str = "A little slow - pick up the pace slightly";
/// Tempo: rep durations vary too much.
pub const TEMPO_INCONSISTENT: &str = "Your pacing is uneven - aim for a steady rhythm";
/// Tempo: up/down ratio is lopsided.
pub const TEMPO_UNBALANCED: &str = "Up and down phases are unbalanced - even them out";
/// Tempo: right on the ideal cadence with steady pacing.
pub const TEMPO_PERFECT: &str = "Perfect tempo - keep this rhythm";

/// Motion: tracked point has stopped moving.
pub const MOTION_NO_MOVEMENT: &str = "Keep moving - don't stop mid-exercise";
/// Motion: tracked point moving too fast.
pub const MOTION_TOO_FAST: &str = "Slow down - controlled movement works the muscle more";
/// Motion: tracked point barely moving.
pub const MOTION_TOO_SLOW: &str = "Move with a little more energy";
/// Motion: velocity variance indicates jerky movement.
pub const MOTION_JERKY: &str = "Try to move more smoothly";
/// Motion: occasional praise for smooth movement.
pub const MOTION_SMOOTH_PRAISE: &str = "Nice smooth movement - keep it up";
