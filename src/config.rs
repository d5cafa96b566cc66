// ABOUTME: Engine-level tuning for tempo ideals, difficulty, and motion-quality thresholds
// ABOUTME: Serde config structs with Default impls, loaded once and passed by reference

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kinema Motion Intelligence

//! # Engine Configuration
//!
//! Tuning knobs that are not per-exercise (those live in the
//! [`catalog`](crate::catalog)): ideal phase durations per difficulty,
//! tempo tolerance bands, and motion-quality thresholds.
//!
//! All types are plain serde structs with `Default` impls so a host can
//! load overrides from JSON once at startup and share them by reference.

use serde::{Deserialize, Serialize};

/// Difficulty level selecting ideal phase durations for tempo analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Slow, deliberate cadence
    #[default]
    Beginner,
    /// Moderate cadence
    Intermediate,
    /// Brisk cadence
    Advanced,
}

impl Difficulty {
    /// Ideal (up, down) phase durations in seconds for this level.
    #[must_use]
    pub const fn ideal_durations(self) -> (f64, f64) {
        match self {
            Self::Beginner => (2.5, 2.5),
            Self::Intermediate => (2.0, 2.0),
            Self::Advanced => (1.5, 1.5),
        }
    }
}

/// Tempo analysis tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TempoConfig {
    /// Tolerance band around the ideal total duration (seconds)
    pub tolerance_seconds: f64,
    /// Shortest believable rep; faster totals are startup noise (seconds)
    pub min_rep_seconds: f64,
    /// Longest believable rep; slower totals are stalls (seconds)
    pub max_rep_seconds: f64,
    /// Rolling rep-timing buffer capacity
    pub timing_buffer_capacity: usize,
    /// Wall-clock interval between beat-counter advances (seconds)
    pub beat_interval_seconds: f64,
    /// Consistency score below which pacing reads as inconsistent
    pub inconsistency_floor: f64,
    /// Up/down ratio beyond which the rep reads as unbalanced
    pub unbalanced_ratio: f64,
}

impl Default for TempoConfig {
    fn default() -> Self {
        Self {
            tolerance_seconds: 1.0,
            min_rep_seconds: 1.0,
            max_rep_seconds: 10.0,
            timing_buffer_capacity: 10,
            beat_interval_seconds: 0.5,
            inconsistency_floor: 0.6,
            unbalanced_ratio: 1.5,
        }
    }
}

/// Motion-quality analysis tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Position history capacity (samples)
    pub history_capacity: usize,
    /// Window of most recent samples used per analysis
    pub analysis_window: usize,
    /// Minimum samples before any judgement is made
    pub min_samples: usize,
    /// Average velocity above which the point counts as moving
    pub moving_velocity: f64,
    /// Average velocity above which movement reads as too fast
    pub fast_velocity: f64,
    /// Average velocity below which movement reads as too slow
    pub slow_velocity: f64,
    /// Velocity variance above which movement reads as jerky
    pub jerky_variance: f64,
    /// Minimum interval between feedback messages (seconds)
    pub feedback_interval_seconds: f64,
    /// Probability of praising smooth movement per analysis
    pub praise_probability: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            history_capacity: 30,
            analysis_window: 10,
            min_samples: 5,
            moving_velocity: 0.01,
            fast_velocity: 0.3,
            slow_velocity: 0.02,
            jerky_variance: 0.05,
            feedback_interval_seconds: 3.0,
            praise_probability: 0.15,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Tempo analysis tuning
    pub tempo: TempoConfig,
    /// Motion-quality analysis tuning
    pub motion: MotionConfig,
}

impl EngineConfig {
    /// Load overrides from a JSON document.
    ///
    /// # Errors
    /// Returns [`crate::errors::EngineError::InvalidConfig`] when the
    /// document fails to parse.
    pub fn from_json_str(json: &str) -> crate::errors::EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
