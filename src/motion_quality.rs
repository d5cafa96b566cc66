// ABOUTME: Motion quality analyzer deriving velocity and smoothness from a bounded history
// ABOUTME: Debounced feedback with priority ordering and an injectable RNG for praise draws

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kinema Motion Intelligence

//! # Motion Quality Analyzer
//!
//! Runs in parallel with the stage pipeline off a single tracked point
//! (e.g. a wrist).
//!
//! Maintains a bounded position history and derives per-step velocity,
//! average speed, and velocity variance; feedback is rate-limited so the
//! coaching layer is not flooded every frame.
//!
//! The occasional praise for smooth movement is intentionally random; the
//! RNG is injected so tests can fix the seed.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::MotionConfig;
use crate::messages;

/// Speed classification for the tracked point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionSpeed {
    /// Within the expected velocity range, or not enough data
    #[default]
    Normal,
    /// Average velocity above the fast threshold
    TooFast,
    /// Moving, but below the slow threshold
    TooSlow,
}

/// Smoothness classification for the tracked point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionSmoothness {
    /// Velocity variance within bounds, or not enough data
    #[default]
    Smooth,
    /// Velocity variance above the jerky threshold
    Jerky,
}

/// Per-analysis motion snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionSnapshot {
    /// Speed classification
    pub speed: MotionSpeed,
    /// Smoothness classification
    pub smoothness: MotionSmoothness,
    /// Whether the tracked point is moving at all
    pub is_moving: bool,
    /// Rate-limited coaching message, if one is due
    pub feedback: Option<String>,
}

impl MotionSnapshot {
    /// Neutral snapshot for insufficient history.
    fn insufficient_data() -> Self {
        Self {
            speed: MotionSpeed::Normal,
            smoothness: MotionSmoothness::Smooth,
            is_moving: false,
            feedback: None,
        }
    }
}

/// One tracked-point sample.
#[derive(Debug, Clone, Copy)]
struct MotionSample {
    x: f64,
    y: f64,
    timestamp_ms: f64,
}

/// Motion quality analyzer. One instance per session.
#[derive(Debug)]
pub struct MotionQualityAnalyzer {
    config: MotionConfig,
    history: VecDeque<MotionSample>,
    last_feedback_ms: Option<f64>,
    rng: ChaCha8Rng,
}

impl MotionQualityAnalyzer {
    /// Build with an entropy-seeded RNG.
    #[must_use]
    pub fn new(config: MotionConfig) -> Self {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// Build with a fixed seed, for deterministic tests.
    #[must_use]
    pub fn with_seed(config: MotionConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(config: MotionConfig, rng: ChaCha8Rng) -> Self {
        Self {
            config,
            history: VecDeque::new(),
            last_feedback_ms: None,
            rng,
        }
    }

    /// Append one tracked-point sample, evicting the oldest at capacity.
    pub fn update(&mut self, x: f64, y: f64, timestamp_ms: f64) {
        self.history.push_back(MotionSample { x, y, timestamp_ms });
        while self.history.len() > self.config.history_capacity {
            self.history.pop_front();
        }
    }

    /// Number of samples currently held.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Analyze the most recent samples.
    pub fn analyze(&mut self) -> MotionSnapshot {
        if self.history.len() < self.config.min_samples {
            return MotionSnapshot::insufficient_data();
        }

        let window_start = self.history.len().saturating_sub(self.config.analysis_window);
        let window: Vec<MotionSample> = self.history.iter().skip(window_start).copied().collect();

        let velocities = Self::step_velocities(&window);
        if velocities.is_empty() {
            return MotionSnapshot::insufficient_data();
        }

        let n = velocities.len() as f64;
        let avg = velocities.iter().sum::<f64>() / n;
        let variance = velocities.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / n;

        let is_moving = avg > self.config.moving_velocity;
        let speed = if avg > self.config.fast_velocity {
            MotionSpeed::TooFast
        } else if is_moving && avg < self.config.slow_velocity {
            MotionSpeed::TooSlow
        } else {
            MotionSpeed::Normal
        };
        let smoothness = if variance > self.config.jerky_variance {
            MotionSmoothness::Jerky
        } else {
            MotionSmoothness::Smooth
        };
        debug!(avg_velocity = avg, variance, is_moving, "motion window analyzed");

        let now_ms = window.last().map_or(0.0, |s| s.timestamp_ms);
        let feedback = self.rate_limited_feedback(is_moving, speed, smoothness, now_ms);

        MotionSnapshot {
            speed,
            smoothness,
            is_moving,
            feedback,
        }
    }

    /// Distance over time delta for each consecutive sample pair. Pairs
    /// with a non-positive time delta are skipped.
    fn step_velocities(window: &[MotionSample]) -> Vec<f64> {
        window
            .windows(2)
            .filter_map(|pair| {
                let dt = (pair[1].timestamp_ms - pair[0].timestamp_ms) / 1000.0;
                if dt <= 0.0 {
                    return None;
                }
                let dist = (pair[1].x - pair[0].x).hypot(pair[1].y - pair[0].y);
                Some(dist / dt)
            })
            .collect()
    }

    /// One message per feedback interval at most, in priority order:
    /// no-motion, too-fast, too-slow, jerky, then an occasional praise for
    /// smooth movement.
    fn rate_limited_feedback(
        &mut self,
        is_moving: bool,
        speed: MotionSpeed,
        smoothness: MotionSmoothness,
        now_ms: f64,
    ) -> Option<String> {
        let interval_ms = self.config.feedback_interval_seconds * 1000.0;
        if self
            .last_feedback_ms
            .is_some_and(|last| now_ms - last < interval_ms)
        {
            return None;
        }

        let message = if !is_moving {
            Some(messages::MOTION_NO_MOVEMENT)
        } else if speed == MotionSpeed::TooFast {
            Some(messages::MOTION_TOO_FAST)
        } else if speed == MotionSpeed::TooSlow {
            Some(messages::MOTION_TOO_SLOW)
        } else if smoothness == MotionSmoothness::Jerky {
            Some(messages::MOTION_JERKY)
        } else if self.rng.gen::<f64>() < self.config.praise_probability {
            Some(messages::MOTION_SMOOTH_PRAISE)
        } else {
            None
        };

        message.map(|m| {
            self.last_feedback_ms = Some(now_ms);
            m.to_owned()
        })
    }
}
