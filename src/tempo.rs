// ABOUTME: Tempo analyzer with a four-phase rep cycle, rolling timing buffer, and beat counter
// ABOUTME: Scores pacing consistency and classifies tempo quality against difficulty ideals

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kinema Motion Intelligence

//! # Tempo Analyzer
//!
//! Independent of exercise type.
//!
//! Fed the stage/rep analyzer's reported stage plus a wall-clock timestamp
//! once per frame, it tracks the idle -> going up -> at peak -> going down
//! -> idle cycle, records completed-rep timings in a bounded rolling
//! buffer, and classifies rolling tempo quality and pacing consistency
//! against the difficulty's ideal cadence.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analyzers::Stage;
use crate::config::{Difficulty, TempoConfig};
use crate::messages;

/// Number of rhythm-guidance beats per bar.
const BEATS_PER_BAR: u8 = 4;
/// Minimum recorded reps before tempo quality is judged.
const MIN_REPS_FOR_JUDGEMENT: usize = 2;
/// Minimum samples before consistency is computed from data.
const MIN_SAMPLES_FOR_CONSISTENCY: usize = 3;
/// Consistency above which pacing can read as perfect.
const PERFECT_CONSISTENCY_FLOOR: f64 = 0.85;

/// Phase of the tempo cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TempoPhase {
    /// Between reps
    #[default]
    Idle,
    /// Rising half of a rep
    GoingUp,
    /// Holding at the top
    AtPeak,
    /// Falling half of a rep
    GoingDown,
}

/// Tempo quality classification for the rolling window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TempoQuality {
    /// Within tolerance, or not enough data to say otherwise
    #[default]
    Good,
    /// Faster than the ideal cadence
    TooFast,
    /// Slower than the ideal cadence
    TooSlow,
    /// Rep durations vary too much
    Inconsistent,
    /// On the ideal cadence with steady pacing
    Perfect,
}

/// Timing record for one completed repetition. Immutable once created.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RepTiming {
    /// Rep start (milliseconds, caller's clock)
    pub start_ms: f64,
    /// Peak reached (milliseconds)
    pub peak_ms: f64,
    /// Rep end (milliseconds)
    pub end_ms: f64,
    /// Rising-phase duration (seconds)
    pub up_duration: f64,
    /// Falling-phase duration (seconds)
    pub down_duration: f64,
    /// Total duration (seconds)
    pub total_duration: f64,
    /// Up/down duration ratio
    pub up_down_ratio: f64,
}

/// Rolling tempo snapshot for display and coaching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TempoSnapshot {
    /// Current phase of the cycle
    pub current_phase: TempoPhase,
    /// Seconds spent in the current phase
    pub phase_duration: f64,
    /// Average total rep duration over the rolling buffer (seconds)
    pub avg_rep_duration: f64,
    /// Average rising-phase duration (seconds)
    pub avg_up_duration: f64,
    /// Average falling-phase duration (seconds)
    pub avg_down_duration: f64,
    /// Tempo quality classification
    pub tempo_quality: TempoQuality,
    /// Pacing consistency in `[0, 1]`; 1.0 is perfectly even
    pub consistency_score: f64,
    /// Human-readable ideal cadence, e.g. "2s up / 2s down"
    pub recommended_tempo: String,
    /// Coaching message for the current quality, empty when nothing to say
    pub feedback: String,
    /// Rhythm-guidance beat, 1..=4
    pub beat_count: u8,
}

/// Per-session tempo state. One instance per exercise session; switching
/// exercises requires a fresh analyzer because stage vocabularies differ.
#[derive(Debug)]
pub struct TempoAnalyzer {
    config: TempoConfig,
    ideal_up: f64,
    ideal_down: f64,
    phase: TempoPhase,
    phase_start_ms: Option<f64>,
    rep_start_ms: Option<f64>,
    peak_ms: Option<f64>,
    timings: VecDeque<RepTiming>,
    completed_reps: u32,
    beat: u8,
    last_beat_ms: Option<f64>,
    last_update_ms: Option<f64>,
}

impl TempoAnalyzer {
    /// Build a tempo analyzer for a difficulty level.
    #[must_use]
    pub fn new(difficulty: Difficulty, config: TempoConfig) -> Self {
        let (ideal_up, ideal_down) = difficulty.ideal_durations();
        Self {
            config,
            ideal_up,
            ideal_down,
            phase: TempoPhase::Idle,
            phase_start_ms: None,
            rep_start_ms: None,
            peak_ms: None,
            timings: VecDeque::new(),
            completed_reps: 0,
            beat: 1,
            last_beat_ms: None,
            last_update_ms: None,
        }
    }

    /// Feed one frame's stage and timestamp, advancing the phase machine.
    ///
    /// `Up`-like stages (up, left, right) drive the rising half of the
    /// cycle; `Down`/`Center` the falling half.
    pub fn update_phase(&mut self, stage: Stage, timestamp_ms: f64) {
        self.advance_beat(timestamp_ms);
        self.last_update_ms = Some(timestamp_ms);

        if stage.is_raised() {
            match self.phase {
                TempoPhase::GoingUp => {
                    self.set_phase(TempoPhase::AtPeak, timestamp_ms);
                    self.peak_ms = Some(timestamp_ms);
                }
                TempoPhase::AtPeak => {}
                TempoPhase::Idle | TempoPhase::GoingDown => {
                    self.set_phase(TempoPhase::GoingUp, timestamp_ms);
                    self.rep_start_ms = Some(timestamp_ms);
                }
            }
        } else {
            match self.phase {
                TempoPhase::AtPeak => self.set_phase(TempoPhase::GoingDown, timestamp_ms),
                TempoPhase::GoingDown => {
                    self.close_rep(timestamp_ms);
                    self.set_phase(TempoPhase::Idle, timestamp_ms);
                }
                TempoPhase::Idle | TempoPhase::GoingUp => {}
            }
        }
    }

    /// Completed reps recorded by this analyzer (including timings later
    /// evicted from the rolling buffer).
    #[must_use]
    pub const fn completed_reps(&self) -> u32 {
        self.completed_reps
    }

    /// Recorded timings, oldest first. Bounded by the configured capacity.
    #[must_use]
    pub const fn timings(&self) -> &VecDeque<RepTiming> {
        &self.timings
    }

    /// Compute the rolling tempo snapshot. Safe to call on any cadence
    /// independent of `update_phase` (e.g. a UI refresh tick).
    #[must_use]
    pub fn analyze(&self) -> TempoSnapshot {
        let ideal_total = self.ideal_up + self.ideal_down;
        let (up, down) = (self.ideal_up, self.ideal_down);
        let recommended_tempo = format!("{up}s up / {down}s down");
        let phase_duration = match (self.last_update_ms, self.phase_start_ms) {
            (Some(now), Some(start)) => (now - start) / 1000.0,
            _ => 0.0,
        };

        if self.timings.len() < MIN_REPS_FOR_JUDGEMENT {
            // Not enough data to judge; report neutral quality.
            return TempoSnapshot {
                current_phase: self.phase,
                phase_duration,
                avg_rep_duration: 0.0,
                avg_up_duration: 0.0,
                avg_down_duration: 0.0,
                tempo_quality: TempoQuality::Good,
                consistency_score: 1.0,
                recommended_tempo,
                feedback: String::new(),
                beat_count: self.beat,
            };
        }

        let n = self.timings.len() as f64;
        let avg_total = self.timings.iter().map(|t| t.total_duration).sum::<f64>() / n;
        let avg_up = self.timings.iter().map(|t| t.up_duration).sum::<f64>() / n;
        let avg_down = self.timings.iter().map(|t| t.down_duration).sum::<f64>() / n;
        let consistency = self.consistency_score(avg_total, ideal_total);
        let (tempo_quality, feedback) = self.classify(avg_total, avg_up, avg_down, consistency, ideal_total);

        TempoSnapshot {
            current_phase: self.phase,
            phase_duration,
            avg_rep_duration: avg_total,
            avg_up_duration: avg_up,
            avg_down_duration: avg_down,
            tempo_quality,
            consistency_score: consistency,
            recommended_tempo,
            feedback,
            beat_count: self.beat,
        }
    }

    fn set_phase(&mut self, phase: TempoPhase, timestamp_ms: f64) {
        self.phase = phase;
        self.phase_start_ms = Some(timestamp_ms);
    }

    /// Close the in-progress rep, recording a timing unless the total
    /// duration is outside the believable range (startup noise or stalls).
    fn close_rep(&mut self, end_ms: f64) {
        let (Some(start_ms), Some(peak_ms)) = (self.rep_start_ms, self.peak_ms) else {
            return;
        };
        self.rep_start_ms = None;
        self.peak_ms = None;

        let up_duration = (peak_ms - start_ms) / 1000.0;
        let down_duration = (end_ms - peak_ms) / 1000.0;
        let total_duration = up_duration + down_duration;

        if total_duration < self.config.min_rep_seconds
            || total_duration > self.config.max_rep_seconds
        {
            warn!(total_duration, "discarding implausible rep timing");
            return;
        }

        let up_down_ratio = if down_duration > 0.0 {
            up_duration / down_duration
        } else {
            0.0
        };

        self.timings.push_back(RepTiming {
            start_ms,
            peak_ms,
            end_ms,
            up_duration,
            down_duration,
            total_duration,
            up_down_ratio,
        });
        while self.timings.len() > self.config.timing_buffer_capacity {
            self.timings.pop_front();
        }
        self.completed_reps += 1;
        debug!(
            total_duration,
            up_duration, down_duration, "rep timing recorded"
        );
    }

    /// Advance the wall-clock beat counter, 1 -> 4 cyclic, one step per
    /// configured interval regardless of phase.
    fn advance_beat(&mut self, timestamp_ms: f64) {
        let interval_ms = self.config.beat_interval_seconds * 1000.0;
        let Some(last) = self.last_beat_ms else {
            self.last_beat_ms = Some(timestamp_ms);
            return;
        };
        if timestamp_ms - last >= interval_ms {
            self.beat = self.beat % BEATS_PER_BAR + 1;
            self.last_beat_ms = Some(timestamp_ms);
        }
    }

    /// Inverse-normalized standard deviation of total durations; 1.0 below
    /// the minimum sample count.
    fn consistency_score(&self, avg_total: f64, ideal_total: f64) -> f64 {
        if self.timings.len() < MIN_SAMPLES_FOR_CONSISTENCY {
            return 1.0;
        }
        let n = self.timings.len() as f64;
        let variance = self
            .timings
            .iter()
            .map(|t| (t.total_duration - avg_total).powi(2))
            .sum::<f64>()
            / n;
        (1.0 - variance.sqrt() / ideal_total).max(0.0)
    }

    fn classify(
        &self,
        avg_total: f64,
        avg_up: f64,
        avg_down: f64,
        consistency: f64,
        ideal_total: f64,
    ) -> (TempoQuality, String) {
        let tolerance = self.config.tolerance_seconds;

        if avg_total < ideal_total * 0.5 {
            return (
                TempoQuality::TooFast,
                messages::TEMPO_TOO_FAST_STRONG.to_owned(),
            );
        }
        if avg_total < ideal_total - tolerance {
            return (
                TempoQuality::TooFast,
                messages::TEMPO_TOO_FAST_MILD.to_owned(),
            );
        }
        if avg_total > ideal_total * 1.5 {
            return (
                TempoQuality::TooSlow,
                messages::TEMPO_TOO_SLOW_STRONG.to_owned(),
            );
        }
        if avg_total > ideal_total + tolerance {
            return (
                TempoQuality::TooSlow,
                messages::TEMPO_TOO_SLOW_MILD.to_owned(),
            );
        }
        if consistency < self.config.inconsistency_floor {
            return (
                TempoQuality::Inconsistent,
                messages::TEMPO_INCONSISTENT.to_owned(),
            );
        }
        let ratio = if avg_down > 0.0 { avg_up / avg_down } else { 0.0 };
        if ratio > self.config.unbalanced_ratio || ratio < 1.0 / self.config.unbalanced_ratio {
            return (TempoQuality::Good, messages::TEMPO_UNBALANCED.to_owned());
        }
        if (avg_total - ideal_total).abs() <= tolerance / 2.0
            && consistency > PERFECT_CONSISTENCY_FLOOR
        {
            return (TempoQuality::Perfect, messages::TEMPO_PERFECT.to_owned());
        }
        (TempoQuality::Good, String::new())
    }
}
