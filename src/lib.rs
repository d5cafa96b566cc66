// ABOUTME: Motion analysis engine for the Kinema exercise coaching platform
// ABOUTME: Stage/rep counting, form scoring, tempo analysis, and motion quality over 2D landmarks

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kinema Motion Intelligence

#![deny(unsafe_code)]

//! # Kinema Engine
//!
//! Deterministic motion analysis over per-frame 2D body landmarks from an
//! external pose estimator.
//!
//! The engine provides repetition counting with hysteresis stage machines,
//! 0-100 form scoring, tempo/rhythm quality with consistency scoring,
//! motion smoothness, and corrective guidance against declared target
//! poses.
//!
//! The engine is pure computation: no I/O, no async, no locking. Each
//! session owns its state exclusively and is driven frame-synchronously
//! by the caller. Bad input never crashes the pipeline — missing or
//! low-confidence landmarks degrade to well-defined "insufficient data"
//! outputs.
//!
//! ## Modules
//!
//! - **geometry**: pure geometric kernel (angles, distances, midpoints)
//! - **landmarks**: landmark frames and the 33-joint body index scheme
//! - **catalog**: static per-exercise configuration (stages, thresholds, target poses)
//! - **config**: engine-level tuning (difficulty, tempo, motion thresholds)
//! - **analyzers**: per-exercise stage/rep machines with embedded form evaluators
//! - **tempo**: four-phase tempo cycle, rolling timings, consistency scoring
//! - **`motion_quality`**: velocity/smoothness analysis with debounced feedback
//! - **correction**: per-joint corrective guidance against target poses
//! - **session**: the per-session facade wiring the pipeline together

/// Per-exercise stage/rep analyzers with embedded form evaluators
pub mod analyzers;

/// Static exercise catalog: stage vocabularies, thresholds, target poses
pub mod catalog;

/// Engine-level tuning configuration
pub mod config;

/// Corrective guidance against declared target poses
pub mod correction;

/// Construction-time error taxonomy
pub mod errors;

/// Pure geometric kernel over landmark positions
pub mod geometry;

/// Landmark frames and the fixed 33-joint index scheme
pub mod landmarks;

/// Constant coaching-string tables
pub mod messages;

/// Motion smoothness and speed analysis
pub mod motion_quality;

/// Per-session pipeline facade
pub mod session;

/// Tempo cycle tracking and rhythm quality
pub mod tempo;

pub use analyzers::{AnalysisResult, ExerciseAnalyzer, FormFeedback, FormQuality, Stage};
pub use catalog::{ExerciseCatalog, ExerciseDefinition, ExerciseKind};
pub use config::{Difficulty, EngineConfig};
pub use errors::{EngineError, EngineResult};
pub use landmarks::{BodyJoint, Landmark, PoseFrame};
pub use session::{ExerciseSession, FrameReport};
