// ABOUTME: Engine error taxonomy for construction-time misuse and config loading
// ABOUTME: Data-quality problems never surface here; they degrade to safe defaults

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kinema Motion Intelligence

//! # Engine Errors
//!
//! The analysis pipeline itself never fails: missing landmarks, degenerate
//! geometry, and short histories all degrade to well-defined "insufficient
//! data" outputs.
//!
//! The errors below cover the one place a hard failure is correct:
//! construction-time misuse such as selecting an exercise the catalog does
//! not know, or feeding it malformed configuration.

use thiserror::Error;

/// Errors raised when constructing or configuring the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested exercise key has no catalog definition.
    #[error("unknown exercise type: {0}")]
    UnknownExercise(String),

    /// A catalog or config document failed to parse.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    /// A catalog definition is internally inconsistent (e.g. inverted
    /// hysteresis thresholds).
    #[error("invalid exercise definition for {exercise}: {reason}")]
    InvalidDefinition {
        /// Exercise key the definition belongs to
        exercise: String,
        /// What failed validation
        reason: String,
    },
}

/// Result alias for engine construction and configuration.
pub type EngineResult<T> = Result<T, EngineError>;
