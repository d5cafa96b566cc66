// ABOUTME: Session facade owning one analyzer, tempo analyzer, and motion analyzer trio
// ABOUTME: Runs the per-frame data flow and exposes reset/switch semantics for hosts

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kinema Motion Intelligence

//! # Exercise Session
//!
//! One session owns its analyzer/tempo/motion state exclusively: one
//! writer, no shared mutable state, frame-synchronous.
//!
//! A multi-session host simply creates one [`ExerciseSession`] per
//! concurrent user.
//!
//! Switching exercises discards tempo and analyzer state — stage
//! vocabularies differ across exercises, so carrying state over would be
//! meaningless.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::analyzers::{AnalysisResult, ExerciseAnalyzer, Stage};
use crate::catalog::{ExerciseCatalog, ExerciseKind};
use crate::config::{Difficulty, EngineConfig};
use crate::correction::{corrections, JointCorrection};
use crate::errors::EngineResult;
use crate::landmarks::{BodyJoint, PoseFrame};
use crate::motion_quality::{MotionQualityAnalyzer, MotionSnapshot};
use crate::tempo::{TempoAnalyzer, TempoSnapshot};

/// Combined per-frame output of the full pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameReport {
    /// Stage/rep/form analysis for the frame
    pub analysis: AnalysisResult,
    /// Rolling tempo snapshot after feeding this frame's stage
    pub tempo: TempoSnapshot,
    /// Motion-quality snapshot off the exercise's tracked joint
    pub motion: MotionSnapshot,
}

/// One active exercise session: the analyzer trio plus identity.
#[derive(Debug)]
pub struct ExerciseSession {
    id: Uuid,
    started_at: DateTime<Utc>,
    difficulty: Difficulty,
    config: EngineConfig,
    analyzer: ExerciseAnalyzer,
    tempo: TempoAnalyzer,
    motion: MotionQualityAnalyzer,
    tracked_joint: BodyJoint,
}

impl ExerciseSession {
    /// Start a session for an exercise at a difficulty level.
    ///
    /// # Errors
    /// Returns [`crate::errors::EngineError::UnknownExercise`] when the
    /// catalog has no definition for `kind`.
    pub fn new(
        kind: ExerciseKind,
        difficulty: Difficulty,
        catalog: &ExerciseCatalog,
        config: EngineConfig,
    ) -> EngineResult<Self> {
        let definition = catalog.definition(kind)?;
        let id = Uuid::new_v4();
        info!(
            session_id = %id,
            exercise = definition.kind.key(),
            difficulty = ?difficulty,
            "exercise session started"
        );
        Ok(Self {
            id,
            started_at: Utc::now(),
            difficulty,
            analyzer: ExerciseAnalyzer::for_definition(definition),
            tempo: TempoAnalyzer::new(difficulty, config.tempo.clone()),
            motion: MotionQualityAnalyzer::new(config.motion.clone()),
            tracked_joint: definition.tracked_joint,
            config,
        })
    }

    /// Start a session from an external exercise key string.
    ///
    /// # Errors
    /// Returns [`crate::errors::EngineError::UnknownExercise`] for keys the
    /// catalog does not know.
    pub fn from_key(
        key: &str,
        difficulty: Difficulty,
        catalog: &ExerciseCatalog,
        config: EngineConfig,
    ) -> EngineResult<Self> {
        Self::new(key.parse()?, difficulty, catalog, config)
    }

    /// Session id.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// When the session started.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Exercise this session analyzes.
    #[must_use]
    pub const fn exercise(&self) -> ExerciseKind {
        self.analyzer.kind()
    }

    /// The stage/rep analyzer, for direct inspection.
    #[must_use]
    pub const fn analyzer(&self) -> &ExerciseAnalyzer {
        &self.analyzer
    }

    /// The tempo analyzer, for direct inspection.
    #[must_use]
    pub const fn tempo(&self) -> &TempoAnalyzer {
        &self.tempo
    }

    /// Run the full pipeline for one frame: stage/rep analysis, then the
    /// tempo phase machine fed with the reported stage, then the motion
    /// analyzer fed with the tracked joint's position.
    pub fn process_frame(&mut self, frame: &PoseFrame, timestamp_ms: f64) -> FrameReport {
        let analysis = self.analyzer.analyze(frame);

        self.tempo.update_phase(analysis.stage, timestamp_ms);
        if let Some(point) = frame.get(self.tracked_joint) {
            if point.is_visible() {
                self.motion.update(point.x, point.y, timestamp_ms);
            }
        }

        if analysis.rep_completed {
            debug!(session_id = %self.id, reps = analysis.reps, "rep recorded");
        }

        FrameReport {
            analysis,
            tempo: self.tempo.analyze(),
            motion: self.motion.analyze(),
        }
    }

    /// Corrections for the frame against a stage's declared target pose.
    ///
    /// # Errors
    /// Returns [`crate::errors::EngineError::UnknownExercise`] when the
    /// catalog no longer carries this session's exercise.
    pub fn corrections_for(
        &self,
        frame: &PoseFrame,
        catalog: &ExerciseCatalog,
        stage: Stage,
    ) -> EngineResult<Vec<JointCorrection>> {
        let definition = catalog.definition(self.exercise())?;
        Ok(corrections(frame, definition, stage))
    }

    /// Reset all per-session state while keeping the same exercise.
    pub fn reset(&mut self) {
        info!(session_id = %self.id, "session reset");
        self.analyzer.reset();
        self.tempo = TempoAnalyzer::new(self.difficulty, self.config.tempo.clone());
        self.motion = MotionQualityAnalyzer::new(self.config.motion.clone());
    }

    /// Switch to a different exercise, discarding analyzer and tempo
    /// state. Stage vocabularies differ between exercises, so state is
    /// never carried across a switch.
    ///
    /// # Errors
    /// Returns [`crate::errors::EngineError::UnknownExercise`] when the
    /// catalog has no definition for `kind`.
    pub fn switch_exercise(
        &mut self,
        kind: ExerciseKind,
        catalog: &ExerciseCatalog,
    ) -> EngineResult<()> {
        let definition = catalog.definition(kind)?;
        info!(session_id = %self.id, exercise = kind.key(), "exercise switched");
        self.analyzer = ExerciseAnalyzer::for_definition(definition);
        self.tempo = TempoAnalyzer::new(self.difficulty, self.config.tempo.clone());
        self.motion = MotionQualityAnalyzer::new(self.config.motion.clone());
        self.tracked_joint = definition.tracked_joint;
        Ok(())
    }
}
