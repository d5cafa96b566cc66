// ABOUTME: Shared stage/rep analyzer contract, form feedback types, and variant dispatcher
// ABOUTME: Closed set of per-exercise analyzers behind one enum with a catalog-driven factory

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Kinema Motion Intelligence

//! # Stage/Rep Analyzers
//!
//! One analyzer per active exercise session.
//!
//! Each variant consumes one landmark frame per call, consults the
//! geometric kernel and its copied catalog thresholds, updates its stage
//! state with hysteresis, and emits a rep-completion event plus a
//! form-quality verdict.
//!
//! The family is a closed set of tagged variants behind
//! [`ExerciseAnalyzer`]; adding an exercise means adding a variant and an
//! implementation module, not a subclass.

mod arm_raise;
mod knee_raise;
mod torso_twist;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{ExerciseDefinition, ExerciseKind};
use crate::landmarks::PoseFrame;
use crate::messages;

pub use arm_raise::ArmRaiseAnalyzer;
pub use knee_raise::KneeRaiseAnalyzer;
pub use torso_twist::TorsoTwistAnalyzer;

/// Form score below which a frame reads as bad form.
const BAD_FORM_CEILING: u8 = 50;
/// Form score at or above which a frame reads as good form.
const GOOD_FORM_FLOOR: u8 = 80;

/// Discrete phase of a repetition as classified by a threshold rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Limbs raised / movement at its peak
    Up,
    /// Resting position
    Down,
    /// Twisted toward the user's left
    Left,
    /// Twisted toward the user's right
    Right,
    /// Neutral center position
    Center,
}

impl Stage {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
        }
    }

    /// Whether this stage is "away from rest" for tempo purposes.
    ///
    /// `Up`, `Left`, and `Right` all feed the tempo analyzer as the rising
    /// half of a cycle; `Down` and `Center` as the falling half.
    #[must_use]
    pub const fn is_raised(self) -> bool {
        matches!(self, Self::Up | Self::Left | Self::Right)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-level form quality band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormQuality {
    /// Score >= 80
    Good,
    /// Score 50..=79
    Warn,
    /// Score < 50
    Bad,
}

/// Per-frame form verdict: score, band, and paired issue/suggestion text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormFeedback {
    /// Quality band derived from the score
    pub quality: FormQuality,
    /// 0-100 form score
    pub score: u8,
    /// Human-readable descriptions of violated rules
    pub issues: Vec<String>,
    /// Corrective suggestion per violated rule
    pub suggestions: Vec<String>,
}

impl FormFeedback {
    /// Zero-score feedback for frames that fail the visibility gate.
    #[must_use]
    pub fn not_visible() -> Self {
        Self {
            quality: FormQuality::Bad,
            score: 0,
            issues: Vec::new(),
            suggestions: vec![messages::SHOW_FULL_BODY.to_owned()],
        }
    }
}

/// Accumulates fixed penalties against a starting score of 100.
///
/// Shared by every variant's embedded form evaluator.
#[derive(Debug)]
pub(crate) struct FormScore {
    score: i32,
    issues: Vec<String>,
    suggestions: Vec<String>,
}

impl FormScore {
    pub(crate) const fn new() -> Self {
        Self {
            score: 100,
            issues: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub(crate) fn penalize(&mut self, points: i32, issue: &str, suggestion: &str) {
        self.score -= points;
        self.issues.push(issue.to_owned());
        self.suggestions.push(suggestion.to_owned());
    }

    /// Clamp to `[0, 100]` and hand the parts to the caller.
    pub(crate) fn finish(self) -> (u8, Vec<String>, Vec<String>) {
        (self.score.clamp(0, 100) as u8, self.issues, self.suggestions)
    }
}

/// Mutable per-session analyzer state. Owned exclusively by one analyzer
/// instance; `reps` is monotonically non-decreasing within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerState {
    /// Current stage, always within the exercise's declared stage set
    pub stage: Stage,
    /// Stage before the most recent transition
    pub previous_stage: Stage,
    /// Cumulative repetition count for the session
    pub reps: u32,
    /// Quality band of the most recent form verdict
    pub last_quality: FormQuality,
    /// Consecutive frames banded `Warn`
    pub consecutive_warnings: u32,
    /// Consecutive frames banded `Bad`
    pub consecutive_bad_form: u32,
}

impl AnalyzerState {
    pub(crate) fn new(initial_stage: Stage) -> Self {
        Self {
            stage: initial_stage,
            previous_stage: initial_stage,
            reps: 0,
            last_quality: FormQuality::Good,
            consecutive_warnings: 0,
            consecutive_bad_form: 0,
        }
    }

    pub(crate) fn transition(&mut self, next: Stage) {
        self.previous_stage = self.stage;
        self.stage = next;
    }

    /// Band a score and update the sustained-poor-form counters.
    ///
    /// Callers watch the counters to react to sustained bad form instead
    /// of single noisy frames.
    pub(crate) fn record_quality(&mut self, score: u8) -> FormQuality {
        let quality = if score < BAD_FORM_CEILING {
            self.consecutive_bad_form += 1;
            self.consecutive_warnings = 0;
            FormQuality::Bad
        } else if score < GOOD_FORM_FLOOR {
            self.consecutive_warnings += 1;
            self.consecutive_bad_form = 0;
            FormQuality::Warn
        } else {
            self.consecutive_warnings = 0;
            self.consecutive_bad_form = 0;
            FormQuality::Good
        };
        self.last_quality = quality;
        quality
    }
}

/// Per-frame analysis output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Stage after this frame
    pub stage: Stage,
    /// Cumulative rep count after this frame
    pub reps: u32,
    /// Whether one or more reps completed on this frame
    pub rep_completed: bool,
    /// Form verdict for this frame
    pub form: FormFeedback,
    /// Named angles/offsets computed for this frame, for display
    pub angles: HashMap<String, f64>,
    /// Whether the required landmarks cleared the visibility gate
    pub is_visible: bool,
}

impl AnalysisResult {
    /// Short-circuit result for a frame that failed the visibility gate:
    /// stage and reps unchanged, no rep event, zero-score feedback.
    pub(crate) fn not_visible(state: &AnalyzerState) -> Self {
        Self {
            stage: state.stage,
            reps: state.reps,
            rep_completed: false,
            form: FormFeedback::not_visible(),
            angles: HashMap::new(),
            is_visible: false,
        }
    }
}

/// Closed set of per-exercise stage/rep analyzers.
#[derive(Debug)]
pub enum ExerciseAnalyzer {
    /// Bilateral arm raise with an armed up-to-down rep rule
    ArmRaise(ArmRaiseAnalyzer),
    /// Torso twist counting returns to center after a visited direction
    TorsoTwist(TorsoTwistAnalyzer),
    /// Knee raise with independent per-leg sub-stages
    KneeRaise(KneeRaiseAnalyzer),
}

impl ExerciseAnalyzer {
    /// Build the analyzer variant for a catalog definition.
    #[must_use]
    pub fn for_definition(definition: &ExerciseDefinition) -> Self {
        match definition.kind {
            ExerciseKind::ArmRaise => Self::ArmRaise(ArmRaiseAnalyzer::new(definition)),
            ExerciseKind::TorsoTwist => Self::TorsoTwist(TorsoTwistAnalyzer::new(definition)),
            ExerciseKind::KneeRaise => Self::KneeRaise(KneeRaiseAnalyzer::new(definition)),
        }
    }

    /// Exercise this analyzer handles.
    #[must_use]
    pub const fn kind(&self) -> ExerciseKind {
        match self {
            Self::ArmRaise(_) => ExerciseKind::ArmRaise,
            Self::TorsoTwist(_) => ExerciseKind::TorsoTwist,
            Self::KneeRaise(_) => ExerciseKind::KneeRaise,
        }
    }

    /// Analyze one landmark frame, updating stage/rep state.
    pub fn analyze(&mut self, frame: &PoseFrame) -> AnalysisResult {
        match self {
            Self::ArmRaise(a) => a.analyze(frame),
            Self::TorsoTwist(a) => a.analyze(frame),
            Self::KneeRaise(a) => a.analyze(frame),
        }
    }

    /// Evaluate form for a frame without advancing the stage machine.
    pub fn evaluate_form(&mut self, frame: &PoseFrame) -> FormFeedback {
        match self {
            Self::ArmRaise(a) => a.evaluate_form(frame),
            Self::TorsoTwist(a) => a.evaluate_form(frame),
            Self::KneeRaise(a) => a.evaluate_form(frame),
        }
    }

    /// Restore all stage/rep/auxiliary state to initial values.
    pub fn reset(&mut self) {
        match self {
            Self::ArmRaise(a) => a.reset(),
            Self::TorsoTwist(a) => a.reset(),
            Self::KneeRaise(a) => a.reset(),
        }
    }

    /// Current analyzer state.
    #[must_use]
    pub const fn state(&self) -> &AnalyzerState {
        match self {
            Self::ArmRaise(a) => a.state(),
            Self::TorsoTwist(a) => a.state(),
            Self::KneeRaise(a) => a.state(),
        }
    }
}
