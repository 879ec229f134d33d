//! Action evaluation: scoring a single candidate action.
//!
//! The [`MaterialActionEvaluator`] scores an [`ActionAnalysis`] in three tiers:
//!
//! 1. **Decisive hits** - destroying the enemy Royal scores `+win`, destroying
//!    one's own Royal scores `-win`; nothing else is considered
//! 2. **Material** - each destroyed enemy piece adds its value, each destroyed
//!    own piece subtracts its value times `own_loss_factor`
//! 3. **Exposure** - if the enemy's next shot would hit our Royal, subtract
//!    `exposure_penalty`
//!
//! ```text
//! score = Σ value(enemy losses) - own_loss_factor · Σ value(own losses) - exposure
//! ```
//!
//! # Design: Shallow Heuristic
//!
//! The score only looks at the acting player's shot and a single enemy shot
//! without enemy movement. It never plans further ahead.

use std::fmt;

use deflect_engine::PieceKind;
use serde::{Deserialize, Serialize};

use crate::action_analysis::ActionAnalysis;

/// Scores candidate actions (higher is better).
pub trait ActionEvaluator: fmt::Debug + Send + Sync {
    fn evaluate_action(&self, analysis: &ActionAnalysis) -> f32;
}

/// Tunable scoring weights.
///
/// Missing fields in a JSON document fall back to the defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialWeights {
    pub win: f32,
    pub royal: f32,
    pub dual_mirror: f32,
    pub shield: f32,
    pub mirror: f32,
    pub emitter: f32,
    pub own_loss_factor: f32,
    pub exposure_penalty: f32,
}

impl Default for MaterialWeights {
    fn default() -> Self {
        Self {
            win: 100_000.0,
            royal: 1000.0,
            dual_mirror: 40.0,
            shield: 30.0,
            mirror: 20.0,
            emitter: 0.0,
            own_loss_factor: 1.5,
            exposure_penalty: 50_000.0,
        }
    }
}

impl MaterialWeights {
    #[must_use]
    pub fn piece_value(&self, kind: PieceKind) -> f32 {
        match kind {
            PieceKind::Royal => self.royal,
            PieceKind::Emitter => self.emitter,
            PieceKind::Shield => self.shield,
            PieceKind::Mirror => self.mirror,
            PieceKind::DualMirror => self.dual_mirror,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MaterialActionEvaluator {
    weights: MaterialWeights,
}

impl MaterialActionEvaluator {
    #[must_use]
    pub fn new(weights: MaterialWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &MaterialWeights {
        &self.weights
    }
}

impl ActionEvaluator for MaterialActionEvaluator {
    fn evaluate_action(&self, analysis: &ActionAnalysis) -> f32 {
        let me = analysis.player();
        let opponent = me.opponent();
        let w = &self.weights;

        if analysis.destroys_royal_of(opponent) {
            return w.win;
        }
        if analysis.destroys_royal_of(me) {
            return -w.win;
        }

        let gained: f32 = analysis
            .destroyed_of(opponent)
            .map(|p| w.piece_value(p.kind()))
            .sum();
        let lost: f32 = analysis
            .destroyed_of(me)
            .map(|p| w.piece_value(p.kind()))
            .sum();
        let mut score = gained - lost * w.own_loss_factor;
        if analysis.royal_exposed() {
            score -= w.exposure_penalty;
        }
        score
    }
}
