//! Static Branch Predictor.
//!
//! The always-taken baseline. It holds no state, so training is a no-op.

use super::{BranchPredictor, Prediction};
use crate::common::Outcome;

/// Static Branch Predictor structure.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticPredictor;

impl StaticPredictor {
    /// Creates a new Static Predictor.
    pub const fn new() -> Self {
        Self
    }
}

impl BranchPredictor for StaticPredictor {
    /// Always predicts taken.
    fn predict_branch(&self, pc: u32) -> Prediction {
        Prediction::plain(pc, Outcome::Taken)
    }

    /// Does nothing.
    fn update_branch(&mut self, _pc: u32, _outcome: Outcome, _prediction: &Prediction) {}
}
