//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait that every direction
//! predictor implements, and the [`Prediction`] record that carries lookup
//! state from `predict_branch` to the paired `update_branch`.

use super::tage::TageLookup;
use crate::common::Outcome;

/// Result of a direction lookup.
///
/// The record is handed back to `update_branch` for the same branch, so the
/// predictor never has to remember anything between the two calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Prediction {
    /// Address of the branch this prediction was made for.
    pub pc: u32,
    /// Predicted direction.
    pub direction: Outcome,
    /// Variant-specific lookup state.
    pub detail: PredictionDetail,
}

impl Prediction {
    /// A prediction with no lookup state attached.
    pub const fn plain(pc: u32, direction: Outcome) -> Self {
        Self {
            pc,
            direction,
            detail: PredictionDetail::None,
        }
    }

    /// Shorthand for `self.direction.is_taken()`.
    pub const fn is_taken(&self) -> bool {
        self.direction.is_taken()
    }

    /// Whether this record was produced for `pc`.
    #[inline(always)]
    pub const fn is_for(&self, pc: u32) -> bool {
        self.pc == pc
    }
}

/// Lookup state recorded by `predict_branch`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PredictionDetail {
    /// Nothing beyond the direction (Static, GShare).
    None,
    /// Both Tournament sub-predictions.
    Tournament {
        /// Global sub-predictor direction.
        global: Outcome,
        /// Local sub-predictor direction.
        local: Outcome,
    },
    /// Provider/alternate bookkeeping of the tagged predictor.
    Tagged(TageLookup),
}

/// Trait for branch direction predictors.
pub trait BranchPredictor {
    /// Predicts the direction of the conditional branch at `pc`.
    ///
    /// Lookups never mutate predictor state: calling this repeatedly without
    /// an intervening update returns the same prediction.
    fn predict_branch(&self, pc: u32) -> Prediction;

    /// Trains the predictor with the resolved `outcome` of the branch at `pc`.
    ///
    /// `prediction` must be the value returned by the immediately preceding
    /// `predict_branch(pc)`. A record made for a different PC is ignored and
    /// the lookup is redone against current state.
    fn update_branch(&mut self, pc: u32, outcome: Outcome, prediction: &Prediction);
}
