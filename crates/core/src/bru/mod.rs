//! Branch prediction unit (BRU) implementations.
//!
//! This module contains the direction predictors (static, gshare, tournament
//! and TAGE) along with the primitives they are built from: saturating
//! counters, history registers and masked prediction tables.

pub use self::branch_predictor::{BranchPredictor, Prediction, PredictionDetail};

/// Branch predictor trait and the prediction record.
pub mod branch_predictor;

/// Saturating confidence counters.
pub mod counter;

/// Global history branch predictor (gshare algorithm).
pub mod gshare;

/// Outcome shift registers.
pub mod history;

/// Static branch predictor (always taken).
pub mod static_bp;

/// Power-of-two tables addressed by masked hashes.
pub mod table;

/// Tagged Geometric History Length branch predictor.
pub mod tage;

/// Tournament branch predictor (combines local and global predictors).
pub mod tournament;

use self::{
    gshare::GSharePredictor, static_bp::StaticPredictor, tage::TagePredictor,
    tournament::TournamentPredictor,
};
use crate::common::{ConfigError, Outcome};
use crate::config::{Config, PredictorKind};

/// Enum wrapper for static dispatch of branch predictors.
///
/// Each variant owns only the state its algorithm needs, and independent
/// instances never share tables.
#[derive(Clone, Debug)]
pub enum Predictor {
    /// Always taken.
    Static(StaticPredictor),
    /// Global history XOR PC.
    GShare(GSharePredictor),
    /// Local/global hybrid.
    Tournament(TournamentPredictor),
    /// Tagged geometric history.
    Tagged(TagePredictor),
}

impl Predictor {
    /// Validates `config` and allocates the selected predictor.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`Config::validate`]; no tables
    /// are allocated in that case.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(match config.predictor {
            PredictorKind::Static => Self::Static(StaticPredictor::new()),
            PredictorKind::GShare => Self::GShare(GSharePredictor::new(config.ghistory_bits)?),
            PredictorKind::Tournament => Self::Tournament(TournamentPredictor::new(
                config.ghistory_bits,
                config.lhistory_bits,
                config.pc_index_bits,
            )?),
            PredictorKind::Tagged => Self::Tagged(TagePredictor::new(&config.tage)?),
        })
    }

    /// Which variant this is.
    pub const fn kind(&self) -> PredictorKind {
        match self {
            Self::Static(_) => PredictorKind::Static,
            Self::GShare(_) => PredictorKind::GShare,
            Self::Tournament(_) => PredictorKind::Tournament,
            Self::Tagged(_) => PredictorKind::Tagged,
        }
    }
}

impl BranchPredictor for Predictor {
    #[inline(always)]
    fn predict_branch(&self, pc: u32) -> Prediction {
        match self {
            Self::Static(bp) => bp.predict_branch(pc),
            Self::GShare(bp) => bp.predict_branch(pc),
            Self::Tournament(bp) => bp.predict_branch(pc),
            Self::Tagged(bp) => bp.predict_branch(pc),
        }
    }

    #[inline(always)]
    fn update_branch(&mut self, pc: u32, outcome: Outcome, prediction: &Prediction) {
        match self {
            Self::Static(bp) => bp.update_branch(pc, outcome, prediction),
            Self::GShare(bp) => bp.update_branch(pc, outcome, prediction),
            Self::Tournament(bp) => bp.update_branch(pc, outcome, prediction),
            Self::Tagged(bp) => bp.update_branch(pc, outcome, prediction),
        }
    }
}
