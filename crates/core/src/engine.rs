//! Predictor Engine.
//!
//! The outward-facing contract used by a trace driver:
//! 1. **init:** Validate a [`Config`] and allocate exactly one predictor.
//! 2. **predict:** Look up the direction of the branch at a PC.
//! 3. **train:** Feed the resolved outcome back with the prediction record.
//!
//! An engine that has not been initialised (or whose initialisation failed)
//! predicts not-taken and ignores training. Each such call is logged and
//! counted as a caller error.

use std::cell::Cell;

use tracing::warn;

use crate::bru::{BranchPredictor, Prediction, Predictor};
use crate::common::{ConfigError, Outcome};
use crate::config::{Config, PredictorKind};

/// One predictor instance plus its caller-error bookkeeping.
///
/// # Examples
///
/// ```
/// use bpsim_core::{Config, Outcome, PredictorEngine};
///
/// let mut engine = PredictorEngine::with_config(&Config::gshare(2)).unwrap();
/// let p = engine.predict(0b01);
/// assert_eq!(p.direction, Outcome::NotTaken);
/// engine.train(0b01, Outcome::Taken, &p);
/// ```
#[derive(Debug, Default)]
pub struct PredictorEngine {
    predictor: Option<Predictor>,
    caller_errors: Cell<u64>,
}

impl PredictorEngine {
    /// Creates an engine with no predictor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and initialises an engine in one step.
    ///
    /// # Errors
    ///
    /// See [`PredictorEngine::init`].
    pub fn with_config(config: &Config) -> Result<Self, ConfigError> {
        let mut engine = Self::new();
        engine.init(config)?;
        Ok(engine)
    }

    /// Allocates the predictor selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AlreadyInitialized`] on a second call, or the
    /// validation error for a bad configuration. On error the engine keeps
    /// whatever state it had.
    pub fn init(&mut self, config: &Config) -> Result<(), ConfigError> {
        if self.predictor.is_some() {
            return Err(ConfigError::AlreadyInitialized);
        }
        self.predictor = Some(Predictor::new(config)?);
        Ok(())
    }

    /// The configured variant, if initialised.
    pub fn kind(&self) -> Option<PredictorKind> {
        self.predictor.as_ref().map(Predictor::kind)
    }

    /// The underlying predictor, if initialised.
    pub const fn predictor(&self) -> Option<&Predictor> {
        self.predictor.as_ref()
    }

    /// Number of predict/train calls that violated the calling contract.
    pub fn caller_errors(&self) -> u64 {
        self.caller_errors.get()
    }

    fn flag_caller_error(errors: &Cell<u64>) {
        errors.set(errors.get() + 1);
    }

    /// Predicts the direction of the branch at `pc`.
    ///
    /// Returns not-taken when the engine is not initialised.
    pub fn predict(&self, pc: u32) -> Prediction {
        match &self.predictor {
            Some(bp) => bp.predict_branch(pc),
            None => {
                Self::flag_caller_error(&self.caller_errors);
                warn!(pc, "predict called before init");
                Prediction::plain(pc, Outcome::NotTaken)
            }
        }
    }

    /// Trains with the resolved `outcome` of the branch at `pc`.
    ///
    /// `prediction` must come from the immediately preceding [`predict`](Self::predict)
    /// for the same `pc`. A record for another PC is flagged and the lookup is
    /// recomputed from current state.
    pub fn train(&mut self, pc: u32, outcome: Outcome, prediction: &Prediction) {
        let Some(bp) = self.predictor.as_mut() else {
            Self::flag_caller_error(&self.caller_errors);
            warn!(pc, "train called before init");
            return;
        };
        if !prediction.is_for(pc) {
            Self::flag_caller_error(&self.caller_errors);
            warn!(
                pc,
                predicted_pc = prediction.pc,
                "train called with a prediction for another branch"
            );
        }
        bp.update_branch(pc, outcome, prediction);
    }

    /// Predicts, then trains with `outcome`; returns the prediction.
    pub fn step(&mut self, pc: u32, outcome: Outcome) -> Prediction {
        let prediction = self.predict(pc);
        self.train(pc, outcome, &prediction);
        prediction
    }
}
