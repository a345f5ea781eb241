//! Tournament Branch Predictor.
//!
//! A hybrid predictor that employs a meta-predictor (the choice table) to select
//! between a Global predictor indexed by global history and a Local predictor
//! indexed by each branch's own history. This allows the predictor to adapt to
//! different types of branch behaviors.
//!
//! The choice table shares the global table's index. Counter values 0 and 1
//! trust the local predictor, 2 and 3 trust the global predictor.

use tracing::debug;

use super::counter::TwoBitCounter;
use super::history::{HistoryRegister, low_mask, shift_in};
use super::table::PredictionTable;
use super::{BranchPredictor, Prediction, PredictionDetail};
use crate::common::{ConfigError, Outcome};
use crate::config::{MAX_INDEX_BITS, check_width};

/// Tournament Predictor structure.
#[derive(Clone, Debug)]
pub struct TournamentPredictor {
    /// Global History Register.
    ghr: HistoryRegister,
    /// Global Pattern History Table (2-bit counters).
    global_pht: PredictionTable<TwoBitCounter>,

    /// Local History Table storing history patterns per branch.
    local_history_table: PredictionTable<u64>,
    /// Mask truncating each local history to `lhistory_bits`.
    local_hist_mask: u64,
    /// Local Pattern History Table indexed by local history patterns.
    local_pht: PredictionTable<TwoBitCounter>,

    /// Choice Prediction Table (2-bit counters).
    choice_pht: PredictionTable<TwoBitCounter>,
}

impl TournamentPredictor {
    /// Creates a new Tournament Predictor.
    ///
    /// # Arguments
    ///
    /// * `ghistory_bits` - Global history length; global and choice tables hold `2^ghistory_bits` entries.
    /// * `lhistory_bits` - Local history length; the local PHT holds `2^lhistory_bits` entries.
    /// * `pc_index_bits` - PC bits selecting one of `2^pc_index_bits` local history slots.
    ///
    /// # Errors
    ///
    /// Fails if any width is zero or wider than 32 bits.
    pub fn new(
        ghistory_bits: usize,
        lhistory_bits: usize,
        pc_index_bits: usize,
    ) -> Result<Self, ConfigError> {
        check_width("ghistory_bits", ghistory_bits, MAX_INDEX_BITS)?;
        check_width("lhistory_bits", lhistory_bits, MAX_INDEX_BITS)?;
        check_width("pc_index_bits", pc_index_bits, MAX_INDEX_BITS)?;
        debug!(
            ghistory_bits,
            lhistory_bits, pc_index_bits, "tournament predictor"
        );

        Ok(Self {
            ghr: HistoryRegister::new(ghistory_bits),
            global_pht: PredictionTable::new(ghistory_bits, TwoBitCounter::WEAK_NOT_TAKEN),

            local_history_table: PredictionTable::new(pc_index_bits, 0),
            local_hist_mask: low_mask(lhistory_bits),
            local_pht: PredictionTable::new(lhistory_bits, TwoBitCounter::WEAK_NOT_TAKEN),

            choice_pht: PredictionTable::new(ghistory_bits, TwoBitCounter::WEAK_NOT_TAKEN),
        })
    }

    /// Global and choice table index for the current history.
    #[inline(always)]
    const fn global_index(&self) -> u64 {
        self.ghr.value()
    }

    /// Retrieves the prediction from the Global component.
    fn global_prediction(&self) -> Outcome {
        self.global_pht.get(self.global_index()).direction()
    }

    /// Retrieves the prediction from the Local component.
    fn local_prediction(&self, pc: u32) -> Outcome {
        let pattern = *self.local_history_table.get(pc as u64);
        self.local_pht.get(pattern).direction()
    }

    /// Current global history.
    pub const fn history(&self) -> u64 {
        self.ghr.value()
    }

    /// Local history recorded for the slot `pc` maps to.
    pub fn local_history(&self, pc: u32) -> u64 {
        *self.local_history_table.get(pc as u64)
    }

    /// Choice counter at `index` (masked to the table size).
    pub fn selector(&self, index: u64) -> TwoBitCounter {
        *self.choice_pht.get(index)
    }

    /// Whether the choice counter at `index` trusts the global predictor.
    pub fn prefers_global(&self, index: u64) -> bool {
        self.selector(index).direction().is_taken()
    }
}

impl BranchPredictor for TournamentPredictor {
    /// Queries both Global and Local predictors and uses the Choice PHT to
    /// decide which prediction to use.
    fn predict_branch(&self, pc: u32) -> Prediction {
        let global = self.global_prediction();
        let local = self.local_prediction(pc);
        let direction = if self.prefers_global(self.global_index()) {
            global
        } else {
            local
        };

        Prediction {
            pc,
            direction,
            detail: PredictionDetail::Tournament { global, local },
        }
    }

    /// Trains the local component, then the global component, then moves the
    /// choice counter toward whichever sub-predictor alone was correct.
    fn update_branch(&mut self, pc: u32, outcome: Outcome, prediction: &Prediction) {
        let (global_pred, local_pred) = match prediction.detail {
            PredictionDetail::Tournament { global, local } if prediction.is_for(pc) => {
                (global, local)
            }
            _ => (self.global_prediction(), self.local_prediction(pc)),
        };
        let g_idx = self.global_index();

        let pattern = *self.local_history_table.get(pc as u64);
        self.local_pht.get_mut(pattern).update(outcome);
        *self.local_history_table.get_mut(pc as u64) =
            shift_in(pattern, outcome, self.local_hist_mask);

        self.global_pht.get_mut(g_idx).update(outcome);
        self.ghr.push(outcome);

        let global_correct = global_pred == outcome;
        let local_correct = local_pred == outcome;
        if global_correct != local_correct {
            let choice = self.choice_pht.get_mut(g_idx);
            if global_correct {
                choice.increment();
            } else {
                choice.decrement();
            }
        }
    }
}
