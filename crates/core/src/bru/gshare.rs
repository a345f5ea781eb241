//! GShare Branch Predictor.
//!
//! GShare correlates global branch history with the program counter using an XOR
//! hash. This allows the predictor to distinguish the same branch instruction
//! in different execution contexts.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `predict()`: O(1)
//!   - `update()`: O(1)
//! - **Space Complexity:** O(2^N) where N is the history length (13 bits = 8K 2-bit counters)
//! - **Best Case:** Correlated branches where outcome depends on recent history
//! - **Worst Case:** Uncorrelated branches or history length too short/long for pattern

use tracing::debug;

use super::counter::TwoBitCounter;
use super::history::HistoryRegister;
use super::table::PredictionTable;
use super::{BranchPredictor, Prediction};
use crate::common::{ConfigError, Outcome};
use crate::config::{MAX_INDEX_BITS, check_width};

/// GShare Predictor structure.
#[derive(Clone, Debug)]
pub struct GSharePredictor {
    /// Global History Register storing recent branch outcomes.
    ghr: HistoryRegister,
    /// Pattern History Table containing 2-bit saturating counters.
    pht: PredictionTable<TwoBitCounter>,
}

impl GSharePredictor {
    /// Creates a GShare predictor with `ghistory_bits` of history and a
    /// `2^ghistory_bits` entry table, every counter Weak-Not-Taken.
    ///
    /// # Errors
    ///
    /// Fails if `ghistory_bits` is zero or wider than 32 bits.
    pub fn new(ghistory_bits: usize) -> Result<Self, ConfigError> {
        check_width("ghistory_bits", ghistory_bits, MAX_INDEX_BITS)?;
        debug!(ghistory_bits, entries = 1usize << ghistory_bits, "gshare predictor");
        Ok(Self {
            ghr: HistoryRegister::new(ghistory_bits),
            pht: PredictionTable::new(ghistory_bits, TwoBitCounter::WEAK_NOT_TAKEN),
        })
    }

    /// Calculates the index into the Pattern History Table.
    ///
    /// Both the PC and the history are masked to the table width before the XOR.
    #[inline(always)]
    pub const fn index(&self, pc: u32) -> usize {
        let mask = self.pht.mask() as u64;
        ((pc as u64 & mask) ^ (self.ghr.value() & mask)) as usize
    }

    /// Current global history.
    pub const fn history(&self) -> u64 {
        self.ghr.value()
    }

    /// Counter stored at `index` (masked to the table size).
    pub fn counter(&self, index: usize) -> TwoBitCounter {
        *self.pht.get(index as u64)
    }
}

impl BranchPredictor for GSharePredictor {
    /// Returns taken if the counter at the hashed index is Weak-Taken or stronger.
    fn predict_branch(&self, pc: u32) -> Prediction {
        let counter = self.pht.get(self.index(pc) as u64);
        Prediction::plain(pc, counter.direction())
    }

    /// Updates the 2-bit saturating counter in the PHT and shifts the new
    /// outcome into the Global History Register.
    fn update_branch(&mut self, pc: u32, outcome: Outcome, _prediction: &Prediction) {
        let idx = self.index(pc) as u64;
        self.pht.get_mut(idx).update(outcome);
        self.ghr.push(outcome);
    }
}
