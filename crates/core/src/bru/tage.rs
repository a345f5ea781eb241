//! TAGE (Tagged Geometric History Length) Branch Predictor.
//!
//! TAGE uses a base bimodal predictor and several tagged tables indexed with
//! increasingly long slices of global history. It provides high accuracy by
//! matching long history patterns while falling back to shorter histories
//! or the base predictor when necessary.
//!
//! # Lookup
//!
//! Tables are scanned from shortest to longest history. The last table whose
//! entry tag matches is the *provider*; the match before it (or the base
//! table) supplies the *alternate* prediction. A provider whose counter is in
//! one of its two weakest states, or any provider while `use_alt_on_na` is
//! negative, defers to the alternate.
//!
//! # Update
//!
//! - Without a provider only the base counter trains.
//! - With a provider its counter trains, and its useful bit is set when it was
//!   right and the alternate was wrong. `use_alt_on_na` steps down when the
//!   alternate was returned and up when the provider was trusted.
//! - On a misprediction not made by the longest table, the first entry with a
//!   clear useful bit in a longer table than the provider is reallocated. When
//!   every candidate is useful the aging clock advances instead; when it
//!   saturates every useful bit is cleared.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `predict()`: O(T) where T is the number of tagged tables (typically 4)
//!   - `update()`: O(T), plus O(T × 2^N) on the rare aging pass
//! - **Space Complexity:** O(2^B + T × 2^N) for a `2^B` base table and `2^N` entries per tagged table

use tracing::{debug, trace};

use super::counter::{ThreeBitCounter, TwoBitCounter};
use super::history::HistoryRegister;
use super::table::PredictionTable;
use super::{BranchPredictor, Prediction, PredictionDetail};
use crate::common::{ConfigError, Outcome};
use crate::config::{MAX_TAGGED_TABLES, TageConfig};

/// Width of a tagged-entry tag.
pub const TAG_BITS: usize = 8;

/// An entry in a tagged table.
///
/// A cold entry carries tag 0, so it is indistinguishable from an entry
/// allocated for a (PC, history) pair whose tag folds to 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaggedEntry {
    /// Partial tag identifying the (PC, history) pair that owns the entry.
    pub tag: u8,
    /// 3-bit direction counter.
    pub counter: ThreeBitCounter,
    /// Set when the entry overrode a wrong alternate prediction since the last aging pass.
    pub useful: bool,
}

/// Provider/alternate bookkeeping from one lookup.
///
/// Produced by `predict_branch` and consumed by the paired `update_branch`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TageLookup {
    /// Tagged table that provided the prediction, if any.
    pub provider: Option<usize>,
    /// Tagged table that supplied the alternate prediction; `None` means the base table.
    pub alt: Option<usize>,
    /// The provider's own direction (the base direction when there is no provider).
    pub provider_direction: Outcome,
    /// The alternate direction.
    pub alt_direction: Outcome,
    /// Whether the final prediction came from the alternate.
    pub used_alt: bool,
    /// Per-table slot computed for this PC and history.
    pub indices: [usize; MAX_TAGGED_TABLES],
    /// Per-table tag computed for this PC and history.
    pub tags: [u8; MAX_TAGGED_TABLES],
}

impl TageLookup {
    /// The direction actually predicted.
    pub const fn direction(&self) -> Outcome {
        if self.used_alt {
            self.alt_direction
        } else {
            self.provider_direction
        }
    }
}

/// XOR-folds the low `len` bits of `value` into `width`-bit chunks.
#[inline(always)]
const fn fold(value: u64, len: usize, width: usize) -> u64 {
    let mask = (1u64 << width) - 1;
    let mut value = if len >= 64 { value } else { value & ((1u64 << len) - 1) };
    let mut folded = 0;
    while value != 0 {
        folded ^= value & mask;
        value >>= width;
    }
    folded
}

/// TAGE Predictor structure.
#[derive(Clone, Debug)]
pub struct TagePredictor {
    /// Global History Register, as wide as the longest table's history.
    ghr: HistoryRegister,

    /// Base bimodal predictor table.
    base: PredictionTable<TwoBitCounter>,
    /// Tagged component tables, shortest history first.
    tables: Vec<PredictionTable<TaggedEntry>>,

    /// History length for each tagged table.
    hist_lengths: Vec<usize>,
    /// Index width of each tagged table.
    table_bits: usize,

    /// Signed bias toward the alternate prediction; negative means trust the alternate.
    use_alt_on_na: i8,

    /// Aging clock; an aging pass runs when it reaches `clock_max`.
    clock: u32,
    /// Saturation value of the aging clock.
    clock_max: u32,
    /// Number of aging passes performed.
    aging_passes: u64,
}

impl TagePredictor {
    /// Creates a new TAGE Predictor based on configuration.
    ///
    /// # Errors
    ///
    /// Fails if the configuration does not pass [`TageConfig::validate`].
    pub fn new(config: &TageConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let longest = config.history_lengths.iter().copied().max().unwrap_or(1);
        let tables = config
            .history_lengths
            .iter()
            .map(|_| PredictionTable::new(config.table_bits, TaggedEntry::default()))
            .collect();

        debug!(
            base_bits = config.base_bits,
            table_bits = config.table_bits,
            history_lengths = ?config.history_lengths,
            "tage predictor"
        );

        Ok(Self {
            ghr: HistoryRegister::new(longest),
            base: PredictionTable::new(config.base_bits, TwoBitCounter::WEAK_NOT_TAKEN),
            tables,
            hist_lengths: config.history_lengths.clone(),
            table_bits: config.table_bits,
            use_alt_on_na: 0,
            clock: 0,
            clock_max: (1u32 << config.aging_clock_bits) - 1,
            aging_passes: 0,
        })
    }

    /// Number of tagged tables.
    pub fn num_tables(&self) -> usize {
        self.tables.len()
    }

    /// History length of tagged table `table`.
    pub fn history_length(&self, table: usize) -> usize {
        self.hist_lengths[table]
    }

    /// Current global history.
    pub const fn history(&self) -> u64 {
        self.ghr.value()
    }

    /// Current alternate-prediction bias.
    pub const fn use_alt_on_na(&self) -> i8 {
        self.use_alt_on_na
    }

    /// Current aging clock value.
    pub const fn aging_clock(&self) -> u32 {
        self.clock
    }

    /// Value at which the aging clock triggers an aging pass.
    pub const fn aging_clock_max(&self) -> u32 {
        self.clock_max
    }

    /// Number of aging passes performed so far.
    pub const fn aging_passes(&self) -> u64 {
        self.aging_passes
    }

    /// Base table counter for `pc`.
    pub fn base_counter(&self, pc: u32) -> TwoBitCounter {
        *self.base.get(pc as u64)
    }

    /// Entry stored at `index` of tagged table `table`.
    pub fn entry(&self, table: usize, index: usize) -> TaggedEntry {
        *self.tables[table].get(index as u64)
    }

    /// Iterates over every entry of tagged table `table`.
    pub fn entries(&self, table: usize) -> impl Iterator<Item = &TaggedEntry> {
        self.tables[table].iter()
    }

    /// Calculates the slot of `pc` in tagged table `table` under the current history.
    ///
    /// The history is first truncated to the table's length, then folded into
    /// the index width and XORed with the folded PC.
    pub fn index(&self, pc: u32, table: usize) -> usize {
        let len = self.hist_lengths[table];
        let h = fold(self.ghr.recent(len), len, self.table_bits);
        let p = fold(pc as u64, 32, self.table_bits);
        self.tables[table].slot(p ^ h ^ table as u64)
    }

    /// Calculates the tag of `pc` in tagged table `table` under the current history.
    ///
    /// Two folds of the truncated history (8 and 7 bits wide) are combined
    /// with the low PC bits.
    pub fn tag(&self, pc: u32, table: usize) -> u8 {
        let len = self.hist_lengths[table];
        let h = self.ghr.recent(len);
        let t = (pc as u64) ^ fold(h, len, TAG_BITS) ^ (fold(h, len, TAG_BITS - 1) << 1);
        (t & 0xFF) as u8
    }

    /// Scans every tagged table for `pc` and resolves provider and alternate.
    pub fn lookup(&self, pc: u32) -> TageLookup {
        let base_direction = self.base.get(pc as u64).direction();

        let mut indices = [0; MAX_TAGGED_TABLES];
        let mut tags = [0; MAX_TAGGED_TABLES];
        let mut provider = None;
        let mut alt = None;

        for t in 0..self.tables.len() {
            indices[t] = self.index(pc, t);
            tags[t] = self.tag(pc, t);
            if self.tables[t].get(indices[t] as u64).tag == tags[t] {
                alt = provider;
                provider = Some(t);
            }
        }

        let alt_direction = alt.map_or(base_direction, |a| {
            self.tables[a].get(indices[a] as u64).counter.direction()
        });

        let (provider_direction, used_alt) = match provider {
            Some(p) => {
                let ctr = self.tables[p].get(indices[p] as u64).counter;
                (ctr.direction(), ctr.is_weak() || self.use_alt_on_na < 0)
            }
            None => (base_direction, false),
        };

        TageLookup {
            provider,
            alt,
            provider_direction,
            alt_direction,
            used_alt,
            indices,
            tags,
        }
    }

    /// Clears the useful bit of every tagged entry, leaving tags and counters intact.
    pub fn age_useful_bits(&mut self) {
        for table in &mut self.tables {
            for entry in table.iter_mut() {
                entry.useful = false;
            }
        }
        self.clock = 0;
        self.aging_passes += 1;
        trace!(passes = self.aging_passes, "tage aging pass");
    }

    /// Claims one entry in a table longer than the provider, or advances the
    /// aging clock when every candidate is useful.
    fn allocate(&mut self, lookup: &TageLookup, outcome: Outcome) {
        let start = lookup.provider.map_or(0, |p| p + 1);

        for t in start..self.tables.len() {
            let entry = self.tables[t].get_mut(lookup.indices[t] as u64);
            if !entry.useful {
                *entry = TaggedEntry {
                    tag: lookup.tags[t],
                    counter: ThreeBitCounter::weak(outcome),
                    useful: false,
                };
                self.clock = self.clock.saturating_sub(1);
                trace!(table = t, index = lookup.indices[t], tag = lookup.tags[t], "tage allocate");
                return;
            }
        }

        self.clock += 1;
        if self.clock >= self.clock_max {
            self.age_useful_bits();
        }
    }
}

impl BranchPredictor for TagePredictor {
    /// Predicts from the longest matching tagged table, the alternate, or the
    /// base table.
    fn predict_branch(&self, pc: u32) -> Prediction {
        let lookup = self.lookup(pc);
        Prediction {
            pc,
            direction: lookup.direction(),
            detail: PredictionDetail::Tagged(lookup),
        }
    }

    /// Trains the provider (or base), adjusts the alternate bias, allocates on
    /// a misprediction, then shifts the outcome into the global history.
    fn update_branch(&mut self, pc: u32, outcome: Outcome, prediction: &Prediction) {
        let lookup = match prediction.detail {
            PredictionDetail::Tagged(lookup) if prediction.is_for(pc) => lookup,
            _ => self.lookup(pc),
        };
        let mispredicted = lookup.direction() != outcome;

        match lookup.provider {
            None => self.base.get_mut(pc as u64).update(outcome),
            Some(p) => {
                self.use_alt_on_na = if lookup.used_alt {
                    self.use_alt_on_na.saturating_sub(1)
                } else {
                    self.use_alt_on_na.saturating_add(1)
                };

                let entry = self.tables[p].get_mut(lookup.indices[p] as u64);
                entry.counter.update(outcome);
                if lookup.provider_direction == outcome && lookup.alt_direction != outcome {
                    entry.useful = true;
                }
            }
        }

        let longest = self.tables.len() - 1;
        if mispredicted && lookup.provider != Some(longest) {
            self.allocate(&lookup, outcome);
        }

        self.ghr.push(outcome);
    }
}
