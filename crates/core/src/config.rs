//! Configuration system for the predictor engine.
//!
//! This module defines the configuration structures used to select and size a
//! predictor. It provides:
//! 1. **Defaults:** Baseline table sizes and history lengths for every variant.
//! 2. **Structures:** The root [`Config`] and the nested [`TageConfig`].
//! 3. **Enums:** [`PredictorKind`], the predictor variant selector.
//! 4. **Validation:** [`Config::validate`], run before any table is allocated.
//!
//! Configuration is usually deserialized from JSON by the trace driver, or built
//! with one of the `Config::gshare` / `Config::tournament` / `Config::tagged`
//! constructors.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants.
///
/// These values define the baseline predictor sizes when a field is not
/// explicitly provided.
mod defaults {
    /// Default GShare global history length (8K-entry table).
    pub const GSHARE_GHISTORY_BITS: usize = 13;

    /// Default Tournament global history length (512-entry global and choice tables).
    pub const TOURNAMENT_GHISTORY_BITS: usize = 9;

    /// Default Tournament local history length (1K-entry local prediction table).
    pub const LHISTORY_BITS: usize = 10;

    /// Default number of PC bits selecting a local history slot (1K slots).
    pub const PC_INDEX_BITS: usize = 10;

    /// Default base bimodal table size (log2, 4K entries).
    pub const TAGE_BASE_BITS: usize = 12;

    /// Default tagged table size (log2, 1K entries per table).
    pub const TAGE_TABLE_BITS: usize = 10;

    /// Default history lengths of the four tagged tables.
    pub const TAGE_HISTORY_LENGTHS: [usize; 4] = [8, 16, 32, 64];

    /// Default aging clock width (aging pass every 255 failed allocations).
    pub const TAGE_AGING_CLOCK_BITS: usize = 8;
}

/// Widest table index or history register for GShare and Tournament.
pub const MAX_INDEX_BITS: usize = 32;

/// Longest history a single tagged table can be keyed on.
pub const MAX_TAGGED_HISTORY: usize = 64;

/// Largest number of tagged tables.
pub const MAX_TAGGED_TABLES: usize = 8;

/// Widest aging clock.
pub const MAX_AGING_CLOCK_BITS: usize = 16;

/// Branch predictor variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum PredictorKind {
    /// Always predicts taken; never trains.
    #[default]
    Static,
    /// Global history XOR PC into one table of 2-bit counters.
    #[serde(alias = "Gshare", alias = "gshare")]
    GShare,
    /// Local and global sub-predictors arbitrated by a learned selector.
    #[serde(alias = "tournament")]
    Tournament,
    /// Base bimodal table plus tagged tables over geometric history lengths.
    #[serde(alias = "Tage", alias = "TAGE", alias = "tagged", alias = "Custom")]
    Tagged,
}

impl PredictorKind {
    /// Human-readable name used in report headers.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Static => "Static",
            Self::GShare => "Gshare",
            Self::Tournament => "Tournament",
            Self::Tagged => "Tagged",
        }
    }
}

impl fmt::Display for PredictorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PredictorKind {
    type Err = ConfigError;

    /// Parses a variant name, ignoring case. `tage` and `custom` select the
    /// tagged predictor.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "gshare" => Ok(Self::GShare),
            "tournament" => Ok(Self::Tournament),
            "tagged" | "tage" | "custom" => Ok(Self::Tagged),
            _ => Err(ConfigError::UnknownVariant(s.to_string())),
        }
    }
}

/// Root configuration for one predictor instance.
///
/// # Examples
///
/// ```
/// use bpsim_core::config::{Config, PredictorKind};
///
/// let json = r#"{ "predictor": "Tournament", "ghistory_bits": 9 }"#;
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.predictor, PredictorKind::Tournament);
/// assert_eq!(config.lhistory_bits, 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Which predictor to build.
    #[serde(default)]
    pub predictor: PredictorKind,

    /// Global history length; also log2 of the global table size.
    #[serde(default = "Config::default_ghistory_bits")]
    pub ghistory_bits: usize,

    /// Local history length; also log2 of the local prediction table (Tournament only).
    #[serde(default = "Config::default_lhistory_bits")]
    pub lhistory_bits: usize,

    /// PC bits selecting a local history slot (Tournament only).
    #[serde(default = "Config::default_pc_index_bits")]
    pub pc_index_bits: usize,

    /// Tagged predictor parameters (Tagged only).
    #[serde(default)]
    pub tage: TageConfig,
}

impl Config {
    fn default_ghistory_bits() -> usize {
        defaults::GSHARE_GHISTORY_BITS
    }

    fn default_lhistory_bits() -> usize {
        defaults::LHISTORY_BITS
    }

    fn default_pc_index_bits() -> usize {
        defaults::PC_INDEX_BITS
    }

    /// The always-taken baseline.
    pub fn static_taken() -> Self {
        Self::default()
    }

    /// A GShare predictor with `ghistory_bits` of global history.
    pub fn gshare(ghistory_bits: usize) -> Self {
        Self {
            predictor: PredictorKind::GShare,
            ghistory_bits,
            ..Self::default()
        }
    }

    /// A Tournament predictor.
    pub fn tournament(ghistory_bits: usize, lhistory_bits: usize, pc_index_bits: usize) -> Self {
        Self {
            predictor: PredictorKind::Tournament,
            ghistory_bits,
            lhistory_bits,
            pc_index_bits,
            tage: TageConfig::default(),
        }
    }

    /// The default Tournament geometry (9 global, 10 local, 10 PC bits).
    pub fn tournament_default() -> Self {
        Self::tournament(
            defaults::TOURNAMENT_GHISTORY_BITS,
            defaults::LHISTORY_BITS,
            defaults::PC_INDEX_BITS,
        )
    }

    /// A tagged multi-table predictor.
    pub fn tagged(tage: TageConfig) -> Self {
        Self {
            predictor: PredictorKind::Tagged,
            tage,
            ..Self::default()
        }
    }

    /// Checks every field the selected variant reads.
    ///
    /// Fields belonging to other variants are ignored, so a GShare config with
    /// `pc_index_bits = 0` is still valid.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.predictor {
            PredictorKind::Static => Ok(()),
            PredictorKind::GShare => check_width("ghistory_bits", self.ghistory_bits, MAX_INDEX_BITS),
            PredictorKind::Tournament => {
                check_width("ghistory_bits", self.ghistory_bits, MAX_INDEX_BITS)?;
                check_width("lhistory_bits", self.lhistory_bits, MAX_INDEX_BITS)?;
                check_width("pc_index_bits", self.pc_index_bits, MAX_INDEX_BITS)
            }
            PredictorKind::Tagged => self.tage.validate(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            predictor: PredictorKind::default(),
            ghistory_bits: defaults::GSHARE_GHISTORY_BITS,
            lhistory_bits: defaults::LHISTORY_BITS,
            pc_index_bits: defaults::PC_INDEX_BITS,
            tage: TageConfig::default(),
        }
    }
}

/// Tagged multi-table predictor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TageConfig {
    /// Base bimodal table size (log2).
    #[serde(default = "TageConfig::default_base_bits")]
    pub base_bits: usize,

    /// Entries per tagged table (log2).
    #[serde(default = "TageConfig::default_table_bits")]
    pub table_bits: usize,

    /// History length of each tagged table, shortest first.
    #[serde(default = "TageConfig::default_history_lengths")]
    pub history_lengths: Vec<usize>,

    /// Width of the aging clock; an aging pass runs when it saturates.
    #[serde(default = "TageConfig::default_aging_clock_bits")]
    pub aging_clock_bits: usize,
}

impl TageConfig {
    fn default_base_bits() -> usize {
        defaults::TAGE_BASE_BITS
    }

    fn default_table_bits() -> usize {
        defaults::TAGE_TABLE_BITS
    }

    fn default_history_lengths() -> Vec<usize> {
        defaults::TAGE_HISTORY_LENGTHS.to_vec()
    }

    fn default_aging_clock_bits() -> usize {
        defaults::TAGE_AGING_CLOCK_BITS
    }

    /// Validates table sizes and the history length ladder.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_width("tage.base_bits", self.base_bits, MAX_INDEX_BITS)?;
        check_width("tage.table_bits", self.table_bits, MAX_INDEX_BITS)?;
        check_width(
            "tage.aging_clock_bits",
            self.aging_clock_bits,
            MAX_AGING_CLOCK_BITS,
        )?;

        if self.history_lengths.is_empty() {
            return Err(ConfigError::NoHistoryLengths);
        }
        if self.history_lengths.len() > MAX_TAGGED_TABLES {
            return Err(ConfigError::TooManyTables {
                count: self.history_lengths.len(),
                max: MAX_TAGGED_TABLES,
            });
        }
        for &len in &self.history_lengths {
            check_width("tage.history_lengths", len, MAX_TAGGED_HISTORY)?;
        }
        if let Some(pos) = self.history_lengths.windows(2).position(|w| w[1] <= w[0]) {
            return Err(ConfigError::HistoryLengthsNotIncreasing { index: pos + 1 });
        }
        Ok(())
    }
}

impl Default for TageConfig {
    fn default() -> Self {
        Self {
            base_bits: defaults::TAGE_BASE_BITS,
            table_bits: defaults::TAGE_TABLE_BITS,
            history_lengths: defaults::TAGE_HISTORY_LENGTHS.to_vec(),
            aging_clock_bits: defaults::TAGE_AGING_CLOCK_BITS,
        }
    }
}

pub(crate) fn check_width(field: &'static str, bits: usize, max: usize) -> Result<(), ConfigError> {
    if bits == 0 {
        Err(ConfigError::ZeroWidth { field })
    } else if bits > max {
        Err(ConfigError::WidthTooLarge { field, bits, max })
    } else {
        Ok(())
    }
}
