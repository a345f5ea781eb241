//! Configuration error definitions.
//!
//! Construction of a predictor is the only fallible operation in the crate.
//! Once tables are allocated, `predict` and `train` cannot fail: every table
//! index is masked to the allocated size before use.

use thiserror::Error;

/// Errors raised while validating a configuration or initialising the engine.
///
/// All variants are fatal for the instance being built: no tables are
/// allocated and the caller must fix the configuration before retrying.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A history or index width was configured as zero bits.
    #[error("`{field}` must be at least 1 bit")]
    ZeroWidth {
        /// Name of the offending configuration field.
        field: &'static str,
    },

    /// A history or index width exceeds the register that stores it.
    #[error("`{field}` is {bits} bits but at most {max} bits are supported")]
    WidthTooLarge {
        /// Name of the offending configuration field.
        field: &'static str,
        /// Configured width.
        bits: usize,
        /// Largest accepted width.
        max: usize,
    },

    /// The predictor variant name was not recognised.
    #[error("unknown predictor variant `{0}`")]
    UnknownVariant(String),

    /// The tagged predictor was configured without any tagged tables.
    #[error("tagged predictor needs at least one history length")]
    NoHistoryLengths,

    /// The tagged predictor was configured with more tables than supported.
    #[error("tagged predictor supports at most {max} tables, got {count}")]
    TooManyTables {
        /// Number of configured history lengths.
        count: usize,
        /// Largest accepted table count.
        max: usize,
    },

    /// Tagged history lengths must grow strictly from one table to the next.
    #[error("history length at position {index} is not longer than the one before it")]
    HistoryLengthsNotIncreasing {
        /// Position of the first non-increasing length.
        index: usize,
    },

    /// `init` was called on an engine that already owns a predictor.
    #[error("predictor engine is already initialised")]
    AlreadyInitialized,
}
