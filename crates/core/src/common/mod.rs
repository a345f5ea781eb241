//! Common types shared by every predictor in the crate.
//!
//! This module provides:
//! 1. **Outcome:** The two-valued branch direction used for predictions and training.
//! 2. **Error Handling:** Configuration errors surfaced when building a predictor.

/// Error types for predictor construction and engine initialisation.
pub mod error;

/// Branch outcome (taken / not taken).
pub mod outcome;

pub use self::error::ConfigError;
pub use self::outcome::Outcome;
