//! Branch direction predictor models for trace-driven CPU simulation.
//!
//! This crate implements the prediction side of a branch-prediction study:
//! 1. **Primitives:** Saturating counters, history registers and masked tables.
//! 2. **Predictors:** Static (always taken), GShare, Tournament and a tagged
//!    geometric-history (TAGE-style) predictor.
//! 3. **Engine:** A single init/predict/train entry point over the selected variant.
//! 4. **Configuration:** Serde-deserializable parameters with validation.
//!
//! Trace parsing and accuracy reporting are left to the driver, which calls
//! [`PredictorEngine::predict`] and [`PredictorEngine::train`] once per branch
//! in program order.

/// Branch prediction units (counters, histories, tables, predictors).
pub mod bru;
/// Common types (outcome, errors).
pub mod common;
/// Predictor configuration (variant selection, sizes, defaults).
pub mod config;
/// The init/predict/train entry point.
pub mod engine;

/// Prediction record returned by `predict` and consumed by `train`.
pub use crate::bru::{BranchPredictor, Prediction, PredictionDetail, Predictor};
/// Branch direction and configuration error.
pub use crate::common::{ConfigError, Outcome};
/// Root configuration type and variant selector.
pub use crate::config::{Config, PredictorKind, TageConfig};
/// Caller-facing engine.
pub use crate::engine::PredictorEngine;
