//! Branch outcome definition.
//!
//! Branches resolve to exactly one of two directions. Every predictor in the
//! crate produces an [`Outcome`] from `predict` and consumes one in `train`.

use std::fmt;
use std::ops::Not;

use serde::Deserialize;

/// Direction a conditional branch resolved to (or is predicted to resolve to).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum Outcome {
    /// Branch falls through to the next sequential instruction.
    #[default]
    #[serde(alias = "N")]
    NotTaken,
    /// Branch jumps to its target.
    #[serde(alias = "T")]
    Taken,
}

impl Outcome {
    /// Returns `true` for [`Outcome::Taken`].
    #[inline(always)]
    pub const fn is_taken(self) -> bool {
        matches!(self, Self::Taken)
    }

    /// The outcome as the single history bit shifted into history registers.
    #[inline(always)]
    pub const fn bit(self) -> u64 {
        self.is_taken() as u64
    }
}

impl From<bool> for Outcome {
    #[inline(always)]
    fn from(taken: bool) -> Self {
        if taken { Self::Taken } else { Self::NotTaken }
    }
}

impl From<Outcome> for bool {
    #[inline(always)]
    fn from(outcome: Outcome) -> Self {
        outcome.is_taken()
    }
}

impl Not for Outcome {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::Taken => Self::NotTaken,
            Self::NotTaken => Self::Taken,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Taken => write!(f, "T"),
            Self::NotTaken => write!(f, "N"),
        }
    }
}
