//! History Register.
//!
//! A bounded shift register of recent branch outcomes. The newest outcome
//! enters at bit 0; bits older than the register width fall off the top.

use crate::common::Outcome;

/// Mask covering the low `bits` bits of a `u64`.
#[inline(always)]
pub const fn low_mask(bits: usize) -> u64 {
    if bits >= 64 { u64::MAX } else { (1u64 << bits) - 1 }
}

/// Shifts `outcome` into `bits` and truncates to `mask`.
#[inline(always)]
pub const fn shift_in(bits: u64, outcome: Outcome, mask: u64) -> u64 {
    ((bits << 1) | outcome.bit()) & mask
}

/// Global (or per-slot) outcome history of configurable width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryRegister {
    bits: u64,
    mask: u64,
}

impl HistoryRegister {
    /// Creates an all-zero register `width` bits wide (at most 64).
    pub const fn new(width: usize) -> Self {
        Self {
            bits: 0,
            mask: low_mask(width),
        }
    }

    /// Current contents.
    #[inline(always)]
    pub const fn value(&self) -> u64 {
        self.bits
    }

    /// The `len` most recent outcomes (bit 0 is the newest).
    #[inline(always)]
    pub const fn recent(&self, len: usize) -> u64 {
        self.bits & low_mask(len)
    }

    /// Records a resolved outcome.
    #[inline(always)]
    pub const fn push(&mut self, outcome: Outcome) {
        self.bits = shift_in(self.bits, outcome, self.mask);
    }
}
