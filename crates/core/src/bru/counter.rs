//! Saturating Counter.
//!
//! The confidence primitive used by every table in the crate. A counter of
//! `BITS` width holds a value in `0..=2^BITS - 1`, moves one step toward the
//! observed outcome on each update, and clamps at either end instead of
//! wrapping. The high bit is the predicted direction.
//!
//! For 2-bit counters the four states are, in numeric order:
//! Strong-Not-Taken (0), Weak-Not-Taken (1), Weak-Taken (2), Strong-Taken (3).

use std::fmt;

use crate::common::Outcome;

/// An unsigned saturating counter `BITS` wide (1 to 7 bits).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SaturatingCounter<const BITS: u32> {
    value: u8,
}

/// 2-bit counter used by bimodal, GShare, Tournament and selector tables.
pub type TwoBitCounter = SaturatingCounter<2>;

/// 3-bit counter carried by tagged-table entries.
pub type ThreeBitCounter = SaturatingCounter<3>;

impl<const BITS: u32> SaturatingCounter<BITS> {
    const WIDTH_OK: () = assert!(BITS >= 1 && BITS <= 7, "counter width must be 1..=7 bits");

    /// Largest representable value.
    pub const MAX: u8 = ((1u16 << BITS) - 1) as u8;

    /// Smallest representable value.
    pub const MIN: u8 = 0;

    /// Highest value that still predicts not-taken.
    const THRESHOLD: u8 = Self::MAX / 2;

    /// Creates a counter holding `value`, clamped to `MIN..=MAX`.
    pub const fn new(value: u8) -> Self {
        let () = Self::WIDTH_OK;
        let value = if value > Self::MAX { Self::MAX } else { value };
        Self { value }
    }

    /// The weakest not-taken state (just below the direction threshold).
    pub const fn weak_not_taken() -> Self {
        Self::new(Self::THRESHOLD)
    }

    /// The weakest taken state (just above the direction threshold).
    pub const fn weak_taken() -> Self {
        Self::new(Self::THRESHOLD + 1)
    }

    /// The weak state leaning toward `outcome`.
    pub const fn weak(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Taken => Self::weak_taken(),
            Outcome::NotTaken => Self::weak_not_taken(),
        }
    }

    /// Raw counter value.
    #[inline(always)]
    pub const fn value(self) -> u8 {
        self.value
    }

    /// Predicted direction: taken when the high bit is set.
    #[inline(always)]
    pub const fn direction(self) -> Outcome {
        if self.value > Self::THRESHOLD {
            Outcome::Taken
        } else {
            Outcome::NotTaken
        }
    }

    /// Whether the counter sits in one of the two states adjacent to the
    /// direction threshold.
    #[inline(always)]
    pub const fn is_weak(self) -> bool {
        self.value == Self::THRESHOLD || self.value == Self::THRESHOLD + 1
    }

    /// Whether the counter is pinned at either bound.
    pub const fn is_saturated(self) -> bool {
        self.value == Self::MIN || self.value == Self::MAX
    }

    /// Steps toward `MAX`, clamping.
    #[inline(always)]
    pub const fn increment(&mut self) {
        if self.value < Self::MAX {
            self.value += 1;
        }
    }

    /// Steps toward `MIN`, clamping.
    #[inline(always)]
    pub const fn decrement(&mut self) {
        if self.value > Self::MIN {
            self.value -= 1;
        }
    }

    /// Moves one step toward `outcome`.
    #[inline(always)]
    pub const fn update(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Taken => self.increment(),
            Outcome::NotTaken => self.decrement(),
        }
    }
}

impl TwoBitCounter {
    /// State 0.
    pub const STRONG_NOT_TAKEN: Self = Self::new(0);
    /// State 1.
    pub const WEAK_NOT_TAKEN: Self = Self::new(1);
    /// State 2.
    pub const WEAK_TAKEN: Self = Self::new(2);
    /// State 3.
    pub const STRONG_TAKEN: Self = Self::new(3);
}

impl<const BITS: u32> Default for SaturatingCounter<BITS> {
    fn default() -> Self {
        Self::weak_not_taken()
    }
}

impl<const BITS: u32> fmt::Debug for SaturatingCounter<BITS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ctr{BITS}({}/{})", self.value, Self::MAX)
    }
}
