//! Prediction Table.
//!
//! Fixed-size, power-of-two table allocated once at construction. Lookups take
//! an unmasked hash and reduce it with the table mask, so an index can never
//! fall outside the allocation.

/// A `2^bits`-entry table addressed by masked hashes.
#[derive(Clone, Debug)]
pub struct PredictionTable<T> {
    entries: Vec<T>,
    mask: usize,
}

impl<T: Clone> PredictionTable<T> {
    /// Allocates `2^bits` copies of `init`.
    pub fn new(bits: usize, init: T) -> Self {
        let size = 1usize << bits;
        Self {
            entries: vec![init; size],
            mask: size - 1,
        }
    }
}

impl<T> PredictionTable<T> {
    /// Reduces a raw hash to a valid slot.
    #[inline(always)]
    pub const fn slot(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    /// Entry for `hash`.
    #[inline(always)]
    pub fn get(&self, hash: u64) -> &T {
        let slot = self.slot(hash);
        debug_assert!(slot < self.entries.len());
        &self.entries[slot]
    }

    /// Mutable entry for `hash`.
    #[inline(always)]
    pub fn get_mut(&mut self, hash: u64) -> &mut T {
        let slot = self.slot(hash);
        debug_assert!(slot < self.entries.len());
        &mut self.entries[slot]
    }

    /// Index mask (`len - 1`).
    pub const fn mask(&self) -> usize {
        self.mask
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; tables hold at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over every entry in slot order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// Iterates mutably over every entry in slot order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.entries.iter_mut()
    }
}
