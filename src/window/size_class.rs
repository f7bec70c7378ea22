//! Per-size bookkeeping for the exponential histogram.
//!
//! For every exponent `i` the index keeps the number of live buckets of size
//! `2^i` and the handle of the oldest (tail-most) of them. Buckets of one size
//! are contiguous in the list, so the oldest bucket and its predecessor are
//! always the merge pair for that size.
//!
//! The index is a cache over the bucket list: it must agree with a scan of
//! the list after every step.

use crate::ds::slot_arena::SlotId;

/// Number of tracked exponents; bucket sizes are `u64` powers of two.
pub const SIZE_CLASSES: usize = 64;

#[derive(Debug, Clone)]
pub(crate) struct SizeClassIndex {
    counts: [u32; SIZE_CLASSES],
    oldest: [Option<SlotId>; SIZE_CLASSES],
}

impl SizeClassIndex {
    pub(crate) fn new() -> Self {
        Self {
            counts: [0; SIZE_CLASSES],
            oldest: [None; SIZE_CLASSES],
        }
    }

    #[inline]
    pub(crate) fn count(&self, exponent: usize) -> u32 {
        self.counts[exponent]
    }

    #[inline]
    pub(crate) fn oldest(&self, exponent: usize) -> Option<SlotId> {
        self.oldest[exponent]
    }

    /// Records a bucket entering `exponent` at the newest end of its class.
    #[inline]
    pub(crate) fn admit(&mut self, exponent: usize, id: SlotId) {
        self.counts[exponent] += 1;
        if self.oldest[exponent].is_none() {
            self.oldest[exponent] = Some(id);
        }
    }

    /// Records the loss of `removed` oldest buckets of `exponent`.
    ///
    /// `successor` is the bucket that is now the oldest of the class, used
    /// only while the class stays non-empty.
    #[inline]
    pub(crate) fn retire_oldest(
        &mut self,
        exponent: usize,
        removed: u32,
        successor: Option<SlotId>,
    ) {
        debug_assert!(self.counts[exponent] >= removed);
        self.counts[exponent] -= removed;
        self.oldest[exponent] = if self.counts[exponent] == 0 {
            None
        } else {
            successor
        };
    }

    pub(crate) fn clear(&mut self) {
        self.counts = [0; SIZE_CLASSES];
        self.oldest = [None; SIZE_CLASSES];
    }

    /// Iterates `(exponent, count, oldest)` for every non-empty class.
    pub(crate) fn occupied(&self) -> impl Iterator<Item = (usize, u32, Option<SlotId>)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(exponent, &count)| (exponent, count, self.oldest[exponent]))
    }
}
