//! # Exponential Histogram (DGIM) Sliding-Window Bit Counter
//!
//! Counts the 1-bits among the last `W` inputs of an unbounded bit stream
//! with relative error at most `1/k`, using `O(k · log W)` memory that is
//! committed once at construction.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                      ExponentialHistogram                            │
//!   │                                                                      │
//!   │   IntrusiveList<Bucket> (fixed SlotArena, newest → oldest)           │
//!   │                                                                      │
//!   │   head ─► [1 @t9] ◄─► [1 @t8] ◄─► [2 @t6] ◄─► [4 @t3] ◄── tail        │
//!   │             size 2^0 class          2^1         2^2                  │
//!   │                                                                      │
//!   │   SizeClassIndex                                                     │
//!   │   ┌──────┬───────┬──────────────┐                                    │
//!   │   │  i   │ count │ oldest       │                                    │
//!   │   ├──────┼───────┼──────────────┤                                    │
//!   │   │  0   │   2   │ [1 @t8]      │                                    │
//!   │   │  1   │   1   │ [2 @t6]      │                                    │
//!   │   │  2   │   1   │ [4 @t3]      │                                    │
//!   │   └──────┴───────┴──────────────┘                                    │
//!   │                                                                      │
//!   │   current_time, total_sum, merges                                    │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Step
//!
//! Each [`advance`](ExponentialHistogram::advance) call:
//!
//! 1. ticks the clock;
//! 2. pops tail buckets whose timestamp is `W` or more ticks old;
//! 3. on a 1-bit, pushes a size-1 bucket at the head;
//! 4. while some size class holds `k + 2` buckets, folds its oldest bucket
//!    into the next-oldest one, which moves up one class (this can cascade);
//! 5. answers `total_sum - tail.size + 1`, or 0 when empty.
//!
//! From head to tail, sizes are non-decreasing and timestamps strictly
//! decreasing, so expiry only ever looks at the tail and the two oldest
//! buckets of a class are always adjacent.
//!
//! ## Capacity
//!
//! A size class never holds more than `k + 1` buckets between steps and only
//! `⌊log2 W⌋ + 1` classes can be live, so the arena holds
//! `min(W + 1, (⌊log2 W⌋ + 1) · (k + 2))` buckets. Running out of slots means
//! that bound is broken and the call panics.
//!
//! ## Example Usage
//!
//! ```
//! use bitwindow::window::ExponentialHistogram;
//!
//! let mut counter = ExponentialHistogram::new(8, 2);
//! for bit in [true, false, true, true] {
//!     counter.advance(bit);
//! }
//! assert_eq!(counter.estimate(), 3);
//!
//! // Eight zeros push every set bit out of the window.
//! for _ in 0..8 {
//!     counter.advance(false);
//! }
//! assert_eq!(counter.estimate(), 0);
//! assert!(counter.is_empty());
//! ```
//!
//! ## Thread Safety
//!
//! Single writer. `advance` takes `&mut self`; share the histogram behind
//! your own lock if several threads feed one stream.

use std::fmt;

use crate::ds::intrusive_list::IntrusiveList;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::WindowMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::WindowMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    MetricsSnapshotProvider, WindowMetricsReadRecorder, WindowMetricsRecorder,
};
use crate::window::size_class::{SIZE_CLASSES, SizeClassIndex};

/// A run of 1-bits summarized by its newest bit's timestamp and its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    timestamp: u64,
    size: u64,
}

impl Bucket {
    /// Tick of the most recent bit folded into this bucket.
    #[inline]
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Number of 1-bits represented; always a power of two.
    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[inline]
    fn exponent(&self) -> usize {
        self.size.trailing_zeros() as usize
    }
}

/// Approximate sliding-window counter of set bits.
///
/// See the [module documentation](self) for the algorithm.
pub struct ExponentialHistogram {
    window_size: u32,
    k: u32,
    current_time: u64,
    total_sum: u64,
    buckets: IntrusiveList<Bucket>,
    classes: SizeClassIndex,
    merges: u64,
    #[cfg(feature = "metrics")]
    metrics: WindowMetrics,
}

impl ExponentialHistogram {
    /// Creates a counter over the last `window_size` inputs with relative
    /// error at most `1 / k`.
    ///
    /// # Panics
    ///
    /// Panics if `window_size` or `k` is zero. See [`try_new`](Self::try_new).
    pub fn new(window_size: u32, k: u32) -> Self {
        match Self::try_new(window_size, k) {
            Ok(histogram) => histogram,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a counter, returning an error on invalid parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `window_size` or `k` is zero.
    pub fn try_new(window_size: u32, k: u32) -> Result<Self, ConfigError> {
        if window_size == 0 {
            return Err(ConfigError::new("window_size must be >= 1, got 0"));
        }
        if k == 0 {
            return Err(ConfigError::new("k must be >= 1, got 0"));
        }

        let capacity = Self::capacity_for(window_size, k);
        debug_assert!(capacity >= 1 && capacity as u64 <= u64::from(window_size) + 1);
        Ok(Self::with_capacity(window_size, k, capacity))
    }

    fn with_capacity(window_size: u32, k: u32, capacity: usize) -> Self {
        let buckets = IntrusiveList::with_fixed_capacity(capacity);
        let bytes = buckets.approx_bytes();
        tracing::debug!(
            window_size,
            k,
            capacity,
            bytes,
            "exponential histogram constructed"
        );
        Self {
            window_size,
            k,
            current_time: 0,
            total_sum: 0,
            buckets,
            classes: SizeClassIndex::new(),
            merges: 0,
            #[cfg(feature = "metrics")]
            metrics: WindowMetrics::default(),
        }
    }

    /// Returns the number of bucket slots committed for `(window_size, k)`:
    /// `min(W + 1, (⌊log2 W⌋ + 1) · (k + 2))`.
    ///
    /// A zero `window_size` is treated as 1.
    pub fn capacity_for(window_size: u32, k: u32) -> usize {
        let window_size = window_size.max(1);
        let size_classes = u64::from(window_size.ilog2()) + 1;
        let analytic = size_classes * (u64::from(k) + 2);
        let ceiling = u64::from(window_size) + 1;
        analytic.min(ceiling) as usize
    }

    /// Consumes one input and returns the approximate number of set bits
    /// among the last `window_size` inputs, this one included.
    ///
    /// # Panics
    ///
    /// Panics if the bucket arena is exhausted, which means the capacity
    /// bound no longer holds and the structure cannot continue.
    pub fn advance(&mut self, bit: bool) -> u64 {
        self.current_time += 1;
        #[cfg(feature = "metrics")]
        self.metrics.record_advance(bit);

        let expired = self.expire();
        let mut depth = 0;
        if bit {
            self.admit();
            depth = self.cascade();
        }

        if expired > 0 || depth > 0 {
            tracing::trace!(
                time = self.current_time,
                expired,
                merges = depth,
                live = self.buckets.len(),
                "window step"
            );
        }
        #[cfg(feature = "metrics")]
        {
            if depth > 0 {
                self.metrics.record_cascade(depth);
            }
            self.metrics.record_live_buckets(self.buckets.len());
        }

        self.current_estimate()
    }

    /// Returns the current approximate count without consuming input.
    pub fn estimate(&self) -> u64 {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_estimate_call();
        self.current_estimate()
    }

    fn current_estimate(&self) -> u64 {
        match self.buckets.back() {
            None => 0,
            // Every bucket but the oldest is fully inside the window; the
            // oldest is known to contribute at least its newest bit.
            Some(oldest) => self.total_sum - oldest.size + 1,
        }
    }

    /// Pops tail buckets that no longer overlap the window.
    fn expire(&mut self) -> u32 {
        let window = u64::from(self.window_size);
        let mut expired = 0;
        while let Some(tail) = self.buckets.back_id() {
            let Some(&oldest) = self.buckets.get(tail) else {
                break;
            };
            if self.current_time - oldest.timestamp < window {
                break;
            }

            let predecessor = self.buckets.prev_id(tail);
            self.total_sum -= oldest.size;
            self.classes.retire_oldest(oldest.exponent(), 1, predecessor);
            self.buckets.pop_back();
            expired += 1;
            #[cfg(feature = "metrics")]
            self.metrics.record_expired_bucket(oldest.size);
        }
        expired
    }

    /// Pushes a unit bucket for the current tick.
    fn admit(&mut self) {
        self.total_sum += 1;
        let bucket = Bucket {
            timestamp: self.current_time,
            size: 1,
        };
        let id = match self.buckets.try_push_front(bucket) {
            Ok(id) => id,
            Err(err) => {
                tracing::error!(
                    window_size = self.window_size,
                    k = self.k,
                    capacity = err.capacity(),
                    time = self.current_time,
                    "bucket arena exhausted"
                );
                panic!("{}", err);
            }
        };
        self.classes.admit(0, id);
        #[cfg(feature = "metrics")]
        self.metrics.record_admitted_bucket();
    }

    /// Merges the two oldest buckets of every class holding `k + 2`,
    /// starting at size 1. Returns the number of merges performed.
    fn cascade(&mut self) -> u32 {
        let threshold = u64::from(self.k) + 2;
        let mut exponent = 0;
        let mut depth = 0;

        while exponent + 1 < SIZE_CLASSES && u64::from(self.classes.count(exponent)) == threshold
        {
            let Some(oldest) = self.classes.oldest(exponent) else {
                debug_assert!(false, "size class {exponent} is full but has no oldest bucket");
                break;
            };
            let Some(survivor) = self.buckets.prev_id(oldest) else {
                debug_assert!(false, "oldest bucket of class {exponent} has no predecessor");
                break;
            };

            let merged = self.buckets.splice_merge(oldest, survivor, |kept, absorbed| {
                debug_assert_eq!(kept.size, absorbed.size);
                kept.size *= 2;
            });
            if !merged {
                debug_assert!(false, "merge pair of class {exponent} is not adjacent");
                break;
            }

            self.classes
                .retire_oldest(exponent, 2, self.buckets.prev_id(survivor));
            self.classes.admit(exponent + 1, survivor);
            self.merges += 1;
            #[cfg(feature = "metrics")]
            self.metrics.record_merge();

            depth += 1;
            exponent += 1;
        }
        depth
    }

    /// Returns `(size, timestamp)` for every live bucket, newest first.
    pub fn describe(&self) -> Vec<(u64, u64)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_describe_call();
        self.buckets
            .iter()
            .map(|bucket| (bucket.size, bucket.timestamp))
            .collect()
    }

    /// Iterates live buckets from newest to oldest.
    pub fn buckets(&self) -> impl Iterator<Item = &Bucket> {
        self.buckets.iter()
    }

    /// Drops every bucket and restarts the clock; the arena is kept.
    pub fn reset(&mut self) {
        tracing::debug!(
            time = self.current_time,
            live = self.buckets.len(),
            "exponential histogram reset"
        );
        self.buckets.clear();
        self.classes.clear();
        self.current_time = 0;
        self.total_sum = 0;
        self.merges = 0;
        #[cfg(feature = "metrics")]
        self.metrics.record_reset();
    }

    pub fn window_size(&self) -> u32 {
        self.window_size
    }

    pub fn k(&self) -> u32 {
        self.k
    }

    /// Number of inputs consumed since construction or the last reset.
    pub fn current_time(&self) -> u64 {
        self.current_time
    }

    /// Sum of all live bucket sizes.
    pub fn total_sum(&self) -> u64 {
        self.total_sum
    }

    /// Number of live buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of bucket slots committed at construction.
    pub fn capacity(&self) -> usize {
        self.buckets.capacity()
    }

    /// Bytes of bucket storage committed at construction.
    pub fn memory_bytes(&self) -> usize {
        self.buckets.approx_bytes()
    }

    /// Number of merges since construction or the last reset.
    pub fn merges(&self) -> u64 {
        self.merges
    }

    /// Number of live buckets of size `2^exponent`.
    pub fn size_class_count(&self, exponent: u32) -> u32 {
        let exponent = exponent as usize;
        if exponent < SIZE_CLASSES {
            self.classes.count(exponent)
        } else {
            0
        }
    }

    /// Checks every structural invariant against a scan of the bucket list.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError`] describing the first violation found.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut counts = [0u32; SIZE_CLASSES];
        let mut oldest = [None; SIZE_CLASSES];
        let mut sum = 0u64;
        let mut previous: Option<Bucket> = None;

        for (id, bucket) in self.buckets.iter_entries() {
            if !bucket.size.is_power_of_two() {
                return Err(InvariantError::new(format!(
                    "bucket @t{} has size {} which is not a power of two",
                    bucket.timestamp, bucket.size
                )));
            }
            if bucket.timestamp > self.current_time {
                return Err(InvariantError::new(format!(
                    "bucket @t{} is newer than current time {}",
                    bucket.timestamp, self.current_time
                )));
            }
            if let Some(newer) = previous {
                if bucket.size < newer.size {
                    return Err(InvariantError::new(format!(
                        "size decreases toward tail: {} @t{} after {} @t{}",
                        bucket.size, bucket.timestamp, newer.size, newer.timestamp
                    )));
                }
                if bucket.timestamp >= newer.timestamp {
                    return Err(InvariantError::new(format!(
                        "timestamps not decreasing toward tail: t{} after t{}",
                        bucket.timestamp, newer.timestamp
                    )));
                }
            }
            let exponent = bucket.exponent();
            counts[exponent] += 1;
            oldest[exponent] = Some(id);
            sum += bucket.size;
            previous = Some(*bucket);
        }

        if sum != self.total_sum {
            return Err(InvariantError::new(format!(
                "total_sum is {} but live buckets sum to {}",
                self.total_sum, sum
            )));
        }
        if let Some(tail) = self.buckets.back()
            && self.current_time - tail.timestamp >= u64::from(self.window_size)
        {
            return Err(InvariantError::new(format!(
                "tail bucket @t{} is outside the window at time {}",
                tail.timestamp, self.current_time
            )));
        }

        for exponent in 0..SIZE_CLASSES {
            if counts[exponent] != self.classes.count(exponent) {
                return Err(InvariantError::new(format!(
                    "size class {} count is {} but the list holds {}",
                    exponent,
                    self.classes.count(exponent),
                    counts[exponent]
                )));
            }
            if oldest[exponent] != self.classes.oldest(exponent) {
                return Err(InvariantError::new(format!(
                    "size class {} oldest pointer is stale",
                    exponent
                )));
            }
            if u64::from(counts[exponent]) > u64::from(self.k) + 1 {
                return Err(InvariantError::new(format!(
                    "size class {} holds {} buckets, limit is k + 1 = {}",
                    exponent,
                    counts[exponent],
                    u64::from(self.k) + 1
                )));
            }
        }

        let bound = (u64::from(self.window_size.ilog2()) + 1) * (u64::from(self.k) + 1);
        if self.buckets.len() as u64 > bound {
            return Err(InvariantError::new(format!(
                "{} live buckets exceed the bound {}",
                self.buckets.len(),
                bound
            )));
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        self.buckets.debug_validate_invariants();
        if let Err(err) = self.check_invariants() {
            panic!("{}", err);
        }
    }
}

#[cfg(feature = "metrics")]
impl ExponentialHistogram {
    pub fn metrics_snapshot(&self) -> WindowMetricsSnapshot {
        WindowMetricsSnapshot {
            advance_calls: self.metrics.advance_calls,
            set_bits: self.metrics.set_bits,
            admitted_buckets: self.metrics.admitted_buckets,
            expired_buckets: self.metrics.expired_buckets,
            expired_mass: self.metrics.expired_mass,
            merges: self.metrics.merges,
            cascades: self.metrics.cascades,
            max_cascade_depth: self.metrics.max_cascade_depth,
            resets: self.metrics.resets,
            estimate_calls: self.metrics.estimate_calls.get(),
            describe_calls: self.metrics.describe_calls.get(),
            live_buckets: self.buckets.len(),
            peak_live_buckets: self.metrics.peak_live_buckets,
            capacity: self.buckets.capacity(),
            total_sum: self.total_sum,
            current_time: self.current_time,
        }
    }
}

#[cfg(feature = "metrics")]
impl MetricsSnapshotProvider<WindowMetricsSnapshot> for ExponentialHistogram {
    fn snapshot(&self) -> WindowMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl fmt::Debug for ExponentialHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExponentialHistogram")
            .field("window_size", &self.window_size)
            .field("k", &self.k)
            .field("current_time", &self.current_time)
            .field("total_sum", &self.total_sum)
            .field("len", &self.buckets.len())
            .field("capacity", &self.buckets.capacity())
            .field("merges", &self.merges)
            .field(
                "size_classes",
                &self
                    .classes
                    .occupied()
                    .map(|(exponent, count, _)| (exponent, count))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl fmt::Display for ExponentialHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "ExponentialHistogram (window_size={}, k={}, current_time={}, total_sum={}):",
            self.window_size, self.k, self.current_time, self.total_sum
        )?;
        if self.buckets.is_empty() {
            return write!(f, "  [Empty]");
        }
        for (idx, bucket) in self.buckets.iter().enumerate() {
            writeln!(
                f,
                "  Bucket {}: size={}, timestamp={}",
                idx, bucket.size, bucket.timestamp
            )?;
        }
        write!(f, "  Total buckets: {}", self.buckets.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(histogram: &mut ExponentialHistogram, bits: &[bool]) -> Vec<u64> {
        bits.iter()
            .map(|&bit| {
                let estimate = histogram.advance(bit);
                histogram.debug_validate_invariants();
                estimate
            })
            .collect()
    }

    // ==============================================
    // CONSTRUCTION
    // ==============================================

    mod construction {
        use super::*;

        #[test]
        fn rejects_zero_window() {
            let err = ExponentialHistogram::try_new(0, 3).unwrap_err();
            assert!(err.message().contains("window_size"));
        }

        #[test]
        fn rejects_zero_k() {
            let err = ExponentialHistogram::try_new(10, 0).unwrap_err();
            assert!(err.message().contains("k must be"));
        }

        #[test]
        #[should_panic(expected = "window_size must be >= 1")]
        fn new_panics_on_zero_window() {
            let _ = ExponentialHistogram::new(0, 1);
        }

        #[test]
        fn capacity_formula_takes_tighter_bound() {
            // window ceiling wins for tiny windows
            assert_eq!(ExponentialHistogram::capacity_for(1, 1), 2);
            assert_eq!(ExponentialHistogram::capacity_for(4, 10), 5);
            assert_eq!(ExponentialHistogram::capacity_for(1024, 100), 1025);
            // analytic bound wins once the window is large
            assert_eq!(ExponentialHistogram::capacity_for(16, 1), 15);
            assert_eq!(ExponentialHistogram::capacity_for(1000, 2), 40);
            assert_eq!(ExponentialHistogram::capacity_for(1024, 50), 572);
            assert_eq!(ExponentialHistogram::capacity_for(u32::MAX, 1), 96);
        }

        #[test]
        fn fresh_histogram_is_empty() {
            let histogram = ExponentialHistogram::new(100, 4);
            assert_eq!(histogram.window_size(), 100);
            assert_eq!(histogram.k(), 4);
            assert_eq!(histogram.capacity(), ExponentialHistogram::capacity_for(100, 4));
            assert!(histogram.memory_bytes() > 0);
            assert!(histogram.is_empty());
            assert_eq!(histogram.estimate(), 0);
            assert_eq!(histogram.current_time(), 0);
            assert!(histogram.describe().is_empty());
            histogram.debug_validate_invariants();
        }
    }

    // ==============================================
    // STEP BEHAVIOR
    // ==============================================

    mod step {
        use super::*;

        #[test]
        fn all_zero_stream_counts_nothing() {
            let mut histogram = ExponentialHistogram::new(5, 1);
            let estimates = feed(&mut histogram, &[false; 5]);
            assert_eq!(estimates, vec![0; 5]);
            assert_eq!(histogram.current_time(), 5);
            assert!(histogram.is_empty());
        }

        #[test]
        fn all_ones_without_merges_is_exact() {
            let mut histogram = ExponentialHistogram::new(4, 10);
            let estimates = feed(&mut histogram, &[true; 4]);
            assert_eq!(estimates, vec![1, 2, 3, 4]);
            assert_eq!(histogram.merges(), 0);
            assert_eq!(histogram.size_class_count(0), 4);
        }

        #[test]
        fn third_unit_bucket_triggers_merge_when_k_is_one() {
            let mut histogram = ExponentialHistogram::new(16, 1);
            let estimates = feed(&mut histogram, &[true, true, true]);
            assert_eq!(estimates, vec![1, 2, 2]);
            assert_eq!(histogram.describe(), vec![(1, 3), (2, 2)]);
            assert_eq!(histogram.merges(), 1);
            assert_eq!(histogram.total_sum(), 3);
            assert_eq!(histogram.size_class_count(0), 1);
            assert_eq!(histogram.size_class_count(1), 1);
        }

        #[test]
        fn merges_cascade_across_classes() {
            let mut histogram = ExponentialHistogram::new(64, 1);
            feed(&mut histogram, &[true; 7]);
            assert_eq!(histogram.describe(), vec![(1, 7), (2, 6), (4, 4)]);
            assert_eq!(histogram.merges(), 4);
            assert_eq!(histogram.estimate(), 4);
        }

        #[test]
        fn expired_buckets_leave_the_window() {
            let mut histogram = ExponentialHistogram::new(3, 1);
            let estimates = feed(&mut histogram, &[true, true, false, false, false]);
            assert_eq!(estimates, vec![1, 2, 2, 1, 0]);
            assert!(histogram.is_empty());
            assert_eq!(histogram.total_sum(), 0);
        }

        #[test]
        fn window_of_one_tracks_last_bit() {
            let mut histogram = ExponentialHistogram::new(1, 1);
            let estimates = feed(&mut histogram, &[true, true, false, true, false]);
            assert_eq!(estimates, vec![1, 1, 0, 1, 0]);
            assert!(histogram.len() <= histogram.capacity());
        }

        #[test]
        fn estimate_matches_last_advance() {
            let mut histogram = ExponentialHistogram::new(10, 2);
            for bit in [true, false, true, true, true, false, true] {
                let answer = histogram.advance(bit);
                assert_eq!(histogram.estimate(), answer);
            }
        }

        #[test]
        fn reset_restarts_clock_and_keeps_capacity() {
            let mut histogram = ExponentialHistogram::new(16, 1);
            feed(&mut histogram, &[true; 9]);
            let capacity = histogram.capacity();

            histogram.reset();
            assert!(histogram.is_empty());
            assert_eq!(histogram.current_time(), 0);
            assert_eq!(histogram.merges(), 0);
            assert_eq!(histogram.capacity(), capacity);
            histogram.debug_validate_invariants();

            assert_eq!(feed(&mut histogram, &[true, true]), vec![1, 2]);
        }

        #[test]
        #[should_panic(expected = "arena exhausted")]
        fn exhausted_arena_is_fatal() {
            let mut histogram = ExponentialHistogram::with_capacity(10, 10, 1);
            histogram.advance(true);
            histogram.advance(true);
        }
    }

    // ==============================================
    // DIAGNOSTICS
    // ==============================================

    mod diagnostics {
        use super::*;

        #[test]
        fn display_lists_buckets_newest_first() {
            let mut histogram = ExponentialHistogram::new(16, 1);
            feed(&mut histogram, &[true, true, true]);
            let text = histogram.to_string();
            assert_eq!(
                text,
                "ExponentialHistogram (window_size=16, k=1, current_time=3, total_sum=3):\n  \
                 Bucket 0: size=1, timestamp=3\n  \
                 Bucket 1: size=2, timestamp=2\n  \
                 Total buckets: 2"
            );
        }

        #[test]
        fn display_marks_empty_histogram() {
            let histogram = ExponentialHistogram::new(4, 1);
            assert!(histogram.to_string().ends_with("  [Empty]"));
        }

        #[test]
        fn buckets_iterator_agrees_with_describe() {
            let mut histogram = ExponentialHistogram::new(32, 2);
            feed(&mut histogram, &[true, false, true, true, true, true, false, true]);
            let from_iter: Vec<_> = histogram
                .buckets()
                .map(|bucket| (bucket.size(), bucket.timestamp()))
                .collect();
            assert_eq!(from_iter, histogram.describe());
        }

        #[test]
        fn debug_lists_occupied_size_classes() {
            let mut histogram = ExponentialHistogram::new(16, 1);
            feed(&mut histogram, &[true, true, true]);
            let text = format!("{:?}", histogram);
            assert!(text.contains("size_classes: [(0, 1), (1, 1)]"));
        }

        #[test]
        fn out_of_range_size_class_is_empty() {
            let histogram = ExponentialHistogram::new(4, 1);
            assert_eq!(histogram.size_class_count(64), 0);
            assert_eq!(histogram.size_class_count(u32::MAX), 0);
        }
    }

    // ==============================================
    // PROPERTY TESTS
    // ==============================================

    mod properties {
        use std::collections::VecDeque;

        use proptest::prelude::*;

        use super::*;

        proptest! {
            /// Property: every structural invariant holds after each step
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_invariants_hold_every_step(
                window_size in 1u32..64,
                k in 1u32..6,
                bits in prop::collection::vec(any::<bool>(), 0..400)
            ) {
                let mut histogram = ExponentialHistogram::new(window_size, k);
                for bit in bits {
                    histogram.advance(bit);
                    prop_assert!(histogram.check_invariants().is_ok());
                    prop_assert!(histogram.len() <= histogram.capacity());
                }
            }

            /// Property: estimate never overshoots and misses by at most ceil(exact / k)
            #[cfg_attr(miri, ignore)]
            #[test]
            fn prop_error_within_bound(
                window_size in 1u32..128,
                k in 1u32..8,
                bits in prop::collection::vec(any::<bool>(), 0..600)
            ) {
                let mut histogram = ExponentialHistogram::new(window_size, k);
                let mut recent = VecDeque::new();
                let mut exact = 0u64;
                for bit in bits {
                    recent.push_back(bit);
                    exact += u64::from(bit);
                    if recent.len() > window_size as usize
                        && recent.pop_front() == Some(true)
                    {
                        exact -= 1;
                    }

                    let estimate = histogram.advance(bit);
                    prop_assert!(estimate <= exact);
                    prop_assert!(exact - estimate <= exact.div_ceil(u64::from(k)));
                }
            }
        }
    }
}
