use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{WindowMetricsReadRecorder, WindowMetricsRecorder};

#[derive(Debug, Default)]
pub struct WindowMetrics {
    pub advance_calls: u64,
    pub set_bits: u64,
    pub admitted_buckets: u64,
    pub expired_buckets: u64,
    pub expired_mass: u64,
    pub merges: u64,
    pub cascades: u64,
    pub max_cascade_depth: u32,
    pub peak_live_buckets: usize,
    pub resets: u64,
    pub estimate_calls: MetricsCell,
    pub describe_calls: MetricsCell,
}

impl WindowMetricsRecorder for WindowMetrics {
    fn record_advance(&mut self, bit: bool) {
        self.advance_calls += 1;
        if bit {
            self.set_bits += 1;
        }
    }

    fn record_admitted_bucket(&mut self) {
        self.admitted_buckets += 1;
    }

    fn record_expired_bucket(&mut self, size: u64) {
        self.expired_buckets += 1;
        self.expired_mass += size;
    }

    fn record_merge(&mut self) {
        self.merges += 1;
    }

    fn record_cascade(&mut self, depth: u32) {
        self.cascades += 1;
        self.max_cascade_depth = self.max_cascade_depth.max(depth);
    }

    fn record_live_buckets(&mut self, live: usize) {
        self.peak_live_buckets = self.peak_live_buckets.max(live);
    }

    // Counters are cumulative across resets; only the count of resets moves.
    fn record_reset(&mut self) {
        self.resets += 1;
    }
}

impl WindowMetricsReadRecorder for &WindowMetrics {
    fn record_estimate_call(&self) {
        self.estimate_calls.incr();
    }

    fn record_describe_call(&self) {
        self.describe_calls.incr();
    }
}
