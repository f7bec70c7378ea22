#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WindowMetricsSnapshot {
    pub advance_calls: u64,
    pub set_bits: u64,

    pub admitted_buckets: u64,
    pub expired_buckets: u64,
    pub expired_mass: u64, // sum of sizes of expired buckets

    pub merges: u64,
    pub cascades: u64, // steps that ran at least one merge
    pub max_cascade_depth: u32,

    pub resets: u64,
    pub estimate_calls: u64,
    pub describe_calls: u64,

    // gauges captured at snapshot time
    pub live_buckets: usize,
    pub peak_live_buckets: usize,
    pub capacity: usize,
    pub total_sum: u64,
    pub current_time: u64,
}

impl WindowMetricsSnapshot {
    /// Fraction of arena slots in use at snapshot time.
    pub fn occupancy(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            self.live_buckets as f64 / self.capacity as f64
        }
    }

    /// Average number of merges per set bit seen so far.
    pub fn merges_per_set_bit(&self) -> f64 {
        if self.set_bits == 0 {
            0.0
        } else {
            self.merges as f64 / self.set_bits as f64
        }
    }
}
