//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and export are separate traits so the histogram's
//! hot path only ever writes counters.
//!
//! ```text
//!   ┌─────────────────────────────┐   ┌─────────────────────────────┐
//!   │   WindowMetricsRecorder     │   │  WindowMetricsReadRecorder  │
//!   │  advance/admit/expire/merge │   │  estimate/describe (&self)  │
//!   └──────────────┬──────────────┘   └──────────────┬──────────────┘
//!                  └───────────────┬─────────────────┘
//!                                  ▼
//!                          ┌───────────────┐
//!                          │ WindowMetrics │
//!                          └───────┬───────┘
//!                                  │
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters written by [`ExponentialHistogram`](crate::window::ExponentialHistogram)
/// methods that take `&mut self`.
pub trait WindowMetricsRecorder {
    /// One input consumed by `advance`.
    fn record_advance(&mut self, bit: bool);
    /// A unit bucket was created for a set bit.
    fn record_admitted_bucket(&mut self);
    /// A bucket of `size` fell out of the window.
    fn record_expired_bucket(&mut self, size: u64);
    /// Two buckets of one size were merged.
    fn record_merge(&mut self);
    /// A merge cascade finished after `depth` merges (only called for `depth > 0`).
    fn record_cascade(&mut self, depth: u32);
    /// Live bucket count after a step; feeds the peak gauge.
    fn record_live_buckets(&mut self, live: usize);
    fn record_reset(&mut self);
}

/// Read-only counters for `&self` methods (uses interior mutability).
pub trait WindowMetricsReadRecorder {
    fn record_estimate_call(&self);
    fn record_describe_call(&self);
}

/// Produces a point-in-time snapshot of metrics.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Publishes a snapshot to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
