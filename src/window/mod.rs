//! Sliding-window counting.
//!
//! [`ExponentialHistogram`] answers "how many of the last `W` bits were set"
//! within a `1/k` relative error using `O(k · log W)` buckets.

pub mod histogram;
mod size_class;

pub use histogram::{Bucket, ExponentialHistogram};
pub use size_class::SIZE_CLASSES;
