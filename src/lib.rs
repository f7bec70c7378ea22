//! bitwindow: approximate counting of set bits over a sliding window.
//!
//! [`ExponentialHistogram`](window::ExponentialHistogram) keeps a bounded set
//! of power-of-two buckets in a fixed-capacity arena and answers "how many of
//! the last `W` bits were 1" within a `1/k` relative error.
//!
//! ```
//! use bitwindow::prelude::*;
//!
//! let mut counter = ExponentialHistogram::new(4, 10);
//! let answers: Vec<u64> = [true, true, true, true].into_iter().map(|b| counter.advance(b)).collect();
//! assert_eq!(answers, vec![1, 2, 3, 4]);
//! ```

pub mod builder;
pub mod ds;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
pub mod window;
