//! Optional counters for [`ExponentialHistogram`](crate::window::ExponentialHistogram).
//!
//! Enabled with the `metrics` feature. Recording happens inside the
//! histogram's own methods; consumers read a [`WindowMetricsSnapshot`] and may
//! publish it with an exporter.
//!
//! [`WindowMetricsSnapshot`]: snapshot::WindowMetricsSnapshot

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
