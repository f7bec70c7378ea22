pub use crate::builder::{Accuracy, HistogramBuilder};
pub use crate::ds::{IntrusiveList, SlotArena, SlotId};
pub use crate::error::{CapacityError, ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::WindowMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::MetricsSnapshotProvider;
pub use crate::window::{Bucket, ExponentialHistogram};
