//! Builder for [`ExponentialHistogram`].
//!
//! Lets callers state accuracy either as the merge parameter `k` or as a
//! target relative error `eps`, where `k = ⌈1 / eps⌉`.
//!
//! ## Example
//!
//! ```rust
//! use bitwindow::builder::HistogramBuilder;
//!
//! // At most 1% relative error over the last 10_000 bits.
//! let mut counter = HistogramBuilder::new(10_000).relative_error(0.01).build();
//! assert_eq!(counter.k(), 100);
//! counter.advance(true);
//! assert_eq!(counter.estimate(), 1);
//! ```

use crate::error::ConfigError;
use crate::window::ExponentialHistogram;

/// `k` used when the builder is given neither `k` nor a relative error.
pub const DEFAULT_K: u32 = 2;

/// How the builder derives `k`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Accuracy {
    /// Explicit merge parameter.
    K(u32),
    /// Target relative error in `(0, 1]`.
    RelativeError(f64),
}

impl Accuracy {
    fn resolve(self) -> Result<u32, ConfigError> {
        match self {
            Accuracy::K(k) => Ok(k),
            Accuracy::RelativeError(eps) => {
                if !eps.is_finite() || eps <= 0.0 || eps > 1.0 {
                    return Err(ConfigError::new(format!(
                        "relative_error must be in (0.0, 1.0], got {}",
                        eps
                    )));
                }
                let k = (1.0 / eps).ceil();
                if k > f64::from(u32::MAX) {
                    return Err(ConfigError::new(format!(
                        "relative_error {} needs k = {} which exceeds u32::MAX",
                        eps, k
                    )));
                }
                Ok(k as u32)
            }
        }
    }
}

/// Builder for creating histogram instances.
#[derive(Debug, Clone)]
pub struct HistogramBuilder {
    window_size: u32,
    accuracy: Accuracy,
}

impl HistogramBuilder {
    /// Create a new builder over the last `window_size` inputs.
    pub fn new(window_size: u32) -> Self {
        Self {
            window_size,
            accuracy: Accuracy::K(DEFAULT_K),
        }
    }

    /// Sets the merge parameter; relative error is at most `1 / k`.
    pub fn k(mut self, k: u32) -> Self {
        self.accuracy = Accuracy::K(k);
        self
    }

    /// Sets the target relative error; `k` becomes `⌈1 / eps⌉`.
    pub fn relative_error(mut self, eps: f64) -> Self {
        self.accuracy = Accuracy::RelativeError(eps);
        self
    }

    /// Returns the configured accuracy.
    pub fn accuracy(&self) -> Accuracy {
        self.accuracy
    }

    /// Build the histogram.
    ///
    /// # Panics
    ///
    /// Panics on invalid parameters. See [`try_build`](Self::try_build).
    pub fn build(self) -> ExponentialHistogram {
        match self.try_build() {
            Ok(histogram) => histogram,
            Err(e) => panic!("{}", e),
        }
    }

    /// Build the histogram, returning an error on invalid parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the window size or `k` is zero, or the
    /// relative error is outside `(0, 1]`.
    pub fn try_build(self) -> Result<ExponentialHistogram, ConfigError> {
        let k = self.accuracy.resolve()?;
        ExponentialHistogram::try_new(self.window_size, k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_k_is_applied() {
        let histogram = HistogramBuilder::new(64).build();
        assert_eq!(histogram.k(), DEFAULT_K);
        assert_eq!(histogram.window_size(), 64);
    }

    #[test]
    fn explicit_k_wins_over_default() {
        let histogram = HistogramBuilder::new(64).k(7).build();
        assert_eq!(histogram.k(), 7);
    }

    #[test]
    fn relative_error_rounds_k_up() {
        assert_eq!(HistogramBuilder::new(8).relative_error(0.3).build().k(), 4);
        assert_eq!(HistogramBuilder::new(8).relative_error(0.5).build().k(), 2);
        assert_eq!(HistogramBuilder::new(8).relative_error(1.0).build().k(), 1);
    }

    #[test]
    fn last_accuracy_setting_wins() {
        let builder = HistogramBuilder::new(8).relative_error(0.1).k(3);
        assert_eq!(builder.accuracy(), Accuracy::K(3));
    }

    #[test]
    fn invalid_relative_error_is_rejected() {
        for eps in [0.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            let err = HistogramBuilder::new(8)
                .relative_error(eps)
                .try_build()
                .unwrap_err();
            assert!(err.message().contains("relative_error"));
        }
    }

    #[test]
    fn tiny_relative_error_overflowing_k_is_rejected() {
        let err = HistogramBuilder::new(8)
            .relative_error(1e-12)
            .try_build()
            .unwrap_err();
        assert!(err.message().contains("u32::MAX"));
    }

    #[test]
    fn zero_window_is_rejected() {
        assert!(HistogramBuilder::new(0).try_build().is_err());
        assert!(HistogramBuilder::new(8).k(0).try_build().is_err());
    }

    #[test]
    #[should_panic(expected = "window_size must be >= 1")]
    fn build_panics_on_invalid_window() {
        let _ = HistogramBuilder::new(0).build();
    }
}
