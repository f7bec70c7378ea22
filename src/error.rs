//! Error types for the bitwindow library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when histogram parameters are invalid
//!   (zero window size, zero `k`, out-of-range relative error).
//! - [`CapacityError`]: Returned by the fixed-capacity arena when its free
//!   list is empty. The histogram treats this as fatal.
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (`check_invariants` methods).
//!
//! ## Example Usage
//!
//! ```
//! use bitwindow::error::ConfigError;
//! use bitwindow::window::ExponentialHistogram;
//!
//! // Fallible constructor for user-configurable parameters
//! let counter: Result<ExponentialHistogram, ConfigError> = ExponentialHistogram::try_new(1000, 10);
//! assert!(counter.is_ok());
//!
//! // A zero window is rejected without panicking
//! let bad = ExponentialHistogram::try_new(0, 10);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal histogram invariants are violated.
///
/// Produced by [`ExponentialHistogram::check_invariants`](crate::window::ExponentialHistogram::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when histogram configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`ExponentialHistogram::try_new`](crate::window::ExponentialHistogram::try_new)
/// and [`HistogramBuilder::try_build`](crate::builder::HistogramBuilder::try_build).
/// Carries a human-readable description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use bitwindow::window::ExponentialHistogram;
///
/// let err = ExponentialHistogram::try_new(16, 0).unwrap_err();
/// assert!(err.to_string().contains("k"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// CapacityError
// ---------------------------------------------------------------------------

/// Error returned when a fixed-capacity arena has no free slot left.
///
/// Arenas never grow after construction, so this is the only way an insert
/// can fail. Carries the capacity that was exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError {
    capacity: usize,
}

impl CapacityError {
    /// Creates a new `CapacityError` for an arena of `capacity` slots.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Returns the capacity of the exhausted arena.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arena exhausted: all {} slots are in use",
            self.capacity
        )
    }
}

impl std::error::Error for CapacityError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
