//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and pin operations ([`Error`]).
//!
//! The protocol itself has no failure path: a bad read just puts a wrong
//! level on an output until the next cycle overwrites it. The only errors are
//! the ones the [`Gpio`] implementation reports, and invalid timing.
//!
//! ## Example
//!
//! ```
//! use genpad::{Builder, BuilderError};
//!
//! let result = Builder::new().settle_time_us(0).build();
//! assert!(matches!(result, Err(BuilderError::ZeroSettleTime)));
//! ```

use crate::gpio::Gpio;

/// Errors that can occur while driving the port
///
/// Generic over the GPIO type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<G: Gpio> {
    /// Pin access failed
    ///
    /// Wraps the underlying error from the [`Gpio`] implementation.
    Gpio(G::Error),
}

impl<G: Gpio> core::fmt::Display for Error<G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Gpio(e) => write!(f, "GPIO error: {e:?}"),
        }
    }
}

impl<G: Gpio + core::fmt::Debug> core::error::Error for Error<G> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Strobe settle time must be at least one microsecond
    ZeroSettleTime,
    /// Poll period must be at least one millisecond
    ZeroPollPeriod,
    /// Poll period shorter than the settle waits of a single cycle
    PollPeriodTooShort {
        /// Requested period in milliseconds
        poll_period_ms: u32,
        /// Settle time spent inside one cycle, in microseconds
        cycle_settle_us: u32,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuilderError::ZeroSettleTime => write!(f, "Settle time must be non-zero"),
            BuilderError::ZeroPollPeriod => write!(f, "Poll period must be non-zero"),
            BuilderError::PollPeriodTooShort {
                poll_period_ms,
                cycle_settle_us,
            } => write!(
                f,
                "Poll period {poll_period_ms}ms is shorter than one cycle's settle time ({cycle_settle_us}us)"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
