//! Timing configuration and builder

pub use crate::error::BuilderError;

/// Settle time after every select transition, in microseconds
pub const DEFAULT_SETTLE_TIME_US: u32 = 10;

/// Sleep between poll cycles, in milliseconds
pub const DEFAULT_POLL_PERIOD_MS: u32 = 8;

/// Select pulses sent after detecting a six-button pad
pub const DEFAULT_RESET_PULSES: u8 = 3;

/// Most select writes a single poll cycle performs (six-button pad)
pub const MAX_STROBE_WRITES_PER_CYCLE: u32 = 8;

/// Driver configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Wait after each select transition before reads are valid
    pub settle_time_us: u32,
    /// Sleep between the end of one poll cycle and the start of the next
    pub poll_period_ms: u32,
    /// Full select pulses sent to a six-button pad right after detection
    pub reset_pulses: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settle_time_us: DEFAULT_SETTLE_TIME_US,
            poll_period_ms: DEFAULT_POLL_PERIOD_MS,
            reset_pulses: DEFAULT_RESET_PULSES,
        }
    }
}

impl Config {
    /// Settle time spent inside the longest poll cycle
    pub fn cycle_settle_us(&self) -> u32 {
        self.settle_time_us
            .saturating_mul(MAX_STROBE_WRITES_PER_CYCLE)
    }
}

/// Builder for constructing driver configuration
///
/// # Example
///
/// ```
/// use genpad::Builder;
///
/// let config = Builder::new()
///     .settle_time_us(20)
///     .poll_period_ms(16)
///     .build()
///     .expect("valid configuration");
/// assert_eq!(config.reset_pulses, 3);
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the settle time after select transitions
    pub fn settle_time_us(mut self, value: u32) -> Self {
        self.config.settle_time_us = value;
        self
    }

    /// Set the sleep between poll cycles
    pub fn poll_period_ms(mut self, value: u32) -> Self {
        self.config.poll_period_ms = value;
        self
    }

    /// Set the number of reset pulses sent to a six-button pad at boot
    pub fn reset_pulses(mut self, value: u8) -> Self {
        self.config.reset_pulses = value;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::ZeroSettleTime` or `BuilderError::ZeroPollPeriod`
    /// for zero durations, and `BuilderError::PollPeriodTooShort` if the
    /// period does not cover the settle waits of one cycle.
    pub fn build(self) -> Result<Config, BuilderError> {
        let config = self.config;
        if config.settle_time_us == 0 {
            return Err(BuilderError::ZeroSettleTime);
        }
        if config.poll_period_ms == 0 {
            return Err(BuilderError::ZeroPollPeriod);
        }
        let cycle_settle_us = config.cycle_settle_us();
        if config.poll_period_ms.saturating_mul(1_000) <= cycle_settle_us {
            return Err(BuilderError::PollPeriodTooShort {
                poll_period_ms: config.poll_period_ms,
                cycle_settle_us,
            });
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Builder::new().build().unwrap();
        assert_eq!(config.settle_time_us, 10);
        assert_eq!(config.poll_period_ms, 8);
        assert_eq!(config.reset_pulses, 3);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_zero_durations_rejected() {
        assert_eq!(
            Builder::new().settle_time_us(0).build(),
            Err(BuilderError::ZeroSettleTime)
        );
        assert_eq!(
            Builder::new().poll_period_ms(0).build(),
            Err(BuilderError::ZeroPollPeriod)
        );
    }

    #[test]
    fn test_period_must_cover_cycle_settle() {
        // 8 writes x 200us = 1.6ms of settling
        let result = Builder::new().settle_time_us(200).poll_period_ms(1).build();
        assert_eq!(
            result,
            Err(BuilderError::PollPeriodTooShort {
                poll_period_ms: 1,
                cycle_settle_us: 1_600,
            })
        );
        assert!(Builder::new().settle_time_us(200).poll_period_ms(2).build().is_ok());
    }

    #[test]
    fn test_zero_reset_pulses_allowed() {
        let config = Builder::new().reset_pulses(0).build().unwrap();
        assert_eq!(config.reset_pulses, 0);
    }
}
