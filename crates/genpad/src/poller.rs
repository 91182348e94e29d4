//! Protocol poller

use embedded_hal::delay::DelayNs;

use crate::board::drive_strobe;
use crate::config::Config;
use crate::error::Error;
use crate::gpio::{Gpio, Level};
use crate::phase::{Phase, phases_for};
use crate::variant::ControllerVariant;

/// Runs poll cycles for one detected controller variant
///
/// Created by [`Breakout::start`](crate::Breakout::start). The variant is
/// fixed for the poller's lifetime.
pub struct Poller<G, D> {
    gpio: G,
    delay: D,
    config: Config,
    variant: ControllerVariant,
}

impl<G, D> Poller<G, D>
where
    G: Gpio,
    D: DelayNs,
{
    pub(crate) fn new(gpio: G, delay: D, config: Config, variant: ControllerVariant) -> Self {
        Self {
            gpio,
            delay,
            config,
            variant,
        }
    }

    /// Controller variant this poller interprets reads for
    pub fn variant(&self) -> ControllerVariant {
        self.variant
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one poll cycle
    ///
    /// Every read immediately drives its output, so outputs update one at a
    /// time within the cycle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gpio`] and abandons the rest of the cycle if a pin
    /// operation fails. Outputs not yet reached keep their previous level.
    pub fn poll(&mut self) -> Result<(), Error<G>> {
        for phase in phases_for(self.variant) {
            self.run_phase(phase)?;
        }
        Ok(())
    }

    /// Run one poll cycle followed by the poll period sleep
    pub fn tick(&mut self) -> Result<(), Error<G>> {
        let result = self.poll();
        self.delay.delay_ms(self.config.poll_period_ms);
        result
    }

    /// Poll forever
    ///
    /// A failed cycle is logged and the loop carries on; the next cycle
    /// rewrites every output it owns.
    pub fn run(&mut self) -> ! {
        log::info!(
            "Polling {} controller every {}ms",
            self.variant,
            self.config.poll_period_ms
        );
        loop {
            if let Err(err) = self.tick() {
                log::warn!("Poll cycle failed: {}", err);
            }
        }
    }

    /// Give back the GPIO and delay
    pub fn release(self) -> (G, D) {
        (self.gpio, self.delay)
    }

    fn run_phase(&mut self, phase: &Phase) -> Result<(), Error<G>> {
        log::trace!("Phase: {}", phase.name);
        for &level in phase.before {
            self.strobe(level)?;
        }
        for route in phase.routes {
            let level = self
                .gpio
                .read(route.line.pin())
                .map_err(Error::Gpio)?;
            self.gpio
                .write(route.button.pin(), level)
                .map_err(Error::Gpio)?;
        }
        for &level in phase.after {
            self.strobe(level)?;
        }
        Ok(())
    }

    fn strobe(&mut self, level: Level) -> Result<(), Error<G>> {
        drive_strobe(
            &mut self.gpio,
            &mut self.delay,
            level,
            self.config.settle_time_us,
        )
    }
}
