//! Board bring-up
//!
//! [`Breakout`] owns the pins and the delay between power-on and the first
//! poll cycle. Starting it applies the boot bank setup, runs detection once,
//! and hands everything to a [`Poller`]. Since `start` consumes the
//! `Breakout`, detection cannot run a second time.

use embedded_hal::delay::DelayNs;

use crate::config::Config;
use crate::detect::detect;
use crate::error::Error;
use crate::gpio::{Gpio, Level};
use crate::pin_map::{BOOT_SETUP, STROBE};
use crate::poller::Poller;
use crate::variant::ControllerVariant;

/// Apply [`BOOT_SETUP`] to every bank: direction first, then levels
///
/// Leaves inputs pulled up, outputs released (high), and select high.
pub fn init_pins<G: Gpio>(gpio: &mut G) -> Result<(), Error<G>> {
    for setup in BOOT_SETUP {
        gpio.set_bank_direction(setup.bank, setup.direction)
            .map_err(Error::Gpio)?;
        gpio.write_bank(setup.bank, setup.level)
            .map_err(Error::Gpio)?;
        log::debug!(
            "Bank {:?}: direction={:#010b} level={:#010b}",
            setup.bank,
            setup.direction,
            setup.level
        );
    }
    Ok(())
}

/// Drive the select line and wait for the pad to settle
pub(crate) fn drive_strobe<G, D>(
    gpio: &mut G,
    delay: &mut D,
    level: Level,
    settle_us: u32,
) -> Result<(), Error<G>>
where
    G: Gpio,
    D: DelayNs,
{
    gpio.write(STROBE, level).map_err(Error::Gpio)?;
    delay.delay_us(settle_us);
    Ok(())
}

/// Boot stage of the breakout, before the controller type is known
pub struct Breakout<G, D> {
    gpio: G,
    delay: D,
    config: Config,
}

impl<G, D> Breakout<G, D>
where
    G: Gpio,
    D: DelayNs,
{
    pub fn new(gpio: G, delay: D, config: Config) -> Self {
        Self {
            gpio,
            delay,
            config,
        }
    }

    /// Set up pins, detect the controller, and return the poller
    ///
    /// # Errors
    ///
    /// Returns [`Error::Gpio`] if a pin operation fails.
    pub fn start(mut self) -> Result<Poller<G, D>, Error<G>> {
        init_pins(&mut self.gpio)?;
        let variant = detect(&mut self.gpio, &mut self.delay, &self.config)?;
        Ok(Poller::new(self.gpio, self.delay, self.config, variant))
    }

    /// Like [`start`](Self::start), but never fails
    ///
    /// If pin setup or detection hits a GPIO error, logs it and polls as
    /// [`ControllerVariant::default`] (six-button). The pin setup is not
    /// retried; the first poll cycles rewrite every output they own anyway.
    pub fn start_or_default(mut self) -> Poller<G, D> {
        let variant = init_pins(&mut self.gpio)
            .and_then(|()| detect(&mut self.gpio, &mut self.delay, &self.config))
            .unwrap_or_else(|err| {
                let fallback = ControllerVariant::default();
                log::warn!("Boot failed ({}), polling as {}", err, fallback);
                fallback
            });
        Poller::new(self.gpio, self.delay, self.config, variant)
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give back the GPIO and delay without starting
    pub fn release(self) -> (G, D) {
        (self.gpio, self.delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_port::MockPort;
    use crate::pin_map::{Bank, Button};

    #[test]
    fn test_boot_pattern() {
        let mut port = MockPort::new();
        init_pins(&mut port).unwrap();

        assert_eq!(port.bank_direction(Bank::A), 0x00);
        assert_eq!(port.bank_level(Bank::A), 0xFF);
        assert_eq!(port.bank_direction(Bank::B), 0xFF);
        assert_eq!(port.bank_level(Bank::B), 0xFF);
        assert_eq!(port.bank_direction(Bank::D), 0x74);
        assert_eq!(port.bank_level(Bank::D), 0x7F);

        for button in Button::ALL {
            assert_eq!(port.output_level(button), Level::High, "{button:?}");
        }
        assert_eq!(port.strobe_level(), Level::High);
    }

    #[test]
    fn test_start_locks_variant() {
        let port = MockPort::new();
        port.drive_by_select(crate::JoystickLine::AB, Level::High, Level::Low);
        let breakout = Breakout::new(port.clone(), port.delay(), Config::default());
        let poller = breakout.start().unwrap();
        assert_eq!(poller.variant(), ControllerVariant::ThreeButton);
    }

    #[test]
    fn test_gpio_failure_aborts_start() {
        let port = MockPort::new();
        port.fail_after(2);
        let breakout = Breakout::new(port.clone(), port.delay(), Config::default());
        assert!(matches!(breakout.start(), Err(Error::Gpio(_))));
    }

    #[test]
    fn test_failed_boot_falls_back_to_six_button() {
        let port = MockPort::new();
        port.drive_by_select(crate::JoystickLine::AB, Level::Low, Level::High);
        // pin setup succeeds, the first select write fails
        port.fail_after(6);
        let breakout = Breakout::new(port.clone(), port.delay(), Config::default());
        let mut poller = breakout.start_or_default();
        assert_eq!(poller.variant(), ControllerVariant::SixButton);

        port.clear_failure();
        poller.poll().unwrap();
        assert_eq!(port.output_level(Button::A), Level::High);
    }
}
