//! Boot-time controller detection
//!
//! There is no switch on the board to pick a stick type, so the type is
//! read from the shared A/B line at power-on:
//!
//! - Select high, line pulled low: a legacy two-button stick's fire button
//!   sits on this pin, and its power comes from select. Select stays high.
//! - Select low, line pulled low: the user is holding A on a Genesis pad to
//!   force three-button mode.
//! - Otherwise: six-button pad. It gets a few select pulses to reset its
//!   multiplexer before polling starts.

use embedded_hal::delay::DelayNs;

use crate::board::drive_strobe;
use crate::config::Config;
use crate::error::Error;
use crate::gpio::{Gpio, Level};
use crate::pin_map::JoystickLine;
use crate::variant::ControllerVariant;

/// Probe the attached stick and leave select in the idle state for polling
///
/// Call exactly once, after the boot pin setup and before the first poll
/// cycle. [`Breakout::start`](crate::Breakout::start) does both.
///
/// # Errors
///
/// Only [`Error::Gpio`]; every set of readings maps to a variant.
pub fn detect<G, D>(
    gpio: &mut G,
    delay: &mut D,
    config: &Config,
) -> Result<ControllerVariant, Error<G>>
where
    G: Gpio,
    D: DelayNs,
{
    let settle = config.settle_time_us;

    // With select high the A/B line carries B, or a legacy stick's fire button.
    drive_strobe(gpio, delay, Level::High, settle)?;
    if probe_asserted(gpio)? {
        log::info!("Fire held with select high: legacy two-button stick, select stays high");
        return Ok(ControllerVariant::AlternateTwoButton);
    }

    drive_strobe(gpio, delay, Level::Low, settle)?;
    let variant = if probe_asserted(gpio)? {
        ControllerVariant::ThreeButton
    } else {
        ControllerVariant::SixButton
    };

    drive_strobe(gpio, delay, Level::High, settle)?;

    if variant == ControllerVariant::SixButton {
        for _ in 0..config.reset_pulses {
            drive_strobe(gpio, delay, Level::Low, settle)?;
            drive_strobe(gpio, delay, Level::High, settle)?;
        }
        log::debug!("Sent {} reset pulses", config.reset_pulses);
    }

    log::info!("Detected {} controller", variant);
    Ok(variant)
}

/// Inverted read of the shared A/B line: low means held
fn probe_asserted<G: Gpio>(gpio: &mut G) -> Result<bool, Error<G>> {
    let pin = JoystickLine::AB.pin();
    let level = gpio.read(pin).map_err(Error::Gpio)?;
    log::debug!("Probe A/B line: {:?}", level);
    Ok(pin.polarity.is_active(level))
}
